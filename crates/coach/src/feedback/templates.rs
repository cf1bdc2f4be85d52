//! Hand-authored sentence pools.
//!
//! Placeholders: `{piece}` (lowercase piece name), `{square}` (destination),
//! `{threat}` (first threat sentence, verbatim), `{lead}` (material lead in
//! points).

use crate::context::GamePhase;
use crate::feedback::Perspective;
use crate::quality::MoveQuality;

pub type Pool = &'static [&'static str];

/// Base pool for a (phase, quality, perspective) combination
pub fn base_pool(phase: GamePhase, quality: MoveQuality, perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => player_pool(phase, quality),
        Perspective::Engine => engine_pool(phase, quality),
        Perspective::Hint => hint_pool(phase, quality),
    }
}

fn player_pool(phase: GamePhase, quality: MoveQuality) -> Pool {
    use GamePhase::*;
    use MoveQuality::*;

    match (phase, quality) {
        (Opening, Excellent) => &[
            "Brilliant! Your {piece} to {square} wins material right out of the opening.",
            "Excellent capture! Your {piece} on {square} punishes that loose piece.",
            "Sharp play! Taking on {square} with your {piece} gives you a real edge early on.",
            "Great eye! Your {piece} grabs something valuable on {square}.",
        ],
        (Opening, Good) => &[
            "Good move! Your {piece} to {square} helps your development.",
            "Nice! Putting your {piece} on {square} fights for the center.",
            "Solid opening play: your {piece} on {square} is well placed.",
            "That's a principled move. Your {piece} belongs on {square}.",
        ],
        (Opening, Acceptable) => &[
            "Your {piece} to {square} is playable, but keep developing your pieces.",
            "Okay move. Your {piece} on {square} is fine, though there were more active options.",
            "Not bad. Just remember to get your knights and bishops out soon.",
        ],
        (Opening, Normal) => &[
            "You moved your {piece} to {square}. Try to focus on controlling the center.",
            "Your {piece} goes to {square}. Think about developing a new piece next.",
            "A quiet {piece} move to {square}. Early on, every tempo counts.",
        ],
        (Middlegame, Excellent) => &[
            "Excellent! Your {piece} takes on {square} and wins material.",
            "Great tactic! Your {piece} on {square} collects a valuable piece.",
            "Well spotted! That capture on {square} tips the balance your way.",
            "Superb! Your {piece} cashes in on {square}.",
        ],
        (Middlegame, Good) => &[
            "Good move! Your {piece} on {square} is doing real work.",
            "Nice trade. Your {piece} on {square} keeps things under control.",
            "Strong choice: your {piece} to {square} improves your position.",
        ],
        (Middlegame, Acceptable) => &[
            "Your {piece} to {square} is reasonable, but look for more active plans.",
            "Playable. Your {piece} on {square} holds, though it doesn't press.",
            "Fine, but check whether your {piece} is safe on {square}.",
        ],
        (Middlegame, Normal) => &[
            "You played your {piece} to {square}. What is your plan from here?",
            "Your {piece} lands on {square}. Look for targets in your opponent's camp.",
            "A calm {piece} move to {square}. Keep an eye on loose pieces.",
        ],
        (Endgame, Excellent) => &[
            "Excellent! Winning material with your {piece} on {square} should decide the endgame.",
            "Great capture! Your {piece} on {square} leaves your opponent with very little.",
            "Perfect! That {piece} capture on {square} simplifies into a winning ending.",
        ],
        (Endgame, Good) => &[
            "Good technique. Your {piece} on {square} is exactly where it should be.",
            "Nice endgame move! Your {piece} to {square} keeps the pressure on.",
            "Well played: your {piece} on {square} makes progress.",
        ],
        (Endgame, Acceptable) => &[
            "Your {piece} to {square} is okay. In endgames, activate your king too.",
            "Playable, but in the endgame every move counts. Is {square} the best square?",
            "Fine. Remember that passed pawns must be pushed.",
        ],
        (Endgame, Normal) => &[
            "Your {piece} goes to {square}. Think about your king's activity.",
            "You moved your {piece} to {square}. Which pawn can become a queen?",
            "A quiet {piece} move to {square}. Look for ways to create a passed pawn.",
        ],
    }
}

fn engine_pool(phase: GamePhase, quality: MoveQuality) -> Pool {
    use GamePhase::*;
    use MoveQuality::*;

    match (phase, quality) {
        (Opening, Excellent) => &[
            "I'll take that! My {piece} captures on {square}.",
            "Thanks for the gift. My {piece} grabs material on {square}.",
            "My {piece} to {square} wins material already.",
            "You left something hanging, so my {piece} takes on {square}.",
        ],
        (Opening, Good) => &[
            "I'm developing my {piece} to {square}.",
            "My {piece} goes to {square} to fight for the center.",
            "I'll put my {piece} on {square}, a classical setup.",
        ],
        (Opening, Acceptable) => &[
            "My {piece} goes to {square}. Let's see how you respond.",
            "I'll play my {piece} to {square} for now.",
            "I'm trying something a little different with my {piece} on {square}.",
        ],
        (Opening, Normal) => &[
            "I'm moving my {piece} to {square}.",
            "My {piece} steps to {square}.",
            "A quiet move: my {piece} to {square}.",
        ],
        (Middlegame, Excellent) => &[
            "My {piece} captures on {square} and wins material!",
            "I found a tactic: my {piece} takes on {square}.",
            "That piece was loose, so my {piece} collects it on {square}.",
        ],
        (Middlegame, Good) => &[
            "My {piece} to {square} improves my position.",
            "I'm trading with my {piece} on {square}.",
            "My {piece} finds a strong post on {square}.",
        ],
        (Middlegame, Acceptable) => &[
            "I'll take on {square} with my {piece}, even if it costs me a little.",
            "My {piece} goes to {square}. Not my most ambitious move.",
            "I'm repositioning my {piece} to {square}.",
        ],
        (Middlegame, Normal) => &[
            "I'm moving my {piece} to {square}.",
            "My {piece} heads to {square}. What will you do about it?",
            "My {piece} settles on {square} for now.",
        ],
        (Endgame, Excellent) => &[
            "My {piece} wins material on {square}. The endgame is looking good for me.",
            "I capture on {square} with my {piece}. That should be decisive.",
            "My {piece} takes on {square}. Fewer pieces, more problems for you.",
        ],
        (Endgame, Good) => &[
            "My {piece} to {square} keeps my endgame on track.",
            "I'm activating my {piece} on {square}.",
            "My {piece} goes to {square}. Every tempo matters now.",
        ],
        (Endgame, Acceptable) => &[
            "My {piece} goes to {square}. I'm still looking for a plan.",
            "I'll shuffle my {piece} to {square}.",
            "My {piece} to {square}. The endgame is tricky.",
        ],
        (Endgame, Normal) => &[
            "I'm moving my {piece} to {square}.",
            "My {piece} steps over to {square}.",
            "My {piece} heads for {square}. Can you stop my pawns?",
        ],
    }
}

fn hint_pool(phase: GamePhase, quality: MoveQuality) -> Pool {
    use GamePhase::*;
    use MoveQuality::*;

    match (phase, quality) {
        (Opening, Excellent) => &[
            "Taking on {square} with your {piece} would win material.",
            "Your {piece} could capture on {square}; that would be a great start.",
            "Look at {square}: your {piece} would grab a free piece there.",
            "Capturing on {square} with your {piece} would punish that mistake.",
        ],
        (Opening, Good) => &[
            "Developing your {piece} to {square} would be a solid choice.",
            "Your {piece} would stand well on {square}.",
            "Moving your {piece} to {square} would help you fight for the center.",
        ],
        (Opening, Acceptable) => &[
            "Your {piece} to {square} would be playable.",
            "Consider your {piece} to {square}; it would keep things simple.",
            "Moving your {piece} to {square} would be a reasonable option.",
        ],
        (Opening, Normal) => &[
            "You could move your {piece} to {square}.",
            "Your {piece} to {square} would be a quiet way to continue.",
            "Try your {piece} to {square}; it would keep your options open.",
        ],
        (Middlegame, Excellent) => &[
            "Your {piece} could take on {square} and win material.",
            "There's a tactic: capturing on {square} with your {piece} would win.",
            "Taking on {square} with your {piece} would tip the balance.",
        ],
        (Middlegame, Good) => &[
            "Your {piece} to {square} would improve your position.",
            "Trading with your {piece} on {square} would be a good idea.",
            "Your {piece} would find a strong post on {square}.",
        ],
        (Middlegame, Acceptable) => &[
            "Your {piece} to {square} would be reasonable here.",
            "You could play your {piece} to {square}, though it would not press much.",
            "Consider your {piece} to {square}; it would hold the position.",
        ],
        (Middlegame, Normal) => &[
            "Your {piece} to {square} would be a calm continuation.",
            "You could reposition your {piece} to {square}.",
            "Moving your {piece} to {square} would keep things steady.",
        ],
        (Endgame, Excellent) => &[
            "Taking on {square} with your {piece} would likely decide the endgame.",
            "Your {piece} could win material on {square}; that would simplify nicely.",
            "Capturing on {square} with your {piece} would leave your opponent with little.",
        ],
        (Endgame, Good) => &[
            "Your {piece} to {square} would be good endgame technique.",
            "Activating your {piece} on {square} would make progress.",
            "Your {piece} would be well placed on {square}.",
        ],
        (Endgame, Acceptable) => &[
            "Your {piece} to {square} would be okay.",
            "You could play your {piece} to {square}, but remember your king.",
            "Moving your {piece} to {square} would keep the balance.",
        ],
        (Endgame, Normal) => &[
            "Your {piece} to {square} would be a quiet move.",
            "You could bring your {piece} to {square}.",
            "Consider your {piece} to {square}; it would keep your pawns safe.",
        ],
    }
}

/// Added when the position after the move is check
pub fn check_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &[
            "Check! Your {piece} on {square} puts the king under fire.",
            "That's check. Keep the pressure on the enemy king!",
        ],
        Perspective::Engine => &[
            "Check! My {piece} on {square} is coming for your king.",
            "Check. Your king has to deal with my {piece}.",
        ],
        Perspective::Hint => &[
            "Your {piece} on {square} would give check.",
            "That would be check, forcing your opponent to respond.",
        ],
    }
}

/// Material templates when the mover's side holds the lead
pub fn material_ahead_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &[
            "You're {lead} points up in material. Trade pieces to convert your advantage.",
            "With a {lead}-point material lead, keep it simple and avoid counterplay.",
        ],
        Perspective::Engine => &[
            "I'm {lead} points ahead in material, so I'm happy to trade down.",
            "My {lead}-point material lead should carry me through.",
        ],
        Perspective::Hint => &[
            "You would stay {lead} points ahead in material.",
            "That would keep your {lead}-point material lead intact.",
        ],
    }
}

/// Material templates when the opponent holds the lead
pub fn material_behind_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &[
            "You're {lead} points down in material. Look for active counterplay.",
            "Being {lead} points behind, you need to create complications.",
        ],
        Perspective::Engine => &[
            "I'm {lead} points down in material, so I need to stir things up.",
            "You're {lead} points ahead of me. I'll have to fight for activity.",
        ],
        Perspective::Hint => &[
            "You would still be {lead} points behind in material, so stay active.",
            "Even after this you would trail by {lead} points; look for counterplay.",
        ],
    }
}

/// Added when the mover's side controls the center better
pub fn center_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &[
            "Your pieces have a firm grip on the center.",
            "You control the center, which gives your pieces more room.",
        ],
        Perspective::Engine => &[
            "My pieces control the center now.",
            "I've got the upper hand in the center.",
        ],
        Perspective::Hint => &[
            "That would strengthen your hold on the center.",
            "Your pieces would dominate the center after that.",
        ],
    }
}

/// Added when capturing tricks are available in the position
pub fn tactical_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &[
            "Tactics are in the air. Look for forks and loose pieces!",
            "There are capturing chances on the board; check every piece that can take something.",
        ],
        Perspective::Engine => &[
            "I see some tactical chances here. Careful!",
            "There are captures available. Watch for forks.",
        ],
        Perspective::Hint => &[
            "Keep an eye out for tactics; captures would be possible.",
            "There would be tactical chances after that, so calculate carefully.",
        ],
    }
}

/// Added when something valuable is attacked; quotes the first threat
pub fn threat_pool(perspective: Perspective) -> Pool {
    match perspective {
        Perspective::Player => &["Watch out! {threat}."],
        Perspective::Engine => &["Heads up: {threat}."],
        Perspective::Hint => &["Be careful: {threat}."],
    }
}
