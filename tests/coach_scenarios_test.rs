//! End-to-end scenarios across rules, analysis, classification and feedback.

mod common;

use chess_core::{Color, MoveDescriptor, Position};
use coach::analyzer::analyze;
use coach::feedback::{candidate_pool, templates};
use coach::{build_context, classify, Coach, FeedbackSelector, GamePhase, MoveQuality, Perspective};

use common::{color_swapped, pos, START_FEN};

const SAMPLE_FENS: &[&str] = &[
    START_FEN,
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    "4k3/pppp4/8/8/8/8/PPPP4/3QK3 w - - 0 1",
    "r3k2r/pp3ppp/2n5/3q4/8/2N5/PP3PPP/R2QK2R w KQkq - 0 1",
    "8/5k2/8/3P4/8/8/5K2/8 b - - 0 1",
];

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn test_metrics_mirror_under_color_swap() {
    for fen in SAMPLE_FENS {
        let original = analyze(&pos(fen));
        let mirrored = analyze(&pos(&color_swapped(fen)));

        assert_eq!(original.material.diff, -mirrored.material.diff, "{fen}");
        assert_eq!(original.material.total(), mirrored.material.total(), "{fen}");
        assert_eq!(original.king_safety.white, mirrored.king_safety.black, "{fen}");
        assert_eq!(
            original.pawn_structure.white,
            mirrored.pawn_structure.black,
            "{fen}"
        );
        assert_close(original.center_control.white, mirrored.center_control.black);
        assert_close(original.center_control.black, mirrored.center_control.white);
        assert_eq!(original.piece_activity, mirrored.piece_activity, "{fen}");
    }
}

#[test]
fn test_pawn_counts_are_bounded() {
    for fen in SAMPLE_FENS {
        let analysis = analyze(&pos(fen));
        for color in [Color::White, Color::Black] {
            let pawns = analysis.pawn_structure.for_side(color);
            assert!(pawns.total <= 8, "{fen}");
            assert!(pawns.doubled < pawns.total.max(1), "{fen}");
            assert!(pawns.isolated <= pawns.total, "{fen}");
        }
        assert!(analysis.center_control.white >= 0.0);
        assert!(analysis.center_control.black >= 0.0);
    }
}

#[test]
fn test_classification_is_deterministic() {
    for fen in SAMPLE_FENS {
        let position = pos(fen);
        for mv in position.legal_moves(None) {
            let descriptor = MoveDescriptor::from_position(
                &position,
                mv.get_source(),
                mv.get_dest(),
                mv.get_promotion(),
            )
            .expect("legal move has a piece on its source square");
            assert_eq!(
                classify(&position, &descriptor),
                classify(&position, &descriptor)
            );
        }
    }
}

#[test]
fn test_opening_pawn_push_review() {
    let start = Position::starting();
    let mv = MoveDescriptor::parse_uci(&start, "e2e4").unwrap();
    assert_eq!(classify(&start, &mv), MoveQuality::Good);

    let after = mv.apply(&start).unwrap();
    let ctx = build_context(&after);
    assert_eq!(ctx.analysis.material.total(), 78);
    assert_eq!(ctx.phase, GamePhase::Opening);
    assert!(ctx.threats.is_empty());

    let pool = candidate_pool(&ctx, MoveQuality::Good, &mv, Perspective::Player).unwrap();
    let mut coach = Coach::new(FeedbackSelector::seeded(7));
    let feedback = coach.review(&start, mv, Perspective::Player).unwrap();
    assert!(pool.contains(&feedback.message));
    assert_eq!(feedback.after.side_to_move(), Color::Black);
    assert_eq!(feedback.fen_before, START_FEN);
}

#[test]
fn test_pawn_takes_queen_is_excellent() {
    let before = pos("rnb1kbnr/pppp1ppp/8/4p3/3q4/4P3/PPPP1PPP/RNBQKBNR w KQkq - 0 3");
    let mv = MoveDescriptor::parse_uci(&before, "e3d4").unwrap();
    assert_eq!(classify(&before, &mv), MoveQuality::Excellent);

    let after = mv.apply(&before).unwrap();
    let ctx = build_context(&after);
    assert_eq!(ctx.analysis.material.lead_for(Color::White), 9);

    let pool = candidate_pool(&ctx, MoveQuality::Excellent, &mv, Perspective::Player).unwrap();
    let base = templates::base_pool(ctx.phase, MoveQuality::Excellent, Perspective::Player);
    assert!(pool.len() > base.len());
    assert!(pool.iter().any(|t| t.contains("9 points up")));
}

#[test]
fn test_opening_excellent_pool_substitutes_piece_and_square() {
    // Knight for knight is an even trade
    let before = pos("rnbqkb1r/pppppppp/8/8/4n3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let mv = MoveDescriptor::parse_uci(&before, "c3e4").unwrap();
    assert_eq!(classify(&before, &mv), MoveQuality::Good);

    // Knight for a stray queen
    let before = pos("rnbqkb1r/pppppppp/8/8/4q3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1");
    let mv = MoveDescriptor::parse_uci(&before, "c3e4").unwrap();
    assert_eq!(classify(&before, &mv), MoveQuality::Excellent);

    let after = mv.apply(&before).unwrap();
    let ctx = build_context(&after);
    assert_eq!(ctx.phase, GamePhase::Opening);

    let base =
        templates::base_pool(GamePhase::Opening, MoveQuality::Excellent, Perspective::Player);
    assert_eq!(base.len(), 4);

    let pool = candidate_pool(&ctx, MoveQuality::Excellent, &mv, Perspective::Player).unwrap();
    for t in &pool[..base.len()] {
        assert!(t.contains("knight"), "{t}");
        assert!(t.contains("e4"), "{t}");
    }
}

#[test]
fn test_review_illegal_move_leaves_position() {
    let start = Position::starting();
    let mut coach = Coach::default();
    let mv = MoveDescriptor::parse_uci(&start, "e2e5").unwrap();
    assert!(matches!(
        coach.review(&start, mv, Perspective::Player),
        Err(coach::CoachError::IllegalMove { .. })
    ));
    assert_eq!(start.to_fen(), START_FEN);
}

#[test]
fn test_full_game_to_mate() {
    let mut coach = Coach::new(FeedbackSelector::seeded(1));
    let mut position = Position::starting();
    for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        let mv = MoveDescriptor::parse_uci(&position, uci).unwrap();
        let feedback = coach.review(&position, mv, Perspective::Player).unwrap();
        assert!(!feedback.message.is_empty());
        position = feedback.after;
    }
    let ctx = build_context(&position);
    assert!(ctx.analysis.is_checkmate);
    assert_eq!(ctx.analysis.piece_activity, 0);
}

#[test]
fn test_context_json_shape() {
    // Fool's mate: the queen on h4 mates along the e1-h4 diagonal
    let ctx = build_context(&pos(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    ));
    let json = serde_json::to_value(&ctx).unwrap();

    assert_eq!(json["phase"], "opening");
    assert_eq!(json["initiative"], "attacking");
    assert_eq!(json["analysis"]["is_checkmate"], true);
    assert_eq!(json["analysis"]["material"]["diff"], 0);
    assert_eq!(json["analysis"]["pawn_structure"]["white"]["total"], 8);
    assert!(json["threats"].as_array().unwrap().is_empty());
}
