use bitchess::chess::*;

fn sq(name: &str) -> Square {
    parse_square(name).unwrap()
}

fn mv(from: &str, to: &str, kind: MoveKind) -> Move {
    Move::new(sq(from), sq(to), kind)
}

fn generated(fen: &str, generate: fn(&Position, &mut MoveList)) -> MoveList {
    let position = Position::from_fen(fen).unwrap();
    let mut moves = MoveList::new();
    generate(&position, &mut moves);
    moves
}

fn legal(fen: &str) -> MoveList {
    legal_moves(&Position::from_fen(fen).unwrap())
}

#[test]
fn starting_pawns_push_once_and_twice() {
    let moves = generated(STARTING_FEN, generate_pawn_moves);
    assert_eq!(moves.len(), 16);

    let quiet = moves.iter().filter(|mov| mov.get_kind() == MoveKind::Quiet).count();
    let double = moves
        .iter()
        .filter(|mov| mov.get_kind() == MoveKind::DoublePawnPush)
        .count();
    assert_eq!((quiet, double), (8, 8));
    assert!(moves.iter().all(|mov| !mov.get_kind().is_capture()));
    assert!(moves.contains(&mv("a2", "a3", MoveKind::Quiet)));
    assert!(moves.contains(&mv("h2", "h4", MoveKind::DoublePawnPush)));
}

#[test]
fn black_pawns_push_towards_rank_one() {
    let moves = generated(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        generate_pawn_moves,
    );
    assert_eq!(moves.len(), 16);
    assert!(moves.contains(&mv("e7", "e6", MoveKind::Quiet)));
    assert!(moves.contains(&mv("e7", "e5", MoveKind::DoublePawnPush)));
}

#[test]
fn blocked_pawn_only_captures() {
    let moves = generated("8/8/8/3pp3/4P3/8/8/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(&moves[..], &[mv("e4", "d5", MoveKind::Capture)]);
}

#[test]
fn double_push_needs_both_squares_empty() {
    let moves = generated("8/8/8/8/4p3/8/4P3/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(&moves[..], &[mv("e2", "e3", MoveKind::Quiet)]);

    let moves = generated("8/8/8/8/8/4p3/4P3/8 w - - 0 1", generate_pawn_moves);
    assert!(moves.is_empty());
}

#[test]
fn black_pawn_offsets_recover_the_origin() {
    let moves = generated("8/8/8/8/3p4/4P3/8/8 b - - 0 1", generate_pawn_moves);
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&mv("d4", "d3", MoveKind::Quiet)));
    assert!(moves.contains(&mv("d4", "e3", MoveKind::Capture)));
}

#[test]
fn pawn_captures_do_not_wrap_around_the_board() {
    let moves = generated("8/8/8/7p/P7/8/8/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(&moves[..], &[mv("a4", "a5", MoveKind::Quiet)]);

    let moves = generated("8/8/p7/8/7P/8/8/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(&moves[..], &[mv("h4", "h5", MoveKind::Quiet)]);

    let moves = generated("8/8/8/8/p7/7P/8/8 b - - 0 1", generate_pawn_moves);
    assert_eq!(&moves[..], &[mv("a4", "a3", MoveKind::Quiet)]);
}

#[test]
fn promotion_emits_all_four_pieces() {
    let moves = generated("8/4P3/8/8/8/8/8/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|mov| mov.get_from() == sq("e7") && mov.get_to() == sq("e8")));

    let mut pieces: Vec<PieceKind> = moves
        .iter()
        .filter_map(|mov| mov.get_kind().promotion_piece())
        .collect();
    pieces.sort();
    assert_eq!(
        pieces,
        vec![PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen]
    );
}

#[test]
fn promotion_captures_on_both_diagonals() {
    let moves = generated("3r1r2/4P3/8/8/8/8/8/8 w - - 0 1", generate_pawn_moves);
    assert_eq!(moves.len(), 12);
    let captures = moves.iter().filter(|mov| mov.get_kind().is_capture()).count();
    assert_eq!(captures, 8);
    assert!(moves.contains(&mv("e7", "f8", MoveKind::QueenPromotionCapture)));
    assert!(moves.contains(&mv("e7", "d8", MoveKind::KnightPromotionCapture)));

    let moves = generated("8/8/8/8/8/8/1p6/R7 b - - 0 1", generate_pawn_moves);
    assert_eq!(moves.len(), 8);
    assert!(moves.contains(&mv("b2", "a1", MoveKind::RookPromotionCapture)));
    assert!(moves.contains(&mv("b2", "b1", MoveKind::BishopPromotion)));
}

#[test]
fn en_passant_is_generated_for_the_adjacent_pawn() {
    let moves = generated("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1", generate_pawn_moves);
    assert!(moves.contains(&mv("e5", "d6", MoveKind::EnPassantCapture)));
    assert!(moves.contains(&mv("e5", "e6", MoveKind::Quiet)));
    assert_eq!(moves.len(), 2);

    let moves = generated("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1", generate_pawn_moves);
    assert_eq!(moves.len(), 1);
}

#[test]
fn knight_moves_stay_on_the_board() {
    assert_eq!(generated("8/8/8/8/8/8/8/N7 w - - 0 1", generate_knight_moves).len(), 2);
    assert_eq!(generated("7N/8/8/8/8/8/8/8 w - - 0 1", generate_knight_moves).len(), 2);
    assert_eq!(generated("8/8/8/8/3N4/8/8/8 w - - 0 1", generate_knight_moves).len(), 8);
    assert_eq!(generated("8/8/8/8/8/8/6N1/8 w - - 0 1", generate_knight_moves).len(), 4);

    let moves = generated("8/8/8/8/8/1p6/2P5/N7 w - - 0 1", generate_knight_moves);
    assert_eq!(&moves[..], &[mv("a1", "b3", MoveKind::Capture)]);
}

#[test]
fn king_steps_to_adjacent_squares() {
    assert_eq!(generated("8/8/8/8/8/8/8/4K3 w - - 0 1", generate_king_moves).len(), 5);
    assert_eq!(generated("8/8/8/8/3K4/8/8/8 w - - 0 1", generate_king_moves).len(), 8);
    assert_eq!(generated("7K/8/8/8/8/8/8/8 w - - 0 1", generate_king_moves).len(), 3);
}

#[test]
fn sliders_cast_rays_until_blocked() {
    assert_eq!(generated("8/8/8/8/8/8/8/R7 w - - 0 1", generate_rook_moves).len(), 14);
    assert_eq!(generated("8/8/8/8/3B4/8/8/8 w - - 0 1", generate_bishop_moves).len(), 13);
    assert_eq!(generated("8/8/8/8/3Q4/8/8/8 w - - 0 1", generate_queen_moves).len(), 27);

    let moves = generated("8/8/8/8/8/8/p7/R6P w - - 0 1", generate_rook_moves);
    assert_eq!(moves.len(), 7);
    assert!(moves.contains(&mv("a1", "a2", MoveKind::Capture)));
    assert!(moves.contains(&mv("a1", "g1", MoveKind::Quiet)));
    assert!(!moves.contains(&mv("a1", "h1", MoveKind::Capture)));
    assert!(!moves.contains(&mv("a1", "a3", MoveKind::Quiet)));

    let moves = generated("8/8/8/8/8/2p5/1P6/B7 w - - 0 1", generate_bishop_moves);
    assert!(moves.is_empty());
}

#[test]
fn queen_moves_are_bishop_plus_rook() {
    let fen = "8/1p4p1/8/8/3Q4/8/5P2/8 w - - 0 1";
    let queen = generated(fen, generate_queen_moves);

    let as_rook = generated(&fen.replace('Q', "R"), generate_rook_moves);
    let as_bishop = generated(&fen.replace('Q', "B"), generate_bishop_moves);
    assert_eq!(queen.len(), as_rook.len() + as_bishop.len());
    assert!(as_rook.iter().chain(as_bishop.iter()).all(|mov| queen.contains(mov)));
}

#[test]
fn starting_position_has_twenty_moves() {
    let position = Position::starting();
    assert_eq!(pseudo_legal_moves(&position).len(), 20);
    assert_eq!(legal_moves(&position).len(), 20);
}

#[test]
fn generation_leaves_the_position_untouched() {
    let position =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let before = position;
    let mut moves = MoveList::new();
    generate_legal(&position, &mut moves);
    generate_pseudo_legal(&position, &mut moves);
    assert_eq!(position, before);
}

#[test]
fn generators_append_to_the_callers_list() {
    let position = Position::starting();
    let mut moves = MoveList::new();
    generate_knight_moves(&position, &mut moves);
    generate_pawn_moves(&position, &mut moves);
    assert_eq!(moves.len(), 20);
}

#[test]
fn piece_rules_follow_piece_kind_order() {
    let position = Position::from_fen("8/8/8/8/3N4/8/8/8 w - - 0 1").unwrap();
    let mut moves = MoveList::new();
    (PIECE_RULES[PieceKind::Knight as usize].generate)(&position, &mut moves);
    assert_eq!(moves.len(), 8);

    let d4 = sq("d4");
    let attacks = PIECE_RULES[PieceKind::Knight as usize].attacks;
    assert_eq!(attacks(d4, Color::White, 0).count_ones(), 8);
    let attacks = PIECE_RULES[PieceKind::Rook as usize].attacks;
    assert_eq!(attacks(d4, Color::White, 0).count_ones(), 14);
    let attacks = PIECE_RULES[PieceKind::Pawn as usize].attacks;
    assert_eq!(attacks(d4, Color::Black, 0), bit(sq("c3")) | bit(sq("e3")));
}

#[test]
fn castling_is_generated_when_path_is_clear() {
    let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(moves.contains(&mv("e1", "g1", MoveKind::KingCastle)));
    assert!(moves.contains(&mv("e1", "c1", MoveKind::QueenCastle)));

    let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    assert!(moves.contains(&mv("e8", "g8", MoveKind::KingCastle)));
    assert!(moves.contains(&mv("e8", "c8", MoveKind::QueenCastle)));

    let moves = legal("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
    assert!(!moves.iter().any(|mov| mov.get_kind().is_castle()));

    let moves = legal("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
    assert!(!moves.iter().any(|mov| mov.get_kind().is_castle()));
}

#[test]
fn castling_through_an_attacked_square_is_illegal() {
    let fen = "r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1";
    let position = Position::from_fen(fen).unwrap();
    let pseudo = pseudo_legal_moves(&position);
    assert!(pseudo.contains(&mv("e1", "g1", MoveKind::KingCastle)));

    let moves = legal_moves(&position);
    assert!(!moves.contains(&mv("e1", "g1", MoveKind::KingCastle)));
    assert!(moves.contains(&mv("e1", "c1", MoveKind::QueenCastle)));

    // No castling out of check
    let moves = legal("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
    assert!(!moves.iter().any(|mov| mov.get_kind().is_castle()));
}

#[test]
fn check_detection() {
    let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
    assert!(is_in_check(&position));
    assert!(is_square_attacked(&position, sq("e1"), Color::Black));
    assert!(!is_square_attacked(&position, sq("e2"), Color::Black));

    let moves = legal_moves(&position);
    assert_eq!(moves.len(), 3);
    for to in ["d2", "e2", "f2"] {
        assert!(moves.contains(&mv("e1", to, MoveKind::Quiet)));
    }

    assert!(!is_in_check(&Position::starting()));
}

#[test]
fn pinned_piece_cannot_move() {
    let position = Position::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
    assert!(pseudo_legal_moves(&position).iter().any(|mov| mov.get_from() == sq("e2")));

    let moves = legal_moves(&position);
    assert_eq!(moves.len(), 4);
    assert!(moves.iter().all(|mov| mov.get_from() == sq("e1")));
}

#[test]
fn attacked_squares_cover_the_third_rank_at_start() {
    let position = Position::starting();
    assert_eq!(attacked_squares(&position, Color::White) & RANK_3, RANK_3);
    assert_eq!(attacked_squares(&position, Color::Black) & RANK_6, RANK_6);
    assert_eq!(attacked_squares(&position, Color::White) & RANK_5, 0);
}

#[test]
fn positions_without_kings_are_never_in_check() {
    let moves = legal("8/8/8/3pp3/4P3/8/8/8 w - - 0 1");
    assert_eq!(&moves[..], &[mv("e4", "d5", MoveKind::Capture)]);
}

#[test]
fn legal_moves_match_appending_generation() {
    let position = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();

    let mut appended = MoveList::new();
    generate_legal(&position, &mut appended);

    assert_eq!(&legal_moves(&position)[..], &appended[..]);
    assert_eq!(appended.len(), 48);
}

#[test]
fn step_offsets_follow_square_deltas() {
    use bitchess::chess::attacks::tables::{self, Offset};

    assert_eq!(Offset::from_step(NORTH_EAST), Offset { rank: 1, file: 1 });
    assert_eq!(Offset::from_step(SOUTH_WEST), Offset { rank: -1, file: -1 });
    assert_eq!(Offset::from_step(2 * SOUTH + EAST), Offset { rank: -2, file: 1 });
    assert_eq!(Offset::from_step(NORTH + 2 * WEST), Offset { rank: 1, file: -2 });

    for (offsets, steps) in [
        (&tables::PAWN_CAPTURE_OFFSETS_WHITE[..], &[NORTH_WEST, NORTH_EAST][..]),
        (&tables::PAWN_CAPTURE_OFFSETS_BLACK[..], &[SOUTH_WEST, SOUTH_EAST][..]),
    ] {
        for (offset, &step) in offsets.iter().zip(steps) {
            assert_eq!(offset.rank * 8 + offset.file, step);
        }
    }
}
