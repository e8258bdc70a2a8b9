//! Pseudo-legal and legal move generation.
//!
//! Generators are free functions over a borrowed [`Position`]; they never mutate it
//! and append into a caller-supplied [`MoveList`].

use crate::chess::{
    attacks::{self, is_king_attacked, is_square_attacked},
    bitboard::*,
    moves::{Move, MoveKind, MoveList, PROMOTION_PIECES},
    piece::*,
    position::{Castling, CastlingRights, Position},
};

/// Per-kind generation and attack functions, indexed by `PieceKind as usize`.
#[derive(Clone, Copy)]
pub struct PieceRules {
    pub generate: fn(&Position, &mut MoveList),
    pub attacks: fn(Square, Color, Bitboard) -> Bitboard,
}

pub const PIECE_RULES: [PieceRules; 6] = [
    PieceRules {
        generate: generate_pawn_moves,
        attacks: attacks::pawn_attacks,
    },
    PieceRules {
        generate: generate_knight_moves,
        attacks: attacks::knight_attacks,
    },
    PieceRules {
        generate: generate_bishop_moves,
        attacks: attacks::bishop_attacks,
    },
    PieceRules {
        generate: generate_rook_moves,
        attacks: attacks::rook_attacks,
    },
    PieceRules {
        generate: generate_queen_moves,
        attacks: attacks::queen_attacks,
    },
    PieceRules {
        generate: generate_king_moves,
        attacks: attacks::king_attacks,
    },
];

/// Shift helpers and matching square offsets for one side's pawns.
struct PawnDirections {
    push: fn(Bitboard) -> Bitboard,
    push_offset: i8,
    /// Destination rank of a single push that may continue to a double push.
    double_push_rank: Bitboard,
    promotion_rank: Bitboard,
    /// Rank an en passant target square must lie on.
    en_passant_rank: Bitboard,
    captures: [(fn(Bitboard) -> Bitboard, i8); 2],
}

const PAWN_DIRECTIONS: [PawnDirections; 2] = [
    PawnDirections {
        push: shift_north,
        push_offset: NORTH,
        double_push_rank: RANK_3,
        promotion_rank: RANK_8,
        en_passant_rank: RANK_6,
        captures: [(shift_north_west, NORTH_WEST), (shift_north_east, NORTH_EAST)],
    },
    PawnDirections {
        push: shift_south,
        push_offset: SOUTH,
        double_push_rank: RANK_6,
        promotion_rank: RANK_1,
        en_passant_rank: RANK_3,
        captures: [(shift_south_west, SOUTH_WEST), (shift_south_east, SOUTH_EAST)],
    },
];

struct CastleRule {
    right: CastlingRights,
    kind: MoveKind,
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    /// Squares between king and rook.
    must_be_empty: Bitboard,
    /// Squares the king stands on, crosses, or lands on.
    king_path: [Square; 3],
}

const CASTLE_RULES: [[CastleRule; 2]; 2] = [
    [
        CastleRule {
            right: Castling::WK,
            kind: MoveKind::KingCastle,
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            must_be_empty: 0x60, // f1 g1
            king_path: [4, 5, 6],
        },
        CastleRule {
            right: Castling::WQ,
            kind: MoveKind::QueenCastle,
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            must_be_empty: 0x0E, // b1 c1 d1
            king_path: [4, 3, 2],
        },
    ],
    [
        CastleRule {
            right: Castling::BK,
            kind: MoveKind::KingCastle,
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            must_be_empty: 0x60 << 56, // f8 g8
            king_path: [60, 61, 62],
        },
        CastleRule {
            right: Castling::BQ,
            kind: MoveKind::QueenCastle,
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            must_be_empty: 0x0E << 56, // b8 c8 d8
            king_path: [60, 59, 58],
        },
    ],
];

#[inline(always)]
fn castle_rule(color: Color, kind: MoveKind) -> &'static CastleRule {
    let side = if kind == MoveKind::KingCastle { 0 } else { 1 };
    &CASTLE_RULES[color as usize][side]
}

/// Adds one move per target bit, recovering the origin as `to - offset`.
#[inline(always)]
fn push_targets(moves: &mut MoveList, targets: Bitboard, offset: i8, kind: MoveKind) {
    for to in targets.ones_iter() {
        let from = (to as i8 - offset) as Square;
        moves.push(Move::new(from, to, kind));
    }
}

/// Adds the four promotion moves for every target bit.
#[inline(always)]
fn push_promotions(moves: &mut MoveList, targets: Bitboard, offset: i8, capture: bool) {
    for to in targets.ones_iter() {
        let from = (to as i8 - offset) as Square;
        for piece in PROMOTION_PIECES {
            moves.push(Move::new(from, to, MoveKind::promotion(piece, capture)));
        }
    }
}

pub fn generate_pawn_moves(position: &Position, moves: &mut MoveList) {
    let color = position.side_to_move();
    let directions = &PAWN_DIRECTIONS[color as usize];

    let pawns = position.piece_bitboard(color, PieceKind::Pawn);
    let empty = !position.occupied();
    let enemies = position.occupied_by(color.toggle());

    // Single and double pushes
    let single = (directions.push)(pawns) & empty;
    push_targets(
        moves,
        single & !directions.promotion_rank,
        directions.push_offset,
        MoveKind::Quiet,
    );
    push_promotions(
        moves,
        single & directions.promotion_rank,
        directions.push_offset,
        false,
    );

    let double = (directions.push)(single & directions.double_push_rank) & empty;
    push_targets(
        moves,
        double,
        2 * directions.push_offset,
        MoveKind::DoublePawnPush,
    );

    // Diagonal captures
    let en_passant = position
        .en_passant_square()
        .map_or(0, bit)
        & directions.en_passant_rank
        & empty;

    for (shift, offset) in directions.captures {
        let reach = shift(pawns);
        let captures = reach & enemies;

        push_targets(
            moves,
            captures & !directions.promotion_rank,
            offset,
            MoveKind::Capture,
        );
        push_promotions(moves, captures & directions.promotion_rank, offset, true);
        push_targets(moves, reach & en_passant, offset, MoveKind::EnPassantCapture);
    }
}

/// Table-driven generation for every non-pawn kind: attacked squares not held
/// by a friendly piece, split into captures and quiet moves.
fn generate_piece_moves(position: &Position, moves: &mut MoveList, kind: PieceKind) {
    let color = position.side_to_move();
    let friendly = position.occupied_by(color);
    let enemies = position.occupied_by(color.toggle());
    let occupancy = friendly | enemies;
    let attacks = PIECE_RULES[kind as usize].attacks;

    for from in position.piece_bitboard(color, kind).ones_iter() {
        let targets = attacks(from, color, occupancy) & !friendly;

        for to in (targets & enemies).ones_iter() {
            moves.push(Move::new(from, to, MoveKind::Capture));
        }
        for to in (targets & !enemies).ones_iter() {
            moves.push(Move::new(from, to, MoveKind::Quiet));
        }
    }
}

pub fn generate_knight_moves(position: &Position, moves: &mut MoveList) {
    generate_piece_moves(position, moves, PieceKind::Knight);
}

pub fn generate_bishop_moves(position: &Position, moves: &mut MoveList) {
    generate_piece_moves(position, moves, PieceKind::Bishop);
}

pub fn generate_rook_moves(position: &Position, moves: &mut MoveList) {
    generate_piece_moves(position, moves, PieceKind::Rook);
}

pub fn generate_queen_moves(position: &Position, moves: &mut MoveList) {
    generate_piece_moves(position, moves, PieceKind::Queen);
}

/// King steps plus castles whose right is held, whose king and rook are home,
/// and whose in-between squares are empty. Attacked squares are checked by
/// [`generate_legal`].
pub fn generate_king_moves(position: &Position, moves: &mut MoveList) {
    generate_piece_moves(position, moves, PieceKind::King);

    let color = position.side_to_move();
    let occupancy = position.occupied();
    let king = position.piece_bitboard(color, PieceKind::King);
    let rooks = position.piece_bitboard(color, PieceKind::Rook);

    for rule in &CASTLE_RULES[color as usize] {
        if position.castling_rights() & rule.right != 0
            && king & bit(rule.king_from) != 0
            && rooks & bit(rule.rook_from) != 0
            && occupancy & rule.must_be_empty == 0
        {
            moves.push(Move::new(rule.king_from, rule.king_to, rule.kind));
        }
    }
}

/// All moves obeying piece movement rules for the side to move, ignoring
/// whether they leave the own king attacked.
pub fn generate_pseudo_legal(position: &Position, moves: &mut MoveList) {
    for rules in &PIECE_RULES {
        (rules.generate)(position, moves);
    }
}

/// Whether a pseudo-legal `mov` keeps the mover's king safe. Castles also
/// require the king's path to be unattacked.
pub fn is_legal_move(position: &Position, mov: Move) -> bool {
    let color = position.side_to_move();
    let kind = mov.get_kind();

    if kind.is_castle() {
        let rule = castle_rule(color, kind);
        if rule
            .king_path
            .iter()
            .any(|&square| is_square_attacked(position, square, color.toggle()))
        {
            return false;
        }
    }

    let mut after = *position;
    after.apply_move(mov);
    !is_king_attacked(&after, color)
}

pub fn generate_legal(position: &Position, moves: &mut MoveList) {
    let mut pseudo_legal = MoveList::new();
    generate_pseudo_legal(position, &mut pseudo_legal);

    moves.extend(
        pseudo_legal
            .into_iter()
            .filter(|&mov| is_legal_move(position, mov)),
    );
}

pub fn pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    generate_pseudo_legal(position, &mut moves);
    moves
}

pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = pseudo_legal_moves(position);
    moves.retain(|&mov| is_legal_move(position, mov));
    moves
}
