pub mod tables;

use crate::chess::{bitboard::*, piece::*, position::Position};

#[inline(always)]
pub fn pawn_attacks(square: Square, color: Color, _occupancy: Bitboard) -> Bitboard {
    tables::PAWN_ATTACKS[color as usize][square as usize]
}

#[inline(always)]
pub fn knight_attacks(square: Square, _color: Color, _occupancy: Bitboard) -> Bitboard {
    tables::KNIGHT_ATTACKS[square as usize]
}

#[inline(always)]
pub fn bishop_attacks(square: Square, _color: Color, occupancy: Bitboard) -> Bitboard {
    tables::gen_sliding_attacks(square, occupancy, &tables::BISHOP_DIRECTIONS)
}

#[inline(always)]
pub fn rook_attacks(square: Square, _color: Color, occupancy: Bitboard) -> Bitboard {
    tables::gen_sliding_attacks(square, occupancy, &tables::ROOK_DIRECTIONS)
}

#[inline(always)]
pub fn queen_attacks(square: Square, color: Color, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, color, occupancy) | rook_attacks(square, color, occupancy)
}

#[inline(always)]
pub fn king_attacks(square: Square, _color: Color, _occupancy: Bitboard) -> Bitboard {
    tables::KING_ATTACKS[square as usize]
}

/// Squares attacked by a whole set of pawns at once.
#[inline(always)]
pub fn pawn_attack_set(pawns: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => shift_north_east(pawns) | shift_north_west(pawns),
        Color::Black => shift_south_east(pawns) | shift_south_west(pawns),
    }
}

/// Union of every square `color` attacks in `position`.
pub fn attacked_squares(position: &Position, color: Color) -> Bitboard {
    let occupancy = position.occupied();

    let mut attacks = pawn_attack_set(position.piece_bitboard(color, PieceKind::Pawn), color);
    for kind in &PIECE_KINDS[1..] {
        let attack_fn = crate::chess::movegen::PIECE_RULES[*kind as usize].attacks;
        for square in position.piece_bitboard(color, *kind).ones_iter() {
            attacks |= attack_fn(square, color, occupancy);
        }
    }
    attacks
}

/// Whether any piece of `attacker_color` attacks `square`, looking outwards from
/// the square.
pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let occupancy = position.occupied();
    let pieces = |kind: PieceKind| position.piece_bitboard(attacker_color, kind);
    let queens = pieces(PieceKind::Queen);

    // A pawn of `attacker_color` attacks `square` from where a defending pawn would capture.
    pawn_attacks(square, attacker_color.toggle(), occupancy) & pieces(PieceKind::Pawn) != 0
        || knight_attacks(square, attacker_color, occupancy) & pieces(PieceKind::Knight) != 0
        || king_attacks(square, attacker_color, occupancy) & pieces(PieceKind::King) != 0
        || bishop_attacks(square, attacker_color, occupancy) & (pieces(PieceKind::Bishop) | queens)
            != 0
        || rook_attacks(square, attacker_color, occupancy) & (pieces(PieceKind::Rook) | queens) != 0
}

/// Whether the king of `color` is attacked by the opponent.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    attacked_squares(position, color.toggle()) & position.piece_bitboard(color, PieceKind::King)
        != 0
}

/// Whether the side to move is in check.
pub fn is_in_check(position: &Position) -> bool {
    is_king_attacked(position, position.side_to_move())
}
