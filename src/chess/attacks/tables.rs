use std::sync::LazyLock;

use crate::chess::bitboard::*;

/// Rank and file delta of one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Offset {
    pub rank: i8,
    pub file: i8,
}

impl Offset {
    /// Splits a square delta (`NORTH`, `NORTH_EAST`, a knight jump, ...) into
    /// rank and file parts. Valid for deltas whose file part is within -3..=3.
    pub const fn from_step(step: i8) -> Self {
        let rank = (step + 4).div_euclid(BOARD_WIDTH as i8);
        Offset {
            rank,
            file: step - rank * BOARD_WIDTH as i8,
        }
    }
}

const fn offsets<const N: usize>(steps: [i8; N]) -> [Offset; N] {
    let mut out = [Offset { rank: 0, file: 0 }; N];
    let mut i = 0;
    while i < N {
        out[i] = Offset::from_step(steps[i]);
        i += 1;
    }
    out
}

pub const PAWN_CAPTURE_OFFSETS_WHITE: [Offset; 2] = offsets([NORTH_WEST, NORTH_EAST]);
pub const PAWN_CAPTURE_OFFSETS_BLACK: [Offset; 2] = offsets([SOUTH_WEST, SOUTH_EAST]);

pub const KNIGHT_OFFSETS: [Offset; 8] = offsets([
    2 * NORTH + EAST,
    NORTH + 2 * EAST,
    SOUTH + 2 * EAST,
    2 * SOUTH + EAST,
    2 * SOUTH + WEST,
    SOUTH + 2 * WEST,
    NORTH + 2 * WEST,
    2 * NORTH + WEST,
]);

pub const ROOK_DIRECTIONS: [Offset; 4] = offsets([NORTH, SOUTH, EAST, WEST]);
pub const BISHOP_DIRECTIONS: [Offset; 4] =
    offsets([NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST]);

pub const KING_OFFSETS: [Offset; 8] = offsets([
    NORTH, NORTH_EAST, EAST, SOUTH_EAST, SOUTH, SOUTH_WEST, WEST, NORTH_WEST,
]);

/// Squares reached by applying each offset once, skipping those that leave the board.
pub fn gen_jumping_attacks(square: Square, offsets: &[Offset]) -> Bitboard {
    debug_assert!(square < BOARD_SIZE as u8);

    let rank = rank_of(square) as i8;
    let file = file_of(square) as i8;

    offsets.iter().fold(0u64, |attacks, offset| {
        let (r, f) = (rank + offset.rank, file + offset.file);
        if valid_axis(r) && valid_axis(f) {
            attacks | bit(to_square(r, f))
        } else {
            attacks
        }
    })
}

/// Ray-casts from `square` along each direction, stopping at (and including)
/// the first occupied square.
pub fn gen_sliding_attacks(square: Square, occupancy: Bitboard, directions: &[Offset]) -> Bitboard {
    debug_assert!(square < BOARD_SIZE as u8);

    let rank = rank_of(square) as i8;
    let file = file_of(square) as i8;

    let mut attacks: Bitboard = 0;

    for offset in directions {
        let (mut attacked_rank, mut attacked_file) = (rank + offset.rank, file + offset.file);

        while valid_axis(attacked_rank) && valid_axis(attacked_file) {
            let target = bit(to_square(attacked_rank, attacked_file));
            attacks |= target;

            if target & occupancy != 0 {
                break;
            }

            attacked_rank += offset.rank;
            attacked_file += offset.file;
        }
    }

    attacks
}

pub static KNIGHT_ATTACKS: LazyLock<[Bitboard; BOARD_SIZE]> = LazyLock::new(|| {
    std::array::from_fn(|square| gen_jumping_attacks(square as Square, &KNIGHT_OFFSETS))
});
pub static KING_ATTACKS: LazyLock<[Bitboard; BOARD_SIZE]> = LazyLock::new(|| {
    std::array::from_fn(|square| gen_jumping_attacks(square as Square, &KING_OFFSETS))
});
/// Indexed by color, then square.
pub static PAWN_ATTACKS: LazyLock<[[Bitboard; BOARD_SIZE]; 2]> = LazyLock::new(|| {
    [
        std::array::from_fn(|square| {
            gen_jumping_attacks(square as Square, &PAWN_CAPTURE_OFFSETS_WHITE)
        }),
        std::array::from_fn(|square| {
            gen_jumping_attacks(square as Square, &PAWN_CAPTURE_OFFSETS_BLACK)
        }),
    ]
});
