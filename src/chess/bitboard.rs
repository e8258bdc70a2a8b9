//! Bitboard masks and primitive bit operations.
//!
//! Squares are numbered `rank * 8 + file`, so bit 0 is a1, bit 7 is h1 and
//! bit 63 is h8. North moves towards rank 8 (`<< 8`), east towards file h
//! (`<< 1`).

pub const BOARD_WIDTH: usize = 8;
pub const BOARD_SIZE: usize = 64;

pub type Square = u8;
pub type Bitboard = u64;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_C: Bitboard = FILE_A << 2;
pub const FILE_D: Bitboard = FILE_A << 3;
pub const FILE_E: Bitboard = FILE_A << 4;
pub const FILE_F: Bitboard = FILE_A << 5;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;

pub const RANK_1: Bitboard = 0xFF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_3: Bitboard = RANK_1 << 16;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_6: Bitboard = RANK_1 << 40;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

pub const FILES: [Bitboard; BOARD_WIDTH] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

pub const RANKS: [Bitboard; BOARD_WIDTH] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

/// Directional offsets in square-index space, matching the shift helpers below.
pub const NORTH: i8 = 8;
pub const SOUTH: i8 = -8;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = NORTH + EAST;
pub const NORTH_WEST: i8 = NORTH + WEST;
pub const SOUTH_EAST: i8 = SOUTH + EAST;
pub const SOUTH_WEST: i8 = SOUTH + WEST;

#[inline(always)]
pub fn to_square(rank: i8, file: i8) -> Square {
    ((rank * BOARD_WIDTH as i8) + file) as Square
}

#[inline(always)]
pub fn rank_of(square: Square) -> u8 {
    square / BOARD_WIDTH as u8
}

#[inline(always)]
pub fn file_of(square: Square) -> u8 {
    square % BOARD_WIDTH as u8
}

#[inline(always)]
pub fn valid_axis(axis: i8) -> bool {
    axis >= 0 && axis < BOARD_WIDTH as i8
}

#[inline(always)]
pub fn bit(square: Square) -> Bitboard {
    debug_assert!(square < BOARD_SIZE as Square);
    1u64 << square
}

/// Algebraic name of a square, e.g. `e4`.
pub fn square_name(square: Square) -> String {
    format!(
        "{}{}",
        (b'a' + file_of(square)) as char,
        rank_of(square) + 1
    )
}

/// Parses an algebraic square name such as `e4`.
pub fn parse_square(name: &str) -> Option<Square> {
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
            Some(to_square((rank as u8 - b'1') as i8, (file as u8 - b'a') as i8))
        }
        _ => None,
    }
}

#[inline(always)]
pub fn shift_north(bb: Bitboard) -> Bitboard {
    bb << 8
}

#[inline(always)]
pub fn shift_south(bb: Bitboard) -> Bitboard {
    bb >> 8
}

#[inline(always)]
pub fn shift_east(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) << 1
}

#[inline(always)]
pub fn shift_west(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) >> 1
}

#[inline(always)]
pub fn shift_north_east(bb: Bitboard) -> Bitboard {
    shift_north(shift_east(bb))
}

#[inline(always)]
pub fn shift_north_west(bb: Bitboard) -> Bitboard {
    shift_north(shift_west(bb))
}

#[inline(always)]
pub fn shift_south_east(bb: Bitboard) -> Bitboard {
    shift_south(shift_east(bb))
}

#[inline(always)]
pub fn shift_south_west(bb: Bitboard) -> Bitboard {
    shift_south(shift_west(bb))
}

/// Index of the lowest set bit.
///
/// # Preconditions
/// - `bb != 0`
#[inline(always)]
pub fn lowest_set_bit_index(bb: Bitboard) -> Square {
    debug_assert!(bb != 0, "lowest_set_bit_index on an empty bitboard");
    bb.trailing_zeros() as Square
}

/// Returns the index of the lowest set bit and clears it in `bb`.
///
/// # Preconditions
/// - `*bb != 0`
#[inline(always)]
pub fn pop_lowest_set_bit(bb: &mut Bitboard) -> Square {
    let square = lowest_set_bit_index(*bb);
    *bb &= *bb - 1;
    square
}

/// Renders a bitboard as an 8x8 grid, rank 8 on top, for debugging.
pub fn format_bitboard(bb: Bitboard) -> String {
    let mut out = String::new();
    for rank in (0..BOARD_WIDTH as i8).rev() {
        out.push_str(&format!("{:>2}  ", rank + 1));
        for file in 0..BOARD_WIDTH as i8 {
            let occupied = bb & bit(to_square(rank, file)) != 0;
            out.push_str(if occupied { " 1" } else { " ." });
        }
        out.push('\n');
    }
    out.push_str("\n    ");
    for file in 'a'..='h' {
        out.push(' ');
        out.push(file);
    }
    out.push('\n');
    out
}

pub trait BitboardOnes: Sized + Copy {
    fn ones_iter(self) -> BitboardOnesIter;
}

pub struct BitboardOnesIter {
    bitboard: Bitboard,
}

impl Iterator for BitboardOnesIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.bitboard == 0 {
            None
        } else {
            Some(pop_lowest_set_bit(&mut self.bitboard))
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let pop = self.bitboard.count_ones() as usize;
        (pop, Some(pop))
    }
}

impl ExactSizeIterator for BitboardOnesIter {}

impl BitboardOnes for Bitboard {
    fn ones_iter(self) -> BitboardOnesIter {
        BitboardOnesIter { bitboard: self }
    }
}
