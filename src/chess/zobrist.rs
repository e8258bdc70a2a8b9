use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::array::from_fn;
use std::sync::LazyLock;

use crate::chess::{bitboard::*, piece::*, position::Position};

struct ZobristKeys {
    pieces: [[[u64; BOARD_SIZE]; PIECE_KINDS.len()]; 2],
    black_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; BOARD_WIDTH],
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    ZobristKeys {
        pieces: from_fn(|_| from_fn(|_| from_fn(|_| rng.random()))),
        black_to_move: rng.random(),
        castling: from_fn(|_| rng.random()),
        en_passant_file: from_fn(|_| rng.random()),
    }
});

impl Position {
    /// Zobrist hash of the position, computed from scratch on every call.
    pub fn zobrist(&self) -> u64 {
        let keys = &*KEYS;

        let mut hash = self.all_pieces().fold(0u64, |hash, piece| {
            hash ^ keys.pieces[piece.color as usize][piece.kind as usize][piece.square as usize]
        });

        if self.side_to_move() == Color::Black {
            hash ^= keys.black_to_move;
        }
        if let Some(en_passant_square) = self.en_passant_square() {
            hash ^= keys.en_passant_file[file_of(en_passant_square) as usize];
        }
        hash ^ keys.castling[self.castling_rights() as usize & 0xf]
    }
}
