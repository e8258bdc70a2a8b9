pub mod attacks;
pub mod bitboard;
pub mod error;
pub mod make_move;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
mod zobrist;

pub use attacks::{attacked_squares, is_in_check, is_king_attacked, is_square_attacked};
pub use bitboard::*;
pub use error::*;
pub use movegen::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
