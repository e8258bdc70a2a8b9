use tracing::debug;

use crate::chess::{bitboard::*, error::MoveError, moves::*, piece::*, position::*};

/// Rights that survive a move touching each square. Moving from or onto a
/// king or rook home square drops the matching rights.
const CASTLING_MASK: [CastlingRights; BOARD_SIZE] = {
    let mut masks = [Castling::ALL; BOARD_SIZE];
    masks[0] = Castling::ALL & !Castling::WQ; // a1
    masks[4] = Castling::ALL & !(Castling::WK | Castling::WQ); // e1
    masks[7] = Castling::ALL & !Castling::WK; // h1
    masks[56] = Castling::ALL & !Castling::BQ; // a8
    masks[60] = Castling::ALL & !(Castling::BK | Castling::BQ); // e8
    masks[63] = Castling::ALL & !Castling::BK; // h8
    masks
};

impl Position {
    /// Rook relocation for a castle whose king starts on `king_from`.
    #[inline(always)]
    fn castle_rook_squares(king_from: Square, kind: MoveKind) -> (Square, Square) {
        let back_rank = rank_of(king_from) * BOARD_WIDTH as Square;
        match kind {
            MoveKind::KingCastle => (back_rank + 7, back_rank + 5), // h -> f
            _ => (back_rank, back_rank + 3),                        // a -> d
        }
    }

    /// Square of the pawn taken en passant: beside the capturer, on the
    /// destination file.
    #[inline(always)]
    fn en_passant_victim(from: Square, to: Square) -> Square {
        to_square(rank_of(from) as i8, file_of(to) as i8)
    }

    /// Applies `mov` in place and passes the turn.
    ///
    /// The mover is whatever piece stands on the origin square. A move whose
    /// origin equals its destination, or whose origin is empty, leaves the
    /// position untouched; [`Position::try_apply_move`] reports those instead.
    ///
    /// A castle only relocates the rook when it stands on its home square and
    /// its destination is empty; otherwise the king moves alone. Reserved kind
    /// codes apply as plain moves.
    pub fn apply_move(&mut self, mov: Move) {
        let from = mov.get_from();
        let to = mov.get_to();

        if from == to {
            debug!(%mov, "ignoring move onto its own square");
            return;
        }
        let Some((color, piece)) = self.piece_at(from) else {
            debug!(%mov, "ignoring move from an empty square");
            return;
        };

        let kind = MoveKind::from_bits(mov.raw_kind());
        let captured = self.piece_at(to);
        let placed = kind.promotion_piece().unwrap_or(piece);

        // Lift the mover
        self.clear_piece(from, color, piece);

        match kind {
            MoveKind::EnPassantCapture => {
                let victim = Self::en_passant_victim(from, to);
                self.clear_piece(victim, color.toggle(), PieceKind::Pawn);
            }
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                let (rook_from, rook_to) = Self::castle_rook_squares(from, kind);
                let rook_home = self.piece_bitboard(color, PieceKind::Rook) & bit(rook_from) != 0;
                if rook_home && rook_to != to && self.occupied() & bit(rook_to) == 0 {
                    self.clear_piece(rook_from, color, PieceKind::Rook);
                    self.set_piece(rook_to, color, PieceKind::Rook);
                } else {
                    debug!(%mov, "castle without a movable rook, moving the king alone");
                }
            }
            _ => {}
        }

        // Land the mover, capturing whatever was there
        self.clear_square(to);
        self.set_piece(to, color, placed);

        self.en_passant_square = (kind == MoveKind::DoublePawnPush).then_some((from + to) / 2);

        if piece == PieceKind::Pawn || captured.is_some() || kind.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.castling_rights &= CASTLING_MASK[from as usize] & CASTLING_MASK[to as usize];

        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = self.side_to_move.toggle();
    }

    /// Like [`Position::apply_move`], but rejects the moves it would ignore.
    pub fn try_apply_move(&mut self, mov: Move) -> Result<(), MoveError> {
        let from = mov.get_from();
        if from == mov.get_to() {
            return Err(MoveError::SameSquare(from));
        }
        if self.piece_at(from).is_none() {
            return Err(MoveError::NoPieceAtSource(from));
        }
        self.apply_move(mov);
        Ok(())
    }
}
