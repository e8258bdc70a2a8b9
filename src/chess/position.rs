use std::fmt;

use tracing::{debug, warn};

use crate::chess::{bitboard::*, error::FenError, piece::*};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub type CastlingRights = u8;

pub struct Castling;
impl Castling {
    pub const WK: CastlingRights = 1;
    pub const WQ: CastlingRights = 2;
    pub const BK: CastlingRights = 4;
    pub const BQ: CastlingRights = 8;
    pub const ALL: CastlingRights = 15;
}

/// Board snapshot: one bitboard per (color, piece kind) plus the game-state
/// fields FEN carries. Occupancy is always derived from the piece boards.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub(crate) bitboards: [[Bitboard; 6]; 2], // 6 piece kinds for 2 colors
    pub(crate) side_to_move: Color,
    pub(crate) en_passant_square: Option<Square>,
    pub(crate) castling_rights: CastlingRights, // 4 bits for KQkq
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl Position {
    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Position {
            bitboards: [[0; 6]; 2],
            side_to_move: Color::White,
            en_passant_square: None,
            castling_rights: 0,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub fn starting() -> Self {
        let mut position = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            position.bitboards[Color::White as usize][kind as usize] |= bit(file as Square);
            position.bitboards[Color::Black as usize][kind as usize] |= bit(file as Square + 56);
        }
        position.bitboards[Color::White as usize][PieceKind::Pawn as usize] = RANK_2;
        position.bitboards[Color::Black as usize][PieceKind::Pawn as usize] = RANK_7;
        position.castling_rights = Castling::ALL;
        position
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Self::parse_fen(fen);
        if let Err(err) = &parsed {
            debug!(fen, %err, "rejected FEN");
        }
        parsed
    }

    fn parse_fen(fen: &str) -> Result<Self, FenError> {
        let mut tokens = fen.split_whitespace();
        let mut position = Self::empty();

        position.parse_placement(tokens.next().ok_or(FenError::MissingPlacement)?)?;

        position.side_to_move = match tokens.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        if let Some(castling_part) = tokens.next().filter(|part| *part != "-") {
            for chr in castling_part.chars() {
                position.castling_rights |= match chr {
                    'K' => Castling::WK,
                    'Q' => Castling::WQ,
                    'k' => Castling::BK,
                    'q' => Castling::BQ,
                    _ => return Err(FenError::InvalidCastling(castling_part.to_string())),
                }
            }
        }

        if let Some(en_passant_part) = tokens.next().filter(|part| *part != "-") {
            let square = parse_square(en_passant_part)
                .ok_or_else(|| FenError::InvalidEnPassant(en_passant_part.to_string()))?;
            position.en_passant_square = Some(square);
        }

        if let Some(halfmove_part) = tokens.next() {
            position.halfmove_clock = halfmove_part
                .parse()
                .map_err(|_| FenError::InvalidCounter(halfmove_part.to_string()))?;
        }

        if let Some(fullmove_part) = tokens.next() {
            position.fullmove_number = fullmove_part
                .parse()
                .map_err(|_| FenError::InvalidCounter(fullmove_part.to_string()))?;
        }

        Ok(position)
    }

    fn parse_placement(&mut self, part: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = part.split('/').collect();
        if ranks.len() != BOARD_WIDTH {
            return Err(FenError::RankCount { found: ranks.len() });
        }

        for (idx, rank_part) in ranks.iter().enumerate() {
            let rank = (BOARD_WIDTH - 1 - idx) as i8;
            let mut file: usize = 0;

            for chr in rank_part.chars() {
                match chr {
                    c if c.is_ascii_digit() => file += (c as u8 - b'0') as usize,
                    c if c.is_ascii_alphabetic() => {
                        let kind = PieceKind::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                        let color = if c.is_ascii_uppercase() {
                            Color::White
                        } else {
                            Color::Black
                        };
                        if file < BOARD_WIDTH {
                            self.bitboards[color as usize][kind as usize] |=
                                bit(to_square(rank, file as i8));
                        }
                        file += 1;
                    }
                    c => warn!(character = %c, "skipping unexpected character in FEN placement"),
                }
            }

            if file != BOARD_WIDTH {
                return Err(FenError::FileCount {
                    rank: rank as usize + 1,
                    found: file,
                });
            }
        }

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..BOARD_WIDTH as i8).rev() {
            let mut empty = 0;
            for file in 0..BOARD_WIDTH as i8 {
                match self.piece_at(to_square(rank, file)) {
                    Some((color, kind)) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(kind.to_fen_char(color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push_str(match self.side_to_move {
            Color::White => " w ",
            Color::Black => " b ",
        });

        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            for (flag, letter) in [
                (Castling::WK, 'K'),
                (Castling::WQ, 'Q'),
                (Castling::BK, 'k'),
                (Castling::BQ, 'q'),
            ] {
                if self.castling_rights & flag != 0 {
                    fen.push(letter);
                }
            }
        }

        let en_passant = self.en_passant_square.map_or("-".to_string(), square_name);
        fen.push_str(&format!(
            " {} {} {}",
            en_passant, self.halfmove_clock, self.fullmove_number
        ));

        fen
    }

    #[inline(always)]
    pub fn piece_bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.bitboards[color as usize][kind as usize]
    }

    /// Pieces of `kind` for both colors.
    #[inline(always)]
    pub fn kind_bitboard(&self, kind: PieceKind) -> Bitboard {
        self.bitboards[Color::White as usize][kind as usize]
            | self.bitboards[Color::Black as usize][kind as usize]
    }

    #[inline(always)]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.bitboards[color as usize]
            .iter()
            .fold(0, |occupancy, bb| occupancy | bb)
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.occupied_by(Color::White) | self.occupied_by(Color::Black)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.piece_bitboard(color, PieceKind::King);
        (kings != 0).then(|| lowest_set_bit_index(kings))
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        let square_bit = bit(square);
        Color::ALL.into_iter().find_map(|color| {
            PIECE_KINDS
                .into_iter()
                .find(|&kind| self.piece_bitboard(color, kind) & square_bit != 0)
                .map(|kind| (color, kind))
        })
    }

    /// Every piece, ordered by color, then kind, then square.
    pub fn all_pieces(&self) -> AllPieces<'_> {
        AllPieces {
            position: self,
            slot: 0,
            remaining: self.bitboards[0][0],
        }
    }

    #[inline(always)]
    pub(crate) fn set_piece(&mut self, square: Square, color: Color, kind: PieceKind) {
        self.bitboards[color as usize][kind as usize] |= bit(square);
    }

    #[inline(always)]
    pub(crate) fn clear_piece(&mut self, square: Square, color: Color, kind: PieceKind) {
        self.bitboards[color as usize][kind as usize] &= !bit(square);
    }

    /// Removes whatever occupies `square`, in every board of both colors.
    #[inline(always)]
    pub(crate) fn clear_square(&mut self, square: Square) {
        let mask = !bit(square);
        for boards in self.bitboards.iter_mut() {
            for bb in boards.iter_mut() {
                *bb &= mask;
            }
        }
    }
}

pub struct AllPieces<'a> {
    position: &'a Position,
    slot: usize, // color * 6 + kind
    remaining: Bitboard,
}

impl Iterator for AllPieces<'_> {
    type Item = PieceOnSquare;

    fn next(&mut self) -> Option<PieceOnSquare> {
        while self.remaining == 0 {
            self.slot += 1;
            if self.slot >= 2 * PIECE_KINDS.len() {
                return None;
            }
            self.remaining = self.position.bitboards[self.slot / 6][self.slot % 6];
        }

        Some(PieceOnSquare {
            color: Color::ALL[self.slot / 6],
            kind: PIECE_KINDS[self.slot % 6],
            square: pop_lowest_set_bit(&mut self.remaining),
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..BOARD_WIDTH as i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..BOARD_WIDTH as i8 {
                let symbol = self
                    .piece_at(to_square(rank, file))
                    .map_or('.', |(color, kind)| kind.to_fen_char(color));
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\n   a b c d e f g h")
    }
}
