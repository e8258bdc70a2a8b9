use std::fmt;
use std::ops::Deref;

use tinyvec::ArrayVec;

use crate::chess::{bitboard::*, movegen, piece::PieceKind, position::Position};

/// Safe upper bound on the number of moves in any reachable position.
pub const MAX_MOVES: usize = 256;

// Kind bits: 1 bit   |1 bit  |1 bit   |1 bit
//            Promotion|Capture|Special1|Special0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Quiet = 0,
    DoublePawnPush = 1,
    KingCastle = 2,
    QueenCastle = 3,
    Capture = 4,
    EnPassantCapture = 5,
    /// Stands in for the reserved codes 6 and 7.
    Invalid = 6,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

const PROMOTION_BIT: u8 = 0b1000;
const CAPTURE_BIT: u8 = 0b0100;

pub const KIND_LUT: [MoveKind; 16] = [
    MoveKind::Quiet,
    MoveKind::DoublePawnPush,
    MoveKind::KingCastle,
    MoveKind::QueenCastle,
    MoveKind::Capture,
    MoveKind::EnPassantCapture,
    MoveKind::Invalid,
    MoveKind::Invalid,
    MoveKind::KnightPromotion,
    MoveKind::BishopPromotion,
    MoveKind::RookPromotion,
    MoveKind::QueenPromotion,
    MoveKind::KnightPromotionCapture,
    MoveKind::BishopPromotionCapture,
    MoveKind::RookPromotionCapture,
    MoveKind::QueenPromotionCapture,
];

pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl MoveKind {
    #[inline(always)]
    pub fn from_bits(bits: u8) -> MoveKind {
        KIND_LUT[(bits & 0xf) as usize]
    }

    /// Promotion kind for `piece`; `piece` must be knight, bishop, rook or queen.
    #[inline(always)]
    pub fn promotion(piece: PieceKind, capture: bool) -> MoveKind {
        debug_assert!(PROMOTION_PIECES.contains(&piece));
        let capture_bit = if capture { CAPTURE_BIT } else { 0 };
        MoveKind::from_bits(PROMOTION_BIT | capture_bit | (piece as u8 - 1))
    }

    #[inline(always)]
    pub fn is_capture(self) -> bool {
        self != MoveKind::Invalid && self as u8 & CAPTURE_BIT != 0
    }

    #[inline(always)]
    pub fn is_promotion(self) -> bool {
        self as u8 & PROMOTION_BIT != 0
    }

    #[inline(always)]
    pub fn is_castle(self) -> bool {
        matches!(self, MoveKind::KingCastle | MoveKind::QueenCastle)
    }

    pub fn promotion_piece(self) -> Option<PieceKind> {
        self.is_promotion()
            .then(|| PROMOTION_PIECES[(self as u8 & 0b11) as usize])
    }

    /// Symbolic name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::Quiet => "quiet",
            MoveKind::DoublePawnPush => "double-pawn-push",
            MoveKind::KingCastle => "king-castle",
            MoveKind::QueenCastle => "queen-castle",
            MoveKind::Capture => "capture",
            MoveKind::EnPassantCapture => "en-passant-capture",
            MoveKind::Invalid => "invalid",
            MoveKind::KnightPromotion => "knight-promotion",
            MoveKind::BishopPromotion => "bishop-promotion",
            MoveKind::RookPromotion => "rook-promotion",
            MoveKind::QueenPromotion => "queen-promotion",
            MoveKind::KnightPromotionCapture => "knight-promotion-capture",
            MoveKind::BishopPromotionCapture => "bishop-promotion-capture",
            MoveKind::RookPromotionCapture => "rook-promotion-capture",
            MoveKind::QueenPromotionCapture => "queen-promotion-capture",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
#[repr(transparent)]
pub struct Move(pub u16);

impl Move {
    /// Packs a move.
    ///
    /// --- bit-field layout of the final u16 ---
    /// 15..12 : 4-bit kind
    /// 11..6  : 6-bit destination square
    /// 5..0   : 6-bit origin square
    ///
    /// Each field is masked to its width, so out-of-range squares are truncated
    /// rather than rejected.
    #[inline(always)]
    pub fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Move(
            ((kind as u16 & 0xf) << 12) | ((to as u16 & 0x3f) << 6) | (from as u16 & 0x3f),
        )
    }

    #[inline(always)]
    pub fn get_from(self) -> Square {
        (self.0 & 0x3f) as Square
    }

    #[inline(always)]
    pub fn get_to(self) -> Square {
        (self.0 >> 6 & 0x3f) as Square
    }

    /// The raw 4-bit kind field, including the reserved codes.
    #[inline(always)]
    pub fn raw_kind(self) -> u8 {
        (self.0 >> 12 & 0xf) as u8
    }

    #[inline(always)]
    pub fn get_kind(self) -> MoveKind {
        let kind = MoveKind::from_bits(self.raw_kind());
        debug_assert!(kind != MoveKind::Invalid, "reserved move kind {}", self.raw_kind());
        kind
    }

    pub fn to_uci(self) -> String {
        let kind = MoveKind::from_bits(self.raw_kind());
        let mut uci = format!("{}{}", square_name(self.get_from()), square_name(self.get_to()));
        if let Some(piece) = kind.promotion_piece() {
            uci.push(piece.to_char().to_ascii_lowercase());
        }
        uci
    }

    /// Resolves a UCI string such as `e2e4` or `a7a8q` against the legal moves
    /// of `position`.
    pub fn from_uci(uci: &str, position: &Position) -> Option<Move> {
        let from = parse_square(uci.get(0..2)?)?;
        let to = parse_square(uci.get(2..4)?)?;
        let promotion = match uci.get(4..) {
            Some("") | None => None,
            Some(letter) if letter.len() == 1 => {
                Some(PieceKind::from_char(letter.chars().next()?)?)
            }
            Some(_) => return None,
        };

        movegen::legal_moves(position).into_iter().find(|mov| {
            mov.get_from() == from
                && mov.get_to() == to
                && mov.get_kind().promotion_piece() == promotion
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

/// Fixed-capacity list of moves. Pushing past [`MAX_MOVES`] panics.
#[derive(Debug, Clone, Default)]
pub struct MoveList {
    moves: ArrayVec<[Move; MAX_MOVES]>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn push(&mut self, mov: Move) {
        self.moves.push(mov);
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn retain<F: FnMut(&Move) -> bool>(&mut self, keep: F) {
        self.moves.retain(keep);
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        for mov in iter {
            self.push(mov);
        }
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = tinyvec::ArrayVecIterator<[Move; MAX_MOVES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
