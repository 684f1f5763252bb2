use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{
    board::Board,
    color::Color,
    coord::{Coord, pawn_direction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColoredPieceKind {
    pub color: Color,
    pub kind: PieceKind,
}
impl ColoredPieceKind {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        ColoredPieceKind { color, kind }
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, InvalidFenPiece> {
        let kind = match c {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(InvalidFenPiece(c)),
        };
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(ColoredPieceKind::new(color, kind))
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for ColoredPieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidFenPiece(pub char);
impl Display for InvalidFenPiece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}`, expected one of `p`, `n`, `b`, `r`, `k`, `q`, or uppercase forms of these letters",
            self.0
        )?;
        Ok(())
    }
}
impl Error for InvalidFenPiece {}

/// A piece in the board's roster. Captured pieces stay in the roster with
/// `captured` set and no square pointing at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub position: Coord,
    pub moves_made: u32,
    pub captured: bool,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind, position: Coord) -> Self {
        Piece {
            color,
            kind,
            position,
            moves_made: 0,
            captured: false,
        }
    }
    pub fn colored(self) -> ColoredPieceKind {
        ColoredPieceKind::new(self.color, self.kind)
    }
    /// Whether this piece may move from `from` to `to` on `board`.
    ///
    /// Landing on a piece of the same color is not checked here except for
    /// pawns, whose forward and diagonal moves depend on what occupies the
    /// destination.
    pub fn is_legal_move(&self, from: Coord, to: Coord, board: &Board) -> bool {
        if from == to {
            return false;
        }
        let difference = to - from;
        match self.kind {
            PieceKind::Pawn => self.is_legal_pawn_move(from, to, board),
            PieceKind::Knight => difference.is_knight_move(),
            PieceKind::Bishop => difference.is_diagonal() && board.is_path_clear(from, to),
            PieceKind::Rook => difference.is_straight() && board.is_path_clear(from, to),
            PieceKind::Queen => {
                (difference.is_straight() || difference.is_diagonal())
                    && board.is_path_clear(from, to)
            }
            PieceKind::King => difference.is_king_move(),
        }
    }
    fn is_legal_pawn_move(&self, from: Coord, to: Coord, board: &Board) -> bool {
        let direction = pawn_direction(self.color);
        let difference = to - from;
        let destination = board.occupant(to);
        match (difference.x, difference.y) {
            (0, y) if y == direction => destination.is_none(),
            (0, y) if y == direction * 2 => {
                self.moves_made == 0 && destination.is_none() && board.is_path_clear(from, to)
            }
            (-1 | 1, y) if y == direction => {
                destination.is_some_and(|piece| piece.color != self.color)
            }
            _ => false,
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.colored(), self.position)?;
        Ok(())
    }
}
