use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    iter::Peekable,
    str::FromStr,
};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    piece::{ColoredPieceKind, InvalidFenPiece},
};

/// Piece placement and side to move, written as the first two fields of a
/// FEN record: `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub board: Board,
    pub current_player: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFenError {
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    InvalidPiece(InvalidFenPiece),
    UnexpectedChar(char),
    UnexpectedEol,
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidPiece(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "a row has fewer than 8 squares")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "a row has more than 8 squares")?,
            ParseFenError::InvalidPiece(err) => write!(f, "{err}")?,
            ParseFenError::UnexpectedChar(c) => write!(f, "unexpected `{c}`")?,
            ParseFenError::UnexpectedEol => write!(f, "unexpected end of input")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidPiece(err) => Some(err),
            _ => None,
        }
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let mut board = Board::empty();

        let mut x: u8 = 0;
        let mut y: u8 = 0;
        while x < 8 || y < 7 {
            let c = characters.next().ok_or(ParseFenError::UnexpectedEol)?;
            if c == '/' {
                if x == 8 && y < 7 {
                    x = 0;
                    y += 1;
                } else if x < 8 {
                    return Err(ParseFenError::NotEnoughSquaresOnRow);
                } else {
                    return Err(ParseFenError::UnexpectedChar(c));
                }
            } else if matches!(c, '1'..='8') {
                x += c as u8 - b'0';
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            } else if c == ' ' {
                return Err(ParseFenError::NotEnoughSquaresOnRow);
            } else if x >= 8 {
                return Err(ParseFenError::ExceedingSquaresOnRow);
            } else {
                let piece = ColoredPieceKind::from_fen(c)?;
                let position = Coord::new(x, 7 - y);
                if board.place(piece.color, piece.kind, position).is_err() {
                    unreachable!("every square is visited once");
                }
                x += 1;
            }
        }
        let space = characters.next().ok_or(ParseFenError::UnexpectedEol)?;
        if space != ' ' {
            return Err(ParseFenError::UnexpectedChar(space));
        }
        let current_player = match characters.next().ok_or(ParseFenError::UnexpectedEol)? {
            'w' | 'W' => Color::White,
            'b' | 'B' => Color::Black,
            c => return Err(ParseFenError::UnexpectedChar(c)),
        };
        // castling, en passant and clocks carry nothing in this variant
        match characters.next() {
            None | Some(' ') => {}
            Some(c) => return Err(ParseFenError::UnexpectedChar(c)),
        }
        Ok(Fen {
            board,
            current_player,
        })
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let row = (0..8).map(|file| {
                self.board
                    .occupant(Coord::new(file, rank))
                    .map(|piece| piece.colored())
            });
            for cell in CellIter(row.peekable()) {
                write!(f, "{cell}")?;
            }
            if rank != 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", self.current_player.lowercase())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(ColoredPieceKind),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<ColoredPieceKind>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.peek().is_some_and(Option::is_none) {
                    self.0.next();
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}
