use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Index,
    str::FromStr,
};

use crate::{board::Board, color::Color, coord::Coord, piece::ColoredPieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseViewpointError;
impl Display for ParseViewpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "provided string was not `white`, `black`, or `audience`")?;
        Ok(())
    }
}
impl Error for ParseViewpointError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewpoint {
    White,
    Black,
    Audience,
}
impl Viewpoint {
    pub fn player(self) -> Option<Color> {
        match self {
            Viewpoint::White => Some(Color::White),
            Viewpoint::Black => Some(Color::Black),
            Viewpoint::Audience => None,
        }
    }
}
impl From<Color> for Viewpoint {
    fn from(value: Color) -> Self {
        match value {
            Color::White => Viewpoint::White,
            Color::Black => Viewpoint::Black,
        }
    }
}
impl Display for Viewpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Viewpoint::White => write!(f, "white")?,
            Viewpoint::Black => write!(f, "black")?,
            Viewpoint::Audience => write!(f, "audience")?,
        }
        Ok(())
    }
}
impl FromStr for Viewpoint {
    type Err = ParseViewpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let viewpoint = match s {
            "w" | "white" => Viewpoint::White,
            "b" | "black" => Viewpoint::Black,
            "a" | "audience" => Viewpoint::Audience,
            _ => return Err(ParseViewpointError),
        };
        Ok(viewpoint)
    }
}

/// What a single square shows from some viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Empty,
    /// An opponent piece the viewer cannot currently reach.
    Hidden,
    Piece(ColoredPieceKind),
}
impl Glyph {
    pub const EMPTY: char = ' ';
    pub const HIDDEN: char = '*';

    pub fn symbol(self) -> char {
        match self {
            Glyph::Empty => Glyph::EMPTY,
            Glyph::Hidden => Glyph::HIDDEN,
            Glyph::Piece(piece) => piece.fen(),
        }
    }
}

/// Rendered board, rank 8 first and files `a` to `h` within each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardView(pub [[Glyph; 8]; 8]);

impl BoardView {
    pub fn symbols(&self) -> [[char; 8]; 8] {
        self.0.map(|row| row.map(Glyph::symbol))
    }
}
impl Index<Coord> for BoardView {
    type Output = Glyph;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.0[7 - index.rank() as usize][index.file() as usize]
    }
}
impl Display for BoardView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.symbols() {
            for symbol in row {
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
impl Board {
    /// Renders the board as seen from `viewpoint`.
    ///
    /// The audience sees everything. A player sees their own pieces, and an
    /// opponent piece only when one of their pieces could legally move onto
    /// its square right now; other opponent pieces show as [`Glyph::Hidden`].
    pub fn render(&self, viewpoint: Viewpoint) -> BoardView {
        let mut view = [[Glyph::Empty; 8]; 8];
        for position in Coord::all() {
            let Some(piece) = self.occupant(position) else {
                continue;
            };
            let visible = match viewpoint.player() {
                None => true,
                Some(viewer) => piece.color == viewer || self.threatens(viewer, position),
            };
            view[7 - position.rank() as usize][position.file() as usize] = if visible {
                Glyph::Piece(piece.colored())
            } else {
                Glyph::Hidden
            };
        }
        BoardView(view)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        fen::Fen,
        piece::{ColoredPieceKind, PieceKind},
        view::{Glyph, Viewpoint},
    };

    #[test]
    fn audience_sees_everything() {
        let view = Board::starting_position().render(Viewpoint::Audience);
        assert_eq!(
            view.to_string(),
            "rnbqkbnr\npppppppp\n        \n        \n        \n        \nPPPPPPPP\nRNBQKBNR\n"
        );
        assert_eq!(
            view[coord!("e1")],
            Glyph::Piece(ColoredPieceKind::new(Color::White, PieceKind::King))
        );
    }
    #[test]
    fn players_see_no_opponents_at_the_start() {
        let board = Board::starting_position();
        let black = board.render(Viewpoint::Black).symbols();
        assert_eq!(black[0], ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r']);
        assert_eq!(black[1], ['p'; 8]);
        assert_eq!(black[6], ['*'; 8]);
        assert_eq!(black[7], ['*'; 8]);
        assert_eq!(black[3], [' '; 8]);
        let white = board.render(Viewpoint::White).symbols();
        assert_eq!(white[0], ['*'; 8]);
        assert_eq!(white[1], ['*'; 8]);
        assert_eq!(white[7], ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R']);
    }
    #[test]
    fn threatened_opponents_are_revealed() {
        let board = "4k3/8/8/3p4/4P3/8/8/R3K2r w".parse::<Fen>().unwrap().board;
        let white = board.render(Viewpoint::White);
        assert_eq!(white[coord!("d5")].symbol(), 'p');
        // the a1 rook's path to h1 runs through its own king
        assert_eq!(white[coord!("h1")], Glyph::Hidden);
        assert_eq!(white[coord!("e8")], Glyph::Hidden);
        let black = board.render(Viewpoint::Black);
        assert_eq!(black[coord!("e4")].symbol(), 'P');
        assert_eq!(black[coord!("e1")].symbol(), 'K');
        assert_eq!(black[coord!("a1")], Glyph::Hidden);
    }
    #[test]
    fn visibility_matches_threats() {
        let board = "r3k2r/1p4p1/2n2b2/3Pp3/2B5/5N2/P4PPP/R2QK2R w"
            .parse::<Fen>()
            .unwrap()
            .board;
        for viewer in Color::ALL {
            let view = board.render(viewer.into());
            for piece in board.pieces() {
                let glyph = view[piece.position];
                if piece.color == viewer || board.threatens(viewer, piece.position) {
                    assert_eq!(glyph, Glyph::Piece(piece.colored()), "{piece}");
                } else {
                    assert_eq!(glyph, Glyph::Hidden, "{piece}");
                }
            }
        }
    }
    #[test]
    fn viewpoint_parsing() {
        assert_eq!("audience".parse(), Ok(Viewpoint::Audience));
        assert_eq!("b".parse(), Ok(Viewpoint::Black));
        assert!("spectator".parse::<Viewpoint>().is_err());
        assert_eq!(Viewpoint::from(Color::White).player(), Some(Color::White));
    }
}
