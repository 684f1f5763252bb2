use std::fmt::{self, Display, Formatter};

use crate::{
    color::Color,
    coord::Coord,
    view::{BoardView, Glyph},
};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Terminal rendering of a [`BoardView`] with the side `orientation` at the
/// bottom and a few lines of `info` printed alongside the ranks.
pub struct BoardDisplay<'a, 'b> {
    pub view: BoardView,
    pub orientation: Color,
    pub highlighted: &'a [Coord],
    pub info: &'b str,
}
fn figurine(glyph: Glyph) -> char {
    match glyph {
        Glyph::Piece(piece) => piece.figurine(),
        glyph => glyph.symbol(),
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for row in 0..8 {
            let rank = match self.orientation {
                Color::White => 7 - row,
                Color::Black => row,
            };
            for column in 0..8 {
                let file = match self.orientation {
                    Color::White => column,
                    Color::Black => 7 - column,
                };
                let position = Coord::new(file, rank);
                let color = if self.highlighted.contains(&position) {
                    HIGHLIGHTED
                } else if (file + rank) % 2 == 0 {
                    DARK
                } else {
                    LIGHT
                };
                write!(f, "{color}{} {RESET}", figurine(self.view[position]))?;
            }
            write!(f, "{}", rank + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.orientation {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
