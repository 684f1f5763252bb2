use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::{Mul, Sub},
    str::FromStr,
};

use crate::color::Color;

/// Builds a [`Coord`] from a literal such as `"e4"`, panicking on anything
/// else. Usable in `const` items.
#[macro_export]
macro_rules! coord {
    ($square:literal) => {
        $crate::coord::Coord::from_literal($square)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseCoordError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacter(u8),
    Unexpected(char),
}
impl Display for ParseCoordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseCoordError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseCoordError::NotEnoughCharacter(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseCoordError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseCoordError {}

// Byte layout: rank * 8 + file, both zero-based from a1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8);
        debug_assert!(rank < 8);
        Coord(rank * 8 + file)
    }
    pub fn new_checked(file: u8, rank: u8) -> Option<Self> {
        if file >= 8 || rank >= 8 {
            None
        } else {
            Some(Coord::new(file, rank))
        }
    }
    pub const fn from_literal(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() == 2, "a square is written with two characters");
        let file = bytes[0];
        let rank = bytes[1];
        assert!(matches!(file, b'a'..=b'h'), "file must be from `a` to `h`");
        assert!(matches!(rank, b'1'..=b'8'), "rank must be from `1` to `8`");
        Coord::new(file - b'a', rank - b'1')
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord::new(file, rank))
    }
    pub fn file(self) -> u8 {
        self.0 % 8
    }
    pub fn rank(self) -> u8 {
        self.0 / 8
    }
    pub fn index(self) -> usize {
        self.0 as usize
    }
    /// Every square, a1 first, then along the rank.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..64).map(Coord)
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Coord::new_checked(
            self.file().checked_add_signed(movement.x)?,
            self.rank().checked_add_signed(movement.y)?,
        )
    }
    pub fn line(self, direction: Vector, start: i8) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        debug_assert_eq!(direction, direction.as_unit());
        (start..).map_while(move |difference| self.move_by(direction * difference))
    }
    pub fn line_exclusive(self, direction: Vector) -> impl Iterator<Item = Self> {
        self.line(direction, 1)
    }
    pub fn line_exclusive_exclusive(
        self,
        end: Coord,
        direction: Vector,
    ) -> impl Iterator<Item = Self> {
        self.line_exclusive(direction)
            .take_while(move |position| *position != end)
    }
    /// Squares strictly between `self` and `end`, or `None` when the two do
    /// not share a rank, file, or diagonal.
    pub fn squares_between(self, end: Coord) -> Option<impl Iterator<Item = Self>> {
        let difference = end - self;
        (difference.is_straight() || difference.is_diagonal())
            .then(|| self.line_exclusive_exclusive(end, difference.as_unit()))
    }
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.file() + b'a') as char;
        let rank = self.rank() + 1;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(file, rank)
    }
}
impl Sub<Self> for Coord {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.file() as i8 - rhs.file() as i8,
            y: self.rank() as i8 - rhs.rank() as i8,
        }
    }
}

/// Difference between two squares: `x` counts files, `y` counts ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: i8,
    pub y: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { x: 0, y: 0 };

    pub fn is_straight(self) -> bool {
        (self.x == 0) != (self.y == 0)
    }
    pub fn is_diagonal(self) -> bool {
        self.x != 0 && self.x.unsigned_abs() == self.y.unsigned_abs()
    }
    pub fn is_king_move(self) -> bool {
        (-1..=1).contains(&self.x) && (-1..=1).contains(&self.y) && self != Vector::ZERO
    }
    pub fn is_knight_move(self) -> bool {
        let x = self.x.unsigned_abs();
        let y = self.y.unsigned_abs();
        (x == 1 && y == 2) || (x == 2 && y == 1)
    }
    pub fn as_unit(self) -> Self {
        Vector {
            x: self.x.signum(),
            y: self.y.signum(),
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
