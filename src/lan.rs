use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::coord::{Coord, ParseCoordError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    ParseCoordError(ParseCoordError),
    InvalidLength(usize),
}
impl From<ParseCoordError> for ParseLanError {
    fn from(value: ParseCoordError) -> Self {
        ParseLanError::ParseCoordError(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseLanError::InvalidLength(len) => write!(
                f,
                "provided string have length of {len} characters, a move is written as `e2e4` or `e2 e4`"
            )?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseCoordError(err) => Some(err),
            ParseLanError::InvalidLength(_) => None,
        }
    }
}

/// A move request as a pair of squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub origin: Coord,
    pub destination: Coord,
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (origin, destination) = match s.split_once(' ') {
            Some((origin, destination)) => (origin, destination.trim_start()),
            None if s.len() == 4 && s.is_char_boundary(2) => s.split_at(2),
            None => return Err(ParseLanError::InvalidLength(s.chars().count())),
        };
        Ok(Lan {
            origin: origin.parse()?,
            destination: destination.parse()?,
        })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        coord,
        coord::ParseCoordError,
        lan::{Lan, ParseLanError},
    };

    #[test]
    fn both_forms_parse() {
        let expected = Lan {
            origin: coord!("e2"),
            destination: coord!("e4"),
        };
        assert_eq!("e2e4".parse(), Ok(expected));
        assert_eq!("e2 e4".parse(), Ok(expected));
        assert_eq!(expected.to_string(), "e2e4");
    }
    #[test]
    fn malformed_moves_fail_fast() {
        assert_eq!("e2e".parse::<Lan>(), Err(ParseLanError::InvalidLength(3)));
        assert_eq!(
            "e2e9".parse::<Lan>(),
            Err(ParseLanError::ParseCoordError(ParseCoordError::InvalidRank('9')))
        );
        assert_eq!(
            "E2 e4".parse::<Lan>(),
            Err(ParseLanError::ParseCoordError(ParseCoordError::InvalidFile('E')))
        );
    }
}
