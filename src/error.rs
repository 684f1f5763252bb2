use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{color::Color, coord::Coord, game_state::GameState, piece::ColoredPieceKind};

/// Why [`Game::try_move`](crate::game::Game::try_move) refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    GameOver(GameState),
    SameSquare(Coord),
    EmptySquare(Coord),
    NotYourTurn {
        position: Coord,
        turn: Color,
    },
    OwnPieceAtDestination(Coord),
    Illegal {
        piece: ColoredPieceKind,
        origin: Coord,
        destination: Coord,
    },
}
impl Display for MoveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::GameOver(state) => write!(f, "the game is over, {state}")?,
            MoveError::SameSquare(position) => {
                write!(f, "origin and destination are both {position}")?;
            }
            MoveError::EmptySquare(position) => write!(f, "no piece found on {position}")?,
            MoveError::NotYourTurn { position, turn } => {
                write!(f, "the piece on {position} does not belong to {turn}")?;
            }
            MoveError::OwnPieceAtDestination(position) => {
                write!(f, "{position} is occupied by a piece of the same color")?;
            }
            MoveError::Illegal {
                piece,
                origin,
                destination,
            } => write!(f, "{piece} cannot move from {origin} to {destination}")?,
        }
        Ok(())
    }
}
impl Error for MoveError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidBoard {
    Occupied(Coord),
    CapturedPieceOnBoard(Coord),
    MisplacedPiece { recorded: Coord, found: Coord },
    MissingPiece(Coord),
    KingCount { color: Color, count: usize },
}
impl Display for InvalidBoard {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidBoard::Occupied(position) => write!(f, "{position} is already occupied")?,
            InvalidBoard::CapturedPieceOnBoard(position) => {
                write!(f, "captured piece found on {position}")?;
            }
            InvalidBoard::MisplacedPiece { recorded, found } => {
                write!(f, "piece recorded on {recorded} was found on {found}")?;
            }
            InvalidBoard::MissingPiece(position) => {
                write!(f, "piece recorded on {position} is missing from the board")?;
            }
            InvalidBoard::KingCount { color, count } => {
                write!(f, "found {count} {color} kings, exactly 1 was expected")?;
            }
        }
        Ok(())
    }
}
impl Error for InvalidBoard {}
