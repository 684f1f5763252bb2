use std::fmt::{self, Display, Formatter};

use crate::color::Color;

/// Once a side has won the state never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    InProgress,
    WhiteWon,
    BlackWon,
}
impl GameState {
    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameState::WhiteWon,
            Color::Black => GameState::BlackWon,
        }
    }
    pub fn winner(self) -> Option<Color> {
        match self {
            GameState::InProgress => None,
            GameState::WhiteWon => Some(Color::White),
            GameState::BlackWon => Some(Color::Black),
        }
    }
    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }
}
impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{color} wins")?,
            None => write!(f, "in progress")?,
        }
        Ok(())
    }
}
