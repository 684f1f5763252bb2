#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    reason = "internal crate shared by the binary modes"
)]

pub mod board;
pub mod board_display;
pub mod color;
pub mod coord;
pub mod error;
pub mod fen;
pub mod fuzz;
pub mod game;
pub mod game_state;
pub mod lan;
pub mod misc;
pub mod piece;
pub mod repl;
pub mod view;
