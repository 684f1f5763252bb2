use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use chess::{BitBoard, EMPTY, File, Rank, Square};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    board::Board,
    color::Color,
    coord::Coord,
    error::{InvalidBoard, MoveError},
    fen::Fen,
    game::Game,
    lan::Lan,
    piece::{Piece, PieceKind},
    view::{Glyph, Viewpoint},
};

/// Games longer than this are abandoned and a new one is started.
const MAX_MOVES: u32 = 400;

impl From<Color> for chess::Color {
    fn from(value: Color) -> Self {
        match value {
            Color::White => chess::Color::White,
            Color::Black => chess::Color::Black,
        }
    }
}
impl From<Coord> for Square {
    fn from(value: Coord) -> Self {
        Square::make_square(
            Rank::from_index(value.rank() as usize),
            File::from_index(value.file() as usize),
        )
    }
}
impl From<Square> for Coord {
    fn from(value: Square) -> Self {
        Coord::new(
            value.get_file().to_index() as u8,
            value.get_rank().to_index() as u8,
        )
    }
}

/// A disagreement between the engine and the reference move tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Destinations {
        fen: Fen,
        origin: Coord,
        found: Vec<Coord>,
        expected: Vec<Coord>,
    },
    Visibility {
        fen: Fen,
        viewer: Color,
        position: Coord,
        glyph: Glyph,
    },
    Board {
        fen: Fen,
        error: InvalidBoard,
    },
    Rejected {
        fen: Fen,
        movement: Lan,
        error: MoveError,
    },
}
impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Destinations {
                fen,
                origin,
                found,
                expected,
            } => write!(
                f,
                "{fen}: {origin} reaches {found:?} but should reach {expected:?}"
            )?,
            Mismatch::Visibility {
                fen,
                viewer,
                position,
                glyph,
            } => write!(f, "{fen}: {viewer} sees `{}` on {position}", glyph.symbol())?,
            Mismatch::Board { fen, error } => write!(f, "{fen}: {error}")?,
            Mismatch::Rejected {
                fen,
                movement,
                error,
            } => write!(f, "{fen}: {movement} was offered but rejected, {error}")?,
        }
        Ok(())
    }
}
impl Error for Mismatch {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Mismatch::Board { error, .. } => Some(error),
            Mismatch::Rejected { error, .. } => Some(error),
            Mismatch::Destinations { .. } | Mismatch::Visibility { .. } => None,
        }
    }
}
fn occupancy(board: &Board, color: Color) -> BitBoard {
    board
        .pieces_of(color)
        .fold(EMPTY, |bits, piece| {
            bits | BitBoard::from_square(piece.position.into())
        })
}
/// Destinations taken from the `chess` crate's attack and push tables.
fn reference_destinations(board: &Board, piece: &Piece) -> FxHashSet<Coord> {
    let own = occupancy(board, piece.color);
    let theirs = occupancy(board, !piece.color);
    let combined = own | theirs;
    let square = Square::from(piece.position);
    let last_rank = match piece.color {
        Color::White => 7,
        Color::Black => 0,
    };
    let reach = match piece.kind {
        PieceKind::Pawn if piece.position.rank() == last_rank => EMPTY,
        PieceKind::Pawn => {
            chess::get_pawn_quiets(square, piece.color.into(), combined)
                | chess::get_pawn_attacks(square, piece.color.into(), theirs)
        }
        PieceKind::Knight => chess::get_knight_moves(square),
        PieceKind::Bishop => chess::get_bishop_moves(square, combined),
        PieceKind::Rook => chess::get_rook_moves(square, combined),
        PieceKind::Queen => {
            chess::get_bishop_moves(square, combined) | chess::get_rook_moves(square, combined)
        }
        PieceKind::King => chess::get_king_moves(square),
    };
    (reach & !own).map(Coord::from).collect()
}
fn sorted(set: &FxHashSet<Coord>) -> Vec<Coord> {
    let mut list: Vec<_> = set.iter().copied().collect();
    list.sort();
    list
}
/// Compares every live piece's destinations and both players' fog views
/// against the reference tables, and checks the occupancy bijection.
pub fn check_position(game: &Game) -> Result<(), Mismatch> {
    let board = game.board();
    board.validate().map_err(|error| Mismatch::Board {
        fen: game.fen(),
        error,
    })?;
    let mut threatened = [FxHashSet::default(), FxHashSet::default()];
    for piece in board.pieces() {
        let found: FxHashSet<Coord> = board.legal_destinations(piece.position).collect();
        let expected = reference_destinations(board, piece);
        if found != expected {
            return Err(Mismatch::Destinations {
                fen: game.fen(),
                origin: piece.position,
                found: sorted(&found),
                expected: sorted(&expected),
            });
        }
        threatened[piece.color as usize].extend(expected);
    }
    for viewer in Color::ALL {
        let view = game.board_view(Viewpoint::from(viewer));
        for piece in board.pieces() {
            let expected = if piece.color == viewer
                || threatened[viewer as usize].contains(&piece.position)
            {
                Glyph::Piece(piece.colored())
            } else {
                Glyph::Hidden
            };
            let glyph = view[piece.position];
            if glyph != expected {
                return Err(Mismatch::Visibility {
                    fen: game.fen(),
                    viewer,
                    position: piece.position,
                    glyph,
                });
            }
        }
    }
    Ok(())
}
fn candidate_moves(game: &Game) -> Vec<Lan> {
    game.board()
        .pieces_of(game.turn())
        .flat_map(move |piece| {
            let origin = piece.position;
            game.legal_destinations(origin)
                .map(move |destination| Lan {
                    origin,
                    destination,
                })
        })
        .collect()
}
fn playout(game: &mut Game, rng: &mut SmallRng) -> Result<(), Mismatch> {
    while !game.game_state().is_over() && game.move_count() < MAX_MOVES {
        check_position(game)?;
        let moves = candidate_moves(game);
        if moves.is_empty() {
            debug!(fen = %game.fen(), "no moves left");
            break;
        }
        let movement = moves[rng.random_range(0..moves.len())];
        if let Err(error) = game.try_move(movement.origin, movement.destination) {
            return Err(Mismatch::Rejected {
                fen: game.fen(),
                movement,
                error,
            });
        }
    }
    check_position(game)
}
/// Plays random games from the starting position, checking every position
/// reached. Runs forever when `games` is `None`.
pub fn fuzz(games: Option<u64>, seed: Option<u64>) -> Result<(), Mismatch> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut played: u64 = 0;
    while games.is_none_or(|games| played < games) {
        let mut game = Game::new();
        playout(&mut game, &mut rng)?;
        played += 1;
        debug!(
            game = played,
            moves = game.move_count(),
            state = %game.game_state(),
            "game finished"
        );
    }
    info!(games = played, "no mismatch found");
    Ok(())
}
