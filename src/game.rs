use tracing::{debug, info};

use crate::{
    board::{Board, PieceIndex},
    color::Color,
    coord::{Coord, ParseCoordError},
    error::{InvalidBoard, MoveError},
    fen::Fen,
    game_state::GameState,
    piece::{Piece, PieceKind},
    view::{BoardView, Viewpoint},
};

/// One game of fog of war chess: the board, whose turn it is, and whether
/// someone has captured a king yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    turn: Color,
    state: GameState,
    move_count: u32,
}
impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::starting_position(),
            turn: Color::White,
            state: GameState::InProgress,
            move_count: 0,
        }
    }
    pub fn game_state(&self) -> GameState {
        self.state
    }
    pub fn set_game_state(&mut self, state: GameState) {
        self.state = state;
    }
    pub fn turn(&self) -> Color {
        self.turn
    }
    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }
    pub fn move_count(&self) -> u32 {
        self.move_count
    }
    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn board_view(&self, viewpoint: Viewpoint) -> BoardView {
        self.board.render(viewpoint)
    }
    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board.clone(),
            current_player: self.turn,
        }
    }
    /// Pieces of `color` that have been taken so far.
    pub fn captured(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.board
            .roster()
            .filter(move |piece| piece.captured && piece.color == color)
    }
    /// Destinations for the piece on `origin`, empty unless it is that
    /// piece's turn and the game is still going.
    pub fn legal_destinations(&self, origin: Coord) -> impl Iterator<Item = Coord> + '_ {
        let movable = !self.state.is_over()
            && self
                .board
                .occupant(origin)
                .is_some_and(|piece| piece.color == self.turn);
        self.board
            .legal_destinations(origin)
            .filter(move |_| movable)
    }
    /// Plays a move, returning whether it was accepted. A rejected move
    /// leaves the game untouched.
    pub fn make_move(&mut self, origin: Coord, destination: Coord) -> bool {
        match self.try_move(origin, destination) {
            Ok(_) => true,
            Err(reason) => {
                debug!(from = %origin, to = %destination, %reason, "move rejected");
                false
            }
        }
    }
    /// Same as [`Game::make_move`] but takes square tokens such as `"e2"`.
    /// Malformed tokens are an error rather than a rejected move.
    pub fn make_move_str(
        &mut self,
        origin: &str,
        destination: &str,
    ) -> Result<bool, ParseCoordError> {
        let origin = origin.parse()?;
        let destination = destination.parse()?;
        Ok(self.make_move(origin, destination))
    }
    /// Plays a move, returning the captured piece if there was one, or why
    /// the move was refused.
    pub fn try_move(
        &mut self,
        origin: Coord,
        destination: Coord,
    ) -> Result<Option<Piece>, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver(self.state));
        }
        if origin == destination {
            return Err(MoveError::SameSquare(origin));
        }
        let mover = self
            .board
            .index_at(origin)
            .ok_or(MoveError::EmptySquare(origin))?;
        let piece = self.board[mover];
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn {
                position: origin,
                turn: self.turn,
            });
        }
        let target = self.board.index_at(destination);
        if target.is_some_and(|target| self.board[target].color == self.turn) {
            return Err(MoveError::OwnPieceAtDestination(destination));
        }
        if !piece.is_legal_move(origin, destination, &self.board) {
            return Err(MoveError::Illegal {
                piece: piece.colored(),
                origin,
                destination,
            });
        }
        let captured = target.map(|target| self.capture(target));
        let moving = self.board.piece_mut(mover);
        moving.moves_made += 1;
        moving.position = destination;
        self.board.apply_move(origin, destination);
        self.turn = !self.turn;
        self.move_count += 1;
        debug!(
            piece = %piece.colored(),
            from = %origin,
            to = %destination,
            captured = ?captured.map(|piece| piece.kind),
            "move played"
        );
        Ok(captured)
    }
    /// Marks a piece as captured. Taking a king ends the game in favor of
    /// the other side.
    fn capture(&mut self, index: PieceIndex) -> Piece {
        let piece = self.board.piece_mut(index);
        piece.captured = true;
        let piece = *piece;
        if piece.kind == PieceKind::King {
            let winner = !piece.color;
            self.state = GameState::won_by(winner);
            info!(%winner, "king captured");
        }
        piece
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
impl TryFrom<Fen> for Game {
    type Error = InvalidBoard;

    fn try_from(value: Fen) -> Result<Self, Self::Error> {
        for color in Color::ALL {
            let count = value
                .board
                .pieces_of(color)
                .filter(|piece| piece.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(InvalidBoard::KingCount { color, count });
            }
        }
        Ok(Game {
            board: value.board,
            turn: value.current_player,
            state: GameState::InProgress,
            move_count: 0,
        })
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        coord,
        coord::{Coord, ParseCoordError},
        error::{InvalidBoard, MoveError},
        fen::Fen,
        game::Game,
        game_state::GameState,
        piece::{ColoredPieceKind, PieceKind},
        view::{Glyph, Viewpoint},
    };

    fn game(fen: &str) -> Game {
        fen.parse::<Fen>().unwrap().try_into().unwrap()
    }
    fn play(game: &mut Game, moves: &[&str]) {
        for movement in moves {
            let (origin, destination) = movement.split_at(2);
            assert_eq!(game.make_move_str(origin, destination), Ok(true), "{movement}");
        }
    }

    #[test]
    fn opening_double_step() {
        let mut game = Game::new();
        assert!(game.make_move(coord!("e2"), coord!("e4")));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 1);
        assert_eq!(
            game.board_view(Viewpoint::Audience)[coord!("e4")],
            Glyph::Piece(ColoredPieceKind::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(game.board_view(Viewpoint::Audience)[coord!("e2")], Glyph::Empty);
        let pawn = game.board().occupant(coord!("e4")).unwrap();
        assert_eq!((pawn.position, pawn.moves_made), (coord!("e4"), 1));
    }
    #[test]
    fn triple_step_is_rejected_without_side_effects() {
        let mut game = Game::new();
        let before = game.clone();
        assert!(!game.make_move(coord!("e2"), coord!("e5")));
        assert_eq!(game, before);
        assert_eq!(game.turn(), Color::White);
    }
    #[test]
    fn rejection_reasons() {
        let mut game = Game::new();
        assert_eq!(
            game.try_move(coord!("e2"), coord!("e2")),
            Err(MoveError::SameSquare(coord!("e2")))
        );
        assert_eq!(
            game.try_move(coord!("e4"), coord!("e5")),
            Err(MoveError::EmptySquare(coord!("e4")))
        );
        assert_eq!(
            game.try_move(coord!("e7"), coord!("e5")),
            Err(MoveError::NotYourTurn {
                position: coord!("e7"),
                turn: Color::White,
            })
        );
        assert_eq!(
            game.try_move(coord!("a1"), coord!("a2")),
            Err(MoveError::OwnPieceAtDestination(coord!("a2")))
        );
        assert_eq!(
            game.try_move(coord!("a1"), coord!("a4")),
            Err(MoveError::Illegal {
                piece: ColoredPieceKind::new(Color::White, PieceKind::Rook),
                origin: coord!("a1"),
                destination: coord!("a4"),
            })
        );
        assert_eq!(game, Game::new());
    }
    #[test]
    fn malformed_tokens_fail_fast() {
        let mut game = Game::new();
        assert_eq!(
            game.make_move_str("e2", "e9"),
            Err(ParseCoordError::InvalidRank('9'))
        );
        assert_eq!(
            game.make_move_str("z2", "e4"),
            Err(ParseCoordError::InvalidFile('z'))
        );
        assert_eq!(game.make_move_str("e2", "e4"), Ok(true));
    }
    #[test]
    fn turns_alternate_only_on_accepted_moves() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "e7e5"]);
        assert_eq!(game.turn(), Color::White);
        assert!(!game.make_move(coord!("e4"), coord!("e5")));
        assert_eq!(game.turn(), Color::White);
        play(&mut game, &["g1f3"]);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 3);
    }
    #[test]
    fn moved_pawn_cannot_double_step() {
        let mut game = Game::new();
        play(&mut game, &["a2a3", "h7h6"]);
        assert!(!game.make_move(coord!("a3"), coord!("a5")));
        assert!(game.make_move(coord!("a3"), coord!("a4")));
    }
    #[test]
    fn captures_are_recorded() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5"]);
        let captured = game.try_move(coord!("e4"), coord!("d5")).unwrap().unwrap();
        assert_eq!((captured.color, captured.kind), (Color::Black, PieceKind::Pawn));
        assert!(captured.captured);
        let taken: Vec<_> = game.captured(Color::Black).collect();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].position, coord!("d5"));
        assert_eq!(game.captured(Color::White).count(), 0);
        assert_eq!(game.board().pieces().count(), 31);
        assert_eq!(game.board().validate(), Ok(()));
    }
    #[test]
    fn rook_captures_the_black_king() {
        let mut game = Game::new();
        play(
            &mut game,
            &["h2h4", "e7e5", "h1h3", "e8e7", "h3e3", "e7d6", "e3e5", "a7a6"],
        );
        assert_eq!(game.game_state(), GameState::InProgress);
        let d6_king = game.board().king(Color::Black).unwrap().position;
        assert_eq!(d6_king, coord!("d6"));
        assert!(game.make_move(coord!("e5"), coord!("d5")));
        assert!(game.make_move(coord!("d6"), coord!("c6")));
        assert!(game.make_move(coord!("d5"), coord!("c5")));
        assert!(game.make_move(coord!("a6"), coord!("a5")));
        assert!(game.make_move(coord!("c5"), coord!("c6")));
        assert_eq!(game.game_state(), GameState::WhiteWon);
        assert!(game.board().king(Color::Black).is_none());
        let over = game.clone();
        assert!(!game.make_move(coord!("a5"), coord!("a4")));
        assert!(!game.make_move(coord!("c6"), coord!("c7")));
        assert_eq!(
            game.try_move(coord!("a5"), coord!("a4")),
            Err(MoveError::GameOver(GameState::WhiteWon))
        );
        assert_eq!(game, over);
    }
    #[test]
    fn capturing_the_white_king_wins_for_black() {
        let mut game = game("4k3/8/8/8/8/8/3q4/4K3 b");
        assert!(game.make_move(coord!("d2"), coord!("e1")));
        assert_eq!(game.game_state(), GameState::BlackWon);
        assert_eq!(game.game_state().winner(), Some(Color::Black));
        assert!(!game.make_move(coord!("e8"), coord!("e7")));
    }
    #[test]
    fn fog_lifts_where_pieces_reach() {
        let mut game = Game::new();
        play(&mut game, &["e2e4", "d7d5"]);
        let white = game.board_view(Viewpoint::White);
        assert_eq!(white[coord!("d5")].symbol(), 'p');
        assert_eq!(white[coord!("d8")], Glyph::Hidden);
        let black = game.board_view(Viewpoint::Black);
        assert_eq!(black[coord!("e4")].symbol(), 'P');
        assert_eq!(black[coord!("e1")], Glyph::Hidden);
    }
    #[test]
    fn legal_destinations_follow_the_turn() {
        let game = Game::new();
        assert_eq!(game.legal_destinations(coord!("e2")).count(), 2);
        assert_eq!(game.legal_destinations(coord!("e7")).count(), 0);
        let expected: Vec<Coord> = vec![coord!("a3"), coord!("c3")];
        let mut knight: Vec<_> = game.legal_destinations(coord!("b1")).collect();
        knight.sort();
        assert_eq!(knight, expected);
    }
    #[test]
    fn accessors_are_plain() {
        let mut game = Game::new();
        game.set_turn(Color::Black);
        assert!(game.make_move(coord!("e7"), coord!("e5")));
        game.set_game_state(GameState::BlackWon);
        assert!(!game.make_move(coord!("e2"), coord!("e4")));
    }
    #[test]
    fn imported_positions_need_one_king_each() {
        let fen: Fen = "8/8/8/8/8/8/8/4K3 w".parse().unwrap();
        assert_eq!(
            Game::try_from(fen),
            Err(InvalidBoard::KingCount {
                color: Color::Black,
                count: 0,
            })
        );
        let game = game("4k3/8/8/8/8/8/8/4K3 b");
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.fen().to_string(), "4k3/8/8/8/8/8/8/4K3 b");
    }
}
