use std::ops::Index;

use crate::{
    color::Color,
    coord::{Coord, home_rank, pawn_home_rank},
    error::InvalidBoard,
    piece::{Piece, PieceKind},
};

/// Slot of a piece in the board's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceIndex(u8);

impl From<PieceIndex> for usize {
    fn from(value: PieceIndex) -> Self {
        value.0 as usize
    }
}

/// Square occupancy over a roster of pieces.
///
/// The roster keeps every piece ever placed, captured ones included, while
/// `squares` maps each square to the roster slot of the live piece standing
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pieces: Vec<Piece>,
    squares: [Option<PieceIndex>; 64],
}
impl Board {
    pub fn empty() -> Self {
        Board {
            pieces: Vec::with_capacity(32),
            squares: [None; 64],
        }
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board.insert(Piece::new(
                    color,
                    kind,
                    Coord::new(file, home_rank(color)),
                ));
            }
            for file in 0..8 {
                board.insert(Piece::new(
                    color,
                    PieceKind::Pawn,
                    Coord::new(file, pawn_home_rank(color)),
                ));
            }
        }
        board
    }
    fn insert(&mut self, piece: Piece) -> PieceIndex {
        debug_assert!(self.squares[piece.position.index()].is_none());
        debug_assert!(self.pieces.len() < usize::from(u8::MAX));
        let index = PieceIndex(self.pieces.len() as u8);
        self.squares[piece.position.index()] = Some(index);
        self.pieces.push(piece);
        index
    }
    /// Adds a piece on an empty square. A pawn placed off its home rank
    /// counts as having moved once, so it cannot double-step.
    pub fn place(
        &mut self,
        color: Color,
        kind: PieceKind,
        position: Coord,
    ) -> Result<PieceIndex, InvalidBoard> {
        if self.squares[position.index()].is_some() {
            return Err(InvalidBoard::Occupied(position));
        }
        let mut piece = Piece::new(color, kind, position);
        if kind == PieceKind::Pawn && position.rank() != pawn_home_rank(color) {
            piece.moves_made = 1;
        }
        Ok(self.insert(piece))
    }
    pub fn occupant(&self, position: Coord) -> Option<&Piece> {
        self.index_at(position).map(|index| &self[index])
    }
    pub fn index_at(&self, position: Coord) -> Option<PieceIndex> {
        self.squares[position.index()]
    }
    pub(crate) fn piece_mut(&mut self, index: PieceIndex) -> &mut Piece {
        &mut self.pieces[usize::from(index)]
    }
    /// Moves whatever stands on `origin` to `destination`, dropping any
    /// occupant of `destination` from the square map. Legality and capture
    /// bookkeeping belong to the caller.
    pub fn apply_move(&mut self, origin: Coord, destination: Coord) {
        let moving = self.squares[origin.index()].take();
        debug_assert!(moving.is_some(), "no piece on {origin}");
        self.squares[destination.index()] = moving;
    }
    pub fn is_path_clear(&self, origin: Coord, destination: Coord) -> bool {
        origin
            .squares_between(destination)
            .is_some_and(|mut line| line.all(|position| self.index_at(position).is_none()))
    }
    /// Every piece ever placed, including captured ones.
    pub fn roster(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares
            .iter()
            .flatten()
            .map(|index| &self[*index])
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |piece| piece.color == color)
    }
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces_of(color)
            .find(|piece| piece.kind == PieceKind::King)
    }
    /// Squares the piece on `origin` may move to, skipping squares held by
    /// its own side.
    pub fn legal_destinations(&self, origin: Coord) -> impl Iterator<Item = Coord> + '_ {
        let piece = self.occupant(origin);
        Coord::all().filter(move |destination| {
            piece.is_some_and(|piece| {
                self.occupant(*destination)
                    .is_none_or(|target| target.color != piece.color)
                    && piece.is_legal_move(origin, *destination, self)
            })
        })
    }
    /// Whether any live piece of `color` has a legal move landing on `target`.
    pub fn threatens(&self, color: Color, target: Coord) -> bool {
        self.pieces_of(color)
            .any(|piece| piece.is_legal_move(piece.position, target, self))
    }
    /// Checks that live pieces and occupied squares match one to one.
    pub fn validate(&self) -> Result<(), InvalidBoard> {
        for position in Coord::all() {
            if let Some(piece) = self.occupant(position) {
                if piece.captured {
                    return Err(InvalidBoard::CapturedPieceOnBoard(position));
                }
                if piece.position != position {
                    return Err(InvalidBoard::MisplacedPiece {
                        recorded: piece.position,
                        found: position,
                    });
                }
            }
        }
        for (i, piece) in self.pieces.iter().enumerate() {
            if !piece.captured
                && self.index_at(piece.position).map(usize::from) != Some(i)
            {
                return Err(InvalidBoard::MissingPiece(piece.position));
            }
        }
        Ok(())
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<PieceIndex> for Board {
    type Output = Piece;

    fn index(&self, index: PieceIndex) -> &Self::Output {
        &self.pieces[usize::from(index)]
    }
}
#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord,
        error::InvalidBoard,
        piece::PieceKind,
    };

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        let king = board.king(Color::Black).unwrap();
        assert_eq!(king.position, coord!("e8"));
        let queen = board.occupant(coord!("d1")).unwrap();
        assert_eq!((queen.color, queen.kind), (Color::White, PieceKind::Queen));
        assert!(board.occupant(coord!("e4")).is_none());
        assert_eq!(board.validate(), Ok(()));
    }
    #[test]
    fn place_refuses_occupied_squares() {
        let mut board = Board::empty();
        board.place(Color::White, PieceKind::Rook, coord!("a1")).unwrap();
        assert_eq!(
            board.place(Color::Black, PieceKind::Rook, coord!("a1")),
            Err(InvalidBoard::Occupied(coord!("a1")))
        );
    }
    #[test]
    fn placed_pawns_off_home_rank_count_as_moved() {
        let mut board = Board::empty();
        let advanced = board.place(Color::White, PieceKind::Pawn, coord!("e3")).unwrap();
        let home = board.place(Color::Black, PieceKind::Pawn, coord!("d7")).unwrap();
        let rook = board.place(Color::White, PieceKind::Rook, coord!("a4")).unwrap();
        assert_eq!(board[advanced].moves_made, 1);
        assert_eq!(board[home].moves_made, 0);
        assert_eq!(board[rook].moves_made, 0);
        let pawn = board[advanced];
        assert!(!pawn.is_legal_move(coord!("e3"), coord!("e5"), &board));
        assert!(pawn.is_legal_move(coord!("e3"), coord!("e4"), &board));
    }
    #[test]
    fn apply_move_only_touches_the_square_map() {
        let mut board = Board::starting_position();
        board.apply_move(coord!("g1"), coord!("f3"));
        assert!(board.occupant(coord!("g1")).is_none());
        let knight = board.occupant(coord!("f3")).unwrap();
        assert_eq!(knight.kind, PieceKind::Knight);
        // the piece record still says g1 until the caller updates it
        assert_eq!(
            board.validate(),
            Err(InvalidBoard::MisplacedPiece {
                recorded: coord!("g1"),
                found: coord!("f3"),
            })
        );
    }
    #[test]
    fn path_scan_excludes_endpoints() {
        let board = Board::starting_position();
        assert!(board.is_path_clear(coord!("a2"), coord!("a7")));
        assert!(!board.is_path_clear(coord!("a1"), coord!("a3")));
        assert!(board.is_path_clear(coord!("a1"), coord!("a2")));
        assert!(!board.is_path_clear(coord!("a1"), coord!("b3")));
    }
    #[test]
    fn opening_threats() {
        let board = Board::starting_position();
        assert!(board.threatens(Color::White, coord!("f3")));
        assert!(board.threatens(Color::White, coord!("e4")));
        assert!(!board.threatens(Color::White, coord!("e5")));
        assert!(!board.threatens(Color::Black, coord!("e2")));
    }
    #[test]
    fn legal_destinations_skip_own_pieces() {
        let board = Board::starting_position();
        let mut knight: Vec<_> = board.legal_destinations(coord!("b1")).collect();
        knight.sort();
        assert_eq!(knight, [coord!("a3"), coord!("c3")]);
        assert_eq!(board.legal_destinations(coord!("a1")).count(), 0);
        assert_eq!(board.legal_destinations(coord!("e4")).count(), 0);
    }
}
