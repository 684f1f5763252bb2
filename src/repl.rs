use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use crate::{
    board_display::BoardDisplay,
    color::Color,
    coord::Coord,
    fen::{Fen, ParseFenError},
    game::Game,
    lan::{Lan, ParseLanError},
    misc::strip_prefix_token,
    view::{ParseViewpointError, Viewpoint},
};

/// Whose eyes the board is drawn through. `Auto` follows the side to move
/// and lifts the fog once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ViewSetting {
    Auto,
    Fixed(Viewpoint),
}
impl ViewSetting {
    fn viewpoint(self, game: &Game) -> Viewpoint {
        match self {
            ViewSetting::Fixed(viewpoint) => viewpoint,
            ViewSetting::Auto if game.game_state().is_over() => Viewpoint::Audience,
            ViewSetting::Auto => game.turn().into(),
        }
    }
}
impl Display for ViewSetting {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ViewSetting::Auto => write!(f, "auto")?,
            ViewSetting::Fixed(viewpoint) => write!(f, "{viewpoint}")?,
        }
        Ok(())
    }
}
impl FromStr for ViewSetting {
    type Err = ParseViewpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ViewSetting::Auto),
            s => Ok(ViewSetting::Fixed(s.parse()?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Help,
    Flip,
    View(ViewSetting),
    Restart,
    Quit,
    Import(Fen),
    ExportFen,
    Coord(Coord),
    Move(Lan),
}
impl Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::View(setting) => write!(f, "view {setting}")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Import(fen) => write!(f, "import {fen}")?,
            Input::ExportFen => write!(f, "fen")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move(movement) => write!(f, "{movement}")?,
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "fen" => Ok(Input::ExportFen),
            s => {
                if let Some(s) = strip_prefix_token(s, "import") {
                    Ok(Input::Import(s.parse()?))
                } else if let Some(s) = strip_prefix_token(s, "view") {
                    Ok(Input::View(s.parse()?))
                } else if let Ok(position) = s.parse() {
                    Ok(Input::Coord(position))
                } else {
                    Ok(Input::Move(s.parse()?))
                }
            }
        }
    }
}
fn status(game: &Game, setting: ViewSetting, viewpoint: Viewpoint) -> String {
    let mut info = match game.game_state().winner() {
        Some(winner) => format!("{winner} wins by capturing the king\n"),
        None => format!("{} plays\n", game.turn()),
    };
    info.push_str(&format!("view: {viewpoint} ({setting})\n"));
    for color in Color::ALL {
        let captured: String = game
            .captured(color)
            .map(|piece| piece.colored().figurine())
            .collect();
        if !captured.is_empty() {
            info.push_str(&format!("{color} lost {captured}\n"));
        }
    }
    info.push_str(&format!("moves played: {}\n", game.move_count()));
    info
}
#[allow(
    clippy::too_many_lines,
    reason = "further decomposition could potentially hurt readability"
)]
pub fn repl() -> io::Result<()> {
    let input = stdin().lock();
    let mut output = stdout().lock();
    let mut error = stderr().lock();

    let mut lines = input.lines();

    let mut game = Game::new();
    let mut highlighted = Vec::new();
    let mut setting = ViewSetting::Auto;
    let mut flipped = false;
    let mut first_time = true;
    writeln!(
        output,
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )?;
    loop {
        let viewpoint = setting.viewpoint(&game);
        let mut info = status(&game, setting, viewpoint);
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        let orientation = viewpoint.player().unwrap_or(Color::White);
        writeln!(
            output,
            "{}",
            BoardDisplay {
                view: game.board_view(viewpoint),
                orientation: if flipped { !orientation } else { orientation },
                highlighted: &highlighted,
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let input = match text?.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            match input {
                Input::Help => {
                    writeln!(output, "flip           - flip the board")?;
                    writeln!(output, "view <who>     - white, black, audience or auto")?;
                    writeln!(output, "restart        - reset to starting position")?;
                    writeln!(output, "quit           - quit the game")?;
                    writeln!(output, "import <fen>   - import a position")?;
                    writeln!(output, "fen            - export the position as fen")?;
                    writeln!(output, "e2             - view valid moves")?;
                    writeln!(output, "e2e4           - play the move")?;
                    continue;
                }
                Input::Flip => {
                    flipped = !flipped;
                }
                Input::View(new_setting) => {
                    setting = new_setting;
                    highlighted.clear();
                }
                Input::Restart => {
                    game = Game::new();
                    highlighted.clear();
                }
                Input::Quit => return Ok(()),
                Input::Import(fen) => {
                    game = match fen.try_into() {
                        Ok(game) => game,
                        Err(err) => {
                            writeln!(error, "Error: {err}")?;
                            continue;
                        }
                    };
                    highlighted.clear();
                }
                Input::ExportFen => {
                    writeln!(output, "{}", game.fen())?;
                    continue;
                }
                Input::Coord(position) => {
                    let Some(piece) = game.board().occupant(position) else {
                        writeln!(error, "Error: No piece found on {position}")?;
                        continue;
                    };
                    if piece.color != game.turn() {
                        writeln!(error, "Error: It is {}'s turn", game.turn())?;
                        continue;
                    }
                    highlighted.clear();
                    highlighted.extend(game.legal_destinations(position));
                }
                Input::Move(lan) => match game.try_move(lan.origin, lan.destination) {
                    Ok(captured) => {
                        highlighted.clear();
                        highlighted.push(lan.origin);
                        highlighted.push(lan.destination);
                        if let Some(piece) = captured {
                            writeln!(output, "{} captured on {}", piece.colored(), lan.destination)?;
                        }
                    }
                    Err(err) => {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                },
            }
            break;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseInputError {
    Fen(ParseFenError),
    Move(ParseLanError),
    View(ParseViewpointError),
}
impl From<ParseFenError> for ParseInputError {
    fn from(value: ParseFenError) -> Self {
        ParseInputError::Fen(value)
    }
}
impl From<ParseLanError> for ParseInputError {
    fn from(value: ParseLanError) -> Self {
        ParseInputError::Move(value)
    }
}
impl From<ParseViewpointError> for ParseInputError {
    fn from(value: ParseViewpointError) -> Self {
        ParseInputError::View(value)
    }
}
impl Display for ParseInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseInputError::Fen(err) => write!(f, "{err}")?,
            ParseInputError::Move(err) => write!(f, "{err}")?,
            ParseInputError::View(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseInputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseInputError::Fen(err) => Some(err),
            ParseInputError::Move(err) => Some(err),
            ParseInputError::View(err) => Some(err),
        }
    }
}
#[cfg(test)]
mod test {
    use crate::{
        coord,
        repl::{Input, ParseInputError, ViewSetting},
        view::{ParseViewpointError, Viewpoint},
    };

    #[test]
    fn commands() {
        assert_eq!("flip".parse::<Input>(), Ok(Input::Flip));
        assert_eq!("e2".parse::<Input>(), Ok(Input::Coord(coord!("e2"))));
        assert_eq!(
            "view audience".parse::<Input>(),
            Ok(Input::View(ViewSetting::Fixed(Viewpoint::Audience)))
        );
        assert_eq!("view auto".parse::<Input>(), Ok(Input::View(ViewSetting::Auto)));
        assert_eq!(
            "view nobody".parse::<Input>(),
            Err(ParseInputError::View(ParseViewpointError))
        );
        let Ok(Input::Move(lan)) = "e2 e4".parse::<Input>() else {
            panic!("expected a move");
        };
        assert_eq!((lan.origin, lan.destination), (coord!("e2"), coord!("e4")));
        assert!(matches!(
            "import 4k3/8/8/8/8/8/8/4K3 w".parse::<Input>(),
            Ok(Input::Import(_))
        ));
        assert!(matches!("e2e9".parse::<Input>(), Err(ParseInputError::Move(_))));
    }
}
