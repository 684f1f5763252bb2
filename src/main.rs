#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    env::args,
    io::stderr,
    process::ExitCode,
};

use fog_of_war::{fuzz::fuzz, repl::repl};
use tracing_subscriber::EnvFilter;

fn parse_count(arg: Option<String>, name: &str) -> Result<Option<u64>, String> {
    arg.map(|arg| {
        arg.parse()
            .map_err(|err| format!("invalid {name} `{arg}`: {err}"))
    })
    .transpose()
}
fn run() -> Result<(), String> {
    let mut args = args().skip(1);
    match args.next().as_deref() {
        None | Some("play") => repl().map_err(|err| err.to_string()),
        Some("fuzz") => {
            let games = parse_count(args.next(), "game count")?;
            let seed = parse_count(args.next(), "seed")?;
            fuzz(games, seed).map_err(|err| err.to_string())
        }
        Some(mode) => Err(format!(
            "unknown mode `{mode}`, expected `play` or `fuzz [games] [seed]`"
        )),
    }
}
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(stderr)
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
