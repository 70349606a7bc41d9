// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::{
    fmt,
    io::{self, BufRead, Write},
    process,
};

use clap::{App, Arg, ArgMatches};
use log::{debug, error};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;

use seabattle::{
    board::{CannotShootReason, ShotError},
    game::{MatchError, Withdrawn},
    CellState, Combatant, Coordinate, Dimensions, GameConfig, Grid, Match, MatchState,
    RandomCombatant, ShotOutcome, Side, TurnRule,
};

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("Sea Battle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command line sea battle against the computer.")
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIZE")
                .help("side length of both boards")
                .takes_value(true)
                .default_value("6"),
        )
        .arg(
            Arg::with_name("fleet")
                .long("fleet")
                .value_name("LENGTHS")
                .help("comma separated vessel lengths")
                .takes_value(true)
                .default_value("3,2,2,1,1,1,1"),
        )
        .arg(
            Arg::with_name("turn_rule")
                .long("turn-rule")
                .value_name("RULE")
                .help("which hits earn another shot")
                .takes_value(true)
                .possible_values(&["any-hit", "hit-only"])
                .default_value("any-hit"),
        )
        .arg(
            Arg::with_name("skin")
                .long("skin")
                .value_name("SKIN")
                .help("how board cells are drawn")
                .takes_value(true)
                .possible_values(&["letters", "symbols"])
                .default_value("symbols"),
        )
        .arg(
            Arg::with_name("first")
                .short("f")
                .long("first")
                .value_name("SIDE")
                .help("which side fires first")
                .takes_value(true)
                .possible_values(&[
                    "player", "me", "opponent", "computer", "bot", "random", "rand",
                ])
                .case_insensitive(true)
                .default_value("player"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the random number generator for a reproducible game")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("auto")
                .long("auto")
                .help("let the computer play your side too"),
        )
        .get_matches();

    let config = match parse_config(&matches) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("error: {}", msg);
            process::exit(2);
        }
    };
    let skin = match matches.value_of("skin") {
        Some("letters") => Skin::Letters,
        _ => Skin::Symbols,
    };

    let mut rng = match matches.value_of("seed") {
        Some(seed) => match seed.parse() {
            Ok(seed) => StdRng::seed_from_u64(seed),
            Err(_) => {
                eprintln!("error: invalid seed: {}", seed);
                process::exit(2);
            }
        },
        None => StdRng::seed_from_u64(rand::thread_rng().gen()),
    };
    let first = choose_first(&matches, &mut rng);

    let game = match Match::random(&mut rng, &config) {
        Ok(game) => game.with_first(first),
        Err(err) => {
            error!("fleet placement failed: {}", err);
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    greet(game.grid(Side::Player).dimensions());

    let stdin = io::stdin();
    let mut opponent = Computer::new(StdRng::seed_from_u64(rng.gen()), "Computer");
    let mut player: Box<dyn Combatant + '_> = if matches.is_present("auto") {
        Box::new(Computer::new(StdRng::seed_from_u64(rng.gen()), "Autopilot"))
    } else {
        Box::new(Human::new(InputReader::new(stdin.lock())))
    };

    run(game, skin, &mut *player, &mut opponent)
}

/// Build the [`GameConfig`] from the command line arguments.
fn parse_config(matches: &ArgMatches) -> Result<GameConfig, String> {
    let board_size = matches
        .value_of("size")
        .unwrap_or("6")
        .parse()
        .map_err(|_| "board size must be a positive number".to_string())?;
    let fleet = parse_fleet(matches.value_of("fleet").unwrap_or(""))?;
    let turn_rule = match matches.value_of("turn_rule") {
        Some("hit-only") => TurnRule::ExtraShotOnHitNotSink,
        _ => TurnRule::ExtraShotOnHit,
    };
    let config = GameConfig {
        board_size,
        fleet,
        turn_rule,
        ..GameConfig::default()
    };
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

/// Parse a comma separated list of vessel lengths.
fn parse_fleet(input: &str) -> Result<Vec<usize>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| format!("invalid vessel length: {:?}", s))
        })
        .collect()
}

/// Choose which [`Side`] fires first based on the args.
fn choose_first(matches: &ArgMatches, rng: &mut impl Rng) -> Side {
    match matches.value_of("first").map(str::to_ascii_lowercase).as_deref() {
        Some("opponent") | Some("computer") | Some("bot") => Side::Opponent,
        Some("random") | Some("rand") => rng.gen(),
        _ => Side::Player,
    }
}

/// Play the match to the end, showing both boards before every shot.
fn run(
    mut game: Match,
    skin: Skin,
    player: &mut dyn Combatant,
    opponent: &mut dyn Combatant,
) -> io::Result<()> {
    loop {
        let turn = match game.state() {
            MatchState::Finished(winner) => {
                show_boards(&game, skin);
                farewell(winner);
                return Ok(());
            }
            MatchState::PlayerTurn => {
                print_lines(&turn_screen(&game, skin));
                game.take_turn(&mut *player)
            }
            MatchState::OpponentTurn => {
                print_lines(&turn_screen(&game, skin));
                game.take_turn(&mut *opponent)
            }
        };
        match turn {
            Ok(report) => debug!("turn over: {:?}", report),
            Err(MatchError::Withdrawn(Side::Player)) => {
                println!();
                println!("You left the game.");
                return Ok(());
            }
            Err(err) => {
                return Err(io::Error::new(io::ErrorKind::Other, err.to_string()));
            }
        }
    }
}

/// Print the opening banner.
fn greet(dim: &Dimensions) {
    println!("{}", "-".repeat(40));
    println!("            SEA BATTLE");
    println!("  Enter a target as two numbers:");
    println!("     the row, then the column (1-{}).", dim.size());
    println!("  Type help for commands.");
    println!("{}", "-".repeat(40));
}

/// Print the closing banner for the given winner.
fn farewell(winner: Side) {
    match winner {
        Side::Player => {
            println!("{}", "*".repeat(20));
            println!("    YOU WIN!");
            println!("{}", "*".repeat(20));
        }
        Side::Opponent => {
            println!("{}", "-".repeat(20));
            println!("    YOU LOSE");
            println!("{}", "-".repeat(20));
        }
    }
}

/// Describe the result of a shot to the player.
fn describe_outcome(outcome: ShotOutcome) -> &'static str {
    match outcome {
        ShotOutcome::Miss => "Miss!",
        ShotOutcome::Hit(_) => "Hit!",
        ShotOutcome::Sunk(_) => "Vessel destroyed!",
    }
}

/// Describe why a target was refused.
fn describe_rejection(err: &ShotError) -> &'static str {
    match err.reason() {
        CannotShootReason::OutOfBounds => "That shot lands off the board.",
        CannotShootReason::AlreadyShot => "That cell has already been shot.",
    }
}

/// Combatant driven by typed input.
struct Human<B> {
    input: InputReader<B>,
}

impl<B> Human<B> {
    fn new(input: InputReader<B>) -> Self {
        Self { input }
    }
}

impl<B: BufRead> Combatant for Human<B> {
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn> {
        enum Command {
            Fire(Coordinate),
            Help,
            Quit,
        }
        loop {
            let cmd = self
                .input
                .read_input_lower("Target (row column) >", |input| match input {
                    "?" | "help" | "h" => Some(Command::Help),
                    "quit" | "exit" | "q" => Some(Command::Quit),
                    other => match parse_target(other) {
                        Ok(coord) => Some(Command::Fire(coord)),
                        Err(msg) => {
                            println!("{}", msg);
                            None
                        }
                    },
                });
            match cmd {
                Ok(Some(Command::Fire(coord))) => return Ok(coord),
                Ok(Some(Command::Help)) => println!(
                    "Available Commands:
    <row> <column>    fire at the given cell, both counted from 1 up to {}.
    help              show this message.
    quit              leave the game.",
                    dim.size()
                ),
                Ok(Some(Command::Quit)) | Ok(None) => return Err(Withdrawn),
                Err(err) => {
                    error!("failed to read input: {}", err);
                    return Err(Withdrawn);
                }
            }
        }
    }

    fn shot_rejected(&mut self, err: &ShotError) {
        println!("{}", describe_rejection(err));
    }

    fn shot_resolved(&mut self, _target: Coordinate, outcome: ShotOutcome) {
        println!("{}", describe_outcome(outcome));
    }
}

/// Random combatant that announces its moves.
struct Computer<R> {
    inner: RandomCombatant<R>,
    name: &'static str,
}

impl<R: Rng> Computer<R> {
    fn new(rng: R, name: &'static str) -> Self {
        Self {
            inner: RandomCombatant::new(rng),
            name,
        }
    }
}

impl<R: Rng> Combatant for Computer<R> {
    fn choose_target(&mut self, dim: &Dimensions) -> Result<Coordinate, Withdrawn> {
        self.inner.choose_target(dim)
    }

    fn shot_resolved(&mut self, target: Coordinate, outcome: ShotOutcome) {
        println!(
            "{} fires at {}: {}",
            self.name,
            DisplayTarget(target),
            describe_outcome(outcome)
        );
    }
}

/// Parse a target typed by the player: row then column, counted from 1, separated by
/// whitespace or a comma. The result is counted from 0 and may be off the board.
fn parse_target(input: &str) -> Result<Coordinate, String> {
    static TARGET: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<x>\S+?)(?:\s*,\s*|\s+)(?P<y>\S+)$").unwrap());

    let captures = TARGET
        .captures(input.trim())
        .ok_or_else(|| "Enter two numbers: the row and the column.".to_string())?;
    let x = parse_axis(&captures["x"])?;
    let y = parse_axis(&captures["y"])?;
    Ok(Coordinate::new(x - 1, y - 1))
}

/// Parse a single 1-based axis value.
fn parse_axis(token: &str) -> Result<i32, String> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("{} is not a number.", token));
    }
    token
        .parse()
        .map_err(|_| format!("{} is too large.", token))
}

/// Display helper that prints a coordinate the way the player types it.
struct DisplayTarget(Coordinate);

impl fmt::Display for DisplayTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.0.x + 1, self.0.y + 1)
    }
}

/// Glyph set used to draw cells.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Skin {
    Letters,
    Symbols,
}

impl Skin {
    /// Get the glyph for a cell. Hidden boards never reveal undamaged vessels, and
    /// buffers always look like open water until revealed.
    fn glyph(self, state: CellState, hidden: bool) -> char {
        match (self, state) {
            (_, CellState::Ship) if hidden => self.glyph(CellState::Empty, hidden),
            (_, CellState::Buffer) => self.glyph(CellState::Empty, hidden),
            (Skin::Letters, CellState::Empty) => '.',
            (Skin::Letters, CellState::Ship) => 'O',
            (Skin::Letters, CellState::Hit) => 'X',
            (Skin::Letters, CellState::Miss) => 'T',
            (Skin::Symbols, CellState::Empty) => '~',
            (Skin::Symbols, CellState::Ship) => '■',
            (Skin::Symbols, CellState::Hit) => 'X',
            (Skin::Symbols, CellState::Miss) => '•',
        }
    }
}

/// Render a grid as lines of text: a header of 1-based column numbers, then one line per
/// row prefixed with its 1-based row number.
fn render_grid(grid: &Grid, skin: Skin) -> Vec<String> {
    let hidden = grid.hidden();
    let mut lines = Vec::with_capacity(grid.size() + 1);
    let mut header = String::from("   |");
    for i in 1..=grid.size() {
        header.push_str(&format!("{:^3}|", i));
    }
    lines.push(header);
    for (i, row) in grid.iter_rows().enumerate() {
        let mut line = format!("{:>2} |", i + 1);
        for state in row {
            line.push_str(&format!(" {} |", skin.glyph(state, hidden)));
        }
        lines.push(line);
    }
    lines
}

/// Lay out the player's board and the opponent's board side by side.
fn board_lines(game: &Match, skin: Skin) -> Vec<String> {
    let ours = render_grid(game.grid(Side::Player), skin);
    let theirs = render_grid(game.grid(Side::Opponent), skin);
    let width = ours.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut lines = vec![String::new()];
    lines.push(format!(
        "{:<width$}    {}",
        "Your board:",
        "Computer's board:",
        width = width
    ));
    for (left, right) in ours.iter().zip(theirs.iter()) {
        lines.push(format!("{:<width$}    {}", left, right, width = width));
    }
    lines.push(String::new());
    lines
}

/// Both boards followed by who fires next. Shown before every shot, whichever side
/// takes it.
fn turn_screen(game: &Match, skin: Skin) -> Vec<String> {
    let mut lines = board_lines(game, skin);
    lines.push(
        match game.current() {
            Some(Side::Player) => "Your move!",
            Some(Side::Opponent) => "The computer is moving.",
            None => "The match is over.",
        }
        .to_string(),
    );
    lines
}

fn show_boards(game: &Match, skin: Skin) {
    print_lines(&board_lines(game, skin));
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker. Returns `None` at end of input.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            if !self.read_input_inner(prompt)? {
                return Ok(None);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(Some(val));
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Returns
    /// false at end of input.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seabattle::{Orientation, Vessel};

    #[test]
    fn targets_are_one_based() {
        assert_eq!(parse_target("1 1"), Ok(Coordinate::new(0, 0)));
        assert_eq!(parse_target("  3   5 "), Ok(Coordinate::new(2, 4)));
        assert_eq!(parse_target("6,2"), Ok(Coordinate::new(5, 1)));
    }

    #[test]
    fn zero_becomes_off_the_board() {
        assert_eq!(parse_target("0 3"), Ok(Coordinate::new(-1, 2)));
    }

    #[test]
    fn malformed_targets_are_rejected() {
        assert!(parse_target("").is_err());
        assert!(parse_target("3").is_err());
        assert!(parse_target("a b").is_err());
        assert!(parse_target("1 2 3").is_err());
        assert!(parse_target("-1 2").is_err());
        assert!(parse_target("99999999999 1").is_err());
    }

    #[test]
    fn fleet_lists_parse() {
        assert_eq!(parse_fleet("3, 2,2 ,1"), Ok(vec![3, 2, 2, 1]));
        assert!(parse_fleet("3,x").is_err());
    }

    fn sample_grid() -> Grid {
        let mut grid = Grid::new(Dimensions::new(3));
        grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 2, Orientation::Horizontal))
            .unwrap();
        grid.resolve_shot(Coordinate::new(0, 0)).unwrap();
        grid.resolve_shot(Coordinate::new(2, 2)).unwrap();
        grid
    }

    #[test]
    fn revealed_board_shows_vessels() {
        let lines = render_grid(&sample_grid(), Skin::Letters);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "   | 1 | 2 | 3 |");
        assert_eq!(lines[1], " 1 | X | O | . |");
        assert_eq!(lines[2], " 2 | . | . | . |");
        assert_eq!(lines[3], " 3 | . | . | T |");
    }

    #[test]
    fn hidden_board_conceals_vessels() {
        let mut grid = sample_grid();
        grid.set_hidden(true);
        let lines = render_grid(&grid, Skin::Symbols);
        assert_eq!(lines[1], " 1 | X | ~ | ~ |");
        assert_eq!(lines[3], " 3 | ~ | ~ | • |");
        assert!(lines.iter().all(|l| !l.contains('■')));
    }

    #[test]
    fn boards_are_shown_before_every_shot() {
        let fleet = || {
            let mut grid = Grid::new(Dimensions::new(4));
            grid.place_vessel(Vessel::new(Coordinate::new(0, 0), 2, Orientation::Horizontal))
                .unwrap();
            grid.place_vessel(Vessel::new(Coordinate::new(3, 3), 1, Orientation::Vertical))
                .unwrap();
            grid
        };
        let game = Match::new(fleet(), fleet(), TurnRule::ExtraShotOnHit).unwrap();
        let screen = turn_screen(&game, Skin::Letters);
        assert!(screen.iter().any(|l| l.starts_with("Your board:")));
        assert_eq!(screen.last().map(String::as_str), Some("Your move!"));

        // The computer may fire several times in a row; each shot gets its own screen.
        let mut game = game.with_first(Side::Opponent);
        let report = game.fire(Coordinate::new(0, 0)).unwrap();
        assert!(report.repeats_turn());
        let screen = turn_screen(&game, Skin::Letters);
        assert!(screen.iter().any(|l| l.starts_with("Your board:")));
        assert!(screen.iter().any(|l| l.starts_with(" 1 | X | O | . | . |")));
        assert_eq!(
            screen.last().map(String::as_str),
            Some("The computer is moving.")
        );
    }

    #[test]
    fn human_reads_until_a_valid_target() {
        let input: &[u8] = b"nonsense\nhelp\n2 3\n";
        let mut human = Human::new(InputReader::new(input));
        let target = human.choose_target(&Dimensions::new(6));
        assert_eq!(target, Ok(Coordinate::new(1, 2)));
    }

    #[test]
    fn human_withdraws_at_end_of_input() {
        let input: &[u8] = b"";
        let mut human = Human::new(InputReader::new(input));
        assert_eq!(human.choose_target(&Dimensions::new(6)), Err(Withdrawn));

        let input: &[u8] = b"quit\n";
        let mut human = Human::new(InputReader::new(input));
        assert_eq!(human.choose_target(&Dimensions::new(6)), Err(Withdrawn));
    }
}
