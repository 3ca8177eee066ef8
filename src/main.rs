use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_m::ai::{Agent, MinimaxAgent, RandomAgent};
use connect_m::config::{FirstMover, GameConfig};
use connect_m::game::{GameOutcome, GameSession};

/// Play Connect-M in the terminal against a computer opponent.
#[derive(Parser)]
#[command(
    name = "connect_m",
    about = "Generalized Connect Four: N x N board, M in a row wins"
)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_m.toml")]
    config: PathBuf,

    /// Override board size N (3 to 10)
    #[arg(long)]
    size: Option<usize>,

    /// Override number of connected pieces required to win (2 to N)
    #[arg(long)]
    run_length: Option<usize>,

    /// Override search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Override who moves first: human or computer
    #[arg(long)]
    first: Option<String>,

    /// Opponent implementation: minimax or random
    #[arg(long, default_value = "minimax")]
    opponent: String,

    /// Seed for the random opponent (defaults to OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer play both sides instead of prompting for moves
    #[arg(long)]
    selfplay: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(size) = cli.size {
        config.board_size = size;
    }
    if let Some(run_length) = cli.run_length {
        config.run_length = run_length;
    }
    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    if let Some(first) = &cli.first {
        config.first = match first.as_str() {
            "human" => FirstMover::Human,
            "computer" => FirstMover::Computer,
            other => bail!("unknown first mover '{}' (expected 'human' or 'computer')", other),
        };
    }
    config.validate().context("invalid game parameters")?;

    let mut opponent: Box<dyn Agent> = match cli.opponent.as_str() {
        "minimax" => Box::new(MinimaxAgent::new(config.search_depth)),
        "random" => match cli.seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed)),
            None => Box::new(RandomAgent::new()),
        },
        other => bail!("unknown opponent '{}' (expected 'minimax' or 'random')", other),
    };

    if cli.selfplay {
        run_selfplay(&config, opponent.as_mut())
    } else {
        run_interactive(&config, opponent.as_mut())
    }
}

/// Prompt-driven game loop: the human types columns, the agent answers.
fn run_interactive(config: &GameConfig, computer: &mut dyn Agent) -> Result<()> {
    let mut session = GameSession::new(config.board_size, config.run_length, config.first_player());
    let human = config.computer_plays.other();

    println!(
        "Connect-M: {0}x{0} board, {1} in a row wins. You play {2}.",
        config.board_size,
        config.run_length,
        human.name()
    );

    loop {
        while !session.is_terminal() {
            println!("\n{}", session.board());
            let player = session.current_player();
            let column = if player == human {
                match prompt_column(&session)? {
                    Some(col) => col,
                    None => {
                        println!("Bye.");
                        return Ok(());
                    }
                }
            } else {
                let Some(col) = computer.select_action(&session) else {
                    break;
                };
                println!("{} ({}) plays column {col}.", computer.name(), player.name());
                col
            };
            if let Err(err) = session.play(column) {
                println!("{err}");
            }
        }

        println!("\n{}", session.board());
        report_outcome(&session);

        if !prompt_rematch()? {
            return Ok(());
        }
        session.reset();
    }
}

/// Watch the agent play both sides of one game.
fn run_selfplay(config: &GameConfig, agent: &mut dyn Agent) -> Result<()> {
    let mut session = GameSession::new(config.board_size, config.run_length, config.first_player());
    println!(
        "Self-play: {0}x{0} board, {1} in a row wins, {2} on both sides.",
        config.board_size,
        config.run_length,
        agent.name()
    );

    let mut turn = 0;
    while !session.is_terminal() {
        let Some(col) = agent.select_action(&session) else {
            break;
        };
        turn += 1;
        let player = session.current_player();
        let row = session.play(col).context("self-play move was rejected")?;
        println!("turn {turn}: {} -> column {col} (row {row})", player.name());
    }

    println!("\n{}", session.board());
    report_outcome(&session);
    Ok(())
}

/// Ask for a column until the input is playable. `Ok(None)` means quit.
fn prompt_column(session: &GameSession) -> Result<Option<usize>> {
    loop {
        print!(
            "{} to move, column (0-{}, q to quit): ",
            session.current_player().name(),
            session.board().size() - 1
        );
        io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = io::stdin().read_line(&mut line).context("reading input")?;
        if read == 0 {
            // EOF
            return Ok(None);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<usize>() {
            Ok(col) if session.legal_moves().contains(&col) => return Ok(Some(col)),
            Ok(col) => println!("column {col} is not playable"),
            Err(_) => println!("enter a column number or q"),
        }
    }
}

fn prompt_rematch() -> Result<bool> {
    print!("Play again? (y/n): ");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("reading input")?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

fn report_outcome(session: &GameSession) {
    match session.outcome() {
        Some(GameOutcome::Winner(player)) => println!("{} wins!", player.name()),
        Some(GameOutcome::Draw) => println!("It's a draw!"),
        None => println!("Game abandoned."),
    }
}
