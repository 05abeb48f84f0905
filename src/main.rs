use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use connect_four_mcts::ai::{seeded_rng, Difficulty, MctsSearcher, SearchReport};
use connect_four_mcts::config::AppConfig;
use connect_four_mcts::game::{GameOutcome, GameState, COLS};
use connect_four_mcts::session::GameSession;

/// Play Connect Four against a Monte Carlo Tree Search opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Connect Four against an MCTS opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override the difficulty: easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed the computer's random source for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game on the terminal, reading columns 1-7 from stdin
    Play {
        /// Let the computer make the first move
        #[arg(long)]
        computer_first: bool,
    },
    /// Search a position and print the per-column statistics
    Analyze {
        /// Moves played so far as 1-based column digits, e.g. "4453"
        #[arg(long, default_value = "")]
        moves: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .try_init()?;

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(difficulty) = cli.difficulty {
        config.game.difficulty = difficulty;
    }
    if cli.seed.is_some() {
        config.game.seed = cli.seed;
    }

    match cli.command {
        Command::Play { computer_first } => {
            if computer_first {
                config.game.human_first = false;
            }
            play(&config)
        }
        Command::Analyze { moves, json } => analyze(&config, &moves, json),
    }
}

fn print_board(state: &GameState) {
    println!();
    println!(" {}", (1..=COLS).map(|c| c.to_string()).collect::<String>());
    for line in state.board().to_string().lines() {
        println!(" {line}");
    }
}

fn announce(session: &GameSession) {
    match session.outcome() {
        GameOutcome::Winner(player) => {
            let cells: Vec<String> = session
                .winning_line()
                .iter()
                .map(|(row, col)| format!("({}, {})", row + 1, col + 1))
                .collect();
            let who = if player == session.human() { "You won!" } else { "You lost!" };
            println!("{who} Winning line (row, column): {}", cells.join(" "));
        }
        GameOutcome::Draw => println!("Draw."),
        GameOutcome::Ongoing => {}
    }
}

fn play(config: &AppConfig) -> Result<()> {
    let mut session = GameSession::new(config);
    println!(
        "You are {} against the computer ({}). Enter a column 1-{COLS}, 'u' to undo, 'r' to restart, 'q' to quit.",
        session.human(),
        session.difficulty()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if session.is_computer_turn() {
            let column = session.play_computer().context("computer move failed")?;
            println!("Computer plays column {}", column + 1);
            announce(&session);
        }
        print_board(session.state());

        if session.outcome().is_over() {
            print!("Game over. 'r' to restart, 'u' to undo, 'q' to quit: ");
        } else {
            print!("Your move: ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let input = line?;
        match input.trim() {
            "q" | "quit" => return Ok(()),
            "u" | "undo" => {
                if !session.undo() {
                    println!("Nothing to undo.");
                }
            }
            "r" | "restart" => session.restart(),
            other => match other.parse::<usize>() {
                Ok(n) if (1..=COLS).contains(&n) => match session.play_human(n - 1) {
                    Ok(_) => announce(&session),
                    Err(err) => println!("That move isn't allowed ({err}), try again."),
                },
                _ => println!("Enter a column between 1 and {COLS}."),
            },
        }
    }
}

fn print_report(report: &SearchReport) {
    println!(
        "{} to move, {} playouts at {}: best column {}",
        report.player,
        report.simulations,
        report.difficulty,
        report.column + 1
    );
    for stats in &report.columns {
        println!(
            "  column {}: {:>6} visits, mean score {:.3}",
            stats.column + 1,
            stats.visits,
            stats.mean_score
        );
    }
}

fn analyze(config: &AppConfig, moves: &str, json: bool) -> Result<()> {
    let state = GameState::from_moves(moves).context("replaying --moves")?;
    if state.is_terminal() {
        print_board(&state);
        bail!("position is already decided: {:?}", state.outcome());
    }

    let searcher = MctsSearcher::new(config.search.clone());
    let mut rng = seeded_rng(config.game.seed);
    let report = searcher
        .search(&state, config.game.difficulty, &mut rng)
        .context("search failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_board(&state);
        print_report(&report);
    }
    Ok(())
}
