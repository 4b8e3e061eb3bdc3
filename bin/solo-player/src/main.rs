//! Headless player making random moves.

#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use clap::Parser;
use field::{Config, Event, Game, ShapeQueue, Status};
use mino::standard_rules::PieceType;
use mino::Input;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::time::Instant;

/// Headless player making random moves.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the shape queue and the move policy.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after placing this many pieces.
    #[arg(long, default_value_t = 100)]
    pieces: u32,
    /// Wait the configured tick interval between pieces.
    #[arg(long)]
    realtime: bool,
    /// Don't print the field.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "field=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
            .parse::<Config>()
            .context("invalid config")?,
        None => Config::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {seed}, config {config}");

    let mut policy = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let queue = ShapeQueue::from_seed(seed, config.preview);
    let mut game = Game::new(&config, queue).context("invalid field dimensions")?;
    game.start();

    let delta = config.tick_interval();

    while game.pieces_placed() < args.pieces {
        if game.status() != Status::Running {
            error!("topped out!");
            break;
        }

        let time = Instant::now();
        let placed = game.pieces_placed();
        let mut cleared = 0;

        for input in plan(&mut policy, game.engine().matrix().cols()) {
            game.apply(input);
        }
        while game.status() == Status::Running && game.pieces_placed() == placed {
            for event in game.tick() {
                if let Event::RowsCleared(cl) = event {
                    cleared += cl.rows.len();
                }
            }
        }

        if cleared > 0 {
            info!("cleared {cleared} rows");
        }
        if !args.quiet {
            print_game_state(&game);
        }

        if args.realtime {
            if let Some(wait) = delta.checked_sub(time.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }

    info!(
        "placed {} pieces, score {}, lines {}",
        game.pieces_placed(),
        game.scores().score(),
        game.scores().lines()
    );
    Ok(())
}

/// Random rotations, a random horizontal shift, then a sonic drop.
fn plan(rng: &mut impl Rng, cols: i32) -> Vec<Input> {
    let mut inputs = vec![Input::Rotate; rng.gen_range(0..4)];

    let shift = rng.gen_range(-cols / 2..=cols / 2);
    let dir = if shift < 0 { Input::Left } else { Input::Right };
    inputs.extend(std::iter::repeat(dir).take(shift.unsigned_abs() as usize));

    inputs.push(Input::SonicDrop);
    inputs
}

fn print_game_state<R: Rng>(game: &Game<R>) {
    let pcs = game.pieces_placed();
    let score = game.scores().score();
    let lines = game.scores().lines();
    println!("pcs: {pcs}, score: {score}, lines: {lines}");

    let engine = game.engine();
    let curr = engine.active().map_or("", |pc| pc.tag().name());
    let next = game.queue().upcoming().map(PieceType::name).collect::<String>();
    println!("queue: ({curr}){next}");

    let matrix = engine.matrix();
    let (rows, cols) = (matrix.rows(), matrix.cols());
    let mut grid = vec![vec![" "; cols as usize]; rows as usize];
    for cell in matrix.cells() {
        grid[cell.row() as usize][cell.col() as usize] = cell.tag().name();
    }
    if let Some(pc) = engine.active() {
        for cell in pc.current() {
            let (row, col) = cell.pos();
            if (0..rows).contains(&row) && (0..cols).contains(&col) {
                grid[row as usize][col as usize] = "@";
            }
        }
    }

    for row in &grid {
        let row_concat = row.concat();
        println!("|{row_concat}|");
    }
    println!("+{}+", "-".repeat(cols as usize));
    println!();
}
