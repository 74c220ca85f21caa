//! Plan a route on an ASCII board and print it.
//!
//! Run: cargo run --bin route-plan -- board.txt
//!      cargo run --bin route-plan -- --rows 10 --cols 10 --stop 0,0 --stop 9,9 --barrier 5,5
//!
//! Set `RUST_LOG=debug` to see per-leg search logs.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use waypath_core::{CellState, CellStateChanged, Coord, FnSink, GridConfig};
use waypath_planner::{Board, Command, Outcome};

#[derive(Parser, Debug)]
#[command(name = "route-plan", about = "Plan a multi-stop route on a grid")]
struct Args {
    /// ASCII board file (`.` empty, `#` barrier, `S`, `1`-`9`, `E` stops).
    board: Option<PathBuf>,

    /// Rows of an empty board, when no file is given.
    #[arg(long, default_value_t = GridConfig::DEFAULT_SIZE)]
    rows: i32,

    /// Columns of an empty board, when no file is given.
    #[arg(long, default_value_t = GridConfig::DEFAULT_SIZE)]
    cols: i32,

    /// Stop as `row,col`; repeat in visiting order.
    #[arg(long = "stop", value_parser = parse_coord)]
    stops: Vec<Coord>,

    /// Barrier as `row,col`; repeatable.
    #[arg(long = "barrier", value_parser = parse_coord)]
    barriers: Vec<Coord>,

    /// Print how many cells the searches opened and closed.
    #[arg(long)]
    stats: bool,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col, got {s:?}"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row in {s:?}: {e}"))?;
    let col = col.trim().parse().map_err(|e| format!("bad col in {s:?}: {e}"))?;
    Ok(Coord::new(row, col))
}

fn load(args: &Args) -> Result<Board, Box<dyn std::error::Error>> {
    let mut board = match &args.board {
        Some(path) => Board::from_ascii(&std::fs::read_to_string(path)?)?,
        None => Board::new(GridConfig::default().with_rows(args.rows).with_cols(args.cols)),
    };
    for &c in &args.barriers {
        board.apply(Command::PlaceBarrier(c), &mut ())?;
    }
    for &c in &args.stops {
        board.apply(Command::PlaceWaypoint(c), &mut ())?;
    }
    if !board.coordinator().is_finalized() && board.coordinator().len() >= 2 {
        board.apply(Command::FinalizeStops, &mut ())?;
    }
    Ok(board)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut board = load(args)?;

    let (mut opened, mut closed) = (0usize, 0usize);
    let mut sink = FnSink(|ev: CellStateChanged| match ev.new_role {
        CellState::Open => opened += 1,
        CellState::Closed => closed += 1,
        _ => {}
    });
    let outcome = board.apply(Command::RunRoute, &mut sink)?;

    println!("{}", board.render_ascii());
    if let Outcome::Routed(route) = outcome {
        println!(
            "route: {} stops, {} steps",
            route.stops().len(),
            route.steps()
        );
    }
    if args.stats {
        println!("search: {opened} opened, {closed} closed");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{args:?}");

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
