use std::env;
use std::process::ExitCode;
use std::time::Instant;

use myriad_core::game_state::chess_rules::STARTING_POSITION_FEN;
use myriad_core::game_state::position::Position;
use myriad_core::move_generation::perft::{perft_divide, perft_multi_threaded};

struct Options {
    depth: u8,
    fen: String,
    threads: usize,
    divide: bool,
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        depth: 4,
        fen: STARTING_POSITION_FEN.to_owned(),
        threads: 1,
        divide: false,
    };

    let mut idx = 1;
    while idx < args.len() {
        match args[idx].as_str() {
            "--depth" => {
                idx += 1;
                options.depth = value_of(args, idx, "--depth")?;
            }
            "--fen" => {
                idx += 1;
                options.fen = args
                    .get(idx)
                    .cloned()
                    .ok_or_else(|| "--fen needs a value".to_owned())?;
            }
            "--threads" => {
                idx += 1;
                options.threads = value_of(args, idx, "--threads")?;
            }
            "--divide" => options.divide = true,
            other => return Err(format!("unknown argument {other}")),
        }
        idx += 1;
    }

    Ok(options)
}

fn value_of<T: std::str::FromStr>(args: &[String], idx: usize, flag: &str) -> Result<T, String> {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .ok_or_else(|| format!("{flag} needs a numeric value"))
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: perft [--depth N] [--fen FEN] [--threads N] [--divide]");
            return ExitCode::FAILURE;
        }
    };

    let position = match Position::from_fen(&options.fen) {
        Ok(position) => position,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    println!("{position}");
    let start = Instant::now();
    let nodes = if options.divide {
        let divide = perft_divide(&position, options.depth);
        for (mv, count) in &divide {
            println!("{mv}: {count}");
        }
        divide.iter().map(|(_, count)| count).sum()
    } else {
        perft_multi_threaded(&position, options.depth, options.threads)
    };
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    println!(
        "depth={} nodes={} time_ms={} nps={:.0}",
        options.depth,
        nodes,
        elapsed.as_millis(),
        nps
    );
    ExitCode::SUCCESS
}
