use std::env;
use std::process::ExitCode;
use std::time::Instant;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bitchess::chess::{Color, Position, format_bitboard};
use bitchess::config::DebugConfig;
use bitchess::perft::{PerftTable, divide, perft_with_table};

const USAGE_MSG: &str = r#"Usage: perft <depth> [FEN] [--divide] [--print-bitboards|-b]
Without a FEN the standard starting position is used.
Debug flags can also be set through BITCHESS_DEBUG (e.g. BITCHESS_DEBUG=bitboards)."#;

const TABLE_SIZE_MB: usize = 32;

fn is_flag(arg: &str) -> bool {
    arg.starts_with("--") || arg == "-b"
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let debug = DebugConfig::from_args(&args).merge(DebugConfig::from_env());
    let show_divide = args.iter().any(|arg| arg == "--divide");

    let positional: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|arg| !is_flag(arg))
        .collect();

    let Some(depth) = positional.first().and_then(|depth| depth.parse::<u8>().ok()) else {
        eprintln!("{USAGE_MSG}");
        return ExitCode::FAILURE;
    };

    let fen = positional[1..].join(" ");
    let position = if fen.is_empty() {
        Position::starting()
    } else {
        match Position::from_fen(&fen) {
            Ok(position) => position,
            Err(err) => {
                error!(%err, fen = %fen, "cannot parse FEN");
                return ExitCode::FAILURE;
            }
        }
    };

    println!("{}", position.to_fen());
    println!("{position}");

    if debug.print_bitboards() {
        for (label, bb) in [
            ("white", position.occupied_by(Color::White)),
            ("black", position.occupied_by(Color::Black)),
            ("all", position.occupied()),
        ] {
            println!("{label} occupancy:\n{}", format_bitboard(bb));
        }
    }

    let start = Instant::now();
    let nodes = if show_divide {
        let counts = divide(&position, depth);
        for (mov, subtree_nodes) in &counts {
            println!("{mov}: {subtree_nodes}");
        }
        counts.iter().map(|(_, subtree_nodes)| subtree_nodes).sum()
    } else {
        let mut table = PerftTable::new(TABLE_SIZE_MB);
        perft_with_table(&position, depth, &mut table)
    };
    let elapsed = start.elapsed();

    println!("Depth {depth}: {nodes}; Time: {elapsed:?}");
    info!(
        nodes_per_second = %format!("{:.0}", nodes as f64 / elapsed.as_secs_f64().max(f64::EPSILON)),
        "perft finished"
    );

    ExitCode::SUCCESS
}
