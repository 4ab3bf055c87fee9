use std::fs::File;
use std::io::{self, BufWriter, Write};

use mpdemo::cli;
use mpdemo::config::HostConfig;
use mpdemo::host::Host;
use mpdemo::script::ScriptError;

fn main() {
    let args = match cli::parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("mpdemo: {e}");
            eprintln!("{}", cli::USAGE);
            std::process::exit(1);
        }
    };

    let config = match HostConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("mpdemo: {e}");
            std::process::exit(1);
        }
    };

    if config.debug {
        eprintln!(
            "mpdemo: heap {} bytes, {} run(s), script only: {}",
            config.heap_size, config.runs, config.script_only
        );
    }

    // ── Console sink ──────────────────────────────────────────────────────────
    let out: Box<dyn Write> = match &config.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                eprintln!("mpdemo: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdout().lock()),
    };

    if let Err(e) = run(out, &config) {
        eprintln!("demo ran into an uncaught exception!");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(out: Box<dyn Write>, config: &HostConfig) -> Result<(), ScriptError> {
    let mut host = Host::new(out, config)?;
    host.run_repeated(config.runs)?;
    if config.debug {
        let stats = host.interpreter().heap().stats();
        eprintln!(
            "mpdemo: gc: {} pass(es), {} bytes freed in total",
            stats.collections, stats.total_freed
        );
    }
    Ok(())
}
