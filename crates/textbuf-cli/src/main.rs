mod query;

use anyhow::{Context, Result};
use std::{env, fs, path::PathBuf, process};
use textbuf_config::Config;
use textbuf_engine::TextBuffer;

use crate::query::Query;

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Warning: {e}; using defaults");
            Config::default()
        }
    };

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [INDEX | LINE:COL | LINE:COL-LINE:COL]...", args[0]);
        eprintln!("Config file: {}", Config::config_path().display());
        process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut buf = TextBuffer::with_block_size(&text, config.block_size());
    log::info!(
        "loaded {} ({} lines, {} chars, block size {})",
        path.display(),
        buf.line_count(),
        buf.size(),
        buf.block_size()
    );

    if args.len() == 2 {
        println!("{} lines, {} chars", buf.line_count(), buf.size());
        return Ok(());
    }

    let mut failed = false;
    for arg in &args[2..] {
        let outcome = arg
            .parse::<Query>()
            .map_err(anyhow::Error::from)
            .and_then(|query| query.run(&mut buf).map_err(anyhow::Error::from));
        match outcome {
            Ok(line) => println!("{line}"),
            Err(e) => {
                eprintln!("{arg}: {e}");
                failed = true;
            }
        }
    }
    log::debug!("cache state after queries: {:?}", buf.cache_stats());

    if failed {
        process::exit(2);
    }
    Ok(())
}
