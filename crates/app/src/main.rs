//! huftree: compress, uncompress or round-trip files with huftree-core.
//!
//! This binary is the I/O collaborator: it reads whole files (or generates
//! a sample), hands buffers to the library and writes the results back.

mod config;
mod input_gen;

use std::process::ExitCode;

use config::{Config, Mode};
use huftree_core::codec::{compress_detailed, decompress_with};
use huftree_core::metrics::Metrics;
use huftree_core::{Result, TreeLayout};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    if config.print_config {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.metrics_text {
                print!("{}", metrics.export_text());
            } else if config.print_metrics {
                metrics.print_summary();
            }
            if metrics.round_trips_failed > 0 {
                error!(failed = metrics.round_trips_failed, "round trip mismatch");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(config: &Config) -> Result<Metrics> {
    let mut metrics = Metrics::new();

    let input = read_input(config)?;
    metrics.input_bytes = input.len() as u64;

    let output = match config.mode {
        Mode::Compress => {
            let compressed = compress_detailed(&input)?;
            metrics.record_compression(input.len(), &compressed);
            info!(
                raw = input.len(),
                compressed = compressed.bytes.len(),
                bits_per_symbol = compressed.bits_per_symbol,
                "compressed"
            );
            compressed.bytes
        }
        Mode::Uncompress => {
            let restored = decompress_with(&input, config.layout)?;
            info!(
                compressed = input.len(),
                restored = restored.len(),
                layout = ?config.layout,
                "uncompressed"
            );
            restored
        }
        Mode::RoundTrip => {
            let compressed = compress_detailed(&input)?;
            metrics.record_compression(input.len(), &compressed);

            for layout in [TreeLayout::General, TreeLayout::Postorder] {
                let restored = decompress_with(&compressed.bytes, layout)?;
                let matched = restored == input;
                if !matched {
                    warn!(?layout, "decompressed output differs from input");
                }
                metrics.record_round_trip(matched);
            }

            info!(
                raw = input.len(),
                compressed = compressed.bytes.len(),
                passed = metrics.round_trips_passed,
                "round trip finished"
            );
            compressed.bytes
        }
    };

    if let Some(path) = config.output_path() {
        std::fs::write(&path, &output)?;
        metrics.output_bytes = output.len() as u64;
        info!(path = %path.display(), bytes = output.len(), "wrote output");
    }

    metrics.complete();
    Ok(metrics)
}

fn read_input(config: &Config) -> Result<Vec<u8>> {
    match &config.input_file {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            info!(
                seed = config.seed,
                bytes = config.sample_bytes,
                "generating sample input"
            );
            Ok(input_gen::generate_sample_data(
                config.seed,
                config.sample_bytes,
            ))
        }
    }
}
