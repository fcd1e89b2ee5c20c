//! Metrics collection and reporting for a compress/decompress run.
//!
//! Tracks sizes, tree statistics and timing so the front end can print a
//! summary or a machine-readable `key=value` export.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain struct updated by a single caller.

use std::time::{Duration, Instant};

use crate::codec::Compressed;

/// Observable results of one run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input/Output ===
    /// Bytes read from the input
    pub input_bytes: u64,

    /// Bytes written to the output
    pub output_bytes: u64,

    // === Compression ===
    /// Uncompressed size
    pub raw_bytes: u64,

    /// Compressed size, header included
    pub compressed_bytes: u64,

    /// Header size (count, node records, size field)
    pub header_bytes: u64,

    /// Distinct symbols in the raw data
    pub distinct_symbols: u64,

    /// Internal nodes in the serialized tree
    pub internal_nodes: u64,

    /// Frequency-weighted average code length
    pub bits_per_symbol: f64,

    // === Verification ===
    /// Round trips that reproduced the input exactly
    pub round_trips_passed: u64,

    /// Round trips that did not
    pub round_trips_failed: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            output_bytes: 0,
            raw_bytes: 0,
            compressed_bytes: 0,
            header_bytes: 0,
            distinct_symbols: 0,
            internal_nodes: 0,
            bits_per_symbol: 0.0,
            round_trips_passed: 0,
            round_trips_failed: 0,
        }
    }

    /// Record the statistics of a compression of `raw_len` bytes.
    pub fn record_compression(&mut self, raw_len: usize, compressed: &Compressed) {
        self.raw_bytes = raw_len as u64;
        self.compressed_bytes = compressed.bytes.len() as u64;
        self.header_bytes = compressed.header_len as u64;
        self.distinct_symbols = compressed.distinct_symbols as u64;
        self.internal_nodes = compressed.internal_nodes as u64;
        self.bits_per_symbol = compressed.bits_per_symbol;
    }

    /// Record the outcome of comparing a decompressed buffer with its source.
    pub fn record_round_trip(&mut self, matched: bool) {
        if matched {
            self.round_trips_passed += 1;
        } else {
            self.round_trips_failed += 1;
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed size over raw size; 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.compressed_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Share of the compressed file taken by the header.
    pub fn header_overhead(&self) -> f64 {
        if self.compressed_bytes == 0 {
            0.0
        } else {
            self.header_bytes as f64 / self.compressed_bytes as f64
        }
    }

    /// Input bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.input_bytes as f64 / duration_secs
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Input:  {} bytes", self.input_bytes);
        println!("Output: {} bytes", self.output_bytes);
        println!();

        if self.raw_bytes > 0 || self.compressed_bytes > 0 {
            println!("=== Compression ===");
            println!("Raw bytes: {}", self.raw_bytes);
            println!(
                "Compressed: {} (header {}, {:.1}% overhead)",
                self.compressed_bytes,
                self.header_bytes,
                self.header_overhead() * 100.0
            );
            println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
            println!("Distinct symbols: {}", self.distinct_symbols);
            println!("Internal nodes: {}", self.internal_nodes);
            println!("Bits per symbol: {:.4}", self.bits_per_symbol);
            println!();
        }

        if self.round_trips_passed + self.round_trips_failed > 0 {
            println!("=== Verification ===");
            println!("Round trips passed: {}", self.round_trips_passed);
            println!("Round trips failed: {}", self.round_trips_failed);
            println!();
        }

        println!("=== Performance ===");
        println!("Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0);
        println!();
    }

    /// Export metrics as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             output_bytes={}\n\
             raw_bytes={}\n\
             compressed_bytes={}\n\
             header_bytes={}\n\
             compression_ratio={:.4}\n\
             distinct_symbols={}\n\
             internal_nodes={}\n\
             bits_per_symbol={:.4}\n\
             round_trips_passed={}\n\
             round_trips_failed={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.output_bytes,
            self.raw_bytes,
            self.compressed_bytes,
            self.header_bytes,
            self.compression_ratio(),
            self.distinct_symbols,
            self.internal_nodes,
            self.bits_per_symbol,
            self.round_trips_passed,
            self.round_trips_failed,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
