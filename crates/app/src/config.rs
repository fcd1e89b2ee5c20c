//! Configuration for the huftree command-line tool.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then generates a sample,
//! round-trips it through both tree layouts and reports the result. The
//! sample seed is printed so runs are reproducible.

use huftree_core::{Error, TreeLayout};
use std::path::{Path, PathBuf};

/// What the run should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Compress the input into the huftree format
    Compress,
    /// Restore the original bytes from a compressed file
    Uncompress,
    /// Compress, decompress with both layouts and compare
    RoundTrip,
}

impl Mode {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "c" | "compress" => Ok(Mode::Compress),
            "u" | "uncompress" | "decompress" => Ok(Mode::Uncompress),
            "r" | "roundtrip" | "round-trip" => Ok(Mode::RoundTrip),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// Input file path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Explicit output path (None = derive from input)
    pub output_file: Option<PathBuf>,

    // === Decoding ===
    /// Tree reconstruction scheme for decompression
    pub layout: TreeLayout,

    // === Sample generation ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Behavior ===
    /// Whether to print the resolved config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,

    /// Print metrics as `key=value` lines instead of the summary
    pub metrics_text: bool,

    /// Debug-level logging
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name
    /// excluded).
    ///
    /// # Errors
    /// `Error::Config` for unknown flags, missing or malformed values.
    pub fn from_args(args: &[String]) -> huftree_core::Result<Self> {
        Self::parse_args(args).map_err(Error::Config)
    }

    fn parse_args(args: &[String]) -> Result<Self, String> {
        let mut mode = Mode::RoundTrip;
        let mut input_file: Option<PathBuf> = None;
        let mut output_file: Option<PathBuf> = None;
        let mut layout = TreeLayout::General;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut print_config = false;
        let mut print_metrics = true;
        let mut metrics_text = false;
        let mut verbose = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--mode" => {
                    mode = Mode::parse(value_of(args, &mut i, "--mode requires c, u or r")?)?;
                }
                "--in" => {
                    input_file = Some(PathBuf::from(value_of(args, &mut i, "--in requires a path")?));
                }
                "--out" => {
                    output_file = Some(PathBuf::from(value_of(args, &mut i, "--out requires a path")?));
                }
                "--layout" => {
                    layout = match value_of(args, &mut i, "--layout requires a value")? {
                        "general" => TreeLayout::General,
                        "postorder" => TreeLayout::Postorder,
                        other => return Err(format!("unknown layout: {other}")),
                    };
                }
                "--seed" => {
                    let value = value_of(args, &mut i, "--seed requires a number")?;
                    seed = Some(value.parse().map_err(|_| "invalid seed")?);
                }
                "--sample-bytes" => {
                    let value = value_of(args, &mut i, "--sample-bytes requires a number")?;
                    sample_bytes = Some(value.parse().map_err(|_| "invalid sample-bytes")?);
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--metrics-text" => {
                    metrics_text = true;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        if mode == Mode::Uncompress && input_file.is_none() {
            return Err("uncompress mode requires --in".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or_default()
        });

        Ok(Config {
            mode,
            input_file,
            output_file,
            layout,
            seed,
            sample_bytes: sample_bytes.unwrap_or(65536), // 64 KiB
            print_config,
            print_metrics,
            metrics_text,
            verbose,
        })
    }

    /// Where the result should be written, if anywhere.
    ///
    /// Compression appends `.huf` to the input name, decompression appends
    /// `.orig`. Round trips write nothing unless `--out` is given.
    pub fn output_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.output_file {
            return Some(path.clone());
        }
        match self.mode {
            Mode::Compress => Some(match &self.input_file {
                Some(input) => with_suffix(input, ".huf"),
                None => PathBuf::from("./sample.huf"),
            }),
            Mode::Uncompress => self.input_file.as_deref().map(|input| with_suffix(input, ".orig")),
            Mode::RoundTrip => None,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode: {:?}", self.mode);
        match &self.input_file {
            Some(path) => println!("Input file:  {}", path.display()),
            None => println!(
                "Input file:  (generated sample, {} bytes, seed {})",
                self.sample_bytes, self.seed
            ),
        }
        match self.output_path() {
            Some(path) => println!("Output file: {}", path.display()),
            None => println!("Output file: (none)"),
        }
        println!("Tree layout: {:?}", self.layout);
        println!();
    }
}

/// Advance past a flag and return its value.
fn value_of<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| missing.to_string())
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn print_help() {
    println!("huftree: Huffman compression with a postorder tree header");
    println!();
    println!("USAGE:");
    println!("    huftree [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mode <c|u|r>          Compress, uncompress or round-trip (default: r)");
    println!("    --in <PATH>             Input file (default: generate sample)");
    println!("    --out <PATH>            Output file (default: <in>.huf / <in>.orig)");
    println!("    --layout <NAME>         general or postorder tree decoding (default: general)");
    println!();
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Generated sample size (default: 65536)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Don't print metrics summary");
    println!("    --metrics-text          Print metrics as key=value lines");
    println!("    --verbose, -v           Debug logging (RUST_LOG overrides)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huftree                                  # Round-trip a random sample");
    println!("    huftree --mode c --in notes.txt          # Writes notes.txt.huf");
    println!("    huftree --mode u --in notes.txt.huf      # Writes notes.txt.huf.orig");
    println!("    huftree --in data.bin --layout postorder # Round-trip a file");
    println!();
}
