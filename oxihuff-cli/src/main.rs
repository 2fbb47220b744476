//! OxiHuff CLI - The Oxidized Huffman coder
//!
//! Compresses single files with static Huffman coding and inspects the result.

mod commands;
mod utils;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_test};
use log::LevelFilter;
use oxihuff_core::DEFAULT_CAPACITY_BITS;
use oxihuff_huffman::HuffmanConfig;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "The Oxidized Huffman coder - Pure Rust static Huffman compression"
)]
#[command(long_about = "
OxiHuff compresses files with a static Huffman code built from the byte
frequencies of the input. The frequency table is stored in front of the
payload, so every .huf file is self-describing.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o packed.huf
  oxihuff decompress notes.txt.huf
  oxihuff test notes.txt.huf
  oxihuff info notes.txt.huf --json
  oxihuff completions bash
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress logging, progress and summaries
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Bit-buffer capacity in bits (a non-zero multiple of 8)
    #[arg(long, global = true, default_value_t = DEFAULT_CAPACITY_BITS)]
    buffer_bits: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to <input>.huf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a .huf file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (defaults to <input> without .huf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Test file integrity
    #[command(alias = "t")]
    Test {
        /// File to test
        input: PathBuf,
    },

    /// Show the header of a .huf file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = HuffmanConfig::new(cli.buffer_bits);
    let quiet = cli.quiet;

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
        } => cmd_compress(&input, output.as_deref(), force, &config, quiet),
        Commands::Decompress {
            input,
            output,
            force,
        } => cmd_decompress(&input, output.as_deref(), force, &config, quiet),
        Commands::Test { input } => cmd_test(&input, &config, quiet),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "oxihuff",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
