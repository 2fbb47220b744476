//! Info command implementation.

use crate::utils::format_savings;
use oxihuff_huffman::{HeaderInfo, inspect};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSON output structure for the info command.
#[derive(Debug, Serialize, Deserialize)]
struct InfoOutput {
    file: String,
    file_size: u64,
    header_size: usize,
    original_size: u64,
    saturated: bool,
    distinct_symbols: usize,
    max_code_length: usize,
    symbols: Vec<SymbolJson>,
}

/// JSON representation of one table entry.
#[derive(Debug, Serialize, Deserialize)]
struct SymbolJson {
    symbol: String,
    frequency: u64,
    code_length: usize,
    code: String,
}

impl InfoOutput {
    fn new(path: &Path, file_size: u64, info: &HeaderInfo) -> Self {
        let map = info.encoding_map();
        let symbols = info
            .table
            .iter()
            .map(|(symbol, frequency)| {
                let code = map.get(symbol);
                SymbolJson {
                    symbol: symbol.to_string(),
                    frequency,
                    code_length: code.map_or(0, |c| c.len()),
                    code: code.map(ToString::to_string).unwrap_or_default(),
                }
            })
            .collect();

        Self {
            file: path.display().to_string(),
            file_size,
            header_size: info.header_bytes,
            original_size: info.original_size(),
            saturated: info.is_saturated(),
            distinct_symbols: info.table.distinct_symbols(),
            max_code_length: map.max_code_len(),
            symbols,
        }
    }
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file_size = std::fs::metadata(input)?.len();
    let mut reader = BufReader::new(File::open(input)?);
    let info = inspect(&mut reader)?;
    let output = InfoOutput::new(input, file_size, &info);

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("File Information");
    println!("================");
    println!("File: {}", output.file);
    println!("Size: {} bytes", output.file_size);
    println!("Header: {} bytes", output.header_size);
    if output.saturated {
        println!("Original size: at least {} bytes", output.original_size);
    } else {
        println!("Original size: {} bytes", output.original_size);
        println!(
            "Space savings: {}",
            format_savings(output.original_size, output.file_size)
        );
    }
    println!("Distinct symbols: {}", output.distinct_symbols);
    println!("Longest code: {} bits", output.max_code_length);

    println!();
    println!("{:>8} {:>10} {:>6}  Code", "Symbol", "Frequency", "Bits");
    println!("{}", "-".repeat(40));
    for entry in &output.symbols {
        println!(
            "{:>8} {:>10} {:>6}  {}",
            entry.symbol, entry.frequency, entry.code_length, entry.code
        );
    }

    Ok(())
}
