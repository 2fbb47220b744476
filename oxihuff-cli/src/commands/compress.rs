//! Compress command implementation.

use crate::utils::{check_output, compressed_path, create_spinner, format_savings};
use log::info;
use oxihuff_huffman::{HuffmanConfig, compress_with_config};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    force: bool,
    config: &HuffmanConfig,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| compressed_path(input), Path::to_path_buf);
    check_output(input, &output, force)?;

    let mut reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(&output)?);

    let spinner = create_spinner(format!("Compressing {}", input.display()), !quiet);
    let result = compress_with_config(&mut reader, &mut writer, config);
    spinner.finish_and_clear();
    drop(writer);

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            let _ = fs::remove_file(&output);
            return Err(e.into());
        }
    };
    info!("wrote {}", output.display());

    if !quiet {
        println!("{} -> {}", input.display(), output.display());
        println!("  Original size: {} bytes", summary.input_bytes);
        println!(
            "  Compressed size: {} bytes (header {}, payload {})",
            summary.output_bytes(),
            summary.header_bytes,
            summary.payload_bytes
        );
        println!("  Distinct symbols: {}", summary.distinct_symbols);
        println!(
            "  Space savings: {}",
            format_savings(summary.input_bytes, summary.output_bytes())
        );
    }

    Ok(())
}
