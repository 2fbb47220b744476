//! Decompress command implementation.

use crate::utils::{check_output, create_spinner, decompressed_path};
use log::info;
use oxihuff_huffman::{HuffmanConfig, decompress_with_config};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    force: bool,
    config: &HuffmanConfig,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);
    check_output(input, &output, force)?;

    let mut reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(&output)?);

    let spinner = create_spinner(format!("Decompressing {}", input.display()), !quiet);
    let result = decompress_with_config(&mut reader, &mut writer, config);
    spinner.finish_and_clear();
    drop(writer);

    // A failed decode leaves a partial file behind; don't keep it.
    let produced = match result {
        Ok(produced) => produced,
        Err(e) => {
            let _ = fs::remove_file(&output);
            return Err(e.into());
        }
    };
    info!("wrote {}", output.display());

    if !quiet {
        println!(
            "{} -> {} ({} bytes)",
            input.display(),
            output.display(),
            produced
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_compress;
    use tempfile::tempdir;

    #[test]
    fn test_compress_then_decompress() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("text.txt");
        let data = b"a man, a plan, a canal: panama\n".repeat(100);
        fs::write(&input, &data).unwrap();

        let config = HuffmanConfig::new(64);
        cmd_compress(&input, None, false, &config, true).unwrap();

        let packed = dir.path().join("text.txt.huf");
        let restored = dir.path().join("restored.txt");
        cmd_decompress(&packed, Some(restored.as_path()), false, &config, true).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), data);
    }

    #[test]
    fn test_decompress_default_output_strips_extension() {
        let dir = tempdir().unwrap();
        let packed = dir.path().join("empty.huf");
        fs::write(&packed, [0x00u8, 0x00, 0xFE, 0x00]).unwrap();

        cmd_decompress(&packed, None, false, &HuffmanConfig::default(), true).unwrap();
        assert_eq!(fs::read(dir.path().join("empty")).unwrap(), b"");
    }

    #[test]
    fn test_decompress_truncated_removes_output() {
        let dir = tempdir().unwrap();
        let packed = dir.path().join("bad.huf");
        // Header for "aaaa" with the payload byte missing
        fs::write(&packed, [0x01u8, 0x00, b'a', 0x04, 0x00, 0xFE]).unwrap();

        let result = cmd_decompress(&packed, None, false, &HuffmanConfig::default(), true);
        assert!(result.is_err());
        assert!(!dir.path().join("bad").exists());
    }

    #[test]
    fn test_decompress_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let packed = dir.path().join("x.huf");
        let existing = dir.path().join("x");
        fs::write(&packed, [0x00u8, 0x00, 0xFE, 0x00]).unwrap();
        fs::write(&existing, b"precious").unwrap();

        let result = cmd_decompress(&packed, None, false, &HuffmanConfig::default(), true);
        assert!(result.is_err());
        assert_eq!(fs::read(&existing).unwrap(), b"precious");
    }
}
