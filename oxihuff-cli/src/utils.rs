//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension given to compressed files.
pub const COMPRESSED_EXTENSION: &str = "huf";

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// `<input>.huf`
pub fn compressed_path(input: &Path) -> PathBuf {
    append_extension(input, COMPRESSED_EXTENSION)
}

/// `<input>` without `.huf`, or `<input>.out` when it has no such extension.
pub fn decompressed_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == COMPRESSED_EXTENSION && input.file_stem().is_some() => {
            input.with_extension("")
        }
        _ => append_extension(input, "out"),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Refuse to clobber the input or, without `force`, an existing file.
pub fn check_output(input: &Path, output: &Path, force: bool) -> Result<(), String> {
    if input == output {
        return Err(format!(
            "output {} is the same as the input",
            output.display()
        ));
    }
    if output.exists() && !force {
        return Err(format!(
            "{} already exists (use -f to overwrite)",
            output.display()
        ));
    }
    Ok(())
}

/// Space savings as a percentage string, or `-` for empty input.
pub fn format_savings(original: u64, compressed: u64) -> String {
    if original == 0 {
        "-".to_string()
    } else {
        format!(
            "{:.1}%",
            (1.0 - compressed as f64 / original as f64) * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("dir/notes.txt")),
            PathBuf::from("dir/notes.txt.huf")
        );
        assert_eq!(compressed_path(Path::new("data")), PathBuf::from("data.huf"));
    }

    #[test]
    fn test_decompressed_path() {
        assert_eq!(
            decompressed_path(Path::new("dir/notes.txt.huf")),
            PathBuf::from("dir/notes.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("packed.bin")),
            PathBuf::from("packed.bin.out")
        );
        assert_eq!(decompressed_path(Path::new("data")), PathBuf::from("data.out"));
    }

    #[test]
    fn test_format_savings() {
        assert_eq!(format_savings(0, 4), "-");
        assert_eq!(format_savings(100, 25), "75.0%");
        assert_eq!(format_savings(4, 7), "-75.0%");
    }

    #[test]
    fn test_check_output_same_file() {
        let path = Path::new("same.txt");
        assert!(check_output(path, path, true).is_err());
    }
}
