use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Maximum archive size: 500MB
const MAX_ARCHIVE_SIZE_BYTES: u64 = 500 * 1024 * 1024;

const ARCHIVE_EXTENSION: &str = "json";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Validates that a path names a `.json` file (extension compared case-insensitively)
pub fn validate_archive_extension(path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION));

    if !is_json {
        bail!("File must be a JSON file (.json extension): {}", path.display());
    }
    Ok(())
}

/// Validates that an open archive is a regular, non-empty file within the size limit
///
/// Takes an open file handle so the checked metadata belongs to the file that is
/// read afterwards.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The path is not a regular file
/// - The file is empty
/// - The file is larger than 500MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<u64> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    if !metadata.is_file() {
        bail!("Not a regular file: {}", path.display());
    }

    let file_size = metadata.len();
    if file_size == 0 {
        bail!("File is empty: {}", path.display());
    }
    if file_size > MAX_ARCHIVE_SIZE_BYTES {
        bail!(
            "File too large: {} ({}). Maximum supported size is {}",
            path.display(),
            format_file_size(file_size),
            format_file_size(MAX_ARCHIVE_SIZE_BYTES)
        );
    }

    Ok(file_size)
}

/// Opens an archive file after checking its extension, type and size
pub fn safe_open_archive(path: &Path) -> Result<File> {
    validate_archive_extension(path)?;
    let file = File::open(path)
        .with_context(|| format!("Failed to open archive file: {}", path.display()))?;
    validate_file_size(&file, path)?;
    Ok(file)
}

/// Reads a validated archive file into memory
pub fn read_archive_file(path: &Path) -> Result<String> {
    let mut file = safe_open_archive(path)?;
    let mut json = String::new();
    file.read_to_string(&mut json)
        .with_context(|| format!("Failed to read archive file: {}", path.display()))?;
    Ok(json)
}

/// Formats a byte count for display: "0 Bytes", "1.5 KB", "12.34 MB"
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use chat_archive_explorer::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Downloads/conversations.json");
/// // Returns "~/Downloads/conversations.json" if the home directory is /Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir())
}

/// Internal helper for path formatting with an explicit home directory (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<PathBuf>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return if rest.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", rest.display())
        };
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
