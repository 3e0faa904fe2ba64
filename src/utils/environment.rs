use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Environment variable naming the default archive file
pub const ARCHIVE_FILE_ENV: &str = "CHAT_ARCHIVE_FILE";

/// Resolve the archive to load: the explicit path if given, else `$CHAT_ARCHIVE_FILE`
pub fn resolve_archive_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    match env::var(ARCHIVE_FILE_ENV) {
        Ok(value) if !value.trim().is_empty() => Ok(PathBuf::from(value)),
        _ => bail!("No archive file given: pass a path or set {}", ARCHIVE_FILE_ENV),
    }
}
