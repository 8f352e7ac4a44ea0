pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve a typed input from an `--input` file or piped stdin.
/// Returns None when neither is available, so the caller can fall back
/// to individual flags.
pub fn from_file_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    if let Some(value) = stdin::read_stdin()? {
        return Ok(Some(serde_json::from_value(value)?));
    }
    Ok(None)
}
