//! Command implementations.

use std::io::Read;

use camino::Utf8Path;
use textstat_core::{InputError, check_input_size};

pub mod copy;
pub mod info;
pub mod live;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod stats;

/// Read the text a command operates on, enforcing the input size limit.
///
/// `None` or `-` reads stdin; anything else is a file path.
pub fn read_input(path: Option<&Utf8Path>, max_bytes: Option<usize>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_str() != "-" => read_input_file(path, max_bytes),
        _ => read_input_stream(std::io::stdin().lock(), "stdin", max_bytes),
    }
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let read_err = |source| InputError::Read {
        source_name: path.to_string(),
        source,
    };

    // Preflight: check file size via metadata before reading into memory.
    let metadata = std::fs::metadata(path.as_std_path()).map_err(read_err)?;
    let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
    check_input_size(path.as_str(), size, max_bytes)?;

    let content = std::fs::read_to_string(path.as_std_path()).map_err(read_err)?;
    Ok(content)
}

/// Read a stream to a string, failing once it passes the size limit.
pub fn read_input_stream<R: Read>(
    reader: R,
    source_name: &str,
    max_bytes: Option<usize>,
) -> anyhow::Result<String> {
    let read_err = |source| InputError::Read {
        source_name: source_name.to_string(),
        source,
    };

    let mut bytes = Vec::new();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            reader.take(cap).read_to_end(&mut bytes).map_err(read_err)?;
        }
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut bytes).map_err(read_err)?;
        }
    }
    check_input_size(source_name, bytes.len(), max_bytes)?;
    let content = String::from_utf8(bytes)
        .map_err(|e| read_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    Ok(content)
}
