//! Database-side consumers of the stream: temp file names and row ids.

use crate::stream::{ByteStream, PrngError};

/// Prefix for temporary database files.
pub const DEFAULT_TEMP_PREFIX: &str = "etilqs_";

/// Random characters appended after the prefix.
pub const TEMP_NAME_RANDOM_LEN: usize = 15;

const TEMP_NAME_CHARS: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `prefix` followed by 15 random alphanumeric characters.
pub fn temp_file_name(stream: &ByteStream, prefix: &str) -> Result<String, PrngError> {
    let mut bytes = [0u8; TEMP_NAME_RANDOM_LEN];
    stream.fill_random_bytes(&mut bytes)?;

    let mut name = String::with_capacity(prefix.len() + TEMP_NAME_RANDOM_LEN);
    name.push_str(prefix);
    name.extend(
        bytes
            .iter()
            .map(|&b| TEMP_NAME_CHARS[b as usize % TEMP_NAME_CHARS.len()] as char),
    );
    Ok(name)
}

/// Candidate row id for when sequential allocation is exhausted.
///
/// Always in `1..=2^62`.
pub fn random_rowid(stream: &ByteStream) -> Result<i64, PrngError> {
    let mut bytes = [0u8; 8];
    stream.fill_random_bytes(&mut bytes)?;

    let v = i64::from_ne_bytes(bytes) & (i64::MAX >> 1);
    Ok(v + 1)
}
