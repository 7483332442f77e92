//! Content checksums for cache-busting filenames.
//!
//! Uses blake3 over the full file contents, hex-encoded and truncated to a
//! fixed 16 characters. Collision-resistant enough for fingerprinted URLs;
//! not a security boundary.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Length of the hex checksum embedded into fingerprinted filenames.
pub const CHECKSUM_LEN: usize = 16;

/// Compute the checksum of a file's contents (streamed, 64 KiB buffer).
///
/// Returns a lowercase hex string of exactly [`CHECKSUM_LEN`] characters.
/// The checksum is a pure function of the bytes: identical content always
/// yields an identical checksum, so previously built URLs stay valid until
/// content actually changes.
pub fn checksum_file(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let mut hex = hex::encode(hasher.finalize().as_bytes());
    hex.truncate(CHECKSUM_LEN);
    Ok(hex)
}
