use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PhishError, Result};

/// Hex SHA-256 digest of a file's contents
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => PhishError::MissingFile {
            name: "checksum target",
            path: path.to_path_buf(),
        },
        _ => PhishError::Io(err),
    })?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}
