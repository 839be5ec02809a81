//! Save files on disk: naming rules and read/write of `.sot` images.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::tableau::Tableau;

/// Extension appended to every save name.
pub const SAVE_EXTENSION: &str = "sot";

const MAX_NAME_LEN: usize = 255;
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("invalid save name {0:?}")]
    InvalidName(String),

    #[error("could not access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// True if `name` can be used as a save name on any common filesystem.
///
/// Rejects empty names, names over 255 characters, names made only of
/// spaces and dots, and names containing `\ / : * ? " < > |`.
pub fn is_valid_save_name(name: &str) -> bool {
    if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
        return false;
    }
    if name.contains(ILLEGAL_CHARS) {
        return false;
    }
    !name.chars().all(|c| c == ' ' || c == '.')
}

/// `<dir>/<name>.sot`, after checking the name.
pub fn save_path(dir: &Path, name: &str) -> Result<PathBuf, SaveError> {
    if !is_valid_save_name(name) {
        return Err(SaveError::InvalidName(name.to_string()));
    }
    Ok(dir.join(format!("{name}.{SAVE_EXTENSION}")))
}

pub fn write_save(path: &Path, tab: &Tableau) -> Result<(), SaveError> {
    let bytes = codec::encode_to_vec(tab);
    fs::write(path, bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_save(path: &Path) -> Result<Tableau, SaveError> {
    let bytes = fs::read(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    codec::decode_tableau(&mut bytes.as_slice()).map_err(|source| SaveError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
