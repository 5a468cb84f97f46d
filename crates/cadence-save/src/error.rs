//! Error types for the save codec.

use std::io;

use thiserror::Error;

/// Errors raised while writing or reading a saved tick list.
///
/// Unresolvable kind names are not errors; they are skipped and
/// reported in [`LoadedTicks`](crate::LoadedTicks).
#[derive(Debug, Error)]
pub enum SaveError {
    /// An I/O error occurred during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The data does not start with the expected `b"CDNC"` magic bytes.
    #[error("invalid magic bytes (expected b\"CDNC\")")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version {found}")]
    UnsupportedVersion {
        /// The version found in the data.
        found: u8,
    },
    /// A record could not be decoded (corrupt or oversized data).
    #[error("malformed record {index}: {detail}")]
    MalformedRecord {
        /// Zero-based position of the record in the list.
        index: u32,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A priority byte outside the known levels.
    #[error("unknown priority tag {tag} in record {index}")]
    UnknownPriority {
        /// Zero-based position of the record in the list.
        index: u32,
        /// The unrecognized tag.
        tag: i8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_errors_keep_their_source() {
        let err = SaveError::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short"));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn display_names_the_record() {
        let err = SaveError::UnknownPriority { index: 3, tag: 9 };
        assert_eq!(err.to_string(), "unknown priority tag 9 in record 3");
    }
}
