//! Error types for codec operations

use crate::tag::{Marker, Tag};
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Which half of a table entry failed to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryPart {
    Key,
    Value,
}

impl fmt::Display for EntryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("buffer too small: expected at least {needed} bytes, but got {found}")]
    BufferTooSmall { needed: usize, found: usize },
    #[error("unexpected end of buffer")]
    EndOfBuffer,
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("[B: {offset}] invalid tag '{tag}'")]
    MalformedTag { tag: u8, offset: usize },
    #[error("[T: {tag}] [B: {offset}] bytes array too small; expected at least {expected} bytes, but got {found}")]
    Truncated {
        tag: Tag,
        offset: usize,
        expected: usize,
        found: usize,
    },
    #[error("[T: {expected}] [B: {offset}] closing tag mismatch; expected {expected}, but got {found}")]
    CloseTagMismatch {
        expected: Tag,
        found: Marker,
        offset: usize,
    },
    #[error("[T: Table] [B: {offset}] table key must be String, but got {found}")]
    InvalidTableKey { found: Marker, offset: usize },
    #[error("[T: Table] [B: {offset}] failed to deserialize table {part} #{index}: {source}")]
    Nested {
        index: usize,
        part: EntryPart,
        offset: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("[B: {offset}] nesting depth exceeded: {max}")]
    DepthExceeded { max: usize, offset: usize },
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("path is not a file: {0}")]
    NotAFile(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true if the error was caused by malformed or truncated input
    /// (as opposed to caller misuse or I/O).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EndOfBuffer
                | Self::ExtraData(_)
                | Self::MalformedTag { .. }
                | Self::Truncated { .. }
                | Self::CloseTagMismatch { .. }
                | Self::InvalidTableKey { .. }
                | Self::Nested { .. }
                | Self::DepthExceeded { .. }
        )
    }

    /// Follows a chain of [Error::Nested] down to the error that started it.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Self::Nested { source, .. } = err {
            err = source;
        }
        err
    }

    pub(crate) fn nested(index: usize, part: EntryPart, offset: usize, source: Error) -> Self {
        Self::Nested {
            index,
            part,
            offset,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause() {
        let inner = Error::Truncated {
            tag: Tag::I32,
            offset: 12,
            expected: 5,
            found: 2,
        };
        let err = Error::nested(0, EntryPart::Value, 3, Error::nested(4, EntryPart::Key, 7, inner));
        assert!(matches!(
            err.root_cause(),
            Error::Truncated {
                tag: Tag::I32,
                offset: 12,
                ..
            }
        ));
        assert!(err.is_structural());
    }

    #[test]
    fn test_display_context() {
        let err = Error::CloseTagMismatch {
            expected: Tag::I64,
            found: Marker(Tag::I32.close()),
            offset: 9,
        };
        assert_eq!(
            err.to_string(),
            "[T: I64] [B: 9] closing tag mismatch; expected I64, but got I32"
        );

        let err = Error::nested(2, EntryPart::Key, 40, Error::EndOfBuffer);
        assert_eq!(
            err.to_string(),
            "[T: Table] [B: 40] failed to deserialize table key #2: unexpected end of buffer"
        );
    }

    #[test]
    fn test_invalid_argument_is_not_structural() {
        let err = Error::BufferTooSmall {
            needed: 6,
            found: 5,
        };
        assert!(!err.is_structural());
        assert!(!Error::FileNotFound(PathBuf::from("missing.sbf")).is_structural());
    }
}
