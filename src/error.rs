//! Error types for a single XMind conversion.
//!
//! Every variant of [`ConvertError`] is scoped to one input file. The batch
//! driver reports it next to the file name and moves on to the next archive.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failure converting one `.xmind` archive.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot open archive: {0}")]
    ContainerOpen(#[source] zip::result::ZipError),

    #[error("unsupported format: archive has neither content.json nor content.xml")]
    UnsupportedFormat,

    #[error("failed to parse {entry}: {source}")]
    Parse {
        entry: &'static str,
        #[source]
        source: PayloadError,
    },

    #[error("no root topic found")]
    MissingRootTopic,

    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("failed to serialize diagram: {0}")]
    Serialize(#[from] XmlWriteError),
}

/// Cause of a payload entry that could not be turned into a raw document.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("read error: {0}")]
    Read(#[from] zip::result::ZipError),

    #[error("read error: {0}")]
    Io(#[from] io::Error),

    #[error("payload is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Failure while serializing an element tree to bytes.
#[derive(Debug, Error)]
pub enum XmlWriteError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Encoding(#[from] FromUtf8Error),
}

impl ConvertError {
    /// Short label for the error category, used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ContainerOpen(_) => "container_open",
            Self::UnsupportedFormat => "unsupported_format",
            Self::Parse { .. } => "parse",
            Self::MissingRootTopic => "missing_root_topic",
            Self::Write(_) => "write",
            Self::Serialize(_) => "serialize",
        }
    }
}
