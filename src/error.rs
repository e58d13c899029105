use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Read,
    Write,
}

/// Failure raised while parsing or rendering a document.
///
/// Offsets count characters, not bytes, from the start of the input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{message} at offset {offset}")]
    Parse { message: String, offset: usize },
    #[error("read failed at offset {offset}: {source}")]
    Read {
        #[source]
        source: io::Error,
        offset: usize,
    },
    #[error("write failed: {0}")]
    Write(#[source] io::Error),
}

impl Error {
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }

    pub fn read(source: io::Error, offset: usize) -> Self {
        Self::Read { source, offset }
    }

    pub fn write(source: io::Error) -> Self {
        Self::Write(source)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Read { .. } => ErrorKind::Read,
            Error::Write(_) => ErrorKind::Write,
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse { offset, .. } | Error::Read { offset, .. } => Some(*offset),
            Error::Write(_) => None,
        }
    }

    /// The message without the offset suffix.
    pub fn message(&self) -> String {
        match self {
            Error::Parse { message, .. } => message.clone(),
            Error::Read { source, .. } | Error::Write(source) => source.to_string(),
        }
    }
}
