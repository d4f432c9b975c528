// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::path::PathBuf;

use thiserror::Error;

use super::reader::Location;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("content has already been loaded")]
    AlreadyLoaded,
    #[error("unable to open {}: no such file", .0.display())]
    NotFound(PathBuf),
    #[error("unable to read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("no content to tokenize")]
    EmptyContent,
    #[error("content has already been tokenized")]
    AlreadyTokenized,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of file")]
    UnexpectedEndOfFile,
    #[error("invalid scope")]
    InvalidScope,
    #[error("invalid signal width")]
    InvalidSignalWidth,
    #[error("unknown keyword")]
    UnknownKeyword,
    #[error("invalid signal type")]
    InvalidSignalType,
    #[error("invalid timestamp")]
    InvalidTimestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("parser has already been run")]
    AlreadyParsed,
    #[error("{kind} at {location}{}", found(.token))]
    Syntax {
        kind: ParseErrorKind,
        token: String,
        location: Location,
    },
}

fn found(token: &str) -> String {
    if token.is_empty() {
        String::new()
    } else {
        format!(": found `{token}`")
    }
}

impl ParseError {
    pub(crate) fn syntax(kind: ParseErrorKind, token: &str, location: Location) -> ParseError {
        ParseError::Syntax {
            kind,
            token: token.to_string(),
            location,
        }
    }

    /// The grammar error behind this failure, if it is one.
    pub fn kind(&self) -> Option<ParseErrorKind> {
        match self {
            ParseError::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Text of the offending token. Empty when the parser ran into the end
    /// of the input.
    pub fn token(&self) -> Option<&str> {
        match self {
            ParseError::Syntax { token, .. } => Some(token),
            _ => None,
        }
    }
}

/// Either half of a one-shot load-and-parse.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Parse(ParseError),
}

// a tokenize failure surfaced through `parse` is still a load failure
impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Load(err) => Error::Load(err),
            err => Error::Parse(err),
        }
    }
}
