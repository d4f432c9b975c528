// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.

//! Splits a loaded VCD buffer into whitespace delimited words.
//!
//! The tokenizer owns the whole source text. Words are stored as byte
//! ranges into that text and handed out as `&str` views, so anything that
//! has to outlive the tokenizer must be copied out by the caller.
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::errors::LoadError;

/// The empty token returned once the cursor has moved past the last word.
pub const SENTINEL: &str = "";

/// 1-based line and word position of a token in the source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub word: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, word {}", self.line, self.word)
    }
}

#[derive(Debug, Copy, Clone)]
struct Span {
    start: usize,
    end: usize,
    location: Location,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Unloaded,
    Loaded,
    Tokenized,
}

#[derive(Debug)]
pub struct Tokenizer {
    state: State,
    contents: String,
    spans: Vec<Span>,
    cursor: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    pub fn new() -> Tokenizer {
        Tokenizer {
            state: State::Unloaded,
            contents: String::new(),
            spans: vec![],
            cursor: 0,
        }
    }

    /// Read the whole file at `path` into memory.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        if self.state != State::Unloaded {
            return Err(LoadError::AlreadyLoaded);
        }

        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        log::debug!("loaded {} bytes from {}", contents.len(), path.display());
        self.contents = contents;
        self.state = State::Loaded;
        Ok(())
    }

    pub fn load_content<S: Into<String>>(&mut self, contents: S) -> Result<(), LoadError> {
        if self.state != State::Unloaded {
            return Err(LoadError::AlreadyLoaded);
        }

        self.contents = contents.into();
        self.state = State::Loaded;
        Ok(())
    }

    /// Split the loaded text into words. Carriage returns and newlines count
    /// as spaces, runs of spaces produce no empty words, and a single
    /// [`SENTINEL`] word is appended at the end.
    pub fn tokenize(&mut self) -> Result<(), LoadError> {
        match self.state {
            State::Unloaded => return Err(LoadError::EmptyContent),
            State::Tokenized => return Err(LoadError::AlreadyTokenized),
            State::Loaded => {}
        }
        if self.contents.is_empty() {
            return Err(LoadError::EmptyContent);
        }

        let mut line = 1;
        let mut word = 0;
        let mut start = None;

        for (idx, byte) in self.contents.bytes().enumerate() {
            match byte {
                b' ' | b'\r' | b'\n' => {
                    if let Some(start) = start.take() {
                        word += 1;
                        self.spans.push(Span {
                            start,
                            end: idx,
                            location: Location { line, word },
                        });
                    }
                    if byte == b'\n' {
                        line += 1;
                        word = 0;
                    }
                }
                _ => {
                    if start.is_none() {
                        start = Some(idx);
                    }
                }
            }
        }

        let end = self.contents.len();
        if let Some(start) = start {
            word += 1;
            self.spans.push(Span {
                start,
                end,
                location: Location { line, word },
            });
        }

        // the sentinel sits just past the last word
        self.spans.push(Span {
            start: end,
            end,
            location: Location {
                line,
                word: word + 1,
            },
        });

        log::trace!("tokenized {} words", self.spans.len() - 1);
        self.state = State::Tokenized;
        Ok(())
    }

    /// Number of tokens, the sentinel included.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn front(&self) -> &str {
        assert!(!self.spans.is_empty(), "front() called on an empty token list");
        self.text(0)
    }

    pub fn back(&self) -> &str {
        assert!(!self.spans.is_empty(), "back() called on an empty token list");
        self.text(self.spans.len() - 1)
    }

    /// The token under the cursor, or [`SENTINEL`] once the cursor is out of
    /// bounds.
    pub fn current(&self) -> &str {
        if self.cursor < self.spans.len() {
            self.text(self.cursor)
        } else {
            SENTINEL
        }
    }

    /// Location of the token under the cursor. Past the end this is the
    /// location of the sentinel.
    pub fn location(&self) -> Location {
        self.spans
            .get(self.cursor)
            .or_else(|| self.spans.last())
            .map(|span| span.location)
            .unwrap_or_default()
    }

    pub fn at_sentinel(&self) -> bool {
        self.current().is_empty()
    }

    /// Return the token under the cursor, then move the cursor `step` tokens
    /// forward.
    pub fn consume(&mut self, step: usize) -> &str {
        assert!(
            self.cursor < self.spans.len(),
            "consume() called with the cursor past the last token"
        );
        let idx = self.cursor;
        self.cursor += step;
        self.text(idx)
    }

    fn text(&self, idx: usize) -> &str {
        let Span { start, end, .. } = self.spans[idx];
        &self.contents[start..end]
    }
}
