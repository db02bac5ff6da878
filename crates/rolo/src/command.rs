#![forbid(unsafe_code)]

//! Line commands and their parsers.
//!
//! A line splits into a command word and an argument tail; the tail is
//! tokenized against that command's flag set and the concrete [`Command`]
//! is built from the resulting map. Each parser owns its own syntax rules
//! (which flags are single-valued, which are switches, what the preamble
//! means); the tokenizer stays generic.

use rolo_model::Record;
use rolo_parser::{ArgError, Flag, TokenizeError, tokenize};
use thiserror::Error;

/// Marker for the record name.
pub const NAME: &str = "n/";
/// Marker for the phone number.
pub const PHONE: &str = "p/";
/// Marker for the email address.
pub const EMAIL: &str = "e/";
/// Marker for the postal address.
pub const ADDRESS: &str = "a/";
/// Marker for a tag; repeatable.
pub const TAG: &str = "t/";

/// A fully parsed line command, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new record built from the flag arguments.
    Add(Record),
    /// Delete the record at the 1-based index given in the preamble.
    Delete(usize),
    /// List records matching any keyword; `t/` switches to tag matching.
    Find { keywords: Vec<String>, in_tags: bool },
    List,
    Clear,
    Undo,
    Redo,
    Help,
    Exit,
}

/// Errors produced while turning a line into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command line")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),
    #[error(transparent)]
    Args(#[from] ArgError),
    #[error("missing required flag {0}")]
    MissingFlag(Flag),
    #[error("expected a record number, got '{0}'")]
    BadIndex(String),
    #[error("find needs at least one keyword")]
    NoKeywords,
    #[error("{0} takes no arguments")]
    UnexpectedArguments(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }
        // The tail keeps its leading whitespace: the tokenizer only accepts
        // markers that follow a whitespace character.
        let split = trimmed
            .find(char::is_whitespace)
            .unwrap_or(trimmed.len());
        let (word, tail) = trimmed.split_at(split);

        match word {
            "add" => Self::parse_add(tail),
            "delete" => Self::parse_delete(tail),
            "find" => Self::parse_find(tail),
            "list" => Self::parse_bare(tail, Self::List, word),
            "clear" => Self::parse_bare(tail, Self::Clear, word),
            "undo" => Self::parse_bare(tail, Self::Undo, word),
            "redo" => Self::parse_bare(tail, Self::Redo, word),
            "help" => Self::parse_bare(tail, Self::Help, word),
            "exit" | "quit" => Self::parse_bare(tail, Self::Exit, word),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_add(tail: &str) -> Result<Self, ParseError> {
        let name = Flag::new(NAME);
        let phone = Flag::new(PHONE);
        let email = Flag::new(EMAIL);
        let address = Flag::new(ADDRESS);
        let tag = Flag::new(TAG);

        let map = tokenize(
            tail,
            &[
                name.clone(),
                phone.clone(),
                email.clone(),
                address.clone(),
                tag.clone(),
            ],
        )?;
        map.ensure_unique(&[
            name.clone(),
            phone.clone(),
            email.clone(),
            address.clone(),
        ])?;

        let Some(record_name) = map.last(&name).filter(|value| !value.is_empty()) else {
            return Err(ParseError::MissingFlag(name));
        };
        let mut record = Record::named(record_name);
        record.phone = non_empty(map.last(&phone));
        record.email = non_empty(map.last(&email));
        record.address = non_empty(map.last(&address));
        if let Some(tags) = map.values(&tag) {
            record.tags = tags
                .iter()
                .filter(|value| !value.is_empty())
                .cloned()
                .collect();
        }
        Ok(Self::Add(record))
    }

    fn parse_delete(tail: &str) -> Result<Self, ParseError> {
        let map = tokenize(tail, &[])?;
        let preamble = map.preamble();
        let index = preamble
            .parse::<usize>()
            .ok()
            .filter(|&index| index >= 1)
            .ok_or_else(|| ParseError::BadIndex(preamble.to_string()))?;
        Ok(Self::Delete(index))
    }

    fn parse_find(tail: &str) -> Result<Self, ParseError> {
        let tag = Flag::new(TAG);
        let map = tokenize(tail, std::slice::from_ref(&tag))?;
        map.ensure_no_values(std::slice::from_ref(&tag))?;

        let keywords: Vec<String> = map
            .preamble()
            .split_whitespace()
            .map(String::from)
            .collect();
        if keywords.is_empty() {
            return Err(ParseError::NoKeywords);
        }
        Ok(Self::Find {
            keywords,
            in_tags: map.has(&tag),
        })
    }

    fn parse_bare(tail: &str, command: Self, word: &str) -> Result<Self, ParseError> {
        if tail.trim().is_empty() {
            Ok(command)
        } else {
            Err(ParseError::UnexpectedArguments(word.to_string()))
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(String::from)
}
