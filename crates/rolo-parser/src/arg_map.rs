#![forbid(unsafe_code)]

//! Flag → value mapping produced by the tokenizer.
//!
//! An [`ArgMap`] records, for every flag the tokenizer matched, the values
//! that followed it in encounter order. Presence and values are distinct
//! facts: a flag that appeared with nothing after it is stored with a single
//! empty string, which is *not* the same as the flag never appearing at all.
//!
//! The map is built once per tokenize call and read-only afterwards. The
//! validation helpers ([`ensure_unique`](ArgMap::ensure_unique),
//! [`ensure_no_values`](ArgMap::ensure_no_values)) are invoked by command
//! parsers according to each command's own syntax rules; the tokenizer
//! itself never calls them.

use ahash::AHashMap;
use thiserror::Error;

use crate::flag::Flag;

/// Errors raised by the [`ArgMap`] validation helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// A single-valued flag was supplied more than once.
    ///
    /// Carries every offending flag, not just the first one found.
    #[error("flag supplied more than once: {}", join_markers(.0))]
    DuplicateFlags(Vec<Flag>),
    /// A switch-style flag that takes no value was given one.
    #[error("flag {0} does not accept a value")]
    UnexpectedValue(Flag),
}

fn join_markers(flags: &[Flag]) -> String {
    let markers: Vec<&str> = flags.iter().map(Flag::marker).collect();
    markers.join(" ")
}

/// Mapping from [`Flag`] to the ordered values recorded for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgMap {
    values: AHashMap<Flag, Vec<String>>,
}

impl ArgMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the sequence recorded for `flag`, creating the
    /// entry if the flag has not been seen yet.
    pub fn put(&mut self, flag: Flag, value: impl Into<String>) {
        self.values.entry(flag).or_default().push(value.into());
    }

    /// Whether `flag` was recorded at least once. An empty value counts.
    #[must_use]
    pub fn has(&self, flag: &Flag) -> bool {
        self.values.contains_key(flag)
    }

    /// The most recently recorded value for `flag`.
    #[must_use]
    pub fn last(&self, flag: &Flag) -> Option<&str> {
        self.values
            .get(flag)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// All values recorded for `flag`, in encounter order.
    ///
    /// `None` means the flag never appeared; a present flag always carries
    /// at least one value.
    #[must_use]
    pub fn values(&self, flag: &Flag) -> Option<&[String]> {
        self.values.get(flag).map(Vec::as_slice)
    }

    /// The free text before the first recognized flag, or `""`.
    #[must_use]
    pub fn preamble(&self) -> &str {
        self.last(&Flag::preamble()).unwrap_or("")
    }

    /// Number of distinct flags recorded (the preamble sentinel included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fail if any of `flags` was recorded more than once.
    pub fn ensure_unique(&self, flags: &[Flag]) -> Result<(), ArgError> {
        let duplicated: Vec<Flag> = flags
            .iter()
            .filter(|flag| self.values.get(flag).is_some_and(|values| values.len() > 1))
            .cloned()
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ArgError::DuplicateFlags(duplicated))
        }
    }

    /// Fail if any of `flags` present in the map carries a non-blank value.
    ///
    /// Used for switch-style flags whose presence is the whole argument.
    /// The preamble sentinel is never checked.
    pub fn ensure_no_values(&self, flags: &[Flag]) -> Result<(), ArgError> {
        for flag in flags {
            if flag.is_preamble() {
                continue;
            }
            if let Some(values) = self.values.get(flag)
                && values.iter().any(|value| !value.trim().is_empty())
            {
                return Err(ArgError::UnexpectedValue(flag.clone()));
            }
        }
        Ok(())
    }
}
