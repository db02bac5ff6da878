#![forbid(unsafe_code)]

//! Flag markers for line commands.
//!
//! A [`Flag`] wraps the literal marker text (`n/`, `-t`, …) that introduces
//! an argument value in a raw command line. Flags are pure value objects:
//! two flags are equal iff their markers are equal, and the marker doubles
//! as the scan target during tokenization. Nothing about marker syntax is
//! validated here; what counts as an occurrence is the tokenizer's call.

use std::fmt;

/// A literal marker (e.g. `n/`, `-t`) that introduces an argument value.
///
/// The empty marker is reserved for the *preamble*, the free text before
/// the first recognized flag, and is obtained via [`Flag::preamble`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Flag {
    marker: String,
}

impl Flag {
    /// Create a flag from its literal marker text.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The sentinel flag under which the preamble text is stored.
    #[must_use]
    pub fn preamble() -> Self {
        Self {
            marker: String::new(),
        }
    }

    /// Whether this is the preamble sentinel.
    #[must_use]
    pub fn is_preamble(&self) -> bool {
        self.marker.is_empty()
    }

    /// The literal marker text.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marker)
    }
}

impl From<&str> for Flag {
    fn from(marker: &str) -> Self {
        Self::new(marker)
    }
}
