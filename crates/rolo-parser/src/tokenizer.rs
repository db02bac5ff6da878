#![forbid(unsafe_code)]

//! Positional tokenizer for raw command lines.
//!
//! [`tokenize`] splits a raw input string into an [`ArgMap`] keyed by the
//! requested flags. The scan is positional, not grammatical:
//!
//! 1. every requested marker occurrence that is immediately preceded by
//!    whitespace is a candidate delimiter (position 0 never is: a line
//!    always opens with a preamble, even an empty one);
//! 2. unescaped double quotes pair up left to right into closed spans; a
//!    dangling final quote opens nothing;
//! 3. candidates inside a span are literal text, not delimiters;
//! 4. the survivors, ordered by position, cut the line into slices: the
//!    leading slice is the preamble (taken verbatim, trimmed), every other
//!    slice is the value of the flag that opened it.
//!
//! Named-flag values get quote treatment: a value wrapped in one pair of
//! quotes is unwrapped and escape-processed (`\\` and `\"` are the two
//! escapes; any other `\x` passes through untouched), while a bare
//! unescaped quote anywhere in a value is rejected. Markers outside the
//! requested set are inert and flow into whatever slice surrounds them.
//!
//! ```
//! use rolo_parser::{Flag, tokenize};
//!
//! let name = Flag::new("n/");
//! let tag = Flag::new("t/");
//! let map = tokenize("add n/ Ada Lovelace t/math t/pioneer", &[name.clone(), tag.clone()]).unwrap();
//! assert_eq!(map.preamble(), "add");
//! assert_eq!(map.last(&name), Some("Ada Lovelace"));
//! assert_eq!(map.values(&tag).unwrap(), &["math", "pioneer"]);
//! ```

use thiserror::Error;
use tracing::trace;

use crate::arg_map::ArgMap;
use crate::flag::Flag;

/// Errors produced while slicing values out of a raw command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// An unescaped `"` appeared in a value outside a single wrapping pair.
    #[error("unescaped quote in a value; wrap the whole value in quotes and escape inner ones as \\\"")]
    IllegalQuotation,
    /// A quoted value ended on a dangling `\`.
    #[error("value ends in an unfinished escape; use \\\\ for a literal backslash")]
    UnclosedEscape,
}

/// A candidate delimiter: a requested marker found at a byte position.
#[derive(Debug, Clone, Copy)]
struct Occurrence<'a> {
    pos: usize,
    flag: &'a Flag,
}

/// A closed quoted region, both quote characters included.
#[derive(Debug, Clone, Copy)]
struct QuotedSpan {
    start: usize,
    end: usize,
}

impl QuotedSpan {
    fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }
}

/// Split `raw` into a flag → values map using `flags` as the delimiter set.
///
/// Repeated flags accumulate every value in encounter order. A flag followed
/// by nothing before the next delimiter records the empty string, still
/// "present", unlike a flag that never appeared at all.
pub fn tokenize(raw: &str, flags: &[Flag]) -> Result<ArgMap, TokenizeError> {
    let spans = quoted_spans(raw);
    let mut occurrences = flag_occurrences(raw, flags);
    occurrences.retain(|occurrence| !spans.iter().any(|span| span.contains(occurrence.pos)));
    // At equal positions the longest marker wins; ties from a flag listed
    // twice collapse in the dedup below.
    occurrences.sort_by(|a, b| {
        a.pos
            .cmp(&b.pos)
            .then_with(|| b.flag.marker().len().cmp(&a.flag.marker().len()))
    });
    occurrences.dedup_by_key(|occurrence| occurrence.pos);

    let mut map = ArgMap::new();
    let first_flag_pos = occurrences.first().map_or(raw.len(), |occurrence| occurrence.pos);
    map.put(Flag::preamble(), raw[..first_flag_pos].trim());

    for (index, occurrence) in occurrences.iter().enumerate() {
        let end = occurrences
            .get(index + 1)
            .map_or(raw.len(), |next| next.pos);
        // Clamped so an overlapping shorter marker cannot push the slice
        // start past the next delimiter.
        let start = (occurrence.pos + occurrence.flag.marker().len()).min(end);
        let value = parse_value(raw[start..end].trim())?;
        map.put(occurrence.flag.clone(), value);
    }

    trace!(delimiters = occurrences.len(), "tokenized command line");
    Ok(map)
}

/// Every position where a requested marker appears right after whitespace.
fn flag_occurrences<'a>(raw: &str, flags: &'a [Flag]) -> Vec<Occurrence<'a>> {
    let mut occurrences = Vec::new();
    for flag in flags {
        if flag.is_preamble() {
            continue;
        }
        for (pos, _) in raw.match_indices(flag.marker()) {
            let preceded_by_whitespace = raw[..pos]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
            if preceded_by_whitespace {
                occurrences.push(Occurrence { pos, flag });
            }
        }
    }
    occurrences
}

/// Closed quote pairs, paired left to right.
///
/// A `"` preceded by an unescaped `\` is content, not a boundary; an
/// unpaired final quote opens no span.
fn quoted_spans(raw: &str) -> Vec<QuotedSpan> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut escaped = false;
    for (pos, ch) in raw.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => match open.take() {
                Some(start) => spans.push(QuotedSpan { start, end: pos }),
                None => open = Some(pos),
            },
            _ => {}
        }
    }
    spans
}

/// Apply the quote policy to one trimmed value slice.
fn parse_value(trimmed: &str) -> Result<String, TokenizeError> {
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        return unescape(&trimmed[1..trimmed.len() - 1]);
    }
    let mut escaped = false;
    for ch in trimmed.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            return Err(TokenizeError::IllegalQuotation);
        }
    }
    Ok(trimmed.to_string())
}

/// Escape processing for the interior of a quoted value.
fn unescape(inner: &str) -> Result<String, TokenizeError> {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                None => return Err(TokenizeError::UnclosedEscape),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
            },
            '"' => return Err(TokenizeError::IllegalQuotation),
            _ => out.push(ch),
        }
    }
    Ok(out)
}
