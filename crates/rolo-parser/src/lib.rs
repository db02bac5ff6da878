#![forbid(unsafe_code)]

//! Parsing layer: flag markers, argument maps, and the line tokenizer.
//!
//! # Role in rolo
//! `rolo-parser` is the input layer. It owns the positional tokenizer that
//! turns a raw command line into an [`ArgMap`], plus the [`Flag`] and
//! [`ArgMap`] vocabulary the command layer reads its arguments through.
//!
//! # Primary responsibilities
//! - **Flag**: the literal marker (`n/`, `-t`, …) that introduces a value.
//! - **ArgMap**: flag → ordered values, with presence/last/all queries and
//!   the per-command validation helpers.
//! - **tokenize**: the positional scan that honors whitespace boundaries
//!   and quoted/escaped spans.
//!
//! # How it fits in the system
//! The shell (`rolo`) splits off the command word, hands the rest of the
//! line plus the command's flag set to [`tokenize`], and builds the concrete
//! command from the returned map. Nothing here knows about records or
//! history; this crate is the clean bridge between keystrokes and the model.

pub mod arg_map;
pub mod flag;
pub mod tokenizer;

pub use arg_map::{ArgError, ArgMap};
pub use flag::Flag;
pub use tokenizer::{TokenizeError, tokenize};
