#![forbid(unsafe_code)]

//! Model layer: contact records and the snapshot history that versions them.
//!
//! # Role in rolo
//! `rolo-model` owns the state the shell mutates: the [`AddressBook`] of
//! [`Record`]s, and the [`VersionedStore`] that wraps any cloneable state
//! with bounded, branch-truncating undo/redo.
//!
//! # How it fits in the system
//! The shell applies a parsed command to the live state via
//! [`VersionedStore::current_mut`] and commits a snapshot when the mutation
//! succeeds; `undo`/`redo` move a cursor through the snapshot sequence and
//! hand back the description of the operation traversed. Nothing here knows
//! about flags or command words.

pub mod history;
pub mod record;

pub use history::{
    DEFAULT_MAX_SNAPSHOTS, HistoryConfig, HistoryError, INITIAL_DESCRIPTION, Snapshot,
    VersionedStore,
};
pub use record::{AddressBook, Record};
