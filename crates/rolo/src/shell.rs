#![forbid(unsafe_code)]

//! Command execution against the versioned address book.
//!
//! The shell owns the [`VersionedStore`]; every mutating command edits the
//! live book through `current_mut` and commits a snapshot once the edit has
//! succeeded, so a failed edit never pollutes the history. `undo`/`redo`
//! are translated here into their user-facing feedback lines.

use rolo_model::{AddressBook, Record, VersionedStore};
use tracing::debug;

use crate::command::Command;

/// What the REPL should do after a command: print and continue, or stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Exit,
}

/// The session state: one versioned address book.
#[derive(Debug)]
pub struct Shell {
    store: VersionedStore<AddressBook>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: VersionedStore::new(AddressBook::new()),
        }
    }

    /// Execute one parsed command and produce its feedback line.
    pub fn execute(&mut self, command: Command) -> Outcome {
        debug!(?command, "executing");
        match command {
            Command::Add(record) => {
                let name = record.name.clone();
                self.store.current_mut().add(record);
                self.store.commit(format!("add {name}"));
                Outcome::Continue(format!("Added {name}"))
            }
            Command::Delete(index) => match self.store.current_mut().remove(index - 1) {
                Some(removed) => {
                    self.store.commit(format!("delete {}", removed.name));
                    Outcome::Continue(format!("Deleted {}", removed.name))
                }
                None => Outcome::Continue(format!("No record number {index}")),
            },
            Command::Find { keywords, in_tags } => {
                let lines: Vec<String> = self
                    .store
                    .current()
                    .iter()
                    .enumerate()
                    .filter(|(_, record)| matches_any(record, &keywords, in_tags))
                    .map(|(index, record)| render_record(index, record))
                    .collect();
                if lines.is_empty() {
                    Outcome::Continue("No matching records".to_string())
                } else {
                    Outcome::Continue(lines.join("\n"))
                }
            }
            Command::List => {
                let book = self.store.current();
                if book.is_empty() {
                    Outcome::Continue("Address book is empty".to_string())
                } else {
                    let lines: Vec<String> = book
                        .iter()
                        .enumerate()
                        .map(|(index, record)| render_record(index, record))
                        .collect();
                    Outcome::Continue(lines.join("\n"))
                }
            }
            Command::Clear => {
                if self.store.current().is_empty() {
                    Outcome::Continue("Address book is already empty".to_string())
                } else {
                    self.store.current_mut().clear();
                    self.store.commit("clear all records");
                    Outcome::Continue("Cleared all records".to_string())
                }
            }
            Command::Undo => match self.store.undo() {
                Ok(description) => Outcome::Continue(format!("Undid: {description}")),
                Err(error) => Outcome::Continue(capitalize(&error.to_string())),
            },
            Command::Redo => match self.store.redo() {
                Ok(description) => Outcome::Continue(format!("Redid: {description}")),
                Err(error) => Outcome::Continue(capitalize(&error.to_string())),
            },
            Command::Help => Outcome::Continue(HELP_TEXT.to_string()),
            Command::Exit => Outcome::Exit,
        }
    }

    /// Read access for tests and the prompt.
    #[must_use]
    pub fn store(&self) -> &VersionedStore<AddressBook> {
        &self.store
    }
}

const HELP_TEXT: &str = "\
Commands:
  add n/NAME [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...   add a record
  delete INDEX                                            delete a record
  find KEYWORD... [t/]                                    search names (t/: tags)
  list                                                    list all records
  clear                                                   delete all records
  undo | redo                                             navigate history
  help | exit";

fn matches_any(record: &Record, keywords: &[String], in_tags: bool) -> bool {
    keywords.iter().any(|keyword| {
        if in_tags {
            record
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(keyword))
        } else {
            record
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase())
        }
    })
}

fn render_record(index: usize, record: &Record) -> String {
    let mut line = format!("{}. {}", index + 1, record.name);
    if let Some(phone) = &record.phone {
        line.push_str(&format!("  p: {phone}"));
    }
    if let Some(email) = &record.email {
        line.push_str(&format!("  e: {email}"));
    }
    if let Some(address) = &record.address {
        line.push_str(&format!("  a: {address}"));
    }
    if !record.tags.is_empty() {
        line.push_str(&format!("  t: {}", record.tags.join(", ")));
    }
    line
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
