#![forbid(unsafe_code)]

//! Contact records and the address book that holds them.
//!
//! Deliberately small: the interesting machinery (tokenizing, history) lives
//! elsewhere. The model only has to be cloneable and comparable so the
//! history engine can snapshot it and tests can diff whole states.

/// A single contact entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Record {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub tags: Vec<String>,
}

impl Record {
    /// Create a record carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Ordered collection of contact records, addressed by zero-based index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct AddressBook {
    records: Vec<Record>,
}

impl AddressBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record at the end of the book.
    pub fn add(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove the record at `index`, returning it if the index was valid.
    pub fn remove(&mut self, index: usize) -> Option<Record> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Replace the record at `index`, returning the old one if valid.
    pub fn replace(&mut self, index: usize, record: Record) -> Option<Record> {
        self.records
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, record))
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
