//! In-memory trade history with JSON snapshots.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::JournalError;
use super::record::{Annotation, TradeOutcome, TradeRecord};

/// Ordered collection of journal records, keyed by ID.
///
/// Serialized as a plain JSON array. Deserializing goes through
/// [`TradeHistory::insert`], so a snapshot with repeated IDs is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TradeRecord>", into = "Vec<TradeRecord>")]
pub struct TradeHistory {
    records: Vec<TradeRecord>,
}

impl TradeHistory {
    /// Empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a record. IDs must be unique.
    pub fn insert(&mut self, record: TradeRecord) -> Result<(), JournalError> {
        if self.get(&record.id).is_some() {
            return Err(JournalError::DuplicateId { id: record.id });
        }
        debug!(id = %record.id, pair = %record.currency_pair, "Recorded trade");
        self.records.push(record);
        Ok(())
    }

    /// Look up a record.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TradeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a record for editing.
    #[must_use]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut TradeRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut TradeRecord, JournalError> {
        self.get_mut(id)
            .ok_or_else(|| JournalError::NotFound { id: id.to_string() })
    }

    /// Record the outcome of an open trade.
    pub fn close(&mut self, id: &str, outcome: TradeOutcome) -> Result<&TradeRecord, JournalError> {
        let record = self.find_mut(id)?;
        record.close(outcome)?;
        debug!(id, result = ?record.result, "Closed trade");
        Ok(record)
    }

    /// Replace the review fields of a record.
    pub fn annotate(&mut self, id: &str, annotation: Annotation) -> Result<&TradeRecord, JournalError> {
        let record = self.find_mut(id)?;
        record.annotate(annotation);
        Ok(record)
    }

    /// Delete a record.
    pub fn remove(&mut self, id: &str) -> Result<TradeRecord, JournalError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| JournalError::NotFound { id: id.to_string() })?;
        Ok(self.records.remove(index))
    }

    /// Load a JSON array snapshot.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, JournalError> {
        let records: Vec<TradeRecord> = serde_json::from_reader(reader)?;
        let history = Self::try_from(records)?;
        info!(records = history.len(), "Loaded trade history");
        Ok(history)
    }

    /// Write the history as a pretty-printed JSON array.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), JournalError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

impl TryFrom<Vec<TradeRecord>> for TradeHistory {
    type Error = JournalError;

    fn try_from(records: Vec<TradeRecord>) -> Result<Self, Self::Error> {
        let mut history = Self::new();
        for record in records {
            history.insert(record)?;
        }
        Ok(history)
    }
}

impl From<TradeHistory> for Vec<TradeRecord> {
    fn from(history: TradeHistory) -> Self {
        history.records
    }
}
