use crate::ids::TransactionId;
use crate::Transaction;

use std::collections::HashMap;

/// Represents a WORM (Write Once, Read Many) data structure for keeping track of an account's
/// transactions. Entries can be appended and read, never changed or removed.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    history: Vec<Transaction>,
    lookup_map: HashMap<TransactionId, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously recorded entries, keeping their order
    pub fn from_entries(entries: impl IntoIterator<Item = Transaction>) -> Self {
        let mut ledger = Self::new();

        for tx in entries {
            ledger.append(tx);
        }

        ledger
    }

    pub fn append(&mut self, tx: Transaction) -> usize {
        let index = self.history.len();

        self.lookup_map.insert(tx.id().clone(), index);
        self.history.push(tx);

        index
    }

    pub fn get_by_index(&self, index: &usize) -> Option<&Transaction> {
        self.history.get(*index)
    }

    pub fn get_by_id(&self, id: &TransactionId) -> Option<&Transaction> {
        let index = self.lookup_map.get(id)?;

        self.get_by_index(index)
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
