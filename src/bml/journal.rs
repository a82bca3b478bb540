use crate::clock::{Clock, SystemClock};
use crate::ids::{IdAllocator, TransactionId};
use crate::{Money, Transaction, TransactionKind};

use std::sync::Arc;

/// Mints ledger entries: allocates the transaction identity and captures the time at the
/// moment of append, so `Transaction` itself stays a plain value.
#[derive(Debug, Clone)]
pub struct Journal {
    ids: Arc<IdAllocator>,
    clock: Arc<dyn Clock>,
}

impl Journal {
    pub fn new(ids: Arc<IdAllocator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn record(&self, kind: TransactionKind, amount: Money, note: impl Into<String>) -> Transaction {
        let id = TransactionId::from(self.ids.next(TransactionId::PREFIX));

        Transaction::new(id, self.clock.now(), kind, amount, note)
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(Arc::new(IdAllocator::new()), Arc::new(SystemClock))
    }
}
