use crate::ids::TransactionId;
use crate::Money;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
    Interest,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::TransferOut => "TRANSFER_OUT",
            Self::TransferIn => "TRANSFER_IN",
            Self::Interest => "INTEREST",
        };

        f.write_str(name)
    }
}

/// Immutable audit entry for one balance change.
///
/// `amount` is always a magnitude, `kind` carries the direction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    time: DateTime<Utc>,
    kind: TransactionKind,
    amount: Money,
    note: String,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        time: DateTime<Utc>,
        kind: TransactionKind,
        amount: Money,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id,
            time,
            kind,
            amount,
            note: note.into(),
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.id,
            self.time.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            self.amount,
            self.note
        )
    }
}
