mod account;
mod account_report;
mod bank;
pub mod clock;
mod command;
mod customer;
mod error;
mod factory;
pub mod ids;
pub mod input;
mod journal;
mod ledger;
mod money;
mod repository;
mod result;
pub mod snapshot;
mod transaction;

pub use account::{Account, AccountKind, AccountTerms, FlatAnnualRate, InterestStrategy};
pub use account_report::AccountReport;
pub use bank::{Bank, DEFAULT_BANK_NAME};
pub use customer::Customer;
pub use error::{ErrorKind, LedgerError};
pub use factory::{AccountFactory, DEFAULT_ANNUAL_RATE, DEFAULT_OVERDRAFT_LIMIT};
pub use journal::Journal;
pub use ledger::Ledger;
pub use money::{Money, MoneyError};
pub use repository::{Identifiable, Repository};
pub use result::Result;
pub use transaction::{Transaction, TransactionKind};
