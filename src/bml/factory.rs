use crate::account::validate_opening_balance;
use crate::ids::{AccountId, CustomerId};
use crate::journal::Journal;
use crate::{Account, AccountKind, AccountTerms, Money, Result};

/// Annual rate every new savings account starts with (6%)
pub const DEFAULT_ANNUAL_RATE: f64 = 0.06;

/// Overdraft every new current account starts with
pub const DEFAULT_OVERDRAFT_LIMIT: Money = Money::from_whole(10_000);

/// Builds the right account variant with its default terms
pub struct AccountFactory;

impl AccountFactory {
    pub fn default_terms(kind: AccountKind) -> Result<AccountTerms> {
        match kind {
            AccountKind::Savings => AccountTerms::savings(DEFAULT_ANNUAL_RATE),
            AccountKind::Current => AccountTerms::current(DEFAULT_OVERDRAFT_LIMIT),
        }
    }

    /// Validates everything before drawing an account id, so a rejected request consumes none
    pub fn create(
        kind: AccountKind,
        owner: CustomerId,
        opening_balance: Money,
        journal: &Journal,
    ) -> Result<Account> {
        validate_opening_balance(opening_balance)?;
        let terms = Self::default_terms(kind)?;

        let id = AccountId::from(journal.ids().next(AccountId::PREFIX));

        Account::open(id, owner, terms, opening_balance, journal.clone())
    }
}
