use crate::ids::{AccountId, CustomerId, TransactionId};
use crate::journal::Journal;
use crate::{Ledger, LedgerError, Money, Result, Transaction, TransactionKind};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountKind {
    Savings,
    Current,
}

impl FromStr for AccountKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAVINGS" => Ok(Self::Savings),
            "CURRENT" => Ok(Self::Current),
            _ => Err(LedgerError::InvalidArgument(format!("Unknown account kind: {s:?}"))),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Savings => f.write_str("SAVINGS"),
            Self::Current => f.write_str("CURRENT"),
        }
    }
}

/// Strategy for the interest an account accrues each month
pub trait InterestStrategy: fmt::Debug {
    fn monthly_interest(&self, balance: Money) -> Result<Money>;
}

/// `balance * annual_rate / 12`, no compounding schedule
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(transparent)]
pub struct FlatAnnualRate(f64);

impl FlatAnnualRate {
    pub fn new(annual_rate: f64) -> Result<Self> {
        if !annual_rate.is_finite() || annual_rate < 0.0 {
            Err(LedgerError::Validation(format!(
                "Annual rate must be a finite number >= 0, got {annual_rate}"
            )))?
        }

        Ok(Self(annual_rate))
    }

    pub fn annual_rate(&self) -> f64 {
        self.0
    }
}

impl InterestStrategy for FlatAnnualRate {
    fn monthly_interest(&self, balance: Money) -> Result<Money> {
        Ok(balance.apply_rate(self.0 / 12.0)?)
    }
}

/// Variant-specific parameters. These decide the withdrawal policy and whether the account
/// bears interest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountTerms {
    Savings { annual_rate: FlatAnnualRate },
    Current { overdraft_limit: Money },
}

impl AccountTerms {
    pub fn savings(annual_rate: f64) -> Result<Self> {
        Ok(Self::Savings {
            annual_rate: FlatAnnualRate::new(annual_rate)?,
        })
    }

    pub fn current(overdraft_limit: Money) -> Result<Self> {
        let terms = Self::Current { overdraft_limit };
        terms.validate()?;

        Ok(terms)
    }

    pub fn kind(&self) -> AccountKind {
        match self {
            Self::Savings { .. } => AccountKind::Savings,
            Self::Current { .. } => AccountKind::Current,
        }
    }

    /// Checks parameters that may have bypassed the constructors, e.g. deserialized ones
    pub fn validate(&self) -> Result {
        match self {
            Self::Savings { annual_rate } => {
                FlatAnnualRate::new(annual_rate.annual_rate())?;
            }
            Self::Current { overdraft_limit } => {
                if overdraft_limit.is_negative() {
                    Err(LedgerError::Validation(format!(
                        "Overdraft limit must be >= 0, got {overdraft_limit}"
                    )))?
                }
            }
        }

        Ok(())
    }

    /// Withdrawal policy: may `amount` leave an account holding `balance`?
    pub fn can_withdraw(&self, balance: Money, amount: Money) -> bool {
        let remaining = balance.0 as i128 - amount.0 as i128;

        match self {
            Self::Savings { .. } => remaining >= 0,
            Self::Current { overdraft_limit } => remaining >= -(overdraft_limit.0 as i128),
        }
    }

    pub fn interest_strategy(&self) -> Option<&dyn InterestStrategy> {
        match self {
            Self::Savings { annual_rate } => Some(annual_rate),
            Self::Current { .. } => None,
        }
    }
}

#[derive(Debug)]
struct AccountState {
    balance: Money,
    terms: AccountTerms,
    ledger: Ledger,
}

/// A customer account. Balance, terms and ledger sit behind one lock, so every balance change
/// and its ledger entry land together.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    owner: CustomerId,
    journal: Journal,
    state: Mutex<AccountState>,
}

impl Account {
    /// Opens an account and records the opening balance as its first ledger entry
    pub fn open(
        id: AccountId,
        owner: CustomerId,
        terms: AccountTerms,
        opening_balance: Money,
        journal: Journal,
    ) -> Result<Self> {
        validate_opening_balance(opening_balance)?;
        terms.validate()?;

        let mut ledger = Ledger::new();
        ledger.append(journal.record(
            TransactionKind::Deposit,
            opening_balance,
            "Opening balance",
        ));

        log::debug!("Opened {} account {id} for {owner}", terms.kind());

        Ok(Self::assemble(id, owner, terms, opening_balance, ledger, journal))
    }

    /// Rebuilds an account from persisted state without recording anything new
    pub(crate) fn restore(
        id: AccountId,
        owner: CustomerId,
        terms: AccountTerms,
        balance: Money,
        history: Vec<Transaction>,
        journal: Journal,
    ) -> Self {
        Self::assemble(id, owner, terms, balance, Ledger::from_entries(history), journal)
    }

    fn assemble(
        id: AccountId,
        owner: CustomerId,
        terms: AccountTerms,
        balance: Money,
        ledger: Ledger,
        journal: Journal,
    ) -> Self {
        Self {
            id,
            kind: terms.kind(),
            owner,
            journal,
            state: Mutex::new(AccountState {
                balance,
                terms,
                ledger,
            }),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn owner(&self) -> &CustomerId {
        &self.owner
    }

    pub fn balance(&self) -> Money {
        self.state.lock().balance
    }

    pub fn terms(&self) -> AccountTerms {
        self.state.lock().terms
    }

    /// Copy of the ledger in insertion order
    pub fn history(&self) -> Vec<Transaction> {
        self.state.lock().ledger.entries().to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.state.lock().ledger.len()
    }

    pub fn find_transaction(&self, id: &TransactionId) -> Option<Transaction> {
        self.state.lock().ledger.get_by_id(id).cloned()
    }

    pub fn deposit(&self, amount: Money) -> Result<Money> {
        validate_amount(amount)?;

        let mut state = self.state.lock();

        let mut balance = state.balance;
        balance.add(&amount)?;

        state.balance = balance;
        state
            .ledger
            .append(self.journal.record(TransactionKind::Deposit, amount, "Cash deposit"));

        log::debug!("Deposited {amount} into {}, balance now {balance}", self.id);

        Ok(balance)
    }

    pub fn withdraw(&self, amount: Money) -> Result<Money> {
        validate_amount(amount)?;

        let mut state = self.state.lock();

        if !state.terms.can_withdraw(state.balance, amount) {
            Err(self.insufficient_funds(amount, state.balance))?
        }

        let mut balance = state.balance;
        balance.sub(&amount)?;

        state.balance = balance;
        state.ledger.append(self.journal.record(
            TransactionKind::Withdraw,
            amount,
            "Cash withdrawal",
        ));

        log::debug!("Withdrew {amount} from {}, balance now {balance}", self.id);

        Ok(balance)
    }

    /// Moves `amount` to `target` as one unit: either both balances change and both ledgers
    /// gain an entry, or nothing changes at all.
    ///
    /// Both locks are taken in account id order, whichever side the call starts from.
    pub fn transfer_to(&self, target: &Account, amount: Money) -> Result {
        if self.id == target.id {
            Err(LedgerError::Domain(format!(
                "Cannot transfer from {} to the same account",
                self.id
            )))?
        }

        validate_amount(amount)?;

        let (mut source, mut destination) = self.lock_pair(target);

        if !source.terms.can_withdraw(source.balance, amount) {
            Err(self.insufficient_funds(amount, source.balance))?
        }

        let mut source_balance = source.balance;
        let mut destination_balance = destination.balance;

        source_balance.sub(&amount)?;
        destination_balance.add(&amount)?;

        // Only apply once both sides are known to succeed
        source.balance = source_balance;
        source.ledger.append(self.journal.record(
            TransactionKind::TransferOut,
            amount,
            format!("To {}", target.id),
        ));

        destination.balance = destination_balance;
        destination.ledger.append(self.journal.record(
            TransactionKind::TransferIn,
            amount,
            format!("From {}", self.id),
        ));

        log::debug!("Transferred {amount} from {} to {}", self.id, target.id);

        Ok(())
    }

    pub fn is_interest_bearing(&self) -> bool {
        self.state.lock().terms.interest_strategy().is_some()
    }

    pub fn calculate_monthly_interest(&self) -> Result<Money> {
        let state = self.state.lock();

        let strategy = state
            .terms
            .interest_strategy()
            .ok_or_else(|| self.not_interest_bearing())?;

        strategy.monthly_interest(state.balance)
    }

    /// Credits one month of interest and returns the amount. A zero amount leaves the ledger
    /// untouched.
    pub fn apply_monthly_interest(&self) -> Result<Money> {
        let mut state = self.state.lock();

        let (interest, balance) = self.interest_credit(&state)?;
        self.credit_interest(&mut state, interest, balance);

        Ok(interest)
    }

    /// Credits one month of interest to every account in `accounts`, or to none of them if any
    /// credit fails. All locks are held for the whole sweep, taken in account id order.
    pub(crate) fn apply_monthly_interest_to_each(accounts: &[Arc<Account>]) -> Result {
        let mut ordered: Vec<&Account> = accounts.iter().map(Arc::as_ref).collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        ordered.dedup_by(|a, b| a.id == b.id);

        let mut states: Vec<_> = ordered.iter().map(|account| account.state.lock()).collect();

        let credits = ordered
            .iter()
            .zip(states.iter())
            .map(|(account, state)| account.interest_credit(state))
            .collect::<Result<Vec<_>>>()?;

        for ((account, state), (interest, balance)) in
            ordered.iter().zip(states.iter_mut()).zip(credits)
        {
            account.credit_interest(state, interest, balance);
        }

        Ok(())
    }

    /// Interest due on `state` and the balance it would leave, without applying anything
    fn interest_credit(&self, state: &AccountState) -> Result<(Money, Money)> {
        let interest = match state.terms.interest_strategy() {
            Some(strategy) => strategy.monthly_interest(state.balance)?,
            None => Err(self.not_interest_bearing())?,
        };

        let mut balance = state.balance;
        balance.add(&interest)?;

        Ok((interest, balance))
    }

    fn credit_interest(&self, state: &mut AccountState, interest: Money, balance: Money) {
        if interest == Money::ZERO {
            return;
        }

        state.balance = balance;
        state.ledger.append(self.journal.record(
            TransactionKind::Interest,
            interest,
            "Monthly interest",
        ));

        log::debug!("Applied {interest} interest to {}", self.id);
    }

    pub fn annual_rate(&self) -> Option<f64> {
        match self.state.lock().terms {
            AccountTerms::Savings { annual_rate } => Some(annual_rate.annual_rate()),
            AccountTerms::Current { .. } => None,
        }
    }

    pub fn set_annual_rate(&self, rate: f64) -> Result {
        let mut state = self.state.lock();

        match &mut state.terms {
            AccountTerms::Savings { annual_rate } => *annual_rate = FlatAnnualRate::new(rate)?,
            AccountTerms::Current { .. } => Err(LedgerError::Domain(format!(
                "{} is a current account and has no interest rate",
                self.id
            )))?,
        }

        Ok(())
    }

    pub fn overdraft_limit(&self) -> Option<Money> {
        match self.state.lock().terms {
            AccountTerms::Current { overdraft_limit } => Some(overdraft_limit),
            AccountTerms::Savings { .. } => None,
        }
    }

    /// Replaces the overdraft limit. A limit the current balance already breaches is rejected.
    pub fn set_overdraft_limit(&self, limit: Money) -> Result {
        let updated = AccountTerms::current(limit)?;

        let mut state = self.state.lock();

        if let AccountTerms::Savings { .. } = state.terms {
            Err(LedgerError::Domain(format!(
                "{} is a savings account and has no overdraft",
                self.id
            )))?
        }

        if !updated.can_withdraw(state.balance, Money::ZERO) {
            Err(LedgerError::Validation(format!(
                "Overdraft limit {limit} does not cover {} at balance {}",
                self.id, state.balance
            )))?
        }

        state.terms = updated;

        Ok(())
    }

    /// Balance, terms and history read under a single lock
    pub(crate) fn read_state(&self) -> (Money, AccountTerms, Vec<Transaction>) {
        let state = self.state.lock();

        (state.balance, state.terms, state.ledger.entries().to_vec())
    }

    fn lock_pair<'a>(
        &'a self,
        other: &'a Account,
    ) -> (MutexGuard<'a, AccountState>, MutexGuard<'a, AccountState>) {
        if self.id < other.id {
            let mine = self.state.lock();
            let theirs = other.state.lock();
            (mine, theirs)
        } else {
            let theirs = other.state.lock();
            let mine = self.state.lock();
            (mine, theirs)
        }
    }

    fn insufficient_funds(&self, requested: Money, available: Money) -> LedgerError {
        LedgerError::InsufficientFunds {
            account: self.id.clone(),
            requested,
            available,
        }
    }

    fn not_interest_bearing(&self) -> LedgerError {
        LedgerError::Domain(format!("{} does not bear interest", self.id))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} | {:<7} | {} | Bal: {}",
            self.id,
            self.kind.to_string(),
            self.owner,
            self.balance()
        )
    }
}

fn validate_amount(amount: Money) -> Result {
    if !amount.is_positive() {
        Err(LedgerError::Validation(format!("Amount must be > 0, got {amount}")))?
    }

    Ok(())
}

pub(crate) fn validate_opening_balance(opening_balance: Money) -> Result {
    if opening_balance.is_negative() {
        Err(LedgerError::InvalidArgument(format!(
            "Opening balance must be >= 0, got {opening_balance}"
        )))?
    }

    Ok(())
}
