use crate::clock::{Clock, SystemClock};
use crate::ids::{AccountId, CustomerId, IdAllocator, TransactionId};
use crate::journal::Journal;
use crate::snapshot::{AccountRecord, BankSnapshot};
use crate::{
    Account, AccountFactory, AccountKind, AccountReport, Customer, LedgerError, Money, Repository,
    Result,
};

use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_BANK_NAME: &str = "OOP National Bank";

/// Aggregate owning every customer and account. Accounts point at their owner by id only.
#[derive(Debug)]
pub struct Bank {
    name: String,
    journal: Journal,
    customers: Repository<Customer>,
    accounts: Repository<Account>,
}

impl Bank {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, Arc::new(SystemClock))
    }

    pub fn with_clock(name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            name: name.into(),
            journal: Journal::new(Arc::new(IdAllocator::new()), clock),
            customers: Repository::new(),
            accounts: Repository::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_customer(&self, name: impl Into<String>, email: impl Into<String>) -> Arc<Customer> {
        let id = CustomerId::from(self.journal.ids().next(CustomerId::PREFIX));
        let customer = self.customers.save(Customer::new(id, name, email));

        log::debug!("Created customer {customer}");

        customer
    }

    pub fn update_customer(
        &self,
        id: &CustomerId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Arc<Customer>> {
        self.customers
            .update(id, |current| {
                let mut customer = current.clone();

                if let Some(name) = name {
                    customer.set_name(name);
                }

                if let Some(email) = email {
                    customer.set_email(email);
                }

                customer
            })
            .ok_or_else(|| LedgerError::NotFound(format!("Customer {id}")))
    }

    pub fn open_account(
        &self,
        kind: AccountKind,
        customer_id: &CustomerId,
        opening_balance: Money,
    ) -> Result<Arc<Account>> {
        if !self.customers.exists(customer_id) {
            Err(LedgerError::NotFound(format!("Customer {customer_id}")))?
        }

        let account = AccountFactory::create(kind, customer_id.clone(), opening_balance, &self.journal)?;

        Ok(self.accounts.save(account))
    }

    pub fn find_account(&self, id: &AccountId) -> Option<Arc<Account>> {
        self.accounts.find(id)
    }

    pub fn find_customer(&self, id: &CustomerId) -> Option<Arc<Customer>> {
        self.customers.find(id)
    }

    pub fn all_accounts(&self) -> Vec<Arc<Account>> {
        self.accounts.all()
    }

    pub fn all_customers(&self) -> Vec<Arc<Customer>> {
        self.customers.all()
    }

    /// Resolves both accounts and moves `amount` between them atomically
    pub fn transfer(&self, from: &AccountId, to: &AccountId, amount: Money) -> Result {
        let source = self.require_account(from)?;
        let target = self.require_account(to)?;

        source.transfer_to(&target, amount)
    }

    /// Applies one month of interest to every interest-bearing account. Other accounts are
    /// skipped. If any balance cannot absorb its interest, no account is credited.
    pub fn apply_monthly_interest_to_all_savings(&self) -> Result {
        let savings: Vec<_> = self
            .accounts
            .all()
            .into_iter()
            .filter(|account| account.is_interest_bearing())
            .collect();

        Account::apply_monthly_interest_to_each(&savings)?;

        log::debug!("Applied monthly interest to {} accounts", savings.len());

        Ok(())
    }

    pub fn build_report(&self) -> Vec<AccountReport> {
        self.accounts
            .all()
            .iter()
            .map(|account| AccountReport {
                account: account.id().to_string(),
                kind: account.kind().to_string(),
                owner: account.owner().to_string(),
                balance: account.balance().to_string(),
                transactions: account.history_len(),
            })
            .collect()
    }

    pub fn snapshot(&self) -> BankSnapshot {
        BankSnapshot {
            name: self.name.clone(),
            customers: self
                .customers
                .all()
                .iter()
                .map(|customer| customer.as_ref().clone())
                .collect(),
            accounts: self
                .accounts
                .all()
                .iter()
                .map(|account| AccountRecord::from(account.as_ref()))
                .collect(),
        }
    }

    /// Rebuilds a bank from a snapshot. Identities issued afterwards continue past the highest
    /// restored identity of each kind.
    ///
    /// Every account must satisfy its own withdrawal policy, and no transaction id may appear
    /// twice across the whole snapshot.
    pub fn restore(snapshot: BankSnapshot, clock: Arc<dyn Clock>) -> Result<Self> {
        let bank = Self::with_clock(snapshot.name, clock);
        let mut transactions = HashSet::new();

        for customer in snapshot.customers {
            bank.observe_id(CustomerId::PREFIX, customer.id().as_str())?;

            if bank.customers.exists(customer.id()) {
                Err(LedgerError::Validation(format!("Duplicate customer {}", customer.id())))?
            }

            bank.customers.save(customer);
        }

        for record in snapshot.accounts {
            bank.observe_id(AccountId::PREFIX, record.id.as_str())?;

            if bank.accounts.exists(&record.id) {
                Err(LedgerError::Validation(format!("Duplicate account {}", record.id)))?
            }

            if !bank.customers.exists(&record.owner) {
                Err(LedgerError::NotFound(format!(
                    "Customer {} owning {}",
                    record.owner, record.id
                )))?
            }

            record.terms.validate()?;

            if !record.terms.can_withdraw(record.balance, Money::ZERO) {
                Err(LedgerError::Validation(format!(
                    "Balance {} of {} breaks its {} account terms",
                    record.balance,
                    record.id,
                    record.terms.kind()
                )))?
            }

            for tx in record.history.iter() {
                bank.observe_id(TransactionId::PREFIX, tx.id().as_str())?;

                if !transactions.insert(tx.id().clone()) {
                    Err(LedgerError::Validation(format!(
                        "Duplicate transaction {} in {}",
                        tx.id(),
                        record.id
                    )))?
                }
            }

            bank.accounts.save(Account::restore(
                record.id,
                record.owner,
                record.terms,
                record.balance,
                record.history,
                bank.journal.clone(),
            ));
        }

        log::debug!(
            "Restored {} customers and {} accounts into {}",
            bank.customers.len(),
            bank.accounts.len(),
            bank.name
        );

        Ok(bank)
    }

    /// Like `find_account`, but an unknown id is a `NotFound` error
    pub fn require_account(&self, id: &AccountId) -> Result<Arc<Account>> {
        self.find_account(id)
            .ok_or_else(|| LedgerError::NotFound(format!("Account {id}")))
    }

    fn observe_id(&self, prefix: &str, id: &str) -> Result {
        if !self.journal.ids().observe(prefix, id) {
            Err(LedgerError::Validation(format!(
                "Malformed identity {id:?}, expected prefix {prefix}"
            )))?
        }

        Ok(())
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new(DEFAULT_BANK_NAME)
    }
}
