use crate::ids::{AccountId, CustomerId};
use crate::{Account, AccountTerms, Customer, Money, Transaction};

use serde::{Deserialize, Serialize};

/// Everything a persistence layer must keep to rebuild a `Bank`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BankSnapshot {
    pub name: String,
    pub customers: Vec<Customer>,
    pub accounts: Vec<AccountRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub owner: CustomerId,
    pub balance: Money,
    pub terms: AccountTerms,
    pub history: Vec<Transaction>,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        let (balance, terms, history) = account.read_state();

        Self {
            id: account.id().clone(),
            owner: account.owner().clone(),
            balance,
            terms,
            history,
        }
    }
}
