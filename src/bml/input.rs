use crate::ids::{AccountId, CustomerId};
use crate::{AccountKind, LedgerError, Money};
use crate::money::MoneyError;

use serde::Deserialize;

use thiserror::Error;

/// Represents one row of a command script, as a CSV record would deserialize into
#[derive(Deserialize, Debug, Clone)]
pub struct InputCommand {
    pub command: InputCommandType,

    pub customer: Option<String>,
    pub account: Option<String>,
    pub target: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputCommandType {
    Customer,
    Open,
    Deposit,
    Withdraw,
    Transfer,
    Interest,
    History,
    Customers,
    Accounts,
}

#[derive(Error, Debug)]
pub enum InputParseError {
    #[error("Error parsing input command: {0} missing from {1:?}")]
    MissingField(&'static str, InputCommand),

    #[error("Error parsing input command: invalid amount: {0}")]
    Amount(#[from] MoneyError),

    #[error("Error parsing input command: {0}")]
    Ledger(#[from] LedgerError),
}

/// Typed command, forcing correct handling through the type-system
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateCustomer {
        name: String,
        email: String,
    },
    OpenAccount {
        kind: AccountKind,
        customer_id: CustomerId,
        opening_balance: Money,
    },
    Deposit {
        account_id: AccountId,
        amount: Money,
    },
    Withdraw {
        account_id: AccountId,
        amount: Money,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Money,
    },
    ApplyInterest,
    History {
        account_id: AccountId,
    },
    ListCustomers,
    ListAccounts,
}

impl InputCommand {
    pub fn parse_command(self) -> Result<Command, InputParseError> {
        let command = match self.command {
            InputCommandType::Customer => Command::CreateCustomer {
                name: self.require(&self.name, "name")?,
                email: self.require(&self.email, "email")?,
            },
            InputCommandType::Open => {
                let kind = self.require(&self.kind, "kind")?.parse::<AccountKind>()?;

                let opening_balance = match &self.amount {
                    Some(amount) => Money::parse(amount)?,
                    None => Money::ZERO,
                };

                Command::OpenAccount {
                    kind,
                    customer_id: CustomerId::from(self.require(&self.customer, "customer")?),
                    opening_balance,
                }
            }
            InputCommandType::Deposit => Command::Deposit {
                account_id: AccountId::from(self.require(&self.account, "account")?),
                amount: self.require_amount()?,
            },
            InputCommandType::Withdraw => Command::Withdraw {
                account_id: AccountId::from(self.require(&self.account, "account")?),
                amount: self.require_amount()?,
            },
            InputCommandType::Transfer => Command::Transfer {
                from: AccountId::from(self.require(&self.account, "account")?),
                to: AccountId::from(self.require(&self.target, "target")?),
                amount: self.require_amount()?,
            },
            InputCommandType::Interest => Command::ApplyInterest,
            InputCommandType::History => Command::History {
                account_id: AccountId::from(self.require(&self.account, "account")?),
            },
            InputCommandType::Customers => Command::ListCustomers,
            InputCommandType::Accounts => Command::ListAccounts,
        };

        Ok(command)
    }

    fn require(&self, field: &Option<String>, name: &'static str) -> Result<String, InputParseError> {
        field
            .clone()
            .ok_or_else(|| InputParseError::MissingField(name, self.clone()))
    }

    fn require_amount(&self) -> Result<Money, InputParseError> {
        let amount = self.require(&self.amount, "amount")?;

        Ok(Money::parse(&amount)?)
    }
}
