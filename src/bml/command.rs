use crate::input::Command;
use crate::{Bank, Result};

impl Command {
    /// Runs the command against `bank`. A failed command leaves the bank unchanged.
    ///
    /// Listing commands return the lines they list; every other command returns none.
    pub fn execute(self, bank: &Bank) -> Result<Vec<String>> {
        log::debug!("Executing command: {self:?}");

        let mut lines = Vec::new();

        match self {
            Command::CreateCustomer { name, email } => {
                let customer = bank.create_customer(name, email);
                log::info!("Created: {customer}");
            }

            Command::OpenAccount {
                kind,
                customer_id,
                opening_balance,
            } => {
                let account = bank.open_account(kind, &customer_id, opening_balance)?;
                log::info!("Opened: {account}");
            }

            Command::Deposit { account_id, amount } => {
                let account = bank.require_account(&account_id)?;

                let balance = account.deposit(amount)?;
                log::info!("Deposited {amount} into {account_id}, new balance: {balance}");
            }

            Command::Withdraw { account_id, amount } => {
                let account = bank.require_account(&account_id)?;

                let balance = account.withdraw(amount)?;
                log::info!("Withdrew {amount} from {account_id}, new balance: {balance}");
            }

            Command::Transfer { from, to, amount } => {
                bank.transfer(&from, &to, amount)?;
                log::info!("Transferred {amount} from {from} to {to}");
            }

            Command::ApplyInterest => {
                bank.apply_monthly_interest_to_all_savings()?;
                log::info!("Interest applied to all savings accounts");
            }

            Command::History { account_id } => {
                let account = bank.require_account(&account_id)?;

                lines.push(format!("History for {account_id}:"));
                lines.extend(account.history().iter().map(|tx| format!("  {tx}")));
            }

            Command::ListCustomers => {
                lines.push("Customers:".to_string());
                lines.extend(bank.all_customers().iter().map(|c| format!("  {c}")));
            }

            Command::ListAccounts => {
                lines.push("Accounts:".to_string());
                lines.extend(bank.all_accounts().iter().map(|a| format!("  {a}")));
            }
        }

        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::FixedClock;
    use crate::ids::{AccountId, CustomerId};
    use crate::{AccountKind, ErrorKind, Money, DEFAULT_BANK_NAME};

    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn execute_script() {
        let bank = Bank::default();

        let commands = vec![
            Command::CreateCustomer {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            },
            Command::OpenAccount {
                kind: AccountKind::Savings,
                customer_id: CustomerId::from("CUST00001"),
                opening_balance: Money::from_whole(1_000),
            },
            Command::OpenAccount {
                kind: AccountKind::Current,
                customer_id: CustomerId::from("CUST00001"),
                opening_balance: Money::ZERO,
            },
            Command::Deposit {
                account_id: AccountId::from("ACC00001"),
                amount: Money::from_whole(200),
            },
            Command::Transfer {
                from: AccountId::from("ACC00001"),
                to: AccountId::from("ACC00002"),
                amount: Money::from_whole(1_200),
            },
            Command::Withdraw {
                account_id: AccountId::from("ACC00002"),
                amount: Money::from_whole(2_000),
            },
        ];

        for command in commands {
            assert!(command.execute(&bank).unwrap().is_empty());
        }

        let savings = bank.find_account(&AccountId::from("ACC00001")).unwrap();
        let current = bank.find_account(&AccountId::from("ACC00002")).unwrap();

        assert_eq!(savings.balance(), Money::ZERO);
        assert_eq!(current.balance(), Money::from_whole(-800));
    }

    #[test]
    fn list_history_customers_and_accounts() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
        let bank = Bank::with_clock(DEFAULT_BANK_NAME, Arc::new(clock));

        let alice = bank.create_customer("Alice", "alice@example.com");
        bank.create_customer("Bob", "bob@example.com");

        let account = bank
            .open_account(AccountKind::Current, alice.id(), Money::from_whole(50))
            .unwrap();
        account.withdraw(Money::from_whole(80)).unwrap();

        let history = Command::History {
            account_id: AccountId::from("ACC00001"),
        }
        .execute(&bank)
        .unwrap();

        assert_eq!(
            history,
            vec![
                "History for ACC00001:",
                "  TXN00001 | 2024-05-01 10:00:00 | DEPOSIT | 50.0000 | Opening balance",
                "  TXN00002 | 2024-05-01 10:00:00 | WITHDRAW | 80.0000 | Cash withdrawal",
            ]
        );

        assert_eq!(
            Command::ListCustomers.execute(&bank).unwrap(),
            vec![
                "Customers:",
                "  CUST00001 — Alice (alice@example.com)",
                "  CUST00002 — Bob (bob@example.com)",
            ]
        );

        assert_eq!(
            Command::ListAccounts.execute(&bank).unwrap(),
            vec!["Accounts:", "  ACC00001 | CURRENT | CUST00001 | Bal: -30.0000"]
        );

        assert_eq!(account.history_len(), 2);
    }

    #[test]
    fn fail_on_unknown_account() {
        let bank = Bank::default();

        let res = Command::Deposit {
            account_id: AccountId::from("ACC00001"),
            amount: Money::from_whole(1),
        }
        .execute(&bank);

        assert_eq!(res.unwrap_err().kind(), ErrorKind::NotFound);

        let res = Command::History {
            account_id: AccountId::from("ACC00001"),
        }
        .execute(&bank);

        assert_eq!(res.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
