use bml::AccountReport;

use std::{env, fs, path::Path, path::PathBuf, process::Command};

use csv::{ReaderBuilder, Trim};

fn run_binary(args: &[&Path]) -> Vec<AccountReport> {
    // Running the binary directly to prove everything works as expected
    let output = Command::new(env!("CARGO_BIN_EXE_bank-ledger"))
        .args(args)
        .output()
        .unwrap();

    println!("{}", String::from_utf8(output.stderr).unwrap());
    assert!(output.status.success());

    let output = String::from_utf8(output.stdout).unwrap();

    let mut output_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(output.as_bytes());

    output_reader
        .deserialize()
        .map(|record| record.unwrap())
        .collect()
}

fn read_expected(expected_file: &Path) -> Vec<AccountReport> {
    let mut expected_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(expected_file)
        .unwrap();

    expected_reader
        .deserialize()
        .map(|record| record.unwrap())
        .collect()
}

#[test]
fn example_files() {
    let input_dir = PathBuf::from("./resources/test-examples/inputs");
    let expected_dir = PathBuf::from("./resources/test-examples/expected");

    // Running test for each file in input_dir
    let files_to_test = fs::read_dir(input_dir.clone()).unwrap().count();

    for idx in 1..=files_to_test {
        let input_file = input_dir.join(format!("commands_{idx}.csv"));
        let expected_file = expected_dir.join(format!("accounts_{idx}.csv"));

        println!("Testing input: {input_file:?}");
        println!("Expected: {expected_file:?}");

        let mut actual = run_binary(&[&input_file]);
        let mut expected = read_expected(&expected_file);

        // Sort to ensure order doesn't matter
        actual.sort();
        expected.sort();

        assert_eq!(actual, expected);
    }
}

#[test]
fn state_file_carries_over_between_runs() {
    let input_file = PathBuf::from("./resources/test-examples/inputs/commands_1.csv");
    let state_file = env::temp_dir().join(format!("bank-ledger-state-{}.json", std::process::id()));

    let _ = fs::remove_file(&state_file);

    let first = run_binary(&[&input_file, &state_file]);
    assert_eq!(first.len(), 3);
    assert!(state_file.exists());

    // Same script again: new customers and accounts continue the id sequences, while the
    // deposit, withdrawal and transfer land on the restored accounts
    let second = run_binary(&[&input_file, &state_file]);

    let _ = fs::remove_file(&state_file);

    let rows: Vec<(&str, &str, &str, usize)> = second
        .iter()
        .map(|report| {
            (
                report.account.as_str(),
                report.owner.as_str(),
                report.balance.as_str(),
                report.transactions,
            )
        })
        .collect();

    assert_eq!(
        rows,
        vec![
            ("ACC00001", "CUST00001", "26000.0000", 5),
            ("ACC00002", "CUST00001", "3000.0000", 3),
            ("ACC00003", "CUST00002", "18000.0000", 3),
            ("ACC00004", "CUST00001", "25000.0000", 1),
            ("ACC00005", "CUST00001", "5000.0000", 1),
            ("ACC00006", "CUST00002", "15000.0000", 1),
        ]
    );
}

#[test]
fn listings_go_to_stderr() {
    let output = Command::new(env!("CARGO_BIN_EXE_bank-ledger"))
        .arg("./resources/test-examples/inputs/commands_4.csv")
        .output()
        .unwrap();

    assert!(output.status.success());

    let listings = String::from_utf8(output.stderr).unwrap();
    println!("{listings}");

    assert!(listings.contains("Customers:\n  CUST00001 — Carol (carol@example.com)\n"));
    assert!(listings.contains("Accounts:\n  ACC00001 | CURRENT | CUST00001 | Bal: -200.0000\n"));
    assert!(listings.contains("History for ACC00001:\n"));
    assert!(listings.contains("| DEPOSIT | 100.0000 | Opening balance\n"));
    assert!(listings.contains("| WITHDRAW | 300.0000 | Cash withdrawal\n"));
    assert!(!listings.contains("History for ACC00009:"));

    let report = String::from_utf8(output.stdout).unwrap();
    assert!(!report.contains("History for"));
}

#[test]
fn missing_command_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_bank-ledger"))
        .arg("./resources/test-examples/inputs/does_not_exist.csv")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
