use super::{PartitionWriter, CLEAN_ARTIFACT, DAILY_TOTALS_ARTIFACT, REJECTED_ARTIFACT};

use std::fs;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tempfile::tempdir;

use crate::aggregation::Aggregator;
use crate::models::{CanonicalTransaction, RawRecord};
use crate::types::{AccountId, Amount, Timestamp};

fn partition_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

fn create_transaction(transaction_id: &str, account_id: AccountId, amount: &str) -> Result<CanonicalTransaction> {
    Ok(CanonicalTransaction {
        transaction_id: transaction_id.to_string(),
        timestamp: Timestamp::from_str("2024-03-01T10:15:30")?,
        account_id,
        amount: Amount::from_str(amount)?.round_to_cents(),
        currency: "GBP".to_string(),
        merchant: "Marks, Spencer".to_string(),
        category: "Retail".to_string(),
        country: "UK".to_string()
    })
}

#[test]
fn test_writer_materializes_all_three_artifacts() -> Result<()> {
    let directory = tempdir()?;
    let writer = PartitionWriter::new(directory.path());

    let clean = vec![
        create_transaction("tx-1", 100, "10.00")?,
        create_transaction("tx-2", 100, "15.5")?,
    ];
    let rejected = vec![
        RawRecord::default().with_field("transaction_id", "tx-3").with_field("amount", "-10.00"),
    ];
    let aggregates = clean.iter().collect::<Aggregator>().finish();

    let location = writer.write(partition_date(), &clean, &rejected, &aggregates)?;

    assert_eq!(location.root, directory.path().join("date=2024-03-05"));
    assert_eq!(location.clean_rows, 2);
    assert_eq!(location.rejected_rows, 1);
    assert_eq!(location.daily_totals_rows, 1);

    let clean_contents = fs::read_to_string(&location.clean)?;

    assert_eq!(
        clean_contents,
        "transaction_id,timestamp,account_id,amount,currency,merchant,category,country\n\
         tx-1,2024-03-01T10:15:30,100,10.00,GBP,\"Marks, Spencer\",Retail,UK\n\
         tx-2,2024-03-01T10:15:30,100,15.50,GBP,\"Marks, Spencer\",Retail,UK\n"
    );

    let rejected_path = location.rejected.ok_or_else(|| anyhow!("rejected artifact missing"))?;

    assert_eq!(fs::read_to_string(rejected_path)?, "transaction_id,amount\ntx-3,-10.00\n");
    assert_eq!(
        fs::read_to_string(&location.daily_totals)?,
        "account_id,date,total_amount,transaction_count\n100,2024-03-01,25.50,2\n"
    );

    Ok(())
}

#[test]
fn test_empty_run_writes_header_only_artifacts_and_no_rejects() -> Result<()> {
    let directory = tempdir()?;
    let writer = PartitionWriter::new(directory.path());

    let location = writer.write(partition_date(), &[], &[], &[])?;

    assert!(location.rejected.is_none());
    assert!(!location.root.join(REJECTED_ARTIFACT).exists());
    assert_eq!(
        fs::read_to_string(location.root.join(CLEAN_ARTIFACT))?,
        "transaction_id,timestamp,account_id,amount,currency,merchant,category,country\n"
    );
    assert_eq!(
        fs::read_to_string(location.root.join(DAILY_TOTALS_ARTIFACT))?,
        "account_id,date,total_amount,transaction_count\n"
    );

    Ok(())
}

#[test]
fn test_rewrite_without_rejects_removes_stale_rejected_artifact() -> Result<()> {
    let directory = tempdir()?;
    let writer = PartitionWriter::new(directory.path());
    let rejected = vec![RawRecord::default().with_field("transaction_id", "tx-9")];

    let first = writer.write(partition_date(), &[], &rejected, &[])?;

    assert!(first.root.join(REJECTED_ARTIFACT).exists());

    let second = writer.write(partition_date(), &[], &[], &[])?;

    assert!(second.rejected.is_none());
    assert!(!second.root.join(REJECTED_ARTIFACT).exists());

    Ok(())
}

#[test]
fn test_rewrite_replaces_rather_than_appends() -> Result<()> {
    let directory = tempdir()?;
    let writer = PartitionWriter::new(directory.path());
    let clean = vec![create_transaction("tx-1", 7, "1.00")?];
    let aggregates = clean.iter().collect::<Aggregator>().finish();

    let first = writer.write(partition_date(), &clean, &[], &aggregates)?;
    let first_clean = fs::read(&first.clean)?;
    let first_totals = fs::read(&first.daily_totals)?;

    let second = writer.write(partition_date(), &clean, &[], &aggregates)?;

    assert_eq!(fs::read(&second.clean)?, first_clean);
    assert_eq!(fs::read(&second.daily_totals)?, first_totals);
    assert_eq!(fs::read_dir(&second.root)?.count(), 2);

    Ok(())
}

#[test]
fn test_rejected_header_follows_first_rejected_record() -> Result<()> {
    let directory = tempdir()?;
    let writer = PartitionWriter::new(directory.path());
    let rejected = vec![
        RawRecord::default().with_field("transaction_id", "tx-1").with_field("amount", "abc"),
        RawRecord::default().with_field("amount", "-1").with_field("merchant", "dropped").with_field("transaction_id", "tx-2"),
        RawRecord::default().with_field("transaction_id", "tx-3"),
    ];

    let location = writer.write(partition_date(), &[], &rejected, &[])?;
    let rejected_path = location.rejected.ok_or_else(|| anyhow!("rejected artifact missing"))?;

    assert_eq!(
        fs::read_to_string(rejected_path)?,
        "transaction_id,amount\ntx-1,abc\ntx-2,-1\ntx-3,\n"
    );

    Ok(())
}

#[test]
fn test_write_into_unwritable_root_fails() -> Result<()> {
    let directory = tempdir()?;
    let blocker = directory.path().join("not-a-directory");
    fs::write(&blocker, "occupied")?;

    let writer = PartitionWriter::new(&blocker);

    assert!(writer.write(partition_date(), &[], &[], &[]).is_err());

    Ok(())
}
