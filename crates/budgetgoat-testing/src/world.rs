//! TestWorld pattern for declarative integration test setup.
//!
//! Provides an isolated data directory per test and a runner that drives
//! the `budgetgoat` binary against it.

use anyhow::{Context, Result};
use assert_cmd::Command;
use assert_cmd::assert::Assert;
use budgetgoat_ledger::{Database, NewTransaction};
use budgetgoat_types::{Pocket, Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment for CLI and ledger integration tests.
///
/// # Example
/// ```no_run
/// use budgetgoat_testing::TestWorld;
///
/// let world = TestWorld::new();
/// world.run(&["init"]).success();
/// world.run(&["pocket", "add", "Vacation"]).success();
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".budgetgoat");

        Self { temp_dir, data_dir }
    }

    /// Get the data directory path (.budgetgoat).
    ///
    /// Not created until `init` runs or a seed helper touches it.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Run the `budgetgoat` binary with this world's data directory.
    pub fn run(&self, args: &[&str]) -> Assert {
        let mut cmd = Command::cargo_bin("budgetgoat").expect("budgetgoat binary not built");
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .args(args)
            .env_remove("BUDGETGOAT_PATH");
        cmd.assert()
    }

    /// Open the world's ledger database directly, creating the data
    /// directory if needed.
    pub fn open_db(&self) -> Result<Database> {
        std::fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating {}", self.data_dir.display()))?;
        let db = Database::open(&self.data_dir.join("budgetgoat.db"))
            .context("opening seeded ledger database")?;
        Ok(db)
    }

    /// Seed a pocket through the ledger crate, bypassing the CLI.
    pub fn seed_pocket(&self, name: &str, target_cents: Option<i64>) -> Result<Pocket> {
        let db = self.open_db()?;
        let pocket = db
            .create_pocket(name, target_cents)
            .context("seeding pocket")?;
        Ok(pocket)
    }

    /// Seed a transaction through the ledger crate, bypassing the CLI.
    pub fn seed_transaction(
        &self,
        pocket: &Pocket,
        kind: TransactionKind,
        amount_cents: i64,
        timestamp: DateTime<Utc>,
    ) -> Result<Transaction> {
        let db = self.open_db()?;
        let tx = db
            .record_transaction(
                &NewTransaction::new(pocket.id, kind, amount_cents).at(timestamp),
            )
            .context("seeding transaction")?;
        Ok(tx)
    }
}
