use crate::records::{CategoryTotal, NewTransaction};
use crate::{Error, Result};
use budgetgoat_types::{MonthKey, MonthlySummary, Pocket, Transaction, TransactionKind};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use uuid::Uuid;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS pockets (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                balance_cents INTEGER NOT NULL DEFAULT 0,
                target_cents INTEGER,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                pocket_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                amount_cents INTEGER NOT NULL,
                note TEXT,
                category TEXT,
                ts TEXT NOT NULL,
                FOREIGN KEY (pocket_id) REFERENCES pockets(id)
            );

            CREATE INDEX IF NOT EXISTS idx_tx_pocket ON transactions(pocket_id);
            CREATE INDEX IF NOT EXISTS idx_tx_ts ON transactions(ts DESC);
            "#,
        )?;

        Ok(())
    }

    // ==========================================
    // Pockets
    // ==========================================

    pub fn create_pocket(&self, name: &str, target_cents: Option<i64>) -> Result<Pocket> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Query("pocket name must not be empty".to_string()));
        }
        if let Some(target) = target_cents
            && target <= 0
        {
            return Err(Error::Query("pocket target must be positive".to_string()));
        }
        if self.find_pocket_by_name(name)?.is_some() {
            return Err(Error::Query(format!("pocket '{}' already exists", name)));
        }

        let now = Utc::now();
        let pocket = Pocket {
            id: Uuid::new_v4(),
            name: name.to_string(),
            balance_cents: 0,
            target_cents,
            created_at: now,
            updated_at: now,
        };

        self.conn.execute(
            r#"
            INSERT INTO pockets (id, name, balance_cents, target_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                pocket.id.to_string(),
                pocket.name,
                pocket.balance_cents,
                pocket.target_cents,
                fmt_ts(&pocket.created_at),
                fmt_ts(&pocket.updated_at),
            ],
        )?;

        Ok(pocket)
    }

    pub fn get_pocket(&self, id: Uuid) -> Result<Option<Pocket>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, balance_cents, target_cents, created_at, updated_at
                 FROM pockets WHERE id = ?1",
                params![id.to_string()],
                read_pocket_row,
            )
            .optional()?;

        row.map(PocketRow::into_pocket).transpose()
    }

    pub fn find_pocket_by_name(&self, name: &str) -> Result<Option<Pocket>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, balance_cents, target_cents, created_at, updated_at
                 FROM pockets WHERE name = ?1",
                params![name],
                read_pocket_row,
            )
            .optional()?;

        row.map(PocketRow::into_pocket).transpose()
    }

    /// Resolve a pocket from a CLI-style selector: a UUID first, then an
    /// exact name.
    pub fn resolve_pocket(&self, selector: &str) -> Result<Pocket> {
        if let Ok(id) = Uuid::parse_str(selector)
            && let Some(pocket) = self.get_pocket(id)?
        {
            return Ok(pocket);
        }
        if let Some(pocket) = self.find_pocket_by_name(selector)? {
            return Ok(pocket);
        }
        Err(Error::Query(format!("no pocket matching '{}'", selector)))
    }

    pub fn list_pockets(&self) -> Result<Vec<Pocket>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, balance_cents, target_cents, created_at, updated_at
             FROM pockets ORDER BY name ASC",
        )?;

        let rows = stmt.query_map([], read_pocket_row)?;
        let mut pockets = Vec::new();
        for row in rows {
            pockets.push(row?.into_pocket()?);
        }
        Ok(pockets)
    }

    pub fn count_pockets(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM pockets", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn set_pocket_target(&self, id: Uuid, target_cents: Option<i64>) -> Result<()> {
        if let Some(target) = target_cents
            && target <= 0
        {
            return Err(Error::Query("pocket target must be positive".to_string()));
        }

        let updated = self.conn.execute(
            "UPDATE pockets SET target_cents = ?1, updated_at = ?2 WHERE id = ?3",
            params![target_cents, fmt_ts(&Utc::now()), id.to_string()],
        )?;
        if updated == 0 {
            return Err(Error::Query(format!("unknown pocket: {}", id)));
        }
        Ok(())
    }

    /// Delete a pocket and all of its transactions in one SQL transaction.
    pub fn delete_pocket(&self, id: Uuid) -> Result<()> {
        let db_tx = self.conn.unchecked_transaction()?;

        db_tx.execute(
            "DELETE FROM transactions WHERE pocket_id = ?1",
            params![id.to_string()],
        )?;
        let deleted = db_tx.execute("DELETE FROM pockets WHERE id = ?1", params![id.to_string()])?;
        if deleted == 0 {
            return Err(Error::Query(format!("unknown pocket: {}", id)));
        }

        db_tx.commit()?;
        Ok(())
    }

    // ==========================================
    // Transactions
    // ==========================================

    /// Insert a transaction row and apply its signed amount to the pocket
    /// balance atomically. A failure at any point rolls both back.
    pub fn record_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        if new.amount_cents <= 0 {
            return Err(Error::Query(format!(
                "transaction amount must be positive, got {}",
                new.amount_cents
            )));
        }

        let tx = Transaction {
            id: Uuid::new_v4(),
            pocket_id: new.pocket_id,
            kind: new.kind,
            amount_cents: new.amount_cents,
            note: new.note.clone(),
            category: new.category.clone(),
            timestamp: new.timestamp,
        };

        let db_tx = self.conn.unchecked_transaction()?;

        let updated = db_tx.execute(
            "UPDATE pockets SET balance_cents = balance_cents + ?1, updated_at = ?2 WHERE id = ?3",
            params![
                tx.signed_amount_cents(),
                fmt_ts(&Utc::now()),
                tx.pocket_id.to_string()
            ],
        )?;
        if updated == 0 {
            return Err(Error::Query(format!("unknown pocket: {}", tx.pocket_id)));
        }

        db_tx.execute(
            r#"
            INSERT INTO transactions (id, pocket_id, kind, amount_cents, note, category, ts)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                tx.id.to_string(),
                tx.pocket_id.to_string(),
                tx.kind.as_str(),
                tx.amount_cents,
                tx.note,
                tx.category,
                fmt_ts(&tx.timestamp),
            ],
        )?;

        db_tx.commit()?;
        Ok(tx)
    }

    pub fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, pocket_id, kind, amount_cents, note, category, ts
                 FROM transactions WHERE id = ?1",
                params![id.to_string()],
                read_transaction_row,
            )
            .optional()?;

        row.map(TransactionRow::into_transaction).transpose()
    }

    /// Delete a transaction and revert its effect on the pocket balance
    /// atomically. Returns the removed transaction.
    pub fn delete_transaction(&self, id: Uuid) -> Result<Transaction> {
        let Some(tx) = self.get_transaction(id)? else {
            return Err(Error::Query(format!("unknown transaction: {}", id)));
        };

        let db_tx = self.conn.unchecked_transaction()?;

        db_tx.execute(
            "DELETE FROM transactions WHERE id = ?1",
            params![id.to_string()],
        )?;
        db_tx.execute(
            "UPDATE pockets SET balance_cents = balance_cents - ?1, updated_at = ?2 WHERE id = ?3",
            params![
                tx.signed_amount_cents(),
                fmt_ts(&Utc::now()),
                tx.pocket_id.to_string()
            ],
        )?;

        db_tx.commit()?;
        Ok(tx)
    }

    /// Transactions newest first, optionally filtered by pocket and month.
    pub fn list_transactions(
        &self,
        pocket_id: Option<Uuid>,
        month: Option<&MonthKey>,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, pocket_id, kind, amount_cents, note, category, ts
            FROM transactions
            WHERE (?1 IS NULL OR pocket_id = ?1)
              AND (?2 IS NULL OR substr(ts, 1, 7) = ?2)
            ORDER BY ts DESC, id DESC
            LIMIT ?3
            "#,
        )?;

        let rows = stmt.query_map(
            params![
                pocket_id.map(|id| id.to_string()),
                month.map(|m| m.as_str().to_string()),
                i64::try_from(limit).unwrap_or(i64::MAX),
            ],
            read_transaction_row,
        )?;

        let mut transactions = Vec::new();
        for row in rows {
            transactions.push(row?.into_transaction()?);
        }
        Ok(transactions)
    }

    // ==========================================
    // Aggregates
    // ==========================================

    pub fn monthly_summary(&self, month: &MonthKey) -> Result<MonthlySummary> {
        let (deposits_cents, withdrawals_cents, transaction_count) = self.conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'deposit' THEN amount_cents ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN kind = 'withdrawal' THEN amount_cents ELSE 0 END), 0),
                COUNT(*)
            FROM transactions
            WHERE substr(ts, 1, 7) = ?1
            "#,
            params![month.as_str()],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        Ok(MonthlySummary {
            month: month.clone(),
            deposits_cents,
            withdrawals_cents,
            net_cents: deposits_cents - withdrawals_cents,
            transaction_count: transaction_count as usize,
        })
    }

    /// Withdrawal totals per category for one month, largest first.
    /// Uncategorized withdrawals are grouped under "uncategorized".
    pub fn category_totals(&self, month: &MonthKey) -> Result<Vec<CategoryTotal>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT COALESCE(category, 'uncategorized') AS category, SUM(amount_cents) AS total
            FROM transactions
            WHERE kind = 'withdrawal' AND substr(ts, 1, 7) = ?1
            GROUP BY category
            ORDER BY total DESC, category ASC
            "#,
        )?;

        let rows = stmt.query_map(params![month.as_str()], |row| {
            Ok(CategoryTotal {
                category: row.get(0)?,
                total_cents: row.get(1)?,
            })
        })?;

        let mut totals = Vec::new();
        for row in rows {
            totals.push(row?);
        }
        Ok(totals)
    }
}

// ==========================================
// Row mapping
// ==========================================

struct PocketRow {
    id: String,
    name: String,
    balance_cents: i64,
    target_cents: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl PocketRow {
    fn into_pocket(self) -> Result<Pocket> {
        Ok(Pocket {
            id: parse_uuid(&self.id)?,
            name: self.name,
            balance_cents: self.balance_cents,
            target_cents: self.target_cents,
            created_at: parse_ts(&self.created_at)?,
            updated_at: parse_ts(&self.updated_at)?,
        })
    }
}

fn read_pocket_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PocketRow> {
    Ok(PocketRow {
        id: row.get(0)?,
        name: row.get(1)?,
        balance_cents: row.get(2)?,
        target_cents: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

struct TransactionRow {
    id: String,
    pocket_id: String,
    kind: String,
    amount_cents: i64,
    note: Option<String>,
    category: Option<String>,
    ts: String,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction> {
        Ok(Transaction {
            id: parse_uuid(&self.id)?,
            pocket_id: parse_uuid(&self.pocket_id)?,
            kind: self
                .kind
                .parse::<TransactionKind>()
                .map_err(Error::Query)?,
            amount_cents: self.amount_cents,
            note: self.note,
            category: self.category,
            timestamp: parse_ts(&self.ts)?,
        })
    }
}

fn read_transaction_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TransactionRow> {
    Ok(TransactionRow {
        id: row.get(0)?,
        pocket_id: row.get(1)?,
        kind: row.get(2)?,
        amount_cents: row.get(3)?,
        note: row.get(4)?,
        category: row.get(5)?,
        ts: row.get(6)?,
    })
}

fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| Error::Query(format!("invalid stored timestamp '{}': {}", raw, err)))
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|err| Error::Query(format!("invalid stored id '{}': {}", raw, err)))
}
