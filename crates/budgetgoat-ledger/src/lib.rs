// NOTE: Ledger Design Rationale
//
// Why SQLite (not a document per pocket)?
// - Monthly aggregates and category rollups are one GROUP BY away;
//   recomputing them from JSON files would re-read the whole history
// - A single file under the data directory keeps backup/restore trivial
//
// Why balance maintenance inside the database transaction?
// - The pocket balance is denormalized (kept on the pockets row) so list
//   views never scan the transaction table
// - Writing the transaction row and applying the signed amount in one
//   SQL transaction means a mid-operation failure can never leave the
//   balance out of step with the rows that back it
//
// Why RFC 3339 TEXT timestamps?
// - Lexicographic order matches chronological order, so month filters
//   reduce to substr(ts, 1, 7) comparisons and range scans stay sane

mod db;
mod error;
mod records;

pub use db::Database;
pub use error::{Error, Result};
pub use records::{CategoryTotal, NewTransaction};
