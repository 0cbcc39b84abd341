// NOTE: budgetgoat Architecture Rationale
//
// Why a denormalized pocket balance (not recomputed per view)?
// - `pocket list` is the hottest path; keeping the balance on the row
//   makes it a single index-free scan of a tiny table
// - The ledger maintains the balance inside the same SQL transaction as
//   the row write, so the denormalization cannot drift
//
// Why process-local diagnostics (not a log file)?
// - Every handler reports through the in-process ring buffer; the buffer
//   is dumped on demand (--diagnostics) or summarized by `doctor`
// - A storage failure can therefore still be diagnosed: collection has
//   no filesystem dependency
//
// Why best-effort preferences (not the database)?
// - Preferences are cosmetic; a corrupt or unreadable value must degrade
//   to a default, never block a command. The storage accessor owns that
//   contract

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod output;
pub mod types;

pub use args::{Cli, Commands, PocketCommand, PrefsCommand, TxCommand};
pub use commands::run;
