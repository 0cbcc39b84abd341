//! Internal testing utilities for the budgetgoat workspace.
//!
//! Provides the [`TestWorld`] environment builder for CLI integration
//! tests and fixture helpers for seeding the ledger with deterministic
//! data.

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
