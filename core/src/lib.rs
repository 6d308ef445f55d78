//! fillscout-core — survey targeting, lifecycle, and reward ledger.
//!
//! RULES:
//!   - Only the store module talks to SQLite. Domain modules call store
//!     methods — they never execute SQL directly.
//!   - Statuses and plan tiers are closed enums; their string forms exist
//!     only at the store boundary.
//!   - Shared counters (responses collected, wallet balances) change through
//!     single conditional statements, never read-then-write sequences.

pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod matcher;
pub mod platform;
pub mod profile;
pub mod reward;
pub mod store;
pub mod survey;
pub mod types;
