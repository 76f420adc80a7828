// Fleet Management System - Core Library
// Exposes the ledger, import, snapshot, and report modules for the CLI and tests

pub mod fleet;
pub mod import;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use fleet::{Boat, BoatType, ExpenseOutcome, Fleet, FleetError, FleetTotals};
pub use import::{import_fleet, parse_boat_line};
pub use report::{boat_line, fleet_report};
pub use store::{fetch_fleet, load_snapshot, persist_fleet, save_snapshot, setup_schema};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
