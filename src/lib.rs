pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod operations;
pub mod session;
pub mod terminal;

pub use error::{LedgerError, Result};
pub use ledger::{Filter, Ledger, Period, ProductType, Record, Status, Unit};
pub use session::Session;
