//! Infrastructure layer: storage adapters, application services, config.

pub mod accounts;
pub mod config;
pub mod db;
pub mod error;
pub mod investment_store;
pub mod ledger;
pub mod user_store;

mod integration_tests;

pub use accounts::{AccountError, AccountService};
pub use config::{AppConfig, ConfigError, StorageConfig};
pub use error::StoreError;
pub use investment_store::{InMemoryInvestmentStore, InvestmentStore, PostgresInvestmentStore};
pub use ledger::{InvestmentLedger, LedgerError, Quote};
pub use user_store::{InMemoryUserStore, PostgresUserStore, UserStore};
