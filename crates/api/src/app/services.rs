//! Store selection and application services shared by all handlers.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use accrue_auth::{Hs256Jwt, PasswordHasher};
use accrue_infra::{
    AccountService, AppConfig, InMemoryInvestmentStore, InMemoryUserStore, InvestmentLedger,
    InvestmentStore, PostgresInvestmentStore, PostgresUserStore, StorageConfig, UserStore, db,
};

pub type SharedLedger = InvestmentLedger<Arc<dyn InvestmentStore>>;
pub type SharedAccounts = AccountService<Arc<dyn UserStore>>;

pub struct AppServices {
    pub ledger: SharedLedger,
    pub accounts: SharedAccounts,
    pub jwt: Arc<Hs256Jwt>,
}

impl AppServices {
    pub fn new(
        investments: Arc<dyn InvestmentStore>,
        users: Arc<dyn UserStore>,
        jwt: Hs256Jwt,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            ledger: InvestmentLedger::new(investments),
            accounts: AccountService::new(users, hasher),
            jwt: Arc::new(jwt),
        }
    }

    /// Fresh in-memory stores; nothing survives the process.
    pub fn in_memory(jwt: Hs256Jwt, hasher: PasswordHasher) -> Self {
        Self::new(
            Arc::new(InMemoryInvestmentStore::new()),
            Arc::new(InMemoryUserStore::new()),
            jwt,
            hasher,
        )
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let jwt = Hs256Jwt::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let hasher = PasswordHasher::default();

    match &config.storage {
        StorageConfig::InMemory => {
            info!("using in-memory stores");
            Ok(AppServices::in_memory(jwt, hasher))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = db::connect(database_url, *max_connections)
                .await
                .context("failed to connect to postgres")?;
            db::ensure_schema(&pool)
                .await
                .context("failed to create schema")?;
            info!(max_connections, "using postgres stores");

            Ok(AppServices::new(
                Arc::new(PostgresInvestmentStore::new(pool.clone())),
                Arc::new(PostgresUserStore::new(pool)),
                jwt,
                hasher,
            ))
        }
    }
}
