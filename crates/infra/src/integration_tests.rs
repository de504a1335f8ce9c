//! End-to-end tests across accounts, ledger and stores.
//!
//! Pipeline: register → authenticate → record → list
//!
//! The Postgres variants run only when `DATABASE_URL` is set.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use accrue_auth::PasswordHasher;
    use accrue_investments::{InvestmentError, InvestmentSubmission};

    use crate::accounts::{AccountError, AccountService};
    use crate::investment_store::{InMemoryInvestmentStore, InvestmentStore, PostgresInvestmentStore};
    use crate::ledger::{InvestmentLedger, LedgerError};
    use crate::user_store::{InMemoryUserStore, PostgresUserStore, UserStore};

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(8, 1, 1).unwrap()
    }

    async fn run_flow<U, I>(accounts: AccountService<U>, ledger: InvestmentLedger<I>, email: &str)
    where
        U: UserStore,
        I: InvestmentStore,
    {
        let user = accounts.register(email, "correct horse").await.unwrap();
        let authed = accounts.authenticate(email, "correct horse").await.unwrap();
        assert_eq!(authed, user);

        let first = ledger
            .record(user.id, &InvestmentSubmission::new("1000", "5", "2", "simple"))
            .await
            .unwrap();
        let second = ledger
            .record(user.id, &InvestmentSubmission::new("1000", "5", "2", "compound"))
            .await
            .unwrap();

        let rejected = ledger
            .record(user.id, &InvestmentSubmission::new("1000", "5", "2", "annual"))
            .await
            .unwrap_err();
        assert!(matches!(
            rejected,
            LedgerError::Invalid(InvestmentError::UnrecognizedKind(_))
        ));

        let listed = ledger.list(user.id).await.unwrap();
        assert_eq!(listed, vec![first, second]);
        assert!((listed[0].total_amount() - 1100.0).abs() < 1e-9);
        assert!((listed[1].total_amount() - 1102.5).abs() < 1e-9);

        let dup = accounts.register(email, "another password").await.unwrap_err();
        assert!(matches!(dup, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn in_memory_register_record_list() {
        let accounts = AccountService::new(Arc::new(InMemoryUserStore::new()), fast_hasher());
        let ledger = InvestmentLedger::new(Arc::new(InMemoryInvestmentStore::new()));

        run_flow(accounts, ledger, "alice@example.com").await;
    }

    #[tokio::test]
    async fn owners_do_not_see_each_others_records() {
        let accounts = AccountService::new(Arc::new(InMemoryUserStore::new()), fast_hasher());
        let ledger = InvestmentLedger::new(Arc::new(InMemoryInvestmentStore::new()));

        let a = accounts.register("a@example.com", "password-a").await.unwrap();
        let b = accounts.register("b@example.com", "password-b").await.unwrap();

        for amount in ["100", "200"] {
            ledger
                .record(a.id, &InvestmentSubmission::new(amount, "5", "1", "simple"))
                .await
                .unwrap();
        }
        ledger
            .record(b.id, &InvestmentSubmission::new("300", "5", "1", "compound"))
            .await
            .unwrap();

        let a_amounts: Vec<f64> = ledger
            .list(a.id)
            .await
            .unwrap()
            .iter()
            .map(|inv| inv.amount())
            .collect();
        assert_eq!(a_amounts, vec![100.0, 200.0]);
        assert_eq!(ledger.list(b.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn postgres_register_record_list() {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping postgres integration test");
            return;
        };

        let pool = crate::db::connect(&url, 2).await.unwrap();
        crate::db::ensure_schema(&pool).await.unwrap();

        let accounts = AccountService::new(PostgresUserStore::new(pool.clone()), fast_hasher());
        let ledger = InvestmentLedger::new(PostgresInvestmentStore::new(pool));

        let email = format!("it-{}@example.com", uuid::Uuid::now_v7());
        run_flow(accounts, ledger, &email).await;
    }
}
