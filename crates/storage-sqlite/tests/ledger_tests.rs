//! Ledger behaviour against a real SQLite database.

use std::sync::Arc;

use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use treasury_core::holdings::HoldingLot;
use treasury_core::ledger::{LedgerError, LedgerService, LedgerServiceTrait};
use treasury_core::pricing::SecurityType;
use treasury_core::transactions::TransactionType;
use treasury_core::users::{NewUser, UserRepositoryTrait};
use treasury_core::Error;
use treasury_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, HoldingRepository, LedgerRepository,
    TransactionRepository, UserRepository, WriteHandle,
};

struct TestDb {
    _dir: TempDir,
    users: Arc<UserRepository>,
    ledger: Arc<LedgerService>,
    writer: WriteHandle,
}

async fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("treasury.db");
    let path = init(path.to_str().unwrap()).unwrap();
    let pool = create_pool(&path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(&pool).unwrap();

    let users = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let ledger = Arc::new(LedgerService::new(
        users.clone(),
        Arc::new(HoldingRepository::new(pool.clone())),
        Arc::new(TransactionRepository::new(pool.clone())),
        Arc::new(LedgerRepository::new(writer.clone())),
    ));

    TestDb {
        _dir: dir,
        users,
        ledger,
        writer,
    }
}

impl TestDb {
    async fn user(&self, balance: Decimal) -> i32 {
        self.users
            .create(NewUser::new("Test Investor", balance))
            .await
            .unwrap()
            .id
    }

    fn balance(&self, user_id: i32) -> Decimal {
        self.users.find_by_id(user_id).unwrap().unwrap().balance
    }
}

#[tokio::test]
async fn test_seeded_demo_users() {
    let db = setup().await;
    let users = db.users.list().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.balance > Decimal::ZERO));
    assert!(users.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_buy_six_month_bill_scenario() {
    let db = setup().await;
    let user_id = db.user(dec!(500000)).await;

    let receipt = db
        .ledger
        .buy_treasury(user_id, "6M", dec!(100000), dec!(4.5))
        .await
        .unwrap();

    assert_eq!(receipt.purchase_price, dec!(97750.00));
    assert_eq!(receipt.discount, dec!(2250.00));
    assert_eq!(receipt.user.balance, dec!(402250.00));
    assert_eq!(db.balance(user_id), dec!(402250.00));

    let holdings = db.ledger.list_holdings(user_id).unwrap();
    assert_eq!(holdings.len(), 1);
    let holding = &holdings[0];
    assert_eq!(holding.id, receipt.holding.id);
    assert_eq!(holding.term, "6M");
    assert_eq!(holding.security_type, Some(SecurityType::Bill));
    assert_eq!(holding.face_value(), dec!(100000));
    assert_eq!(holding.purchase_price(), dec!(97750));
    assert_eq!(holding.remaining_amount, dec!(100000));
    assert_eq!(holding.yield_at_purchase, dec!(4.5));

    let txs = db.ledger.list_transactions(user_id).unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].transaction_type, TransactionType::Buy);
    assert_eq!(txs[0].amount, dec!(97750));
    assert_eq!(txs[0].balance_after, dec!(402250));
    assert_eq!(txs[0].holding_id, Some(holding.id));
    assert_eq!(txs[0].term.as_deref(), Some("6M"));
}

#[tokio::test]
async fn test_failed_buy_changes_nothing() {
    let db = setup().await;
    let user_id = db.user(dec!(1000)).await;

    let err = db
        .ledger
        .buy_treasury(user_id, "6M", dec!(100000), dec!(4.5))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "insufficient balance: need 97750.00 for Treasury Bill (face value: 100000.00)"
    );
    assert_eq!(db.balance(user_id), dec!(1000));
    assert!(db.ledger.list_holdings(user_id).unwrap().is_empty());
    assert!(db.ledger.list_transactions(user_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_fund_and_withdraw_net_zero_with_ordered_timestamps() {
    let db = setup().await;
    let user_id = db.user(dec!(250.25)).await;

    for _ in 0..10 {
        db.ledger.fund(user_id, dec!(100.10)).await.unwrap();
        db.ledger.withdraw(user_id, dec!(100.10)).await.unwrap();
    }

    assert_eq!(db.balance(user_id), dec!(250.25));

    let mut txs = db.ledger.list_transactions(user_id).unwrap();
    assert_eq!(txs.len(), 20);
    assert_eq!(txs[0].transaction_type, TransactionType::Withdraw);
    txs.reverse();
    assert!(txs.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert!(txs.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(txs[0].balance_after, dec!(350.35));
}

#[tokio::test]
async fn test_withdraw_more_than_balance() {
    let db = setup().await;
    let user_id = db.user(dec!(50)).await;

    let result = db.ledger.withdraw(user_id, dec!(50.01)).await;

    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::InsufficientBalance(_)))
    ));
    assert_eq!(db.balance(user_id), dec!(50));
}

#[tokio::test]
async fn test_unknown_user() {
    let db = setup().await;

    let err = db.ledger.fund(9999, dec!(10)).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "user 9999 not found");
}

#[tokio::test]
async fn test_sell_down_to_zero_then_reject() {
    let db = setup().await;
    let user_id = db.user(dec!(20000)).await;
    let receipt = db
        .ledger
        .buy_treasury(user_id, "3M", dec!(10000), dec!(4.0))
        .await
        .unwrap();
    let holding_id = receipt.holding.id;
    let after_buy = db.balance(user_id);
    assert_eq!(after_buy, dec!(20000) - receipt.purchase_price);

    let first = db
        .ledger
        .sell_treasury(user_id, holding_id, dec!(4000))
        .await
        .unwrap();
    assert_eq!(first.proceeds, dec!(4000));
    assert_eq!(first.holding.remaining_amount, dec!(6000));

    let second = db
        .ledger
        .sell_treasury(user_id, holding_id, dec!(6000))
        .await
        .unwrap();
    assert_eq!(second.holding.remaining_amount, Decimal::ZERO);
    assert!(!second.holding.is_active());
    assert_eq!(db.balance(user_id), after_buy + dec!(10000));

    let err = db
        .ledger
        .sell_treasury(user_id, holding_id, dec!(1))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "insufficient remaining amount: requested 1.00, available 0.00"
    );

    let sells: Vec<_> = db
        .ledger
        .list_transactions(user_id)
        .unwrap()
        .into_iter()
        .filter(|t| t.transaction_type == TransactionType::Sell)
        .collect();
    assert_eq!(sells.len(), 2);
    assert!(sells.iter().all(|t| t.holding_id == Some(holding_id)));
}

#[tokio::test]
async fn test_sell_note_on_purchase_day_returns_principal() {
    let db = setup().await;
    let user_id = db.user(dec!(10000)).await;
    let receipt = db
        .ledger
        .buy_treasury(user_id, "2Y", dec!(5000), dec!(4.2))
        .await
        .unwrap();
    assert_eq!(receipt.purchase_price, dec!(5000));
    assert_eq!(receipt.discount, Decimal::ZERO);

    let sale = db
        .ledger
        .sell_treasury(user_id, receipt.holding.id, dec!(2500))
        .await
        .unwrap();

    assert_eq!(sale.proceeds, dec!(2500));
    assert_eq!(db.balance(user_id), dec!(7500));
}

#[tokio::test]
async fn test_sell_someone_elses_holding() {
    let db = setup().await;
    let owner = db.user(dec!(20000)).await;
    let other = db.user(dec!(20000)).await;
    let receipt = db
        .ledger
        .buy_treasury(owner, "1M", dec!(10000), dec!(4.0))
        .await
        .unwrap();

    let result = db
        .ledger
        .sell_treasury(other, receipt.holding.id, dec!(100))
        .await;

    assert!(matches!(result, Err(Error::Ledger(LedgerError::Forbidden(_)))));
    assert_eq!(db.balance(other), dec!(20000));
    let holding = &db.ledger.list_holdings(owner).unwrap()[0];
    assert_eq!(holding.remaining_amount, dec!(10000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_withdrawals_never_overdraw() {
    let db = setup().await;
    let user_id = db.user(dec!(1000)).await;

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let ledger = db.ledger.clone();
            tokio::spawn(async move { ledger.withdraw(user_id, dec!(100)).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(Error::Ledger(LedgerError::InsufficientBalance(_))) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(succeeded, 10);
    assert_eq!(db.balance(user_id), Decimal::ZERO);
    assert_eq!(db.ledger.list_transactions(user_id).unwrap().len(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sells_never_oversell() {
    let db = setup().await;
    let user_id = db.user(dec!(20000)).await;
    let holding_id = db
        .ledger
        .buy_treasury(user_id, "1Y", dec!(10000), dec!(4.0))
        .await
        .unwrap()
        .holding
        .id;

    let handles: Vec<_> = (0..15)
        .map(|_| {
            let ledger = db.ledger.clone();
            tokio::spawn(async move { ledger.sell_treasury(user_id, holding_id, dec!(1000)).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(Error::Ledger(LedgerError::InvalidAmount(_))) => {}
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(succeeded, 10);
    let holding = &db.ledger.list_holdings(user_id).unwrap()[0];
    assert_eq!(holding.remaining_amount, Decimal::ZERO);
}

#[tokio::test]
async fn test_legacy_holding_row() {
    let db = setup().await;
    let user_id = db.user(dec!(0)).await;

    db.writer
        .exec(move |conn| {
            diesel::sql_query(
                "INSERT INTO holdings (user_id, term, amount, yield_at_purchase, purchase_date, remaining_amount)
                 VALUES (?, '3M', '2500', '3.9', '2024-01-05 15:00:00', '2500')",
            )
            .bind::<diesel::sql_types::Integer, _>(user_id)
            .execute(conn)
            .map_err(treasury_storage_sqlite::StorageError::from)?;
            Ok(())
        })
        .await
        .unwrap();

    let holdings = db.ledger.list_holdings(user_id).unwrap();
    assert_eq!(holdings.len(), 1);
    let holding = &holdings[0];
    assert_eq!(holding.lot, HoldingLot::Legacy { amount: dec!(2500) });
    assert_eq!(holding.security_type, None);
    assert_eq!(holding.resolve_security_type().unwrap(), SecurityType::Bill);

    let sale = db
        .ledger
        .sell_treasury(user_id, holding.id, dec!(500))
        .await
        .unwrap();
    assert_eq!(sale.proceeds, dec!(500));
    assert_eq!(sale.holding.remaining_amount, dec!(2000));
}

#[tokio::test]
async fn test_balance_check_constraint_is_a_backstop() {
    let db = setup().await;
    let user_id = db.user(dec!(10)).await;

    let err = db
        .writer
        .exec(move |conn| {
            diesel::sql_query("UPDATE users SET balance = '-5' WHERE id = ?")
                .bind::<diesel::sql_types::Integer, _>(user_id)
                .execute(conn)
                .map_err(treasury_storage_sqlite::StorageError::from)?;
            Ok(())
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Ledger(LedgerError::InsufficientBalance(_))
    ));
    assert_eq!(db.balance(user_id), dec!(10));
}

#[tokio::test]
async fn test_failed_job_rolls_back_earlier_statements() {
    let db = setup().await;
    let user_id = db.user(dec!(10)).await;

    let result: treasury_core::Result<()> = db
        .writer
        .exec(move |conn| {
            diesel::sql_query("UPDATE users SET balance = '99' WHERE id = ?")
                .bind::<diesel::sql_types::Integer, _>(user_id)
                .execute(conn)
                .map_err(treasury_storage_sqlite::StorageError::from)?;
            Err(LedgerError::InvalidState("abort".to_string()).into())
        })
        .await;

    assert!(matches!(result, Err(Error::Ledger(LedgerError::InvalidState(_)))));
    assert_eq!(db.balance(user_id), dec!(10));
}

#[tokio::test]
async fn test_delete_user_removes_history() {
    let db = setup().await;
    let user_id = db.user(dec!(20000)).await;
    db.ledger
        .buy_treasury(user_id, "1M", dec!(1000), dec!(4.0))
        .await
        .unwrap();

    assert_eq!(db.users.delete(user_id).await.unwrap(), 1);
    assert!(db.users.find_by_id(user_id).unwrap().is_none());
    assert!(db.ledger.list_holdings(user_id).unwrap().is_empty());
    assert!(db.ledger.list_transactions(user_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_fund_past_decimal_range_leaves_writer_usable() {
    let db = setup().await;
    let half = Decimal::MAX / dec!(2) + dec!(1);
    let rich = db.user(half).await;
    let other = db.user(dec!(0)).await;

    let err = db.ledger.fund(rich, half).await.unwrap_err();
    assert!(matches!(err, Error::Ledger(LedgerError::InvalidAmount(_))));
    assert_eq!(db.balance(rich), half);
    assert!(db.ledger.list_transactions(rich).unwrap().is_empty());

    let user = db.ledger.fund(other, dec!(1)).await.unwrap();
    assert_eq!(user.balance, dec!(1));
}

#[tokio::test]
async fn test_panicking_job_rolls_back_and_writer_keeps_running() {
    let db = setup().await;
    let user_id = db.user(dec!(10)).await;

    let err = db
        .writer
        .exec(move |conn| -> treasury_core::Result<()> {
            diesel::sql_query("UPDATE users SET balance = '99' WHERE id = ?")
                .bind::<diesel::sql_types::Integer, _>(user_id)
                .execute(conn)
                .map_err(treasury_storage_sqlite::StorageError::from)?;
            panic!("boom");
        })
        .await
        .unwrap_err();
    assert!(err.to_string().contains("boom"));
    assert_eq!(db.balance(user_id), dec!(10));

    let user = db.ledger.fund(user_id, dec!(5)).await.unwrap();
    assert_eq!(user.balance, dec!(15));
}
