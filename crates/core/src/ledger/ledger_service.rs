use log::{debug, info};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ledger_errors::LedgerError;
use super::ledger_model::{
    ensure_positive_amount, ensure_withdrawable, PurchaseOrder, PurchaseReceipt, SaleOrder,
    SaleReceipt,
};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::errors::Result;
use crate::holdings::{Holding, HoldingRepositoryTrait};
use crate::transactions::{Transaction, TransactionRepositoryTrait};
use crate::users::{User, UserRepositoryTrait};
use crate::utils::time_utils::ledger_now;

/// Service for cash movements and treasury trades.
///
/// Every write runs a lock-free pre-check here for an early, descriptive
/// error, then hands off to the repository, which repeats the same check
/// under its write lock before mutating.
pub struct LedgerService {
    user_repository: Arc<dyn UserRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
}

impl LedgerService {
    pub fn new(
        user_repository: Arc<dyn UserRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    ) -> Self {
        Self {
            user_repository,
            holding_repository,
            transaction_repository,
            ledger_repository,
        }
    }

    fn load_user(&self, user_id: i32) -> Result<User> {
        self.user_repository
            .find_by_id(user_id)?
            .ok_or_else(|| LedgerError::NotFound(format!("user {} not found", user_id)).into())
    }

    fn load_holding(&self, holding_id: i32) -> Result<Holding> {
        self.holding_repository
            .find_by_id(holding_id)?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("holding {} not found", holding_id)).into()
            })
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn fund(&self, user_id: i32, amount: Decimal) -> Result<User> {
        ensure_positive_amount(amount, "amount")?;
        let entry = self.ledger_repository.deposit(user_id, amount).await?;
        info!(
            "Funded user {} with {:.2}, balance now {:.2}",
            user_id, amount, entry.user.balance
        );
        Ok(entry.user)
    }

    async fn withdraw(&self, user_id: i32, amount: Decimal) -> Result<User> {
        ensure_positive_amount(amount, "amount")?;
        let user = self.load_user(user_id)?;
        ensure_withdrawable(&user, amount)?;

        let entry = self.ledger_repository.withdraw(user_id, amount).await?;
        info!(
            "Withdrew {:.2} for user {}, balance now {:.2}",
            amount, user_id, entry.user.balance
        );
        Ok(entry.user)
    }

    async fn buy_treasury(
        &self,
        user_id: i32,
        term: &str,
        face_value: Decimal,
        current_yield: Decimal,
    ) -> Result<PurchaseReceipt> {
        let order = PurchaseOrder::new(user_id, term, face_value, current_yield)?;
        debug!(
            "Priced {} {} for user {}: face {:.2}, price {:.2}",
            order.term, order.security_type, user_id, order.face_value, order.purchase_price
        );

        let user = self.load_user(user_id)?;
        order.ensure_affordable(&user)?;

        let receipt = self.ledger_repository.purchase(order).await?;
        info!(
            "User {} bought {} holding {} for {:.2}",
            user_id, receipt.holding.term, receipt.holding.id, receipt.purchase_price
        );
        Ok(receipt)
    }

    async fn sell_treasury(
        &self,
        user_id: i32,
        holding_id: i32,
        amount: Decimal,
    ) -> Result<SaleReceipt> {
        let order = SaleOrder::new(user_id, holding_id, amount, ledger_now())?;
        let holding = self.load_holding(holding_id)?;
        let proceeds = order.quote(&holding)?;
        debug!(
            "Quoted sale of {:.2} from holding {} at {:.2}",
            amount, holding_id, proceeds
        );

        let receipt = self.ledger_repository.sell(order).await?;
        info!(
            "User {} sold {:.2} of holding {} for {:.2}",
            user_id, amount, holding_id, receipt.proceeds
        );
        Ok(receipt)
    }

    fn list_transactions(&self, user_id: i32) -> Result<Vec<Transaction>> {
        self.transaction_repository.list_by_user(user_id)
    }

    fn list_holdings(&self, user_id: i32) -> Result<Vec<Holding>> {
        self.holding_repository.list_by_user(user_id)
    }
}
