//! Ledger orders, receipts and the balance/holding checks shared by the
//! service pre-check and the storage layer's in-lock re-check.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger_errors::LedgerError;
use crate::errors::Result;
use crate::holdings::{Holding, NewHolding};
use crate::pricing::{self, SecurityType, Term};
use crate::transactions::{NewTransaction, Transaction, TransactionType};
use crate::users::User;

/// Whether `balance` covers `required`.
pub fn has_sufficient_balance(balance: Decimal, required: Decimal) -> bool {
    balance >= required
}

/// Fails with `InvalidAmount` unless `amount > 0`.
pub fn ensure_positive_amount(amount: Decimal, what: &str) -> std::result::Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{} must be greater than zero",
            what
        )));
    }
    Ok(())
}

/// `balance + amount`, or `InvalidAmount` when the sum leaves the decimal range.
pub fn credit(balance: Decimal, amount: Decimal) -> std::result::Result<Decimal, LedgerError> {
    balance.checked_add(amount).ok_or_else(|| {
        LedgerError::InvalidAmount(format!(
            "amount {:.2} overflows balance {:.2}",
            amount, balance
        ))
    })
}

/// `balance - amount`, or `InvalidAmount` when the difference leaves the decimal range.
pub fn debit(balance: Decimal, amount: Decimal) -> std::result::Result<Decimal, LedgerError> {
    balance.checked_sub(amount).ok_or_else(|| {
        LedgerError::InvalidAmount(format!(
            "amount {:.2} overflows balance {:.2}",
            amount, balance
        ))
    })
}

/// Fails with `InsufficientBalance` unless `user` can pay out `amount`.
pub fn ensure_withdrawable(user: &User, amount: Decimal) -> std::result::Result<(), LedgerError> {
    if !has_sufficient_balance(user.balance, amount) {
        return Err(LedgerError::InsufficientBalance(format!(
            "need {:.2}, available {:.2}",
            amount, user.balance
        )));
    }
    Ok(())
}

/// Fails unless `user_id` owns `holding` and it has `amount` left to sell.
pub fn ensure_sellable(
    holding: &Holding,
    user_id: i32,
    amount: Decimal,
) -> std::result::Result<(), LedgerError> {
    if holding.user_id != user_id {
        return Err(LedgerError::Forbidden(
            "holding does not belong to user".to_string(),
        ));
    }
    if amount > holding.remaining_amount {
        return Err(LedgerError::InvalidAmount(format!(
            "insufficient remaining amount: requested {:.2}, available {:.2}",
            amount, holding.remaining_amount
        )));
    }
    Ok(())
}

/// A validated, priced purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrder {
    pub user_id: i32,
    pub term: Term,
    pub security_type: SecurityType,
    pub face_value: Decimal,
    pub purchase_price: Decimal,
    pub yield_rate: Decimal,
}

impl PurchaseOrder {
    /// Validates the request and prices it.
    ///
    /// Checks run in order: term, face value, yield, then pricing (which
    /// also rejects yields above 100%). A yield so high that the discount
    /// swallows the whole face value is rejected as `InvalidYield`.
    pub fn new(user_id: i32, term: &str, face_value: Decimal, yield_rate: Decimal) -> Result<Self> {
        let term = term.parse::<Term>()?;
        ensure_positive_amount(face_value, "face value")?;
        if yield_rate < Decimal::ZERO {
            return Err(LedgerError::InvalidYield(
                "yield rate must be greater than or equal to zero".to_string(),
            )
            .into());
        }
        let purchase_price = pricing::purchase_price(face_value, yield_rate, term)?;
        if purchase_price <= Decimal::ZERO {
            return Err(LedgerError::InvalidYield(format!(
                "yield rate {} prices {} {} at {:.2}; purchase price must be greater than zero",
                yield_rate, face_value, term, purchase_price
            ))
            .into());
        }

        Ok(Self {
            user_id,
            term,
            security_type: term.security_type(),
            face_value,
            purchase_price,
            yield_rate,
        })
    }

    /// Amount below face value paid for the security.
    pub fn discount(&self) -> Decimal {
        pricing::bill_discount(self.face_value, self.purchase_price)
    }

    /// Fails with `InsufficientBalance` unless `user` can pay the purchase price.
    pub fn ensure_affordable(&self, user: &User) -> std::result::Result<(), LedgerError> {
        if !has_sufficient_balance(user.balance, self.purchase_price) {
            return Err(LedgerError::InsufficientBalance(format!(
                "need {:.2} for {} (face value: {:.2})",
                self.purchase_price,
                self.security_type.display_name(),
                self.face_value
            )));
        }
        Ok(())
    }

    pub fn to_new_holding(&self, purchase_date: NaiveDateTime) -> NewHolding {
        NewHolding {
            user_id: self.user_id,
            term: self.term,
            security_type: self.security_type,
            face_value: self.face_value,
            purchase_price: self.purchase_price,
            yield_at_purchase: self.yield_rate,
            purchase_date,
        }
    }

    pub fn to_new_transaction(&self, holding_id: i32, balance_after: Decimal) -> NewTransaction {
        NewTransaction {
            user_id: self.user_id,
            transaction_type: TransactionType::Buy,
            term: Some(self.term.to_string()),
            amount: self.purchase_price,
            yield_at_transaction: Some(self.yield_rate),
            balance_after,
            holding_id: Some(holding_id),
        }
    }
}

/// A validated request to sell principal out of a holding.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleOrder {
    pub user_id: i32,
    pub holding_id: i32,
    pub amount: Decimal,
    /// Instant the sale is priced at.
    pub as_of: NaiveDateTime,
}

impl SaleOrder {
    pub fn new(
        user_id: i32,
        holding_id: i32,
        amount: Decimal,
        as_of: NaiveDateTime,
    ) -> std::result::Result<Self, LedgerError> {
        ensure_positive_amount(amount, "amount")?;
        Ok(Self {
            user_id,
            holding_id,
            amount,
            as_of,
        })
    }

    /// Checks the sale against `holding` and returns the cash proceeds.
    ///
    /// Bills return the principal sold; the discount was realised at purchase.
    /// Notes and bonds return principal plus simple interest for the days held.
    pub fn quote(&self, holding: &Holding) -> Result<Decimal> {
        ensure_sellable(holding, self.user_id, self.amount)?;
        match holding.resolve_security_type()? {
            SecurityType::Bill => Ok(self.amount),
            SecurityType::Note | SecurityType::Bond => {
                if self.as_of < holding.purchase_date {
                    return Err(LedgerError::InvalidState(
                        "invalid holding: purchase date is in the future".to_string(),
                    )
                    .into());
                }
                let days_held = (self.as_of - holding.purchase_date).num_days();
                Ok(pricing::maturity_value(
                    self.amount,
                    holding.yield_at_purchase,
                    days_held,
                )?)
            }
        }
    }

    pub fn to_new_transaction(&self, holding: &Holding, balance_after: Decimal) -> NewTransaction {
        NewTransaction {
            user_id: self.user_id,
            transaction_type: TransactionType::Sell,
            term: Some(holding.term.clone()),
            amount: self.amount,
            yield_at_transaction: Some(holding.yield_at_purchase),
            balance_after,
            holding_id: Some(holding.id),
        }
    }
}

/// Outcome of a fund or withdraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub user: User,
    pub transaction: Transaction,
}

/// Outcome of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub user: User,
    pub holding: Holding,
    pub transaction: Transaction,
    pub face_value: Decimal,
    pub purchase_price: Decimal,
    pub discount: Decimal,
}

/// Outcome of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReceipt {
    pub user: User,
    pub holding: Holding,
    pub transaction: Transaction,
    pub proceeds: Decimal,
}
