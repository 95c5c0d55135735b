//! Ledger module - fund, withdraw, buy and sell as atomic balance changes.

mod ledger_errors;
mod ledger_model;
mod ledger_service;
mod ledger_traits;


pub use ledger_errors::LedgerError;
pub use ledger_model::{
    credit, debit, ensure_positive_amount, ensure_sellable, ensure_withdrawable,
    has_sufficient_balance, LedgerEntry, PurchaseOrder, PurchaseReceipt, SaleOrder, SaleReceipt,
};
pub use ledger_service::LedgerService;
pub use ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
