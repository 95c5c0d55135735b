//! Pricing module - pure bill/note/bond pricing functions.

mod pricing_calculator;
mod pricing_errors;
mod pricing_model;


pub use pricing_calculator::{
    bill_discount, bill_price, maturity_value, note_bond_price, purchase_price, round2,
    security_type, term_duration_days,
};
pub use pricing_errors::PricingError;
pub use pricing_model::{SecurityType, Term};
