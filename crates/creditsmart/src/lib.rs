//! Core of the CreditSmart site: the credit product catalog, money formatting, the loan
//! amortization calculator, the simulator filter engine, and the loan application workflow.

pub mod amortization;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod telemetry;
pub mod workflows;
