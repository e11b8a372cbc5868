//! Fixed-installment (French) amortization.
//!
//! `payment = P * (i * (1 + i)^n) / ((1 + i)^n - 1)` with `i = annual_rate / 12` and `n` the
//! number of monthly installments. A zero rate degenerates to `P / n`; a term long enough for
//! `(1 + i)^n` to overflow converges to the interest-only installment `P * i`.

use serde::{Deserialize, Serialize};

/// Monthly installment rounded to the nearest peso (half away from zero).
///
/// Returns `0` when there is nothing to amortize: zero principal, zero term, or a rate that is
/// negative or not finite.
pub fn monthly_payment(principal: u64, annual_rate: f64, term_months: u32) -> u64 {
    if principal == 0 || term_months == 0 || !annual_rate.is_finite() || annual_rate < 0.0 {
        return 0;
    }

    let principal = principal as f64;
    let periods = f64::from(term_months);
    let monthly_rate = annual_rate / 12.0;

    // (1 + i)^n - 1, kept exact for rates too small to register next to 1.0.
    let growth_minus_one = (periods * monthly_rate.ln_1p()).exp_m1();

    let payment = if growth_minus_one <= 0.0 {
        principal / periods
    } else if growth_minus_one.is_infinite() {
        principal * monthly_rate
    } else {
        principal * monthly_rate * (growth_minus_one + 1.0) / growth_minus_one
    };

    payment.round() as u64
}

/// Installment plus what the loan costs over its whole term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentQuote {
    pub principal: u64,
    pub term_months: u32,
    pub monthly_payment: u64,
    pub total_paid: u64,
    pub total_interest: u64,
}

impl PaymentQuote {
    pub fn is_empty(&self) -> bool {
        self.monthly_payment == 0
    }
}

pub fn quote(principal: u64, annual_rate: f64, term_months: u32) -> PaymentQuote {
    let monthly_payment = monthly_payment(principal, annual_rate, term_months);
    let total_paid = monthly_payment.saturating_mul(u64::from(term_months));

    PaymentQuote {
        principal,
        term_months,
        monthly_payment,
        total_paid,
        total_interest: total_paid.saturating_sub(principal),
    }
}
