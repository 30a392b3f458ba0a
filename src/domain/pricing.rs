//! Discounted-price computation.
//!
//! `effective_price` is the single source of truth for what a variant costs:
//! the storefront listing and the checkout charge both go through it, so the
//! displayed price and the charged price can never drift apart.

use bigdecimal::{BigDecimal, Zero};

/// A discount attached to a priced entity (product variant or option value).
///
/// Stored loosely in the database as a `(kind, value)` column pair; use
/// [`DiscountRule::from_parts`] to fold that pair back into the closed enum.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DiscountRule {
    #[default]
    None,
    /// Percent off the base price. Values above 100 are accepted and simply
    /// floor the result at zero; there is deliberately no upper-bound check.
    Percentage(BigDecimal),
    /// Absolute amount off the base price, in the same currency unit.
    FixedAmount(BigDecimal),
}

pub const DISCOUNT_KIND_PERCENTAGE: &str = "percentage";
pub const DISCOUNT_KIND_FIXED_AMOUNT: &str = "fixed_amount";

impl DiscountRule {
    /// Build a rule from a loosely-typed `(kind, value)` pair.
    ///
    /// Anything malformed (unknown kind, missing value) collapses to
    /// `DiscountRule::None` rather than erroring, so a bad row in the store
    /// renders at full price instead of breaking the page.
    pub fn from_parts(kind: Option<&str>, value: Option<BigDecimal>) -> Self {
        let Some(value) = value else {
            return DiscountRule::None;
        };
        match kind {
            Some(DISCOUNT_KIND_PERCENTAGE) => DiscountRule::Percentage(value),
            Some(DISCOUNT_KIND_FIXED_AMOUNT) => DiscountRule::FixedAmount(value),
            _ => DiscountRule::None,
        }
    }

    /// Inverse of [`from_parts`](Self::from_parts), for persistence.
    pub fn as_parts(&self) -> (Option<&'static str>, Option<&BigDecimal>) {
        match self {
            DiscountRule::None => (None, None),
            DiscountRule::Percentage(v) => (Some(DISCOUNT_KIND_PERCENTAGE), Some(v)),
            DiscountRule::FixedAmount(v) => (Some(DISCOUNT_KIND_FIXED_AMOUNT), Some(v)),
        }
    }
}

/// Apply `rule` to `base` and return the effective price.
///
/// Total and deterministic: a zero-valued rule is the identity, and the result
/// is clamped so it never goes below zero.
pub fn effective_price(base: &BigDecimal, rule: &DiscountRule) -> BigDecimal {
    let discounted = match rule {
        DiscountRule::None => return base.clone(),
        DiscountRule::Percentage(pct) => {
            if pct.is_zero() {
                return base.clone();
            }
            base - (base * pct) / BigDecimal::from(100)
        }
        DiscountRule::FixedAmount(amount) => {
            if amount.is_zero() {
                return base.clone();
            }
            base - amount
        }
    };
    if discounted < BigDecimal::zero() {
        BigDecimal::zero()
    } else {
        discounted
    }
}
