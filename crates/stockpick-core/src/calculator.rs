//! Stateless investing calculators.
//!
//! Every input is optional: `None` or a non-finite value counts as absent. A
//! calculator that cannot produce a number returns `CalcError` (or `None` for the
//! independent dividend outputs) instead of leaking NaN or infinity.
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

fn present(value: Option<f64>, field: &'static str) -> Result<f64, CalcError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(CalcError::MissingInput(field))
}

fn finite(value: f64, what: &'static str) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite(what))
    }
}

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are returned as is; at that magnitude an `f64`
/// has no fractional digits left to round.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeInput {
    pub price: Option<f64>,
    pub earnings_per_share: Option<f64>,
}

/// Qualitative reading of a P/E ratio. Bands include their lower bound and
/// exclude their upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PeVerdict {
    /// below 10
    Cheap,
    /// 10 to below 20
    Reasonable,
    /// 20 to below 35
    Pricey,
    /// 35 and above
    Expensive,
}

impl PeVerdict {
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio < 10.0 {
            PeVerdict::Cheap
        } else if ratio < 20.0 {
            PeVerdict::Reasonable
        } else if ratio < 35.0 {
            PeVerdict::Pricey
        } else {
            PeVerdict::Expensive
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PeVerdict::Cheap => "Looks cheap, but dig deeper. There might be a reason.",
            PeVerdict::Reasonable => "Pretty reasonable for most industries.",
            PeVerdict::Pricey => "On the pricier side. Growth stock?",
            PeVerdict::Expensive => "That's expensive. Better be growing fast.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeResult {
    /// Price over earnings, two decimals
    pub ratio: f64,
    /// Band of the rounded ratio
    pub verdict: PeVerdict,
}

pub fn pe_ratio(input: PeInput) -> Result<PeResult, CalcError> {
    let price = present(input.price, "price")?;
    let eps = present(input.earnings_per_share, "earnings_per_share")?;
    if eps == 0.0 {
        return Err(CalcError::DivisionByZero("earnings_per_share is zero"));
    }

    let ratio = round_to(finite(price / eps, "ratio")?, 2);
    Ok(PeResult {
        ratio,
        verdict: PeVerdict::for_ratio(ratio),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DividendInput {
    pub price: Option<f64>,
    pub annual_dividend: Option<f64>,
    pub shares_owned: Option<f64>,
}

/// The two outputs are computed independently; either may be unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DividendResult {
    /// Annual dividend over price, as a percentage with two decimals
    pub yield_percent: Option<f64>,
    /// Annual dividend times shares owned, two decimals
    pub annual_income: Option<f64>,
}

impl DividendResult {
    pub fn is_empty(&self) -> bool {
        self.yield_percent.is_none() && self.annual_income.is_none()
    }
}

pub fn dividend(input: DividendInput) -> DividendResult {
    let dividend = present(input.annual_dividend, "annual_dividend").ok();

    let yield_percent = match (present(input.price, "price").ok(), dividend) {
        (Some(price), Some(dividend)) if price != 0.0 => {
            finite(dividend / price * 100.0, "yield_percent").ok()
        }
        _ => None,
    };

    let annual_income = match (dividend, present(input.shares_owned, "shares_owned").ok()) {
        (Some(dividend), Some(shares)) => finite(dividend * shares, "annual_income").ok(),
        _ => None,
    };

    DividendResult {
        yield_percent: yield_percent.map(|v| round_to(v, 2)),
        annual_income: annual_income.map(|v| round_to(v, 2)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompoundInput {
    pub initial_amount: Option<f64>,
    /// Treated as 0 when absent
    pub monthly_contribution: Option<f64>,
    pub annual_rate_percent: Option<f64>,
    pub years: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_earnings: f64,
}

/// Future value with monthly compounding and end-of-month contributions.
///
/// A zero rate grows by contributions alone: `initial + monthly * months`.
/// All outputs are rounded to whole units after computing from unrounded values.
pub fn compound_growth(input: CompoundInput) -> Result<CompoundResult, CalcError> {
    let initial = present(input.initial_amount, "initial_amount")?;
    let rate_percent = present(input.annual_rate_percent, "annual_rate_percent")?;
    let years = present(input.years, "years")?;
    let monthly = input
        .monthly_contribution
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);

    let r = rate_percent / 100.0 / 12.0;
    let n = years * 12.0;

    let future_value = if r == 0.0 {
        initial + monthly * n
    } else {
        // growth - 1, kept accurate when r is close to zero
        let growth_m1 = (n * r.ln_1p()).exp_m1();
        initial * (growth_m1 + 1.0) + monthly * (growth_m1 / r)
    };
    let future_value = finite(future_value, "future_value")?;
    let total_contributions = finite(initial + monthly * n, "total_contributions")?;
    let total_earnings = future_value - total_contributions;

    Ok(CompoundResult {
        future_value: future_value.round(),
        total_contributions: total_contributions.round(),
        total_earnings: total_earnings.round(),
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionInput {
    pub portfolio_value: Option<f64>,
    pub risk_percent: Option<f64>,
    pub entry_price: Option<f64>,
    pub stop_loss_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionResult {
    /// Whole shares, floored. Kept as `f64` so large portfolios don't saturate.
    pub share_count: f64,
    /// Money at risk on the trade, two decimals
    pub risk_amount: f64,
    /// Distance from entry to stop, two decimals
    pub risk_per_share: f64,
    /// `share_count * entry_price`, two decimals
    pub position_value: f64,
}

pub fn position_size(input: PositionInput) -> Result<PositionResult, CalcError> {
    let portfolio = present(input.portfolio_value, "portfolio_value")?;
    let risk_percent = present(input.risk_percent, "risk_percent")?;
    let entry = present(input.entry_price, "entry_price")?;
    let stop = present(input.stop_loss_price, "stop_loss_price")?;

    let risk_amount = portfolio * (risk_percent / 100.0);
    let risk_per_share = (entry - stop).abs();
    if risk_per_share == 0.0 {
        return Err(CalcError::DivisionByZero(
            "entry_price equals stop_loss_price",
        ));
    }

    let share_count = finite((risk_amount / risk_per_share).floor(), "share_count")?;
    let position_value = finite(share_count * entry, "position_value")?;

    Ok(PositionResult {
        share_count,
        risk_amount: round_to(finite(risk_amount, "risk_amount")?, 2),
        risk_per_share: round_to(risk_per_share, 2),
        position_value: round_to(position_value, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pe_ratio_at_band_boundary_is_pricey() {
        let result = pe_ratio(PeInput {
            price: Some(100.0),
            earnings_per_share: Some(5.0),
        })
        .unwrap();

        assert_eq!(result.ratio, 20.0);
        assert_eq!(result.verdict, PeVerdict::Pricey);
    }

    #[test]
    fn pe_verdict_bands_include_lower_bound() {
        assert_eq!(PeVerdict::for_ratio(9.99), PeVerdict::Cheap);
        assert_eq!(PeVerdict::for_ratio(10.0), PeVerdict::Reasonable);
        assert_eq!(PeVerdict::for_ratio(19.99), PeVerdict::Reasonable);
        assert_eq!(PeVerdict::for_ratio(20.0), PeVerdict::Pricey);
        assert_eq!(PeVerdict::for_ratio(34.99), PeVerdict::Pricey);
        assert_eq!(PeVerdict::for_ratio(35.0), PeVerdict::Expensive);
        assert_eq!(PeVerdict::for_ratio(-4.0), PeVerdict::Cheap);
    }

    #[test]
    fn pe_verdict_uses_rounded_ratio() {
        // 19.996 rounds to 20.00, which lands in the pricier band.
        let result = pe_ratio(PeInput {
            price: Some(19.996),
            earnings_per_share: Some(1.0),
        })
        .unwrap();
        assert_eq!(result.ratio, 20.0);
        assert_eq!(result.verdict, PeVerdict::Pricey);
    }

    #[test]
    fn pe_ratio_rounds_to_two_decimals() {
        let result = pe_ratio(PeInput {
            price: Some(150.0),
            earnings_per_share: Some(6.5),
        })
        .unwrap();
        assert_eq!(result.ratio, 23.08);
    }

    #[test]
    fn pe_ratio_unavailable_cases() {
        let zero_eps = pe_ratio(PeInput {
            price: Some(100.0),
            earnings_per_share: Some(0.0),
        });
        assert!(matches!(zero_eps, Err(CalcError::DivisionByZero(_))));

        let missing = pe_ratio(PeInput {
            price: None,
            earnings_per_share: Some(5.0),
        });
        assert_eq!(missing, Err(CalcError::MissingInput("price")));

        let nan = pe_ratio(PeInput {
            price: Some(100.0),
            earnings_per_share: Some(f64::NAN),
        });
        assert_eq!(nan, Err(CalcError::MissingInput("earnings_per_share")));
    }

    #[test]
    fn dividend_yield_and_income() {
        let result = dividend(DividendInput {
            price: Some(50.0),
            annual_dividend: Some(2.0),
            shares_owned: Some(100.0),
        });
        assert_eq!(result.yield_percent, Some(4.0));
        assert_eq!(result.annual_income, Some(200.0));
    }

    #[test]
    fn dividend_outputs_are_independent() {
        let income_only = dividend(DividendInput {
            price: Some(0.0),
            annual_dividend: Some(2.0),
            shares_owned: Some(10.0),
        });
        assert_eq!(income_only.yield_percent, None);
        assert_eq!(income_only.annual_income, Some(20.0));

        let yield_only = dividend(DividendInput {
            price: Some(80.0),
            annual_dividend: Some(2.0),
            shares_owned: None,
        });
        assert_eq!(yield_only.yield_percent, Some(2.5));
        assert_eq!(yield_only.annual_income, None);

        let nothing = dividend(DividendInput {
            price: Some(80.0),
            annual_dividend: None,
            shares_owned: Some(10.0),
        });
        assert!(nothing.is_empty());
    }

    #[test]
    fn compound_growth_matches_monthly_formula() {
        let result = compound_growth(CompoundInput {
            initial_amount: Some(10_000.0),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(10.0),
            years: Some(20.0),
        })
        .unwrap();

        let r: f64 = 10.0 / 100.0 / 12.0;
        let n: f64 = 20.0 * 12.0;
        let growth = (1.0 + r).powf(n);
        let expected = 10_000.0 * growth + 500.0 * ((growth - 1.0) / r);

        assert_eq!(result.future_value, expected.round());
        assert_eq!(result.total_contributions, 130_000.0);
        assert_eq!(result.total_earnings, (expected - 130_000.0).round());
    }

    #[test]
    fn compound_growth_monthly_defaults_to_zero() {
        let result = compound_growth(CompoundInput {
            initial_amount: Some(1_000.0),
            monthly_contribution: None,
            annual_rate_percent: Some(12.0),
            years: Some(1.0),
        })
        .unwrap();

        let expected = 1_000.0 * 1.01f64.powf(12.0);
        assert_eq!(result.future_value, expected.round());
        assert_eq!(result.total_contributions, 1_000.0);
    }

    #[test]
    fn compound_growth_zero_rate_is_simple_sum() {
        let result = compound_growth(CompoundInput {
            initial_amount: Some(10_000.0),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(0.0),
            years: Some(20.0),
        })
        .unwrap();

        assert_eq!(result.future_value, 130_000.0);
        assert_eq!(result.total_contributions, 130_000.0);
        assert_eq!(result.total_earnings, 0.0);
    }

    #[test]
    fn compound_growth_requires_core_inputs() {
        let missing_years = compound_growth(CompoundInput {
            initial_amount: Some(10_000.0),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(10.0),
            years: None,
        });
        assert_eq!(missing_years, Err(CalcError::MissingInput("years")));
    }

    #[test]
    fn position_size_example() {
        let result = position_size(PositionInput {
            portfolio_value: Some(50_000.0),
            risk_percent: Some(2.0),
            entry_price: Some(150.0),
            stop_loss_price: Some(140.0),
        })
        .unwrap();

        assert_eq!(result.risk_amount, 1_000.0);
        assert_eq!(result.risk_per_share, 10.0);
        assert_eq!(result.share_count, 100.0);
        assert_eq!(result.position_value, 15_000.0);
    }

    #[test]
    fn position_size_floors_shares_and_handles_short_stops() {
        // Stop above entry (short trade) uses the absolute distance.
        let result = position_size(PositionInput {
            portfolio_value: Some(10_000.0),
            risk_percent: Some(1.0),
            entry_price: Some(30.0),
            stop_loss_price: Some(33.0),
        })
        .unwrap();

        assert_eq!(result.share_count, 33.0);
        assert_eq!(result.position_value, 990.0);
    }

    #[test]
    fn position_size_with_stop_at_entry_is_unavailable() {
        let result = position_size(PositionInput {
            portfolio_value: Some(50_000.0),
            risk_percent: Some(2.0),
            entry_price: Some(150.0),
            stop_loss_price: Some(150.0),
        });
        assert!(matches!(result, Err(CalcError::DivisionByZero(_))));
    }

    #[test]
    fn position_size_requires_every_input() {
        let result = position_size(PositionInput {
            portfolio_value: Some(50_000.0),
            risk_percent: None,
            entry_price: Some(150.0),
            stop_loss_price: Some(140.0),
        });
        assert_eq!(result, Err(CalcError::MissingInput("risk_percent")));
    }

    #[test]
    fn round_to_leaves_unscalable_values_alone() {
        assert_eq!(round_to(1e307, 2), 1e307);
        assert_eq!(round_to(-1e307, 2), -1e307);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn pe_ratio_near_f64_max_stays_finite() {
        let result = pe_ratio(PeInput {
            price: Some(1e307),
            earnings_per_share: Some(1.0),
        })
        .unwrap();
        assert_eq!(result.ratio, 1e307);
        assert_eq!(result.verdict, PeVerdict::Expensive);
    }

    #[test]
    fn dividend_overflow_drops_only_that_output() {
        let result = dividend(DividendInput {
            price: Some(1.0),
            annual_dividend: Some(1e307),
            shares_owned: Some(10.0),
        });
        // 1e307 / 1 * 100 overflows; income still fits
        assert_eq!(result.yield_percent, None);
        let income = result.annual_income.unwrap();
        assert!(income.is_finite());
        assert!((income / 1e308 - 1.0).abs() < 1e-12);

        let no_income = dividend(DividendInput {
            price: Some(50.0),
            annual_dividend: Some(2.0),
            shares_owned: Some(1e308),
        });
        assert_eq!(no_income.yield_percent, Some(4.0));
        assert_eq!(no_income.annual_income, None);
    }

    #[test]
    fn dividend_ignores_non_finite_inputs() {
        let result = dividend(DividendInput {
            price: Some(f64::INFINITY),
            annual_dividend: Some(2.0),
            shares_owned: Some(10.0),
        });
        assert_eq!(result.yield_percent, None);
        assert_eq!(result.annual_income, Some(20.0));

        let nan_dividend = dividend(DividendInput {
            price: Some(50.0),
            annual_dividend: Some(f64::NAN),
            shares_owned: Some(10.0),
        });
        assert!(nan_dividend.is_empty());
    }

    #[test]
    fn compound_growth_overflow_is_non_finite() {
        let result = compound_growth(CompoundInput {
            initial_amount: Some(10_000.0),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(10.0),
            years: Some(1e6),
        });
        assert_eq!(result, Err(CalcError::NonFinite("future_value")));
    }

    #[test]
    fn compound_growth_ignores_non_finite_inputs() {
        let nan_initial = compound_growth(CompoundInput {
            initial_amount: Some(f64::NAN),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(10.0),
            years: Some(20.0),
        });
        assert_eq!(nan_initial, Err(CalcError::MissingInput("initial_amount")));

        // A non-finite contribution falls back to no contribution.
        let inf_monthly = compound_growth(CompoundInput {
            initial_amount: Some(1_000.0),
            monthly_contribution: Some(f64::INFINITY),
            annual_rate_percent: Some(12.0),
            years: Some(1.0),
        })
        .unwrap();
        let no_monthly = compound_growth(CompoundInput {
            initial_amount: Some(1_000.0),
            monthly_contribution: None,
            annual_rate_percent: Some(12.0),
            years: Some(1.0),
        })
        .unwrap();
        assert_eq!(inf_monthly, no_monthly);
    }

    #[test]
    fn compound_growth_tiny_rate_keeps_contributions() {
        // r = 1e-15 per month; (1 + r) alone would lose most of r
        let result = compound_growth(CompoundInput {
            initial_amount: Some(10_000.0),
            monthly_contribution: Some(500.0),
            annual_rate_percent: Some(1.2e-12),
            years: Some(20.0),
        })
        .unwrap();

        assert_eq!(result.future_value, 130_000.0);
        assert_eq!(result.total_contributions, 130_000.0);
        assert_eq!(result.total_earnings, 0.0);
    }

    #[test]
    fn position_size_beyond_i64_keeps_exact_share_count() {
        let result = position_size(PositionInput {
            portfolio_value: Some(1e20),
            risk_percent: Some(100.0),
            entry_price: Some(1.0),
            stop_loss_price: Some(0.5),
        })
        .unwrap();

        assert_eq!(result.share_count, 2e20);
        assert_eq!(result.position_value, 2e20);
        assert_eq!(result.risk_amount, 1e20);
    }

    #[test]
    fn position_size_near_f64_max_stays_finite() {
        let result = position_size(PositionInput {
            portfolio_value: Some(1e308),
            risk_percent: Some(100.0),
            entry_price: Some(10.0),
            stop_loss_price: Some(0.0),
        })
        .unwrap();

        assert_eq!(result.risk_amount, 1e308);
        assert!(result.share_count.is_finite());
        assert!(result.position_value.is_finite());
    }

    #[test]
    fn position_size_share_overflow_is_non_finite() {
        let result = position_size(PositionInput {
            portfolio_value: Some(1e308),
            risk_percent: Some(100.0),
            entry_price: Some(1.0),
            stop_loss_price: Some(0.5),
        });
        assert_eq!(result, Err(CalcError::NonFinite("share_count")));
    }

    #[test]
    fn position_size_ignores_non_finite_inputs() {
        let result = position_size(PositionInput {
            portfolio_value: Some(50_000.0),
            risk_percent: Some(2.0),
            entry_price: Some(150.0),
            stop_loss_price: Some(f64::INFINITY),
        });
        assert_eq!(result, Err(CalcError::MissingInput("stop_loss_price")));
    }
}
