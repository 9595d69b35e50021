//! Discounted cash-flow primitives: NPV, IRR and payback.
//!
//! Cash-flow series are indexed by period; element 0 is the undiscounted
//! initial outlay (normally negative) and element `t` is discounted by
//! `(1 + rate)^t`.

use serde::{Deserialize, Serialize};

use crate::config::RoiConfig;

/// Net present value of a cash-flow series at a fixed per-period rate
pub fn net_present_value(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Months until cumulative savings cover the implementation cost.
///
/// Non-positive savings never pay back; that case reports 0 rather than an
/// infinite period.
pub fn payback_months(implementation_cost: f64, annual_savings: f64) -> f64 {
    if annual_savings > 0.0 {
        implementation_cost / annual_savings * 12.0
    } else {
        0.0
    }
}

/// Result of the Newton-Raphson IRR search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrEstimate {
    /// Rate held when the search stopped, as a percentage
    pub rate_percent: f64,
    pub iterations: usize,
    /// True only when |NPV| fell under the tolerance
    pub converged: bool,
}

/// Estimate the internal rate of return of `cashflows`.
///
/// Starts from `config.irr_initial_rate` and stops early when either |NPV|
/// or the derivative magnitude drops below `config.irr_tolerance`. Running
/// out of iterations is not an error: the last rate is returned with
/// `converged == false`.
pub fn estimate_irr(cashflows: &[f64], config: &RoiConfig) -> IrrEstimate {
    let tolerance = config.irr_tolerance;
    let mut rate = config.irr_initial_rate;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.irr_max_iterations {
        let (npv, derivative) = npv_and_derivative(cashflows, rate);

        if npv.abs() < tolerance {
            converged = true;
            break;
        }
        if derivative.abs() < tolerance {
            break;
        }

        rate -= npv / derivative;
        iterations += 1;
    }

    if !converged {
        log::debug!(
            "IRR search stopped without converging after {} iterations at rate {:.6}",
            iterations,
            rate
        );
    }

    IrrEstimate {
        rate_percent: rate * 100.0,
        iterations,
        converged,
    }
}

/// IRR as a percentage using the default search parameters
pub fn calculate_irr(cashflows: &[f64]) -> f64 {
    estimate_irr(cashflows, &RoiConfig::default()).rate_percent
}

fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(npv, derivative), (t, cf)| {
            let period = t as i32;
            let npv = npv + cf / (1.0 + rate).powi(period);
            let derivative = if t > 0 {
                derivative - t as f64 * cf / (1.0 + rate).powi(period + 1)
            } else {
                derivative
            };
            (npv, derivative)
        })
}

/// Cash-flow series of an initial outlay followed by `years` equal savings
pub fn savings_series(implementation_cost: f64, annual_savings: f64, years: u32) -> Vec<f64> {
    std::iter::once(-implementation_cost)
        .chain(std::iter::repeat(annual_savings).take(years as usize))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_of_five_year_savings() {
        let series = savings_series(250000.0, 152800.0, 5);
        let npv = net_present_value(&series, 0.1);
        // 152800 * 3.790786769... - 250000
        assert!((npv - 329232.22).abs() < 0.01, "npv was {npv}");
    }

    #[test]
    fn test_npv_at_zero_rate_is_plain_sum() {
        assert_eq!(net_present_value(&[-100.0, 40.0, 40.0, 40.0], 0.0), 20.0);
    }

    #[test]
    fn test_payback_months() {
        assert_eq!(payback_months(120000.0, 60000.0), 24.0);
        assert_eq!(payback_months(120000.0, 0.0), 0.0);
        assert_eq!(payback_months(120000.0, -5.0), 0.0);
    }

    #[test]
    fn test_irr_converges_to_zero_npv() {
        let series = [-100000.0, 50000.0, 50000.0, 50000.0, 50000.0, 50000.0];
        let estimate = estimate_irr(&series, &RoiConfig::default());
        assert!(estimate.converged);
        let npv = net_present_value(&series, estimate.rate_percent / 100.0);
        assert!(npv.abs() < 1e-4, "npv at irr was {npv}");
        assert!((estimate.rate_percent - 41.04).abs() < 0.01);
    }

    #[test]
    fn test_irr_breakeven_series_is_zero() {
        let irr = calculate_irr(&[-300.0, 100.0, 100.0, 100.0]);
        assert!(irr.abs() < 1e-3, "irr was {irr}");
    }

    #[test]
    fn test_irr_flat_derivative_stops_without_converging() {
        // No future cash flows: derivative is always zero
        let estimate = estimate_irr(&[-1000.0], &RoiConfig::default());
        assert!(!estimate.converged);
        assert_eq!(estimate.iterations, 0);
        assert!((estimate.rate_percent - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_irr_iteration_budget_respected() {
        let config = RoiConfig {
            irr_max_iterations: 1,
            ..RoiConfig::default()
        };
        let estimate = estimate_irr(&[-100000.0, 50000.0, 50000.0, 50000.0], &config);
        assert_eq!(estimate.iterations, 1);
        assert!(!estimate.converged);
    }

    #[test]
    fn test_savings_series_shape() {
        assert_eq!(
            savings_series(10.0, 3.0, 3),
            vec![-10.0, 3.0, 3.0, 3.0]
        );
    }
}
