use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Percent, Rate};

/// Risk-based pricing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Rate charged to a zero-risk applicant, in percent.
    #[serde(default = "default_base_rate")]
    pub base_rate_pct: Percent,
    /// Percentage points added per unit of default probability.
    #[serde(default = "default_risk_spread")]
    pub risk_spread_pct: Percent,
    /// Share of the borrower rate passed through to investors.
    #[serde(default = "default_investor_share")]
    pub investor_share: Rate,
}

fn default_base_rate() -> Percent {
    dec!(12.0)
}

fn default_risk_spread() -> Percent {
    dec!(10)
}

fn default_investor_share() -> Rate {
    dec!(0.8)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate_pct: default_base_rate(),
            risk_spread_pct: default_risk_spread(),
            investor_share: default_investor_share(),
        }
    }
}

impl PricingConfig {
    /// base + probability * spread. Not clamped.
    pub fn annual_rate(&self, probability: Rate) -> Percent {
        self.base_rate_pct + probability * self.risk_spread_pct
    }

    /// Projected annual yield for investors funding the loan.
    pub fn investor_yield(&self, annual_rate_pct: Percent) -> Percent {
        annual_rate_pct * self.investor_share
    }
}

/// Annual rate in percent with the standard 12% base and 10-point spread.
pub fn annual_rate(probability: Rate) -> Percent {
    PricingConfig::default().annual_rate(probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_endpoints() {
        assert_eq!(annual_rate(dec!(0.0)), dec!(12.0));
        assert_eq!(annual_rate(dec!(1.0)), dec!(22.0));
    }

    #[test]
    fn test_rate_quarter_probability() {
        assert_eq!(annual_rate(dec!(0.25)), dec!(14.5));
    }

    #[test]
    fn test_rate_monotonic() {
        let mut prev = annual_rate(dec!(0));
        for i in 1..=20 {
            let r = annual_rate(rust_decimal::Decimal::from(i) / dec!(20));
            assert!(r > prev);
            prev = r;
        }
    }

    #[test]
    fn test_investor_yield() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.investor_yield(dec!(15)), dec!(12));
    }
}
