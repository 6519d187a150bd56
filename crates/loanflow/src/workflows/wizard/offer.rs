use serde::{Deserialize, Serialize};

pub const DEFAULT_PRINCIPAL: f64 = 1_000_000.0;
pub const DEFAULT_ANNUAL_RATE_PERCENT: f64 = 8.5;
pub const DEFAULT_TENURE_MONTHS: u32 = 84;

/// Offer terms shown on the offer screen. Principal follows the requested
/// loan amount; tenure follows the slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanOffer {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
}

impl Default for LoanOffer {
    fn default() -> Self {
        Self {
            principal: DEFAULT_PRINCIPAL,
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            tenure_months: DEFAULT_TENURE_MONTHS,
        }
    }
}

impl LoanOffer {
    /// Replace missing or non-finite terms with the documented defaults.
    /// Applied before every instalment computation so a half-filled form can
    /// never produce a NaN quote.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let valid_amount = |value: f64| value.is_finite() && value > 0.0;
        Self {
            principal: if valid_amount(self.principal) {
                self.principal
            } else {
                defaults.principal
            },
            annual_rate_percent: if valid_amount(self.annual_rate_percent) {
                self.annual_rate_percent
            } else {
                defaults.annual_rate_percent
            },
            tenure_months: if self.tenure_months > 0 {
                self.tenure_months
            } else {
                defaults.tenure_months
            },
        }
    }

    /// Equated monthly instalment: `P*r*(1+r)^n / ((1+r)^n - 1)` with the
    /// monthly rate `r`, rounded to the nearest rupee.
    pub fn monthly_instalment(&self) -> u64 {
        let offer = self.sanitized();
        let rate = offer.annual_rate_percent / 100.0 / 12.0;
        let factor = (1.0 + rate).powi(offer.tenure_months as i32);
        let instalment = offer.principal * rate * factor / (factor - 1.0);
        instalment.round() as u64
    }
}

/// Sanitized terms plus the derived instalment, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OfferQuote {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    pub monthly_instalment: u64,
}

impl LoanOffer {
    pub fn quote(&self) -> OfferQuote {
        let sanitized = self.sanitized();
        OfferQuote {
            principal: sanitized.principal,
            annual_rate_percent: sanitized.annual_rate_percent,
            tenure_months: sanitized.tenure_months,
            monthly_instalment: sanitized.monthly_instalment(),
        }
    }
}

/// Format a rupee amount with Indian digit grouping (last three digits, then
/// pairs): 1000000 renders as `10,00,000`.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut index = head_bytes.len();
    while index > 2 {
        groups.push(&head[index - 2..index]);
        index -= 2;
    }
    groups.push(&head[..index]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
