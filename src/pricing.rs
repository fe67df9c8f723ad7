//! Price normalization into the reference currency.
//!
//! Sale offers report the same price in several representations (fiat
//! cents per currency, ETH in wei). [`normalize`] picks one and converts it
//! with the fixed rates in [`PricingConfig`]. It is pure and total: missing
//! or malformed amounts give `None`, never an error.

use crate::config::{FiatCurrency, PricingConfig};
use crate::utils::round_cents;
use serde::{Deserialize, Serialize};

const WEI_PER_ETH: f64 = 1e18;

/// Amounts of a sale offer, as reported by the API
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleAmounts {
    /// Euro cents
    #[serde(default)]
    pub eur_cents: Option<String>,
    /// US dollar cents
    #[serde(default)]
    pub usd_cents: Option<String>,
    /// Pound sterling pence
    #[serde(default)]
    pub gbp_cents: Option<String>,
    /// ETH in wei
    #[serde(default)]
    pub wei: Option<String>,
    /// Currency the seller priced in, as an upper-case code ("EUR", "ETH", ...)
    ///
    /// Informational: every representation above describes the same price,
    /// so [`normalize`] picks by availability, not by this field.
    #[serde(default)]
    pub reference_currency: Option<String>,
}

/// One representation of a price
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Amount {
    /// Fiat minor units (cents) in a given currency
    MinorUnits {
        /// Currency of the units
        currency: FiatCurrency,
        /// Unparsed units
        units: String,
    },
    /// ETH base units
    Wei(String),
}

impl Amount {
    /// Value in the reference currency, if this representation can be converted
    pub fn to_reference(&self, pricing: &PricingConfig) -> Option<f64> {
        match self {
            Amount::MinorUnits { currency, units } if *currency == pricing.reference_currency => {
                let cents = parse_positive(units)?;
                Some(cents / 100.0)
            }
            Amount::MinorUnits { .. } => None,
            Amount::Wei(units) => {
                let wei = parse_positive(units)?;
                Some(round_cents(wei / WEI_PER_ETH * pricing.eth_rate))
            }
        }
    }
}

impl SaleAmounts {
    /// Minor-unit amount for a fiat currency, if reported
    pub fn minor_units(&self, currency: FiatCurrency) -> Option<Amount> {
        let units = match currency {
            FiatCurrency::Eur => self.eur_cents.as_ref(),
            FiatCurrency::Usd => self.usd_cents.as_ref(),
            FiatCurrency::Gbp => self.gbp_cents.as_ref(),
        }?;
        Some(Amount::MinorUnits {
            currency,
            units: units.clone(),
        })
    }

    /// Wei amount, if reported
    pub fn wei(&self) -> Option<Amount> {
        self.wei.clone().map(Amount::Wei)
    }

    /// Fiat currency the seller priced in; `None` for crypto or unknown codes
    pub fn seller_currency(&self) -> Option<FiatCurrency> {
        let code = self.reference_currency.as_deref()?.trim();
        [FiatCurrency::Eur, FiatCurrency::Usd, FiatCurrency::Gbp]
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }
}

/// Normalize an offer to the reference currency
///
/// Prefers the reference currency's own minor units; falls back to wei at
/// the configured ETH rate (rounded to cents). Zero amounts count as absent.
pub fn normalize(offer: Option<&SaleAmounts>, pricing: &PricingConfig) -> Option<f64> {
    let amounts = offer?;
    if let Some(price) = amounts
        .minor_units(pricing.reference_currency)
        .and_then(|a| a.to_reference(pricing))
    {
        return Some(price);
    }
    if amounts.seller_currency() == Some(pricing.reference_currency) {
        tracing::debug!(
            currency = pricing.reference_currency.code(),
            "offer priced in the reference currency has no usable minor units, trying wei"
        );
    }
    amounts.wei().and_then(|a| a.to_reference(pricing))
}

/// Parse a non-negative integer amount; zero, negative and malformed input give `None`
///
/// Whole integers go through `u128` so wei values keep full precision before
/// conversion to float.
fn parse_positive(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let value = match trimmed.parse::<u128>() {
        Ok(v) => v as f64,
        Err(_) => trimmed.parse::<f64>().ok()?,
    };
    (value.is_finite() && value > 0.0).then_some(value)
}
