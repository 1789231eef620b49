use alloy_primitives::U256;

use super::{Currency, TokenAddress, TokenDescriptor};
use crate::{error::Error, num};

/// Decimals of the pseudo-currency USD values are carried in.
pub const USD_DECIMALS: u8 = 8;

/// An amount of a specific currency, held as an integer count of the
/// currency's smallest unit.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct CurrencyAmount {
    currency: Currency,
    #[debug("{raw}")]
    raw: U256,
}

impl CurrencyAmount {
    pub fn from_raw(currency: Currency, raw: U256) -> Self { Self { currency, raw } }

    /// Parses a non-negative decimal string, truncating fractional digits
    /// beyond the currency's precision.
    pub fn parse_decimal(currency: Currency, value: &str) -> Result<Self, Error> {
        let (numerator, denominator) = num::parse_decimal(value)
            .ok_or_else(|| Error::Parse(format!("malformed decimal amount: {value:?}")))?;
        let scale = num::pow10(currency.decimals())
            .ok_or_else(|| Error::Parse(format!("unsupported decimals: {}", currency.decimals())))?;
        let raw = num::mul_div(numerator, scale, denominator)
            .ok_or_else(|| Error::Parse(format!("amount out of range: {value:?}")))?;
        Ok(Self { currency, raw })
    }

    /// USD value amount, e.g. from the routing service's quote payload.
    pub fn usd(value: &str) -> Result<Self, Error> {
        Self::parse_decimal(
            Currency::Token(TokenDescriptor {
                chain_id: 0,
                address: TokenAddress::new("usd"),
                decimals: USD_DECIMALS,
                symbol: "USD".to_owned(),
                name: "US Dollar".to_owned(),
            }),
            value,
        )
    }

    pub fn currency(&self) -> &Currency { &self.currency }

    pub fn raw(&self) -> U256 { self.raw }

    pub fn is_zero(&self) -> bool { self.raw.is_zero() }
}

impl std::fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(scale) = num::pow10(self.currency.decimals()) else {
            return write!(f, "{}", self.raw);
        };
        let whole = self.raw / scale;
        let frac = self.raw % scale;
        if frac.is_zero() {
            return write!(f, "{whole}");
        }
        let digits =
            format!("{:0>width$}", frac.to_string(), width = self.currency.decimals() as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usdc() -> Currency {
        Currency::Token(TokenDescriptor {
            chain_id: 1,
            address: TokenAddress::new("0xAAA"),
            decimals: 6,
            symbol: "USDC".to_owned(),
            name: "USD Coin".to_owned(),
        })
    }

    #[test]
    fn parses_and_renders_decimals() {
        let amount = CurrencyAmount::parse_decimal(usdc(), "12.5").unwrap();
        assert_eq!(amount.raw(), U256::from(12_500_000u64));
        assert_eq!(amount.to_string(), "12.5");

        let amount = CurrencyAmount::from_raw(usdc(), U256::from(1_000_001u64));
        assert_eq!(amount.to_string(), "1.000001");

        let amount = CurrencyAmount::from_raw(usdc(), U256::from(30u64));
        assert_eq!(amount.to_string(), "0.00003");
    }

    #[test]
    fn parse_truncates_excess_precision() {
        let amount = CurrencyAmount::parse_decimal(usdc(), "0.1234567891").unwrap();
        assert_eq!(amount.raw(), U256::from(123_456u64));
    }

    #[test]
    fn parse_rejects_signed_input() {
        assert!(CurrencyAmount::parse_decimal(usdc(), "-3").is_err());
    }
}
