//! Trade metrics derived from a quote payload and the user's slippage
//! setting.
//!
//! Everything here is pure and side-effect free; amounts are combined with
//! exact rational arithmetic and truncated toward zero, consistent with
//! "minimum guaranteed" semantics.

use crate::{
    error::Error,
    num::{self, Percent},
    types::CurrencyAmount,
};

/// Slippage tolerance applied when the user has not set one.
pub fn default_slippage() -> Percent { Percent::from_ratio(1, 100) }

/// Above this, slippage input is rejected outright.
pub fn max_valid_slippage() -> Percent { Percent::from_ratio(1, 2) }

/// Above this, slippage input is accepted with a warning.
pub fn high_slippage() -> Percent { Percent::from_ratio(1, 100) }

/// Price-impact loss magnitude that warrants a warning.
pub fn price_impact_warning() -> Percent { Percent::from_ratio(3, 100) }

/// Price-impact loss magnitude that warrants an error.
pub fn price_impact_error() -> Percent { Percent::from_ratio(5, 100) }

/// Impact magnitude below which the rendered figure is exactly "0.00%".
/// An anti-flicker precision floor, not rounding: the comparison is exact.
fn display_epsilon() -> Percent { Percent::from_ratio(5, 100_000) }

/// Discrete warning level attached to a derived figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    None,
    Warning,
    Error,
}

/// The least amount the user is guaranteed to receive under `slippage`.
///
/// `amount_out * (1 - slippage)`, truncated toward zero so the guaranteed
/// minimum is never overstated. Slippage outside `[0, 1]` is an invalid
/// argument.
pub fn minimum_amount_out(
    slippage: Percent,
    amount_out: &CurrencyAmount,
) -> Result<CurrencyAmount, Error> {
    let remainder = slippage.one_minus()?;
    Ok(CurrencyAmount::from_raw(
        amount_out.currency().clone(),
        remainder.floor_mul(amount_out.raw()),
    ))
}

/// Relative USD value change across the trade, with severity classification.
#[derive(Clone, Debug)]
pub struct PriceImpact {
    /// `(output - input) / input`; a loss is negative.
    pub percent: Percent,
    pub severity: Severity,
}

/// Derives the price impact from the quote's USD values.
///
/// `None` if either value is unavailable or the input value is zero — the
/// caller renders "impact unknown", not an error.
pub fn price_impact(
    input_usd: Option<&CurrencyAmount>,
    output_usd: Option<&CurrencyAmount>,
) -> Option<PriceImpact> {
    let (input, output) = (input_usd?, output_usd?);

    // Values may carry different precision; compare on a common scale:
    // (out_raw * 10^in_dec - in_raw * 10^out_dec) / (in_raw * 10^out_dec)
    let input_scaled = input
        .raw()
        .checked_mul(num::pow10(output.currency().decimals())?)?;
    let output_scaled = output
        .raw()
        .checked_mul(num::pow10(input.currency().decimals())?)?;
    if input_scaled.is_zero() {
        return None;
    }

    let (negative, diff) = if output_scaled >= input_scaled {
        (false, output_scaled - input_scaled)
    } else {
        (true, input_scaled - output_scaled)
    };
    let percent = Percent::from_parts(negative, diff, input_scaled);
    let severity = impact_severity(&percent);
    Some(PriceImpact { percent, severity })
}

/// Classifies a price impact against the fixed thresholds. Only losses warn.
fn impact_severity(percent: &Percent) -> Severity {
    if !percent.is_negative() {
        return Severity::None;
    }
    let loss = percent.abs();
    if loss > price_impact_error() {
        Severity::Error
    } else if loss > price_impact_warning() {
        Severity::Warning
    } else {
        Severity::None
    }
}

impl std::fmt::Display for PriceImpact {
    /// Signed percent with two decimals, truncated; magnitudes below the
    /// display floor render as exactly `0.00%`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.percent.abs() < display_epsilon() {
            return write!(f, "0.00%");
        }
        // Hundredths of a percent: |percent| * 100 * 100, truncated.
        let hundredths = self.percent.scaled_trunc(10_000);
        let whole = hundredths / alloy_primitives::U256::from(100u64);
        let frac = (hundredths % alloy_primitives::U256::from(100u64)).to::<u64>();
        let sign = if self.percent.is_negative() { "-" } else { "+" };
        write!(f, "{sign}{whole}.{frac:02}%")
    }
}

/// User slippage setting.
///
/// `use_default` means "use the protocol default tolerance"; an explicit
/// `max` overrides it only while numerically valid. "Use default" and
/// "invalid input" are distinct states: empty or unparsable input falls back
/// to the default rather than erroring.
#[derive(Clone, Debug)]
pub struct Slippage {
    pub use_default: bool,
    pub max: Option<String>,
}

impl Default for Slippage {
    fn default() -> Self { Self { use_default: true, max: None } }
}

impl Slippage {
    /// Explicit user-entered maximum; flips to the default when the input
    /// is not a usable percent.
    pub fn with_max(max: &str) -> Self {
        let use_default = match parse_percent(max) {
            Some(percent) => slippage_warning(&percent) == Severity::Error,
            None => true,
        };
        Self { use_default, max: Some(max.to_owned()) }
    }

    /// The tolerance to apply: the parsed maximum when set and valid, the
    /// default otherwise.
    pub fn tolerance(&self) -> Percent {
        if self.use_default {
            return default_slippage();
        }
        match self.max.as_deref().and_then(parse_percent) {
            Some(percent) if slippage_warning(&percent) != Severity::Error => percent,
            _ => default_slippage(),
        }
    }
}

/// Parses a user-entered percent string into an exact ratio.
///
/// `"0.5"` is 0.5%. Returns `None` for empty, negative, or unparsable input,
/// which callers treat as "use default".
pub fn parse_percent(input: &str) -> Option<Percent> {
    let (numerator, denominator) = num::parse_decimal(input)?;
    // Percent string to ratio of one: divide by 100.
    Some(Percent::from_parts(
        false,
        numerator,
        denominator.checked_mul(alloy_primitives::U256::from(100u64))?,
    ))
}

/// Whether a candidate slippage input would be accepted as an explicit
/// override.
pub fn slippage_input_is_valid(input: &str) -> bool { parse_percent(input).is_some() }

/// Classifies a slippage tolerance against the fixed thresholds.
pub fn slippage_warning(slippage: &Percent) -> Severity {
    if *slippage > max_valid_slippage() {
        Severity::Error
    } else if *slippage > high_slippage() {
        Severity::Warning
    } else {
        Severity::None
    }
}
