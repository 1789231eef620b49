use serde::Deserialize;

use super::{ChainId, Currency, CurrencyAmount, TokenAddress};
use crate::{error::Error, num, state::ChainTokenMap};

/// One hop of a (possibly cross-chain) route.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub protocol: String,
    pub chain_id: ChainId,
    pub from_token: TokenAddress,
    pub to_token: TokenAddress,
    pub to_chain_id: ChainId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
}

/// Free-form note attached to a quote by the routing service.
#[derive(Clone, Debug, Deserialize)]
pub struct TradeMessage {
    #[serde(rename = "type")]
    pub level: MessageLevel,
    #[serde(rename = "message")]
    pub text: String,
}

/// Quote payload as returned by the routing service.
///
/// The service is a black box; only the fields consumed here are modeled.
/// Amounts are integer strings in the respective token's smallest unit, USD
/// values are decimal strings.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    pub input_amount: String,
    pub output_amount: String,
    #[serde(default)]
    pub input_amount_usd_value: Option<String>,
    #[serde(default)]
    pub output_amount_usd_value: Option<String>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub messages: Vec<TradeMessage>,
}

/// A quote resolved against the token catalog.
///
/// Transient: owned by whoever requested the quote, recomputed per request,
/// no cross-request identity.
#[derive(Clone, Debug)]
pub struct Trade {
    pub input_amount: CurrencyAmount,
    pub output_amount: CurrencyAmount,
    pub input_usd_value: Option<CurrencyAmount>,
    pub output_usd_value: Option<CurrencyAmount>,
    pub steps: Vec<Step>,
    pub messages: Vec<TradeMessage>,
}

impl Trade {
    /// Resolves a quote payload against the catalog.
    ///
    /// The first step's input token and the last step's output token are the
    /// user-facing input/output; an empty route or a token the catalog does
    /// not know is a parse failure.
    pub fn from_payload(payload: QuotePayload, catalog: &ChainTokenMap) -> Result<Self, Error> {
        let first = payload
            .steps
            .first()
            .ok_or_else(|| Error::Parse("quote has no steps".to_owned()))?;
        let last = payload
            .steps
            .last()
            .ok_or_else(|| Error::Parse("quote has no steps".to_owned()))?;

        let input = catalog
            .get(first.chain_id, &first.from_token)
            .ok_or_else(|| {
                Error::Parse(format!(
                    "unknown input token {} on chain {}",
                    first.from_token, first.chain_id
                ))
            })?
            .clone();
        let output = catalog
            .get(last.to_chain_id, &last.to_token)
            .ok_or_else(|| {
                Error::Parse(format!(
                    "unknown output token {} on chain {}",
                    last.to_token, last.to_chain_id
                ))
            })?
            .clone();

        let input_amount = payload
            .input_amount
            .parse()
            .map_err(|err| Error::Parse(format!("input amount: {err}")))?;
        let output_amount = payload
            .output_amount
            .parse()
            .map_err(|err| Error::Parse(format!("output amount: {err}")))?;

        Ok(Self {
            input_amount: CurrencyAmount::from_raw(Currency::from_descriptor(input), input_amount),
            output_amount: CurrencyAmount::from_raw(
                Currency::from_descriptor(output),
                output_amount,
            ),
            input_usd_value: payload
                .input_amount_usd_value
                .as_deref()
                .and_then(|value| CurrencyAmount::usd(value).ok()),
            output_usd_value: payload
                .output_amount_usd_value
                .as_deref()
                .and_then(|value| CurrencyAmount::usd(value).ok()),
            steps: payload.steps,
            messages: payload.messages,
        })
    }

    pub fn from_token(&self) -> &Currency { self.input_amount.currency() }

    pub fn to_token(&self) -> &Currency { self.output_amount.currency() }

    /// Output received per one whole unit of input, truncated to the output
    /// currency's precision. `None` for a zero input amount.
    pub fn execution_price(&self) -> Option<CurrencyAmount> {
        if self.input_amount.is_zero() {
            return None;
        }
        let input_scale = num::pow10(self.input_amount.currency().decimals())?;
        let raw = num::mul_div(self.output_amount.raw(), input_scale, self.input_amount.raw())?;
        Some(CurrencyAmount::from_raw(self.output_amount.currency().clone(), raw))
    }
}
