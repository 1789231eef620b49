use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use crosswap_sdk::{
    metrics::{self, Severity, Slippage},
    state::ChainTokenMap,
    types::{MessageLevel, QuotePayload, Trade},
};

pub(crate) fn render(
    catalog: &ChainTokenMap,
    path: &Path,
    slippage: Option<&str>,
) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading quote {}", path.display()))?;
    let payload: QuotePayload = serde_json::from_slice(&bytes).context("parsing quote")?;
    let trade = Trade::from_payload(payload, catalog).context("resolving quote")?;

    println!(
        "{} {} {} -> {} {}",
        "Trade".bold(),
        trade.input_amount,
        trade.from_token().symbol(),
        trade.output_amount,
        trade.to_token().symbol(),
    );
    if let Some(price) = trade.execution_price() {
        println!(
            "  Rate: 1 {} = {} {}",
            trade.from_token().symbol(),
            price,
            trade.to_token().symbol()
        );
    }

    println!("  Route:");
    for step in &trade.steps {
        println!(
            "    {} {} (chain {} -> {})",
            step.protocol.blue(),
            format!("{} -> {}", step.from_token, step.to_token),
            step.chain_id,
            step.to_chain_id,
        );
    }

    let slippage = match slippage {
        Some(input) => {
            if !metrics::slippage_input_is_valid(input) {
                println!("{}", "  invalid slippage input, using default".yellow());
            }
            Slippage::with_max(input)
        },
        None => Slippage::default(),
    };
    let tolerance = slippage.tolerance();
    if let Some(percent) = slippage.max.as_deref().and_then(metrics::parse_percent)
        && metrics::slippage_warning(&percent) == Severity::Warning
    {
        println!("{}", "  high slippage increases the risk of price movement".yellow());
    }

    let minimum = metrics::minimum_amount_out(tolerance, &trade.output_amount)
        .context("computing minimum received")?;
    println!("  Minimum received: {} {}", minimum, trade.to_token().symbol());

    match metrics::price_impact(trade.input_usd_value.as_ref(), trade.output_usd_value.as_ref()) {
        Some(impact) => {
            let figure = impact.to_string();
            let figure = match impact.severity {
                Severity::None => figure.normal(),
                Severity::Warning => figure.yellow(),
                Severity::Error => figure.red(),
            };
            println!("  Price impact: {figure}");
        },
        None => println!("  Price impact: {}", "unknown (missing USD values)".dimmed()),
    }

    for message in &trade.messages {
        match message.level {
            MessageLevel::Info => println!("  note: {}", message.text),
            MessageLevel::Warning => println!("  note: {}", message.text.yellow()),
        }
    }

    Ok(())
}
