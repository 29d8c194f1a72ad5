use std::collections::HashMap;

use serde::Serialize;

use crate::coingecko::{CoinMarket, SimplePrice};

/// One entry of the scrolling price ticker, with display strings ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerItem {
    pub id: String,
    pub price: Option<f64>,
    pub change_24h: Option<f64>,
    pub price_text: String,
    pub change_text: String,
}

impl TickerItem {
    fn new(id: &str, price: Option<f64>, change_24h: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            price,
            change_24h,
            price_text: price.map_or_else(|| "-".to_string(), format_price),
            change_text: change_24h.map_or_else(|| "-".to_string(), format_change),
        }
    }
}

/// Items in the order of `ids`; ids CoinGecko did not return are skipped.
pub fn items_from_prices(ids: &[&str], prices: &HashMap<String, SimplePrice>) -> Vec<TickerItem> {
    ids.iter()
        .filter_map(|id| {
            let p = prices.get(*id)?;
            Some(TickerItem::new(id, p.price, p.change_24h))
        })
        .collect()
}

pub fn items_from_coins(coins: &[CoinMarket]) -> Vec<TickerItem> {
    coins
        .iter()
        .map(|c| TickerItem::new(&c.id, c.current_price, c.price_change_percentage_24h))
        .collect()
}

fn group_thousands(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// `$67,250.00` for prices of at least a dollar, six significant digits below that
/// (`$0.123457`, `$0.0000123457`), never fewer than two decimals.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let abs = value.abs();

    if abs >= 1.0 || abs == 0.0 {
        let fixed = format!("{abs:.2}");
        let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        return format!("{}${}.{frac}", sign(value), group_thousands(int_part));
    }

    let leading_zeros = (-abs.log10().floor()) as usize - 1;
    let decimals = leading_zeros + 6;
    let fixed = format!("{abs:.decimals$}");
    let trimmed = fixed.trim_end_matches('0');
    let body = match trimmed.split_once('.') {
        Some((_, frac)) if frac.len() < 2 => format!("{abs:.2}"),
        _ => trimmed.to_string(),
    };
    format!("{}${body}", sign(value))
}

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// `$1.33T`, `$418.00B`, `$12.50M`, `$3.20K`, or two decimals under a thousand.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let mut scaled = value.abs();
    let mut suffix = 0;
    // Compare the rounded value so 999.999 becomes $1.00K rather than $1000.00.
    while suffix + 1 < COMPACT_SUFFIXES.len() && (scaled * 100.0).round() >= 100_000.0 {
        scaled /= 1e3;
        suffix += 1;
    }
    let suffix = COMPACT_SUFFIXES[suffix];
    format!("{}${scaled:.2}{suffix}", sign(value))
}

/// `+1.85%`, `-0.75%`.
pub fn format_change(pct: f64) -> String {
    if !pct.is_finite() {
        return "-".to_string();
    }
    format!("{pct:+.2}%")
}
