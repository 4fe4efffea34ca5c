//! Symbol normalization
//!
//! Maps free-text user input (aliases, casing, stray whitespace) to the
//! canonical ticker form the upstream feed understands. Pure lookup, no I/O,
//! no failure mode.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static SYMBOL_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Crypto
        ("btc", "BTC-USD"),
        ("bitcoin", "BTC-USD"),
        ("eth", "ETH-USD"),
        ("ethereum", "ETH-USD"),
        ("egld", "EGLD-USD"),
        // Forex
        ("eurusd", "EURUSD=X"),
        ("eur-usd", "EURUSD=X"),
        ("eur/usd", "EURUSD=X"),
        ("usdrub", "USDRUB=X"),
        ("usd-rub", "USDRUB=X"),
        ("usd/rub", "USDRUB=X"),
        ("eurron", "EURRON=X"),
        ("eur-ron", "EURRON=X"),
        ("eur/ron", "EURRON=X"),
        ("usdron", "USDRON=X"),
        ("usd-ron", "USDRON=X"),
        // Stocks
        ("nvidia", "NVDA"),
        ("tsla", "TSLA"),
        ("aapl", "AAPL"),
        ("amd", "AMD"),
        ("msft", "MSFT"),
    ])
});

/// Canonical ticker form for any user input.
///
/// Trims, lowercases, consults the alias table; a miss falls through to the
/// upper-cased trimmed input. Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(input: &str) -> String {
    let key = input.trim().to_lowercase();
    match SYMBOL_ALIASES.get(key.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => key.to_uppercase(),
    }
}

/// Display currency symbol for a canonical ticker
pub fn currency_symbol(symbol: &str) -> &'static str {
    let sym = symbol.to_uppercase();
    if sym.ends_with("-USD") || sym.ends_with("=X") || sym.contains("USD") {
        "$"
    } else if sym.contains("EUR") {
        "\u{20ac}"
    } else if sym.contains("RON") {
        "lei"
    } else {
        ""
    }
}
