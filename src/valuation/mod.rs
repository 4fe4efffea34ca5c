//! Portfolio valuation
//!
//! Joins holdings with current quotes to compute value and profit/loss.
//! One quote call per holding: a failing symbol yields a degraded row but
//! never aborts valuation of the others.

use crate::feed::LiveFeed;
use crate::models::{EnrichedHolding, Holding, QuoteSource};
use crate::symbols::currency_symbol;
use crate::MarketDataClient;

/// Enrich holdings with current prices, order-preserving.
///
/// On a successful quote: `value = quantity * price`, `pl = value -
/// total_spent`, `pl_percent` guarded against a zero cost basis. On failure:
/// `current_price` and `value` are `None`, P/L fields are zero and the row
/// is tagged `local-cache`.
pub async fn enrich<F: LiveFeed>(
    holdings: &[Holding],
    client: &MarketDataClient<F>,
) -> Vec<EnrichedHolding> {
    let mut enriched = Vec::with_capacity(holdings.len());

    for h in holdings {
        let total_spent = h.quantity * h.buy_price;

        let row = match client.get_quote(&h.symbol).await {
            Ok(quote) => {
                let value = h.quantity * quote.price;
                let pl = value - total_spent;
                let pl_percent = if total_spent == 0.0 {
                    0.0
                } else {
                    pl / total_spent * 100.0
                };
                EnrichedHolding {
                    symbol: h.symbol.clone(),
                    quantity: h.quantity,
                    buy_price: h.buy_price,
                    total_spent,
                    current_price: Some(quote.price),
                    value: Some(value),
                    pl,
                    pl_percent,
                    currency_symbol: currency_symbol(&h.symbol).to_string(),
                    source: quote.source,
                }
            }
            Err(e) => {
                log::warn!("Valuation degraded for {}: {}", h.symbol, e);
                EnrichedHolding {
                    symbol: h.symbol.clone(),
                    quantity: h.quantity,
                    buy_price: h.buy_price,
                    total_spent,
                    current_price: None,
                    value: None,
                    pl: 0.0,
                    pl_percent: 0.0,
                    currency_symbol: currency_symbol(&h.symbol).to_string(),
                    source: QuoteSource::LocalCache,
                }
            }
        };
        enriched.push(row);
    }

    enriched
}
