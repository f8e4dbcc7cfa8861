/*
[INPUT]:  Exchange config (optional YAML path argument, POLLING_* env overrides)
[OUTPUT]: Ticker, order books and trades printed to stdout
[POS]:    Examples - polling market data walkthrough
[UPDATE]: When the public polling API changes
*/

use anyhow::Context;
use exchange_polling_adapter::exchanges::mtgox::adapters;
use exchange_polling_adapter::*;
use tracing_subscriber::EnvFilter;

/// Example: poll public market data through the generic and raw interfaces
///
/// Run with `RUST_LOG=exchange_polling_adapter=debug` to see each request.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Polling Market Data Example ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => ExchangeConfig::from_file(&path).with_context(|| format!("loading {path}"))?,
        None => ExchangeConfig::new(ExchangeId::MtGox),
    }
    .with_env_overrides()?;

    // Generic path: any registered exchange behind the same trait object
    let registry = ExchangeRegistry::with_defaults();
    let service = registry.create(&config)?;
    println!("✓ {} service created", service.exchange());

    let btc_usd = CurrencyPair::from_codes("BTC", "USD")?;

    match service.get_ticker(&btc_usd).await {
        Ok(ticker) => println!("✓ Ticker: {:?}", ticker),
        Err(e) => println!("✗ Ticker error: {}", e),
    }

    match service.get_order_book(&btc_usd, OrderBookType::Partial).await {
        Ok(book) => println!(
            "✓ Partial book: {} asks, {} bids, spread {:?}",
            book.asks().len(),
            book.bids().len(),
            book.spread()
        ),
        Err(e) => println!("✗ Order book error: {}", e),
    }

    match service.get_order_book(&btc_usd, OrderBookType::Full).await {
        Ok(book) => println!("✓ Full book: {} asks, {} bids", book.asks().len(), book.bids().len()),
        Err(e) => println!("✗ Full order book error: {}", e),
    }

    let btc_pln = CurrencyPair::from_codes("BTC", "PLN")?;
    match service.get_trades(&btc_pln).await {
        Ok(trades) => println!("✓ {} BTC/PLN trades", trades.len()),
        Err(e) => println!("✗ Trades error: {}", e),
    }

    // Raw path: exchange-native DTOs, normalized on demand
    if config.exchange == ExchangeId::MtGox {
        let client = match &config.base_url {
            Some(url) => MarketDataClient::over_http_with_base_url(MtGox::new(), url, &config.client_config())?,
            None => MarketDataClient::over_http(MtGox::new(), &config.client_config())?,
        };

        match client.get_raw_ticker(&btc_usd).await {
            Ok(ticker) => println!(
                "✓ Raw ticker: last {:?}, vol {:?}",
                ticker.last.and_then(|v| v.display),
                ticker.vol.and_then(|v| v.display)
            ),
            Err(e) => println!("✗ Raw ticker error: {}", e),
        }

        match client.get_raw_order_book(&btc_usd, OrderBookType::Partial).await {
            Ok(depth) => match (
                adapters::adapt_orders(&depth.asks, &btc_usd, OrderSide::Ask),
                adapters::adapt_orders(&depth.bids, &btc_usd, OrderSide::Bid),
            ) {
                (Ok(asks), Ok(bids)) => println!("✓ Raw partial depth: {} asks, {} bids", asks.len(), bids.len()),
                (Err(e), _) | (_, Err(e)) => println!("✗ Normalization error: {}", e),
            },
            Err(e) => println!("✗ Raw depth error: {}", e),
        }

        match client.get_raw_order_book(&btc_usd, OrderBookType::Full).await {
            Ok(depth) => {
                println!("✓ Raw full depth: {} asks, {} bids", depth.asks.len(), depth.bids.len());
                match adapters::adapt_order_book(&depth, &btc_usd) {
                    Ok(book) => println!("✓ Full book normalized: {} levels", book.depth()),
                    Err(e) => println!("✗ Normalization error: {}", e),
                }
            }
            Err(e) => println!("✗ Raw depth error: {}", e),
        }

        match client.get_raw_trades(&btc_pln).await {
            Ok(raw) => println!("✓ {} raw BTC/PLN trades", raw.len()),
            Err(e) => println!("✗ Raw trades error: {}", e),
        }

        match client.get_trades(&btc_pln).await {
            Ok(trades) => {
                println!("✓ {} BTC/PLN trades", trades.len());
                if let Some(latest) = trades.latest() {
                    println!("  latest: {} @ {} ({})", latest.amount, latest.price, latest.timestamp);
                }
            }
            Err(e) => println!("✗ Trades error: {}", e),
        }
    }

    println!("\n✓ Market data example complete");
    Ok(())
}
