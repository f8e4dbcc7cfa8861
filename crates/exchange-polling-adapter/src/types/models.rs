/*
[INPUT]:  Normalized values produced by exchange adapters
[OUTPUT]: Exchange-independent Ticker, OrderBook and Trades snapshots
[POS]:    Data layer - unified domain model returned to callers
[UPDATE]: When domain fields or book invariants change
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currency::CurrencyPair;
use super::enums::OrderSide;
use crate::http::{MarketDataError, Result};

/// Latest summary snapshot for a pair.
///
/// Every numeric field is optional: `None` means the exchange did not report
/// the value. Present prices are never negative; crossed markets
/// (`bid > ask`) are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub currency_pair: CurrencyPair,
    pub last: Option<Decimal>,
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub vwap: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Ticker {
    /// Reject negative prices or volume.
    pub fn validate(self) -> Result<Self> {
        let fields = [
            ("last", self.last),
            ("bid", self.bid),
            ("ask", self.ask),
            ("high", self.high),
            ("low", self.low),
            ("vwap", self.vwap),
            ("volume", self.volume),
        ];
        for (name, value) in fields {
            if value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
                return Err(MarketDataError::Parse(format!(
                    "ticker {name} is negative for {}",
                    self.currency_pair
                )));
            }
        }
        Ok(self)
    }
}

/// A resting limit order as seen in an order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    side: OrderSide,
    limit_price: Decimal,
    tradable_amount: Decimal,
    currency_pair: CurrencyPair,
    id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl LimitOrder {
    pub fn new(
        side: OrderSide,
        limit_price: Decimal,
        tradable_amount: Decimal,
        currency_pair: CurrencyPair,
        id: Option<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            side,
            limit_price,
            tradable_amount,
            currency_pair,
            id,
            timestamp,
        }
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn limit_price(&self) -> Decimal {
        self.limit_price
    }

    pub fn tradable_amount(&self) -> Decimal {
        self.tradable_amount
    }

    pub fn currency_pair(&self) -> &CurrencyPair {
        &self.currency_pair
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

/// Asks ascending by price, bids descending by price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBook {
    asks: Vec<LimitOrder>,
    bids: Vec<LimitOrder>,
    timestamp: Option<DateTime<Utc>>,
}

impl OrderBook {
    /// Build a book, checking side tags and per-side price ranking.
    ///
    /// Levels are never re-sorted here; an out-of-order side is a `Parse`
    /// error because downstream best-bid/best-ask logic depends on it.
    pub fn new(
        asks: Vec<LimitOrder>,
        bids: Vec<LimitOrder>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        check_side(&asks, OrderSide::Ask)?;
        check_side(&bids, OrderSide::Bid)?;

        if let Some(pos) = asks
            .windows(2)
            .position(|w| w[0].limit_price > w[1].limit_price)
        {
            return Err(MarketDataError::Parse(format!(
                "asks not ascending at level {}: {} > {}",
                pos,
                asks[pos].limit_price,
                asks[pos + 1].limit_price
            )));
        }
        if let Some(pos) = bids
            .windows(2)
            .position(|w| w[0].limit_price < w[1].limit_price)
        {
            return Err(MarketDataError::Parse(format!(
                "bids not descending at level {}: {} < {}",
                pos,
                bids[pos].limit_price,
                bids[pos + 1].limit_price
            )));
        }

        Ok(Self {
            asks,
            bids,
            timestamp,
        })
    }

    pub fn asks(&self) -> &[LimitOrder] {
        &self.asks
    }

    pub fn bids(&self) -> &[LimitOrder] {
        &self.bids
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn best_ask(&self) -> Option<&LimitOrder> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&LimitOrder> {
        self.bids.first()
    }

    /// Best ask minus best bid. Negative when the book is crossed.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.limit_price - self.best_bid()?.limit_price)
    }

    /// Total number of levels on both sides.
    pub fn depth(&self) -> usize {
        self.asks.len() + self.bids.len()
    }
}

fn check_side(orders: &[LimitOrder], expected: OrderSide) -> Result<()> {
    match orders.iter().find(|order| order.side != expected) {
        Some(order) => Err(MarketDataError::Parse(format!(
            "{:?} order at {} placed on the {:?} side",
            order.side, order.limit_price, expected
        ))),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub price: Decimal,
    pub amount: Decimal,
    pub currency_pair: CurrencyPair,
    pub timestamp: DateTime<Utc>,
    pub id: String,
    /// Maker side when the exchange reports it.
    pub side: Option<OrderSide>,
}

/// Recent trades, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trades {
    trades: Vec<Trade>,
}

impl Trades {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn latest(&self) -> Option<&Trade> {
        self.trades.last()
    }

    pub fn into_inner(self) -> Vec<Trade> {
        self.trades
    }
}

impl IntoIterator for Trades {
    type Item = Trade;
    type IntoIter = std::vec::IntoIter<Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.into_iter()
    }
}
