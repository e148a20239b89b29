//! One feed row -> one [`Order`].
//!
//! Row layout (comma separated, no header):
//!
//! ```text
//! <ref>,<participant>,<price>,<quantity>,<timestamp>,<side>
//! ```
//!
//! `ref` is an opaque record reference the engine does not use. `price` is
//! decimal text converted to cents. `side` is judged by its first character:
//! `B` for a bid, `S` for an offer.

use csv::StringRecord;

use crate::error::FeedError;
use crate::types::price::to_cents;
use crate::types::{Order, Side};

/// Number of columns a row must carry.
pub const FIELD_COUNT: usize = 6;

const PARTICIPANT: usize = 1;
const PRICE: usize = 2;
const QUANTITY: usize = 3;
const TIMESTAMP: usize = 4;
const SIDE: usize = 5;

/// Parse one feed row. `line` is only used in error messages.
pub fn parse_record(record: &StringRecord, line: u64) -> Result<Order, FeedError> {
    if record.len() < FIELD_COUNT {
        return Err(FeedError::MalformedRecord {
            line,
            reason: format!("expected {FIELD_COUNT} fields, found {}", record.len()),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default().trim();

    let participant = field(PARTICIPANT);
    if participant.is_empty() {
        return Err(FeedError::MalformedRecord {
            line,
            reason: "empty participant".into(),
        });
    }

    let price = to_cents(field(PRICE)).ok_or_else(|| FeedError::InvalidPrice {
        line,
        value: field(PRICE).to_owned(),
    })?;

    let quantity = field(QUANTITY)
        .parse::<u64>()
        .map_err(|e| FeedError::MalformedRecord {
            line,
            reason: format!("quantity {:?}: {e}", field(QUANTITY)),
        })?;

    let timestamp = field(TIMESTAMP)
        .parse::<u64>()
        .map_err(|e| FeedError::MalformedRecord {
            line,
            reason: format!("timestamp {:?}: {e}", field(TIMESTAMP)),
        })?;

    let side = field(SIDE)
        .chars()
        .next()
        .and_then(Side::from_feed_char)
        .ok_or_else(|| FeedError::UnknownSide {
            line,
            side: field(SIDE).to_owned(),
        })?;

    Ok(Order::new(participant, side, price, quantity, timestamp))
}
