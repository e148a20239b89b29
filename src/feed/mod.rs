//! Order feed: turns the comma separated input file into [`Order`]s.
//!
//! The engine never depends on this module; it only consumes the orders it
//! yields.
//!
//! [`Order`]: crate::types::Order

pub mod reader;
pub mod record;

pub use reader::FeedReader;
pub use record::parse_record;
