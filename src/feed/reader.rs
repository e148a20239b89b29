//! Streaming reader over a feed file, plain or gzip compressed.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecordsIntoIter, Trim};
use flate2::read::MultiGzDecoder;
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::feed::record::parse_record;
use crate::types::Order;

/// First two bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Iterator of orders in feed order.
///
/// Rows with an unrecognised side are skipped with a warning and counted in
/// [`FeedReader::skipped`]. Any other bad row is returned as an error. A
/// timestamp lower than the previous row's is logged but the row is still
/// yielded: the engine processes strictly in arrival order.
pub struct FeedReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    last_timestamp: Option<u64>,
    rows: u64,
    skipped: u64,
}

impl FeedReader<Box<dyn Read>> {
    /// Open a feed file. Gzip input is detected from its magic bytes and
    /// decompressed on the fly.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let mut file = BufReader::new(File::open(path)?);
        let compressed = file.fill_buf()?.starts_with(&GZIP_MAGIC);
        debug!(path = %path.display(), compressed, "opening feed");

        let input: Box<dyn Read> = if compressed {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self::from_reader(input))
    }
}

impl<R: Read> FeedReader<R> {
    /// Read uncompressed rows from any reader
    pub fn from_reader(input: R) -> Self {
        let records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input)
            .into_records();

        Self {
            records,
            last_timestamp: None,
            rows: 0,
            skipped: 0,
        }
    }

    /// Rows read so far, skipped ones included
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Rows dropped because their side was not recognised
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: Read> Iterator for FeedReader<R> {
    type Item = Result<Order, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err.into())),
            };
            self.rows += 1;
            let line = record.position().map_or(self.rows, |pos| pos.line());

            match parse_record(&record, line) {
                Ok(order) => {
                    if let Some(last) = self.last_timestamp {
                        if order.timestamp < last {
                            warn!(line, timestamp = order.timestamp, previous = last, "timestamp went backwards");
                        }
                    }
                    self.last_timestamp = Some(order.timestamp);
                    return Some(Ok(order));
                }
                Err(FeedError::UnknownSide { line, side }) => {
                    warn!(line, %side, "skipping row with unknown side");
                    self.skipped += 1;
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
