//! Net position per participant.

use std::collections::BTreeMap;

use crate::error::EngineError;

/// Signed net traded quantity per participant.
///
/// Positive means net bought, negative means net sold. An entry appears
/// (at zero) the first time a participant is seen and is never removed.
/// Entries iterate in participant order, which keeps reports and the state
/// root stable from run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionLedger {
    positions: BTreeMap<String, i64>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `participant` has an entry, starting at zero
    pub fn touch(&mut self, participant: &str) {
        if !self.positions.contains_key(participant) {
            self.positions.insert(participant.to_owned(), 0);
        }
    }

    /// Net position, `None` if the participant was never seen
    pub fn get(&self, participant: &str) -> Option<i64> {
        self.positions.get(participant).copied()
    }

    /// Net position, zero for a participant that was never seen
    pub fn position(&self, participant: &str) -> i64 {
        self.get(participant).unwrap_or(0)
    }

    /// Apply one fill: the buyer gains `quantity`, the seller loses it.
    ///
    /// A fill where buyer and seller are the same participant leaves the
    /// ledger unchanged. Both new positions are computed before either is
    /// written, so an overflow leaves the ledger exactly as it was.
    ///
    /// # Returns
    ///
    /// `true` if the ledger changed, `false` for a self trade.
    pub fn record_fill(
        &mut self,
        buyer: &str,
        seller: &str,
        quantity: u64,
    ) -> Result<bool, EngineError> {
        if buyer == seller {
            return Ok(false);
        }

        let delta = i64::try_from(quantity)
            .map_err(|_| EngineError::QuantityOverflow("fill quantity exceeds i64"))?;

        let bought = self
            .position(buyer)
            .checked_add(delta)
            .ok_or_else(|| EngineError::PositionOverflow {
                participant: buyer.to_owned(),
            })?;
        let sold = self
            .position(seller)
            .checked_sub(delta)
            .ok_or_else(|| EngineError::PositionOverflow {
                participant: seller.to_owned(),
            })?;

        self.positions.insert(buyer.to_owned(), bought);
        self.positions.insert(seller.to_owned(), sold);
        Ok(true)
    }

    /// Number of participants seen
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Entries in participant order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.positions.iter().map(|(name, &pos)| (name.as_str(), pos))
    }

    /// Sum of every position; zero whenever only fills have touched the ledger
    pub fn net(&self) -> i128 {
        self.positions.values().map(|&p| p as i128).sum()
    }
}
