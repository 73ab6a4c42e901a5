//! Discrete cash dividends.
//!
//! A [`Dividend`] is a known cash amount paid at a known time, measured in
//! years from the valuation date. Day-count conversion happens upstream; the
//! schedule only ever sees year fractions.
//!
//! A [`DividendSchedule`] keeps the caller's order. Entries outside the
//! pricing horizon are legal and simply have no effect on the lattice.

use dl_core::{ensure, Real, Result, Time};

/// A single discrete cash dividend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dividend {
    /// Payment time in years from the valuation date.
    pub time: Time,
    /// Cash amount per share.
    pub amount: Real,
}

impl Dividend {
    /// Create a dividend of `amount` paid at `time`.
    pub fn new(time: Time, amount: Real) -> Self {
        Self { time, amount }
    }

    /// Whether the payment falls inside `[0, horizon)`.
    #[inline]
    pub fn is_within(&self, horizon: Time) -> bool {
        self.time >= 0.0 && self.time < horizon
    }
}

impl From<(Time, Real)> for Dividend {
    fn from((time, amount): (Time, Real)) -> Self {
        Self { time, amount }
    }
}

/// An unordered collection of discrete dividends.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DividendSchedule {
    dividends: Vec<Dividend>,
}

impl DividendSchedule {
    /// An empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from parallel arrays of times and amounts.
    ///
    /// # Errors
    /// Returns a precondition error if the slices differ in length.
    pub fn from_parallel(times: &[Time], amounts: &[Real]) -> Result<Self> {
        ensure!(
            times.len() == amounts.len(),
            "dividend times ({}) and amounts ({}) differ in length",
            times.len(),
            amounts.len()
        );
        Ok(times
            .iter()
            .zip(amounts)
            .map(|(&time, &amount)| Dividend::new(time, amount))
            .collect())
    }

    /// Append a dividend.
    pub fn push(&mut self, dividend: Dividend) {
        self.dividends.push(dividend);
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, time: Time, amount: Real) -> Self {
        self.push(Dividend::new(time, amount));
        self
    }

    /// Number of entries, including any outside the pricing horizon.
    pub fn len(&self) -> usize {
        self.dividends.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.dividends.is_empty()
    }

    /// All entries in the caller's order.
    pub fn dividends(&self) -> &[Dividend] {
        &self.dividends
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Dividend> {
        self.dividends.iter()
    }

    /// Entries paid inside `[0, horizon)`, sorted by payment time.
    pub fn in_window(&self, horizon: Time) -> Vec<Dividend> {
        let mut inside: Vec<Dividend> = self
            .dividends
            .iter()
            .copied()
            .filter(|d| d.is_within(horizon))
            .collect();
        inside.sort_by(|a, b| a.time.total_cmp(&b.time));
        inside
    }

    /// The schedule as `(time, amount)` pairs in the caller's order.
    pub fn as_pairs(&self) -> Vec<(Time, Real)> {
        self.dividends.iter().map(|d| (d.time, d.amount)).collect()
    }
}

impl FromIterator<Dividend> for DividendSchedule {
    fn from_iter<I: IntoIterator<Item = Dividend>>(iter: I) -> Self {
        Self {
            dividends: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<(Time, Real)>> for DividendSchedule {
    fn from(pairs: Vec<(Time, Real)>) -> Self {
        pairs.into_iter().map(Dividend::from).collect()
    }
}

impl From<&[(Time, Real)]> for DividendSchedule {
    fn from(pairs: &[(Time, Real)]) -> Self {
        pairs.iter().copied().map(Dividend::from).collect()
    }
}

impl<'a> IntoIterator for &'a DividendSchedule {
    type Item = &'a Dividend;
    type IntoIter = std::slice::Iter<'a, Dividend>;

    fn into_iter(self) -> Self::IntoIter {
        self.dividends.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_arrays() {
        let s = DividendSchedule::from_parallel(&[0.25, 0.75], &[0.8, 0.8]).unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.dividends()[1], Dividend::new(0.75, 0.8));
    }

    #[test]
    fn parallel_length_mismatch_is_rejected() {
        let err = DividendSchedule::from_parallel(&[0.25, 0.75], &[0.8]).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn window_filters_and_sorts() {
        let s = DividendSchedule::new()
            .with(0.9, 1.0)
            .with(-0.1, 1.0)
            .with(0.2, 0.5)
            .with(1.0, 2.0);
        let inside = s.in_window(1.0);
        assert_eq!(inside, vec![Dividend::new(0.2, 0.5), Dividend::new(0.9, 1.0)]);
        // The schedule itself keeps every entry in the caller's order.
        assert_eq!(s.len(), 4);
        assert_eq!(s.dividends()[0].time, 0.9);
    }

    #[test]
    fn from_pairs() {
        let s: DividendSchedule = vec![(0.5, 1.0)].into();
        assert_eq!(s.as_pairs(), vec![(0.5, 1.0)]);
        assert!(DividendSchedule::new().is_empty());
    }
}
