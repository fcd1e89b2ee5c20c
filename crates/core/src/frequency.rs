//! Symbol frequency counting.

use std::collections::BTreeMap;

/// Maps each byte value present in some input to its (positive) count.
///
/// Iteration is in ascending symbol order. A symbol is never stored with a
/// count of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyMap {
    counts: BTreeMap<u8, u64>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `data`.
    ///
    /// ```
    /// use huftree_core::frequency::FrequencyMap;
    ///
    /// let freq = FrequencyMap::from_bytes(&[65, 66, 67, 66]);
    /// assert_eq!(freq.get(66), Some(2));
    /// assert_eq!(freq.len(), 3);
    /// ```
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = [0u64; 256];
        for &byte in data {
            table[byte as usize] += 1;
        }

        table
            .iter()
            .enumerate()
            .map(|(symbol, &count)| (symbol as u8, count))
            .collect()
    }

    pub fn get(&self, symbol: u8) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.counts.contains_key(&symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}

/// Zero counts are dropped; repeated symbols accumulate.
impl FromIterator<(u8, u64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (symbol, count) in iter {
            if count > 0 {
                *counts.entry(symbol).or_insert(0) += count;
            }
        }
        Self { counts }
    }
}
