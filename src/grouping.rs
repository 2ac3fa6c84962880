#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Splits students into high, low and middle groups by total score.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::GROUP_PERCENT;

/// Group a student belongs to for discrimination purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    /// Top students by total score.
    High,
    /// Bottom students by total score.
    Low,
    /// Everyone else.
    Middle,
}

/// Size of the high and low groups for `n` students: `floor(n * 0.27)`.
pub fn group_size_for(n: usize) -> usize {
    n * GROUP_PERCENT / 100
}

/// Dense ranks of `totals`, highest total first.
///
/// Equal totals share a rank and the next distinct total gets the next rank,
/// so ranks run `1..=distinct_totals` without gaps.
///
/// `-0.0` and `0.0` are the same total.
pub fn dense_ranks(totals: &[f64]) -> Vec<usize> {
    let totals = totals.iter().map(|t| t + 0.0).collect::<Vec<_>>();
    let distinct = totals
        .iter()
        .copied()
        .sorted_by(|a, b| b.total_cmp(a))
        .dedup()
        .collect::<Vec<_>>();

    totals
        .iter()
        .map(|t| distinct.partition_point(|d| d.total_cmp(t) == Ordering::Greater) + 1)
        .collect()
}

/// The outcome of splitting a class into groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSplit {
    /// Dense rank of each student, in input order.
    ranks:  Vec<usize>,
    /// Group of each student, in input order.
    groups: Vec<Group>,
    /// Indices of high-group students, best first.
    high:   Vec<usize>,
    /// Indices of low-group students, in rank order.
    low:    Vec<usize>,
}

impl GroupSplit {
    /// Splits students given their totals, in input order.
    ///
    /// Students are stable-sorted by dense rank; the first `floor(n * 0.27)`
    /// positions form the high group and the last as many form the low group.
    /// Ties at a boundary are cut by position, so both groups always have
    /// exactly that many members.
    pub fn from_totals(totals: &[f64]) -> Self {
        let n = totals.len();
        let ranks = dense_ranks(totals);
        let order = (0..n).sorted_by_key(|&i| ranks[i]).collect::<Vec<_>>();
        let g = group_size_for(n);

        let high = order[..g].to_vec();
        let low = order[n - g..].to_vec();

        let mut groups = vec![Group::Middle; n];
        for &i in &high {
            groups[i] = Group::High;
        }
        for &i in &low {
            groups[i] = Group::Low;
        }

        Self {
            ranks,
            groups,
            high,
            low,
        }
    }

    /// Members per group used as the D denominator; the smaller of the two
    /// group sizes.
    pub fn group_size(&self) -> usize {
        self.high.len().min(self.low.len())
    }

    /// Whether the groups are large enough to compute discrimination.
    pub fn is_defined(&self) -> bool {
        self.group_size() > 0
    }

    /// Group of the student at `index`.
    pub fn group_of(&self, index: usize) -> Option<Group> {
        self.groups.get(index).copied()
    }

    /// Dense rank of the student at `index`.
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.ranks.get(index).copied()
    }

    /// Group of every student, in input order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Indices of the high group.
    pub fn high(&self) -> &[usize] {
        &self.high
    }

    /// Indices of the low group.
    pub fn low(&self) -> &[usize] {
        &self.low
    }
}
