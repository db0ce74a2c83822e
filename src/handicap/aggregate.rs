/// Handicap of a player with no usable rounds, and the upper bound.
pub const MAX_HANDICAP: f64 = 54.0;
pub const MIN_HANDICAP: f64 = 0.0;
/// Only this many of the most recent rounds feed the published index.
pub const MAX_RECENT_ROUNDS: usize = 20;
/// Multiplier applied by the history approximation.
pub const HISTORY_BONUS_FACTOR: f64 = 0.96;

/// How a set of differentials becomes a handicap index.
///
/// `Whs` is the published index. `HistoryApproximation` is the coarser rule
/// used when replaying past rounds for the history chart; the two disagree on
/// purpose and are not interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandicapMethod {
    Whs,
    HistoryApproximation,
}

impl HandicapMethod {
    /// Number of lowest differentials averaged for `round_count` rounds.
    /// `None` means too few rounds to aggregate.
    #[must_use]
    pub fn scores_to_use(self, round_count: usize) -> Option<usize> {
        match self {
            Self::Whs => whs_scores_to_use(round_count),
            Self::HistoryApproximation => history_scores_to_use(round_count),
        }
    }

    #[must_use]
    pub fn adjustment_factor(self) -> f64 {
        match self {
            Self::Whs => 1.0,
            Self::HistoryApproximation => HISTORY_BONUS_FACTOR,
        }
    }

    /// Handicap index for `differentials`, most recent first.
    #[must_use]
    pub fn compute(self, differentials: &[f64]) -> f64 {
        let considered = match self {
            Self::Whs => &differentials[..differentials.len().min(MAX_RECENT_ROUNDS)],
            Self::HistoryApproximation => differentials,
        };
        let Some(count) = self.scores_to_use(considered.len()) else {
            return MAX_HANDICAP;
        };
        let average = mean_of_lowest(considered, count) * self.adjustment_factor();
        clamp_index(round_to_tenth(average))
    }
}

fn whs_scores_to_use(round_count: usize) -> Option<usize> {
    match round_count {
        0 => None,
        1..=2 => Some(1),
        3..=5 => Some(2),
        6..=8 => Some(3),
        9..=11 => Some(4),
        12..=15 => Some(5),
        16..=18 => Some(6),
        19 => Some(7),
        _ => Some(8),
    }
}

fn history_scores_to_use(round_count: usize) -> Option<usize> {
    match round_count {
        n if n >= 20 => Some(8),
        // floor(n * 0.4) without going through floats
        n if n >= 6 => Some(n * 2 / 5),
        n if n >= 3 => Some(1),
        _ => None,
    }
}

/// Arithmetic mean of the `count` lowest values. `count` is capped at the
/// number of values; an empty selection yields `MAX_HANDICAP`.
#[must_use]
pub fn mean_of_lowest(differentials: &[f64], count: usize) -> f64 {
    let mut sorted = differentials.to_vec();
    sorted.sort_by(f64::total_cmp);
    let best = &sorted[..count.min(sorted.len())];
    if best.is_empty() {
        return MAX_HANDICAP;
    }
    best.iter().sum::<f64>() / best.len() as f64
}

/// Round to one decimal, halves toward positive infinity (2.25 -> 2.3,
/// -0.25 -> -0.2).
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

#[must_use]
pub fn clamp_index(value: f64) -> f64 {
    value.clamp(MIN_HANDICAP, MAX_HANDICAP)
}

/// Published handicap index from a player's differentials, most recent first.
/// Entries beyond the 20 most recent are ignored.
#[must_use]
pub fn compute_handicap(recent_differentials: &[f64]) -> f64 {
    HandicapMethod::Whs.compute(recent_differentials)
}
