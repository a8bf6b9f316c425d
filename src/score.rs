//! Per-clique risk score for the greedy coloring.
//!
//! A 4-clique whose colored edges all agree may still end up monochromatic; its
//! penalty grows with the number `k` of edges already carrying that color:
//!
//! | colored edges          | penalty        |
//! |------------------------|----------------|
//! | none                   | \(2^{-5}\)     |
//! | `k` edges, one color   | \(2^{k-6}\)    |
//! | both colors present    | \(0\)          |
//!
//! Every value is a multiple of \(2^{-6}\), so the crate stores penalties as integer
//! [`PenaltyUnits`] of that size. Sums and comparisons are then exact regardless of
//! summation order.

use std::fmt;

// ============================================================================
// Color
// ============================================================================

/// One of the two edge colors. `A < B`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    /// First color.
    A,
    /// Second color.
    B,
}

impl Color {
    /// Both colors, ascending.
    pub const ALL: [Color; 2] = [Color::A, Color::B];

    /// `0` for `A`, `1` for `B`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Color::A => 0,
            Color::B => 1,
        }
    }

    /// The opposite color.
    #[inline(always)]
    pub const fn other(self) -> Color {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::A => write!(f, "A"),
            Color::B => write!(f, "B"),
        }
    }
}

// ============================================================================
// Policy constants
// ============================================================================

/// Number of edges in a 4-clique; also the exponent offset in \(2^{k-6}\).
pub const FULL_CLIQUE_EDGES: u32 = 6;

/// Penalty of a clique with no colored edge, \(2^{-5}\).
pub const UNCOLORED_PENALTY: f64 = 1.0 / 32.0;

/// Size of one [`PenaltyUnits`] step, \(2^{-6}\).
pub const PENALTY_UNIT: f64 = 1.0 / 64.0;

/// Penalty expressed as an integer multiple of [`PENALTY_UNIT`].
pub type PenaltyUnits = u64;

/// [`UNCOLORED_PENALTY`] in units.
pub const UNCOLORED_PENALTY_UNITS: PenaltyUnits = 2;

/// Converts units to the real-valued penalty.
#[inline(always)]
pub fn units_to_real(units: PenaltyUnits) -> f64 {
    units as f64 * PENALTY_UNIT
}

// ============================================================================
// Scoring
// ============================================================================

/// Per-color edge counts inside a single clique.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CliqueTally {
    counts: [u8; 2],
}

impl CliqueTally {
    /// Tally of a fully uncolored clique.
    pub const EMPTY: CliqueTally = CliqueTally { counts: [0, 0] };

    /// Counts the colored entries of `colors`.
    pub fn from_colors(colors: &[Option<Color>]) -> Self {
        let mut tally = Self::EMPTY;
        for c in colors.iter().flatten() {
            tally.add(*c);
        }
        tally
    }

    /// Number of edges with color `c`.
    #[inline(always)]
    pub fn count(self, c: Color) -> u8 {
        self.counts[c.index()]
    }

    /// Records one more edge of color `c`.
    #[inline(always)]
    pub fn add(&mut self, c: Color) {
        debug_assert!(
            u32::from(self.counts[0] + self.counts[1]) < FULL_CLIQUE_EDGES,
            "a clique has only six edges"
        );
        self.counts[c.index()] += 1;
    }

    /// This tally with one more edge of color `c`.
    #[inline(always)]
    #[must_use]
    pub fn with(mut self, c: Color) -> Self {
        self.add(c);
        self
    }

    /// Returns `true` if both colors are present.
    #[inline(always)]
    pub fn is_mixed(self) -> bool {
        self.counts[0] > 0 && self.counts[1] > 0
    }

    /// Returns `true` if all six edges carry the same color.
    #[inline(always)]
    pub fn is_monochromatic(self) -> bool {
        u32::from(self.counts[0]) == FULL_CLIQUE_EDGES
            || u32::from(self.counts[1]) == FULL_CLIQUE_EDGES
    }

    /// Penalty of this tally in units.
    #[inline(always)]
    pub fn penalty_units(self) -> PenaltyUnits {
        penalty_units_from_tally(self.counts[0], self.counts[1])
    }
}

/// Penalty in units for a clique with `a` edges of color `A` and `b` of color `B`.
#[inline(always)]
pub const fn penalty_units_from_tally(a: u8, b: u8) -> PenaltyUnits {
    if a > 0 && b > 0 {
        0
    } else {
        // One of the two is zero, so the sum is the size of the single color class.
        let k = a + b;
        if k == 0 {
            UNCOLORED_PENALTY_UNITS
        } else {
            // 2^(k-6) / 2^-6 = 2^k
            1 << k
        }
    }
}

/// Penalty in units for a clique whose edges currently carry `colors`.
#[inline]
pub fn penalty_units(colors: &[Option<Color>]) -> PenaltyUnits {
    CliqueTally::from_colors(colors).penalty_units()
}

/// Penalty of a clique whose edges currently carry `colors` (`None` = uncolored).
///
/// `0` when both colors appear, \(2^{-5}\) when nothing is colored, and
/// \(2^{k-6}\) when `k` edges share the only color present.
pub fn penalty(colors: &[Option<Color>]) -> f64 {
    units_to_real(penalty_units(colors))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn colors_with(k: usize, c: Color) -> [Option<Color>; 6] {
        let mut colors = [None; 6];
        for slot in colors.iter_mut().take(k) {
            *slot = Some(c);
        }
        colors
    }

    #[test]
    fn uncolored_clique_scores_two_to_minus_five() {
        assert_eq!(penalty(&[None; 6]), UNCOLORED_PENALTY);
        assert_eq!(UNCOLORED_PENALTY, 2f64.powi(-5));
        assert_eq!(units_to_real(UNCOLORED_PENALTY_UNITS), UNCOLORED_PENALTY);
    }

    #[test]
    fn uniform_cliques_score_two_to_k_minus_six() {
        for c in Color::ALL {
            for k in 1..=6 {
                let expected = 2f64.powi(k as i32 - FULL_CLIQUE_EDGES as i32);
                assert_eq!(penalty(&colors_with(k, c)), expected, "k={k} color={c}");
            }
        }
        assert_eq!(penalty(&colors_with(6, Color::B)), 1.0);
    }

    #[test]
    fn single_colored_edge_matches_uncolored_risk() {
        assert_eq!(penalty(&colors_with(1, Color::A)), UNCOLORED_PENALTY);
    }

    #[test]
    fn mixed_cliques_score_zero() {
        for a in 1..=5u8 {
            for b in 1..=(6 - a) {
                assert_eq!(penalty_units_from_tally(a, b), 0);
            }
        }
        let colors = [Some(Color::A), None, None, None, None, Some(Color::B)];
        assert_eq!(penalty(&colors), 0.0);
    }

    #[test]
    fn position_of_colored_edges_does_not_matter() {
        let spread = [Some(Color::B), None, Some(Color::B), None, Some(Color::B), None];
        assert_eq!(penalty(&spread), penalty(&colors_with(3, Color::B)));
    }

    #[test]
    fn tally_tracks_monochromatic_cliques() {
        let mut tally = CliqueTally::EMPTY;
        for _ in 0..6 {
            assert!(!tally.is_monochromatic());
            tally.add(Color::A);
        }
        assert!(tally.is_monochromatic());
        assert_eq!(tally.penalty_units(), 64);

        let mixed = CliqueTally::EMPTY.with(Color::A).with(Color::B);
        assert!(mixed.is_mixed());
        assert!(!mixed.is_monochromatic());
        assert_eq!(mixed.count(Color::A), 1);
    }

    #[test]
    fn color_helpers() {
        assert!(Color::A < Color::B);
        assert_eq!(Color::A.other(), Color::B);
        assert_eq!(Color::B.index(), 1);
        assert_eq!(Color::B.to_string(), "B");
    }
}
