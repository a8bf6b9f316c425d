//! Post-hoc evaluation of finished colorings.

use crate::assignment::ColoringAssignment;
use crate::error::{ColoringError, Result};
use crate::graph::{CliqueIndex, choose4_checked};
use crate::score::CliqueTally;

// ============================================================================
// Public API
// ============================================================================

/// Counts the 4-cliques whose six edges all share one color.
///
/// # Errors
/// [`ColoringError::InvalidState`] if the assignment is not total or was built for a
/// different `n` than the index.
pub fn count_monochromatic_cliques(
    assignment: &ColoringAssignment,
    index: &CliqueIndex,
) -> Result<usize> {
    check_order(assignment, index)?;
    if !assignment.is_total() {
        return Err(ColoringError::InvalidState(format!(
            "assignment colors {} of {} edges; a complete coloring is required",
            assignment.len(),
            assignment.edge_count()
        )));
    }
    Ok(count_in(assignment, index))
}

/// Like [`count_monochromatic_cliques`], but a clique with any uncolored edge
/// simply does not count.
///
/// # Errors
/// [`ColoringError::InvalidState`] if the assignment was built for a different `n`.
pub fn count_monochromatic_cliques_partial(
    assignment: &ColoringAssignment,
    index: &CliqueIndex,
) -> Result<usize> {
    check_order(assignment, index)?;
    Ok(count_in(assignment, index))
}

/// Reference value `C(n, 4) / 32` (floor), the expected count under a uniformly
/// random coloring. Reporting only.
pub fn theoretical_minimum(n: usize) -> u64 {
    if let Some(c) = choose4_checked(n) {
        return (c / 32) as u64;
    }
    let n = n as u128;
    n.checked_mul(n - 1)
        .and_then(|p| p.checked_mul(n - 2))
        .and_then(|p| p.checked_mul(n - 3))
        .and_then(|p| u64::try_from(p / 24 / 32).ok())
        .unwrap_or(u64::MAX)
}

// ============================================================================
// Internal
// ============================================================================

fn check_order(assignment: &ColoringAssignment, index: &CliqueIndex) -> Result<()> {
    if assignment.n() != index.n() {
        return Err(ColoringError::InvalidState(format!(
            "assignment is for K_{}, index is for K_{}",
            assignment.n(),
            index.n()
        )));
    }
    Ok(())
}

fn count_in(assignment: &ColoringAssignment, index: &CliqueIndex) -> usize {
    let colors = assignment.colors();
    (0..index.clique_count())
        .filter(|&c| {
            let edge_colors = index.clique_edges(c).map(|e| colors[e]);
            CliqueTally::from_colors(&edge_colors).is_monochromatic()
        })
        .count()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Clique4, Edge, edges};
    use crate::score::Color;

    fn uniform(n: usize, c: Color) -> ColoringAssignment {
        let mut a = ColoringAssignment::empty(n);
        for e in edges(n) {
            a.insert(e, c).unwrap();
        }
        a
    }

    #[test]
    fn uniform_coloring_is_all_monochromatic() {
        let index = CliqueIndex::new(7).unwrap();
        let a = uniform(7, Color::B);
        assert_eq!(count_monochromatic_cliques(&a, &index).unwrap(), 35);
    }

    #[test]
    fn bipartite_split_counts_only_same_side_cliques() {
        // Color B between {0,1,2} and {3,..,7}, A inside each side.
        const N: usize = 8;
        let index = CliqueIndex::new(N).unwrap();
        let mut a = ColoringAssignment::empty(N);
        for e in edges(N) {
            let cross = (e.u() < 3) != (e.v() < 3);
            a.insert(e, if cross { Color::B } else { Color::A }).unwrap();
        }
        // Only 4-subsets of {3..7} are monochromatic: C(5, 4) = 5.
        assert_eq!(count_monochromatic_cliques(&a, &index).unwrap(), 5);
    }

    #[test]
    fn incomplete_assignment_is_rejected() {
        let index = CliqueIndex::new(5).unwrap();
        let mut a = ColoringAssignment::empty(5);
        a.insert(Edge::new(0, 1), Color::A).unwrap();
        assert!(matches!(
            count_monochromatic_cliques(&a, &index),
            Err(ColoringError::InvalidState(_))
        ));
    }

    #[test]
    fn partial_count_ignores_uncolored_cliques() {
        let index = CliqueIndex::new(5).unwrap();
        let mut a = ColoringAssignment::empty(5);
        for e in Clique4::new([0, 1, 2, 3]).edges() {
            a.insert(e, Color::A).unwrap();
        }
        assert_eq!(count_monochromatic_cliques_partial(&a, &index).unwrap(), 1);
    }

    #[test]
    fn mismatched_order_is_rejected() {
        let index = CliqueIndex::new(5).unwrap();
        let a = uniform(6, Color::A);
        assert!(matches!(
            count_monochromatic_cliques(&a, &index),
            Err(ColoringError::InvalidState(_))
        ));
        assert!(matches!(
            count_monochromatic_cliques_partial(&a, &index),
            Err(ColoringError::InvalidState(_))
        ));
    }

    #[test]
    fn theoretical_minimum_closed_form() {
        assert_eq!(theoretical_minimum(0), 0);
        assert_eq!(theoretical_minimum(5), 0);
        assert_eq!(theoretical_minimum(8), 2); // 70 / 32
        assert_eq!(theoretical_minimum(20), 151); // 4845 / 32
        assert_eq!(theoretical_minimum(30), 856); // 27405 / 32
    }

    #[test]
    fn empty_instances_count_zero() {
        for n in 0..4 {
            let index = CliqueIndex::new(n).unwrap();
            let a = uniform(n, Color::A);
            assert_eq!(count_monochromatic_cliques(&a, &index).unwrap(), 0);
        }
    }
}
