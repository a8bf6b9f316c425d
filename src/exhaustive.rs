//! Exact minimum over all colorings, for instances small enough to enumerate.

use crate::assignment::ColoringAssignment;
use crate::error::{ColoringError, Result};
use crate::graph::CliqueIndex;
use crate::score::Color;
use std::sync::atomic::{AtomicBool, Ordering};

/// Colorings examined between polls of the cancellation flag.
const CANCEL_POLL_PERIOD: u32 = 1 << 16;

/// Largest edge count accepted by [`minimum_monochromatic`] (\(K_7\) has 21 edges).
pub const MAX_EXHAUSTIVE_EDGES: usize = 24;

/// Outcome of an exhaustive search.
#[derive(Clone, Debug)]
pub struct ExhaustiveResult {
    /// Fewest monochromatic 4-cliques over all colorings.
    pub minimum: usize,
    /// First coloring (in enumeration order) that attains `minimum`.
    pub witness: ColoringAssignment,
    /// Size of the enumerated space after fixing edge `0`, `2^(C(n,2) - 1)`.
    pub search_space: u64,
}

/// Enumerates every 2-coloring of \(K_n\) and returns the minimum number of
/// monochromatic 4-cliques.
///
/// Coloring `x` assigns `B` to edge `e` iff bit `e` of `x` is set. Swapping the two
/// colors preserves the count, so edge `0` is pinned to `A`.
///
/// # Errors
/// [`ColoringError::ResourceExhausted`] if \(K_n\) has more than
/// [`MAX_EXHAUSTIVE_EDGES`] edges.
pub fn minimum_monochromatic(index: &CliqueIndex) -> Result<ExhaustiveResult> {
    minimum_monochromatic_with_cancel(index, &AtomicBool::new(false))
}

/// [`minimum_monochromatic`] that polls `cancel` every few thousand colorings.
///
/// # Errors
/// As [`minimum_monochromatic`], plus [`ColoringError::SearchCancelled`] once
/// `cancel` is observed set.
pub fn minimum_monochromatic_with_cancel(
    index: &CliqueIndex,
    cancel: &AtomicBool,
) -> Result<ExhaustiveResult> {
    let edge_count = index.edge_count();
    if edge_count > MAX_EXHAUSTIVE_EDGES {
        return Err(ColoringError::ResourceExhausted(format!(
            "exhaustive search over K_{} needs 2^{} colorings (limit 2^{})",
            index.n(),
            edge_count,
            MAX_EXHAUSTIVE_EDGES
        )));
    }

    let masks: Vec<u32> = (0..index.clique_count())
        .map(|c| index.clique_edges(c).iter().fold(0u32, |m, &e| m | (1 << e)))
        .collect();

    let free_bits = edge_count.saturating_sub(1);
    let limit: u32 = 1 << free_bits;
    let mut best = usize::MAX;
    let mut best_x = 0u32;

    for half in 0..limit {
        if half.is_multiple_of(CANCEL_POLL_PERIOD) && cancel.load(Ordering::Relaxed) {
            return Err(ColoringError::SearchCancelled {
                checked: u64::from(half),
                total: u64::from(limit),
            });
        }
        let x = half << 1; // edge 0 stays A
        let mut count = 0;
        for &m in &masks {
            let hit = x & m;
            if hit == 0 || hit == m {
                count += 1;
                if count >= best {
                    break;
                }
            }
        }
        if count < best {
            best = count;
            best_x = x;
            if best == 0 {
                break;
            }
        }
    }

    let colors = (0..edge_count)
        .map(|e| {
            Some(if best_x & (1 << e) != 0 {
                Color::B
            } else {
                Color::A
            })
        })
        .collect();

    Ok(ExhaustiveResult {
        minimum: best,
        witness: ColoringAssignment::from_colors(index.n(), colors),
        search_space: u64::from(limit),
    })
}
