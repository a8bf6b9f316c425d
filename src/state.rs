//! Live coloring with cached per-clique penalties and their running sum.

use crate::assignment::ColoringAssignment;
use crate::error::{ColoringError, Result};
use crate::graph::{CliqueIndex, Edge, EdgeId};
use crate::score::{
    CliqueTally, Color, PenaltyUnits, UNCOLORED_PENALTY_UNITS, penalty_units, units_to_real,
};

// ============================================================================
// ColoringState
// ============================================================================

/// A monotonic edge coloring of \(K_n\) with incrementally maintained penalties.
///
/// Representation:
/// - `colors[e]` is the color of edge id `e`, if any.
/// - `tallies[c]` counts the colored edges of clique `c` per color.
/// - `penalties[c]` caches the penalty of clique `c` in units.
/// - `global` is \(\sum_c\) `penalties[c]`.
///
/// Coloring an edge touches only the `C(n-2, 2)` cliques that contain it.
#[derive(Clone, Debug)]
pub struct ColoringState<'a> {
    index: &'a CliqueIndex,
    colors: Vec<Option<Color>>,
    tallies: Vec<CliqueTally>,
    penalties: Vec<PenaltyUnits>,
    global: PenaltyUnits,
    color_counts: [usize; 2],
    colored: usize,
}

impl<'a> ColoringState<'a> {
    /// Creates a state with every edge uncolored.
    pub fn new(index: &'a CliqueIndex) -> Self {
        let cliques = index.clique_count();
        Self {
            index,
            colors: vec![None; index.edge_count()],
            tallies: vec![CliqueTally::EMPTY; cliques],
            penalties: vec![UNCOLORED_PENALTY_UNITS; cliques],
            global: UNCOLORED_PENALTY_UNITS * cliques as PenaltyUnits,
            color_counts: [0; 2],
            colored: 0,
        }
    }

    /// The incidence index this state is built on.
    #[inline(always)]
    pub fn index(&self) -> &'a CliqueIndex {
        self.index
    }

    /// Current global penalty.
    #[inline]
    pub fn global_penalty(&self) -> f64 {
        units_to_real(self.global)
    }

    /// Current global penalty in units.
    #[inline(always)]
    pub fn global_penalty_units(&self) -> PenaltyUnits {
        self.global
    }

    /// Cached penalty of every clique, in units, indexed by clique id.
    #[inline(always)]
    pub fn clique_penalty_units(&self) -> &[PenaltyUnits] {
        &self.penalties
    }

    /// Cached penalty of clique `id`.
    #[inline]
    pub fn clique_penalty(&self, id: usize) -> f64 {
        units_to_real(self.penalties[id])
    }

    /// Color of `edge`, if it has one.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidInput`] if the edge lies outside \(K_n\).
    pub fn color_of(&self, edge: Edge) -> Result<Option<Color>> {
        Ok(self.colors[self.index.edge_id(edge)?])
    }

    /// Number of edges colored `c` so far.
    #[inline(always)]
    pub fn color_count(&self, c: Color) -> usize {
        self.color_counts[c.index()]
    }

    /// Number of colored edges.
    #[inline(always)]
    pub fn colored_count(&self) -> usize {
        self.colored
    }

    /// Returns `true` once every edge has a color.
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.colored == self.colors.len()
    }

    /// Snapshot of the current assignment.
    pub fn assignment(&self) -> ColoringAssignment {
        ColoringAssignment::from_colors(self.index.n(), self.colors.clone())
    }

    /// Consumes the state, returning its assignment.
    pub fn into_assignment(self) -> ColoringAssignment {
        ColoringAssignment::from_colors(self.index.n(), self.colors)
    }

    /// Uncolored edges in canonical order, read lazily from the live state.
    pub fn remaining_uncolored_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.uncolored_edge_ids().map(|id| self.index.edge_at(id))
    }

    /// Ids of uncolored edges, ascending.
    pub fn uncolored_edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.colors
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(id, _)| id)
    }

    // ------------------------------------------------------------------------
    // Commit
    // ------------------------------------------------------------------------

    /// Colors `edge` with `color` and updates every clique that contains it.
    ///
    /// # Errors
    /// [`ColoringError::InvalidInput`] if the edge lies outside \(K_n\);
    /// [`ColoringError::InvalidState`] if it is already colored.
    pub fn color(&mut self, edge: Edge, color: Color) -> Result<()> {
        let id = self.index.edge_id(edge)?;
        self.color_by_id(id, color)
    }

    /// Same as [`color`](Self::color), addressed by edge id.
    ///
    /// # Errors
    /// [`ColoringError::InvalidState`] if the edge is already colored.
    pub fn color_by_id(&mut self, id: EdgeId, color: Color) -> Result<()> {
        self.ensure_uncolored(id)?;
        self.colors[id] = Some(color);
        self.color_counts[color.index()] += 1;
        self.colored += 1;

        let index = self.index;
        for &c in index.incident_cliques(id) {
            let tally = &mut self.tallies[c];
            tally.add(color);
            let new = tally.penalty_units();
            let old = self.penalties[c];
            self.penalties[c] = new;
            // `global` includes `old`, so this never underflows.
            self.global = self.global - old + new;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Read-only probes
    // ------------------------------------------------------------------------

    /// Global penalty that [`color`](Self::color) would produce, without committing.
    ///
    /// # Errors
    /// Same conditions as [`color`](Self::color).
    pub fn preview_color(&self, edge: Edge, color: Color) -> Result<f64> {
        let id = self.index.edge_id(edge)?;
        self.ensure_uncolored(id)?;
        Ok(units_to_real(self.preview_units(id, color)))
    }

    /// Predicted global penalty in units using the incidence index.
    ///
    /// Requires edge `id` to be uncolored (checked in debug builds only; this is the
    /// scheduler's hot path).
    #[inline]
    pub fn preview_units(&self, id: EdgeId, color: Color) -> PenaltyUnits {
        debug_assert!(self.colors[id].is_none(), "previewing a colored edge");
        let mut removed = 0;
        let mut added = 0;
        for &c in self.index.incident_cliques(id) {
            removed += self.penalties[c];
            added += self.tallies[c].with(color).penalty_units();
        }
        self.global - removed + added
    }

    /// Predicted global penalty by rescoring every clique from raw edge colors.
    ///
    /// Ignores the cached tallies, penalties and running sum entirely. Kept as a
    /// reference for cross-checking [`preview_units`](Self::preview_units).
    pub fn preview_units_full_rescan(&self, id: EdgeId, color: Color) -> PenaltyUnits {
        debug_assert!(self.colors[id].is_none(), "previewing a colored edge");
        (0..self.index.clique_count())
            .map(|c| {
                let colors = self.index.clique_edges(c).map(|e| {
                    if e == id {
                        Some(color)
                    } else {
                        self.colors[e]
                    }
                });
                penalty_units(&colors)
            })
            .sum()
    }

    /// Checked variant of [`preview_units_full_rescan`](Self::preview_units_full_rescan).
    ///
    /// # Errors
    /// Same conditions as [`color`](Self::color).
    pub fn preview_color_full_rescan(&self, edge: Edge, color: Color) -> Result<f64> {
        let id = self.index.edge_id(edge)?;
        self.ensure_uncolored(id)?;
        Ok(units_to_real(self.preview_units_full_rescan(id, color)))
    }

    fn ensure_uncolored(&self, id: EdgeId) -> Result<()> {
        match self.colors[id] {
            None => Ok(()),
            Some(existing) => Err(ColoringError::InvalidState(format!(
                "edge {} is already colored {existing}",
                self.index.edge_at(id)
            ))),
        }
    }

    #[cfg(test)]
    fn recompute_for_test(&self) -> (Vec<PenaltyUnits>, PenaltyUnits) {
        let penalties: Vec<PenaltyUnits> = (0..self.index.clique_count())
            .map(|c| penalty_units(&self.index.clique_edges(c).map(|e| self.colors[e])))
            .collect();
        let global = penalties.iter().sum();
        (penalties, global)
    }
}

// ============================================================================
// Tests
// ============================================================================
