//! Greedy edge-coloring driver.
//!
//! Each step probes every (uncolored edge, color) pair, commits the one with the
//! lowest predicted global penalty, and repeats until \(K_n\) is fully colored.

use crate::assignment::ColoringAssignment;
use crate::error::{ColoringError, Result};
use crate::graph::{CliqueIndex, Edge, EdgeId};
use crate::score::{Color, PenaltyUnits, units_to_real};
use crate::state::ColoringState;
use log::{debug, info};
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

// ============================================================================
// Configuration
// ============================================================================

/// How predicted penalties are computed during the probe phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpdateStrategy {
    /// Touch only the cliques incident to the probed edge.
    #[default]
    Indexed,
    /// Rescore every clique from scratch for every probe. Reference only.
    FullRescan,
}

/// Scheduler configuration parameters.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Probe strategy.
    pub strategy: UpdateStrategy,
    /// Run the probe phase on the rayon pool.
    pub parallel: bool,
    /// Progress log period, in committed edges. `0` disables progress lines.
    pub report_every: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            strategy: UpdateStrategy::Indexed,
            parallel: false,
            report_every: 100,
        }
    }
}

// ============================================================================
// Step records
// ============================================================================

/// One committed decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Edge that was colored.
    pub edge: Edge,
    /// Color it received.
    pub color: Color,
    /// Global penalty right after the commit, in units.
    pub global_penalty_units: PenaltyUnits,
}

impl Step {
    /// Global penalty right after the commit.
    #[inline]
    pub fn global_penalty(&self) -> f64 {
        units_to_real(self.global_penalty_units)
    }
}

/// Selection key. The derived ordering is the tie-break policy:
/// 1. lowest predicted global penalty;
/// 2. color used fewer times so far;
/// 3. first edge in canonical order;
/// 4. lower color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    predicted: PenaltyUnits,
    color_uses: usize,
    edge: Edge,
    color: Color,
    edge_id: EdgeId,
}

// ============================================================================
// GreedyScheduler
// ============================================================================

/// Drives a [`ColoringState`] to completion, one greedy commit per step.
#[derive(Debug)]
pub struct GreedyScheduler<'a> {
    state: ColoringState<'a>,
    config: SchedulerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> GreedyScheduler<'a> {
    /// Creates a scheduler over a fresh, fully uncolored state.
    pub fn new(index: &'a CliqueIndex, config: SchedulerConfig) -> Self {
        Self {
            state: ColoringState::new(index),
            config,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag polled once per step by [`run`](Self::run).
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The live state.
    #[inline(always)]
    pub fn state(&self) -> &ColoringState<'a> {
        &self.state
    }

    /// The configuration in use.
    #[inline(always)]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Performs one selection-then-commit. Returns `None` once every edge is colored.
    ///
    /// # Errors
    /// Propagates [`ColoringError::InvalidState`] from the commit, which would indicate
    /// a bug in candidate selection.
    pub fn step(&mut self) -> Result<Option<Step>> {
        let Some(best) = self.best_candidate() else {
            return Ok(None);
        };
        self.state.color_by_id(best.edge_id, best.color)?;
        debug_assert_eq!(self.state.global_penalty_units(), best.predicted);
        Ok(Some(Step {
            edge: best.edge,
            color: best.color,
            global_penalty_units: self.state.global_penalty_units(),
        }))
    }

    /// Colors every edge and returns the final assignment.
    ///
    /// # Errors
    /// [`ColoringError::Cancelled`] if the cancellation flag is raised mid-run.
    pub fn run(self) -> Result<ColoringAssignment> {
        self.drive(|_| {})
    }

    /// Like [`run`](Self::run), also returning every committed step in order.
    ///
    /// # Errors
    /// Same conditions as [`run`](Self::run).
    pub fn run_traced(self) -> Result<(ColoringAssignment, Vec<Step>)> {
        let mut trajectory = Vec::with_capacity(self.state.index().edge_count());
        let assignment = self.drive(|step| trajectory.push(*step))?;
        Ok((assignment, trajectory))
    }

    fn drive(mut self, mut on_step: impl FnMut(&Step)) -> Result<ColoringAssignment> {
        let index = self.state.index();
        let total = index.edge_count();
        info!(
            "greedy coloring: n={} edges={} cliques={} strategy={:?} parallel={}",
            index.n(),
            total,
            index.clique_count(),
            self.config.strategy,
            self.config.parallel
        );
        let start = Instant::now();

        loop {
            if self.is_cancelled() {
                return Err(ColoringError::Cancelled {
                    colored: self.state.colored_count(),
                    total,
                });
            }
            let Some(step) = self.step()? else {
                break;
            };
            on_step(&step);

            let done = self.state.colored_count();
            if self.config.report_every > 0 && done.is_multiple_of(self.config.report_every) {
                debug!(
                    "colored {done}/{total} | last {} -> {} | penalty {:.6}",
                    step.edge,
                    step.color,
                    step.global_penalty()
                );
            }
        }

        info!(
            "greedy coloring finished in {:.3?}: penalty {:.6}, A={} B={}",
            start.elapsed(),
            self.state.global_penalty(),
            self.state.color_count(Color::A),
            self.state.color_count(Color::B)
        );
        Ok(self.state.into_assignment())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Minimum candidate over all uncolored edges and both colors.
    fn best_candidate(&self) -> Option<Candidate> {
        let ids: Vec<EdgeId> = self.state.uncolored_edge_ids().collect();
        if self.config.parallel {
            ids.par_iter()
                .flat_map_iter(|&id| [self.candidate(id, Color::A), self.candidate(id, Color::B)])
                .min()
        } else {
            ids.iter()
                .flat_map(|&id| [self.candidate(id, Color::A), self.candidate(id, Color::B)])
                .min()
        }
    }

    #[inline]
    fn candidate(&self, id: EdgeId, color: Color) -> Candidate {
        let predicted = match self.config.strategy {
            UpdateStrategy::Indexed => self.state.preview_units(id, color),
            UpdateStrategy::FullRescan => self.state.preview_units_full_rescan(id, color),
        };
        Candidate {
            predicted,
            color_uses: self.state.color_count(color),
            edge: self.state.index().edge_at(id),
            color,
            edge_id: id,
        }
    }
}

/// Builds the index for \(K_n\) and runs the greedy scheduler with `config`.
///
/// # Errors
/// [`ColoringError::ResourceExhausted`] if the index exceeds the default budget.
pub fn greedy_coloring(n: usize, config: SchedulerConfig) -> Result<ColoringAssignment> {
    let index = CliqueIndex::new(n)?;
    GreedyScheduler::new(&index, config).run()
}

// ============================================================================
// Tests
// ============================================================================
