//! # Greedy Ramsey K4 Coloring
//!
//! Two-colors the edges of \(K_n\) while keeping the number of monochromatic
//! 4-cliques low, a heuristic for the two-color \(K_4\) Ramsey multiplicity problem.
//!
//! This crate provides:
//! - An edge ↔ 4-clique **incidence index** built once per `n`.
//! - A per-clique **risk score** (\(2^{-5}\) uncolored, \(2^{k-6}\) with `k` edges of
//!   one color, `0` once mixed).
//! - A monotonic coloring state with **incremental** penalty tracking and a
//!   side-effect-free preview probe.
//! - A deterministic greedy driver that commits the best (edge, color) pair per step.
//!
//! ## Quick Start
//!
//! ```
//! use ramsey_k4::graph::CliqueIndex;
//! use ramsey_k4::greedy::{GreedyScheduler, SchedulerConfig};
//! use ramsey_k4::validate::{count_monochromatic_cliques, theoretical_minimum};
//!
//! let index = CliqueIndex::new(8).unwrap();
//! let coloring = GreedyScheduler::new(&index, SchedulerConfig::default())
//!     .run()
//!     .unwrap();
//!
//! assert!(coloring.is_total());
//! let mono = count_monochromatic_cliques(&coloring, &index).unwrap();
//! assert!(mono <= index.clique_count());
//! assert_eq!(theoretical_minimum(8), 2);
//! ```
//!
//! ## Working with the State Directly
//!
//! ```
//! use ramsey_k4::graph::{CliqueIndex, Edge};
//! use ramsey_k4::score::Color;
//! use ramsey_k4::state::ColoringState;
//!
//! let index = CliqueIndex::new(4).unwrap();
//! let mut state = ColoringState::new(&index);
//!
//! // One clique, nothing colored: penalty 2^-5.
//! assert_eq!(state.global_penalty(), 1.0 / 32.0);
//!
//! state.color(Edge::new(0, 1), Color::A).unwrap();
//! // Probing never mutates.
//! assert_eq!(state.preview_color(Edge::new(0, 2), Color::A).unwrap(), 1.0 / 16.0);
//! assert_eq!(state.preview_color(Edge::new(0, 2), Color::B).unwrap(), 0.0);
//! assert_eq!(state.colored_count(), 1);
//!
//! // Recoloring breaks monotonicity and is refused.
//! assert!(state.color(Edge::new(0, 1), Color::B).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`graph`]: Edges, 4-cliques and the incidence index.
//! - [`score`]: Colors and the per-clique penalty policy.
//! - [`state`]: Monotonic coloring with cached penalties.
//! - [`greedy`]: Greedy scheduler (indexed or full-rescan probes, optional rayon).
//! - [`sequential`]: Single-pass in-order colorer.
//! - [`validate`]: Monochromatic counts and the `C(n,4)/32` reference.
//! - [`exhaustive`]: Exact optimum for tiny `n`.
//! - [`io`], [`render`], [`report`]: Matrix files, SVG, console summary.
//!
//! ## Performance Notes
//!
//! - Memory is dominated by the index: `C(n, 4)` cliques, each with six edge ids and
//!   six incidence slots.
//! - A probe touches `C(n-2, 2)` cliques; a greedy step probes every uncolored edge
//!   twice, so a full run is roughly `O(n^6)`.
//! - Penalties are integer multiples of \(2^{-6}\), so results do not depend on
//!   summation order or thread count.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::doc_markdown)] // LaTeX-style notation in docs

pub mod assignment;
pub mod error;
pub mod exhaustive;
pub mod graph;
pub mod greedy;
pub mod io;
pub mod render;
pub mod report;
pub mod score;
pub mod sequential;
pub mod state;
pub mod validate;

pub use error::{ColoringError, Result};

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::assignment::ColoringAssignment;
    pub use crate::error::{ColoringError, Result};
    pub use crate::graph::{Clique4, CliqueIndex, Edge};
    pub use crate::greedy::{
        GreedyScheduler, SchedulerConfig, Step, UpdateStrategy, greedy_coloring,
    };
    pub use crate::score::{Color, penalty};
    pub use crate::sequential::SequentialColorer;
    pub use crate::state::ColoringState;
    pub use crate::validate::{count_monochromatic_cliques, theoretical_minimum};
}
