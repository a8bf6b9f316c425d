//! Summary of a finished coloring for console output.

use crate::assignment::ColoringAssignment;
use crate::error::Result;
use crate::graph::CliqueIndex;
use crate::score::Color;
use crate::validate::{count_monochromatic_cliques, theoretical_minimum};
use std::fmt;
use std::time::Duration;

/// Headline numbers for one coloring.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoringReport {
    /// Number of vertices.
    pub n: usize,
    /// Number of edges.
    pub edges: usize,
    /// Number of 4-cliques.
    pub cliques: usize,
    /// Edges per color, `[A, B]`.
    pub color_counts: [usize; 2],
    /// Monochromatic 4-cliques in the coloring.
    pub monochromatic: usize,
    /// `C(n, 4) / 32`.
    pub theoretical_minimum: u64,
    /// Wall-clock time spent producing the coloring, if measured.
    pub elapsed: Option<Duration>,
}

impl ColoringReport {
    /// Evaluates `assignment` against `index`.
    ///
    /// # Errors
    /// Same conditions as [`count_monochromatic_cliques`].
    pub fn new(assignment: &ColoringAssignment, index: &CliqueIndex) -> Result<Self> {
        Ok(Self {
            n: index.n(),
            edges: index.edge_count(),
            cliques: index.clique_count(),
            color_counts: [
                assignment.color_count(Color::A),
                assignment.color_count(Color::B),
            ],
            monochromatic: count_monochromatic_cliques(assignment, index)?,
            theoretical_minimum: theoretical_minimum(index.n()),
            elapsed: None,
        })
    }

    /// Attaches a measured run time.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }
}

impl fmt::Display for ColoringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "K_{}: {} edges (A={}, B={}), {} 4-cliques",
            self.n, self.edges, self.color_counts[0], self.color_counts[1], self.cliques
        )?;
        writeln!(f, "monochromatic K4: {}", self.monochromatic)?;
        write!(f, "reference C(n,4)/32: {}", self.theoretical_minimum)?;
        if let Some(t) = self.elapsed {
            write!(f, "\nelapsed: {:.3}s", t.as_secs_f64())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::{GreedyScheduler, SchedulerConfig};

    #[test]
    fn report_for_k4() {
        let index = CliqueIndex::new(4).unwrap();
        let assignment = GreedyScheduler::new(&index, SchedulerConfig::default())
            .run()
            .unwrap();
        let report = ColoringReport::new(&assignment, &index).unwrap();
        assert_eq!(report.edges, 6);
        assert_eq!(report.cliques, 1);
        assert_eq!(report.color_counts, [3, 3]);
        assert_eq!(report.monochromatic, 0);
        assert_eq!(report.theoretical_minimum, 0);

        let text = report.to_string();
        assert!(text.contains("monochromatic K4: 0"));
        assert!(!text.contains("elapsed"));
    }

    #[test]
    fn elapsed_is_printed_when_present() {
        let index = CliqueIndex::new(5).unwrap();
        let assignment = GreedyScheduler::new(&index, SchedulerConfig::default())
            .run()
            .unwrap();
        let report = ColoringReport::new(&assignment, &index)
            .unwrap()
            .with_elapsed(Duration::from_millis(1500));
        assert!(report.to_string().ends_with("elapsed: 1.500s"));
    }
}
