//! Edge → color map produced by a coloring run.

use crate::error::{ColoringError, Result};
use crate::graph::{Edge, choose2, edges};
use crate::score::Color;

/// A (possibly partial) coloring of the edges of \(K_n\).
///
/// Backed by a dense vector indexed by edge id. Entries only ever go from
/// uncolored to colored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColoringAssignment {
    n: usize,
    colors: Vec<Option<Color>>,
}

impl ColoringAssignment {
    /// An assignment with every edge of \(K_n\) uncolored.
    pub fn empty(n: usize) -> Self {
        Self {
            n,
            colors: vec![None; choose2(n)],
        }
    }

    pub(crate) fn from_colors(n: usize, colors: Vec<Option<Color>>) -> Self {
        debug_assert_eq!(colors.len(), choose2(n));
        Self { n, colors }
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of edges in \(K_n\), colored or not.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.colors.len()
    }

    /// Number of colored edges.
    pub fn len(&self) -> usize {
        self.colors.iter().filter(|c| c.is_some()).count()
    }

    /// Returns `true` if no edge is colored.
    pub fn is_empty(&self) -> bool {
        self.colors.iter().all(Option::is_none)
    }

    /// Returns `true` if every edge is colored.
    pub fn is_total(&self) -> bool {
        self.colors.iter().all(Option::is_some)
    }

    /// Color of `edge`, or `None` if it is uncolored or outside \(K_n\).
    #[inline]
    pub fn get(&self, edge: Edge) -> Option<Color> {
        if !edge.is_in(self.n) {
            return None;
        }
        self.colors[edge.id(self.n)]
    }

    /// Colors an uncolored edge.
    ///
    /// # Errors
    /// [`ColoringError::InvalidInput`] if the edge lies outside \(K_n\);
    /// [`ColoringError::InvalidState`] if it is already colored.
    pub fn insert(&mut self, edge: Edge, color: Color) -> Result<()> {
        if !edge.is_in(self.n) {
            return Err(ColoringError::InvalidInput(format!(
                "edge {edge} is not an edge of K_{}",
                self.n
            )));
        }
        let slot = &mut self.colors[edge.id(self.n)];
        if let Some(existing) = slot {
            return Err(ColoringError::InvalidState(format!(
                "edge {edge} is already colored {existing}"
            )));
        }
        *slot = Some(color);
        Ok(())
    }

    /// Colored edges in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Edge, Color)> + '_ {
        edges(self.n)
            .zip(self.colors.iter())
            .filter_map(|(e, c)| c.map(|c| (e, c)))
    }

    /// Edges carrying color `c`, in canonical order.
    pub fn color_class(&self, c: Color) -> Vec<Edge> {
        self.iter().filter(|&(_, col)| col == c).map(|(e, _)| e).collect()
    }

    /// Number of edges carrying color `c`.
    pub fn color_count(&self, c: Color) -> usize {
        self.colors.iter().filter(|&&col| col == Some(c)).count()
    }

    /// Raw per-edge-id colors.
    #[inline(always)]
    pub fn colors(&self) -> &[Option<Color>] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_assignment_has_all_edges_uncolored() {
        let a = ColoringAssignment::empty(5);
        assert_eq!(a.edge_count(), 10);
        assert_eq!(a.len(), 0);
        assert!(a.is_empty());
        assert!(!a.is_total());
        assert_eq!(a.get(Edge::new(0, 4)), None);
    }

    #[test]
    fn insert_is_monotonic() {
        let mut a = ColoringAssignment::empty(4);
        a.insert(Edge::new(2, 1), Color::B).unwrap();
        assert_eq!(a.get(Edge::new(1, 2)), Some(Color::B));

        let err = a.insert(Edge::new(1, 2), Color::A).unwrap_err();
        assert!(matches!(err, ColoringError::InvalidState(_)));
        assert_eq!(a.get(Edge::new(1, 2)), Some(Color::B));

        let err = a.insert(Edge::new(1, 7), Color::A).unwrap_err();
        assert!(matches!(err, ColoringError::InvalidInput(_)));
    }

    #[test]
    fn iteration_is_canonical_and_skips_uncolored() {
        let mut a = ColoringAssignment::empty(4);
        a.insert(Edge::new(2, 3), Color::A).unwrap();
        a.insert(Edge::new(0, 1), Color::B).unwrap();
        let items: Vec<_> = a.iter().collect();
        assert_eq!(items, vec![(Edge::new(0, 1), Color::B), (Edge::new(2, 3), Color::A)]);
        assert_eq!(a.color_class(Color::A), vec![Edge::new(2, 3)]);
        assert_eq!(a.color_count(Color::B), 1);
    }

    #[test]
    fn loops_are_rejected() {
        let mut a = ColoringAssignment::empty(5);
        assert!(matches!(
            a.insert(Edge::new(2, 2), Color::A),
            Err(ColoringError::InvalidInput(_))
        ));
        assert_eq!(a.get(Edge::new(2, 2)), None);
        assert!(a.is_empty());
    }

    #[test]
    fn degenerate_sizes() {
        for n in 0..2 {
            let a = ColoringAssignment::empty(n);
            assert_eq!(a.edge_count(), 0);
            assert!(a.is_total());
            assert!(a.is_empty());
        }
    }
}
