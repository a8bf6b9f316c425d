//! Vertices, canonical edges, and the edge ↔ 4-clique incidence index over \(K_n\).

use crate::error::{ColoringError, Result};
use std::fmt;

// ============================================================================
// Counting helpers
// ============================================================================

/// Vertex label in `0..n`.
pub type Vertex = usize;
/// Dense edge id: rank of the edge in canonical `(u, v)` order.
pub type EdgeId = usize;
/// Dense clique id: rank of the clique in lexicographic order.
pub type CliqueId = usize;

/// Default cap on the number of 4-cliques an index may hold.
///
/// Each clique costs a fixed handful of words (its vertices, six edge ids, six
/// incidence slots), so this keeps the index in the low gigabytes.
pub const DEFAULT_MAX_CLIQUES: usize = 50_000_000;

/// Returns `n * (n-1) / 2`.
#[inline(always)]
pub const fn choose2(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Returns `C(n, 4)`, or `None` if the intermediate product overflows.
pub fn choose4_checked(n: usize) -> Option<usize> {
    if n < 4 {
        return Some(0);
    }
    let p = n
        .checked_mul(n - 1)?
        .checked_mul(n - 2)?
        .checked_mul(n - 3)?;
    Some(p / 24)
}

/// Converts a signed vertex count into `usize`, rejecting negatives.
///
/// # Errors
/// Returns [`ColoringError::InvalidInput`] if `n < 0`.
pub fn vertex_count(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| {
        ColoringError::InvalidInput(format!("vertex count must be non-negative, got {n}"))
    })
}

// ============================================================================
// Edge
// ============================================================================

/// An unordered pair of distinct vertices, stored smaller-first.
///
/// The derived ordering is lexicographic on `(u, v)`, which is also the order of
/// edge ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    u: Vertex,
    v: Vertex,
}

impl Edge {
    /// Creates the canonical edge between `a` and `b`.
    ///
    /// `a == b` yields a loop, which every checked API rejects with
    /// [`ColoringError::InvalidInput`].
    #[inline]
    pub fn new(a: Vertex, b: Vertex) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
        }
    }

    /// Smaller endpoint.
    #[inline(always)]
    pub fn u(self) -> Vertex {
        self.u
    }

    /// Larger endpoint.
    #[inline(always)]
    pub fn v(self) -> Vertex {
        self.v
    }

    /// Both endpoints, smaller first.
    #[inline(always)]
    pub fn endpoints(self) -> (Vertex, Vertex) {
        (self.u, self.v)
    }

    /// Returns `true` if this is an edge of \(K_n\): distinct endpoints, both `< n`.
    #[inline(always)]
    pub fn is_in(self, n: usize) -> bool {
        self.u < self.v && self.v < n
    }

    /// Dense id of this edge in \(K_n\). Requires [`is_in(n)`](Self::is_in).
    #[inline(always)]
    pub fn id(self, n: usize) -> EdgeId {
        debug_assert!(self.is_in(n));
        // Edges before row `u`: sum_{i<u} (n-1-i) = u*(2n-u-1)/2.
        self.u * (2 * n - self.u - 1) / 2 + (self.v - self.u - 1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

/// All edges of \(K_n\) in canonical order.
pub fn edges(n: usize) -> impl Iterator<Item = Edge> {
    (0..n).flat_map(move |u| ((u + 1)..n).map(move |v| Edge { u, v }))
}

// ============================================================================
// Clique4
// ============================================================================

/// A 4-vertex subset, vertices sorted ascending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clique4([Vertex; 4]);

impl Clique4 {
    /// Builds a clique from four distinct vertices in any order.
    pub fn new(mut vertices: [Vertex; 4]) -> Self {
        vertices.sort_unstable();
        debug_assert!(vertices.windows(2).all(|w| w[0] < w[1]), "vertices must be distinct");
        Self(vertices)
    }

    /// The four vertices, ascending.
    #[inline(always)]
    pub fn vertices(&self) -> [Vertex; 4] {
        self.0
    }

    /// The six internal edges, in canonical order.
    pub fn edges(&self) -> [Edge; 6] {
        let [a, b, c, d] = self.0;
        [
            Edge { u: a, v: b },
            Edge { u: a, v: c },
            Edge { u: a, v: d },
            Edge { u: b, v: c },
            Edge { u: b, v: d },
            Edge { u: c, v: d },
        ]
    }

    /// Returns whether `edge` lies inside this clique.
    #[inline]
    pub fn contains(&self, edge: Edge) -> bool {
        self.0.contains(&edge.u) && self.0.contains(&edge.v)
    }
}

// ============================================================================
// CliqueIndex
// ============================================================================

/// Immutable incidence tables between the edges and the 4-cliques of \(K_n\).
///
/// Every edge lies in exactly `C(n-2, 2)` cliques, so the reverse table is a flat
/// array with a fixed stride per edge. Each edge's slice lists clique ids in
/// ascending order.
#[derive(Clone, Debug)]
pub struct CliqueIndex {
    n: usize,
    edges: Vec<Edge>,
    cliques: Vec<Clique4>,
    clique_edges: Vec<[EdgeId; 6]>,
    incidence: Vec<CliqueId>,
    stride: usize,
}

impl CliqueIndex {
    /// Builds the index for \(K_n\) with [`DEFAULT_MAX_CLIQUES`] as the budget.
    ///
    /// # Errors
    /// Returns [`ColoringError::ResourceExhausted`] if `C(n, 4)` exceeds the budget.
    pub fn new(n: usize) -> Result<Self> {
        Self::with_budget(n, DEFAULT_MAX_CLIQUES)
    }

    /// Builds the index for \(K_n\), refusing instances with more than `max_cliques`
    /// cliques.
    ///
    /// # Errors
    /// Returns [`ColoringError::ResourceExhausted`] if `C(n, 4)` overflows or exceeds
    /// `max_cliques`.
    pub fn with_budget(n: usize, max_cliques: usize) -> Result<Self> {
        let clique_count = choose4_checked(n).ok_or_else(|| {
            ColoringError::ResourceExhausted(format!("C({n}, 4) overflows usize"))
        })?;
        if clique_count > max_cliques {
            return Err(ColoringError::ResourceExhausted(format!(
                "n={n} has {clique_count} 4-cliques, budget is {max_cliques}"
            )));
        }

        let edges: Vec<Edge> = edges(n).collect();
        let stride = choose2(n.saturating_sub(2));

        let mut cliques = Vec::with_capacity(clique_count);
        let mut clique_edges = Vec::with_capacity(clique_count);
        let mut incidence = vec![0; edges.len() * stride];
        let mut fill = vec![0usize; edges.len()];

        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        let clique = Clique4([a, b, c, d]);
                        let id = cliques.len();
                        let ids = clique.edges().map(|e| e.id(n));
                        for &e in &ids {
                            incidence[e * stride + fill[e]] = id;
                            fill[e] += 1;
                        }
                        cliques.push(clique);
                        clique_edges.push(ids);
                    }
                }
            }
        }
        debug_assert!(fill.iter().all(|&f| f == stride));

        Ok(Self {
            n,
            edges,
            cliques,
            clique_edges,
            incidence,
            stride,
        })
    }

    /// Number of vertices.
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges, `C(n, 2)`.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of 4-cliques, `C(n, 4)`.
    #[inline(always)]
    pub fn clique_count(&self) -> usize {
        self.cliques.len()
    }

    /// All edges in canonical order; position equals edge id.
    #[inline(always)]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All cliques in lexicographic order; position equals clique id.
    #[inline(always)]
    pub fn cliques(&self) -> &[Clique4] {
        &self.cliques
    }

    /// Edge with the given id.
    #[inline(always)]
    pub fn edge_at(&self, id: EdgeId) -> Edge {
        self.edges[id]
    }

    /// Validated edge constructor for this instance.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidInput`] if `u == v` or either vertex is `>= n`.
    pub fn edge(&self, u: Vertex, v: Vertex) -> Result<Edge> {
        if u == v || u >= self.n || v >= self.n {
            return Err(ColoringError::InvalidInput(format!(
                "({u}, {v}) is not an edge of K_{}",
                self.n
            )));
        }
        Ok(Edge::new(u, v))
    }

    /// Id of `edge`, checking that it belongs to this instance.
    ///
    /// # Errors
    /// Returns [`ColoringError::InvalidInput`] if the edge lies outside \(K_n\).
    pub fn edge_id(&self, edge: Edge) -> Result<EdgeId> {
        if !edge.is_in(self.n) {
            return Err(ColoringError::InvalidInput(format!(
                "edge {edge} is not an edge of K_{}",
                self.n
            )));
        }
        Ok(edge.id(self.n))
    }

    /// The six edge ids of clique `id`.
    #[inline(always)]
    pub fn clique_edges(&self, id: CliqueId) -> &[EdgeId; 6] {
        &self.clique_edges[id]
    }

    /// Ids of the cliques containing edge `id`, ascending.
    #[inline(always)]
    pub fn incident_cliques(&self, id: EdgeId) -> &[CliqueId] {
        let start = id * self.stride;
        &self.incidence[start..start + self.stride]
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loops_are_not_edges() {
        let index = CliqueIndex::new(5).unwrap();
        assert!(!Edge::new(2, 2).is_in(5));
        assert!(!Edge::new(1, 5).is_in(5));
        assert!(Edge::new(4, 1).is_in(5));
        assert!(matches!(
            index.edge_id(Edge::new(2, 2)),
            Err(ColoringError::InvalidInput(_))
        ));
        assert!(index.edge(3, 3).is_err());
    }

    #[test]
    fn choose_helpers_match_closed_forms() {
        for n in 0usize..40 {
            assert_eq!(choose2(n), n * n.saturating_sub(1) / 2);
        }
        assert_eq!(choose4_checked(3), Some(0));
        assert_eq!(choose4_checked(4), Some(1));
        assert_eq!(choose4_checked(5), Some(5));
        assert_eq!(choose4_checked(30), Some(27_405));
        assert_eq!(choose4_checked(usize::MAX), None);
    }

    #[test]
    fn edge_is_canonical() {
        let e = Edge::new(7, 2);
        assert_eq!(e.endpoints(), (2, 7));
        assert_eq!(e, Edge::new(2, 7));
        assert_eq!(e.to_string(), "(2, 7)");
    }

    #[test]
    fn edge_ids_follow_canonical_order() {
        for n in 0..12 {
            for (i, e) in edges(n).enumerate() {
                assert_eq!(e.id(n), i, "id mismatch for {e} in K_{n}");
            }
            assert_eq!(edges(n).count(), choose2(n));
        }
    }

    #[test]
    fn small_instances_have_no_cliques() {
        for n in 0..4 {
            let index = CliqueIndex::new(n).unwrap();
            assert_eq!(index.clique_count(), 0);
            assert_eq!(index.edge_count(), choose2(n));
            for id in 0..index.edge_count() {
                assert!(index.incident_cliques(id).is_empty());
            }
        }
    }

    #[test]
    fn k4_has_one_clique_with_all_edges() {
        let index = CliqueIndex::new(4).unwrap();
        assert_eq!(index.clique_count(), 1);
        assert_eq!(index.clique_edges(0), &[0, 1, 2, 3, 4, 5]);
        for id in 0..6 {
            assert_eq!(index.incident_cliques(id), &[0]);
        }
    }

    #[test]
    fn incidence_matches_brute_force_membership() {
        const N: usize = 9;
        let index = CliqueIndex::new(N).unwrap();
        assert_eq!(index.clique_count(), choose4_checked(N).unwrap());

        for (eid, &edge) in index.edges().iter().enumerate() {
            let expected: Vec<CliqueId> = index
                .cliques()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.contains(edge))
                .map(|(cid, _)| cid)
                .collect();
            assert_eq!(index.incident_cliques(eid), expected.as_slice(), "edge {edge}");
            assert_eq!(expected.len(), choose2(N - 2));
        }

        for (cid, clique) in index.cliques().iter().enumerate() {
            let ids = clique.edges().map(|e| e.id(N));
            assert_eq!(index.clique_edges(cid), &ids);
        }
    }

    #[test]
    fn cliques_are_lexicographic() {
        let index = CliqueIndex::new(7).unwrap();
        assert!(index.cliques().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(index.cliques()[0].vertices(), [0, 1, 2, 3]);
    }

    #[test]
    fn budget_is_enforced() {
        let err = CliqueIndex::with_budget(10, 100).unwrap_err();
        assert!(matches!(err, ColoringError::ResourceExhausted(_)));
        assert!(CliqueIndex::with_budget(10, 210).is_ok());

        let err = CliqueIndex::new(usize::MAX).unwrap_err();
        assert!(matches!(err, ColoringError::ResourceExhausted(_)));
    }

    #[test]
    fn edge_constructor_validates_vertices() {
        let index = CliqueIndex::new(5).unwrap();
        assert_eq!(index.edge(3, 1).unwrap(), Edge::new(1, 3));
        assert!(matches!(index.edge(2, 2), Err(ColoringError::InvalidInput(_))));
        assert!(matches!(index.edge(0, 5), Err(ColoringError::InvalidInput(_))));
        assert!(matches!(
            index.edge_id(Edge::new(1, 9)),
            Err(ColoringError::InvalidInput(_))
        ));
    }

    #[test]
    fn negative_vertex_count_is_rejected() {
        assert_eq!(vertex_count(6).unwrap(), 6);
        assert!(matches!(vertex_count(-1), Err(ColoringError::InvalidInput(_))));
    }
}
