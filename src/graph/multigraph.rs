use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::error::{GraphError, Result};

/// An undirected multigraph stored as symmetric adjacency lists.
///
/// Each undirected edge `(v, w)` is represented as the two arcs `(v, w)` and
/// `(w, v)`. Parallel edges are repeated entries in the arc lists; they are
/// essential for uniform edge sampling during contraction and must not be
/// deduplicated. Self-loops are never stored.
///
/// Vertex labels are never renumbered: contraction removes entries rather
/// than compacting ids, so surviving labels always name original vertices.
/// The adjacency map is ordered so that the global arc scan used by
/// [`Multigraph::arc_at`] is deterministic.
///
/// # Examples
/// ```
/// use contract_cut::Multigraph;
///
/// let mut graph = Multigraph::from_edges(&[(0, 1), (1, 2), (2, 0)]).unwrap();
/// assert_eq!(graph.edge_count(), 3);
///
/// graph.contract(0, 1).unwrap();
/// assert_eq!(graph.vertex_count(), 2);
/// assert_eq!(graph.degree(0), Some(2)); // the two surviving parallel edges to 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multigraph<V> {
    adjacency: BTreeMap<V, Vec<V>>,
}

impl<V> Multigraph<V>
where
    V: Ord + Copy + Debug,
{
    /// Creates an empty multigraph.
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Builds a multigraph from an undirected edge list.
    ///
    /// Every pair inserts both arcs; repeated pairs become parallel edges.
    /// Self-loop pairs are rejected with [`GraphError::InvalidInput`].
    pub fn from_edges(edges: &[(V, V)]) -> Result<Self> {
        let mut graph = Self::new();
        for &(v, w) in edges {
            graph.add_edge(v, w)?;
        }
        Ok(graph)
    }

    /// Builds a multigraph from a pre-built adjacency mapping.
    ///
    /// The mapping must already be symmetric: every occurrence of `w` in
    /// `v`'s list needs a matching occurrence of `v` in `w`'s list, and no
    /// list may mention its own key. Asymmetric input is rejected with
    /// [`GraphError::InvalidInput`].
    pub fn from_adjacency(adjacency: BTreeMap<V, Vec<V>>) -> Result<Self> {
        let graph = Self { adjacency };
        if let Some(why) = graph.symmetry_violation() {
            return Err(GraphError::invalid_input(why));
        }
        Ok(graph)
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of directed arcs (twice the edge count).
    pub fn arc_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.arc_count() / 2
    }

    /// Whether `v` is a live vertex.
    pub fn contains(&self, v: V) -> bool {
        self.adjacency.contains_key(&v)
    }

    /// Live vertex labels in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.adjacency.keys().copied()
    }

    /// The arc list of `v`, with parallel edges repeated.
    pub fn neighbors(&self, v: V) -> Option<&[V]> {
        self.adjacency.get(&v).map(Vec::as_slice)
    }

    /// The number of arcs leaving `v`, counting parallel edges.
    pub fn degree(&self, v: V) -> Option<usize> {
        self.adjacency.get(&v).map(Vec::len)
    }

    /// The smallest vertex degree, or `None` on an empty graph.
    ///
    /// For a connected graph this is an upper bound on the minimum cut:
    /// isolating the minimum-degree vertex cuts exactly that many edges.
    pub fn min_degree(&self) -> Option<usize> {
        self.adjacency.values().map(Vec::len).min()
    }

    /// The largest vertex degree, or `None` on an empty graph.
    pub fn max_degree(&self) -> Option<usize> {
        self.adjacency.values().map(Vec::len).max()
    }

    /// Adds `v` with an empty arc list; a no-op if `v` is already live.
    pub fn add_vertex(&mut self, v: V) {
        self.adjacency.entry(v).or_default();
    }

    /// Adds the undirected edge `(v, w)` as a symmetric arc pair.
    ///
    /// Self-loops are not representable and are rejected.
    pub fn add_edge(&mut self, v: V, w: V) -> Result<()> {
        if v == w {
            return Err(GraphError::invalid_input(format!(
                "self-loop edge at {v:?}"
            )));
        }
        self.adjacency.entry(v).or_default().push(w);
        self.adjacency.entry(w).or_default().push(v);
        Ok(())
    }

    /// Deletes `v`'s entry entirely.
    ///
    /// Only valid once no arcs touch `v` any more; in a symmetric graph
    /// that is exactly when `v`'s own arc list is empty. [`Multigraph::contract`]
    /// drains the absorbed vertex before calling this.
    pub fn remove_vertex(&mut self, v: V) -> Result<()> {
        match self.adjacency.get(&v) {
            None => Err(GraphError::VertexNotFound),
            Some(heads) if !heads.is_empty() => Err(GraphError::invalid_input(format!(
                "vertex {v:?} still has incident arcs"
            ))),
            Some(_) => {
                self.adjacency.remove(&v);
                Ok(())
            }
        }
    }

    /// Resolves a global arc index to its `(tail, head)` pair.
    ///
    /// Arcs are indexed over the concatenation of all arc lists in
    /// ascending tail order. Drawing a uniform integer in
    /// `[0, arc_count())` and resolving it here yields a uniformly random
    /// arc, which is the basis of unbiased edge sampling: picking a random
    /// vertex and then a random neighbor would skew toward edges at
    /// low-degree vertices.
    pub fn arc_at(&self, index: usize) -> Result<(V, V)> {
        let mut remaining = index;
        for (&tail, heads) in &self.adjacency {
            if remaining < heads.len() {
                return Ok((tail, heads[remaining]));
            }
            remaining -= heads.len();
        }
        Err(GraphError::IndexOutOfRange {
            index,
            arcs: self.arc_count(),
        })
    }

    /// Contracts the live edge `(keep, absorb)` into `keep`.
    ///
    /// Rewrites every arc pointing at `absorb` to point at `keep`, folds
    /// `absorb`'s remaining arcs into `keep`'s list, drops the self-loops
    /// created by the merge (all parallel `keep`–`absorb` edges vanish),
    /// and removes `absorb`. Runs in O(sum of the rewired vertices'
    /// degrees); no full scan of the graph.
    ///
    /// Fails with [`GraphError::InvalidEdge`] when the endpoints are equal,
    /// not both live, or not adjacent; the graph is unchanged in that case.
    pub fn contract(&mut self, keep: V, absorb: V) -> Result<()> {
        if keep == absorb {
            return Err(GraphError::invalid_edge(format!(
                "cannot contract {keep:?} into itself"
            )));
        }
        if !self.adjacency.contains_key(&keep) {
            return Err(GraphError::invalid_edge(format!(
                "endpoint {keep:?} is not live"
            )));
        }
        let absorbed = match self.adjacency.get_mut(&absorb) {
            Some(heads) => std::mem::take(heads),
            None => {
                return Err(GraphError::invalid_edge(format!(
                    "endpoint {absorb:?} is not live"
                )))
            }
        };
        if !absorbed.contains(&keep) {
            // Put the arcs back; the caller sees no change.
            if let Some(heads) = self.adjacency.get_mut(&absorb) {
                *heads = absorbed;
            }
            return Err(GraphError::invalid_edge(format!(
                "({keep:?}, {absorb:?}) is not an edge"
            )));
        }

        // Redirect every arc that pointed at `absorb` to `keep`. Visiting a
        // neighbor once rewrites all of its parallel arcs; repeated visits
        // are no-ops.
        for &x in &absorbed {
            if x == keep {
                continue;
            }
            match self.adjacency.get_mut(&x) {
                Some(heads) => {
                    for slot in heads.iter_mut() {
                        if *slot == absorb {
                            *slot = keep;
                        }
                    }
                }
                None => {
                    return Err(GraphError::invalid_edge(format!(
                        "arc ({absorb:?}, {x:?}) has no live head"
                    )))
                }
            }
        }

        // Fold the absorbed arc list into `keep`, dropping both directions
        // of the contracted (possibly parallel) edge so no self-loop
        // survives.
        if let Some(heads) = self.adjacency.get_mut(&keep) {
            heads.retain(|&h| h != absorb);
            heads.extend(absorbed.iter().copied().filter(|&h| h != keep));
        }

        self.remove_vertex(absorb)
    }

    /// Whether the structure is a valid undirected multigraph: matching arc
    /// multiplicity in both directions and no self-loops.
    pub fn is_symmetric(&self) -> bool {
        self.symmetry_violation().is_none()
    }

    /// First symmetry violation found, described for error messages.
    fn symmetry_violation(&self) -> Option<String> {
        for (&v, heads) in &self.adjacency {
            let mut multiplicity: BTreeMap<V, usize> = BTreeMap::new();
            for &w in heads {
                if w == v {
                    return Some(format!("self-loop arc at {v:?}"));
                }
                *multiplicity.entry(w).or_insert(0) += 1;
            }
            for (&w, &count) in &multiplicity {
                let reverse = match self.adjacency.get(&w) {
                    Some(back) => back.iter().filter(|&&h| h == v).count(),
                    None => {
                        return Some(format!("arc ({v:?}, {w:?}) has no live head"));
                    }
                };
                if reverse != count {
                    return Some(format!(
                        "arc ({v:?}, {w:?}) has multiplicity {count} but the reverse has {reverse}"
                    ));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Multigraph<u32> {
        Multigraph::from_edges(&[(1, 2), (2, 3), (3, 1)]).unwrap()
    }

    #[test]
    fn test_from_edges_counts() {
        let g = triangle();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.arc_count(), 6);
        assert_eq!(g.edge_count(), 3);
        assert!(g.is_symmetric());
    }

    #[test]
    fn test_from_edges_rejects_self_loop() {
        assert!(matches!(
            Multigraph::from_edges(&[(1, 1)]),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_adjacency_rejects_asymmetric() {
        let mut adjacency = BTreeMap::new();
        adjacency.insert(1, vec![2]);
        adjacency.insert(2, vec![]);
        assert!(matches!(
            Multigraph::from_adjacency(adjacency),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_adjacency_checks_parallel_multiplicity() {
        let mut adjacency = BTreeMap::new();
        adjacency.insert(1, vec![2, 2]);
        adjacency.insert(2, vec![1]);
        assert!(matches!(
            Multigraph::from_adjacency(adjacency),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_arc_at_scan_order() {
        let g = Multigraph::from_edges(&[(1, 2), (1, 3)]).unwrap();
        // Adjacency: 1 -> [2, 3], 2 -> [1], 3 -> [1].
        assert_eq!(g.arc_at(0).unwrap(), (1, 2));
        assert_eq!(g.arc_at(1).unwrap(), (1, 3));
        assert_eq!(g.arc_at(2).unwrap(), (2, 1));
        assert_eq!(g.arc_at(3).unwrap(), (3, 1));
        assert_eq!(
            g.arc_at(4),
            Err(GraphError::IndexOutOfRange { index: 4, arcs: 4 })
        );
    }

    #[test]
    fn test_contract_triangle_leaves_parallel_edges() {
        let mut g = triangle();
        g.contract(1, 2).unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.neighbors(1), Some(&[3, 3][..]));
        assert_eq!(g.neighbors(3), Some(&[1, 1][..]));
        assert!(g.is_symmetric());
    }

    #[test]
    fn test_contract_removes_all_parallel_copies() {
        let mut g = Multigraph::from_edges(&[(1, 2), (1, 2), (2, 3)]).unwrap();
        g.contract(1, 2).unwrap();
        assert_eq!(g.neighbors(1), Some(&[3][..]));
        assert_eq!(g.neighbors(3), Some(&[1][..]));
        assert_eq!(g.arc_count(), 2);
    }

    #[test]
    fn test_contract_degree_formula() {
        // deg(keep)' = deg(keep) + deg(absorb) - 2 * multiplicity(keep, absorb)
        let mut g =
            Multigraph::from_edges(&[(1, 2), (1, 2), (1, 3), (2, 4), (2, 4), (3, 4)]).unwrap();
        let expected = g.degree(1).unwrap() + g.degree(2).unwrap() - 2 * 2;
        g.contract(1, 2).unwrap();
        assert_eq!(g.degree(1), Some(expected));
        assert!(g.is_symmetric());
    }

    #[test]
    fn test_contract_rejects_bad_edges() {
        let mut g = Multigraph::from_edges(&[(1, 2), (3, 4)]).unwrap();
        assert!(matches!(g.contract(1, 1), Err(GraphError::InvalidEdge(_))));
        assert!(matches!(g.contract(1, 9), Err(GraphError::InvalidEdge(_))));
        assert!(matches!(g.contract(9, 1), Err(GraphError::InvalidEdge(_))));
        // Live endpoints but no edge between them.
        assert!(matches!(g.contract(1, 3), Err(GraphError::InvalidEdge(_))));
        // Failed contractions leave the graph untouched.
        assert_eq!(g, Multigraph::from_edges(&[(1, 2), (3, 4)]).unwrap());
    }

    #[test]
    fn test_contract_shrinks_arc_count_by_even_amount() {
        let mut g = triangle();
        let before = g.arc_count();
        g.contract(2, 3).unwrap();
        let shrink = before - g.arc_count();
        assert!(shrink >= 2);
        assert_eq!(shrink % 2, 0);
    }

    #[test]
    fn test_remove_vertex_guards() {
        let mut g = triangle();
        assert!(matches!(
            g.remove_vertex(1),
            Err(GraphError::InvalidInput(_))
        ));
        assert_eq!(g.remove_vertex(9), Err(GraphError::VertexNotFound));
        g.add_vertex(9);
        g.remove_vertex(9).unwrap();
        assert!(!g.contains(9));
    }

    #[test]
    fn test_degree_extremes() {
        let g = Multigraph::from_edges(&[(1, 2), (2, 3), (2, 4)]).unwrap();
        assert_eq!(g.min_degree(), Some(1));
        assert_eq!(g.max_degree(), Some(3));
        assert_eq!(Multigraph::<u32>::new().min_degree(), None);
    }
}
