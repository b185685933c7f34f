use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use crate::error::{GraphError, Result};

/// Tracks which original vertices each surviving super-vertex represents.
///
/// Starts as the identity mapping and mirrors the graph's contractions:
/// every [`Multigraph::contract`](crate::Multigraph::contract) call is
/// paired with exactly one [`SuperVertices::merge`] using the same
/// keep/absorb pair. The value sets always partition the original vertex
/// set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuperVertices<V> {
    groups: BTreeMap<V, BTreeSet<V>>,
}

impl<V> SuperVertices<V>
where
    V: Ord + Copy + Debug,
{
    /// Builds the identity mapping: each vertex represents only itself.
    pub fn identity<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let groups = vertices
            .into_iter()
            .map(|v| (v, BTreeSet::from([v])))
            .collect();
        Self { groups }
    }

    /// Number of surviving super-vertices.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no super-vertices remain.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The original vertices represented by the surviving vertex `v`.
    pub fn group(&self, v: V) -> Option<&BTreeSet<V>> {
        self.groups.get(&v)
    }

    /// Unions `absorb`'s set into `keep`'s and removes `absorb`'s entry.
    pub fn merge(&mut self, keep: V, absorb: V) -> Result<()> {
        if keep == absorb {
            return Err(GraphError::invalid_input(format!(
                "cannot merge {keep:?} into itself"
            )));
        }
        let absorbed = self
            .groups
            .remove(&absorb)
            .ok_or(GraphError::VertexNotFound)?;
        match self.groups.get_mut(&keep) {
            Some(set) => {
                set.extend(absorbed);
                Ok(())
            }
            None => {
                self.groups.insert(absorb, absorbed);
                Err(GraphError::VertexNotFound)
            }
        }
    }

    /// The current grouping, ordered by surviving vertex label.
    pub fn snapshot(&self) -> Vec<BTreeSet<V>> {
        self.groups.values().cloned().collect()
    }

    /// The final two-set partition once contraction has finished.
    ///
    /// Fails unless exactly two super-vertices remain.
    pub fn bipartition(&self) -> Result<(BTreeSet<V>, BTreeSet<V>)> {
        if self.groups.len() != 2 {
            return Err(GraphError::invalid_input(format!(
                "expected 2 super-vertices, have {}",
                self.groups.len()
            )));
        }
        let mut sides = self.groups.values().cloned();
        match (sides.next(), sides.next()) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(GraphError::Underflow),
        }
    }
}
