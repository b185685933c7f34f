//! Randomized global minimum cut by repeated edge contraction.
//!
//! One trial contracts uniformly random edges until two super-vertices
//! remain; the edges left between them form a cut. A single trial finds a
//! specific minimum cut with probability at least `2 / (n * (n - 1))`, so
//! the driver repeats `T` independent trials and keeps the smallest cut
//! seen. `T` is a caller decision: [`CutConfig::trials_for`] gives the
//! classic `n^2 ln n` high-confidence count, and a fixed cap is the usual
//! choice when that is too expensive. The process is an anytime algorithm;
//! every completed trial yields a valid cut, repetition only improves the
//! odds that it is minimal.
//!
//! Trials never share mutable state (each one contracts its own deep copy
//! with its own seeded generator), so [`min_cut_parallel`] runs them on the
//! rayon thread pool and min-reduces the results. With the same base seed
//! the sequential and parallel drivers return identical results.

use std::collections::BTreeSet;
use std::fmt::Debug;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::{GraphError, Result};
use crate::graph::{Multigraph, SuperVertices};

/// Configuration for the trial driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutConfig {
    /// Number of independent contraction trials to run. Must be at least 1.
    pub trials: usize,
    /// Base seed for the per-trial generators. `None` draws one from
    /// entropy; fixing it makes the whole run reproducible.
    pub seed: Option<u64>,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: None,
        }
    }
}

impl CutConfig {
    /// The `n^2 ln n` trial count that recovers a minimum cut with high
    /// probability for an `n`-vertex graph.
    ///
    /// This grows quickly; callers with large inputs usually trade
    /// confidence for a fixed cap instead.
    pub fn trials_for(vertex_count: usize) -> usize {
        if vertex_count < 2 {
            return 1;
        }
        let n = vertex_count as f64;
        (n * n * n.ln()).ceil() as usize
    }
}

/// The best cut found across all trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutResult<V> {
    /// Number of original edges crossing the partition.
    pub size: usize,
    /// The two disjoint vertex-label sets covering the original vertex set.
    pub partition: (BTreeSet<V>, BTreeSet<V>),
    /// The crossing edges in canonical `(min, max)` direction, ascending,
    /// with parallel edges repeated. Its length equals `size`.
    pub crossing: Vec<(V, V)>,
}

/// Picks a uniformly random live edge, returned as a `(tail, head)` arc.
///
/// Uniformity is over the arc multiset, so an edge's chance of selection is
/// proportional to its parallel multiplicity, which is what the contraction
/// process requires. Fails with [`GraphError::Underflow`] below two live
/// vertices and [`GraphError::EmptyGraph`] when no arcs remain.
pub fn random_edge<V, R>(graph: &Multigraph<V>, rng: &mut R) -> Result<(V, V)>
where
    V: Ord + Copy + Debug,
    R: Rng,
{
    if graph.vertex_count() < 2 {
        return Err(GraphError::Underflow);
    }
    let arcs = graph.arc_count();
    if arcs == 0 {
        return Err(GraphError::EmptyGraph);
    }
    graph.arc_at(rng.gen_range(0..arcs))
}

/// Runs one contraction sequence to termination on a private copy.
fn run_trial<V, R>(
    original: &Multigraph<V>,
    rng: &mut R,
) -> Result<(usize, (BTreeSet<V>, BTreeSet<V>))>
where
    V: Ord + Copy + Debug,
    R: Rng,
{
    let mut graph = original.clone();
    let mut supers = SuperVertices::identity(graph.vertices());
    if graph.vertex_count() < 2 {
        return Err(GraphError::Underflow);
    }
    while graph.vertex_count() > 2 {
        let (keep, absorb) = random_edge(&graph, rng)?;
        trace!("contracting ({keep:?}, {absorb:?})");
        graph.contract(keep, absorb)?;
        supers.merge(keep, absorb)?;
    }
    let mut survivors = graph.vertices();
    let (a, b) = match (survivors.next(), survivors.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Err(GraphError::Underflow),
    };
    let size = graph.degree(a).ok_or(GraphError::VertexNotFound)?;
    // Symmetry makes the two survivors' arc lists equally long.
    debug_assert_eq!(graph.degree(b), Some(size));
    let partition = supers.bipartition()?;
    Ok((size, partition))
}

/// Runs `config.trials` independent contraction trials and returns the
/// smallest cut observed, with its partition and literal crossing edges.
///
/// The first trial to reach the minimal size wins ties. Each trial uses
/// `StdRng` seeded from the base seed plus the trial index, so a fixed
/// [`CutConfig::seed`] makes the result deterministic.
///
/// # Examples
/// ```
/// use contract_cut::{min_cut, CutConfig, Multigraph};
///
/// // A triangle with vertex 3 hanging off it: the minimum cut isolates 3.
/// let graph = Multigraph::from_edges(&[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
/// let config = CutConfig { trials: 200, seed: Some(7) };
///
/// let result = min_cut(&graph, &config).unwrap();
/// assert_eq!(result.size, 1);
/// assert_eq!(result.crossing, vec![(2, 3)]);
/// ```
pub fn min_cut<V>(graph: &Multigraph<V>, config: &CutConfig) -> Result<CutResult<V>>
where
    V: Ord + Copy + Debug,
{
    let base = validate_run(graph, config)?;
    let mut best: Option<(usize, (BTreeSet<V>, BTreeSet<V>))> = None;
    for trial in 0..config.trials {
        let mut rng = StdRng::seed_from_u64(trial_seed(base, trial));
        let (size, partition) = run_trial(graph, &mut rng)?;
        if best.as_ref().map_or(true, |(b, _)| size < *b) {
            debug!("trial {trial}: new best cut of size {size}");
            best = Some((size, partition));
        }
    }
    finish(graph, best)
}

/// [`min_cut`] with the trials spread over the rayon thread pool.
///
/// Uses the same per-trial seeds and the same first-minimum tie-break, so
/// for a fixed [`CutConfig::seed`] it returns exactly what the sequential
/// driver returns.
pub fn min_cut_parallel<V>(graph: &Multigraph<V>, config: &CutConfig) -> Result<CutResult<V>>
where
    V: Ord + Copy + Debug + Send + Sync,
{
    let base = validate_run(graph, config)?;
    let candidates: Vec<(usize, (BTreeSet<V>, BTreeSet<V>))> = (0..config.trials)
        .into_par_iter()
        .map(|trial| {
            let mut rng = StdRng::seed_from_u64(trial_seed(base, trial));
            run_trial(graph, &mut rng)
        })
        .collect::<Result<_>>()?;
    // min_by_key keeps the earliest of equal keys, matching the
    // sequential driver's tie-break.
    let best = candidates.into_iter().min_by_key(|(size, _)| *size);
    finish(graph, best)
}

fn validate_run<V>(graph: &Multigraph<V>, config: &CutConfig) -> Result<u64>
where
    V: Ord + Copy + Debug,
{
    if config.trials == 0 {
        return Err(GraphError::invalid_input("trial count must be at least 1"));
    }
    if graph.vertex_count() < 2 {
        return Err(GraphError::Underflow);
    }
    Ok(config.seed.unwrap_or_else(|| rand::thread_rng().gen()))
}

fn trial_seed(base: u64, trial: usize) -> u64 {
    base.wrapping_add(trial as u64)
}

fn finish<V>(
    graph: &Multigraph<V>,
    best: Option<(usize, (BTreeSet<V>, BTreeSet<V>))>,
) -> Result<CutResult<V>>
where
    V: Ord + Copy + Debug,
{
    let (size, partition) = best.ok_or(GraphError::Underflow)?;
    let crossing = crossing_edges(graph, &partition)?;
    // The crossing edges of the winning partition are exactly the arcs
    // left between the two survivors of its trial.
    debug_assert_eq!(crossing.len(), size);
    Ok(CutResult {
        size,
        partition,
        crossing,
    })
}

/// Lists the original edges crossing a two-set partition.
///
/// Each undirected edge is reported once in canonical `(min, max)`
/// direction, ascending, with parallel edges repeated, so the length of the
/// list is the size of the cut. The partition must bipartition the graph's
/// vertex set exactly; anything else is a driver bug and fails with
/// [`GraphError::InconsistentPartition`].
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use contract_cut::{crossing_edges, Multigraph};
///
/// let graph = Multigraph::from_edges(&[(1, 2), (2, 3), (3, 1)]).unwrap();
/// let partition = (BTreeSet::from([1]), BTreeSet::from([2, 3]));
///
/// let crossing = crossing_edges(&graph, &partition).unwrap();
/// assert_eq!(crossing, vec![(1, 2), (1, 3)]);
/// ```
pub fn crossing_edges<V>(
    graph: &Multigraph<V>,
    partition: &(BTreeSet<V>, BTreeSet<V>),
) -> Result<Vec<(V, V)>>
where
    V: Ord + Copy + Debug,
{
    let (left, right) = partition;
    if left.is_empty() || right.is_empty() {
        return Err(GraphError::inconsistent_partition("a side is empty"));
    }
    if !left.is_disjoint(right) {
        return Err(GraphError::inconsistent_partition("the sides overlap"));
    }
    if left.len() + right.len() != graph.vertex_count()
        || !graph
            .vertices()
            .all(|v| left.contains(&v) || right.contains(&v))
    {
        return Err(GraphError::inconsistent_partition(
            "the sides do not cover the vertex set",
        ));
    }
    let mut crossing = Vec::new();
    for v in graph.vertices() {
        let heads = graph.neighbors(v).ok_or(GraphError::VertexNotFound)?;
        for &w in heads {
            if v < w && left.contains(&v) != left.contains(&w) {
                crossing.push((v, w));
            }
        }
    }
    crossing.sort_unstable();
    Ok(crossing)
}
