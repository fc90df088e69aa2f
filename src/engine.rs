//! Generic height-compressed DP engine.
//!
//! Two phases:
//! 1. A forward pass over the layers in blocks, keeping one summary (and so
//!    one frontier) per block instead of the whole table.
//! 2. A recursive reconstruction that splits the block range in half, asks the
//!    problem for a boundary on the split layer, and recurses on both sides.
//!    Single blocks are rebuilt locally by the problem.
//!
//! The engine is generic over [`HcpProblem`]. With the `parallel` feature the
//! two halves of every split are reconstructed with `rayon::join`.

use crate::traits::HcpProblem;
#[cfg(feature = "parallel")]
use rayon::join;

/// Block size for `num_layers` layers: ⌈√T⌉, at least 1.
#[inline]
pub fn default_block_size(num_layers: usize) -> usize {
    if num_layers <= 1 {
        1
    } else {
        (num_layers as f64).sqrt().ceil() as usize
    }
}

/// Thread-safety bound required of problem types by the `parallel` feature.
#[cfg(feature = "parallel")]
pub trait EngineBound: Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Send + Sync + ?Sized> EngineBound for T {}

/// Thread-safety bound required of problem types by the `parallel` feature.
/// Without the feature every type satisfies it.
#[cfg(not(feature = "parallel"))]
pub trait EngineBound {}
#[cfg(not(feature = "parallel"))]
impl<T: ?Sized> EngineBound for T {}

/// Summary of the contiguous layers `[start, end)`.
#[derive(Debug, Clone)]
struct Block<S> {
    start: usize,
    end: usize,
    summary: S,
}

/// Height-compressed DP engine for one problem instance.
///
/// ```
/// use maxpath_dp::{Grid, HcpEngine, problems::grid_path::GridPathProblem};
///
/// let grid = Grid::example();
/// let (sum, path) = HcpEngine::new(GridPathProblem::new(&grid)).run();
/// assert_eq!(sum, 49);
/// assert_eq!(grid.sum_of(&path), 49);
/// ```
pub struct HcpEngine<P: HcpProblem> {
    problem: P,
    block_size: usize,
}

impl<P: HcpProblem> HcpEngine<P> {
    /// Engine with block size ⌈√T⌉.
    pub fn new(problem: P) -> Self {
        let b = default_block_size(problem.num_layers());
        Self::with_block_size(problem, b)
    }

    /// Engine with an explicit block size.
    ///
    /// # Panics
    /// Panics if `block_size == 0`.
    pub fn with_block_size(problem: P, block_size: usize) -> Self {
        assert!(block_size > 0, "block_size must be positive");
        Self {
            problem,
            block_size,
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Phase I: summarize every block and return the summaries together with
    /// the frontier at layer `T`.
    fn build_blocks(&self) -> (Vec<Block<P::Summary>>, P::Frontier) {
        let t = self.problem.num_layers();
        let b = self.block_size;
        let num_blocks = if t == 0 { 0 } else { t.div_ceil(b) };

        let mut blocks = Vec::with_capacity(num_blocks);
        let mut frontier = self.problem.init_frontier();

        for k in 0..num_blocks {
            let start = k * b;
            let end = ((k + 1) * b).min(t);
            let span = tracing::trace_span!("summarize_block", block = k, start, end);
            let (frontier_end, summary) =
                span.in_scope(|| self.problem.summarize_block(start, end, &frontier));
            blocks.push(Block {
                start,
                end,
                summary,
            });
            frontier = frontier_end;
        }

        (blocks, frontier)
    }

    /// Σ over a non-empty run of adjacent blocks.
    fn summarize_range(&self, blocks: &[Block<P::Summary>]) -> P::Summary {
        let (first, rest) = blocks
            .split_first()
            .expect("summary range must be non-empty");
        rest.iter().fold(first.summary.clone(), |acc, block| {
            self.problem.merge_summary(&acc, &block.summary)
        })
    }
}

impl<P> HcpEngine<P>
where
    P: HcpProblem + EngineBound,
    P::State: EngineBound,
    P::Summary: EngineBound,
    P::Boundary: EngineBound,
{
    /// Run both phases and return `(optimal_cost, optimal_path_states)`.
    ///
    /// The path starts at the problem's initial boundary and ends at the
    /// boundary chosen by [`HcpProblem::terminal_boundary`]. A problem with no
    /// layers is reconstructed as the single segment `[0, 0]`.
    ///
    /// # Panics
    /// Panics if the [`HcpProblem`] implementation breaks its contract, e.g.
    /// by producing boundaries that no optimal path can connect.
    pub fn run(&self) -> (P::Cost, Vec<P::State>) {
        let span = tracing::info_span!(
            "hcp_run",
            layers = self.problem.num_layers(),
            block_size = self.block_size
        );
        let _enter = span.enter();

        let (blocks, frontier_t) =
            tracing::info_span!("build_block_summaries").in_scope(|| self.build_blocks());

        let beta_0 = self.problem.initial_boundary();
        let beta_t = self.problem.terminal_boundary(&frontier_t);

        let path = tracing::info_span!("reconstruct", blocks = blocks.len()).in_scope(|| {
            if blocks.is_empty() {
                self.problem.reconstruct_block(0, 0, &beta_0, &beta_t)
            } else {
                self.reconstruct_on_blocks(&blocks, &beta_0, &beta_t)
            }
        });
        let cost = self.problem.extract_cost(&frontier_t, &beta_t);
        tracing::debug!(path_len = path.len(), "hcp run finished");

        (cost, path)
    }

    /// Reconstruct an optimal path across a contiguous run of blocks whose
    /// outer layers are pinned by `beta_a` and `beta_c`.
    fn reconstruct_on_blocks(
        &self,
        blocks: &[Block<P::Summary>],
        beta_a: &P::Boundary,
        beta_c: &P::Boundary,
    ) -> Vec<P::State> {
        match blocks.len() {
            0 => Vec::new(),
            1 => {
                let b = &blocks[0];
                self.problem.reconstruct_block(b.start, b.end, beta_a, beta_c)
            }
            n => {
                let (left, right) = blocks.split_at(n / 2);
                let a = left[0].start;
                let m = left[left.len() - 1].end;
                let c = right[right.len() - 1].end;

                let sigma_left = self.summarize_range(left);
                let sigma_right = self.summarize_range(right);

                let beta_m = tracing::trace_span!("choose_boundary", a, m, c).in_scope(|| {
                    self.problem
                        .choose_boundary(a, m, c, &sigma_left, &sigma_right, beta_a, beta_c)
                });

                let (path_left, path_right) =
                    recurse_halves(self, left, right, beta_a, &beta_m, beta_c);
                join_segments(path_left, path_right)
            }
        }
    }
}

/// Concatenate two segments, dropping the shared boundary state once.
fn join_segments<S: Clone + PartialEq>(left: Vec<S>, right: Vec<S>) -> Vec<S> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }
    let mut out = left;
    let offset = usize::from(out.last() == right.first());
    out.extend_from_slice(&right[offset..]);
    out
}

#[cfg(feature = "parallel")]
fn recurse_halves<P>(
    engine: &HcpEngine<P>,
    left: &[Block<P::Summary>],
    right: &[Block<P::Summary>],
    beta_a: &P::Boundary,
    beta_m: &P::Boundary,
    beta_c: &P::Boundary,
) -> (Vec<P::State>, Vec<P::State>)
where
    P: HcpProblem + EngineBound,
    P::State: EngineBound,
    P::Summary: EngineBound,
    P::Boundary: EngineBound,
{
    let left_span = tracing::trace_span!("reconstruct_left", blocks = left.len());
    let right_span = tracing::trace_span!("reconstruct_right", blocks = right.len());
    join(
        move || left_span.in_scope(|| engine.reconstruct_on_blocks(left, beta_a, beta_m)),
        move || right_span.in_scope(|| engine.reconstruct_on_blocks(right, beta_m, beta_c)),
    )
}

#[cfg(not(feature = "parallel"))]
fn recurse_halves<P>(
    engine: &HcpEngine<P>,
    left: &[Block<P::Summary>],
    right: &[Block<P::Summary>],
    beta_a: &P::Boundary,
    beta_m: &P::Boundary,
    beta_c: &P::Boundary,
) -> (Vec<P::State>, Vec<P::State>)
where
    P: HcpProblem + EngineBound,
    P::State: EngineBound,
    P::Summary: EngineBound,
    P::Boundary: EngineBound,
{
    let left_path = tracing::trace_span!("reconstruct_left", blocks = left.len())
        .in_scope(|| engine.reconstruct_on_blocks(left, beta_a, beta_m));
    let right_path = tracing::trace_span!("reconstruct_right", blocks = right.len())
        .in_scope(|| engine.reconstruct_on_blocks(right, beta_m, beta_c));
    (left_path, right_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts layers; every block reconstructs as the run of its layer indices.
    #[derive(Clone)]
    struct Counter {
        t: usize,
    }

    impl HcpProblem for Counter {
        type State = usize;
        type Frontier = u32;
        type Summary = (usize, usize);
        type Boundary = usize;
        type Cost = u32;

        fn num_layers(&self) -> usize {
            self.t
        }
        fn init_frontier(&self) -> u32 {
            0
        }
        fn forward_step(&self, _layer: usize, f: &u32) -> u32 {
            f + 1
        }
        fn summarize_block(&self, a: usize, b: usize, f: &u32) -> (u32, (usize, usize)) {
            (f + (b - a) as u32, (a, b))
        }
        fn merge_summary(&self, left: &(usize, usize), right: &(usize, usize)) -> (usize, usize) {
            assert_eq!(left.1, right.0, "summaries must be adjacent");
            (left.0, right.1)
        }
        fn initial_boundary(&self) -> usize {
            0
        }
        fn terminal_boundary(&self, _f: &u32) -> usize {
            self.t
        }
        fn choose_boundary(
            &self,
            a: usize,
            m: usize,
            c: usize,
            sigma_left: &(usize, usize),
            sigma_right: &(usize, usize),
            _beta_a: &usize,
            _beta_c: &usize,
        ) -> usize {
            assert_eq!(*sigma_left, (a, m));
            assert_eq!(*sigma_right, (m, c));
            m
        }
        fn reconstruct_block(&self, a: usize, b: usize, _ba: &usize, _bb: &usize) -> Vec<usize> {
            (a..=b).collect()
        }
        fn extract_cost(&self, f: &u32, _beta: &usize) -> u32 {
            *f
        }
    }

    #[test]
    fn blocks_cover_all_layers() {
        let engine = HcpEngine::with_block_size(Counter { t: 5 }, 2);
        let (blocks, frontier) = engine.build_blocks();
        let bounds: Vec<_> = blocks.iter().map(|b| (b.start, b.end)).collect();
        assert_eq!(bounds, vec![(0, 2), (2, 4), (4, 5)]);
        assert_eq!(frontier, 5);
    }

    #[test]
    fn run_concatenates_without_duplicate_midpoints() {
        for b in 1..=6 {
            let (cost, path) = HcpEngine::with_block_size(Counter { t: 6 }, b).run();
            assert_eq!(cost, 6);
            assert_eq!(path, (0..=6).collect::<Vec<_>>(), "block size {b}");
        }
    }

    #[test]
    fn zero_layers_reconstructs_single_segment() {
        let (cost, path) = HcpEngine::new(Counter { t: 0 }).run();
        assert_eq!(cost, 0);
        assert_eq!(path, vec![0]);
    }

    #[test]
    fn join_segments_drops_one_shared_state() {
        assert_eq!(join_segments(vec![1, 2], vec![2, 3]), vec![1, 2, 3]);
        assert_eq!(join_segments(vec![1, 2], vec![3]), vec![1, 2, 3]);
        assert_eq!(join_segments(Vec::new(), vec![3]), vec![3]);
    }

    #[test]
    #[should_panic]
    fn with_block_size_panics_on_zero() {
        let _ = HcpEngine::with_block_size(Counter { t: 2 }, 0);
    }

    #[test]
    fn default_block_size_is_sqrt_ceiling() {
        assert_eq!(default_block_size(0), 1);
        assert_eq!(default_block_size(1), 1);
        assert_eq!(default_block_size(4), 2);
        assert_eq!(default_block_size(5), 3);
        assert_eq!(default_block_size(101), 11);
        let mut prev = 0;
        for t in 0..500 {
            let b = default_block_size(t);
            assert!(b >= prev, "block size decreased at t={t}");
            prev = b;
        }
    }
}
