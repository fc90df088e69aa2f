//! Layered dynamic programs the height-compressed engine can run.
//!
//! A problem is a chain of layers `0..=T`; each layer carries a *frontier*
//! (for grid paths: one row of scores). The engine needs:
//! - forward stepping from layer `i` to `i + 1`,
//! - block summaries Σ[a,b) with an associative merge,
//! - boundary conditions pinning states at chosen layers,
//! - a way to pick a split boundary and to rebuild a short segment locally.
//!
//! With these, [`HcpEngine`](crate::engine::HcpEngine) keeps only one frontier
//! per block live and still returns an exact optimal path.

/// A fixed instance of a layered dynamic program.
///
/// Semantics:
/// - There are `T = num_layers()` steps.
/// - `forward_step(i, frontier)` maps layer `i` to layer `i + 1`.
/// - Boundaries and summaries are only interpreted by the implementation; the
///   engine just threads them through.
pub trait HcpProblem {
    /// A single state along the reconstructed path.
    type State: Clone + PartialEq;

    /// All DP values on one layer.
    type Frontier: Clone;

    /// Interval summary Σ[a,b), merged associatively by [`merge_summary`](Self::merge_summary).
    type Summary: Clone;

    /// Constraint on valid states at one layer during reconstruction.
    type Boundary: Clone;

    /// Objective value.
    type Cost: Copy + Ord;

    /// Number of steps `T`.
    fn num_layers(&self) -> usize;

    /// Frontier at layer 0.
    fn init_frontier(&self) -> Self::Frontier;

    /// One DP step from layer `layer` to `layer + 1`, in O(W) space.
    fn forward_step(&self, layer: usize, frontier_i: &Self::Frontier) -> Self::Frontier;

    /// Walk layers `a..b` from `frontier_a`, returning the frontier at `b` and
    /// the block summary.
    fn summarize_block(
        &self,
        a: usize,
        b: usize,
        frontier_a: &Self::Frontier,
    ) -> (Self::Frontier, Self::Summary);

    /// Σ[a,c) = Σ[a,b) ⊕ Σ[b,c). Must be associative.
    fn merge_summary(&self, left: &Self::Summary, right: &Self::Summary) -> Self::Summary;

    /// Boundary at layer 0.
    fn initial_boundary(&self) -> Self::Boundary;

    /// Boundary at layer `T`, chosen from the final frontier.
    fn terminal_boundary(&self, frontier_t: &Self::Frontier) -> Self::Boundary;

    /// Pick a boundary at layer `m` (`a < m < c`) such that some optimal path
    /// over `[a, c]` passes through `beta_a`, the result, and `beta_c`.
    ///
    /// `sigma_left = Σ[a,m)` and `sigma_right = Σ[m,c)`. Implementations may
    /// recompute locally inside `[a, c]` using O(W) working memory.
    #[allow(clippy::too_many_arguments)]
    fn choose_boundary(
        &self,
        a: usize,
        m: usize,
        c: usize,
        sigma_left: &Self::Summary,
        sigma_right: &Self::Summary,
        beta_a: &Self::Boundary,
        beta_c: &Self::Boundary,
    ) -> Self::Boundary;

    /// Rebuild an optimal segment `(state_a, ..., state_b)` on layers `[a, b]`
    /// consistent with both boundaries. `a == b` is allowed and occurs when the
    /// problem has no steps at all.
    ///
    /// The engine concatenates segments and drops the duplicated join state.
    fn reconstruct_block(
        &self,
        a: usize,
        b: usize,
        beta_a: &Self::Boundary,
        beta_b: &Self::Boundary,
    ) -> Vec<Self::State>;

    /// Objective value from the final frontier and terminal boundary.
    fn extract_cost(&self, frontier_t: &Self::Frontier, beta_t: &Self::Boundary) -> Self::Cost;
}
