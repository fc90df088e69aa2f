use std::num::NonZeroUsize;

use crate::engine::default_block_size;
use crate::{HcpEngine, HcpProblem};

/// Builder for [`HcpEngine`]; without an explicit block size it picks ⌈√T⌉.
pub struct HcpEngineBuilder<P: HcpProblem> {
    problem: P,
    block_size: Option<NonZeroUsize>,
}

impl<P: HcpProblem> HcpEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            block_size: None,
        }
    }

    pub fn with_block_size(mut self, block_size: NonZeroUsize) -> Self {
        self.block_size = Some(block_size);
        self
    }

    /// Set the block size only when one is given.
    pub fn with_optional_block_size(mut self, block_size: Option<NonZeroUsize>) -> Self {
        self.block_size = block_size.or(self.block_size);
        self
    }

    pub fn build(self) -> HcpEngine<P> {
        let b = match self.block_size {
            Some(b) => b.get(),
            None => default_block_size(self.problem.num_layers()),
        };
        HcpEngine::with_block_size(self.problem, b)
    }
}
