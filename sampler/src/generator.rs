use crate::triple::TripleSampler;
use crate::SamplingError;
use graph::RelationalGraph;
use jpprec_core::config::SamplerConfig;
use jpprec_core::RelationalBatch;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::debug;

/// Per-step batch source for a training driver. Owns its seeded random
/// source, so two generators built with the same seed emit the same batches.
pub struct BatchGenerator {
    graph: Arc<RelationalGraph>,
    rng: ChaCha8Rng,
    batch_size: usize,
    max_draws: Option<usize>,
}

impl BatchGenerator {
    pub fn new(graph: Arc<RelationalGraph>, config: &SamplerConfig) -> Self {
        Self {
            graph,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            batch_size: config.batch_size_item,
            max_draws: config.max_draws,
        }
    }

    pub fn graph(&self) -> &RelationalGraph {
        &self.graph
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn sampler(&self) -> TripleSampler<'_> {
        TripleSampler::new(
            self.graph.edge_index(),
            self.graph.space().negative_domain(),
        )
        .with_max_draws(self.max_draws)
    }

    pub fn generate_relational_batch(&mut self) -> Result<RelationalBatch, SamplingError> {
        let sampler = TripleSampler::new(
            self.graph.edge_index(),
            self.graph.space().negative_domain(),
        )
        .with_max_draws(self.max_draws);

        let batch = sampler.sample(&mut self.rng, self.batch_size)?;
        debug!(batch_size = batch.len(), "sampled relational batch");
        Ok(batch)
    }
}
