//! Rejection sampling of positive and corrupted triples.
//!
//! Each call draws heads, then for every head one positive `(tail, relation)`
//! pair and one negative tail under that relation. Draw loops are unbounded
//! unless a budget is set, in which case running out yields
//! [`SamplingError::SamplingExhausted`].

use crate::SamplingError;
use graph::EdgeIndex;
use jpprec_core::{NodeId, RelationId, RelationalBatch};
use rand::seq::index;
use rand::Rng;
use std::collections::HashSet;
use tracing::warn;

pub struct TripleSampler<'a> {
    index: &'a EdgeIndex,
    negative_domain: usize,
    max_draws: Option<usize>,
}

impl<'a> TripleSampler<'a> {
    /// Negative tails are drawn from `[0, negative_domain)`.
    pub fn new(index: &'a EdgeIndex, negative_domain: usize) -> Self {
        Self {
            index,
            negative_domain,
            max_draws: None,
        }
    }

    pub fn with_max_draws(mut self, max_draws: Option<usize>) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn index(&self) -> &EdgeIndex {
        self.index
    }

    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> Result<RelationalBatch, SamplingError> {
        let heads = self.sample_heads(rng, batch_size)?;

        let mut batch = RelationalBatch::with_capacity(batch_size);
        for head in heads {
            let (pos_rs, pos_ts) = self.sample_positive(rng, head, 1)?;
            let neg_ts = self.sample_negative(rng, head, pos_rs[0], 1)?;
            batch.push(head, pos_rs[0], pos_ts[0], neg_ts[0]);
        }
        Ok(batch)
    }

    /// Without replacement while the graph has enough heads, uniformly with
    /// replacement otherwise.
    pub fn sample_heads<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        batch_size: usize,
    ) -> Result<Vec<NodeId>, SamplingError> {
        let heads = self.index.heads();
        if batch_size == 0 {
            return Ok(Vec::new());
        }
        if heads.is_empty() {
            return Err(SamplingError::EmptyGraph { batch_size });
        }

        if batch_size <= heads.len() {
            Ok(index::sample(rng, heads.len(), batch_size)
                .into_iter()
                .map(|i| heads[i])
                .collect())
        } else {
            Ok((0..batch_size)
                .map(|_| heads[rng.gen_range(0..heads.len())])
                .collect())
        }
    }

    /// Draws `num` existing edges of `head` with pairwise distinct relations
    /// and pairwise distinct tails.
    pub fn sample_positive<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        head: NodeId,
        num: usize,
    ) -> Result<(Vec<RelationId>, Vec<NodeId>), SamplingError> {
        let pos_triples = self.index.edges_of(head);
        if pos_triples.is_empty() {
            return Err(SamplingError::UnknownHead(head));
        }

        let mut pos_rs = Vec::with_capacity(num);
        let mut pos_ts = Vec::with_capacity(num);
        let mut seen_rs = HashSet::with_capacity(num);
        let mut seen_ts = HashSet::with_capacity(num);
        let mut budget = DrawBudget::new(self.max_draws);

        while pos_rs.len() < num {
            budget.spend(head)?;
            let (t, r) = pos_triples[rng.gen_range(0..pos_triples.len())];
            if !seen_rs.contains(&r) && !seen_ts.contains(&t) {
                seen_rs.insert(r);
                seen_ts.insert(t);
                pos_rs.push(r);
                pos_ts.push(t);
            }
        }
        Ok((pos_rs, pos_ts))
    }

    /// Draws `num` distinct tails that `head` is not linked to under
    /// `relation`.
    pub fn sample_negative<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        head: NodeId,
        relation: RelationId,
        num: usize,
    ) -> Result<Vec<NodeId>, SamplingError> {
        if num > 0 && self.negative_domain == 0 {
            return Err(SamplingError::EmptyNegativeDomain);
        }

        let mut neg_ts = Vec::with_capacity(num);
        let mut seen = HashSet::with_capacity(num);
        let mut budget = DrawBudget::new(self.max_draws);

        while neg_ts.len() < num {
            budget.spend(head)?;
            let t = rng.gen_range(0..self.negative_domain);
            if !self.index.contains(head, t, relation) && seen.insert(t) {
                neg_ts.push(t);
            }
        }
        Ok(neg_ts)
    }
}

struct DrawBudget {
    limit: Option<usize>,
    used: usize,
}

impl DrawBudget {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    fn spend(&mut self, head: NodeId) -> Result<(), SamplingError> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                warn!(head, draws = self.used, "rejection sampling budget exhausted");
                return Err(SamplingError::SamplingExhausted {
                    head,
                    draws: self.used,
                });
            }
        }
        self.used += 1;
        Ok(())
    }
}
