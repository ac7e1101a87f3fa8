use graph::RelationalGraph;
use jpprec_core::config::SamplerConfig;
use jpprec_core::error::{ErrorCode, JpprecError};
use jpprec_core::{AdjType, IndexSpace, InteractionTables, Relation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sampler::{BatchGenerator, SamplingError, TripleSampler};
use std::collections::HashSet;
use std::sync::Arc;

fn recsys_graph() -> RelationalGraph {
    let tables = InteractionTables::new()
        .with_train([(0, 0), (1, 1)])
        .with_ini([(0, 0), (0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])
        .with_ptc([(0, 2), (1, 3), (2, 4), (3, 0)])
        .with_trust([(0, 1), (1, 2), (2, 0), (4, 3)]);
    let space = IndexSpace::new(5, 5).unwrap().with_entities(7).unwrap();
    RelationalGraph::build(&tables, space, AdjType::Si).unwrap()
}

#[test]
fn test_single_edge_graph_yields_that_edge() {
    let tables = InteractionTables::new().with_trust([(0, 1)]);
    let space = IndexSpace::new(2, 1).unwrap();
    let graph = RelationalGraph::build(&tables, space, AdjType::Si).unwrap();
    let sampler = TripleSampler::new(graph.edge_index(), space.negative_domain());
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..20 {
        let batch = sampler.sample(&mut rng, 1).unwrap();
        assert_eq!(batch.heads, vec![0]);
        assert_eq!(batch.relations, vec![Relation::Trust.id()]);
        assert_eq!(batch.pos_tails, vec![1]);
        assert_ne!(batch.neg_tails[0], 1);
        assert!(!graph
            .edge_index()
            .contains(0, batch.neg_tails[0], Relation::Trust.id()));
    }
}

#[test]
fn test_heads_are_distinct_when_graph_is_large_enough() {
    let graph = recsys_graph();
    let index = graph.edge_index();
    let sampler = TripleSampler::new(index, graph.space().negative_domain());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let batch = sampler.sample(&mut rng, index.head_count()).unwrap();
    let distinct: HashSet<_> = batch.heads.iter().copied().collect();
    assert_eq!(distinct.len(), index.head_count());
}

#[test]
fn test_heads_repeat_when_batch_exceeds_graph() {
    let graph = recsys_graph();
    let index = graph.edge_index();
    let sampler = TripleSampler::new(index, graph.space().negative_domain());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let batch_size = index.head_count() * 3;
    let batch = sampler.sample(&mut rng, batch_size).unwrap();
    assert_eq!(batch.len(), batch_size);
    assert!(batch.heads.iter().all(|h| index.heads().contains(h)));
}

#[test]
fn test_positives_exist_and_negatives_do_not() {
    let graph = recsys_graph();
    let index = graph.edge_index();
    let domain = graph.space().negative_domain();
    let sampler = TripleSampler::new(index, domain).with_max_draws(Some(10_000));
    let mut rng = ChaCha8Rng::seed_from_u64(17);

    for _ in 0..100 {
        let batch = sampler.sample(&mut rng, 8).unwrap();
        for (head, relation, pos, neg) in batch.iter() {
            assert!(index.contains(head, pos, relation));
            assert!(!index.contains(head, neg, relation));
            assert!(neg < domain);
        }
    }
}

#[test]
fn test_zero_batch_is_empty() {
    let graph = recsys_graph();
    let sampler = TripleSampler::new(graph.edge_index(), graph.space().negative_domain());
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(sampler.sample(&mut rng, 0).unwrap().is_empty());
}

#[test]
fn test_empty_graph_cannot_be_sampled() {
    let space = IndexSpace::new(3, 3).unwrap();
    let graph = RelationalGraph::build(&InteractionTables::new(), space, AdjType::Bi).unwrap();
    let sampler = TripleSampler::new(graph.edge_index(), space.negative_domain());
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let err = sampler.sample(&mut rng, 4).unwrap_err();
    assert_eq!(err, SamplingError::EmptyGraph { batch_size: 4 });
    assert_eq!(err.error_code(), ErrorCode::InvalidArgument);
}

#[test]
fn test_exhaustion_maps_to_resource_exhausted() {
    let err = SamplingError::SamplingExhausted { head: 1, draws: 10 };
    assert_eq!(err.error_code(), ErrorCode::ResourceExhausted);
    assert!(err.to_string().contains("head 1"));
}

#[test]
fn test_generator_uses_shared_graph() {
    let graph = Arc::new(recsys_graph());
    let config = SamplerConfig {
        batch_size_item: 6,
        seed: 9,
        max_draws: None,
    };
    let mut generator = BatchGenerator::new(graph.clone(), &config);

    let batch = generator.generate_relational_batch().unwrap();
    assert_eq!(batch.len(), 6);
    assert_eq!(generator.sampler().index().edge_count(), graph.edge_index().edge_count());
}
