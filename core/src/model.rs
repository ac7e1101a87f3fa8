use crate::relation::RelationId;
use crate::space::NodeId;
use serde::{Deserialize, Serialize};

/// Raw `(row, col)` tables handed over by the dataset loader.
///
/// Rows are user ids. Columns are item-local ids for `train`, `ptc` and `ini`,
/// and user ids for `trust`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionTables {
    pub train: Vec<(usize, usize)>,
    pub ptc: Vec<(usize, usize)>,
    pub ini: Vec<(usize, usize)>,
    pub trust: Vec<(usize, usize)>,
}

impl InteractionTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_train(mut self, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.train.extend(pairs);
        self
    }

    pub fn with_ptc(mut self, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.ptc.extend(pairs);
        self
    }

    pub fn with_ini(mut self, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.ini.extend(pairs);
        self
    }

    pub fn with_trust(mut self, pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.trust.extend(pairs);
        self
    }

    pub fn total_pairs(&self) -> usize {
        self.train.len() + self.ptc.len() + self.ini.len() + self.trust.len()
    }
}

/// One training step worth of relational triples with a corrupted tail each.
///
/// The four vectors are parallel: position `i` describes one sampled head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationalBatch {
    pub heads: Vec<NodeId>,
    pub relations: Vec<RelationId>,
    pub pos_tails: Vec<NodeId>,
    pub neg_tails: Vec<NodeId>,
}

impl RelationalBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heads: Vec::with_capacity(capacity),
            relations: Vec::with_capacity(capacity),
            pos_tails: Vec::with_capacity(capacity),
            neg_tails: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, head: NodeId, relation: RelationId, pos_tail: NodeId, neg_tail: NodeId) {
        self.heads.push(head);
        self.relations.push(relation);
        self.pos_tails.push(pos_tail);
        self.neg_tails.push(neg_tail);
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// `(head, relation, pos_tail, neg_tail)` tuples in sampling order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, RelationId, NodeId, NodeId)> + '_ {
        self.heads
            .iter()
            .zip(&self.relations)
            .zip(&self.pos_tails)
            .zip(&self.neg_tails)
            .map(|(((h, r), p), n)| (*h, *r, *p, *n))
    }
}

/// Collaborative-filtering batch produced outside this workspace; kept here so
/// adapters share one definition of the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfBatch {
    pub users: Vec<NodeId>,
    pub pos_items: Vec<NodeId>,
    pub neg_items: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relational_batch_keeps_columns_aligned() {
        let mut batch = RelationalBatch::with_capacity(2);
        batch.push(0, 1, 5, 6);
        batch.push(2, 3, 1, 4);

        assert_eq!(batch.len(), 2);
        let rows: Vec<_> = batch.iter().collect();
        assert_eq!(rows, vec![(0, 1, 5, 6), (2, 3, 1, 4)]);
    }

    #[test]
    fn relational_batch_serializes_named_columns() {
        let mut batch = RelationalBatch::default();
        batch.push(7, 0, 9, 2);
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["heads"], serde_json::json!([7]));
        assert_eq!(json["relations"], serde_json::json!([0]));
        assert_eq!(json["pos_tails"], serde_json::json!([9]));
        assert_eq!(json["neg_tails"], serde_json::json!([2]));
    }

    #[test]
    fn tables_builder_counts_pairs() {
        let tables = InteractionTables::new()
            .with_ini([(0, 0), (1, 1)])
            .with_trust([(0, 1)]);
        assert_eq!(tables.total_pairs(), 3);
        assert!(tables.ptc.is_empty());
    }
}
