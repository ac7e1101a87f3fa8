use crate::adjacency::RelationMatrix;
use crate::GraphError;
use jpprec_core::{NodeId, RelationId};
use sprs::CsMat;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use tracing::info;

/// One stored entry of a normalized relation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    pub head: NodeId,
    pub relation: RelationId,
    pub tail: NodeId,
    pub weight: f64,
}

/// Id sums used to prove the flattening step only permutes edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeChecksum {
    pub edges: usize,
    pub heads: u128,
    pub tails: u128,
    pub relations: u128,
}

impl EdgeChecksum {
    fn add(&mut self, head: NodeId, relation: RelationId, tail: NodeId) {
        self.edges += 1;
        self.heads += head as u128;
        self.tails += tail as u128;
        self.relations += relation as u128;
    }
}

impl std::fmt::Display for EdgeChecksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "edges={} heads={} tails={} relations={}",
            self.edges, self.heads, self.tails, self.relations
        )
    }
}

pub fn verify_permutation(before: EdgeChecksum, after: EdgeChecksum) -> Result<(), GraphError> {
    if before == after {
        Ok(())
    } else {
        Err(GraphError::IntegrityViolation { before, after })
    }
}

#[derive(Debug, Clone, Default)]
struct HeadEdges {
    pairs: Vec<(NodeId, RelationId)>,
    lookup: HashSet<(NodeId, RelationId)>,
}

impl HeadEdges {
    fn push(&mut self, tail: NodeId, relation: RelationId) {
        self.pairs.push((tail, relation));
        self.lookup.insert((tail, relation));
    }
}

/// Parallel head/relation/tail/weight columns ordered by head, then tail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatEdges {
    heads: Vec<NodeId>,
    relations: Vec<RelationId>,
    tails: Vec<NodeId>,
    weights: Vec<f64>,
}

/// The sorted slice of [`FlatEdges`] belonging to a single head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadRow<'a> {
    pub tails: &'a [NodeId],
    pub relations: &'a [RelationId],
    pub weights: &'a [f64],
}

impl FlatEdges {
    pub fn heads(&self) -> &[NodeId] {
        &self.heads
    }

    pub fn relations(&self) -> &[RelationId] {
        &self.relations
    }

    pub fn tails(&self) -> &[NodeId] {
        &self.tails
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// Positions occupied by `head`, found by binary search over the sorted
    /// head column.
    pub fn head_range(&self, head: NodeId) -> Option<Range<usize>> {
        let start = self.heads.partition_point(|&h| h < head);
        let end = self.heads.partition_point(|&h| h <= head);
        (start < end).then_some(start..end)
    }

    pub fn row(&self, head: NodeId) -> Option<HeadRow<'_>> {
        self.head_range(head).map(|range| HeadRow {
            tails: &self.tails[range.clone()],
            relations: &self.relations[range.clone()],
            weights: &self.weights[range],
        })
    }

    pub fn get(&self, position: usize) -> Option<EdgeRecord> {
        Some(EdgeRecord {
            head: *self.heads.get(position)?,
            relation: self.relations[position],
            tail: self.tails[position],
            weight: self.weights[position],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        (0..self.len()).filter_map(move |position| self.get(position))
    }

    pub fn checksum(&self) -> EdgeChecksum {
        let mut checksum = EdgeChecksum::default();
        for record in self.iter() {
            checksum.add(record.head, record.relation, record.tail);
        }
        checksum
    }
}

/// Immutable lookup structure shared by every sampling step.
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    existence: BTreeMap<NodeId, HeadEdges>,
    heads: Vec<NodeId>,
    flat: FlatEdges,
}

impl EdgeIndex {
    pub fn from_relation_matrices(matrices: &[RelationMatrix]) -> Result<Self, GraphError> {
        Self::build(
            matrices
                .iter()
                .map(|entry| (entry.relation_id(), &entry.matrix)),
        )
    }

    /// Indexes every stored entry of the given matrices, visited in order.
    pub fn build<'a, I>(matrices: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (RelationId, &'a CsMat<f64>)>,
    {
        let mut existence: BTreeMap<NodeId, HeadEdges> = BTreeMap::new();
        let mut buckets: HashMap<NodeId, Vec<(NodeId, RelationId, f64)>> = HashMap::new();
        let mut before = EdgeChecksum::default();

        for (relation, matrix) in matrices {
            for (&weight, (head, tail)) in matrix.iter() {
                before.add(head, relation, tail);
                existence.entry(head).or_default().push(tail, relation);
                buckets.entry(head).or_default().push((tail, relation, weight));
            }
        }

        let mut ordered: Vec<(NodeId, Vec<(NodeId, RelationId, f64)>)> = buckets.into_iter().collect();
        ordered.sort_unstable_by_key(|(head, _)| *head);

        let mut flat = FlatEdges {
            heads: Vec::with_capacity(before.edges),
            relations: Vec::with_capacity(before.edges),
            tails: Vec::with_capacity(before.edges),
            weights: Vec::with_capacity(before.edges),
        };
        for (head, mut bucket) in ordered {
            // Stable: equal tails keep their matrix order.
            bucket.sort_by_key(|&(tail, _, _)| tail);
            for (tail, relation, weight) in bucket {
                flat.heads.push(head);
                flat.relations.push(relation);
                flat.tails.push(tail);
                flat.weights.push(weight);
            }
        }

        verify_permutation(before, flat.checksum())?;

        let heads: Vec<NodeId> = existence.keys().copied().collect();
        info!(
            heads = heads.len(),
            edges = flat.len(),
            "built relational edge index"
        );

        Ok(Self {
            existence,
            heads,
            flat,
        })
    }

    /// Heads with at least one outgoing edge, ascending.
    pub fn heads(&self) -> &[NodeId] {
        &self.heads
    }

    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    pub fn edge_count(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// `(tail, relation)` pairs of `head` in matrix order.
    pub fn edges_of(&self, head: NodeId) -> &[(NodeId, RelationId)] {
        self.existence
            .get(&head)
            .map(|edges| edges.pairs.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, head: NodeId, tail: NodeId, relation: RelationId) -> bool {
        self.existence
            .get(&head)
            .is_some_and(|edges| edges.lookup.contains(&(tail, relation)))
    }

    pub fn flat(&self) -> &FlatEdges {
        &self.flat
    }

    pub fn checksum(&self) -> EdgeChecksum {
        self.flat.checksum()
    }
}
