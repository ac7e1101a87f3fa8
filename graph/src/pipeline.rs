use crate::adjacency::{AdjacencyBuilder, AdjacencyList, RelationMatrix};
use crate::edge_index::EdgeIndex;
use crate::laplacian::LaplacianNormalizer;
use crate::GraphError;
use jpprec_core::{AdjType, IndexSpace, InteractionTables, RelationId};
use std::time::Instant;
use tracing::info;

/// Everything derived from the interaction tables at load time: binary
/// relation matrices, their normalized operators and the edge index.
#[derive(Debug, Clone)]
pub struct RelationalGraph {
    adj_type: AdjType,
    adjacency: AdjacencyList,
    laplacians: Vec<RelationMatrix>,
    edge_index: EdgeIndex,
}

impl RelationalGraph {
    pub fn build(
        tables: &InteractionTables,
        space: IndexSpace,
        adj_type: AdjType,
    ) -> Result<Self, GraphError> {
        let started = Instant::now();

        let adjacency = AdjacencyBuilder::new(space).build(tables)?;
        let laplacians = LaplacianNormalizer::new(adj_type).normalize_all(&adjacency);
        let edge_index = EdgeIndex::from_relation_matrices(&laplacians)?;

        info!(
            n_users = space.n_users(),
            n_items = space.n_items(),
            n_relations = adjacency.len(),
            edges = edge_index.edge_count(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "relational graph ready"
        );

        Ok(Self {
            adj_type,
            adjacency,
            laplacians,
            edge_index,
        })
    }

    pub fn space(&self) -> &IndexSpace {
        self.adjacency.space()
    }

    pub fn adj_type(&self) -> AdjType {
        self.adj_type
    }

    pub fn adjacency(&self) -> &AdjacencyList {
        &self.adjacency
    }

    pub fn relation_ids(&self) -> Vec<RelationId> {
        self.adjacency.relation_ids()
    }

    pub fn n_relations(&self) -> usize {
        self.adjacency.len()
    }

    pub fn laplacians(&self) -> &[RelationMatrix] {
        &self.laplacians
    }

    pub fn edge_index(&self) -> &EdgeIndex {
        &self.edge_index
    }
}
