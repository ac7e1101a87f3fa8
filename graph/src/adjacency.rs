use crate::GraphError;
use jpprec_core::{IndexSpace, InteractionTables, Relation, RelationId};
use sprs::{CsMat, TriMat};
use std::time::Instant;
use tracing::{debug, info};

/// A square sparse matrix tagged with the relation it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationMatrix {
    pub relation: Relation,
    pub matrix: CsMat<f64>,
}

impl RelationMatrix {
    pub fn relation_id(&self) -> RelationId {
        self.relation.id()
    }

    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }
}

/// Binary relation matrices in construction order.
#[derive(Debug, Clone)]
pub struct AdjacencyList {
    space: IndexSpace,
    entries: Vec<RelationMatrix>,
}

impl AdjacencyList {
    pub fn space(&self) -> &IndexSpace {
        &self.space
    }

    /// Number of registered relations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn relation_ids(&self) -> Vec<RelationId> {
        self.entries.iter().map(RelationMatrix::relation_id).collect()
    }

    pub fn get(&self, relation: Relation) -> Option<&RelationMatrix> {
        self.entries.iter().find(|entry| entry.relation == relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelationMatrix> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[RelationMatrix] {
        &self.entries
    }
}

/// Turns the loader's pair tables into one matrix per relation over the
/// unified user+item space.
pub struct AdjacencyBuilder {
    space: IndexSpace,
}

impl AdjacencyBuilder {
    pub fn new(space: IndexSpace) -> Self {
        Self { space }
    }

    pub fn build(&self, tables: &InteractionTables) -> Result<AdjacencyList, GraphError> {
        let started = Instant::now();
        let item_offset = self.space.item_offset();

        // Train pairs feed the CF batches only, but malformed rows are still fatal.
        self.shifted("train", &tables.train, item_offset)?;

        let (ini, ini_inverse) = self.with_inverse("ini", &tables.ini, item_offset)?;
        let (ptc, ptc_inverse) = self.with_inverse("ptc", &tables.ptc, item_offset)?;
        let trust = self.square("trust", &tables.trust, 0)?;

        let entries = vec![
            RelationMatrix { relation: Relation::Ini, matrix: ini },
            RelationMatrix { relation: Relation::Ptc, matrix: ptc },
            RelationMatrix { relation: Relation::Trust, matrix: trust },
            RelationMatrix { relation: Relation::IniInverse, matrix: ini_inverse },
            RelationMatrix { relation: Relation::PtcInverse, matrix: ptc_inverse },
        ];
        for entry in &entries {
            debug!(relation = %entry.relation, nnz = entry.nnz(), "relation matrix assembled");
        }

        let list = AdjacencyList {
            space: self.space,
            entries,
        };
        info!(
            relations = list.len(),
            relation_ids = ?list.relation_ids(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "converted interaction tables into relation matrices"
        );
        Ok(list)
    }

    /// Forward matrix plus an inverse assembled independently from the same
    /// coordinates with row and column swapped.
    fn with_inverse(
        &self,
        table: &'static str,
        pairs: &[(usize, usize)],
        col_offset: usize,
    ) -> Result<(CsMat<f64>, CsMat<f64>), GraphError> {
        let coords = self.shifted(table, pairs, col_offset)?;
        let swapped: Vec<(usize, usize)> = coords.iter().map(|&(r, c)| (c, r)).collect();
        Ok((self.assemble(&coords), self.assemble(&swapped)))
    }

    fn square(
        &self,
        table: &'static str,
        pairs: &[(usize, usize)],
        col_offset: usize,
    ) -> Result<CsMat<f64>, GraphError> {
        let coords = self.shifted(table, pairs, col_offset)?;
        Ok(self.assemble(&coords))
    }

    fn shifted(
        &self,
        table: &'static str,
        pairs: &[(usize, usize)],
        col_offset: usize,
    ) -> Result<Vec<(usize, usize)>, GraphError> {
        pairs
            .iter()
            .map(|&(row, col)| {
                self.space
                    .check_pair(row, col, 0, col_offset)
                    .ok_or(GraphError::IndexOutOfRange {
                        table,
                        row,
                        col,
                        n_nodes: self.space.n_nodes(),
                    })
            })
            .collect()
    }

    /// Repeated coordinates are summed.
    fn assemble(&self, coords: &[(usize, usize)]) -> CsMat<f64> {
        let n = self.space.n_nodes();
        let mut triplets = TriMat::with_capacity((n, n), coords.len());
        for &(row, col) in coords {
            triplets.add_triplet(row, col, 1.0);
        }
        triplets.to_csr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space() -> IndexSpace {
        IndexSpace::new(3, 4).unwrap()
    }

    #[test]
    fn ini_columns_are_shifted_past_users() {
        let tables = InteractionTables::new().with_ini([(0, 0), (2, 3)]);
        let list = AdjacencyBuilder::new(space()).build(&tables).unwrap();

        let ini = &list.get(Relation::Ini).unwrap().matrix;
        assert_eq!(ini.shape(), (7, 7));
        assert_eq!(ini.get(0, 3), Some(&1.0));
        assert_eq!(ini.get(2, 6), Some(&1.0));
        assert_eq!(ini.nnz(), 2);
    }

    #[test]
    fn trust_is_not_shifted() {
        let tables = InteractionTables::new().with_trust([(0, 2)]);
        let list = AdjacencyBuilder::new(space()).build(&tables).unwrap();

        let trust = &list.get(Relation::Trust).unwrap().matrix;
        assert_eq!(trust.get(0, 2), Some(&1.0));
        assert_eq!(trust.get(2, 0), None);
    }

    #[test]
    fn duplicate_pairs_accumulate() {
        let tables = InteractionTables::new().with_ptc([(1, 1), (1, 1)]);
        let list = AdjacencyBuilder::new(space()).build(&tables).unwrap();

        assert_eq!(list.get(Relation::Ptc).unwrap().matrix.get(1, 4), Some(&2.0));
        assert_eq!(list.get(Relation::PtcInverse).unwrap().matrix.get(4, 1), Some(&2.0));
    }

    #[test]
    fn out_of_range_item_is_rejected() {
        let tables = InteractionTables::new().with_ini([(0, 4)]);
        let err = AdjacencyBuilder::new(space()).build(&tables).unwrap_err();
        assert_eq!(
            err,
            GraphError::IndexOutOfRange {
                table: "ini",
                row: 0,
                col: 4,
                n_nodes: 7
            }
        );
    }

    #[test]
    fn malformed_train_rows_are_fatal_too() {
        let tables = InteractionTables::new().with_train([(9, 0)]);
        let err = AdjacencyBuilder::new(space()).build(&tables).unwrap_err();
        assert!(matches!(err, GraphError::IndexOutOfRange { table: "train", .. }));
    }

    #[test]
    fn empty_tables_yield_five_empty_relations() {
        let list = AdjacencyBuilder::new(space())
            .build(&InteractionTables::new())
            .unwrap();
        assert_eq!(list.len(), 5);
        assert!(list.iter().all(|entry| entry.nnz() == 0));
    }
}
