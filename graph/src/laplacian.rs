//! Degree normalization of relation matrices into propagation operators.
//!
//! Two schemes are supported:
//!
//! | Scheme | Selected by | Operator |
//! | --- | --- | --- |
//! | bi | `"bi"`, `"ngcf"` | `(A · D^-1/2)^T · D^-1/2` |
//! | single-side | anything else | `D^-1 · A` |
//!
//! `D` always holds the row sums of `A`. The bi operator keeps the transpose
//! step between the two scalings, so for a directed relation the weight of
//! `A[i][j]` ends up at coordinate `(j, i)`.
//!
//! Zero-degree rows invert to `0` instead of `inf`. Entries whose weight comes
//! out as exactly zero are not stored.

use crate::adjacency::{AdjacencyList, RelationMatrix};
use jpprec_core::AdjType;
use sprs::{CsMat, TriMat};
use tracing::info;

pub struct LaplacianNormalizer {
    adj_type: AdjType,
}

impl LaplacianNormalizer {
    pub fn new(adj_type: AdjType) -> Self {
        Self { adj_type }
    }

    pub fn adj_type(&self) -> AdjType {
        self.adj_type
    }

    /// One normalized matrix per relation, in the same order.
    pub fn normalize_all(&self, adjacency: &AdjacencyList) -> Vec<RelationMatrix> {
        let normalized: Vec<RelationMatrix> = adjacency
            .iter()
            .map(|entry| RelationMatrix {
                relation: entry.relation,
                matrix: self.normalize(&entry.matrix),
            })
            .collect();

        if self.adj_type.is_bi_normalized() {
            info!(adj_type = self.adj_type.as_str(), "generated bi-normalized adjacency matrices");
        } else {
            info!(adj_type = self.adj_type.as_str(), "generated si-normalized adjacency matrices");
        }
        normalized
    }

    pub fn normalize(&self, adj: &CsMat<f64>) -> CsMat<f64> {
        if self.adj_type.is_bi_normalized() {
            bi_normalized(adj)
        } else {
            si_normalized(adj)
        }
    }
}

/// `(A · D^-1/2)^T · D^-1/2`.
pub fn bi_normalized(adj: &CsMat<f64>) -> CsMat<f64> {
    let d_inv_sqrt = inverse_power(&row_degrees(adj), -0.5);
    let (rows, cols) = adj.shape();

    let mut triplets = TriMat::with_capacity((cols, rows), adj.nnz());
    for (&value, (i, j)) in adj.iter() {
        let weight = value * d_inv_sqrt[j] * d_inv_sqrt[i];
        if weight != 0.0 {
            triplets.add_triplet(j, i, weight);
        }
    }
    triplets.to_csr()
}

/// `D^-1 · A`, the random-walk operator.
pub fn si_normalized(adj: &CsMat<f64>) -> CsMat<f64> {
    let d_inv = inverse_power(&row_degrees(adj), -1.0);

    let mut triplets = TriMat::with_capacity(adj.shape(), adj.nnz());
    for (&value, (i, j)) in adj.iter() {
        let weight = d_inv[i] * value;
        if weight != 0.0 {
            triplets.add_triplet(i, j, weight);
        }
    }
    triplets.to_csr()
}

pub fn row_degrees(adj: &CsMat<f64>) -> Vec<f64> {
    let mut degrees = vec![0.0; adj.rows()];
    for (&value, (i, _)) in adj.iter() {
        degrees[i] += value;
    }
    degrees
}

fn inverse_power(degrees: &[f64], exponent: f64) -> Vec<f64> {
    degrees
        .iter()
        .map(|&d| {
            let inv = d.powf(exponent);
            if inv.is_finite() {
                inv
            } else {
                0.0
            }
        })
        .collect()
}
