use crate::error::{ErrorCode, JpprecError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position in the unified user+item numbering.
pub type NodeId = usize;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpaceError {
    #[error("index space must contain at least one node")]
    Empty,
    #[error("index space size overflows: n_users={n_users}, n_items={n_items}")]
    Overflow { n_users: usize, n_items: usize },
}

impl JpprecError for SpaceError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

/// Users occupy `[0, n_users)`, items occupy `[n_users, n_users + n_items)`.
///
/// `n_entities` only widens the negative-sampling domain; it defaults to
/// `n_items` when the dataset carries no extra entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSpace {
    n_users: usize,
    n_items: usize,
    n_entities: usize,
}

impl IndexSpace {
    pub fn new(n_users: usize, n_items: usize) -> Result<Self, SpaceError> {
        let total = n_users
            .checked_add(n_items)
            .ok_or(SpaceError::Overflow { n_users, n_items })?;
        if total == 0 {
            return Err(SpaceError::Empty);
        }
        Ok(Self {
            n_users,
            n_items,
            n_entities: n_items,
        })
    }

    pub fn with_entities(mut self, n_entities: usize) -> Result<Self, SpaceError> {
        if self.n_users.checked_add(n_entities).is_none() {
            return Err(SpaceError::Overflow {
                n_users: self.n_users,
                n_items: n_entities,
            });
        }
        self.n_entities = n_entities;
        Ok(self)
    }

    pub fn n_users(&self) -> usize {
        self.n_users
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    pub fn n_entities(&self) -> usize {
        self.n_entities
    }

    /// Side length of every relation matrix.
    pub fn n_nodes(&self) -> usize {
        self.n_users + self.n_items
    }

    /// Offset that maps an item-local id into the unified space.
    pub fn item_offset(&self) -> usize {
        self.n_users
    }

    /// Upper bound (exclusive) for negative tail draws.
    pub fn negative_domain(&self) -> usize {
        self.n_users + self.n_entities
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node < self.n_nodes()
    }

    pub fn is_user(&self, node: NodeId) -> bool {
        node < self.n_users
    }

    pub fn is_item(&self, node: NodeId) -> bool {
        node >= self.n_users && node < self.n_nodes()
    }

    /// Shifts a raw pair into the unified space, returning `None` when either
    /// endpoint falls outside it.
    pub fn check_pair(
        &self,
        row: usize,
        col: usize,
        row_offset: usize,
        col_offset: usize,
    ) -> Option<(NodeId, NodeId)> {
        let r = row.checked_add(row_offset)?;
        let c = col.checked_add(col_offset)?;
        (self.contains(r) && self.contains(c)).then_some((r, c))
    }
}
