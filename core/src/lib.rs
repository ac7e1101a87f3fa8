pub mod config;
pub mod error;
pub mod model;
pub mod relation;
pub mod space;

pub use model::{CfBatch, InteractionTables, RelationalBatch};
pub use relation::{AdjType, Relation, RelationId};
pub use space::{IndexSpace, NodeId, SpaceError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the process-wide subscriber. Safe to call more than once; only the
/// first call takes effect.
pub fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
