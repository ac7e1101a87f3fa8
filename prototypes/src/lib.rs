use jpprec_core::{IndexSpace, InteractionTables, SpaceError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of a synthetic dataset: `interactions_per_user` pairs are drawn for
/// each of the ini, ptc and train tables, and `trust_per_user` for trust.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticShape {
    pub n_users: usize,
    pub n_items: usize,
    pub interactions_per_user: usize,
    pub trust_per_user: usize,
}

impl SyntheticShape {
    pub fn space(&self) -> Result<IndexSpace, SpaceError> {
        IndexSpace::new(self.n_users, self.n_items)
    }
}

pub fn synthetic_tables(shape: SyntheticShape, seed: u64) -> InteractionTables {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let user_item = |rng: &mut ChaCha8Rng| -> Vec<(usize, usize)> {
        (0..shape.n_users)
            .flat_map(|u| (0..shape.interactions_per_user).map(move |_| u))
            .map(|u| (u, rng.gen_range(0..shape.n_items.max(1))))
            .collect()
    };

    let train = user_item(&mut rng);
    let ini = user_item(&mut rng);
    let ptc = user_item(&mut rng);
    let trust = (0..shape.n_users)
        .flat_map(|u| (0..shape.trust_per_user).map(move |_| u))
        .map(|u| (u, rng.gen_range(0..shape.n_users.max(1))))
        .collect::<Vec<_>>();

    InteractionTables::new()
        .with_train(train)
        .with_ini(ini)
        .with_ptc(ptc)
        .with_trust(trust)
}
