use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use super::Grid;

/// Uniform sample without replacement. Pools no larger than `count` come
/// back whole, in enumeration order.
pub fn sample_grids(grids: &[Grid], count: usize, seed: Option<u64>) -> Vec<Grid> {
    if grids.len() <= count {
        return grids.to_vec();
    }

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    index::sample(&mut rng, grids.len(), count)
        .iter()
        .map(|i| grids[i])
        .collect()
}
