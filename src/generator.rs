//! Random vectors for seeding demo databases

use rand::seq::SliceRandom;
use rand::Rng;

use crate::vector::Vector;

pub const COLORS: &[&str] = &["red", "green", "blue"];
pub const SHAPES: &[&str] = &["circle", "square", "triangle"];

const MIN_DIMENSIONS: usize = 2;
const MAX_DIMENSIONS: usize = 5;
const MIN_VALUE: i64 = 1;
const MAX_VALUE: i64 = 10;

/// Generate one vector with 2-5 dimensions valued 1-10 and a random color and shape
pub fn generate_one_vector<R: Rng>(rng: &mut R) -> Vector {
    let total_dimensions = rng.gen_range(MIN_DIMENSIONS..=MAX_DIMENSIONS);
    let dimensions = (0..total_dimensions)
        .map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE))
        .collect();

    // Both lists are non-empty constants
    let color = COLORS.choose(rng).copied().unwrap_or(COLORS[0]);
    let shape = SHAPES.choose(rng).copied().unwrap_or(SHAPES[0]);

    Vector::new(dimensions, color, shape)
}

pub fn generate_vectors<R: Rng>(count: usize, rng: &mut R) -> Vec<Vector> {
    (0..count).map(|_| generate_one_vector(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_vectors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for vector in generate_vectors(200, &mut rng) {
            assert!((MIN_DIMENSIONS..=MAX_DIMENSIONS).contains(&vector.length()));
            assert!(vector
                .dimensions()
                .iter()
                .all(|d| (MIN_VALUE..=MAX_VALUE).contains(d)));
            assert!(COLORS.contains(&vector.color()));
            assert!(SHAPES.contains(&vector.shape()));
            assert_eq!(vector.id(), None);
        }
    }

    #[test]
    fn test_same_seed_same_vectors() {
        let first = generate_one_vector(&mut StdRng::seed_from_u64(42));
        let second = generate_one_vector(&mut StdRng::seed_from_u64(42));

        assert_eq!(first.dimensions(), second.dimensions());
        assert_eq!(first.color(), second.color());
        assert_eq!(first.shape(), second.shape());
    }
}
