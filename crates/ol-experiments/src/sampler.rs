//! Unit-hypercube point samplers with affine domain mapping.
//!
//! Every method draws coordinates in `[0, 1]` per dimension and maps them via
//! `lower + (upper - lower) * u`, so produced points sit inside the domain by
//! construction; nothing is ever clamped. Seeded runs are bit-reproducible
//! across calls and platforms; unseeded runs draw a fresh seed from the
//! thread generator.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use ol_types::{Dimension, Point, SamplerError};

/// Dimension cap of the Sobol backend's direction-number tables.
pub const MAX_SOBOL_DIMENSIONS: usize = 256;
/// Sample cap of the Sobol backend.
pub const MAX_SOBOL_POINTS: usize = 1 << 16;

/// How candidate points are drawn from the unit hypercube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMethod {
    /// Owen-scrambled Sobol low-discrepancy sequence.
    Sobol,
    /// Latin hypercube: one point per stratum per dimension.
    Lhs,
    /// Independent uniform draws per dimension per point.
    UniformRandom,
}

impl SampleMethod {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sobol => "sobol",
            Self::Lhs => "lhs",
            Self::UniformRandom => "uniform_random",
        }
    }
}

/// Produce exactly `n_points` points over `dimensions`, in generation order.
///
/// Same `(method, seed, dimensions, n_points)` produces an identical point
/// sequence. With `seed = None` a fresh seed is drawn, so output differs
/// across calls.
pub fn sample(
    dimensions: &[Dimension],
    n_points: usize,
    method: SampleMethod,
    seed: Option<u64>,
) -> Result<Vec<Point>, SamplerError> {
    let seed = seed.unwrap_or_else(rand::random);
    match method {
        SampleMethod::Sobol => sobol(dimensions, n_points, seed),
        SampleMethod::Lhs => Ok(lhs(dimensions, n_points, seed)),
        SampleMethod::UniformRandom => Ok(uniform(dimensions, n_points, seed)),
    }
}

fn sobol(
    dimensions: &[Dimension],
    n_points: usize,
    seed: u64,
) -> Result<Vec<Point>, SamplerError> {
    if dimensions.len() > MAX_SOBOL_DIMENSIONS {
        return Err(SamplerError::TooManyDimensions {
            got: dimensions.len(),
            max: MAX_SOBOL_DIMENSIONS,
        });
    }
    if n_points > MAX_SOBOL_POINTS {
        return Err(SamplerError::TooManyPoints {
            got: n_points,
            max: MAX_SOBOL_POINTS,
        });
    }

    // Fold the 64-bit seed into the backend's 32-bit scramble seed.
    let scramble = (seed ^ (seed >> 32)) as u32;

    let mut points = Vec::with_capacity(n_points);
    for index in 0..n_points {
        let mut point = Point::new();
        for (dim_index, dim) in dimensions.iter().enumerate() {
            let u = sobol_burley::sample(index as u32, dim_index as u32, scramble) as f64;
            point.insert(dim.id, dim.from_unit(u));
        }
        points.push(point);
    }
    Ok(points)
}

fn lhs(dimensions: &[Dimension], n_points: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Per dimension: shuffle the strata, then jitter within each stratum.
    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(dimensions.len());
    for _ in dimensions {
        let mut strata: Vec<usize> = (0..n_points).collect();
        strata.shuffle(&mut rng);
        let column = strata
            .iter()
            .map(|s| (*s as f64 + rng.random::<f64>()) / n_points as f64)
            .collect();
        columns.push(column);
    }

    (0..n_points)
        .map(|i| {
            dimensions
                .iter()
                .zip(&columns)
                .map(|(dim, column)| (dim.id, dim.from_unit(column[i])))
                .collect()
        })
        .collect()
}

fn uniform(dimensions: &[Dimension], n_points: usize, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n_points)
        .map(|_| {
            let mut point = Point::new();
            for dim in dimensions {
                point.insert(dim.id, dim.from_unit(rng.random::<f64>()));
            }
            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ol_types::VariableId;

    fn dims() -> Vec<Dimension> {
        vec![
            Dimension::new(VariableId(1), 0.0, 10.0),
            Dimension::new(VariableId(2), -5.0, 5.0),
        ]
    }

    fn assert_within_domain(points: &[Point], dimensions: &[Dimension]) {
        for point in points {
            for dim in dimensions {
                let value = point.get(dim.id).expect("point missing a dimension");
                assert!(
                    dim.contains(value),
                    "value {value} outside [{}, {}] for variable {}",
                    dim.lower,
                    dim.upper,
                    dim.id
                );
            }
        }
    }

    #[test]
    fn sobol_points_within_domain() {
        let dimensions = dims();
        let points = sample(&dimensions, 64, SampleMethod::Sobol, Some(123)).unwrap();
        assert_eq!(points.len(), 64);
        assert_within_domain(&points, &dimensions);
    }

    #[test]
    fn lhs_points_within_domain() {
        let dimensions = dims();
        let points = sample(&dimensions, 50, SampleMethod::Lhs, Some(7)).unwrap();
        assert_eq!(points.len(), 50);
        assert_within_domain(&points, &dimensions);
    }

    #[test]
    fn uniform_points_within_domain() {
        let dimensions = dims();
        let points = sample(&dimensions, 200, SampleMethod::UniformRandom, Some(99)).unwrap();
        assert_eq!(points.len(), 200);
        assert_within_domain(&points, &dimensions);
    }

    #[test]
    fn same_seed_reproduces_sequence() {
        let dimensions = dims();
        for method in [
            SampleMethod::Sobol,
            SampleMethod::Lhs,
            SampleMethod::UniformRandom,
        ] {
            let a = sample(&dimensions, 16, method, Some(42)).unwrap();
            let b = sample(&dimensions, 16, method, Some(42)).unwrap();
            assert_eq!(a, b, "method {method:?} not reproducible");
        }
    }

    #[test]
    fn different_seeds_differ() {
        let dimensions = dims();
        let a = sample(&dimensions, 16, SampleMethod::UniformRandom, Some(1)).unwrap();
        let b = sample(&dimensions, 16, SampleMethod::UniformRandom, Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn lhs_hits_every_stratum_once() {
        let dimensions = dims();
        let n = 10;
        let points = sample(&dimensions, n, SampleMethod::Lhs, Some(5)).unwrap();

        for dim in &dimensions {
            let mut strata: Vec<usize> = points
                .iter()
                .map(|p| {
                    let u = (p.get(dim.id).unwrap() - dim.lower) / (dim.upper - dim.lower);
                    ((u * n as f64) as usize).min(n - 1)
                })
                .collect();
            strata.sort_unstable();
            let expected: Vec<usize> = (0..n).collect();
            assert_eq!(strata, expected, "stratum missed for variable {}", dim.id);
        }
    }

    #[test]
    fn zero_width_domain_collapses_to_single_value() {
        let dimensions = vec![Dimension::new(VariableId(1), 4.0, 4.0)];
        for method in [
            SampleMethod::Sobol,
            SampleMethod::Lhs,
            SampleMethod::UniformRandom,
        ] {
            let points = sample(&dimensions, 8, method, Some(3)).unwrap();
            for p in points {
                assert_eq!(p.get(VariableId(1)), Some(4.0));
            }
        }
    }

    #[test]
    fn sobol_rejects_oversized_designs() {
        let too_wide: Vec<Dimension> = (0..(MAX_SOBOL_DIMENSIONS as i64 + 1))
            .map(|i| Dimension::new(VariableId(i), 0.0, 1.0))
            .collect();
        let err = sample(&too_wide, 4, SampleMethod::Sobol, Some(1)).unwrap_err();
        assert!(matches!(err, SamplerError::TooManyDimensions { .. }));

        let dimensions = dims();
        let err = sample(&dimensions, MAX_SOBOL_POINTS + 1, SampleMethod::Sobol, Some(1))
            .unwrap_err();
        assert!(matches!(err, SamplerError::TooManyPoints { .. }));
    }

    #[test]
    fn points_are_keyed_by_variable_id() {
        let dimensions = dims();
        let points = sample(&dimensions, 4, SampleMethod::Sobol, Some(11)).unwrap();
        for p in &points {
            assert_eq!(p.len(), dimensions.len());
            assert!(p.contains(VariableId(1)));
            assert!(p.contains(VariableId(2)));
        }
    }

    #[test]
    fn method_names_match_wire_format() {
        assert_eq!(
            serde_json::to_value(SampleMethod::UniformRandom).unwrap(),
            "uniform_random"
        );
        assert_eq!(SampleMethod::Lhs.name(), "lhs");
    }
}
