//! Random instance generation.
//!
//! Produces `per_n` instances for every chain length in `min_n..=max_n`, with
//! each dimension drawn uniformly from `1..=max_dim`. [`instances`] yields the
//! corpus lazily and [`generate_to`] streams it straight into a writer, so the
//! corpus size is bounded by the output, not by memory.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus::{write_header, write_instance};
use crate::error::{ConfigError, Error};
use crate::instance::ChainInstance;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub min_n: usize,
    pub max_n: usize,
    /// Instances per chain length.
    pub per_n: usize,
    pub max_dim: u32,
    /// Fixed seed for reproducible corpora; entropy when `None`.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_n == 0 {
            return Err(ConfigError::ZeroMinLength);
        }
        if self.min_n > self.max_n {
            return Err(ConfigError::InvertedRange {
                min_n: self.min_n,
                max_n: self.max_n,
            });
        }
        if self.max_dim == 0 {
            return Err(ConfigError::ZeroMaxDimension);
        }
        self.total()?;
        Ok(())
    }

    /// Number of instances the configuration produces.
    ///
    /// Fails when the count does not fit in a `usize`; an inverted range
    /// produces nothing.
    pub fn total(&self) -> Result<usize, ConfigError> {
        if self.min_n > self.max_n {
            return Ok(0);
        }
        let lengths = (self.max_n - self.min_n)
            .checked_add(1)
            .ok_or(ConfigError::TooManyInstances {
                per_n: self.per_n,
                lengths: usize::MAX,
            })?;
        lengths
            .checked_mul(self.per_n)
            .ok_or(ConfigError::TooManyInstances {
                per_n: self.per_n,
                lengths,
            })
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Lazy corpus: `per_n` instances of each length, grouped by ascending `n`.
#[derive(Debug)]
pub struct Instances {
    rng: StdRng,
    n: usize,
    per_n: usize,
    max_dim: u32,
    /// Instances already produced at the current length.
    emitted: usize,
    remaining: usize,
}

impl Iterator for Instances {
    type Item = ChainInstance;

    fn next(&mut self) -> Option<ChainInstance> {
        if self.remaining == 0 {
            return None;
        }
        if self.emitted == self.per_n {
            // remaining > 0, so a longer length is still in range
            self.n += 1;
            self.emitted = 0;
        }
        self.emitted += 1;
        self.remaining -= 1;
        Some(random_instance(&mut self.rng, self.n, self.max_dim))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Instances {}

/// Validate `config` and return its instances as a lazy iterator.
pub fn instances(config: &GeneratorConfig) -> Result<Instances, ConfigError> {
    config.validate()?;
    Ok(Instances {
        rng: config.rng(),
        n: config.min_n,
        per_n: config.per_n,
        max_dim: config.max_dim,
        emitted: 0,
        remaining: config.total()?,
    })
}

/// Generate the corpus described by `config` in memory.
pub fn generate(config: &GeneratorConfig) -> Result<Vec<ChainInstance>, ConfigError> {
    Ok(instances(config)?.collect())
}

/// Write the corpus described by `config` to `out` one instance at a time.
/// Returns the number of instances written.
pub fn generate_to<W: Write>(config: &GeneratorConfig, mut out: W) -> Result<usize, Error> {
    let instances = instances(config)?;
    let total = instances.len();
    write_header(&mut out, total)?;
    for instance in instances {
        write_instance(&mut out, &instance)?;
    }
    out.flush()?;
    Ok(total)
}

/// One chain of `n` factors with dimensions in `1..=max_dim`.
///
/// # Panics
/// Panics if `n == 0` or `max_dim == 0`.
pub fn random_instance<G: Rng>(rng: &mut G, n: usize, max_dim: u32) -> ChainInstance {
    assert!(n > 0 && max_dim > 0, "empty chain or dimension range");
    let dims = (0..=n).map(|_| rng.gen_range(1..=max_dim)).collect();
    match ChainInstance::new(dims) {
        Ok(inst) => inst,
        Err(e) => unreachable!("generated dimensions are positive: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: Option<u64>) -> GeneratorConfig {
        GeneratorConfig {
            min_n: 2,
            max_n: 4,
            per_n: 3,
            max_dim: 9,
            seed,
        }
    }

    #[test]
    fn counts_and_ranges() {
        let cfg = config(Some(7));
        assert_eq!(cfg.total(), Ok(9));
        let instances = generate(&cfg).unwrap();
        assert_eq!(instances.len(), 9);
        let lens: Vec<_> = instances.iter().map(|i| i.len()).collect();
        assert_eq!(lens, vec![2, 2, 2, 3, 3, 3, 4, 4, 4]);
        for inst in &instances {
            assert!(inst.dims().iter().all(|&d| (1..=9).contains(&d)));
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate(&config(Some(42))).unwrap();
        let b = generate(&config(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_configs_rejected() {
        let mut cfg = config(None);
        cfg.min_n = 0;
        assert_eq!(generate(&cfg), Err(ConfigError::ZeroMinLength));
        let mut cfg = config(None);
        cfg.min_n = 5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvertedRange { min_n: 5, max_n: 4 })
        );
        let mut cfg = config(None);
        cfg.max_dim = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMaxDimension));
    }

    #[test]
    fn zero_per_n_gives_empty_corpus() {
        let mut cfg = config(Some(1));
        cfg.per_n = 0;
        assert_eq!(cfg.total(), Ok(0));
        assert!(generate(&cfg).unwrap().is_empty());
    }

    #[test]
    fn instance_count_overflow_is_rejected() {
        let cfg = GeneratorConfig {
            min_n: 1,
            max_n: 3,
            per_n: usize::MAX,
            max_dim: 5,
            seed: Some(1),
        };
        let expected = ConfigError::TooManyInstances {
            per_n: usize::MAX,
            lengths: 3,
        };
        assert_eq!(cfg.total(), Err(expected.clone()));
        assert_eq!(cfg.validate(), Err(expected.clone()));
        assert_eq!(generate(&cfg), Err(expected));

        let mut out = Vec::new();
        let err = generate_to(&cfg, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::TooManyInstances { lengths: 3, .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn full_length_range_does_not_overflow() {
        let cfg = GeneratorConfig {
            min_n: 1,
            max_n: usize::MAX,
            per_n: 1,
            max_dim: 5,
            seed: Some(1),
        };
        assert_eq!(cfg.total(), Ok(usize::MAX));
        let lens: Vec<_> = instances(&cfg).unwrap().take(3).map(|i| i.len()).collect();
        assert_eq!(lens, vec![1, 2, 3]);
    }

    #[test]
    fn streamed_corpus_matches_in_memory_one() {
        let cfg = config(Some(11));
        let mut streamed = Vec::new();
        assert_eq!(generate_to(&cfg, &mut streamed).unwrap(), 9);
        let mut buffered = Vec::new();
        crate::corpus::write_corpus(&mut buffered, &generate(&cfg).unwrap()).unwrap();
        assert_eq!(streamed, buffered);
    }

    #[test]
    fn lazy_instances_report_exact_length() {
        let mut it = instances(&config(Some(5))).unwrap();
        assert_eq!(it.len(), 9);
        it.next();
        assert_eq!(it.len(), 8);
    }

    #[test]
    fn unit_dim_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let inst = random_instance(&mut rng, 5, 1);
        assert_eq!(inst.dims(), &[1; 6]);
    }
}
