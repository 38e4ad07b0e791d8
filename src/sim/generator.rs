//! Per-building sample generation.
//!
//! Drives [`PairSampler`] over whole buildings: decides the placement intent of
//! every sample, carries listener positions over when asked to, and retries
//! rejected draws within a fixed budget.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Point;
use crate::error::{SamplerError, SamplerResult};
use crate::io::descriptor::HouseDescriptor;
use crate::sim::index::GeometryIndex;
use crate::sim::oracle::NavigabilityOracle;
use crate::sim::sampling::{DrawRequest, PairConfig, PairSampler, Sample};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub pair: PairConfig,
    /// Probability that a sample asks for the source in the listener's room.
    pub same_room_probability: f64,
    /// Probability that a fresh listener may stand anywhere navigable.
    pub corridor_probability: f64,
    /// Samples generated per room; buildings without rooms count as one room.
    pub samples_per_room: usize,
    /// Whole-draw budget per sample.
    pub max_draws_per_sample: usize,
    /// Number of consecutive samples sharing one listener position.
    pub listener_reuse: usize,
    pub seed: u64,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self {
            pair: PairConfig::new(),
            same_room_probability: 0.75,
            corridor_probability: 0.2,
            samples_per_room: 10,
            max_draws_per_sample: 100,
            listener_reuse: 1,
            seed: 42,
        }
    }

    pub fn validate(&self) -> SamplerResult<()> {
        self.pair.validate()?;
        for (name, p) in [
            ("same_room_probability", self.same_room_probability),
            ("corridor_probability", self.corridor_probability),
        ] {
            if !(0. ..=1.).contains(&p) {
                return Err(SamplerError::InvalidConfig(format!(
                    "{} must lie in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if self.max_draws_per_sample == 0 || self.listener_reuse == 0 {
            return Err(SamplerError::InvalidConfig(
                "max_draws_per_sample and listener_reuse must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Samples generated for one building.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseSamples {
    pub house_id: String,
    pub samples: Vec<Sample>,
    /// Samples given up on after exhausting their draw budget.
    pub skipped: usize,
}

/// Generates `samples_per_room * room_count` samples for one building.
///
/// A sample whose retries run out is skipped and counted. Errors that no retry
/// can fix (missing rooms, no room tall enough) abort the building.
pub fn generate_house<O, R>(
    house: &HouseDescriptor,
    index: &GeometryIndex,
    oracle: &mut O,
    config: &GeneratorConfig,
    rng: &mut R,
) -> SamplerResult<HouseSamples>
where
    O: NavigabilityOracle + ?Sized,
    R: Rng,
{
    config.validate()?;
    let sampler = PairSampler::new(index, &config.pair)?;
    let target = config.samples_per_room * house.room_count().max(1);

    let mut samples = Vec::with_capacity(target);
    let mut skipped = 0;
    let mut listener: Option<Point> = None;
    let mut listener_uses = 0;

    for _ in 0..target {
        let same_room = rng.gen_bool(config.same_room_probability);
        let allow_corridor = rng.gen_bool(config.corridor_probability);
        let mut request = DrawRequest::new(same_room, allow_corridor);
        if listener_uses < config.listener_reuse {
            request.previous_listener = listener;
        }

        match sampler.generate_until(oracle, rng, &request, config.max_draws_per_sample) {
            Ok(sample) => {
                tracing::debug!(
                    house = %house.house_id,
                    listener_room = %house.slot_info(sample.listener_room),
                    source_room = %house.slot_info(sample.source_room),
                    distance = sample.distance,
                    "Accepted sample"
                );
                if request.previous_listener.is_some() {
                    listener_uses += 1;
                } else {
                    listener = Some(sample.listener);
                    listener_uses = 1;
                }
                samples.push(sample);
            }
            Err(
                e @ (SamplerError::DrawsExhausted { .. } | SamplerError::AttemptsExhausted { .. }),
            ) => {
                tracing::warn!(house = %house.house_id, error = %e, "Skipping sample");
                // Start over with a fresh listener
                listener = None;
                listener_uses = 0;
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        house = %house.house_id,
        rooms = house.room_count(),
        samples = samples.len(),
        skipped,
        "Generated samples"
    );
    Ok(HouseSamples {
        house_id: house.house_id.clone(),
        samples,
        skipped,
    })
}

/// A building whose generation failed as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedHouse {
    pub house_id: String,
    pub error: SamplerError,
}

/// Output of a dataset run, both lists in descriptor order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSamples {
    pub houses: Vec<HouseSamples>,
    pub failed: Vec<FailedHouse>,
}

/// Generates samples for every building of a dataset in parallel.
///
/// Each building gets its own [`GeometryIndex`], its own oracle from
/// `make_oracle` and an RNG seeded with `config.seed + position`, so the output
/// does not depend on thread scheduling. A building that cannot be sampled is
/// reported in [`DatasetSamples::failed`] and does not affect the others. Only
/// an invalid `config` fails the whole run.
pub fn generate_dataset<F, O>(
    houses: &[HouseDescriptor],
    config: &GeneratorConfig,
    make_oracle: F,
) -> SamplerResult<DatasetSamples>
where
    F: Fn(&HouseDescriptor, &GeometryIndex) -> O + Sync,
    O: NavigabilityOracle,
{
    config.validate()?;
    let outcomes: Vec<SamplerResult<HouseSamples>> = houses
        .par_iter()
        .enumerate()
        .map(|(i, house)| {
            let index = house.geometry_index()?;
            let mut oracle = make_oracle(house, &index);
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(i as u64));
            generate_house(house, &index, &mut oracle, config, &mut rng)
        })
        .collect();

    let mut dataset = DatasetSamples::default();
    for (house, outcome) in houses.iter().zip(outcomes) {
        match outcome {
            Ok(samples) => dataset.houses.push(samples),
            Err(error) => {
                tracing::warn!(house = %house.house_id, error = %error, "Skipping building");
                dataset.failed.push(FailedHouse {
                    house_id: house.house_id.clone(),
                    error,
                });
            }
        }
    }
    Ok(dataset)
}
