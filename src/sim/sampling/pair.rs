//! Listener/source pair sampling.
//!
//! [`PairSampler::generate`] performs one draw. A draw can end three ways:
//! - `Ok(Some(sample))`: a valid pair.
//! - `Ok(None)`: the pair was rejected (too far apart, or a degenerate
//!   unconstrained draw). This is expected on tight geometry; callers retry.
//! - `Err(_)`: the building cannot satisfy the request (no rooms, no room tall
//!   enough, or a retry loop hit its attempt cap).
//!
//! The sampler has no retry policy of its own beyond the capped inner loops.
//! [`PairSampler::generate_until`] is the bounded whole-draw retry.

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::PairConfig;
use super::room::RoomSampler;
use super::sample::{DrawRequest, Sample};
use crate::error::{SamplerError, SamplerResult};
use crate::geom::room::{Room, RoomSlot};
use crate::sim::direction::classify;
use crate::sim::index::{GeometryIndex, Location};
use crate::sim::oracle::NavigabilityOracle;
use crate::{Point, Vector};

/// How listener and source positions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Both points come from the oracle and carry no room assignment.
    /// Used for buildings without room geometry.
    Unconstrained,
    /// Room geometry drives where the listener and the source go.
    RoomAware,
}

impl PlacementPolicy {
    pub fn for_index(index: &GeometryIndex) -> Self {
        if index.is_empty() {
            PlacementPolicy::Unconstrained
        } else {
            PlacementPolicy::RoomAware
        }
    }
}

/// Draws listener/source pairs for one building.
///
/// Holds shared references only, so any number of samplers may read the same
/// [`GeometryIndex`] at once.
#[derive(Debug, Clone)]
pub struct PairSampler<'a> {
    index: &'a GeometryIndex,
    config: &'a PairConfig,
    policy: PlacementPolicy,
    room_sampler: RoomSampler,
}

impl<'a> PairSampler<'a> {
    /// Creates a sampler, picking the policy from the index contents.
    pub fn new(index: &'a GeometryIndex, config: &'a PairConfig) -> SamplerResult<Self> {
        config.validate()?;
        Ok(Self {
            index,
            config,
            policy: PlacementPolicy::for_index(index),
            room_sampler: RoomSampler::new(config.floor_offset),
        })
    }

    pub fn with_policy(mut self, policy: PlacementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Performs one draw. See the module docs for the meaning of the result.
    pub fn generate<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        request: &DrawRequest,
    ) -> SamplerResult<Option<Sample>>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        match self.policy {
            PlacementPolicy::Unconstrained => Ok(self.generate_unconstrained(oracle, rng, request)),
            PlacementPolicy::RoomAware => self.generate_room_aware(oracle, rng, request),
        }
    }

    /// Repeats whole draws until one succeeds, at most `max_draws` times.
    pub fn generate_until<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        request: &DrawRequest,
        max_draws: usize,
    ) -> SamplerResult<Sample>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        for _ in 0..max_draws {
            if let Some(sample) = self.generate(oracle, rng, request)? {
                return Ok(sample);
            }
        }
        Err(SamplerError::DrawsExhausted { draws: max_draws })
    }

    fn generate_unconstrained<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        request: &DrawRequest,
    ) -> Option<Sample>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        let listener = match request.previous_listener {
            Some(pt) => pt,
            None => self.navigable_point(oracle, rng),
        };
        let sensor = listener + Vector::up(self.config.sensor_height);

        let mut source = self.navigable_point(oracle, rng);
        source.z += rng.gen_range(0.0..=self.config.default_ceiling_height);
        if source.shares_any_coordinate(&sensor) {
            tracing::debug!(%source, %sensor, "Source aligned with sensor, draw rejected");
            return None;
        }

        self.finish(listener, sensor, source, None, None)
    }

    fn generate_room_aware<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        request: &DrawRequest,
    ) -> SamplerResult<Option<Sample>>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        let (listener, listener_loc) = self.place_listener(oracle, rng, request)?;
        let sensor = listener + Vector::up(self.config.sensor_height);

        for _ in 0..self.config.max_source_attempts {
            let (mut source, source_loc) =
                self.place_source(oracle, rng, &listener_loc, request.same_room)?;
            let ceiling = source_loc
                .height
                .unwrap_or(self.config.default_ceiling_height);
            source.z += rng.gen_range(0.0..=ceiling);

            // Any shared coordinate leaves an axis without a direction label
            if source.shares_any_coordinate(&sensor) {
                continue;
            }

            return Ok(self.finish(
                listener,
                sensor,
                source,
                Some(listener_loc.slot),
                Some(source_loc.slot),
            ));
        }

        Err(SamplerError::AttemptsExhausted {
            attempts: self.config.max_source_attempts,
        })
    }

    fn place_listener<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        request: &DrawRequest,
    ) -> SamplerResult<(Point, Location)>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        if let Some(pt) = request.previous_listener {
            return Ok((pt, self.index.locate(pt)));
        }
        if request.allow_corridor {
            let pt = self.navigable_point(oracle, rng);
            return Ok((pt, self.index.locate(pt)));
        }

        let min_height = self.config.min_listener_room_height;
        if self.index.is_empty() {
            return Err(SamplerError::EmptyGeometry);
        }
        let eligible: Vec<&Room> = self
            .index
            .rooms()
            .iter()
            .filter(|r| r.height() >= min_height)
            .collect();
        let room = eligible
            .choose(rng)
            .ok_or(SamplerError::NoEligibleListenerRoom { min_height })?;
        Ok((self.room_sampler.sample(room, rng), inside(room)))
    }

    fn place_source<O, R>(
        &self,
        oracle: &mut O,
        rng: &mut R,
        listener: &Location,
        same_room: bool,
    ) -> SamplerResult<(Point, Location)>
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        match (listener.slot, same_room) {
            (RoomSlot::Room(id), true) => {
                let room = self.index.room(id)?;
                Ok((self.room_sampler.sample(room, rng), inside(room)))
            }
            (RoomSlot::Room(_), false) => {
                // The corridor competes as one extra candidate next to every room
                let pick = rng.gen_range(0..=self.index.len());
                match self.index.rooms().get(pick) {
                    Some(room) => Ok((self.room_sampler.sample(room, rng), inside(room))),
                    None => Ok((self.navigable_point(oracle, rng), Location::corridor())),
                }
            }
            (RoomSlot::Corridor, true) => {
                let pt = self.navigable_point(oracle, rng);
                Ok((pt, self.index.locate(pt)))
            }
            (RoomSlot::Corridor, false) => {
                let room = self.random_room(rng)?;
                Ok((self.room_sampler.sample(room, rng), inside(room)))
            }
        }
    }

    fn finish(
        &self,
        listener: Point,
        sensor: Point,
        source: Point,
        listener_room: Option<RoomSlot>,
        source_room: Option<RoomSlot>,
    ) -> Option<Sample> {
        let c = classify(sensor, source);
        if c.distance > self.config.max_distance {
            tracing::debug!(
                distance = c.distance,
                max_distance = self.config.max_distance,
                "Source too far from sensor, draw rejected"
            );
            return None;
        }
        Some(Sample {
            listener,
            sensor,
            source,
            direction: c.direction,
            distance: c.distance,
            listener_room,
            source_room,
        })
    }

    fn random_room<R: Rng>(&self, rng: &mut R) -> SamplerResult<&'a Room> {
        self.index
            .rooms()
            .choose(rng)
            .ok_or(SamplerError::EmptyGeometry)
    }

    /// Oracle point converted into the core frame.
    fn navigable_point<O, R>(&self, oracle: &mut O, rng: &mut R) -> Point
    where
        O: NavigabilityOracle + ?Sized,
        R: Rng,
    {
        self.config
            .simulator_axes
            .to_core(oracle.random_navigable_point(rng))
    }
}

fn inside(room: &Room) -> Location {
    Location {
        slot: RoomSlot::Room(room.id()),
        height: Some(room.height()),
    }
}
