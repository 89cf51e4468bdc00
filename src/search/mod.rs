// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod astar;
mod dijkstra;
mod greedy;
mod result;
mod space;

use std::fmt;
use std::str::FromStr;

pub use astar::{AStar, AStarOptimized};
pub use dijkstra::Dijkstra;
pub use greedy::Greedy;
pub use result::RouteResult;
pub use space::{discretize, FuelLevel};

use crate::{Error, Graph, Positions, Result, Vehicle, Weights};

/// Tolerance of all "is this cheaper than the known cost" comparisons,
/// guarding against re-expanding states because of floating-point noise.
pub const EPSILON: f64 = 1e-9;

/// Recommended granularity of fuel levels.
pub const DEFAULT_FUEL_STEP: f64 = 1.0;

/// Recommended number of allowed state expansions before a search gives up
/// and returns an infeasible [RouteResult].
pub const DEFAULT_EXPANSION_LIMIT: usize = 1_000_000;

/// Maximum number of actions kept in [RouteResult::notes].
pub const TRACE_LIMIT: usize = 12;

/// Additional controls shared by all [FuelSearch] implementations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Granularity of fuel levels, must be positive. Fuel is always bought
    /// in single steps, and the fuel burnt on every edge is rounded to the nearest step.
    pub fuel_step: f64,

    /// Limits how many states may be expanded. Concluding that no route exists
    /// requires expanding every reachable state, which for small fuel steps and
    /// large tanks can take a very long time.
    pub expansion_limit: usize,
}

impl SearchOptions {
    /// Creates search options, ensuring that `fuel_step` is positive and finite.
    pub fn new(fuel_step: f64, expansion_limit: usize) -> Result<Self> {
        let options = Self {
            fuel_step,
            expansion_limit,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks the options which can't be enforced by the type system, as the fields are public.
    /// Every [FuelSearch::solve] call starts with this check.
    pub fn validate(&self) -> Result<()> {
        if self.fuel_step > 0.0 && self.fuel_step.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidFuelStep(self.fuel_step))
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuel_step: DEFAULT_FUEL_STEP,
            expansion_limit: DEFAULT_EXPANSION_LIMIT,
        }
    }
}

/// Capability shared by all fuel-aware route searches.
///
/// Implementations never mutate their inputs and keep no state between calls,
/// so a single instance may be shared between threads running independent searches.
pub trait FuelSearch: Send + Sync {
    /// Human-readable name of the algorithm.
    fn name(&self) -> &'static str;

    /// Finds the route from `start` to `goal` minimizing `weights.distance * distance +
    /// weights.fuel * fuel_cost`, starting with [Vehicle::fuel] (clamped to the tank and
    /// discretized) in the tank.
    ///
    /// `positions` are only used by heuristic-based searches, which fail with
    /// [Error::MissingHeuristicInput](crate::Error::MissingHeuristicInput) without them.
    /// Unknown `start` or `goal` ids result in [Error::UnknownNode](crate::Error::UnknownNode).
    ///
    /// If no route exists, an infeasible [RouteResult] is returned.
    fn solve(
        &self,
        g: &Graph,
        start: &str,
        goal: &str,
        vehicle: &Vehicle,
        weights: Weights,
        positions: Option<&Positions>,
    ) -> Result<RouteResult>;
}

/// Selects one of the [FuelSearch] implementations by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// [Dijkstra]
    #[default]
    Dijkstra,

    /// [Greedy]
    Greedy,

    /// [AStar]
    AStar,

    /// [AStarOptimized]
    AStarOptimized,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::AStar,
        Algorithm::AStarOptimized,
    ];

    /// Returns `true` if the algorithm needs node positions.
    pub fn needs_positions(self) -> bool {
        matches!(self, Algorithm::AStar | Algorithm::AStarOptimized)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::Greedy => "greedy",
            Algorithm::AStar => "astar",
            Algorithm::AStarOptimized => "astar-optimized",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected dijkstra, greedy, astar or astar-optimized)")]
pub struct ParseAlgorithmError(String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "greedy" => Ok(Algorithm::Greedy),
            "astar" | "a-star" => Ok(Algorithm::AStar),
            "astar-optimized" | "a-star-optimized" => Ok(Algorithm::AStarOptimized),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

/// Creates the [FuelSearch] implementation for the given [Algorithm].
pub fn select_solver(algorithm: Algorithm, options: SearchOptions) -> Box<dyn FuelSearch> {
    match algorithm {
        Algorithm::Dijkstra => Box::new(Dijkstra::new(options)),
        Algorithm::Greedy => Box::new(Greedy::new(options)),
        Algorithm::AStar => Box::new(AStar::new(options)),
        Algorithm::AStarOptimized => Box::new(AStarOptimized::new(options)),
    }
}
