// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::space::{explore, Frontier, Priority, State};
use super::{FuelSearch, RouteResult, SearchOptions};
use crate::{Graph, Positions, Result, Vehicle, Weights};

/// Uses [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
/// over (node, fuel level) states to find the cheapest route.
///
/// Expands states purely by their cost-so-far, which makes it the ground-truth
/// baseline for the heuristic searches. Doesn't need node positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dijkstra {
    pub options: SearchOptions,
}

impl Dijkstra {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }
}

struct UniformCost;

impl Frontier for UniformCost {
    fn priority(&self, _: State<'_>, cost: f64, _: f64) -> Priority {
        Priority::new(cost)
    }
}

impl FuelSearch for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn solve(
        &self,
        g: &Graph,
        start: &str,
        goal: &str,
        vehicle: &Vehicle,
        weights: Weights,
        _: Option<&Positions>,
    ) -> Result<RouteResult> {
        explore(g, start, goal, vehicle, weights, &self.options, &UniformCost)
    }
}
