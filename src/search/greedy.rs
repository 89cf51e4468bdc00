// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::space::{explore, Frontier, Priority, State};
use super::{FuelSearch, RouteResult, SearchOptions};
use crate::{Graph, Positions, Result, Vehicle, Weights};

/// Greedy best-first search chasing cheap fuel.
///
/// States are expanded by the fuel price at their node, and among equally
/// priced states, by the length of the hop which discovered them. The search
/// is fast on graphs with cheap fuel near the start, but ignores the accumulated
/// cost, so the returned route is feasible but not necessarily optimal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Greedy {
    pub options: SearchOptions,
}

impl Greedy {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }
}

struct CheapestFuel<'a> {
    g: &'a Graph,
}

impl Frontier for CheapestFuel<'_> {
    fn priority(&self, at: State<'_>, _: f64, hop: f64) -> Priority {
        let price = self
            .g
            .get_node(at.node)
            .map_or(f64::INFINITY, |node| node.fuel_price);

        Priority {
            primary: price,
            secondary: hop,
        }
    }
}

impl FuelSearch for Greedy {
    fn name(&self) -> &'static str {
        "Greedy"
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
        explore(
            g,
            start,
            goal,
            vehicle,
            weights,
            &self.options,
            &CheapestFuel { g },
        )
    }
}
