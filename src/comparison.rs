// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::generator::round_cents;
use crate::{Dijkstra, FuelSearch, Graph, Result, RouteResult, SearchOptions, Vehicle, Weights};

/// Fuel price assumed when a route has no recorded fuel purchases.
pub const DEFAULT_FUEL_PRICE: f64 = 3.50;

/// Fuel cost of a fuel-aware route compared against the plain shortest route,
/// all amounts rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelSavings {
    pub baseline_fuel_cost: f64,
    pub optimized_fuel_cost: f64,
    pub savings_amount: f64,
    pub savings_percent: f64,
}

/// Finds the shortest route, ignoring fuel prices, by running [Dijkstra]
/// with the fuel weight forced to zero.
pub fn baseline_route(
    g: &Graph,
    start: &str,
    goal: &str,
    vehicle: &Vehicle,
    options: SearchOptions,
) -> Result<RouteResult> {
    Dijkstra::new(options).solve(g, start, goal, vehicle, Weights::new(1.0, 0.0), None)
}

/// Estimates the cost of the fuel burnt over `distance` at [DEFAULT_FUEL_PRICE].
pub fn estimate_fuel_cost(distance: f64, vehicle: &Vehicle) -> f64 {
    distance * vehicle.consumption_per_distance() * DEFAULT_FUEL_PRICE
}

/// Compares the fuel spent on the `baseline` and `optimized` routes.
///
/// A route which didn't need to buy any fuel is charged [estimate_fuel_cost] instead,
/// so that both routes pay for the fuel they burn. Returns [None] if either route
/// is infeasible.
pub fn compare_fuel_cost(
    baseline: &RouteResult,
    optimized: &RouteResult,
    vehicle: &Vehicle,
) -> Option<FuelSavings> {
    if !baseline.is_feasible() || !optimized.is_feasible() {
        return None;
    }

    let charged = |r: &RouteResult| {
        if r.fuel_cost > 0.0 {
            r.fuel_cost
        } else {
            estimate_fuel_cost(r.total_distance, vehicle)
        }
    };

    let baseline_fuel_cost = charged(baseline);
    let optimized_fuel_cost = charged(optimized);
    let savings_amount = baseline_fuel_cost - optimized_fuel_cost;
    let savings_percent = if baseline_fuel_cost > 0.0 {
        savings_amount / baseline_fuel_cost * 100.0
    } else {
        0.0
    };

    Some(FuelSavings {
        baseline_fuel_cost: round_cents(baseline_fuel_cost),
        optimized_fuel_cost: round_cents(optimized_fuel_cost),
        savings_amount: round_cents(savings_amount),
        savings_percent: round_cents(savings_percent),
    })
}
