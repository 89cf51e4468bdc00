// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

/// Outcome of a single [solve](crate::FuelSearch::solve) call.
///
/// A route which doesn't exist is represented by an empty `path`
/// and infinite `total_distance`, `fuel_cost` and `objective`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    /// Visited node ids, from start to goal. Consecutive duplicates are collapsed.
    pub path: Vec<String>,

    pub total_distance: f64,

    /// Money spent on fuel along the route (not weighted).
    pub fuel_cost: f64,

    /// `weights.distance * total_distance + weights.fuel * fuel_cost`
    pub objective: f64,

    /// Number of search states expanded.
    pub expanded: usize,

    /// Truncated `BUY x` / `GO node` action trace, or the reason
    /// why no route was found.
    pub notes: String,
}

impl RouteResult {
    pub(crate) fn infeasible<S: Into<String>>(expanded: usize, notes: S) -> Self {
        Self {
            path: Vec::default(),
            total_distance: f64::INFINITY,
            fuel_cost: f64::INFINITY,
            objective: f64::INFINITY,
            expanded,
            notes: notes.into(),
        }
    }

    /// Returns `true` if a route was found.
    pub fn is_feasible(&self) -> bool {
        !self.path.is_empty()
    }
}
