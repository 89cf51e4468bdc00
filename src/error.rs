// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Convenient result alias for fallible graph, vehicle and search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error conditions caused by malformed input to the library.
///
/// Note that failing to find a route is _not_ an error - [solve](crate::FuelSearch::solve)
/// returns an infeasible [RouteResult](crate::RouteResult) in that case.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Lookup of a node which doesn't exist in a [Graph](crate::Graph).
    #[error("unknown node: {0}")]
    UnknownNode(String),

    /// Edge construction referencing a node which doesn't exist in a [Graph](crate::Graph).
    #[error("invalid edge endpoint: {0}")]
    InvalidReference(String),

    /// [Vehicle](crate::Vehicle) constructed with out-of-range values.
    #[error(
        "invalid vehicle parameters: tank capacity {tank_capacity}, fuel {fuel}, \
         consumption {consumption} (need capacity > 0, 0 <= fuel <= capacity, consumption > 0)"
    )]
    InvalidVehicleParameters {
        tank_capacity: f64,
        fuel: f64,
        consumption: f64,
    },

    /// [SearchOptions](crate::SearchOptions) with a fuel step which isn't a positive,
    /// finite number.
    #[error("invalid fuel step: {0} (need a positive, finite number)")]
    InvalidFuelStep(f64),

    /// A heuristic-based search was started without a position for some node.
    #[error("{algorithm} requires a position for every node (missing: {node:?})")]
    MissingHeuristicInput {
        algorithm: &'static str,
        node: Option<String>,
    },
}
