// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Fuel-aware routing over weighted graphs.
//!
//! Every [Node] of a [Graph] sells fuel at its own price. A [Vehicle] with a finite tank
//! has to buy fuel along the way, and the cheapest route minimizes a weighted sum
//! of travelled distance and money spent on fuel (see [Weights]).
//!
//! Routes are found by searching over (node, fuel level) pairs, with the fuel level
//! snapped to a fixed step. Four interchangeable algorithms implement [FuelSearch]:
//! [Dijkstra], [Greedy], [AStar] and [AStarOptimized].
//!
//! # Example
//!
//! ```
//! use fuelroute::FuelSearch;
//!
//! let mut g = fuelroute::Graph::new();
//! g.add_node("A", 3.0);
//! g.add_node("B", 3.0);
//! g.add_edge("A", "B", 10.0).unwrap();
//!
//! let vehicle = fuelroute::Vehicle::new(10.0, 2.0, 0.5).unwrap();
//! let route = fuelroute::Dijkstra::default()
//!     .solve(&g, "A", "B", &vehicle, fuelroute::Weights::default(), None)
//!     .unwrap();
//!
//! assert_eq!(route.path, vec!["A", "B"]);
//! assert!(route.fuel_cost > 0.0);
//! ```

use std::collections::HashMap;

use serde::Serialize;

mod comparison;
mod distance;
mod error;
mod generator;
mod graph;
pub mod prices;
mod search;
mod vehicle;

pub use comparison::{
    baseline_route, compare_fuel_cost, estimate_fuel_cost, FuelSavings, DEFAULT_FUEL_PRICE,
};
pub use distance::{euclidean_distance, planar_miles};
pub use error::{Error, Result};
pub use generator::{generate_random_graph, City, GeneratorOptions, HIGHWAY_CITIES};
pub use graph::Graph;
pub use search::{
    discretize, select_solver, AStar, AStarOptimized, Algorithm, Dijkstra, FuelLevel, FuelSearch,
    Greedy, ParseAlgorithmError, RouteResult, SearchOptions, DEFAULT_EXPANSION_LIMIT,
    DEFAULT_FUEL_STEP, EPSILON, TRACE_LIMIT,
};
pub use vehicle::{Vehicle, Weights};

/// Represents a location of the [Graph] where fuel can be bought.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,

    /// Price of a single unit of fuel, never negative.
    pub fuel_price: f64,
}

/// Represents one direction of an undirected connection between two [Nodes](Node).
///
/// [Graph::add_edge] always inserts a mirrored edge with the same `distance`
/// on the other endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub to: String,
    pub distance: f64,
}

/// Position of a node on a plane, used by the heuristic-based searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Mapping from node id to its [Point].
pub type Positions = HashMap<String, Point>;
