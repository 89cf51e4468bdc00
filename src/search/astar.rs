// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::space::{explore, FuelLevel, Frontier, Priority, State};
use super::{FuelSearch, RouteResult, SearchOptions};
use crate::{euclidean_distance, Error, Graph, Point, Positions, Result, Vehicle, Weights};

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// over (node, fuel level) states to find the cheapest route.
///
/// The heuristic is the straight-line distance to the goal, scaled by the distance weight.
/// It ignores fuel purchases altogether, see [AStarOptimized] for a tighter bound.
///
/// Requires a position of every node, and the straight-line distance between
/// two positions must never exceed the length of any route between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AStar {
    pub options: SearchOptions,
}

impl AStar {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// over (node, fuel level) states to find the cheapest route.
///
/// On top of the straight-line distance used by [AStar], the heuristic adds
/// the cheapest possible purchase of the fuel missing to reach the goal.
/// The missing fuel is bounded by the least fuel any route to the goal burns,
/// with every edge rounded to fuel steps the same way the search rounds it,
/// and priced at the lowest fuel price in the graph. The bound is computed
/// once per search, and usually results in far fewer expanded states.
///
/// Requires a position of every node, same as [AStar].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AStarOptimized {
    pub options: SearchOptions,
}

impl AStarOptimized {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }
}

/// Ensures that every node of the graph has a position.
fn require_positions<'a>(
    algorithm: &'static str,
    g: &Graph,
    positions: Option<&'a Positions>,
) -> Result<&'a Positions> {
    let positions = positions.ok_or(Error::MissingHeuristicInput {
        algorithm,
        node: None,
    })?;

    match g.iter().find(|node| !positions.contains_key(&node.id)) {
        Some(node) => Err(Error::MissingHeuristicInput {
            algorithm,
            node: Some(node.id.clone()),
        }),
        None => Ok(positions),
    }
}

fn goal_position(g: &Graph, positions: &Positions, goal: &str) -> Result<Point> {
    g.get_node(goal)
        .and_then(|node| positions.get(&node.id))
        .copied()
        .ok_or_else(|| Error::UnknownNode(goal.to_string()))
}

struct StraightLine<'a> {
    positions: &'a Positions,
    goal: Point,
}

impl StraightLine<'_> {
    fn to_goal(&self, node: &str) -> f64 {
        // Every node has a position, as checked by require_positions
        self.positions
            .get(node)
            .map_or(0.0, |&p| euclidean_distance(p, self.goal))
    }
}

struct DistanceHeuristic<'a> {
    line: StraightLine<'a>,
    distance_weight: f64,
}

impl Frontier for DistanceHeuristic<'_> {
    fn priority(&self, at: State<'_>, cost: f64, _: f64) -> Priority {
        Priority::new(cost + self.distance_weight * self.line.to_goal(at.node))
    }
}

/// Finds the least number of fuel steps burnt on the way from every node to `goal`.
/// Nodes which can't reach the goal are left out.
fn min_fuel_steps<'g>(
    g: &'g Graph,
    goal: &str,
    consumption: f64,
    step: f64,
) -> Result<HashMap<&'g str, i64>> {
    let mut steps: HashMap<&'g str, i64> = HashMap::default();
    let mut queue: BinaryHeap<Reverse<(i64, &'g str)>> = BinaryHeap::default();

    if let Some(node) = g.get_node(goal) {
        queue.push(Reverse((0, node.id.as_str())));
    }

    // Edges are symmetric, so walking away from the goal gives the distances towards it
    while let Some(Reverse((need, node))) = queue.pop() {
        if steps.contains_key(node) {
            continue;
        }
        steps.insert(node, need);

        for edge in g.neighbors(node)? {
            let to = edge.to.as_str();
            if !steps.contains_key(to) {
                let edge_need = FuelLevel::from_amount(edge.distance * consumption, step).steps();
                queue.push(Reverse((need.saturating_add(edge_need), to)));
            }
        }
    }

    Ok(steps)
}

struct FuelHeuristic<'a> {
    line: StraightLine<'a>,
    weights: Weights,
    min_steps: HashMap<&'a str, i64>,
    min_price: f64,
    step: f64,
}

impl FuelHeuristic<'_> {
    fn estimate(&self, at: State<'_>) -> f64 {
        let distance = self.line.to_goal(at.node);
        let deficit = self
            .min_steps
            .get(at.node)
            .map_or(0, |&need| (need - at.fuel.steps()).max(0));
        self.weights.distance * distance
            + self.weights.fuel * deficit as f64 * self.step * self.min_price
    }
}

impl Frontier for FuelHeuristic<'_> {
    fn priority(&self, at: State<'_>, cost: f64, _: f64) -> Priority {
        Priority::new(cost + self.estimate(at))
    }
}

impl FuelSearch for AStar {
    fn name(&self) -> &'static str {
        "A*"
    }

    fn solve(
        &self,
        g: &Graph,
        start: &str,
        goal: &str,
        vehicle: &Vehicle,
        weights: Weights,
        positions: Option<&Positions>,
    ) -> Result<RouteResult> {
        let positions = require_positions(self.name(), g, positions)?;
        let heuristic = DistanceHeuristic {
            line: StraightLine {
                positions,
                goal: goal_position(g, positions, goal)?,
            },
            distance_weight: weights.distance,
        };

        explore(g, start, goal, vehicle, weights, &self.options, &heuristic)
    }
}

impl FuelSearch for AStarOptimized {
    fn name(&self) -> &'static str {
        "A* (optimized)"
    }

    fn solve(
        &self,
        g: &Graph,
        start: &str,
        goal: &str,
        vehicle: &Vehicle,
        weights: Weights,
        positions: Option<&Positions>,
    ) -> Result<RouteResult> {
        self.options.validate()?;
        let positions = require_positions(self.name(), g, positions)?;
        let heuristic = FuelHeuristic {
            line: StraightLine {
                positions,
                goal: goal_position(g, positions, goal)?,
            },
            weights,
            min_steps: min_fuel_steps(
                g,
                goal,
                vehicle.consumption_per_distance(),
                self.options.fuel_step,
            )?,
            min_price: g.min_fuel_price().unwrap_or(0.0),
            step: self.options.fuel_step,
        };

        explore(g, start, goal, vehicle, weights, &self.options, &heuristic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> (Graph, Positions) {
        let mut g = Graph::new();
        g.add_node("A", 4.0);
        g.add_node("B", 2.0);
        g.add_edge("A", "B", 10.0).unwrap();

        let positions = Positions::from([
            ("A".to_string(), Point::new(0.0, 0.0)),
            ("B".to_string(), Point::new(6.0, 8.0)),
        ]);
        (g, positions)
    }

    #[test]
    fn fuel_heuristic_bounds_distance_and_purchase() {
        let (_, positions) = line_graph();
        let heuristic = FuelHeuristic {
            line: StraightLine {
                positions: &positions,
                goal: Point::new(6.0, 8.0),
            },
            weights: Weights::new(1.0, 2.0),
            min_steps: HashMap::from([("A", 5), ("B", 0)]),
            min_price: 2.0,
            step: 1.0,
        };

        let at = |node, fuel| State::new(node, FuelLevel::from_steps(fuel));

        // 10 units of distance, 5 units of fuel needed, 2 in the tank: 10 + 2 * 3 * 2
        assert_eq!(heuristic.estimate(at("A", 2)), 22.0);

        // A full enough tank leaves only the distance term
        assert_eq!(heuristic.estimate(at("A", 7)), 10.0);
        assert_eq!(heuristic.estimate(at("B", 0)), 0.0);
    }

    #[test]
    fn min_fuel_steps_rounds_every_edge() {
        // The detour through M burns 2 + 2 steps (2.5 rounds to 2),
        // less than the 5 steps of the direct edge
        let mut g = Graph::new();
        g.add_node("S", 1.0);
        g.add_node("M", 1.0);
        g.add_node("G", 1.0);
        g.add_node("X", 1.0);
        g.add_edge("S", "M", 5.0).unwrap();
        g.add_edge("M", "G", 5.0).unwrap();
        g.add_edge("S", "G", 9.4).unwrap();

        let steps = min_fuel_steps(&g, "G", 0.5, 1.0).unwrap();
        assert_eq!(steps.get("G"), Some(&0));
        assert_eq!(steps.get("M"), Some(&2));
        assert_eq!(steps.get("S"), Some(&4));
        assert_eq!(steps.get("X"), None);

        let steps = min_fuel_steps(&g, "G", 0.5, 0.5).unwrap();
        assert_eq!(steps.get("M"), Some(&5));
        assert_eq!(steps.get("S"), Some(&9));
    }

    #[test]
    fn missing_positions() {
        let (g, mut positions) = line_graph();
        let vehicle = Vehicle::new(10.0, 5.0, 0.5).unwrap();

        assert_eq!(
            AStar::default().solve(&g, "A", "B", &vehicle, Weights::default(), None),
            Err(Error::MissingHeuristicInput {
                algorithm: "A*",
                node: None,
            })
        );

        positions.remove("B");
        assert_eq!(
            AStarOptimized::default().solve(
                &g,
                "A",
                "B",
                &vehicle,
                Weights::default(),
                Some(&positions),
            ),
            Err(Error::MissingHeuristicInput {
                algorithm: "A* (optimized)",
                node: Some("B".to_string()),
            })
        );
    }

    #[test]
    fn unknown_goal() {
        let (g, positions) = line_graph();
        let vehicle = Vehicle::new(10.0, 5.0, 0.5).unwrap();

        assert_eq!(
            AStar::default().solve(
                &g,
                "A",
                "Z",
                &vehicle,
                Weights::default(),
                Some(&positions)
            ),
            Err(Error::UnknownNode("Z".to_string()))
        );
    }
}
