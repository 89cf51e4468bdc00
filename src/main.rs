use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use fuelroute::{Algorithm, FuelSavings, RouteResult, SearchOptions, Vehicle, Weights};

#[derive(Parser)]
struct Cli {
    /// Search algorithm: dijkstra, greedy, astar or astar-optimized
    #[arg(short, long, default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,

    /// Seed of the generated graph
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of cities in the generated graph
    #[arg(long, default_value_t = 12)]
    nodes: usize,

    /// Probability of connecting two nearby cities
    #[arg(long, default_value_t = 0.3)]
    edge_probability: f64,

    /// JSON file with fuel prices per city; random prices are used if absent
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Tank capacity
    #[arg(long, default_value_t = 20.0)]
    tank: f64,

    /// Fuel in the tank at the start
    #[arg(long, default_value_t = 5.0)]
    fuel: f64,

    /// Fuel consumed per mile
    #[arg(long, default_value_t = 0.08)]
    consumption: f64,

    /// Maximum number of refuel stops
    #[arg(long)]
    max_refuels: Option<u32>,

    /// Weight of the travelled distance
    #[arg(long, default_value_t = 1.0)]
    distance_weight: f64,

    /// Weight of the money spent on fuel
    #[arg(long, default_value_t = 1.0)]
    fuel_weight: f64,

    /// Granularity of fuel levels
    #[arg(long, default_value_t = fuelroute::DEFAULT_FUEL_STEP)]
    fuel_step: f64,

    /// Start city, defaults to the first city
    #[arg(long)]
    start: Option<String>,

    /// Goal city, defaults to the last city
    #[arg(long)]
    goal: Option<String>,
}

#[derive(Serialize)]
struct NodeOut<'a> {
    id: &'a str,
    x: f64,
    y: f64,
    fuel_price: f64,
}

#[derive(Serialize)]
struct EdgeOut<'a> {
    from: &'a str,
    to: &'a str,
    distance: f64,
}

#[derive(Serialize)]
struct Output<'a> {
    algorithm: &'static str,
    nodes: Vec<NodeOut<'a>>,
    edges: Vec<EdgeOut<'a>>,

    /// Infinite costs of infeasible routes serialize as null
    feasible: bool,
    route: RouteResult,
    baseline_path: Vec<String>,
    comparison: Option<FuelSavings>,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let overrides = cli.prices.as_ref().and_then(fuelroute::prices::load_price_overrides);
    let (g, positions) = fuelroute::generate_random_graph(&fuelroute::GeneratorOptions {
        nodes: cli.nodes,
        edge_probability: cli.edge_probability,
        seed: cli.seed,
        price_overrides: overrides.as_ref(),
        ..Default::default()
    });

    let (Some(first), Some(last)) = (g.iter().next(), g.iter().last()) else {
        return Err("the generated graph is empty".into());
    };
    let start = cli.start.as_deref().unwrap_or(&first.id);
    let goal = cli.goal.as_deref().unwrap_or(&last.id);

    let mut vehicle = Vehicle::new(cli.tank, cli.fuel, cli.consumption)?;
    if let Some(max_refuels) = cli.max_refuels {
        vehicle = vehicle.with_max_refuels(max_refuels);
    }
    let weights = Weights::new(cli.distance_weight, cli.fuel_weight);
    let options = SearchOptions::new(cli.fuel_step, fuelroute::DEFAULT_EXPANSION_LIMIT)?;

    let solver = fuelroute::select_solver(cli.algorithm, options);
    let route = solver.solve(&g, start, goal, &vehicle, weights, Some(&positions))?;
    log::info!(
        "{}: {} -> {}, objective {:.2}, {} expansions",
        solver.name(),
        start,
        goal,
        route.objective,
        route.expanded
    );

    // A failed baseline only drops the comparison
    let (baseline_path, comparison) =
        match fuelroute::baseline_route(&g, start, goal, &vehicle, options) {
            Ok(baseline) => {
                let comparison = fuelroute::compare_fuel_cost(&baseline, &route, &vehicle);
                (baseline.path, comparison)
            }
            Err(e) => {
                log::warn!("baseline route failed: {}", e);
                (Vec::default(), None)
            }
        };

    let nodes = g
        .iter()
        .filter_map(|node| {
            positions.get(&node.id).map(|p| NodeOut {
                id: &node.id,
                x: p.x,
                y: p.y,
                fuel_price: node.fuel_price,
            })
        })
        .collect();

    let mut edges: Vec<EdgeOut> = Vec::default();
    for node in g.iter() {
        for edge in g.neighbors(&node.id)? {
            // Every undirected edge is stored twice, print it once
            if node.id < edge.to {
                edges.push(EdgeOut {
                    from: &node.id,
                    to: &edge.to,
                    distance: edge.distance,
                });
            }
        }
    }

    let output = Output {
        algorithm: solver.name(),
        nodes,
        edges,
        feasible: route.is_feasible(),
        route,
        baseline_path,
        comparison,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_route_output() {
        let output = Output {
            algorithm: "Dijkstra",
            nodes: Vec::default(),
            edges: Vec::default(),
            feasible: false,
            route: RouteResult {
                path: Vec::default(),
                total_distance: f64::INFINITY,
                fuel_cost: f64::INFINITY,
                objective: f64::INFINITY,
                expanded: 4,
                notes: "No feasible path.".to_string(),
            },
            baseline_path: Vec::default(),
            comparison: None,
        };

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["feasible"], serde_json::Value::Bool(false));
        assert!(json["route"]["objective"].is_null());
        assert_eq!(json["route"]["notes"], "No feasible path.");
    }
}
