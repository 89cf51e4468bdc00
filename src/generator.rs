// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::prices::PriceTable;
use crate::{planar_miles, Graph, Point, Positions};

/// A real-world location used as a node of generated graphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lon: f64,
    pub lat: f64,

    /// Code of the region the city's fuel price is reported for.
    pub region: &'static str,
}

/// Cities along the I-10 and I-20 corridors from Arizona to Texas,
/// in the order used for the backbone of generated graphs.
#[rustfmt::skip]
pub const HIGHWAY_CITIES: [City; 12] = [
    City { name: "Phoenix, AZ", lon: -112.074, lat: 33.448, region: "SAZ" },
    City { name: "Tucson, AZ", lon: -110.974, lat: 32.222, region: "SAZ" },
    City { name: "Las Cruces, NM", lon: -106.779, lat: 32.312, region: "SNM" },
    City { name: "El Paso, TX", lon: -106.487, lat: 31.762, region: "STX" },
    City { name: "Midland, TX", lon: -102.078, lat: 31.997, region: "STX" },
    City { name: "San Angelo, TX", lon: -100.437, lat: 31.464, region: "STX" },
    City { name: "Abilene, TX", lon: -99.733, lat: 32.449, region: "STX" },
    City { name: "Fort Worth, TX", lon: -97.331, lat: 32.756, region: "STX" },
    City { name: "Dallas, TX", lon: -96.797, lat: 32.776, region: "STX" },
    City { name: "Tyler, TX", lon: -95.301, lat: 32.351, region: "STX" },
    City { name: "Houston, TX", lon: -95.369, lat: 29.760, region: "STX" },
    City { name: "San Antonio, TX", lon: -98.493, lat: 29.424, region: "STX" },
];

/// Maximum random displacement of a city, in degrees.
const POSITION_JITTER: f64 = 0.3;

/// Controls for [generate_random_graph].
#[derive(Debug, Clone)]
pub struct GeneratorOptions<'a> {
    /// Number of nodes, capped at the length of [HIGHWAY_CITIES].
    pub nodes: usize,

    /// Probability of connecting two nearby, non-consecutive cities.
    pub edge_probability: f64,

    pub seed: u64,

    /// Fuel prices are drawn uniformly from `[price_low, price_high)`.
    pub price_low: f64,
    pub price_high: f64,

    /// Only cities closer than this many miles can be connected by a random edge.
    pub proximity_miles: f64,

    /// Fixed prices for some cities, replacing the random ones.
    pub price_overrides: Option<&'a PriceTable>,
}

impl Default for GeneratorOptions<'_> {
    fn default() -> Self {
        Self {
            nodes: 12,
            edge_probability: 0.28,
            seed: 42,
            price_low: 3.0,
            price_high: 6.0,
            proximity_miles: 300.0,
            price_overrides: None,
        }
    }
}

/// Draws a number from `[low, high)`, without panicking on empty ranges.
pub(crate) fn uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + (high - low) * rng.gen::<f64>()
}

pub(crate) fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Generates a connected [Graph] of US cities with random fuel prices,
/// together with the (jittered) lon-lat [Positions] of its nodes.
///
/// The output only depends on the options - the same seed always gives
/// the same nodes, prices, positions and edges.
///
/// Consecutive cities of [HIGHWAY_CITIES] are always connected. Other pairs closer than
/// [GeneratorOptions::proximity_miles] are connected with [GeneratorOptions::edge_probability].
/// Edge distances are the [planar_miles] between the cities, stretched by a random
/// factor from `[0.95, 1.05)` and rounded to 2 decimal places.
pub fn generate_random_graph(options: &GeneratorOptions) -> (Graph, Positions) {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut g = Graph::new();
    let mut positions = Positions::default();

    let cities = &HIGHWAY_CITIES[..options.nodes.min(HIGHWAY_CITIES.len())];
    let mut points: Vec<Point> = Vec::with_capacity(cities.len());

    for city in cities {
        let price = match options.price_overrides.and_then(|p| p.get(city.name)) {
            Some(&price) => price,
            None => uniform(&mut rng, options.price_low, options.price_high),
        };
        g.add_node(city.name, round_cents(price));

        let point = Point::new(
            city.lon + uniform(&mut rng, -POSITION_JITTER, POSITION_JITTER),
            city.lat + uniform(&mut rng, -POSITION_JITTER, POSITION_JITTER),
        );
        positions.insert(city.name.to_string(), point);
        points.push(point);
    }

    let mut edges: usize = 0;
    for i in 0..cities.len() {
        for j in (i + 1)..cities.len() {
            let miles = planar_miles(points[i], points[j]);
            let adjacent = j - i == 1;
            let nearby = miles < options.proximity_miles;

            if adjacent || (nearby && rng.gen::<f64>() < options.edge_probability) {
                let distance = round_cents(miles * uniform(&mut rng, 0.95, 1.05));
                // Both endpoints were added above
                if g.add_edge(cities[i].name, cities[j].name, distance).is_ok() {
                    edges += 1;
                }
            }
        }
    }

    // Make sure the backbone is connected
    for pair in cities.windows(2) {
        let (a, b) = (pair[0].name, pair[1].name);
        if !g.has_edge(a, b) {
            let distance = round_cents(planar_miles(positions[a], positions[b]));
            if g.add_edge(a, b, distance).is_ok() {
                edges += 1;
            }
        }
    }

    log::debug!(
        "generated graph with {} nodes and {} edges (seed {})",
        g.len(),
        edges,
        options.seed
    );

    (g, positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn edge_set(g: &Graph) -> HashSet<(String, String, u64)> {
        g.iter()
            .flat_map(|node| {
                g.neighbors(&node.id)
                    .unwrap()
                    .iter()
                    .map(move |e| (node.id.clone(), e.to.clone(), e.distance.to_bits()))
            })
            .collect()
    }

    fn is_connected(g: &Graph) -> bool {
        let Some(first) = g.iter().next() else {
            return true;
        };

        let mut seen: HashSet<&str> = HashSet::from([first.id.as_str()]);
        let mut stack = vec![first.id.as_str()];
        while let Some(id) = stack.pop() {
            for e in g.neighbors(id).unwrap() {
                if seen.insert(e.to.as_str()) {
                    stack.push(e.to.as_str());
                }
            }
        }
        seen.len() == g.len()
    }

    #[test]
    fn same_seed_same_graph() {
        let options = GeneratorOptions {
            seed: 1234,
            ..GeneratorOptions::default()
        };

        let (g1, p1) = generate_random_graph(&options);
        let (g2, p2) = generate_random_graph(&options);

        assert_eq!(g1, g2);
        assert_eq!(p1, p2);
        assert_eq!(edge_set(&g1), edge_set(&g2));
    }

    #[test]
    fn different_seeds_differ() {
        let (g1, p1) = generate_random_graph(&GeneratorOptions {
            seed: 1,
            ..GeneratorOptions::default()
        });
        let (g2, p2) = generate_random_graph(&GeneratorOptions {
            seed: 2,
            ..GeneratorOptions::default()
        });

        let prices1: Vec<f64> = g1.iter().map(|n| n.fuel_price).collect();
        let prices2: Vec<f64> = g2.iter().map(|n| n.fuel_price).collect();
        assert!(prices1 != prices2 || edge_set(&g1) != edge_set(&g2));
        assert_ne!(p1, p2);
    }

    #[test]
    fn generated_graph_shape() {
        let options = GeneratorOptions {
            nodes: 8,
            price_low: 4.0,
            price_high: 7.0,
            ..GeneratorOptions::default()
        };
        let (g, positions) = generate_random_graph(&options);

        assert_eq!(g.len(), 8);
        assert_eq!(positions.len(), 8);
        assert!(is_connected(&g));

        for (node, city) in g.iter().zip(HIGHWAY_CITIES.iter()) {
            assert_eq!(node.id, city.name);
            assert!(node.fuel_price >= 4.0 && node.fuel_price <= 7.0);

            let p = positions[city.name];
            assert!((p.x - city.lon).abs() <= POSITION_JITTER);
            assert!((p.y - city.lat).abs() <= POSITION_JITTER);
        }

        for pair in HIGHWAY_CITIES[..8].windows(2) {
            assert!(g.has_edge(pair[0].name, pair[1].name));
        }
    }

    #[test]
    fn node_count_is_capped() {
        let (g, _) = generate_random_graph(&GeneratorOptions {
            nodes: 100,
            ..GeneratorOptions::default()
        });
        assert_eq!(g.len(), HIGHWAY_CITIES.len());

        let (g, positions) = generate_random_graph(&GeneratorOptions {
            nodes: 0,
            ..GeneratorOptions::default()
        });
        assert!(g.is_empty());
        assert!(positions.is_empty());
    }

    #[test]
    fn price_overrides() {
        let overrides = PriceTable::from([
            ("Tucson, AZ".to_string(), 2.999),
            ("Nowhere".to_string(), 1.0),
        ]);
        let (g, _) = generate_random_graph(&GeneratorOptions {
            price_overrides: Some(&overrides),
            ..GeneratorOptions::default()
        });

        assert_eq!(g.fuel_price("Tucson, AZ"), Ok(3.0));
        assert!(!g.contains("Nowhere"));
    }
}
