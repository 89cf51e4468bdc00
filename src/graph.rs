// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{Edge, Error, Node, Result};

/// Represents an undirected road network as a set of [Nodes](Node)
/// and [Edges](Edge) between them.
///
/// Nodes are kept in insertion order, which makes iteration (and everything
/// built on top of it, like [Graph::min_fuel_price]) deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<(Node, Vec<Edge>)>,
    index: HashMap<String, usize>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().map(|(node, _)| node)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx].0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Creates a [Node] with the provided id and fuel price.
    ///
    /// Adding a node which already exists is a no-op - neither the price
    /// nor the edges of the existing node are touched.
    pub fn add_node<S: Into<String>>(&mut self, id: S, fuel_price: f64) {
        debug_assert!(fuel_price >= 0.0, "fuel price must not be negative");

        let id = id.into();
        if let Entry::Vacant(e) = self.index.entry(id) {
            let node = Node {
                id: e.key().clone(),
                fuel_price,
            };
            e.insert(self.nodes.len());
            self.nodes.push((node, Vec::default()));
        }
    }

    /// Connects two existing nodes with an undirected edge.
    ///
    /// Both `a -> b` and `b -> a` entries are appended, carrying the same `distance`.
    /// Returns [Error::InvalidReference] if either endpoint doesn't exist.
    pub fn add_edge(&mut self, a: &str, b: &str, distance: f64) -> Result<()> {
        debug_assert!(distance >= 0.0, "edge distance must not be negative");

        let a_idx = *self
            .index
            .get(a)
            .ok_or_else(|| Error::InvalidReference(a.to_string()))?;
        let b_idx = *self
            .index
            .get(b)
            .ok_or_else(|| Error::InvalidReference(b.to_string()))?;

        self.nodes[a_idx].1.push(Edge {
            to: b.to_string(),
            distance,
        });
        self.nodes[b_idx].1.push(Edge {
            to: a.to_string(),
            distance,
        });
        Ok(())
    }

    /// Gets all [Edges](Edge) from a node with a given id, in insertion order.
    pub fn neighbors(&self, id: &str) -> Result<&[Edge]> {
        self.index
            .get(id)
            .map(|&idx| self.nodes[idx].1.as_slice())
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Gets the fuel price at a node with a given id.
    pub fn fuel_price(&self, id: &str) -> Result<f64> {
        self.get_node(id)
            .map(|node| node.fuel_price)
            .ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    /// Checks whether a direct edge between two nodes exists.
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.neighbors(a)
            .map(|edges| edges.iter().any(|e| e.to == b))
            .unwrap_or(false)
    }

    /// Returns the cheapest fuel price anywhere in the graph,
    /// or [None] if the graph is empty.
    pub fn min_fuel_price(&self) -> Option<f64> {
        self.iter().map(|node| node.fuel_price).reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Graph {
        let mut g = Graph::new();
        g.add_node("A", 3.0);
        g.add_node("B", 2.5);
        g.add_node("C", 4.0);
        g.add_edge("A", "B", 4.0).unwrap();
        g.add_edge("B", "C", 3.0).unwrap();
        g.add_edge("A", "C", 8.0).unwrap();
        g
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = triangle();
        g.add_node("A", 9.99);

        assert_eq!(g.len(), 3);
        assert_eq!(g.fuel_price("A"), Ok(3.0));
        assert_eq!(g.neighbors("A").unwrap().len(), 2);
    }

    #[test]
    fn edges_are_symmetric() {
        let g = triangle();

        for node in g.iter() {
            for edge in g.neighbors(&node.id).unwrap() {
                let back = g
                    .neighbors(&edge.to)
                    .unwrap()
                    .iter()
                    .find(|e| e.to == node.id)
                    .expect("mirrored edge must exist");
                assert_eq!(back.distance, edge.distance);
            }
        }
    }

    #[test]
    fn neighbors_keep_insertion_order() {
        let g = triangle();
        let to: Vec<&str> = g
            .neighbors("A")
            .unwrap()
            .iter()
            .map(|e| e.to.as_str())
            .collect();
        assert_eq!(to, vec!["B", "C"]);
    }

    #[test]
    fn missing_endpoints() {
        let mut g = triangle();

        assert_eq!(
            g.add_edge("A", "Z", 1.0),
            Err(Error::InvalidReference("Z".to_string()))
        );
        assert_eq!(
            g.add_edge("Y", "A", 1.0),
            Err(Error::InvalidReference("Y".to_string()))
        );
        assert_eq!(g.neighbors("A").unwrap().len(), 2);

        assert_eq!(g.neighbors("Z"), Err(Error::UnknownNode("Z".to_string())));
        assert_eq!(g.fuel_price("Z"), Err(Error::UnknownNode("Z".to_string())));
    }

    #[test]
    fn helpers() {
        let g = triangle();

        assert!(g.has_edge("A", "C"));
        assert!(g.has_edge("C", "B"));
        assert!(!g.has_edge("A", "Z"));
        assert_eq!(g.min_fuel_price(), Some(2.5));
        assert_eq!(Graph::new().min_fuel_price(), None);

        let ids: Vec<&str> = g.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }
}
