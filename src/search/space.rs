// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use super::{RouteResult, SearchOptions, EPSILON, TRACE_LIMIT};
use crate::{Error, Graph, Result, Vehicle, Weights};

/// Amount of fuel expressed as a whole number of discretization steps.
///
/// Storing the multiplier instead of the amount gives exact equality and hashing,
/// which keeps (node, fuel) search states well-behaved as map keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuelLevel(i64);

impl FuelLevel {
    /// Snaps `amount` to the nearest multiple of `step`, rounding halves to even.
    pub fn from_amount(amount: f64, step: f64) -> Self {
        Self((amount / step).round_ties_even() as i64)
    }

    pub const fn from_steps(steps: i64) -> Self {
        Self(steps)
    }

    pub const fn steps(self) -> i64 {
        self.0
    }

    /// Converts the level back to an amount of fuel.
    pub fn amount(self, step: f64) -> f64 {
        self.0 as f64 * step
    }
}

/// Snaps a fuel amount to the nearest multiple of `step`,
/// the same way the searches do when buying or burning fuel.
pub fn discretize(amount: f64, step: f64) -> f64 {
    FuelLevel::from_amount(amount, step).amount(step)
}

/// A single point of the search space: a node and the fuel left in the tank.
///
/// With a [Vehicle::max_refuels] limit, states also count the refuel stops made so far,
/// and whether fuel was already bought during the current stop. Without a limit
/// both stay at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct State<'g> {
    pub(super) node: &'g str,
    pub(super) fuel: FuelLevel,
    refuels: u32,
    refueling: bool,
}

impl<'g> State<'g> {
    pub(super) fn new(node: &'g str, fuel: FuelLevel) -> Self {
        Self {
            node,
            fuel,
            refuels: 0,
            refueling: false,
        }
    }

    /// State after buying one step of fuel, or [None] if that would
    /// start a refuel stop over `max_refuels`.
    fn after_buy(self, max_refuels: Option<u32>) -> Option<Self> {
        let fuel = FuelLevel::from_steps(self.fuel.steps() + 1);
        let Some(limit) = max_refuels else {
            return Some(Self { fuel, ..self });
        };

        let refuels = if self.refueling {
            self.refuels
        } else {
            self.refuels + 1
        };
        (refuels <= limit).then_some(Self {
            fuel,
            refuels,
            refueling: true,
            ..self
        })
    }

    /// State after driving to `to`, burning `need` fuel.
    fn after_go(self, to: &'g str, need: FuelLevel) -> Self {
        Self {
            node: to,
            fuel: FuelLevel::from_steps(self.fuel.steps() - need.steps()),
            refueling: false,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action<'g> {
    Buy,
    Go(&'g str),
}

impl Action<'_> {
    fn label(&self, step: f64) -> String {
        match self {
            Self::Buy => format!("BUY {}", step),
            Self::Go(to) => format!("GO {}", to),
        }
    }
}

/// Cheapest known way to reach a [State].
#[derive(Debug, Clone, Copy)]
struct Record<'g> {
    cost: f64,
    distance: f64,
    fuel_cost: f64,
    parent: Option<State<'g>>,
    action: Option<Action<'g>>,
}

/// Order in which discovered states are expanded. Lower values go first,
/// `primary` is compared before `secondary`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Priority {
    pub(super) primary: f64,
    pub(super) secondary: f64,
}

impl Priority {
    pub(super) fn new(primary: f64) -> Self {
        Self {
            primary,
            secondary: 0.0,
        }
    }
}

/// Strategy deciding the [Priority] of a discovered state.
pub(super) trait Frontier {
    /// `cost` is the cost-so-far of `at`, and `hop` is the distance of the move
    /// which discovered it (zero for buying fuel).
    fn priority(&self, at: State<'_>, cost: f64, hop: f64) -> Priority;
}

#[derive(Debug, Clone, Copy)]
struct QueueItem<'g> {
    at: State<'g>,
    cost: f64,
    priority: Priority,
    seq: u64,
}

impl PartialEq for QueueItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem<'_> {}

impl PartialOrd for QueueItem<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem<'_> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower priorities (and earlier discoveries) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .priority
            .primary
            .total_cmp(&self.priority.primary)
            .then_with(|| other.priority.secondary.total_cmp(&self.priority.secondary))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Mutable state of a single search run.
struct Search<'g, 'f, F> {
    frontier: &'f F,
    goal: &'g str,
    queue: BinaryHeap<QueueItem<'g>>,
    store: HashMap<State<'g>, Record<'g>>,
    goal_states: Vec<State<'g>>,
    next_seq: u64,
}

impl<'g, 'f, F: Frontier> Search<'g, 'f, F> {
    /// Records `record` as the way to reach `at` and enqueues the state,
    /// unless a way cheaper by at least [EPSILON] is already known.
    fn discover(&mut self, at: State<'g>, record: Record<'g>, hop: f64) {
        match self.store.get(&at) {
            Some(known) if record.cost >= known.cost - EPSILON => return,
            Some(_) => {}
            None if at.node == self.goal => self.goal_states.push(at),
            None => {}
        }

        self.store.insert(at, record);
        self.queue.push(QueueItem {
            at,
            cost: record.cost,
            priority: self.frontier.priority(at, record.cost, hop),
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Picks the cheapest recorded goal state, preferring earlier discoveries on ties.
    fn best_goal_state(&self) -> Option<State<'g>> {
        let mut best: Option<(State<'g>, f64)> = None;
        for &at in &self.goal_states {
            let cost = self.store[&at].cost;
            match best {
                Some((_, best_cost)) if cost >= best_cost - EPSILON => {}
                _ => best = Some((at, cost)),
            }
        }
        best.map(|(at, _)| at)
    }

    fn reconstruct(&self, last: State<'g>, step: f64) -> (Vec<String>, Vec<String>) {
        let mut path: Vec<String> = Vec::default();
        let mut actions: Vec<String> = Vec::default();
        let mut current = Some(last);

        while let Some(at) = current {
            // Buying fuel doesn't change the location
            if path.last().map(String::as_str) != Some(at.node) {
                path.push(at.node.to_string());
            }

            let record = &self.store[&at];
            if let Some(action) = record.action {
                actions.push(action.label(step));
            }
            current = record.parent;
        }

        path.reverse();
        actions.reverse();
        (path, actions)
    }
}

/// Joins action labels into a human-readable trace,
/// keeping at most [TRACE_LIMIT] entries.
pub(super) fn format_trace(actions: &[String]) -> String {
    let mut trace = actions
        .iter()
        .take(TRACE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ");
    if actions.len() > TRACE_LIMIT {
        trace.push_str(" ...");
    }
    trace
}

/// Explores the (node, fuel level) space from `start` until a `goal` state is expanded,
/// ordering the frontier by the provided [Frontier].
///
/// From every state two kinds of moves are possible:
/// - buying one step of fuel, if it fits in the tank and doesn't exceed
///   [Vehicle::max_refuels], for `weights.fuel * step * price` at the current node,
/// - driving along an edge, if the tank holds the discretized fuel requirement,
///   for `weights.distance * edge.distance`.
pub(super) fn explore<F: Frontier>(
    g: &Graph,
    start: &str,
    goal: &str,
    vehicle: &Vehicle,
    weights: Weights,
    options: &SearchOptions,
    frontier: &F,
) -> Result<RouteResult> {
    options.validate()?;
    let step = options.fuel_step;

    let start = g
        .get_node(start)
        .ok_or_else(|| Error::UnknownNode(start.to_string()))?
        .id
        .as_str();
    let goal = g
        .get_node(goal)
        .ok_or_else(|| Error::UnknownNode(goal.to_string()))?
        .id
        .as_str();

    let capacity = vehicle.tank_capacity();
    let consumption = vehicle.consumption_per_distance();
    let max_refuels = vehicle.max_refuels();

    let mut search = Search {
        frontier,
        goal,
        queue: BinaryHeap::default(),
        store: HashMap::default(),
        goal_states: Vec::default(),
        next_seq: 0,
    };
    let mut expanded: usize = 0;

    search.discover(
        State::new(
            start,
            FuelLevel::from_amount(vehicle.fuel().clamp(0.0, capacity), step),
        ),
        Record {
            cost: 0.0,
            distance: 0.0,
            fuel_cost: 0.0,
            parent: None,
            action: None,
        },
        0.0,
    );

    while let Some(item) = search.queue.pop() {
        let record = search.store[&item.at];

        // Contrary to the textbook definition, we might keep multiple items in the queue for the same state.
        if record.cost < item.cost - EPSILON {
            continue;
        }

        if expanded == options.expansion_limit {
            log::debug!("giving up on {} -> {} after {} expansions", start, goal, expanded);
            return Ok(RouteResult::infeasible(expanded, "Expansion limit reached."));
        }

        expanded += 1;
        if item.at.node == goal {
            break;
        }

        // Buy one step of fuel
        let topped_up = item
            .at
            .after_buy(max_refuels)
            .filter(|at| at.fuel.amount(step) <= capacity + EPSILON);
        if let Some(topped_up) = topped_up {
            let spent = g.fuel_price(item.at.node)? * step;
            search.discover(
                topped_up,
                Record {
                    cost: record.cost + weights.fuel * spent,
                    distance: record.distance,
                    fuel_cost: record.fuel_cost + spent,
                    parent: Some(item.at),
                    action: Some(Action::Buy),
                },
                0.0,
            );
        }

        // Drive to a neighbor
        for edge in g.neighbors(item.at.node)? {
            let need = FuelLevel::from_amount(edge.distance * consumption, step);
            if item.at.fuel < need {
                continue;
            }

            let to = edge.to.as_str();
            search.discover(
                item.at.after_go(to, need),
                Record {
                    cost: record.cost + weights.distance * edge.distance,
                    distance: record.distance + edge.distance,
                    fuel_cost: record.fuel_cost,
                    parent: Some(item.at),
                    action: Some(Action::Go(to)),
                },
                edge.distance,
            );
        }
    }

    let Some(best) = search.best_goal_state() else {
        log::debug!("no route {} -> {} after {} expansions", start, goal, expanded);
        return Ok(RouteResult::infeasible(expanded, "No feasible path."));
    };

    let record = search.store[&best];
    let (path, actions) = search.reconstruct(best, step);
    log::debug!(
        "route {} -> {}: {} nodes, objective {:.2}, {} expansions",
        start,
        goal,
        path.len(),
        record.cost,
        expanded,
    );

    Ok(RouteResult {
        path,
        total_distance: record.distance,
        fuel_cost: record.fuel_cost,
        objective: record.cost,
        expanded,
        notes: format_trace(&actions),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discretize_keeps_exact_multiples() {
        assert_eq!(discretize(3.0, 1.0), 3.0);
        assert_eq!(discretize(0.0, 1.0), 0.0);
        assert_eq!(discretize(2.5, 0.5), 2.5);
        assert_eq!(discretize(1.75, 0.25), 1.75);
        assert_eq!(FuelLevel::from_amount(20.0, 1.0).steps(), 20);
    }

    #[test]
    fn discretize_rounds_to_nearest_step() {
        assert_eq!(discretize(3.4, 1.0), 3.0);
        assert_eq!(discretize(3.6, 1.0), 4.0);
        assert_eq!(discretize(0.8, 0.5), 1.0);

        // Halves round to even
        assert_eq!(discretize(2.5, 1.0), 2.0);
        assert_eq!(discretize(3.5, 1.0), 4.0);
    }

    #[test]
    fn fuel_levels_compare_by_steps() {
        let a = FuelLevel::from_amount(2.0, 0.5);
        let b = FuelLevel::from_steps(4);
        assert_eq!(a, b);
        assert!(FuelLevel::from_steps(3) < a);
        assert_eq!(a.amount(0.5), 2.0);
    }

    #[test]
    fn queue_pops_lowest_priority_first() {
        let at = State::new("A", FuelLevel::default());
        let item = |primary: f64, secondary: f64, seq: u64| QueueItem {
            at,
            cost: 0.0,
            priority: Priority { primary, secondary },
            seq,
        };

        let mut queue = BinaryHeap::from(vec![
            item(2.0, 0.0, 0),
            item(1.0, 5.0, 1),
            item(1.0, 0.0, 3),
            item(1.0, 0.0, 2),
        ]);

        let order: Vec<u64> = std::iter::from_fn(|| queue.pop().map(|i| i.seq)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn refuel_stops_are_counted_once_per_visit() {
        let start = State::new("A", FuelLevel::from_steps(1));

        // Unlimited vehicles don't track stops at all
        let unlimited = start.after_buy(None).unwrap().after_buy(None).unwrap();
        assert_eq!(unlimited, State::new("A", FuelLevel::from_steps(3)));

        let first = start.after_buy(Some(1)).unwrap();
        let second = first.after_buy(Some(1)).unwrap();
        assert_eq!(second.refuels, 1);
        assert_eq!(second.fuel.steps(), 3);

        let moved = second.after_go("B", FuelLevel::from_steps(2));
        assert_eq!(moved.node, "B");
        assert_eq!(moved.fuel.steps(), 1);
        assert_eq!(moved.refuels, 1);
        assert!(!moved.refueling);
        assert_eq!(moved.after_buy(Some(1)), None);
        assert_eq!(moved.after_buy(Some(2)).map(|s| s.refuels), Some(2));

        assert_eq!(start.after_buy(Some(0)), None);
    }

    #[test]
    fn trace_is_truncated() {
        let short: Vec<String> = vec!["BUY 1".into(), "GO B".into()];
        assert_eq!(format_trace(&short), "BUY 1 | GO B");

        let long: Vec<String> = (0..14).map(|i| format!("GO N{}", i)).collect();
        let trace = format_trace(&long);
        assert!(trace.starts_with("GO N0 | GO N1"));
        assert!(trace.ends_with("GO N11 ..."));
        assert!(!trace.contains("N12"));

        assert!(!format_trace(&long[..TRACE_LIMIT]).contains("..."));
    }
}
