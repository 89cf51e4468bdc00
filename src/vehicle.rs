// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::{Error, Result};

/// Parameters of the vehicle driving a route.
///
/// Vehicles are plain values: searches take a shared reference and track
/// the fuel level internally, so one vehicle can be reused across many runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vehicle {
    tank_capacity: f64,
    fuel: f64,
    consumption_per_distance: f64,
    max_refuels: Option<u32>,
}

impl Vehicle {
    /// Creates a new vehicle, ensuring that `tank_capacity` is finite and positive,
    /// `0 <= fuel <= tank_capacity` and `consumption_per_distance > 0`.
    pub fn new(tank_capacity: f64, fuel: f64, consumption_per_distance: f64) -> Result<Self> {
        let valid = tank_capacity > 0.0
            && tank_capacity.is_finite()
            && fuel >= 0.0
            && fuel <= tank_capacity
            && consumption_per_distance > 0.0
            && consumption_per_distance.is_finite();

        if !valid {
            return Err(Error::InvalidVehicleParameters {
                tank_capacity,
                fuel,
                consumption: consumption_per_distance,
            });
        }

        Ok(Self {
            tank_capacity,
            fuel,
            consumption_per_distance,
            max_refuels: None,
        })
    }

    /// Limits the number of refuel stops. A stop is any visit of a node during which
    /// fuel is bought, no matter how many units. Searches only consider routes
    /// within the limit, and zero means the starting fuel has to suffice.
    pub fn with_max_refuels(mut self, max_refuels: u32) -> Self {
        self.max_refuels = Some(max_refuels);
        self
    }

    pub fn tank_capacity(&self) -> f64 {
        self.tank_capacity
    }

    /// Fuel in the tank at the start of the route.
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Fuel units consumed per unit of distance.
    pub fn consumption_per_distance(&self) -> f64 {
        self.consumption_per_distance
    }

    pub fn max_refuels(&self) -> Option<u32> {
        self.max_refuels
    }
}

/// Coefficients of the minimized objective:
/// `distance * total_distance + fuel * total_fuel_cost`.
///
/// A zero `fuel` weight turns the search into plain shortest-path routing,
/// while a zero `distance` weight only cares about the money spent on fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Weights {
    pub distance: f64,
    pub fuel: f64,
}

impl Weights {
    pub const fn new(distance: f64, fuel: f64) -> Self {
        Self { distance, fuel }
    }

    /// Weighs the total distance and fuel cost of a route.
    pub fn objective(&self, total_distance: f64, fuel_cost: f64) -> f64 {
        self.distance * total_distance + self.fuel * fuel_cost
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_vehicle() {
        let v = Vehicle::new(20.0, 5.0, 0.08).unwrap();
        assert_eq!(v.tank_capacity(), 20.0);
        assert_eq!(v.fuel(), 5.0);
        assert_eq!(v.consumption_per_distance(), 0.08);
        assert_eq!(v.max_refuels(), None);
        assert_eq!(v.with_max_refuels(3).max_refuels(), Some(3));

        // Empty and full tanks are both fine
        assert!(Vehicle::new(20.0, 0.0, 0.08).is_ok());
        assert!(Vehicle::new(20.0, 20.0, 0.08).is_ok());
    }

    #[test]
    fn invalid_vehicle() {
        assert!(matches!(
            Vehicle::new(0.0, 0.0, 0.5),
            Err(Error::InvalidVehicleParameters { .. })
        ));
        assert!(matches!(
            Vehicle::new(10.0, -1.0, 0.5),
            Err(Error::InvalidVehicleParameters { .. })
        ));
        assert!(matches!(
            Vehicle::new(10.0, 10.5, 0.5),
            Err(Error::InvalidVehicleParameters { .. })
        ));
        assert!(matches!(
            Vehicle::new(10.0, 2.0, 0.0),
            Err(Error::InvalidVehicleParameters { .. })
        ));
        assert!(matches!(
            Vehicle::new(f64::INFINITY, 2.0, 0.5),
            Err(Error::InvalidVehicleParameters { .. })
        ));
        assert!(matches!(
            Vehicle::new(f64::NAN, 2.0, 0.5),
            Err(Error::InvalidVehicleParameters { .. })
        ));
    }

    #[test]
    fn objective() {
        assert_eq!(Weights::default().objective(10.0, 9.0), 19.0);
        assert_eq!(Weights::new(2.0, 0.0).objective(10.0, 9.0), 20.0);
        assert_eq!(Weights::new(0.0, 1.5).objective(10.0, 9.0), 13.5);
    }

    #[test]
    fn serialized_parameters() {
        let weights = serde_json::to_value(Weights::new(1.0, 1.5)).unwrap();
        assert_eq!(weights, serde_json::json!({"distance": 1.0, "fuel": 1.5}));

        let vehicle = Vehicle::new(20.0, 5.0, 0.5).unwrap().with_max_refuels(2);
        assert_eq!(
            serde_json::to_value(vehicle).unwrap(),
            serde_json::json!({
                "tank_capacity": 20.0,
                "fuel": 5.0,
                "consumption_per_distance": 0.5,
                "max_refuels": 2,
            })
        );
    }
}
