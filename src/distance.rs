// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::Point;

/// Approximate length of one degree of longitude around 32°N, in miles.
const MILES_PER_DEGREE_LON: f64 = 54.0;

/// Approximate length of one degree of latitude, in miles.
const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// Calculates the straight-line distance between two points on a plane.
pub fn euclidean_distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Calculates the distance in miles between two lon-lat (`x`-`y`) points,
/// treating degrees as a flat grid scaled to the southern US.
///
/// Good enough for short hops between neighboring cities, and always greater
/// than the [euclidean_distance] of the raw coordinates.
pub fn planar_miles(a: Point, b: Point) -> f64 {
    ((a.x - b.x) * MILES_PER_DEGREE_LON).hypot((a.y - b.y) * MILES_PER_DEGREE_LAT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(euclidean_distance(a, b), 5.0);
        assert_eq!(euclidean_distance(b, a), 5.0);

        assert_eq!(planar_miles(a, Point::new(1.0, 0.0)), 54.0);
        assert_eq!(planar_miles(a, Point::new(0.0, -1.0)), 69.0);
        assert!(planar_miles(a, b) > euclidean_distance(a, b));
    }
}
