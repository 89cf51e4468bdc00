// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Sources of fuel prices for graph construction.
//!
//! Nothing here is used by the searches themselves: prices are resolved
//! into a [PriceTable] first, and then handed to
//! [generate_random_graph](crate::generate_random_graph) as overrides.
//! Every failure has a fallback - a missing price file means random prices,
//! and an unavailable [PriceSource] means [DEFAULT_FUEL_PRICE] for every region.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::generator::{round_cents, uniform};
use crate::{City, DEFAULT_FUEL_PRICE, HIGHWAY_CITIES};

/// Fuel price per node (city) name.
pub type PriceTable = HashMap<String, f64>;

/// Fuel price per region code (see [City::region]).
pub type RegionalPrices = HashMap<String, f64>;

/// Maximum deviation of a city's price from its region's price,
/// used by [regional_city_prices].
pub const CITY_PRICE_SPREAD: f64 = 0.30;

/// Recommended lifetime of [PriceCache] entries - one day.
pub const DEFAULT_PRICE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Error which can occur when reading a price file.
#[derive(Debug, thiserror::Error)]
pub enum PriceFileError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct PriceFile {
    prices: PriceTable,
}

/// Reads a JSON price file in the form of `{"prices": {"Phoenix, AZ": 3.79, ...}}`.
pub fn read_price_file<P: AsRef<Path>>(path: P) -> Result<PriceTable, PriceFileError> {
    let f = File::open(path)?;
    let file: PriceFile = serde_json::from_reader(io::BufReader::new(f))?;
    Ok(file.prices)
}

/// Reads a price file like [read_price_file], logging a warning
/// and returning [None] if the file is missing or malformed.
pub fn load_price_overrides<P: AsRef<Path>>(path: P) -> Option<PriceTable> {
    match read_price_file(path.as_ref()) {
        Ok(prices) => {
            log::debug!(
                "loaded {} fuel prices from {}",
                prices.len(),
                path.as_ref().display()
            );
            Some(prices)
        }
        Err(e) => {
            log::warn!(
                "ignoring fuel price file {}: {}",
                path.as_ref().display(),
                e
            );
            None
        }
    }
}

/// Derives a price for every city of [HIGHWAY_CITIES] from the price of its region
/// ([DEFAULT_FUEL_PRICE] if the region is missing), shifted by a seeded random offset
/// of at most [CITY_PRICE_SPREAD] and rounded to cents.
pub fn regional_city_prices(regions: &RegionalPrices, seed: u64) -> PriceTable {
    let mut rng = StdRng::seed_from_u64(seed);

    // Sorted, so that the random offsets don't depend on the city table order
    let mut cities: Vec<&City> = HIGHWAY_CITIES.iter().collect();
    cities.sort_by_key(|city| city.name);

    cities
        .into_iter()
        .map(|city| {
            let base = regions
                .get(city.region)
                .copied()
                .unwrap_or(DEFAULT_FUEL_PRICE);
            let offset = uniform(&mut rng, -CITY_PRICE_SPREAD, CITY_PRICE_SPREAD);
            (city.name.to_string(), round_cents(base + offset))
        })
        .collect()
}

/// Source of the current time, injectable for testing.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// [Clock] backed by [Instant::now].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// External provider of regional fuel prices, like a public price feed.
pub trait PriceSource {
    type Error;
    fn fetch(&mut self) -> Result<RegionalPrices, Self::Error>;
}

/// Caches [RegionalPrices] from a [PriceSource] for a fixed time.
#[derive(Debug)]
pub struct PriceCache<S, C = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    cached: Option<(Instant, RegionalPrices)>,
}

impl<S: PriceSource> PriceCache<S> {
    /// Creates a cache using the system clock and [DEFAULT_PRICE_TTL].
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock, DEFAULT_PRICE_TTL)
    }
}

impl<S: PriceSource, C: Clock> PriceCache<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self {
            source,
            clock,
            ttl,
            cached: None,
        }
    }

    /// Returns the cached prices, fetching them from the source if they are
    /// missing or older than the ttl.
    ///
    /// If fetching fails, the error is returned and stale prices (if any) are kept
    /// for the next attempt.
    pub fn get(&mut self) -> Result<&RegionalPrices, S::Error> {
        let now = self.clock.now();
        let entry = match self.cached.take() {
            Some((fetched_at, prices)) if now.saturating_duration_since(fetched_at) < self.ttl => {
                (fetched_at, prices)
            }
            stale => match self.source.fetch() {
                Ok(prices) => (now, prices),
                Err(e) => {
                    self.cached = stale;
                    return Err(e);
                }
            },
        };

        Ok(&self.cached.insert(entry).1)
    }

    /// Forgets the cached prices, forcing the next [PriceCache::get] to fetch them.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Resolves per-city prices with [regional_city_prices]. If the source is unavailable,
    /// a warning is logged and every region falls back to [DEFAULT_FUEL_PRICE].
    pub fn city_prices(&mut self, seed: u64) -> PriceTable
    where
        S::Error: std::fmt::Display,
    {
        match self.get() {
            Ok(regions) => regional_city_prices(regions, seed),
            Err(e) => {
                log::warn!("fuel prices unavailable, using defaults: {}", e);
                regional_city_prices(&RegionalPrices::default(), seed)
            }
        }
    }
}
