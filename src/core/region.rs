//! Geographic region the searches are confined to

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Rectangular bounding box. Invariant: north > south, east > west.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// Miyako Islands: Miyakojima, Shimojijima, Irabujima, Tarama, Ikema, Kurima
pub const MIYAKO_BOUNDS: GeoBounds = GeoBounds {
    north: 24.9417,
    south: 24.65,
    east: 125.475,
    west: 124.6833,
};

/// Centre of Miyakojima main island
pub const MIYAKO_CENTER: Coordinates = Coordinates {
    lat: 24.805,
    lng: 125.2817,
};

impl GeoBounds {
    /// Create validated bounds
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        let bounds = Self {
            north,
            south,
            east,
            west,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::InvalidRegion {
                message: "edges must be finite numbers".to_string(),
            });
        }
        if self.north <= self.south {
            return Err(Error::InvalidRegion {
                message: format!("north ({}) must be greater than south ({})", self.north, self.south),
            });
        }
        if self.east <= self.west {
            return Err(Error::InvalidRegion {
                message: format!("east ({}) must be greater than west ({})", self.east, self.west),
            });
        }
        Ok(())
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lng)
    }

    /// Overpass QL bounding box filter: `(south,west,north,east)`
    pub fn to_overpass_filter(&self) -> String {
        format!("({},{},{},{})", self.south, self.west, self.north, self.east)
    }
}

/// The fixed search area of a deployment
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub bounds: GeoBounds,
    pub center: Coordinates,
}

impl Region {
    pub fn miyako() -> Self {
        Self {
            name: "宮古諸島".to_string(),
            bounds: MIYAKO_BOUNDS,
            center: MIYAKO_CENTER,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::miyako()
    }
}
