//! Static table of named observer sites.

use super::ObserverLocation;
use crate::frame::GeometryError;

/// A named observer site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl City {
    /// Observer at this site, at sea level.
    pub fn location(&self) -> Result<ObserverLocation, GeometryError> {
        ObserverLocation::at_sea_level(self.latitude_deg, self.longitude_deg)
    }
}

/// Built-in sites.
pub const CITIES: &[City] = &[
    City {
        name: "Delhi",
        latitude_deg: 28.6139,
        longitude_deg: 77.2090,
    },
    City {
        name: "Mumbai",
        latitude_deg: 19.0760,
        longitude_deg: 72.8777,
    },
    City {
        name: "Bengaluru",
        latitude_deg: 12.9716,
        longitude_deg: 77.5946,
    },
    City {
        name: "Kolkata",
        latitude_deg: 22.5726,
        longitude_deg: 88.3639,
    },
    City {
        name: "Hyderabad",
        latitude_deg: 17.3850,
        longitude_deg: 78.4867,
    },
];

/// Look up a site by name, ignoring case and surrounding whitespace.
pub fn find_city(name: &str) -> Option<&'static City> {
    let name = name.trim();
    CITIES.iter().find(|city| city.name.eq_ignore_ascii_case(name))
}

/// Names of all built-in sites, in table order.
pub fn city_names() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|city| city.name)
}
