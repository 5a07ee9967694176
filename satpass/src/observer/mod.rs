//! Ground observers
//!
//! [`ObserverLocation`] is the only observer input the prediction core
//! needs. The [`catalog`] of named sites is a convenience for front ends.

pub mod catalog;
mod location;

pub use catalog::{city_names, find_city, City, CITIES};
pub use location::ObserverLocation;
