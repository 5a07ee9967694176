//! Frame transformations
//!
//! Pure conversions from the propagator's inertial frame:
//!
//! - [`inertial_to_geodetic`]: rotate by the Earth rotation angle at the
//!   instant, then solve for latitude, longitude and height on WGS-84.
//! - [`look_angles`]: azimuth, elevation and range from a ground observer.
//!
//! Both depend only on their arguments; the rotation angle is derived from
//! the same UTC instant the state vector was propagated to.

mod error;
mod geodetic;
mod sidereal;
mod topocentric;

pub use error::GeometryError;
pub use geodetic::{
    ecef_to_geodetic, geodetic_to_ecef, inertial_to_geodetic, normalize_longitude, GeodeticPoint,
};
pub use sidereal::{ecef_to_inertial, gmst, inertial_to_ecef};
pub use topocentric::{look_angles, TopocentricView};
