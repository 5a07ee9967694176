//! Mean-element analytic propagator.
//!
//! # Model
//!
//! - Mean anomaly advances with the encoded mean motion plus its first and
//!   second derivatives (the element set's decay terms).
//! - Semi-major axis follows the decayed mean motion through Kepler's third law.
//! - Optionally, J2 secular drift rotates the node and perigee.
//! - Position and velocity come from the two-body solution at the updated
//!   elements.
//!
//! Every secular term vanishes at epoch, so propagating to the element
//! set's own epoch reproduces its mean anomaly and node exactly.

use std::f64::consts::TAU;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use tracing::error;

use super::config::PropagatorConfig;
use super::kepler::{solve_kepler, true_anomaly, ConvergenceError};
use super::state::{MeanElements, Propagation, StalenessWarning, StateVector};
use crate::constants::{GRAVITY_RADIUS_KM, J2, MU_KM3_S2};
use crate::instant::seconds_between;
use crate::tle::{normalize_radians, OrbitalElementSet, SECONDS_PER_DAY};

/// Lowest mean motion (as a fraction of the epoch value) that decay
/// extrapolation may reach.
const MIN_MEAN_MOTION_FRACTION: f64 = 0.01;

/// Propagates one element set to arbitrary instants.
///
/// Holds only values derived from the immutable element set, so
/// `propagate` is a pure function of the instant and the type can be shared
/// freely across threads.
#[derive(Debug, Clone)]
pub struct Propagator {
    elements: OrbitalElementSet,
    config: PropagatorConfig,
    /// Secular node rate (rad/s).
    raan_rate: f64,
    /// Secular perigee rate (rad/s).
    arg_perigee_rate: f64,
}

impl Propagator {
    /// Create a propagator with default configuration.
    pub fn new(elements: OrbitalElementSet) -> Self {
        Self::with_config(elements, PropagatorConfig::default())
    }

    /// Create a propagator with custom configuration.
    pub fn with_config(elements: OrbitalElementSet, config: PropagatorConfig) -> Self {
        let (raan_rate, arg_perigee_rate) = if config.apply_j2 {
            j2_secular_rates(&elements)
        } else {
            (0.0, 0.0)
        };

        Self {
            elements,
            config,
            raan_rate,
            arg_perigee_rate,
        }
    }

    /// The element set being propagated.
    pub fn elements(&self) -> &OrbitalElementSet {
        &self.elements
    }

    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    /// Staleness advisory for a query at `instant`, if the element age
    /// exceeds the configured threshold.
    pub fn staleness_at(&self, instant: DateTime<Utc>) -> Option<StalenessWarning> {
        let age_secs = seconds_between(self.elements.epoch(), instant).abs();
        let threshold_secs = self.config.staleness_threshold.num_milliseconds() as f64 / 1000.0;
        if age_secs > threshold_secs {
            Some(StalenessWarning {
                age_days: age_secs / SECONDS_PER_DAY,
                threshold_days: self.config.staleness_threshold_days(),
            })
        } else {
            None
        }
    }

    /// Propagate to `instant`, attaching a staleness advisory when due.
    pub fn propagate(&self, instant: DateTime<Utc>) -> Result<Propagation, ConvergenceError> {
        let (state, elements) = self.solve(instant)?;
        Ok(Propagation {
            state,
            elements,
            staleness: self.staleness_at(instant),
        })
    }

    /// Inertial state at `instant` without the advisory bookkeeping.
    pub fn state_at(&self, instant: DateTime<Utc>) -> Result<StateVector, ConvergenceError> {
        self.solve(instant).map(|(state, _)| state)
    }

    /// Mean elements updated to `instant` (anomalies left at zero except the
    /// mean anomaly; use [`Propagator::propagate`] for the full solution).
    pub fn mean_elements_at(&self, instant: DateTime<Utc>) -> MeanElements {
        let dt_secs = seconds_between(self.elements.epoch(), instant);
        let dt_days = dt_secs / SECONDS_PER_DAY;
        let drift = self.elements.drift();
        let n0 = self.elements.mean_motion();

        // Accumulate in revolutions and reduce before scaling to radians so
        // decades of extrapolation keep full angular precision
        let revs = n0 * dt_days
            + drift.ndot_over_2 * dt_days * dt_days
            + drift.nddot_over_6 * dt_days * dt_days * dt_days;
        let phase = (self.elements.mean_anomaly() / TAU + revs).rem_euclid(1.0);
        let mean_anomaly = normalize_radians(phase * TAU);

        let mean_motion = (n0
            + 2.0 * drift.ndot_over_2 * dt_days
            + 3.0 * drift.nddot_over_6 * dt_days * dt_days)
            .max(n0 * MIN_MEAN_MOTION_FRACTION);

        MeanElements {
            mean_anomaly,
            eccentric_anomaly: 0.0,
            true_anomaly: 0.0,
            raan: normalize_radians(self.elements.raan() + self.raan_rate * dt_secs),
            arg_perigee: normalize_radians(
                self.elements.arg_perigee() + self.arg_perigee_rate * dt_secs,
            ),
            inclination: self.elements.inclination(),
            eccentricity: self.elements.eccentricity(),
            semi_major_axis_km: semi_major_axis_km(mean_motion),
            mean_motion,
        }
    }

    fn solve(
        &self,
        instant: DateTime<Utc>,
    ) -> Result<(StateVector, MeanElements), ConvergenceError> {
        let mut mean = self.mean_elements_at(instant);
        let e = mean.eccentricity;

        let ea = solve_kepler(mean.mean_anomaly, e).inspect_err(|err| {
            error!(
                catalog_number = self.elements.catalog_number(),
                %instant,
                error = %err,
                "Kepler solver failed to converge"
            );
        })?;
        mean.eccentric_anomaly = ea;
        mean.true_anomaly = true_anomaly(ea, e);

        let a = mean.semi_major_axis_km;
        let (sin_e, cos_e) = ea.sin_cos();
        let beta = (1.0 - e * e).sqrt();
        let radius = a * (1.0 - e * cos_e);

        // Perifocal coordinates
        let x_pf = a * (cos_e - e);
        let y_pf = a * beta * sin_e;
        let speed_factor = (MU_KM3_S2 * a).sqrt() / radius;
        let vx_pf = -speed_factor * sin_e;
        let vy_pf = speed_factor * beta * cos_e;

        let (p, q) = perifocal_basis(mean.raan, mean.inclination, mean.arg_perigee);

        let state = StateVector {
            instant,
            position: p * x_pf + q * y_pf,
            velocity: p * vx_pf + q * vy_pf,
        };

        Ok((state, mean))
    }
}

/// Semi-major axis (km) for a mean motion in revolutions per day.
pub fn semi_major_axis_km(mean_motion_rev_per_day: f64) -> f64 {
    let n = mean_motion_rev_per_day * TAU / SECONDS_PER_DAY;
    (MU_KM3_S2 / (n * n)).cbrt()
}

/// Unit vectors towards perigee (P) and 90° ahead in the orbit plane (Q).
fn perifocal_basis(raan: f64, inclination: f64, arg_perigee: f64) -> (Vector3<f64>, Vector3<f64>) {
    let (so, co) = raan.sin_cos();
    let (si, ci) = inclination.sin_cos();
    let (sw, cw) = arg_perigee.sin_cos();

    let p = Vector3::new(co * cw - so * sw * ci, so * cw + co * sw * ci, sw * si);
    let q = Vector3::new(-co * sw - so * cw * ci, -so * sw + co * cw * ci, cw * si);
    (p, q)
}

/// J2 secular rates of the node and argument of perigee (rad/s).
fn j2_secular_rates(elements: &OrbitalElementSet) -> (f64, f64) {
    let n = elements.mean_motion_rad_per_sec();
    let e = elements.eccentricity();
    let a = semi_major_axis_km(elements.mean_motion());
    let p = a * (1.0 - e * e);
    let k = 1.5 * J2 * (GRAVITY_RADIUS_KM / p).powi(2) * n;
    let (si, ci) = elements.inclination().sin_cos();

    let raan_rate = -k * ci;
    let arg_perigee_rate = k * (2.0 - 2.5 * si * si);
    (raan_rate, arg_perigee_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::{parse_lines, Designator, DriftTerms, KeplerianElements};
    use approx::assert_relative_eq;
    use chrono::{TimeDelta, TimeZone};

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn iss() -> OrbitalElementSet {
        parse_lines("ISS (ZARYA)", ISS_LINE1, ISS_LINE2).unwrap()
    }

    fn circular(inclination_deg: f64) -> OrbitalElementSet {
        OrbitalElementSet::from_elements(
            Designator::new("CIRCULAR", 99999),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            KeplerianElements {
                mean_motion_rev_per_day: 15.5,
                eccentricity: 0.0,
                inclination_deg,
                raan_deg: 0.0,
                arg_perigee_deg: 0.0,
                mean_anomaly_deg: 0.0,
            },
            DriftTerms::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_epoch_round_trip() {
        let set = iss();
        let propagator = Propagator::new(set.clone());
        let result = propagator.propagate(set.epoch()).unwrap();

        assert!((result.elements.mean_anomaly - set.mean_anomaly()).abs() < 1e-6);
        assert!((result.elements.raan - set.raan()).abs() < 1e-6);
        assert!((result.elements.arg_perigee - set.arg_perigee()).abs() < 1e-6);
        assert!(result.staleness.is_none());
    }

    #[test]
    fn test_node_recovered_from_state_at_epoch() {
        let set = iss();
        let state = Propagator::new(set.clone()).state_at(set.epoch()).unwrap();

        let h = state.angular_momentum();
        let node = normalize_radians(h.x.atan2(-h.y));
        let inclination = (h.z / h.norm()).acos();

        assert_relative_eq!(node, set.raan(), epsilon = 1e-9);
        assert_relative_eq!(inclination, set.inclination(), epsilon = 1e-9);
    }

    #[test]
    fn test_iss_altitude_plausible() {
        let set = iss();
        let state = Propagator::new(set.clone()).state_at(set.epoch()).unwrap();
        let altitude = state.radius_km() - GRAVITY_RADIUS_KM;
        assert!(
            (330.0..370.0).contains(&altitude),
            "ISS altitude {} km outside expected band",
            altitude
        );
        // Circular orbit speed at ~350 km is ~7.7 km/s
        assert!((state.speed_km_s() - 7.7).abs() < 0.1);
    }

    #[test]
    fn test_circular_orbit_radius_constant() {
        let set = circular(51.6);
        let propagator = Propagator::new(set.clone());
        let expected = semi_major_axis_km(15.5);

        for minutes in [0, 13, 47, 90, 1440] {
            let instant = set.epoch() + TimeDelta::minutes(minutes);
            let state = propagator.state_at(instant).unwrap();
            assert_relative_eq!(state.radius_km(), expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_one_period_returns_to_start_without_j2() {
        let set = circular(51.6);
        let config = PropagatorConfig::default().with_j2(false);
        let propagator = Propagator::with_config(set.clone(), config);

        let period_secs = set.period_minutes() * 60.0;
        let later = crate::instant::offset_by_seconds(set.epoch(), period_secs);

        let start = propagator.state_at(set.epoch()).unwrap();
        let end = propagator.state_at(later).unwrap();
        assert!((start.position - end.position).norm() < 1e-3);
    }

    #[test]
    fn test_j2_regresses_prograde_node() {
        let set = circular(51.6);
        let propagator = Propagator::new(set.clone());
        let day_later = set.epoch() + TimeDelta::days(1);
        let elements = propagator.mean_elements_at(day_later);

        // ~ -5° per day for a 51.6° low orbit
        let drift_deg = (elements.raan - TAU).to_degrees();
        assert!(
            (-5.5..-4.5).contains(&drift_deg),
            "unexpected node drift {}°",
            drift_deg
        );
    }

    #[test]
    fn test_decay_increases_mean_motion() {
        let set = OrbitalElementSet::from_elements(
            Designator::new("DECAY", 1),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            KeplerianElements {
                mean_motion_rev_per_day: 15.5,
                eccentricity: 0.001,
                inclination_deg: 51.6,
                raan_deg: 10.0,
                arg_perigee_deg: 20.0,
                mean_anomaly_deg: 30.0,
            },
            DriftTerms {
                ndot_over_2: 1e-4,
                nddot_over_6: 0.0,
                bstar: 0.0,
            },
        )
        .unwrap();
        let propagator = Propagator::new(set.clone());
        let elements = propagator.mean_elements_at(set.epoch() + TimeDelta::days(10));

        assert_relative_eq!(elements.mean_motion, 15.5 + 2.0 * 1e-4 * 10.0, epsilon = 1e-12);
        assert!(elements.semi_major_axis_km < semi_major_axis_km(15.5));
    }

    #[test]
    fn test_propagation_before_epoch() {
        let set = iss();
        let propagator = Propagator::new(set.clone());
        let result = propagator
            .propagate(set.epoch() - TimeDelta::hours(6))
            .unwrap();
        assert!(result.state.radius_km() > 6_600.0);
        assert!(result.staleness.is_none());
    }

    #[test]
    fn test_staleness_warning_both_directions() {
        let set = iss();
        let propagator = Propagator::new(set.clone());

        let future = propagator.propagate(set.epoch() + TimeDelta::days(4)).unwrap();
        let warning = future.staleness.unwrap();
        assert_relative_eq!(warning.age_days, 4.0, epsilon = 1e-9);
        assert_eq!(warning.threshold_days, 3.0);

        let past = propagator.propagate(set.epoch() - TimeDelta::days(5)).unwrap();
        assert!(past.staleness.is_some());

        let fresh = propagator.propagate(set.epoch() + TimeDelta::days(3)).unwrap();
        assert!(fresh.staleness.is_none());
    }

    #[test]
    fn test_custom_staleness_threshold() {
        let set = iss();
        let config = PropagatorConfig::default().with_staleness_threshold(TimeDelta::hours(1));
        let propagator = Propagator::with_config(set.clone(), config);
        assert!(propagator.staleness_at(set.epoch() + TimeDelta::hours(2)).is_some());
    }

    #[test]
    fn test_propagation_is_deterministic() {
        let set = iss();
        let propagator = Propagator::new(set.clone());
        let instant = set.epoch() + TimeDelta::seconds(12_345);

        let a = propagator.propagate(instant).unwrap();
        let b = Propagator::new(set).propagate(instant).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decades_of_extrapolation_stay_finite() {
        let set = iss();
        let propagator = Propagator::new(set.clone());
        let state = propagator
            .state_at(set.epoch() + TimeDelta::days(365 * 30))
            .unwrap();
        assert!(state.position.iter().all(|c| c.is_finite()));
        assert!(state.radius_km() > GRAVITY_RADIUS_KM);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_vis_viva_holds(
                minutes in -20_000i64..20_000,
                e in 0.0..0.7_f64,
                m0 in 0.0..360.0_f64
            ) {
                let set = OrbitalElementSet::from_elements(
                    Designator::new("PROP", 1),
                    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    KeplerianElements {
                        mean_motion_rev_per_day: 14.0,
                        eccentricity: e,
                        inclination_deg: 60.0,
                        raan_deg: 45.0,
                        arg_perigee_deg: 90.0,
                        mean_anomaly_deg: m0,
                    },
                    DriftTerms::default(),
                ).unwrap();
                let propagator = Propagator::new(set.clone());
                let result = propagator.propagate(set.epoch() + TimeDelta::minutes(minutes))?;

                let a = result.elements.semi_major_axis_km;
                let r = result.state.radius_km();
                let v = result.state.speed_km_s();
                let expected = MU_KM3_S2 * (2.0 / r - 1.0 / a);
                prop_assert!(((v * v) - expected).abs() / expected < 1e-9);
            }
        }
    }
}
