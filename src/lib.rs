//! Orbit propagation and ground-segment analysis around a single central body.
//!
//! States are integrated numerically ([`OrbitPropagator`]) from an initial
//! position/velocity, either built from an [`OrbitPreset`] or seeded from a
//! TLE. Trajectories can then be turned into Keplerian elements, sub-satellite
//! points, station access windows and eclipse/solar panel figures.
use thiserror::Error;

pub use body::Body;
pub use eclipse::{EclipseStatus, check_eclipse};
pub use elements::{OrbitType, OrbitalElements};
pub use force_model::ForceModel;
pub use ground_station::{GroundStation, StationPresetKind};
pub use ground_track::{
    calculate_coverage_radius, calculate_ground_track, eci_to_lat_lon, get_subsatellite_point,
    ground_track_segment, is_ground_point_visible, lat_lon_to_eci,
};
pub use integrator::Integrator;
pub use pass_list::{AccessStatistics, AccessWindow, calculate_access_windows};
pub use presets::{OrbitPreset, OrbitPresetKind, state_from_orbital_params};
pub use propagator::{OrbitPropagator, Trajectory};
pub use satellite::{OrbitFamily, OrbitStatistics, Satellite};
pub use solar::{PowerStatus, SolarPanelAnalysis};
pub use types::{GeoCoordinate, SatAngle, State, Vector3, unit_or_zero};

pub mod body;
pub mod eclipse;
pub mod elements;
pub mod force_model;
pub mod ground_station;
pub mod ground_track;
mod helpers;
pub mod integrator;
pub mod pass_list;
pub mod presets;
pub mod propagator;
mod satellite;
pub mod solar;
mod types;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("Invalid TLE: {0}")]
    InvalidTle(String),
    #[error("Propagation failed: {0}")]
    PropagationFailed(String),
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, OrbitError>;
