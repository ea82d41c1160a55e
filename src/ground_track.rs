use log::debug;

use crate::{
    body::Body,
    helpers::{safe_acos, safe_asin},
    types::{GeoCoordinate, State, Vector3, unit_or_zero},
};

/// Inertial position to body-fixed latitude/longitude/altitude at `time` seconds
/// after epoch. The body is assumed to rotate at a constant rate from a zero
/// angle at t = 0.
pub fn eci_to_lat_lon(position: &Vector3, time: f64, body: &Body) -> GeoCoordinate {
    let r = position.magnitude();
    let latitude = safe_asin(position.z / r).to_degrees();
    let inertial_longitude = position.y.atan2(position.x).to_degrees();
    let rotation = (body.rotation_rate * time).to_degrees();
    GeoCoordinate::new(latitude, inertial_longitude - rotation, r - body.radius)
}

pub fn lat_lon_to_eci(coord: &GeoCoordinate, time: f64, body: &Body) -> Vector3 {
    let r = body.radius + coord.altitude;
    let lat = coord.latitude.to_radians();
    let lon = coord.longitude.to_radians() + body.rotation_rate * time;
    Vector3::new(
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    )
}

///Point directly below the satellite
pub fn get_subsatellite_point(state: &State, body: &Body) -> GeoCoordinate {
    eci_to_lat_lon(&state.position, state.time, body)
}

/// Sub-satellite points sampled at a stride of `len / samples_per_orbit`.
pub fn calculate_ground_track(
    trajectory: &[State],
    samples_per_orbit: usize,
    body: &Body,
) -> Vec<GeoCoordinate> {
    let stride = trajectory
        .len()
        .checked_div(samples_per_orbit)
        .unwrap_or(1)
        .max(1);
    let track: Vec<GeoCoordinate> = trajectory
        .iter()
        .step_by(stride)
        .map(|state| get_subsatellite_point(state, body))
        .collect();
    debug!("ground track: {} points at stride {}", track.len(), stride);
    track
}

/// Surface arc radius (km) of the region that sees a satellite at `altitude`
/// above `min_elevation_deg`.
pub fn calculate_coverage_radius(altitude: f64, min_elevation_deg: f64, body: &Body) -> f64 {
    let elevation = min_elevation_deg.to_radians();
    let rho = safe_acos(body.radius / (body.radius + altitude) * elevation.cos()) - elevation;
    body.radius * rho
}

pub fn is_ground_point_visible(
    sat_position: &Vector3,
    point: &GeoCoordinate,
    min_elevation_deg: f64,
    time: f64,
    body: &Body,
) -> bool {
    let ground = lat_lon_to_eci(point, time, body);
    let to_sat = unit_or_zero(&(sat_position - ground));
    let elevation = safe_asin(to_sat.dot(&unit_or_zero(&ground))).to_degrees();
    elevation >= min_elevation_deg
}

/// Sub-satellite points for frames `start_frame..=end_frame`, with the end
/// clamped to the last frame.
pub fn ground_track_segment(
    trajectory: &[State],
    start_frame: usize,
    end_frame: usize,
    body: &Body,
) -> Vec<GeoCoordinate> {
    if start_frame >= trajectory.len() {
        return vec![];
    }
    let end = end_frame.min(trajectory.len() - 1);
    if end < start_frame {
        return vec![];
    }
    trajectory[start_frame..=end]
        .iter()
        .map(|state| get_subsatellite_point(state, body))
        .collect()
}
