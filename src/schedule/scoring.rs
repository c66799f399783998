use crate::model::{Coord, Order};
use super::types::{Candidate, VehicleState};

/// Kilometres per degree, applied to the planar distance between two coords
pub const KM_PER_DEGREE: f64 = 111.0;

const PRIORITY_WEIGHT: f64 = 20.0;
const DISTANCE_WEIGHT: f64 = 0.5;
const LATENESS_WEIGHT: f64 = 40.0;
const UTILIZATION_WEIGHT: f64 = 15.0;

/// Approximate distance in km between two `[lat, lng]` points
pub fn distance_km(a: Coord, b: Coord) -> f64 {
    let dlat = a.lat() - b.lat();
    let dlng = a.lng() - b.lng();
    (dlat * dlat + dlng * dlng).sqrt() * KM_PER_DEGREE
}

/// Scores sending `vehicle` from its current position to serve `order`.
/// Returns None when the order does not fit in the vehicle.
pub fn score_candidate(order: &Order, vehicle: &VehicleState) -> Option<Candidate> {
    if order.weight > vehicle.capacity {
        return None;
    }

    let to_pickup = distance_km(vehicle.location, order.pickup);
    let delivery_leg = distance_km(order.pickup, order.dropoff);
    let travel_km = to_pickup + delivery_leg;
    let travel_time = travel_km / vehicle.speed_kmph.max(1.0);
    let eta_hour = vehicle.available_from_hour + travel_time;

    let priority_bonus = f64::from(order.priority) * PRIORITY_WEIGHT;
    let distance_penalty = travel_km * DISTANCE_WEIGHT;
    let deadline_penalty = (eta_hour - order.deadline_hour).max(0.0) * LATENESS_WEIGHT;
    let utilization_bonus = (order.weight / vehicle.capacity.max(1.0)) * UTILIZATION_WEIGHT;

    Some(Candidate {
        score: priority_bonus + utilization_bonus - distance_penalty - deadline_penalty,
        eta_hour,
        travel_km,
    })
}
