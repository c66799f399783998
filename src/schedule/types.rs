use serde::{Deserialize, Serialize};
use crate::model::{Assignment, Coord, Vehicle};

/// Outcome of a dispatch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub assignments: Vec<Assignment>,
    pub unassigned_orders: Vec<String>, // order IDs no vehicle could take
    pub total_score: f64,
}

/// Where a vehicle is and when it is next free, updated as orders are assigned
#[derive(Debug, Clone)]
pub struct VehicleState {
    pub id: String,
    pub location: Coord,
    pub capacity: f64,
    pub speed_kmph: f64,
    pub available_from_hour: f64,
}

impl From<&Vehicle> for VehicleState {
    fn from(v: &Vehicle) -> Self {
        VehicleState {
            id: v.id.clone(),
            location: v.location,
            capacity: v.capacity,
            speed_kmph: v.speed_kmph,
            available_from_hour: v.available_from_hour,
        }
    }
}

/// A feasible (order, vehicle) pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub score: f64,
    pub eta_hour: f64,
    pub travel_km: f64,
}
