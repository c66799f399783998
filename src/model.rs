use serde::{Deserialize, Deserializer, Serialize};

/// A `[lat, lng]` pair, serialized as a two-element JSON array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord(pub f64, pub f64);

impl Coord {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

/// A delivery request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub pickup: Coord,
    pub dropoff: Coord,
    pub weight: f64,
    pub priority: u8, // 1-5, 5 = highest
    pub deadline_hour: f64,
}

/// A delivery resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub location: Coord,
    pub capacity: f64,
    pub speed_kmph: f64,
    #[serde(default)]
    pub available_from_hour: f64,
}

/// One order paired with the vehicle that will serve it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub order_id: String,
    pub vehicle_id: String,
    pub eta_hour: f64,
    pub score: f64,
    pub travel_km: f64,
    pub deadline_breached: bool,
}

/// Order counts reported alongside the assignments
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default)]
    pub orders_total: u64,
    #[serde(default)]
    pub orders_assigned: u64,
    #[serde(default)]
    pub orders_unassigned: u64,
}

/// Body of a successful `POST /api/schedule`.
///
/// Every field may be absent or null when read back by the dashboard; such
/// fields render as empty or zero. Present fields must have the right shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assignments: Vec<Assignment>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unassigned_orders: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of any failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_is_a_json_pair() {
        let coord: Coord = serde_json::from_str("[31.2, 121.4]").unwrap();
        assert_eq!(coord.lat(), 31.2);
        assert_eq!(coord.lng(), 121.4);
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[31.2,121.4]");
        assert!(serde_json::from_str::<Coord>("[31.2]").is_err());
    }

    #[test]
    fn response_fields_default_when_absent() {
        let resp: ScheduleResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.assignments.is_empty());
        assert_eq!(resp.total_score, None);
        assert_eq!(resp.summary, None);
    }

    #[test]
    fn response_null_fields_count_as_absent() {
        let resp: ScheduleResponse = serde_json::from_str(
            r#"{"assignments": null, "unassigned_orders": null, "total_score": null, "summary": null}"#,
        )
        .unwrap();
        assert!(resp.assignments.is_empty());
        assert!(resp.unassigned_orders.is_empty());
        assert_eq!(resp.total_score, None);
        assert_eq!(resp.summary, None);
    }

    #[test]
    fn response_rejects_mistyped_fields() {
        assert!(serde_json::from_str::<ScheduleResponse>(r#"{"total_score": "high"}"#).is_err());
        assert!(serde_json::from_str::<ScheduleResponse>(r#"{"assignments": {}}"#).is_err());
        assert!(serde_json::from_str::<ScheduleResponse>(r#"{"assignments": [{"order_id": "O-1"}]}"#).is_err());
    }
}
