use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::RequestError;
use crate::model::{Coord, Order, Vehicle};

/// A scheduling request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRequest {
    pub orders: Vec<Order>,
    pub vehicles: Vec<Vehicle>,
}

/// Parses and validates a raw `POST /api/schedule` body
pub fn parse_schedule_request(raw: &[u8]) -> Result<ValidRequest, RequestError> {
    let body: Value = serde_json::from_slice(raw)
        .map_err(|e| RequestError::bad_request(format!("invalid JSON: {}", e)))?;
    let body = body
        .as_object()
        .ok_or_else(|| RequestError::bad_request("request body must be a JSON object"))?;

    let orders_raw = list_field(body, "orders")?;
    let vehicles_raw = list_field(body, "vehicles")?;

    let orders = orders_raw.iter().map(parse_order).collect::<Result<Vec<_>, _>>()?;
    let vehicles = vehicles_raw.iter().map(parse_vehicle).collect::<Result<Vec<_>, _>>()?;

    ensure_unique("order", orders.iter().map(|o| o.id.as_str()))?;
    ensure_unique("vehicle", vehicles.iter().map(|v| v.id.as_str()))?;

    Ok(ValidRequest { orders, vehicles })
}

/// Missing list fields count as empty
fn list_field<'a>(body: &'a Map<String, Value>, name: &str) -> Result<&'a [Value], RequestError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(RequestError::bad_request("orders and vehicles must be arrays")),
    }
}

fn parse_order(raw: &Value) -> Result<Order, RequestError> {
    let obj = as_object(raw, "order")?;
    let id = parse_id(obj)?;
    let pickup = parse_coord(required(obj, "pickup")?, "pickup")?;
    let dropoff = parse_coord(required(obj, "dropoff")?, "dropoff")?;
    let weight = number(obj, "weight")?;
    if weight <= 0.0 {
        return Err(RequestError::bad_request("order weight must be > 0"));
    }
    let priority = parse_priority(required(obj, "priority")?)?;
    let deadline_hour = number(obj, "deadline_hour")?;
    if deadline_hour < 0.0 {
        return Err(RequestError::bad_request("order deadline_hour must be >= 0"));
    }

    Ok(Order {
        id,
        pickup,
        dropoff,
        weight,
        priority,
        deadline_hour,
    })
}

fn parse_vehicle(raw: &Value) -> Result<Vehicle, RequestError> {
    let obj = as_object(raw, "vehicle")?;
    let capacity = number(obj, "capacity")?;
    let speed_kmph = number(obj, "speed_kmph")?;
    if capacity <= 0.0 {
        return Err(RequestError::bad_request("vehicle capacity must be > 0"));
    }
    if speed_kmph <= 0.0 {
        return Err(RequestError::bad_request("vehicle speed_kmph must be > 0"));
    }

    let available_from_hour = match obj.get("available_from_hour") {
        None | Some(Value::Null) => 0.0,
        Some(v) => as_number(v, "available_from_hour")?,
    };
    if available_from_hour < 0.0 {
        return Err(RequestError::bad_request("vehicle available_from_hour must be >= 0"));
    }

    Ok(Vehicle {
        id: parse_id(obj)?,
        location: parse_coord(required(obj, "location")?, "location")?,
        capacity,
        speed_kmph,
        available_from_hour,
    })
}

fn as_object<'a>(raw: &'a Value, what: &str) -> Result<&'a Map<String, Value>, RequestError> {
    raw.as_object()
        .ok_or_else(|| RequestError::bad_request(format!("each {} must be a JSON object", what)))
}

fn required<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a Value, RequestError> {
    obj.get(name)
        .ok_or_else(|| RequestError::bad_request(format!("missing field '{}'", name)))
}

/// Ids may be sent as strings or numbers; both are kept as text
fn parse_id(obj: &Map<String, Value>) -> Result<String, RequestError> {
    match required(obj, "id")? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(RequestError::bad_request("id must be a string or number")),
    }
}

fn number(obj: &Map<String, Value>, name: &str) -> Result<f64, RequestError> {
    as_number(required(obj, name)?, name)
}

fn as_number(value: &Value, name: &str) -> Result<f64, RequestError> {
    value
        .as_f64()
        .ok_or_else(|| RequestError::bad_request(format!("{} must be a number", name)))
}

fn parse_coord(raw: &Value, field_name: &str) -> Result<Coord, RequestError> {
    let malformed = || RequestError::bad_request(format!("{} must be [lat, lng]", field_name));
    match raw.as_array().map(|a| a.as_slice()) {
        Some([lat, lng]) => {
            let lat = lat.as_f64().ok_or_else(malformed)?;
            let lng = lng.as_f64().ok_or_else(malformed)?;
            Ok(Coord(lat, lng))
        }
        _ => Err(malformed()),
    }
}

fn parse_priority(raw: &Value) -> Result<u8, RequestError> {
    let priority = raw
        .as_f64()
        .filter(|p| p.fract() == 0.0)
        .ok_or_else(|| RequestError::bad_request("priority must be an integer"))?;
    if !(1.0..=5.0).contains(&priority) {
        return Err(RequestError::bad_request("priority must be in range [1, 5]"));
    }
    Ok(priority as u8)
}

fn ensure_unique<'a>(what: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), RequestError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RequestError::bad_request(format!("duplicate {} id '{}'", what, id)));
        }
    }
    Ok(())
}
