use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use crate::model::{Coord, Order, Vehicle};

/// The built-in example orders (3 entries)
pub fn example_orders() -> Value {
    json!([
        { "id": "O-1001", "pickup": [31.23, 121.47], "dropoff": [31.30, 121.55], "weight": 120, "priority": 5, "deadline_hour": 3 },
        { "id": "O-1002", "pickup": [31.22, 121.45], "dropoff": [31.18, 121.40], "weight": 80, "priority": 3, "deadline_hour": 4 },
        { "id": "O-1003", "pickup": [31.25, 121.42], "dropoff": [31.35, 121.49], "weight": 250, "priority": 4, "deadline_hour": 5 }
    ])
}

/// The built-in example vehicles (2 entries)
pub fn example_vehicles() -> Value {
    json!([
        { "id": "V-1", "location": [31.21, 121.46], "capacity": 300, "speed_kmph": 45, "available_from_hour": 0 },
        { "id": "V-2", "location": [31.30, 121.52], "capacity": 150, "speed_kmph": 40, "available_from_hour": 0 }
    ])
}

const CENTER: Coord = Coord(31.23, 121.47);
const SPREAD_DEG: f64 = 0.12;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn random_coord(rng: &mut StdRng) -> Coord {
    Coord(
        round_to(CENTER.lat() + rng.gen_range(-SPREAD_DEG..SPREAD_DEG), 4),
        round_to(CENTER.lng() + rng.gen_range(-SPREAD_DEG..SPREAD_DEG), 4),
    )
}

/// Generates a reproducible random payload around the example city centre
pub fn random_payload(seed: u64, order_count: usize, vehicle_count: usize) -> (Vec<Order>, Vec<Vehicle>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let orders = (0..order_count)
        .map(|i| Order {
            id: format!("O-{}", 1001 + i),
            pickup: random_coord(&mut rng),
            dropoff: random_coord(&mut rng),
            weight: rng.gen_range(10..=250) as f64,
            priority: rng.gen_range(1..=5),
            deadline_hour: round_to(rng.gen_range(1.0..8.0), 1),
        })
        .collect();

    let vehicles = (0..vehicle_count)
        .map(|i| Vehicle {
            id: format!("V-{}", i + 1),
            location: random_coord(&mut rng),
            capacity: rng.gen_range(100..=400) as f64,
            speed_kmph: rng.gen_range(30..=60) as f64,
            available_from_hour: round_to(rng.gen_range(0.0..1.0), 1),
        })
        .collect();

    (orders, vehicles)
}
