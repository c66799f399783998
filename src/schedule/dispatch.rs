use std::cmp::Ordering;

use crate::model::{Assignment, Order, Vehicle};
use super::scoring::score_candidate;
use super::types::{Candidate, DispatchResult, VehicleState};

/// Rounds to 2 decimals for reporting
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Greedily assigns orders to vehicles, highest priority first.
///
/// Orders are taken by priority (descending), then deadline, then id. Each
/// order goes to the vehicle with the best score, ties broken by the earlier
/// eta and then by vehicle input order. The chosen vehicle moves to the
/// order's dropoff and stays busy until the eta, so later orders see the
/// updated position.
pub fn schedule_orders(orders: &[Order], vehicles: &[Vehicle]) -> DispatchResult {
    let mut order_queue: Vec<&Order> = orders.iter().collect();
    order_queue.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| a.deadline_hour.partial_cmp(&b.deadline_hour).unwrap_or(Ordering::Equal))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut fleet: Vec<VehicleState> = vehicles.iter().map(VehicleState::from).collect();

    let mut assignments = Vec::new();
    let mut unassigned = Vec::new();
    let mut total_score = 0.0;

    for order in order_queue {
        let mut best: Option<(usize, Candidate)> = None;

        for (idx, vehicle) in fleet.iter().enumerate() {
            let Some(candidate) = score_candidate(order, vehicle) else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((_, current)) => {
                    candidate.score > current.score
                        || (candidate.score == current.score && candidate.eta_hour < current.eta_hour)
                }
            };
            if better {
                best = Some((idx, candidate));
            }
        }

        let Some((idx, candidate)) = best else {
            tracing::debug!(order_id = %order.id, "no vehicle can carry order");
            unassigned.push(order.id.clone());
            continue;
        };

        let chosen = &mut fleet[idx];
        chosen.location = order.dropoff;
        chosen.available_from_hour = candidate.eta_hour;

        assignments.push(Assignment {
            order_id: order.id.clone(),
            vehicle_id: chosen.id.clone(),
            eta_hour: round2(candidate.eta_hour),
            score: round2(candidate.score),
            travel_km: round2(candidate.travel_km),
            deadline_breached: candidate.eta_hour > order.deadline_hour,
        });
        total_score += candidate.score;
    }

    DispatchResult {
        assignments,
        unassigned_orders: unassigned,
        total_score: round2(total_score),
    }
}
