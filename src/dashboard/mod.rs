//! The dashboard controller: two JSON inputs, a load-example action and a
//! run action that submits them and renders the table, KPIs and dump.
//!
//! Each run gets a generation number. A completion is applied only when its
//! generation is still the latest one issued, so when runs overlap the last
//! run started is the one rendered.

pub mod backend;
pub mod example;
pub mod locale;
pub mod view;

use serde_json::Value;

use crate::error::DashboardError;
use crate::model::ScheduleResponse;

pub use backend::{DraftRequest, HttpBackend, LocalBackend, RawReply, ScheduleBackend};
pub use locale::Locale;
pub use view::{AssignmentRow, Kpis, View};

/// Where the controller is in its request cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Rendered,
    Errored,
}

/// A run whose request has been built and is waiting on the backend
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRun {
    pub generation: u64,
    pub request: DraftRequest,
}

pub struct Dashboard {
    pub orders_input: String,
    pub vehicles_input: String,
    locale: Locale,
    phase: Phase,
    view: View,
    generation: u64,
}

impl Dashboard {
    pub fn new(locale: Locale) -> Self {
        Dashboard {
            orders_input: String::new(),
            vehicles_input: String::new(),
            locale,
            phase: Phase::Idle,
            view: View::default(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Number of the most recently started run
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fills both inputs with the built-in example payload
    pub fn load_example(&mut self) {
        self.orders_input = pretty(&example::example_orders());
        self.vehicles_input = pretty(&example::example_vehicles());
    }

    /// Fills both inputs with a seeded random payload. Inputs are left
    /// untouched if the payload cannot be converted to JSON.
    pub fn load_random_example(
        &mut self,
        seed: u64,
        order_count: usize,
        vehicle_count: usize,
    ) -> Result<(), serde_json::Error> {
        let (orders, vehicles) = example::random_payload(seed, order_count, vehicle_count);
        let orders = serde_json::to_value(orders)?;
        let vehicles = serde_json::to_value(vehicles)?;
        self.orders_input = pretty(&orders);
        self.vehicles_input = pretty(&vehicles);
        Ok(())
    }

    /// Starts a run. Returns None when an input does not parse; the error
    /// is rendered and no request should be sent.
    pub fn begin_run(&mut self) -> Option<PendingRun> {
        self.generation += 1;
        let request = parse_field(&self.orders_input, "orders").and_then(|orders| {
            let vehicles = parse_field(&self.vehicles_input, "vehicles")?;
            Ok(DraftRequest { orders, vehicles })
        });

        match request {
            Ok(request) => {
                self.phase = Phase::Submitting;
                Some(PendingRun {
                    generation: self.generation,
                    request,
                })
            }
            Err(e) => {
                self.show_error(&e);
                None
            }
        }
    }

    /// Applies the backend outcome of run `generation`. Returns false, and
    /// leaves the view untouched, when a newer run has started since.
    pub fn complete_run(&mut self, generation: u64, outcome: Result<RawReply, DashboardError>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "dropping stale schedule result");
            return false;
        }

        match outcome.and_then(interpret_reply) {
            Ok((response, raw)) => self.show_response(&response, &raw),
            Err(e) => self.show_error(&e),
        }
        true
    }

    /// Runs one full cycle against `backend`
    pub async fn run_schedule<B: ScheduleBackend + ?Sized>(&mut self, backend: &B) -> Phase {
        let Some(run) = self.begin_run() else {
            return self.phase;
        };
        let outcome = backend.submit(&run.request).await;
        self.complete_run(run.generation, outcome);
        self.phase
    }

    fn show_response(&mut self, response: &ScheduleResponse, raw: &Value) {
        self.view = View {
            rows: response
                .assignments
                .iter()
                .map(|a| AssignmentRow::new(a, self.locale))
                .collect(),
            kpis: Kpis::from_response(response),
            result_text: pretty(raw),
        };
        self.phase = Phase::Rendered;
    }

    fn show_error(&mut self, err: &DashboardError) {
        tracing::info!(error = %err, "schedule run failed");
        self.view = View::errored(format!("{}{}", self.locale.error_prefix(), err));
        self.phase = Phase::Errored;
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Parses one input field; blank input is an empty list
fn parse_field(text: &str, field: &'static str) -> Result<Vec<Value>, DashboardError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str(text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(DashboardError::input(field, "expected a JSON array")),
        Err(e) => Err(DashboardError::input(field, e.to_string())),
    }
}

/// Turns a raw reply into a typed response plus the JSON to dump
pub fn interpret_reply(reply: RawReply) -> Result<(ScheduleResponse, Value), DashboardError> {
    let parsed = serde_json::from_str::<Value>(&reply.body);

    if !reply.is_success() {
        let message = parsed
            .ok()
            .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| reply.status.to_string());
        return Err(DashboardError::Server(message));
    }

    let raw = parsed.map_err(|e| DashboardError::MalformedResponse(e.to_string()))?;
    let response = serde_json::from_value(raw.clone())
        .map_err(|e| DashboardError::MalformedResponse(e.to_string()))?;
    Ok((response, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(status: u16, body: Value) -> RawReply {
        RawReply {
            status,
            body: body.to_string(),
        }
    }

    fn success_body() -> Value {
        json!({
            "assignments": [
                {"order_id": "O-1", "vehicle_id": "V-1", "eta_hour": 0.5, "score": 99.1, "travel_km": 20.0, "deadline_breached": false},
                {"order_id": "O-2", "vehicle_id": "V-2", "eta_hour": 2.75, "score": -3.2, "travel_km": 41.3, "deadline_breached": true}
            ],
            "unassigned_orders": [],
            "total_score": 95.9,
            "summary": {"orders_total": 2, "orders_assigned": 2, "orders_unassigned": 0}
        })
    }

    #[test]
    fn load_example_fills_both_inputs() {
        let mut dash = Dashboard::new(Locale::Zh);
        dash.load_example();
        let orders: Vec<Value> = serde_json::from_str(&dash.orders_input).unwrap();
        let vehicles: Vec<Value> = serde_json::from_str(&dash.vehicles_input).unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(vehicles.len(), 2);
        assert_eq!(dash.phase(), Phase::Idle);
        assert!(dash.orders_input.contains('\n'));
    }

    #[test]
    fn random_example_fills_inputs() {
        let mut dash = Dashboard::new(Locale::En);
        dash.load_random_example(3, 6, 4).unwrap();
        let orders: Vec<Value> = serde_json::from_str(&dash.orders_input).unwrap();
        let vehicles: Vec<Value> = serde_json::from_str(&dash.vehicles_input).unwrap();
        assert_eq!(orders.len(), 6);
        assert_eq!(vehicles.len(), 4);
        assert!(dash.vehicles_input.contains('\n'));
        assert_eq!(dash.phase(), Phase::Idle);

        let mut again = Dashboard::new(Locale::En);
        again.load_random_example(3, 6, 4).unwrap();
        assert_eq!(again.orders_input, dash.orders_input);
    }

    #[test]
    fn blank_inputs_send_empty_lists() {
        let mut dash = Dashboard::new(Locale::Zh);
        dash.vehicles_input = "   ".to_string();
        let run = dash.begin_run().unwrap();
        assert_eq!(run.request, DraftRequest::default());
        assert_eq!(dash.phase(), Phase::Submitting);
    }

    #[test]
    fn malformed_input_errors_without_request() {
        let mut dash = Dashboard::new(Locale::Zh);
        dash.orders_input = "[{".to_string();
        assert!(dash.begin_run().is_none());
        assert_eq!(dash.phase(), Phase::Errored);
        assert!(dash.view().rows.is_empty());
        assert_eq!(dash.view().kpis, Kpis::default());
        assert!(dash.view().result_text.starts_with("错误: orders:"));
    }

    #[test]
    fn non_array_input_is_rejected() {
        let mut dash = Dashboard::new(Locale::En);
        dash.vehicles_input = r#"{"id": "V-1"}"#.to_string();
        assert!(dash.begin_run().is_none());
        assert_eq!(dash.view().result_text, "Error: vehicles: expected a JSON array");
    }

    #[test]
    fn success_renders_rows_in_order() {
        let mut dash = Dashboard::new(Locale::Zh);
        let run = dash.begin_run().unwrap();
        assert!(dash.complete_run(run.generation, Ok(reply(200, success_body()))));

        let view = dash.view();
        assert_eq!(dash.phase(), Phase::Rendered);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].cells(), ["O-1", "V-1", "0.5", "20", "99.1", "否"]);
        assert_eq!(view.rows[1].cells(), ["O-2", "V-2", "2.75", "41.3", "-3.2", "是"]);
        assert_eq!(view.kpis.cells(), ["2", "2", "0", "95.9"]);
        assert_eq!(view.result_text, serde_json::to_string_pretty(&success_body()).unwrap());
    }

    #[test]
    fn dump_keeps_server_key_order() {
        let mut dash = Dashboard::new(Locale::Zh);
        let run = dash.begin_run().unwrap();
        let body = r#"{"total_score":1.5,"assignments":[]}"#.to_string();
        dash.complete_run(run.generation, Ok(RawReply { status: 200, body }));
        let text = &dash.view().result_text;
        assert!(text.find("total_score").unwrap() < text.find("assignments").unwrap());
    }

    #[test]
    fn missing_summary_and_score_render_zeros() {
        let mut dash = Dashboard::new(Locale::Zh);
        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Ok(reply(200, json!({"assignments": []}))));
        assert_eq!(dash.phase(), Phase::Rendered);
        assert_eq!(dash.view().kpis.cells(), ["0", "0", "0", "0"]);
    }

    #[test]
    fn null_assignments_render_empty_table() {
        let mut dash = Dashboard::new(Locale::En);
        let run = dash.begin_run().unwrap();
        let body = json!({"assignments": null, "unassigned_orders": null, "total_score": 0});
        dash.complete_run(run.generation, Ok(reply(200, body)));
        assert_eq!(dash.phase(), Phase::Rendered);
        assert!(dash.view().rows.is_empty());
        assert_eq!(dash.view().kpis.cells(), ["0", "0", "0", "0"]);
    }

    #[test]
    fn server_error_message_is_shown() {
        let mut dash = Dashboard::new(Locale::Zh);
        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Ok(reply(400, json!({"error": "X"}))));
        assert_eq!(dash.phase(), Phase::Errored);
        assert_eq!(dash.view().result_text, "错误: X");
    }

    #[test]
    fn server_error_without_message_shows_status() {
        let mut dash = Dashboard::new(Locale::En);
        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Ok(reply(503, json!({}))));
        assert_eq!(dash.view().result_text, "Error: 503");

        let run = dash.begin_run().unwrap();
        let html = RawReply {
            status: 502,
            body: "<html>Bad Gateway</html>".to_string(),
        };
        dash.complete_run(run.generation, Ok(html));
        assert_eq!(dash.view().result_text, "Error: 502");
    }

    #[test]
    fn network_error_clears_previous_result() {
        let mut dash = Dashboard::new(Locale::En);
        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Ok(reply(200, success_body())));
        assert_eq!(dash.view().rows.len(), 2);

        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Err(DashboardError::Network("connection refused".into())));
        assert_eq!(dash.phase(), Phase::Errored);
        assert!(dash.view().rows.is_empty());
        assert_eq!(dash.view().kpis, Kpis::default());
        assert_eq!(dash.view().result_text, "Error: connection refused");
    }

    #[test]
    fn mistyped_success_body_fails_closed() {
        let mut dash = Dashboard::new(Locale::En);
        let run = dash.begin_run().unwrap();
        dash.complete_run(run.generation, Ok(reply(200, json!({"total_score": "lots"}))));
        assert_eq!(dash.phase(), Phase::Errored);
        assert!(dash.view().result_text.starts_with("Error: malformed response"));
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut dash = Dashboard::new(Locale::En);
        let first = dash.begin_run().unwrap();
        let second = dash.begin_run().unwrap();

        assert!(dash.complete_run(second.generation, Ok(reply(200, success_body()))));
        assert!(!dash.complete_run(first.generation, Ok(reply(400, json!({"error": "old"})))));

        assert_eq!(dash.phase(), Phase::Rendered);
        assert_eq!(dash.view().rows.len(), 2);
    }

    #[test]
    fn failed_parse_supersedes_inflight_run() {
        let mut dash = Dashboard::new(Locale::En);
        let first = dash.begin_run().unwrap();
        dash.orders_input = "nope".to_string();
        assert!(dash.begin_run().is_none());

        assert!(!dash.complete_run(first.generation, Ok(reply(200, success_body()))));
        assert_eq!(dash.phase(), Phase::Errored);
    }

    #[tokio::test]
    async fn example_runs_end_to_end_in_process() {
        let mut dash = Dashboard::new(Locale::En);
        dash.load_example();
        let phase = dash.run_schedule(&LocalBackend).await;

        assert_eq!(phase, Phase::Rendered);
        let view = dash.view();
        assert_eq!(view.kpis.orders_total, 3);
        assert_eq!(view.rows.len() as u64, view.kpis.orders_assigned);
        assert_eq!(view.kpis.orders_assigned + view.kpis.orders_unassigned, 3);
    }
}
