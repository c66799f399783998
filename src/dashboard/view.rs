use std::fmt::Write as _;
use std::io;

use crate::model::{Assignment, ScheduleResponse};
use super::locale::Locale;

/// One table row, already formatted as cell text
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRow {
    pub order_id: String,
    pub vehicle_id: String,
    pub eta_hour: String,
    pub travel_km: String,
    pub score: String,
    pub deadline_breached: String,
}

impl AssignmentRow {
    pub fn new(assignment: &Assignment, locale: Locale) -> Self {
        AssignmentRow {
            order_id: assignment.order_id.clone(),
            vehicle_id: assignment.vehicle_id.clone(),
            eta_hour: assignment.eta_hour.to_string(),
            travel_km: assignment.travel_km.to_string(),
            score: assignment.score.to_string(),
            deadline_breached: locale.yes_no(assignment.deadline_breached).to_string(),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            &self.order_id,
            &self.vehicle_id,
            &self.eta_hour,
            &self.travel_km,
            &self.score,
            &self.deadline_breached,
        ]
    }
}

/// The four summary figures
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    pub orders_total: u64,
    pub orders_assigned: u64,
    pub orders_unassigned: u64,
    pub total_score: f64,
}

impl Kpis {
    /// Missing summary or score fall back to zero
    pub fn from_response(response: &ScheduleResponse) -> Self {
        let summary = response.summary.unwrap_or_default();
        Kpis {
            orders_total: summary.orders_total,
            orders_assigned: summary.orders_assigned,
            orders_unassigned: summary.orders_unassigned,
            total_score: response.total_score.unwrap_or(0.0),
        }
    }

    pub fn cells(&self) -> [String; 4] {
        [
            self.orders_total.to_string(),
            self.orders_assigned.to_string(),
            self.orders_unassigned.to_string(),
            self.total_score.to_string(),
        ]
    }
}

/// Everything the dashboard shows below the inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub rows: Vec<AssignmentRow>,
    pub kpis: Kpis,
    /// Pretty-printed response, or the error line
    pub result_text: String,
}

impl View {
    /// Cleared table, zeroed KPIs, and the error line
    pub fn errored(message: String) -> Self {
        View {
            rows: Vec::new(),
            kpis: Kpis::default(),
            result_text: message,
        }
    }
}

/// Renders the view as plain text for a terminal
pub fn format_view(view: &View, locale: Locale) -> String {
    let mut out = String::new();

    let labels = locale.kpi_labels();
    let values = view.kpis.cells();
    for (label, value) in labels.iter().zip(values.iter()) {
        let _ = writeln!(out, "{}: {}", label, value);
    }
    out.push('\n');

    let headers = locale.table_headers();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &view.rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", format_line(headers));
    for row in &view.rows {
        let _ = writeln!(out, "{}", format_line(row.cells()));
    }
    out.push('\n');
    out.push_str(&view.result_text);
    out.push('\n');
    out
}

/// Writes the assignment table as CSV
pub fn write_csv<W: io::Write>(view: &View, locale: Locale, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(locale.table_headers())?;
    for row in &view.rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}
