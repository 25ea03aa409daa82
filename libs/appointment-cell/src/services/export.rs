// libs/appointment-cell/src/services/export.rs
use chrono::NaiveDate;

use crate::models::{Appointment, DATE_FORMAT, TIME_FORMAT};

pub const CSV_HEADER: &str = "Date,Time,Patient,Doctor,Status,Type,Phone";

/// Renders the visible appointments as CSV, header first, one line per record.
pub fn export_csv(appointments: &[Appointment]) -> String {
    let mut lines = Vec::with_capacity(appointments.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for appointment in appointments {
        let fields = [
            appointment.date.format(DATE_FORMAT).to_string(),
            appointment.time.format(TIME_FORMAT).to_string(),
            appointment.patient.clone(),
            appointment.doctor.clone(),
            appointment.status.to_string(),
            appointment.appointment_type.clone(),
            appointment.phone.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Flattens line breaks to spaces so every record stays on one line, then
/// quotes the field when it contains a separator or quote.
pub fn escape_field(field: &str) -> String {
    let field = field.replace("\r\n", " ").replace(['\n', '\r'], " ");
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("appointments-{}.csv", date.format(DATE_FORMAT))
}
