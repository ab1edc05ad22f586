use std::fmt::{self, Display};

use ndarray::Array1;

use crate::{
    array_factor::FarFieldPattern,
    comparison::RetrodirectiveLink,
    error::Result,
    phase::ElementPhaseVector,
    sweep::AngleSweep,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTableRow {
    pub incident_angle_deg: f64,
    // 1-based, as the elements are labelled on the array
    pub element: usize,
    pub received_phase_deg: f64,
    pub conjugate_phase_deg: f64,
}

const HEADER: [&str; 4] = [
    "Incident Angle (deg)",
    "Antenna Index",
    "Received Phase (deg)",
    "Conjugate Phase (deg)",
];

impl Display for PhaseTableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>w0$.1} {:>w1$} {:>w2$.6} {:>w3$.6}",
            self.incident_angle_deg,
            self.element,
            self.received_phase_deg,
            self.conjugate_phase_deg,
            w0 = HEADER[0].len(),
            w1 = HEADER[1].len(),
            w2 = HEADER[2].len(),
            w3 = HEADER[3].len(),
        )
    }
}

/// One row per (incident angle, element) with the received and conjugate
/// phases in degrees.
pub fn phase_table(link: &RetrodirectiveLink, angles_deg: &[f64]) -> Vec<PhaseTableRow> {
    angles_deg
        .iter()
        .flat_map(|&angle| {
            let (received, conjugate) = link.respond(angle);
            let (rx, tx) = (received.to_degrees(), conjugate.to_degrees());
            (0..rx.len())
                .map(|n| PhaseTableRow {
                    incident_angle_deg: angle,
                    element: n + 1,
                    received_phase_deg: rx[n],
                    conjugate_phase_deg: tx[n],
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn render_phase_table(rows: &[PhaseTableRow]) -> String {
    let mut out = HEADER.join(" ");
    for row in rows {
        out.push('\n');
        out.push_str(&row.to_string());
    }
    out
}

/// Conjugate phases recorded in the table for one incident angle, back in
/// radians and ordered by element.
pub fn steering_from_table(rows: &[PhaseTableRow], angle_deg: f64) -> Option<ElementPhaseVector> {
    let mut rows = rows
        .iter()
        .filter(|row| row.incident_angle_deg == angle_deg)
        .collect::<Vec<_>>();
    if rows.is_empty() {
        return None;
    }
    rows.sort_by_key(|row| row.element);

    let degrees = rows
        .iter()
        .map(|row| row.conjugate_phase_deg)
        .collect::<Array1<f64>>();
    Some(ElementPhaseVector::from_degrees(&degrees))
}

/// Transmit pattern for one of the tabulated angles, steered with the phases
/// read back out of the table.
pub fn tabulated_pattern(
    link: &RetrodirectiveLink,
    rows: &[PhaseTableRow],
    angle_deg: f64,
    sweep: &AngleSweep,
) -> Result<Option<FarFieldPattern>> {
    match steering_from_table(rows, angle_deg) {
        Some(steering) => link.transmit_pattern(&steering, sweep).map(Some),
        None => Ok(None),
    }
}
