//! Collapse event-level rows into one row per doctor

use std::collections::HashMap;

use super::record::{DoctorRecord, RawRecord};

/// Group raw records by doctor and build the aggregated table
///
/// Grouping uses the canonical [DoctorId](super::DoctorId), so `"01"` and `"1"` are one doctor.
/// Volumes are summed. Each categorical column takes the first non-empty value seen
/// for that doctor in input order, which is not necessarily the most frequent or
/// the most recent one. The result is ordered by [DoctorId](super::DoctorId).
pub fn aggregate(records: &[RawRecord]) -> Vec<DoctorRecord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut doctors: Vec<DoctorRecord> = Vec::new();

    for raw in records {
        match index.get(raw.doctor_id.as_str()) {
            Some(&i) => merge(&mut doctors[i], raw),
            None => {
                index.insert(raw.doctor_id.as_str(), doctors.len());
                doctors.push(DoctorRecord::from(raw.clone()));
            }
        }
    }

    doctors.sort_by(|a, b| a.doctor_id.cmp(&b.doctor_id));
    doctors
}

fn merge(doctor: &mut DoctorRecord, raw: &RawRecord) {
    doctor.sum_sample += raw.sample;
    doctor.sum_extra += raw.extra;

    fill(&mut doctor.brand, &raw.brand);
    fill(&mut doctor.class, &raw.class);
    fill(&mut doctor.inn, &raw.inn);
    fill(&mut doctor.diagnosis, &raw.diagnosis);
    fill(&mut doctor.atc3, &raw.atc3);
    fill(&mut doctor.speciality, &raw.speciality);
    fill(&mut doctor.quarter, &raw.quarter);
}

// First non-empty value wins
fn fill(slot: &mut String, candidate: &str) {
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate.to_string();
    }
}
