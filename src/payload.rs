use chrono::{DateTime, Utc};
use rand::prelude::IndexedRandom;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Weight,
    BodyFat,
    HeartRate,
    BloodOxygen,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [
        RecordType::Weight,
        RecordType::BodyFat,
        RecordType::HeartRate,
        RecordType::BloodOxygen,
    ];

    pub fn random() -> Self {
        let mut rng = rand::rng();
        *Self::ALL.choose(&mut rng).unwrap_or(&RecordType::Weight)
    }
}

/// Body of one add-record request.
#[derive(Debug, Clone, Serialize)]
pub struct FitnessRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub value: u32,
    pub note: String,
    pub time: String,
}

impl FitnessRecord {
    pub fn for_task(index: usize, record_type: RecordType) -> Self {
        Self::at(index, record_type, Utc::now())
    }

    pub fn at(index: usize, record_type: RecordType, now: DateTime<Utc>) -> Self {
        Self {
            record_type,
            value: 70 + (index % 10) as u32,
            note: format!("load test {}", index),
            time: format_timestamp(now),
        }
    }
}

/// ISO-8601, microsecond precision, `Z` suffix.
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
