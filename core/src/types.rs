use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ett GPS-punkt slik det ble lest fra fila. Rekkefølgen er opptaksrekkefølgen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trackpoint {
    pub latitude: f64,                   // grader
    pub longitude: f64,                  // grader
    pub timestamp: Option<DateTime<Utc>>, // UTC, hele sekunder
    pub heart_rate: Option<u32>,         // bpm
    pub speed_ms: Option<f64>,           // m/s (brukes ikke til pace)
}

impl Trackpoint {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp: Some(timestamp),
            heart_rate: None,
            speed_ms: None,
        }
    }

    pub fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_speed(mut self, speed_ms: f64) -> Self {
        self.speed_ms = Some(speed_ms);
        self
    }

    /// (lat, lon) i grader.
    pub fn coordinate(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalLabel {
    WarmUp,
    Training,
    Break,
}

impl IntervalLabel {
    /// Teksten i Action-kolonnen.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalLabel::WarmUp => "Warm-up",
            IntervalLabel::Training => "Training",
            IntervalLabel::Break => "Break",
        }
    }

    /// Oddetall => pause, partall => drag (1-indeksert teller).
    pub fn for_count(interval_count: u32) -> Self {
        if interval_count % 2 == 0 {
            IntervalLabel::Training
        } else {
            IntervalLabel::Break
        }
    }
}

impl std::fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub label: IntervalLabel,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_secs: i64,
    pub distance_m: f64,       // rundet til hele meter
    pub peak_heart_rate: u32,  // 0 hvis puls mangler
    pub pace: String,          // MM'SS per km
}
