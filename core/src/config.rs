use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geodesy::DistanceModel;
use crate::report::ReportFormat;
use crate::segmenter::{PeakHeartRate, SegmenterConfig};

pub const DEFAULT_INPUT: &str = "input.gpx";
pub const DEFAULT_OUTPUT: &str = "interval_data.csv";

/// Innstillinger fra fil (JSON). Flagg på kommandolinja overstyrer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub warmup_threshold_m: Option<u32>,
    pub training_threshold_m: Option<u32>,
    pub distance_model: DistanceModel,
    pub peak_heart_rate: PeakHeartRate,
    pub emit_zero_warmup: bool,
    pub format: ReportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            warmup_threshold_m: None,
            training_threshold_m: None,
            distance_model: DistanceModel::default(),
            peak_heart_rate: PeakHeartRate::default(),
            emit_zero_warmup: false,
            format: ReportFormat::default(),
        }
    }
}

impl Settings {
    /// Krever at begge tersklene er satt.
    pub fn segmenter_config(&self) -> Result<SegmenterConfig, ConfigError> {
        let warmup = self.warmup_threshold_m.ok_or(ConfigError::MissingThreshold("warm-up"))?;
        let training = self.training_threshold_m.ok_or(ConfigError::MissingThreshold("training"))?;
        let cfg = SegmenterConfig {
            warmup_threshold_m: f64::from(warmup),
            training_threshold_m: f64::from(training),
            distance_model: self.distance_model,
            peak_heart_rate: self.peak_heart_rate,
            emit_zero_warmup: self.emit_zero_warmup,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Terskel i hele meter, slik brukeren skriver den inn.
pub fn parse_threshold(name: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse::<u32>().map_err(|_| ConfigError::NotNumeric {
        name,
        value: raw.trim().to_string(),
    })
}
