//! Deler et GPX-opptak i oppvarming, drag og pauser ut fra akkumulert distanse,
//! og lager en rapport per intervall (tid, distanse, makspuls, pace).

pub mod cli;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod gpx;
pub mod metrics;
pub mod pace;
pub mod report;
pub mod segmenter;
pub mod storage;
pub mod types;
pub mod units;

pub use config::Settings;
pub use error::{ConfigError, GpxError, IntervalError, ReportError, SegmentError};
pub use geodesy::{distance, DistanceModel};
pub use gpx::{parse_gpx_str, read_gpx, read_gpx_file};
pub use metrics::{summarize, SessionSummary};
pub use pace::{format_clock, format_pace, PACE_SENTINEL};
pub use report::{write_csv, write_json, write_report_file, ReportFormat, CSV_HEADER};
pub use segmenter::{segment, PeakHeartRate, Segmenter, SegmenterConfig};
pub use storage::{load_settings, save_settings};
pub use types::{Interval, IntervalLabel, Trackpoint};
