use std::path::PathBuf;

use thiserror::Error;

/// Feil fra GPX-leseren. `index` er 0-basert posisjon blant trkpt-ene.
#[derive(Error, Debug)]
pub enum GpxError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed GPX document: {0}")]
    Xml(#[from] xml::reader::Error),
    #[error("trackpoint {index}: missing or invalid {attr} attribute")]
    BadCoordinate { index: usize, attr: &'static str },
    #[error("trackpoint {index}: unparseable timestamp {value:?}")]
    BadTimestamp { index: usize, value: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum SegmentError {
    #[error("trackpoint {index} has no timestamp")]
    MissingTimestamp { index: usize },
    #[error("trackpoint {index} is earlier than the point before it")]
    OutOfOrder { index: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} threshold must be a whole number of meters, got {value:?}")]
    NotNumeric { name: &'static str, value: String },
    #[error("{name} threshold must be finite and >= 0, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("training threshold must be > 0 meters, got {0}")]
    NonPositiveTraining(f64),
    #[error("{0} threshold not given and prompting is disabled")]
    MissingThreshold(&'static str),
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings parse at {path}: {message}")]
    Parse { path: String, message: String },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io: {0}")]
    Write(#[from] std::io::Error),
}

/// Samlefeil for hele løpet (les -> segmenter -> skriv).
#[derive(Error, Debug)]
pub enum IntervalError {
    #[error(transparent)]
    Gpx(#[from] GpxError),
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
