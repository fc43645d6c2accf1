use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::metrics::{summarize, SessionSummary};
use crate::pace::format_clock;
use crate::types::Interval;

/// Kolonnene i CSV-fila. Rekkefølge og tekst er fast kontrakt.
pub const CSV_HEADER: [&str; 8] = [
    "Interval",
    "Action",
    "Start Time",
    "End Time",
    "Total Time (s)",
    "Distance (m)",
    "Max Heart Rate (bpm)",
    "Pace",
];

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    interval: usize,
    action: &'static str,
    start_time: String,
    end_time: String,
    total_time: String,
    distance_m: u64,
    max_heart_rate: u32,
    pace: &'a str,
}

impl<'a> CsvRow<'a> {
    fn new(number: usize, iv: &'a Interval) -> Self {
        Self {
            interval: number,
            action: iv.label.as_str(),
            start_time: iv.start_time.format(TIME_FORMAT).to_string(),
            end_time: iv.end_time.format(TIME_FORMAT).to_string(),
            total_time: format_clock(iv.duration_secs),
            distance_m: iv.distance_m.max(0.0) as u64,
            max_heart_rate: iv.peak_heart_rate,
            pace: &iv.pace,
        }
    }
}

/// Header skrives alltid, også når det ikke finnes intervaller.
pub fn write_csv<W: Write>(intervals: &[Interval], out: W) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(CSV_HEADER)?;
    for (i, iv) in intervals.iter().enumerate() {
        writer.serialize(CsvRow::new(i + 1, iv))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    intervals: &'a [Interval],
    summary: SessionSummary,
}

pub fn write_json<W: Write>(intervals: &[Interval], mut out: W) -> Result<(), ReportError> {
    let report = JsonReport { intervals, summary: summarize(intervals) };
    serde_json::to_writer_pretty(&mut out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(intervals: &[Interval], format: ReportFormat, out: W) -> Result<(), ReportError> {
    match format {
        ReportFormat::Csv => write_csv(intervals, out),
        ReportFormat::Json => write_json(intervals, out),
    }
}

pub fn write_report_file(
    path: impl AsRef<Path>,
    intervals: &[Interval],
    format: ReportFormat,
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ReportError::Io { path: path.to_path_buf(), source })?;
    write_report(intervals, format, BufWriter::new(file))?;
    info!("✅ {} intervaller skrevet til {}", intervals.len(), path.display());
    Ok(())
}

/// Enkel tabell for terminalen.
pub fn render_table(intervals: &[Interval]) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{:>3}  {:<8}  {:<20}  {:<20}  {:>7}  {:>6}  {:>4}  {:>6}\n",
        "#", "Action", "Start", "End", "Time", "Dist", "HR", "Pace"
    ));
    for (i, iv) in intervals.iter().enumerate() {
        s.push_str(&format!(
            "{:>3}  {:<8}  {:<20}  {:<20}  {:>7}  {:>6.0}  {:>4}  {:>6}\n",
            i + 1,
            iv.label.as_str(),
            iv.start_time.format(TIME_FORMAT),
            iv.end_time.format(TIME_FORMAT),
            format_clock(iv.duration_secs),
            iv.distance_m,
            iv.peak_heart_rate,
            iv.pace
        ));
    }
    s
}
