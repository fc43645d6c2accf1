use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IntervalError, SegmentError};
use crate::geodesy::DistanceModel;
use crate::pace::format_pace;
use crate::types::{Interval, IntervalLabel, Trackpoint};
use crate::units::RoundTo;

/// Hvordan makspuls for et intervall velges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PeakHeartRate {
    /// Høyeste puls fra startpunktet til og med sluttpunktet.
    #[default]
    Max,
    /// Bare pulsen i punktet som lukker intervallet (gammel oppførsel).
    ClosingPoint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmenterConfig {
    pub warmup_threshold_m: f64,
    pub training_threshold_m: f64,
    pub distance_model: DistanceModel,
    pub peak_heart_rate: PeakHeartRate,
    /// Med terskel 0 lukkes oppvarmingen på andre punktpar i stedet for å
    /// slås av.
    pub emit_zero_warmup: bool,
}

impl SegmenterConfig {
    pub fn new(warmup_threshold_m: f64, training_threshold_m: f64) -> Self {
        Self {
            warmup_threshold_m,
            training_threshold_m,
            distance_model: DistanceModel::default(),
            peak_heart_rate: PeakHeartRate::default(),
            emit_zero_warmup: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.warmup_threshold_m.is_finite() || self.warmup_threshold_m < 0.0 {
            return Err(ConfigError::Negative { name: "warm-up", value: self.warmup_threshold_m });
        }
        if !self.training_threshold_m.is_finite() {
            return Err(ConfigError::Negative { name: "training", value: self.training_threshold_m });
        }
        if self.training_threshold_m <= 0.0 {
            return Err(ConfigError::NonPositiveTraining(self.training_threshold_m));
        }
        Ok(())
    }

    fn warmup_active(&self) -> bool {
        self.warmup_threshold_m > 0.0 || self.emit_zero_warmup
    }
}

/// Tilstand som bæres gjennom folden over punktparene.
#[derive(Debug)]
struct ScanState {
    interval_count: u32,
    interval_start: Option<usize>,
    accumulated_m: f64,
    warmup_emitted: bool,
    peak_hr: u32,
    intervals: Vec<Interval>,
}

impl ScanState {
    fn new() -> Self {
        Self {
            interval_count: 1,
            interval_start: None,
            accumulated_m: 0.0,
            warmup_emitted: false,
            peak_hr: 0,
            intervals: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Segmenter {
    cfg: SegmenterConfig,
}

impl Segmenter {
    pub fn new(cfg: SegmenterConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.cfg
    }

    /// Ett pass fremover. Alle tidsstempler sjekkes før noe intervall bygges,
    /// så enten går hele sekvensen gjennom eller ingenting.
    pub fn run(&self, points: &[Trackpoint]) -> Result<Vec<Interval>, SegmentError> {
        if points.len() < 2 {
            return Ok(Vec::new());
        }
        let times = collect_timestamps(points)?;

        let state = points
            .windows(2)
            .enumerate()
            .fold(ScanState::new(), |state, (i, pair)| {
                self.step(state, i, &pair[0], &pair[1], &times)
            });

        if state.interval_start.is_some() {
            debug!(
                "dropper {:.1} m uten terskel på slutten av økta",
                state.accumulated_m
            );
        }
        Ok(state.intervals)
    }

    fn step(
        &self,
        mut state: ScanState,
        prev_idx: usize,
        prev: &Trackpoint,
        cur: &Trackpoint,
        times: &[DateTime<Utc>],
    ) -> ScanState {
        let cur_idx = prev_idx + 1;
        let d = self.cfg.distance_model.distance(prev.coordinate(), cur.coordinate());
        state.accumulated_m += d;

        let start_idx = match state.interval_start {
            None => {
                // første par seeder bare startpunktet
                state.interval_start = Some(prev_idx);
                state.peak_hr = hr(prev).max(hr(cur));
                return state;
            }
            Some(idx) => idx,
        };
        state.peak_hr = state.peak_hr.max(hr(cur));

        let label = if self.cfg.warmup_active()
            && !state.warmup_emitted
            && state.interval_count == 1
            && state.accumulated_m >= self.cfg.warmup_threshold_m
        {
            state.warmup_emitted = true;
            IntervalLabel::WarmUp
        } else if state.accumulated_m >= self.cfg.training_threshold_m {
            // telleren starter på 1 igjen etter oppvarmingen
            IntervalLabel::for_count(state.interval_count - u32::from(state.warmup_emitted))
        } else {
            return state;
        };

        let interval = self.close(&state, label, times[start_idx], times[cur_idx], cur);
        debug!(
            "#{} {} {}..{} {:.0} m {} s",
            state.intervals.len() + 1,
            interval.label,
            interval.start_time,
            interval.end_time,
            interval.distance_m,
            interval.duration_secs
        );
        state.intervals.push(interval);
        state.accumulated_m = 0.0;
        state.interval_count += 1;
        state.interval_start = None;
        state.peak_hr = 0;
        state
    }

    fn close(
        &self,
        state: &ScanState,
        label: IntervalLabel,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        closing: &Trackpoint,
    ) -> Interval {
        let duration_secs = (end_time - start_time).num_seconds().max(0);
        let peak_heart_rate = match self.cfg.peak_heart_rate {
            PeakHeartRate::Max => state.peak_hr,
            PeakHeartRate::ClosingPoint => hr(closing),
        };
        Interval {
            label,
            start_time,
            end_time,
            duration_secs,
            distance_m: state.accumulated_m.round_to(0),
            peak_heart_rate,
            pace: format_pace(duration_secs as f64, state.accumulated_m),
        }
    }
}

/// Segmenterer med standardvalg (haversine, makspuls over intervallet).
pub fn segment(
    points: &[Trackpoint],
    warmup_threshold_m: f64,
    training_threshold_m: f64,
) -> Result<Vec<Interval>, IntervalError> {
    let segmenter = Segmenter::new(SegmenterConfig::new(warmup_threshold_m, training_threshold_m))?;
    Ok(segmenter.run(points)?)
}

#[inline]
fn hr(p: &Trackpoint) -> u32 {
    p.heart_rate.unwrap_or(0)
}

fn collect_timestamps(points: &[Trackpoint]) -> Result<Vec<DateTime<Utc>>, SegmentError> {
    let mut out: Vec<DateTime<Utc>> = Vec::with_capacity(points.len());
    for (index, p) in points.iter().enumerate() {
        let t = p.timestamp.ok_or(SegmentError::MissingTimestamp { index })?;
        if let Some(prev) = out.last() {
            if t < *prev {
                return Err(SegmentError::OutOfOrder { index });
            }
        }
        out.push(t);
    }
    Ok(out)
}
