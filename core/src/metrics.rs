use serde::{Deserialize, Serialize};

use crate::pace::format_pace;
use crate::types::{Interval, IntervalLabel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSummary {
    pub intervals: usize,
    pub warmup: bool,
    pub training_reps: usize,
    pub breaks: usize,
    pub total_distance_m: f64,
    pub training_distance_m: f64,
    pub total_duration_secs: i64,
    pub avg_training_pace: String,
    pub max_heart_rate: u32,
    pub avg_peak_heart_rate: Option<f32>,
}

/// Antall intervaller med gitt etikett.
pub fn count_label(intervals: &[Interval], label: IntervalLabel) -> usize {
    intervals.iter().filter(|iv| iv.label == label).count()
}

/// Snitt av makspuls per intervall, bare intervaller som har puls (> 0).
pub fn avg_peak_hr(intervals: &[Interval]) -> Option<f32> {
    let mut sum = 0.0f32;
    let mut cnt = 0usize;
    for iv in intervals {
        if iv.peak_heart_rate > 0 {
            sum += iv.peak_heart_rate as f32;
            cnt += 1;
        }
    }
    if cnt == 0 { None } else { Some(sum / cnt as f32) }
}

/// Snittpace over alle drag: samlet tid / samlet distanse.
pub fn training_pace(intervals: &[Interval]) -> String {
    let (secs, meters) = intervals
        .iter()
        .filter(|iv| iv.label == IntervalLabel::Training)
        .fold((0i64, 0.0f64), |(s, m), iv| (s + iv.duration_secs, m + iv.distance_m));
    format_pace(secs as f64, meters)
}

pub fn summarize(intervals: &[Interval]) -> SessionSummary {
    SessionSummary {
        intervals: intervals.len(),
        warmup: count_label(intervals, IntervalLabel::WarmUp) > 0,
        training_reps: count_label(intervals, IntervalLabel::Training),
        breaks: count_label(intervals, IntervalLabel::Break),
        total_distance_m: intervals.iter().map(|iv| iv.distance_m).sum(),
        training_distance_m: intervals
            .iter()
            .filter(|iv| iv.label == IntervalLabel::Training)
            .map(|iv| iv.distance_m)
            .sum(),
        total_duration_secs: intervals.iter().map(|iv| iv.duration_secs).sum(),
        avg_training_pace: training_pace(intervals),
        max_heart_rate: intervals.iter().map(|iv| iv.peak_heart_rate).max().unwrap_or(0),
        avg_peak_heart_rate: avg_peak_hr(intervals),
    }
}
