use crate::units::{M_PER_KM, SECS_PER_MIN};

/// Vises når pace ikke kan beregnes (distanse 0).
pub const PACE_SENTINEL: &str = "--'--";

/// Sekunder som `MM'SS`. Minuttene kan gå over 99.
pub fn format_clock(seconds: i64) -> String {
    let s = seconds.max(0);
    format!("{:02}'{:02}", s / SECS_PER_MIN, s % SECS_PER_MIN)
}

/// Pace = tid per km, `MM'SS`. Rundes til hele sekunder før oppdeling,
/// så 59.6 s blir 01'00 og ikke 00'60.
pub fn format_pace(duration_seconds: f64, distance_meters: f64) -> String {
    match pace_seconds_per_km(duration_seconds, distance_meters) {
        Some(p) => format_clock(p.round() as i64),
        None => PACE_SENTINEL.to_string(),
    }
}

/// s/km, `None` når distansen er 0 eller tallene ikke er endelige.
pub fn pace_seconds_per_km(duration_seconds: f64, distance_meters: f64) -> Option<f64> {
    if !distance_meters.is_finite() || distance_meters <= 0.0 || !duration_seconds.is_finite() {
        return None;
    }
    Some(duration_seconds.max(0.0) / (distance_meters / M_PER_KM))
}
