// --- RoundTo trait (offentlig, brukt av segmenter og rapport) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

pub const M_PER_KM: f64 = 1000.0;
pub const SECS_PER_MIN: i64 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_whole_meters() {
        assert_eq!(499.5_f64.round_to(0), 500.0);
        assert_eq!(499.49_f64.round_to(0), 499.0);
        assert!((1.23456_f64.round_to(2) - 1.23).abs() < 1e-12);
    }
}
