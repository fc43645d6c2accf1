use geo::{Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Hvilken jordmodell avstanden regnes på.
///
/// `Haversine` er kule-tilnærming (middelradius 6 371 008.8 m). `Geodesic`
/// er WGS-84-ellipsoiden (Karney), samme tall som geopy gir.
/// Forskjellen er noen promille og kan flytte hvilket punkt som krysser terskelen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModel {
    #[default]
    Haversine,
    Geodesic,
}

impl DistanceModel {
    /// Overflateavstand i meter mellom to (lat, lon)-par i grader.
    pub fn distance(self, a: (f64, f64), b: (f64, f64)) -> f64 {
        if a == b {
            return 0.0;
        }
        // geo bruker (x, y) = (lon, lat)
        let pa = Point::new(a.1, a.0);
        let pb = Point::new(b.1, b.0);
        let d = match self {
            DistanceModel::Haversine => Haversine::distance(pa, pb),
            DistanceModel::Geodesic => Geodesic::distance(pa, pb),
        };
        if d.is_finite() { d.max(0.0) } else { 0.0 }
    }
}

/// Haversine-avstand i meter.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    DistanceModel::Haversine.distance(a, b)
}
