use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use log::{info, warn};
use xml::reader::{EventReader, XmlEvent};

use crate::error::GpxError;
use crate::types::Trackpoint;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Punkt under oppbygging mens vi står inne i en <trkpt>.
struct PointBuilder {
    index: usize,
    latitude: f64,
    longitude: f64,
    timestamp: Option<DateTime<Utc>>,
    heart_rate: Option<u32>,
    speed_ms: Option<f64>,
}

impl PointBuilder {
    fn finish(self) -> Trackpoint {
        Trackpoint {
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
            heart_rate: self.heart_rate,
            speed_ms: self.speed_ms,
        }
    }
}

/// Leser alle trkpt i dokumentrekkefølge. Flere trk/trkseg flates ut.
/// rtept og wpt ignoreres.
pub fn read_gpx<R: Read>(reader: R) -> Result<Vec<Trackpoint>, GpxError> {
    let parser = EventReader::new(reader);
    let mut points = Vec::new();
    let mut current: Option<PointBuilder> = None;
    let mut text = String::new();

    for event in parser {
        match event? {
            XmlEvent::StartElement { name, attributes, .. } => {
                text.clear();
                if name.local_name == "trkpt" {
                    let index = points.len();
                    let attr = |key: &'static str| -> Result<f64, GpxError> {
                        attributes
                            .iter()
                            .find(|a| a.name.local_name == key)
                            .and_then(|a| a.value.trim().parse::<f64>().ok())
                            .filter(|v| v.is_finite())
                            .ok_or(GpxError::BadCoordinate { index, attr: key })
                    };
                    current = Some(PointBuilder {
                        index,
                        latitude: attr("lat")?,
                        longitude: attr("lon")?,
                        timestamp: None,
                        heart_rate: None,
                        speed_ms: None,
                    });
                }
            }
            XmlEvent::Characters(s) | XmlEvent::CData(s) => text.push_str(&s),
            XmlEvent::EndElement { name } => {
                if name.local_name == "trkpt" {
                    if let Some(done) = current.take() {
                        points.push(done.finish());
                    }
                    text.clear();
                    continue;
                }
                let Some(point) = current.as_mut() else { continue };
                match name.local_name.as_str() {
                    "time" => {
                        let t = parse_time(&text).ok_or_else(|| GpxError::BadTimestamp {
                            index: point.index,
                            value: text.trim().to_string(),
                        })?;
                        point.timestamp = Some(t);
                    }
                    "hr" => point.heart_rate = parse_hr(&text, point.index),
                    "speed" => point.speed_ms = parse_speed(&text, point.index),
                    _ => {}
                }
                text.clear();
            }
            _ => {}
        }
    }

    Ok(points)
}

pub fn read_gpx_file(path: impl AsRef<Path>) -> Result<Vec<Trackpoint>, GpxError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GpxError::Io { path: path.to_path_buf(), source })?;
    let points = read_gpx(BufReader::new(file))?;
    info!("📂 {} trackpunkter lest fra {}", points.len(), path.display());
    Ok(points)
}

pub fn parse_gpx_str(s: &str) -> Result<Vec<Trackpoint>, GpxError> {
    read_gpx(s.as_bytes())
}

/// `YYYY-MM-DDTHH:MM:SSZ`; andre RFC 3339-former godtas og kuttes til hele sekunder.
pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIME_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .and_then(|dt| dt.with_timezone(&Utc).with_nanosecond(0))
}

fn parse_hr(s: &str, index: usize) -> Option<u32> {
    let s = s.trim();
    let v = s
        .parse::<u32>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v.round() as u32));
    if v.is_none() {
        warn!("trackpunkt {index}: ugyldig puls {s:?}, ignoreres");
    }
    v
}

fn parse_speed(s: &str, index: usize) -> Option<f64> {
    let s = s.trim();
    let v = s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0);
    if v.is_none() {
        warn!("trackpunkt {index}: ugyldig fart {s:?}, ignoreres");
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn strict_time_format() {
        let t = parse_time("2023-06-01T07:15:30Z").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 6, 1, 7, 15, 30).unwrap());
    }

    #[test]
    fn rfc3339_fallback_truncates_fraction() {
        let t = parse_time("2023-06-01T09:15:30.750+02:00").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2023, 6, 1, 7, 15, 30).unwrap());
    }

    #[test]
    fn garbage_time_is_none() {
        assert!(parse_time("i går").is_none());
        assert!(parse_time("").is_none());
    }

    #[test]
    fn hr_accepts_decimal_text() {
        assert_eq!(parse_hr(" 151 ", 0), Some(151));
        assert_eq!(parse_hr("150.6", 0), Some(151));
        assert_eq!(parse_hr("abc", 0), None);
        assert_eq!(parse_hr("-4", 0), None);
    }
}
