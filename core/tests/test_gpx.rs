use chrono::{TimeZone, Utc};
use intervalsplit_core::{parse_gpx_str, read_gpx_file, segment, GpxError, IntervalLabel, SegmentError, IntervalError};

const HEAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="Garmin Connect" xmlns="http://www.topografix.com/GPX/1/1"
     xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">
  <metadata><time>2023-06-01T06:59:00Z</time></metadata>
"#;

fn trkpt(lat: f64, lon: f64, time: &str, hr: Option<u32>, speed: Option<f64>) -> String {
    let mut ext = String::new();
    if hr.is_some() || speed.is_some() {
        ext.push_str("<extensions><gpxtpx:TrackPointExtension>");
        if let Some(h) = hr {
            ext.push_str(&format!("<gpxtpx:hr>{h}</gpxtpx:hr>"));
        }
        if let Some(s) = speed {
            ext.push_str(&format!("<gpxtpx:speed>{s}</gpxtpx:speed>"));
        }
        ext.push_str("</gpxtpx:TrackPointExtension></extensions>");
    }
    format!(r#"<trkpt lat="{lat}" lon="{lon}"><ele>12.4</ele><time>{time}</time>{ext}</trkpt>"#)
}

fn doc(body: &str) -> String {
    format!("{HEAD}{body}</gpx>")
}

#[test]
fn reads_points_with_extensions() {
    let body = format!(
        "<trk><name>Intervaller</name><trkseg>{}{}</trkseg></trk>",
        trkpt(59.91, 10.75, "2023-06-01T07:00:00Z", Some(121), Some(3.4)),
        trkpt(59.911, 10.751, "2023-06-01T07:00:05Z", None, None),
    );
    let pts = parse_gpx_str(&doc(&body)).unwrap();

    assert_eq!(pts.len(), 2);
    assert_eq!(pts[0].latitude, 59.91);
    assert_eq!(pts[0].longitude, 10.75);
    assert_eq!(pts[0].timestamp, Some(Utc.with_ymd_and_hms(2023, 6, 1, 7, 0, 0).unwrap()));
    assert_eq!(pts[0].heart_rate, Some(121));
    assert_eq!(pts[0].speed_ms, Some(3.4));
    assert_eq!(pts[1].heart_rate, None);
    assert_eq!(pts[1].speed_ms, None);
}

#[test]
fn flattens_tracks_and_segments_in_document_order() {
    let body = format!(
        "<trk><trkseg>{}{}</trkseg><trkseg>{}</trkseg></trk><trk><trkseg>{}</trkseg></trk>",
        trkpt(1.0, 1.0, "2023-06-01T07:00:00Z", None, None),
        trkpt(2.0, 2.0, "2023-06-01T07:00:01Z", None, None),
        trkpt(3.0, 3.0, "2023-06-01T07:00:02Z", None, None),
        trkpt(4.0, 4.0, "2023-06-01T07:00:03Z", None, None),
    );
    let pts = parse_gpx_str(&doc(&body)).unwrap();
    let lats: Vec<f64> = pts.iter().map(|p| p.latitude).collect();
    assert_eq!(lats, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn ignores_waypoints_and_route_points() {
    let body = format!(
        r#"<wpt lat="5.0" lon="5.0"><time>2023-06-01T06:00:00Z</time></wpt>
           <rte><rtept lat="6.0" lon="6.0"/></rte>
           <trk><trkseg>{}</trkseg></trk>"#,
        trkpt(1.0, 1.0, "2023-06-01T07:00:00Z", None, None),
    );
    let pts = parse_gpx_str(&doc(&body)).unwrap();
    assert_eq!(pts.len(), 1);
    assert_eq!(pts[0].latitude, 1.0);
}

#[test]
fn bad_timestamp_reports_index() {
    let body = format!(
        "<trk><trkseg>{}{}</trkseg></trk>",
        trkpt(1.0, 1.0, "2023-06-01T07:00:00Z", None, None),
        trkpt(1.0, 1.1, "01.06.2023 07:00", None, None),
    );
    match parse_gpx_str(&doc(&body)) {
        Err(GpxError::BadTimestamp { index, value }) => {
            assert_eq!(index, 1);
            assert_eq!(value, "01.06.2023 07:00");
        }
        other => panic!("forventet BadTimestamp, fikk {other:?}"),
    }
}

#[test]
fn bad_coordinate_reports_index_and_attr() {
    let body = r#"<trk><trkseg><trkpt lat="59.0" lon="øst"><time>2023-06-01T07:00:00Z</time></trkpt></trkseg></trk>"#;
    match parse_gpx_str(&doc(body)) {
        Err(GpxError::BadCoordinate { index, attr }) => {
            assert_eq!(index, 0);
            assert_eq!(attr, "lon");
        }
        other => panic!("forventet BadCoordinate, fikk {other:?}"),
    }
}

#[test]
fn missing_time_surfaces_in_segmenter() {
    let body = format!(
        r#"<trk><trkseg>{}<trkpt lat="1.0" lon="1.001"></trkpt>{}</trkseg></trk>"#,
        trkpt(1.0, 1.0, "2023-06-01T07:00:00Z", None, None),
        trkpt(1.0, 1.002, "2023-06-01T07:00:02Z", None, None),
    );
    let pts = parse_gpx_str(&doc(&body)).unwrap();
    assert_eq!(pts[1].timestamp, None);

    let err = segment(&pts, 0.0, 50.0).unwrap_err();
    assert!(matches!(
        err,
        IntervalError::Segment(SegmentError::MissingTimestamp { index: 1 })
    ));
}

#[test]
fn bad_heart_rate_is_ignored_not_fatal() {
    let body = r#"<trk><trkseg><trkpt lat="1.0" lon="1.0"><time>2023-06-01T07:00:00Z</time>
        <extensions><gpxtpx:TrackPointExtension><gpxtpx:hr>n/a</gpxtpx:hr></gpxtpx:TrackPointExtension></extensions>
        </trkpt></trkseg></trk>"#;
    let pts = parse_gpx_str(&doc(body)).unwrap();
    assert_eq!(pts[0].heart_rate, None);
}

#[test]
fn malformed_xml_is_an_error() {
    let res = parse_gpx_str("<gpx><trk><trkseg><trkpt lat=\"1\" lon=\"1\"></trk></gpx>");
    assert!(matches!(res, Err(GpxError::Xml(_))));
}

#[test]
fn missing_file_error_carries_path() {
    let err = read_gpx_file("finnes/ikke.gpx").unwrap_err();
    assert!(err.to_string().contains("finnes/ikke.gpx"), "{err}");
}

#[test]
fn file_roundtrip_through_segmenter() {
    // 10 punkter, 0.001° nordover (~111 m) hvert 30. sekund
    let mut body = String::from("<trk><trkseg>");
    for i in 0..10 {
        let t = Utc.with_ymd_and_hms(2023, 6, 1, 7, 0, 0).unwrap() + chrono::Duration::seconds(30 * i);
        body.push_str(&trkpt(
            59.0 + i as f64 * 0.001,
            10.0,
            &t.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            Some(150 + i as u32),
            None,
        ));
    }
    body.push_str("</trkseg></trk>");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("okt.gpx");
    std::fs::write(&path, doc(&body)).unwrap();

    let pts = read_gpx_file(&path).unwrap();
    assert_eq!(pts.len(), 10);
    let out = segment(&pts, 200.0, 300.0).unwrap();
    assert_eq!(out[0].label, IntervalLabel::WarmUp);
    assert!(out.iter().all(|iv| iv.peak_heart_rate >= 150));
}
