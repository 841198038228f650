use chrono::{TimeZone, Utc};
use geo::{LineString, Point};
use serde_json::json;

use crate::chart::*;
use crate::classify::{CAR_FREE, SURFACE, TRAFFIC, UNKNOWN_COLOR};
use crate::geometry::*;
use crate::insert::*;
use crate::metrics::*;
use crate::routing::*;
use crate::track::*;
use crate::weather::*;
use crate::*;

const SHORT_TRACK: &str = include_str!("../fixtures/short_track.geojson");

fn pt(lon: f64, lat: f64) -> Coordinate {
    Coordinate::new(lon, lat)
}

fn lonlats(route: &[Coordinate]) -> Vec<(f64, f64)> {
    route.iter().map(|x| (x.lon, x.lat)).collect()
}

// One message row with everything but elevation, distance and way tags zeroed
fn row(elevation: &str, distance: &str, way_tags: &str) -> TrackMessage {
    let mut msg: Vec<String> = vec!["0"; 13].into_iter().map(String::from).collect();
    msg[2] = elevation.to_string();
    msg[3] = distance.to_string();
    msg[9] = way_tags.to_string();
    msg[10] = String::new();
    msg
}

fn header() -> TrackMessage {
    [
        "Longitude",
        "Latitude",
        "Elevation",
        "Distance",
        "CostPerKm",
        "ElevCost",
        "TurnCost",
        "NodeCost",
        "InitialCost",
        "WayTags",
        "NodeTags",
        "Time",
        "Energy",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn decode_rows(rows: Vec<TrackMessage>) -> Vec<TrackSample> {
    let mut messages = vec![header()];
    messages.extend(rows);
    decode_messages(&messages).unwrap()
}

fn response(messages: Vec<TrackMessage>, track_length: serde_json::Value) -> String {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "track-length": track_length,
                "filtered ascend": "12",
                "messages": messages,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [[13.4, 52.0], [13.4, 52.1]],
            },
        }],
    })
    .to_string()
}

fn forecast(temp: f64) -> String {
    json!({
        "latitude": 52.5,
        "longitude": 13.4,
        "hourly_units": {
            "time": "iso8601",
            "temperature_2m": "°C",
            "wind_speed_10m": "km/h",
            "wind_direction_10m": "°",
            "precipitation": "mm",
            "precipitation_probability": "%",
            "cloud_cover": "%",
        },
        "hourly": {
            "time": ["2024-05-01T10:00", "2024-05-01T11:00"],
            "temperature_2m": [temp, 20.0],
            "wind_speed_10m": [12.5, 10.0],
            "wind_direction_10m": [270.0, 260.0],
            "precipitation": [0.0, 0.4],
            "precipitation_probability": [40.0, 60.0],
            "cloud_cover": [75.0, 80.0],
        },
    })
    .to_string()
}

#[test]
fn test_scale() {
    assert_eq!(scale(50.0, 0.0, 100.0, 0.0, 20.0), 10.0);
    assert_eq!(scale(0.0, 0.0, 100.0, 20.0, 0.0), 20.0);
    assert_eq!(scale(-5.0, -10.0, 0.0, 0.0, 100.0), 50.0);
    // Degenerate input ranges don't panic
    assert!(scale(3.0, 7.0, 7.0, 0.0, 20.0).is_nan());
}

#[test]
fn test_insert_into_short_routes() {
    let candidate = pt(13.4, 52.5);
    assert_eq!(insert_point(candidate.clone(), &[]).unwrap(), vec![candidate.clone()]);

    let route = vec![pt(13.3, 52.4)];
    assert_eq!(
        insert_point(candidate.clone(), &route).unwrap(),
        vec![pt(13.3, 52.4), candidate]
    );
}

#[test]
fn test_insert_between_neighbors() {
    let route = vec![pt(13.4, 52.0), pt(13.4, 52.1), pt(13.4, 52.2), pt(13.4, 52.3)];
    // Midpoints of each pair, on and slightly off the line
    for i in 0..3 {
        let lat = route[i].lat + 0.05;
        for lon in [13.4, 13.401, 13.399] {
            assert_eq!(insertion_index(&pt(lon, lat), &route).unwrap(), i + 1);
        }
    }
}

#[test]
fn test_insert_regression_near_start() {
    let route = vec![
        pt(13.325, 52.492),
        pt(13.467, 52.550),
        pt(13.470, 52.510),
        pt(13.496, 52.499),
    ];
    let result = insert_point(pt(13.487, 52.534), &route).unwrap();
    assert_eq!(
        lonlats(&result),
        vec![
            (13.325, 52.492),
            (13.467, 52.550),
            (13.487, 52.534),
            (13.470, 52.510),
            (13.496, 52.499),
        ]
    );
    // The input is a snapshot and stays untouched
    assert_eq!(route.len(), 4);
}

#[test]
fn test_insert_past_the_end_appends() {
    let route = vec![pt(13.4, 52.0), pt(13.4, 52.1), pt(13.401, 52.2)];
    let result = insert_point(pt(13.402, 52.3), &route).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(result[3], pt(13.402, 52.3));
}

#[test]
fn test_insert_tie_goes_after_existing_point() {
    let route = vec![pt(13.4, 52.0), pt(13.4, 52.1), pt(13.4, 52.2)];
    let candidate = pt(13.4, 52.1).with_label("cafe");
    let result = insert_point(candidate.clone(), &route).unwrap();
    assert_eq!(result[1], pt(13.4, 52.1));
    assert_eq!(result[2], candidate);

    // Before the start projects onto the first point, so it also lands after it
    assert_eq!(insertion_index(&pt(13.4, 51.9), &route).unwrap(), 1);
}

#[test]
fn test_insert_with_duplicate_anchor() {
    // Duplicated anchors aren't special-cased. Both copies project to 0, so a candidate further
    // along lands after them.
    let route = vec![pt(13.4, 52.0), pt(13.4, 52.0), pt(13.4, 52.2)];
    assert_eq!(insertion_index(&pt(13.4, 52.1), &route).unwrap(), 2);
    assert_eq!(insertion_index(&pt(13.4, 52.0), &route).unwrap(), 2);
}

#[test]
fn test_insert_keeps_labels_and_flags() {
    let route = vec![pt(13.4, 52.0).with_label("home"), pt(13.4, 52.2).direct()];
    let result = insert_point(pt(13.4, 52.1).direct(), &route).unwrap();
    assert_eq!(result[0].label.as_deref(), Some("home"));
    assert!(result[1].direct);
    assert!(result[2].direct);
}

#[test]
fn test_nearest_point_location() {
    let line = LineString::from(vec![(13.4, 52.0), (13.4, 52.1), (13.4, 52.2)]);
    let total = line_length(&line).unwrap();
    // About 111km per degree of latitude
    assert!((total - 22_239.0).abs() < 10.0);

    let nearest = nearest_point_on_line(&line, Point::new(13.41, 52.15)).unwrap();
    assert_eq!(nearest.segment, 1);
    assert!((nearest.point.y() - 52.15).abs() < 1e-9);
    assert!((nearest.location - total * 0.75).abs() < 1.0);
}

#[test]
fn test_decode_fixture() {
    let response = BrouterResponse::from_geojson_str(SHORT_TRACK).unwrap();
    let samples = decode_track(&response).unwrap();
    assert_eq!(samples.len(), 4);
    assert_eq!(
        response.features[0].geometry.0.len(),
        response.features[0].messages.len() - 1
    );

    let distances: Vec<f64> = samples.iter().map(|x| x.distance_from_start).collect();
    assert_eq!(distances, vec![120.0, 200.0, 400.0, 500.0]);
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));

    assert_eq!(samples[2].elevation, 31.0);
    assert_eq!(samples[2].segment_distance, 200.0);
    assert_eq!(samples[2].way_tags.get("maxspeed"), Some("50"));
    assert!(samples[2].node_tags.is("crossing", "traffic_signals"));
    assert!(samples[0].node_tags.is_empty());
}

#[test]
fn test_decode_header_only() {
    assert!(decode_messages(&[header()]).unwrap().is_empty());
    assert!(decode_messages(&[]).unwrap().is_empty());
}

#[test]
fn test_decode_rejects_short_messages() {
    let mut short = row("10", "5", "highway=path");
    short.truncate(9);
    let messages = vec![header(), row("10", "5", "highway=path"), short];
    match decode_messages(&messages) {
        Err(Error::MalformedMessage { index, fault }) => {
            assert_eq!(index, 2);
            assert_eq!(fault, MessageFault::TooFewFields { got: 9, need: 10 });
        }
        other => panic!("expected a malformed message, got {other:?}"),
    }

    // Exactly 10 fields is enough; node tags are optional
    let mut minimal = row("10", "5", "highway=path");
    minimal.truncate(10);
    let samples = decode_messages(&[header(), minimal]).unwrap();
    assert!(samples[0].node_tags.is_empty());
}

#[test]
fn test_decode_never_coerces_numbers() {
    for (elevation, distance) in [("abc", "5"), ("10", ""), ("10", "NaN"), ("inf", "5")] {
        let messages = vec![header(), row(elevation, distance, "")];
        assert!(matches!(
            decode_messages(&messages),
            Err(Error::MalformedMessage {
                index: 1,
                fault: MessageFault::NotANumber { .. }
            })
        ));
    }

    let samples = decode_rows(vec![row(" 12.5 ", "-0", "")]);
    assert_eq!(samples[0].elevation, 12.5);
}

#[test]
fn test_track_properties() {
    let track = Track::from_geojson_str(SHORT_TRACK).unwrap();
    assert_eq!(track.track_length, 503.0);
    assert_eq!(track.filtered_ascent, Some(5.0));
    assert_eq!(track.plain_ascent, Some(-1.0));
    assert_eq!(track.total_time_seconds, Some(244.0));
    assert_eq!(track.total_energy, Some(16000.0));
    assert_eq!(track.cost, Some(612.0));
    assert_eq!(track.line.0.len(), 4);
    // Accumulated sample distance only approximates the authoritative length
    assert_eq!(track.samples.last().unwrap().distance_from_start, 500.0);

    // Plain numbers are accepted too
    let track = Track::from_geojson_str(&response(vec![header()], json!(1234.5))).unwrap();
    assert_eq!(track.track_length, 1234.5);
    assert_eq!(track.cost, None);
}

#[test]
fn test_track_bad_properties() {
    let bad_length = response(vec![header()], json!("twelve"));
    assert!(matches!(
        Track::from_geojson_str(&bad_length),
        Err(Error::MalformedProperty {
            name: "track-length",
            ..
        })
    ));

    let no_features = json!({"type": "FeatureCollection", "features": []}).to_string();
    assert!(matches!(
        Track::from_geojson_str(&no_features),
        Err(Error::NotASingleTrack { features: 0 })
    ));
}

#[test]
fn test_min_max_elevation() {
    let samples = decode_rows(vec![row("34", "1", ""), row("12.5", "1", ""), row("80", "1", "")]);
    assert_eq!(min_elevation(&samples), 12.5);
    assert_eq!(max_elevation(&samples), 80.0);

    assert_eq!(min_elevation(&[]), f64::INFINITY);
    assert_eq!(max_elevation(&[]), 0.0);
}

#[test]
fn test_max_elevation_floors_at_zero() {
    // Below sea level everywhere; the maximum reports 0, not -3
    let samples = decode_rows(vec![row("-7", "1", ""), row("-3", "1", ""), row("-12", "1", "")]);
    assert_eq!(min_elevation(&samples), -12.0);
    assert_eq!(max_elevation(&samples), 0.0);
}

#[test]
fn test_distance_by_surface() {
    let samples = decode_rows(vec![
        row("0", "100", "surface=asphalt"),
        row("0", "40", "surface=gravel"),
        row("0", "60", "surface=asphalt"),
        row("0", "25", "surface=gravel"),
        row("0", "30", "highway=path"),
        row("0", "5", "surface=moon_dust"),
    ]);
    let result = distance_by_classification(&samples, &SURFACE, 270.0);
    assert_eq!(result.get("paved"), 160.0);
    assert_eq!(result.get("unpaved"), 65.0);
    assert_eq!(result.get("cobblestone"), 0.0);
    assert_eq!(result.classified(), 225.0);
    assert_eq!(result.unknown, 270.0 - 160.0 - 65.0);
    // Every category of the table gets a row, even when nothing falls into it
    assert_eq!(
        result.totals.keys().copied().collect::<Vec<_>>(),
        vec!["cobblestone", "paved", "unpaved"]
    );
}

#[test]
fn test_summary_of_fixture() {
    let track = Track::from_geojson_str(SHORT_TRACK).unwrap();
    let summary = TrackSummary::new(&track);
    assert_eq!(summary.min_elevation, Some(31.0));
    assert_eq!(summary.max_elevation, Some(36.0));
    assert_eq!(summary.cost, Some(612.0));
    assert_eq!(summary.surface.get("paved"), 320.0);
    assert_eq!(summary.surface.get("unpaved"), 80.0);
    assert_eq!(summary.surface.unknown, 103.0);
    assert_eq!(summary.traffic.get("low"), 120.0);
    assert_eq!(summary.traffic.get("car-free"), 180.0);
    assert_eq!(summary.traffic.get("high"), 200.0);
    assert_eq!(summary.traffic.unknown, 3.0);
}

#[test]
fn test_pixel_round_trip() {
    let track_length = 48_213.7;
    let width = 637.0;
    for step in 0..=100 {
        let d = track_length * step as f64 / 100.0;
        let px = distance_to_pixel(d, track_length, width);
        assert!((pixel_offset_to_distance(px, track_length, width) - d).abs() < 1e-6);
    }
    assert!((distance_to_pixel(track_length, track_length, width) - width).abs() < 1e-9);

    // Degenerate tracks and canvases stay at the origin
    assert_eq!(distance_to_pixel(10.0, 0.0, width), 0.0);
    assert_eq!(pixel_offset_to_distance(10.0, track_length, 0.0), 0.0);
}

#[test]
fn test_elevation_chart() {
    let samples = decode_rows(vec![
        row("10", "100", ""),
        row("20", "100", ""),
        row("15", "100", ""),
    ]);
    let points = elevation_chart(&samples, 300.0, 600.0, 100.0);
    assert_eq!(
        points,
        vec![
            ChartPoint { x: 200.0, y: 100.0 },
            ChartPoint { x: 400.0, y: 0.0 },
            ChartPoint { x: 600.0, y: 50.0 },
        ]
    );

    // A flat profile draws through the middle
    let flat = decode_rows(vec![row("5", "10", ""), row("5", "10", "")]);
    let points = elevation_chart(&flat, 20.0, 100.0, 80.0);
    assert!(points.iter().all(|x| x.y == 40.0));

    // Below sea level the top of the chart stays at 0 m, so the highest sample isn't at y = 0
    let sunken = decode_rows(vec![row("-10", "100", ""), row("-20", "100", "")]);
    let points = elevation_chart(&sunken, 200.0, 200.0, 100.0);
    assert_eq!(
        points,
        vec![
            ChartPoint { x: 100.0, y: 50.0 },
            ChartPoint { x: 200.0, y: 100.0 },
        ]
    );
}

#[test]
fn test_classification_spans_merge() {
    let samples = decode_rows(vec![
        row("0", "100", "highway=residential"),
        row("0", "100", "highway=service"),
        row("0", "100", "highway=primary"),
        row("0", "100", "highway=unknown_kind"),
        row("0", "100", "surface=asphalt"),
        row("0", "100", "highway=cycleway"),
    ]);
    let spans = classification_spans(&samples, &TRAFFIC, 600.0, 60.0);
    let summary: Vec<(f64, f64, Option<&str>)> = spans
        .iter()
        .map(|x| (x.start_x, x.end_x, x.category.map(|c| c.name)))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0.0, 20.0, Some("low")),
            (20.0, 30.0, Some("high")),
            (30.0, 50.0, None),
            (50.0, 60.0, Some("car-free")),
        ]
    );
    assert_eq!(spans[2].color, UNKNOWN_COLOR);
    assert_eq!(spans[3].color, CAR_FREE.color);
}

#[test]
fn test_pixel_to_coordinate() {
    let track = Track::from_geojson_str(SHORT_TRACK).unwrap();
    let width = 400.0;
    let start = coordinate_at_pixel(&track.line, 0.0, track.track_length, width).unwrap();
    assert_eq!(start, Point::new(13.3267, 52.492));
    let end = coordinate_at_pixel(&track.line, width, track.track_length, width).unwrap();
    let last = track.line.0[3];
    // The line is a bit shorter than the reported length, so the end clamps
    assert!(line_length(&track.line).unwrap() < track.track_length);
    assert_eq!(end, Point::from(last));

    assert_eq!(
        sample_at_distance(&track.samples, 150.0).map(|x| x.elevation),
        Some(36.0)
    );
    assert_eq!(
        sample_at_distance(&track.samples, 9000.0).map(|x| x.elevation),
        Some(33.0)
    );
    assert!(sample_at_distance(&[], 0.0).is_none());
}

#[test]
fn test_weather_sample_points() {
    let line = LineString::from(vec![(13.4, 52.0), (13.4, 52.1), (13.4, 52.2)]);
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    let points = weather_sample_points(&line, 22_000.0, 10_000.0, start).unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(
        points.iter().map(|x| x.distance).collect::<Vec<_>>(),
        vec![10_000.0, 20_000.0, 22_000.0]
    );
    assert_eq!(
        points[0].arrival,
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
    );
    assert_eq!(
        points[2].arrival,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    );
    assert!((points[0].lat - 52.0899).abs() < 1e-3);
    assert_eq!(points[0].lon, 13.4);

    // An exact multiple doesn't add an extra point
    assert_eq!(
        weather_sample_points(&line, 20_000.0, 10_000.0, start)
            .unwrap()
            .len(),
        2
    );
    assert!(weather_sample_points(&line, 0.0, 10_000.0, start)
        .unwrap()
        .is_empty());
    assert!(weather_sample_points(&line, 100.0, 0.0, start)
        .unwrap()
        .is_empty());
}

#[test]
fn test_weather_sample_points_refuses_tiny_pace() {
    let line = LineString::from(vec![(13.4, 52.0), (13.4, 52.1)]);
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
    assert!(matches!(
        weather_sample_points(&line, 11_000.0, 1e-300, start),
        Err(Error::Weather(_))
    ));
    assert!(matches!(
        weather_sample_points(&line, f64::INFINITY, 15_000.0, start),
        Err(Error::Weather(_))
    ));

    let at_cap = 11_000.0 / MAX_WEATHER_POINTS as f64;
    assert_eq!(
        weather_sample_points(&line, 11_000.0, at_cap, start)
            .unwrap()
            .len(),
        MAX_WEATHER_POINTS
    );
}

#[test]
fn test_weather_request() {
    let arrival = Utc.with_ymd_and_hms(2024, 5, 1, 10, 47, 12).unwrap();
    let request = WeatherRequest::at(Point::new(13.4, 52.5), arrival).unwrap();
    assert_eq!(request.hour, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());
    assert_eq!(
        request.url("https://api.open-meteo.com/v1/forecast"),
        "https://api.open-meteo.com/v1/forecast?latitude=52.50000&longitude=13.40000\
         &hourly=temperature_2m%2Cwind_speed_10m%2Cwind_direction_10m%2Cprecipitation%2C\
         precipitation_probability%2Ccloud_cover&start_hour=2024-05-01T10%3A00\
         &end_hour=2024-05-01T10%3A00&timezone=GMT"
    );
}

#[test]
fn test_parse_forecast() {
    let datum = parse_forecast(&forecast(3.2)).unwrap();
    assert_eq!(datum.values.temp, 3.2);
    assert_eq!(datum.formatted.temp, "3.2°C");
    assert_eq!(datum.formatted.wind_speed, "12.5km/h");
    assert_eq!(datum.formatted.wind_direction, "270°");
    assert_eq!(datum.formatted.precip_mm, "0mm");
    assert_eq!(datum.formatted.precip_percentage, "40%");
    assert_eq!(datum.value(WeatherMetric::CloudCover), 75.0);

    let mut body: serde_json::Value = serde_json::from_str(&forecast(3.2)).unwrap();
    body["hourly"]["temperature_2m"] = json!([null, 4.0]);
    assert!(matches!(
        parse_forecast(&body.to_string()),
        Err(Error::Weather(_))
    ));
    assert!(matches!(parse_forecast("not json"), Err(Error::Json(_))));
}

#[test]
fn test_weather_batch_is_all_or_nothing() {
    let ok = gather_forecasts(vec![
        parse_forecast(&forecast(3.2)),
        parse_forecast(&forecast(5.6)),
    ])
    .unwrap();
    assert_eq!(ok.len(), 2);

    let result = gather_forecasts(vec![
        parse_forecast(&forecast(3.2)),
        parse_forecast("{}"),
        parse_forecast(&forecast(5.6)),
    ]);
    assert!(matches!(
        result,
        Err(Error::WeatherBatch {
            failed: 1,
            total: 3
        })
    ));
}

#[test]
fn test_min_max_weather_value() {
    let data: Vec<WeatherDatum> = [3.2, 5.6, 5.6]
        .into_iter()
        .map(|temp| parse_forecast(&forecast(temp)).unwrap())
        .collect();
    assert_eq!(
        min_max_weather_value(&data, WeatherMetric::Temp),
        Some(("3.2°C".to_string(), "5.6°C".to_string()))
    );
    assert_eq!(min_max_weather_value(&[], WeatherMetric::Temp), None);
}

#[test]
fn test_weather_chart() {
    let points: Vec<WeatherPoint> = [100.0, 200.0]
        .into_iter()
        .map(|distance| WeatherPoint {
            distance,
            lon: 13.4,
            lat: 52.5,
            arrival: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        })
        .collect();
    let data: Vec<WeatherDatum> = [3.0, 9.0]
        .into_iter()
        .map(|temp| parse_forecast(&forecast(temp)).unwrap())
        .collect();
    let chart = weather_chart(&points, &data, WeatherMetric::Temp, 200.0, 50.0, 30.0);
    assert_eq!(
        chart,
        vec![ChartPoint { x: 25.0, y: 30.0 }, ChartPoint { x: 50.0, y: 0.0 }]
    );

    // Same wind everywhere is drawn flat
    let chart = weather_chart(&points, &data, WeatherMetric::WindSpeed, 200.0, 50.0, 30.0);
    assert!(chart.iter().all(|x| x.y == 15.0));
}

#[test]
fn test_route_request() {
    let request = RouteRequest {
        points: vec![
            pt(13.325, 52.492).with_label("Start"),
            pt(13.467, 52.55).direct(),
            pt(13.496, 52.499),
        ],
        profile: Profile::FastBikeVeryLowTraffic,
        format: Format::GeoJson,
    };
    let pairs = request.query_pairs().unwrap();
    assert_eq!(
        pairs,
        vec![
            (
                "lonlats",
                "13.325000,52.492000|13.467000,52.550000|13.496000,52.499000".to_string()
            ),
            ("profile", "fastbike-verylowtraffic".to_string()),
            ("alternativeidx", "0".to_string()),
            ("format", "geojson".to_string()),
            ("straight", "1".to_string()),
            ("pois", "13.325000,52.492000,Start".to_string()),
        ]
    );

    let url = request.url("https://brouter.de/brouter").unwrap();
    assert!(url.starts_with(
        "https://brouter.de/brouter?lonlats=13.325000%2C52.492000%7C13.467000%2C52.550000"
    ));
    assert!(url.ends_with("&straight=1&pois=13.325000%2C52.492000%2CStart"));

    let single = RouteRequest {
        points: vec![pt(13.4, 52.5)],
        profile: Profile::Gravel,
        format: Format::Gpx,
    };
    assert!(matches!(
        single.url("https://brouter.de/brouter"),
        Err(Error::InsufficientPoints { got: 1 })
    ));
}

#[test]
fn test_route_url_encodes_labels() {
    let request = RouteRequest {
        points: vec![
            pt(13.325, 52.492).with_label("Kaffee & Kuchen|Ecke"),
            pt(13.496, 52.499),
        ],
        profile: Profile::Trekking,
        format: Format::GeoJson,
    };
    let url = request.url("https://brouter.de/brouter").unwrap();
    let (_, query) = url.split_once('?').unwrap();
    let keys: Vec<&str> = query
        .split('&')
        .map(|pair| pair.split_once('=').unwrap().0)
        .collect();
    assert_eq!(
        keys,
        vec!["lonlats", "profile", "alternativeidx", "format", "pois"]
    );
    assert!(query.ends_with("&pois=13.325000%2C52.492000%2CKaffee+%26+Kuchen%7CEcke"));

    let decoded: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();
    assert_eq!(
        decoded[4],
        (
            "pois".to_string(),
            "13.325000,52.492000,Kaffee & Kuchen|Ecke".to_string()
        )
    );
}

#[test]
fn test_coordinate_serde() {
    let route: Vec<Coordinate> =
        serde_json::from_str(r#"[[13.4, 52.5, "", false], [13.5, 52.6, "Cafe", true]]"#)
            .unwrap();
    assert_eq!(route[0], pt(13.4, 52.5));
    assert_eq!(route[1], pt(13.5, 52.6).with_label("Cafe").direct());
    assert_eq!(
        serde_json::to_value(&route[1]).unwrap(),
        json!([13.5, 52.6, "Cafe", true])
    );

    let request: RouteRequest = serde_json::from_value(json!({
        "points": [[13.4, 52.5, null, false]],
        "profile": "fast-bike",
    }))
    .unwrap();
    assert_eq!(request.profile, Profile::FastBike);
    assert_eq!(request.format, Format::GeoJson);
}

#[test]
fn test_config_defaults() {
    let config: Config = serde_json::from_str(r#"{"pace_meters_per_hour": 20000}"#).unwrap();
    assert_eq!(config.pace_meters_per_hour, 20_000.0);
    assert_eq!(config.profile, Profile::Trekking);
    assert_eq!(config.routing_url, Config::default().routing_url);
}
