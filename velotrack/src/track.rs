use geo::LineString;
use serde::Serialize;

use velotrack_model::{field, BrouterFeature, BrouterResponse, PropertyValue, TrackMessage};

use crate::error::MessageFault;
use crate::tags::Tags;
use crate::{Error, Result};

/// Messages need every field up to and including the way tags.
pub const MIN_MESSAGE_FIELDS: usize = field::WAY_TAGS + 1;

/// One decoded track message
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TrackSample {
    /// Meters from the start of the track, accumulated from the per-message distances
    pub distance_from_start: f64,
    /// Meters covered by this message alone
    pub segment_distance: f64,
    pub elevation: f64,
    pub way_tags: Tags,
    pub node_tags: Tags,
}

/// A decoded BRouter response. Rebuilt from scratch for every response; nothing is cached.
#[derive(Clone, Debug)]
pub struct Track {
    pub line: LineString,
    /// The routing engine's own length, used as the denominator everywhere
    pub track_length: f64,
    pub filtered_ascent: Option<f64>,
    pub plain_ascent: Option<f64>,
    pub total_time_seconds: Option<f64>,
    pub total_energy: Option<f64>,
    /// The routing engine's cost for the whole track, in its own units
    pub cost: Option<f64>,
    pub samples: Vec<TrackSample>,
}

impl Track {
    pub fn from_response(response: &BrouterResponse) -> Result<Track> {
        let feature = single_feature(response)?;
        let track_length = optional_number("track-length", &feature.track_length)?.ok_or(
            Error::MalformedProperty {
                name: "track-length",
                value: "missing".to_string(),
            },
        )?;

        Ok(Track {
            line: feature.geometry.clone(),
            track_length,
            filtered_ascent: optional_number("filtered ascend", &feature.filtered_ascend)?,
            plain_ascent: optional_number("plain-ascend", &feature.plain_ascend)?,
            total_time_seconds: optional_number("total-time", &feature.total_time)?,
            total_energy: optional_number("total-energy", &feature.total_energy)?,
            cost: optional_number("cost", &feature.cost)?,
            samples: decode_messages(&feature.messages)?,
        })
    }

    pub fn from_geojson_str(input: &str) -> Result<Track> {
        Track::from_response(&BrouterResponse::from_geojson_str(input)?)
    }
}

pub fn decode_track(response: &BrouterResponse) -> Result<Vec<TrackSample>> {
    decode_messages(&single_feature(response)?.messages)
}

/// Decodes every message after the header row. Any bad message fails the whole decode.
pub fn decode_messages(messages: &[TrackMessage]) -> Result<Vec<TrackSample>> {
    let mut samples = Vec::with_capacity(messages.len().saturating_sub(1));
    let mut distance_from_start = 0.0;

    for (index, message) in messages.iter().enumerate().skip(1) {
        let sample = decode_message(message, &mut distance_from_start).map_err(|fault| {
            log::warn!("Rejecting track message {index}: {fault}");
            Error::MalformedMessage { index, fault }
        })?;
        samples.push(sample);
    }
    Ok(samples)
}

fn decode_message(
    message: &TrackMessage,
    distance_from_start: &mut f64,
) -> Result<TrackSample, MessageFault> {
    if message.len() < MIN_MESSAGE_FIELDS {
        return Err(MessageFault::TooFewFields {
            got: message.len(),
            need: MIN_MESSAGE_FIELDS,
        });
    }

    let elevation = parse_number("elevation", &message[field::ELEVATION])?;
    let segment_distance = parse_number("distance", &message[field::DISTANCE])?;
    *distance_from_start += segment_distance;

    Ok(TrackSample {
        distance_from_start: *distance_from_start,
        segment_distance,
        elevation,
        way_tags: Tags::parse(&message[field::WAY_TAGS]),
        node_tags: message
            .get(field::NODE_TAGS)
            .map(|raw| Tags::parse(raw))
            .unwrap_or_default(),
    })
}

/// Explicit parsing: blanks, garbage and non-finite values are errors, never zero.
fn parse_number(field: &'static str, raw: &str) -> Result<f64, MessageFault> {
    match raw.trim().parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(MessageFault::NotANumber {
            field,
            value: raw.to_string(),
        }),
    }
}

fn optional_number(name: &'static str, value: &Option<PropertyValue>) -> Result<Option<f64>> {
    match value {
        None => Ok(None),
        Some(value) => match value.as_f64() {
            Some(x) if x.is_finite() => Ok(Some(x)),
            _ => Err(Error::MalformedProperty {
                name,
                value: value.to_string(),
            }),
        },
    }
}

fn single_feature(response: &BrouterResponse) -> Result<&BrouterFeature> {
    match response.features.as_slice() {
        [feature] => Ok(feature),
        features => Err(Error::NotASingleTrack {
            features: features.len(),
        }),
    }
}
