use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("need at least 2 points, got {got}")]
    InsufficientPoints { got: usize },
    #[error("track message {index} is malformed: {fault}")]
    MalformedMessage { index: usize, fault: MessageFault },
    #[error("response property {name:?} is missing or not a number: {value}")]
    MalformedProperty { name: &'static str, value: String },
    #[error("expected exactly one LineString feature, got {features}")]
    NotASingleTrack { features: usize },
    #[error("bad weather forecast: {0}")]
    Weather(String),
    #[error("{failed} of {total} weather forecasts failed")]
    WeatherBatch { failed: usize, total: usize },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),
}

/// Why one track message was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MessageFault {
    #[error("has {got} fields, need at least {need}")]
    TooFewFields { got: usize, need: usize },
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}
