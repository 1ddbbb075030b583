use thiserror::Error;

/// Failures of a dashboard search.
///
/// Every variant collapses into one user-facing string at the orchestration
/// boundary (see [`WeatherError::user_message`]); the payload keeps the
/// technical detail for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Search query is empty")]
    EmptyQuery,

    /// Geocoding returned no match for the query.
    #[error("No location found for '{0}'")]
    NotFound(String),

    /// Transport failure or non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// Payload could not be parsed or failed validation.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl WeatherError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::Malformed(message.into())
    }

    /// Message shown next to the (possibly stale) dashboard data.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => "Please enter a city name",
            WeatherError::NotFound(_) => "City not found",
            WeatherError::Network(_) => "Unable to reach the weather service",
            WeatherError::Malformed(_) => {
                "Received an unexpected response from the weather service"
            }
        }
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
