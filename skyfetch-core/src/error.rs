use reqwest::StatusCode;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid city name.";
pub const SHORT_QUERY_MESSAGE: &str = "City name is too short.";
pub const NOT_FOUND_MESSAGE: &str = "City not found. Please check spelling.";
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Everything that can go wrong between a raw search box value and a rendered result.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{}", EMPTY_QUERY_MESSAGE)]
    EmptyQuery,

    #[error("{}", SHORT_QUERY_MESSAGE)]
    QueryTooShort,

    #[error("no weather data for city '{0}'")]
    NotFound(String),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to reach weather service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response is missing {0}")]
    Incomplete(&'static str),
}

impl WeatherError {
    /// The message shown to the user in place of the results.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            WeatherError::QueryTooShort => SHORT_QUERY_MESSAGE,
            WeatherError::NotFound(_) => NOT_FOUND_MESSAGE,
            WeatherError::Status { .. }
            | WeatherError::Request(_)
            | WeatherError::Parse(_)
            | WeatherError::Incomplete(_) => GENERIC_MESSAGE,
        }
    }

    /// True for errors raised before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, WeatherError::EmptyQuery | WeatherError::QueryTooShort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_dedicated_message() {
        let err = WeatherError::NotFound("Atlantis".into());
        assert_eq!(err.user_message(), "City not found. Please check spelling.");
        assert!(!err.is_validation());
    }

    #[test]
    fn other_failures_share_generic_message() {
        let status = WeatherError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "oops".into(),
        };
        let missing = WeatherError::Incomplete("weather[0]");
        let parse = WeatherError::Parse(serde_json::from_str::<u8>("nope").unwrap_err());

        for err in [status, missing, parse] {
            assert_eq!(err.user_message(), "Something went wrong. Please try again.");
        }
    }

    #[test]
    fn validation_errors_display_their_message() {
        assert_eq!(WeatherError::EmptyQuery.to_string(), EMPTY_QUERY_MESSAGE);
        assert_eq!(WeatherError::QueryTooShort.to_string(), SHORT_QUERY_MESSAGE);
        assert!(WeatherError::QueryTooShort.is_validation());
    }
}
