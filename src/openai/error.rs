use thiserror::Error;

/// Everything that can go wrong during a single chat turn.
///
/// The `Display` output of each variant is the text shown to the user
/// in place of an assistant reply, so callers that only want a string
/// can format the error directly.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Connection, DNS, TLS or body read failure. Treated the same as
    /// an empty response body.
    #[error("Failed to parse response")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response")]
    EmptyResponse,

    /// The body was not valid JSON.
    #[error("Failed to parse response")]
    Malformed(#[from] serde_json::Error),

    /// The API answered with an `error.message` object.
    #[error("Error: {0}")]
    Api(String),

    /// Valid JSON that has neither a reply nor an error message,
    /// e.g. an empty `choices` array.
    #[error("Failed to parse response")]
    UnexpectedShape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ChatError::Api(String::from("bad key"));
        assert_eq!(err.to_string(), "Error: bad key");
    }

    #[test]
    fn test_parse_failures_display_sentinel() {
        assert_eq!(ChatError::EmptyResponse.to_string(), "Failed to parse response");
        assert_eq!(ChatError::UnexpectedShape.to_string(), "Failed to parse response");

        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(
            ChatError::from(json_err).to_string(),
            "Failed to parse response"
        );
    }
}
