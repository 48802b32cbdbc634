use thiserror::Error;

/// The one message users ever see when an estimate request fails.
/// Internal detail goes to the log, never to the screen.
pub const ADVISORY: &str =
    "Sorry, we couldn't calculate your estimate at this time. Please try again later.";

/// Failure modes of the estimate pipeline, from startup to reply validation.
#[derive(Debug, Error)]
pub enum EstimateError {
    /// No Gemini credential available at startup. Fatal: the app refuses to
    /// start rather than failing on the first submission.
    #[error("estimation service credential missing: {0}")]
    Configuration(String),

    /// Transport failure or an error reported by the Gemini service itself.
    #[error("estimation service call failed: {0}")]
    OracleInvocation(String),

    /// The reply body was not well-formed JSON.
    #[error("estimation reply was not valid JSON: {0}")]
    ResponseParse(String),

    /// The reply parsed but does not match the declared output schema.
    #[error("estimation reply did not match the expected shape: {0}")]
    ResponseShape(String),
}
