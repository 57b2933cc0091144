use thiserror::Error;

/// The errors that can occur whilst talking to the parking server.
///
/// Requests the server refuses (`"success": false`) are not errors. They come back as
/// [`shared::data::Reply::Rejected`].
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed. This is a wrapped [``reqwest::Error``].
    #[error("An error occured when interacting with the server: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a body that is not the expected JSON.
    #[error("The server answered with something that could not be understood: {0}")]
    Decode(#[from] serde_json::Error),
    /// The configured server address can not be combined with an endpoint path.
    #[error("Could not build the request address: {0}")]
    InvalidAddress(#[from] url::ParseError),
    /// The server refused a request that has no rejection shape of its own, like the status query.
    #[error("The server refused the request: {0}")]
    Rejected(String),
    #[error("The server did not produce a report. It answered with content type '{0}'.")]
    ReportUnavailable(String),
    #[error("'{0}' is not a date. Dates are written as YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("Could not write to disk: {0}")]
    Io(#[from] std::io::Error),
}
