/// Failures talking to the blog REST source.
///
/// Views render every variant the same way (an absence message); the
/// variants only differ in how they are logged.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Log a fetch failure that is about to be turned into an absence state.
pub fn log_fetch_failure(context: &str, err: &Error) {
    if err.is_not_found() {
        log::warn!("{context}: {err}");
    } else {
        log::error!("Error fetching {context}: {err}");
    }
}
