use thiserror::Error;

/// Failures talking to the recommendation backend or TMDB.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("TMDB_API_KEY is not configured")]
    MissingApiKey,
}

impl ClientError {
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        ClientError::Network { url: redact(url), source }
    }

    pub fn parse(url: &str, source: serde_json::Error) -> Self {
        ClientError::Parse { url: redact(url), source }
    }

    pub fn status(url: &str, status: u16) -> Self {
        ClientError::Status { url: redact(url), status }
    }
}

// Keeps the TMDB key out of log lines and popups.
fn redact(url: &str) -> String {
    match url.find("api_key=") {
        Some(start) => {
            let value_start = start + "api_key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}
