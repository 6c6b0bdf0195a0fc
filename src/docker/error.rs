use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to socket `{path}`: {source}")]
    SocketConnect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP handshake over socket `{path}` failed: {source}")]
    Handshake {
        path: PathBuf,
        #[source]
        source: hyper::Error,
    },
    #[error("failed to build request for `{uri}`: {source}")]
    Request {
        uri: String,
        #[source]
        source: http::Error,
    },
    #[error("request to `{uri}` failed: {source}")]
    Send {
        uri: String,
        #[source]
        source: hyper::Error,
    },
    #[error("unexpected status `{status}` from `{uri}`")]
    Status {
        uri: String,
        status: hyper::StatusCode,
    },
    #[error("failed to read response body from `{uri}`: {source}")]
    Body {
        uri: String,
        #[source]
        source: hyper::Error,
    },
    #[error("failed to decode container list from `{uri}`: {source}")]
    Decode {
        uri: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
