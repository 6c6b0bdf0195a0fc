use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use tower::ServiceExt;

use crate::transport::UnixConnector;

use super::{Error, RawContainer, Result};

/// Minimal Docker Engine API client bound to a single Unix socket.
///
/// Every request opens a fresh HTTP/1 connection through the shared
/// [`UnixConnector`] and drops it once the response body has been read.
#[derive(Debug, Clone)]
pub struct Client {
    connector: UnixConnector,
    api_version: String,
}

impl Client {
    pub fn new(connector: UnixConnector, api_version: impl Into<String>) -> Self {
        Self {
            connector,
            api_version: api_version.into(),
        }
    }

    /// Path of the container listing endpoint, e.g. `/v1.24/containers/json`.
    pub fn containers_path(&self) -> String {
        format!("/{}/containers/json", self.api_version.trim_matches('/'))
    }

    /// Lists the running containers.
    ///
    /// # Errors
    ///
    /// - [`Error::SocketConnect`] if the socket cannot be dialed.
    /// - [`Error::Handshake`], [`Error::Send`] or [`Error::Body`] on HTTP failures.
    /// - [`Error::Status`] if the engine answers with a non-2xx status.
    /// - [`Error::Decode`] if the body is not a list of containers.
    pub async fn list_containers(&self) -> Result<Vec<RawContainer>> {
        let uri = self.containers_path();
        let body = self.get(&uri).await?;

        serde_json::from_slice(&body).map_err(|source| Error::Decode { uri, source })
    }

    async fn get(&self, uri: &str) -> Result<Bytes> {
        let path = self.connector.path().to_path_buf();
        let io = self
            .connector
            .clone()
            .oneshot(hyper::Uri::from_static("http://localhost/"))
            .await
            .map_err(|source| Error::SocketConnect {
                path: path.clone(),
                source,
            })?;

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|source| Error::Handshake { path, source })?;
        tokio::spawn(async move {
            if let Err(err) = conn.await {
                log::debug!("engine connection closed with error: {}", err);
            }
        });

        let request = http::Request::get(uri)
            .header(http::header::HOST, "localhost")
            .header(http::header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|source| Error::Request {
                uri: uri.to_owned(),
                source,
            })?;

        log::trace!("GET {}", uri);
        let response = sender
            .send_request(request)
            .await
            .map_err(|source| Error::Send {
                uri: uri.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                uri: uri.to_owned(),
                status,
            });
        }

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|source| Error::Body {
                uri: uri.to_owned(),
                source,
            })?
            .to_bytes();
        log::trace!("GET {} returned {} bytes", uri, body.len());

        Ok(body)
    }
}
