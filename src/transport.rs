use std::path::Path;
use std::sync::Arc;
use std::{pin, task};

use hyper_util::rt::TokioIo;

/// Connection factory that dials a fixed Unix domain socket.
///
/// The requested URI is ignored: every call connects to the socket path the
/// connector was created with. Construction never touches the filesystem, so a
/// missing or unreachable socket only surfaces once a connection is requested.
#[derive(Debug, Clone)]
pub struct UnixConnector {
    path: Arc<Path>,
}

impl UnixConnector {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Arc::from(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl tower::Service<hyper::Uri> for UnixConnector {
    type Response = TokioIo<tokio::net::UnixStream>;

    type Error = std::io::Error;

    type Future = pin::Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut task::Context<'_>) -> task::Poll<Result<(), Self::Error>> {
        task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, uri: hyper::Uri) -> Self::Future {
        let path = Arc::clone(&self.path);
        Box::pin(async move {
            log::trace!("Dialing {} for `{}`", path.display(), uri);
            let stream = tokio::net::UnixStream::connect(&*path).await?;

            Ok(TokioIo::new(stream))
        })
    }
}

#[cfg(test)]
mod tests {
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn test_connects_to_fixed_socket_regardless_of_uri() {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("engine.sock");
        let listener = tokio::net::UnixListener::bind(&socket).unwrap();

        let connector = UnixConnector::new(&socket);
        let uri: hyper::Uri = "http://example.invalid:1234/ignored".parse().unwrap();
        let accept = tokio::spawn(async move { listener.accept().await.map(|_| ()) });

        connector.clone().oneshot(uri).await.expect("should dial socket");
        accept.await.unwrap().expect("listener should accept");
        assert_eq!(connector.path(), socket.as_path());
    }

    #[tokio::test]
    async fn test_missing_socket_fails_on_use_not_on_construction() {
        let connector = UnixConnector::new("/definitely/does/not/exist.sock");
        let err = connector
            .oneshot(hyper::Uri::from_static("http://localhost/"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
