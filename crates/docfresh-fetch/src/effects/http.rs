use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::Stream;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// A successful response whose body has not been read yet.
pub struct HttpResponse<E> {
    /// Value of the `Content-Length` header, if the server sent one.
    pub content_length: Option<u64>,

    /// Response body as a stream of chunks.
    pub body: BoxStream<'static, Result<Bytes, E>>,
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed for index loading and
/// downloads. Implementations handle their own redirect following and must
/// report non-success status codes as errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`MockClient`](crate::mock::MockClient): scripted responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for HTTP operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET request and return the response headers' content length
    /// together with the streaming body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (DNS failure, connection error,
    /// non-success HTTP status, etc.).
    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send;
}

impl<C: HttpClient> HttpClient for Arc<C> {
    type Error = C::Error;

    fn get(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<HttpResponse<Self::Error>, Self::Error>> + Send {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use futures_util::StreamExt;

    use super::*;

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a client with reqwest's default configuration.
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().build()?;
            Ok(Self { client })
        }

        /// Create a client that gives up on establishing a connection after
        /// `connect_timeout`.
        pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().connect_timeout(connect_timeout).build()?;
            Ok(Self { client })
        }

        pub fn from_client(client: reqwest::Client) -> Self { Self { client } }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url).send().await?.error_for_status()?;
            let content_length = response.content_length();
            let body = response.bytes_stream().map(|chunk| chunk.map(Bytes::from));

            Ok(HttpResponse {
                content_length,
                body: Box::pin(body),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
