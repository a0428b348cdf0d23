//! Scripted [`HttpClient`] for tests.
//!
//! Each URL owns a queue of responses. Requests pop from the front of the
//! queue until one response remains, which then answers every later request.
//! Unknown URLs fail like a `404`.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use bytes::Bytes;
use futures_util::stream::{self, StreamExt};

use crate::effects::{BoxStream, HttpClient, HttpResponse};

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
enum Kind {
    Body(Bytes),
    Fail(String),
    Hang,
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    kind:           Kind,
    chunk_size:     usize,
    declare_length: bool,
    drop_after:     Option<usize>,
    stall_after:    Option<usize>,
}

impl MockResponse {
    /// Serve `data` in `chunk_size` pieces with a matching content length.
    pub fn body(data: impl Into<Bytes>, chunk_size: usize) -> Self {
        Self {
            kind:           Kind::Body(data.into()),
            chunk_size:     chunk_size.max(1),
            declare_length: true,
            drop_after:     None,
            stall_after:    None,
        }
    }

    /// Serve a text payload in a single chunk.
    pub fn text(text: &str) -> Self { Self::body(text.to_owned(), text.len().max(1)) }

    /// Fail before any headers arrive.
    pub fn fail(message: &str) -> Self {
        Self {
            kind: Kind::Fail(message.to_string()),
            ..Self::body(Bytes::new(), 1)
        }
    }

    /// Never produce a response.
    pub fn hang() -> Self {
        Self {
            kind: Kind::Hang,
            ..Self::body(Bytes::new(), 1)
        }
    }

    /// Omit the content length from the response.
    #[must_use]
    pub fn undeclared_length(mut self) -> Self {
        self.declare_length = false;
        self
    }

    /// Reset the connection once `bytes` have been delivered.
    #[must_use]
    pub fn drop_after(mut self, bytes: usize) -> Self {
        self.drop_after = Some(bytes);
        self
    }

    /// Stop producing chunks, without closing the body, once `bytes` have
    /// been delivered.
    #[must_use]
    pub fn stall_after(mut self, bytes: usize) -> Self {
        self.stall_after = Some(bytes);
        self
    }

    fn into_response(self, data: Bytes) -> HttpResponse<MockError> {
        let content_length = self.declare_length.then_some(data.len() as u64);
        let cutoff = self
            .drop_after
            .or(self.stall_after)
            .map_or(data.len(), |n| n.min(data.len()));

        let mut chunks: Vec<Result<Bytes, MockError>> = data[..cutoff]
            .chunks(self.chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();

        let body: BoxStream<'static, Result<Bytes, MockError>> = if self.drop_after.is_some() {
            chunks.push(Err(MockError("connection reset by peer".into())));
            Box::pin(stream::iter(chunks))
        } else if self.stall_after.is_some() {
            Box::pin(stream::iter(chunks).chain(stream::pending()))
        } else {
            Box::pin(stream::iter(chunks))
        };

        HttpResponse {
            content_length,
            body,
        }
    }
}

#[derive(Default)]
pub struct MockClient {
    routes: Mutex<HashMap<String, VecDeque<MockResponse>>>,
    calls:  Mutex<HashMap<String, usize>>,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    /// Queue `response` for `url`.
    #[must_use]
    pub fn route(self, url: &str, response: MockResponse) -> Self {
        self.push(url, response);
        self
    }

    /// Queue `response` for `url` on a shared client.
    pub fn push(&self, url: &str, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Number of requests issued for `url`.
    pub fn calls(&self, url: &str) -> usize { self.calls.lock().unwrap().get(url).copied().unwrap_or(0) }

    /// Number of requests issued for any URL.
    pub fn total_calls(&self) -> usize { self.calls.lock().unwrap().values().sum() }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(url)?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(&self, url: &str) -> Result<HttpResponse<Self::Error>, Self::Error> {
        let Some(response) = self.next_response(url) else {
            return Err(MockError(format!("404 Not Found for url ({url})")));
        };

        match response.kind.clone() {
            Kind::Fail(message) => Err(MockError(message)),
            Kind::Hang => std::future::pending().await,
            Kind::Body(data) => Ok(response.into_response(data)),
        }
    }
}
