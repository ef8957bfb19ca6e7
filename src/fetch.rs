//! HTTP client core: base URL, bearer token, body encoding and error normalization

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

use crate::config::{normalize_base_url, ClientOptions};
use crate::error::{ApiError, Error, ErrorFlavor, Result};
use crate::query::to_query_pairs;
use crate::token::TokenStore;

/// Shared HTTP state: base URL, connection pool and the bearer token
#[derive(Debug)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    token: Arc<TokenStore>,
}

impl HttpClient {
    /// Create a new HttpClient
    pub fn new(base_url: &str, options: &ClientOptions, token: Arc<TokenStore>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(options.user_agent.clone());
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            client: builder.build()?,
            token,
        })
    }

    /// The normalized base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The bearer token shared by every request
    pub fn token(&self) -> &Arc<TokenStore> {
        &self.token
    }

    /// Start a request with an explicit method
    pub fn request(&self, method: Method, endpoint: &str) -> FetchBuilder<'_> {
        FetchBuilder::new(self, method, endpoint)
    }

    /// Create a GET request
    pub fn get(&self, endpoint: &str) -> FetchBuilder<'_> {
        self.request(Method::GET, endpoint)
    }

    /// Create a POST request
    pub fn post(&self, endpoint: &str) -> FetchBuilder<'_> {
        self.request(Method::POST, endpoint)
    }

    /// Create a PUT request
    pub fn put(&self, endpoint: &str) -> FetchBuilder<'_> {
        self.request(Method::PUT, endpoint)
    }

    /// Create a PATCH request
    pub fn patch(&self, endpoint: &str) -> FetchBuilder<'_> {
        self.request(Method::PATCH, endpoint)
    }

    /// Create a DELETE request
    pub fn delete(&self, endpoint: &str) -> FetchBuilder<'_> {
        self.request(Method::DELETE, endpoint)
    }
}

enum Body {
    Empty,
    Json(Vec<u8>),
    Form(Vec<(String, String)>),
    Multipart(Form),
}

/// Helper for building and executing one request
pub struct FetchBuilder<'a> {
    http: &'a HttpClient,
    method: Method,
    endpoint: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Body,
}

impl<'a> FetchBuilder<'a> {
    fn new(http: &'a HttpClient, method: Method, endpoint: &str) -> Self {
        Self {
            http,
            method,
            endpoint: endpoint.to_string(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Body::Empty,
        }
    }

    /// Add a header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Append a caller-supplied value as one percent-encoded path segment.
    ///
    /// `/`, `?` and `#` stay inside the segment; `.` and `..` are rejected
    /// when the request is built.
    pub fn segment(mut self, value: &str) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Add query parameters from any serializable parameter object
    pub fn query<T: Serialize + ?Sized>(mut self, params: &T) -> Result<Self> {
        self.query.extend(to_query_pairs(params)?);
        Ok(self)
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_vec(body)?);
        Ok(self)
    }

    /// Send a form-encoded body. Used only by the token endpoint, so no
    /// bearer header is attached.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.body = Body::Form(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Send a multipart body; the boundary header is left to reqwest
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    fn flavor(&self) -> ErrorFlavor {
        match self.body {
            Body::Form(_) => ErrorFlavor::FormLogin,
            _ => ErrorFlavor::Json,
        }
    }

    fn build(self) -> Result<RequestBuilder> {
        let mut url = Url::parse(&format!("{}{}", self.http.base_url, self.endpoint))?;
        if !self.segments.is_empty() {
            if let Some(bad) = self
                .segments
                .iter()
                .find(|s| matches!(s.trim(), "" | "." | ".."))
            {
                return Err(Error::validation(format!("Invalid path segment: {:?}", bad)));
            }
            url.path_segments_mut()
                .map_err(|_| Error::config("base URL cannot carry a path"))?
                .extend(&self.segments);
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }

        let mut req = self.http.client.request(self.method, url).headers(self.headers);

        let attach_token = !matches!(self.body, Body::Form(_));
        if attach_token {
            if let Some(token) = self.http.token.get() {
                req = req.bearer_auth(token);
            }
        }

        req = match self.body {
            Body::Empty => req.header(CONTENT_TYPE, "application/json"),
            Body::Json(bytes) => req.header(CONTENT_TYPE, "application/json").body(bytes),
            Body::Form(fields) => req.form(&fields),
            Body::Multipart(form) => req.multipart(form),
        };

        Ok(req)
    }

    /// Execute the request and parse the response as JSON
    pub async fn execute<T: DeserializeOwned>(self) -> Result<T> {
        let method = self.method.clone();
        let endpoint = self.endpoint.clone();
        let flavor = self.flavor();
        let req = self.build()?;

        debug!("{} {}", method, endpoint);
        let response = req.send().await.map_err(classify)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let error = ApiError::from_response(status.as_u16(), status.canonical_reason(), &body, flavor);
            warn!("{} {} failed with status {}: {}", method, endpoint, status.as_u16(), error.message);
            return Err(Error::Api(error));
        }

        let body = response.bytes().await.map_err(classify)?;
        let payload: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };
        Ok(serde_json::from_slice(payload)?)
    }

    /// Execute the request, ignoring whatever body comes back
    pub async fn send(self) -> Result<()> {
        self.execute::<IgnoredAny>().await.map(|_| ())
    }
}

fn classify(err: reqwest::Error) -> Error {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        Error::Connection(err)
    } else {
        Error::Http(err)
    }
}
