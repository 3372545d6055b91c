// API module: talks to the shortening service and to whatever server a short
// URL points at. The HTTP work sits behind the small `Transport` trait so the
// URL logic (encoding, length ceiling, status checks) can be exercised
// without a network.

use crate::config::Config;
use crate::error::{TransportError, UrlError, UrlResult};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::Url;
use std::io::Read;
use tracing::debug;
use url::ParseError;

/// Upper bound on the buffer reserved up front from `Content-Length`.
const MAX_BODY_PREALLOC: usize = 64 * 1024;

/// Body and status of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Where a HEAD request ended up after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub status: u16,
    pub final_url: Option<String>,
}

/// The two HTTP exchanges the tool needs.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// GET `url` without following redirects and return the whole body.
    fn get(&self, url: &str) -> Result<Fetched, TransportError>;

    /// HEAD `url`, following redirects, and report the final location.
    fn head(&self, url: &str) -> Result<Resolved, TransportError>;
}

/// Blocking reqwest transport. A client is built for each exchange and
/// dropped with it, so nothing outlives the operation.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    config: Config,
}

impl ReqwestTransport {
    pub fn new(config: &Config) -> Self {
        ReqwestTransport {
            config: config.clone(),
        }
    }

    fn client(&self, redirects: Policy) -> Result<Client, TransportError> {
        Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .redirect(redirects)
            .build()
            .map_err(|e| TransportError::Init(Box::new(e)))
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Fetched, TransportError> {
        let client = self.client(Policy::none())?;
        let mut res = client
            .get(url)
            .send()
            .map_err(|e| TransportError::Network(Box::new(e)))?;
        let status = res.status().as_u16();

        let mut body = Vec::new();
        if let Some(len) = res.content_length() {
            let len = usize::try_from(len).unwrap_or(usize::MAX);
            body.try_reserve(len.min(MAX_BODY_PREALLOC))
                .map_err(TransportError::Alloc)?;
        }
        res.read_to_end(&mut body)
            .map_err(|e| TransportError::Network(Box::new(e)))?;

        Ok(Fetched { status, body })
    }

    fn head(&self, url: &str) -> Result<Resolved, TransportError> {
        let client = self.client(Policy::limited(self.config.max_redirects))?;
        let res = client
            .head(url)
            .send()
            .map_err(|e| TransportError::Network(Box::new(e)))?;
        Ok(Resolved {
            status: res.status().as_u16(),
            final_url: Some(res.url().to_string()),
        })
    }
}

/// Percent-encode `raw` for use as a query value. Everything outside the
/// unreserved set (`A-Z a-z 0-9 - . _ ~`) is escaped as `%XX`.
pub fn encode_url(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Prefix `http://` when `raw` has no scheme of its own.
fn with_default_scheme(raw: &str) -> String {
    match Url::parse(raw) {
        Err(ParseError::RelativeUrlWithoutBase) => format!("http://{}", raw),
        _ => raw.to_string(),
    }
}

/// Shortens and resolves URLs over a `Transport`.
pub struct UrlClient<T> {
    transport: T,
    config: Config,
}

impl UrlClient<ReqwestTransport> {
    /// Client backed by reqwest, configured from the environment.
    pub fn from_env() -> Self {
        let config = Config::from_env();
        UrlClient::new(ReqwestTransport::new(&config), config)
    }
}

impl<T: Transport> UrlClient<T> {
    pub fn new(transport: T, config: Config) -> Self {
        UrlClient { transport, config }
    }

    /// Ask the shortening API for a short alias of `long_url`.
    ///
    /// The API answers in plain text, so the response body is returned as is,
    /// byte for byte. Inputs whose encoded form is longer than the configured
    /// ceiling are rejected before any request is made.
    pub fn shorten(&self, long_url: &str) -> UrlResult<Vec<u8>> {
        let encoded = encode_url(long_url);
        if encoded.len() > self.config.max_encoded_len {
            debug!(
                encoded_len = encoded.len(),
                limit = self.config.max_encoded_len,
                "refusing to send oversized URL"
            );
            return Err(UrlError::TooLong {
                encoded_len: encoded.len(),
            });
        }

        let request_url = self.request_url(&encoded)?;
        debug!(url = %request_url, "requesting short URL");

        let fetched = self.transport.get(request_url.as_str()).map_err(|e| {
            debug!(error = ?e, "shorten request failed");
            UrlError::from_transport(e, UrlError::ShortenNetwork)
        })?;
        if !(200..300).contains(&fetched.status) {
            debug!(status = fetched.status, "shortening API answered with a non-success status");
        }

        Ok(fetched.body)
    }

    /// Follow the redirects behind `short_url` and return where they lead.
    ///
    /// Only a final status in `200..400` with a known final URL counts as a
    /// successful resolution. A URL given without a scheme
    /// (`tinyurl.com/abc123`) is requested over `http://`.
    pub fn unshorten(&self, short_url: &str) -> UrlResult<String> {
        let target = with_default_scheme(short_url);
        debug!(url = %target, "resolving short URL");
        let resolved = self.transport.head(&target).map_err(|e| {
            debug!(error = ?e, "unshorten request failed");
            UrlError::from_transport(e, UrlError::UnshortenNetwork)
        })?;
        debug!(status = resolved.status, final_url = ?resolved.final_url, "redirects settled");

        match resolved.final_url {
            Some(url) if (200..400).contains(&resolved.status) => Ok(url),
            _ => Err(UrlError::InvalidRedirect {
                status: resolved.status,
            }),
        }
    }

    /// `<api_url>?url=<encoded>`, or `&url=` if the endpoint already has a query.
    fn request_url(&self, encoded: &str) -> UrlResult<Url> {
        let sep = if self.config.api_url.contains('?') { '&' } else { '?' };
        let raw = format!("{}{}url={}", self.config.api_url, sep, encoded);
        Url::parse(&raw).map_err(|e| UrlError::Encoding(Box::new(e)))
    }
}
