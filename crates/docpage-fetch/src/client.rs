//! Blocking HTTP client for raw README documents.

use std::time::Duration;

use docpage_renderer::SubsetRenderer;
use tracing::{debug, warn};
use ureq::Agent;

use crate::error::FetchError;

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches raw markdown documents and renders them as page fragments.
pub struct ReadmeClient {
    agent: Agent,
    user_agent: Option<String>,
    renderer: SubsetRenderer,
}

impl ReadmeClient {
    /// Create a client whose requests are bounded by `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: None,
            renderer: SubsetRenderer::new(),
        }
    }

    /// Send a `User-Agent` header with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Use `renderer` for [`documentation`](Self::documentation).
    #[must_use]
    pub fn with_renderer(mut self, renderer: SubsetRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Download the raw document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for any status other than `200 OK` and
    /// [`FetchError::Http`] if the request or body read fails.
    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!(url, "Fetching document");

        let mut request = self.agent.get(url);
        if let Some(ref user_agent) = self.user_agent {
            request = request.header("User-Agent", user_agent.as_str());
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status { status });
        }

        let mut body = response.into_body();
        let text = body.read_to_string()?;
        debug!(url, bytes = text.len(), "Fetched document");
        Ok(text)
    }

    /// Fetch and render the document at `url`.
    ///
    /// Never fails: fetch errors are logged and replaced by
    /// [`FetchError::fallback_fragment`]. The renderer only sees successfully
    /// downloaded text.
    pub fn documentation(&self, url: &str) -> String {
        match self.fetch(url) {
            Ok(markdown) => self.renderer.render(&markdown),
            Err(err) => {
                warn!(url, error = %err, "Serving fallback documentation");
                err.fallback_fragment()
            }
        }
    }
}

impl Default for ReadmeClient {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    use docpage_renderer::HeadingPolicy;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::UNAVAILABLE_FRAGMENT;

    /// Serve a single HTTP response on a local port.
    ///
    /// Returns the URL to request and a receiver for the raw request text.
    fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\n\
             Content-Type: text/plain; charset=utf-8\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 512];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        });

        (format!("http://{addr}/README.md"), rx)
    }

    fn client() -> ReadmeClient {
        ReadmeClient::new(Duration::from_secs(5))
    }

    #[test]
    fn test_fetch_ok_returns_body() {
        let (url, _rx) = serve_once("200 OK", "# Hello\n");
        assert_eq!(client().fetch(&url).unwrap(), "# Hello\n");
    }

    #[test]
    fn test_fetch_non_200_is_status_error() {
        let (url, _rx) = serve_once("404 Not Found", "missing");
        let err = client().fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404 }));
    }

    #[test]
    fn test_fetch_other_success_codes_are_rejected() {
        let (url, _rx) = serve_once("204 No Content", "");
        let err = client().fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 204 }));
    }

    #[test]
    fn test_documentation_renders_markdown() {
        let (url, _rx) = serve_once("200 OK", "# Hello\n\n* a\n* b\n");
        assert_eq!(
            client().documentation(&url),
            "<h2>Hello</h2>\n\n<ul><li>a</li>\n<li>b</li></ul>\n"
        );
    }

    #[test]
    fn test_documentation_uses_configured_renderer() {
        let (url, _rx) = serve_once("200 OK", "# Hello");
        let renderer = SubsetRenderer::new().with_heading_policy(HeadingPolicy::KeepTitle);
        let html = client().with_renderer(renderer).documentation(&url);
        assert_eq!(html, "<h1>Hello</h1>");
    }

    #[test]
    fn test_documentation_status_fallback() {
        let (url, _rx) = serve_once("500 Internal Server Error", "boom");
        assert_eq!(client().documentation(&url), UNAVAILABLE_FRAGMENT);
    }

    #[test]
    fn test_documentation_transport_fallback() {
        // Bind then drop to get a port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let html = client().documentation(&format!("http://127.0.0.1:{port}/README.md"));
        assert!(html.starts_with("<p>Error loading documentation: "), "{html}");
        assert!(html.ends_with("</p>"));
    }

    #[test]
    fn test_user_agent_header_sent() {
        let (url, rx) = serve_once("200 OK", "ok");
        client()
            .with_user_agent("docpage-test/1.0")
            .fetch(&url)
            .unwrap();
        let request = rx.recv().unwrap().to_lowercase();
        assert!(request.starts_with("get /readme.md"), "{request}");
        assert!(request.contains("user-agent: docpage-test/1.0"), "{request}");
    }
}
