#![allow(dead_code)]

use async_trait::async_trait;
use novella::http::{create_http_client, FetchPolicy, Fetcher, HttpClientConfig, PageSource};
use novella::{DownloaderBuilder, FetchError};
use reqwest::Url;
use std::collections::HashMap;
use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// Common test constants
pub const TEST_INDEX_URL: &str = "https://novels.example/novel/the-long-road";
pub const TEST_USER_AGENT: &str = "novella-test-agent";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Parses a URL that is known to be valid.
pub fn url(s: &str) -> Url {
    Url::parse(s).expect("valid test url")
}

/// Chapter file names in `dir`, sorted.
pub fn chapter_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".txt"))
        .collect();
    names.sort();
    names
}

/// Reads the error log in `dir`, or an empty string when there is none.
pub fn read_error_log(dir: &Path) -> String {
    fs::read_to_string(dir.join(novella::store::ERROR_LOG)).unwrap_or_default()
}

// === Page Builders ===

/// An index page linking to the given hrefs, in that order.
pub fn index_page(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("      <li><a href=\"{href}\">{href}</a></li>\n"))
        .collect();
    format!(
        "<!doctype html>\n<html>\n  <body>\n    <h1>The Long Road</h1>\n    <ul>\n{links}    </ul>\n  </body>\n</html>\n"
    )
}

/// A chapter page with a heading and a `.chapter-content` container.
pub fn chapter_page(title: &str, paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("      <p>{p}</p>\n"))
        .collect();
    format!(
        "<!doctype html>\n<html>\n  <body>\n    <nav><a href=\"/\">Home</a></nav>\n    <h1>{title}</h1>\n    <div class=\"chapter-content\">\n{body}    </div>\n  </body>\n</html>\n"
    )
}

// === Builders ===

/// A downloader builder writing into `dir`, hidden and without pauses.
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .delay(Duration::ZERO)
        .fetch_policy(fast_policy())
}

/// A policy with short timeouts and millisecond backoff.
pub fn fast_policy() -> FetchPolicy {
    FetchPolicy {
        timeout: Duration::from_secs(2),
        max_attempts: 3,
        backoff_unit: Duration::from_millis(1),
    }
}

/// An HTTP fetcher with the given policy.
pub fn create_test_fetcher(policy: FetchPolicy) -> Fetcher {
    let client = create_http_client(HttpClientConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        ..HttpClientConfig::default()
    })
    .expect("Failed to create HTTP client");
    Fetcher::new(client, policy)
}

// === In-memory Page Source ===

/// A [`PageSource`] serving canned pages; unknown URLs are `NotFound`.
#[derive(Default)]
pub struct MockSource {
    pages: HashMap<String, Result<String, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` at `url`.
    pub fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    /// Fail every request to `url` with `error`.
    pub fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    /// Every requested URL, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// Number of requests made for `url`.
    pub fn hits(&self, url: &str) -> usize {
        self.requests().iter().filter(|r| r.as_str() == url).count()
    }
}

#[async_trait]
impl PageSource for MockSource {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());

        self.pages
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound { url: url.clone() }))
    }
}

// === HTTP Stub Server ===

/// A tiny_http server answering fixed routes; anything else is a 404.
pub struct StubServer {
    pub base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    /// Starts a server for `(path, status, body)` routes.
    pub fn spawn(routes: Vec<(String, u16, String)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(path, status, body)| (path, (status, body)))
            .collect();
        let hits = Arc::new(Mutex::new(HashMap::new()));
        let server_hits = Arc::clone(&hits);

        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let path = request.url().to_string();
            *server_hits
                .lock()
                .expect("hits lock")
                .entry(path.clone())
                .or_insert(0) += 1;

            let (status, body) = routes
                .get(&path)
                .cloned()
                .unwrap_or_else(|| (404, "not found".to_string()));

            let header = tiny_http::Header::from_bytes(
                &b"Content-Type"[..],
                &b"text/html; charset=utf-8"[..],
            )
            .expect("build header");
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);

            let _ = request.respond(response);
        });

        Self {
            base_url,
            hits,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Number of requests received for `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .expect("hits lock")
            .get(path)
            .copied()
            .unwrap_or(0)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// A TCP server that accepts connections and never answers.
///
/// Returns its base URL and the number of accepted connections.
pub fn spawn_silent_server() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent server");
    let addr = listener.local_addr().expect("local addr");
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&accepted);

    thread::spawn(move || {
        let mut open = Vec::new();
        for stream in listener.incoming().flatten() {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(stream);
        }
    });

    (format!("http://{addr}"), accepted)
}
