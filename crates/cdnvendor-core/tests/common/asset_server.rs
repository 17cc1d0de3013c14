//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of path -> (status, body, delay). Unknown paths get
//! 404. Counts GET requests per path and records the `User-Agent` header so
//! tests can assert cache hits never touch the network.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Sleep before answering (for timeout/cancellation tests).
    pub delay: Option<Duration>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: format!("status {status}").into_bytes(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct Log {
    hits: HashMap<String, usize>,
    user_agents: Vec<String>,
}

pub struct AssetServer {
    base: String,
    log: Arc<Mutex<Log>>,
}

impl AssetServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let log = Arc::new(Mutex::new(Log::default()));
        let server_log = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&server_log);
                thread::spawn(move || handle(stream, &routes, &log));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{port}"),
            log,
        }
    }

    /// Full URL for `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hits(&self, path: &str) -> usize {
        self.log.lock().unwrap().hits.get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.log.lock().unwrap().hits.values().sum()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.log.lock().unwrap().user_agents.clone()
    }
}

fn handle(mut stream: TcpStream, routes: &HashMap<String, Route>, log: &Mutex<Log>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let (method, path, user_agent) = parse_request(&request);
    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
        return;
    }
    {
        let mut log = log.lock().unwrap();
        *log.hits.entry(path.to_string()).or_default() += 1;
        if let Some(ua) = user_agent {
            log.user_agents.push(ua.to_string());
        }
    }

    let route = routes.get(path).cloned().unwrap_or_else(|| Route::status(404));
    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}

/// Returns (method, path, user agent).
fn parse_request(request: &str) -> (&str, &str, Option<&str>) {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let path = first.next().unwrap_or("/");
    let user_agent = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, value)| value.trim());
    (method, path, user_agent)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
