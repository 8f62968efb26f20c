#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rattendance::auth::SessionContext;
use rattendance::location::{FixOptions, LocationError, LocationProvider};
use rattendance::models::location::Fix;
use rattendance::models::requests::{CheckInRequest, CheckOutRequest, StatusResponse};
use rattendance::remote::failure::FailureBody;
use rattendance::remote::{Authority, RemoteError, RemoteResult};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// ------------------------------------------------------------------
// CLI helpers
// ------------------------------------------------------------------

/// Binary with HOME pointing to an isolated directory
pub fn rat(home: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("rattendance");
    cmd.env("HOME", home.path())
        .env("APPDATA", home.path())
        .env_remove("RUST_LOG")
        .env_remove("RATTENDANCE_DEBUG_LOG");
    cmd
}

pub fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("temp home")
}

pub fn db_path(home: &tempfile::TempDir) -> String {
    home.path()
        .join("audit.sqlite")
        .to_string_lossy()
        .to_string()
}

// ------------------------------------------------------------------
// In-process HTTP stub
// ------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

type Routes = HashMap<(String, String), VecDeque<Reply>>;

/// Answers scripted replies per route; the last reply of a route repeats.
/// Unknown routes get a 404 with an empty JSON body.
pub struct StubServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    pub fn start(routes: Vec<(&str, &str, Vec<Reply>)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));

        let mut table: Routes = HashMap::new();
        for (method, path, replies) in routes {
            table.insert((method.to_string(), path.to_string()), replies.into());
        }
        let table = Arc::new(Mutex::new(table));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Some(req) = read_request(&mut stream) else { continue };

                let reply = {
                    let mut table = table.lock().unwrap();
                    match table.get_mut(&(req.method.clone(), req.path.clone())) {
                        Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                        Some(queue) if queue.len() == 1 => queue[0].clone(),
                        _ => Reply::status(404, serde_json::json!({})),
                    }
                };
                recorded.lock().unwrap().push(req);

                let response = format!(
                    "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { url, requests }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> Option<Recorded> {
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .ok()?;
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if name == "content-length" {
                content_length = value.parse().unwrap_or(0);
            } else if name == "authorization" {
                authorization = Some(value);
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(Recorded {
        method,
        path,
        authorization,
        body: String::from_utf8_lossy(&body).to_string(),
    })
}

// ------------------------------------------------------------------
// Scripted authority for library-level tests
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Status,
    CheckIn(CheckInRequest),
    CheckOut(CheckOutRequest),
}

#[derive(Default)]
pub struct FakeAuthority {
    statuses: RefCell<VecDeque<RemoteResult<StatusResponse>>>,
    check_ins: RefCell<VecDeque<RemoteResult<()>>>,
    check_outs: RefCell<VecDeque<RemoteResult<()>>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(self, reply: RemoteResult<StatusResponse>) -> Self {
        self.statuses.borrow_mut().push_back(reply);
        self
    }

    pub fn with_check_in(self, reply: RemoteResult<()>) -> Self {
        self.check_ins.borrow_mut().push_back(reply);
        self
    }

    pub fn with_check_out(self, reply: RemoteResult<()>) -> Self {
        self.check_outs.borrow_mut().push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn check_in_calls(&self) -> Vec<CheckInRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckIn(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn check_out_calls(&self) -> Vec<CheckOutRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CheckOut(r) => Some(r),
                _ => None,
            })
            .collect()
    }
}

impl Authority for FakeAuthority {
    fn status(&self, _ctx: &SessionContext) -> RemoteResult<StatusResponse> {
        self.calls.borrow_mut().push(Call::Status);
        self.statuses
            .borrow_mut()
            .pop_front()
            .expect("unexpected status call")
    }

    fn check_in(&self, _ctx: &SessionContext, req: &CheckInRequest) -> RemoteResult<()> {
        self.calls.borrow_mut().push(Call::CheckIn(req.clone()));
        self.check_ins
            .borrow_mut()
            .pop_front()
            .expect("unexpected check-in call")
    }

    fn check_out(&self, _ctx: &SessionContext, req: &CheckOutRequest) -> RemoteResult<()> {
        self.calls.borrow_mut().push(Call::CheckOut(req.clone()));
        self.check_outs
            .borrow_mut()
            .pop_front()
            .expect("unexpected check-out call")
    }
}

pub fn idle() -> RemoteResult<StatusResponse> {
    Ok(StatusResponse {
        is_working: false,
        start_time: None,
    })
}

pub fn working(start: &str) -> RemoteResult<StatusResponse> {
    Ok(StatusResponse {
        is_working: true,
        start_time: Some(start.to_string()),
    })
}

pub fn rejected(status: u16, body: Value) -> RemoteError {
    RemoteError::Rejected {
        status,
        body: FailureBody::from_value(body),
    }
}

pub fn ctx() -> SessionContext {
    SessionContext::new(Some("test-token".to_string()))
}

// ------------------------------------------------------------------
// Location providers
// ------------------------------------------------------------------

/// Answers after `delay`, long after any test deadline.
pub struct SlowLocation {
    pub delay: Duration,
}

impl LocationProvider for SlowLocation {
    fn locate(&self, _opts: FixOptions) -> Result<Fix, LocationError> {
        thread::sleep(self.delay);
        Ok(Fix {
            latitude: 37.5,
            longitude: 127.0,
        })
    }
}

/// Records whether a high-accuracy fix was requested.
pub struct RecordingLocation {
    pub fix: Fix,
    pub high_accuracy: Arc<Mutex<Option<bool>>>,
}

impl LocationProvider for RecordingLocation {
    fn locate(&self, opts: FixOptions) -> Result<Fix, LocationError> {
        *self.high_accuracy.lock().unwrap() = Some(opts.high_accuracy);
        Ok(self.fix)
    }
}
