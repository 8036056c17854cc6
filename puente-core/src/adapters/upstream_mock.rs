//! Mock upstream aggregation API for testing
//!
//! Simulates the upstream provider API so the executor, catalog and session
//! services can be tested without a real account. The mock speaks the same
//! `status`-discriminated JSON as the real API and can inject transient 502
//! failures per path, fail selected provider-detail fetches permanently, and
//! answer session endpoints with the `Invalid key` error.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

/// Session key issued by the mock
pub const MOCK_SESSION_KEY: &str = "0123456789abcdef0123456789abcdef";

/// How the mock answers the login endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginScenario {
    LoggedIn,
    SelectClient,
    OtpRequired,
    PersonalQuestions,
    WrongCredentials,
    UnauthorizedProvider,
    GenericError,
    /// `status` value outside the documented contract
    UnknownShape,
}

/// Configuration for mock behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// (code, country) pairs served by the flat provider list
    pub providers: Vec<(String, String)>,
    /// Provider codes whose detail endpoint always answers 502
    pub failing_details: Vec<String>,
    /// Number of 502 responses served per path before succeeding
    pub transient_failures: usize,
    pub login_scenario: LoginScenario,
    /// Session endpoints answer `{"status":"error","message":"Invalid key"}`
    pub invalid_session_key: bool,
    /// Clients returned by the client-list endpoint
    pub clients: Vec<(String, String)>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            providers: vec![("bcp_pers".to_string(), "PE".to_string())],
            failing_details: Vec::new(),
            transient_failures: 0,
            login_scenario: LoginScenario::LoggedIn,
            invalid_session_key: false,
            clients: vec![("C1".to_string(), "Primary holder".to_string())],
        }
    }
}

/// Mock upstream server for testing
pub struct MockUpstreamServer {
    port: u16,
    running: Arc<AtomicBool>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockUpstreamServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let hits = Arc::new(Mutex::new(HashMap::new()));
        let hits_clone = hits.clone();

        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let hits = hits_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &hits);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            hits,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Number of requests observed for a path (query string excluded)
    pub fn hits(&self, path: &str) -> usize {
        self.hits
            .lock()
            .expect("hit counter lock poisoned")
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockUpstreamServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(
    mut stream: TcpStream,
    config: &MockConfig,
    hits: &Arc<Mutex<HashMap<String, usize>>>,
) {
    let mut buffer = [0; 8192];

    let n = match stream.read(&mut buffer) {
        Ok(n) => n,
        Err(_) => return,
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    let first_line = request.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, "Bad Request", r#"{"error":"bad request"}"#);
        return;
    }
    let path = parts[1].split('?').next().unwrap_or(parts[1]).to_string();

    let hit_count = {
        let mut map = hits.lock().expect("hit counter lock poisoned");
        let count = map.entry(path.clone()).or_insert(0);
        *count += 1;
        *count
    };

    // Permanently failing provider-detail paths
    if config
        .failing_details
        .iter()
        .any(|code| path == format!("/provider/{}/", code))
    {
        send_response(&mut stream, 502, "Bad Gateway", "Bad Gateway");
        return;
    }

    // Transient failure injection: first N requests per path answer 502
    if hit_count <= config.transient_failures {
        send_response(&mut stream, 502, "Bad Gateway", "Bad Gateway");
        return;
    }

    let body = route(&path, config);
    match body {
        Some(json) => send_response(&mut stream, 200, "OK", &json),
        None => send_response(&mut stream, 404, "Not Found", r#"{"error":"not found"}"#),
    }
}

fn route(path: &str, config: &MockConfig) -> Option<String> {
    if config.invalid_session_key && is_session_path(path) {
        return Some(json!({ "status": "error", "message": "Invalid key" }).to_string());
    }

    if path == "/provider/" {
        let providers: Vec<_> = config
            .providers
            .iter()
            .map(|(code, country)| {
                json!({ "code": code, "country": country, "name": code.to_uppercase() })
            })
            .collect();
        return Some(json!({ "status": "success", "providers": providers }).to_string());
    }

    if let Some(code) = path
        .strip_prefix("/provider/")
        .and_then(|rest| rest.strip_suffix('/'))
    {
        return Some(provider_detail(code).to_string());
    }

    if path == "/login/" {
        return Some(login_reply(config.login_scenario).to_string());
    }

    if path == "/logout/" {
        return Some(json!({ "status": "logged_out" }).to_string());
    }

    if path == "/client/" {
        let clients: serde_json::Map<String, serde_json::Value> = config
            .clients
            .iter()
            .map(|(id, name)| (id.clone(), json!(name)))
            .collect();
        return Some(json!({ "status": "success", "clients": clients }).to_string());
    }

    if let Some(client_id) = path
        .strip_prefix("/client/")
        .and_then(|rest| rest.strip_suffix('/'))
    {
        if config.clients.iter().any(|(id, _)| id == client_id) {
            return Some(json!({ "status": "success" }).to_string());
        }
        return Some(json!({ "status": "error", "message": "wrong_client" }).to_string());
    }

    if path == "/account/" {
        return Some(
            json!({
                "status": "success",
                "accounts": [
                    {
                        "id": "acc-1",
                        "name": "Cuenta Sueldo",
                        "number": "193-1234567-0-11",
                        "branch": "0193",
                        "currency": "PEN",
                        "balance": 1250.75
                    },
                    {
                        "id": "acc-2",
                        "name": "Cuenta Dolares",
                        "number": "194-7654321-0-22",
                        "branch": "0194",
                        "currency": "USD",
                        "balance": "300.10"
                    }
                ]
            })
            .to_string(),
        );
    }

    if path.starts_with("/account/") && path.ends_with("/movement/") {
        return Some(
            json!({
                "status": "success",
                "movements": [
                    {
                        "id": 1,
                        "reference": "TRF-0001",
                        "date": "15/01/2024",
                        "detail": "transferencia recibida",
                        // Parsed from the literal so the wire keeps the 450.00 scale
                        "credit": "450.00".parse::<serde_json::Number>().unwrap(),
                        "extra_data": { "channel": "web" }
                    },
                    {
                        "id": 2,
                        "reference": "PAG-0002",
                        "date": "16/01/2024",
                        "detail": "pago de servicios",
                        "debit": "120.50"
                    }
                ]
            })
            .to_string(),
        );
    }

    None
}

fn is_session_path(path: &str) -> bool {
    path == "/client/"
        || path == "/account/"
        || path.starts_with("/account/")
        || (path.starts_with("/client/") && path != "/client/")
}

fn provider_detail(code: &str) -> serde_json::Value {
    json!({
        "status": "success",
        "provider": {
            "name": code,
            "aliases": [code.to_uppercase()],
            "country": "PE",
            "auth_fields": [
                {
                    "name": "type",
                    "type": "choice",
                    "interactive": false,
                    "optional": false,
                    "label_es": "Tipo de documento",
                    "label_en": "Document type",
                    "choices": [
                        { "name": "DNI", "label_es": "DNI", "label_en": "DNI" },
                        { "name": "CE", "label_es": "CE", "label_en": "CE" }
                    ]
                },
                { "name": "username", "type": "text", "interactive": false, "optional": false },
                { "name": "password", "type": "password", "interactive": false, "optional": false }
            ],
            "account_type": [
                { "name": "pers", "label_es": "Personal", "label_en": "Personal" }
            ],
            "logo": format!("https://logos.example.com/{}.png", code),
            "bank": { "code": code, "name": code.to_uppercase(), "logo": null },
            "methods": {
                "accounts": true,
                "credit_cards": false,
                "account_movements": true,
                "credit_card_movements": false,
                "personal_info": false,
                "transfers": false,
                "enrollments": false
            }
        }
    })
}

fn login_reply(scenario: LoginScenario) -> serde_json::Value {
    match scenario {
        LoginScenario::LoggedIn => json!({ "status": "logged_in", "key": MOCK_SESSION_KEY }),
        LoginScenario::SelectClient => {
            json!({ "status": "select_client", "key": MOCK_SESSION_KEY })
        }
        LoginScenario::OtpRequired => {
            json!({ "status": "interaction_required", "field": "otp", "key": MOCK_SESSION_KEY })
        }
        LoginScenario::PersonalQuestions => {
            json!({
                "status": "interaction_required",
                "field": "personal_questions",
                "key": MOCK_SESSION_KEY
            })
        }
        LoginScenario::WrongCredentials => json!({ "status": "wrong_credentials" }),
        LoginScenario::UnauthorizedProvider => {
            json!({ "status": "error", "message": "Unauthorized provider" })
        }
        LoginScenario::GenericError => {
            json!({ "status": "error", "message": "provider is down for maintenance" })
        }
        LoginScenario::UnknownShape => json!({ "status": "mystery", "details": 42 }),
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
