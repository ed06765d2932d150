use std::io::Write;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use employment_views::server;
use employment_views::state::AppState;

const DATASET: &str = "\
Job Title,Location,Industry,Experience Level,Employment Type,Salary (USD),Posted Date
Engineer,\"New York, NY, USA\",Tech,senior,Full-Time,100000,2023-01-15
Engineer,\"Seattle, WA, USA\",Tech,junior,Full-Time,50000,2023-02-10
Banker,\"Toronto, ON, Canada\",Finance,Mid,Contract,80000,2023-02-20
Nurse,\"Boston, MA, USA\",,mid,Part-Time,n/a,not-a-date
";

struct Harness {
    addr: std::net::SocketAddr,
    stop: Option<oneshot::Sender<()>>,
    _file: tempfile::NamedTempFile,
}

impl Drop for Harness {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

async fn start() -> Harness {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file.flush().unwrap();

    let state = Arc::new(AppState::load(file.path()).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server::serve(listener, state, async {
        let _ = rx.await;
    }));

    Harness {
        addr,
        stop: Some(tx),
        _file: file,
    }
}

/// Minimal HTTP/1.1 GET; returns (status, body).
async fn get(addr: std::net::SocketAddr, target: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap();
    (status, body.to_string())
}

async fn get_json(addr: std::net::SocketAddr, target: &str) -> Value {
    let (status, body) = get(addr, target).await;
    assert_eq!(status, 200, "body: {body}");
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn industry_filter_over_http() {
    let h = start().await;
    let data = get_json(h.addr, "/api/data?industry=Tech").await;

    assert_eq!(
        data["bar_data"],
        json!([
            {"Experience Level": "Senior", "Salary (USD)": 100000.0},
            {"Experience Level": "Junior", "Salary (USD)": 50000.0}
        ])
    );
    assert_eq!(data["pie_data"], json!([{"name": "Full-Time", "value": 2}]));
    assert_eq!(
        data["line_data"],
        json!([{"month": "2023-01", "count": 1}, {"month": "2023-02", "count": 1}])
    );
    assert_eq!(
        data["tree_data"],
        json!({"name": "root", "children": [
            {"name": "USA", "children": [{"name": "Tech", "value": 150000}]}
        ]})
    );
}

#[tokio::test]
async fn unfiltered_request_covers_missing_fields() {
    let h = start().await;
    let data = get_json(h.addr, "/api/data").await;

    assert_eq!(data["scatter_data"].as_array().unwrap().len(), 4);
    assert_eq!(data["parallel_data"].as_array().unwrap().len(), 3);
    assert_eq!(data["experience_levels"], json!(["Junior", "Mid", "Senior"]));
    assert_eq!(data["industries"], json!(["Finance", "Tech"]));
    assert_eq!(
        data["tree_data"]["children"][0],
        json!({"name": "USA", "children": [
            {"name": "Tech", "value": 150000},
            {"name": "Unknown", "value": 0}
        ]})
    );
    let pie_total: u64 = data["pie_data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["value"].as_u64().unwrap())
        .sum();
    assert_eq!(pie_total, 4);
}

#[tokio::test]
async fn unmatched_country_yields_empty_views() {
    let h = start().await;
    let data = get_json(h.addr, "/api/data?country=Mexico").await;

    assert_eq!(data.as_object().unwrap().len(), 8);
    assert_eq!(data["bar_data"], json!([]));
    assert_eq!(data["experience_levels"], json!([]));
    assert_eq!(data["tree_data"], json!({"name": "root", "children": []}));
}

#[tokio::test]
async fn options_and_unknown_paths() {
    let h = start().await;
    let options = get_json(h.addr, "/api/options").await;
    assert_eq!(
        options,
        json!({"industries": ["Finance", "Tech"], "countries": ["Canada", "USA"]})
    );

    let (status, body) = get(h.addr, "/").await;
    assert_eq!(status, 404);
    assert_eq!(body, "Not found");
}
