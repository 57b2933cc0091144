use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use parking_desk::{config::Settings, notice, Client, Error};
use serde_json::{json, Value};
use shared::data::{EntryRequest, ExitRequest, Reply, VehicleType};
use tokio::{net::TcpListener, sync::mpsc};
use url::Url;

const PDF: &[u8] = b"%PDF-1.4 report";

/// Serves `router` on a free local port and returns a client pointed at it.
async fn serve(router: Router) -> Client {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    let server = Url::parse(&format!("http://{address}")).unwrap();
    Client::new(Settings::new(server)).unwrap()
}

fn pdf_router() -> Router {
    Router::new().route(
        "/report/pdf",
        get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], PDF) }),
    )
}

#[tokio::test]
async fn entry_posts_form_and_reports_slot() {
    let (sent, mut seen) = mpsc::unbounded_channel();
    let router = Router::new().route(
        "/api/entry",
        post(move |Json(body): Json<Value>| {
            let sent = sent.clone();
            async move {
                sent.send(body).unwrap();
                Json(json!({
                    "success": true,
                    "vehicle": {"number": "KA01", "vtype": "ev", "entry_time": "2024-05-01T10:00:00", "slot": 1, "is_vip": true}
                }))
            }
        }),
    );
    let client = serve(router).await;
    let request = EntryRequest {
        number: "KA01".into(),
        vtype: VehicleType::Ev,
        vip: true,
    };

    let outcome = client.enter(&request).await;

    assert_eq!(
        seen.recv().await.unwrap(),
        json!({"number": "KA01", "vtype": "ev", "vip": true})
    );
    assert_eq!(
        notice::entry("KA01", &outcome).text,
        "Parked KA01 at slot 1"
    );
}

#[tokio::test]
async fn rejected_entry_keeps_server_text() {
    let router = Router::new().route(
        "/api/entry",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "error": "Vehicle KA01 already parked at slot 1."})),
            )
        }),
    );
    let client = serve(router).await;
    let request = EntryRequest {
        number: "KA01".into(),
        vtype: VehicleType::Car,
        vip: false,
    };

    let outcome = client.enter(&request).await.unwrap();

    assert_eq!(
        outcome,
        Reply::Rejected("Vehicle KA01 already parked at slot 1.".into())
    );
}

#[tokio::test]
async fn exit_returns_billed_record() {
    let (sent, mut seen) = mpsc::unbounded_channel();
    let router = Router::new().route(
        "/api/exit",
        post(move |body: String| {
            let sent = sent.clone();
            async move {
                sent.send(body).unwrap();
                Json(json!({
                    "success": true,
                    "record": {
                        "vehicle_number": "KA01", "vtype": "car",
                        "entry": "2024-05-01T10:00:00", "exit": "2024-05-01T13:30:00",
                        "slot": 4, "fee": 40.0,
                        "charge_meta": {"duration_seconds": 12600, "duration_hours": 3.5, "charged_hours": 4, "extra_hours": 2, "fee": 40.0, "multiplier": 1.0}
                    }
                }))
            }
        }),
    );
    let client = serve(router).await;

    let outcome = client
        .exit(&ExitRequest {
            number: "KA01".into(),
        })
        .await;

    assert_eq!(seen.recv().await.unwrap(), r#"{"number":"KA01"}"#);
    assert_eq!(
        notice::exit(&outcome).text,
        "Vehicle KA01 exited from slot 4. Fee: ₹ 40.00"
    );
    let Ok(Reply::Accepted(record)) = outcome else {
        panic!("expected an accepted exit");
    };
    assert_eq!(
        record.charge_meta.map(|charge| charge.extra_hours),
        Some(2.0)
    );
}

#[tokio::test]
async fn status_is_a_plain_get() {
    let router = Router::new().route(
        "/api/status",
        get(|| async {
            Json(json!({
                "total_slots": 24, "occupied_count": 2, "free_count": 22,
                "free_slots": [], "occupied": [], "vip_slots": [1, 2]
            }))
        }),
    );
    let client = serve(router).await;

    let status = client.status().await.unwrap();

    assert_eq!((status.occupied_count, status.free_count), (2, 22));
    assert_eq!(status.vip_slots, vec![1, 2]);
}

fn revenue_router(sent: mpsc::UnboundedSender<HashMap<String, String>>) -> Router {
    Router::new().route(
        "/api/revenue",
        get(move |Query(query): Query<HashMap<String, String>>| {
            let sent = sent.clone();
            async move {
                let date = query.get("date").cloned().unwrap_or_else(|| "2024-05-02".into());
                sent.send(query).unwrap();
                Json(json!({"date": date, "total_vehicles": 3, "total_revenue": 55.5, "records": []}))
            }
        }),
    )
}

#[tokio::test]
async fn revenue_sends_requested_date() {
    let (sent, mut seen) = mpsc::unbounded_channel();
    let client = serve(revenue_router(sent)).await;

    let outcome = client
        .revenue(NaiveDate::from_ymd_opt(2024, 5, 1))
        .await;

    let query = seen.recv().await.unwrap();
    assert_eq!(query.get("date").map(String::as_str), Some("2024-05-01"));
    assert_eq!(
        notice::revenue(&outcome).text,
        "Date: 2024-05-01\nVehicles: 3\nRevenue: ₹ 55.5"
    );
}

#[tokio::test]
async fn revenue_without_date_has_no_query() {
    let (sent, mut seen) = mpsc::unbounded_channel();
    let client = serve(revenue_router(sent)).await;

    let outcome = client.revenue(None).await.unwrap();

    assert!(seen.recv().await.unwrap().is_empty());
    assert!(outcome.is_accepted());
}

#[tokio::test]
async fn html_answer_is_a_decode_failure() {
    let router = Router::new().route(
        "/api/status",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Html("<h1>oops</h1>")) }),
    );
    let client = serve(router).await;

    let outcome = client.status().await;

    assert!(matches!(outcome, Err(Error::Decode(_))));
    assert_eq!(notice::status(&outcome).text, notice::GENERIC_ERROR);
}

#[tokio::test]
async fn report_is_downloaded_when_pdf() {
    let client = serve(pdf_router()).await;

    let pdf = client.daily_report().await.unwrap();

    assert_eq!(pdf, PDF);
}

#[tokio::test]
async fn report_fallback_page_is_unavailable() {
    let router = Router::new().route("/report/pdf", get(|| async { Html("<html></html>") }));
    let client = serve(router).await;

    let outcome = client.daily_report().await;

    assert!(matches!(outcome, Err(Error::ReportUnavailable(kind)) if kind.starts_with("text/html")));
}

#[tokio::test]
async fn report_is_saved_to_disk() {
    let client = serve(pdf_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily_report.pdf");

    let size = client.save_daily_report(&path).await.unwrap();

    assert_eq!(size, PDF.len());
    assert_eq!(std::fs::read(&path).unwrap(), PDF);
}

#[tokio::test]
async fn unwritable_report_path_is_an_io_error() {
    let client = serve(pdf_router()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("daily_report.pdf");

    let outcome = client.save_daily_report(&path).await;

    assert!(matches!(outcome, Err(Error::Io(_))));
    assert_eq!(notice::Notice::failure(&outcome.unwrap_err()).text, notice::GENERIC_ERROR);
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let address = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let server = Url::parse(&format!("http://{address}")).unwrap();
    let client = Client::new(Settings::new(server)).unwrap();

    let outcome = client.status().await;

    assert!(matches!(outcome, Err(Error::Http(_))));
}
