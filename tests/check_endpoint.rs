use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use canarycheck::controller::page::PageView;
use canarycheck::controller::types::{SelectedFile, UiState};
use canarycheck::controller::upload::{SubmitOutcome, UploadController};
use canarycheck::controller::view::{Element, UiEvent};
use canarycheck::core::check_client::HttpCheckClient;
use canarycheck::error::{CONNECTION_FAILED_MESSAGE, CheckError};
use canarycheck::utils::hash::sha256_hex;
use canarycheck::utils::urls::check_endpoint;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

// Stand-in for the real /check service: PDF magic in a non-.pdf file is a
// mismatch, "reject" in the name is a handled failure.
async fn fake_check(mut multipart: Multipart) -> impl IntoResponse {
    let mut filename = None;
    let mut data = Vec::new();
    let mut scan = false;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().map(String::from);
                data = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "virustotal" => scan = field.text().await.unwrap_or_default() == "true",
            _ => {}
        }
    }

    let Some(filename) = filename.filter(|f| !f.is_empty()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "No file selected."})));
    };
    if filename.contains("reject") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "File processing failed."})),
        );
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_uppercase())
        .unwrap_or_else(|| "NONE".to_string());
    let detected = if data.starts_with(b"%PDF") { "PDF" } else { "UNKNOWN" };
    let mismatch = detected != "UNKNOWN" && detected != extension;

    let mut body = json!({
        "filename": filename,
        "extension": extension,
        "detected_type": detected,
        "detected_description": "PDF Document",
        "mismatch": mismatch,
        "message": format!("claims `{extension}` but we detected: `{detected}`"),
    });
    if mismatch && scan {
        let hash = sha256_hex(&data);
        body["virustotal"] = json!({
            "filehash": hash,
            "malicious": 0,
            "suspicious": 0,
            "undetected": 5,
            "harmless": 0,
            "date": 1700000000,
            "permalink": format!("https://www.virustotal.com/gui/file/{hash}"),
            "status": "clean"
        });
    }
    (StatusCode::OK, Json(body))
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn controller(addr: SocketAddr) -> (UploadController<HttpCheckClient, PageView>, Arc<PageView>) {
    let url = check_endpoint(&format!("http://{addr}")).unwrap();
    let client = HttpCheckClient::new(url, Some(Duration::from_secs(10))).unwrap();
    let view = Arc::new(PageView::new());
    (UploadController::new(Arc::new(client), view.clone()), view)
}

#[tokio::test]
async fn mismatch_with_clean_scan_round_trip() {
    let addr = serve(Router::new().route("/check", post(fake_check))).await;
    let (ctl, view) = controller(addr);

    ctl.handle(UiEvent::FilePicked(SelectedFile::new("a.txt", &b"%PDF-1.7 body"[..])))
        .await;
    ctl.handle(UiEvent::ScanToggled(true)).await;
    let outcome = ctl.handle(UiEvent::Submit).await;

    match outcome {
        Some(SubmitOutcome::Shown(result)) => {
            assert!(result.mismatch);
            assert_eq!(result.extension, "TXT");
            assert!(result.virustotal.is_some());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(ctl.state(), UiState::ShowingResult);

    let page = view.render_page();
    assert!(page.contains(r#"class="result-box mismatch""#));
    assert!(page.contains("a.txt"));
    assert!(page.contains("scan-clean"));
    assert!(page.contains(&sha256_hex(b"%PDF-1.7 body")));
    assert!(!page.contains(r#"id="submitButton" class="btn" disabled"#));
}

#[tokio::test]
async fn scan_flag_off_means_no_scan_panel() {
    let addr = serve(Router::new().route("/check", post(fake_check))).await;
    let (ctl, view) = controller(addr);

    ctl.select_file(SelectedFile::new("a.txt", &b"%PDF-1.4"[..]));
    ctl.submit().await;

    let html = view.html(Element::ResultContent).unwrap();
    assert!(html.contains("Mismatch Detected"));
    assert!(!html.contains("VirusTotal"));
}

#[tokio::test]
async fn hostile_filename_comes_back_escaped() {
    let addr = serve(Router::new().route("/check", post(fake_check))).await;
    let (ctl, view) = controller(addr);

    ctl.select_file(SelectedFile::new("<script>alert(1)</script>.txt", &b"%PDF"[..]));
    ctl.submit().await;

    let page = view.render_page();
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;.txt"));
}

#[tokio::test]
async fn structured_server_error_is_shown() {
    let addr = serve(Router::new().route("/check", post(fake_check))).await;
    let (ctl, view) = controller(addr);

    ctl.select_file(SelectedFile::new("reject.bin", &b"x"[..]));
    let outcome = ctl.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(CheckError::Server(_))));
    assert_eq!(ctl.state(), UiState::ShowingError);
    assert!(view.html(Element::ResultContent).unwrap().contains("File processing failed."));
    assert!(view.is_enabled(Element::SubmitButton));
}

#[tokio::test]
async fn html_error_page_counts_as_transport_failure() {
    let router = Router::new().route(
        "/check",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let addr = serve(router).await;
    let (ctl, view) = controller(addr);

    ctl.select_file(SelectedFile::new("a.txt", &b"x"[..]));
    let outcome = ctl.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(CheckError::Transport(_))));
    assert!(view.html(Element::ResultContent).unwrap().contains(CONNECTION_FAILED_MESSAGE));
}

#[tokio::test]
async fn refused_connection_releases_the_form() {
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let (ctl, view) = controller(addr);

    ctl.select_file(SelectedFile::new("a.txt", &b"x"[..]));
    let outcome = ctl.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(CheckError::Transport(_))));
    assert_eq!(ctl.state(), UiState::ShowingError);
    assert!(view.html(Element::ResultContent).unwrap().contains(CONNECTION_FAILED_MESSAGE));
    assert!(view.is_enabled(Element::SubmitButton));
    assert!(!view.is_visible(Element::LoadingIndicator));
}

#[tokio::test]
async fn slow_server_hits_the_configured_timeout() {
    let router = Router::new().route(
        "/check",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let addr = serve(router).await;
    let url = check_endpoint(&format!("http://{addr}")).unwrap();
    let client = HttpCheckClient::new(url, Some(Duration::from_millis(200))).unwrap();
    let view = Arc::new(PageView::new());
    let ctl = UploadController::new(Arc::new(client), view.clone());

    ctl.select_file(SelectedFile::new("a.txt", &b"x"[..]));
    let outcome = ctl.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(CheckError::Transport(_))));
    assert!(view.is_enabled(Element::SubmitButton));
}
