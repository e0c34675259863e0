//! Router-level tests: real axum router, stub model client.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use pdf_extract_gateway::{
    router, DocumentType, ExtractionFailure, ExtractionService, ModelClient, Schema,
    EXTRACTION_FAILURE_TAG,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const PDF: &[u8] = b"%PDF-1.7\n%stub\n1 0 obj\n<<>>\nendobj\ntrailer\n<<>>\n%%EOF\n";

/// Answers every call with the same canned result.
struct StubModel {
    reply: Result<Value, fn() -> ExtractionFailure>,
    calls: AtomicUsize,
}

impl StubModel {
    fn ok(value: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(value),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(make: fn() -> ExtractionFailure) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(make),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ModelClient for StubModel {
    fn model_id(&self) -> &str {
        "stub"
    }

    async fn generate_structured(
        &self,
        _file_bytes: &[u8],
        _system_prompt: &str,
        _schema: &Schema,
    ) -> Result<Value, ExtractionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(v) => Ok(v.clone()),
            Err(make) => Err(make()),
        }
    }
}

fn server(model: Arc<StubModel>) -> TestServer {
    let service = Arc::new(ExtractionService::new(model));
    TestServer::new(router(service, 1024 * 1024)).unwrap()
}

fn pdf_form(bytes: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(bytes.to_vec())
            .file_name("invoice.pdf")
            .mime_type("application/pdf"),
    )
}

#[tokio::test]
async fn health_answers_ok_without_calling_the_model() {
    let model = StubModel::failing(|| ExtractionFailure::transport("down"));
    let server = server(model.clone());

    let resp = server.get("/health").await;
    resp.assert_status_ok();
    resp.assert_text("Ok");
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn every_document_route_is_mounted() {
    let model = StubModel::failing(|| ExtractionFailure::decode("stub"));
    let server = server(model.clone());

    for doc in DocumentType::ALL {
        let resp = server.post(doc.route()).multipart(pdf_form(PDF)).await;
        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
    assert_eq!(model.calls.load(Ordering::SeqCst), DocumentType::ALL.len());
}

#[tokio::test]
async fn gas_cost_is_flattened() {
    let server = server(StubModel::ok(json!([
        {"cost_type": "fixed_cost_td", "invoice_no": "3620001276", "quantity_mmbtu": 78932275,
         "unit_price_baht_mmbtu": 12.8869, "amount_baht": 1017192334.70},
        {"cost_type": "variable_cost_tc", "invoice_no": "3620001277", "quantity_mmbtu": 78932275,
         "unit_price_baht_mmbtu": 0.1996, "amount_baht": 15754882.09}
    ])));

    let resp = server.post("/ptt/tso/gas-cost").multipart(pdf_form(PDF)).await;
    resp.assert_status_ok();
    let body: Value = resp.json();

    assert_eq!(body["fix_cost_quantity"], json!(78932275));
    assert_eq!(body["fix_cost_price"], json!(12.8869));
    assert_eq!(body["variable_cost_price"], json!(0.1996));
    let sum = body["sum_of_fix_and_variable_cost"].as_f64().unwrap();
    assert!((sum - 1032947216.79).abs() < 1e-3, "got {sum}");
}

#[tokio::test]
async fn gas_areas_are_summed() {
    let server = server(StubModel::ok(json!({
        "volumeArea2KhanomMMBTU": 2165209,
        "volumeArea3OnshoreMMBTU": 87753753,
        "volumeArea4ChanaMMBTU": 2990682
    })));

    let resp = server.post("/ptt/tso/gas-amount").multipart(pdf_form(PDF)).await;
    resp.assert_status_ok();
    resp.assert_json(&json!({"volumeArea234": 92909644}));
}

#[tokio::test]
async fn b8_total_is_recomputed() {
    let server = server(StubModel::ok(json!({
        "platformName": "B8/32",
        "invoices": [
            {"vendor": "A", "invoiceNumber": "1", "amountExcludingVAT": 1000.5, "confidence": 97},
            {"vendor": "B", "invoiceNumber": "2", "amountExcludingVAT": 500.25, "confidence": 93}
        ],
        "totalInvoiceAmount": 99,
        "totalHeatQuantity": {"value": 12345, "confidence": 90},
        "confidenceScores": {"invoices": 95, "heatQuantity": 90, "overall": 92}
    })));

    let resp = server
        .post("/ptt/supply/b8-invoice-and-heat")
        .multipart(pdf_form(PDF))
        .await;
    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["totalInvoiceAmount"], json!(1500.75));
    assert_eq!(body["platformName"], "B8/32");
    assert_eq!(body["invoices"][0]["currency"], "THB");
    assert_eq!(body["totalHeatQuantity"]["unit"], "MMBTU");
}

#[tokio::test]
async fn plain_route_returns_validated_value() {
    let server = server(StubModel::ok(json!({
        "total_regas_value": 5447307387.79,
        "commentary": "dropped"
    })));

    let resp = server.post("/ptt/lng/regas-value").multipart(pdf_form(PDF)).await;
    resp.assert_status_ok();
    resp.assert_json(&json!({"total_regas_value": 5447307387.79}));
}

#[tokio::test]
async fn model_failure_renders_as_500() {
    let server = server(StubModel::failing(|| {
        ExtractionFailure::transport("HTTP 503 Service Unavailable")
    }));

    let resp = server.post("/extract/pelng").multipart(pdf_form(PDF)).await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["status"], "500");
    assert_eq!(body["error"]["_tag"], EXTRACTION_FAILURE_TAG);
    assert_eq!(body["error"]["kind"], "transport");
    assert!(body["message"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn schema_mismatch_renders_as_500() {
    let server = server(StubModel::ok(json!({"volumeArea2KhanomMMBTU": "lots"})));

    let resp = server.post("/ptt/tso/gas-amount").multipart(pdf_form(PDF)).await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["kind"], "validation");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("$.volumeArea2KhanomMMBTU"));
}

#[tokio::test]
async fn empty_upload_is_an_input_failure() {
    let model = StubModel::ok(json!({}));
    let server = server(model.clone());

    let resp = server.post("/extract/invoice").multipart(pdf_form(b"")).await;
    resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json();
    assert_eq!(body["error"]["kind"], "input");
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_file_part_is_422() {
    let model = StubModel::ok(json!({}));
    let server = server(model.clone());

    let resp = server
        .post("/extract/invoice")
        .multipart(MultipartForm::new().add_text("document", "x"))
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json();
    assert_eq!(body["status"], "422");
    assert!(body["message"].as_str().unwrap().contains("file"));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_pdf_upload_is_422() {
    let server = server(StubModel::ok(json!({})));

    let png = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"\x89PNG\r\n".to_vec())
            .file_name("scan.png")
            .mime_type("image/png"),
    );
    let resp = server.post("/extract/invoice").multipart(png).await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let disguised = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"hello".to_vec())
            .file_name("x.pdf")
            .mime_type("application/pdf"),
    );
    let resp = server.post("/extract/invoice").multipart(disguised).await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn octet_stream_upload_is_judged_by_magic_bytes() {
    let model = StubModel::ok(json!({"total_regas_value": 1}));
    let server = server(model.clone());

    let generic = |bytes: &[u8]| {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(bytes.to_vec())
                .file_name("upload.bin")
                .mime_type("application/octet-stream"),
        )
    };

    let resp = server.post("/ptt/lng/regas-value").multipart(generic(PDF)).await;
    resp.assert_status_ok();

    let resp = server.post("/ptt/lng/regas-value").multipart(generic(&b"MZ\x90\x00"[..])).await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn json_body_is_422() {
    let server = server(StubModel::ok(json!({})));

    let resp = server
        .post("/extract/invoice")
        .json(&json!({"file": "invoice.pdf"}))
        .await;
    resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = resp.json();
    assert_eq!(body["status"], "422");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = server(StubModel::ok(json!({})));
    server
        .post("/ptt/tso/unknown")
        .multipart(pdf_form(PDF))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
