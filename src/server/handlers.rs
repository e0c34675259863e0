use super::response::RequestRejection;
use super::AppState;
use crate::catalog::DocumentType;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::debug;

const FILE_FIELD: &str = "file";
const PDF_MAGIC: &[u8] = b"%PDF-";

pub(super) async fn health() -> &'static str {
    "Ok"
}

pub(super) async fn extract_document(
    State(state): State<AppState>,
    doc: DocumentType,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let bytes = match read_pdf(multipart).await {
        Ok(bytes) => bytes,
        Err(rejection) => return rejection.into_response(),
    };

    match state.service.extract(doc, &bytes).await {
        Ok(value) => Json(value).into_response(),
        Err(failure) => failure.into_response(),
    }
}

/// Pull the `file` part out of the upload and check it looks like a PDF.
///
/// An empty part is passed through so the service reports it as an
/// extraction input failure.
async fn read_pdf(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, RequestRejection> {
    let mut multipart = multipart.map_err(|e| {
        RequestRejection::unprocessable(format!(
            "Expected a multipart/form-data body: {}",
            e.body_text()
        ))
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(RequestRejection::from_multipart)?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_owned);
        if let Some(ct) = content_type.as_deref() {
            if !is_pdf_content_type(ct) {
                return Err(RequestRejection::unprocessable(format!(
                    "Expected a PDF upload in '{FILE_FIELD}', got content type '{ct}'"
                )));
            }
        }

        let bytes = field.bytes().await.map_err(RequestRejection::from_multipart)?;
        debug!(
            "received '{}' part: {} bytes, content type {:?}",
            FILE_FIELD,
            bytes.len(),
            content_type
        );

        if !bytes.is_empty() && !bytes.starts_with(PDF_MAGIC) {
            return Err(RequestRejection::unprocessable(format!(
                "'{FILE_FIELD}' is not a PDF document"
            )));
        }
        return Ok(bytes.to_vec());
    }

    Err(RequestRejection::unprocessable(format!(
        "Missing '{FILE_FIELD}' part in multipart body"
    )))
}

/// Clients often label uploads generically, so `application/octet-stream`
/// passes here and the `%PDF-` magic check decides.
fn is_pdf_content_type(ct: &str) -> bool {
    let essence = ct.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/pdf")
        || essence.eq_ignore_ascii_case("application/octet-stream")
}
