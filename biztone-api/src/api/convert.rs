//! Conversion endpoint

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Json, Router,
};
use biztone_common::api::{ConversionRequest, ConversionResult};

use crate::converter::ConvertError;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/convert
///
/// Takes the raw body so that any unparseable payload maps onto
/// "No text provided" instead of an extractor rejection. A body over the
/// router's size limit is answered with 413.
pub async fn convert_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<ConversionResult>> {
    let body = body?;
    let request = ConversionRequest::from_json_bytes(&body)?;

    tracing::debug!(
        target_audience = %request.target(),
        chars = request.text().chars().count(),
        "Converting text"
    );

    match state.converter.convert(&request).await {
        Ok(result) => {
            tracing::info!(
                target_audience = %result.target,
                source = ?result.source,
                "Conversion complete"
            );
            Ok(Json(result))
        }
        Err(err @ ConvertError::Upstream { .. }) => {
            let report = anyhow::Error::new(err);
            tracing::error!(
                target_audience = %request.target(),
                error = ?report,
                "Conversion failed"
            );
            state.error_log.record(request.target(), report).await;
            Err(ApiError::UpstreamFailure)
        }
    }
}

/// Build conversion routes
pub fn convert_routes() -> Router<AppState> {
    Router::new().route("/api/convert", post(convert_text))
}
