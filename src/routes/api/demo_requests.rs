use axum::{Json, Router, http::StatusCode, routing::post};

use crate::{
    response::{ApiResult, JsonApiResponse},
    services::demo_request_service::{DemoRequest, DemoRequestReceipt, DemoRequestService},
};

pub fn router() -> Router {
    Router::new().route("/demo-requests", post(submit))
}

async fn submit(Json(body): Json<DemoRequest>) -> ApiResult<DemoRequestReceipt> {
    let receipt = DemoRequestService::new().submit(&body)?;
    JsonApiResponse::with_status(StatusCode::ACCEPTED, "accepted", receipt)
}
