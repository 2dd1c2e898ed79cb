use super::response::HealthResponse;
use axum::Json;

pub async fn health_check() -> Json<HealthResponse> {
  Json(HealthResponse {
    status: "SERVING".to_string(),
  })
}
