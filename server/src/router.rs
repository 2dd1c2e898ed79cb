use crate::{
  apis::{authenticate_user, health_check, logout_user, refresh_token},
  auth::request_gate,
  constants::{AUTHENTICATE_USER_METHOD, HEALTH_METHOD, LOGOUT_USER_METHOD, REFRESH_TOKEN_METHOD},
  state::AppState,
};
use axum::{middleware, routing::post, Router};
use std::sync::Arc;

/// Every RPC is a POST on its fully qualified method name, behind the request gate
pub fn build_router(shared_state: Arc<AppState>) -> Router {
  Router::new()
    .route(AUTHENTICATE_USER_METHOD, post(authenticate_user))
    .route(REFRESH_TOKEN_METHOD, post(refresh_token))
    .route(LOGOUT_USER_METHOD, post(logout_user))
    .route(HEALTH_METHOD, post(health_check))
    .layer(middleware::from_fn_with_state(shared_state.clone(), request_gate))
    .with_state(shared_state)
}
