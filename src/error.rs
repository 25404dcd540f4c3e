//! Service-level errors. Engine functions are infallible; these come from
//! requests that reference state the server does not have.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
  #[error("unknown user {0}")]
  UnknownUser(String),

  #[error("unknown or already answered task {0}")]
  UnknownTask(String),

  #[error("invalid request: {0}")]
  InvalidRequest(String),
}

impl EngineError {
  pub fn status(&self) -> StatusCode {
    match self {
      EngineError::UnknownUser(_) | EngineError::UnknownTask(_) => StatusCode::NOT_FOUND,
      EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for EngineError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorOut { error: self.to_string() })).into_response()
  }
}
