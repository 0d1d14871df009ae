/// Request body extraction
///
/// A thin wrapper around `axum::Json` that maps every deserialization
/// rejection to a 400 with the standard `{ "error": ... }` body. Axum's
/// default rejection is a 422 with a plain-text body, which would leak a
/// second error format into the API; bad enum values and malformed JSON are
/// validation failures here.

use axum::extract::{rejection::JsonRejection, FromRequest, Request};

use crate::error::ApiError;

/// JSON body extractor with 400 rejections
pub struct Json<T>(pub T);

impl<T: serde::Serialize> axum::response::IntoResponse for Json<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

#[axum::async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}
