use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use super::error::ApiError;

/// JSON body that has been deserialized and then checked with [`Validate`].
///
/// Unparsable JSON is rejected first. Missing required fields and type mismatches are
/// then reported with the path of the offending field, and bounds are reported by
/// validation with per-field details.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;

        let value: T = serde_path_to_error::deserialize(body).map_err(|error| {
            let path = error.path().to_string();
            ApiError::invalid_body(&path, error.into_inner().to_string())
        })?;
        value.validate()?;

        Ok(ValidatedJson(value))
    }
}
