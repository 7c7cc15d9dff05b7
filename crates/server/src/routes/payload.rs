use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;

/// Request body sent either as JSON or as an urlencoded form. Anything that
/// isn't declared as a form is read as JSON
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str())
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Payload(value))
        }
    }
}
