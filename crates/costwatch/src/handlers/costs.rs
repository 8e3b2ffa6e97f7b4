//! Cost creation handler.

use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    Form, Json,
};

use costwatch_core::costs::{Cost, CreateCostRequest};

use crate::{handlers::ApiError, state::AppState};

/// Request body accepted as JSON or as an urlencoded form.
///
/// The content type picks the decoder. Anything that is not JSON goes
/// through the form decoder, which rejects unsupported types itself.
#[derive(Debug)]
pub struct CostPayload(pub CreateCostRequest);

impl<S> FromRequest<S> for CostPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<CreateCostRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<CreateCostRequest>::from_request(req, state).await?;
            Ok(Self(payload))
        }
    }
}

/// POST /addcost - Store a new cost and return it with its assigned id.
pub async fn add_cost(
    State(state): State<AppState>,
    CostPayload(request): CostPayload,
) -> Result<Json<Cost>, ApiError> {
    let cost = state.costs.create_cost(&request).await?;
    Ok(Json(cost))
}
