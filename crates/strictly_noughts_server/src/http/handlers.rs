//! Route handlers for `/api/v1/games`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use strictly_noughts::Board;
use tracing::{debug, error, instrument};

use crate::domain::GameId;
use crate::http::AppState;
use crate::http::dto::{GameBody, LocationBody};
use crate::http::error::ApiError;
use crate::service::ServiceError;

/// Runs service work on the blocking pool.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(e) => {
            error!(error = %e, "Blocking task failed");
            Err(ApiError::internal())
        }
    }
}

fn parse_id(raw: &str) -> Result<GameId, ApiError> {
    GameId::parse(raw).map_err(|e| {
        debug!(error = %e, "Rejecting id");
        ApiError::bad_request("Invalid id")
    })
}

/// Checks a request body and extracts its board.
fn parse_body(body: Result<Json<GameBody>, JsonRejection>) -> Result<Board, ApiError> {
    let Json(body) = body.map_err(|e| {
        debug!(error = %e, "Rejecting body");
        ApiError::bad_request("Invalid request body")
    })?;

    if !body.id.is_empty() {
        return Err(ApiError::bad_request("Unexpected parameter: id"));
    }
    if !body.status.is_empty() {
        return Err(ApiError::bad_request("Unexpected parameter: status"));
    }
    Board::parse(&body.board).map_err(|e| {
        debug!(error = %e, "Rejecting board");
        ApiError::bad_request("Invalid board")
    })
}

/// `GET /api/v1/games`
#[instrument(skip(state))]
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<GameBody>>, ApiError> {
    let service = state.service.clone();
    let games = blocking(move || service.all()).await?;
    Ok(Json(games.iter().map(GameBody::from).collect()))
}

/// `POST /api/v1/games`
#[instrument(skip(state, body))]
pub async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<GameBody>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<LocationBody>), ApiError> {
    let board = parse_body(body)?;

    let service = state.service.clone();
    let game = blocking(move || service.create(board)).await?;

    let location = format!("{}/api/v1/games/{}", state.public_url, game.id());
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(&location).map_err(|e| {
        error!(error = %e, location = %location, "Unusable Location header");
        ApiError::internal()
    })?;
    headers.insert(header::LOCATION, value);

    Ok((StatusCode::CREATED, headers, Json(LocationBody { location })))
}

/// `GET /api/v1/games/{id}`
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GameBody>, ApiError> {
    let id = parse_id(&id)?;

    let service = state.service.clone();
    let game = blocking(move || service.get(&id)).await?;
    Ok(Json(GameBody::from(&game)))
}

/// `PUT /api/v1/games/{id}`
#[instrument(skip(state, body))]
pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GameBody>, JsonRejection>,
) -> Result<Json<GameBody>, ApiError> {
    let id = parse_id(&id)?;
    let board = parse_body(body)?;

    let service = state.service.clone();
    let game = blocking(move || service.update(&id, board)).await?;
    Ok(Json(GameBody::from(&game)))
}

/// `DELETE /api/v1/games/{id}`
#[instrument(skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    let service = state.service.clone();
    blocking(move || service.delete(&id)).await?;
    Ok(StatusCode::OK)
}
