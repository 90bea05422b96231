use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use log::info;

use crate::{
    error::AppError,
    models::{
        communication::{Created, Status},
        user::{NewUser, User},
    },
    resources::UserResource,
    state::AppState,
};

pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(user) = payload?;
    info!("Create user request: {}", user.username);

    let id = UserResource::new(&state.store)?.create(user)?;

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: None,
            id: id.to_string(),
        }),
    ))
}

pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, AppError> {
    info!("List users request");

    Ok(Json(UserResource::new(&state.store)?.list()?))
}

pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Status>, AppError> {
    info!("Delete user request: {}", user_id);

    UserResource::new(&state.store)?.delete(&user_id)?;

    Ok(Json(Status::new("deleted")))
}
