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
        communication::{Created, Message},
        item::{Item, NewItem},
    },
    resources::ItemResource,
    state::AppState,
};

pub async fn create_item_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(item) = payload?;
    info!("Create item request: {}", item.name);

    let id = ItemResource::new(&state.store)?.create(item)?;

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: Some("Item created successfully".to_string()),
            id: id.to_string(),
        }),
    ))
}

pub async fn list_items_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Item>>, AppError> {
    info!("List items request");

    Ok(Json(ItemResource::new(&state.store)?.list()?))
}

pub async fn delete_item_handler(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<String>,
) -> Result<Json<Message>, AppError> {
    info!("Delete item request: {}", item_id);

    ItemResource::new(&state.store)?.delete(&item_id)?;

    Ok(Json(Message::new(format!(
        "Item {} deleted successfully",
        item_id
    ))))
}
