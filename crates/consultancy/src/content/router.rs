use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::catalog::ContentCatalog;
use super::domain::{ContentBody, ContentDocument, ContentDraft};
use crate::auth::{AuthenticatedAdmin, Role};
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};

/// Public reads under `T::PUBLIC_PATH`, editor CRUD under `T::ADMIN_PATH`.
pub fn content_router<T: ContentBody>(catalog: Arc<ContentCatalog<T>>) -> Router {
    Router::new()
        .route(T::PUBLIC_PATH, get(public_list_handler::<T>))
        .route(
            &format!("{}/:slug", T::PUBLIC_PATH),
            get(public_detail_handler::<T>),
        )
        .route(
            T::ADMIN_PATH,
            get(admin_list_handler::<T>).post(create_handler::<T>),
        )
        .route(
            &format!("{}/:id", T::ADMIN_PATH),
            get(admin_detail_handler::<T>)
                .put(update_handler::<T>)
                .delete(delete_handler::<T>),
        )
        .with_state(catalog)
}

pub(crate) async fn public_list_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Page<ContentDocument<T>>>, AppError> {
    let Query(page) = query?;
    Ok(Json(catalog.list_published(page)?))
}

pub(crate) async fn public_detail_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    Path(slug): Path<String>,
) -> Result<Json<ContentDocument<T>>, AppError> {
    Ok(Json(catalog.get_published(&slug)?))
}

pub(crate) async fn admin_list_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    admin: AuthenticatedAdmin,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Page<ContentDocument<T>>>, AppError> {
    admin.require(Role::Editor)?;
    let Query(page) = query?;
    Ok(Json(catalog.list_all(page)?))
}

pub(crate) async fn admin_detail_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    admin: AuthenticatedAdmin,
    Path(id): Path<String>,
) -> Result<Json<ContentDocument<T>>, AppError> {
    admin.require(Role::Editor)?;
    Ok(Json(catalog.get(&id)?))
}

pub(crate) async fn create_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    admin: AuthenticatedAdmin,
    payload: Result<Json<ContentDraft<T>>, JsonRejection>,
) -> Result<(StatusCode, Json<ContentDocument<T>>), AppError> {
    admin.require(Role::Editor)?;
    let Json(draft) = payload?;
    Ok((StatusCode::CREATED, Json(catalog.create(draft)?)))
}

pub(crate) async fn update_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    admin: AuthenticatedAdmin,
    Path(id): Path<String>,
    payload: Result<Json<ContentDraft<T>>, JsonRejection>,
) -> Result<Json<ContentDocument<T>>, AppError> {
    admin.require(Role::Editor)?;
    let Json(draft) = payload?;
    Ok(Json(catalog.update(&id, draft)?))
}

pub(crate) async fn delete_handler<T: ContentBody>(
    State(catalog): State<Arc<ContentCatalog<T>>>,
    admin: AuthenticatedAdmin,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    admin.require(Role::Editor)?;
    catalog.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
