use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::users::UserRepository,
        value_objects::users::{CreateUserModel, UpgradePlanModel},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad, repositories::users::UserPostgres,
    },
};
use serde_json::json;

use crate::{axum_http::error_responses::AppError, usecases::users::UserUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let user_usecase = UserUseCase::new(Arc::new(user_repository));

    Router::new()
        .route("/users", post(create_user))
        .route("/users/:email", get(get_user))
        .route("/upgrade-plan", post(upgrade_plan))
        .with_state(Arc::new(user_usecase))
}

pub async fn create_user<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    Json(create_user_model): Json<CreateUserModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let user = user_usecase.create_user(create_user_model).await?;
    Ok(Json(user))
}

pub async fn get_user<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let user = user_usecase.get_user(email).await?;
    Ok(Json(user))
}

pub async fn upgrade_plan<T>(
    State(user_usecase): State<Arc<UserUseCase<T>>>,
    Json(upgrade_plan_model): Json<UpgradePlanModel>,
) -> Result<impl IntoResponse, AppError>
where
    T: UserRepository + Send + Sync + 'static,
{
    let message = user_usecase.upgrade_plan(upgrade_plan_model).await?;
    Ok(Json(json!({ "message": message })))
}
