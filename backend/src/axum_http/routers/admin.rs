use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{
            content_ideas::ContentIdeaRepository, payments::PaymentRepository,
            users::UserRepository,
        },
        value_objects::{admin::AdminLoginModel, enums::user_plans::UserPlan},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            content_ideas::ContentIdeaPostgres, payments::PaymentPostgres, users::UserPostgres,
        },
    },
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    auth::BearerToken, axum_http::error_responses::AppError,
    config::config_model::AdminSecret, usecases::admin::AdminUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>, admin_secret: AdminSecret) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let content_idea_repository = ContentIdeaPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let admin_usecase = AdminUseCase::new(
        Arc::new(user_repository),
        Arc::new(content_idea_repository),
        Arc::new(payment_repository),
        admin_secret,
    );

    Router::new()
        .route("/login", post(login))
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
        .route("/payments", get(list_payments))
        .route("/users/:user_id/upgrade", post(upgrade_user))
        .route("/users/:user_id/downgrade", post(downgrade_user))
        .with_state(Arc::new(admin_usecase))
}

pub async fn login<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    Json(admin_login_model): Json<AdminLoginModel>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    let login = admin_usecase.login(admin_login_model)?;
    Ok(Json(login))
}

pub async fn dashboard<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    admin_usecase.authorize(&token)?;
    let dashboard = admin_usecase.dashboard().await?;
    Ok(Json(dashboard))
}

pub async fn list_users<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    admin_usecase.authorize(&token)?;
    let users = admin_usecase.list_users().await?;
    Ok(Json(users))
}

pub async fn list_payments<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    admin_usecase.authorize(&token)?;
    let payments = admin_usecase.list_payments().await?;
    Ok(Json(payments))
}

pub async fn upgrade_user<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    admin_usecase.authorize(&token)?;
    let message = admin_usecase.set_user_plan(user_id, UserPlan::Premium).await?;
    Ok(Json(json!({ "message": message })))
}

pub async fn downgrade_user<U, I, Pay>(
    State(admin_usecase): State<Arc<AdminUseCase<U, I, Pay>>>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    I: ContentIdeaRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
{
    admin_usecase.authorize(&token)?;
    let message = admin_usecase.set_user_plan(user_id, UserPlan::Free).await?;
    Ok(Json(json!({ "message": message })))
}
