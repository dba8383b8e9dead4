use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use crates::{
    domain::{
        repositories::{payments::PaymentRepository, users::UserRepository},
        value_objects::payments::PurchasePremiumModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{payments::PaymentPostgres, users::UserPostgres},
    },
    payments::simulated_processor::SimulatedPaymentProcessor,
};

use crate::{
    axum_http::error_responses::AppError,
    usecases::payments::{PaymentProcessor, PaymentUseCase},
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(user_repository),
        Arc::new(payment_repository),
        Arc::new(SimulatedPaymentProcessor::new()),
    );

    Router::new()
        .route("/purchase-premium", post(purchase_premium))
        .with_state(Arc::new(payment_usecase))
}

pub async fn purchase_premium<U, Pay, Proc>(
    State(payment_usecase): State<Arc<PaymentUseCase<U, Pay, Proc>>>,
    Json(purchase_premium_model): Json<PurchasePremiumModel>,
) -> Result<impl IntoResponse, AppError>
where
    U: UserRepository + Send + Sync + 'static,
    Pay: PaymentRepository + Send + Sync + 'static,
    Proc: PaymentProcessor + Send + Sync + 'static,
{
    let result = payment_usecase
        .purchase_premium(purchase_premium_model)
        .await?;
    Ok(Json(result))
}
