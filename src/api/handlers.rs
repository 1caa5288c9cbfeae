use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::Utc;

use crate::api::models::{
    ApiError, CreateOccasionRequest, CreatePersonRequest, ErrorResponse, OccasionResponse,
    PayoutRequest, PreviewRequest, PreviewResponse, ReassignedResponse, UpdateOccasionRequest,
};
use crate::logger::in_memory::InMemoryAuditLog;
use crate::models::{AuditLogEntry, Person, Transaction, TransactionDraft};
use crate::payout::{PersonBalance, Transfer};
use crate::service::LedgerService;
use crate::storage::in_memory::InMemoryStorage;

pub type SharedService = Arc<LedgerService<InMemoryAuditLog, InMemoryStorage>>;

// Define API routes
pub fn api_routes(service: SharedService) -> Router {
    Router::new()
        .route("/api/people", get(list_people).post(create_person))
        .route("/api/occasions", get(list_occasions).post(create_occasion))
        .route(
            "/api/occasions/{occasion_id}",
            put(update_occasion).delete(delete_occasion),
        )
        .route(
            "/api/occasions/{occasion_id}/disconnect",
            put(disconnect_transactions),
        )
        .route("/api/ledger", get(list_transactions).post(create_transaction))
        .route(
            "/api/ledger/preview",
            post(preview_transaction),
        )
        .route(
            "/api/ledger/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .route("/api/payouts", post(compute_payouts))
        .route("/api/payouts/balances", post(compute_balances))
        .route("/api/audit", get(list_audit_entries))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/people",
    responses(
        (status = 200, description = "Roster retrieved", body = [Person]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_people(State(service): State<SharedService>) -> Result<Json<Vec<Person>>, ApiError> {
    Ok(Json(service.list_people().await?))
}

#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person added to roster", body = Person),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_person(
    State(service): State<SharedService>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = service
        .add_person(Person {
            id: req.id,
            name: req.name,
            color: req.color,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(person)))
}

#[utoipa::path(
    get,
    path = "/api/occasions",
    responses(
        (status = 200, description = "Occasions with derived time-state", body = [OccasionResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_occasions(
    State(service): State<SharedService>,
) -> Result<Json<Vec<OccasionResponse>>, ApiError> {
    let now = Utc::now();
    let occasions = service.list_occasions().await?;
    Ok(Json(
        occasions
            .into_iter()
            .map(|occasion| OccasionResponse::new(occasion, now))
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/occasions",
    request_body = CreateOccasionRequest,
    responses(
        (status = 201, description = "Occasion created", body = OccasionResponse),
        (status = 400, description = "Invalid occasion window", body = ErrorResponse),
        (status = 404, description = "Included person not found", body = ErrorResponse)
    )
)]
pub async fn create_occasion(
    State(service): State<SharedService>,
    Json(req): Json<CreateOccasionRequest>,
) -> Result<(StatusCode, Json<OccasionResponse>), ApiError> {
    let occasion = service
        .create_occasion(req.name, req.start_date, req.end_date, req.included_people)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(OccasionResponse::new(occasion, Utc::now())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/occasions/{occasion_id}",
    params(("occasion_id" = String, Path, description = "ID of the occasion to update")),
    request_body = UpdateOccasionRequest,
    responses(
        (status = 200, description = "Occasion updated", body = OccasionResponse),
        (status = 400, description = "Invalid occasion window", body = ErrorResponse),
        (status = 404, description = "Occasion not found", body = ErrorResponse)
    )
)]
pub async fn update_occasion(
    State(service): State<SharedService>,
    Path(occasion_id): Path<String>,
    Json(req): Json<UpdateOccasionRequest>,
) -> Result<Json<OccasionResponse>, ApiError> {
    let window = match (req.start_date, req.end_date) {
        (Some(start), Some(end)) => Some((start, end)),
        _ => None,
    };
    let occasion = service
        .update_occasion(&occasion_id, req.name, window, req.included_people)
        .await?;
    Ok(Json(OccasionResponse::new(occasion, Utc::now())))
}

#[utoipa::path(
    delete,
    path = "/api/occasions/{occasion_id}",
    params(("occasion_id" = String, Path, description = "ID of the occasion to delete")),
    responses(
        (status = 200, description = "Occasion deleted, transactions detached", body = ReassignedResponse),
        (status = 404, description = "Occasion not found", body = ErrorResponse)
    )
)]
pub async fn delete_occasion(
    State(service): State<SharedService>,
    Path(occasion_id): Path<String>,
) -> Result<Json<ReassignedResponse>, ApiError> {
    let reassigned = service.delete_occasion(&occasion_id).await?;
    Ok(Json(ReassignedResponse { reassigned }))
}

#[utoipa::path(
    put,
    path = "/api/occasions/{occasion_id}/disconnect",
    params(("occasion_id" = String, Path, description = "ID of the occasion to disconnect")),
    responses(
        (status = 200, description = "Transactions detached from occasion", body = ReassignedResponse),
        (status = 404, description = "Occasion not found", body = ErrorResponse)
    )
)]
pub async fn disconnect_transactions(
    State(service): State<SharedService>,
    Path(occasion_id): Path<String>,
) -> Result<Json<ReassignedResponse>, ApiError> {
    let reassigned = service.disconnect_transactions(&occasion_id).await?;
    Ok(Json(ReassignedResponse { reassigned }))
}

#[utoipa::path(
    get,
    path = "/api/ledger",
    responses(
        (status = 200, description = "All transactions, oldest first", body = [Transaction]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(service): State<SharedService>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(service.list_transactions().await?))
}

#[utoipa::path(
    post,
    path = "/api/ledger",
    request_body = TransactionDraft,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Malformed transaction", body = ErrorResponse),
        (status = 404, description = "Occasion not found", body = ErrorResponse)
    )
)]
pub async fn create_transaction(
    State(service): State<SharedService>,
    Json(draft): Json<TransactionDraft>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let tx = service.create_transaction(draft).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

#[utoipa::path(
    put,
    path = "/api/ledger/{transaction_id}",
    params(("transaction_id" = String, Path, description = "ID of the transaction to update")),
    request_body = TransactionDraft,
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Malformed transaction", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(service): State<SharedService>,
    Path(transaction_id): Path<String>,
    Json(draft): Json<TransactionDraft>,
) -> Result<Json<Transaction>, ApiError> {
    let tx = service.update_transaction(&transaction_id, draft).await?;
    Ok(Json(tx))
}

#[utoipa::path(
    delete,
    path = "/api/ledger/{transaction_id}",
    params(("transaction_id" = String, Path, description = "ID of the transaction to delete")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    )
)]
pub async fn delete_transaction(
    State(service): State<SharedService>,
    Path(transaction_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_transaction(&transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/ledger/preview",
    request_body = PreviewRequest,
    responses(
        (status = 200, description = "Recomputed totals for the draft", body = PreviewResponse),
        (status = 400, description = "Malformed draft", body = ErrorResponse)
    )
)]
pub async fn preview_transaction(
    State(service): State<SharedService>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let totals = service.preview(&req.draft, req.tip_percent);
    let deltas = if req.include_deltas {
        Some(service.preview_deltas(req.draft).await?)
    } else {
        None
    };
    Ok(Json(PreviewResponse { totals, deltas }))
}

#[utoipa::path(
    post,
    path = "/api/payouts/balances",
    request_body = PayoutRequest,
    responses(
        (status = 200, description = "Net balance per person, sorted by id", body = [PersonBalance]),
        (status = 404, description = "Scope target not found", body = ErrorResponse)
    )
)]
pub async fn compute_balances(
    State(service): State<SharedService>,
    Json(req): Json<PayoutRequest>,
) -> Result<Json<Vec<PersonBalance>>, ApiError> {
    Ok(Json(service.balances(&req.scope).await?))
}

#[utoipa::path(
    post,
    path = "/api/payouts",
    request_body = PayoutRequest,
    responses(
        (status = 200, description = "Transfers that settle the scope", body = [Transfer]),
        (status = 404, description = "Scope target not found", body = ErrorResponse),
        (status = 500, description = "Ledger invariant violation", body = ErrorResponse)
    )
)]
pub async fn compute_payouts(
    State(service): State<SharedService>,
    Json(req): Json<PayoutRequest>,
) -> Result<Json<Vec<Transfer>>, ApiError> {
    Ok(Json(service.payouts(&req.scope).await?))
}

#[utoipa::path(
    get,
    path = "/api/audit",
    responses(
        (status = 200, description = "Audit trail of all mutations", body = [AuditLogEntry]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_audit_entries(
    State(service): State<SharedService>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    Ok(Json(service.audit_entries().await?))
}
