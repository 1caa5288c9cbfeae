use utoipa::OpenApi;

use crate::api::models::{
    CreateOccasionRequest, CreatePersonRequest, ErrorResponse, OccasionResponse, PayoutRequest,
    PreviewRequest, PreviewResponse, ReassignedResponse, UpdateOccasionRequest,
};
use crate::models::{
    AuditAction, AuditLogEntry, Occasion, Person, SharedItem, TimeState, Transaction,
    TransactionDraft,
};
use crate::payout::{PersonBalance, Scope, Transfer};
use crate::service::TransactionPreview;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_people,
        super::handlers::create_person,
        super::handlers::list_occasions,
        super::handlers::create_occasion,
        super::handlers::update_occasion,
        super::handlers::delete_occasion,
        super::handlers::disconnect_transactions,
        super::handlers::list_transactions,
        super::handlers::create_transaction,
        super::handlers::update_transaction,
        super::handlers::delete_transaction,
        super::handlers::preview_transaction,
        super::handlers::compute_balances,
        super::handlers::compute_payouts,
        super::handlers::list_audit_entries
    ),
    components(schemas(
        CreatePersonRequest,
        CreateOccasionRequest,
        UpdateOccasionRequest,
        PreviewRequest,
        PayoutRequest,
        OccasionResponse,
        PreviewResponse,
        ReassignedResponse,
        ErrorResponse,
        Person,
        Occasion,
        TimeState,
        Transaction,
        TransactionDraft,
        SharedItem,
        AuditAction,
        AuditLogEntry,
        PersonBalance,
        Transfer,
        Scope,
        TransactionPreview
    )),
    info(
        title = "Tally API",
        description = "API for recording shared expenses and computing payouts",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
