use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;
use gateway::OrderRequest;
use sea_orm::*;
use tracing::instrument;

use crate::entity::payment;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppQuery;
use crate::handlers::course::find_course;
use crate::handlers::enrollment::ensure_enrolled;
use crate::models::payment::{PaymentOrderResponse, PaymentSuccessQuery, amount_in_minor_units};
use crate::state::AppState;

/// Where the success callback sends the browser when no payment id arrived.
const CATALOG_LOCATION: &str = "/courses";
/// Where the success callback sends the browser after recording the payment.
const MY_COURSES_LOCATION: &str = "/my-courses";

/// Status recorded for every callback-confirmed payment.
const STATUS_SUCCESS: &str = "Success";

#[utoipa::path(
    post,
    path = "/{id}/payment",
    tag = "Payments",
    operation_id = "createPaymentOrder",
    summary = "Open a gateway order for a course",
    description = "Converts the course price to minor currency units and opens an order on the payment gateway, returning the order handle and public key for client-side checkout. Gateway failures surface as a generic 500; there are no retries.",
    params(("id" = i32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Order created", body = PaymentOrderResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Gateway failure (INTERNAL_ERROR)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(course_id, user_id = auth_user.user_id))]
pub async fn create_order(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Json<PaymentOrderResponse>, AppError> {
    let course = find_course(&state.db, course_id).await?;

    let amount = amount_in_minor_units(course.price);
    let order = state
        .gateway
        .create_order(OrderRequest {
            amount,
            currency: state.config.gateway.currency.clone(),
        })
        .await?;

    tracing::info!(
        course_id,
        order_id = %order.id,
        amount = order.amount,
        user_id = auth_user.user_id,
        "Created payment order"
    );

    Ok(Json(PaymentOrderResponse {
        course_id,
        course_title: course.title,
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.gateway.key_id().to_string(),
    }))
}

/// Return-URL callback hit by the browser after client-side checkout.
///
/// The gateway attaches no signature to this callback, so nothing here can
/// distinguish a genuine checkout from a hand-crafted request: any
/// authenticated caller supplying a course id and an arbitrary `payment_id`
/// is recorded as paid and enrolled.
#[utoipa::path(
    get,
    path = "/{id}/payment/success",
    tag = "Payments",
    operation_id = "paymentSuccess",
    summary = "Finalize a payment",
    description = "Records the gateway-supplied payment id with status `Success`, enrolls the user (idempotent), and redirects to the user's courses. Without a `payment_id` parameter nothing is written and the browser is sent back to the catalog.",
    params(
        ("id" = i32, Path, description = "Course ID"),
        PaymentSuccessQuery,
    ),
    responses(
        (status = 303, description = "Redirect: to my-courses on success, to the catalog when payment_id is missing"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Course not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query), fields(course_id, user_id = auth_user.user_id))]
pub async fn payment_success(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    AppQuery(query): AppQuery<PaymentSuccessQuery>,
) -> Result<Redirect, AppError> {
    find_course(&state.db, course_id).await?;

    let Some(payment_id) = query.payment_id.filter(|p| !p.is_empty()) else {
        tracing::warn!(
            course_id,
            user_id = auth_user.user_id,
            "Payment callback arrived without a payment_id"
        );
        return Ok(Redirect::to(CATALOG_LOCATION));
    };

    let new_payment = payment::ActiveModel {
        user_id: Set(auth_user.user_id),
        course_id: Set(course_id),
        payment_id: Set(payment_id.clone()),
        status: Set(STATUS_SUCCESS.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    new_payment.insert(&state.db).await?;

    ensure_enrolled(&state.db, auth_user.user_id, course_id).await?;

    tracing::info!(
        course_id,
        payment_id = %payment_id,
        user_id = auth_user.user_id,
        "Payment recorded and user enrolled"
    );

    Ok(Redirect::to(MY_COURSES_LOCATION))
}
