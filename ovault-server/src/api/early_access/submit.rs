use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use kanau::processor::Processor;
use ovault_core::entities::early_access::InsertEarlyAccessSubmission;
use ovault_core::framework::DatabaseProcessor;
use ovault_sdk::objects::Envelope;
use ovault_sdk::objects::early_access::{EarlyAccessRequest, FormType};
use std::net::SocketAddr;

use super::{EarlyAccessApiError, submission_to_response};
use crate::api::rate_limit::client_ip;
use crate::state::AppState;

/// `POST /` — record an early-access signup.
///
/// `email` and `fullName` are required; everything else defaults. The
/// requester's IP and user agent are stored alongside the form fields.
pub(super) async fn submit(
    state: State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<EarlyAccessRequest>,
) -> Result<impl IntoResponse, EarlyAccessApiError> {
    validate(&body)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let ip_address = client_ip(&headers, peer).to_string();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let record = processor
        .process(InsertEarlyAccessSubmission {
            email: body.email.trim().to_owned(),
            full_name: body.full_name.trim().to_owned(),
            phone: body.phone,
            company: body.company,
            form_type: body.form_type.unwrap_or(FormType::Savings).into(),
            initial_deposit: body.initial_deposit,
            monthly_contribution: body.monthly_contribution,
            target_apy: body.target_apy,
            calculations: body.calculations,
            ip_address: Some(ip_address),
            user_agent,
        })
        .await
        .map_err(EarlyAccessApiError::Database)?;

    tracing::info!(id = %record.id, form_type = ?record.form_type, "New early-access submission");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok_with_message(
            submission_to_response(&record),
            "Thank you for your interest! We'll be in touch soon.",
        )),
    ))
}

/// Only `email` and `fullName` are checked server-side; the submission
/// body's shape is otherwise the DTO's concern.
fn validate(body: &EarlyAccessRequest) -> Result<(), EarlyAccessApiError> {
    if body.email.trim().is_empty() {
        return Err(EarlyAccessApiError::Validation("email is required"));
    }
    if body.full_name.trim().is_empty() {
        return Err(EarlyAccessApiError::Validation("fullName is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovault_core::entities::early_access::EarlyAccessSubmission;

    fn body(email: &str, full_name: &str) -> EarlyAccessRequest {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "fullName": full_name,
        }))
        .unwrap()
    }

    #[test]
    fn test_requires_email_and_full_name() {
        assert!(validate(&body("jane@x.com", "Jane Doe")).is_ok());
        assert!(validate(&body("", "Jane Doe")).is_err());
        assert!(validate(&body("   ", "Jane Doe")).is_err());
        assert!(validate(&body("jane@x.com", "")).is_err());
    }

    #[test]
    fn test_success_response_is_201_envelope() {
        let record = EarlyAccessSubmission {
            id: uuid::Uuid::nil(),
            email: "jane@x.com".into(),
            full_name: "Jane Doe".into(),
            phone: None,
            company: None,
            form_type: ovault_core::entities::FormType::Savings,
            initial_deposit: None,
            monthly_contribution: None,
            target_apy: None,
            calculations: None,
            ip_address: None,
            user_agent: None,
            created_at: time::PrimitiveDateTime::new(
                time::Date::from_calendar_date(2024, time::Month::January, 1).unwrap(),
                time::Time::MIDNIGHT,
            ),
        };

        let envelope = Envelope::ok_with_message(submission_to_response(&record), "thanks");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "thanks");
        assert_eq!(json["data"]["email"], "jane@x.com");
        assert_eq!(json["data"]["fullName"], "Jane Doe");
        assert_eq!(json["data"]["formType"], "savings");
        assert_eq!(json["data"]["createdAt"], 1_704_067_200);

        let response = (StatusCode::CREATED, Json(envelope)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = EarlyAccessApiError::Validation("email is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = EarlyAccessApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
