//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::{header::WWW_AUTHENTICATE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::{
    protocol::{
        ErrorResponse, HealthResponse, IssueTokenRequest, IssueTokenResponse, ValidationResponse,
    },
    ServiceError,
};
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::telemetry::metrics::outcome;
use crate::token::{validation_url, TokenError};

/// `POST /tokens` — issue a card token for a member identifier.
///
/// Requires `Authorization: Bearer <issuer key>`; anything else is a 401 and
/// nothing is minted. The response carries both the raw token and the
/// validation URL to render as a QR code.
pub async fn issue_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<IssueTokenRequest>,
) -> Response {
    if !state.issuer_key.authorizes(&headers) {
        warn!("token issuance rejected: missing or wrong issuer credential");
        let mut resp = error_response(ServiceError::Unauthorized(
            "issuer credential required".into(),
        ));
        resp.headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        return resp;
    }

    let token = match state.codec.issue(&req.member_id) {
        Ok(t) => t,
        Err(TokenError::EmptyIdentifier) => {
            return error_response(ServiceError::BadRequest(
                "member_id must not be empty".into(),
            ));
        }
        Err(e) => {
            error!(reason = e.kind(), "card token issuance failed");
            return error_response(ServiceError::Internal("token issuance failed".into()));
        }
    };
    state.metrics.record_issued();
    debug!("card token issued");

    let body = IssueTokenResponse {
        validation_url: validation_url(&state.validation_base_url, &token),
        token: token.into_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /cek-validasi/{token}` — validate a scanned card token.
///
/// Format and authentication failures produce the same response; only logs
/// and metrics tell them apart.
pub async fn validate(State(state): State<AppState>, Path(token): Path<String>) -> Response {
    let member_id = match state.codec.resolve(&token) {
        Ok(id) => id,
        Err(e) => {
            warn!(reason = e.kind(), "card token rejected");
            state.metrics.record_validation(e.kind());
            return error_response(ServiceError::InvalidToken);
        }
    };

    match state.members.find(&member_id) {
        Some(record) => {
            state.metrics.record_validation(outcome::VALID);
            info!("card token validated");
            let body = ValidationResponse {
                status: "valid".into(),
                member: record.view(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        None => {
            state.metrics.record_validation(outcome::MEMBER_NOT_FOUND);
            warn!("authentic card token names an unknown member");
            error_response(ServiceError::NotFound("anggota tidak ditemukan".into()))
        }
    }
}

/// `GET /health` — liveness check.
///
/// The service cannot start without a valid keyring, so a running process is
/// always `ok`; the body reports rotation and directory state.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        retired_keys: state.codec.keyring().retired_len(),
        members_loaded: state.members.len(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(&err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::members::{MemberRecord, MockMemberDirectory};
    use crate::server::auth::IssuerKey;
    use crate::token::{Keyring, TokenCodec};
    use axum::{
        http::header::AUTHORIZATION,
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use serde_json::json;
    use std::sync::Arc;

    const BASE_URL: &str = "https://example.org/cek-validasi";
    const ISSUER_KEY: &str = "issuer-key-123";

    fn codec() -> TokenCodec {
        TokenCodec::new(Keyring::new::<&str>("test-secret-key", &[]).unwrap())
    }

    fn bearer(key: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {key}")).unwrap()
    }

    fn siti() -> MemberRecord {
        MemberRecord {
            id: "482193".into(),
            name: "Siti Rahma".into(),
            member_number: "KTA-4821****".into(),
            status: "active".into(),
            valid_until: Some("2027-12-31".into()),
        }
    }

    fn server(members: MockMemberDirectory) -> TestServer {
        let state = AppState::new(
            codec(),
            Arc::new(members),
            IssuerKey::new(ISSUER_KEY),
            BASE_URL.into(),
        );
        let app = Router::new()
            .route("/tokens", post(issue_token))
            .route("/cek-validasi/:token", get(validate))
            .route("/health", get(health))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    fn directory_with_siti() -> MockMemberDirectory {
        let mut members = MockMemberDirectory::new();
        members
            .expect_find()
            .returning(|id| (id == "482193").then(siti));
        members
    }

    #[tokio::test]
    async fn issue_returns_token_and_url() {
        let server = server(MockMemberDirectory::new());
        let resp = server
            .post("/tokens")
            .add_header(AUTHORIZATION, bearer(ISSUER_KEY))
            .json(&json!({"member_id": "482193"}))
            .await;
        resp.assert_status_ok();
        let body: IssueTokenResponse = resp.json();
        assert_eq!(body.validation_url, format!("{BASE_URL}/{}", body.token));
        assert_eq!(codec().resolve(&body.token).unwrap(), "482193");
    }

    #[tokio::test]
    async fn issue_rejects_empty_member_id() {
        let server = server(MockMemberDirectory::new());
        let resp = server
            .post("/tokens")
            .add_header(AUTHORIZATION, bearer(ISSUER_KEY))
            .json(&json!({"member_id": ""}))
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.code, "bad_request");
    }

    #[tokio::test]
    async fn issue_without_credential_is_unauthorized() {
        let server = server(MockMemberDirectory::new());
        let resp = server
            .post("/tokens")
            .json(&json!({"member_id": "482193"}))
            .await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(resp.header(WWW_AUTHENTICATE), "Bearer");
        let body: ErrorResponse = resp.json();
        assert_eq!(body.code, "unauthorized");
        assert!(!resp.text().contains(BASE_URL));
    }

    #[tokio::test]
    async fn issue_with_wrong_credential_is_unauthorized() {
        let server = server(MockMemberDirectory::new());
        let resp = server
            .post("/tokens")
            .add_header(AUTHORIZATION, bearer("issuer-key-124"))
            .json(&json!({"member_id": "482193"}))
            .await;
        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn validate_known_member() {
        let server = server(directory_with_siti());
        let token = codec().issue("482193").unwrap();
        let resp = server.get(&format!("/cek-validasi/{token}")).await;
        resp.assert_status_ok();
        let body: ValidationResponse = resp.json();
        assert_eq!(body.status, "valid");
        assert_eq!(body.member, siti().view());
    }

    #[tokio::test]
    async fn validate_unknown_member_is_404() {
        let server = server(directory_with_siti());
        let token = codec().issue("999999").unwrap();
        let resp = server.get(&format!("/cek-validasi/{token}")).await;
        resp.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = resp.json();
        assert_eq!(body.code, "member_not_found");
    }

    #[tokio::test]
    async fn format_and_authentication_failures_look_identical() {
        let server = server(MockMemberDirectory::new());

        let malformed = server.get("/cek-validasi/not-a-token").await;

        let mut raw = URL_SAFE_NO_PAD
            .decode(codec().issue("482193").unwrap().as_str())
            .unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = server
            .get(&format!("/cek-validasi/{}", URL_SAFE_NO_PAD.encode(raw)))
            .await;

        malformed.assert_status(StatusCode::BAD_REQUEST);
        tampered.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(malformed.text(), tampered.text());
        let body: ErrorResponse = tampered.json();
        assert_eq!(body.code, "invalid_token");
        assert_eq!(body.message, "token tidak valid");
    }

    #[tokio::test]
    async fn token_from_other_secret_is_invalid() {
        let server = server(MockMemberDirectory::new());
        let foreign = TokenCodec::new(Keyring::new::<&str>("other-secret", &[]).unwrap())
            .issue("482193")
            .unwrap();
        let resp = server.get(&format!("/cek-validasi/{foreign}")).await;
        resp.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_directory_size() {
        let mut members = MockMemberDirectory::new();
        members.expect_len().return_const(3usize);
        let server = server(members);
        let resp = server.get("/health").await;
        resp.assert_status_ok();
        let body: HealthResponse = resp.json();
        assert_eq!(body.status, "ok");
        assert_eq!(body.members_loaded, 3);
        assert_eq!(body.retired_keys, 0);
    }
}
