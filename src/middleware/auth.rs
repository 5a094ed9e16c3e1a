use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Su,
}

/// The back-office user a request was authenticated as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    role: Role,
}

/// Mints a bearer token valid for `hours` hours.
pub fn issue_token(secret: &str, username: &str, role: Role, hours: i64) -> Result<String, AppError> {
    let expires = chrono::Utc::now() + chrono::Duration::hours(hours);
    let claims = Claims {
        sub: username.to_string(),
        exp: expires.timestamp().max(0) as usize,
        role,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_ref()))
        .map_err(|e| AppError::InternalServerError(format!("Failed to sign token: {}", e)))
}

fn verify_token(secret: &str, token: &str) -> Result<AdminUser, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT decode error: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    Ok(AdminUser {
        username: token_data.claims.sub,
        role: token_data.claims.role,
    })
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    let admin = verify_token(&state.jwt_secret, token)?;
    tracing::debug!(username = %admin.username, role = ?admin.role, "Authenticated back-office request");

    req.extensions_mut().insert(admin);

    Ok(next.run(req).await)
}
