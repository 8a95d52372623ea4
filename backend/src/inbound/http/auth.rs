//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/login    {"email":"...","password":"...","role":"student"}
//! POST /api/auth/register {"role":"student","student_id":"...", ...}
//! POST /api/auth/logout
//! GET  /api/auth/check
//! ```

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{LoginRequest, RegistrationRequest};
use crate::domain::user::Role;
use crate::domain::Error;
use crate::inbound::http::session::{clear_session_cookie, session_cookie, SessionCookie};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
    /// `"student"` or `"teacher"`.
    pub role: String,
}

/// Login response body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
}

fn require_field<'a>(value: &'a str, field: &str) -> Result<&'a str, Error> {
    if value.trim().is_empty() {
        Err(Error::invalid_request("Missing required fields")
            .with_details(json!({ "field": field })))
    } else {
        Ok(value)
    }
}

fn parse_role(raw: &str) -> Result<Role, Error> {
    raw.parse()
        .map_err(|err: crate::domain::user::RoleParseError| {
            Error::invalid_request(err.to_string()).with_details(json!({ "field": "role" }))
        })
}

/// Check credentials and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    require_field(&body.email, "email")?;
    require_field(&body.password, "password")?;
    require_field(&body.role, "role")?;
    let role = parse_role(&body.role)?;

    let outcome = state
        .sessions
        .login(LoginRequest {
            email: body.email,
            password: body.password,
            role,
        })
        .await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&outcome.token, state.cookie_secure))
        .json(LoginResponse {
            success: true,
            role: outcome.role,
        }))
}

/// Registration request body; the student-only fields are required when
/// `role` is `"student"`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `"student"` or `"teacher"`.
    pub role: String,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub dept: Option<String>,
}

fn require_student_field(value: Option<String>, field: &str) -> Result<String, Error> {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() {
        Err(Error::invalid_request("Missing student information")
            .with_details(json!({ "field": field })))
    } else {
        Ok(value)
    }
}

/// Register a student or teacher account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Registration successful"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    require_field(&body.name, "name")?;
    require_field(&body.email, "email")?;
    require_field(&body.password, "password")?;
    require_field(&body.role, "role")?;
    let role = parse_role(&body.role)?;

    let request = match role {
        Role::Student => RegistrationRequest::Student {
            student_id: require_student_field(body.student_id, "student_id")?,
            name: body.name,
            batch: require_student_field(body.batch, "batch")?,
            dept: require_student_field(body.dept, "dept")?,
            email: body.email,
            password: body.password,
        },
        Role::Teacher => RegistrationRequest::Teacher {
            name: body.name,
            email: body.email,
            password: body.password,
        },
    };
    state.sessions.register(request).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Registration successful"
    })))
}

/// Revoke the current session and clear the cookie.
///
/// Idempotent: succeeds with or without a valid session so a stale client
/// can always log out.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out",
            headers(("Set-Cookie" = String, description = "Expired session cookie"))),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    cookie: SessionCookie,
) -> ApiResult<HttpResponse> {
    if let Some(token) = cookie.maybe_token() {
        state.sessions.logout(token).await?;
    }
    Ok(HttpResponse::Ok()
        .cookie(clear_session_cookie(state.cookie_secure))
        .json(json!({
            "success": true,
            "message": "Logged out successfully"
        })))
}

/// Session check response body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CheckResponse {
    pub success: bool,
    pub user_id: String,
    pub role: Role,
}

/// Report whether the presented session is still active and for whom.
#[utoipa::path(
    get,
    path = "/api/auth/check",
    responses(
        (status = 200, description = "Session active", body = CheckResponse),
        (status = 401, description = "Missing, invalid, or expired session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "checkSession"
)]
#[get("/check")]
pub async fn check(state: web::Data<HttpState>, cookie: SessionCookie) -> ApiResult<HttpResponse> {
    let identity = state.sessions.validate(cookie.token()?).await?;
    Ok(HttpResponse::Ok().json(CheckResponse {
        success: true,
        user_id: identity.user_id.to_string(),
        role: identity.role,
    }))
}
