use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};

use crate::{
    dtos::users::{LoginForm, RegisterRequest, TokenResponse, UserResponse},
    dtos::ErrorResponse,
    error::AppError,
    models::User,
    services::Database,
    utils::{hash_password, verify_password, Password, PasswordHashString, ValidatedJson},
    AppState,
};

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 409, description = "Username or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.db.find_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Email already registered"
        )));
    }

    if state
        .db
        .find_user_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(anyhow::anyhow!("Username already taken")));
    }

    let password_hash = hash_password(&Password::new(req.password))?;

    // The pre-checks race with concurrent registrations; the unique
    // constraints are the backstop and surface as Conflict too.
    let user = state
        .db
        .create_user(&req.username, &req.email, password_hash.as_str(), req.role)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login and obtain a bearer token
#[utoipa::path(
    post,
    path = "/users/token",
    request_body(
        content = LoginForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Incorrect username or password", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = authenticate_user(&state.db, &form.username, &form.password)
        .await?
        .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Incorrect username or password")))?;

    let access_token = state.jwt.mint_token(&user.email, None)?;

    Ok(Json(TokenResponse::bearer(access_token)))
}

/// Check the credentials against the stored account.
///
/// The form's `username` field carries the account email, which is also the
/// token subject. A missing account and a wrong password are the same `None`.
async fn authenticate_user(
    db: &Database,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(user) = db.find_user_by_email(username).await? else {
        return Ok(None);
    };

    let password = Password::new(password.to_string());
    let stored = PasswordHashString::new(user.password_hash.clone());
    if !verify_password(&password, &stored) {
        return Ok(None);
    }

    Ok(Some(user))
}
