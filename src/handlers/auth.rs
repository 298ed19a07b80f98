//! Authentication HTTP Handlers
//!
//! 로컬 로그인/회원가입, 로그아웃, 외부 프로바이더 OAuth 핸드셰이크를 처리합니다.
//! 인증에 성공하면 세션 쿠키를 발급하고 `/secrets`로 이동합니다.
//!
//! # Endpoints
//!
//! - `POST /login`, `POST /register` - 로컬 자격 증명 (`username`, `password` 폼)
//! - `GET /logout` - 세션 폐기 후 `/`
//! - `GET /auth/{provider}` - 프로바이더 동의 화면으로 이동
//! - `GET /auth/{provider}/secrets` - 프로바이더 콜백
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::warn;
use validator::Validate;
use crate::config::AuthProvider;
use crate::domain::{CredentialsForm, OAuthCallbackQuery, User};
use crate::errors::AppError;
use crate::handlers::redirect;
use crate::services::auth::{OAuthService, SessionService};
use crate::services::users::IdentityService;
use crate::views;

/// 세션을 만들고 쿠키와 함께 `/secrets`로 리다이렉트
///
/// 요청에 이미 세션 쿠키가 있으면 그 세션을 먼저 폐기하므로, 한 브라우저에는
/// 항상 최대 하나의 세션만 남습니다.
async fn establish_session(
    req: &HttpRequest,
    sessions: &SessionService,
    user: &User,
) -> Result<HttpResponse, AppError> {
    let previous = req.cookie(sessions.cookie_name());
    sessions.destroy_session(previous.as_ref().map(|c| c.value())).await?;

    let token = sessions.create_session(user).await?;

    let mut response = redirect("/secrets");
    response
        .add_cookie(&sessions.session_cookie(&token))
        .map_err(|e| AppError::InternalError(format!("세션 쿠키 설정 실패: {}", e)))?;

    Ok(response)
}

/// 경로의 프로바이더 이름을 해석합니다. 알 수 없으면 404 페이지.
fn parse_provider(raw: &str) -> Result<AuthProvider, HttpResponse> {
    AuthProvider::from_str(raw).map_err(|_| {
        HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(views::error_page(actix_web::http::StatusCode::NOT_FOUND))
    })
}

/// 로컬 로그인 핸들러
///
/// 실패 사유와 관계없이 `/login`으로 돌아갑니다.
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<CredentialsForm>,
    identity: web::Data<IdentityService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    if form.validate().is_err() {
        return Err(AppError::AuthFailure);
    }

    let user = identity.authenticate_local(&form.username, &form.password).await?;
    establish_session(&req, &sessions, &user).await
}

/// 회원가입 핸들러
///
/// 가입과 동시에 로그인됩니다. 중복 식별자나 빈 입력은 `/register`로 돌아갑니다.
///
/// # Endpoint
/// `POST /register`
#[post("/register")]
pub async fn register(
    req: HttpRequest,
    form: web::Form<CredentialsForm>,
    identity: web::Data<IdentityService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    if form.validate().is_err() {
        return Ok(redirect("/register"));
    }

    let user = match identity.register_local(&form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::ValidationError(_)) => return Ok(redirect("/register")),
        Err(e) => return Err(e),
    };

    establish_session(&req, &sessions, &user).await
}

/// 로그아웃 핸들러
///
/// # Endpoint
/// `GET /logout`
#[get("/logout")]
pub async fn logout(
    req: HttpRequest,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let cookie = req.cookie(sessions.cookie_name());
    sessions.destroy_session(cookie.as_ref().map(|c| c.value())).await?;

    let mut response = redirect("/");
    response
        .add_cookie(&sessions.removal_cookie())
        .map_err(|e| AppError::InternalError(format!("세션 쿠키 삭제 실패: {}", e)))?;

    Ok(response)
}

/// OAuth 로그인 시작 핸들러
///
/// # Endpoint
/// `GET /auth/{provider}`
#[get("/auth/{provider}")]
pub async fn oauth_login(
    path: web::Path<String>,
    oauth: web::Data<OAuthService>,
) -> Result<HttpResponse, AppError> {
    let provider = match parse_provider(&path) {
        Ok(provider) => provider,
        Err(not_found) => return Ok(not_found),
    };

    match oauth.authorization_url(provider).await {
        Ok(url) => Ok(redirect(&url)),
        Err(AppError::ProviderFailure(reason)) => {
            warn!("OAuth 시작 실패: {}", reason);
            Err(AppError::ProviderFailure(reason))
        }
        Err(e) => Err(e),
    }
}

/// OAuth 콜백 처리 핸들러
///
/// 프로바이더 프로필 ID로 사용자를 찾거나 만든 뒤 세션을 발급합니다.
///
/// # Endpoint
/// `GET /auth/{provider}/secrets?code={code}&state={state}`
#[get("/auth/{provider}/secrets")]
pub async fn oauth_callback(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    oauth: web::Data<OAuthService>,
    identity: web::Data<IdentityService>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let provider = match parse_provider(&path) {
        Ok(provider) => provider,
        Err(not_found) => return Ok(not_found),
    };

    let profile = match oauth.complete(provider, &query).await {
        Ok(profile) => profile,
        Err(AppError::ProviderFailure(reason)) => {
            warn!("OAuth 콜백 실패: {}", reason);
            return Err(AppError::ProviderFailure(reason));
        }
        Err(e) => return Err(e),
    };

    let user = identity
        .find_or_create_by_provider(profile.provider, &profile.provider_id)
        .await?;

    establish_session(&req, &sessions, &user).await
}
