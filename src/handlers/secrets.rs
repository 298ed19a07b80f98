//! 비밀 목록/제출 핸들러
//!
//! 모든 라우트는 [`SessionMiddleware`](crate::middlewares::SessionMiddleware) 뒤에서 동작하며
//! 미인증 요청은 `/login`으로 리다이렉트됩니다.
use actix_web::{get, post, web, HttpResponse};
use crate::domain::{CurrentUser, SecretForm};
use crate::errors::AppError;
use crate::handlers::{html, redirect};
use crate::middlewares::SessionMiddleware;
use crate::services::users::IdentityService;
use crate::views;

/// 비밀 목록
///
/// 비밀은 작성자에게만 보이는 것이 아니라 모든 로그인 사용자에게 공개됩니다.
///
/// # Endpoint
/// `GET /secrets`
#[get("/secrets", wrap = "SessionMiddleware::new()")]
pub async fn list_secrets(
    _user: CurrentUser,
    identity: web::Data<IdentityService>,
) -> Result<HttpResponse, AppError> {
    let users = identity.users_with_secrets().await?;
    let secrets: Vec<&str> = users.iter().filter_map(|user| user.secret.as_deref()).collect();

    Ok(html(views::secrets_page(&secrets)))
}

/// # Endpoint
/// `GET /submit`
#[get("/submit", wrap = "SessionMiddleware::new()")]
pub async fn submit_page(_user: CurrentUser) -> HttpResponse {
    html(views::submit_page())
}

/// 현재 사용자의 비밀을 덮어쓰고 목록으로 돌아갑니다.
///
/// # Endpoint
/// `POST /submit`
#[post("/submit", wrap = "SessionMiddleware::new()")]
pub async fn submit_secret(
    user: CurrentUser,
    form: web::Form<SecretForm>,
    identity: web::Data<IdentityService>,
) -> Result<HttpResponse, AppError> {
    identity.submit_secret(user.user(), &form.secret).await?;
    Ok(redirect("/secrets"))
}
