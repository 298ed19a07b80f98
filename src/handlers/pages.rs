//! 공개 페이지 핸들러
use actix_web::{get, web, HttpResponse};
use crate::handlers::html;
use crate::services::auth::OAuthService;
use crate::views;

/// `GET /` 랜딩 페이지
#[get("/")]
pub async fn home() -> HttpResponse {
    html(views::home_page())
}

/// `GET /login` 로그인 폼
#[get("/login")]
pub async fn login_page(oauth: web::Data<OAuthService>) -> HttpResponse {
    html(views::login_page(&oauth.enabled_providers()))
}

/// `GET /register` 회원가입 폼
#[get("/register")]
pub async fn register_page(oauth: web::Data<OAuthService>) -> HttpResponse {
    html(views::register_page(&oauth.enabled_providers()))
}
