//! 서버 렌더링 HTML 페이지
//!
//! 모든 페이지는 [`layout`]으로 감싸지며, 사용자 입력에서 온 문자열은
//! `html_escape`로 이스케이프한 뒤 출력합니다.

use actix_web::http::StatusCode;
use crate::config::AuthProvider;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{}</title>
</head>
<body>
  <main class="container">
{}
  </main>
</body>
</html>"#,
        html_escape::encode_text(title),
        body
    )
}

fn provider_label(provider: AuthProvider) -> &'static str {
    match provider {
        AuthProvider::Google => "Google",
        AuthProvider::Facebook => "Facebook",
    }
}

fn provider_links(providers: &[AuthProvider], verb: &str) -> String {
    providers
        .iter()
        .map(|provider| {
            format!(
                r#"    <a class="btn btn-social" href="/auth/{}" role="button">{} with {}</a>"#,
                provider.as_str(),
                verb,
                provider_label(*provider)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 자격 증명 입력 폼 (로그인/회원가입 공용)
fn credentials_page(title: &str, action: &str, submit: &str, providers: &[AuthProvider], verb: &str) -> String {
    let body = format!(
        r#"    <h1>{title}</h1>
    <form action="{action}" method="POST">
      <label for="username">Email</label>
      <input type="email" id="username" name="username" required />
      <label for="password">Password</label>
      <input type="password" id="password" name="password" required />
      <button type="submit">{submit}</button>
    </form>
{links}"#,
        title = title,
        action = action,
        submit = submit,
        links = provider_links(providers, verb),
    );
    layout(title, &body)
}

/// 랜딩 페이지
pub fn home_page() -> String {
    layout(
        "Secrets",
        r#"    <h1>Secrets</h1>
    <p>Don't keep your secrets, share them anonymously!</p>
    <a class="btn" href="/register" role="button">Register</a>
    <a class="btn" href="/login" role="button">Login</a>"#,
    )
}

pub fn login_page(providers: &[AuthProvider]) -> String {
    credentials_page("Login", "/login", "Login", providers, "Sign In")
}

pub fn register_page(providers: &[AuthProvider]) -> String {
    credentials_page("Register", "/register", "Register", providers, "Sign Up")
}

/// 비밀 목록 페이지
///
/// 작성자 정보 없이 비밀 문구만 나열합니다.
pub fn secrets_page<S: AsRef<str>>(secrets: &[S]) -> String {
    let items = secrets
        .iter()
        .map(|secret| format!("      <p class=\"secret-text\">{}</p>", html_escape::encode_text(secret.as_ref())))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"    <h1>You've Discovered My Secret!</h1>
    <section class="secrets">
{}
    </section>
    <a class="btn" href="/logout" role="button">Log Out</a>
    <a class="btn" href="/submit" role="button">Submit a Secret</a>"#,
        items
    );
    layout("Secrets", &body)
}

pub fn submit_page() -> String {
    layout(
        "Submit a Secret",
        r#"    <h1>Secrets</h1>
    <p>Don't keep your secrets, share them anonymously!</p>
    <form action="/submit" method="POST">
      <input type="text" name="secret" placeholder="What's your secret?" />
      <button type="submit">Submit</button>
    </form>"#,
    )
}

/// 내부 정보를 노출하지 않는 일반 에러 페이지
pub fn error_page(status: StatusCode) -> String {
    let body = format!(
        r#"    <h1>Something went wrong</h1>
    <p>{} {}</p>
    <a class="btn" href="/" role="button">Home</a>"#,
        status.as_u16(),
        html_escape::encode_text(status.canonical_reason().unwrap_or("Error")),
    );
    layout("Error", &body)
}
