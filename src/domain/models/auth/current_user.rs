use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use crate::domain::entities::User;
use crate::errors::AppError;

/// 세션에서 복원된 현재 사용자
///
/// [`SessionMiddleware`](crate::middlewares::SessionMiddleware)가 Request Extensions에 넣어 둔
/// 사용자 레코드를 꺼냅니다. 미들웨어를 거치지 않은 요청에서는 `Unauthenticated`로
/// 실패하여 로그인 페이지로 리다이렉트됩니다.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::Unauthenticated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use crate::config::AuthProvider;

    #[actix_web::test]
    async fn test_extracts_user_from_extensions() {
        let req = TestRequest::default().to_http_request();
        let user = User::new_oauth(AuthProvider::Google, "g-1".to_string());
        req.extensions_mut().insert(CurrentUser(user.clone()));

        let extracted = CurrentUser::extract(&req).await.unwrap();
        assert_eq!(extracted.into_inner(), user);
    }

    #[actix_web::test]
    async fn test_missing_user_is_unauthenticated() {
        let req = TestRequest::default().to_http_request();

        let result = CurrentUser::extract(&req).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
