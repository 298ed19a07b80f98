//! SessionMiddleware 의 실제 요청 처리 로직
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::CurrentUser;
use crate::errors::AppError;
use crate::services::auth::SessionService;

/// 실제 인증 로직을 수행하는 서비스
pub struct SessionMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            match resolve_user(&req).await {
                Ok(user) => {
                    log::debug!("세션 복원 성공: 사용자 ID {}", user.id_string().unwrap_or_default());
                    req.extensions_mut().insert(CurrentUser(user));
                }
                Err(err) => {
                    match &err {
                        AppError::Unauthenticated => log::debug!("미인증 요청: {}", req.path()),
                        other => log::warn!("세션 복원 실패: {}", other),
                    }
                    let response = err.error_response();
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 쿠키에서 세션 토큰을 꺼내 사용자로 복원
async fn resolve_user(req: &ServiceRequest) -> Result<crate::domain::User, AppError> {
    let sessions = req
        .app_data::<web::Data<SessionService>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("SessionService 가 등록되지 않았습니다".to_string()))?;

    let cookie = req.cookie(sessions.cookie_name());
    sessions.resolve_session(cookie.as_ref().map(|c| c.value())).await
}
