//! # 서비스 레지스트리
//!
//! 시작 시점에 한 번 구성되는 명시적 의존성 컨테이너입니다.
//! 전역 싱글톤 없이, 구성된 서비스들을 `web::Data`로 Actix 애플리케이션에 등록합니다.
//!
//! ```text
//! AppConfig ─┐
//!            ├─► AppServices::new ─► IdentityService ─┐
//! UserStore ─┤                     ├► SessionService  ├─► configure_app(cfg)
//! SessionStore┘                    └► OAuthService   ─┘       (web::Data<T>)
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let services = AppServices::new(&config, user_store, session_store);
//!
//! HttpServer::new(move || {
//!     let services = services.clone();
//!     App::new().configure(move |cfg| configure_app(cfg, &services))
//! })
//! ```

use std::sync::Arc;
use actix_web::web;
use crate::config::AppConfig;
use crate::repositories::sessions::SessionStore;
use crate::repositories::users::UserStore;
use crate::routes::configure_all_routes;
use crate::services::auth::{OAuthService, SessionService};
use crate::services::users::IdentityService;

/// 애플리케이션 서비스 묶음
#[derive(Clone)]
pub struct AppServices {
    pub identity: Arc<IdentityService>,
    pub sessions: Arc<SessionService>,
    pub oauth: Arc<OAuthService>,
}

impl AppServices {
    /// 설정과 저장소로부터 서비스들을 구성합니다.
    ///
    /// 세션 저장소는 세션 토큰과 OAuth `state` 보관에 함께 사용됩니다.
    pub fn new(
        config: &AppConfig,
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let identity = IdentityService::new(users.clone(), config.password.bcrypt_cost);
        let session_service = SessionService::new(sessions.clone(), users, config.session.clone());
        let oauth = OAuthService::new(config.oauth.clone(), sessions);

        Self {
            identity: Arc::new(identity),
            sessions: Arc::new(session_service),
            oauth: Arc::new(oauth),
        }
    }

    /// 서비스들을 `web::Data`로 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.identity.clone()))
            .app_data(web::Data::from(self.sessions.clone()))
            .app_data(web::Data::from(self.oauth.clone()));
    }
}

/// 서비스 등록과 라우트 설정을 한 번에 수행합니다.
pub fn configure_app(cfg: &mut web::ServiceConfig, services: &AppServices) {
    services.register(cfg);
    configure_all_routes(cfg);
}
