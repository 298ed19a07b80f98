//! 애플리케이션 조립 모듈

pub mod registry;

pub use registry::{configure_app, AppServices};
