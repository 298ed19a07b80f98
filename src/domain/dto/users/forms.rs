//! 사용자 폼 DTO
//!
//! HTML 폼(`application/x-www-form-urlencoded`)으로 전달되는 요청을 매핑합니다.
//! 필드가 빠진 경우에도 역직렬화는 성공하고, 검증 단계에서 걸러집니다.
use serde::{Deserialize, Serialize};
use validator::Validate;

/// 로그인 / 회원가입 폼
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct CredentialsForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 비밀 제출 폼
///
/// 내용은 검증하지 않으며 빈 문자열도 그대로 저장됩니다.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SecretForm {
    #[serde(default)]
    pub secret: String,
}
