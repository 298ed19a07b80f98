//! 외부 프로바이더 프로필 모델
use serde::Deserialize;
use crate::config::AuthProvider;

/// userinfo 엔드포인트 응답
///
/// Google v3 userinfo 는 `sub`, Facebook Graph API `/me` 는 `id` 로 계정 식별자를 돌려줍니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUserInfo {
    #[serde(alias = "sub")]
    pub id: String,
}

/// 핸드셰이크가 끝난 뒤 Identity Resolver 로 넘겨지는 프로필
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub provider: AuthProvider,
    /// 프로바이더가 발급한 고유 계정 ID
    pub provider_id: String,
}

impl ProviderProfile {
    pub fn from_user_info(provider: AuthProvider, info: ProviderUserInfo) -> Self {
        Self {
            provider,
            provider_id: info.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_google_sub_and_facebook_id_both_parse() {
        let google: ProviderUserInfo =
            serde_json::from_str(r#"{"sub":"1234","name":"Alice","picture":"x"}"#).unwrap();
        let facebook: ProviderUserInfo =
            serde_json::from_str(r#"{"id":"5678","name":"Bob"}"#).unwrap();

        assert_eq!(google.id, "1234");
        assert_eq!(facebook.id, "5678");

        let profile = ProviderProfile::from_user_info(AuthProvider::Google, google);
        assert_eq!(profile.provider_id, "1234");
        assert_eq!(profile.provider, AuthProvider::Google);
    }
}
