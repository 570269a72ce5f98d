use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::{AdyenClientConfig, AdyenEnvironment};
use std::sync::Arc;

/// 从环境变量加载Adyen配置
pub fn from_env() -> DomainResult<Arc<AdyenClientConfig>> {
    from_lookup(|key| std::env::var(key).ok()).map(Arc::new)
}

/// 通过给定的查找函数加载Adyen配置
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<AdyenClientConfig> {
    let required = |key: &str| {
        lookup(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| DomainError::ConfigurationError(format!("{} must be set", key)))
    };

    let environment = match lookup("ADYEN_ENVIRONMENT").as_deref().map(str::trim) {
        None | Some("") | Some("test") => AdyenEnvironment::Test,
        Some("live") => AdyenEnvironment::Live,
        Some(other) => {
            return Err(DomainError::ConfigurationError(format!(
                "ADYEN_ENVIRONMENT must be 'test' or 'live', got '{}'",
                other
            )));
        }
    };

    let live_endpoint_url_prefix =
        lookup("ADYEN_LIVE_ENDPOINT_URL_PREFIX").filter(|prefix| !prefix.trim().is_empty());

    if environment == AdyenEnvironment::Live && live_endpoint_url_prefix.is_none() {
        return Err(DomainError::ConfigurationError(
            "ADYEN_LIVE_ENDPOINT_URL_PREFIX must be set for the live environment".to_string(),
        ));
    }

    Ok(AdyenClientConfig {
        api_key: required("ADYEN_API_KEY")?,
        merchant_account: required("ADYEN_MERCHANT_ACCOUNT")?,
        environment,
        live_endpoint_url_prefix,
    })
}
