use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::{AdyenClientConfig, AdyenEnvironment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 后台展示时间格式，例如 `2021-03-04 09:05 (UTC)`
pub const ADMIN_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M (%Z)";

/// 退款金额超过可退余额
pub const MESSAGE_INVALID_REFUND_AMOUNT: &str = "adyen.invalidRefundAmount";

/// 退款调用失败
pub const MESSAGE_REFUND_ERROR: &str = "adyen.refundError";

/// 校验API密钥时未返回支付方式
pub const MESSAGE_PAYMENT_METHODS_MISSING: &str = "adyen.paymentMethodsMissing";

/// 格式化后台展示时间
pub fn format_admin_datetime(value: &DateTime<Utc>) -> String {
    value.format(ADMIN_DATETIME_FORMAT).to_string()
}

/// 格式化可为空的后台展示时间，缺失时显示 `-`
pub fn format_optional_admin_datetime(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(format_admin_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// 插件配置页提交的待校验配置
#[derive(Debug, Default, Deserialize)]
pub struct VerifyConfigurationRequest {
    #[serde(rename = "AdyenPaymentShopware6.config.apiKeyTest", default)]
    pub api_key: Option<String>,

    /// 真值表示生产环境
    #[serde(rename = "AdyenPaymentShopware6.config.environment", default)]
    pub environment: serde_json::Value,

    #[serde(rename = "AdyenPaymentShopware6.config.liveEndpointUrlPrefix", default)]
    pub live_endpoint_url_prefix: Option<String>,

    #[serde(rename = "AdyenPaymentShopware6.config.merchantAccount", default)]
    pub merchant_account: Option<String>,
}

impl VerifyConfigurationRequest {
    pub fn is_live(&self) -> bool {
        match &self.environment {
            serde_json::Value::Null => false,
            serde_json::Value::Bool(flag) => *flag,
            serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            serde_json::Value::String(text) => !text.is_empty() && text != "0",
            serde_json::Value::Array(items) => !items.is_empty(),
            serde_json::Value::Object(_) => true,
        }
    }

    /// 转换为Adyen客户端配置
    pub fn into_client_config(self) -> DomainResult<AdyenClientConfig> {
        let environment = if self.is_live() {
            AdyenEnvironment::Live
        } else {
            AdyenEnvironment::Test
        };

        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DomainError::ConfigurationError("API key is missing".to_string()))?;

        Ok(AdyenClientConfig {
            api_key,
            merchant_account: self.merchant_account.unwrap_or_default(),
            environment,
            live_endpoint_url_prefix: self
                .live_endpoint_url_prefix
                .filter(|prefix| !prefix.trim().is_empty()),
        })
    }
}

/// 后台操作结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// 提交退款请求（表单）
#[derive(Debug, Default, Deserialize)]
pub struct RefundRequest {
    #[serde(rename = "orderId", default)]
    pub order_id: Option<String>,

    /// 退款金额（主单位，十进制字符串）
    #[serde(rename = "refundAmount", default)]
    pub refund_amount: Option<String>,
}

/// 退款列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundView {
    pub psp_reference: String,

    /// 本地化金额
    pub amount: String,

    /// 最小单位金额
    pub raw_amount: i64,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 通知列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub psp_reference: String,
    pub event_code: String,
    pub success: bool,

    /// `<金额> <货币>`
    pub amount: String,

    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: String, message: String) -> Self {
        Self { error, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_admin_datetime_format() {
        let value = Utc.with_ymd_and_hms(2021, 3, 4, 9, 5, 42).unwrap();
        assert_eq!(format_admin_datetime(&value), "2021-03-04 09:05 (UTC)");
        assert_eq!(format_optional_admin_datetime(None), "-");
    }

    #[test]
    fn test_verify_request_reads_plugin_config_keys() {
        let request: VerifyConfigurationRequest = serde_json::from_value(serde_json::json!({
            "AdyenPaymentShopware6.config.apiKeyTest": "AQE-key",
            "AdyenPaymentShopware6.config.environment": true,
            "AdyenPaymentShopware6.config.liveEndpointUrlPrefix": "1797a841fbb37ca7-AdyenDemo",
            "AdyenPaymentShopware6.config.merchantAccount": "ShopwareDemo"
        }))
        .unwrap();

        let config = request.into_client_config().unwrap();
        assert_eq!(config.api_key, "AQE-key");
        assert_eq!(config.environment, AdyenEnvironment::Live);
        assert_eq!(config.merchant_account, "ShopwareDemo");
        assert_eq!(
            config.live_endpoint_url_prefix.as_deref(),
            Some("1797a841fbb37ca7-AdyenDemo")
        );
    }

    #[test]
    fn test_environment_truthiness() {
        for (value, live) in [
            (serde_json::json!(null), false),
            (serde_json::json!(false), false),
            (serde_json::json!(0), false),
            (serde_json::json!("0"), false),
            (serde_json::json!(""), false),
            (serde_json::json!(1), true),
            (serde_json::json!("1"), true),
        ] {
            let request = VerifyConfigurationRequest {
                environment: value,
                ..Default::default()
            };
            assert_eq!(request.is_live(), live);
        }
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let result = VerifyConfigurationRequest::default().into_client_config();
        assert!(matches!(result, Err(DomainError::ConfigurationError(_))));
    }

    #[test]
    fn test_action_response_omits_empty_message() {
        assert_eq!(
            serde_json::to_value(ActionResponse::success()).unwrap(),
            serde_json::json!({ "success": true })
        );
    }
}
