use crate::domain::errors::{DomainError, DomainResult};
use crate::ports::adyen_checkout_port::*;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};

/// Checkout API版本
const CHECKOUT_API_VERSION: &str = "v71";

const TEST_CHECKOUT_ENDPOINT: &str = "https://checkout-test.adyen.com";

/// Adyen Checkout API适配器实现
#[derive(Clone, Default)]
pub struct AdyenCheckoutAdapter {
    client: Client,
}

impl AdyenCheckoutAdapter {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// 根据环境计算Checkout API基础URL
    pub fn checkout_base_url(config: &AdyenClientConfig) -> DomainResult<String> {
        match config.environment {
            AdyenEnvironment::Test => Ok(format!(
                "{}/{}",
                TEST_CHECKOUT_ENDPOINT, CHECKOUT_API_VERSION
            )),
            AdyenEnvironment::Live => {
                let prefix = config
                    .live_endpoint_url_prefix
                    .as_deref()
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .ok_or_else(|| {
                        DomainError::ConfigurationError(
                            "Please provide a live url prefix in the config".to_string(),
                        )
                    })?;
                Ok(format!(
                    "https://{}-checkout-live.adyenpayments.com/checkout/{}",
                    prefix, CHECKOUT_API_VERSION
                ))
            }
        }
    }

    async fn post(
        &self,
        config: &AdyenClientConfig,
        path: &str,
        body: serde_json::Value,
        idempotency_key: Option<String>,
    ) -> DomainResult<serde_json::Value> {
        let url = format!("{}{}", Self::checkout_base_url(config)?, path);
        debug!("Adyen request: POST {}", url);

        let mut request = self
            .client
            .post(&url)
            .header("X-API-Key", &config.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .body(body.to_string());

        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Adyen API error: {} - {}", status, error_text);
            return Err(DomainError::AdyenError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let resp_json: serde_json::Value = response.json().await?;
        debug!("Adyen response: {}", resp_json);
        Ok(resp_json)
    }
}

#[async_trait]
impl AdyenCheckoutPort for AdyenCheckoutAdapter {
    /// 查询支付方式
    async fn payment_methods(&self, config: &AdyenClientConfig) -> DomainResult<serde_json::Value> {
        let body = json!({ "merchantAccount": config.merchant_account });
        self.post(config, "/paymentMethods", body, None).await
    }

    /// 发起退款
    async fn refund(
        &self,
        config: &AdyenClientConfig,
        request: &RefundModificationRequest,
    ) -> DomainResult<serde_json::Value> {
        let path = format!("/payments/{}/refunds", request.payment_psp_reference);
        let body = json!({
            "merchantAccount": config.merchant_account,
            "amount": {
                "value": request.amount,
                "currency": request.currency,
            },
            "reference": request.reference,
        });

        self.post(config, &path, body, Some(uuid::Uuid::new_v4().to_string()))
            .await
    }
}
