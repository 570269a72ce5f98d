use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Adyen环境
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdyenEnvironment {
    Test,
    Live,
}

/// 调用Adyen Checkout API所需的客户端配置
#[derive(Debug, Clone)]
pub struct AdyenClientConfig {
    /// API密钥
    pub api_key: String,

    /// 商户账号
    pub merchant_account: String,

    /// 环境
    pub environment: AdyenEnvironment,

    /// 生产环境URL前缀
    pub live_endpoint_url_prefix: Option<String>,
}

/// 退款请求参数
#[derive(Debug, Clone)]
pub struct RefundModificationRequest {
    /// 原始支付的pspReference
    pub payment_psp_reference: String,

    /// 退款金额（最小单位）
    pub amount: i64,

    /// 货币ISO代码
    pub currency: String,

    /// 商户参考号
    pub reference: String,
}

/// Adyen Checkout端口接口
#[async_trait]
pub trait AdyenCheckoutPort: Send + Sync {
    /// 查询商户可用的支付方式
    async fn payment_methods(&self, config: &AdyenClientConfig) -> DomainResult<serde_json::Value>;

    /// 对已捕获的支付发起退款
    async fn refund(
        &self,
        config: &AdyenClientConfig,
        request: &RefundModificationRequest,
    ) -> DomainResult<serde_json::Value>;
}
