use crate::domain::errors::DomainResult;
use async_trait::async_trait;
use uuid::Uuid;

/// 货币格式化端口接口
#[async_trait]
pub trait CurrencyFormatterPort: Send + Sync {
    /// 按订单语言格式化最小单位金额
    async fn format_by_language(
        &self,
        amount: i64,
        currency_iso: &str,
        language_id: Uuid,
    ) -> DomainResult<String>;
}
