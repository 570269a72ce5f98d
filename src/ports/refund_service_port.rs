use crate::domain::errors::DomainResult;
use crate::domain::{Order, RefundSource, RefundStatus};
use async_trait::async_trait;

/// 退款服务端口接口
#[async_trait]
pub trait RefundServicePort: Send + Sync {
    /// 金额是否不超过订单剩余可退余额
    async fn is_amount_refundable(&self, order: &Order, amount: i64) -> DomainResult<bool>;

    /// 向Adyen发起退款，返回原始响应
    async fn refund(&self, order: &Order, amount: i64) -> DomainResult<serde_json::Value>;

    /// 保存本地退款记录
    async fn insert_refund(
        &self,
        order: &Order,
        psp_reference: &str,
        source: RefundSource,
        status: RefundStatus,
        amount: i64,
    ) -> DomainResult<()>;
}
