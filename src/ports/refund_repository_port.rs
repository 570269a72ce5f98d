use crate::domain::errors::DomainResult;
use crate::domain::RefundRecord;
use async_trait::async_trait;
use uuid::Uuid;

/// 退款记录仓储端口接口
#[async_trait]
pub trait RefundRepositoryPort: Send + Sync {
    /// 保存退款记录
    async fn save(&self, refund: &RefundRecord) -> DomainResult<()>;

    /// 查询订单的全部退款记录（按创建时间排序，附带订单信息）
    async fn find_by_order_id(&self, order_id: Uuid) -> DomainResult<Vec<RefundRecord>>;
}
