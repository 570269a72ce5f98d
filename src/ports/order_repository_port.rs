use crate::domain::errors::DomainResult;
use crate::domain::{Order, OrderAssociation};
use async_trait::async_trait;
use uuid::Uuid;

/// 订单仓储端口接口（只读）
#[async_trait]
pub trait OrderRepositoryPort: Send + Sync {
    /// 根据ID查找订单，并按需加载关联数据
    async fn get_order(
        &self,
        id: Uuid,
        associations: &[OrderAssociation],
    ) -> DomainResult<Option<Order>>;
}
