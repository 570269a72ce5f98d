use crate::domain::errors::DomainResult;
use crate::domain::Notification;
use async_trait::async_trait;

/// Adyen通知仓储端口接口（只读）
#[async_trait]
pub trait NotificationRepositoryPort: Send + Sync {
    /// 根据订单号（merchantReference）查询通知
    async fn find_by_order_number(&self, order_number: &str) -> DomainResult<Vec<Notification>>;
}
