use crate::domain::errors::DomainResult;
use crate::domain::Notification;
use crate::ports::notification_repository_port::NotificationRepositoryPort;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool};
use std::sync::Arc;
use tracing::debug;

/// MySQL Adyen通知仓储实现
#[derive(Clone)]
pub struct MySqlNotificationRepository {
    pool: Arc<Pool<MySql>>,
}

impl MySqlNotificationRepository {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepositoryPort for MySqlNotificationRepository {
    /// 根据订单号查询通知
    async fn find_by_order_number(&self, order_number: &str) -> DomainResult<Vec<Notification>> {
        let query = r#"
            SELECT pspreference AS psp_reference, merchant_reference, event_code,
                   success, amount_value, amount_currency, done,
                   created_at, updated_at
            FROM adyen_notification
            WHERE merchant_reference = ?
            ORDER BY created_at
        "#;

        let rows = sqlx::query_as::<_, NotificationRow>(query)
            .bind(order_number)
            .fetch_all(self.pool.as_ref())
            .await?;

        debug!("Found {} notifications for order {}", rows.len(), order_number);
        Ok(rows.into_iter().map(NotificationRow::into_notification).collect())
    }
}

/// 通知行结构体
#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    psp_reference: Option<String>,
    merchant_reference: String,
    event_code: String,
    success: bool,
    amount_value: Option<String>,
    amount_currency: Option<String>,
    done: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl NotificationRow {
    fn into_notification(self) -> Notification {
        Notification {
            psp_reference: self.psp_reference.unwrap_or_default(),
            merchant_reference: self.merchant_reference,
            event_code: self.event_code,
            success: self.success,
            amount_value: self.amount_value.unwrap_or_default(),
            amount_currency: self.amount_currency.unwrap_or_default(),
            done: self.done,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
