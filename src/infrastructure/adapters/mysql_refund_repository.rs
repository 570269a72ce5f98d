use crate::domain::errors::DomainResult;
use crate::domain::{RefundOrderContext, RefundRecord};
use crate::infrastructure::adapters::mysql_order_repository::LIVE_VERSION_ID;
use crate::ports::refund_repository_port::RefundRepositoryPort;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL退款记录仓储实现
#[derive(Clone)]
pub struct MySqlRefundRepository {
    pool: Arc<Pool<MySql>>,
}

impl MySqlRefundRepository {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefundRepositoryPort for MySqlRefundRepository {
    /// 保存退款记录
    async fn save(&self, refund: &RefundRecord) -> DomainResult<()> {
        let query = r#"
            INSERT INTO adyen_refund (
                id, order_transaction_id, psp_reference, source,
                status, amount, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(refund.id)
            .bind(refund.order_transaction_id)
            .bind(&refund.psp_reference)
            .bind(refund.source.to_string())
            .bind(refund.status.to_string())
            .bind(refund.amount)
            .bind(refund.created_at)
            .bind(refund.updated_at)
            .execute(self.pool.as_ref())
            .await?;

        debug!("Refund saved: {}", refund.psp_reference);
        Ok(())
    }

    /// 根据订单ID查询退款记录
    async fn find_by_order_id(&self, order_id: Uuid) -> DomainResult<Vec<RefundRecord>> {
        let query = r#"
            SELECT r.id, r.order_transaction_id, r.psp_reference, r.source,
                   r.status, r.amount, r.created_at, r.updated_at,
                   o.id AS order_id, o.language_id, c.iso_code AS currency_iso
            FROM adyen_refund r
            JOIN order_transaction t
                ON t.id = r.order_transaction_id AND t.version_id = UNHEX(?)
            JOIN `order` o
                ON o.id = t.order_id AND o.version_id = t.order_version_id
            JOIN currency c ON c.id = o.currency_id
            WHERE o.id = ?
            ORDER BY r.created_at
        "#;

        let rows = sqlx::query_as::<_, RefundRow>(query)
            .bind(LIVE_VERSION_ID)
            .bind(order_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        debug!("Found {} refunds for order {}", rows.len(), order_id);
        rows.into_iter().map(RefundRow::into_refund).collect()
    }
}

/// 退款行结构体
#[derive(Debug, sqlx::FromRow)]
struct RefundRow {
    id: Uuid,
    order_transaction_id: Uuid,
    psp_reference: String,
    source: String,
    status: String,
    amount: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    order_id: Uuid,
    language_id: Uuid,
    currency_iso: String,
}

impl RefundRow {
    fn into_refund(self) -> DomainResult<RefundRecord> {
        Ok(RefundRecord {
            id: self.id,
            order_transaction_id: self.order_transaction_id,
            psp_reference: self.psp_reference,
            source: self.source.parse()?,
            status: self.status.parse()?,
            amount: self.amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
            order: Some(RefundOrderContext {
                order_id: self.order_id,
                currency_iso: self.currency_iso,
                language_id: self.language_id,
            }),
        })
    }
}
