use crate::domain::errors::DomainResult;
use crate::domain::{Order, OrderAssociation, OrderTransaction};
use crate::ports::order_repository_port::OrderRepositoryPort;
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// 平台实体的线上版本ID
pub const LIVE_VERSION_ID: &str = "0fa91ce3e96a4bc2be4bd9ce752c3425";

/// MySQL订单仓储实现
#[derive(Clone)]
pub struct MySqlOrderRepository {
    pool: Arc<Pool<MySql>>,
}

impl MySqlOrderRepository {
    pub fn new(pool: Arc<Pool<MySql>>) -> Self {
        Self { pool }
    }

    async fn find_transactions(&self, order_id: Uuid) -> DomainResult<Vec<OrderTransaction>> {
        let query = r#"
            SELECT id, order_id,
                   JSON_UNQUOTE(JSON_EXTRACT(custom_fields, '$.originalPspReference'))
                       AS original_psp_reference
            FROM order_transaction
            WHERE order_id = ? AND version_id = UNHEX(?)
            ORDER BY created_at
        "#;

        let rows = sqlx::query_as::<_, OrderTransactionRow>(query)
            .bind(order_id)
            .bind(LIVE_VERSION_ID)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(OrderTransactionRow::into_transaction).collect())
    }
}

#[async_trait]
impl OrderRepositoryPort for MySqlOrderRepository {
    /// 根据ID查找订单
    async fn get_order(
        &self,
        id: Uuid,
        associations: &[OrderAssociation],
    ) -> DomainResult<Option<Order>> {
        let query = r#"
            SELECT o.id, o.order_number, o.language_id,
                   CAST(o.amount_total AS DECIMAL(20, 4)) AS amount_total,
                   c.iso_code AS currency_iso
            FROM `order` o
            JOIN currency c ON c.id = o.currency_id
            WHERE o.id = ? AND o.version_id = UNHEX(?)
        "#;

        let row = sqlx::query_as::<_, OrderRow>(query)
            .bind(id)
            .bind(LIVE_VERSION_ID)
            .fetch_optional(self.pool.as_ref())
            .await?;

        let Some(row) = row else {
            debug!("Order not found: {}", id);
            return Ok(None);
        };

        let transactions = if associations.contains(&OrderAssociation::Transactions) {
            self.find_transactions(id).await?
        } else {
            Vec::new()
        };

        Ok(Some(row.into_order(transactions)))
    }
}

/// 订单行结构体
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: Option<String>,
    language_id: Uuid,
    amount_total: Decimal,
    currency_iso: String,
}

impl OrderRow {
    fn into_order(self, transactions: Vec<OrderTransaction>) -> Order {
        Order {
            id: self.id,
            order_number: self.order_number.unwrap_or_default(),
            currency_iso: self.currency_iso,
            language_id: self.language_id,
            amount_total: self.amount_total,
            transactions,
        }
    }
}

/// 订单交易行结构体
#[derive(Debug, sqlx::FromRow)]
struct OrderTransactionRow {
    id: Uuid,
    order_id: Uuid,
    original_psp_reference: Option<String>,
}

impl OrderTransactionRow {
    fn into_transaction(self) -> OrderTransaction {
        OrderTransaction {
            id: self.id,
            order_id: self.order_id,
            original_psp_reference: self
                .original_psp_reference
                .filter(|reference| !reference.is_empty() && reference != "null"),
        }
    }
}
