use crate::domain::currency;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::{NotificationStatus, RefundSource, RefundStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 订单（由商城平台持有，此处只读）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 订单ID（内部）
    pub id: Uuid,

    /// 订单号（面向用户，Adyen通知中的merchantReference）
    pub order_number: String,

    /// 货币ISO代码
    pub currency_iso: String,

    /// 语言ID
    pub language_id: Uuid,

    /// 订单总额（主单位）
    pub amount_total: Decimal,

    /// 支付交易（仅在请求关联加载时填充）
    pub transactions: Vec<OrderTransaction>,
}

impl Order {
    /// 订单总额（最小单位）
    pub fn amount_total_minor(&self) -> DomainResult<i64> {
        currency::sanitize(self.amount_total, &self.currency_iso)
    }

    /// 第一笔带有Adyen原始pspReference的交易
    pub fn adyen_transaction(&self) -> Option<&OrderTransaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.original_psp_reference.is_some())
    }
}

/// 订单支付交易
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTransaction {
    pub id: Uuid,
    pub order_id: Uuid,

    /// Adyen支付的pspReference
    pub original_psp_reference: Option<String>,
}

/// 退款记录所属订单的展示信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundOrderContext {
    pub order_id: Uuid,
    pub currency_iso: String,
    pub language_id: Uuid,
}

/// 本地退款记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRecord {
    pub id: Uuid,

    /// 原始订单交易ID
    pub order_transaction_id: Uuid,

    /// Adyen退款pspReference
    pub psp_reference: String,

    /// 退款来源
    pub source: RefundSource,

    /// 退款状态
    pub status: RefundStatus,

    /// 退款金额（最小单位）
    pub amount: i64,

    /// 创建时间
    pub created_at: DateTime<Utc>,

    /// 更新时间（最终状态由通知写入）
    pub updated_at: Option<DateTime<Utc>>,

    /// 所属订单（仅查询时填充）
    pub order: Option<RefundOrderContext>,
}

impl RefundRecord {
    /// 创建新的退款记录
    pub fn new(
        order_transaction_id: Uuid,
        psp_reference: String,
        source: RefundSource,
        status: RefundStatus,
        amount: i64,
    ) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount(
                "Refund amount must be greater than 0".to_string(),
            ));
        }

        if psp_reference.is_empty() {
            return Err(DomainError::ValidationError(
                "Refund pspReference must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            order_transaction_id,
            psp_reference,
            source,
            status,
            amount,
            created_at: Utc::now(),
            updated_at: None,
            order: None,
        })
    }

    /// 是否占用可退余额（失败的退款不计入）
    pub fn counts_against_balance(&self) -> bool {
        self.status != RefundStatus::Failed
    }
}

/// Adyen异步通知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub psp_reference: String,

    /// 商户参考号（即订单号）
    pub merchant_reference: String,

    pub event_code: String,
    pub success: bool,
    pub amount_value: String,
    pub amount_currency: String,

    /// 是否已处理完成
    pub done: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn status(&self) -> NotificationStatus {
        NotificationStatus::from_done(self.done)
    }
}
