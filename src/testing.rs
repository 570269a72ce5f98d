//! 端口的内存实现，供单元测试使用

use crate::domain::currency;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{
    Notification, Order, OrderAssociation, OrderTransaction, RefundOrderContext, RefundRecord,
    RefundSource, RefundStatus,
};
use crate::ports::*;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

pub fn sample_order(amount_total: &str) -> Order {
    let id = Uuid::new_v4();
    Order {
        id,
        order_number: "10042".to_string(),
        currency_iso: "EUR".to_string(),
        language_id: Uuid::new_v4(),
        amount_total: Decimal::from_str(amount_total).unwrap(),
        transactions: vec![OrderTransaction {
            id: Uuid::new_v4(),
            order_id: id,
            original_psp_reference: Some("8815658961765250".to_string()),
        }],
    }
}

pub fn sample_refund(order: &Order, amount: i64, status: RefundStatus) -> RefundRecord {
    RefundRecord {
        id: Uuid::new_v4(),
        order_transaction_id: order.transactions[0].id,
        psp_reference: format!("REFUND-{}", amount),
        source: RefundSource::Platform,
        status,
        amount,
        created_at: Utc.with_ymd_and_hms(2021, 6, 1, 12, 30, 0).unwrap(),
        updated_at: None,
        order: Some(RefundOrderContext {
            order_id: order.id,
            currency_iso: order.currency_iso.clone(),
            language_id: order.language_id,
        }),
    }
}

pub fn sample_notification(order: &Order, done: bool) -> Notification {
    Notification {
        psp_reference: "8815658961765250".to_string(),
        merchant_reference: order.order_number.clone(),
        event_code: "AUTHORISATION".to_string(),
        success: true,
        amount_value: "4999".to_string(),
        amount_currency: "EUR".to_string(),
        done,
        created_at: Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap(),
        updated_at: Some(Utc.with_ymd_and_hms(2021, 6, 1, 12, 1, 0).unwrap()),
    }
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, Order>>,
    error: Option<String>,
    pub requested_associations: Mutex<Vec<Vec<OrderAssociation>>>,
}

impl InMemoryOrderRepository {
    pub fn with_order(order: Order) -> Self {
        let repository = Self::default();
        repository.orders.lock().unwrap().insert(order.id, order);
        repository
    }

    /// 每次查询都返回错误
    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl OrderRepositoryPort for InMemoryOrderRepository {
    async fn get_order(
        &self,
        id: Uuid,
        associations: &[OrderAssociation],
    ) -> DomainResult<Option<Order>> {
        self.requested_associations
            .lock()
            .unwrap()
            .push(associations.to_vec());
        if let Some(message) = &self.error {
            return Err(DomainError::InternalError(message.clone()));
        }
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryRefundRepository {
    pub refunds: Mutex<Vec<RefundRecord>>,
}

impl InMemoryRefundRepository {
    pub fn with_refunds(refunds: Vec<RefundRecord>) -> Self {
        Self {
            refunds: Mutex::new(refunds),
        }
    }
}

#[async_trait]
impl RefundRepositoryPort for InMemoryRefundRepository {
    async fn save(&self, refund: &RefundRecord) -> DomainResult<()> {
        self.refunds.lock().unwrap().push(refund.clone());
        Ok(())
    }

    async fn find_by_order_id(&self, order_id: Uuid) -> DomainResult<Vec<RefundRecord>> {
        Ok(self
            .refunds
            .lock()
            .unwrap()
            .iter()
            .filter(|refund| {
                refund
                    .order
                    .as_ref()
                    .is_some_and(|context| context.order_id == order_id)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Mutex::new(notifications),
        }
    }
}

#[async_trait]
impl NotificationRepositoryPort for InMemoryNotificationRepository {
    async fn find_by_order_number(&self, order_number: &str) -> DomainResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|notification| notification.merchant_reference == order_number)
            .cloned()
            .collect())
    }
}

/// 固定使用en-GB格式
pub struct EnglishCurrencyFormatter;

#[async_trait]
impl CurrencyFormatterPort for EnglishCurrencyFormatter {
    async fn format_by_language(
        &self,
        amount: i64,
        currency_iso: &str,
        _language_id: Uuid,
    ) -> DomainResult<String> {
        Ok(currency::format_minor_units(amount, currency_iso, "en-GB"))
    }
}

/// 返回预设响应的Adyen客户端
pub struct StubAdyenCheckout {
    response: Result<serde_json::Value, String>,
    pub payment_methods_calls: AtomicUsize,
    pub refund_requests: Mutex<Vec<RefundModificationRequest>>,
}

impl StubAdyenCheckout {
    pub fn responding(response: serde_json::Value) -> Self {
        Self {
            response: Ok(response),
            payment_methods_calls: AtomicUsize::new(0),
            refund_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            payment_methods_calls: AtomicUsize::new(0),
            refund_requests: Mutex::new(Vec::new()),
        }
    }

    fn reply(&self) -> DomainResult<serde_json::Value> {
        self.response.clone().map_err(DomainError::AdyenError)
    }
}

#[async_trait]
impl AdyenCheckoutPort for StubAdyenCheckout {
    async fn payment_methods(&self, _config: &AdyenClientConfig) -> DomainResult<serde_json::Value> {
        self.payment_methods_calls.fetch_add(1, Ordering::SeqCst);
        self.reply()
    }

    async fn refund(
        &self,
        _config: &AdyenClientConfig,
        request: &RefundModificationRequest,
    ) -> DomainResult<serde_json::Value> {
        self.refund_requests.lock().unwrap().push(request.clone());
        self.reply()
    }
}

/// 记录调用次数的退款服务
pub struct RecordingRefundService {
    refundable: bool,
    response: Result<serde_json::Value, String>,
    check_error: Option<String>,
    insert_error: Option<String>,
    pub refundable_checks: AtomicUsize,
    pub refund_calls: AtomicUsize,
    pub inserted: Mutex<Vec<(String, RefundSource, RefundStatus, i64)>>,
}

impl RecordingRefundService {
    pub fn new(refundable: bool, response: Result<serde_json::Value, String>) -> Self {
        Self {
            refundable,
            response,
            check_error: None,
            insert_error: None,
            refundable_checks: AtomicUsize::new(0),
            refund_calls: AtomicUsize::new(0),
            inserted: Mutex::new(Vec::new()),
        }
    }

    /// 可退余额检查返回错误
    pub fn failing_check(mut self, message: &str) -> Self {
        self.check_error = Some(message.to_string());
        self
    }

    /// 保存退款记录返回错误
    pub fn failing_insert(mut self, message: &str) -> Self {
        self.insert_error = Some(message.to_string());
        self
    }

    pub fn total_calls(&self) -> usize {
        self.refundable_checks.load(Ordering::SeqCst)
            + self.refund_calls.load(Ordering::SeqCst)
            + self.inserted.lock().unwrap().len()
    }
}

#[async_trait]
impl RefundServicePort for RecordingRefundService {
    async fn is_amount_refundable(&self, _order: &Order, _amount: i64) -> DomainResult<bool> {
        self.refundable_checks.fetch_add(1, Ordering::SeqCst);
        match &self.check_error {
            Some(message) => Err(DomainError::InternalError(message.clone())),
            None => Ok(self.refundable),
        }
    }

    async fn refund(&self, _order: &Order, _amount: i64) -> DomainResult<serde_json::Value> {
        self.refund_calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(DomainError::AdyenError)
    }

    async fn insert_refund(
        &self,
        _order: &Order,
        psp_reference: &str,
        source: RefundSource,
        status: RefundStatus,
        amount: i64,
    ) -> DomainResult<()> {
        if let Some(message) = &self.insert_error {
            return Err(DomainError::InternalError(message.clone()));
        }
        self.inserted
            .lock()
            .unwrap()
            .push((psp_reference.to_string(), source, status, amount));
        Ok(())
    }
}
