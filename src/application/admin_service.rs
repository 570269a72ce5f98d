use crate::application::dto::{
    format_admin_datetime, format_optional_admin_datetime, ActionResponse, NotificationView,
    RefundRequest, RefundView, VerifyConfigurationRequest, MESSAGE_INVALID_REFUND_AMOUNT,
    MESSAGE_PAYMENT_METHODS_MISSING, MESSAGE_REFUND_ERROR,
};
use crate::domain::currency;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{Order, OrderAssociation, RefundSource, RefundStatus};
use crate::ports::{
    AdyenCheckoutPort, CurrencyFormatterPort, NotificationRepositoryPort, OrderRepositoryPort,
    RefundRepositoryPort, RefundServicePort,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// 后台管理服务
pub struct AdminService {
    orders: Arc<dyn OrderRepositoryPort>,
    refund_service: Arc<dyn RefundServicePort>,
    refunds: Arc<dyn RefundRepositoryPort>,
    notifications: Arc<dyn NotificationRepositoryPort>,
    currency_formatter: Arc<dyn CurrencyFormatterPort>,
    checkout: Arc<dyn AdyenCheckoutPort>,
}

impl AdminService {
    pub fn new(
        orders: Arc<dyn OrderRepositoryPort>,
        refund_service: Arc<dyn RefundServicePort>,
        refunds: Arc<dyn RefundRepositoryPort>,
        notifications: Arc<dyn NotificationRepositoryPort>,
        currency_formatter: Arc<dyn CurrencyFormatterPort>,
        checkout: Arc<dyn AdyenCheckoutPort>,
    ) -> Self {
        Self {
            orders,
            refund_service,
            refunds,
            notifications,
            currency_formatter,
            checkout,
        }
    }

    /// 校验后台配置页提交的API密钥
    pub async fn verify_configuration(&self, request: VerifyConfigurationRequest) -> ActionResponse {
        let config = match request.into_client_config() {
            Ok(config) => config,
            Err(e) => return ActionResponse::failure(e.to_string()),
        };

        info!(
            "Verifying Adyen API key for merchant account: {}",
            config.merchant_account
        );

        match self.checkout.payment_methods(&config).await {
            Ok(result)
                if result
                    .get("paymentMethods")
                    .is_some_and(|methods| !methods.is_null()) =>
            {
                ActionResponse::success()
            }
            Ok(_) => ActionResponse::failure(MESSAGE_PAYMENT_METHODS_MISSING),
            Err(e) => {
                debug!("Adyen API key verification failed: {}", e);
                ActionResponse::failure(e.to_string())
            }
        }
    }

    /// 提交退款
    ///
    /// 请求参数错误返回 `Err`；业务拒绝和调用失败返回 `success: false`。
    pub async fn submit_refund(&self, request: RefundRequest) -> DomainResult<ActionResponse> {
        let order_id = request
            .order_id
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                DomainError::ValidationError("Order Id was not provided in request".to_string())
            })?;

        let refund_amount = request
            .refund_amount
            .filter(|value| !matches!(value.trim(), "" | "0"))
            .ok_or_else(|| {
                DomainError::ValidationError(
                    "Refund amount was not provided in request".to_string(),
                )
            })?;

        let order = match self
            .find_order(&order_id, &[OrderAssociation::Transactions, OrderAssociation::Currency])
            .await
        {
            Ok(order) => order,
            Err(e @ DomainError::OrderNotFound(_)) => return Err(e),
            Err(e) => {
                error!("Order lookup failed for {}: {}", order_id, e);
                return Ok(ActionResponse::failure(MESSAGE_REFUND_ERROR));
            }
        };

        let amount = parse_refund_amount(&refund_amount, &order)?;

        let refundable = match self.refund_service.is_amount_refundable(&order, amount).await {
            Ok(refundable) => refundable,
            Err(e) => {
                error!("Refundable balance check failed for order {}: {}", order.order_number, e);
                return Ok(ActionResponse::failure(MESSAGE_REFUND_ERROR));
            }
        };

        if !refundable {
            info!(
                "Refund amount {} exceeds refundable balance of order {}",
                amount, order.order_number
            );
            return Ok(ActionResponse::failure(MESSAGE_INVALID_REFUND_AMOUNT));
        }

        if let Err(e) = self.execute_refund(&order, amount).await {
            error!("{}", e);
            return Ok(ActionResponse::failure(MESSAGE_REFUND_ERROR));
        }

        info!("Refund of {} submitted for order {}", amount, order.order_number);
        Ok(ActionResponse::success())
    }

    async fn execute_refund(&self, order: &Order, amount: i64) -> DomainResult<()> {
        let result = self.refund_service.refund(order, amount).await?;

        let psp_reference = result
            .get("pspReference")
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                DomainError::InvalidProviderResponse(format!(
                    "Invalid response for refund on order {}",
                    order.order_number
                ))
            })?;

        self.refund_service
            .insert_refund(
                order,
                psp_reference,
                RefundSource::Platform,
                RefundStatus::PendingWebhook,
                amount,
            )
            .await
    }

    /// 查询订单的退款记录
    pub async fn list_refunds(&self, order_id: &str) -> DomainResult<Vec<RefundView>> {
        let Ok(order_id) = Uuid::parse_str(order_id) else {
            debug!("Refund listing requested for malformed order id: {}", order_id);
            return Ok(Vec::new());
        };

        let refunds = self.refunds.find_by_order_id(order_id).await?;
        let mut views = Vec::with_capacity(refunds.len());

        for refund in refunds {
            let context = refund.order.as_ref().ok_or_else(|| {
                DomainError::InternalError(format!(
                    "Refund {} was loaded without its order",
                    refund.psp_reference
                ))
            })?;

            let amount = self
                .currency_formatter
                .format_by_language(refund.amount, &context.currency_iso, context.language_id)
                .await?;

            views.push(RefundView {
                psp_reference: refund.psp_reference.clone(),
                amount,
                raw_amount: refund.amount,
                status: refund.status.to_string(),
                created_at: format_admin_datetime(&refund.created_at),
                updated_at: format_optional_admin_datetime(refund.updated_at.as_ref()),
            });
        }

        Ok(views)
    }

    /// 查询订单的Adyen通知
    pub async fn list_notifications(&self, order_id: &str) -> DomainResult<Vec<NotificationView>> {
        let order = self.find_order(order_id, &[]).await?;

        let notifications = self
            .notifications
            .find_by_order_number(&order.order_number)
            .await?;

        Ok(notifications
            .into_iter()
            .map(|notification| NotificationView {
                status: notification.status().to_string(),
                amount: format!(
                    "{} {}",
                    notification.amount_value, notification.amount_currency
                ),
                created_at: format_admin_datetime(&notification.created_at),
                updated_at: format_optional_admin_datetime(notification.updated_at.as_ref()),
                psp_reference: notification.psp_reference,
                event_code: notification.event_code,
                success: notification.success,
            })
            .collect())
    }

    async fn find_order(
        &self,
        order_id: &str,
        associations: &[OrderAssociation],
    ) -> DomainResult<Order> {
        let id = Uuid::parse_str(order_id)
            .map_err(|_| DomainError::OrderNotFound(order_id.to_string()))?;

        self.orders
            .get_order(id, associations)
            .await?
            .ok_or_else(|| DomainError::OrderNotFound(order_id.to_string()))
    }
}

fn parse_refund_amount(refund_amount: &str, order: &Order) -> DomainResult<i64> {
    let invalid = || DomainError::InvalidAmount(format!("Invalid refund amount {}", refund_amount));

    let decimal = Decimal::from_str(refund_amount.trim()).map_err(|_| invalid())?;
    if decimal <= Decimal::ZERO {
        return Err(invalid());
    }

    let amount = currency::sanitize(decimal, &order.currency_iso)?;
    if amount <= 0 {
        return Err(invalid());
    }

    Ok(amount)
}
