use crate::domain::currency;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::{Order, OrderTransaction, RefundRecord, RefundSource, RefundStatus};
use crate::ports::{
    AdyenCheckoutPort, AdyenClientConfig, RefundModificationRequest, RefundRepositoryPort,
    RefundServicePort,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// 退款服务
pub struct RefundService {
    checkout: Arc<dyn AdyenCheckoutPort>,
    refunds: Arc<dyn RefundRepositoryPort>,
    config: Arc<AdyenClientConfig>,
}

impl RefundService {
    pub fn new(
        checkout: Arc<dyn AdyenCheckoutPort>,
        refunds: Arc<dyn RefundRepositoryPort>,
        config: Arc<AdyenClientConfig>,
    ) -> Self {
        Self {
            checkout,
            refunds,
            config,
        }
    }

    fn adyen_transaction(order: &Order) -> DomainResult<&OrderTransaction> {
        order.adyen_transaction().ok_or_else(|| {
            DomainError::ValidationError(format!(
                "Order {} has no Adyen payment to refund",
                order.order_number
            ))
        })
    }
}

#[async_trait]
impl RefundServicePort for RefundService {
    async fn is_amount_refundable(&self, order: &Order, amount: i64) -> DomainResult<bool> {
        if amount <= 0 {
            return Ok(false);
        }

        let order_total = order.amount_total_minor()?;
        let refunded: i64 = self
            .refunds
            .find_by_order_id(order.id)
            .await?
            .iter()
            .filter(|refund| refund.counts_against_balance())
            .map(|refund| refund.amount)
            .sum();

        debug!(
            "Order {} total {} refunded {} requested {}",
            order.order_number, order_total, refunded, amount
        );

        Ok(amount <= order_total - refunded)
    }

    async fn refund(&self, order: &Order, amount: i64) -> DomainResult<serde_json::Value> {
        let transaction = Self::adyen_transaction(order)?;
        let payment_psp_reference = transaction
            .original_psp_reference
            .clone()
            .unwrap_or_default();

        info!(
            "Requesting refund of {} {} for order {} (payment {})",
            currency::to_major_units(amount, &order.currency_iso),
            order.currency_iso,
            order.order_number,
            payment_psp_reference
        );

        let request = RefundModificationRequest {
            payment_psp_reference,
            amount,
            currency: order.currency_iso.clone(),
            reference: order.order_number.clone(),
        };

        self.checkout.refund(&self.config, &request).await
    }

    async fn insert_refund(
        &self,
        order: &Order,
        psp_reference: &str,
        source: RefundSource,
        status: RefundStatus,
        amount: i64,
    ) -> DomainResult<()> {
        let transaction = Self::adyen_transaction(order)?;
        let refund = RefundRecord::new(
            transaction.id,
            psp_reference.to_string(),
            source,
            status,
            amount,
        )?;

        self.refunds.save(&refund).await?;
        debug!("Refund {} saved for order {}", psp_reference, order.order_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::AdyenEnvironment;
    use crate::testing::*;
    use serde_json::json;

    fn config() -> Arc<AdyenClientConfig> {
        Arc::new(AdyenClientConfig {
            api_key: "AQE-key".to_string(),
            merchant_account: "ShopwareDemo".to_string(),
            environment: AdyenEnvironment::Test,
            live_endpoint_url_prefix: None,
        })
    }

    fn service(
        checkout: Arc<StubAdyenCheckout>,
        refunds: Arc<InMemoryRefundRepository>,
    ) -> RefundService {
        RefundService::new(checkout, refunds, config())
    }

    #[tokio::test]
    async fn test_amount_within_outstanding_balance_is_refundable() {
        let order = sample_order("100.00");
        let refunds = Arc::new(InMemoryRefundRepository::with_refunds(vec![
            sample_refund(&order, 3000, RefundStatus::Success),
            sample_refund(&order, 2000, RefundStatus::PendingWebhook),
        ]));
        let service = service(Arc::new(StubAdyenCheckout::responding(json!({}))), refunds);

        assert!(service.is_amount_refundable(&order, 5000).await.unwrap());
        assert!(!service.is_amount_refundable(&order, 5001).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_refunds_do_not_consume_balance() {
        let order = sample_order("100.00");
        let refunds = Arc::new(InMemoryRefundRepository::with_refunds(vec![sample_refund(
            &order,
            10000,
            RefundStatus::Failed,
        )]));
        let service = service(Arc::new(StubAdyenCheckout::responding(json!({}))), refunds);

        assert!(service.is_amount_refundable(&order, 10000).await.unwrap());
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_not_refundable() {
        let order = sample_order("100.00");
        let service = service(
            Arc::new(StubAdyenCheckout::responding(json!({}))),
            Arc::new(InMemoryRefundRepository::default()),
        );

        assert!(!service.is_amount_refundable(&order, 0).await.unwrap());
    }

    #[tokio::test]
    async fn test_refund_targets_original_payment() {
        let order = sample_order("100.00");
        let checkout = Arc::new(StubAdyenCheckout::responding(json!({
            "pspReference": "REFUND-PSP",
            "status": "received"
        })));
        let service = service(checkout.clone(), Arc::new(InMemoryRefundRepository::default()));

        let response = service.refund(&order, 1250).await.unwrap();

        assert_eq!(response["pspReference"], "REFUND-PSP");
        let requests = checkout.refund_requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].payment_psp_reference, "8815658961765250");
        assert_eq!(requests[0].amount, 1250);
        assert_eq!(requests[0].currency, "EUR");
        assert_eq!(requests[0].reference, order.order_number);
    }

    #[tokio::test]
    async fn test_refund_without_adyen_transaction_fails() {
        let mut order = sample_order("100.00");
        order.transactions.clear();
        let checkout = Arc::new(StubAdyenCheckout::responding(json!({})));
        let service = service(checkout.clone(), Arc::new(InMemoryRefundRepository::default()));

        let result = service.refund(&order, 1250).await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
        assert!(checkout.refund_requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_refund_persists_record_on_transaction() {
        let order = sample_order("100.00");
        let refunds = Arc::new(InMemoryRefundRepository::default());
        let service = service(Arc::new(StubAdyenCheckout::responding(json!({}))), refunds.clone());

        service
            .insert_refund(
                &order,
                "REFUND-PSP",
                RefundSource::Platform,
                RefundStatus::PendingWebhook,
                1250,
            )
            .await
            .unwrap();

        let saved = refunds.refunds.lock().unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].order_transaction_id, order.transactions[0].id);
        assert_eq!(saved[0].status, RefundStatus::PendingWebhook);
        assert_eq!(saved[0].amount, 1250);
    }
}
