pub mod adyen_checkout_port;
pub mod currency_formatter_port;
pub mod notification_repository_port;
pub mod order_repository_port;
pub mod refund_repository_port;
pub mod refund_service_port;

pub use adyen_checkout_port::{
    AdyenCheckoutPort, AdyenClientConfig, AdyenEnvironment, RefundModificationRequest,
};
pub use currency_formatter_port::CurrencyFormatterPort;
pub use notification_repository_port::NotificationRepositoryPort;
pub use order_repository_port::OrderRepositoryPort;
pub use refund_repository_port::RefundRepositoryPort;
pub use refund_service_port::RefundServicePort;
