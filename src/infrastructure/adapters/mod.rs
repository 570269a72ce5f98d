pub mod adyen_checkout_adapter;
pub mod mysql_currency_formatter;
pub mod mysql_notification_repository;
pub mod mysql_order_repository;
pub mod mysql_refund_repository;

pub use adyen_checkout_adapter::AdyenCheckoutAdapter;
pub use mysql_currency_formatter::MySqlCurrencyFormatter;
pub use mysql_notification_repository::MySqlNotificationRepository;
pub use mysql_order_repository::MySqlOrderRepository;
pub use mysql_refund_repository::MySqlRefundRepository;
