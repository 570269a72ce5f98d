pub mod admin_service;
pub mod dto;
pub mod refund_service;

pub use admin_service::AdminService;
pub use dto::*;
pub use refund_service::RefundService;
