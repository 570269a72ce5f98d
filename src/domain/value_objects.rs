use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 退款状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundStatus {
    /// 已提交，等待Adyen异步通知
    #[serde(rename = "Pending Webhook")]
    PendingWebhook,
    /// 退款成功
    #[serde(rename = "Success")]
    Success,
    /// 退款失败
    #[serde(rename = "Failed")]
    Failed,
}

impl fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefundStatus::PendingWebhook => write!(f, "Pending Webhook"),
            RefundStatus::Success => write!(f, "Success"),
            RefundStatus::Failed => write!(f, "Failed"),
        }
    }
}

impl FromStr for RefundStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending Webhook" => Ok(RefundStatus::PendingWebhook),
            "Success" => Ok(RefundStatus::Success),
            "Failed" => Ok(RefundStatus::Failed),
            other => Err(DomainError::InternalError(format!(
                "Invalid refund status: {}",
                other
            ))),
        }
    }
}

/// 退款来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundSource {
    /// 由商城后台发起
    #[serde(rename = "Shopware")]
    Platform,
    /// 由Adyen后台发起（通过通知同步）
    #[serde(rename = "Adyen")]
    Adyen,
}

impl fmt::Display for RefundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefundSource::Platform => write!(f, "Shopware"),
            RefundSource::Adyen => write!(f, "Adyen"),
        }
    }
}

impl FromStr for RefundSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shopware" => Ok(RefundSource::Platform),
            "Adyen" => Ok(RefundSource::Adyen),
            other => Err(DomainError::InternalError(format!(
                "Invalid refund source: {}",
                other
            ))),
        }
    }
}

/// 通知处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Processed,
}

impl NotificationStatus {
    pub fn from_done(done: bool) -> Self {
        if done {
            NotificationStatus::Processed
        } else {
            NotificationStatus::Pending
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationStatus::Pending => write!(f, "pending"),
            NotificationStatus::Processed => write!(f, "processed"),
        }
    }
}

/// 订单加载时需要一并查询的关联数据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAssociation {
    Transactions,
    Currency,
}
