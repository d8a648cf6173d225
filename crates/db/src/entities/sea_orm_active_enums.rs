//! Stored status enums and their conversions to the core workflow types.
//!
//! Statuses are stored as their upper-case names in `varchar(20)` columns.

use campusdesk_core::workflow as domain;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored document request status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
    #[sea_orm(string_value = "RELEASED")]
    Released,
}

/// Stored appointment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "DONE")]
    Done,
}

/// Stored fee payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "VERIFIED")]
    Verified,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

/// Stored inquiry status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "UPPERCASE")]
pub enum InquiryStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "ANSWERED")]
    Answered,
    #[sea_orm(string_value = "CLOSED")]
    Closed,
}

macro_rules! status_conversions {
    ($stored:ident { $($variant:ident),+ $(,)? }) => {
        impl From<$stored> for domain::$stored {
            fn from(status: $stored) -> Self {
                match status {
                    $($stored::$variant => Self::$variant,)+
                }
            }
        }

        impl From<domain::$stored> for $stored {
            fn from(status: domain::$stored) -> Self {
                match status {
                    $(domain::$stored::$variant => Self::$variant,)+
                }
            }
        }
    };
}

status_conversions!(RequestStatus { Pending, Approved, Rejected, Released });
status_conversions!(AppointmentStatus { Pending, Confirmed, Cancelled, Done });
status_conversions!(PaymentStatus { Pending, Verified, Rejected });
status_conversions!(InquiryStatus { Open, Answered, Closed });

#[cfg(test)]
mod tests {
    use super::*;
    use campusdesk_core::workflow::WorkflowStatus;
    use sea_orm::Iterable;

    #[test]
    fn test_stored_values_match_wire_names() {
        for status in RequestStatus::iter() {
            let typed: domain::RequestStatus = status.into();
            assert_eq!(status.to_value(), typed.as_str());
            assert_eq!(RequestStatus::from(typed), status);
        }
        for status in InquiryStatus::iter() {
            let typed: domain::InquiryStatus = status.into();
            assert_eq!(status.to_value(), typed.as_str());
        }
    }

    #[test]
    fn test_every_domain_status_is_storable() {
        assert_eq!(
            domain::AppointmentStatus::ALL.len(),
            AppointmentStatus::iter().count()
        );
        assert_eq!(domain::PaymentStatus::ALL.len(), PaymentStatus::iter().count());
    }
}
