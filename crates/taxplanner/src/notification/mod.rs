//! Relay that turns contact and filing submissions into admin notification emails.

pub mod gateway;
pub mod relay;
pub mod request;
pub mod router;
pub mod template;

pub use gateway::{DeliveryError, DeliveryReceipt, EmailGateway, OutboundEmail, ResendClient};
pub use relay::{NotificationRelay, RelayError, RelaySettings};
pub use request::{ContactNotification, FilingNotification, NotificationRequest};
pub use router::{notification_router, NOTIFICATIONS_PATH};
pub use template::{render, RenderedEmail};
