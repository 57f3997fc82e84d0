//! Notifications Module
//!
//! Best-effort push delivery. Workflows queue a [`Notification`] on the
//! [`Notifier`] after their transaction commits; a dispatcher task resolves
//! device tokens and hands the payload to a [`PushGateway`].
//!
//! - **`notifier`** - Queue handle held in `AppState`
//! - **`dispatcher`** - Background delivery task
//! - **`gateway`** - Pushy HTTP gateway and the logging fallback
//! - **`tokens`** - Device token storage
//! - **`handlers`** - `PUT /pushy`, `DELETE /pushy`

pub mod dispatcher;
pub mod gateway;
pub mod handlers;
pub mod notifier;
pub mod tokens;

pub use dispatcher::{spawn_dispatcher, DeliveryReport};
pub use gateway::{Gateway, LogGateway, NotifyError, PushGateway, PushyGateway};
pub use handlers::{register_device, remove_devices};
pub use notifier::{Notification, Notifier};
