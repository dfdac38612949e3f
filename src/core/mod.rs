pub mod controller;
pub mod export;
pub mod grid;
pub mod notifications;
pub mod outcome;

pub use crate::domain::model::{Notification, Record, RecordId};
pub use crate::domain::ports::{ConfigProvider, EntityBackend, Notifier, Storage};
pub use crate::utils::error::Result;
