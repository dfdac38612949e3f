// Adapters layer: concrete implementations of the domain ports (backend http, storage, notifications).

pub mod http;
pub mod notifier;
pub mod storage;
