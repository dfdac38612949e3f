pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::Settings;

pub use adapters::{
    http::HttpBackend,
    notifier::{CollectingNotifier, ConsoleNotifier},
    storage::LocalStorage,
};
pub use core::{controller::EntityTableController, outcome::Outcome};
pub use domain::schema::EntityKind;
pub use utils::error::{AdminError, Result};

/// Controller wired to the HTTP backend and local files.
pub type HttpController<N> = EntityTableController<HttpBackend, LocalStorage, N>;
