pub mod application;
pub mod domain;

#[cfg(feature = "ssr")]
pub mod infrastructure;

#[cfg(feature = "ssr")]
mod app_context;

#[cfg(feature = "ssr")]
mod config;

#[cfg(feature = "ssr")]
pub use app_context::AppContext;

#[cfg(feature = "ssr")]
pub use config::AppConfig;
