use crate::config::AppConfig;
use crate::infrastructure::backend::CityCareClient;
use citycare_errors::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub backend: Arc<CityCareClient>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let backend = CityCareClient::new(config.backend_url.as_str(), config.http_timeout)?;
        Ok(Self {
            backend: Arc::new(backend),
            config,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        tracing::info!("Using CityCare backend at {}", config.backend_url);
        Self::new(config)
    }
}
