use std::sync::Arc;

use vitrine_core::{CmsClient, ConversionsClient, FallbackTable, Resolver, Result};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver<CmsClient>>,
    pub conversions: Arc<ConversionsClient>,
}

impl AppState {
    pub fn new(resolver: Resolver<CmsClient>, conversions: ConversionsClient) -> Self {
        Self { resolver: Arc::new(resolver), conversions: Arc::new(conversions) }
    }

    #[tracing::instrument(skip_all)]
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let fallback = match &config.fallback_file {
            Some(path) => FallbackTable::from_path(path)?,
            None => FallbackTable::builtin()?,
        };
        let client = CmsClient::new(config.cms.clone())?;
        let conversions = ConversionsClient::new(config.conversions.clone(), config.cms.timeout)?;
        let resolver =
            Resolver::new(client, fallback).with_pages(config.pages.clone()).with_post_limit(config.post_limit);
        Ok(Self::new(resolver, conversions))
    }
}
