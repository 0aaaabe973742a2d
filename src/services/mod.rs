//! Services module
//!
//! This module contains the clients for the external collaborators

pub mod recognizer;
pub mod spell;
pub mod store;

// Re-export commonly used services
pub use recognizer::{IntentRecognizer, LuisRecognizer, LuisResponse};
pub use spell::{apply_corrections, BingSpellService, FlaggedToken, SpellCorrector};
pub use store::{HotelStore, SampleHotelStore};

use std::sync::Arc;
use serde::Serialize;
use tracing::{info, warn};
use crate::config::settings::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and sharing all collaborator clients
#[derive(Clone)]
pub struct ServiceFactory {
    /// `None` when no model endpoint is configured
    pub recognizer: Option<Arc<dyn IntentRecognizer>>,
    /// `None` when spell correction is disabled
    pub spell_checker: Option<Arc<dyn SpellCorrector>>,
    pub hotel_store: Arc<dyn HotelStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        let recognizer: Option<Arc<dyn IntentRecognizer>> = if settings.recognizer.model_url.is_empty() {
            warn!("No intent model URL configured, every message goes to the default responder");
            None
        } else {
            Some(Arc::new(LuisRecognizer::new(&settings.recognizer)?))
        };

        let spell_checker: Option<Arc<dyn SpellCorrector>> = if settings.spell.enabled {
            Some(Arc::new(BingSpellService::new(&settings.spell)?))
        } else {
            None
        };

        let hotel_store = Arc::new(SampleHotelStore::new(&settings.store));

        info!(
            recognizer = recognizer.is_some(),
            spell_checker = spell_checker.is_some(),
            "Services initialized"
        );

        Ok(Self::from_parts(recognizer, spell_checker, hotel_store))
    }

    /// Assemble a factory from ready-made collaborators
    pub fn from_parts(
        recognizer: Option<Arc<dyn IntentRecognizer>>,
        spell_checker: Option<Arc<dyn SpellCorrector>>,
        hotel_store: Arc<dyn HotelStore>,
    ) -> Self {
        Self {
            recognizer,
            spell_checker,
            hotel_store,
        }
    }

    /// Health check for all services
    pub fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            recognizer_configured: self.recognizer.is_some(),
            spell_check_enabled: self.spell_checker.is_some(),
            hotel_store_ready: true,
        }
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("recognizer", &self.recognizer.is_some())
            .field("spell_checker", &self.spell_checker.is_some())
            .finish_non_exhaustive()
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub recognizer_configured: bool,
    pub spell_check_enabled: bool,
    pub hotel_store_ready: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.hotel_store_ready
    }

    /// Get list of degraded services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.recognizer_configured {
            issues.push("Intent recognizer not configured".to_string());
        }
        if !self.hotel_store_ready {
            issues.push("Hotel store not ready".to_string());
        }

        issues
    }
}
