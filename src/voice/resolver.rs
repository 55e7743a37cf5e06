// Destination resolution - gazetteer first, external geocoder second

use super::gazetteer::Gazetteer;
use crate::geo::LatLng;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A resolved destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDestination {
    pub position: LatLng,
    /// Display name for spoken confirmation
    pub display_name: String,
    /// True when the gazetteer answered without the external service
    pub from_gazetteer: bool,
}

/// Errors from destination resolution
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    /// Neither the gazetteer nor the geocoder knows the name
    #[error("No location found for the given name")]
    NotFound,
    /// The external service refused the request for now
    #[error("Geocoding service rate limited")]
    RateLimited,
    /// Service-specific failure
    #[error("Geocoding service error: {0}")]
    Service(String),
}

/// Contract for the external geocoding collaborator.
///
/// Best-effort and rate-limited; consulted only after the gazetteer
/// misses.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve free text to a coordinate and display name.
    async fn geocode(&self, query: &str) -> Result<ResolvedDestination, GeocodeError>;
}

/// Resolves spoken destination text, gazetteer first then geocoder.
pub struct DestinationResolver {
    gazetteer: Gazetteer,
    geocoder: Arc<dyn Geocoder>,
}

impl DestinationResolver {
    pub fn new(gazetteer: Gazetteer, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { gazetteer, geocoder }
    }

    /// Resolve a destination query.
    ///
    /// `NotFound` is returned only after both sources miss; the caller
    /// prompts the user for an alternate name.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedDestination, GeocodeError> {
        if let Some(hit) = self.gazetteer.lookup(query) {
            crate::info!("[voice] Gazetteer resolved {:?} -> {:?}", query, hit.name);
            return Ok(ResolvedDestination {
                position: hit.position,
                display_name: hit.name.to_string(),
                from_gazetteer: true,
            });
        }

        crate::debug!("[voice] Gazetteer miss for {:?}, trying geocoder", query);
        self.geocoder.geocode(query).await
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
