//! Mapping creation and resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::config::ShortIdConfig;
use crate::domain::entities::{NewUrlMap, UrlMap};
use crate::domain::repositories::UrlMapRepository;
use crate::error::AppError;
use crate::utils::short_id;

/// Service for creating and resolving URL mappings.
///
/// This is the only component with branching logic: it owns custom-ID
/// validation, the generate-until-free loop, duplicate detection, and the
/// translation of storage conflicts into domain errors.
pub struct MappingService<R: UrlMapRepository> {
    repository: Arc<R>,
    base_url: String,
    short_ids: ShortIdConfig,
}

impl<R: UrlMapRepository> MappingService<R> {
    /// Creates a new mapping service.
    pub fn new(repository: Arc<R>, base_url: String, short_ids: ShortIdConfig) -> Self {
        Self {
            repository,
            base_url,
            short_ids,
        }
    }

    /// Creates a mapping for `original`, with an optional caller-chosen
    /// short ID.
    ///
    /// Steps, in order; steps 1-4 perform no writes, so no failure path
    /// leaves partial state:
    ///
    /// 1. Custom ID present: validate length (exclusive bounds) then
    ///    character class → [`AppError::InvalidShortFormat`].
    /// 2. Custom ID present: reject reserved or already-taken IDs →
    ///    [`AppError::ShortAlreadyExists`].
    /// 3. Custom ID absent: generate candidates of the default length
    ///    until one is neither reserved nor taken, up to the configured
    ///    attempt cap → [`AppError::IdSpaceExhausted`].
    /// 4. Reject an `original` that already has a mapping →
    ///    [`AppError::DuplicateOriginal`] carrying the existing short link.
    /// 5. Insert. A storage conflict here means we lost a race; re-read
    ///    to report the same error the pre-check would have produced.
    pub async fn create_mapping(
        &self,
        original: String,
        custom_short: Option<String>,
    ) -> Result<UrlMap, AppError> {
        let short = match custom_short.filter(|s| !s.trim().is_empty()) {
            Some(custom) => {
                short_id::validate_custom_short(&custom, &self.short_ids)?;

                if short_id::is_reserved(&custom, &self.short_ids.reserved_prefixes)
                    || self.repository.find_by_short(&custom).await?.is_some()
                {
                    return Err(AppError::short_already_exists(
                        format!("Short ID '{}' is already taken", custom),
                        json!({ "short": custom }),
                    ));
                }

                custom
            }
            None => self.generate_unique_short().await?,
        };

        if let Some(existing) = self.repository.find_by_original(&original).await? {
            return Err(AppError::duplicate_original(self.short_link(&existing.short)));
        }

        let new_map = NewUrlMap { original, short };

        match self.repository.insert(new_map.clone()).await {
            Ok(map) => Ok(map),
            Err(AppError::Conflict { .. }) => Err(self.disambiguate_conflict(&new_map).await),
            Err(e) => Err(e),
        }
    }

    /// Resolves a short ID to its mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping has that short ID.
    pub async fn resolve(&self, short: &str) -> Result<UrlMap, AppError> {
        self.repository.find_by_short(short).await?.ok_or_else(|| {
            AppError::not_found("Short link not found", json!({ "short": short }))
        })
    }

    /// Renders the absolute short link for a short ID.
    pub fn short_link(&self, short: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short)
    }

    /// Storage connectivity check for the health endpoint.
    pub async fn health_check(&self) -> bool {
        self.repository.ping().await.is_ok()
    }

    /// Generates a free short ID of the default length.
    ///
    /// The candidate space (62^6 by default) dwarfs any realistic table;
    /// hitting the attempt cap means the store is misconfigured or
    /// pathologically full.
    async fn generate_unique_short(&self) -> Result<String, AppError> {
        for _ in 0..self.short_ids.max_generate_attempts {
            let candidate = short_id::generate(self.short_ids.default_length);

            if short_id::is_reserved(&candidate, &self.short_ids.reserved_prefixes) {
                continue;
            }

            if self.repository.find_by_short(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }

        Err(AppError::IdSpaceExhausted {
            message: format!(
                "Failed to generate a free short ID in {} attempts",
                self.short_ids.max_generate_attempts
            ),
        })
    }

    /// Decides which uniqueness constraint made an insert fail.
    ///
    /// The store only reports "conflict"; a follow-up read tells us
    /// whether the racing winner took our `original` or our `short`.
    async fn disambiguate_conflict(&self, attempted: &NewUrlMap) -> AppError {
        match self.repository.find_by_original(&attempted.original).await {
            Ok(Some(existing)) => AppError::duplicate_original(self.short_link(&existing.short)),
            Ok(None) => match self.repository.find_by_short(&attempted.short).await {
                Ok(Some(_)) => AppError::short_already_exists(
                    format!("Short ID '{}' is already taken", attempted.short),
                    json!({ "short": attempted.short }),
                ),
                Ok(None) => AppError::internal(
                    "Insert conflict could not be attributed to a constraint",
                    json!({}),
                ),
                Err(e) => e,
            },
            Err(e) => e,
        }
    }
}
