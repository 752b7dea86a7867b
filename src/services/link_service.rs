//! Link management service
//!
//! Provides unified business logic for link operations, shared between
//! the JSON API and the redirect handler.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::get_config;
use crate::errors::{AdroitError, Result};
use crate::storage::{LinkStore, ShortLink};
use crate::utils::shortcode::{self, MAX_CODE_LENGTH, MIN_CODE_LENGTH};
use crate::utils::url_validator::validate_url;

// ============ Request DTOs ============

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Destination URL
    pub destination: String,
    /// Custom short code (optional, generated when not provided)
    pub custom_code: Option<String>,
}

// ============ Code Source ============

/// Source of candidate short codes for auto-generated links.
///
/// The default implementation draws random codes from the CSPRNG; tests
/// substitute a deterministic sequence to drive the collision retry path.
pub trait CodeSource: Send + Sync {
    fn next_code(&self, length: usize) -> Result<String>;
}

/// Draws codes from the thread-local CSPRNG.
pub struct RandomCodeSource;

impl CodeSource for RandomCodeSource {
    fn next_code(&self, length: usize) -> Result<String> {
        shortcode::generate_code(length)
    }
}

// ============ LinkService Implementation ============

/// Attempts to claim a generated code before giving up on the request.
const MAX_GENERATE_ATTEMPTS: u32 = 5;

/// Service for link management operations
///
/// Encapsulates validation, code allocation, and click recording on top
/// of the store, ensuring consistent behavior across all entry points.
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    codes: Arc<dyn CodeSource>,
}

impl LinkService {
    /// Create a new LinkService instance
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self {
            store,
            codes: Arc::new(RandomCodeSource),
        }
    }

    /// Create a LinkService with a custom code source (used by tests)
    pub fn with_code_source(store: Arc<dyn LinkStore>, codes: Arc<dyn CodeSource>) -> Self {
        Self { store, codes }
    }

    /// Configured length for generated codes, clamped to the valid range
    fn generated_code_length(&self) -> usize {
        get_config()
            .links
            .code_length
            .clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH)
    }

    // ============ CRUD Operations ============

    /// Create a new short link
    ///
    /// With a custom code: validate the format and claim the code in a
    /// single atomic insert. Without one: draw random codes and retry on
    /// collision, up to MAX_GENERATE_ATTEMPTS times.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<ShortLink> {
        validate_url(&req.destination)
            .map_err(|e| AdroitError::invalid_destination(e.to_string()))?;

        match req.custom_code.filter(|c| !c.is_empty()) {
            Some(code) => self.create_with_custom_code(&code, &req.destination).await,
            None => self.create_with_generated_code(&req.destination).await,
        }
    }

    async fn create_with_custom_code(&self, code: &str, destination: &str) -> Result<ShortLink> {
        if !shortcode::is_valid_code(code) {
            return Err(AdroitError::invalid_code_format(format!(
                "Invalid short code '{}'. Use {} to {} alphanumeric characters.",
                code, MIN_CODE_LENGTH, MAX_CODE_LENGTH
            )));
        }

        // No separate existence check: a concurrent claim of the same
        // code surfaces here as DuplicateCode from the atomic insert.
        let link = self.store.insert_if_absent(code, destination).await?;

        info!(
            "LinkService: created link '{}' -> '{}'",
            link.code, link.destination
        );
        Ok(link)
    }

    async fn create_with_generated_code(&self, destination: &str) -> Result<ShortLink> {
        let length = self.generated_code_length();

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = self.codes.next_code(length)?;

            match self.store.insert_if_absent(&code, destination).await {
                Ok(link) => {
                    info!(
                        "LinkService: created link '{}' -> '{}'",
                        link.code, link.destination
                    );
                    return Ok(link);
                }
                Err(AdroitError::DuplicateCode(_)) => {
                    warn!(
                        "LinkService: generated code collision, attempt {}/{}",
                        attempt, MAX_GENERATE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            "LinkService: could not allocate a unique code after {} attempts",
            MAX_GENERATE_ATTEMPTS
        );
        Err(AdroitError::namespace_exhausted(format!(
            "Failed to generate a unique short code after {} attempts",
            MAX_GENERATE_ATTEMPTS
        )))
    }

    /// Resolve a short code to its destination URL
    pub async fn resolve(&self, code: &str) -> Result<String> {
        match self.store.get_by_code(code).await {
            Some(link) => Ok(link.destination),
            None => Err(AdroitError::not_found(format!(
                "Short URL '{}' not found",
                code
            ))),
        }
    }

    /// Get the full link entity for a code
    pub async fn get_details(&self, code: &str) -> Result<ShortLink> {
        self.store
            .get_by_code(code)
            .await
            .ok_or_else(|| AdroitError::not_found(format!("Short URL '{}' not found", code)))
    }

    /// Delete a link. Returns false when the code was unknown.
    pub async fn delete_link(&self, code: &str) -> bool {
        let deleted = self.store.delete(code).await;
        if deleted {
            info!("LinkService: deleted link '{}'", code);
        }
        deleted
    }

    /// All links, newest first
    pub async fn list_links(&self) -> Vec<ShortLink> {
        let mut links = self.store.load_all().await;
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    /// Links pointing at exactly `destination` (no URL normalization)
    pub async fn find_by_destination(&self, destination: &str) -> Vec<ShortLink> {
        self.store.get_by_destination(destination).await
    }

    // ============ Click Recording ============

    /// Record a click without blocking the caller.
    ///
    /// The increment runs on a background task; the redirect response
    /// never waits for it. A failed increment is logged and dropped.
    pub fn record_click(&self, code: &str) {
        let store = self.store.clone();
        let code = code.to_string();

        tokio::spawn(async move {
            if !store.increment_clicks(&code).await {
                warn!("LinkService: click on unknown code '{}' ignored", code);
            }
        });
    }
}
