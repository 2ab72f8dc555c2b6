//! Application state shared across handlers.

use std::sync::Arc;

use campus_merch_core::{ImageCipher, ImageCipherError, PromptPayConfig};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The image cipher is built once
/// at startup from the configured passphrases.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    images: ImageCipher,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured image token passphrase is empty.
    pub fn new(config: StorefrontConfig) -> Result<Self, ImageCipherError> {
        let images = config.image_tokens.cipher()?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, images }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the image token cipher.
    #[must_use]
    pub fn images(&self) -> &ImageCipher {
        &self.inner.images
    }

    /// Get a reference to the PromptPay settings.
    #[must_use]
    pub fn promptpay(&self) -> &PromptPayConfig {
        &self.inner.config.promptpay
    }
}
