//! Conversion handler core
//!
//! Turns a validated [`ConversionRequest`] into a [`ConversionResult`],
//! either through the injected completion client or, when none was
//! configured at startup, through the static local templates.

use biztone_common::api::{ConversionRequest, ConversionResult, ConversionSource};
use biztone_common::config::{CompletionConfig, ResolvedApiKey, API_KEY_ENV};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::completion::{CompletionClient, CompletionError, GroqClient, GroqSettings};
use crate::fallback;
use crate::prompt::{self, SamplingParams};

/// Conversion failure
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The completion service call failed in any way
    #[error("Chat completion via {provider} failed")]
    Upstream {
        provider: &'static str,
        #[source]
        source: CompletionError,
    },
}

/// Converter with a fixed completion mode
///
/// Whether a client is present is decided once, at construction; it never
/// changes afterwards.
#[derive(Clone)]
pub struct Converter {
    client: Option<Arc<dyn CompletionClient>>,
    sampling: SamplingParams,
}

impl Converter {
    /// Converter backed by a completion client
    pub fn with_client(client: Arc<dyn CompletionClient>, sampling: SamplingParams) -> Self {
        Self {
            client: Some(client),
            sampling,
        }
    }

    /// Converter that only uses the local templates
    pub fn local_only() -> Self {
        Self {
            client: None,
            sampling: SamplingParams::default(),
        }
    }

    /// Choose the completion mode at startup
    ///
    /// A missing key, or a key whose client cannot be built, selects local
    /// fallback mode. Neither case is an error.
    pub fn from_config(api_key: Option<ResolvedApiKey>, config: &CompletionConfig) -> Self {
        let Some(api_key) = api_key else {
            warn!(
                "{} is not set or valid. Running in local fallback mode.",
                API_KEY_ENV
            );
            return Self::local_only();
        };

        match GroqClient::new(GroqSettings::from_config(api_key.key, config)) {
            Ok(client) => {
                info!(
                    model = %client.model(),
                    key_source = %api_key.source,
                    "Groq client initialized successfully"
                );
                Self::with_client(Arc::new(client), SamplingParams::from(config))
            }
            Err(e) => {
                warn!("Failed to initialize Groq client: {}. Running in local fallback mode.", e);
                Self::local_only()
            }
        }
    }

    /// Provenance every successful conversion will report
    pub fn source(&self) -> ConversionSource {
        match self.client {
            Some(_) => ConversionSource::ExternalApi,
            None => ConversionSource::LocalFallback,
        }
    }

    /// Rewrite validated text for its audience, via the completion client or the local templates
    pub async fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        let converted = match &self.client {
            Some(client) => {
                let completion = prompt::completion_request(request, self.sampling);
                let text = client
                    .complete(&completion)
                    .await
                    .map_err(|source| ConvertError::Upstream {
                        provider: client.name(),
                        source,
                    })?;

                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ConvertError::Upstream {
                        provider: client.name(),
                        source: CompletionError::EmptyCompletion,
                    });
                }
                trimmed.to_string()
            }
            None => fallback::convert(request),
        };

        Ok(ConversionResult {
            original: request.text().to_string(),
            converted,
            target: request.target(),
            source: self.source(),
        })
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("client", &self.client.as_ref().map(|c| c.name()))
            .field("sampling", &self.sampling)
            .finish()
    }
}
