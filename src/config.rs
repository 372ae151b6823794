//! Configuration for tsterm
//!
//! Decode limits and request defaults, with sensible defaults.

/// Codec configuration
#[derive(Debug, Clone)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // Decode Limits
    // -------------------------------------------------------------------------
    /// Largest response accepted, in bytes. Larger inputs are rejected
    /// before any parsing happens.
    pub max_message_size: usize,

    /// Deepest tuple/list nesting accepted by the term reader
    pub max_depth: usize,

    // -------------------------------------------------------------------------
    // Request Defaults
    // -------------------------------------------------------------------------
    /// Timeout sent with get requests when the caller gives none (milliseconds)
    pub default_timeout_ms: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_size: 16 * 1024 * 1024, // 16 MB
            max_depth: 64,
            default_timeout_ms: 5000,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the largest accepted response size (in bytes)
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the largest accepted response size in megabytes, saturating
    /// at `usize::MAX` bytes
    pub fn max_message_mb(mut self, mb: usize) -> Self {
        self.config.max_message_size = mb.saturating_mul(1024 * 1024);
        self
    }

    /// Set the deepest accepted term nesting
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the default get timeout (in milliseconds)
    pub fn default_timeout_ms(mut self, ms: u32) -> Self {
        self.config.default_timeout_ms = ms;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
