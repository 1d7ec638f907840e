//! Configuration types for the GlassFrog client.
//!
//! - [`RetryConfig`]: Retry behavior for transient transport failures

mod retry;

pub use retry::RetryConfig;
