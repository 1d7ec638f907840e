//! Authentication for the GlassFrog API.
//!
//! GlassFrog authenticates every request with a personal API token sent in
//! the `X-Auth-Token` header. The token is read once, either explicitly or
//! from the `GLASSFROG_API_TOKEN` environment variable:
//!
//! ```rust,no_run
//! use glassfrog::ApiToken;
//!
//! let token = ApiToken::from_env()?;
//! # Ok::<(), glassfrog::Error>(())
//! ```

mod token;

pub use token::{ApiToken, TOKEN_ENV_VAR};
