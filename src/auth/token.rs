//! API token type.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::Error;

/// Environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "GLASSFROG_API_TOKEN";

/// A GlassFrog API token.
///
/// Cloning shares the same buffer; the buffer is wiped when the last clone
/// is dropped. `Debug` never prints the secret.
///
/// ```rust
/// use glassfrog::ApiToken;
///
/// let token = ApiToken::new("42");
/// assert_eq!(token.expose(), "42");
/// assert_eq!(format!("{:?}", token), "ApiToken([REDACTED])");
/// ```
#[derive(Clone)]
pub struct ApiToken(Arc<Zeroizing<String>>);

impl ApiToken {
    /// Wraps a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(Zeroizing::new(token.into())))
    }

    /// Reads the token from [`TOKEN_ENV_VAR`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_var(TOKEN_ENV_VAR)
    }

    /// Reads the token from an arbitrary environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset, empty, or not
    /// valid unicode.
    pub fn from_env_var(name: &str) -> Result<Self, Error> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(Self::new(value)),
            Ok(_) => Err(Error::configuration(format!("{} is empty", name))),
            Err(e) => Err(Error::configuration(format!("{} is not set", name)).with_source(e)),
        }
    }

    /// Returns the raw token, for building the auth header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&format_args!("[REDACTED]")).finish()
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
