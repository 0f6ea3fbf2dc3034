#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::fmt;

/// The API credential typed in by the user.
///
/// Held in memory only and sent verbatim with every request. It is never
/// validated; `Debug` output is redacted so it cannot leak into logs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Whether a credential has been entered. Blank input counts as absent.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.0.trim().is_empty()
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_present() { f.write_str("ApiKey(***)") } else { f.write_str("ApiKey(<empty>)") }
    }
}

impl From<String> for ApiKey {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

impl From<&str> for ApiKey {
    fn from(secret: &str) -> Self {
        Self(secret.to_owned())
    }
}
