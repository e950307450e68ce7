use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Subscriber API credential. Wiped from memory on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    /// An empty key counts as not configured.
    pub fn new(key: String) -> Option<Self> {
        if key.is_empty() { None } else { Some(ApiKey(key)) }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
