use std::time::Duration;

use crate::grpc::{Encoding, InvokeOptions};

/// The three scripted negotiation scenarios: one request that opts into
/// gzip end to end, one that only accepts identity, and one that stays
/// silent about encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum CompressionScenario {
    /// Request compressed with gzip; client accepts gzip responses.
    #[strum(serialize = "with-gzip")]
    WithGzip,

    /// Client advertises `grpc-accept-encoding: identity` only.
    #[strum(serialize = "identity-only")]
    IdentityOnly,

    /// Client sends no accept-encoding metadata at all.
    #[strum(serialize = "no-accept-header")]
    Unadvertised,
}

impl CompressionScenario {
    pub const ALL: [Self; 3] = [Self::WithGzip, Self::IdentityOnly, Self::Unadvertised];

    /// Request payload sent as the greeted name, e.g. `grpzip-with-gzip`.
    #[must_use]
    pub fn request_name(self, prefix: &str) -> String {
        format!("{prefix}-{self}")
    }

    #[must_use]
    pub fn invoke_options(self, timeout: Option<Duration>) -> InvokeOptions {
        match self {
            Self::WithGzip => InvokeOptions {
                timeout,
                send: Some(Encoding::Gzip),
                accept: vec![Encoding::Gzip],
                ..InvokeOptions::default()
            },
            Self::IdentityOnly => InvokeOptions {
                timeout,
                accept: vec![Encoding::Identity],
                ..InvokeOptions::default()
            },
            Self::Unadvertised => InvokeOptions {
                timeout,
                ..InvokeOptions::default()
            },
        }
    }

    /// Whether the server is expected to compress the response body.
    #[must_use]
    pub fn expects_compressed(self) -> bool {
        matches!(self, Self::WithGzip)
    }

    /// One-line description of the expected server behavior.
    #[must_use]
    pub fn expectation(self) -> &'static str {
        match self {
            Self::WithGzip => "server should compress with gzip",
            Self::IdentityOnly => "server should not compress (client accepts identity only)",
            Self::Unadvertised => "server should not compress (client does not advertise support)",
        }
    }
}
