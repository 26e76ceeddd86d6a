use std::time::Duration;

/// Message encodings negotiable over `grpc-encoding` /
/// `grpc-accept-encoding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Encoding {
    Gzip,
    Identity,
}

#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    pub ca_pem: Option<Vec<u8>>,
    pub identity_pem: Option<Vec<u8>>,
    pub identity_key_pem: Option<Vec<u8>>,
    pub domain_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub timeout: Option<Duration>,
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub timeout: Option<Duration>,
    pub metadata: Vec<(String, String)>,

    /// Compress the request body with this encoding (`grpc-encoding`).
    pub send: Option<Encoding>,

    /// Response encodings to advertise via `grpc-accept-encoding`.
    /// Empty advertises nothing at all.
    pub accept: Vec<Encoding>,
}

#[derive(Debug, Clone)]
pub struct UnaryResult {
    pub ok: bool,
    pub status: Option<u16>,
    pub message: Option<String>,
    pub error: Option<String>,

    pub response: Option<prost_reflect::DynamicMessage>,
    pub headers: Vec<(String, String)>,
    pub trailers: Vec<(String, String)>,

    pub elapsed: Duration,
}

impl UnaryResult {
    /// Response header value, if present. Keys are lowercase on the wire.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `grpc-encoding` of the response body, if the server compressed it.
    #[must_use]
    pub fn response_encoding(&self) -> Option<&str> {
        self.header("grpc-encoding")
    }

    /// String field of the decoded response message, by field name.
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<String> {
        let msg = self.response.as_ref()?;
        let value = msg.get_field_by_name(name)?;
        value.as_str().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_round_trips_through_strings() {
        assert_eq!(Encoding::Gzip.to_string(), "gzip");
        assert_eq!(Encoding::Identity.to_string(), "identity");
        assert_eq!("gzip".parse(), Ok(Encoding::Gzip));
        assert_eq!("identity".parse(), Ok(Encoding::Identity));
        assert!("deflate".parse::<Encoding>().is_err());
    }

    fn result_with_headers(headers: Vec<(String, String)>) -> UnaryResult {
        UnaryResult {
            ok: true,
            status: Some(0),
            message: None,
            error: None,
            response: None,
            headers,
            trailers: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn response_encoding_reads_grpc_encoding_header() {
        let res = result_with_headers(vec![
            ("content-type".to_string(), "application/grpc".to_string()),
            ("grpc-encoding".to_string(), "gzip".to_string()),
        ]);
        assert_eq!(res.response_encoding(), Some("gzip"));

        let res = result_with_headers(vec![(
            "content-type".to_string(),
            "application/grpc".to_string(),
        )]);
        assert_eq!(res.response_encoding(), None);
    }

    #[test]
    fn field_str_is_none_without_response() {
        let res = result_with_headers(Vec::new());
        assert_eq!(res.field_str("message"), None);
    }
}
