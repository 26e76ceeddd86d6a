use std::time::Instant;

use tonic::codec::CompressionEncoding;
use tonic::metadata::{MetadataKey, MetadataValue};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint, Identity};

use crate::proto::GrpcMethod;

use super::codec::DynamicCodec;
use super::metadata::metadata_pairs;
use super::{ConnectOptions, Encoding, Error, InvokeOptions, Result, UnaryResult};

#[derive(Debug, Clone)]
pub struct GrpcClient {
    channel: Channel,
}

impl GrpcClient {
    pub async fn connect(target: &str, opts: ConnectOptions) -> Result<Self> {
        let uri = if target.contains("://") {
            target.to_string()
        } else if opts.tls.is_some() {
            format!("https://{target}")
        } else {
            format!("http://{target}")
        };

        let mut endpoint = Endpoint::from_shared(uri)?.tcp_nodelay(true);

        if let Some(timeout) = opts.timeout {
            endpoint = endpoint.connect_timeout(timeout);
        }

        if let Some(tls) = opts.tls {
            let mut tls_cfg = ClientTlsConfig::new();

            if let Some(domain) = tls.domain_name {
                tls_cfg = tls_cfg.domain_name(domain);
            }

            if let Some(ca_pem) = tls.ca_pem {
                tls_cfg = tls_cfg.ca_certificate(Certificate::from_pem(ca_pem));
            }

            if let (Some(cert), Some(key)) = (tls.identity_pem, tls.identity_key_pem) {
                tls_cfg = tls_cfg.identity(Identity::from_pem(cert, key));
            }

            endpoint = endpoint.tls_config(tls_cfg)?;
        }

        let channel = endpoint.connect().await.map_err(Error::Connect)?;

        Ok(Self { channel })
    }

    pub async fn unary(
        &self,
        method: &GrpcMethod,
        req: prost_reflect::DynamicMessage,
        opts: InvokeOptions,
    ) -> Result<UnaryResult> {
        let started = Instant::now();

        let mut request = tonic::Request::new(req);

        if let Some(timeout) = opts.timeout {
            request.set_timeout(timeout);
        }

        let accepts_gzip = opts.accept.contains(&Encoding::Gzip);

        // tonic only advertises encodings it can also decode, so an
        // identity-only advertisement goes out as a plain metadata pair.
        if !accepts_gzip && opts.accept.contains(&Encoding::Identity) {
            request
                .metadata_mut()
                .insert("grpc-accept-encoding", MetadataValue::from_static("identity"));
        }

        for (k, v) in opts.metadata {
            let key =
                MetadataKey::from_bytes(k.as_bytes()).map_err(|_| Error::MetadataKey(k.clone()))?;
            let value = MetadataValue::try_from(v.clone())
                .map_err(|_| Error::MetadataValue { key: k, value: v })?;
            request.metadata_mut().insert(key, value);
        }

        let mut grpc = tonic::client::Grpc::new(self.channel.clone());
        if opts.send == Some(Encoding::Gzip) {
            grpc = grpc.send_compressed(CompressionEncoding::Gzip);
        }
        if accepts_gzip {
            grpc = grpc.accept_compressed(CompressionEncoding::Gzip);
        }

        let path = method.path().clone();
        let codec = DynamicCodec::new(method.output());

        let res = async {
            grpc.ready()
                .await
                .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {e}")))?;
            grpc.unary(request, path, codec).await
        }
        .await;

        let elapsed = started.elapsed();

        match res {
            Ok(res) => {
                let headers = metadata_pairs(res.metadata());

                Ok(UnaryResult {
                    ok: true,
                    status: Some(0),
                    message: None,
                    error: None,
                    response: Some(res.into_inner()),
                    headers,
                    trailers: Vec::new(),
                    elapsed,
                })
            }
            Err(status) => {
                // Non-OK gRPC status is a normal protocol outcome.
                let code = status.code() as u16;
                let trailers = metadata_pairs(status.metadata());

                Ok(UnaryResult {
                    ok: false,
                    status: Some(code),
                    message: Some(status.message().to_string()),
                    error: Some(status.to_string()),
                    response: None,
                    headers: Vec::new(),
                    trailers,
                    elapsed,
                })
            }
        }
    }
}
