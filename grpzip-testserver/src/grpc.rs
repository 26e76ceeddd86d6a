use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::codec::CompressionEncoding;
use tonic::{Request, Response, Status};

pub mod hello {
    tonic::include_proto!("hello");

    /// Compiled descriptors for `hello.proto`, for descriptor-driven clients.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("hello_descriptor");
}

#[derive(Debug, Default)]
struct HelloSvc;

#[tonic::async_trait]
impl hello::hello_grpc_server::HelloGrpc for HelloSvc {
    async fn say_hello(
        &self,
        request: Request<hello::HelloRequest>,
    ) -> std::result::Result<Response<hello::HelloReply>, Status> {
        // Echo the caller's request id so clients can assert that their
        // metadata made it across the wire.
        let request_id = request.metadata().get("x-request-id").cloned();
        let name = request.into_inner().name;

        let mut response = Response::new(hello::HelloReply {
            message: format!("Hello {name}!"),
        });
        if let Some(id) = request_id {
            response.metadata_mut().insert("x-request-id", id);
        }
        Ok(response)
    }
}

pub struct GrpcTestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl GrpcTestServer {
    /// Server with gzip negotiation enabled: responses are compressed
    /// only when the client advertises gzip support.
    pub async fn start() -> std::io::Result<Self> {
        Self::start_inner(true).await
    }

    /// Server that never compresses responses, whatever the client
    /// advertises. Compressed requests are still decoded, so only the
    /// response side of the negotiation misbehaves.
    pub async fn start_identity_only() -> std::io::Result<Self> {
        Self::start_inner(false).await
    }

    async fn start_inner(send_gzip: bool) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let incoming = TcpListenerStream::new(listener);

            // Compressed requests are accepted in both modes; `send_gzip`
            // only controls whether responses may be compressed.
            let mut svc = hello::hello_grpc_server::HelloGrpcServer::new(HelloSvc)
                .accept_compressed(CompressionEncoding::Gzip);
            if send_gzip {
                svc = svc.send_compressed(CompressionEncoding::Gzip);
            }

            let server = tonic::transport::Server::builder()
                .add_service(svc)
                .serve_with_incoming_shutdown(incoming, async move {
                    let _ = shutdown_rx.await;
                });

            let _ = server.await;
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn target(&self) -> String {
        format!("{}:{}", self.addr.ip(), self.addr.port())
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for GrpcTestServer {
    fn drop(&mut self) {
        if self.shutdown_tx.is_some()
            && let Some(task) = self.task.take()
        {
            task.abort();
        }
    }
}
