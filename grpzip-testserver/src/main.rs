#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut identity_only = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--identity-only" => identity_only = true,
            "-h" | "--help" => {
                eprintln!(
                    "grpzip-testserver\n\nUSAGE:\n  grpzip-testserver [--identity-only]\n\nOUTPUT:\n  Prints GRPC_URL=<host:port> to stdout once ready."
                );
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown argument: {other}"));
            }
        }
    }

    let server = if identity_only {
        grpzip_testserver::GrpcTestServer::start_identity_only().await?
    } else {
        grpzip_testserver::GrpcTestServer::start().await?
    };

    println!("GRPC_URL={}", server.target());

    let _ = tokio::signal::ctrl_c().await;
    server.shutdown().await;
    Ok(())
}
