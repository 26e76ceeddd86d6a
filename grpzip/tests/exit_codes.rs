use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;
use grpzip_testserver::GrpcTestServer;

fn hello_proto() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../grpzip-testserver/proto/hello.proto")
}

fn status_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

#[test]
fn invalid_flags_exit_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_grpzip");

    let out = Command::new(exe)
        .arg("run")
        .arg("localhost:8080")
        .arg("--proto")
        .arg("./does-not-matter.proto")
        .arg("--timeout")
        .arg("10x")
        .output()
        .context("run grpzip binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[test]
fn missing_proto_exit_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_grpzip");

    let out = Command::new(exe)
        .arg("run")
        .arg("localhost:8080")
        .arg("--proto")
        .arg("./no-such-file.proto")
        .output()
        .context("run grpzip binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[tokio::test]
async fn unknown_method_exit_30() -> anyhow::Result<()> {
    let exe = env!("CARGO_BIN_EXE_grpzip");
    let proto = hello_proto();

    let out = tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .arg("run")
            .arg("localhost:8080")
            .arg("--proto")
            .arg(&proto)
            .arg("--method")
            .arg("hello.HelloGrpc/Nope")
            .output()
    })
    .await
    .context("spawn_blocking join")?
    .context("run grpzip binary")?;

    anyhow::ensure!(
        status_code(out.status) == 30,
        "expected exit code 30, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[tokio::test]
async fn checks_failed_exit_10() -> anyhow::Result<()> {
    let server = GrpcTestServer::start_identity_only()
        .await
        .context("start test server")?;
    let target = server.target();

    let exe = env!("CARGO_BIN_EXE_grpzip");
    let proto = hello_proto();

    let out = tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .arg("run")
            .arg(&target)
            .arg("--proto")
            .arg(&proto)
            .arg("--output")
            .arg("json")
            .output()
    })
    .await
    .context("spawn_blocking join")?
    .context("run grpzip binary")?;

    server.shutdown().await;

    anyhow::ensure!(
        status_code(out.status) == 10,
        "expected exit code 10, got {}\nstdout:\n{}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}

#[tokio::test]
async fn connect_failure_exit_40() -> anyhow::Result<()> {
    // Bind an ephemeral port, then release it so the connect is refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind probe listener")?;
    let target = listener.local_addr().context("local addr")?.to_string();
    drop(listener);

    let exe = env!("CARGO_BIN_EXE_grpzip");
    let proto = hello_proto();

    let out = tokio::task::spawn_blocking(move || {
        Command::new(exe)
            .arg("run")
            .arg(&target)
            .arg("--proto")
            .arg(&proto)
            .arg("--connect-timeout")
            .arg("2s")
            .output()
    })
    .await
    .context("spawn_blocking join")?
    .context("run grpzip binary")?;

    anyhow::ensure!(
        status_code(out.status) == 40,
        "expected exit code 40, got {}\nstderr:\n{}",
        status_code(out.status),
        String::from_utf8_lossy(&out.stderr)
    );

    Ok(())
}
