use std::path::PathBuf;

fn main() {
    let proto = PathBuf::from("proto/hello.proto");
    println!("cargo:rerun-if-changed={}", proto.display());
    println!("cargo:rerun-if-env-changed=PROTOC");

    // External protoc only. Either set `PROTOC=/path/to/protoc` or ensure `protoc` is on PATH.
    let protoc = std::env::var_os("PROTOC").filter(|v| !v.is_empty());
    if protoc.is_none() {
        match std::process::Command::new("protoc")
            .arg("--version")
            .output()
        {
            Ok(out) if out.status.success() => {}
            Ok(out) => {
                let exit = out.status.code().unwrap_or(-1);
                let stderr = String::from_utf8_lossy(&out.stderr);
                panic!(
                    "protoc is required to build grpzip-testserver but PATH 'protoc' failed (exit={exit}): {stderr}\n\
                     Install protoc (protobuf compiler) or set PROTOC=/path/to/protoc"
                );
            }
            Err(e) => {
                panic!(
                    "protoc is required to build grpzip-testserver but was not found on PATH: {e}\n\
                     Install protoc (protobuf compiler) or set PROTOC=/path/to/protoc"
                );
            }
        }
    }

    let Some(out_dir) = std::env::var_os("OUT_DIR").map(PathBuf::from) else {
        panic!("OUT_DIR is not set");
    };

    if let Err(e) = tonic_prost_build::configure()
        .build_client(false)
        .file_descriptor_set_path(out_dir.join("hello_descriptor.bin"))
        .compile_protos(
            std::slice::from_ref(&proto),
            std::slice::from_ref(&PathBuf::from("proto")),
        )
    {
        panic!("failed to compile hello.proto: {e}");
    }
}
