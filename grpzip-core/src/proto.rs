use std::path::{Path, PathBuf};

use prost_reflect::DescriptorPool;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to locate protoc binary: {0}")]
    ProtocBin(String),

    #[error("failed to run protoc: {0}")]
    ProtocIo(#[from] std::io::Error),

    #[error("protoc failed (exit={exit}): {stderr}")]
    ProtocFailed { exit: i32, stderr: String },

    #[error("failed to build descriptor pool: {0}")]
    DescriptorPool(#[from] prost_reflect::DescriptorError),

    #[error("invalid full method name (expected 'pkg.Service/Method'): {0}")]
    InvalidFullMethod(String),

    #[error("service not found in descriptors: {0}")]
    ServiceNotFound(String),

    #[error("method not found in service '{service}': {method}")]
    MethodNotFound { service: String, method: String },

    #[error("method '{0}' is not unary (streaming is not supported)")]
    NotUnary(String),
}

/// Protobuf descriptors loaded at runtime, either by shelling out to
/// `protoc` for a `.proto` file or from a pre-compiled descriptor set.
#[derive(Debug, Clone)]
pub struct ProtoSchema {
    pool: DescriptorPool,
}

/// A resolved unary method: descriptor plus the HTTP/2 request path.
#[derive(Debug, Clone)]
pub struct GrpcMethod {
    method: prost_reflect::MethodDescriptor,
    path: http::uri::PathAndQuery,
}

impl GrpcMethod {
    pub(crate) fn path(&self) -> &http::uri::PathAndQuery {
        &self.path
    }

    #[must_use]
    pub fn input(&self) -> prost_reflect::MessageDescriptor {
        self.method.input()
    }

    #[must_use]
    pub fn output(&self) -> prost_reflect::MessageDescriptor {
        self.method.output()
    }

    /// `pkg.Service/Method` form, as accepted by [`ProtoSchema::method`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{}/{}",
            self.method.parent_service().full_name(),
            self.method.name()
        )
    }
}

impl ProtoSchema {
    /// Load a compiled `FileDescriptorSet` (e.g. one emitted by a build
    /// script via `file_descriptor_set_path`).
    pub fn from_descriptor_bytes(bytes: &[u8]) -> Result<Self> {
        let pool = DescriptorPool::decode(bytes)?;
        Ok(Self { pool })
    }

    /// Compile a `.proto` file with an external `protoc`, for loading
    /// schemas at run time. Either set `PROTOC=/path/to/protoc` or ensure
    /// `protoc` is on `PATH`.
    pub fn compile_from_proto(proto_file: &Path, include_paths: &[PathBuf]) -> Result<Self> {
        let mut include_paths: Vec<PathBuf> = include_paths.to_vec();

        if let Some(dir) = proto_file.parent() {
            include_paths.push(dir.to_path_buf());
        }

        // Deduplicate while preserving order (tiny input sizes).
        let mut seen: std::collections::HashSet<PathBuf> = std::collections::HashSet::new();
        include_paths.retain(|p| seen.insert(p.clone()));

        let protoc = Self::resolve_protoc()?;

        let out = tempfile::NamedTempFile::new()?;
        let out_path = out.path().to_path_buf();

        let mut cmd = std::process::Command::new(protoc);
        cmd.arg("--include_imports")
            .arg(format!("--descriptor_set_out={}", out_path.display()));

        for p in &include_paths {
            cmd.arg("-I").arg(p);
        }

        cmd.arg(proto_file);

        let output = cmd.output()?;
        if !output.status.success() {
            let exit = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(Error::ProtocFailed { exit, stderr });
        }

        let bytes = std::fs::read(out_path)?;
        Self::from_descriptor_bytes(&bytes)
    }

    fn resolve_protoc() -> Result<std::ffi::OsString> {
        if let Some(p) = std::env::var_os("PROTOC").filter(|v| !v.is_empty()) {
            return Ok(p);
        }

        let runnable = match std::process::Command::new("protoc")
            .arg("--version")
            .output()
        {
            Ok(out) => out.status.success(),
            Err(_) => false,
        };

        if runnable {
            return Ok(std::ffi::OsString::from("protoc"));
        }

        Err(Error::ProtocBin(
            "no runnable protoc found; install protoc and ensure it's on PATH, or set PROTOC=/path/to/protoc"
                .to_string(),
        ))
    }

    /// Resolve a unary method by its `pkg.Service/Method` name.
    pub fn method(&self, full_method: &str) -> Result<GrpcMethod> {
        let (service_name, method_name) = full_method
            .split_once('/')
            .ok_or_else(|| Error::InvalidFullMethod(full_method.to_string()))?;

        let service = self
            .pool
            .get_service_by_name(service_name)
            .ok_or_else(|| Error::ServiceNotFound(service_name.to_string()))?;

        let method = service
            .methods()
            .find(|m| m.name() == method_name)
            .ok_or_else(|| Error::MethodNotFound {
                service: service_name.to_string(),
                method: method_name.to_string(),
            })?;

        if method.is_client_streaming() || method.is_server_streaming() {
            return Err(Error::NotUnary(full_method.to_string()));
        }

        let path: http::uri::PathAndQuery = format!("/{service_name}/{method_name}")
            .parse()
            .map_err(|_| Error::InvalidFullMethod(full_method.to_string()))?;

        Ok(GrpcMethod { method, path })
    }
}
