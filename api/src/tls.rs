//! TLS termination for the API server
//!
//! Certificates and keys are read from PEM files. Only TLS 1.3 is offered and ALPN
//! advertises HTTP/2 before HTTP/1.1.

use std::{fs::File, io::BufReader, path::Path, sync::Arc, time::Duration};

use rustls::{
    ServerConfig,
    pki_types::{CertificateDer, PrivateKeyDer},
};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::{TlsAcceptor, server::TlsStream};

use crate::{
    config::TlsConfig,
    errors::{ApiError, ApiResult},
};

fn open_pem(path: &Path, what: &str) -> ApiResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ApiError::ConfigError(format!("failed to open {what} file {}: {e}", path.display())))
}

fn load_certs(path: &Path) -> ApiResult<Vec<CertificateDer<'static>>> {
    let certs = rustls_pemfile::certs(&mut open_pem(path, "certificate")?)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::ConfigError(format!("failed to parse certificates: {e}")))?;

    if certs.is_empty() {
        return Err(ApiError::ConfigError(format!(
            "no certificates found in {}",
            path.display()
        )));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> ApiResult<PrivateKeyDer<'static>> {
    rustls_pemfile::private_key(&mut open_pem(path, "private key")?)
        .map_err(|e| ApiError::ConfigError(format!("failed to parse private key: {e}")))?
        .ok_or_else(|| ApiError::ConfigError(format!("no private key found in {}", path.display())))
}

/// Create a TLS 1.3 acceptor from the configured certificate chain and key
pub fn create_tls_acceptor(config: &TlsConfig) -> ApiResult<TlsAcceptor> {
    let certs = load_certs(&config.cert_path)?;
    let key = load_key(&config.key_path)?;

    let mut server_config = ServerConfig::builder_with_protocol_versions(&[&rustls::version::TLS13])
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| ApiError::ConfigError(format!("invalid TLS configuration: {e}")))?;

    server_config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(TlsAcceptor::from(Arc::new(server_config)))
}

/// Listener that completes the TLS handshake before handing connections to axum
pub struct TlsListener {
    acceptor: TlsAcceptor,
    listener: TcpListener,
}

impl TlsListener {
    pub fn new(acceptor: TlsAcceptor, listener: TcpListener) -> Self {
        Self { acceptor, listener }
    }
}

impl axum::serve::Listener for TlsListener {
    type Addr = std::net::SocketAddr;
    type Io = TlsStream<TcpStream>;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        loop {
            let (stream, addr) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::error!(error = %e, "TCP accept failed");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                }
            };

            match self.acceptor.accept(stream).await {
                Ok(tls_stream) => return (tls_stream, addr),
                Err(e) => tracing::warn!(%addr, error = %e, "TLS handshake failed"),
            }
        }
    }

    fn local_addr(&self) -> std::io::Result<Self::Addr> {
        self.listener.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_missing_certificate_is_a_config_error() {
        let config = TlsConfig {
            cert_path: PathBuf::from("/nonexistent/cert.pem"),
            key_path: PathBuf::from("/nonexistent/key.pem"),
        };

        let err = create_tls_acceptor(&config).err().expect("acceptor must not be created");
        assert!(matches!(err, ApiError::ConfigError(msg) if msg.contains("certificate")));
    }
}
