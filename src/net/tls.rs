//! TLS material for the HTTPS listener.

use std::io;
use std::path::PathBuf;

use axum_server::tls_rustls::RustlsConfig;

/// Certificate chain and private key of a TLS listener, as PEM file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsMaterial {
    pub cert_file: PathBuf,
    pub key_file: PathBuf,
}

impl TlsMaterial {
    pub fn new(cert_file: impl Into<PathBuf>, key_file: impl Into<PathBuf>) -> Self {
        Self {
            cert_file: cert_file.into(),
            key_file: key_file.into(),
        }
    }

    /// Read both files into a rustls server configuration.
    pub async fn load(&self) -> io::Result<RustlsConfig> {
        for (what, path) in [("certificate", &self.cert_file), ("private key", &self.key_file)] {
            if !path.is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{what} file not found: {}", path.display()),
                ));
            }
        }
        RustlsConfig::from_pem_file(&self.cert_file, &self.key_file).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_certificate_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let material = TlsMaterial::new(dir.path().join("cert.pem"), dir.path().join("key.pem"));
        let err = material.load().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("certificate"));
    }

    #[tokio::test]
    async fn garbage_pem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let material = TlsMaterial::new(dir.path().join("cert.pem"), dir.path().join("key.pem"));
        std::fs::write(&material.cert_file, "not a certificate").unwrap();
        std::fs::write(&material.key_file, "not a key").unwrap();

        assert!(material.load().await.is_err());
    }
}
