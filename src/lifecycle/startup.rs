//! Startup orchestration.
//!
//! # Responsibilities
//! - Build one forwarding client per configured listener section
//! - Build and validate each listener's route table
//! - Assemble the listener manager
//!
//! # Design Decisions
//! - Fail fast: any configuration error aborts before a socket is bound
//! - Sockets are only bound later, by `ListenerManager::start`

use crate::config::{ConfigError, ProxyConfig};
use crate::http::ForwardClient;
use crate::lifecycle::manager::ListenerManager;
use crate::net::{Listener, TlsMaterial};
use crate::routing::RouteTable;

/// Build the listeners described by `config`.
pub fn build_manager(config: &ProxyConfig) -> Result<ListenerManager, ConfigError> {
    let mut listeners = Vec::with_capacity(2);

    if let Some(http) = &config.http {
        let client = ForwardClient::new(&http.connection);
        let routes = RouteTable::build(&http.server.locations, &client)?;
        tracing::info!(port = http.server.port, routes = routes.len(), "HTTP listener configured");
        listeners.push(Listener::plain(&http.server, routes));
    }

    if let Some(https) = &config.https {
        if https.cert_file.as_os_str().is_empty() || https.key_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingTlsMaterial);
        }
        let client = ForwardClient::new(&https.connection);
        let routes = RouteTable::build(&https.server.locations, &client)?;
        let material = TlsMaterial::new(&https.cert_file, &https.key_file);
        tracing::info!(port = https.server.port, routes = routes.len(), "HTTPS listener configured");
        listeners.push(Listener::tls(&https.server, material, routes));
    }

    if listeners.is_empty() {
        tracing::warn!("No listener configured");
    }

    Ok(ListenerManager::new(listeners))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpConfig, HttpsConfig, LocationConfig};
    use crate::net::ListenerKind;

    #[test]
    fn builds_one_listener_per_section() {
        let mut http = HttpConfig::default();
        http.server.locations = vec![LocationConfig::proxy("/", "http://127.0.0.1:9000")];
        let mut https = HttpsConfig {
            cert_file: "cert.pem".into(),
            key_file: "key.pem".into(),
            ..HttpsConfig::default()
        };
        https.server.locations = vec![
            LocationConfig::proxy("/api/", "https://backend"),
            LocationConfig::static_root("/", "/srv/www"),
        ];
        let config = ProxyConfig {
            http: Some(http),
            https: Some(https),
            ..ProxyConfig::default()
        };

        let manager = build_manager(&config).unwrap();
        assert_eq!(manager.listeners().len(), 2);

        let plain = manager.listener("http").unwrap();
        assert!(matches!(plain.kind(), ListenerKind::Plain));
        assert_eq!(plain.addr().port(), 80);
        assert_eq!(plain.routes().len(), 1);

        let tls = manager.listener("https").unwrap();
        assert!(matches!(tls.kind(), ListenerKind::Tls(_)));
        assert_eq!(tls.addr().port(), 443);
        assert_eq!(tls.routes().len(), 2);
    }

    #[test]
    fn invalid_location_aborts_startup() {
        let mut http = HttpConfig::default();
        http.server.locations = vec![LocationConfig::default()];
        let config = ProxyConfig {
            http: Some(http),
            ..ProxyConfig::default()
        };
        assert!(matches!(build_manager(&config), Err(ConfigError::EmptyPath)));
    }

    #[test]
    fn no_sections_means_no_listeners() {
        let manager = build_manager(&ProxyConfig::default()).unwrap();
        assert!(manager.listeners().is_empty());
    }
}
