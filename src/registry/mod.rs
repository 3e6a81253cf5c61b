//! Async HTTP clients for fetching declared licenses from package registries.
//!
//! Lookups are best-effort: every failure is folded into [`Lookup::Missing`]
//! so callers can merge results without error handling.

pub mod npm;
pub mod pypi;

use std::time::Duration;

use anyhow::Result;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::RegistryConfig;

const BATCH_SIZE: usize = 50;

/// Package ecosystems with a registry client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Npm,
    PyPi,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Npm => write!(f, "npm"),
            Ecosystem::PyPi => write!(f, "PyPI"),
        }
    }
}

/// Why a registry lookup produced no license.
#[derive(Debug, Error)]
pub enum LookupMiss {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("registry answered HTTP {0}")]
    Status(StatusCode),

    #[error("response has no license field")]
    NoLicense,
}

/// Result of a single registry lookup.
#[derive(Debug)]
pub enum Lookup {
    Found(String),
    Missing(LookupMiss),
}

impl Lookup {
    pub fn license(self) -> Option<String> {
        match self {
            Lookup::Found(license) => Some(license),
            Lookup::Missing(_) => None,
        }
    }
}

impl From<Result<String, LookupMiss>> for Lookup {
    fn from(result: Result<String, LookupMiss>) -> Self {
        match result {
            Ok(license) => Lookup::Found(license),
            Err(miss) => Lookup::Missing(miss),
        }
    }
}

/// Shared HTTP client and endpoints for npm and PyPI lookups.
pub struct RegistryClient {
    http: Client,
    npm_url: String,
    pypi_url: String,
}

impl RegistryClient {
    pub fn new(config: &RegistryConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("license-attest/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            npm_url: config.npm_url.trim_end_matches('/').to_string(),
            pypi_url: config.pypi_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the declared license of one package.
    pub async fn lookup(&self, ecosystem: Ecosystem, name: &str) -> Lookup {
        let result = match ecosystem {
            Ecosystem::Npm => npm::fetch_license(&self.http, &self.npm_url, name).await,
            Ecosystem::PyPi => pypi::fetch_license(&self.http, &self.pypi_url, name).await,
        };

        if let Err(miss) = &result {
            tracing::debug!("{} lookup for {} skipped: {}", ecosystem, name, miss);
        }

        result.into()
    }

    /// Look up many packages concurrently. Results are returned in input order.
    pub async fn lookup_all(&self, ecosystem: Ecosystem, names: &[String]) -> Vec<Lookup> {
        let mut lookups = Vec::with_capacity(names.len());

        for batch in names.chunks(BATCH_SIZE) {
            let futures: Vec<_> = batch
                .iter()
                .map(|name| self.lookup(ecosystem, name))
                .collect();
            lookups.extend(join_all(futures).await);
        }

        lookups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> RegistryClient {
        RegistryClient::new(&RegistryConfig {
            enabled: true,
            timeout_secs: 3,
            npm_url: server.url(),
            pypi_url: server.url(),
            include_dev_dependencies: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_all_preserves_order_and_isolates_failures() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/left-pad/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"left-pad","license":"WTFPL"}"#)
            .create_async()
            .await;
        let _missing = server
            .mock("GET", "/ghost/latest")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server);
        let names = vec!["ghost".to_string(), "left-pad".to_string()];
        let results = client.lookup_all(Ecosystem::Npm, &names).await;

        assert_eq!(results.len(), 2);
        assert!(matches!(
            &results[0],
            Lookup::Missing(LookupMiss::Status(status)) if *status == StatusCode::NOT_FOUND
        ));
        assert!(matches!(&results[1], Lookup::Found(l) if l == "WTFPL"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_miss() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let lookup = client.lookup(Ecosystem::PyPi, "requests").await;
        assert!(matches!(lookup, Lookup::Missing(LookupMiss::Request(_))));
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_a_miss() {
        let client = RegistryClient::new(&RegistryConfig {
            npm_url: "http://127.0.0.1:1".to_string(),
            ..RegistryConfig::default()
        })
        .unwrap();
        assert!(client.lookup(Ecosystem::Npm, "express").await.license().is_none());
    }

    #[tokio::test]
    async fn test_silent_registry_times_out_per_batch() {
        // Accept connections but never write a response.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _silent = tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let client = RegistryClient::new(&RegistryConfig {
            timeout_secs: 1,
            npm_url: format!("http://{}", addr),
            ..RegistryConfig::default()
        })
        .unwrap();

        let names: Vec<String> = (0..120).map(|i| format!("pkg-{}", i)).collect();
        let started = std::time::Instant::now();
        let results = client.lookup_all(Ecosystem::Npm, &names).await;
        let elapsed = started.elapsed();

        assert_eq!(results.len(), names.len());
        assert!(results
            .iter()
            .all(|r| matches!(r, Lookup::Missing(LookupMiss::Request(_)))));

        let batches = names.len().div_ceil(BATCH_SIZE) as u64;
        let budget = Duration::from_secs(batches) + Duration::from_secs(3);
        assert!(elapsed < budget, "took {:?}, budget {:?}", elapsed, budget);
    }
}
