use crate::generator::fleet::FleetConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use trackcore::OriginLocation;

/// Suvarnabhumi Airport (VTBS).
const DEFAULT_LATITUDE: f64 = 13.7;
const DEFAULT_LONGITUDE: f64 = 100.76;
const DEFAULT_RADIUS_KM: f64 = 75.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub bind: String,
    pub port: u16,
    pub upstream_base: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    pub refresh_interval_ms: u64,
    /// Requests arriving when the snapshot is older than this refresh first.
    pub max_age_ms: u64,
    pub request_timeout_ms: u64,
    /// Serve a synthetic fleet instead of polling upstream.
    pub mock: Option<FleetConfig>,
    pub transcript_path: Option<PathBuf>,
    pub audio_path: Option<PathBuf>,
    pub transcribe_delay_ms: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".into(),
            port: 9000,
            upstream_base: "https://api.adsb.lol/v2".into(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            radius_km: DEFAULT_RADIUS_KM,
            refresh_interval_ms: 1000,
            max_age_ms: 1000,
            request_timeout_ms: 5000,
            mock: None,
            transcript_path: None,
            audio_path: None,
            transcribe_delay_ms: 1500,
        }
    }
}

impl ProxyConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading proxy config {}", path_ref.display()))?;
        let config: ProxyConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing proxy config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn origin(&self) -> OriginLocation {
        OriginLocation::new(self.latitude, self.longitude, self.radius_km)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind, self.port))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn transcribe_delay(&self) -> Duration {
        Duration::from_millis(self.transcribe_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_point_at_vtbs() {
        let cfg = ProxyConfig::default();
        assert_eq!(cfg.origin(), OriginLocation::new(13.7, 100.76, 75.0));
        assert_eq!(cfg.socket_addr().unwrap().port(), 9000);
        assert!(cfg.mock.is_none());
    }

    #[test]
    fn config_load_reads_yaml_with_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"port: 8080\nradius_km: 40\nmock:\n  count: 5\n  seed: 9\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = ProxyConfig::load(&path).unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.radius_km, 40.0);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(1));
        let mock = cfg.mock.unwrap();
        assert_eq!((mock.count, mock.seed, mock.spread_deg), (5, 9, 0.5));
    }

    #[test]
    fn config_load_reports_path_on_error() {
        let err = ProxyConfig::load("/nonexistent/proxy.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/proxy.yaml"));
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let cfg = ProxyConfig {
            bind: "not an address".into(),
            ..Default::default()
        };
        assert!(cfg.socket_addr().is_err());
    }
}
