#![allow(non_snake_case)]

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use serde_yaml;

use super::{ErrorKind, Result};

/// Settings for the sidecars injected next to every user container
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Image of the request queue sidecar
    pub queueSidecarImage: String,

    /// Attach a fluentd sidecar collecting everything under /var/log
    #[serde(default)]
    pub enableVarLogCollection: bool,

    /// Image of the fluentd sidecar
    ///
    /// Only required when `enableVarLogCollection` is set.
    #[serde(default)]
    pub fluentdSidecarImage: String,

    /// Time quantum the queue proxy uses to measure concurrency
    #[serde(default = "concurrency_quantum_default")]
    pub autoscaleConcurrencyQuantumOfTime: String,

    /// Logging config handed to the queue proxy verbatim
    #[serde(default)]
    pub queueProxyLoggingConfig: String,

    /// Log level of the queue proxy
    #[serde(default = "queue_proxy_logging_level_default")]
    pub queueProxyLoggingLevel: String,
}

fn concurrency_quantum_default() -> String {
    "100ms".into()
}
fn queue_proxy_logging_level_default() -> String {
    "info".into()
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            queueSidecarImage: "".into(),
            enableVarLogCollection: false,
            fluentdSidecarImage: "".into(),
            autoscaleConcurrencyQuantumOfTime: concurrency_quantum_default(),
            queueProxyLoggingConfig: "".into(),
            queueProxyLoggingLevel: queue_proxy_logging_level_default(),
        }
    }
}

impl ControllerConfig {
    pub fn verify(&self) -> Result<()> {
        if self.queueSidecarImage == "" {
            bail!(ErrorKind::InvalidConfig("queueSidecarImage must be set".into()));
        }
        if self.enableVarLogCollection && self.fluentdSidecarImage == "" {
            bail!(ErrorKind::InvalidConfig(
                "fluentdSidecarImage must be set when enableVarLogCollection is set".into()
            ));
        }
        if self.autoscaleConcurrencyQuantumOfTime == "" {
            bail!(ErrorKind::InvalidConfig("autoscaleConcurrencyQuantumOfTime cannot be empty".into()));
        }
        Ok(())
    }
}

/// Mesh network settings
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Comma separated CIDRs whose outbound traffic goes through the mesh sidecar
    ///
    /// The special value `*` intercepts everything. Empty leaves the mesh default.
    #[serde(default, rename = "istio.sidecar.includeOutboundIPRanges")]
    pub istioOutboundIPRanges: String,
}

/// Platform configuration, serializable from a yaml file
///
/// ```yaml
/// controller:
///   queueSidecarImage: gcr.io/serving/queue:v1
///   enableVarLogCollection: true
///   fluentdSidecarImage: gcr.io/serving/fluentd:v1
/// network:
///   istio.sidecar.includeOutboundIPRanges: "10.0.0.0/8"
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub controller: ControllerConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Check the sidecar settings
    ///
    /// The outbound ip ranges are deliberately not verified here; a bad value
    /// only omits the annotation at deployment synthesis.
    pub fn verify(&self) -> Result<()> {
        self.controller.verify()
    }

    pub fn from_yaml(data: &str) -> Result<Config> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Read a config file from an arbitrary path
    pub fn read(pth: &Path) -> Result<Config> {
        trace!("Using config in {}", pth.display());
        if !pth.exists() {
            bail!("Config file {} does not exist", pth.display())
        }
        let mut f = File::open(pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        Config::from_yaml(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn config_defaults() {
        let conf = Config::from_yaml("controller:\n  queueSidecarImage: queue:v1\n").unwrap();
        assert_eq!(conf.controller.queueSidecarImage, "queue:v1");
        assert!(!conf.controller.enableVarLogCollection);
        assert_eq!(conf.controller.autoscaleConcurrencyQuantumOfTime, "100ms");
        assert_eq!(conf.controller.queueProxyLoggingLevel, "info");
        assert_eq!(conf.network.istioOutboundIPRanges, "");
        assert!(conf.verify().is_ok());
    }

    #[test]
    fn config_network_key() {
        let data = r#"
controller:
  queueSidecarImage: queue:v1
network:
  istio.sidecar.includeOutboundIPRanges: "10.0.0.0/8,192.168.0.0/16"
"#;
        let conf = Config::from_yaml(data).unwrap();
        assert_eq!(conf.network.istioOutboundIPRanges, "10.0.0.0/8,192.168.0.0/16");
    }

    #[test]
    fn config_verify_images() {
        let mut conf = Config::default();
        assert!(conf.verify().is_err()); // no queue image

        conf.controller.queueSidecarImage = "queue:v1".into();
        assert!(conf.verify().is_ok());

        conf.controller.enableVarLogCollection = true;
        assert!(conf.verify().is_err()); // no fluentd image

        conf.controller.fluentdSidecarImage = "fluentd:v1".into();
        assert!(conf.verify().is_ok());
    }

    #[test]
    fn config_rejects_unknown_keys() {
        let res = Config::from_yaml("controller:\n  queueSidecarImage: q\n  queueImage: q\n");
        assert!(res.is_err());
    }
}
