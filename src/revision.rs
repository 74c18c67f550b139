use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use k8s_openapi::api::core::v1::Container;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use super::constants::CONFIGURATION_KIND;
use super::Result;

/// How many requests a single user container may handle at once
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConcurrencyModel {
    /// Any number of concurrent requests
    Multi,
    /// One request at a time
    Single,
}

impl Default for ConcurrencyModel {
    fn default() -> Self {
        ConcurrencyModel::Multi
    }
}

impl fmt::Display for ConcurrencyModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConcurrencyModel::Multi => write!(f, "Multi"),
            ConcurrencyModel::Single => write!(f, "Single"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    /// The user's container
    ///
    /// Assumed validated upstream. Synthesis clones it and never writes to it.
    pub container: Container,

    /// Service account the pod runs as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,

    #[serde(default)]
    pub concurrency_model: ConcurrencyModel,
}

/// An immutable snapshot of a deployable revision
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Revision {
    pub metadata: ObjectMeta,
    pub spec: RevisionSpec,
}

impl Revision {
    pub fn name(&self) -> &str {
        self.metadata.name.as_ref().map(String::as_str).unwrap_or("")
    }

    pub fn namespace(&self) -> &str {
        self.metadata.namespace.as_ref().map(String::as_str).unwrap_or("")
    }

    pub fn uid(&self) -> &str {
        self.metadata.uid.as_ref().map(String::as_str).unwrap_or("")
    }

    /// Name of the configuration that owns this revision
    ///
    /// Empty when no owner reference is of the configuration kind.
    pub fn owning_configuration_name(&self) -> &str {
        self.metadata
            .owner_references
            .iter()
            .flatten()
            .find(|o| o.kind == CONFIGURATION_KIND)
            .map(|o| o.name.as_str())
            .unwrap_or("")
    }

    /// Name of the deployment backing this revision
    pub fn deployment_name(&self) -> String {
        format!("{}-deployment", self.name())
    }

    pub fn from_yaml(data: &str) -> Result<Revision> {
        Ok(serde_yaml::from_str(data)?)
    }

    /// Read a revision from a yaml file
    pub fn read(pth: &Path) -> Result<Revision> {
        trace!("Using revision in {}", pth.display());
        if !pth.exists() {
            bail!("Revision file {} does not exist", pth.display())
        }
        let mut f = File::open(pth)?;
        let mut data = String::new();
        f.read_to_string(&mut data)?;
        Revision::from_yaml(&data)
    }
}
