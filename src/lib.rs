#![recursion_limit = "1024"]
#![allow(renamed_and_removed_lints)]
#![allow(non_snake_case)]

#[macro_use]
extern crate serde_derive;
extern crate serde;
extern crate serde_yaml;

extern crate k8s_openapi;

#[macro_use]
extern crate maplit;

#[macro_use]
extern crate log;

#[macro_use]
extern crate error_chain;
error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    links {}
    foreign_links {
        Io(::std::io::Error);
        SerdeY(serde_yaml::Error);
    }
    errors {
        InvalidCidr(cidr: String) {
            description("invalid CIDR address")
            display("invalid CIDR address: {}", cidr)
        }
        InvalidConfig(reason: String) {
            description("platform config does not validate")
            display("platform config does not validate: {}", reason)
        }
    }
}

/// Fixed names, ports and resource requests of the platform
pub mod constants;

/// Controller and network configuration, serializable from yaml
pub mod config;
pub use config::{Config, ControllerConfig, NetworkConfig};

/// The revision input type
pub mod revision;
pub use revision::{ConcurrencyModel, Revision, RevisionSpec};

/// Labels, annotations and selectors derived from a revision
pub mod resources;

/// Outbound ip range validation for the mesh sidecar
pub mod network;
pub use network::validate_outbound_ip_ranges;

/// The request queue sidecar
pub mod queue;

/// Pod spec synthesis
pub mod pod;
pub use pod::make_pod_spec;

/// Deployment synthesis
pub mod deployment;
pub use deployment::make_deployment;
