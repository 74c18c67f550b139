#![allow(dead_code)]

use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, ExecAction, HTTPGetAction, Handler, Lifecycle, Probe,
    ResourceRequirements, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use maplit::btreemap;

use revcat::{Config, ControllerConfig, NetworkConfig, Revision, RevisionSpec};

/// A user container with every field the platform overrides filled in
pub fn user_container() -> Container {
    Container {
        name: "my-app".into(),
        image: Some("gcr.io/example/app:v1".into()),
        command: Some(vec!["/app".into()]),
        env: Some(vec![EnvVar {
            name: "GREETING".into(),
            value: Some("hello".into()),
            ..Default::default()
        }]),
        ports: Some(vec![ContainerPort {
            name: Some("http".into()),
            container_port: 9000,
            ..Default::default()
        }]),
        resources: Some(ResourceRequirements {
            requests: Some(btreemap! {
                "cpu".to_string() => Quantity("2".into()),
                "memory".to_string() => Quantity("512Mi".into()),
            }),
            limits: Some(btreemap! {
                "memory".to_string() => Quantity("1Gi".into()),
            }),
            ..Default::default()
        }),
        volume_mounts: Some(vec![VolumeMount {
            name: "data".into(),
            mount_path: "/data".into(),
            ..Default::default()
        }]),
        readiness_probe: Some(http_probe("/healthz", 9000)),
        ..Default::default()
    }
}

pub fn http_probe(path: &str, port: i32) -> Probe {
    Probe {
        http_get: Some(HTTPGetAction {
            path: Some(path.into()),
            port: IntOrString::Int(port),
            ..Default::default()
        }),
        period_seconds: Some(3),
        ..Default::default()
    }
}

pub fn exec_lifecycle() -> Lifecycle {
    Lifecycle {
        pre_stop: Some(Handler {
            exec: Some(ExecAction {
                command: Some(vec!["sleep".into(), "10".into()]),
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn revision() -> Revision {
    Revision {
        metadata: ObjectMeta {
            name: Some("hello-00001".into()),
            namespace: Some("default".into()),
            uid: Some("6f1b3d2a".into()),
            owner_references: Some(vec![OwnerReference {
                api_version: "serving.knative.dev/v1alpha1".into(),
                kind: "Configuration".into(),
                name: "hello".into(),
                uid: "9a8b7c".into(),
                controller: Some(true),
                ..Default::default()
            }]),
            ..Default::default()
        },
        spec: RevisionSpec {
            container: user_container(),
            service_account_name: Some("builder".into()),
            ..Default::default()
        },
    }
}

pub fn controller_config(log_collection: bool) -> ControllerConfig {
    ControllerConfig {
        queueSidecarImage: "gcr.io/serving/queue:v1".into(),
        enableVarLogCollection: log_collection,
        fluentdSidecarImage: "gcr.io/serving/fluentd:v1".into(),
        ..Default::default()
    }
}

pub fn network_config(ranges: &str) -> NetworkConfig {
    NetworkConfig {
        istioOutboundIPRanges: ranges.into(),
    }
}

pub fn config(log_collection: bool, ranges: &str) -> Config {
    Config {
        controller: controller_config(log_collection),
        network: network_config(ranges),
    }
}
