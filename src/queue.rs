use k8s_openapi::api::core::v1::{Container, ContainerPort, HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::constants::*;
use super::pod::{cpu_request, env_var, pod_name_env_var, quit_lifecycle};
use super::{ControllerConfig, Revision};

/// The request queue sidecar that fronts the user container
///
/// All traffic and readiness probes reach the user container through it.
pub fn make_queue_container(rev: &Revision, cfg: &ControllerConfig) -> Container {
    Container {
        name: QUEUE_CONTAINER_NAME.into(),
        image: Some(cfg.queueSidecarImage.clone()),
        resources: Some(cpu_request(QUEUE_CONTAINER_CPU)),
        ports: Some(vec![
            ContainerPort {
                name: Some(REQUEST_QUEUE_PORT_NAME.into()),
                container_port: REQUEST_QUEUE_PORT,
                ..Default::default()
            },
            ContainerPort {
                name: Some(REQUEST_QUEUE_ADMIN_PORT_NAME.into()),
                container_port: REQUEST_QUEUE_ADMIN_PORT,
                ..Default::default()
            },
        ]),
        // marks the queue not ready, then delays shutdown a little
        lifecycle: Some(quit_lifecycle()),
        readiness_probe: Some(Probe {
            http_get: Some(HTTPGetAction {
                port: IntOrString::Int(REQUEST_QUEUE_ADMIN_PORT),
                path: Some(REQUEST_QUEUE_HEALTH_PATH.into()),
                ..Default::default()
            }),
            // probe often so that a preStop quit is noticed quickly
            period_seconds: Some(1),
            ..Default::default()
        }),
        args: Some(vec![
            format!("-concurrencyQuantumOfTime={}", cfg.autoscaleConcurrencyQuantumOfTime),
            format!("-concurrencyModel={}", rev.spec.concurrency_model),
        ]),
        env: Some(vec![
            env_var("ELA_NAMESPACE", rev.namespace()),
            env_var("ELA_CONFIGURATION", rev.owning_configuration_name()),
            env_var("ELA_REVISION", rev.name()),
            env_var("ELA_AUTOSCALER", AUTOSCALER_ADDRESS),
            env_var("ELA_AUTOSCALER_PORT", &AUTOSCALER_PORT.to_string()),
            pod_name_env_var("ELA_POD"),
            env_var("ELA_LOGGING_CONFIG", &cfg.queueProxyLoggingConfig),
            env_var("ELA_LOGGING_LEVEL", &cfg.queueProxyLoggingLevel),
        ]),
        ..Default::default()
    }
}
