use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, Container, ContainerPort, EmptyDirVolumeSource, EnvVar, EnvVarSource,
    HTTPGetAction, Handler, Lifecycle, ObjectFieldSelector, PodSpec, Probe, ResourceRequirements,
    Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::constants::*;
use super::queue::make_queue_container;
use super::{ControllerConfig, Revision};

pub(crate) fn cpu_request(cpu: &str) -> ResourceRequirements {
    ResourceRequirements {
        requests: Some(btreemap! {
            "cpu".to_string() => Quantity(cpu.to_string()),
        }),
        ..Default::default()
    }
}

/// preStop hook asking the queue proxy to start draining
pub(crate) fn quit_lifecycle() -> Lifecycle {
    Lifecycle {
        pre_stop: Some(Handler {
            http_get: Some(HTTPGetAction {
                port: IntOrString::Int(REQUEST_QUEUE_ADMIN_PORT),
                path: Some(REQUEST_QUEUE_QUIT_PATH.into()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub(crate) fn env_var(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.into(),
        value: Some(value.into()),
        ..Default::default()
    }
}

/// Env var resolved to the pod's own name by the kubelet
pub(crate) fn pod_name_env_var(name: &str) -> EnvVar {
    EnvVar {
        name: name.into(),
        value_from: Some(EnvVarSource {
            field_ref: Some(ObjectFieldSelector {
                field_path: "metadata.name".into(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn has_http_path(probe: &Option<Probe>) -> bool {
    probe
        .as_ref()
        .and_then(|p| p.http_get.as_ref())
        .and_then(|get| get.path.as_ref())
        .map(|path| !path.is_empty())
        .unwrap_or(false)
}

/// The user's container with the platform overrides applied
///
/// Overrides, in order:
/// - name and ports are replaced outright
/// - the cpu request is pinned; memory, other requests and limits are kept
/// - the shared /var/log volume is mounted
/// - the preStop hook is replaced by a quit call to the queue proxy
/// - an http readiness probe is pointed at the queue proxy port
///
/// A user declared lifecycle is discarded. This is platform policy; the
/// queue proxy must drain before the user container stops.
pub fn make_user_container(rev: &Revision) -> Container {
    let mut container = rev.spec.container.clone();

    container.name = USER_CONTAINER_NAME.into();
    container
        .resources
        .get_or_insert_with(Default::default)
        .requests
        .get_or_insert_with(BTreeMap::new)
        .insert("cpu".into(), Quantity(USER_CONTAINER_CPU.into()));
    container.ports = Some(vec![ContainerPort {
        name: Some(USER_PORT_NAME.into()),
        container_port: USER_PORT,
        ..Default::default()
    }]);
    container
        .volume_mounts
        .get_or_insert_with(Vec::new)
        .push(VolumeMount {
            name: VAR_LOG_VOLUME_NAME.into(),
            mount_path: VAR_LOG_MOUNT_PATH.into(),
            ..Default::default()
        });

    if container.lifecycle.is_some() {
        warn!("Overriding lifecycle hooks of revision {}/{}", rev.namespace(), rev.name());
    }
    container.lifecycle = Some(quit_lifecycle());

    if has_http_path(&container.readiness_probe) {
        if let Some(get) = container.readiness_probe.as_mut().and_then(|p| p.http_get.as_mut()) {
            debug!("Routing readiness probe of {} through port {}", rev.name(), REQUEST_QUEUE_PORT);
            get.port = IntOrString::Int(REQUEST_QUEUE_PORT);
        }
    }
    container
}

fn make_var_log_volume() -> Volume {
    Volume {
        name: VAR_LOG_VOLUME_NAME.into(),
        empty_dir: Some(EmptyDirVolumeSource::default()),
        ..Default::default()
    }
}

/// The fluentd sidecar shipping the user container's /var/log
pub fn make_fluentd_container(rev: &Revision, cfg: &ControllerConfig) -> Container {
    Container {
        name: FLUENTD_CONTAINER_NAME.into(),
        image: Some(cfg.fluentdSidecarImage.clone()),
        resources: Some(cpu_request(FLUENTD_CONTAINER_CPU)),
        env: Some(vec![
            env_var("FLUENTD_ARGS", "--no-supervisor -q"),
            env_var("ELA_CONTAINER_NAME", USER_CONTAINER_NAME),
            env_var("ELA_CONFIGURATION", rev.owning_configuration_name()),
            env_var("ELA_REVISION", rev.name()),
            env_var("ELA_NAMESPACE", rev.namespace()),
            pod_name_env_var("ELA_POD_NAME"),
        ]),
        volume_mounts: Some(vec![
            VolumeMount {
                name: VAR_LOG_VOLUME_NAME.into(),
                mount_path: FLUENTD_VAR_LOG_MOUNT_PATH.into(),
                ..Default::default()
            },
            VolumeMount {
                name: FLUENTD_CONFIG_MAP_VOLUME_NAME.into(),
                mount_path: FLUENTD_CONFIG_MOUNT_PATH.into(),
                ..Default::default()
            },
        ]),
        ..Default::default()
    }
}

fn make_fluentd_config_volume() -> Volume {
    Volume {
        name: FLUENTD_CONFIG_MAP_VOLUME_NAME.into(),
        config_map: Some(ConfigMapVolumeSource {
            name: Some(FLUENTD_CONFIG_MAP_NAME.into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create the pod spec for a revision
///
/// Containers are always `[user-container, queue-proxy]`, followed by
/// `fluentd-proxy` when var log collection is enabled. The revision is only
/// read; its container is cloned before any override.
pub fn make_pod_spec(rev: &Revision, cfg: &ControllerConfig) -> PodSpec {
    let mut spec = PodSpec {
        containers: vec![make_user_container(rev), make_queue_container(rev, cfg)],
        volumes: Some(vec![make_var_log_volume()]),
        service_account_name: rev.spec.service_account_name.clone(),
        ..Default::default()
    };

    if cfg.enableVarLogCollection {
        debug!("Adding fluentd sidecar to revision {}", rev.name());
        spec.containers.push(make_fluentd_container(rev, cfg));
        spec.volumes
            .get_or_insert_with(Vec::new)
            .push(make_fluentd_config_volume());
    }
    spec
}
