// Container names. The user container name must not collide with a sidecar.
pub const USER_CONTAINER_NAME: &str = "user-container";
pub const QUEUE_CONTAINER_NAME: &str = "queue-proxy";
pub const FLUENTD_CONTAINER_NAME: &str = "fluentd-proxy";

/// The single port the user container is exposed on
pub const USER_PORT_NAME: &str = "user-port";
pub const USER_PORT: i32 = 8080;

/// Port the queue proxy accepts requests (and readiness probes) on
pub const REQUEST_QUEUE_PORT_NAME: &str = "queue-port";
pub const REQUEST_QUEUE_PORT: i32 = 8012;

/// Port for queue proxy health checks and lifecycle hooks
pub const REQUEST_QUEUE_ADMIN_PORT_NAME: &str = "queueadm-port";
pub const REQUEST_QUEUE_ADMIN_PORT: i32 = 8022;

/// Makes the queue proxy fail readiness and drain before shutdown
pub const REQUEST_QUEUE_QUIT_PATH: &str = "/quitquitquit";
pub const REQUEST_QUEUE_HEALTH_PATH: &str = "/health";

// CPU requests per container role. Each pod gets roughly one cpu.
pub const USER_CONTAINER_CPU: &str = "400m";
pub const QUEUE_CONTAINER_CPU: &str = "25m";
pub const FLUENTD_CONTAINER_CPU: &str = "75m";

// Volumes
pub const VAR_LOG_VOLUME_NAME: &str = "varlog";
pub const VAR_LOG_MOUNT_PATH: &str = "/var/log";
pub const FLUENTD_VAR_LOG_MOUNT_PATH: &str = "/var/log/revisions";
pub const FLUENTD_CONFIG_MAP_VOLUME_NAME: &str = "configmap";
pub const FLUENTD_CONFIG_MAP_NAME: &str = "fluentd-varlog-config";
pub const FLUENTD_CONFIG_MOUNT_PATH: &str = "/etc/fluent/config.d";

/// Autoscaler the queue proxy reports to
pub const AUTOSCALER_ADDRESS: &str = "autoscaler";
pub const AUTOSCALER_PORT: i32 = 8080;

// Deployment shape
pub const POD_REPLICA_COUNT: i32 = 1;
pub const POD_MAX_UNAVAILABLE: i32 = 1;
pub const POD_MAX_SURGE: i32 = 1;

// Labels and annotations
pub const REVISION_LABEL_KEY: &str = "serving.knative.dev/revision";
pub const REVISION_UID_LABEL_KEY: &str = "serving.knative.dev/revisionUID";
pub const APP_LABEL_KEY: &str = "app";
pub const SIDECAR_ISTIO_INJECT_ANNOTATION: &str = "sidecar.istio.io/inject";
pub const ISTIO_OUTBOUND_IP_RANGE_ANNOTATION: &str = "traffic.sidecar.istio.io/includeOutboundIPRanges";

/// Kind of the owner reference that marks the owning configuration
pub const CONFIGURATION_KIND: &str = "Configuration";
