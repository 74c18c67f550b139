use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec, DeploymentStrategy, RollingUpdateDeployment};
use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::constants::*;
use super::network::validate_outbound_ip_ranges;
use super::resources::{make_annotations, make_labels, make_selector};
use super::{Error, NetworkConfig, Revision};

/// Create the deployment wrapping a revision's pods
///
/// The pod template only carries metadata; the caller embeds the spec from
/// `make_pod_spec`.
///
/// The configured outbound ip ranges are injected into the pod template
/// annotations when all of the following hold:
/// - the revision does not set the annotation itself
/// - the configured value is non-empty
/// - the configured value validates
///
/// A value that does not validate is logged and returned alongside the
/// deployment, which is created without the annotation.
pub fn make_deployment(rev: &Revision, namespace: &str, net: &NetworkConfig) -> (Deployment, Option<Error>) {
    let mut diagnostic = None;

    let mut pod_annotations = make_annotations(rev);
    pod_annotations.insert(SIDECAR_ISTIO_INJECT_ANNOTATION.into(), "true".into());

    let ranges = &net.istioOutboundIPRanges;
    if !pod_annotations.contains_key(ISTIO_OUTBOUND_IP_RANGE_ANNOTATION) && !ranges.is_empty() {
        match validate_outbound_ip_ranges(ranges) {
            Ok(()) => {
                pod_annotations.insert(ISTIO_OUTBOUND_IP_RANGE_ANNOTATION.into(), ranges.clone());
            }
            Err(e) => {
                error!("Failed to parse IP ranges {}. Not setting the annotation. Error: {}", ranges, e);
                diagnostic = Some(e);
            }
        }
    }

    let deployment = Deployment {
        metadata: Some(ObjectMeta {
            name: Some(rev.deployment_name()),
            namespace: Some(namespace.to_string()),
            labels: Some(make_labels(rev)),
            annotations: Some(make_annotations(rev)),
            ..Default::default()
        }),
        spec: Some(DeploymentSpec {
            replicas: Some(POD_REPLICA_COUNT),
            selector: make_selector(rev),
            strategy: Some(DeploymentStrategy {
                type_: Some("RollingUpdate".into()),
                rolling_update: Some(RollingUpdateDeployment {
                    max_unavailable: Some(IntOrString::Int(POD_MAX_UNAVAILABLE)),
                    max_surge: Some(IntOrString::Int(POD_MAX_SURGE)),
                }),
            }),
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(make_labels(rev)),
                    annotations: Some(pod_annotations),
                    ..Default::default()
                }),
                spec: None,
            },
            ..Default::default()
        }),
        ..Default::default()
    };
    (deployment, diagnostic)
}
