use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;

use super::constants::{APP_LABEL_KEY, REVISION_LABEL_KEY, REVISION_UID_LABEL_KEY};
use super::Revision;

/// Labels for every resource created on behalf of a revision
///
/// User labels win over the revision keys. An `app` label defaults to the
/// revision name for richer tracing.
pub fn make_labels(rev: &Revision) -> BTreeMap<String, String> {
    let mut labels = btreemap! {
        REVISION_LABEL_KEY.to_string() => rev.name().to_string(),
        REVISION_UID_LABEL_KEY.to_string() => rev.uid().to_string(),
    };
    if let Some(user) = &rev.metadata.labels {
        for (k, v) in user {
            labels.insert(k.clone(), v.clone());
        }
    }
    labels
        .entry(APP_LABEL_KEY.to_string())
        .or_insert_with(|| rev.name().to_string());
    labels
}

/// Annotations for resources created on behalf of a revision
///
/// Every call returns a fresh map so callers can extend it independently.
pub fn make_annotations(rev: &Revision) -> BTreeMap<String, String> {
    rev.metadata.annotations.clone().unwrap_or_default()
}

/// Selector matching the pods of a single revision
pub fn make_selector(rev: &Revision) -> LabelSelector {
    LabelSelector {
        match_labels: Some(btreemap! {
            REVISION_LABEL_KEY.to_string() => rev.name().to_string(),
        }),
        ..Default::default()
    }
}
