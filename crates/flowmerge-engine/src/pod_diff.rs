//! Summaries of how two pod specs differ, for logging drift before a write.

use flowmerge_model::{Container, PodSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSpecDiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerChange {
    Image,
    PullPolicy,
    Command,
    Ports,
    Env,
    VolumeMounts,
    Probes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerChanged {
    pub name: String,
    pub changes: Vec<ContainerChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodSpecDiff {
    pub summary: PodSpecDiffSummary,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<ContainerChanged>,
    pub service_account_changed: bool,
    pub volumes_changed: bool,
}

impl PodSpecDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.changed.is_empty()
            && !self.service_account_changed
            && !self.volumes_changed
    }
}

/// Container-level changes between `before` and `after`, keyed by container name.
/// Env values are compared but never reported.
pub fn diff_pod_specs(before: &PodSpec, after: &PodSpec) -> PodSpecDiff {
    let before_containers = index_containers(before);
    let after_containers = index_containers(after);

    let before_names = before_containers.keys().copied().collect::<BTreeSet<_>>();
    let after_names = after_containers.keys().copied().collect::<BTreeSet<_>>();

    let added = after_names
        .difference(&before_names)
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    let removed = before_names
        .difference(&after_names)
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    let mut changed = Vec::<ContainerChanged>::new();
    for name in before_names.intersection(&after_names) {
        let Some(left) = before_containers.get(name) else { continue };
        let Some(right) = after_containers.get(name) else { continue };
        let changes = detect_changes(left, right);
        if !changes.is_empty() {
            changed.push(ContainerChanged {
                name: name.to_string(),
                changes,
            });
        }
    }

    PodSpecDiff {
        summary: PodSpecDiffSummary {
            added: added.len(),
            removed: removed.len(),
            changed: changed.len(),
        },
        added,
        removed,
        changed,
        service_account_changed: before.service_account_name != after.service_account_name,
        volumes_changed: before.volumes != after.volumes,
    }
}

pub fn diff_pod_specs_text(before: &PodSpec, after: &PodSpec) -> String {
    let diff = diff_pod_specs(before, after);
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "pod spec diff: added={} removed={} changed={}",
        diff.summary.added, diff.summary.removed, diff.summary.changed
    ));
    for name in &diff.added {
        lines.push(format!("+ container={name}"));
    }
    for name in &diff.removed {
        lines.push(format!("- container={name}"));
    }
    for container in &diff.changed {
        lines.push(format!(
            "~ container={} changes={}",
            container.name,
            container
                .changes
                .iter()
                .map(change_label)
                .collect::<Vec<_>>()
                .join(",")
        ));
    }
    if diff.service_account_changed {
        lines.push("~ serviceAccountName".to_string());
    }
    if diff.volumes_changed {
        lines.push("~ volumes".to_string());
    }
    lines.join("\n")
}

fn change_label(change: &ContainerChange) -> &'static str {
    match change {
        ContainerChange::Image => "image",
        ContainerChange::PullPolicy => "pull_policy",
        ContainerChange::Command => "command",
        ContainerChange::Ports => "ports",
        ContainerChange::Env => "env",
        ContainerChange::VolumeMounts => "volume_mounts",
        ContainerChange::Probes => "probes",
    }
}

fn index_containers(pod_spec: &PodSpec) -> BTreeMap<&str, &Container> {
    pod_spec
        .containers
        .iter()
        .map(|container| (container.name.as_str(), container))
        .collect()
}

fn detect_changes(left: &Container, right: &Container) -> Vec<ContainerChange> {
    let mut changes = Vec::<ContainerChange>::new();

    if left.image != right.image {
        changes.push(ContainerChange::Image);
    }
    if left.image_pull_policy != right.image_pull_policy {
        changes.push(ContainerChange::PullPolicy);
    }
    if left.command != right.command || left.args != right.args {
        changes.push(ContainerChange::Command);
    }
    if left.ports != right.ports {
        changes.push(ContainerChange::Ports);
    }
    if left.env != right.env {
        changes.push(ContainerChange::Env);
    }
    if left.volume_mounts != right.volume_mounts {
        changes.push(ContainerChange::VolumeMounts);
    }
    if left.liveness_probe != right.liveness_probe
        || left.readiness_probe != right.readiness_probe
        || left.startup_probe != right.startup_probe
    {
        changes.push(ContainerChange::Probes);
    }

    changes
}

#[cfg(test)]
#[path = "pod_diff_test.rs"]
mod tests;
