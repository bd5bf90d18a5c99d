use crate::error::EngineError;
use flowmerge_core::FieldPath;
use flowmerge_model::Container;
use std::collections::BTreeSet;
use tracing::debug;

/// Rejects a list that names the same item twice. Items whose key is `None` are not
/// checked.
pub(super) fn ensure_unique<T>(
    items: &[T],
    key: impl Fn(&T) -> Option<&str>,
    list_path: &FieldPath,
    key_field: &str,
    reference: &'static str,
) -> Result<(), EngineError> {
    let mut seen = BTreeSet::new();
    for (index, item) in items.iter().enumerate() {
        let Some(value) = key(item) else { continue };
        if !seen.insert(value) {
            return Err(EngineError::configuration(
                list_path.clone().index(index).key(key_field),
                format!("`{value}` is declared more than once"),
                reference,
            ));
        }
    }
    Ok(())
}

/// How an overlay treats ports and mount paths already present on the container.
#[derive(Debug, Clone, Copy)]
pub(super) enum Precedence<'a> {
    /// Existing values win.
    Existing,
    /// Overlay values win, except ports named in `protected_ports`.
    Overlay { protected_ports: &'a BTreeSet<String> },
}

/// Applies `overlay` onto `base` in place.
pub(super) fn merge_container(
    base: &mut Container,
    overlay: &Container,
    path: &FieldPath,
    precedence: Precedence<'_>,
) -> Result<(), EngineError> {
    ensure_unique(
        &overlay.ports,
        |port| Some(port.name.as_str()).filter(|name| !name.is_empty()),
        &path.clone().key("ports"),
        "name",
        "merge.duplicate_port",
    )?;
    ensure_unique(
        &overlay.env,
        |env| Some(env.name.as_str()),
        &path.clone().key("env"),
        "name",
        "merge.duplicate_env",
    )?;
    ensure_unique(
        &overlay.volume_mounts,
        |mount| Some(mount.mount_path.as_str()),
        &path.clone().key("volumeMounts"),
        "mountPath",
        "merge.duplicate_mount_path",
    )?;

    if !overlay.image.is_empty() {
        base.image = overlay.image.clone();
    }
    if overlay.image_pull_policy.is_some() {
        base.image_pull_policy = overlay.image_pull_policy.clone();
    }
    if !overlay.command.is_empty() {
        base.command = overlay.command.clone();
    }
    if !overlay.args.is_empty() {
        base.args = overlay.args.clone();
    }
    if overlay.liveness_probe.is_some() {
        base.liveness_probe = overlay.liveness_probe.clone();
    }
    if overlay.readiness_probe.is_some() {
        base.readiness_probe = overlay.readiness_probe.clone();
    }
    if overlay.startup_probe.is_some() {
        base.startup_probe = overlay.startup_probe.clone();
    }

    for port in &overlay.ports {
        let existing = base.ports.iter_mut().find(|existing| {
            if port.name.is_empty() {
                existing.name.is_empty() && existing.container_port == port.container_port
            } else {
                existing.name == port.name
            }
        });
        let Some(existing) = existing else {
            base.ports.push(port.clone());
            continue;
        };
        if *existing == *port {
            continue;
        }
        match precedence {
            Precedence::Overlay { protected_ports } if !protected_ports.contains(&port.name) => {
                *existing = port.clone();
            }
            _ => {
                debug!(
                    container = %base.name,
                    port = %port.name,
                    kept = existing.container_port,
                    discarded = port.container_port,
                    "port value is fixed, override discarded"
                );
            }
        }
    }

    for env in &overlay.env {
        match base.env.iter_mut().find(|existing| existing.name == env.name) {
            Some(existing) => *existing = env.clone(),
            None => base.env.push(env.clone()),
        }
    }

    for mount in &overlay.volume_mounts {
        let existing = base
            .volume_mounts
            .iter_mut()
            .find(|existing| existing.mount_path == mount.mount_path);
        match (existing, precedence) {
            (None, _) => base.volume_mounts.push(mount.clone()),
            (Some(existing), Precedence::Overlay { .. }) => *existing = mount.clone(),
            (Some(_), Precedence::Existing) => {
                debug!(
                    container = %base.name,
                    mount_path = %mount.mount_path,
                    "mount path already used, keeping first"
                );
            }
        }
    }

    Ok(())
}
