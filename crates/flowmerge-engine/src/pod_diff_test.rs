use super::{diff_pod_specs, diff_pod_specs_text, ContainerChange};
use flowmerge_model::{Container, EnvVar, PodSpec};

fn container(name: &str, image: &str) -> Container {
    Container {
        name: name.to_string(),
        image: image.to_string(),
        ..Container::default()
    }
}

#[test]
fn diff_reports_added_removed_changed() {
    let before = PodSpec {
        containers: vec![container("workflow", "flow:1"), container("proxy", "envoy:1")],
        ..PodSpec::default()
    };
    let mut main = container("workflow", "flow:2");
    main.env = vec![EnvVar::literal("ENV1", "x")];
    let after = PodSpec {
        containers: vec![main, container("logger", "fluent:1")],
        service_account_name: "superuser".to_string(),
        ..PodSpec::default()
    };

    let diff = diff_pod_specs(&before, &after);
    assert_eq!(diff.summary.added, 1);
    assert_eq!(diff.summary.removed, 1);
    assert_eq!(diff.summary.changed, 1);
    assert_eq!(diff.added, vec!["logger".to_string()]);
    assert_eq!(diff.removed, vec!["proxy".to_string()]);
    assert_eq!(diff.changed[0].name, "workflow");
    assert_eq!(
        diff.changed[0].changes,
        vec![ContainerChange::Image, ContainerChange::Env]
    );
    assert!(diff.service_account_changed);
    assert!(!diff.volumes_changed);
}

#[test]
fn identical_specs_have_empty_diff() {
    let spec = PodSpec {
        containers: vec![container("workflow", "flow:1")],
        ..PodSpec::default()
    };
    assert!(diff_pod_specs(&spec, &spec).is_empty());
    assert_eq!(
        diff_pod_specs_text(&spec, &spec),
        "pod spec diff: added=0 removed=0 changed=0"
    );
}

#[test]
fn text_lists_one_line_per_item() {
    let before = PodSpec {
        containers: vec![container("workflow", "flow:1")],
        ..PodSpec::default()
    };
    let after = PodSpec {
        containers: vec![container("workflow", "flow:2"), container("proxy", "envoy:1")],
        ..PodSpec::default()
    };
    let text = diff_pod_specs_text(&before, &after);
    assert_eq!(
        text,
        "pod spec diff: added=1 removed=0 changed=1\n+ container=proxy\n~ container=workflow changes=image"
    );
}
