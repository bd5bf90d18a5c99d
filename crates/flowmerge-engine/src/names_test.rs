use super::{
    managed_properties_config_map_name, managed_properties_file_name,
    user_properties_config_map_name, workflow_labels, APP_LABEL,
};
use flowmerge_model::{Workflow, WorkflowMode};

#[test]
fn config_map_names_derive_from_workflow() {
    let workflow = Workflow::new("greeting", "default");
    assert_eq!(user_properties_config_map_name(&workflow), "greeting-props");
    assert_eq!(managed_properties_config_map_name(&workflow), "greeting-managed-props");
}

#[test]
fn managed_file_follows_profile() {
    let workflow = Workflow::new("greeting", "default");
    assert_eq!(managed_properties_file_name(&workflow), "application-prod.properties");
    let workflow = workflow.with_mode(WorkflowMode::Development);
    assert_eq!(managed_properties_file_name(&workflow), "application-dev.properties");
}

#[test]
fn labels_identify_the_workflow() {
    let labels = workflow_labels(&Workflow::new("greeting", "default"));
    assert_eq!(labels.get(APP_LABEL).map(String::as_str), Some("greeting"));
    assert_eq!(labels.len(), 2);
}
