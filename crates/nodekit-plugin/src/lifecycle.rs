// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability interface every plugin node implements.

use nodekit_core::NodekitError;
use serde_json::{Map, Value};

use crate::execution::{ExecutionContext, ExecutionResult};
use crate::manifest::{PluginManifest, PortDefinition};

/// A plugin node instance.
///
/// [`manifest`](PluginNode::manifest) and [`execute`](PluginNode::execute)
/// are mandatory. The lifecycle hooks default to no-ops and the port views
/// are derived from the manifest.
pub trait PluginNode {
    /// The manifest this node was built from.
    fn manifest(&self) -> &PluginManifest;

    /// Run the node once against its input port values.
    fn execute(
        &mut self,
        inputs: &Map<String, Value>,
        ctx: &ExecutionContext,
    ) -> Result<ExecutionResult, NodekitError>;

    /// Called once before the node first executes.
    fn setup(&mut self) -> Result<(), NodekitError> {
        Ok(())
    }

    /// Called once when the node is unloaded.
    fn teardown(&mut self) -> Result<(), NodekitError> {
        Ok(())
    }

    /// True when every required input port has a non-null value in `inputs`.
    fn validate_inputs(&self, inputs: &Map<String, Value>) -> bool {
        self.input_ports()
            .iter()
            .filter(|port| port.is_required())
            .all(|port| inputs.get(&port.id).is_some_and(|v| !v.is_null()))
    }

    fn input_ports(&self) -> Vec<&PortDefinition> {
        self.manifest().input_ports()
    }

    fn output_ports(&self) -> Vec<&PortDefinition> {
        self.manifest().output_ports()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodekit_core::{NodeCategory, PortType};
    use serde_json::json;

    struct CountingNode {
        manifest: PluginManifest,
        setups: usize,
    }

    impl PluginNode for CountingNode {
        fn manifest(&self) -> &PluginManifest {
            &self.manifest
        }

        fn setup(&mut self) -> Result<(), NodekitError> {
            self.setups += 1;
            Ok(())
        }

        fn execute(
            &mut self,
            inputs: &Map<String, Value>,
            ctx: &ExecutionContext,
        ) -> Result<ExecutionResult, NodekitError> {
            if !self.validate_inputs(inputs) {
                return Ok(ExecutionResult::failure("payload is required"));
            }
            ctx.log(tracing::Level::DEBUG, "delaying", None);
            Ok(ExecutionResult::success(json!({
                "done": inputs["payload"],
                "node": ctx.node_id,
            })))
        }
    }

    fn node() -> CountingNode {
        let mut required = PortDefinition::new("payload", PortType::Input);
        required.required = Some(true);
        CountingNode {
            manifest: PluginManifest {
                name: "delay".to_string(),
                version: "1.0.0".to_string(),
                description: "Wait before continuing".to_string(),
                author: "Acme".to_string(),
                node_type: "control.delay".to_string(),
                automation_node_type: None,
                display_name: "Delay".to_string(),
                category: NodeCategory::Control,
                ports: vec![
                    required,
                    PortDefinition::new("options", PortType::Input),
                    PortDefinition::new("done", PortType::Output),
                ],
                tags: vec![],
                domain: None,
                sub_category: None,
                icon: None,
                is_popular: false,
                sdk_version: None,
                main: None,
                keywords: vec![],
                metadata: None,
                automation_configs: None,
            },
            setups: 0,
        }
    }

    #[test]
    fn hooks_default_to_no_ops() {
        let mut node = node();
        node.setup().unwrap();
        node.teardown().unwrap();
        assert_eq!(node.setups, 1);
    }

    #[test]
    fn port_views_split_by_direction() {
        let node = node();
        let inputs: Vec<&str> = node.input_ports().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(inputs, vec!["payload", "options"]);
        assert_eq!(node.output_ports()[0].id, "done");
    }

    #[test]
    fn required_inputs_must_be_non_null() {
        let node = node();
        let ok = json!({"payload": {"a": 1}});
        let null = json!({"payload": null, "options": 3});
        let missing = json!({"options": 3});
        assert!(node.validate_inputs(ok.as_object().unwrap()));
        assert!(!node.validate_inputs(null.as_object().unwrap()));
        assert!(!node.validate_inputs(missing.as_object().unwrap()));
    }

    #[test]
    fn execute_receives_inputs_and_context() {
        let mut node = node();
        let ctx = ExecutionContext::new("node-1", "wf-1");

        let inputs = json!({"payload": {"a": 1}});
        let result = node.execute(inputs.as_object().unwrap(), &ctx).unwrap();
        assert!(result.success);
        assert_eq!(result.data, Some(json!({"done": {"a": 1}, "node": "node-1"})));

        let result = node.execute(&Map::new(), &ctx).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("payload is required"));
    }
}
