// SPDX-FileCopyrightText: 2026 Nodekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation context handed to a node and the result it returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Level;

/// Where a node execution happens inside the host workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    pub node_id: String,
    pub workflow_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ExecutionContext {
    pub fn new(node_id: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            workflow_id: workflow_id.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Emit a log event tagged with the node and workflow ids.
    pub fn log(&self, level: Level, message: &str, data: Option<&Value>) {
        let node_id = self.node_id.as_str();
        let workflow_id = self.workflow_id.as_str();
        match level {
            Level::ERROR => tracing::error!(node_id, workflow_id, ?data, "{message}"),
            Level::WARN => tracing::warn!(node_id, workflow_id, ?data, "{message}"),
            Level::INFO => tracing::info!(node_id, workflow_id, ?data, "{message}"),
            Level::DEBUG => tracing::debug!(node_id, workflow_id, ?data, "{message}"),
            _ => tracing::trace!(node_id, workflow_id, ?data, "{message}"),
        }
    }
}

/// Outcome of one node execution.
///
/// A failed execution is a normal result carrying `error`; `Err` from
/// [`PluginNode::execute`](crate::PluginNode::execute) is reserved for SDK
/// failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn log_is_tagged_with_node_and_workflow() {
        let ctx = ExecutionContext::new("node-7", "wf-42");
        ctx.log(Level::WARN, "rate limited", Some(&json!({"retryIn": 5})));
        assert!(logs_contain("rate limited"));
        assert!(logs_contain("node-7"));
        assert!(logs_contain("wf-42"));
    }

    #[test]
    fn context_uses_camel_case_keys() {
        let ctx = ExecutionContext::new("n", "w").with_user("u");
        assert_eq!(
            serde_json::to_value(&ctx).unwrap(),
            json!({"nodeId": "n", "workflowId": "w", "userId": "u"})
        );
        let anonymous: ExecutionContext =
            serde_json::from_value(json!({"nodeId": "n", "workflowId": "w"})).unwrap();
        assert_eq!(anonymous.user_id, None);
    }

    #[test]
    fn failure_carries_error_without_data() {
        let result = ExecutionResult::failure("timeout");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"success": false, "error": "timeout"})
        );
    }
}
