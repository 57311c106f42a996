// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed coordinates of the monitored Redis Enterprise deployment.

/// Label selector matching cluster node pods.
pub const NODE_SELECTOR: &str = "redis.io/role=node";

/// Container name of the enterprise node inside a node pod.
pub const NODE_CONTAINER: &str = "redis-enterprise-node";

/// Diagnostic tool invoked inside a node container to build the debug
/// bundle.
pub const RLADMIN: &str = "/opt/redislabs/bin/rladmin";

/// Where node pods keep their service logs.
pub const NODE_LOG_PATH: &str = "/var/opt/redislabs/log";

/// Where node pods keep their configuration.
pub const NODE_CONFIG_PATH: &str = "/opt/redislabs/config";

/// Label selector for resources owned by the application; restricted mode
/// collects only these.
pub const RESTRICTED_SELECTOR: &str = "app=redis-enterprise";

/// Operator deployment whose image tag gates restricted-mode eligibility.
pub const OPERATOR_DEPLOYMENT: &str = "redis-enterprise-operator";
