// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Identity NLB selection.
//!
//! Which load balancer an identity environment talks to comes from layered
//! sources with a fixed precedence, and an environment with no source at all
//! is a valid state: its gateway is simply not synthesized.

use std::collections::BTreeMap;

use crate::constants::{NLB_ID_DEV_ARNS, NLB_ID_QA_ARN, QA_ENV_NAME};
use crate::environment::EnvironmentConfig;

/// Outcome of picking the identity NLB for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Resolved to a concrete load balancer ARN.
    Resolved(String),
    /// No source configured one; callers skip the dependent resources
    /// instead of failing the run.
    Unconfigured,
}

impl Resolution {
    pub fn arn(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(arn) => Some(arn),
            Resolution::Unconfigured => None,
        }
    }
}

/// The ARN sources consulted by [`resolve_nlb_arn`], owned by the caller so
/// tests and future tooling can substitute their own.
#[derive(Debug, Clone, Default)]
pub struct NlbArnRegistry {
    /// Per-environment NLBs of the dev sub-environments.
    pub dev: BTreeMap<String, String>,
    /// The shared QA load balancer.
    pub qa: String,
}

impl NlbArnRegistry {
    /// The registry shipped with this repo.
    pub fn builtin() -> Self {
        NlbArnRegistry {
            dev: NLB_ID_DEV_ARNS
                .iter()
                .map(|(env, arn)| (env.to_string(), arn.to_string()))
                .collect(),
            qa: NLB_ID_QA_ARN.to_string(),
        }
    }
}

/// Picks the identity NLB for `env_name`: the first source with an answer
/// wins, and the order is fixed.
///
/// 1. The explicit override on the stage config, when present and non-empty.
/// 2. The dev registry entry for the environment.
/// 3. The shared QA load balancer, but only for the environment literally
///    named `qa`.
///
/// No source answering is [`Resolution::Unconfigured`], never an error.
pub fn resolve_nlb_arn(
    env_name: &str,
    cfg: &EnvironmentConfig,
    registry: &NlbArnRegistry,
) -> Resolution {
    let explicit_override = || {
        cfg.id_nlb_arn
            .as_deref()
            .filter(|arn| !arn.is_empty())
            .map(String::from)
    };
    let dev_registry = || registry.dev.get(env_name).cloned();
    let qa_fixed = || (env_name == QA_ENV_NAME).then(|| registry.qa.clone());

    let sources: [&dyn Fn() -> Option<String>; 3] = [&explicit_override, &dev_registry, &qa_fixed];

    match sources.iter().find_map(|source| source()) {
        Some(arn) => Resolution::Resolved(arn),
        None => Resolution::Unconfigured,
    }
}
