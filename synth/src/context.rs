// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Cached provider lookups.
//!
//! Synthesis itself never talks to AWS. Anything that has to be looked up
//! from the account (today: NLB DNS names) lives in a JSON context file
//! committed next to the project, and `refresh-context` rewrites that file.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SynthError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextCache {
    /// Load balancer ARN to DNS name, exactly as the provider returned it.
    #[serde(default)]
    load_balancer_dns: BTreeMap<String, String>,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the context file; a missing file is an empty cache, any other
    /// read problem is an error.
    pub fn load(path: &Path) -> Result<Self, SynthError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SynthError> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        fs::write(path, raw)?;
        Ok(())
    }

    pub fn dns_name(&self, arn: &str) -> Option<&str> {
        self.load_balancer_dns.get(arn).map(String::as_str)
    }

    /// A miss here is an operator error (stale or absent context file), not
    /// an unconfigured environment, so it points at `refresh-context`.
    pub fn require_dns_name(&self, arn: &str) -> Result<&str, SynthError> {
        self.dns_name(arn).ok_or_else(|| SynthError::MissingContext {
            arn: arn.to_string(),
        })
    }

    pub fn record_dns_name(&mut self, arn: impl Into<String>, dns_name: impl Into<String>) {
        self.load_balancer_dns.insert(arn.into(), dns_name.into());
    }

    pub fn len(&self) -> usize {
        self.load_balancer_dns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load_balancer_dns.is_empty()
    }
}
