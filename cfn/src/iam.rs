// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::IAM::*` resource properties.

use serde::Serialize;

use crate::template::{CfnResource, Tag};

pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    #[serde(rename = "Service")]
    pub service: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyStatement {
    #[serde(rename = "Effect")]
    pub effect: String,
    #[serde(rename = "Principal", skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
    #[serde(rename = "Action")]
    pub action: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Statement")]
    pub statement: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Trust policy letting one AWS service assume the role.
    pub fn service_assume_role(service: &str) -> Self {
        PolicyDocument {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                effect: "Allow".to_string(),
                principal: Some(Principal {
                    service: service.to_string(),
                }),
                action: vec!["sts:AssumeRole".to_string()],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Role {
    #[serde(rename = "RoleName", skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(rename = "AssumeRolePolicyDocument")]
    pub assume_role_policy_document: PolicyDocument,
    #[serde(rename = "ManagedPolicyArns", skip_serializing_if = "Vec::is_empty")]
    pub managed_policy_arns: Vec<String>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for Role {
    const TYPE: &'static str = "AWS::IAM::Role";
}
