// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::Lambda::*` resource properties.

use serde::Serialize;

use crate::intrinsics::Expr;
use crate::template::{CfnResource, Tag};

#[derive(Debug, Clone, Serialize)]
pub struct Code {
    #[serde(rename = "S3Bucket")]
    pub s3_bucket: String,
    #[serde(rename = "S3Key")]
    pub s3_key: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Function {
    #[serde(rename = "FunctionName")]
    pub function_name: String,
    /// Execution role ARN, usually `Fn::GetAtt` on a role in the same template.
    #[serde(rename = "Role")]
    pub role: Expr,
    #[serde(rename = "Runtime")]
    pub runtime: String,
    #[serde(rename = "Handler")]
    pub handler: String,
    #[serde(rename = "Code")]
    pub code: Code,
    #[serde(rename = "MemorySize", skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    #[serde(rename = "Timeout", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for Function {
    const TYPE: &'static str = "AWS::Lambda::Function";
}
