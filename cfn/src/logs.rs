// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::Logs::*` resource properties.

use serde::Serialize;

use crate::template::CfnResource;

#[derive(Debug, Clone, Serialize)]
pub struct LogGroup {
    #[serde(rename = "LogGroupName")]
    pub log_group_name: String,
    #[serde(rename = "RetentionInDays", skip_serializing_if = "Option::is_none")]
    pub retention_in_days: Option<u32>,
}

impl CfnResource for LogGroup {
    const TYPE: &'static str = "AWS::Logs::LogGroup";
}
