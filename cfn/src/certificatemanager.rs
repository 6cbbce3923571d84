// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::CertificateManager::*` resource properties.

use serde::Serialize;

use crate::template::{CfnResource, Tag};

#[derive(Debug, Clone, Serialize)]
pub struct DomainValidationOption {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Certificate {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(
        rename = "SubjectAlternativeNames",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subject_alternative_names: Vec<String>,
    #[serde(rename = "ValidationMethod")]
    pub validation_method: String,
    #[serde(
        rename = "DomainValidationOptions",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub domain_validation_options: Vec<DomainValidationOption>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for Certificate {
    const TYPE: &'static str = "AWS::CertificateManager::Certificate";
}

impl Certificate {
    /// A DNS-validated certificate covering the zone apex and `*.<apex>`.
    pub fn wildcard(zone_name: &str, zone_id: &str, tags: Vec<Tag>) -> Self {
        Certificate {
            domain_name: zone_name.to_string(),
            subject_alternative_names: vec![format!("*.{zone_name}")],
            validation_method: "DNS".to_string(),
            domain_validation_options: vec![DomainValidationOption {
                domain_name: zone_name.to_string(),
                hosted_zone_id: zone_id.to_string(),
            }],
            tags,
        }
    }
}
