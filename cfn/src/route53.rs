// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::Route53::*` resource properties.

use serde::Serialize;

use crate::intrinsics::Expr;
use crate::template::CfnResource;

#[derive(Debug, Clone, Serialize)]
pub struct AliasTarget {
    #[serde(rename = "DNSName")]
    pub dns_name: Expr,
    /// The hosted zone of the aliased endpoint, not of the record's own zone.
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: Expr,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordSet {
    /// Fully qualified, with the trailing dot.
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    // Alias records carry no TTL; plain records carry no alias target.
    #[serde(rename = "AliasTarget", skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
    #[serde(rename = "ResourceRecords", skip_serializing_if = "Vec::is_empty")]
    pub resource_records: Vec<String>,
}

impl CfnResource for RecordSet {
    const TYPE: &'static str = "AWS::Route53::RecordSet";
}

impl RecordSet {
    /// An A record aliasing an API gateway regional domain.
    pub fn api_alias(host: &str, zone_id: &str, domain_logical_id: &str) -> Self {
        RecordSet {
            name: format!("{host}."),
            record_type: "A".to_string(),
            hosted_zone_id: zone_id.to_string(),
            alias_target: Some(AliasTarget {
                dns_name: Expr::get_att(domain_logical_id, crate::apigateway::REGIONAL_DOMAIN_NAME),
                hosted_zone_id: Expr::get_att(
                    domain_logical_id,
                    crate::apigateway::REGIONAL_HOSTED_ZONE_ID,
                ),
            }),
            ttl: None,
            resource_records: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_alias_builds_a_record_without_ttl() {
        let record = RecordSet::api_alias("id-qa.simflexcloud.com", "ZONEID123", "ApiDomain");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["Name"], "id-qa.simflexcloud.com.");
        assert_eq!(value["Type"], "A");
        assert_eq!(value["HostedZoneId"], "ZONEID123");
        assert_eq!(
            value["AliasTarget"]["DNSName"],
            json!({ "Fn::GetAtt": ["ApiDomain", "RegionalDomainName"] })
        );
        assert!(value.get("TTL").is_none());
        assert!(value.get("ResourceRecords").is_none());
    }
}
