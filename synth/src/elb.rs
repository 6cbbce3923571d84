// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::collections::BTreeMap;

use aws_config::BehaviorVersion;
use aws_sdk_elasticloadbalancingv2 as elbv2;
use elbv2::config::Region;

use crate::context::ContextCache;
use crate::errors::SynthError;

/// Extracts the region segment of an ELBv2 ARN,
/// `arn:aws:elasticloadbalancing:<region>:<account>:loadbalancer/...`.
pub fn region_of_arn(arn: &str) -> Result<&str, SynthError> {
    let parts: Vec<&str> = arn.splitn(6, ':').collect();
    match parts.as_slice() {
        ["arn", _partition, "elasticloadbalancing", region, _account, _resource]
            if !region.is_empty() =>
        {
            Ok(region)
        }
        _ => Err(SynthError::InvalidArn(arn.to_string())),
    }
}

/// Looks up the DNS name of every load balancer and records it into the
/// cache. ARNs are grouped by region first so each region costs one
/// DescribeLoadBalancers call.
pub async fn refresh_dns_names(
    arns: &[String],
    ctx: &mut ContextCache,
) -> Result<usize, SynthError> {
    let mut by_region: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for arn in arns {
        by_region.entry(region_of_arn(arn)?).or_default().push(arn.clone());
    }

    let base = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let mut recorded = 0;

    for (region, region_arns) in by_region {
        tracing::debug!(
            "[synth] describing {} load balancer(s) in {}",
            region_arns.len(),
            region
        );
        let config = elbv2::config::Builder::from(&base)
            .region(Region::new(region.to_string()))
            .build();
        let client = elbv2::Client::from_conf(config);

        let described = client
            .describe_load_balancers()
            .set_load_balancer_arns(Some(region_arns))
            .send()
            .await
            .map_err(|e| SynthError::Lookup(elbv2::error::DisplayErrorContext(e).to_string()))?;

        for lb in described.load_balancers() {
            if let (Some(arn), Some(dns_name)) = (lb.load_balancer_arn(), lb.dns_name()) {
                tracing::info!("[synth] {} -> {}", arn, dns_name);
                ctx.record_dns_name(arn, dns_name);
                recorded += 1;
            }
        }
    }

    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;

    // refresh_dns_names needs live credentials, so only the ARN parsing is
    // covered here.

    #[test]
    fn test_region_is_the_fourth_arn_segment() {
        let arn =
            "arn:aws:elasticloadbalancing:ap-northeast-2:123456789012:loadbalancer/net/x/abc";
        assert_eq!(region_of_arn(arn).unwrap(), "ap-northeast-2");
    }

    #[test]
    fn test_non_elb_arns_are_rejected() {
        for arn in [
            "",
            "not-an-arn",
            "arn:aws:s3:::bucket",
            "arn:aws:elasticloadbalancing::123456789012:loadbalancer/net/x/abc",
            "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/x",
        ] {
            assert!(
                matches!(region_of_arn(arn), Err(SynthError::InvalidArn(_))),
                "accepted {arn:?}"
            );
        }
    }
}
