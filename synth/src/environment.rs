// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use crate::constants::{
    DEFAULT_ACCOUNT, DEFAULT_REGION, DEV_ENV_STAGE, DEV_ENV_TAG, DEV_WILDCARD_CERT_ARN,
    DEV_ZONE_ID, DEV_ZONE_NAME, NLB_ID_STAG_ARN, PROD_ENV_STAGE, PROD_ENV_TAG,
    SIMFLEXCLOUD_WILDCARD_CERT_ARN, SIMFLEXCLOUD_ZONE_ID, SIMFLEXCLOUD_ZONE_NAME, STAG_ENV_STAGE,
    STAG_ENV_TAG,
};

/// Per-stage deployment settings, fixed at synthesis time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    /// Location code prefixed to every stack name.
    pub pattern: String,
    pub stage: String,
    pub env_tag: String,
    pub owner: String,
    pub account: String,
    pub region: String,
    /// Explicit identity NLB for the whole stage; set only where the stage
    /// runs against a single load balancer instead of the per-environment
    /// registry.
    pub id_nlb_arn: Option<String>,
}

pub fn dev_env() -> EnvironmentConfig {
    EnvironmentConfig {
        pattern: "sin".to_string(),
        stage: DEV_ENV_STAGE.to_string(),
        env_tag: DEV_ENV_TAG.to_string(),
        owner: "development".to_string(),
        account: DEFAULT_ACCOUNT.to_string(),
        region: DEFAULT_REGION.to_string(),
        id_nlb_arn: None,
    }
}

pub fn staging_env() -> EnvironmentConfig {
    EnvironmentConfig {
        pattern: "sin".to_string(),
        stage: STAG_ENV_STAGE.to_string(),
        env_tag: STAG_ENV_TAG.to_string(),
        owner: "staging".to_string(),
        account: DEFAULT_ACCOUNT.to_string(),
        region: DEFAULT_REGION.to_string(),
        id_nlb_arn: Some(NLB_ID_STAG_ARN.to_string()),
    }
}

pub fn prod_env() -> EnvironmentConfig {
    EnvironmentConfig {
        pattern: "sin".to_string(),
        stage: PROD_ENV_STAGE.to_string(),
        env_tag: PROD_ENV_TAG.to_string(),
        owner: "production".to_string(),
        account: DEFAULT_ACCOUNT.to_string(),
        region: DEFAULT_REGION.to_string(),
        id_nlb_arn: None,
    }
}

pub fn environment_for_stage(stage: &str) -> Option<EnvironmentConfig> {
    match stage {
        DEV_ENV_STAGE => Some(dev_env()),
        STAG_ENV_STAGE => Some(staging_env()),
        PROD_ENV_STAGE => Some(prod_env()),
        _ => None,
    }
}

/// A hosted zone together with the wildcard certificate issued for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsZone {
    pub zone_id: String,
    pub zone_name: String,
    pub certificate_arn: String,
}

/// Dev deployments publish under the delegated dev zone; every other stage
/// publishes under the production zone. Nothing but the stage token decides
/// this.
pub fn identity_zone_for_stage(stage: &str) -> DnsZone {
    if stage == DEV_ENV_STAGE {
        DnsZone {
            zone_id: DEV_ZONE_ID.to_string(),
            zone_name: DEV_ZONE_NAME.to_string(),
            certificate_arn: DEV_WILDCARD_CERT_ARN.to_string(),
        }
    } else {
        DnsZone {
            zone_id: SIMFLEXCLOUD_ZONE_ID.to_string(),
            zone_name: SIMFLEXCLOUD_ZONE_NAME.to_string(),
            certificate_arn: SIMFLEXCLOUD_WILDCARD_CERT_ARN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_tokens_map_to_their_configs() {
        assert_eq!(environment_for_stage("d1"), Some(dev_env()));
        assert_eq!(environment_for_stage("s1"), Some(staging_env()));
        assert_eq!(environment_for_stage("p1"), Some(prod_env()));
        assert_eq!(environment_for_stage("q9"), None);
        assert_eq!(environment_for_stage(""), None);
    }

    #[test]
    fn test_only_staging_carries_an_explicit_nlb() {
        assert!(dev_env().id_nlb_arn.is_none());
        assert!(staging_env().id_nlb_arn.is_some());
        assert!(prod_env().id_nlb_arn.is_none());
    }

    #[test]
    fn test_dev_stage_selects_the_delegated_zone() {
        assert_eq!(identity_zone_for_stage("d1").zone_name, "dev.simflexcloud.com");
        assert_eq!(identity_zone_for_stage("s1").zone_name, "simflexcloud.com");
        assert_eq!(identity_zone_for_stage("p1").zone_name, "simflexcloud.com");
        // Unknown stages fail earlier, at config lookup; the zone choice
        // itself only distinguishes dev from everything else.
        assert_eq!(identity_zone_for_stage("zz").zone_name, "simflexcloud.com");
    }
}
