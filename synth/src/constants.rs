// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Stage tokens and the environment tags they deploy under
pub const DEV_ENV_STAGE: &str = "d1";
pub const STAG_ENV_STAGE: &str = "s1";
pub const PROD_ENV_STAGE: &str = "p1";
pub const DEV_ENV_TAG: &str = "dev";
pub const STAG_ENV_TAG: &str = "stag";
pub const PROD_ENV_TAG: &str = "prod";

pub const PROJECT_OWNER: &str = "simflexcloud";
pub const DEFAULT_ACCOUNT: &str = "123456789012";
pub const DEFAULT_REGION: &str = "ap-southeast-1";

// Tag keys shared by every stack
pub const TAG_STACK_NAME: &str = "cdk:stack-name";
pub const TAG_SERVICE: &str = "service";
pub const TAG_LOCATION: &str = "location";
pub const TAG_OWNER: &str = "owner";
pub const TAG_STAGE: &str = "stage";

// Hosted zones; the dev zone is delegated from the production one
pub const SIMFLEXCLOUD_ZONE_NAME: &str = "simflexcloud.com";
pub const SIMFLEXCLOUD_ZONE_ID: &str = "ZONEIDSIMFLEXCLOUD";
pub const DEV_ZONE_NAME: &str = "dev.simflexcloud.com";
pub const DEV_ZONE_ID: &str = "ZONEIDSIMFLEXDEV";

/// Wildcard certificates issued per zone, referenced by ARN because they are
/// managed outside the synthesized stacks.
pub const SIMFLEXCLOUD_WILDCARD_CERT_ARN: &str =
    "arn:aws:acm:ap-southeast-1:123456789012:certificate/7d1f82a4-33a9-4f0e-9c21-5b0de8a11001";
pub const DEV_WILDCARD_CERT_ARN: &str =
    "arn:aws:acm:ap-southeast-1:123456789012:certificate/2b964c7e-8840-4aa1-b1a5-c3f01d2aa002";

// Identity service
pub const IDENTITY_SERVICE: &str = "id";
pub const IDENTITY_AUTH_STAGE_NAME: &str = "AuthStage";
pub const ID_TOKEN_IDENTITY_SOURCE: &str = "method.request.header.id-token";
/// Listener port the identity NLBs expose to their VPC links.
pub const NLB_VPCLINK_ID_PORT: u32 = 8080;
/// The one environment served by the shared QA load balancer.
pub const QA_ENV_NAME: &str = "qa";

/// Long-lived dev sub-environments and their NLBs, provisioned by the
/// cluster tooling in the dev account's region.
pub const NLB_ID_DEV_ARNS: &[(&str, &str)] = &[
    (
        "demo",
        "arn:aws:elasticloadbalancing:ap-northeast-2:123456789012:loadbalancer/net/sin-id-d1-demo/1b2c3d4e5f6a7b8c",
    ),
    (
        "dev",
        "arn:aws:elasticloadbalancing:ap-northeast-2:123456789012:loadbalancer/net/sin-id-d1-dev/8f3a2b1c0d9e8f7a",
    ),
];

pub const NLB_ID_QA_ARN: &str =
    "arn:aws:elasticloadbalancing:ap-south-1:123456789012:loadbalancer/net/sin-id-d1-qa/a1b2c3d4e5f60718";

/// Staging runs against a single NLB wired directly into the stage config.
pub const NLB_ID_STAG_ARN: &str =
    "arn:aws:elasticloadbalancing:ap-southeast-1:123456789012:loadbalancer/net/sin-id-s1-stag/0f1e2d3c4b5a6978";

/// Identity environments and the Cognito user pool each one authenticates
/// against. `sandbox` has no load balancer yet and synthesizes to nothing.
pub const IDENTITY_ENVIRONMENTS: &[(&str, &str)] = &[
    (
        "demo",
        "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/ap-southeast-1_DemoPool01",
    ),
    (
        "dev",
        "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/ap-southeast-1_DevPool001",
    ),
    (
        "qa",
        "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/ap-southeast-1_QaPool0001",
    ),
    (
        "sandbox",
        "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/ap-southeast-1_SandboxP01",
    ),
];

// FastAPI edge
pub const FASTAPI_SERVICE: &str = "fastapi";
pub const FASTAPI_STAGE_NAME: &str = "AppAPI";
pub const FASTAPI_USAGE_PLAN_NAME: &str = "fastApi-test";
pub const FASTAPI_BACKEND_ORIGIN: &str = "http://18.169.10.197:8000";
pub const FASTAPI_RECORD_NAME: &str = "chatgpt";
pub const FASTAPI_RUNTIME: &str = "python3.9";
pub const FASTAPI_HANDLER: &str = "main.handler";
pub const FASTAPI_LOG_RETENTION_DAYS: u32 = 1;
/// Deployment bundles are staged in this bucket by CI before synthesis.
pub const ASSET_BUCKET: &str = "simflexcloud-assets-ap-southeast-1";
pub const FASTAPI_ASSET_KEY: &str = "fastapi/bundle.zip";
