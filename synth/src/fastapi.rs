// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! FastAPI edge stack.
//!
//! One REST API in front of the FastAPI backend plus the Lambda that serves
//! the odd maintenance job. The root proxy is open; everything under
//! `/api/v1` needs an API key from the usage plan.

use std::collections::BTreeMap;

use simflex_cfn::apigateway::{
    ApiResource, ApiStage, AuthorizationType, BasePathMapping, Deployment, DomainName,
    EndpointConfiguration, Integration, IntegrationResponse, IntegrationType, Method,
    MethodResponse, RestApi, Stage, UsagePlan, ROOT_RESOURCE_ID,
};
use simflex_cfn::certificatemanager::Certificate;
use simflex_cfn::iam::{PolicyDocument, Role};
use simflex_cfn::intrinsics::Expr;
use simflex_cfn::lambda::{Code, Function};
use simflex_cfn::logs::LogGroup;
use simflex_cfn::route53::RecordSet;
use simflex_cfn::template::{tags_from, Output, Template};

use crate::constants::{
    ASSET_BUCKET, FASTAPI_ASSET_KEY, FASTAPI_BACKEND_ORIGIN, FASTAPI_HANDLER,
    FASTAPI_LOG_RETENTION_DAYS, FASTAPI_RECORD_NAME, FASTAPI_RUNTIME, FASTAPI_SERVICE,
    FASTAPI_STAGE_NAME, FASTAPI_USAGE_PLAN_NAME, PROJECT_OWNER, SIMFLEXCLOUD_ZONE_ID,
    SIMFLEXCLOUD_ZONE_NAME,
};
use crate::environment::EnvironmentConfig;
use crate::errors::SynthError;
use crate::tagging::service_tags;

pub fn build(cfg: &EnvironmentConfig) -> Result<Template, SynthError> {
    let prefix = format!(
        "{}-{}-{}-{}",
        cfg.pattern, PROJECT_OWNER, cfg.stage, FASTAPI_SERVICE
    );
    let tags = tags_from(&service_tags(FASTAPI_SERVICE, cfg));
    let host = format!("{FASTAPI_RECORD_NAME}.{SIMFLEXCLOUD_ZONE_NAME}");

    let mut template = Template::new("FastAPI edge: gateway, backend proxy and worker Lambda");

    template.add(
        "LambdaRole",
        &Role {
            role_name: Some(prefix.clone()),
            assume_role_policy_document: PolicyDocument::service_assume_role(
                "lambda.amazonaws.com",
            ),
            managed_policy_arns: vec![
                "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole".to_string(),
            ],
            tags: tags.clone(),
        },
    )?;

    template.add(
        "Handler",
        &Function {
            function_name: prefix.clone(),
            role: Expr::get_att("LambdaRole", "Arn"),
            runtime: FASTAPI_RUNTIME.to_string(),
            handler: FASTAPI_HANDLER.to_string(),
            code: Code {
                s3_bucket: ASSET_BUCKET.to_string(),
                s3_key: FASTAPI_ASSET_KEY.to_string(),
            },
            memory_size: None,
            timeout: None,
            tags: tags.clone(),
        },
    )?;

    // Pre-created so the short retention applies from the first invoke.
    template.add(
        "HandlerLogs",
        &LogGroup {
            log_group_name: format!("/aws/lambda/{prefix}"),
            retention_in_days: Some(FASTAPI_LOG_RETENTION_DAYS),
        },
    )?;

    template.add(
        "RestApi",
        &RestApi {
            name: format!("{prefix}-fast-api"),
            description: None,
            tags: tags.clone(),
        },
    )?;
    let rest_api_id = Expr::reference("RestApi");
    let root_id = Expr::get_att("RestApi", ROOT_RESOURCE_ID);

    // Open catch-all directly under the root
    template.add(
        "RootProxy",
        &ApiResource {
            rest_api_id: rest_api_id.clone(),
            parent_id: root_id.clone(),
            path_part: "{proxy+}".to_string(),
        },
    )?;
    template.add(
        "RootProxyAny",
        &backend_proxy_method(
            &rest_api_id,
            Expr::reference("RootProxy"),
            false,
            "{proxy}",
        ),
    )?;

    // Keyed surface under /api/v1
    template.add(
        "ApiResource",
        &ApiResource {
            rest_api_id: rest_api_id.clone(),
            parent_id: root_id,
            path_part: "api".to_string(),
        },
    )?;
    template.add(
        "ApiV1Resource",
        &ApiResource {
            rest_api_id: rest_api_id.clone(),
            parent_id: Expr::reference("ApiResource"),
            path_part: "v1".to_string(),
        },
    )?;
    template.add(
        "ApiV1Proxy",
        &ApiResource {
            rest_api_id: rest_api_id.clone(),
            parent_id: Expr::reference("ApiV1Resource"),
            path_part: "{proxy+}".to_string(),
        },
    )?;
    template.add(
        "ApiV1ProxyAny",
        &backend_proxy_method(
            &rest_api_id,
            Expr::reference("ApiV1Proxy"),
            true,
            "api/v1/{proxy}",
        ),
    )?;

    let deployment = template.add(
        "Deployment",
        &Deployment {
            rest_api_id: rest_api_id.clone(),
            description: None,
        },
    )?;
    deployment.depends_on("RootProxyAny");
    deployment.depends_on("ApiV1ProxyAny");

    template.add(
        "Stage",
        &Stage {
            rest_api_id: rest_api_id.clone(),
            deployment_id: Expr::reference("Deployment"),
            stage_name: FASTAPI_STAGE_NAME.to_string(),
            tags: tags.clone(),
        },
    )?;

    template.add(
        "UsagePlan",
        &UsagePlan {
            usage_plan_name: FASTAPI_USAGE_PLAN_NAME.to_string(),
            api_stages: vec![ApiStage {
                api_id: rest_api_id.clone(),
                stage: Expr::reference("Stage"),
            }],
            description: None,
        },
    )?;

    // The edge terminates TLS with its own wildcard certificate; unlike the
    // identity gateways this stack owns the certificate lifecycle.
    template.add(
        "Certificate",
        &Certificate::wildcard(SIMFLEXCLOUD_ZONE_NAME, SIMFLEXCLOUD_ZONE_ID, tags.clone()),
    )?;
    template.add(
        "ApiDomain",
        &DomainName {
            domain_name: host.clone(),
            regional_certificate_arn: Some(Expr::reference("Certificate")),
            endpoint_configuration: Some(EndpointConfiguration {
                types: vec!["REGIONAL".to_string()],
            }),
            tags,
        },
    )?;
    template.add(
        "ApiMapping",
        &BasePathMapping {
            domain_name: Expr::reference("ApiDomain"),
            rest_api_id,
            stage: Some(Expr::reference("Stage")),
        },
    )?;
    template.add(
        "ApiAliasRecord",
        &RecordSet::api_alias(&host, SIMFLEXCLOUD_ZONE_ID, "ApiDomain"),
    )?;

    template.add_output(
        "Endpoint",
        Output {
            description: Some("Public endpoint of the FastAPI edge".to_string()),
            value: Expr::from(format!("https://{host}")),
        },
    );

    Ok(template)
}

/// ANY proxying to the FastAPI backend over plain HTTP.
fn backend_proxy_method(
    rest_api_id: &Expr,
    resource_id: Expr,
    api_key_required: bool,
    uri_path: &str,
) -> Method {
    Method {
        rest_api_id: rest_api_id.clone(),
        resource_id,
        http_method: "ANY".to_string(),
        authorization_type: AuthorizationType::None,
        authorizer_id: None,
        api_key_required: Some(api_key_required),
        request_parameters: BTreeMap::from([("method.request.path.proxy".to_string(), true)]),
        method_responses: vec![MethodResponse {
            status_code: "200".to_string(),
            response_models: BTreeMap::new(),
            response_parameters: BTreeMap::from([(
                "method.response.header.Access-Control-Allow-Origin".to_string(),
                true,
            )]),
        }],
        integration: Some(Integration {
            integration_type: IntegrationType::HttpProxy,
            integration_http_method: Some("ANY".to_string()),
            uri: Some(format!("{FASTAPI_BACKEND_ORIGIN}/{uri_path}")),
            request_parameters: BTreeMap::from([(
                "integration.request.path.proxy".to_string(),
                "method.request.path.proxy".to_string(),
            )]),
            cache_key_parameters: vec!["method.request.path.proxy".to_string()],
            integration_responses: vec![IntegrationResponse {
                status_code: "200".to_string(),
                response_parameters: BTreeMap::new(),
                response_templates: BTreeMap::new(),
            }],
            ..Integration::default()
        }),
    }
}
