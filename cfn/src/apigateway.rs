// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! `AWS::ApiGateway::*` resource properties.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::intrinsics::Expr;
use crate::template::{CfnResource, Tag};

#[derive(Debug, Clone, Serialize)]
pub struct RestApi {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for RestApi {
    const TYPE: &'static str = "AWS::ApiGateway::RestApi";
}

/// Attribute of [`RestApi`] holding the implicit root resource id.
pub const ROOT_RESOURCE_ID: &str = "RootResourceId";

#[derive(Debug, Clone, Serialize)]
pub struct ApiResource {
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "ParentId")]
    pub parent_id: Expr,
    #[serde(rename = "PathPart")]
    pub path_part: String,
}

impl CfnResource for ApiResource {
    const TYPE: &'static str = "AWS::ApiGateway::Resource";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AuthorizationType {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "COGNITO_USER_POOLS")]
    CognitoUserPools,
}

#[derive(Debug, Clone, Serialize)]
pub struct Method {
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "ResourceId")]
    pub resource_id: Expr,
    #[serde(rename = "HttpMethod")]
    pub http_method: String,
    #[serde(rename = "AuthorizationType")]
    pub authorization_type: AuthorizationType,
    #[serde(rename = "AuthorizerId", skip_serializing_if = "Option::is_none")]
    pub authorizer_id: Option<Expr>,
    #[serde(rename = "ApiKeyRequired", skip_serializing_if = "Option::is_none")]
    pub api_key_required: Option<bool>,
    /// Request parameters the client may (`false`) or must (`true`) send,
    /// keyed by `method.request.{path|querystring|header}.<name>`.
    #[serde(rename = "RequestParameters", skip_serializing_if = "BTreeMap::is_empty")]
    pub request_parameters: BTreeMap<String, bool>,
    #[serde(rename = "MethodResponses", skip_serializing_if = "Vec::is_empty")]
    pub method_responses: Vec<MethodResponse>,
    #[serde(rename = "Integration", skip_serializing_if = "Option::is_none")]
    pub integration: Option<Integration>,
}

impl CfnResource for Method {
    const TYPE: &'static str = "AWS::ApiGateway::Method";
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodResponse {
    #[serde(rename = "StatusCode")]
    pub status_code: String,
    #[serde(rename = "ResponseModels", skip_serializing_if = "BTreeMap::is_empty")]
    pub response_models: BTreeMap<String, String>,
    /// Response headers the integration is allowed to set, keyed by
    /// `method.response.header.<name>`.
    #[serde(
        rename = "ResponseParameters",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub response_parameters: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntegrationType {
    #[serde(rename = "HTTP_PROXY")]
    HttpProxy,
    #[serde(rename = "MOCK")]
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConnectionType {
    #[serde(rename = "VPC_LINK")]
    VpcLink,
}

#[derive(Debug, Clone, Serialize)]
pub struct Integration {
    #[serde(rename = "Type")]
    pub integration_type: IntegrationType,
    #[serde(
        rename = "IntegrationHttpMethod",
        skip_serializing_if = "Option::is_none"
    )]
    pub integration_http_method: Option<String>,
    #[serde(rename = "Uri", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "ConnectionType", skip_serializing_if = "Option::is_none")]
    pub connection_type: Option<ConnectionType>,
    #[serde(rename = "ConnectionId", skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<Expr>,
    /// Maps integration request parameters from method request parameters,
    /// e.g. `integration.request.path.proxy` from `method.request.path.proxy`.
    #[serde(rename = "RequestParameters", skip_serializing_if = "BTreeMap::is_empty")]
    pub request_parameters: BTreeMap<String, String>,
    #[serde(rename = "RequestTemplates", skip_serializing_if = "BTreeMap::is_empty")]
    pub request_templates: BTreeMap<String, String>,
    #[serde(rename = "CacheKeyParameters", skip_serializing_if = "Vec::is_empty")]
    pub cache_key_parameters: Vec<String>,
    #[serde(
        rename = "IntegrationResponses",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub integration_responses: Vec<IntegrationResponse>,
}

impl Default for Integration {
    fn default() -> Self {
        Integration {
            integration_type: IntegrationType::Mock,
            integration_http_method: None,
            uri: None,
            connection_type: None,
            connection_id: None,
            request_parameters: BTreeMap::new(),
            request_templates: BTreeMap::new(),
            cache_key_parameters: Vec::new(),
            integration_responses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationResponse {
    #[serde(rename = "StatusCode")]
    pub status_code: String,
    /// Static header values must be single-quoted, e.g. `'*'`.
    #[serde(
        rename = "ResponseParameters",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub response_parameters: BTreeMap<String, String>,
    #[serde(
        rename = "ResponseTemplates",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub response_templates: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Deployment {
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CfnResource for Deployment {
    const TYPE: &'static str = "AWS::ApiGateway::Deployment";
}

#[derive(Debug, Clone, Serialize)]
pub struct Stage {
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "DeploymentId")]
    pub deployment_id: Expr,
    #[serde(rename = "StageName")]
    pub stage_name: String,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for Stage {
    const TYPE: &'static str = "AWS::ApiGateway::Stage";
}

#[derive(Debug, Clone, Serialize)]
pub struct VpcLink {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Network load balancer ARNs the link fronts.
    #[serde(rename = "TargetArns")]
    pub target_arns: Vec<String>,
}

impl CfnResource for VpcLink {
    const TYPE: &'static str = "AWS::ApiGateway::VpcLink";
}

#[derive(Debug, Clone, Serialize)]
pub struct Authorizer {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "Type")]
    pub authorizer_type: String,
    /// Where the caller presents the token, e.g. `method.request.header.id-token`.
    #[serde(rename = "IdentitySource")]
    pub identity_source: String,
    #[serde(rename = "ProviderARNs")]
    pub provider_arns: Vec<String>,
}

impl CfnResource for Authorizer {
    const TYPE: &'static str = "AWS::ApiGateway::Authorizer";
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointConfiguration {
    #[serde(rename = "Types")]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainName {
    #[serde(rename = "DomainName")]
    pub domain_name: String,
    #[serde(
        rename = "RegionalCertificateArn",
        skip_serializing_if = "Option::is_none"
    )]
    pub regional_certificate_arn: Option<Expr>,
    #[serde(
        rename = "EndpointConfiguration",
        skip_serializing_if = "Option::is_none"
    )]
    pub endpoint_configuration: Option<EndpointConfiguration>,
    #[serde(rename = "Tags", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl CfnResource for DomainName {
    const TYPE: &'static str = "AWS::ApiGateway::DomainName";
}

/// Attributes of [`DomainName`] used to build the alias record.
pub const REGIONAL_DOMAIN_NAME: &str = "RegionalDomainName";
pub const REGIONAL_HOSTED_ZONE_ID: &str = "RegionalHostedZoneId";

#[derive(Debug, Clone, Serialize)]
pub struct BasePathMapping {
    #[serde(rename = "DomainName")]
    pub domain_name: Expr,
    #[serde(rename = "RestApiId")]
    pub rest_api_id: Expr,
    #[serde(rename = "Stage", skip_serializing_if = "Option::is_none")]
    pub stage: Option<Expr>,
}

impl CfnResource for BasePathMapping {
    const TYPE: &'static str = "AWS::ApiGateway::BasePathMapping";
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiStage {
    #[serde(rename = "ApiId")]
    pub api_id: Expr,
    #[serde(rename = "Stage")]
    pub stage: Expr,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsagePlan {
    #[serde(rename = "UsagePlanName")]
    pub usage_plan_name: String,
    #[serde(rename = "ApiStages", skip_serializing_if = "Vec::is_empty")]
    pub api_stages: Vec<ApiStage>,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CfnResource for UsagePlan {
    const TYPE: &'static str = "AWS::ApiGateway::UsagePlan";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enums_serialize_as_gateway_literals() {
        assert_eq!(
            serde_json::to_value(AuthorizationType::CognitoUserPools).unwrap(),
            json!("COGNITO_USER_POOLS")
        );
        assert_eq!(
            serde_json::to_value(IntegrationType::HttpProxy).unwrap(),
            json!("HTTP_PROXY")
        );
        assert_eq!(
            serde_json::to_value(ConnectionType::VpcLink).unwrap(),
            json!("VPC_LINK")
        );
    }

    #[test]
    fn test_method_omits_empty_optional_blocks() {
        let method = Method {
            rest_api_id: Expr::reference("RestApi"),
            resource_id: Expr::get_att("RestApi", ROOT_RESOURCE_ID),
            http_method: "GET".to_string(),
            authorization_type: AuthorizationType::None,
            authorizer_id: None,
            api_key_required: None,
            request_parameters: BTreeMap::new(),
            method_responses: Vec::new(),
            integration: None,
        };
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["AuthorizationType"], "NONE");
        assert!(value.get("AuthorizerId").is_none());
        assert!(value.get("RequestParameters").is_none());
        assert!(value.get("Integration").is_none());
    }

    #[test]
    fn test_integration_serializes_vpc_link_fields() {
        let integration = Integration {
            integration_type: IntegrationType::HttpProxy,
            integration_http_method: Some("ANY".to_string()),
            uri: Some("http://nlb.internal:8080/credentials/{proxy}".to_string()),
            connection_type: Some(ConnectionType::VpcLink),
            connection_id: Some(Expr::reference("VpcLink")),
            request_parameters: BTreeMap::from([(
                "integration.request.path.proxy".to_string(),
                "method.request.path.proxy".to_string(),
            )]),
            cache_key_parameters: vec!["method.request.path.proxy".to_string()],
            ..Integration::default()
        };
        let value = serde_json::to_value(&integration).unwrap();
        assert_eq!(value["Type"], "HTTP_PROXY");
        assert_eq!(value["ConnectionType"], "VPC_LINK");
        assert_eq!(value["ConnectionId"], json!({ "Ref": "VpcLink" }));
        assert_eq!(
            value["CacheKeyParameters"],
            json!(["method.request.path.proxy"])
        );
    }
}
