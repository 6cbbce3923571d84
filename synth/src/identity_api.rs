// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Identity API gateway stack.
//!
//! Each identity environment gets its own REST API fronting the identity
//! service through a VPC link. The target NLB is provisioned by the cluster
//! tooling and referenced here by ARN only; its DNS name comes from the
//! lookup context. An environment with no NLB configured anywhere yields no
//! stack at all rather than a half-wired one.

use std::collections::BTreeMap;

use simflex_cfn::apigateway::{
    ApiResource, AuthorizationType, Authorizer, BasePathMapping, ConnectionType, Deployment,
    DomainName, EndpointConfiguration, Integration, IntegrationResponse, IntegrationType, Method,
    MethodResponse, RestApi, Stage, VpcLink, ROOT_RESOURCE_ID,
};
use simflex_cfn::intrinsics::Expr;
use simflex_cfn::route53::RecordSet;
use simflex_cfn::template::{logical_id, tags_from, Output, Template};

use crate::constants::{
    IDENTITY_AUTH_STAGE_NAME, IDENTITY_SERVICE, ID_TOKEN_IDENTITY_SOURCE, NLB_VPCLINK_ID_PORT,
};
use crate::context::ContextCache;
use crate::endpoint::{resolve_nlb_arn, NlbArnRegistry, Resolution};
use crate::environment::{identity_zone_for_stage, EnvironmentConfig};
use crate::errors::SynthError;
use crate::tagging::service_tags;

/// HTTP surface of one identity route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethods {
    /// Greedy `{proxy+}` child forwarding every verb.
    AnyProxy,
    /// A single GET on the exact path.
    Get,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub path: &'static str,
    pub methods: RouteMethods,
    pub requires_auth: bool,
}

/// The identity surface: three open proxy trees plus two token-gated reads
/// living under the `oauth2` tree.
pub const IDENTITY_ROUTES: &[RouteSpec] = &[
    RouteSpec {
        path: "credentials",
        methods: RouteMethods::AnyProxy,
        requires_auth: false,
    },
    RouteSpec {
        path: "oidc",
        methods: RouteMethods::AnyProxy,
        requires_auth: false,
    },
    RouteSpec {
        path: "oauth2",
        methods: RouteMethods::AnyProxy,
        requires_auth: false,
    },
    RouteSpec {
        path: "oauth2/user",
        methods: RouteMethods::Get,
        requires_auth: true,
    },
    RouteSpec {
        path: "oauth2/user/timetemp",
        methods: RouteMethods::Get,
        requires_auth: true,
    },
];

pub struct IdentityApiProps {
    /// Cognito user pool backing the `id-token` authorizer.
    pub user_pool_arn: String,
}

/// Builds the identity gateway template for one environment, or `None` when
/// no NLB is configured for it.
pub fn build(
    cfg: &EnvironmentConfig,
    env_name: &str,
    acm_arn: &str,
    props: &IdentityApiProps,
    registry: &NlbArnRegistry,
    ctx: &ContextCache,
) -> Result<Option<Template>, SynthError> {
    let nlb_arn = match resolve_nlb_arn(env_name, cfg, registry) {
        Resolution::Resolved(arn) => arn,
        Resolution::Unconfigured => return Ok(None),
    };
    let nlb_dns = ctx.require_dns_name(&nlb_arn)?.to_string();

    let prefix = format!(
        "{}-{}-{}-{}",
        cfg.pattern, IDENTITY_SERVICE, cfg.stage, env_name
    );
    let tags = tags_from(&service_tags(IDENTITY_SERVICE, cfg));
    let zone = identity_zone_for_stage(&cfg.stage);
    let host = format!("id-{}.{}", env_name, zone.zone_name);

    let mut template = Template::new(format!(
        "Identity API gateway for the {env_name} environment"
    ));

    template.add(
        "VpcLink",
        &VpcLink {
            name: format!("{prefix}-app-api"),
            description: Some(
                "VPC link between the identity API gateway and the identity service".to_string(),
            ),
            target_arns: vec![nlb_arn],
        },
    )?;

    template.add(
        "RestApi",
        &RestApi {
            name: format!("{prefix}-api"),
            description: None,
            tags: tags.clone(),
        },
    )?;
    let rest_api_id = Expr::reference("RestApi");
    let root_id = Expr::get_att("RestApi", ROOT_RESOURCE_ID);

    template.add(
        "Authorizer",
        &Authorizer {
            name: format!("{env_name}-id-auth-pool"),
            rest_api_id: rest_api_id.clone(),
            authorizer_type: "COGNITO_USER_POOLS".to_string(),
            identity_source: ID_TOKEN_IDENTITY_SOURCE.to_string(),
            provider_arns: vec![props.user_pool_arn.clone()],
        },
    )?;

    // Walks the route table, creating each path segment once even where
    // routes nest under each other.
    let mut created_resources: BTreeMap<String, String> = BTreeMap::new();
    let mut method_ids: Vec<String> = Vec::new();

    for route in IDENTITY_ROUTES {
        let resource_id = ensure_resource_chain(
            &mut template,
            &rest_api_id,
            &root_id,
            route.path,
            &mut created_resources,
        )?;
        let route_id = logical_id(route.path);

        match route.methods {
            RouteMethods::AnyProxy => {
                let proxy_id = format!("{route_id}Proxy");
                template.add(
                    &proxy_id,
                    &ApiResource {
                        rest_api_id: rest_api_id.clone(),
                        parent_id: Expr::reference(&resource_id),
                        path_part: "{proxy+}".to_string(),
                    },
                )?;

                let method_id = format!("{route_id}ProxyAny");
                template.add(
                    &method_id,
                    &proxy_any_method(&rest_api_id, Expr::reference(&proxy_id), &nlb_dns, route),
                )?;
                method_ids.push(method_id);

                let preflight_id = format!("{route_id}ProxyPreflight");
                template.add(
                    &preflight_id,
                    &cors_preflight(&rest_api_id, Expr::reference(&proxy_id)),
                )?;
                method_ids.push(preflight_id);
            }
            RouteMethods::Get => {
                let method_id = format!("{route_id}Get");
                template.add(
                    &method_id,
                    &exact_get_method(&rest_api_id, Expr::reference(&resource_id), &nlb_dns, route),
                )?;
                method_ids.push(method_id);

                let preflight_id = format!("{route_id}Preflight");
                template.add(
                    &preflight_id,
                    &cors_preflight(&rest_api_id, Expr::reference(&resource_id)),
                )?;
                method_ids.push(preflight_id);
            }
        }
    }

    // A deployment only picks up methods that exist when it is created.
    let deployment = template.add(
        "Deployment",
        &Deployment {
            rest_api_id: rest_api_id.clone(),
            description: None,
        },
    )?;
    for method_id in &method_ids {
        deployment.depends_on(method_id);
    }

    template.add(
        "Stage",
        &Stage {
            rest_api_id: rest_api_id.clone(),
            deployment_id: Expr::reference("Deployment"),
            stage_name: IDENTITY_AUTH_STAGE_NAME.to_string(),
            tags: tags.clone(),
        },
    )?;

    template.add(
        "ApiDomain",
        &DomainName {
            domain_name: host.clone(),
            regional_certificate_arn: Some(Expr::from(acm_arn)),
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
        &RecordSet::api_alias(&host, &zone.zone_id, "ApiDomain"),
    )?;

    template.add_output(
        "RestApiId",
        Output {
            description: None,
            value: Expr::reference("RestApi"),
        },
    );
    template.add_output(
        "Endpoint",
        Output {
            description: Some("Public endpoint of the identity API".to_string()),
            value: Expr::from(format!("https://{host}")),
        },
    );

    Ok(Some(template))
}

/// Ensures an API resource exists for every segment of `path` and returns
/// the logical id of the deepest one.
fn ensure_resource_chain(
    template: &mut Template,
    rest_api_id: &Expr,
    root_id: &Expr,
    path: &str,
    created: &mut BTreeMap<String, String>,
) -> Result<String, SynthError> {
    let mut parent = root_id.clone();
    let mut walked = String::new();
    let mut last_id = String::new();

    for segment in path.split('/') {
        if !walked.is_empty() {
            walked.push('/');
        }
        walked.push_str(segment);

        let id = match created.get(&walked) {
            Some(id) => id.clone(),
            None => {
                let id = format!("{}Resource", logical_id(&walked));
                template.add(
                    &id,
                    &ApiResource {
                        rest_api_id: rest_api_id.clone(),
                        parent_id: parent.clone(),
                        path_part: segment.to_string(),
                    },
                )?;
                created.insert(walked.clone(), id.clone());
                id
            }
        };
        parent = Expr::reference(&id);
        last_id = id;
    }

    Ok(last_id)
}

/// The 200 response every identity method exposes; the service sets the CORS
/// origin header itself, the gateway only has to let it through.
fn identity_method_responses() -> Vec<MethodResponse> {
    vec![MethodResponse {
        status_code: "200".to_string(),
        response_models: BTreeMap::from([("application/json".to_string(), "Empty".to_string())]),
        response_parameters: BTreeMap::from([(
            "method.response.header.Access-Control-Allow-Origin".to_string(),
            true,
        )]),
    }]
}

fn route_authorization(route: &RouteSpec) -> (AuthorizationType, Option<Expr>) {
    if route.requires_auth {
        (
            AuthorizationType::CognitoUserPools,
            Some(Expr::reference("Authorizer")),
        )
    } else {
        (AuthorizationType::None, None)
    }
}

/// ANY on the greedy child, forwarding the caught path suffix to the service
/// and keying the cache on it.
fn proxy_any_method(
    rest_api_id: &Expr,
    resource_id: Expr,
    nlb_dns: &str,
    route: &RouteSpec,
) -> Method {
    let (authorization_type, authorizer_id) = route_authorization(route);
    Method {
        rest_api_id: rest_api_id.clone(),
        resource_id,
        http_method: "ANY".to_string(),
        authorization_type,
        authorizer_id,
        api_key_required: None,
        request_parameters: BTreeMap::from([("method.request.path.proxy".to_string(), true)]),
        method_responses: identity_method_responses(),
        integration: Some(Integration {
            integration_type: IntegrationType::HttpProxy,
            integration_http_method: Some("ANY".to_string()),
            uri: Some(format!(
                "http://{nlb_dns}:{NLB_VPCLINK_ID_PORT}/{}/{{proxy}}",
                route.path
            )),
            connection_type: Some(ConnectionType::VpcLink),
            connection_id: Some(Expr::reference("VpcLink")),
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

/// GET on the exact path, no greedy forwarding.
fn exact_get_method(
    rest_api_id: &Expr,
    resource_id: Expr,
    nlb_dns: &str,
    route: &RouteSpec,
) -> Method {
    let (authorization_type, authorizer_id) = route_authorization(route);
    Method {
        rest_api_id: rest_api_id.clone(),
        resource_id,
        http_method: "GET".to_string(),
        authorization_type,
        authorizer_id,
        api_key_required: None,
        request_parameters: BTreeMap::new(),
        method_responses: identity_method_responses(),
        integration: Some(Integration {
            integration_type: IntegrationType::HttpProxy,
            integration_http_method: Some("GET".to_string()),
            uri: Some(format!(
                "http://{nlb_dns}:{NLB_VPCLINK_ID_PORT}/{}",
                route.path
            )),
            connection_type: Some(ConnectionType::VpcLink),
            connection_id: Some(Expr::reference("VpcLink")),
            integration_responses: vec![IntegrationResponse {
                status_code: "200".to_string(),
                response_parameters: BTreeMap::new(),
                response_templates: BTreeMap::new(),
            }],
            ..Integration::default()
        }),
    }
}

/// OPTIONS preflight answered by the gateway itself. Origins, headers and
/// methods are all wide open; the identity service does its own filtering.
fn cors_preflight(rest_api_id: &Expr, resource_id: Expr) -> Method {
    let cors_headers = [
        "method.response.header.Access-Control-Allow-Headers",
        "method.response.header.Access-Control-Allow-Methods",
        "method.response.header.Access-Control-Allow-Origin",
    ];
    Method {
        rest_api_id: rest_api_id.clone(),
        resource_id,
        http_method: "OPTIONS".to_string(),
        authorization_type: AuthorizationType::None,
        authorizer_id: None,
        api_key_required: None,
        request_parameters: BTreeMap::new(),
        method_responses: vec![MethodResponse {
            status_code: "200".to_string(),
            response_models: BTreeMap::new(),
            response_parameters: cors_headers
                .iter()
                .map(|header| (header.to_string(), true))
                .collect(),
        }],
        integration: Some(Integration {
            integration_type: IntegrationType::Mock,
            request_templates: BTreeMap::from([(
                "application/json".to_string(),
                "{ \"statusCode\": 200 }".to_string(),
            )]),
            integration_responses: vec![IntegrationResponse {
                status_code: "200".to_string(),
                response_parameters: cors_headers
                    .iter()
                    .map(|header| (header.to_string(), "'*'".to_string()))
                    .collect(),
                response_templates: BTreeMap::new(),
            }],
            ..Integration::default()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{dev_env, prod_env};
    use serde_json::{json, Value};

    const TEST_ARN: &str =
        "arn:aws:elasticloadbalancing:ap-south-1:123456789012:loadbalancer/net/test/aa11bb22cc33";
    const TEST_DNS: &str = "id-nlb.internal.example";
    const TEST_CERT: &str = "arn:aws:acm:ap-southeast-1:123456789012:certificate/test";

    fn registry() -> NlbArnRegistry {
        NlbArnRegistry {
            dev: BTreeMap::from([("dev".to_string(), TEST_ARN.to_string())]),
            qa: TEST_ARN.to_string(),
        }
    }

    fn seeded_ctx() -> ContextCache {
        let mut ctx = ContextCache::new();
        ctx.record_dns_name(TEST_ARN, TEST_DNS);
        ctx
    }

    fn props() -> IdentityApiProps {
        IdentityApiProps {
            user_pool_arn: "arn:aws:cognito-idp:ap-southeast-1:123456789012:userpool/test"
                .to_string(),
        }
    }

    fn build_qa() -> Template {
        build(
            &dev_env(),
            "qa",
            TEST_CERT,
            &props(),
            &registry(),
            &seeded_ctx(),
        )
        .unwrap()
        .unwrap()
    }

    fn properties<'a>(template: &'a Template, id: &str) -> &'a Value {
        &template.resource(id).unwrap().properties
    }

    // ==================== Resolution Outcomes ====================

    #[test]
    fn test_unconfigured_environment_builds_nothing() {
        let built = build(
            &dev_env(),
            "sandbox",
            TEST_CERT,
            &props(),
            &registry(),
            &seeded_ctx(),
        )
        .unwrap();
        assert!(built.is_none());
    }

    #[test]
    fn test_resolved_nlb_without_cached_dns_is_an_error() {
        let err = build(
            &dev_env(),
            "qa",
            TEST_CERT,
            &props(),
            &registry(),
            &ContextCache::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SynthError::MissingContext { arn } if arn == TEST_ARN));
    }

    // ==================== Gateway Wiring ====================

    #[test]
    fn test_vpc_link_targets_the_resolved_nlb() {
        let template = build_qa();
        let link = properties(&template, "VpcLink");
        assert_eq!(link["Name"], "sin-id-d1-qa-app-api");
        assert_eq!(link["TargetArns"], json!([TEST_ARN]));
        assert_eq!(properties(&template, "RestApi")["Name"], "sin-id-d1-qa-api");
    }

    #[test]
    fn test_proxy_routes_forward_the_caught_suffix() {
        let template = build_qa();
        for (id, path) in [
            ("CredentialsProxyAny", "credentials"),
            ("OidcProxyAny", "oidc"),
            ("Oauth2ProxyAny", "oauth2"),
        ] {
            let method = properties(&template, id);
            assert_eq!(method["HttpMethod"], "ANY");
            assert_eq!(
                method["Integration"]["Uri"],
                format!("http://{TEST_DNS}:8080/{path}/{{proxy}}")
            );
            assert_eq!(method["Integration"]["ConnectionType"], "VPC_LINK");
            assert_eq!(
                method["Integration"]["ConnectionId"],
                json!({ "Ref": "VpcLink" })
            );
            assert_eq!(
                method["Integration"]["RequestParameters"]["integration.request.path.proxy"],
                "method.request.path.proxy"
            );
            assert_eq!(
                method["Integration"]["CacheKeyParameters"],
                json!(["method.request.path.proxy"])
            );
            assert_eq!(method["RequestParameters"]["method.request.path.proxy"], true);
        }
    }

    #[test]
    fn test_user_reads_hit_exact_paths() {
        let template = build_qa();
        let user = properties(&template, "Oauth2UserGet");
        assert_eq!(
            user["Integration"]["Uri"],
            format!("http://{TEST_DNS}:8080/oauth2/user")
        );
        assert!(user["Integration"].get("CacheKeyParameters").is_none());

        let timetemp = properties(&template, "Oauth2UserTimetempGet");
        assert_eq!(
            timetemp["Integration"]["Uri"],
            format!("http://{TEST_DNS}:8080/oauth2/user/timetemp")
        );
    }

    #[test]
    fn test_only_user_reads_require_the_authorizer() {
        let template = build_qa();
        let mut authorized: Vec<&str> = Vec::new();
        for (id, resource) in template.resources_of_type("AWS::ApiGateway::Method") {
            if resource.properties["AuthorizationType"] == "COGNITO_USER_POOLS" {
                assert_eq!(
                    resource.properties["AuthorizerId"],
                    json!({ "Ref": "Authorizer" })
                );
                authorized.push(id);
            } else {
                assert_eq!(resource.properties["AuthorizationType"], "NONE");
            }
        }
        assert_eq!(authorized, ["Oauth2UserGet", "Oauth2UserTimetempGet"]);

        let authorizer = properties(&template, "Authorizer");
        assert_eq!(authorizer["Name"], "qa-id-auth-pool");
        assert_eq!(
            authorizer["IdentitySource"],
            "method.request.header.id-token"
        );
    }

    #[test]
    fn test_every_route_gets_a_preflight() {
        let template = build_qa();
        let preflights: Vec<&str> = template
            .resources_of_type("AWS::ApiGateway::Method")
            .filter(|(_, r)| r.properties["HttpMethod"] == "OPTIONS")
            .map(|(id, _)| id)
            .collect();
        assert_eq!(preflights.len(), IDENTITY_ROUTES.len());

        let preflight = properties(&template, "CredentialsProxyPreflight");
        assert_eq!(preflight["Integration"]["Type"], "MOCK");
        assert_eq!(
            preflight["Integration"]["IntegrationResponses"][0]["ResponseParameters"]
                ["method.response.header.Access-Control-Allow-Origin"],
            "'*'"
        );
        assert_eq!(preflight["AuthorizationType"], "NONE");
    }

    #[test]
    fn test_nested_routes_reuse_parent_resources() {
        let template = build_qa();
        let resources: Vec<&str> = template
            .resources_of_type("AWS::ApiGateway::Resource")
            .map(|(id, _)| id)
            .collect();
        // three trees + their proxies + the two nested user paths
        assert_eq!(resources.len(), 8);
        assert_eq!(
            properties(&template, "Oauth2UserResource")["ParentId"],
            json!({ "Ref": "Oauth2Resource" })
        );
        assert_eq!(
            properties(&template, "Oauth2UserTimetempResource")["ParentId"],
            json!({ "Ref": "Oauth2UserResource" })
        );
    }

    #[test]
    fn test_deployment_waits_for_every_method() {
        let template = build_qa();
        let deployment = template.resource("Deployment").unwrap();
        let methods = template
            .resources_of_type("AWS::ApiGateway::Method")
            .count();
        assert_eq!(deployment.depends_on.len(), methods);

        let stage = properties(&template, "Stage");
        assert_eq!(stage["StageName"], "AuthStage");
        assert_eq!(stage["DeploymentId"], json!({ "Ref": "Deployment" }));
    }

    // ==================== DNS And Domain ====================

    #[test]
    fn test_dev_stage_publishes_under_the_delegated_zone() {
        let template = build_qa();
        assert_eq!(
            properties(&template, "ApiDomain")["DomainName"],
            "id-qa.dev.simflexcloud.com"
        );
        let record = properties(&template, "ApiAliasRecord");
        assert_eq!(record["Name"], "id-qa.dev.simflexcloud.com.");
        assert_eq!(record["HostedZoneId"], "ZONEIDSIMFLEXDEV");
        assert!(record.get("TTL").is_none());
    }

    #[test]
    fn test_other_stages_publish_under_the_production_zone() {
        let template = build(
            &prod_env(),
            "qa",
            TEST_CERT,
            &props(),
            &registry(),
            &seeded_ctx(),
        )
        .unwrap()
        .unwrap();
        let record = properties(&template, "ApiAliasRecord");
        assert_eq!(record["Name"], "id-qa.simflexcloud.com.");
        assert_eq!(record["HostedZoneId"], "ZONEIDSIMFLEXCLOUD");
        assert_eq!(
            template.output("Endpoint").unwrap().value,
            Expr::from("https://id-qa.simflexcloud.com")
        );
    }

    #[test]
    fn test_domain_uses_the_supplied_certificate() {
        let template = build_qa();
        let domain = properties(&template, "ApiDomain");
        assert_eq!(domain["RegionalCertificateArn"], TEST_CERT);
        assert_eq!(domain["EndpointConfiguration"]["Types"], json!(["REGIONAL"]));
        let mapping = properties(&template, "ApiMapping");
        assert_eq!(mapping["Stage"], json!({ "Ref": "Stage" }));
    }

    // ==================== Route Table ====================

    #[test]
    fn test_route_table_shape_is_fixed() {
        assert_eq!(IDENTITY_ROUTES.len(), 5);
        let authorized: Vec<&str> = IDENTITY_ROUTES
            .iter()
            .filter(|r| r.requires_auth)
            .map(|r| r.path)
            .collect();
        assert_eq!(authorized, ["oauth2/user", "oauth2/user/timetemp"]);
        for route in IDENTITY_ROUTES.iter().filter(|r| r.requires_auth) {
            assert_eq!(route.methods, RouteMethods::Get);
        }
    }
}
