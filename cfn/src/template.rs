// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::intrinsics::Expr;

pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// Property struct that serializes into the `Properties` block of a
/// CloudFormation resource of type [`CfnResource::TYPE`].
pub trait CfnResource: Serialize {
    const TYPE: &'static str;
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("duplicate logical id {0:?}")]
    DuplicateLogicalId(String),
    #[error("serializing properties of {logical_id:?} failed: {source}")]
    Properties {
        logical_id: String,
        source: serde_json::Error,
    },
}

/// Resource envelope as it appears under `Resources` in the template.
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties")]
    pub properties: Value,
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Resource {
    /// Adds an explicit creation ordering edge; returns `self` for chaining.
    pub fn depends_on(&mut self, logical_id: impl Into<String>) -> &mut Self {
        self.depends_on.push(logical_id.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Output {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Value")]
    pub value: Expr,
}

/// A single CloudFormation template.
///
/// Resources and outputs are kept in [`BTreeMap`]s so serialization order is
/// stable and synthesized files diff cleanly between runs.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Template {
            format_version: TEMPLATE_FORMAT_VERSION.to_string(),
            description: Some(description.into()),
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Adds a typed resource under `logical_id` and returns the stored
    /// envelope so the caller can attach `DependsOn` edges.
    ///
    /// Logical ids must be unique within a template; a second resource under
    /// the same id is always a construction bug, never a merge.
    pub fn add<R: CfnResource>(
        &mut self,
        logical_id: impl Into<String>,
        properties: &R,
    ) -> Result<&mut Resource, TemplateError> {
        let logical_id = logical_id.into();
        if self.resources.contains_key(&logical_id) {
            return Err(TemplateError::DuplicateLogicalId(logical_id));
        }
        let properties =
            serde_json::to_value(properties).map_err(|source| TemplateError::Properties {
                logical_id: logical_id.clone(),
                source,
            })?;
        let envelope = Resource {
            resource_type: R::TYPE.to_string(),
            properties,
            depends_on: Vec::new(),
        };
        Ok(self.resources.entry(logical_id).or_insert(envelope))
    }

    pub fn add_output(&mut self, name: impl Into<String>, output: Output) {
        self.outputs.insert(name.into(), output);
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.get(logical_id)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources.iter().map(|(id, r)| (id.as_str(), r))
    }

    /// All resources of one CloudFormation type, in logical-id order.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Resource)> {
        self.resources()
            .filter(move |(_, r)| r.resource_type == resource_type)
    }

    pub fn output(&self, name: &str) -> Option<&Output> {
        self.outputs.get(name)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Tag {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Tag list in deterministic key order.
pub fn tags_from(map: &BTreeMap<String, String>) -> Vec<Tag> {
    map.iter().map(|(k, v)| Tag::new(k, v)).collect()
}

/// Derives a CloudFormation logical id from a path-like name.
///
/// Logical ids may only contain alphanumerics, so every separator run is
/// dropped and the character after it upper-cased:
/// `oauth2/user/timetemp` becomes `Oauth2UserTimetemp`.
pub fn logical_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut upper_next = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next {
                id.push(c.to_ascii_uppercase());
                upper_next = false;
            } else {
                id.push(c);
            }
        } else {
            upper_next = true;
        }
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Widget {
        #[serde(rename = "Name")]
        name: String,
    }

    impl CfnResource for Widget {
        const TYPE: &'static str = "AWS::Test::Widget";
    }

    // ==================== Logical Ids ====================

    #[test]
    fn test_logical_id_strips_separators() {
        assert_eq!(logical_id("oauth2/user/timetemp"), "Oauth2UserTimetemp");
        assert_eq!(logical_id("sin-id-d1-qa"), "SinIdD1Qa");
        assert_eq!(logical_id("credentials"), "Credentials");
    }

    #[test]
    fn test_logical_id_keeps_inner_digits() {
        assert_eq!(logical_id("api/v1"), "ApiV1");
        assert_eq!(logical_id("oauth2"), "Oauth2");
    }

    // ==================== Template Construction ====================

    #[test]
    fn test_add_rejects_duplicate_logical_id() {
        let mut template = Template::new("test");
        let widget = Widget {
            name: "one".to_string(),
        };
        template.add("Widget", &widget).unwrap();
        let err = template.add("Widget", &widget).unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateLogicalId(id) if id == "Widget"));
    }

    #[test]
    fn test_template_serializes_envelope_and_depends_on() {
        let mut template = Template::new("widgets");
        template
            .add(
                "First",
                &Widget {
                    name: "a".to_string(),
                },
            )
            .unwrap();
        template
            .add(
                "Second",
                &Widget {
                    name: "b".to_string(),
                },
            )
            .unwrap()
            .depends_on("First");

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Resources"]["First"]["Type"], "AWS::Test::Widget");
        assert_eq!(value["Resources"]["First"]["Properties"]["Name"], "a");
        assert!(value["Resources"]["First"].get("DependsOn").is_none());
        assert_eq!(value["Resources"]["Second"]["DependsOn"], json!(["First"]));
    }

    #[test]
    fn test_outputs_are_omitted_when_empty() {
        let template = Template::new("empty");
        let value = serde_json::to_value(&template).unwrap();
        assert!(value.get("Outputs").is_none());

        let mut template = Template::new("one output");
        template.add_output(
            "Endpoint",
            Output {
                description: None,
                value: Expr::from("https://example.com"),
            },
        );
        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["Outputs"]["Endpoint"]["Value"], "https://example.com");
    }

    #[test]
    fn test_resources_serialize_in_logical_id_order() {
        let mut template = Template::new("ordered");
        for id in ["Zulu", "Alpha", "Mike"] {
            template
                .add(
                    id,
                    &Widget {
                        name: id.to_string(),
                    },
                )
                .unwrap();
        }
        let raw = template.to_json_pretty().unwrap();
        let alpha = raw.find("\"Alpha\"").unwrap();
        let mike = raw.find("\"Mike\"").unwrap();
        let zulu = raw.find("\"Zulu\"").unwrap();
        assert!(alpha < mike && mike < zulu);
    }
}
