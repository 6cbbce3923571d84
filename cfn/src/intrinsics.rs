// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use serde::Serialize;

/// A string-valued template expression: either a literal known at synthesis
/// time or an intrinsic the deployment engine resolves at deploy time.
///
/// Serialization follows the CloudFormation JSON forms:
/// a literal stays a bare string, `Ref` becomes `{"Ref": id}`,
/// `GetAtt` becomes `{"Fn::GetAtt": [id, attribute]}` and
/// `Sub` becomes `{"Fn::Sub": text}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Expr {
    Lit(String),
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: [String; 2],
    },
    Sub {
        #[serde(rename = "Fn::Sub")]
        text: String,
    },
}

impl Expr {
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Expr::Ref {
            logical_id: logical_id.into(),
        }
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Expr::GetAtt {
            target: [logical_id.into(), attribute.into()],
        }
    }

    pub fn sub(text: impl Into<String>) -> Self {
        Expr::Sub { text: text.into() }
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Lit(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Lit(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_serializes_as_bare_string() {
        let value = serde_json::to_value(Expr::from("plain")).unwrap();
        assert_eq!(value, json!("plain"));
    }

    #[test]
    fn test_reference_serializes_as_ref_object() {
        let value = serde_json::to_value(Expr::reference("RestApi")).unwrap();
        assert_eq!(value, json!({ "Ref": "RestApi" }));
    }

    #[test]
    fn test_get_att_serializes_as_pair() {
        let value = serde_json::to_value(Expr::get_att("ApiDomain", "RegionalDomainName")).unwrap();
        assert_eq!(
            value,
            json!({ "Fn::GetAtt": ["ApiDomain", "RegionalDomainName"] })
        );
    }

    #[test]
    fn test_sub_serializes_with_intrinsic_key() {
        let value = serde_json::to_value(Expr::sub("${AWS::Region}")).unwrap();
        assert_eq!(value, json!({ "Fn::Sub": "${AWS::Region}" }));
    }
}
