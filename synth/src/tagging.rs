// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::collections::BTreeMap;

use crate::constants::{
    PROJECT_OWNER, TAG_LOCATION, TAG_OWNER, TAG_SERVICE, TAG_STACK_NAME, TAG_STAGE,
};
use crate::environment::EnvironmentConfig;

/// The standard tag set carried by every stack. Cost reporting filters on
/// these keys, so they stay stable even where the values look redundant.
pub fn service_tags(service: &str, cfg: &EnvironmentConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            TAG_STACK_NAME.to_string(),
            format!("{}-{}-{}-{}", cfg.pattern, PROJECT_OWNER, cfg.stage, service),
        ),
        (TAG_SERVICE.to_string(), service.to_string()),
        (TAG_LOCATION.to_string(), cfg.pattern.clone()),
        (TAG_OWNER.to_string(), cfg.owner.clone()),
        (TAG_STAGE.to_string(), cfg.stage.clone()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::dev_env;

    #[test]
    fn test_tags_carry_the_full_stack_name() {
        let tags = service_tags("fastapi", &dev_env());
        assert_eq!(
            tags.get("cdk:stack-name").map(String::as_str),
            Some("sin-simflexcloud-d1-fastapi")
        );
        assert_eq!(tags.get("service").map(String::as_str), Some("fastapi"));
        assert_eq!(tags.get("location").map(String::as_str), Some("sin"));
        assert_eq!(tags.get("owner").map(String::as_str), Some("development"));
        assert_eq!(tags.get("stage").map(String::as_str), Some("d1"));
    }
}
