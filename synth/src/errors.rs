// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use simflex_cfn::TemplateError;

#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    #[error("unknown stage {0:?}, expected one of d1, s1, p1")]
    UnknownStage(String),
    #[error("no DNS name cached for {arn}, run `simflex-synth refresh-context` first")]
    MissingContext { arn: String },
    #[error("not an elasticloadbalancing ARN: {0}")]
    InvalidArn(String),
    #[error("load balancer lookup failed: {0}")]
    Lookup(String),
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_input() {
        let err = SynthError::UnknownStage("q9".to_string());
        assert!(err.to_string().contains("q9"));

        let err = SynthError::MissingContext {
            arn: "arn:aws:elasticloadbalancing:x".to_string(),
        };
        assert!(err.to_string().contains("refresh-context"));
        assert!(err.to_string().contains("arn:aws:elasticloadbalancing:x"));
    }
}
