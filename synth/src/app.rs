// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Assembly of stacks into an output directory.
//!
//! `build` is pure: it turns configuration plus cached context into
//! in-memory templates. `synth` is the only place that touches the
//! filesystem, writing one `<stack>.template.json` per stack and a
//! `manifest.json` the deployment tooling consumes.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;

use serde::Serialize;

use simflex_cfn::template::Template;

use crate::configuration::SynthOptions;
use crate::constants::{FASTAPI_SERVICE, IDENTITY_ENVIRONMENTS, IDENTITY_SERVICE, PROJECT_OWNER};
use crate::context::ContextCache;
use crate::endpoint::{resolve_nlb_arn, NlbArnRegistry, Resolution};
use crate::environment::{environment_for_stage, identity_zone_for_stage, EnvironmentConfig};
use crate::errors::SynthError;
use crate::fastapi;
use crate::identity_api::{self, IdentityApiProps};
use crate::tagging::service_tags;

pub const MANIFEST_VERSION: u32 = 1;

/// One synthesized stack with its deployment target.
#[derive(Debug)]
pub struct StackArtifact {
    pub name: String,
    pub template: Template,
    pub account: String,
    pub region: String,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct App {
    out_dir: PathBuf,
    stacks: Vec<StackArtifact>,
    skipped: Vec<String>,
}

/// What a `synth` run produced.
pub struct SynthReport {
    pub written: Vec<PathBuf>,
    /// Identity environments skipped because no NLB is configured for them.
    pub skipped: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    version: u32,
    stacks: Vec<ManifestStack<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestStack<'a> {
    name: &'a str,
    template_file: String,
    account: &'a str,
    region: &'a str,
    tags: &'a BTreeMap<String, String>,
}

impl App {
    /// Builds every stack of the selected stage. Identity environments that
    /// resolve to no NLB are skipped and reported, not failed.
    pub fn build(
        options: &SynthOptions,
        registry: &NlbArnRegistry,
        ctx: &ContextCache,
    ) -> Result<App, SynthError> {
        let cfg = environment_for_stage(&options.stage)
            .ok_or_else(|| SynthError::UnknownStage(options.stage.clone()))?;

        let mut stacks = Vec::new();
        let mut skipped = Vec::new();

        stacks.push(StackArtifact {
            name: format!(
                "{}-{}-{}-{}",
                cfg.pattern, PROJECT_OWNER, cfg.stage, FASTAPI_SERVICE
            ),
            template: fastapi::build(&cfg)?,
            account: cfg.account.clone(),
            region: cfg.region.clone(),
            tags: service_tags(FASTAPI_SERVICE, &cfg),
        });

        let zone = identity_zone_for_stage(&cfg.stage);
        for (env_name, user_pool_arn) in selected_identity_environments(options) {
            let props = IdentityApiProps {
                user_pool_arn: user_pool_arn.to_string(),
            };
            match identity_api::build(
                &cfg,
                env_name,
                &zone.certificate_arn,
                &props,
                registry,
                ctx,
            )? {
                Some(template) => stacks.push(StackArtifact {
                    name: format!(
                        "{}-{}-{}-{}",
                        cfg.pattern, IDENTITY_SERVICE, cfg.stage, env_name
                    ),
                    template,
                    account: cfg.account.clone(),
                    region: cfg.region.clone(),
                    tags: service_tags(IDENTITY_SERVICE, &cfg),
                }),
                None => {
                    tracing::warn!(
                        "[synth] no identity NLB configured for {:?}, skipping its stack",
                        env_name
                    );
                    skipped.push(env_name.to_string());
                }
            }
        }

        Ok(App {
            out_dir: options.out_dir.clone(),
            stacks,
            skipped,
        })
    }

    pub fn stacks(&self) -> &[StackArtifact] {
        &self.stacks
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Writes the templates and the manifest.
    pub fn synth(&self) -> Result<SynthReport, SynthError> {
        fs::create_dir_all(&self.out_dir)?;

        let mut written = Vec::with_capacity(self.stacks.len() + 1);
        let mut manifest_stacks = Vec::with_capacity(self.stacks.len());

        for stack in &self.stacks {
            let template_file = format!("{}.template.json", stack.name);
            let path = self.out_dir.join(&template_file);
            let mut raw = stack.template.to_json_pretty()?;
            raw.push('\n');
            fs::write(&path, raw)?;
            tracing::info!("[synth] wrote {}", path.display());
            written.push(path);

            manifest_stacks.push(ManifestStack {
                name: &stack.name,
                template_file,
                account: &stack.account,
                region: &stack.region,
                tags: &stack.tags,
            });
        }

        let manifest = Manifest {
            version: MANIFEST_VERSION,
            stacks: manifest_stacks,
        };
        let manifest_path = self.out_dir.join("manifest.json");
        let mut raw = serde_json::to_string_pretty(&manifest)?;
        raw.push('\n');
        fs::write(&manifest_path, raw)?;
        tracing::info!("[synth] wrote {}", manifest_path.display());
        written.push(manifest_path);

        Ok(SynthReport {
            written,
            skipped: self.skipped.clone(),
        })
    }
}

/// Every distinct NLB ARN the selected environments resolve to; this is the
/// work list for `refresh-context`.
pub fn resolved_nlb_arns(
    options: &SynthOptions,
    registry: &NlbArnRegistry,
) -> Result<Vec<String>, SynthError> {
    let cfg: EnvironmentConfig = environment_for_stage(&options.stage)
        .ok_or_else(|| SynthError::UnknownStage(options.stage.clone()))?;

    let mut arns = BTreeSet::new();
    for (env_name, _) in selected_identity_environments(options) {
        if let Resolution::Resolved(arn) = resolve_nlb_arn(env_name, &cfg, registry) {
            arns.insert(arn);
        }
    }
    Ok(arns.into_iter().collect())
}

fn selected_identity_environments(options: &SynthOptions) -> Vec<(&'static str, &'static str)> {
    if options.env_names.is_empty() {
        return IDENTITY_ENVIRONMENTS.to_vec();
    }
    for requested in &options.env_names {
        if !IDENTITY_ENVIRONMENTS
            .iter()
            .any(|(env, _)| *env == requested.as_str())
        {
            tracing::warn!("[synth] unknown identity environment {:?}, ignoring", requested);
        }
    }
    IDENTITY_ENVIRONMENTS
        .iter()
        .copied()
        .filter(|(env, _)| options.env_names.iter().any(|r| r.as_str() == *env))
        .collect()
}
