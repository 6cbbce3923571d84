// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use clap::Parser;
use simflex_synth::app::{self, App};
use simflex_synth::configuration::{SynthCommand, SynthOptions};
use simflex_synth::context::ContextCache;
use simflex_synth::elb;
use simflex_synth::endpoint::NlbArnRegistry;
use simflex_synth::errors::SynthError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SynthError> {
    println!("[synth] init");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        // synthesis runs locally, so keep the human-readable format but drop
        // the module targets that say nothing at this scale
        .with_target(false)
        .init();

    // get configuration options from flags and environment variables
    let options = SynthOptions::parse();

    tracing::info!("[synth] {:?}", &options);

    let registry = NlbArnRegistry::builtin();

    match options.command {
        SynthCommand::Synth => {
            let ctx = ContextCache::load(&options.context_file)?;
            if ctx.is_empty() {
                tracing::warn!(
                    "[synth] context file {} is empty, identity stacks will fail to build",
                    options.context_file.display()
                );
            }
            let application = App::build(&options, &registry, &ctx)?;
            let report = application.synth()?;
            tracing::info!(
                "[synth] wrote {} file(s), skipped {} environment(s)",
                report.written.len(),
                report.skipped.len()
            );
        }
        SynthCommand::RefreshContext => {
            let arns = app::resolved_nlb_arns(&options, &registry)?;
            if arns.is_empty() {
                tracing::warn!("[synth] nothing to look up for stage {:?}", options.stage);
                return Ok(());
            }
            let mut ctx = ContextCache::load(&options.context_file)?;
            let recorded = elb::refresh_dns_names(&arns, &mut ctx).await?;
            ctx.save(&options.context_file)?;
            tracing::info!(
                "[synth] recorded {} DNS name(s) into {}",
                recorded,
                options.context_file.display()
            );
        }
    }

    Ok(())
}
