// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct SynthOptions {
    /// Stage token: d1, s1 or p1
    #[arg(long, default_value = "d1", env("SYNTH_STAGE"))]
    pub stage: String,
    /// Identity environments to include; all built-in ones when omitted
    #[arg(long = "env-name")]
    pub env_names: Vec<String>,
    #[arg(long, default_value = "out", env("SYNTH_OUT_DIR"))]
    pub out_dir: PathBuf,
    #[arg(long, default_value = "synth.context.json", env("SYNTH_CONTEXT_FILE"))]
    pub context_file: PathBuf,
    #[command(subcommand)]
    pub command: SynthCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum SynthCommand {
    /// Write the stage's templates and manifest to the output directory
    Synth,
    /// Look up NLB DNS names and rewrite the context file
    RefreshContext,
}

impl Default for SynthOptions {
    fn default() -> Self {
        SynthOptions {
            stage: "d1".to_string(),
            env_names: Vec::new(),
            out_dir: PathBuf::from("out"),
            context_file: PathBuf::from("synth.context.json"),
            command: SynthCommand::Synth,
        }
    }
}
