// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Simflex Synth
//!
//! Template synthesizer for the simflexcloud API edge.
//!
//! This crate turns the per-stage configuration into CloudFormation
//! templates for the identity API gateways and the FastAPI edge, plus a
//! manifest the deployment tooling consumes. Synthesis is deterministic and
//! offline; everything that has to be looked up from AWS lives in a cached
//! context file maintained by a separate subcommand.
//!
//! ## Architecture
//!
//! ```text
//! stage config -+-> endpoint resolution -> identity_api -+-> templates
//!               |        (NLB registry)                  |
//!               +-> fastapi ----------------------------+-> manifest.json
//!                        ^
//!                        |
//! synth.context.json <- refresh-context <- DescribeLoadBalancers
//! ```
//!
//! The synthesizer provides:
//!
//! - **Endpoint Resolution**: layered NLB selection per identity environment,
//!   where "nothing configured" skips the environment instead of failing
//! - **Identity Gateways**: one REST API per environment behind a VPC link,
//!   with Cognito-authorized user reads and wide-open CORS preflights
//! - **FastAPI Edge**: the keyed backend proxy with its worker Lambda
//! - **Context Refresh**: the only AWS-calling path, caching NLB DNS names
//!
//! ## Modules
//!
//! - [`app`]: stack assembly, template files and the manifest
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: stage tokens, registries and naming constants
//! - [`context`]: the cached provider-lookup file
//! - [`elb`]: DescribeLoadBalancers support for `refresh-context`
//! - [`endpoint`]: identity NLB resolution
//! - [`environment`]: per-stage configs and hosted-zone selection
//! - [`errors`]: synthesis error types
//! - [`fastapi`]: the FastAPI edge stack
//! - [`identity_api`]: the per-environment identity gateway stacks
//! - [`tagging`]: the standard stack tag set
//!
//! ## Usage
//!
//! ```bash
//! simflex-synth --stage d1 refresh-context
//! simflex-synth --stage d1 --out-dir out synth
//! ```

pub mod app;
pub mod configuration;
pub mod constants;
pub mod context;
pub mod elb;
pub mod endpoint;
pub mod environment;
pub mod errors;
pub mod fastapi;
pub mod identity_api;
pub mod tagging;
