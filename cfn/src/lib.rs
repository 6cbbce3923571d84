// Copyright SimflexCloud Pte. Ltd. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Typed CloudFormation template model.
//!
//! Only the resource types and properties the simflexcloud platform actually
//! emits are modeled here; this is not a general CloudFormation binding.

pub mod apigateway;
pub mod certificatemanager;
pub mod iam;
pub mod intrinsics;
pub mod lambda;
pub mod logs;
pub mod route53;
pub mod template;

pub use template::TemplateError;
