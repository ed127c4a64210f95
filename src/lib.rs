//! # Azure SQL MCP Server
//!
//! A Model Context Protocol (MCP) server for Azure SQL and resource group
//! management.
//!
//! This crate provides:
//! - **Tools**: Create and list resource groups, SQL servers, and databases
//! - **Resources**: Subscription info and the server inventory
//! - **Prompts**: Database creation guidance with tier recommendations
//!
//! ## Architecture
//!
//! Every tool is a thin pass-through to the Azure Resource Manager control
//! plane. The structured core is the credential/session lifecycle: a
//! credential and two management client handles are resolved exactly once at
//! startup into an immutable [`context::AzureContext`], which every concurrent
//! tool invocation shares read-only. Failures never crash the server - they
//! are returned in-band as text results.

pub mod azure;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod format;
pub mod handlers;
pub mod ops;
pub mod prompts;
pub mod resources;
pub mod server;
pub mod tools;

pub use config::Config;
pub use context::AzureContext;
pub use error::{FailureKind, OpFailure, ServerError};
pub use server::AzureSqlMcpServer;
