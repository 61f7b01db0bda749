#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! apigen: generate a typed TypeScript client from a declarative API contract.
//!
//! The core (`codegen`) is a pure, synchronous transform from a contract
//! document to one TypeScript artifact. Retrieval (`fetch`), argument
//! parsing (`cli`), and persistence are the asynchronous shell around it.

pub mod cli;
pub mod codegen;
pub mod error;
pub mod fetch;

pub use codegen::{generate, ContractDocument};
pub use error::GenerateError;
