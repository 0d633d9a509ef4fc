//! LuneType (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can use `lunetype::{core,input,runtime,term,types}`.

pub use lunetype_core as core;
pub use lunetype_input as input;
pub use lunetype_runtime as runtime;
pub use lunetype_term as term;
pub use lunetype_types as types;
