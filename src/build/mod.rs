//! Native build orchestration
//!
//! ```text
//! forge CLI → commands → build/pipeline.rs → git / CMake (direct)
//! ```
//!
//! ## Modules
//!
//! - `pipeline` - generate/build/release/package/run state machine
//! - `cmake` - CMake configure and build invocations
//! - `archive` - in-memory ZIP creation
//! - `gitignore` - idempotent .gitignore patching

pub mod archive;
pub mod cmake;
pub mod gitignore;
pub mod pipeline;

pub use cmake::BuildType;
pub use pipeline::Pipeline;
