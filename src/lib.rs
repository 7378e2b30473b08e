//! slice2ts: TypeScript declarations for ZeroC Ice Slice definitions.
//!
//! The work is split across crates that this one re-exports:
//!
//! * [`common`] - identifier escaping, qualified names, module paths
//! * [`syntax`] - declaration trees, the parser interface and the loader
//! * [`binder`] - the module scope tree and type resolution
//! * [`emitter`] - import planning and `.d.ts` / `.js` generation
//!
//! [`pipeline`] strings them together for callers that want generated text
//! in memory rather than files on disk (the `slice2ts` binary lives in the
//! `slice2ts-cli` crate).

pub use slice2ts_binder as binder;
pub use slice2ts_common as common;
pub use slice2ts_emitter as emitter;
pub use slice2ts_syntax as syntax;

pub use slice2ts_binder::{TypeScope, build_scope};
pub use slice2ts_emitter::{GenerateContext, TypingsOptions, generate_typings};
pub use slice2ts_syntax::{JsonTreeParser, SliceParser, SourceFiles, load_modules};

pub mod pipeline;
pub use pipeline::{GeneratedFile, PipelineError, PipelineOutput, generate};
