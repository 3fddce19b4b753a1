//! ARC script family: header-and-segment script images with a string
//! pool, fixup tables and an optional dev-map side table.

pub mod assembler;
pub mod assembly;
pub mod context;
pub mod engine;
pub mod opcode;

pub use assembler::Assembler;
pub use assembly::{Assembly, ExportRef, Function, Instruction, StringKind};
pub use context::{Context, Props};
pub use opcode::Opcode;
