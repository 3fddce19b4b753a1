use thiserror::Error;

/// Errors surfaced while assembling. All of them are terminal for the
/// `assemble()` call that produced them; the assembler never retries
/// or emits partial output.
#[derive(Debug, Error)]
pub enum AsmError {
    /// The opcode tag has no byte value in the engine's table.
    #[error("unknown opcode {0}")]
    UnknownOpcode(String),

    /// A jump or switch case names a label that is not in the current
    /// function's label map.
    #[error("couldn't resolve label address of {0}")]
    UnresolvedLabel(String),

    /// A fixup asked for a string that was never added to the pool.
    #[error("couldn't resolve string address of {0}")]
    UnresolvedString(String),

    /// A local call names a function that is not in the listing.
    #[error("couldn't resolve local function address of {0}")]
    UnresolvedFunction(String),

    /// Operand count or format inconsistent with the opcode.
    #[error("malformed operand for {opcode} at index {index:#06X}: {detail}")]
    MalformedOperand {
        opcode: String,
        index: usize,
        detail: String,
    },

    /// A write would extend past the writer's configured capacity.
    #[error("write of {want} bytes at {at} exceeds buffer capacity {cap}")]
    BufferOverflow { at: usize, want: usize, cap: usize },
}

pub type Result<T> = std::result::Result<T, AsmError>;
