use serde::{Deserialize, Serialize};

/// Byte order of every multi-byte integer an engine variant reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Which half of the engine the script targets. Decides the default
/// file extension appended to unresolved far-call paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instance {
    Server,
    Client,
}

/// Build profile. Dev blocks and the dev-map stream are only emitted
/// for the matching profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Build {
    Prod,
    DevBlocks,
    DevMaps,
    Dev,
}

impl Build {
    pub fn has_dev_blocks(self) -> bool {
        matches!(self, Build::DevBlocks | Build::Dev)
    }

    pub fn has_dev_maps(self) -> bool {
        matches!(self, Build::DevMaps | Build::Dev)
    }
}

/// Source position an instruction was compiled from; copied into the
/// dev-map next to the instruction's emission offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl Pos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Case discriminator inside a switch table, as encoded in the
/// `EndSwitch` operand list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchKind {
    None = 0,
    Integer = 1,
    String = 2,
}

impl SwitchKind {
    pub fn from_u32(v: u32) -> Self {
        match v {
            1 => SwitchKind::Integer,
            2 => SwitchKind::String,
            _ => SwitchKind::None,
        }
    }
}
