use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Result};
use crate::types::{Pos, SwitchKind};

use super::opcode::Opcode;

/// Input listing for one script. The compiler fills every `index` and
/// `size` before handing the listing over; GSC instruction sizes are
/// static per variant, so the assembler re-walks them as given.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Assembly {
    pub includes: Vec<String>,
    pub functions: Vec<Function>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    /// Interned token id of the name; 0 means the literal name is
    /// written to the stack segment instead.
    pub id: u32,
    pub params: u8,
    pub flags: u8,
    pub size: usize,
    /// Byte offset of the function's first instruction in the script
    /// stream.
    pub index: usize,
    pub labels: HashMap<usize, String>,
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: Opcode,
    #[serde(default)]
    pub pos: Pos,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub size: usize,
    /// Textual operands, encoding defined per opcode.
    #[serde(default)]
    pub data: Vec<String>,
}

impl Instruction {
    pub fn new(opcode: Opcode, data: Vec<String>) -> Self {
        Self {
            opcode,
            pos: Pos::default(),
            index: 0,
            size: 0,
            data,
        }
    }

    pub(crate) fn malformed(&self, detail: impl Into<String>) -> AsmError {
        AsmError::MalformedOperand {
            opcode: self.opcode.to_string(),
            index: self.index,
            detail: detail.into(),
        }
    }

    pub(crate) fn arg(&self, i: usize) -> Result<&str> {
        self.data
            .get(i)
            .map(String::as_str)
            .ok_or_else(|| self.malformed(format!("missing operand {i}")))
    }

    pub(crate) fn arg_int<T: FromStr>(&self, i: usize) -> Result<T> {
        let raw = self.arg(i)?;
        raw.parse()
            .map_err(|_| self.malformed(format!("expected integer, got {raw:?}")))
    }

    pub(crate) fn arg_f32(&self, i: usize) -> Result<f32> {
        let raw = self.arg(i)?;
        raw.parse()
            .map_err(|_| self.malformed(format!("expected float, got {raw:?}")))
    }

    pub(crate) fn arg_hex_u32(&self, i: usize) -> Result<u32> {
        let raw = self.arg(i)?;
        u32::from_str_radix(raw.trim_start_matches("0x"), 16)
            .map_err(|_| self.malformed(format!("expected hex literal, got {raw:?}")))
    }

    pub(crate) fn arg_hex_u64(&self, i: usize) -> Result<u64> {
        let raw = self.arg(i)?;
        u64::from_str_radix(raw.trim_start_matches("0x"), 16)
            .map_err(|_| self.malformed(format!("expected hex literal, got {raw:?}")))
    }
}

/// Parsed view of an `EndSwitch` operand list; one head slot plus four
/// slots per case, `default` entries leaving their trailing two slots
/// unused.
pub(crate) enum SwitchEntry<'a> {
    Case {
        kind: SwitchKind,
        value: &'a str,
        label: &'a str,
    },
    Default {
        label: &'a str,
    },
}

pub(crate) fn switch_entries(inst: &Instruction) -> Result<Vec<SwitchEntry<'_>>> {
    let count: usize = inst.arg_int(0)?;
    let mut entries = Vec::with_capacity(count);

    for i in 0..count {
        let base = 1 + 4 * i;
        match inst.arg(base)? {
            "case" => entries.push(SwitchEntry::Case {
                kind: SwitchKind::from_u32(inst.arg_int(base + 1)?),
                value: inst.arg(base + 2)?,
                label: inst.arg(base + 3)?,
            }),
            "default" => entries.push(SwitchEntry::Default {
                label: inst.arg(base + 1)?,
            }),
            other => return Err(inst.malformed(format!("invalid switch case {other}"))),
        }
    }

    Ok(entries)
}
