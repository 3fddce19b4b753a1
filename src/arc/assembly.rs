use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AsmError, Result};
use crate::types::{Pos, SwitchKind};

use super::opcode::Opcode;

/// Input listing for one script: its includes and its functions, in
/// the order the compiler produced them. The assembler only mutates
/// the `index` / `size` / `labels` fields it relocates during layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Assembly {
    pub includes: Vec<String>,
    pub functions: Vec<Function>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: u8,
    pub flags: u8,
    /// Total byte size of the function body; recomputed by layout.
    #[serde(default)]
    pub size: usize,
    /// Byte offset of the first instruction inside the code segment;
    /// filled by layout.
    #[serde(default)]
    pub index: usize,
    /// Label name keyed by the instruction offset it marks. Keys are
    /// rewritten to the final offsets during layout.
    #[serde(default)]
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
}

/// Distinguishes user-visible string literals from canonical
/// identifier strings in the fixup table's type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKind {
    Literal = 0,
    Canonical = 1,
}

/// One exported function, emitted into the exports table.
#[derive(Clone, Debug)]
pub struct ExportRef {
    pub checksum: u32,
    pub offset: u32,
    pub name: String,
    pub space: String,
    pub params: u8,
    pub flags: u8,
}

/// Dedup key for the import collector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ImportKey {
    pub space: String,
    pub name: String,
    pub params: u8,
    pub flags: u8,
}

/// Animtree entry: bare tree references plus the per-animation
/// reference pairs hanging off the same tree name.
#[derive(Clone, Debug, Default)]
pub(crate) struct AnimtreeUses {
    pub refs: Vec<u32>,
    pub anims: Vec<(String, u32)>,
}

/// Parsed view of an `EndSwitch` operand list. The textual layout is
/// one head slot plus four slots per case; `default` entries leave
/// their two trailing slots unused.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arg_accessors_report_the_opcode() {
        let inst = Instruction::new(Opcode::GetInteger, vec!["nope".into()]);
        let err = inst.arg_int::<i32>(0).unwrap_err();
        assert!(err.to_string().contains("GetInteger"));

        let err = inst.arg(3).unwrap_err();
        assert!(matches!(err, AsmError::MalformedOperand { .. }));
    }

    #[test]
    fn switch_entries_reject_bad_heads() {
        let inst = Instruction::new(
            Opcode::EndSwitch,
            vec!["1".into(), "neither".into(), "".into(), "".into(), "".into()],
        );
        assert!(switch_entries(&inst).is_err());
    }

    #[test]
    fn switch_entries_stride_four_with_default() {
        let inst = Instruction::new(
            Opcode::EndSwitch,
            vec![
                "2".into(),
                "case".into(),
                "1".into(),
                "5".into(),
                "L5".into(),
                "default".into(),
                "LD".into(),
                String::new(),
                String::new(),
            ],
        );
        let entries = switch_entries(&inst).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries[0],
            SwitchEntry::Case {
                kind: SwitchKind::Integer,
                value: "5",
                label: "L5"
            }
        ));
        assert!(matches!(entries[1], SwitchEntry::Default { label: "LD" }));
    }
}
