use std::collections::HashMap;

use bitflags::bitflags;

use crate::error::{AsmError, Result};
use crate::types::{Build, Endian, Instance};

use super::opcode::{operands, Opcode, OperandKind};

bitflags! {
    /// Layout-relevant feature bits of a GSC engine variant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Props: u32 {
        /// Token ids are 32-bit (else 16-bit).
        const TOK4 = 1 << 0;
        /// Inline string ids are 32-bit (else 16-bit).
        const STR4 = 1 << 1;
        /// Function and field identifiers are 64-bit hashes; no token
        /// spill is written to the stack.
        const HASH = 1 << 2;
        /// Far calls carry hashed path and name pairs in the stack
        /// segment instead of token ids.
        const FARCALL = 1 << 3;
        /// Local-call displacements shift by 8 bits before packing.
        const OFFS8 = 1 << 4;
        /// Local-call displacements shift by 9 bits before packing.
        const OFFS9 = 1 << 5;
        /// Append the instance's script extension to unresolved
        /// far-call paths.
        const EXTENSION = 1 << 6;
    }
}

/// Engine generation tag. `Iw9` selects the deviant switch-table
/// case encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engine {
    Iw6,
    Iw9,
}

/// Everything that varies between GSC engine variants, resolved to
/// plain data; see [`super::engine`] for the constructors.
pub struct Context {
    endian: Endian,
    props: Props,
    engine: Engine,
    instance: Instance,
    build: Build,
    code_map: HashMap<Opcode, u8>,
    code_map_rev: HashMap<u8, Opcode>,
    token_map: HashMap<&'static str, u32>,
    func_map: HashMap<&'static str, u16>,
    meth_map: HashMap<&'static str, u16>,
    str_count: u32,
    hash_basis: u64,
    hash_prime: u64,
}

impl Context {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn with_tables(
        props: Props,
        engine: Engine,
        endian: Endian,
        instance: Instance,
        build: Build,
        code_list: &[(u8, Opcode)],
        token_list: &[(&'static str, u32)],
        func_list: &[(&'static str, u16)],
        meth_list: &[(&'static str, u16)],
        str_count: u32,
        hash_basis: u64,
        hash_prime: u64,
    ) -> Self {
        let mut code_map = HashMap::with_capacity(code_list.len());
        let mut code_map_rev = HashMap::with_capacity(code_list.len());

        for &(id, op) in code_list {
            code_map.insert(op, id);
            code_map_rev.insert(id, op);
        }

        Self {
            endian,
            props,
            engine,
            instance,
            build,
            code_map,
            code_map_rev,
            token_map: token_list.iter().copied().collect(),
            func_map: func_list.iter().copied().collect(),
            meth_map: meth_list.iter().copied().collect(),
            str_count,
            hash_basis,
            hash_prime,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn props(&self) -> Props {
        self.props
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn instance(&self) -> Instance {
        self.instance
    }

    pub fn build(&self) -> Build {
        self.build
    }

    /// Highest interned string id; token ids above it need a literal
    /// spill in the stack segment.
    pub fn str_count(&self) -> u32 {
        self.str_count
    }

    pub fn opcode_id(&self, op: Opcode) -> Result<u8> {
        self.code_map
            .get(&op)
            .copied()
            .ok_or_else(|| AsmError::UnknownOpcode(op.to_string()))
    }

    pub fn opcode_from_id(&self, id: u8) -> Result<Opcode> {
        self.code_map_rev
            .get(&id)
            .copied()
            .ok_or_else(|| AsmError::UnknownOpcode(format!("{id:#04X}")))
    }

    pub fn opcode_name(&self, op: Opcode) -> String {
        op.to_string()
    }

    /// Instruction byte count under this variant's widths. Variable
    /// length opcodes (switch tables, formal parameter lists) report
    /// their fixed prefix.
    pub fn opcode_size(&self, op: Opcode) -> Result<usize> {
        self.opcode_id(op)?;

        let tok_width = if self.props.contains(Props::TOK4) { 4 } else { 2 };
        let str_width = if self.props.contains(Props::STR4) { 4 } else { 2 };

        Ok(match operands(op) {
            OperandKind::None => 1,
            OperandKind::U8 => 2,
            OperandKind::U16 => 3,
            OperandKind::U32 | OperandKind::I32 | OperandKind::F32 | OperandKind::HashHex32 => 5,
            OperandKind::I64 | OperandKind::HashHex64 => 9,
            OperandKind::Vec3 => 13,
            OperandKind::StringId => 1 + str_width,
            OperandKind::Anim => 1 + 2 * str_width,
            OperandKind::AnimTree => 2,
            OperandKind::CreateVar => {
                if self.props.contains(Props::HASH) {
                    9
                } else {
                    2
                }
            }
            OperandKind::FieldId => {
                if self.props.contains(Props::HASH) {
                    9
                } else {
                    1 + tok_width
                }
            }
            OperandKind::CallLocal { thread } => 4 + usize::from(thread),
            OperandKind::CallFar { thread } => {
                let base = if self.props.contains(Props::FARCALL) { 5 } else { 4 };
                base + usize::from(thread)
            }
            OperandKind::Builtin { args, .. } => 3 + usize::from(args),
            OperandKind::JumpCond | OperandKind::JumpBack => 3,
            OperandKind::Jump | OperandKind::Switch => 5,
            OperandKind::SwitchTable => 3,
            OperandKind::Params => 2,
        })
    }

    /// Interned token id, 0 when the identifier is not in the table.
    pub fn token_id(&self, name: &str) -> u32 {
        self.token_map.get(name).copied().unwrap_or(0)
    }

    pub fn func_id(&self, name: &str) -> u16 {
        self.func_map
            .get(name)
            .copied()
            .unwrap_or_else(|| name.parse().unwrap_or(0))
    }

    pub fn meth_id(&self, name: &str) -> u16 {
        self.meth_map
            .get(name)
            .copied()
            .unwrap_or_else(|| name.parse().unwrap_or(0))
    }

    /// 64-bit FNV-1a over the lowercased identifier; `_id_` / `var_`
    /// hex literals pass through unhashed.
    pub fn hash_id(&self, name: &str) -> u64 {
        if let Some(hex) = name
            .strip_prefix("_id_")
            .or_else(|| name.strip_prefix("var_"))
        {
            if let Ok(v) = u64::from_str_radix(hex, 16) {
                return v;
            }
        }

        self.fnv1a(name.bytes())
    }

    /// Path hash: separators are normalized before hashing.
    pub fn path_id(&self, path: &str) -> u64 {
        if let Some(hex) = path.strip_prefix("_id_") {
            if let Ok(v) = u64::from_str_radix(hex, 16) {
                return v;
            }
        }

        self.fnv1a(path.bytes().map(|b| if b == b'\\' { b'/' } else { b }))
    }

    fn fnv1a(&self, bytes: impl Iterator<Item = u8>) -> u64 {
        let mut hash = self.hash_basis;
        for b in bytes {
            hash = (hash ^ u64::from(b.to_ascii_lowercase())).wrapping_mul(self.hash_prime);
        }
        hash & 0x7FFF_FFFF_FFFF_FFFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iw6() -> Context {
        super::super::engine::iw6::context(Instance::Server, Build::Prod)
    }

    fn iw9() -> Context {
        super::super::engine::iw9::context(Instance::Server, Build::Prod)
    }

    #[test]
    fn unknown_token_is_zero() {
        assert_eq!(iw6().token_id("definitely_not_interned"), 0);
    }

    #[test]
    fn opcode_round_trip() {
        let ctx = iw6();
        let id = ctx.opcode_id(Opcode::GetString).unwrap();
        assert_eq!(ctx.opcode_from_id(id).unwrap(), Opcode::GetString);
        assert_eq!(ctx.opcode_name(Opcode::GetString), "GetString");
    }

    #[test]
    fn hash_literal_passthrough() {
        let ctx = iw9();
        assert_eq!(ctx.hash_id("_id_1234abcd"), 0x1234_ABCD);
        assert_eq!(ctx.path_id("_id_ff"), 0xFF);
    }

    #[test]
    fn path_hash_normalizes_separators() {
        let ctx = iw9();
        assert_eq!(
            ctx.path_id("maps\\mp\\utility.gsc"),
            ctx.path_id("maps/mp/utility.gsc")
        );
    }

    #[test]
    fn widths_follow_props() {
        assert_eq!(iw6().opcode_size(Opcode::GetString).unwrap(), 3);
        assert_eq!(iw9().opcode_size(Opcode::GetString).unwrap(), 5);
        assert_eq!(iw6().opcode_size(Opcode::GetAnimation).unwrap(), 5);
        assert_eq!(iw9().opcode_size(Opcode::GetAnimation).unwrap(), 9);
        assert_eq!(iw6().opcode_size(Opcode::EvalFieldVariable).unwrap(), 3);
        assert_eq!(iw9().opcode_size(Opcode::EvalFieldVariable).unwrap(), 9);
    }
}
