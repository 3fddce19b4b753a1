use std::collections::HashMap;

use bitflags::bitflags;

use crate::error::{AsmError, Result};
use crate::types::{Build, Endian, Instance};

use super::opcode::{operands, Opcode};

bitflags! {
    /// Layout-relevant feature bits of an ARC engine variant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Props: u32 {
        /// 64-byte header region reserved at file start.
        const HEADER64 = 1 << 0;
        /// 72-byte header region (adds the dev-string fixup fields).
        const HEADER72 = 1 << 1;
        /// No reserved header region at all.
        const HEADERXX = 1 << 2;
        /// Name and animation id fields widen to 4/8 bytes.
        const SIZE64 = 1 << 3;
        /// Exports and imports carry 32-bit name hashes instead of
        /// string pool offsets.
        const HASHIDS = 1 << 4;
        /// A second, dev-only string fixup table replaces the regular
        /// one in the header accounting.
        const DEVSTR = 1 << 5;
    }
}

/// Everything that varies between ARC engine variants, resolved to
/// plain data. Constructed once per variant (see [`super::engine`])
/// and shared read-only across assemblers.
pub struct Context {
    endian: Endian,
    magic: u64,
    props: Props,
    instance: Instance,
    build: Build,
    code_map: HashMap<Opcode, u16>,
    code_map_rev: HashMap<u16, Opcode>,
    hash_basis: u32,
    hash_prime: u32,
}

impl Context {
    pub(crate) fn with_tables(
        props: Props,
        endian: Endian,
        instance: Instance,
        build: Build,
        magic: u64,
        code_list: &[(u16, Opcode)],
        hash_basis: u32,
        hash_prime: u32,
    ) -> Self {
        let mut code_map = HashMap::with_capacity(code_list.len());
        let mut code_map_rev = HashMap::with_capacity(code_list.len());

        for &(id, op) in code_list {
            code_map.insert(op, id);
            code_map_rev.insert(id, op);
        }

        Self {
            endian,
            magic,
            props,
            instance,
            build,
            code_map,
            code_map_rev,
            hash_basis,
            hash_prime,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn magic(&self) -> u64 {
        self.magic
    }

    pub fn props(&self) -> Props {
        self.props
    }

    pub fn instance(&self) -> Instance {
        self.instance
    }

    pub fn build(&self) -> Build {
        self.build
    }

    /// Engine byte value for an opcode tag.
    pub fn opcode_id(&self, op: Opcode) -> Result<u16> {
        self.code_map
            .get(&op)
            .copied()
            .ok_or_else(|| AsmError::UnknownOpcode(op.to_string()))
    }

    pub fn opcode_from_id(&self, id: u16) -> Result<Opcode> {
        self.code_map_rev
            .get(&id)
            .copied()
            .ok_or_else(|| AsmError::UnknownOpcode(format!("{id:#04X}")))
    }

    /// Baseline byte count of an instruction, before alignment
    /// padding.
    pub fn opcode_size(&self, op: Opcode) -> Result<usize> {
        self.opcode_id(op)?;
        Ok(operands(op).base_size())
    }

    pub fn opcode_name(&self, op: Opcode) -> String {
        op.to_string()
    }

    /// Bytes reserved for the file header before any segment.
    pub fn header_size(&self) -> usize {
        if self.props.contains(Props::HEADERXX) {
            0
        } else if self.props.contains(Props::HEADER72) {
            72
        } else {
            64
        }
    }

    /// FNV-1a over the lowercased identifier, parameterized by the
    /// variant's basis and prime.
    pub fn hash_id(&self, name: &str) -> u32 {
        let mut hash = self.hash_basis;
        for b in name.bytes() {
            hash = (hash ^ u32::from(b.to_ascii_lowercase())).wrapping_mul(self.hash_prime);
        }
        hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Context {
        super::super::engine::t7::context(Instance::Server, Build::Prod)
    }

    #[test]
    fn opcode_round_trip() {
        let ctx = ctx();
        let id = ctx.opcode_id(Opcode::GetString).unwrap();
        assert_eq!(ctx.opcode_from_id(id).unwrap(), Opcode::GetString);
        assert_eq!(ctx.opcode_name(Opcode::GetString), "GetString");
    }

    #[test]
    fn missing_opcode_id_is_unknown_opcode() {
        let ctx = ctx();
        let err = ctx.opcode_from_id(0xFFFF).unwrap_err();
        assert!(matches!(err, AsmError::UnknownOpcode(_)));
    }

    #[test]
    fn baseline_sizes() {
        let ctx = ctx();
        assert_eq!(ctx.opcode_size(Opcode::Return).unwrap(), 1);
        assert_eq!(ctx.opcode_size(Opcode::GetByte).unwrap(), 2);
        assert_eq!(ctx.opcode_size(Opcode::JumpOnFalse).unwrap(), 3);
        assert_eq!(ctx.opcode_size(Opcode::GetVector).unwrap(), 13);
        assert_eq!(ctx.opcode_size(Opcode::ScriptFunctionCall).unwrap(), 6);
    }

    #[test]
    fn hash_is_case_insensitive() {
        let ctx = ctx();
        assert_eq!(ctx.hash_id("Main"), ctx.hash_id("main"));
        assert_ne!(ctx.hash_id("main"), ctx.hash_id("init"));
    }

    #[test]
    fn header_region_follows_props() {
        let ctx = ctx();
        assert_eq!(ctx.header_size(), 64);
        assert_eq!(ctx.instance(), Instance::Server);

        let t9 = super::super::engine::t9::context(Instance::Client, Build::Prod);
        assert_eq!(t9.header_size(), 72);
    }
}
