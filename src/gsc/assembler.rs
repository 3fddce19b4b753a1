use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{AsmError, Result};
use crate::types::{Endian, Instance, SwitchKind};
use crate::util::CodeWriter;

use super::assembly::{switch_entries, Assembly, Function, Instruction, SwitchEntry};
use super::context::{Context, Engine, Props};
use super::opcode::{operands, Opcode, OperandKind};

/// Single-pass assembler for the GSC family.
///
/// GSC instruction sizes are static per variant and the compiler
/// hands the listing over with `index` / `size` / `labels` already
/// final, so there is no layout pass: one walk writes the script
/// stream and, interleaved with it, the stack segment holding every
/// literal the placeholders in the script refer to. A sentinel `End`
/// opcode byte occupies script offset 0.
pub struct Assembler<'a> {
    ctx: &'a Context,
    script: CodeWriter,
    stack: CodeWriter,
    devmap: CodeWriter,
    devmap_count: u32,
}

impl<'a> Assembler<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            script: CodeWriter::new(ctx.endian()),
            stack: CodeWriter::new(ctx.endian()),
            // The dev-map side table is little-endian on every target.
            devmap: CodeWriter::new(Endian::Little),
            devmap_count: 0,
        }
    }

    /// Assembles one listing into script, stack and dev-map streams.
    /// All per-input state is reset first, so an assembler can be
    /// reused across inputs.
    pub fn assemble(&mut self, data: &Assembly) -> Result<(Vec<u8>, Vec<u8>, Vec<u8>)> {
        self.script.clear();
        self.stack.clear();
        self.devmap.clear();
        self.devmap_count = 0;

        debug!("assembling {} functions", data.functions.len());

        self.devmap.seek(4)?;
        let end = self.ctx.opcode_id(Opcode::End)?;
        self.script.write_u8(end)?;

        for func in &data.functions {
            self.assemble_function(data, func)?;
        }

        let dev_end = self.devmap.pos();
        self.devmap.set_pos(0)?;
        self.devmap.write_u32(self.devmap_count)?;
        self.devmap.set_pos(dev_end)?;

        let script = std::mem::replace(&mut self.script, CodeWriter::new(self.ctx.endian()));
        let stack = std::mem::replace(&mut self.stack, CodeWriter::new(self.ctx.endian()));
        let devmap = std::mem::replace(&mut self.devmap, CodeWriter::new(Endian::Little));
        Ok((script.into_vec(), stack.into_vec(), devmap.into_vec()))
    }

    fn assemble_function(&mut self, data: &Assembly, func: &Function) -> Result<()> {
        trace!(
            "function {} at {:#06X}, {} bytes",
            func.name,
            func.index,
            func.size
        );

        self.stack.write_u32(func.size as u32)?;

        if self.ctx.props().contains(Props::HASH) {
            self.stack.write_u64(self.ctx.hash_id(&func.name))?;
        } else {
            if self.ctx.props().contains(Props::TOK4) {
                self.stack.write_u32(func.id)?;
            } else {
                self.stack.write_u16(func.id as u16)?;
            }

            if func.id == 0 {
                let name = decode_literal(&func.name)
                    .ok_or_else(|| AsmError::UnresolvedString(func.name.clone()))?;
                self.stack.write_cstr(&name)?;
            }
        }

        for inst in &func.instructions {
            self.emit_instruction(data, func, inst)?;
        }

        Ok(())
    }

    fn emit_instruction(
        &mut self,
        data: &Assembly,
        func: &Function,
        inst: &Instruction,
    ) -> Result<()> {
        self.script.write_u8(self.ctx.opcode_id(inst.opcode)?)?;

        if self.ctx.build().has_dev_maps() {
            self.devmap.write_u32(self.script.pos() as u32)?;
            self.devmap.write_u16(inst.pos.line as u16)?;
            self.devmap.write_u16(inst.pos.column as u16)?;
            self.devmap_count += 1;
        }

        match operands(inst.opcode) {
            OperandKind::None => {}
            OperandKind::U8 => {
                self.script.write_u8(inst.arg_int::<i64>(0)? as u8)?;
            }
            OperandKind::U16 => {
                self.script.write_u16(inst.arg_int::<i64>(0)? as u16)?;
            }
            OperandKind::U32 => {
                self.script.write_u32(inst.arg_int::<i64>(0)? as u32)?;
            }
            OperandKind::I32 => {
                self.script.write_i32(inst.arg_int(0)?)?;
            }
            OperandKind::I64 => {
                self.script.write_i64(inst.arg_int(0)?)?;
            }
            OperandKind::F32 => {
                self.script.write_f32(inst.arg_f32(0)?)?;
            }
            OperandKind::Vec3 => {
                // Vector constants are only aligned on big-endian
                // targets.
                let align = if self.ctx.endian() == Endian::Little { 1 } else { 4 };
                self.script.align(align)?;
                self.script.write_f32(inst.arg_f32(0)?)?;
                self.script.write_f32(inst.arg_f32(1)?)?;
                self.script.write_f32(inst.arg_f32(2)?)?;
            }
            OperandKind::StringId => {
                if self.ctx.props().contains(Props::STR4) {
                    self.script.write_u32(0)?;
                } else {
                    self.script.write_u16(0)?;
                }
                self.write_stack_literal(inst, inst.arg(0)?)?;
            }
            OperandKind::Anim => {
                if self.ctx.props().contains(Props::STR4) {
                    self.script.write_u64(0)?;
                } else {
                    self.script.write_u32(0)?;
                }
                self.write_stack_literal(inst, inst.arg(0)?)?;
                self.write_stack_literal(inst, inst.arg(1)?)?;
            }
            OperandKind::AnimTree => {
                self.script.write_u8(0)?;
                self.write_stack_literal(inst, inst.arg(0)?)?;
            }
            OperandKind::HashHex32 => {
                self.script.write_u32(inst.arg_hex_u32(0)?)?;
            }
            OperandKind::HashHex64 => {
                self.script.write_u64(inst.arg_hex_u64(0)?)?;
            }
            OperandKind::CreateVar => {
                if self.ctx.props().contains(Props::HASH) {
                    self.script.write_u64(self.ctx.hash_id(inst.arg(0)?))?;
                } else {
                    self.script.write_u8(inst.arg_int::<i64>(0)? as u8)?;
                }
            }
            OperandKind::FieldId => self.emit_field(inst)?,
            OperandKind::CallLocal { thread } => self.emit_call_local(data, inst, thread)?,
            OperandKind::CallFar { thread } => self.emit_call_far(data, inst, thread)?,
            OperandKind::Builtin { method, args } => self.emit_call_builtin(inst, method, args)?,
            OperandKind::JumpCond => {
                let target = resolve_label(&func.labels, inst.arg(0)?)?;
                let disp = target as i64 - inst.index as i64 - 3;
                self.script.write_i16(disp as i16)?;
            }
            OperandKind::JumpBack => {
                let target = resolve_label(&func.labels, inst.arg(0)?)?;
                let disp = (inst.index as i64 + 3) - target as i64;
                self.script.write_i16(disp as i16)?;
            }
            OperandKind::Jump => {
                let target = resolve_label(&func.labels, inst.arg(0)?)?;
                let disp = target as i64 - inst.index as i64 - 5;
                self.script.write_i32(disp as i32)?;
            }
            OperandKind::Switch => {
                let target = resolve_label(&func.labels, inst.arg(0)?)?;
                let disp = target as i64 - inst.index as i64 - 4;
                self.script.write_i32(disp as i32)?;
            }
            OperandKind::SwitchTable => self.emit_switch_table(func, inst)?,
            OperandKind::Params => {
                let count: usize = inst.arg_int(0)?;
                self.script.write_u8(count as u8)?;

                for i in 1..=count {
                    if self.ctx.props().contains(Props::HASH) {
                        self.script.write_u64(self.ctx.hash_id(inst.arg(i)?))?;
                    } else {
                        self.script.write_u8(inst.arg_int::<i64>(i)? as u8)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Field access: a 64-bit name hash, or a token id with the
    /// literal name spilled to the stack when the id is not interned.
    fn emit_field(&mut self, inst: &Instruction) -> Result<()> {
        let name = inst.arg(0)?;

        if self.ctx.props().contains(Props::HASH) {
            return self.script.write_u64(self.ctx.hash_id(name));
        }

        let mut id = self.ctx.token_id(name);
        if id == 0 {
            id = 0xFFFF_FFFF;
        }

        if self.ctx.props().contains(Props::TOK4) {
            self.script.write_u32(id)?;
        } else {
            self.script.write_u16(id as u16)?;
        }

        if id > self.ctx.str_count() {
            if self.ctx.props().contains(Props::TOK4) {
                self.stack.write_u32(0)?;
            } else {
                self.stack.write_u16(0)?;
            }
            self.write_stack_literal(inst, name)?;
        }

        Ok(())
    }

    fn emit_call_local(&mut self, data: &Assembly, inst: &Instruction, thread: bool) -> Result<()> {
        let target = resolve_function(data, inst.arg(0)?)?;
        self.emit_offset(target as i32 - inst.index as i32 - 1)?;

        if thread {
            self.script.write_u8(inst.arg_int::<i64>(1)? as u8)?;
        }

        Ok(())
    }

    fn emit_call_far(&mut self, data: &Assembly, inst: &Instruction, thread: bool) -> Result<()> {
        if self.ctx.props().contains(Props::FARCALL) {
            return self.emit_call_far_hashed(data, inst, thread);
        }

        let path = inst.arg(0)?;
        let name = inst.arg(1)?;
        let file_id = self.ctx.token_id(path);
        let func_id = self.ctx.token_id(name);

        if self.ctx.props().contains(Props::TOK4) {
            self.stack.write_u32(file_id)?;
        } else {
            self.stack.write_u16(file_id as u16)?;
        }

        if file_id == 0 {
            if self.ctx.props().contains(Props::EXTENSION) {
                let full = format!("{}{}", path, self.extension());
                self.write_stack_literal(inst, &full)?;
            } else {
                self.write_stack_literal(inst, path)?;
            }
        }

        if self.ctx.props().contains(Props::TOK4) {
            self.stack.write_u32(func_id)?;
        } else {
            self.stack.write_u16(func_id as u16)?;
        }

        if func_id == 0 {
            self.write_stack_literal(inst, name)?;
        }

        self.script.write_u8(0)?;
        self.script.write_u16(0)?;

        if thread {
            self.script.write_u8(inst.arg_int::<i64>(2)? as u8)?;
        }

        Ok(())
    }

    /// Far call under `FARCALL`: the script holds a zero placeholder
    /// (or the resolved displacement for calls that stayed in this
    /// script) and the stack holds the hashed path/name pair.
    fn emit_call_far_hashed(
        &mut self,
        data: &Assembly,
        inst: &Instruction,
        thread: bool,
    ) -> Result<()> {
        let path = inst.arg(0)?;
        let name = inst.arg(1)?;

        if path.is_empty() {
            let target = resolve_function(data, name)?;
            self.script
                .write_i32(target as i32 - inst.index as i32 - 1)?;
            self.stack.write_u64(0)?;
            self.stack.write_u64(0)?;
        } else {
            let mut full = path.to_string();
            if !full.starts_with("_id_") {
                full.push_str(self.extension());
            }

            self.script.write_u32(0)?;
            self.stack.write_u64(self.ctx.path_id(&full))?;
            self.stack.write_u64(self.ctx.hash_id(name))?;
        }

        if thread {
            self.script.write_u8(inst.arg_int::<i64>(2)? as u8)?;
        }

        Ok(())
    }

    fn emit_call_builtin(&mut self, inst: &Instruction, method: bool, args: bool) -> Result<()> {
        if args {
            self.script.write_u8(inst.arg_int::<i64>(1)? as u8)?;
        }

        if self.ctx.props().contains(Props::HASH) {
            let marker = format!("#xS{:x}", self.ctx.hash_id(inst.arg(0)?));
            self.stack.write_cstr(marker.as_bytes())?;
            self.script.write_u16(0)?;
        } else {
            let name = inst.arg(0)?;
            let id = if method {
                self.ctx.meth_id(name)
            } else {
                self.ctx.func_id(name)
            };
            self.script.write_u16(id)?;
        }

        Ok(())
    }

    fn emit_switch_table(&mut self, func: &Function, inst: &Instruction) -> Result<()> {
        let entries = switch_entries(inst)?;
        let iw9 = self.ctx.engine() == Engine::Iw9;
        let mut index = inst.index + 3;

        self.script.write_u16(entries.len() as u16)?;

        for (i, entry) in entries.iter().enumerate() {
            match entry {
                SwitchEntry::Case { kind, value, label } => {
                    if *kind == SwitchKind::Integer {
                        let v: i32 = value
                            .parse()
                            .map_err(|_| inst.malformed(format!("case value {value:?}")))?;
                        if iw9 {
                            self.script.write_u32(v as u32)?;
                        } else {
                            self.script
                                .write_u32((v & 0x00FF_FFFF) as u32 | 0x0080_0000)?;
                        }
                    } else {
                        self.script.write_u32(if iw9 { 0 } else { i as u32 + 1 })?;
                        self.write_stack_literal(inst, value)?;
                    }

                    let addr = resolve_label(&func.labels, label)?;
                    let disp = addr as i64 - index as i64 - 4;

                    if iw9 {
                        self.script.write_i16(disp as i16)?;
                        self.script.write_u8(0xFF)?;
                        self.script.write_u8(*kind as u8)?;
                        index += 8;
                    } else {
                        self.emit_offset(disp as i32)?;
                        index += 7;
                    }
                }
                SwitchEntry::Default { label } => {
                    let addr = resolve_label(&func.labels, label)?;
                    let disp = addr as i64 - index as i64 - 4;

                    self.script.write_u32(0)?;

                    if iw9 {
                        self.script.write_i16(disp as i16)?;
                        self.script.write_u8(0xFF)?;
                        self.script.write_u8(0)?;
                        index += 8;
                    } else {
                        self.stack.write_cstr(b"\x01")?;
                        self.emit_offset(disp as i32)?;
                        index += 7;
                    }
                }
            }
        }

        Ok(())
    }

    /// Packed 24-bit call/case displacement, pre-shifted by the
    /// variant's offset width.
    fn emit_offset(&mut self, offs: i32) -> Result<()> {
        let shift = if self.ctx.props().contains(Props::OFFS8) {
            8
        } else if self.ctx.props().contains(Props::OFFS9) {
            9
        } else {
            10
        };

        self.script.write_i24(offs.wrapping_shl(shift) >> 8)
    }

    fn extension(&self) -> &'static str {
        match self.ctx.instance() {
            Instance::Server => ".gsc",
            Instance::Client => ".csc",
        }
    }

    fn write_stack_literal(&mut self, inst: &Instruction, s: &str) -> Result<()> {
        let bytes =
            decode_literal(s).ok_or_else(|| inst.malformed(format!("bad string escape {s:?}")))?;
        self.stack.write_cstr(&bytes)
    }
}

/// Decodes the opaque `_encstr_<hex>` escape the compiler uses for
/// pre-encrypted literals; anything else passes through as its raw
/// bytes. Returns `None` when the hex payload is malformed.
fn decode_literal(s: &str) -> Option<Vec<u8>> {
    if !s.starts_with("_encstr_") || s.len() % 2 != 0 {
        return Some(s.as_bytes().to_vec());
    }

    let hex = &s.as_bytes()[8..];
    let mut out = Vec::with_capacity(hex.len() / 2);

    for pair in hex.chunks(2) {
        let digits = std::str::from_utf8(pair).ok()?;
        out.push(u8::from_str_radix(digits, 16).ok()?);
    }

    Some(out)
}

fn resolve_function(data: &Assembly, name: &str) -> Result<usize> {
    data.functions
        .iter()
        .find(|func| func.name == name)
        .map(|func| func.index)
        .ok_or_else(|| AsmError::UnresolvedFunction(name.to_string()))
}

fn resolve_label(labels: &HashMap<usize, String>, name: &str) -> Result<usize> {
    labels
        .iter()
        .find(|(_, label)| label.as_str() == name)
        .map(|(&offset, _)| offset)
        .ok_or_else(|| AsmError::UnresolvedLabel(name.to_string()))
}
