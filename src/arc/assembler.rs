use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::{AsmError, Result};
use crate::types::{Endian, SwitchKind};
use crate::util::CodeWriter;

use super::assembly::{
    switch_entries, AnimtreeUses, Assembly, ExportRef, Function, ImportKey, Instruction,
    StringKind, SwitchEntry,
};
use super::context::{Context, Props};
use super::opcode::{operands, OperandKind};

/// File header accounting, filled while the segments are written and
/// flushed to offset 0 last. Fields that no supported variant
/// populates stay zero.
#[derive(Default)]
struct Header {
    source_crc: u32,
    include_offset: u32,
    include_count: u8,
    animtree_offset: u32,
    animtree_count: u8,
    cseg_offset: u32,
    cseg_size: u32,
    stringtablefixup_offset: u32,
    stringtablefixup_count: u16,
    devblock_stringtablefixup_offset: u32,
    devblock_stringtablefixup_count: u16,
    exports_offset: u32,
    exports_count: u16,
    imports_offset: u32,
    imports_count: u16,
    fixup_offset: u32,
    fixup_count: u16,
    profile_offset: u32,
    profile_count: u16,
    name: u16,
    flags: u8,
}

/// Two-pass assembler for the ARC family.
///
/// Per function, a layout walk first computes every instruction's
/// final offset and size under the engine's alignment rules, moves
/// label targets to the new offsets and records string / import /
/// animtree fixups at the byte positions their operand slots will
/// occupy; the writer then rewinds to the function start and the
/// emission walk fills in the actual bytes. Inter-segment tables and
/// the header follow once all functions are down.
pub struct Assembler<'a> {
    ctx: &'a Context,
    script: CodeWriter,
    devmap: CodeWriter,
    strpool: HashMap<String, u16>,
    exports: Vec<ExportRef>,
    imports: IndexMap<ImportKey, Vec<u32>>,
    strings: IndexMap<(String, StringKind), Vec<u32>>,
    anims: IndexMap<String, AnimtreeUses>,
    devmap_count: u32,
}

impl<'a> Assembler<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            script: CodeWriter::new(ctx.endian()),
            // The dev-map side table is little-endian on every target.
            devmap: CodeWriter::new(Endian::Little),
            strpool: HashMap::new(),
            exports: Vec::new(),
            imports: IndexMap::new(),
            strings: IndexMap::new(),
            anims: IndexMap::new(),
            devmap_count: 0,
        }
    }

    /// Assembles one listing into a script image and a dev-map. All
    /// per-input state is reset first, so an assembler can be reused
    /// across inputs.
    pub fn assemble(
        &mut self,
        data: &mut Assembly,
        name: Option<&str>,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        let name = name.unwrap_or("");

        self.script.clear();
        self.devmap.clear();
        self.strpool.clear();
        self.exports.clear();
        self.imports.clear();
        self.strings.clear();
        self.anims.clear();
        self.devmap_count = 0;

        debug!(
            "assembling {:?}: {} functions, {} includes",
            name,
            data.functions.len(),
            data.includes.len()
        );

        let mut head = Header::default();
        let size64 = self.ctx.props().contains(Props::SIZE64);

        self.devmap.seek(4)?;
        self.script.set_pos(self.ctx.header_size())?;
        self.process_string(name)?;

        for func in &data.functions {
            self.process_function(func)?;
        }

        for incl in &data.includes {
            self.process_string(incl)?;
        }

        head.include_offset = self.script.pos() as u32;
        head.include_count = data.includes.len() as u8;

        for incl in &data.includes {
            let handle = self.resolve_string(incl)?;
            self.script.write_u32(u32::from(handle))?;
        }

        head.cseg_offset = self.script.pos() as u32;
        let func_align = if size64 { 8 } else { 4 };

        for func in &mut data.functions {
            self.script.align(func_align)?;
            self.script.seek(func_align)?;
            self.assemble_function(func)?;
        }

        head.cseg_size = self.script.pos() as u32 - head.cseg_offset;
        head.source_crc = 0;

        head.exports_offset = self.script.pos() as u32;
        head.exports_count = self.exports.len() as u16;

        let exports = std::mem::take(&mut self.exports);
        for entry in &exports {
            self.script.write_u32(entry.checksum)?;
            self.script.write_u32(entry.offset)?;

            if self.ctx.props().contains(Props::HASHIDS) {
                self.script.write_u32(self.ctx.hash_id(&entry.name))?;
                self.script.write_u32(self.ctx.hash_id(&entry.space))?;
            } else {
                let handle = self.resolve_string(&entry.name)?;
                self.script.write_u16(handle)?;
            }

            self.script.write_u8(entry.params)?;
            self.script.write_u8(entry.flags)?;

            if self.ctx.props().contains(Props::HASHIDS) {
                self.script.seek(2)?;
            }
        }

        head.imports_offset = self.script.pos() as u32;
        head.imports_count = self.imports.len() as u16;

        let imports = std::mem::take(&mut self.imports);
        for (key, refs) in &imports {
            if self.ctx.props().contains(Props::HASHIDS) {
                self.script.write_u32(self.ctx.hash_id(&key.name))?;
                self.script.write_u32(self.ctx.hash_id(&key.space))?;
            } else {
                let name = self.resolve_string(&key.name)?;
                let space = self.resolve_string(&key.space)?;
                self.script.write_u16(name)?;
                self.script.write_u16(space)?;
            }

            self.script.write_u16(refs.len() as u16)?;
            self.script.write_u8(key.params)?;
            self.script.write_u8(key.flags)?;

            for &r in refs {
                self.script.write_u32(r)?;
            }
        }

        head.animtree_offset = self.script.pos() as u32;
        head.animtree_count = self.anims.len() as u8;

        let anims = std::mem::take(&mut self.anims);
        for (name, uses) in &anims {
            let handle = self.resolve_string(name)?;

            if size64 {
                self.script.write_u32(u32::from(handle))?;
                self.script.write_u16(uses.refs.len() as u16)?;
                self.script.write_u16(uses.anims.len() as u16)?;
            } else {
                self.script.write_u16(handle)?;
                self.script.write_u16(uses.refs.len() as u16)?;
                self.script.write_u16(uses.anims.len() as u16)?;
                self.script.seek(2)?;
            }

            for &r in &uses.refs {
                self.script.write_u32(r)?;
            }

            for (anim, r) in &uses.anims {
                let handle = self.resolve_string(anim)?;
                if size64 {
                    self.script.write_u64(u64::from(handle))?;
                    self.script.write_u64(u64::from(*r))?;
                } else {
                    self.script.write_u32(u32::from(handle))?;
                    self.script.write_u32(*r)?;
                }
            }
        }

        head.stringtablefixup_offset = self.script.pos() as u32;
        let mut run_headers = 0u32;

        let strings = std::mem::take(&mut self.strings);
        for ((str_name, kind), refs) in &strings {
            let handle = self.resolve_string(str_name)?;

            // Runs hold at most 255 references; longer lists repeat
            // the header record.
            for (n, &r) in refs.iter().enumerate() {
                if n % 0xFF == 0 {
                    run_headers += 1;
                    if size64 {
                        self.script.write_u32(u32::from(handle))?;
                    } else {
                        self.script.write_u16(handle)?;
                    }
                    self.script.write_u8((refs.len() - n).min(0xFF) as u8)?;
                    self.script.write_u8(*kind as u8)?;
                    if size64 {
                        self.script.seek(2)?;
                    }
                }
                self.script.write_u32(r)?;
            }
        }

        head.stringtablefixup_count = run_headers as u16;

        if self.ctx.props().contains(Props::DEVSTR) {
            head.stringtablefixup_offset = self.script.pos() as u32;
            head.stringtablefixup_count = 0;
        }

        head.fixup_offset = self.script.pos() as u32;
        head.fixup_count = 0;

        head.profile_offset = self.script.pos() as u32;
        head.profile_count = 0;

        head.flags = 0;
        head.name = self.resolve_string(name)?;

        self.write_header(&head)?;

        let dev_end = self.devmap.pos();
        self.devmap.set_pos(0)?;
        self.devmap.write_u32(self.devmap_count)?;
        self.devmap.set_pos(dev_end)?;

        let script = std::mem::replace(&mut self.script, CodeWriter::new(self.ctx.endian()));
        let devmap = std::mem::replace(&mut self.devmap, CodeWriter::new(Endian::Little));
        Ok((script.into_vec(), devmap.into_vec()))
    }

    fn write_header(&mut self, head: &Header) -> Result<()> {
        let devstr = self.ctx.props().contains(Props::DEVSTR);
        let endpos = self.script.pos();

        self.script.set_pos(0)?;
        self.script.write_u64(self.ctx.magic())?;
        self.script.write_u32(head.source_crc)?;
        self.script.write_u32(head.include_offset)?;
        self.script.write_u32(head.animtree_offset)?;
        self.script.write_u32(head.cseg_offset)?;
        self.script.write_u32(head.stringtablefixup_offset)?;

        if devstr {
            self.script
                .write_u32(head.devblock_stringtablefixup_offset)?;
        }

        self.script.write_u32(head.exports_offset)?;
        self.script.write_u32(head.imports_offset)?;
        self.script.write_u32(head.fixup_offset)?;
        self.script.write_u32(head.profile_offset)?;
        self.script.write_u32(head.cseg_size)?;

        if self.ctx.props().contains(Props::SIZE64) {
            self.script.write_u32(u32::from(head.name))?;
        } else {
            self.script.write_u16(head.name)?;
        }

        self.script.write_u16(head.stringtablefixup_count)?;
        self.script.write_u16(head.exports_count)?;
        self.script.write_u16(head.imports_count)?;
        self.script.write_u16(head.fixup_count)?;
        self.script.write_u16(head.profile_count)?;

        if devstr {
            self.script.write_u16(head.devblock_stringtablefixup_count)?;
        }

        self.script.write_u8(head.include_count)?;
        self.script.write_u8(head.animtree_count)?;
        self.script.write_u8(head.flags)?;
        self.script.set_pos(endpos)
    }

    /// Layout then emission for one function; appends its export
    /// record once the body is down.
    fn assemble_function(&mut self, func: &mut Function) -> Result<()> {
        let mut relocated = HashMap::with_capacity(func.labels.len());
        func.index = self.script.pos();
        func.size = 0;

        for inst in func.instructions.iter_mut() {
            let old_index = inst.index;
            inst.index = func.index + func.size;

            self.layout_instruction(inst)?;
            func.size += inst.size;

            if let Some(label) = func.labels.get(&old_index) {
                relocated.insert(inst.index, label.clone());
            }
        }

        func.labels = relocated;

        self.script.set_pos(func.index)?;

        for inst in &func.instructions {
            self.emit_instruction(inst, &func.labels)?;
        }

        trace!(
            "function {} at {:#06X}, {} bytes",
            func.name,
            func.index,
            func.size
        );

        self.exports.push(ExportRef {
            checksum: 0,
            offset: func.index as u32,
            name: func.name.clone(),
            space: String::new(),
            params: func.params,
            flags: func.flags,
        });

        Ok(())
    }

    /// Layout walk for one instruction: advance the writer over the
    /// bytes the operands will occupy, fold alignment padding into the
    /// instruction size, and record fixups at the slot positions.
    fn layout_instruction(&mut self, inst: &mut Instruction) -> Result<()> {
        inst.size = self.ctx.opcode_size(inst.opcode)?;
        self.script.seek(1)?;

        match operands(inst.opcode) {
            OperandKind::None => {}
            OperandKind::U8 => self.script.seek(1)?,
            OperandKind::U16 => {
                inst.size += self.script.align(2)?;
                self.script.seek(2)?;
            }
            OperandKind::IntOrTree => {
                inst.size += self.script.align(4)?;
                if inst.data.len() == 2 {
                    let at = self.script.pos() as u32;
                    self.add_animref(inst, at)?;
                }
                self.script.seek(4)?;
            }
            OperandKind::F32 => {
                inst.size += self.script.align(4)?;
                self.script.seek(4)?;
            }
            OperandKind::Vec3 => {
                inst.size += self.script.align(4)?;
                self.script.seek(12)?;
            }
            OperandKind::StringId => {
                inst.size += self.script.align(2)?;
                let at = self.script.pos() as u32;
                self.add_stringref(inst.arg(0)?, StringKind::Literal, at);
                self.script.seek(2)?;
            }
            OperandKind::Anim => {
                inst.size += self.script.align(4)?;
                let at = self.script.pos() as u32;
                self.add_animref(inst, at)?;
                self.script.seek(4)?;
            }
            OperandKind::Hash32 => {
                inst.size += self.script.align(4)?;
                self.script.seek(4)?;
            }
            OperandKind::LocalVars => {
                self.script.seek(1)?;
                let mut extra = 0;
                for i in 0..inst.data.len() {
                    extra += self.script.align(2)? + 2;
                    let at = self.script.pos() as u32;
                    self.add_stringref(inst.arg(i)?, StringKind::Canonical, at);
                    self.script.seek(2)?;
                }
                inst.size += extra;
            }
            OperandKind::FieldId => {
                inst.size += self.script.align(2)?;
                let at = self.script.pos() as u32;
                self.add_stringref(inst.arg(0)?, StringKind::Canonical, at);
                self.script.seek(2)?;
            }
            OperandKind::FuncGet => {
                inst.size += self.script.align(4)?;
                self.script.seek(4)?;
                self.add_importref(inst, inst.index as u32)?;
            }
            OperandKind::Call => {
                self.script.seek(1)?;
                inst.size += self.script.align(4)?;
                self.script.seek(4)?;
                self.add_importref(inst, inst.index as u32)?;
            }
            OperandKind::Jump => {
                inst.size += self.script.align(2)?;
                self.script.seek(2)?;
            }
            OperandKind::SwitchJump => {
                inst.size += self.script.align(4)?;
                self.script.seek(4)?;
            }
            OperandKind::SwitchTable => {
                let mut extra = self.script.align(4)?;
                self.script.seek(4)?;

                let entries = switch_entries(inst)?;
                for entry in &entries {
                    if let SwitchEntry::Case {
                        kind: SwitchKind::String,
                        value,
                        ..
                    } = entry
                    {
                        // The string id lands in the upper half of the
                        // case value slot.
                        let at = self.script.pos() as u32 + 2;
                        self.add_stringref(value, StringKind::Literal, at);
                    }
                    extra += 8;
                    self.script.seek(8)?;
                }
                inst.size += extra;
            }
        }

        Ok(())
    }

    /// Emission walk: same alignment decisions as the layout walk, now
    /// writing the opcode byte and the operand bytes.
    fn emit_instruction(
        &mut self,
        inst: &Instruction,
        labels: &HashMap<usize, String>,
    ) -> Result<()> {
        let id = self.ctx.opcode_id(inst.opcode)?;
        self.script.write_u8(id as u8)?;

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
                self.script.align(2)?;
                self.script.write_u16(inst.arg_int::<i64>(0)? as u16)?;
            }
            OperandKind::IntOrTree => {
                self.script.align(4)?;
                if inst.data.len() == 2 {
                    self.script.write_i32(-1)?;
                } else {
                    self.script.write_i32(inst.arg_int(0)?)?;
                }
            }
            OperandKind::F32 => {
                self.script.align(4)?;
                self.script.write_f32(inst.arg_f32(0)?)?;
            }
            OperandKind::Vec3 => {
                self.script.align(4)?;
                self.script.write_f32(inst.arg_f32(0)?)?;
                self.script.write_f32(inst.arg_f32(1)?)?;
                self.script.write_f32(inst.arg_f32(2)?)?;
            }
            OperandKind::StringId => {
                self.script.align(2)?;
                self.script.write_u16(0)?;
            }
            OperandKind::Anim => {
                self.script.align(4)?;
                self.script.write_u32(0)?;
            }
            OperandKind::Hash32 => {
                self.script.align(4)?;
                self.script.write_u32(self.ctx.hash_id(inst.arg(0)?))?;
            }
            OperandKind::LocalVars => {
                self.script.write_u8(inst.data.len() as u8)?;
                for _ in 0..inst.data.len() {
                    self.script.align(2)?;
                    self.script.write_u16(0)?;
                }
            }
            OperandKind::FieldId => {
                self.script.align(2)?;
                self.script.write_u16(0)?;
            }
            OperandKind::FuncGet => {
                self.script.align(4)?;
                self.script.write_u32(0)?;
            }
            OperandKind::Call => {
                self.script.write_u8(0)?;
                self.script.align(4)?;
                self.script.write_u32(0)?;
            }
            OperandKind::Jump => {
                self.script.align(2)?;
                let target = resolve_label(labels, inst)?;
                let disp = target as i64 - (inst.index + inst.size) as i64;
                self.script.write_i16(disp as i16)?;
            }
            OperandKind::SwitchJump => {
                self.script.align(4)?;
                let target = resolve_label(labels, inst)?;
                // The switch table base is rounded up to the next
                // 4-aligned offset past the target.
                let base = (target + 4) & !3;
                let disp = base as i64 - (inst.index + inst.size) as i64;
                self.script.write_i32(disp as i32)?;
            }
            OperandKind::SwitchTable => {
                let entries = switch_entries(inst)?;
                self.script.align(4)?;
                self.script.write_u32(entries.len() as u32)?;

                for (i, entry) in entries.iter().enumerate() {
                    let (value, label) = match entry {
                        SwitchEntry::Case { kind, value, label } => {
                            let word = if *kind == SwitchKind::Integer {
                                let v: i32 = value
                                    .parse()
                                    .map_err(|_| inst.malformed(format!("case value {value:?}")))?;
                                (v & 0x00FF_FFFF) as u32 | 0x0080_0000
                            } else {
                                i as u32 + 1
                            };
                            (word, label)
                        }
                        SwitchEntry::Default { label } => (0, label),
                    };

                    self.script.write_u32(value)?;
                    let target = lookup_label(labels, label)
                        .ok_or_else(|| AsmError::UnresolvedLabel((*label).to_string()))?;
                    let at = self.script.pos() as i64;
                    self.script.write_i32((target as i64 - at - 4) as i32)?;
                }
            }
        }

        Ok(())
    }

    /// Appends the string to the pool if it is not already there; the
    /// pool holds exactly one copy of every referenced string.
    fn process_string(&mut self, data: &str) -> Result<()> {
        if !self.strpool.contains_key(data) {
            let at = self.script.pos() as u16;
            self.script.write_cstr(data.as_bytes())?;
            self.strpool.insert(data.to_string(), at);
        }
        Ok(())
    }

    fn process_function(&mut self, func: &Function) -> Result<()> {
        self.process_string(&func.name)?;

        for inst in &func.instructions {
            self.process_instruction(inst)?;
        }

        Ok(())
    }

    /// String-pool walk of the operand table: pools every string an
    /// instruction's table entries will need to resolve.
    fn process_instruction(&mut self, inst: &Instruction) -> Result<()> {
        match operands(inst.opcode) {
            OperandKind::IntOrTree => {
                if inst.data.len() == 2 {
                    self.process_string(inst.arg(0)?)?;
                }
            }
            OperandKind::StringId | OperandKind::FieldId => {
                self.process_string(inst.arg(0)?)?;
            }
            OperandKind::Anim | OperandKind::FuncGet | OperandKind::Call => {
                self.process_string(inst.arg(0)?)?;
                self.process_string(inst.arg(1)?)?;
            }
            OperandKind::LocalVars => {
                for i in 0..inst.data.len() {
                    self.process_string(inst.arg(i)?)?;
                }
            }
            OperandKind::SwitchTable => {
                let entries = switch_entries(inst)?;
                for entry in &entries {
                    if let SwitchEntry::Case {
                        kind: SwitchKind::String,
                        value,
                        ..
                    } = entry
                    {
                        self.process_string(value)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn resolve_string(&self, name: &str) -> Result<u16> {
        self.strpool
            .get(name)
            .copied()
            .ok_or_else(|| AsmError::UnresolvedString(name.to_string()))
    }

    fn add_stringref(&mut self, name: &str, kind: StringKind, r: u32) {
        self.strings
            .entry((name.to_string(), kind))
            .or_default()
            .push(r);
    }

    fn add_importref(&mut self, inst: &Instruction, r: u32) -> Result<()> {
        let key = ImportKey {
            space: inst.arg(0)?.to_string(),
            name: inst.arg(1)?.to_string(),
            params: inst.arg_int(2)?,
            flags: inst.arg_int(3)?,
        };
        self.imports.entry(key).or_default().push(r);
        Ok(())
    }

    fn add_animref(&mut self, inst: &Instruction, r: u32) -> Result<()> {
        let name = inst.arg(0)?;
        let companion = inst.arg(1)?;
        let entry = self.anims.entry(name.to_string()).or_default();

        if companion == "-1" {
            entry.refs.push(r);
        } else {
            entry.anims.push((companion.to_string(), r));
        }

        Ok(())
    }
}

fn lookup_label(labels: &HashMap<usize, String>, name: &str) -> Option<usize> {
    labels
        .iter()
        .find(|(_, label)| label.as_str() == name)
        .map(|(&offset, _)| offset)
}

fn resolve_label(labels: &HashMap<usize, String>, inst: &Instruction) -> Result<usize> {
    let name = inst.arg(0)?;
    lookup_label(labels, name).ok_or_else(|| AsmError::UnresolvedLabel(name.to_string()))
}
