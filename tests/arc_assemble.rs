use anyhow::Result;

use arclight::arc::{engine, Assembler, Assembly, Context, Function, Instruction, Opcode};
use arclight::types::{Build, Instance};
use arclight::AsmError;

fn inst(opcode: Opcode, data: &[&str]) -> Instruction {
    Instruction::new(opcode, data.iter().map(|s| s.to_string()).collect())
}

/// Assigns the provisional pre-layout offsets the compiler would hand
/// over, so label keys are self-consistent before relocation.
fn number(ctx: &Context, func: &mut Function) {
    let mut at = 0usize;
    for inst in &mut func.instructions {
        inst.index = at;
        let mut size = ctx.opcode_size(inst.opcode).unwrap();
        match inst.opcode {
            Opcode::EndSwitch => {
                let count: usize = inst.data[0].parse().unwrap();
                size += 8 * count;
            }
            Opcode::SafeCreateLocalVariables => size += 2 * inst.data.len(),
            _ => {}
        }
        at += size;
    }
}

fn function(ctx: &Context, name: &str, instructions: Vec<Instruction>) -> Function {
    let mut func = Function {
        name: name.to_string(),
        instructions,
        ..Function::default()
    };
    number(ctx, &mut func);
    func
}

fn label(func: &mut Function, slot: usize, name: &str) {
    let at = func.instructions[slot].index;
    func.labels.insert(at, name.to_string());
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[test]
fn empty_function_image_layout() -> Result<()> {
    // Little-endian variant with a 64-byte header and wide name
    // fields.
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![inst(Opcode::GetUndefined, &[]), inst(Opcode::Return, &[])],
        )],
    };

    let mut assembler = Assembler::new(&ctx);
    let (script, devmap) = assembler.assemble(&mut asm, None)?;

    // Magic at offset 0, in the context's endianness.
    assert_eq!(&script[..8], &engine::t7::MAGIC.to_le_bytes());

    // Pool: "" at 64, "main" at 65; includes table empty at 70; code
    // segment at 70, function header-aligned to 8 and prefixed by an
    // 8-byte per-function header, so the body starts at 80.
    assert_eq!(read_u32(&script, 12), 70, "include offset");
    assert_eq!(read_u32(&script, 20), 70, "cseg offset");
    assert_eq!(read_u32(&script, 44), 12, "cseg size");

    // Exactly one export, pointing at the function body.
    let exports_offset = read_u32(&script, 28) as usize;
    assert_eq!(exports_offset, 82);
    assert_eq!(read_u16(&script, 54), 1, "export count");
    assert_eq!(read_u32(&script, exports_offset), 0, "checksum");
    assert_eq!(read_u32(&script, exports_offset + 4), 80, "function offset");
    assert_eq!(
        read_u16(&script, exports_offset + 8),
        65,
        "name pool handle"
    );

    // Opcode bytes of the two instructions.
    assert_eq!(script[80], ctx.opcode_id(Opcode::GetUndefined)? as u8);
    assert_eq!(script[81], ctx.opcode_id(Opcode::Return)? as u8);

    // Production build: the dev-map is just its zero count.
    assert_eq!(devmap, vec![0, 0, 0, 0]);

    Ok(())
}

#[test]
fn jump_displacement_lands_after_the_operand() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut func = function(
        &ctx,
        "main",
        vec![
            inst(Opcode::GetByte, &["1"]),
            inst(Opcode::JumpOnFalse, &["L1"]),
            inst(Opcode::GetByte, &["2"]),
            inst(Opcode::Return, &[]),
        ],
    );
    label(&mut func, 3, "L1");

    let mut asm = Assembly {
        includes: vec![],
        functions: vec![func],
    };
    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    // Body at 80: GetByte(2) @80, JumpOnFalse @82 padded to a 2-byte
    // displacement at 84 (size 4), GetByte @86, Return @88 carrying
    // the label.
    let func = &asm.functions[0];
    assert_eq!(func.index, 80);
    assert_eq!(func.instructions[1].index, 82);
    assert_eq!(func.instructions[1].size, 4);
    assert_eq!(func.labels.get(&88).map(String::as_str), Some("L1"));

    // disp == label - (index + size).
    assert_eq!(read_u16(&script, 84) as i16, (88 - (82 + 4)) as i16);
    assert_eq!(script[83], 0, "alignment padding is zero-filled");

    Ok(())
}

#[test]
fn switch_table_encoding() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut func = function(
        &ctx,
        "main",
        vec![
            inst(Opcode::Switch, &["tbl"]),
            inst(Opcode::GetByte, &["7"]),
            inst(Opcode::Return, &[]),
            inst(Opcode::Return, &[]),
            inst(
                Opcode::EndSwitch,
                &["2", "case", "1", "5", "L5", "default", "LD", "", ""],
            ),
        ],
    );
    label(&mut func, 2, "L5");
    label(&mut func, 3, "LD");
    label(&mut func, 4, "tbl");

    let mut asm = Assembly {
        includes: vec![],
        functions: vec![func],
    };
    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    // Layout: Switch @80 (size 8 with padding), GetByte @88, Return
    // @90 (L5), Return @91 (LD), EndSwitch @92 (tbl).
    let func = &asm.functions[0];
    assert_eq!(func.instructions[4].index, 92);
    assert_eq!(func.instructions[4].size, 24);

    // Switch displacement targets the 4-aligned table base past the
    // label: ((92 + 4) & !3) - (80 + 8).
    assert_eq!(read_u32(&script, 84) as i32, 8);

    // Count, then (value, displacement) pairs: the integer case is
    // masked and tagged, the default case value is 0, and each
    // displacement is relative to the byte after itself.
    assert_eq!(read_u32(&script, 96), 2);
    assert_eq!(read_u32(&script, 100), 0x0080_0005);
    assert_eq!(read_u32(&script, 104) as i32, 90 - 104 - 4);
    assert_eq!(read_u32(&script, 108), 0);
    assert_eq!(read_u32(&script, 112) as i32, 91 - 112 - 4);

    Ok(())
}

#[test]
fn string_fixups_dedup_into_one_record() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![
                inst(Opcode::GetString, &["hello"]),
                inst(Opcode::GetString, &["hello"]),
                inst(Opcode::GetString, &["hello"]),
                inst(Opcode::Return, &[]),
            ],
        )],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    // One run header for the three references.
    assert_eq!(read_u16(&script, 52), 1, "fixup run count");

    let fixup_offset = read_u32(&script, 24) as usize;
    assert_eq!(read_u32(&script, fixup_offset), 70, "pool handle of hello");
    assert_eq!(script[fixup_offset + 4], 3, "refs in the run");
    assert_eq!(script[fixup_offset + 5], 0, "literal string type");

    let refs: Vec<u32> = (0..3)
        .map(|i| read_u32(&script, fixup_offset + 8 + 4 * i))
        .collect();
    assert_eq!(refs, vec![90, 94, 98]);

    // Every recorded slot was left zeroed for the loader to patch.
    for &r in &refs {
        assert_eq!(read_u16(&script, r as usize), 0);
    }

    // Exactly one NUL-terminated copy of the string in the image.
    let hits = script
        .windows(6)
        .filter(|window| *window == b"hello\0")
        .count();
    assert_eq!(hits, 1);

    Ok(())
}

#[test]
fn imports_key_on_space_name_params_flags() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![
                inst(Opcode::ScriptFunctionCall, &["utils", "helper", "2", "0"]),
                inst(Opcode::Return, &[]),
            ],
        )],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    assert_eq!(read_u16(&script, 56), 1, "import count");
    let imports_offset = read_u32(&script, 32) as usize;

    // name handle, space handle, ref count, params, flags, then the
    // reference pointing at the instruction start.
    assert_eq!(read_u16(&script, imports_offset), 76, "helper handle");
    assert_eq!(read_u16(&script, imports_offset + 2), 70, "utils handle");
    assert_eq!(read_u16(&script, imports_offset + 4), 1);
    assert_eq!(script[imports_offset + 6], 2);
    assert_eq!(script[imports_offset + 7], 0);
    assert_eq!(read_u32(&script, imports_offset + 8), 96);

    Ok(())
}

#[test]
fn animtree_table_collects_bare_and_named_references() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![
                inst(Opcode::GetInteger, &["mytree", "-1"]),
                inst(Opcode::GetAnimation, &["mytree", "walk"]),
                inst(Opcode::Return, &[]),
            ],
        )],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    // The tree-handle slot is filled with -1, the animation slot with
    // a zero placeholder.
    assert_eq!(read_u32(&script, 100), 0xFFFF_FFFF);
    assert_eq!(read_u32(&script, 108), 0);

    assert_eq!(script[63], 1, "animtree count");
    let animtree_offset = read_u32(&script, 16) as usize;

    assert_eq!(read_u32(&script, animtree_offset), 70, "mytree handle");
    assert_eq!(read_u16(&script, animtree_offset + 4), 1, "bare refs");
    assert_eq!(read_u16(&script, animtree_offset + 6), 1, "named anims");
    assert_eq!(read_u32(&script, animtree_offset + 8), 100);
    // Named animation pair widens to u64 under the wide-id variant.
    assert_eq!(read_u32(&script, animtree_offset + 12), 77, "walk handle");
    assert_eq!(read_u32(&script, animtree_offset + 20), 108);

    Ok(())
}

#[test]
fn hashed_exports_and_dev_string_rebase() -> Result<()> {
    // 72-byte header, hashed ids, dev-string table accounting.
    let ctx = engine::t9::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![inst(Opcode::GetUndefined, &[]), inst(Opcode::Return, &[])],
        )],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    // Body at 80 past the 72-byte header, pool and function header.
    let exports_offset = read_u32(&script, 32) as usize;
    assert_eq!(exports_offset, 90);
    assert_eq!(read_u32(&script, exports_offset + 4), 88);
    assert_eq!(
        read_u32(&script, exports_offset + 8),
        ctx.hash_id("main"),
        "hashed export name"
    );
    assert_eq!(read_u32(&script, exports_offset + 12), ctx.hash_id(""));

    // With the dev-string table enabled the visible fixup table is
    // rebased past the emitted runs and its count zeroed.
    assert_eq!(read_u32(&script, 24), 108, "rebased fixup offset");
    assert_eq!(read_u16(&script, 56), 0, "zeroed fixup count");
    assert_eq!(read_u32(&script, 28), 0, "dev fixup offset stays unset");

    Ok(())
}

#[test]
fn big_endian_variant_swaps_every_integer() -> Result<()> {
    let ctx = engine::t6::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![
                inst(Opcode::GetInteger, &["305419896"]),
                inst(Opcode::Return, &[]),
            ],
        )],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    assert_eq!(&script[..8], &engine::t6::MAGIC.to_be_bytes());
    // Narrow variant: 4-byte function header, body at 76, integer
    // operand aligned to 80.
    assert_eq!(&script[80..84], &[0x12, 0x34, 0x56, 0x78]);

    Ok(())
}

#[test]
fn dev_map_is_monotonic_and_covers_every_instruction() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Dev);
    let mut func = function(
        &ctx,
        "main",
        vec![
            inst(Opcode::GetByte, &["1"]),
            inst(Opcode::GetString, &["hi"]),
            inst(Opcode::Return, &[]),
        ],
    );
    for (n, i) in func.instructions.iter_mut().enumerate() {
        i.pos.line = 10 + n as u32;
        i.pos.column = 1 + n as u32;
    }

    let mut asm = Assembly {
        includes: vec![],
        functions: vec![func],
    };
    let (_, devmap) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    let count = read_u32(&devmap, 0) as usize;
    assert_eq!(count, 3);
    assert_eq!(devmap.len(), 4 + count * 8);

    let mut last = 0;
    for n in 0..count {
        let at = 4 + n * 8;
        let offset = read_u32(&devmap, at);
        assert!(offset > last, "offsets strictly increase");
        last = offset;
        assert_eq!(read_u16(&devmap, at + 4), 10 + n as u16);
        assert_eq!(read_u16(&devmap, at + 6), 1 + n as u16);
    }

    Ok(())
}

#[test]
fn includes_resolve_through_the_pool() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec!["common/util".to_string()],
        functions: vec![function(&ctx, "main", vec![inst(Opcode::Return, &[])])],
    };

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;

    let include_offset = read_u32(&script, 12) as usize;
    assert_eq!(script[62], 1, "include count");
    let handle = read_u32(&script, include_offset) as usize;
    assert_eq!(&script[handle..handle + 12], b"common/util\0");

    Ok(())
}

#[test]
fn unresolved_label_is_terminal() {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![inst(Opcode::Jump, &["nowhere"]), inst(Opcode::Return, &[])],
        )],
    };

    let err = Assembler::new(&ctx).assemble(&mut asm, None).unwrap_err();
    assert!(matches!(err, AsmError::UnresolvedLabel(_)));
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn malformed_numeric_operand_is_reported_with_the_opcode() {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut asm = Assembly {
        includes: vec![],
        functions: vec![function(
            &ctx,
            "main",
            vec![inst(Opcode::GetInteger, &["not-a-number"])],
        )],
    };

    let err = Assembler::new(&ctx).assemble(&mut asm, None).unwrap_err();
    assert!(matches!(err, AsmError::MalformedOperand { .. }));
    assert!(err.to_string().contains("GetInteger"));
}

#[test]
fn reassembly_is_byte_identical() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);

    let build = |ctx: &Context| {
        let mut func = function(
            ctx,
            "main",
            vec![
                inst(Opcode::GetString, &["hello"]),
                inst(Opcode::JumpOnFalse, &["end"]),
                inst(Opcode::ScriptFunctionCall, &["utils", "helper", "1", "0"]),
                inst(Opcode::Return, &[]),
            ],
        );
        label(&mut func, 3, "end");
        Assembly {
            includes: vec!["common/util".to_string()],
            functions: vec![func],
        }
    };

    let mut first_input = build(&ctx);
    let mut assembler = Assembler::new(&ctx);
    let first = assembler.assemble(&mut first_input, Some("scripts/demo"))?;

    // Same assembler, fresh instance, fresh input: all byte-identical.
    let mut second_input = build(&ctx);
    let reused = assembler.assemble(&mut second_input, Some("scripts/demo"))?;
    let mut third_input = build(&ctx);
    let fresh = Assembler::new(&ctx).assemble(&mut third_input, Some("scripts/demo"))?;

    assert_eq!(first, reused);
    assert_eq!(first, fresh);

    Ok(())
}

#[test]
fn sizes_add_up_to_the_function_extent() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let mut func = function(
        &ctx,
        "main",
        vec![
            inst(Opcode::GetByte, &["3"]),
            inst(Opcode::GetInteger, &["99"]),
            inst(Opcode::GetVector, &["1.0", "2.0", "3.5"]),
            inst(Opcode::SafeCreateLocalVariables, &["a", "b"]),
            inst(Opcode::EvalFieldVariable, &["health"]),
            inst(Opcode::Return, &[]),
        ],
    );
    label(&mut func, 5, "end");

    let mut asm = Assembly {
        includes: vec![],
        functions: vec![func],
    };
    Assembler::new(&ctx).assemble(&mut asm, None)?;

    let func = &asm.functions[0];
    let total: usize = func.instructions.iter().map(|i| i.size).sum();
    assert_eq!(total, func.size);

    let last = func.instructions.last().unwrap();
    assert_eq!(func.index + func.size, last.index + last.size);

    // Aligned operands really land on their alignment.
    assert_eq!(func.instructions[1].index, func.index + 2);
    Ok(())
}

#[test]
fn listing_round_trips_through_yaml() -> Result<()> {
    let ctx = engine::t7::context(Instance::Server, Build::Prod);
    let text = r#"
includes: []
functions:
  - name: main
    params: 0
    flags: 0
    instructions:
      - opcode: GetByte
        data: ["1"]
      - opcode: Return
"#;

    let mut asm: Assembly = serde_yaml::from_str(text)?;
    for func in &mut asm.functions {
        number(&ctx, func);
    }

    let (script, _) = Assembler::new(&ctx).assemble(&mut asm, None)?;
    assert_eq!(script[80], ctx.opcode_id(Opcode::GetByte)? as u8);

    // The relocated listing still serializes.
    let dumped = serde_yaml::to_string(&asm)?;
    assert!(dumped.contains("GetByte"));

    Ok(())
}
