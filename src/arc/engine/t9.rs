//! Gen-five target: 72-byte header, hashed export/import ids, dev-string table.

use crate::types::{Build, Endian, Instance};

use super::super::context::{Context, Props};
use super::super::opcode::Opcode;

pub const MAGIC: u64 = 0x804753430D0A0038;

pub fn context(instance: Instance, build: Build) -> Context {
    Context::with_tables(
        Props::HEADER72
            .union(Props::SIZE64)
            .union(Props::HASHIDS)
            .union(Props::DEVSTR),
        Endian::Little,
        instance,
        build,
        MAGIC,
        CODE_LIST,
        0x79D6_530B,
        0x0100_0193,
    )
}

#[rustfmt::skip]
pub(crate) const CODE_LIST: &[(u16, Opcode)] = &[
    (0x0011, Opcode::ShiftRight),
    (0x0012, Opcode::GetAnimation),
    (0x0014, Opcode::EvalLocalVariableCached),
    (0x0015, Opcode::Inc),
    (0x0016, Opcode::Modulus),
    (0x0017, Opcode::CallBuiltin),
    (0x0018, Opcode::NextArrayKey),
    (0x0019, Opcode::AnglesToForward),
    (0x001A, Opcode::JumpOnFalseExpr),
    (0x001B, Opcode::GetHash),
    (0x001C, Opcode::EmptyArray),
    (0x001E, Opcode::DecTop),
    (0x0020, Opcode::GetDvarVector),
    (0x0022, Opcode::GetFloat),
    (0x0023, Opcode::JumpOnTrue),
    (0x0024, Opcode::BoolNot),
    (0x0025, Opcode::Nop),
    (0x0027, Opcode::ScriptFunctionCall),
    (0x0028, Opcode::VectorScale),
    (0x0029, Opcode::DevblockBegin),
    (0x002B, Opcode::GetNegByte),
    (0x002C, Opcode::SafeSetWaittillVariableFieldCached),
    (0x002D, Opcode::CheckClearParams),
    (0x002E, Opcode::GreaterThanOrEqualTo),
    (0x002F, Opcode::GetDvarColorBlue),
    (0x0030, Opcode::ShiftLeft),
    (0x0031, Opcode::WaitTillFrameEnd),
    (0x0032, Opcode::Divide),
    (0x0033, Opcode::ScriptMethodThreadCallPointer),
    (0x0034, Opcode::ClearParams),
    (0x0035, Opcode::JumpOnTrueExpr),
    (0x0036, Opcode::BitAnd),
    (0x0037, Opcode::LessThanOrEqualTo),
    (0x0038, Opcode::GetDvarColorGreen),
    (0x0039, Opcode::GetDvarColorRed),
    (0x003A, Opcode::GetUndefined),
    (0x003B, Opcode::EvalLocalVariableRef),
    (0x003D, Opcode::GetAnim),
    (0x003E, Opcode::VectorToAngles),
    (0x0040, Opcode::Abs),
    (0x0041, Opcode::Multiply),
    (0x0042, Opcode::ProfileStop),
    (0x0043, Opcode::GetLevelObject),
    (0x0044, Opcode::ThreadObject),
    (0x0045, Opcode::AnglesToUp),
    (0x0047, Opcode::VoidCodePos),
    (0x0048, Opcode::BitOr),
    (0x0049, Opcode::LessThan),
    (0x004A, Opcode::GetByte),
    (0x004B, Opcode::BitXor),
    (0x004C, Opcode::Return),
    (0x004D, Opcode::EvalLocalVariable),
    (0x004F, Opcode::ScriptThreadCallPointer),
    (0x0051, Opcode::EvalFieldVariable),
    (0x0052, Opcode::GetDvar),
    (0x0054, Opcode::RemoveLocalVariables),
    (0x0055, Opcode::ScriptMethodCall),
    (0x0056, Opcode::GetDvarFloat),
    (0x0058, Opcode::EvalLocalVariableRefCached),
    (0x0059, Opcode::EvalArray),
    (0x005A, Opcode::GetNegUnsignedShort),
    (0x005B, Opcode::GetFunction),
    (0x005C, Opcode::FirstArrayKey),
    (0x005D, Opcode::ProfileStart),
    (0x005E, Opcode::ScriptFunctionCallPointer),
    (0x005F, Opcode::EvalLocalArrayRefCached),
    (0x0060, Opcode::SafeCreateLocalVariables),
    (0x0061, Opcode::GetZero),
    (0x0062, Opcode::Jump),
    (0x0063, Opcode::GetTime),
    (0x0064, Opcode::ClearFieldVariable),
    (0x0066, Opcode::GetLevel),
    (0x0068, Opcode::Vector),
    (0x006A, Opcode::JumpOnFalse),
    (0x006B, Opcode::CastFieldObject),
    (0x006C, Opcode::ScriptMethodCallPointer),
    (0x006E, Opcode::ScriptMethodThreadCall),
    (0x006F, Opcode::NotEqual),
    (0x0070, Opcode::EndOn),
    (0x0071, Opcode::GetUnsignedShort),
    (0x0073, Opcode::JumpBack),
    (0x0074, Opcode::CreateLocalVariable),
    (0x0075, Opcode::RealWait),
    (0x0076, Opcode::BoolComplement),
    (0x0077, Opcode::CastBool),
    (0x0078, Opcode::GreaterThan),
    (0x0079, Opcode::EvalArrayRef),
    (0x007A, Opcode::Notify),
    (0x007B, Opcode::GetVector),
    (0x007D, Opcode::GetGame),
    (0x007F, Opcode::SafeDecTop),
    (0x0080, Opcode::ScriptThreadCall),
    (0x0082, Opcode::GetSelfObject),
    (0x0083, Opcode::ClearArray),
    (0x0084, Opcode::GetSelf),
    (0x0085, Opcode::Dec),
    (0x0086, Opcode::EvalFieldVariableRef),
    (0x0088, Opcode::SetVariableField),
    (0x0089, Opcode::IsDefined),
    (0x008A, Opcode::WaitTillMatch),
    (0x008C, Opcode::AnglesToRight),
    (0x008D, Opcode::GetIString),
    (0x008E, Opcode::Wait),
    (0x008F, Opcode::WaitTill),
    (0x0090, Opcode::VectorConstant),
    (0x0092, Opcode::GetAnimObject),
    (0x0094, Opcode::GetString),
    (0x0095, Opcode::Switch),
    (0x0096, Opcode::GetDvarColorAlpha),
    (0x0097, Opcode::Plus),
    (0x0098, Opcode::GetGameRef),
    (0x0099, Opcode::Abort),
    (0x009A, Opcode::EndSwitch),
    (0x009B, Opcode::GetDvarInt),
    (0x009C, Opcode::Minus),
    (0x009D, Opcode::End),
    (0x009F, Opcode::GetInteger),
    (0x00A1, Opcode::CallBuiltinMethod),
    (0x00A2, Opcode::PreScriptCall),
    (0x00A3, Opcode::SafeSetVariableFieldCached),
    (0x00A4, Opcode::Equal),
    (0x00A5, Opcode::SizeOf),
    (0x00A6, Opcode::Object),
    (0x00A7, Opcode::AngleClamp180),
];
