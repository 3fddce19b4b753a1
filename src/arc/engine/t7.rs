//! Gen-four target: little-endian, 64-byte header, wide name fields.

use crate::types::{Build, Endian, Instance};

use super::super::context::{Context, Props};
use super::super::opcode::Opcode;

pub const MAGIC: u64 = 0x804753430D0A0036;

pub fn context(instance: Instance, build: Build) -> Context {
    Context::with_tables(
        Props::HEADER64.union(Props::SIZE64),
        Endian::Little,
        instance,
        build,
        MAGIC,
        CODE_LIST,
        0x4B9A_CA38,
        0x0100_0193,
    )
}

#[rustfmt::skip]
pub(crate) const CODE_LIST: &[(u16, Opcode)] = &[
    (0x0021, Opcode::NotEqual),
    (0x0023, Opcode::CastFieldObject),
    (0x0024, Opcode::GetIString),
    (0x0025, Opcode::GetTime),
    (0x0026, Opcode::GetZero),
    (0x0027, Opcode::EvalFieldVariable),
    (0x0028, Opcode::CallBuiltinMethod),
    (0x0029, Opcode::CallBuiltin),
    (0x002A, Opcode::GetSelfObject),
    (0x002B, Opcode::EndSwitch),
    (0x002D, Opcode::End),
    (0x002E, Opcode::VoidCodePos),
    (0x002F, Opcode::ClearFieldVariable),
    (0x0030, Opcode::GetVector),
    (0x0032, Opcode::Divide),
    (0x0033, Opcode::GetUnsignedShort),
    (0x0035, Opcode::EvalLocalArrayRefCached),
    (0x0036, Opcode::AnglesToUp),
    (0x0037, Opcode::Return),
    (0x0039, Opcode::VectorToAngles),
    (0x003A, Opcode::Equal),
    (0x003B, Opcode::GetHash),
    (0x003C, Opcode::Abs),
    (0x003D, Opcode::WaitTill),
    (0x003E, Opcode::ClearArray),
    (0x003F, Opcode::GetDvarFloat),
    (0x0040, Opcode::Vector),
    (0x0042, Opcode::GetByte),
    (0x0043, Opcode::ScriptThreadCallPointer),
    (0x0044, Opcode::WaitTillFrameEnd),
    (0x0045, Opcode::Minus),
    (0x0047, Opcode::SetVariableField),
    (0x0048, Opcode::Plus),
    (0x0049, Opcode::GetUndefined),
    (0x004A, Opcode::Abort),
    (0x004B, Opcode::Nop),
    (0x004C, Opcode::JumpOnFalseExpr),
    (0x004D, Opcode::ScriptThreadCall),
    (0x004F, Opcode::GetGameRef),
    (0x0050, Opcode::GetDvarColorRed),
    (0x0052, Opcode::BitXor),
    (0x0054, Opcode::JumpOnFalse),
    (0x0055, Opcode::GetFunction),
    (0x0056, Opcode::LessThanOrEqualTo),
    (0x0058, Opcode::EvalLocalVariableRef),
    (0x005A, Opcode::GetFloat),
    (0x005C, Opcode::Wait),
    (0x005E, Opcode::BitOr),
    (0x0060, Opcode::BitAnd),
    (0x0062, Opcode::AnglesToForward),
    (0x0063, Opcode::LessThan),
    (0x0064, Opcode::GetInteger),
    (0x0066, Opcode::AnglesToRight),
    (0x0068, Opcode::Notify),
    (0x0069, Opcode::Multiply),
    (0x006A, Opcode::EvalFieldVariableRef),
    (0x006B, Opcode::GetString),
    (0x006C, Opcode::ThreadObject),
    (0x006D, Opcode::Switch),
    (0x006E, Opcode::SafeDecTop),
    (0x0070, Opcode::Inc),
    (0x0071, Opcode::GetDvarVector),
    (0x0072, Opcode::Jump),
    (0x0073, Opcode::AngleClamp180),
    (0x0074, Opcode::ShiftLeft),
    (0x0075, Opcode::EvalLocalVariableRefCached),
    (0x0076, Opcode::GetDvar),
    (0x0077, Opcode::CastBool),
    (0x0078, Opcode::WaitTillMatch),
    (0x0079, Opcode::ScriptFunctionCallPointer),
    (0x007B, Opcode::ScriptMethodThreadCall),
    (0x007C, Opcode::SizeOf),
    (0x007D, Opcode::DecTop),
    (0x007E, Opcode::Object),
    (0x0080, Opcode::EvalArrayRef),
    (0x0081, Opcode::PreScriptCall),
    (0x0083, Opcode::GetNegUnsignedShort),
    (0x0084, Opcode::GreaterThanOrEqualTo),
    (0x0085, Opcode::GetAnimation),
    (0x0087, Opcode::EvalLocalVariableCached),
    (0x0088, Opcode::GetDvarColorBlue),
    (0x0089, Opcode::ClearParams),
    (0x008A, Opcode::JumpOnTrue),
    (0x008C, Opcode::GreaterThan),
    (0x008D, Opcode::SafeSetVariableFieldCached),
    (0x008E, Opcode::FirstArrayKey),
    (0x0090, Opcode::GetAnimObject),
    (0x0091, Opcode::RemoveLocalVariables),
    (0x0092, Opcode::JumpOnTrueExpr),
    (0x0094, Opcode::JumpBack),
    (0x0095, Opcode::VectorConstant),
    (0x0096, Opcode::ProfileStart),
    (0x0097, Opcode::SafeSetWaittillVariableFieldCached),
    (0x0098, Opcode::ScriptMethodCall),
    (0x0099, Opcode::SafeCreateLocalVariables),
    (0x009A, Opcode::EvalLocalVariable),
    (0x009B, Opcode::BoolComplement),
    (0x009C, Opcode::EmptyArray),
    (0x009D, Opcode::NextArrayKey),
    (0x009E, Opcode::ScriptFunctionCall),
    (0x009F, Opcode::IsDefined),
    (0x00A0, Opcode::GetDvarColorAlpha),
    (0x00A2, Opcode::ScriptMethodThreadCallPointer),
    (0x00A3, Opcode::Dec),
    (0x00A5, Opcode::GetGame),
    (0x00A6, Opcode::RealWait),
    (0x00A7, Opcode::VectorScale),
    (0x00A9, Opcode::CreateLocalVariable),
    (0x00AA, Opcode::GetLevelObject),
    (0x00AC, Opcode::BoolNot),
    (0x00AD, Opcode::GetDvarInt),
    (0x00AE, Opcode::GetLevel),
    (0x00B0, Opcode::ProfileStop),
    (0x00B1, Opcode::Modulus),
    (0x00B2, Opcode::EvalArray),
    (0x00B4, Opcode::GetDvarColorGreen),
    (0x00B6, Opcode::ScriptMethodCallPointer),
    (0x00B7, Opcode::GetAnim),
    (0x00B9, Opcode::GetSelf),
    (0x00BA, Opcode::GetNegByte),
    (0x00BC, Opcode::EndOn),
    (0x00BD, Opcode::CheckClearParams),
    (0x00BF, Opcode::DevblockBegin),
    (0x00C0, Opcode::ShiftRight),
];
