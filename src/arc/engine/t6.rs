//! Gen-three console target: big-endian, 64-byte header, 16-bit string handles.

use crate::types::{Build, Endian, Instance};

use super::super::context::{Context, Props};
use super::super::opcode::Opcode;

pub const MAGIC: u64 = 0x804753430D0A0006;

pub fn context(instance: Instance, build: Build) -> Context {
    Context::with_tables(
        Props::HEADER64,
        Endian::Big,
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
    (0x0001, Opcode::Divide),
    (0x0002, Opcode::GreaterThanOrEqualTo),
    (0x0003, Opcode::GetSelfObject),
    (0x0004, Opcode::BoolComplement),
    (0x0005, Opcode::ScriptMethodThreadCall),
    (0x0006, Opcode::Switch),
    (0x0007, Opcode::Abs),
    (0x0008, Opcode::CallBuiltinMethod),
    (0x0009, Opcode::GetNegByte),
    (0x000A, Opcode::Inc),
    (0x000B, Opcode::ScriptMethodThreadCallPointer),
    (0x000C, Opcode::GetSelf),
    (0x000D, Opcode::AnglesToRight),
    (0x000E, Opcode::CastBool),
    (0x000F, Opcode::BoolNot),
    (0x0010, Opcode::FirstArrayKey),
    (0x0011, Opcode::EndOn),
    (0x0012, Opcode::SetVariableField),
    (0x0013, Opcode::DevblockBegin),
    (0x0014, Opcode::RealWait),
    (0x0015, Opcode::Multiply),
    (0x0016, Opcode::GetDvarColorRed),
    (0x0017, Opcode::VoidCodePos),
    (0x0018, Opcode::ScriptFunctionCallPointer),
    (0x0019, Opcode::ShiftRight),
    (0x001A, Opcode::AngleClamp180),
    (0x001B, Opcode::LessThan),
    (0x001C, Opcode::EmptyArray),
    (0x001D, Opcode::NotEqual),
    (0x001E, Opcode::JumpOnTrue),
    (0x001F, Opcode::GetAnim),
    (0x0020, Opcode::AnglesToForward),
    (0x0021, Opcode::WaitTill),
    (0x0022, Opcode::PreScriptCall),
    (0x0023, Opcode::Notify),
    (0x0024, Opcode::Wait),
    (0x0025, Opcode::Return),
    (0x0026, Opcode::JumpBack),
    (0x0027, Opcode::GetFunction),
    (0x0028, Opcode::JumpOnFalse),
    (0x0029, Opcode::ScriptThreadCallPointer),
    (0x002A, Opcode::EvalArrayRef),
    (0x002B, Opcode::EvalLocalVariableRef),
    (0x002C, Opcode::GetGame),
    (0x002D, Opcode::ClearArray),
    (0x002E, Opcode::Dec),
    (0x002F, Opcode::WaitTillMatch),
    (0x0030, Opcode::GetNegUnsignedShort),
    (0x0031, Opcode::GetDvarVector),
    (0x0032, Opcode::CheckClearParams),
    (0x0033, Opcode::SafeSetVariableFieldCached),
    (0x0034, Opcode::GetAnimation),
    (0x0035, Opcode::GetDvar),
    (0x0036, Opcode::ScriptFunctionCall),
    (0x0037, Opcode::ScriptMethodCall),
    (0x0038, Opcode::GetIString),
    (0x0039, Opcode::Minus),
    (0x003A, Opcode::ThreadObject),
    (0x003B, Opcode::EvalLocalVariable),
    (0x003C, Opcode::ProfileStop),
    (0x003D, Opcode::GetLevel),
    (0x003E, Opcode::Nop),
    (0x003F, Opcode::WaitTillFrameEnd),
    (0x0040, Opcode::LessThanOrEqualTo),
    (0x0041, Opcode::VectorScale),
    (0x0042, Opcode::BitOr),
    (0x0043, Opcode::EvalLocalVariableRefCached),
    (0x0044, Opcode::GetZero),
    (0x0045, Opcode::GetDvarInt),
    (0x0046, Opcode::GetDvarFloat),
    (0x0047, Opcode::CallBuiltin),
    (0x0048, Opcode::ClearFieldVariable),
    (0x0049, Opcode::GetByte),
    (0x004A, Opcode::Abort),
    (0x004B, Opcode::GetAnimObject),
    (0x004C, Opcode::GetVector),
    (0x004D, Opcode::GreaterThan),
    (0x004E, Opcode::EndSwitch),
    (0x004F, Opcode::SafeCreateLocalVariables),
    (0x0050, Opcode::AnglesToUp),
    (0x0051, Opcode::BitXor),
    (0x0052, Opcode::SafeSetWaittillVariableFieldCached),
    (0x0053, Opcode::Modulus),
    (0x0054, Opcode::GetInteger),
    (0x0055, Opcode::Plus),
    (0x0056, Opcode::IsDefined),
    (0x0057, Opcode::CreateLocalVariable),
    (0x0058, Opcode::RemoveLocalVariables),
    (0x0059, Opcode::Object),
    (0x005A, Opcode::ScriptThreadCall),
    (0x005B, Opcode::JumpOnFalseExpr),
    (0x005C, Opcode::GetString),
    (0x005D, Opcode::GetDvarColorAlpha),
    (0x005E, Opcode::NextArrayKey),
    (0x005F, Opcode::DecTop),
    (0x0060, Opcode::EvalArray),
    (0x0061, Opcode::GetFloat),
    (0x0062, Opcode::GetDvarColorBlue),
    (0x0063, Opcode::GetDvarColorGreen),
    (0x0064, Opcode::Vector),
    (0x0065, Opcode::VectorConstant),
    (0x0066, Opcode::CastFieldObject),
    (0x0067, Opcode::EvalFieldVariableRef),
    (0x0068, Opcode::Jump),
    (0x0069, Opcode::Equal),
    (0x006A, Opcode::GetUndefined),
    (0x006B, Opcode::EvalLocalArrayRefCached),
    (0x006C, Opcode::ShiftLeft),
    (0x006D, Opcode::SizeOf),
    (0x006E, Opcode::GetHash),
    (0x006F, Opcode::JumpOnTrueExpr),
    (0x0070, Opcode::VectorToAngles),
    (0x0071, Opcode::SafeDecTop),
    (0x0072, Opcode::GetUnsignedShort),
    (0x0073, Opcode::ClearParams),
    (0x0074, Opcode::End),
    (0x0075, Opcode::GetLevelObject),
    (0x0076, Opcode::BitAnd),
    (0x0077, Opcode::EvalLocalVariableCached),
    (0x0078, Opcode::GetTime),
    (0x0079, Opcode::GetGameRef),
    (0x007A, Opcode::ScriptMethodCallPointer),
    (0x007B, Opcode::ProfileStart),
    (0x007C, Opcode::EvalFieldVariable),
];
