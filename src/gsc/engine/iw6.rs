//! Gen-six target: little-endian, 16-bit token and string ids, token
//! pairs in the stack segment for far calls.

use crate::types::{Build, Endian, Instance};

use super::super::context::{Context, Engine, Props};
use super::super::opcode::Opcode;

pub fn context(instance: Instance, build: Build) -> Context {
    Context::with_tables(
        Props::EXTENSION,
        Engine::Iw6,
        Endian::Little,
        instance,
        build,
        CODE_LIST,
        TOKEN_LIST,
        FUNC_LIST,
        METH_LIST,
        MAX_STRING_ID,
        0xCBF2_9CE4_8422_2325,
        0x0000_0100_0000_01B3,
    )
}

/// Highest interned string id shipped with this variant's table.
pub(crate) const MAX_STRING_ID: u32 = 16;

/// Interned identifier tokens. The full engine table is external
/// data; this is the slice the toolchain ships.
pub(crate) const TOKEN_LIST: &[(&str, u32)] = &[
    ("accuracy", 1),
    ("actionslot", 2),
    ("angles", 3),
    ("attacker", 4),
    ("classname", 5),
    ("count", 6),
    ("health", 7),
    ("model", 8),
    ("name", 9),
    ("origin", 10),
    ("owner", 11),
    ("parent", 12),
    ("score", 13),
    ("size", 14),
    ("team", 15),
    ("time", 16),
    ("maps/mp/_utility", 0x5F01),
    ("common_scripts/utility", 0x5F02),
];

pub(crate) const FUNC_LIST: &[(&str, u16)] = &[
    ("getdvar", 0x01A2),
    ("getdvarint", 0x01A3),
    ("getent", 0x01C8),
    ("gettime", 0x0021),
    ("isdefined", 0x0142),
    ("print", 0x01BD),
    ("println", 0x01BE),
    ("spawn", 0x01D0),
];

pub(crate) const METH_LIST: &[(&str, u16)] = &[
    ("giveweapon", 0x8372),
    ("playsound", 0x80DF),
    ("setmodel", 0x80A5),
    ("setorigin", 0x8312),
    ("settext", 0x82AF),
];

#[rustfmt::skip]
pub(crate) const CODE_LIST: &[(u8, Opcode)] = &[
    (0x01, Opcode::CreateLocalVariable),
    (0x02, Opcode::ClearVariableField),
    (0x03, Opcode::Less),
    (0x04, Opcode::GetGame),
    (0x05, Opcode::GetLocalFunction),
    (0x06, Opcode::EvalLocalVariableRefCached),
    (0x07, Opcode::GetUnkxHash),
    (0x08, Opcode::VoidCodePos),
    (0x09, Opcode::SetSelfFieldVariableField),
    (0x0A, Opcode::WaitTillMatch),
    (0x0B, Opcode::GetFarFunction),
    (0x0C, Opcode::EvalFieldVariable),
    (0x0D, Opcode::ScriptFarThreadCall),
    (0x0E, Opcode::EvalLocalVariableCached0),
    (0x0F, Opcode::ScriptLocalChildThreadCall),
    (0x10, Opcode::EvalNewLocalVariableRefCached0),
    (0x11, Opcode::RemoveLocalVariables),
    (0x12, Opcode::GetVector),
    (0x13, Opcode::CheckClearParams),
    (0x14, Opcode::GetAnimTree),
    (0x15, Opcode::Wait),
    (0x16, Opcode::CallBuiltinMethodPointer),
    (0x17, Opcode::BoolNotAfterAnd),
    (0x18, Opcode::Mod),
    (0x19, Opcode::ScriptMethodCallPointer),
    (0x1A, Opcode::Return),
    (0x1B, Opcode::SetLocalVariableFieldCached0),
    (0x1C, Opcode::EvalSelfFieldVariableRef),
    (0x1D, Opcode::CallBuiltin1),
    (0x1E, Opcode::EvalArrayRef),
    (0x1F, Opcode::EvalNewLocalArrayRefCached0),
    (0x20, Opcode::WaitTill),
    (0x21, Opcode::EvalLocalVariableCached4),
    (0x22, Opcode::JumpOnFalse),
    (0x23, Opcode::LessEqual),
    (0x24, Opcode::ScriptLocalMethodThreadCall),
    (0x25, Opcode::Jump),
    (0x26, Opcode::GetThisthread),
    (0x27, Opcode::EvalLocalVariableObjectCached),
    (0x28, Opcode::GetLevelObject),
    (0x29, Opcode::ClearParams),
    (0x2A, Opcode::CastBool),
    (0x2B, Opcode::GetNegUnsignedShort),
    (0x2C, Opcode::GetSelf),
    (0x2D, Opcode::ScriptFarMethodCall),
    (0x2E, Opcode::End),
    (0x2F, Opcode::EvalArray),
    (0x30, Opcode::EndOn),
    (0x31, Opcode::GetFloat),
    (0x32, Opcode::DecTop),
    (0x33, Opcode::EvalLocalArrayRefCached),
    (0x34, Opcode::CallBuiltinMethod),
    (0x35, Opcode::BoolComplement),
    (0x36, Opcode::EvalLocalVariableCached5),
    (0x37, Opcode::SafeSetVariableFieldCached),
    (0x38, Opcode::EndSwitch),
    (0x39, Opcode::Minus),
    (0x3A, Opcode::GetByte),
    (0x3B, Opcode::IsDefined),
    (0x3C, Opcode::AddArray),
    (0x3D, Opcode::ScriptLocalThreadCall),
    (0x3E, Opcode::ScriptLocalMethodCall),
    (0x3F, Opcode::ScriptFarChildThreadCall),
    (0x40, Opcode::EvalLevelFieldVariableRef),
    (0x41, Opcode::Inequality),
    (0x42, Opcode::Dec),
    (0x43, Opcode::GetLevel),
    (0x44, Opcode::GetIString),
    (0x45, Opcode::ScriptFunctionCallPointer),
    (0x46, Opcode::ScriptChildThreadCallPointer),
    (0x47, Opcode::EvalLocalVariableCached3),
    (0x48, Opcode::EvalLocalVariableCached),
    (0x49, Opcode::GetBuiltinMethod),
    (0x4A, Opcode::PreScriptCall),
    (0x4B, Opcode::GetUndefined),
    (0x4C, Opcode::GetInteger64),
    (0x4D, Opcode::SafeSetWaittillVariableFieldCached),
    (0x4E, Opcode::ClearLocalVariableFieldCached0),
    (0x4F, Opcode::EvalLocalVariableRefCached0),
    (0x50, Opcode::ScriptMethodThreadCallPointer),
    (0x51, Opcode::SetAnimFieldVariableField),
    (0x52, Opcode::CallBuiltinMethod0),
    (0x53, Opcode::GetStatHash),
    (0x54, Opcode::SetNewLocalVariableFieldCached0),
    (0x55, Opcode::ScriptLocalFunctionCall2),
    (0x56, Opcode::BitExOr),
    (0x57, Opcode::Greater),
    (0x58, Opcode::CallBuiltin),
    (0x59, Opcode::EmptyArray),
    (0x5A, Opcode::EvalLocalVariableCached1),
    (0x5B, Opcode::GetDvarHash),
    (0x5C, Opcode::ShiftLeft),
    (0x5D, Opcode::CallBuiltinMethod2),
    (0x5E, Opcode::GetString),
    (0x5F, Opcode::Divide),
    (0x60, Opcode::Switch),
    (0x61, Opcode::GetNegUnsignedInt),
    (0x62, Opcode::EvalFieldVariableRef),
    (0x63, Opcode::Size),
    (0x64, Opcode::ScriptFarFunctionCall2),
    (0x65, Opcode::CallBuiltinMethod4),
    (0x66, Opcode::JumpOnFalseExpr),
    (0x67, Opcode::ScriptFarMethodChildThreadCall),
    (0x68, Opcode::CallBuiltin2),
    (0x69, Opcode::JumpOnTrueExpr),
    (0x6A, Opcode::SetLocalVariableFieldCached),
    (0x6B, Opcode::GetAnim),
    (0x6C, Opcode::ScriptLocalMethodChildThreadCall),
    (0x6D, Opcode::SafeSetVariableFieldCached0),
    (0x6E, Opcode::Equality),
    (0x6F, Opcode::EvalLevelFieldVariable),
    (0x70, Opcode::JumpOnTrue),
    (0x71, Opcode::ClearArray),
    (0x72, Opcode::GreaterEqual),
    (0x73, Opcode::GetBuiltinFunction),
    (0x74, Opcode::EvalLocalArrayRefCached0),
    (0x75, Opcode::SetVariableField),
    (0x76, Opcode::EvalLocalVariableCached2),
    (0x77, Opcode::GetAnimObject),
    (0x78, Opcode::ScriptFarFunctionCall),
    (0x79, Opcode::CastFieldObject),
    (0x7A, Opcode::EvalLocalArrayCached),
    (0x7B, Opcode::JumpBack),
    (0x7C, Opcode::Notify),
    (0x7D, Opcode::CallBuiltin5),
    (0x7E, Opcode::CallBuiltin0),
    (0x7F, Opcode::GetNegByte),
    (0x80, Opcode::ScriptFarMethodThreadCall),
    (0x81, Opcode::GetZero),
    (0x82, Opcode::ClearFieldVariable),
    (0x83, Opcode::ScriptLocalFunctionCall),
    (0x84, Opcode::GetEnumHash),
    (0x85, Opcode::GetSelfObject),
    (0x86, Opcode::SetLevelFieldVariableField),
    (0x87, Opcode::CallBuiltinMethod5),
    (0x88, Opcode::FormalParams),
    (0x89, Opcode::CallBuiltin4),
    (0x8A, Opcode::WaitTillFrameEnd),
    (0x8B, Opcode::CallBuiltinMethod1),
    (0x8C, Opcode::EvalAnimFieldVariable),
    (0x8D, Opcode::CallBuiltinPointer),
    (0x8E, Opcode::BitOr),
    (0x8F, Opcode::Vector),
    (0x90, Opcode::CallBuiltin3),
    (0x91, Opcode::Multiply),
    (0x92, Opcode::CallBuiltinMethod3),
    (0x93, Opcode::ShiftRight),
    (0x94, Opcode::GetInteger),
    (0x95, Opcode::WaitTillMatch2),
    (0x96, Opcode::GetAnimation),
    (0x97, Opcode::GetUnsignedInt),
    (0x98, Opcode::GetUnsignedShort),
    (0x99, Opcode::GetGameRef),
    (0x9A, Opcode::BoolNot),
    (0x9B, Opcode::Inc),
    (0x9C, Opcode::BitAnd),
    (0x9D, Opcode::SafeCreateVariableFieldCached),
    (0x9E, Opcode::Plus),
    (0x9F, Opcode::EvalAnimFieldVariableRef),
    (0xA0, Opcode::WaitFrame),
    (0xA1, Opcode::EvalSelfFieldVariable),
    (0xA2, Opcode::IsTrue),
    (0xA3, Opcode::ScriptMethodChildThreadCallPointer),
    (0xA4, Opcode::ScriptThreadCallPointer),
    (0xA5, Opcode::ClearLocalVariableFieldCached),
];
