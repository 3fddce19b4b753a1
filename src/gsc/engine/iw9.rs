//! Gen-nine target: hashed identifiers everywhere, 32-bit token and
//! string ids, hashed far-call descriptors, 8-bit offset shift, and
//! its own switch-table case encoding.

use crate::types::{Build, Endian, Instance};

use super::super::context::{Context, Engine, Props};
use super::super::opcode::Opcode;

pub fn context(instance: Instance, build: Build) -> Context {
    Context::with_tables(
        Props::HASH
            .union(Props::FARCALL)
            .union(Props::TOK4)
            .union(Props::STR4)
            .union(Props::OFFS8),
        Engine::Iw9,
        Endian::Little,
        instance,
        build,
        CODE_LIST,
        &[],
        &[],
        &[],
        0,
        0x47F5_817A_5EF9_61BA,
        0x0000_0100_0000_01B3,
    )
}

#[rustfmt::skip]
pub(crate) const CODE_LIST: &[(u8, Opcode)] = &[
    (0x01, Opcode::ScriptLocalFunctionCall2),
    (0x02, Opcode::ScriptLocalMethodChildThreadCall),
    (0x03, Opcode::EvalLocalVariableRefCached0),
    (0x04, Opcode::GetIString),
    (0x05, Opcode::EvalLocalArrayRefCached0),
    (0x06, Opcode::EvalArrayRef),
    (0x07, Opcode::JumpOnFalseExpr),
    (0x08, Opcode::ScriptMethodCallPointer),
    (0x09, Opcode::GetEnumHash),
    (0x0A, Opcode::ScriptLocalThreadCall),
    (0x0B, Opcode::SafeCreateVariableFieldCached),
    (0x0C, Opcode::EvalLocalArrayRefCached),
    (0x0D, Opcode::JumpOnFalse),
    (0x0E, Opcode::EvalNewLocalArrayRefCached0),
    (0x0F, Opcode::EvalFieldVariableRef),
    (0x10, Opcode::CallBuiltinMethodPointer),
    (0x11, Opcode::ScriptMethodChildThreadCallPointer),
    (0x12, Opcode::GetUnsignedShort),
    (0x13, Opcode::EvalLevelFieldVariableRef),
    (0x14, Opcode::IsTrue),
    (0x15, Opcode::CallBuiltin1),
    (0x16, Opcode::ClearArray),
    (0x17, Opcode::ScriptMethodThreadCallPointer),
    (0x18, Opcode::GetZero),
    (0x19, Opcode::CheckClearParams),
    (0x1A, Opcode::SafeSetVariableFieldCached),
    (0x1B, Opcode::Less),
    (0x1C, Opcode::WaitTillMatch),
    (0x1D, Opcode::GetAnimTree),
    (0x1E, Opcode::GetVector),
    (0x1F, Opcode::SetVariableField),
    (0x20, Opcode::GetNegUnsignedInt),
    (0x21, Opcode::GetSelfObject),
    (0x22, Opcode::GetGameRef),
    (0x23, Opcode::Wait),
    (0x24, Opcode::EvalFieldVariable),
    (0x25, Opcode::GetUnkxHash),
    (0x26, Opcode::EvalLocalVariableRefCached),
    (0x27, Opcode::WaitTill),
    (0x28, Opcode::ScriptFunctionCallPointer),
    (0x29, Opcode::Switch),
    (0x2A, Opcode::EvalAnimFieldVariableRef),
    (0x2B, Opcode::GetUndefined),
    (0x2C, Opcode::BitOr),
    (0x2D, Opcode::IsDefined),
    (0x2E, Opcode::JumpOnTrueExpr),
    (0x2F, Opcode::ClearLocalVariableFieldCached),
    (0x30, Opcode::Notify),
    (0x31, Opcode::Equality),
    (0x32, Opcode::VoidCodePos),
    (0x33, Opcode::GetUnsignedInt),
    (0x34, Opcode::SetLevelFieldVariableField),
    (0x35, Opcode::DecTop),
    (0x36, Opcode::CallBuiltin3),
    (0x37, Opcode::GetAnimation),
    (0x38, Opcode::Plus),
    (0x39, Opcode::CastBool),
    (0x3A, Opcode::EvalLocalVariableCached0),
    (0x3B, Opcode::EvalLocalVariableCached4),
    (0x3C, Opcode::RemoveLocalVariables),
    (0x3D, Opcode::GetFarFunction),
    (0x3E, Opcode::CallBuiltinPointer),
    (0x3F, Opcode::Dec),
    (0x40, Opcode::EvalNewLocalVariableRefCached0),
    (0x41, Opcode::CallBuiltin4),
    (0x42, Opcode::EvalLevelFieldVariable),
    (0x43, Opcode::ClearLocalVariableFieldCached0),
    (0x44, Opcode::CallBuiltin0),
    (0x45, Opcode::Vector),
    (0x46, Opcode::GreaterEqual),
    (0x47, Opcode::BoolNot),
    (0x48, Opcode::CallBuiltin2),
    (0x49, Opcode::SafeSetVariableFieldCached0),
    (0x4A, Opcode::CallBuiltinMethod4),
    (0x4B, Opcode::CallBuiltin),
    (0x4C, Opcode::ScriptThreadCallPointer),
    (0x4D, Opcode::WaitTillMatch2),
    (0x4E, Opcode::Inc),
    (0x4F, Opcode::AddArray),
    (0x50, Opcode::EvalLocalVariableCached5),
    (0x51, Opcode::GetLevel),
    (0x52, Opcode::WaitTillFrameEnd),
    (0x53, Opcode::Mod),
    (0x54, Opcode::GetLevelObject),
    (0x55, Opcode::GetThisthread),
    (0x56, Opcode::FormalParams),
    (0x57, Opcode::EvalLocalVariableCached3),
    (0x58, Opcode::JumpOnTrue),
    (0x59, Opcode::GetGame),
    (0x5A, Opcode::ScriptFarChildThreadCall),
    (0x5B, Opcode::BoolComplement),
    (0x5C, Opcode::GetAnimObject),
    (0x5D, Opcode::CallBuiltinMethod5),
    (0x5E, Opcode::GetLocalFunction),
    (0x5F, Opcode::EvalLocalVariableCached),
    (0x60, Opcode::CallBuiltinMethod0),
    (0x61, Opcode::Size),
    (0x62, Opcode::ScriptLocalMethodCall),
    (0x63, Opcode::GetAnim),
    (0x64, Opcode::ScriptChildThreadCallPointer),
    (0x65, Opcode::CastFieldObject),
    (0x66, Opcode::WaitFrame),
    (0x67, Opcode::GetDvarHash),
    (0x68, Opcode::BoolNotAfterAnd),
    (0x69, Opcode::SetSelfFieldVariableField),
    (0x6A, Opcode::Divide),
    (0x6B, Opcode::GetInteger64),
    (0x6C, Opcode::Jump),
    (0x6D, Opcode::EndOn),
    (0x6E, Opcode::EvalArray),
    (0x6F, Opcode::ClearParams),
    (0x70, Opcode::End),
    (0x71, Opcode::CreateLocalVariable),
    (0x72, Opcode::SetLocalVariableFieldCached0),
    (0x73, Opcode::SetLocalVariableFieldCached),
    (0x74, Opcode::ScriptLocalFunctionCall),
    (0x75, Opcode::BitExOr),
    (0x76, Opcode::ScriptFarThreadCall),
    (0x77, Opcode::ScriptFarMethodChildThreadCall),
    (0x78, Opcode::ClearVariableField),
    (0x79, Opcode::GetFloat),
    (0x7A, Opcode::ScriptLocalChildThreadCall),
    (0x7B, Opcode::Return),
    (0x7C, Opcode::EndSwitch),
    (0x7D, Opcode::Multiply),
    (0x7E, Opcode::EvalSelfFieldVariableRef),
    (0x7F, Opcode::GetByte),
    (0x80, Opcode::GetNegUnsignedShort),
    (0x81, Opcode::SetAnimFieldVariableField),
    (0x82, Opcode::EvalLocalArrayCached),
    (0x83, Opcode::ClearFieldVariable),
    (0x84, Opcode::ScriptFarFunctionCall),
    (0x85, Opcode::Greater),
    (0x86, Opcode::EvalSelfFieldVariable),
    (0x87, Opcode::GetSelf),
    (0x88, Opcode::CallBuiltinMethod),
    (0x89, Opcode::SafeSetWaittillVariableFieldCached),
    (0x8A, Opcode::EvalAnimFieldVariable),
    (0x8B, Opcode::ScriptFarMethodThreadCall),
    (0x8C, Opcode::EvalLocalVariableCached1),
    (0x8D, Opcode::GetBuiltinFunction),
    (0x8E, Opcode::ShiftLeft),
    (0x8F, Opcode::JumpBack),
    (0x90, Opcode::ShiftRight),
    (0x91, Opcode::GetInteger),
    (0x92, Opcode::CallBuiltin5),
    (0x93, Opcode::CallBuiltinMethod1),
    (0x94, Opcode::Inequality),
    (0x95, Opcode::GetString),
    (0x96, Opcode::SetNewLocalVariableFieldCached0),
    (0x97, Opcode::CallBuiltinMethod3),
    (0x98, Opcode::LessEqual),
    (0x99, Opcode::BitAnd),
    (0x9A, Opcode::CallBuiltinMethod2),
    (0x9B, Opcode::Minus),
    (0x9C, Opcode::GetBuiltinMethod),
    (0x9D, Opcode::GetNegByte),
    (0x9E, Opcode::ScriptFarMethodCall),
    (0x9F, Opcode::GetStatHash),
    (0xA0, Opcode::EvalLocalVariableObjectCached),
    (0xA1, Opcode::EmptyArray),
    (0xA2, Opcode::ScriptLocalMethodThreadCall),
    (0xA3, Opcode::EvalLocalVariableCached2),
    (0xA4, Opcode::ScriptFarFunctionCall2),
    (0xA5, Opcode::PreScriptCall),
];
