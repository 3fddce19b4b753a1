use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract instruction tag for the GSC family. Engine variants map
/// each tag to their own byte value through the context's code table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    CastFieldObject, Plus, GetGameRef, GetThisthread,
    Greater, ShiftRight, Dec, BitOr,
    Equality, ClearLocalVariableFieldCached0, Notify, PreScriptCall,
    GetUndefined, SetLocalVariableFieldCached0, GetLevel, Size,
    AddArray, EndOn, ShiftLeft, EvalLocalArrayRefCached0,
    Return, SafeSetVariableFieldCached0, GetSelfObject, GetGame,
    EvalArray, GetSelf, End, LessEqual,
    EvalLocalVariableCached0, EvalLocalVariableCached1, EvalLocalVariableCached2, EvalLocalVariableCached3,
    EvalLocalVariableCached4, EvalLocalVariableCached5, ScriptMethodCallPointer, CheckClearParams,
    WaitTillMatch2, Minus, GreaterEqual, Vector,
    ClearArray, DecTop, CastBool, EvalArrayRef,
    GetZero, Wait, WaitTill, GetAnimObject,
    Mod, ClearParams, ScriptFunctionCallPointer, EmptyArray,
    ClearVariableField, EvalNewLocalVariableRefCached0, BoolComplement, Less,
    BoolNot, WaitTillFrameEnd, WaitFrame, GetLevelObject,
    Inc, GetAnim, SetVariableField, Divide,
    Multiply, EvalLocalVariableRefCached0, BitAnd, VoidCodePos,
    Inequality, BitExOr, BoolNotAfterAnd, IsDefined,
    IsTrue, GetByte, GetNegByte, GetUnsignedShort,
    GetNegUnsignedShort, GetUnsignedInt, GetNegUnsignedInt, GetInteger,
    GetInteger64, GetFloat, GetVector, GetString,
    GetIString, GetAnimation, GetAnimTree, GetUnkxHash,
    GetStatHash, GetEnumHash, GetDvarHash, WaitTillMatch,
    ClearLocalVariableFieldCached, SetLocalVariableFieldCached, RemoveLocalVariables, EvalLocalVariableRefCached,
    EvalLocalArrayRefCached, SafeSetVariableFieldCached, EvalLocalVariableCached, SafeSetWaittillVariableFieldCached,
    EvalLocalVariableObjectCached, EvalLocalArrayCached, CreateLocalVariable, EvalNewLocalArrayRefCached0,
    SafeCreateVariableFieldCached, SetNewLocalVariableFieldCached0, EvalSelfFieldVariable, SetLevelFieldVariableField,
    ClearFieldVariable, EvalFieldVariable, EvalFieldVariableRef, EvalLevelFieldVariable,
    SetAnimFieldVariableField, SetSelfFieldVariableField, EvalAnimFieldVariableRef, EvalLevelFieldVariableRef,
    EvalAnimFieldVariable, EvalSelfFieldVariableRef, CallBuiltinPointer, CallBuiltinMethodPointer,
    ScriptThreadCallPointer, ScriptChildThreadCallPointer, ScriptMethodThreadCallPointer, ScriptMethodChildThreadCallPointer,
    GetLocalFunction, ScriptLocalFunctionCall2, ScriptLocalFunctionCall, ScriptLocalMethodCall,
    ScriptLocalThreadCall, ScriptLocalChildThreadCall, ScriptLocalMethodThreadCall, ScriptLocalMethodChildThreadCall,
    GetFarFunction, ScriptFarFunctionCall2, ScriptFarFunctionCall, ScriptFarMethodCall,
    ScriptFarThreadCall, ScriptFarChildThreadCall, ScriptFarMethodThreadCall, ScriptFarMethodChildThreadCall,
    CallBuiltin, CallBuiltinMethod, GetBuiltinFunction, CallBuiltin0,
    CallBuiltin1, CallBuiltin2, CallBuiltin3, CallBuiltin4,
    CallBuiltin5, GetBuiltinMethod, CallBuiltinMethod0, CallBuiltinMethod1,
    CallBuiltinMethod2, CallBuiltinMethod3, CallBuiltinMethod4, CallBuiltinMethod5,
    JumpOnFalseExpr, JumpOnTrueExpr, JumpOnFalse, JumpOnTrue,
    JumpBack, Jump, Switch, EndSwitch,
    FormalParams,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// On-disk operand shape of a GSC opcode. One table, consulted by the
/// emission dispatch and by the size query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OperandKind {
    /// No operand bytes.
    None,
    /// One literal byte (immediates, cached variable slots, pointer
    /// call argument counts).
    U8,
    U16,
    U32,
    I32,
    I64,
    F32,
    /// Three f32, 4-aligned on big-endian targets only.
    Vec3,
    /// Placeholder string id in the script, literal in the stack.
    StringId,
    /// Placeholder animation id, tree and animation names in the
    /// stack.
    Anim,
    /// One placeholder byte, tree name in the stack.
    AnimTree,
    /// u32 literal parsed base-16.
    HashHex32,
    /// u64 literal parsed base-16.
    HashHex64,
    /// Variable-creation slot: identifier hash when the variant hashes
    /// locals, else a one-byte slot index.
    CreateVar,
    /// Field name: identifier hash, or token id with a stack spill for
    /// uninterned names.
    FieldId,
    /// Packed 24-bit displacement to a local function.
    CallLocal { thread: bool },
    /// Cross-script call through the stack segment.
    CallFar { thread: bool },
    /// Engine-builtin call by function/method id.
    Builtin { method: bool, args: bool },
    /// i16 displacement relative to the operand end.
    JumpCond,
    /// i16 backwards displacement.
    JumpBack,
    /// i32 displacement.
    Jump,
    /// i32 displacement to the switch table.
    Switch,
    /// Case count plus per-case value/target records.
    SwitchTable,
    /// Formal parameter list: count plus one byte or hash per name.
    Params,
}

pub(crate) fn operands(op: Opcode) -> OperandKind {
    use Opcode::*;
    match op {
        GetByte | GetNegByte | WaitTillMatch | ClearLocalVariableFieldCached
        | SetLocalVariableFieldCached | RemoveLocalVariables | EvalLocalVariableRefCached
        | EvalLocalArrayRefCached | SafeSetVariableFieldCached | EvalLocalVariableCached
        | SafeSetWaittillVariableFieldCached | EvalLocalVariableObjectCached
        | EvalLocalArrayCached | CallBuiltinPointer | CallBuiltinMethodPointer
        | ScriptThreadCallPointer | ScriptChildThreadCallPointer
        | ScriptMethodThreadCallPointer | ScriptMethodChildThreadCallPointer => OperandKind::U8,
        GetUnsignedShort | GetNegUnsignedShort => OperandKind::U16,
        GetUnsignedInt | GetNegUnsignedInt => OperandKind::U32,
        GetInteger => OperandKind::I32,
        GetInteger64 => OperandKind::I64,
        GetFloat => OperandKind::F32,
        GetVector => OperandKind::Vec3,
        GetString | GetIString => OperandKind::StringId,
        GetAnimation => OperandKind::Anim,
        GetAnimTree => OperandKind::AnimTree,
        GetUnkxHash => OperandKind::HashHex32,
        GetStatHash | GetEnumHash | GetDvarHash => OperandKind::HashHex64,
        CreateLocalVariable | EvalNewLocalArrayRefCached0 | SafeCreateVariableFieldCached
        | SetNewLocalVariableFieldCached0 => OperandKind::CreateVar,
        EvalSelfFieldVariable | SetLevelFieldVariableField | ClearFieldVariable
        | EvalFieldVariable | EvalFieldVariableRef | EvalLevelFieldVariable
        | SetAnimFieldVariableField | SetSelfFieldVariableField | EvalAnimFieldVariableRef
        | EvalLevelFieldVariableRef | EvalAnimFieldVariable | EvalSelfFieldVariableRef => {
            OperandKind::FieldId
        }
        GetLocalFunction | ScriptLocalFunctionCall2 | ScriptLocalFunctionCall
        | ScriptLocalMethodCall => OperandKind::CallLocal { thread: false },
        ScriptLocalThreadCall | ScriptLocalChildThreadCall | ScriptLocalMethodThreadCall
        | ScriptLocalMethodChildThreadCall => OperandKind::CallLocal { thread: true },
        GetFarFunction | ScriptFarFunctionCall2 | ScriptFarFunctionCall | ScriptFarMethodCall => {
            OperandKind::CallFar { thread: false }
        }
        ScriptFarThreadCall | ScriptFarChildThreadCall | ScriptFarMethodThreadCall
        | ScriptFarMethodChildThreadCall => OperandKind::CallFar { thread: true },
        CallBuiltin => OperandKind::Builtin {
            method: false,
            args: true,
        },
        CallBuiltinMethod => OperandKind::Builtin {
            method: true,
            args: true,
        },
        GetBuiltinFunction | CallBuiltin0 | CallBuiltin1 | CallBuiltin2 | CallBuiltin3
        | CallBuiltin4 | CallBuiltin5 => OperandKind::Builtin {
            method: false,
            args: false,
        },
        GetBuiltinMethod | CallBuiltinMethod0 | CallBuiltinMethod1 | CallBuiltinMethod2
        | CallBuiltinMethod3 | CallBuiltinMethod4 | CallBuiltinMethod5 => OperandKind::Builtin {
            method: true,
            args: false,
        },
        JumpOnFalseExpr | JumpOnTrueExpr | JumpOnFalse | JumpOnTrue => OperandKind::JumpCond,
        JumpBack => OperandKind::JumpBack,
        Jump => OperandKind::Jump,
        Switch => OperandKind::Switch,
        EndSwitch => OperandKind::SwitchTable,
        FormalParams => OperandKind::Params,
        _ => OperandKind::None,
    }
}
