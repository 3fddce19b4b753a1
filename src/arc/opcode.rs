use std::fmt;

use serde::{Deserialize, Serialize};

/// Abstract instruction tag for the ARC family. Engine variants map
/// each tag to their own byte value through the context's code table;
/// the tag itself carries no encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    End, Return, GetUndefined, GetZero,
    GetLevelObject, GetAnimObject, GetSelf, GetLevel,
    GetGame, GetAnim, GetGameRef, CreateLocalVariable,
    EvalArray, EvalArrayRef, ClearArray, EmptyArray,
    GetSelfObject, SafeSetVariableFieldCached, ClearParams, CheckClearParams,
    SetVariableField, Wait, WaitTillFrameEnd, PreScriptCall,
    DecTop, CastFieldObject, CastBool, BoolNot,
    BoolComplement, Inc, Dec, BitOr,
    BitXor, BitAnd, Equal, NotEqual,
    LessThan, GreaterThan, LessThanOrEqualTo, GreaterThanOrEqualTo,
    ShiftLeft, ShiftRight, Plus, Minus,
    Multiply, Divide, Modulus, SizeOf,
    WaitTill, Notify, EndOn, VoidCodePos,
    Vector, RealWait, IsDefined, VectorScale,
    AnglesToUp, AnglesToRight, AnglesToForward, AngleClamp180,
    VectorToAngles, Abs, GetTime, GetDvar,
    GetDvarInt, GetDvarFloat, GetDvarVector, GetDvarColorRed,
    GetDvarColorGreen, GetDvarColorBlue, GetDvarColorAlpha, FirstArrayKey,
    NextArrayKey, ProfileStart, ProfileStop, SafeDecTop,
    Nop, Abort, Object, ThreadObject,
    EvalLocalVariable, EvalLocalVariableRef, GetByte, GetNegByte,
    GetUnsignedShort, GetNegUnsignedShort, GetInteger, GetFloat,
    GetVector, GetString, GetIString, GetAnimation,
    WaitTillMatch, VectorConstant, GetHash, SafeCreateLocalVariables,
    RemoveLocalVariables, EvalLocalVariableCached, EvalLocalArrayRefCached, SafeSetWaittillVariableFieldCached,
    EvalLocalVariableRefCached, EvalFieldVariable, EvalFieldVariableRef, ClearFieldVariable,
    ScriptFunctionCallPointer, ScriptMethodCallPointer, ScriptThreadCallPointer, ScriptMethodThreadCallPointer,
    GetFunction, CallBuiltin, CallBuiltinMethod, ScriptFunctionCall,
    ScriptMethodCall, ScriptThreadCall, ScriptMethodThreadCall, JumpOnFalse,
    JumpOnTrue, JumpOnFalseExpr, JumpOnTrueExpr, Jump,
    JumpBack, DevblockBegin, Switch, EndSwitch,
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// On-disk operand shape of an opcode. The layout pass, the emission
/// pass, and the string-pool pre-pass are three walks over this one
/// table, so the per-opcode knowledge lives in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OperandKind {
    /// No operand bytes.
    None,
    /// One literal byte (immediates, cached variable slots, pointer
    /// call argument counts).
    U8,
    /// 2-aligned u16 immediate.
    U16,
    /// 4-aligned i32 immediate; with a second operand the slot holds
    /// -1 and the operands name an animtree reference instead.
    IntOrTree,
    /// 4-aligned f32 immediate.
    F32,
    /// 4-aligned triple of f32.
    Vec3,
    /// 2-aligned u16 placeholder patched through the string fixup
    /// table.
    StringId,
    /// 4-aligned u32 placeholder recorded as an animtree reference.
    Anim,
    /// 4-aligned u32 identifier hash.
    Hash32,
    /// Count byte plus one 2-aligned u16 canonical-string slot per
    /// local variable.
    LocalVars,
    /// 2-aligned u16 canonical-string slot for a field name.
    FieldId,
    /// 4-aligned u32 placeholder resolved through the import table.
    FuncGet,
    /// Argument byte plus 4-aligned u32 placeholder; the import
    /// reference points at the instruction start.
    Call,
    /// 2-aligned i16 label displacement.
    Jump,
    /// 4-aligned i32 displacement to a 4-aligned switch table base.
    SwitchJump,
    /// 4-aligned case count followed by 8-byte case entries.
    SwitchTable,
}

impl OperandKind {
    /// Baseline instruction size: opcode byte plus operand bytes,
    /// before any alignment padding the layout pass inserts.
    pub(crate) fn base_size(self) -> usize {
        match self {
            OperandKind::None => 1,
            OperandKind::U8 => 2,
            OperandKind::U16 => 3,
            OperandKind::IntOrTree | OperandKind::F32 => 5,
            OperandKind::Vec3 => 13,
            OperandKind::StringId | OperandKind::FieldId => 3,
            OperandKind::Anim | OperandKind::Hash32 => 5,
            OperandKind::LocalVars => 2,
            OperandKind::FuncGet => 5,
            OperandKind::Call => 6,
            OperandKind::Jump => 3,
            OperandKind::SwitchJump | OperandKind::SwitchTable => 5,
        }
    }
}

pub(crate) fn operands(op: Opcode) -> OperandKind {
    use Opcode::*;
    match op {
        GetByte | GetNegByte | WaitTillMatch | VectorConstant | RemoveLocalVariables
        | EvalLocalVariableCached | EvalLocalArrayRefCached
        | SafeSetWaittillVariableFieldCached | EvalLocalVariableRefCached
        | ScriptFunctionCallPointer | ScriptMethodCallPointer | ScriptThreadCallPointer
        | ScriptMethodThreadCallPointer => OperandKind::U8,
        GetUnsignedShort | GetNegUnsignedShort => OperandKind::U16,
        GetInteger => OperandKind::IntOrTree,
        GetFloat => OperandKind::F32,
        GetVector => OperandKind::Vec3,
        GetString | GetIString => OperandKind::StringId,
        GetAnimation => OperandKind::Anim,
        GetHash => OperandKind::Hash32,
        SafeCreateLocalVariables => OperandKind::LocalVars,
        EvalFieldVariable | EvalFieldVariableRef | ClearFieldVariable => OperandKind::FieldId,
        GetFunction => OperandKind::FuncGet,
        CallBuiltin | CallBuiltinMethod | ScriptFunctionCall | ScriptMethodCall
        | ScriptThreadCall | ScriptMethodThreadCall => OperandKind::Call,
        JumpOnFalse | JumpOnTrue | JumpOnFalseExpr | JumpOnTrueExpr | Jump | JumpBack
        | DevblockBegin => OperandKind::Jump,
        Switch => OperandKind::SwitchJump,
        EndSwitch => OperandKind::SwitchTable,
        _ => OperandKind::None,
    }
}
