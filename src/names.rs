//! Conventional ABI names for the architectural register files.
//!
//! The debug client sees ABI names (`ra`, `sp`, `fa0`, ...) rather than raw
//! `x`/`f` indices, matching what assemblers and gdb print.

/// ABI names for the 32 integer registers.
static XREG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", //
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5", //
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", //
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// ABI names for the 32 floating-point registers.
static FREG_NAMES: [&str; 32] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7", //
    "fs0", "fs1", "fa0", "fa1", "fa2", "fa3", "fa4", "fa5", //
    "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7", //
    "fs8", "fs9", "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

/// Vector registers have no ABI aliases; the architectural names are used.
static VREG_NAMES: [&str; 32] = [
    "v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7", //
    "v8", "v9", "v10", "v11", "v12", "v13", "v14", "v15", //
    "v16", "v17", "v18", "v19", "v20", "v21", "v22", "v23", //
    "v24", "v25", "v26", "v27", "v28", "v29", "v30", "v31",
];

/// ABI name of integer register `x<index>`.
///
/// Panics if `index` is not below 32.
pub fn gpr_name(index: u32) -> &'static str {
    XREG_NAMES[index as usize]
}

/// ABI name of floating-point register `f<index>`.
///
/// Panics if `index` is not below 32.
pub fn fpr_name(index: u32) -> &'static str {
    FREG_NAMES[index as usize]
}

/// Name of vector register `v<index>`.
///
/// Panics if `index` is not below 32.
pub fn vreg_name(index: u32) -> &'static str {
    VREG_NAMES[index as usize]
}

/// Integer register index holding the return address (`ra`).
pub const REG_X_RA: u32 = 1;

/// Integer register index holding the stack pointer (`sp`).
pub const REG_X_SP: u32 = 2;
