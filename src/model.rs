//! Collaborator surface of the host hart model.
//!
//! The catalog never owns architectural state. Everything it needs from the
//! surrounding model (the CSR subsystem, the execution-state accessors, raw
//! storage access, debug-state transitions and the topology) is reached
//! through [`HartModel`], implemented by the host simulator on its per-hart
//! instance type.

use anyhow::Result;

use crate::config::Config;

/// Reference to a directly addressable storage location in the model.
///
/// Descriptors whose storage is a plain bit-field carry one of these; the
/// host reads and writes it without going through an access hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawStorage {
    /// Integer register file slot.
    Gpr(u32),
    /// Floating-point register file slot.
    Fpr(u32),
    /// Vector register file slot.
    Vreg(u32),
    /// A named internal state field.
    Field(ModelField),
}

/// Internal model state fields that are surfaced as integration registers or
/// linked to registers by the field-association pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelField {
    /// Active LR/SC reservation address.
    LrScAddress,
    /// Debug-mode-active flag.
    DebugMode,
    /// Debug-mode-stalled flag.
    DebugStall,
    /// Commercial-feature-in-use flag.
    Commercial,
    /// Accumulated floating-point exception flags (aliases `fflags`).
    FpFlags,
    /// Fixed-point saturation flag (aliases `vxsat`).
    Sfmt,
    /// Physical-memory-protection lookup key, artifact state.
    PmKey,
    /// Vector first-fault bookkeeping, artifact state.
    VFirstFault,
    /// Vector operation base bookkeeping, artifact state.
    VBase,
    /// Jump-target scratch, artifact state.
    JumpBase,
}

impl ModelField {
    /// Storage width of the field in bits.
    pub fn bits(self) -> u32 {
        match self {
            ModelField::LrScAddress | ModelField::VBase | ModelField::JumpBase => 64,
            ModelField::PmKey => 32,
            ModelField::DebugMode
            | ModelField::DebugStall
            | ModelField::Commercial
            | ModelField::FpFlags
            | ModelField::Sfmt
            | ModelField::VFirstFault => 8,
        }
    }
}

/// Privilege mode that owns a CSR, selecting its register group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CsrMode {
    User,
    Supervisor,
    Reserved,
    Machine,
}

/// Read-only / read-write classification of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// One CSR as reported by the CSR subsystem's enumerator.
///
/// `read_raw`/`write_raw` indicate that the subsystem permits direct access
/// to `raw` for that direction; otherwise the catalog installs the CSR
/// access hook, which delegates back to [`HartModel::read_csr`] /
/// [`HartModel::write_csr`].
#[derive(Clone, Copy, Debug)]
pub struct CsrDetails {
    /// Architectural name, e.g. `"mstatus"`.
    pub name: &'static str,
    /// Human-readable description.
    pub desc: Option<&'static str>,
    /// Architectural CSR number.
    pub number: u32,
    /// Owning privilege mode.
    pub mode: CsrMode,
    /// Debugger access classification.
    pub access: Access,
    /// Backing storage, when the CSR is plain state.
    pub raw: Option<RawStorage>,
    /// Reads may bypass the subsystem and use `raw` directly.
    pub read_raw: bool,
    /// Writes may bypass the subsystem and use `raw` directly.
    pub write_raw: bool,
    /// Multi-part register marker (0 when the CSR is self-contained).
    pub extension: u32,
    /// Exclude from save/restore.
    pub no_save_restore: bool,
    /// Exclude from change tracing.
    pub no_trace_change: bool,
}

/// Host hart model, as seen by the register catalog.
///
/// All methods are synchronous and must not call back into the catalog,
/// except that a CSR access may trigger a nested register access; the
/// artifact-access flag uses save/restore discipline so the nested call
/// leaves the outer call's flag intact.
pub trait HartModel {
    /// Variant configuration snapshot.
    fn config(&self) -> Config;

    // Execution-state accessor.

    /// Current program counter.
    fn pc(&self) -> u64;

    /// Set the program counter.
    fn set_pc(&mut self, pc: u64);

    /// Architectural integer register width in bits.
    fn xlen_arch(&self) -> u32;

    /// Integer register width of the current execution mode in bits. May
    /// momentarily differ from [`HartModel::xlen_arch`] during a mode
    /// transition.
    fn xlen_mode(&self) -> u32;

    // CSR subsystem.

    /// Yield the next CSR visible to the debugger for this variant and
    /// view, advancing `cursor`. Returns `None` when exhausted. `cursor`
    /// starts at 0 and is otherwise opaque to the caller.
    fn next_csr(&self, cursor: &mut u32, normal: bool) -> Option<CsrDetails>;

    /// Read CSR `number` into `buf`. Permission and validity checks are the
    /// subsystem's own.
    fn read_csr(&mut self, number: u32, buf: &mut [u8]) -> Result<()>;

    /// Write CSR `number` from `buf`.
    fn write_csr(&mut self, number: u32, buf: &[u8]) -> Result<()>;

    // Raw storage.

    /// Read a directly addressable storage location into `buf`.
    fn read_raw(&self, raw: RawStorage, buf: &mut [u8]) -> Result<()>;

    /// Write a directly addressable storage location from `buf`.
    fn write_raw(&mut self, raw: RawStorage, buf: &[u8]) -> Result<()>;

    // Debug-state transitions.

    /// Force the hart into or out of debug mode.
    fn set_debug_mode(&mut self, active: bool);

    /// Mark the hart stalled or running in debug mode.
    fn set_debug_stall(&mut self, stalled: bool);

    // Artifact-access flag.

    /// Whether the current access is a debug-originated artifact access.
    fn artifact_access(&self) -> bool;

    /// Set the artifact-access flag. Callers must save and restore the
    /// prior value; see [`crate::catalog::access`].
    fn set_artifact_access(&mut self, artifact: bool);

    // Topology accessor.

    /// Whether this instance has a simulated child sharing its registers.
    fn has_child(&self) -> bool;

    /// Whether this instance is a cluster container rather than a hart.
    fn is_cluster(&self) -> bool;
}
