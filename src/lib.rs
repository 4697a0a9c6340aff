//! Debug register catalog for a configurable RISC-V hart model.
//!
//! The register set a hart exposes to debug tooling depends on its run-time
//! configuration (XLEN, enabled ISA extensions, vector length, debug-mode
//! support, per-mode CSR visibility) and on which view is requested: the
//! full in-simulation view, or the restricted remote-protocol views that
//! split general registers from CSRs. This crate derives that variant- and
//! view-specific catalog lazily, caches it per hart instance, classifies
//! every register into a named group, and provides the read/write
//! indirection for registers whose storage is synthesized or side-effecting
//! (the PC, CSRs behind the subsystem's permission logic, debug-support
//! registers that toggle debug-mode state).
//!
//! The host simulator implements [`HartModel`] on its hart instance type and
//! owns a [`RegisterCatalog`] next to it; the wire protocol itself, the CSR
//! subsystem's permission logic, and the register file storage all stay on
//! the host side.

use strum::Display;

pub mod catalog;
pub mod config;
pub mod model;
pub mod names;

pub use catalog::access::{read_register, write_register};
pub use catalog::fields::HIDDEN_FIELDS;
pub use catalog::{
    ReadHook, RegisterCatalog, RegisterDescriptor, RegisterGroup, SubField, Usage, View, WriteHook,
};
pub use config::{Config, DebugMode, Isa, VREG_COUNT};
pub use model::{Access, CsrDetails, CsrMode, HartModel, ModelField, RawStorage};

/// Topology role of a processor instance.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum ProcessorKind {
    /// A leaf hart with its own register file.
    Hart,
    /// A container of harts with no registers of its own.
    Cluster,
    /// A symmetric-multiprocessing parent whose child owns the registers.
    #[strum(serialize = "SMP")]
    Smp,
}

/// Describe the topology role of this instance for the debug client.
pub fn describe<M: HartModel>(model: &M) -> ProcessorKind {
    if model.is_cluster() {
        ProcessorKind::Cluster
    } else if model.has_child() {
        ProcessorKind::Smp
    } else {
        ProcessorKind::Hart
    }
}
