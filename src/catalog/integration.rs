//! Integration-support register table.
//!
//! These are synthetic registers exposing internal model state to debug
//! tooling; they are not part of the architectural register file and only
//! exist in the full (normal) view.

use crate::catalog::{ReadHook, WriteHook};
use crate::config::{Config, DebugMode, Isa};
use crate::model::{Access, ModelField, RawStorage};

/// One row of the integration-register table.
#[derive(Debug)]
pub(crate) struct IsrDetails {
    pub name: &'static str,
    pub desc: &'static str,
    /// ISA features that must all be present for this entry to apply.
    pub arch: Isa,
    /// Entry index; offset into the integration protocol index range.
    pub index: u32,
    /// Register width in bits, 0 meaning the configured XLEN.
    pub bits: u32,
    pub raw: Option<RawStorage>,
    pub read: Option<ReadHook>,
    pub write: Option<WriteHook>,
    pub access: Access,
    pub no_trace_change: bool,
    /// Minimum debug-capability level at which the entry is visible.
    pub min_debug: DebugMode,
}

/// Table rows in declaration order; iteration order is table order.
pub(crate) static ISR_TABLE: &[IsrDetails] = &[
    IsrDetails {
        name: "LRSCAddress",
        desc: "LR/SC active lock address",
        arch: Isa::A,
        index: 0,
        bits: 0,
        raw: Some(RawStorage::Field(ModelField::LrScAddress)),
        read: None,
        write: None,
        access: Access::ReadWrite,
        no_trace_change: false,
        min_debug: DebugMode::None,
    },
    IsrDetails {
        name: "DM",
        desc: "Debug mode active",
        arch: Isa::empty(),
        index: 1,
        bits: 8,
        raw: Some(RawStorage::Field(ModelField::DebugMode)),
        read: None,
        write: Some(WriteHook::DebugMode),
        access: Access::ReadWrite,
        no_trace_change: false,
        min_debug: DebugMode::Vector,
    },
    IsrDetails {
        name: "DMStall",
        desc: "Debug mode stalled",
        arch: Isa::empty(),
        index: 2,
        bits: 8,
        raw: Some(RawStorage::Field(ModelField::DebugStall)),
        read: None,
        write: Some(WriteHook::DebugStall),
        access: Access::ReadWrite,
        no_trace_change: false,
        min_debug: DebugMode::Halt,
    },
    IsrDetails {
        name: "commercial",
        desc: "Commercial feature in use",
        arch: Isa::empty(),
        index: 3,
        bits: 8,
        raw: Some(RawStorage::Field(ModelField::Commercial)),
        read: None,
        write: None,
        access: Access::ReadOnly,
        no_trace_change: false,
        min_debug: DebugMode::None,
    },
];

/// Integration registers visible for this configuration and view, in
/// declaration order. The restricted view never carries any: integration
/// registers are an in-simulation inspection concept, not part of the
/// remote-protocol register set.
pub(crate) fn integration_registers(
    config: &Config,
    normal: bool,
) -> impl Iterator<Item = &'static IsrDetails> {
    let isa = config.isa;
    let debug_mode = config.debug_mode;
    ISR_TABLE
        .iter()
        .filter(move |isr| normal && isa.contains(isr.arch) && debug_mode >= isr.min_debug)
}
