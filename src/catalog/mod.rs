//! The per-hart register catalog: lazy construction, caching, and the two
//! iteration protocols the host debug framework drives.
//!
//! One catalog is built per view axis (`normal` = full in-simulation view,
//! `!normal` = restricted remote-protocol view) per hart instance, cached on
//! first use, and released at teardown. The General-only and CSR-only wire
//! views share the restricted catalog and differ only by a predicate applied
//! while iterating.

use std::sync::OnceLock;

use strum::IntoEnumIterator;
use tracing::{trace, warn};

use crate::config::{Isa, VREG_COUNT};
use crate::model::{Access, HartModel, ModelField, RawStorage};
use crate::names::{REG_X_RA, REG_X_SP, fpr_name, gpr_name, vreg_name};

pub mod access;
pub mod fields;
mod group;
mod integration;

pub use group::RegisterGroup;

use integration::integration_registers;

/// Protocol index of the first floating-point register.
pub const FPR0_INDEX: u32 = 33;

/// Protocol index of the first CSR (added to the architectural CSR number).
pub const CSR0_INDEX: u32 = 65;

/// Protocol index of the first integration-support register.
pub const ISR0_INDEX: u32 = 0x1100;

/// Protocol index of the first vector register.
pub const VREG0_INDEX: u32 = 0x2000;

/// Requested register view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    /// Every configured register; in-simulation inspection.
    Full,
    /// Restricted catalog minus the CSR groups; the remote protocol's
    /// general-register packet.
    General,
    /// Restricted catalog, CSR groups only; the remote protocol's CSR
    /// packet.
    Csr,
}

impl View {
    /// Which underlying catalog this view iterates.
    pub fn normal(self) -> bool {
        matches!(self, View::Full)
    }
}

/// Special role of a register, hinting the debug client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Usage {
    #[default]
    None,
    LinkRegister,
    StackPointer,
    ProgramCounter,
}

/// Read indirection for registers whose value cannot be read as a raw
/// bit-field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadHook {
    /// Synthesized program counter.
    Pc,
    /// Delegate to the CSR subsystem as an artifact access.
    Csr,
}

/// Write indirection for registers with side-effecting writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WriteHook {
    Pc,
    Csr,
    /// Enter or leave debug mode; only bit 0 of the written byte counts.
    DebugMode,
    /// Set or clear the debug-mode stall indication.
    DebugStall,
}

/// A sub-field of a register's storage, recorded by the field-association
/// pass after the catalog is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubField {
    pub field: ModelField,
    pub bits: u32,
}

/// One register as exposed to the external debug client.
///
/// Catalog arrays are terminated by a sentinel entry whose `name` is `None`;
/// every live entry has a name, unique within its catalog.
#[derive(Clone, Debug)]
pub struct RegisterDescriptor {
    pub name: Option<&'static str>,
    pub description: Option<&'static str>,
    pub group: RegisterGroup,
    /// Width in bits of the value the host reads or writes.
    pub bits: u32,
    /// Protocol-visible flat register index.
    pub gdb_index: u32,
    pub access: Access,
    /// Directly addressable storage, when the register has any.
    pub raw: Option<RawStorage>,
    pub read: Option<ReadHook>,
    pub write: Option<WriteHook>,
    pub usage: Usage,
    /// CSR attribute handle for CSR-hooked registers: the architectural CSR
    /// number the subsystem keys its attributes by.
    pub csr: Option<u32>,
    /// Exclude from save/restore.
    pub no_save_restore: bool,
    /// Exclude from change tracing.
    pub no_trace_change: bool,
    /// Multi-part register marker (0 when self-contained).
    pub extension: u32,
    /// Sub-fields recorded by the field-association pass.
    pub fields: Vec<SubField>,
}

impl RegisterDescriptor {
    /// Blank entry; doubles as the sentinel and as the struct-update base
    /// when populating the catalog.
    fn blank() -> Self {
        RegisterDescriptor {
            name: None,
            description: None,
            group: RegisterGroup::Core,
            bits: 0,
            gdb_index: 0,
            access: Access::ReadOnly,
            raw: None,
            read: None,
            write: None,
            usage: Usage::None,
            csr: None,
            no_save_restore: false,
            no_trace_change: false,
            extension: 0,
            fields: Vec::new(),
        }
    }

    /// Whether this is the terminating sentinel entry.
    pub fn is_sentinel(&self) -> bool {
        self.name.is_none()
    }

    /// Whether the entry is accepted by the given view's predicate.
    pub fn visible_in(&self, view: View) -> bool {
        match view {
            View::Full => true,
            View::General => !self.group.is_csr(),
            View::Csr => self.group.is_csr(),
        }
    }
}

/// Special purpose of the indexed GPR, if any.
fn gpr_usage(index: u32) -> Usage {
    if index == REG_X_RA {
        Usage::LinkRegister
    } else if index == REG_X_SP {
        Usage::StackPointer
    } else {
        Usage::None
    }
}

/// Build the catalog for one view axis. Called at most once per axis per
/// hart instance; the result is cached by [`RegisterCatalog`].
fn build<M: HartModel>(model: &M, normal: bool) -> Box<[RegisterDescriptor]> {
    let config = model.config();
    let xlen = model.xlen_arch();
    let mut flen = config.flen();

    // The remote protocol cannot describe FPRs wider or narrower than the
    // GPRs, so the restricted view coerces the apparent FPR width. The full
    // view is unaffected.
    if !normal && flen != xlen {
        warn!(
            xlen,
            flen, "FPR width differs from GPR width, which the remote debug \
             protocol does not support; forcing apparent FPR width to {xlen} bits"
        );
        flen = xlen;
    }

    // Per-kind counts for this view. The full view always reports the
    // complete 32-entry integer and floating-point files; only the
    // restricted view narrows them to what the variant configures.
    let gpr_num: u32 = if normal || config.isa.contains(Isa::I) { 32 } else { 16 };
    let fpr_num: u32 = if normal || config.isa.has_fp() { 32 } else { 0 };
    let vr_num: u32 = if normal && config.isa.contains(Isa::V) { VREG_COUNT } else { 0 };

    let mut csr_num: u32 = 0;
    let mut cursor = 0;
    while model.next_csr(&mut cursor, normal).is_some() {
        csr_num += 1;
    }

    let isr_num = integration_registers(&config, normal).count() as u32;

    let total = gpr_num + 1 + fpr_num + vr_num + csr_num + isr_num;
    let mut regs = Vec::with_capacity(total as usize + 1);

    for i in 0..gpr_num {
        regs.push(RegisterDescriptor {
            name: Some(gpr_name(i)),
            group: RegisterGroup::Core,
            bits: xlen,
            gdb_index: i,
            // x0 is hardwired to zero.
            access: if i == 0 { Access::ReadOnly } else { Access::ReadWrite },
            raw: Some(RawStorage::Gpr(i)),
            usage: gpr_usage(i),
            ..RegisterDescriptor::blank()
        });
    }

    regs.push(RegisterDescriptor {
        name: Some("pc"),
        group: RegisterGroup::Core,
        bits: xlen,
        gdb_index: gpr_num,
        access: Access::ReadWrite,
        read: Some(ReadHook::Pc),
        write: Some(WriteHook::Pc),
        usage: Usage::ProgramCounter,
        ..RegisterDescriptor::blank()
    });

    for i in 0..fpr_num {
        regs.push(RegisterDescriptor {
            name: Some(fpr_name(i)),
            group: RegisterGroup::FloatingPoint,
            bits: flen,
            gdb_index: i + FPR0_INDEX,
            access: Access::ReadWrite,
            raw: Some(RawStorage::Fpr(i)),
            ..RegisterDescriptor::blank()
        });
    }

    for i in 0..vr_num {
        regs.push(RegisterDescriptor {
            name: Some(vreg_name(i)),
            group: RegisterGroup::Vector,
            bits: config.vlen,
            gdb_index: i + VREG0_INDEX,
            access: Access::ReadWrite,
            raw: Some(RawStorage::Vreg(i)),
            ..RegisterDescriptor::blank()
        });
    }

    let mut cursor = 0;
    while let Some(csr) = model.next_csr(&mut cursor, normal) {
        regs.push(RegisterDescriptor {
            name: Some(csr.name),
            description: csr.desc,
            group: RegisterGroup::for_csr_mode(csr.mode),
            bits: xlen,
            gdb_index: csr.number + CSR0_INDEX,
            access: csr.access,
            raw: csr.raw,
            read: if csr.read_raw { None } else { Some(ReadHook::Csr) },
            write: if csr.write_raw { None } else { Some(WriteHook::Csr) },
            csr: Some(csr.number),
            no_save_restore: csr.no_save_restore,
            no_trace_change: csr.no_trace_change,
            extension: csr.extension,
            ..RegisterDescriptor::blank()
        });
    }

    for isr in integration_registers(&config, normal) {
        regs.push(RegisterDescriptor {
            name: Some(isr.name),
            description: Some(isr.desc),
            group: RegisterGroup::Integration,
            bits: if isr.bits == 0 { xlen } else { isr.bits },
            gdb_index: isr.index + ISR0_INDEX,
            access: isr.access,
            raw: isr.raw,
            read: isr.read,
            write: isr.write,
            no_trace_change: isr.no_trace_change,
            ..RegisterDescriptor::blank()
        });
    }

    regs.push(RegisterDescriptor::blank());

    trace!(
        normal,
        gprs = gpr_num,
        fprs = fpr_num,
        vrs = vr_num,
        csrs = csr_num,
        isrs = isr_num,
        "built register catalog"
    );

    regs.into_boxed_slice()
}

/// Per-hart owned cache of the two register catalogs.
///
/// Owned by the host's hart instance alongside its model state; built
/// lazily, released exactly once at teardown. The configuration is fixed for
/// the life of the catalog, so there is no invalidation path short of
/// [`RegisterCatalog::release`].
#[derive(Debug, Default)]
pub struct RegisterCatalog {
    info: [OnceLock<Box<[RegisterDescriptor]>>; 2],
}

impl RegisterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sentinel-terminated catalog array for one view axis, building it
    /// on first use.
    pub fn registers<M: HartModel>(&self, model: &M, normal: bool) -> &[RegisterDescriptor] {
        self.info[normal as usize].get_or_init(|| build(model, normal))
    }

    /// Cursor-protocol iteration: the next register visible in `view` after
    /// `prev`, or the first one when `prev` is `None`. A hart whose
    /// registers are shared upward by a child reports none at all.
    ///
    /// Iteration order is catalog build order and is stable for the life of
    /// the catalog.
    pub fn next_register<'a, M: HartModel>(
        &'a self,
        model: &M,
        prev: Option<&'a RegisterDescriptor>,
        view: View,
    ) -> Option<&'a RegisterDescriptor> {
        let regs = match prev {
            None if model.has_child() => return None,
            _ => self.registers(model, view.normal()),
        };

        let mut slot = match prev {
            None => 0,
            Some(prev) => slot_of(regs, prev) + 1,
        };

        while !regs[slot].is_sentinel() {
            if regs[slot].visible_in(view) {
                return Some(&regs[slot]);
            }
            slot += 1;
        }

        None
    }

    /// Cursor-protocol group iteration: the next group after `prev` that has
    /// at least one live member in the full catalog.
    pub fn next_group<M: HartModel>(
        &self,
        model: &M,
        prev: Option<RegisterGroup>,
    ) -> Option<RegisterGroup> {
        let mut iter = RegisterGroup::iter();
        if let Some(prev) = prev {
            // Resume after the cursor position.
            for group in iter.by_ref() {
                if group == prev {
                    break;
                }
            }
        }
        iter.find(|group| self.group_supported(model, *group))
    }

    /// Release both cached catalogs. Idempotent; used at hart teardown.
    pub fn release(&mut self) {
        for slot in &mut self.info {
            slot.take();
        }
    }

    /// Whether any register in the full catalog belongs to `group`.
    fn group_supported<M: HartModel>(&self, model: &M, group: RegisterGroup) -> bool {
        let mut reg = None;
        while let Some(next) = self.next_register(model, reg, View::Full) {
            if next.group == group {
                return true;
            }
            reg = Some(next);
        }
        false
    }
}

/// Slot index of `reg` within its owning catalog array.
///
/// The cursor protocol hands back a reference into the array; recovering its
/// position is plain offset arithmetic. A cursor that does not point into
/// `regs` is a caller sequencing bug.
fn slot_of(regs: &[RegisterDescriptor], reg: &RegisterDescriptor) -> usize {
    let base = regs.as_ptr() as usize;
    let addr = reg as *const RegisterDescriptor as usize;
    let size = std::mem::size_of::<RegisterDescriptor>();
    debug_assert!(
        addr >= base && addr < base + regs.len() * size && (addr - base) % size == 0,
        "register cursor does not point into this catalog"
    );
    (addr - base) / size
}
