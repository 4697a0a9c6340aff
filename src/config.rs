//! Variant configuration consumed when a register catalog is built.
//!
//! This is a read-only snapshot of the hart's configuration: the catalog is
//! built once per view and the configuration is fixed for its lifetime, so
//! everything here is `Copy` and captured by value.

use bitflags::bitflags;

/// Number of vector registers when the V extension is configured.
pub const VREG_COUNT: u32 = 32;

bitflags! {
    /// ISA feature set of the configured variant, one bit per letter
    /// extension. Only a few of these gate catalog contents (`A`, `I`,
    /// `D`/`F`, `V`); the rest are carried so a variant can round-trip its
    /// complete feature set through the snapshot.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Isa: u32 {
        /// Atomic instructions.
        const A = 1 << 0;
        /// Compressed instructions.
        const C = 1 << 2;
        /// Double-precision floating point.
        const D = 1 << 3;
        /// Embedded (16-register) integer subset.
        const E = 1 << 4;
        /// Single-precision floating point.
        const F = 1 << 5;
        /// Full (32-register) integer register file.
        const I = 1 << 8;
        /// Integer multiply/divide.
        const M = 1 << 12;
        /// User-level interrupts.
        const N = 1 << 13;
        /// Supervisor mode.
        const S = 1 << 18;
        /// User mode.
        const U = 1 << 20;
        /// Vector extension.
        const V = 1 << 21;
        /// Non-standard extensions present.
        const X = 1 << 23;
    }
}

impl Isa {
    /// Any floating-point register file at all.
    pub fn has_fp(self) -> bool {
        self.intersects(Isa::D | Isa::F)
    }
}

/// Debug-capability level of the variant, ordered: a register that requires
/// `Vector` is visible on `Vector` and `Halt` variants but not `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DebugMode {
    /// No debug-mode support.
    #[default]
    None,
    /// Debug exceptions re-enter via the exception vector.
    Vector,
    /// Debug exceptions halt the hart.
    Halt,
}

/// Read-only configuration snapshot, captured from the hart's variant
/// configuration at catalog-build time.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Configured ISA feature set.
    pub isa: Isa,
    /// Integer register width in bits.
    pub xlen: u32,
    /// Floating-point register width in bits, if floating point is
    /// configured. Defaults to `xlen` when absent.
    pub flen: Option<u32>,
    /// Vector register width in bits.
    pub vlen: u32,
    /// Debug-capability level.
    pub debug_mode: DebugMode,
}

impl Config {
    /// Effective floating-point register width.
    pub fn flen(&self) -> u32 {
        self.flen.unwrap_or(self.xlen)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            isa: Isa::I,
            xlen: 64,
            flen: None,
            vlen: 0,
            debug_mode: DebugMode::None,
        }
    }
}
