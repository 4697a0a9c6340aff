//! Access shims: read/write dispatch for registers whose storage is not a
//! plain bit-field.
//!
//! The host framework invokes these with a little-endian byte buffer sized
//! to the descriptor's bit-width. Registers with no hook delegate straight
//! to the model's raw storage access.

use anyhow::{Context, Result, bail, ensure};

use crate::catalog::{ReadHook, RegisterDescriptor, WriteHook};
use crate::model::HartModel;

/// Read `reg` into `buf`.
pub fn read_register<M: HartModel>(
    model: &mut M,
    reg: &RegisterDescriptor,
    buf: &mut [u8],
) -> Result<()> {
    match reg.read {
        Some(ReadHook::Pc) => read_pc(model, buf),
        Some(ReadHook::Csr) => {
            let number = csr_number(reg)?;
            let mut model = ArtifactGuard::new(model);
            model.read_csr(number, buf)
        }
        None => match reg.raw {
            Some(raw) => model.read_raw(raw, buf),
            None => bail!("register {:?} has no readable storage", reg.name),
        },
    }
}

/// Write `reg` from `buf`.
pub fn write_register<M: HartModel>(
    model: &mut M,
    reg: &RegisterDescriptor,
    buf: &[u8],
) -> Result<()> {
    match reg.write {
        Some(WriteHook::Pc) => write_pc(model, buf),
        Some(WriteHook::Csr) => {
            let number = csr_number(reg)?;
            let mut model = ArtifactGuard::new(model);
            model.write_csr(number, buf)
        }
        Some(WriteHook::DebugMode) => {
            ensure!(!buf.is_empty(), "empty buffer writing DM");
            model.set_debug_mode(buf[0] & 1 != 0);
            Ok(())
        }
        Some(WriteHook::DebugStall) => {
            ensure!(!buf.is_empty(), "empty buffer writing DMStall");
            model.set_debug_stall(buf[0] & 1 != 0);
            Ok(())
        }
        None => match reg.raw {
            Some(raw) => model.write_raw(raw, buf),
            None => bail!("register {:?} has no writable storage", reg.name),
        },
    }
}

/// Read the program counter at the architectural width.
fn read_pc<M: HartModel>(model: &M, buf: &mut [u8]) -> Result<()> {
    store_le(buf, model.pc(), model.xlen_arch())
}

/// Write the program counter at the current execution-mode width, which may
/// momentarily differ from the architectural width during a mode transition.
fn write_pc<M: HartModel>(model: &mut M, buf: &[u8]) -> Result<()> {
    let pc = load_le(buf, model.xlen_mode())?;
    model.set_pc(pc);
    Ok(())
}

fn csr_number(reg: &RegisterDescriptor) -> Result<u32> {
    reg.csr
        .with_context(|| format!("register {:?} has a CSR hook but no CSR number", reg.name))
}

fn store_le(buf: &mut [u8], value: u64, bits: u32) -> Result<()> {
    let bytes = (bits / 8) as usize;
    ensure!(buf.len() >= bytes, "buffer too small for {bits}-bit value");
    buf[..bytes].copy_from_slice(&value.to_le_bytes()[..bytes]);
    Ok(())
}

fn load_le(buf: &[u8], bits: u32) -> Result<u64> {
    let bytes = (bits / 8) as usize;
    ensure!(buf.len() >= bytes, "buffer too small for {bits}-bit value");
    let mut raw = [0u8; 8];
    raw[..bytes].copy_from_slice(&buf[..bytes]);
    Ok(u64::from_le_bytes(raw))
}

/// Scoped artifact-access marker.
///
/// Sets the model's artifact-access flag for the dynamic extent of a
/// debug-originated CSR access and restores the prior value on every exit
/// path, including errors. Nested accesses observe the flag already set and
/// restore it to set, so only the outermost access clears it.
struct ArtifactGuard<'a, M: HartModel> {
    model: &'a mut M,
    prior: bool,
}

impl<'a, M: HartModel> ArtifactGuard<'a, M> {
    fn new(model: &'a mut M) -> Self {
        let prior = model.artifact_access();
        model.set_artifact_access(true);
        ArtifactGuard { model, prior }
    }
}

impl<M: HartModel> Drop for ArtifactGuard<'_, M> {
    fn drop(&mut self) {
        self.model.set_artifact_access(self.prior);
    }
}

impl<M: HartModel> std::ops::Deref for ArtifactGuard<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.model
    }
}

impl<M: HartModel> std::ops::DerefMut for ArtifactGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.model
    }
}
