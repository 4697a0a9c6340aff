#![allow(dead_code)]
//! Mock hart model shared by the integration tests.
//!
//! Implements [`HartModel`] over plain arrays and a field map, with knobs
//! for topology, CSR visibility per view, and injected CSR access failures.

use std::collections::HashMap;

use anyhow::{Result, bail};
use rvregs::{Access, Config, CsrDetails, CsrMode, HartModel, ModelField, RawStorage};

/// One CSR the mock subsystem reports, optionally only in the full view.
#[derive(Clone, Copy, Debug)]
pub struct MockCsr {
    pub details: CsrDetails,
    pub normal_only: bool,
}

/// Plain read-write CSR with no raw bypass.
pub fn csr(name: &'static str, number: u32, mode: CsrMode) -> MockCsr {
    MockCsr {
        details: CsrDetails {
            name,
            desc: None,
            number,
            mode,
            access: Access::ReadWrite,
            raw: None,
            read_raw: false,
            write_raw: false,
            extension: 0,
            no_save_restore: false,
            no_trace_change: false,
        },
        normal_only: false,
    }
}

/// A small believable CSR set: two machine-mode CSRs, one user-mode CSR,
/// and a debug CSR the subsystem hides from the remote-protocol view.
pub fn standard_csrs() -> Vec<MockCsr> {
    let mut dcsr = csr("dcsr", 0x7b0, CsrMode::Machine);
    dcsr.normal_only = true;
    vec![
        csr("mstatus", 0x300, CsrMode::Machine),
        csr("misa", 0x301, CsrMode::Machine),
        csr("fflags", 0x001, CsrMode::User),
        dcsr,
    ]
}

pub struct MockHart {
    pub config: Config,
    pub pc: u64,
    /// Execution-mode XLEN, which tests may skew from the architectural one.
    pub xlen_mode: u32,
    pub gprs: [u64; 32],
    pub fprs: [u64; 32],
    pub vregs: [u64; 32],
    pub fields: HashMap<ModelField, u64>,
    pub csrs: Vec<MockCsr>,
    pub csr_values: HashMap<u32, u64>,
    /// CSR number whose reads and writes are refused by the subsystem.
    pub fail_csr: Option<u32>,
    pub debug_mode: bool,
    pub debug_stall: bool,
    pub artifact: bool,
    /// Artifact-flag values observed inside each delegated CSR access.
    pub seen_artifact: Vec<bool>,
    pub child: bool,
    pub cluster: bool,
}

impl MockHart {
    pub fn new(config: Config) -> Self {
        MockHart {
            config,
            pc: 0,
            xlen_mode: config.xlen,
            gprs: [0; 32],
            fprs: [0; 32],
            vregs: [0; 32],
            fields: HashMap::new(),
            csrs: Vec::new(),
            csr_values: HashMap::new(),
            fail_csr: None,
            debug_mode: false,
            debug_stall: false,
            artifact: false,
            seen_artifact: Vec::new(),
            child: false,
            cluster: false,
        }
    }

    pub fn with_csrs(mut self, csrs: Vec<MockCsr>) -> Self {
        self.csrs = csrs;
        self
    }
}

fn copy_le(value: u64, buf: &mut [u8]) {
    let n = buf.len().min(8);
    buf[..n].copy_from_slice(&value.to_le_bytes()[..n]);
}

fn value_le(buf: &[u8]) -> u64 {
    let mut raw = [0u8; 8];
    let n = buf.len().min(8);
    raw[..n].copy_from_slice(&buf[..n]);
    u64::from_le_bytes(raw)
}

impl HartModel for MockHart {
    fn config(&self) -> Config {
        self.config
    }

    fn pc(&self) -> u64 {
        self.pc
    }

    fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    fn xlen_arch(&self) -> u32 {
        self.config.xlen
    }

    fn xlen_mode(&self) -> u32 {
        self.xlen_mode
    }

    fn next_csr(&self, cursor: &mut u32, normal: bool) -> Option<CsrDetails> {
        while (*cursor as usize) < self.csrs.len() {
            let entry = &self.csrs[*cursor as usize];
            *cursor += 1;
            if normal || !entry.normal_only {
                return Some(entry.details);
            }
        }
        None
    }

    fn read_csr(&mut self, number: u32, buf: &mut [u8]) -> Result<()> {
        self.seen_artifact.push(self.artifact);
        if self.fail_csr == Some(number) {
            bail!("csr {number:#x} access refused");
        }
        copy_le(self.csr_values.get(&number).copied().unwrap_or(0), buf);
        Ok(())
    }

    fn write_csr(&mut self, number: u32, buf: &[u8]) -> Result<()> {
        self.seen_artifact.push(self.artifact);
        if self.fail_csr == Some(number) {
            bail!("csr {number:#x} access refused");
        }
        self.csr_values.insert(number, value_le(buf));
        Ok(())
    }

    fn read_raw(&self, raw: RawStorage, buf: &mut [u8]) -> Result<()> {
        let value = match raw {
            RawStorage::Gpr(i) => self.gprs[i as usize],
            RawStorage::Fpr(i) => self.fprs[i as usize],
            RawStorage::Vreg(i) => self.vregs[i as usize],
            RawStorage::Field(f) => self.fields.get(&f).copied().unwrap_or(0),
        };
        copy_le(value, buf);
        Ok(())
    }

    fn write_raw(&mut self, raw: RawStorage, buf: &[u8]) -> Result<()> {
        let value = value_le(buf);
        match raw {
            RawStorage::Gpr(i) => self.gprs[i as usize] = value,
            RawStorage::Fpr(i) => self.fprs[i as usize] = value,
            RawStorage::Vreg(i) => self.vregs[i as usize] = value,
            RawStorage::Field(f) => {
                self.fields.insert(f, value);
            }
        }
        Ok(())
    }

    fn set_debug_mode(&mut self, active: bool) {
        self.debug_mode = active;
    }

    fn set_debug_stall(&mut self, stalled: bool) {
        self.debug_stall = stalled;
    }

    fn artifact_access(&self) -> bool {
        self.artifact
    }

    fn set_artifact_access(&mut self, artifact: bool) {
        self.artifact = artifact;
    }

    fn has_child(&self) -> bool {
        self.child
    }

    fn is_cluster(&self) -> bool {
        self.cluster
    }
}

/// Initialize test logging; safe to call from every test.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
