//! Static register-group table.
//!
//! Groups are a fixed, ordered set; a group with no live member in the
//! current variant's catalog is skipped during iteration, so the debug
//! client only ever sees populated groups.

use strum::EnumIter;

use crate::model::CsrMode;

/// Named register group, declared in iteration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum RegisterGroup {
    /// Integer registers and the program counter.
    Core,
    FloatingPoint,
    Vector,
    UserCsr,
    SupervisorCsr,
    ReservedCsr,
    MachineCsr,
    /// Synthetic debug/integration-support registers.
    Integration,
}

impl RegisterGroup {
    /// Stable identifier shown to the debug client.
    pub fn name(self) -> &'static str {
        match self {
            RegisterGroup::Core => "Core",
            RegisterGroup::FloatingPoint => "Floating_point",
            RegisterGroup::Vector => "Vector",
            RegisterGroup::UserCsr => "User_Control_and_Status",
            RegisterGroup::SupervisorCsr => "Supervisor_Control_and_Status",
            RegisterGroup::ReservedCsr => "Reserved",
            RegisterGroup::MachineCsr => "Machine_Control_and_Status",
            RegisterGroup::Integration => "Integration_support",
        }
    }

    /// Whether this group holds CSRs, the axis the wire-protocol packet
    /// views partition on.
    pub fn is_csr(self) -> bool {
        matches!(
            self,
            RegisterGroup::UserCsr
                | RegisterGroup::SupervisorCsr
                | RegisterGroup::ReservedCsr
                | RegisterGroup::MachineCsr
        )
    }

    /// Group owning CSRs of the given privilege mode.
    pub fn for_csr_mode(mode: CsrMode) -> Self {
        match mode {
            CsrMode::User => RegisterGroup::UserCsr,
            CsrMode::Supervisor => RegisterGroup::SupervisorCsr,
            CsrMode::Reserved => RegisterGroup::ReservedCsr,
            CsrMode::Machine => RegisterGroup::MachineCsr,
        }
    }
}
