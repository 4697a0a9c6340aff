//! Field-association pass.
//!
//! Run once at model-finalization time, after the full catalog exists. It
//! records which internal state fields physically alias a sub-range of a
//! named register's storage, and names the fields that have no externally
//! addressable register representation at all, so the host framework's
//! automatic storage-to-register inference does not expose them.

use crate::catalog::{RegisterCatalog, SubField};
use crate::model::{HartModel, ModelField};

/// Internal fields with no register representation; the host framework must
/// not surface these.
pub static HIDDEN_FIELDS: &[ModelField] = &[
    ModelField::PmKey,
    ModelField::VFirstFault,
    ModelField::VBase,
    ModelField::JumpBase,
];

/// (internal field, owning register) alias pairs. The field occupies the
/// low-order sub-range of the register's storage, at the field's own width.
static FIELD_ALIASES: &[(ModelField, &str)] =
    &[(ModelField::FpFlags, "fflags"), (ModelField::Sfmt, "vxsat")];

impl RegisterCatalog {
    /// Associate aliased sub-fields with their owning registers in the full
    /// catalog, building it if needed. Registers the variant does not
    /// implement are skipped.
    pub fn link_fields<M: HartModel>(&mut self, model: &M) {
        self.registers(model, true);
        let Some(regs) = self.info[1].get_mut() else {
            return;
        };

        for &(field, owner) in FIELD_ALIASES {
            if let Some(reg) = regs.iter_mut().find(|reg| reg.name == Some(owner)) {
                reg.fields.push(SubField {
                    field,
                    bits: field.bits(),
                });
            }
        }
    }
}
