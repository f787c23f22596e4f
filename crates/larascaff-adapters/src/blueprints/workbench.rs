//! `workbench`: add an Orchestra Workbench app to an existing package.

use larascaff_core::domain::{Blueprint, DomainError, EditMode};

use super::shared;

pub(super) fn blueprint() -> Result<Blueprint, DomainError> {
    let builder = shared::workbench_tree(Blueprint::builder("workbench"), true, false, false);

    shared::workbench_edits(EditMode::Insert)
        .into_iter()
        .fold(builder, |b, edit| b.manifest_edit(edit))
        .build()
}
