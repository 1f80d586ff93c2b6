//! Worker redistribution after a splitting-level change.

use log::info;

use ff_behavior::Floor;
use ff_core::SplittingLevel;

use crate::relocate::relocate_active;
use crate::{ControlResult, QuarantineManager, RelocationReport};

/// Switch the partition to `level` and move every active worker to a free
/// random cell of its new section (the section containing its current
/// column).  Quarantined workers have their remembered section remapped.
///
/// Returns `Ok(None)` if the level did not change.  A grid too narrow for
/// the new section count is an error and leaves everything untouched.
pub fn redistribute(
    level:      SplittingLevel,
    floor:      &mut Floor<'_>,
    quarantine: &mut QuarantineManager,
    attempts:   usize,
) -> ControlResult<Option<RelocationReport>> {
    if !floor.sections.set_level(level)? {
        return Ok(None);
    }
    let report = relocate_active(floor, attempts, None, "redistribution");
    quarantine.remap_sections(floor.sections);
    info!(
        "splitting level {level}: {} sections, {} workers placed, {} dropped",
        floor.sections.section_count(),
        report.placed,
        report.dropped.len()
    );
    Ok(Some(report))
}
