//! Tar writer
//!
//! Also used for tar.gz by handing in a gzip encoder as the writer. Entry
//! mtimes come from the packed commit, so re-packing the same commit
//! produces a byte-identical tar.

use std::io::Write;

use tar::{Builder, Header};

use crate::error::DistpackResult;
use crate::stage::PackPlan;

/// Write every plan entry into a tar stream, returning the inner writer
/// so gzip encoders can be finished by the caller.
pub(super) fn write<W: Write>(plan: &PackPlan, writer: W) -> DistpackResult<W> {
    let mut builder = Builder::new(writer);

    for entry in plan.entries() {
        let mut header = Header::new_gnu();
        header.set_size(entry.len() as u64);
        header.set_mode(entry.mode());
        header.set_mtime(plan.mtime());
        builder.append_data(&mut header, entry.name(), entry.content())?;
    }

    Ok(builder.into_inner()?)
}
