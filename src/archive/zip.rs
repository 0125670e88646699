//! Zip writer
//!
//! Entry permission bits ride in the zip external attributes, so unpacking
//! with `unzip` restores the executable bit.

use std::io::{Seek, Write};

use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::DistpackResult;
use crate::stage::PackPlan;

/// Write every plan entry into a zip container
pub(super) fn write<W: Write + Seek>(plan: &PackPlan, writer: W) -> DistpackResult<()> {
    let mut zip = ZipWriter::new(writer);

    for entry in plan.entries() {
        let options = SimpleFileOptions::default().unix_permissions(entry.mode());
        zip.start_file(entry.name(), options)?;
        zip.write_all(entry.content())?;
    }

    zip.finish()?;
    Ok(())
}
