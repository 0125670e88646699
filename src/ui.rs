//! Terminal output helpers shared by the commands.

use std::path::Path;

use distpack::ManifestWarning;

pub fn print_manifest_warnings(path: &Path, warnings: &[ManifestWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown manifest key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown manifest key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
