//! Output file naming
//!
//! Output files are named `Inventory_out_<fragment>_<version>.xlsx`, where the
//! fragment is the worksheet name with all whitespace removed. Downstream
//! tooling relies on this exact pattern.

use crate::error::{DispatchError, DispatchResult};
use crate::types::{CollisionPolicy, SheetJob};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const OUTPUT_PREFIX: &str = "Inventory_out_";
pub const OUTPUT_EXTENSION: &str = "xlsx";

/// Remove every whitespace character from `name`
pub fn sanitize(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// File name for a fragment and version, without a directory
pub fn output_file_name(fragment: &str, version: u32) -> String {
    format!("{}{}_{}.{}", OUTPUT_PREFIX, fragment, version, OUTPUT_EXTENSION)
}

/// `<output_dir>/Inventory_out_<fragment>_<version>.xlsx`. No filesystem access.
pub fn build_output_path(output_dir: &Path, fragment: &str, version: u32) -> PathBuf {
    output_dir.join(output_file_name(fragment, version))
}

/// Compute the job for every worksheet before anything runs.
///
/// Two sheets whose names differ only in whitespace or letter case would write
/// the same file on a case-insensitive filesystem. Under `Reject` that aborts
/// the plan; under `Suffix` the later sheet gets the first free `-N` suffix on
/// its fragment.
pub fn plan_jobs(
    sheets: &[String],
    output_dir: &Path,
    version: u32,
    policy: CollisionPolicy,
) -> DispatchResult<Vec<SheetJob>> {
    // lowercased fragment -> sheet that claimed it
    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut jobs = Vec::with_capacity(sheets.len());

    for (index, sheet) in sheets.iter().enumerate() {
        let base = sanitize(sheet);
        let fragment = match claimed.get(&base.to_lowercase()) {
            None => base,
            Some(first) => match policy {
                CollisionPolicy::Reject => {
                    return Err(DispatchError::NameCollision {
                        first: first.to_string(),
                        second: sheet.clone(),
                        output: build_output_path(output_dir, &base, version),
                    });
                }
                CollisionPolicy::Suffix => {
                    let renamed = (2..)
                        .map(|n| format!("{}-{}", base, n))
                        .find(|candidate| !claimed.contains_key(&candidate.to_lowercase()))
                        .unwrap_or_default();
                    warn!(
                        sheet = %sheet,
                        collides_with = %first,
                        fragment = %renamed,
                        "output name collision, using suffixed fragment"
                    );
                    renamed
                }
            },
        };

        claimed.insert(fragment.to_lowercase(), sheet.as_str());
        jobs.push(SheetJob {
            index,
            sheet: sheet.clone(),
            output: build_output_path(output_dir, &fragment, version),
            fragment,
        });
    }

    Ok(jobs)
}
