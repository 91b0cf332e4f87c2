use std::path::{Path, PathBuf};

use crate::error::StatsError;

/// Numeric tokens of the file name, e.g. `exp_cap3_12.csv` -> `[3, 12]`.
pub fn numeric_tokens(path: &Path) -> Vec<u64> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse().ok())
        .collect()
}

/// Orders experiment files by the numbers in their names, then by path.
pub fn sort_experiments(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| numeric_tokens(a).cmp(&numeric_tokens(b)).then_with(|| a.cmp(b)));
}

/// All `*.csv` files below `input_dir`, in processing order.
pub fn discover_experiments(input_dir: &Path) -> Result<Vec<PathBuf>, StatsError> {
    // glob metacharacters in the directory name itself must match literally
    let root = glob::Pattern::escape(&input_dir.to_string_lossy());
    let pattern = Path::new(&root).join("**").join("*.csv");
    let mut paths = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => {
                return Err(StatsError::Io {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                })
            }
        }
    }
    if paths.is_empty() {
        return Err(StatsError::MissingInput(input_dir.to_path_buf()));
    }
    sort_experiments(&mut paths);
    log::debug!("discovered {} experiment files under {}", paths.len(), input_dir.display());
    Ok(paths)
}
