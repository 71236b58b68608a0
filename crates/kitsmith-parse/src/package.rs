use std::fs;
use std::path::{Path, PathBuf};

use eyre::Context;
use kitsmith_core::error::Error;
use kitsmith_core::Result;

/// A loaded package: one directory of `.rs` files.
#[derive(Debug, Clone)]
pub struct Package {
    pub root: PathBuf,
    /// Short package name, derived from the directory name.
    pub name: String,
    /// Source files directly under the root, sorted by name.
    pub files: Vec<PathBuf>,
}

impl Package {
    pub fn load(path: &Path) -> Result<Self> {
        let root = path
            .canonicalize()
            .with_context(|| format!("could not resolve package root {}", path.display()))?;
        let name = package_name(&root)?;

        let mut files = Vec::new();
        for entry in fs::read_dir(&root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "rs") && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        Ok(Package { root, name, files })
    }
}

fn package_name(root: &Path) -> Result<String> {
    let segment = root
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Generic(format!("package root {} has no name", root.display())))?;
    Ok(segment.replace('-', "_"))
}
