//! Content-hashes built assets in a dist directory and rewrites HTML
//! references to the new names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::assets::{content_hash, hashed_path, rewrite_references, should_hash, AssetRename};

/// Outcome of a hashing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HashReport {
    pub renames: Vec<AssetRename>,
    /// HTML files whose references changed, relative to the dist directory.
    pub updated_html: Vec<String>,
}

impl HashReport {
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

pub struct AssetHasher {
    dist_dir: PathBuf,
    dry_run: bool,
}

impl AssetHasher {
    pub fn new(dist_dir: impl AsRef<Path>) -> Self {
        Self {
            dist_dir: dist_dir.as_ref().to_path_buf(),
            dry_run: false,
        }
    }

    /// Computes renames and HTML changes without touching the disk.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self) -> io::Result<HashReport> {
        let files = collect_files(&self.dist_dir)?;
        let mut report = HashReport::default();

        for relative in files.iter().filter(|f| should_hash(f)) {
            let full = self.dist_dir.join(relative);
            let hash = content_hash(&fs::read(&full)?);
            let target = hashed_path(relative, &hash);

            if !self.dry_run {
                fs::rename(&full, self.dist_dir.join(&target))?;
            }
            tracing::info!(from = %relative, to = %target, "Hashed asset");
            report.renames.push(AssetRename {
                from: relative.clone(),
                to: target,
            });
        }

        if report.renames.is_empty() {
            return Ok(report);
        }

        for relative in files.iter().filter(|f| f.ends_with(".html")) {
            let full = self.dist_dir.join(relative);
            let html = fs::read_to_string(&full)?;
            if let Some(updated) = rewrite_references(&html, &report.renames) {
                if !self.dry_run {
                    fs::write(&full, updated)?;
                }
                report.updated_html.push(relative.clone());
            }
        }

        Ok(report)
    }
}

/// Every file under `root`, as sorted `/`-separated relative paths.
fn collect_files(root: &Path) -> io::Result<Vec<String>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                let parts: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                files.push(parts.join("/"));
            }
        }
    }

    files.sort();
    Ok(files)
}
