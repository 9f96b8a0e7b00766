use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A stable path could not be (re)pointed at its device node. Non-fatal;
/// forwarding does not depend on link health.
#[derive(Debug, Error)]
#[error("Failed to publish {link}: {source}")]
pub struct SymlinkPublishError {
    pub link: PathBuf,
    #[source]
    pub source: io::Error,
}

/// The stable symlink paths consumers rely on, paired with the virtual
/// device nodes they must resolve to. The node paths never change for the
/// life of the process, so publication is idempotent.
#[derive(Debug, Clone)]
pub struct StableLinkSet {
    pub event_link: PathBuf,
    pub js_link: PathBuf,
    pub event_node: PathBuf,
    pub js_node: Option<PathBuf>,
}

impl StableLinkSet {
    fn pairs(&self) -> Vec<(&Path, &Path)> {
        let mut pairs = vec![(self.event_link.as_path(), self.event_node.as_path())];
        if let Some(js_node) = &self.js_node {
            pairs.push((self.js_link.as_path(), js_node.as_path()));
        }
        pairs
    }

    /// Point every stable path at its device node. Links are attempted
    /// independently and failures only logged, so one bad path degrades the
    /// link set without disturbing the other. Returns true only when every
    /// link resolves, letting the caller retry on a later connect cycle.
    pub fn publish(&self) -> bool {
        let mut all_published = true;
        for (link, node) in self.pairs() {
            match publish_link(link, node) {
                Ok(()) => log::info!("Linked {} -> {}", link.display(), node.display()),
                Err(e) => {
                    log::warn!("{e}");
                    all_published = false;
                }
            }
        }
        all_published
    }
}

/// Create the symlink at `link` pointing to `node`, replacing whatever was
/// there. The replacement is staged under a temporary name and renamed into
/// place so consumers never observe the path missing.
pub fn publish_link(link: &Path, node: &Path) -> Result<(), SymlinkPublishError> {
    replace_link(link, node).map_err(|source| SymlinkPublishError {
        link: link.to_path_buf(),
        source,
    })
}

fn replace_link(link: &Path, node: &Path) -> io::Result<()> {
    // Already pointing at the right node, nothing to do.
    if let Ok(target) = fs::read_link(link) {
        if target == node {
            return Ok(());
        }
    }

    let staged = staging_path(link);
    let _ = fs::remove_file(&staged);
    symlink(node, &staged)?;
    if let Err(err) = fs::rename(&staged, link) {
        let _ = fs::remove_file(&staged);
        return Err(err);
    }
    Ok(())
}

fn staging_path(link: &Path) -> PathBuf {
    let mut name = link
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".new");
    link.with_file_name(name)
}
