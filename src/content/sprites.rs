//! Animation resources on disk

use std::path::{Path, PathBuf};

use ahash::AHashSet;

use super::ResourceExistenceChecker;
use crate::error::Result;

/// Extensions an animation resource may be stored with
const ANIMATION_EXTENSIONS: [&str; 2] = ["def", "json"];

/// Index of the animation files found under a content root's sprite directory
#[derive(Debug, Clone, Default)]
pub struct SpriteDirectory {
    root: PathBuf,
    animations: AHashSet<String>,
}

impl SpriteDirectory {
    /// Scan `<root>/SPRITES` (or `<root>/sprites`) and everything below it
    pub fn scan(root: &Path) -> Result<Self> {
        let mut animations = AHashSet::new();

        let dir = ["SPRITES", "Sprites", "sprites"]
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_dir());

        match dir {
            Some(dir) => {
                let mut pending = vec![dir.clone()];
                while let Some(current) = pending.pop() {
                    for entry in std::fs::read_dir(&current)? {
                        let path = entry?.path();
                        if path.is_dir() {
                            pending.push(path);
                            continue;
                        }
                        let is_animation = path
                            .extension()
                            .and_then(|e| e.to_str())
                            .is_some_and(|e| ANIMATION_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)));
                        if !is_animation {
                            continue;
                        }
                        if let Some(key) = relative_key(&dir, &path) {
                            animations.insert(key);
                        }
                    }
                }
                tracing::debug!(dir = %dir.display(), count = animations.len(), "indexed animation files");
            }
            None => {
                tracing::debug!(root = %root.display(), "content root has no sprite directory");
            }
        }

        Ok(Self {
            root: root.to_path_buf(),
            animations,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl ResourceExistenceChecker for SpriteDirectory {
    fn animation_exists(&self, name: &str) -> bool {
        self.animations.contains(&animation_key(name))
    }
}

fn relative_key(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(animation_key(&parts?.join("/")))
}

/// Lookup key of an animation resource.
///
/// The path relative to the sprite directory, lower-cased, with `/`
/// separators and without extension. A leading `SPRITES/` is dropped.
pub fn animation_key(name: &str) -> String {
    let name = name.replace('\\', "/").to_ascii_lowercase();
    let name = name.trim_start_matches('/');
    let name = name.strip_prefix("sprites/").unwrap_or(name);

    let (dir, file) = match name.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, name),
    };
    let stem = match file.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file,
    };

    match dir {
        Some(dir) => format!("{}/{}", dir, stem),
        None => stem.to_string(),
    }
}
