//! Optional image assets
//!
//! Sprites and backgrounds are drawn by the renderer. A missing file is never
//! fatal: it resolves to a placeholder (a colored primitive) and a warning.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::sim::body::TargetKind;
use crate::sim::state::GameKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AssetSource {
    File(PathBuf),
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAsset {
    pub name: &'static str,
    pub source: AssetSource,
}

/// Image files a game draws when available
pub fn required_assets(kind: GameKind) -> Vec<&'static str> {
    match kind {
        GameKind::Shooter => {
            let mut names = vec!["background.png", "start_button.png"];
            names.extend(TargetKind::ALL.iter().map(TargetKind::asset_name));
            names
        }
        GameKind::Quiz => vec!["quiz_background.png", "herb_card.png"],
        GameKind::Pong => vec!["table.png", "paddle.png", "ball.png"],
    }
}

/// Asset lookup result for one game
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetCatalog {
    pub assets: Vec<ResolvedAsset>,
}

impl AssetCatalog {
    /// Look every asset of `kind` up under `dir`
    pub fn resolve(dir: impl AsRef<Path>, kind: GameKind) -> Self {
        let dir = dir.as_ref();
        let assets = required_assets(kind)
            .into_iter()
            .map(|name| {
                let path = dir.join(name);
                let source = if path.is_file() {
                    AssetSource::File(path)
                } else {
                    log::warn!("Missing asset {}, using placeholder", path.display());
                    AssetSource::Placeholder
                };
                ResolvedAsset { name, source }
            })
            .collect();
        Self { assets }
    }

    pub fn get(&self, name: &str) -> Option<&AssetSource> {
        self.assets.iter().find(|a| a.name == name).map(|a| &a.source)
    }

    pub fn placeholder_count(&self) -> usize {
        self.assets
            .iter()
            .filter(|a| a.source == AssetSource::Placeholder)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_is_all_placeholders() {
        let catalog = AssetCatalog::resolve("/no/such/assets", GameKind::Shooter);
        assert_eq!(catalog.assets.len(), 5);
        assert_eq!(catalog.placeholder_count(), 5);
        assert_eq!(catalog.get("herb.png"), Some(&AssetSource::Placeholder));
    }

    #[test]
    fn test_present_file_resolves() {
        let dir = std::env::temp_dir().join(format!("gesture-arcade-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("ball.png"), b"png").unwrap();

        let catalog = AssetCatalog::resolve(&dir, GameKind::Pong);
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(catalog.get("ball.png"), Some(&AssetSource::File(dir.join("ball.png"))));
        assert_eq!(catalog.placeholder_count(), 2);
    }
}
