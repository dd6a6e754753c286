use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Source de frames pour une session. Exactement une par session.
///
/// # Example
/// ```
/// use px_core::config::SourceKind;
/// let kind = SourceKind::Camera(0);
/// assert!(matches!(kind, SourceKind::Camera(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Fichier vidéo sur disque.
    File(PathBuf),
    /// Caméra, par index système.
    Camera(u32),
    /// Image fixe, une seule frame.
    Image(PathBuf),
}

/// Réglages résolus et validés d'une session de lecture.
///
/// Produit par le résolveur CLI (px-app), consommé en lecture seule par
/// le contrôleur. Aucun état global : le flag de suppression du clear
/// vit ici, pas dans un mutable process-wide.
#[derive(Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct PlaybackConfig {
    /// Source active.
    pub source: SourceKind,
    /// Rendre toutes les frames avant de les afficher (fichier uniquement).
    pub preprocess: bool,
    /// Ne jamais émettre les séquences clear/reset.
    pub no_clear: bool,
    /// Rendre exactement une frame, sans délai ni boucle.
    pub single_image: bool,
    /// Rendre sans afficher (benchmark).
    pub no_display: bool,
}

/// Defaults chargés depuis un fichier TOML optionnel.
///
/// Chaque champ a une valeur par défaut saine ; un fichier absent n'est
/// pas une erreur.
///
/// # Example
/// ```
/// use px_core::config::PlayerConfig;
/// let config = PlayerConfig::default();
/// assert!((config.fallback_fps - 30.0).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Supprimer les séquences clear/reset par défaut.
    pub no_clear: bool,
    /// FPS supposé quand la source n'en annonce pas.
    pub fallback_fps: f64,
    /// Niveau de log par défaut (surchargé par --log-level).
    pub log_level: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            no_clear: false,
            fallback_fps: 30.0,
            log_level: "warn".to_string(),
        }
    }
}

/// Charge un fichier de defaults TOML.
///
/// # Errors
/// Retourne une erreur si le fichier existe mais est illisible ou invalide.
///
/// # Example
/// ```no_run
/// use px_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/pixelsea.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PlayerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let config: PlayerConfig = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    log::debug!("Defaults chargés depuis {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = PlayerConfig::default();
        assert!(!config.no_clear);
        assert!(config.fallback_fps > 0.0);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn load_partial_file_merges_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "fallback_fps = 24.0").expect("write");

        let config = load_config(file.path()).expect("load");
        assert!((config.fallback_fps - 24.0).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults.
        assert!(!config.no_clear);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/pixelsea.toml")).is_err());
    }

    #[test]
    fn load_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "fallback_fps = [not toml").expect("write");
        assert!(load_config(file.path()).is_err());
    }
}
