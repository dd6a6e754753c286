use std::path::PathBuf;

use clap::Parser;

use px_core::CoreError;
use px_core::config::{PlaybackConfig, PlayerConfig, SourceKind};

/// pixelsea. Convert videos to pixelart and display them on the command line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Video file for input.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Index of the camera to display from.
    #[arg(short, long)]
    pub cam: Option<u32>,

    /// Pixelart a single image, not a whole video.
    #[arg(short, long)]
    pub img: Option<PathBuf>,

    /// Process the whole video before displaying it.
    #[arg(short, long, default_value_t = false)]
    pub preprocess: bool,

    /// Do not display the processed video (useful for speed benchmarks).
    #[arg(short, long, default_value_t = false)]
    pub nodisplay: bool,

    /// Never emit clear/reset sequences.
    #[arg(long, default_value_t = false)]
    pub no_clear: bool,

    /// Disable the guards on pointless flag combinations.
    #[arg(long = "do-it-now", default_value_t = false)]
    pub do_it_now: bool,

    /// TOML defaults file. Default: config/pixelsea.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Valide les combinaisons de flags et produit la config de session.
    ///
    /// Politique des combinaisons sans intérêt : `--nodisplay` avec une
    /// caméra, ou sans `--preprocess`, est rejeté sauf `--do-it-now`.
    /// `--preprocess --nodisplay` (benchmark) passe toujours.
    ///
    /// # Errors
    /// `InvalidConfiguration` si aucune source, plusieurs sources, ou une
    /// combinaison impossible est demandée.
    pub fn resolve(&self, defaults: &PlayerConfig) -> Result<PlaybackConfig, CoreError> {
        let count = usize::from(self.file.is_some())
            + usize::from(self.cam.is_some())
            + usize::from(self.img.is_some());

        if count == 0 {
            return Err(CoreError::InvalidConfiguration(
                "must specify an input! use --file, --cam, or --img (--help for help)".to_string(),
            ));
        }
        if count > 1 {
            return Err(CoreError::InvalidConfiguration(
                "only one source may be specified (file/camera/image)".to_string(),
            ));
        }

        let source = if let Some(ref path) = self.file {
            SourceKind::File(path.clone())
        } else if let Some(index) = self.cam {
            SourceKind::Camera(index)
        } else if let Some(ref path) = self.img {
            SourceKind::Image(path.clone())
        } else {
            unreachable!("source count validated above")
        };

        if self.preprocess && matches!(source, SourceKind::Camera(_)) {
            return Err(CoreError::InvalidConfiguration(
                "cannot use preprocessing when reading from a camera".to_string(),
            ));
        }

        if self.nodisplay && matches!(source, SourceKind::Camera(_)) && !self.do_it_now {
            return Err(CoreError::InvalidConfiguration(
                "--nodisplay with a camera does nothing. pass --do-it-now to force it".to_string(),
            ));
        }
        if self.nodisplay && !self.preprocess && !self.do_it_now {
            return Err(CoreError::InvalidConfiguration(
                "--nodisplay without --preprocess does nothing. pass --do-it-now to force it"
                    .to_string(),
            ));
        }

        Ok(PlaybackConfig {
            source,
            preprocess: self.preprocess,
            no_clear: self.no_clear || defaults.no_clear,
            single_image: self.img.is_some(),
            no_display: self.nodisplay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pixelsea").chain(args.iter().copied()))
            .expect("parse")
    }

    fn resolve(args: &[&str]) -> Result<PlaybackConfig, CoreError> {
        parse(args).resolve(&PlayerConfig::default())
    }

    #[test]
    fn file_source_resolves() {
        let config = resolve(&["--file", "clip.mp4"]).expect("resolve");
        assert_eq!(config.source, SourceKind::File(PathBuf::from("clip.mp4")));
        assert!(!config.preprocess);
        assert!(!config.single_image);
    }

    #[test]
    fn image_source_implies_single_image() {
        let config = resolve(&["--img", "photo.png"]).expect("resolve");
        assert_eq!(config.source, SourceKind::Image(PathBuf::from("photo.png")));
        assert!(config.single_image);
    }

    #[test]
    fn no_source_is_rejected() {
        assert!(matches!(
            resolve(&[]),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn two_sources_are_rejected() {
        assert!(resolve(&["--file", "a.mp4", "--cam", "0"]).is_err());
        assert!(resolve(&["--file", "a.mp4", "--img", "b.png"]).is_err());
        assert!(resolve(&["--cam", "0", "--img", "b.png"]).is_err());
    }

    #[test]
    fn preprocess_with_camera_is_rejected() {
        assert!(resolve(&["--cam", "0", "--preprocess"]).is_err());
        // ... même avec l'override : c'est impossible, pas juste inutile
        assert!(resolve(&["--cam", "0", "--preprocess", "--do-it-now"]).is_err());
    }

    #[test]
    fn nodisplay_gating() {
        // Benchmark : toujours permis
        assert!(resolve(&["--file", "a.mp4", "--preprocess", "--nodisplay"]).is_ok());
        // Sans preprocess : gardé derrière l'override
        assert!(resolve(&["--file", "a.mp4", "--nodisplay"]).is_err());
        assert!(resolve(&["--file", "a.mp4", "--nodisplay", "--do-it-now"]).is_ok());
        // Avec caméra : idem
        assert!(resolve(&["--cam", "0", "--nodisplay"]).is_err());
        assert!(resolve(&["--cam", "0", "--nodisplay", "--do-it-now"]).is_ok());
    }

    #[test]
    fn defaults_file_can_suppress_clear() {
        let defaults = PlayerConfig {
            no_clear: true,
            ..PlayerConfig::default()
        };
        let config = parse(&["--file", "a.mp4"]).resolve(&defaults).expect("resolve");
        assert!(config.no_clear);
    }
}
