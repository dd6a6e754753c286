use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;

use px_core::config::{self, PlaybackConfig, PlayerConfig, SourceKind};
use px_core::frame::TermGeometry;
use px_core::traits::Source;
use px_render::term::{self, TermSink};

pub mod cli;
pub mod player;
pub mod progress;

/// Fichier de defaults cherché quand --config n'est pas donné.
const DEFAULT_CONFIG_PATH: &str = "config/pixelsea.toml";

fn main() {
    // 1. Parser CLI (aide/version → 0, erreur d'argument → 1)
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            process::exit(code);
        }
    };

    // 2. Charger les defaults (fichier optionnel)
    let defaults = resolve_defaults(&cli);

    // 3. Initialiser le logging
    let level = cli.log_level.as_deref().unwrap_or(&defaults.log_level);
    env_logger::Builder::new()
        .filter_level(level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 4. Résoudre la config de session
    let config = match cli.resolve(&defaults) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // 5. Géométrie du terminal, échantillonnée une fois
    let geometry = match term::probe_geometry() {
        Ok(geometry) => geometry,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // 6. Reset best-effort si l'utilisateur interrompt en plein écran
    install_interrupt_reset(config.no_clear);

    // 7. Ouvrir la source et jouer
    if let Err(e) = open_and_play(config, geometry, defaults.fallback_fps) {
        eprintln!("{e:#}");
        process::exit(1);
    }
}

/// Resolve defaults: --config must load; the implicit path may be absent.
fn resolve_defaults(cli: &cli::Cli) -> PlayerConfig {
    if let Some(ref path) = cli.config {
        match config::load_config(path) {
            Ok(defaults) => defaults,
            Err(e) => {
                eprintln!("{e:#}");
                process::exit(1);
            }
        }
    } else {
        let path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if path.exists() {
            config::load_config(&path).unwrap_or_else(|e| {
                eprintln!("{e:#}");
                process::exit(1);
            })
        } else {
            PlayerConfig::default()
        }
    }
}

fn open_and_play(config: PlaybackConfig, geometry: TermGeometry, fallback_fps: f64) -> Result<()> {
    log::info!("opening file/camera");
    let mut source: Box<dyn Source> = match config.source {
        SourceKind::File(ref path) => Box::new(px_source::FileSource::open(path)?),
        SourceKind::Camera(index) => Box::new(px_source::CameraSource::open(index)?),
        SourceKind::Image(ref path) => Box::new(px_source::ImageSource::open(path)?),
    };

    let sink = TermSink::stdout(!config.no_clear);
    let mut player = player::Player::new(config, geometry, sink, fallback_fps);
    player.run(source.as_mut())
}

/// Hook d'interruption : rendre son mode graphique au terminal avant de
/// quitter. Best-effort : l'OS récupère le reste.
fn install_interrupt_reset(no_clear: bool) {
    let result = ctrlc::set_handler(move || {
        if !no_clear {
            print!("{}{}", term::RESET, term::CLEAR);
            let _ = std::io::Write::flush(&mut std::io::stdout());
        }
        process::exit(130);
    });
    if let Err(e) = result {
        log::warn!("interrupt handler unavailable: {e}");
    }
}
