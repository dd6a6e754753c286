use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;

use px_core::CoreError;
use px_core::config::PlaybackConfig;
use px_core::frame::{FrameBuffer, TermGeometry};
use px_core::traits::Source;
use px_render::term::TermSink;
use px_render::{block, scale};
use px_source::resize::Resizer;

use crate::progress::Progress;

/// Contrôleur de lecture.
///
/// Pilote la boucle décodage → scale → rendu → affichage, en mode
/// streaming (afficher au fil du décodage) ou préprocess (tout rendre,
/// puis afficher). Un seul fil d'exécution ; la seule suspension est le
/// sleep entre deux frames affichées.
pub struct Player<W: Write> {
    config: PlaybackConfig,
    geometry: TermGeometry,
    sink: TermSink<W>,
    resizer: Resizer,
    interval: Duration,
    fallback_fps: f64,
}

impl<W: Write> Player<W> {
    /// Construit un contrôleur pour une session.
    #[must_use]
    pub fn new(
        config: PlaybackConfig,
        geometry: TermGeometry,
        sink: TermSink<W>,
        fallback_fps: f64,
    ) -> Self {
        Self {
            config,
            geometry,
            sink,
            resizer: Resizer::new(),
            interval: Duration::ZERO,
            fallback_fps,
        }
    }

    /// Joue la source jusqu'à la fin de flux, puis reset le terminal.
    ///
    /// # Errors
    /// `InvalidConfiguration` pour préprocess + source live (le résolveur
    /// CLI rejette déjà cette combinaison ; défense en profondeur) ;
    /// propage les erreurs de décodage, de rendu et d'écriture.
    pub fn run(&mut self, source: &mut dyn Source) -> Result<()> {
        if self.config.preprocess && source.is_live() {
            return Err(CoreError::InvalidConfiguration(
                "preprocessing requires a finite source, not a camera".to_string(),
            )
            .into());
        }

        self.interval = frame_interval(source.frame_rate(), self.fallback_fps);
        log::debug!(
            "session: {:?}, interval {}ms",
            self.config.source,
            self.interval.as_millis()
        );

        if self.config.single_image {
            self.play_single(source)?;
        } else if self.config.preprocess {
            self.play_buffered(source)?;
        } else {
            self.play_streaming(source)?;
        }

        if !self.config.no_display {
            self.sink.reset()?;
        }
        Ok(())
    }

    /// Exactement une frame, sans délai ni boucle.
    fn play_single(&mut self, source: &mut dyn Source) -> Result<()> {
        if let Some(frame) = source.next_frame()? {
            let text = self.render_block(&frame)?;
            self.present(&text)?;
        }
        Ok(())
    }

    /// Affichage au fil du décodage. Fin de flux = arrêt propre.
    fn play_streaming(&mut self, source: &mut dyn Source) -> Result<()> {
        while let Some(frame) = source.next_frame()? {
            let text = self.render_block(&frame)?;
            self.present(&text)?;
            self.pace();
        }
        Ok(())
    }

    /// Rend tout le flux en mémoire, puis affiche le buffer dans l'ordre.
    ///
    /// Le compte de frames annoncé par la source n'est qu'indicatif pour
    /// la progression ; la boucle se termine sur la fin de flux réelle.
    fn play_buffered(&mut self, source: &mut dyn Source) -> Result<()> {
        let mut frames: Vec<String> = match source.frame_count() {
            Some(n) => Vec::with_capacity(n as usize),
            None => Vec::new(),
        };

        let mut progress = Progress::new(source.frame_count());
        while let Some(frame) = source.next_frame()? {
            frames.push(self.render_block(&frame)?);
            progress.tick();
        }
        progress.finish();
        log::info!("préprocess terminé : {} frames rendues", progress.count());

        if self.config.no_display {
            return Ok(());
        }
        for text in &frames {
            self.sink.present(text)?;
            thread::sleep(self.interval);
        }
        Ok(())
    }

    /// fetch → fit → resize → encode. Aucun bloc partiel n'en sort.
    fn render_block(&mut self, frame: &FrameBuffer) -> Result<String> {
        let target = scale::fit_to_term(frame.width, frame.height, self.geometry)?;
        let mut scaled = FrameBuffer::new(target.width, target.height);
        self.resizer.resize_into(frame, &mut scaled)?;
        Ok(block::frame_to_text(&scaled)?)
    }

    fn present(&mut self, text: &str) -> Result<()> {
        if self.config.no_display {
            return Ok(());
        }
        self.sink.present(text)?;
        Ok(())
    }

    fn pace(&self) {
        if self.config.no_display {
            return;
        }
        thread::sleep(self.interval);
    }
}

/// Intervalle fixe de la session : `1000 / fps` millisecondes, troncature
/// sur le résultat de la division, plancher 1 ms. Un fps absent ou
/// dégénéré (≤ 0, non fini) retombe sur `fallback_fps`.
#[must_use]
pub fn frame_interval(fps: f64, fallback_fps: f64) -> Duration {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else if fallback_fps.is_finite() && fallback_fps > 0.0 {
        fallback_fps
    } else {
        30.0
    };
    let ms = (1000.0 / fps) as u64;
    Duration::from_millis(ms.max(1))
}
