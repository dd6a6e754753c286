use std::io::{self, BufWriter, Stdout, Write};

use px_core::CoreError;
use px_core::frame::TermGeometry;

/// Séquence clear screen.
pub const CLEAR: &str = "\x1b[2J";
/// Séquence reset du mode graphique.
pub const RESET: &str = "\x1b[0m";

/// Sample la géométrie du terminal. Appelé une fois au démarrage ;
/// le budget de rendu est figé pour toute la session.
///
/// # Errors
/// `InvalidGeometry` si la taille est indisponible (pas un TTY) ou nulle.
pub fn probe_geometry() -> Result<TermGeometry, CoreError> {
    let (cols, rows) =
        crossterm::terminal::size().map_err(|_| CoreError::InvalidGeometry { cols: 0, rows: 0 })?;
    if cols == 0 || rows == 0 {
        return Err(CoreError::InvalidGeometry { cols, rows });
    }
    log::debug!("terminal: {cols}×{rows}");
    Ok(TermGeometry::new(cols, rows))
}

/// Sink d'affichage : écritures bloquantes sur un writer, flush après
/// chaque frame présentée.
///
/// Générique sur le writer pour que les tests rendent dans un `Vec<u8>`.
///
/// # Example
/// ```
/// use px_render::term::TermSink;
/// let mut sink = TermSink::new(Vec::new(), false);
/// sink.present("frame").unwrap();
/// assert_eq!(sink.into_inner(), b"frame\n");
/// ```
pub struct TermSink<W: Write> {
    out: W,
    clear_enabled: bool,
}

impl TermSink<BufWriter<Stdout>> {
    /// Sink standard : stdout bufferisé.
    #[must_use]
    pub fn stdout(clear_enabled: bool) -> Self {
        Self::new(BufWriter::new(io::stdout()), clear_enabled)
    }
}

impl<W: Write> TermSink<W> {
    /// Construit un sink sur un writer arbitraire.
    #[must_use]
    pub fn new(out: W, clear_enabled: bool) -> Self {
        Self { out, clear_enabled }
    }

    /// Présente un bloc rendu : clear optionnel, le bloc, puis flush.
    ///
    /// # Errors
    /// Propage les erreurs d'écriture du writer sous-jacent.
    pub fn present(&mut self, block: &str) -> io::Result<()> {
        if self.clear_enabled {
            self.out.write_all(CLEAR.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.write_all(block.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    /// Rend au terminal son mode graphique par défaut.
    ///
    /// # Errors
    /// Propage les erreurs d'écriture du writer sous-jacent.
    pub fn reset(&mut self) -> io::Result<()> {
        if self.clear_enabled {
            self.out.write_all(RESET.as_bytes())?;
            self.out.write_all(CLEAR.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }

    /// Récupère le writer (tests).
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_clears_then_writes() {
        let mut sink = TermSink::new(Vec::new(), true);
        sink.present("XY").expect("present");
        assert_eq!(sink.into_inner(), b"\x1b[2J\nXY\n");
    }

    #[test]
    fn present_without_clear_writes_block_only() {
        let mut sink = TermSink::new(Vec::new(), false);
        sink.present("XY").expect("present");
        assert_eq!(sink.into_inner(), b"XY\n");
    }

    #[test]
    fn reset_emits_reset_and_clear() {
        let mut sink = TermSink::new(Vec::new(), true);
        sink.reset().expect("reset");
        assert_eq!(sink.into_inner(), b"\x1b[0m\x1b[2J\n");
    }

    #[test]
    fn reset_is_suppressed_with_clear_disabled() {
        let mut sink = TermSink::new(Vec::new(), false);
        sink.reset().expect("reset");
        assert!(sink.into_inner().is_empty());
    }
}
