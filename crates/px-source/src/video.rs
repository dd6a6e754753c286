// Décodage fichier via ffmpeg en subprocess (std::process::Command).
// Le pipe livre des frames rgb24 brutes à la taille native du flux ;
// le resize terminal est une étape du pipeline de rendu, pas du décodeur.

use std::io::Read;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result};

use px_core::CoreError;
use px_core::frame::FrameBuffer;
use px_core::traits::Source;

use crate::probe::{self, StreamInfo};

/// Source fichier : frames rgb24 tirées du stdout d'un ffmpeg enfant.
///
/// Chaque frame = `width × height × 3` bytes (rgb24 row-major, sans
/// padding). La lecture est synchrone : le contrôleur tire les frames
/// une par une.
pub struct FileSource {
    child: Child,
    stdout: ChildStdout,
    info: StreamInfo,
    done: bool,
}

impl FileSource {
    /// Ouvre un fichier vidéo.
    ///
    /// # Errors
    /// `SourceUnavailable` si ffprobe ne trouve pas de flux vidéo ou si
    /// ffmpeg ne peut pas être lancé.
    pub fn open(path: &Path) -> Result<Self> {
        let info = probe::probe_file(path).map_err(|e| {
            CoreError::SourceUnavailable(format!("{}: {e:#}", path.display()))
        })?;

        let mut child = spawn_rgb_pipe(path)?;
        let stdout = child
            .stdout
            .take()
            .context("ffmpeg spawné sans stdout (impossible)")?;

        Ok(Self {
            child,
            stdout,
            info,
            done: false,
        })
    }
}

impl Source for FileSource {
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>> {
        if self.done {
            return Ok(None);
        }

        let mut frame = FrameBuffer::new(self.info.width, self.info.height);
        if read_exact_or_eof(&mut self.stdout, &mut frame.data)? {
            Ok(Some(frame))
        } else {
            // EOF (une frame partielle en queue de flux est abandonnée)
            self.done = true;
            log::info!("FileSource: fin de flux");
            Ok(None)
        }
    }

    fn native_size(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }

    fn frame_rate(&self) -> f64 {
        self.info.fps
    }

    fn frame_count(&self) -> Option<u64> {
        self.info.nb_frames
    }

    fn is_live(&self) -> bool {
        false
    }
}

impl Drop for FileSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Lance un processus `ffmpeg` qui écrit des frames rgb24 brutes sur stdout.
///
/// `-an` supprime l'audio (hors périmètre).
fn spawn_rgb_pipe(path: &Path) -> Result<Child> {
    let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;

    Command::new("ffmpeg")
        .args([
            "-i",
            path_str, // fichier source
            "-f",
            "rawvideo", // format raw
            "-pix_fmt",
            "rgb24", // RGB 3 bytes/pixel
            "-an",   // pas d'audio
            "-hide_banner",
            "-loglevel",
            "error",
            "pipe:1", // stdout
        ])
        .stdout(Stdio::piped())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            CoreError::SourceUnavailable(format!(
                "impossible de lancer ffmpeg ({}): {e}",
                path.display()
            ))
            .into()
        })
}

/// Lit exactement `buf.len()` bytes depuis `reader`.
///
/// Retourne `Ok(true)` si lu avec succès, `Ok(false)` sur EOF avant
/// complétion, `Err` sur erreur I/O fatale.
///
/// # Errors
/// Propage toute erreur I/O autre que `Interrupted`.
pub fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false), // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_exact_fills_buffer() {
        let mut reader = Cursor::new(vec![7u8; 12]);
        let mut buf = [0u8; 12];
        assert!(read_exact_or_eof(&mut reader, &mut buf).expect("read"));
        assert_eq!(buf, [7u8; 12]);
    }

    #[test]
    fn read_short_stream_reports_eof() {
        let mut reader = Cursor::new(vec![7u8; 5]);
        let mut buf = [0u8; 12];
        assert!(!read_exact_or_eof(&mut reader, &mut buf).expect("read"));
    }

    #[test]
    fn read_empty_stream_reports_eof() {
        let mut reader = Cursor::new(Vec::<u8>::new());
        let mut buf = [0u8; 4];
        assert!(!read_exact_or_eof(&mut reader, &mut buf).expect("read"));
    }

    #[test]
    fn read_zero_length_buffer_succeeds() {
        let mut reader = Cursor::new(Vec::<u8>::new());
        let mut buf = [0u8; 0];
        assert!(read_exact_or_eof(&mut reader, &mut buf).expect("read"));
    }
}
