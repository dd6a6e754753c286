// Capture caméra via le même mécanisme de pipe ffmpeg que FileSource,
// avec le format d'entrée de capture de la plateforme.

use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result};

use px_core::CoreError;
use px_core::frame::FrameBuffer;
use px_core::traits::Source;

use crate::probe::{self, StreamInfo};
use crate::video::read_exact_or_eof;

/// FPS supposé quand le périphérique n'en annonce pas.
const CAMERA_FPS_FALLBACK: f64 = 30.0;

/// Source caméra : flux rgb24 infini tiré d'un ffmpeg enfant.
///
/// La fin de flux n'arrive que si le périphérique est débranché ou le
/// processus ffmpeg tué ; une session caméra se termine normalement par
/// interruption utilisateur.
pub struct CameraSource {
    child: Child,
    stdout: ChildStdout,
    info: StreamInfo,
    done: bool,
}

impl CameraSource {
    /// Ouvre la caméra d'index système donné.
    ///
    /// # Errors
    /// `SourceUnavailable` si la plateforme n'a pas de format de capture
    /// supporté, ou si le périphérique est inaccessible.
    pub fn open(index: u32) -> Result<Self> {
        let (input_format, device) = capture_input(index)?;

        let mut info = probe::probe_device(input_format, &device).map_err(|e| {
            CoreError::SourceUnavailable(format!("camera {index} ({device}): {e:#}"))
        })?;

        if info.fps <= 0.0 {
            log::debug!("CameraSource: FPS non annoncé, fallback {CAMERA_FPS_FALLBACK}");
            info.fps = CAMERA_FPS_FALLBACK;
        }

        let mut child = spawn_capture_pipe(input_format, &device)?;
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

impl Source for CameraSource {
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>> {
        if self.done {
            return Ok(None);
        }

        let mut frame = FrameBuffer::new(self.info.width, self.info.height);
        if read_exact_or_eof(&mut self.stdout, &mut frame.data)? {
            Ok(Some(frame))
        } else {
            self.done = true;
            log::warn!("CameraSource: flux caméra interrompu");
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
        None
    }

    fn is_live(&self) -> bool {
        true
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Format d'entrée ffmpeg + chemin périphérique pour un index caméra.
#[cfg(target_os = "linux")]
fn capture_input(index: u32) -> Result<(&'static str, String)> {
    Ok(("v4l2", format!("/dev/video{index}")))
}

#[cfg(target_os = "macos")]
fn capture_input(index: u32) -> Result<(&'static str, String)> {
    Ok(("avfoundation", index.to_string()))
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn capture_input(index: u32) -> Result<(&'static str, String)> {
    // dshow (Windows) adresse les caméras par nom, pas par index
    Err(CoreError::SourceUnavailable(format!(
        "camera {index}: capture non supportée sur cette plateforme"
    ))
    .into())
}

fn spawn_capture_pipe(input_format: &str, device: &str) -> Result<Child> {
    Command::new("ffmpeg")
        .args([
            "-f",
            input_format, // v4l2 / avfoundation
            "-i",
            device,
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-an",
            "-hide_banner",
            "-loglevel",
            "error",
            "pipe:1",
        ])
        .stdout(Stdio::piped())
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            CoreError::SourceUnavailable(format!(
                "impossible de lancer ffmpeg ({input_format}:{device}): {e}"
            ))
            .into()
        })
}
