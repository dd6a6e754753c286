use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Métadonnées extraites via ffprobe.
#[derive(Clone, Copy, Debug)]
pub struct StreamInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Images par seconde (ex: 23.976, 24.0, 30.0, 60.0). 0.0 = inconnu.
    pub fps: f64,
    /// Nombre total de frames annoncé. Indicatif ; absent pour les flux live.
    pub nb_frames: Option<u64>,
}

/// Interroge `ffprobe` pour obtenir les métadonnées du flux vidéo
/// principal d'un fichier.
///
/// # Errors
/// Retourne une erreur si `ffprobe` est introuvable ou si le fichier
/// ne contient aucun flux vidéo décodable.
///
/// # Example
/// ```no_run
/// // Nécessite ffprobe en PATH
/// // let info = probe_file(Path::new("video.mkv"));
/// ```
pub fn probe_file(path: &Path) -> Result<StreamInfo> {
    let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;
    let info = run_ffprobe(&["-i", path_str])?;
    log::info!(
        "probe_file: {}x{} @ {:.3}fps, {} frames, {}",
        info.width,
        info.height,
        info.fps,
        info.nb_frames.map_or_else(|| "?".to_string(), |n| n.to_string()),
        path.display()
    );
    Ok(info)
}

/// Interroge `ffprobe` sur un périphérique de capture
/// (ex: `("v4l2", "/dev/video0")`).
///
/// # Errors
/// Retourne une erreur si `ffprobe` est introuvable ou si le périphérique
/// est inaccessible.
pub fn probe_device(input_format: &str, device: &str) -> Result<StreamInfo> {
    let info = run_ffprobe(&["-f", input_format, "-i", device])?;
    log::info!(
        "probe_device: {}x{} @ {:.3}fps, {input_format}:{device}",
        info.width,
        info.height,
        info.fps
    );
    Ok(info)
}

fn run_ffprobe(input: &[&str]) -> Result<StreamInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate,nb_frames",
            "-of",
            "default=noprint_wrappers=1",
        ])
        .args(input)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .context(
            "Impossible de lancer ffprobe. Vérifiez que ffprobe est installé et dans le PATH.",
        )?;

    let text = String::from_utf8_lossy(&output.stdout);
    let info = parse_stream_info(&text);

    if info.width == 0 || info.height == 0 {
        anyhow::bail!("ffprobe n'a trouvé aucun flux vidéo exploitable");
    }

    Ok(info)
}

/// Parse la sortie `default=noprint_wrappers=1` de ffprobe.
///
/// Champs absents ou invalides → 0 / None ; la validation revient à
/// l'appelant.
///
/// # Example
/// ```
/// use px_source::probe::parse_stream_info;
/// let info = parse_stream_info("width=160\nheight=90\nr_frame_rate=30/1\nnb_frames=42\n");
/// assert_eq!(info.width, 160);
/// assert_eq!(info.nb_frames, Some(42));
/// ```
#[must_use]
pub fn parse_stream_info(text: &str) -> StreamInfo {
    let mut width: u32 = 0;
    let mut height: u32 = 0;
    let mut fps: f64 = 0.0;
    let mut nb_frames: Option<u64> = None;

    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("r_frame_rate=") {
            // Format: "24/1" ou "30000/1001" ou "24000/1001"
            let val = val.trim();
            let mut parts = val.splitn(2, '/');
            let num: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);
            let den: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
            if den > 0.0 {
                fps = num / den;
            }
        } else if let Some(val) = line.strip_prefix("nb_frames=") {
            // "N/A" pour les flux live
            nb_frames = val.trim().parse().ok();
        }
    }

    StreamInfo {
        width,
        height,
        fps,
        nb_frames,
    }
}
