use std::fmt::Write;

use rayon::prelude::*;

use px_core::CoreError;
use px_core::frame::FrameBuffer;

/// Glyphe plein, 2 caractères de large (rend un pixel ~carré en terminal).
pub const BLOCK: &str = "██";

/// Capacité réservée par pixel encodé : séquence couleur la plus longue
/// ("\x1b[38;2;255;255;255m", 19 bytes) + glyphe UTF-8 (6 bytes).
const BYTES_PER_PIXEL: usize = 25;

/// Seuil (en lignes) au-delà duquel l'encodage des lignes passe par rayon.
const PARALLEL_ROW_THRESHOLD: u32 = 64;

/// Encode un pixel en séquence terminal truecolor 24-bit.
///
/// Format : introducteur d'échappement, le littéral "38;2;", les trois
/// canaux en décimal séparés par ";", le terminateur "m", puis le glyphe
/// plein. Fonction pure et déterministe.
///
/// # Example
/// ```
/// use px_render::block::pixel_to_ansi;
/// assert_eq!(pixel_to_ansi(255, 0, 10), "\x1b[38;2;255;0;10m██");
/// ```
#[inline(always)]
#[must_use]
pub fn pixel_to_ansi(r: u8, g: u8, b: u8) -> String {
    let mut out = String::with_capacity(BYTES_PER_PIXEL);
    push_pixel(&mut out, r, g, b);
    out
}

/// Variante append pour la boucle chaude (pas d'allocation par pixel).
#[inline(always)]
fn push_pixel(out: &mut String, r: u8, g: u8, b: u8) {
    // write! sur String est infaillible
    let _ = write!(out, "\x1b[38;2;{r};{g};{b}m");
    out.push_str(BLOCK);
}

/// Rend une frame (déjà scalée) en bloc de texte affichable.
///
/// Lignes du haut vers le bas, colonnes de gauche à droite, un `\n` en
/// fin de chaque ligne. L'ordre des canaux est celui du buffer source,
/// préservé tel quel. Les lignes des grandes frames sont encodées en
/// parallèle ; le collect indexé préserve l'ordre des lignes.
///
/// # Errors
/// `InvalidFrame` pour une frame sans lignes ou sans colonnes.
///
/// # Example
/// ```
/// use px_core::frame::FrameBuffer;
/// use px_render::block::frame_to_text;
/// let frame = FrameBuffer::new(2, 2);
/// let text = frame_to_text(&frame).unwrap();
/// assert_eq!(text.lines().count(), 2);
/// ```
pub fn frame_to_text(frame: &FrameBuffer) -> Result<String, CoreError> {
    if frame.width == 0 || frame.height == 0 {
        return Err(CoreError::InvalidFrame {
            width: frame.width,
            height: frame.height,
        });
    }

    if frame.height >= PARALLEL_ROW_THRESHOLD {
        let rows: Vec<String> = (0..frame.height)
            .into_par_iter()
            .map(|y| encode_row(frame, y))
            .collect();
        Ok(rows.concat())
    } else {
        let mut out =
            String::with_capacity(frame.height as usize * row_capacity(frame.width));
        for y in 0..frame.height {
            out.push_str(&encode_row(frame, y));
        }
        Ok(out)
    }
}

#[inline]
fn row_capacity(width: u32) -> usize {
    width as usize * BYTES_PER_PIXEL + 1
}

fn encode_row(frame: &FrameBuffer, y: u32) -> String {
    let mut row = String::with_capacity(row_capacity(frame.width));
    for x in 0..frame.width {
        let (r, g, b) = frame.pixel(x, y);
        push_pixel(&mut row, r, g, b);
    }
    row.push('\n');
    row
}
