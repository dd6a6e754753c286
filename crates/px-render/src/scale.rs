use px_core::CoreError;
use px_core::frame::TermGeometry;

/// Dimensions cibles (en pixels) pour tenir dans le budget terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaleTarget {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

/// Calcule les dimensions cibles d'une frame pour tenir dans le terminal,
/// en préservant le ratio d'aspect.
///
/// Chaque pixel est rendu sur 2 caractères de large (glyphe ~carré), donc
/// le budget horizontal est `cols / 2` cellules ; le budget vertical est
/// `rows`. Le facteur retenu est `min(scale_x, scale_y)` : la dimension
/// la plus contrainte gagne, appliquée uniformément aux deux axes.
///
/// # Errors
/// `InvalidFrame` pour une frame 0×N ou N×0 ; `InvalidGeometry` pour un
/// terminal sans budget exploitable (0 colonne/ligne, ou 1 seule colonne).
///
/// # Example
/// ```
/// use px_core::frame::TermGeometry;
/// use px_render::scale::fit_to_term;
/// let target = fit_to_term(160, 90, TermGeometry::new(80, 24)).unwrap();
/// assert_eq!((target.width, target.height), (40, 22));
/// ```
pub fn fit_to_term(
    frame_width: u32,
    frame_height: u32,
    geometry: TermGeometry,
) -> Result<ScaleTarget, CoreError> {
    if frame_width == 0 || frame_height == 0 {
        return Err(CoreError::InvalidFrame {
            width: frame_width,
            height: frame_height,
        });
    }

    // because block is 2 chars wide
    let max_cols = u32::from(geometry.cols / 2);
    let max_rows = u32::from(geometry.rows);
    if max_cols == 0 || max_rows == 0 {
        return Err(CoreError::InvalidGeometry {
            cols: geometry.cols,
            rows: geometry.rows,
        });
    }

    let scale_x = f64::from(max_cols) / f64::from(frame_width);
    let scale_y = f64::from(max_rows) / f64::from(frame_height);
    let scale = scale_x.min(scale_y);

    let width = ((f64::from(frame_width) * scale).round_ties_even() as u32).max(1);
    let height = ((f64::from(frame_height) * scale).round_ties_even() as u32).max(1);

    Ok(ScaleTarget { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hd_frame_in_80x24_terminal() {
        // maxWidthCells=40, scaleX=0.25, scaleY≈0.2667 → scale=0.25 → 40×22
        let target = fit_to_term(160, 90, TermGeometry::new(80, 24)).expect("fit");
        assert_eq!(target, ScaleTarget { width: 40, height: 22 });
    }

    #[test]
    fn output_never_exceeds_budget() {
        let cases = [
            (1u32, 1u32, 80u16, 24u16),
            (160, 90, 80, 24),
            (90, 160, 80, 24),
            (1920, 1080, 211, 57),
            (7, 1000, 13, 7),
            (1000, 7, 13, 7),
            (640, 480, 2, 1),
        ];
        for (w, h, cols, rows) in cases {
            let geom = TermGeometry::new(cols, rows);
            let target = fit_to_term(w, h, geom).expect("fit");
            assert!(
                target.width <= u32::from(cols / 2).max(1),
                "{w}x{h} in {cols}x{rows}: width {} over budget",
                target.width
            );
            assert!(
                target.height <= u32::from(rows).max(1),
                "{w}x{h} in {cols}x{rows}: height {} over budget",
                target.height
            );
        }
    }

    #[test]
    fn aspect_ratio_is_approximately_preserved() {
        let target = fit_to_term(1920, 1080, TermGeometry::new(160, 50)).expect("fit");
        let src_ratio = 1920.0 / 1080.0;
        let dst_ratio = f64::from(target.width) / f64::from(target.height);
        assert!((src_ratio - dst_ratio).abs() < 0.1, "ratio drift: {dst_ratio}");
    }

    #[test]
    fn upscale_is_allowed_for_tiny_frames() {
        // 2×2 frame in a large terminal scales up to the binding dimension
        let target = fit_to_term(2, 2, TermGeometry::new(80, 24)).expect("fit");
        assert_eq!(target, ScaleTarget { width: 24, height: 24 });
    }

    #[test]
    fn equal_scales_need_no_special_case() {
        // scale_x == scale_y == 0.5
        let target = fit_to_term(20, 24, TermGeometry::new(20, 12)).expect("fit");
        assert_eq!(target, ScaleTarget { width: 10, height: 12 });
    }

    #[test]
    fn zero_frame_is_invalid() {
        let geom = TermGeometry::new(80, 24);
        assert!(matches!(
            fit_to_term(0, 90, geom),
            Err(CoreError::InvalidFrame { .. })
        ));
        assert!(matches!(
            fit_to_term(160, 0, geom),
            Err(CoreError::InvalidFrame { .. })
        ));
    }

    #[test]
    fn degenerate_geometry_is_invalid() {
        assert!(matches!(
            fit_to_term(160, 90, TermGeometry::new(0, 24)),
            Err(CoreError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            fit_to_term(160, 90, TermGeometry::new(80, 0)),
            Err(CoreError::InvalidGeometry { .. })
        ));
        // Une seule colonne = 0 cellule de large
        assert!(matches!(
            fit_to_term(160, 90, TermGeometry::new(1, 24)),
            Err(CoreError::InvalidGeometry { .. })
        ));
    }
}
