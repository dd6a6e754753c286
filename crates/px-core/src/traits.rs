use anyhow::Result;

use crate::frame::FrameBuffer;

/// Fournit des frames décodées au contrôleur de lecture.
///
/// Implémenté par : `FileSource`, `CameraSource`, `ImageSource`.
///
/// # Example
/// ```
/// use px_core::traits::Source;
/// use px_core::frame::FrameBuffer;
///
/// struct DummySource;
/// impl Source for DummySource {
///     fn next_frame(&mut self) -> anyhow::Result<Option<FrameBuffer>> { Ok(None) }
///     fn native_size(&self) -> (u32, u32) { (0, 0) }
///     fn frame_rate(&self) -> f64 { 0.0 }
///     fn frame_count(&self) -> Option<u64> { None }
///     fn is_live(&self) -> bool { false }
/// }
/// ```
pub trait Source {
    /// Retourne la prochaine frame décodée.
    ///
    /// `Ok(None)` signale la fin naturelle du flux, pas une erreur.
    ///
    /// # Errors
    /// Retourne une erreur sur un échec de lecture du décodeur.
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>>;

    /// Dimensions natives de la source (avant resize terminal).
    fn native_size(&self) -> (u32, u32);

    /// Images par seconde annoncées par la source. `0.0` = inconnu.
    fn frame_rate(&self) -> f64;

    /// Nombre total de frames annoncé. Indicatif seulement : la lecture
    /// se termine sur la fin de flux réelle, pas sur ce compteur.
    fn frame_count(&self) -> Option<u64>;

    /// Indique si la source est infinie (caméra) ou finie (fichier).
    fn is_live(&self) -> bool;
}
