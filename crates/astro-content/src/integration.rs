//! Integration time: total exposure accumulated across an image's
//! acquisition sessions.

use astro_core::{Acquisition, Image};

/// Exposure seconds of one acquisition session (`frames × exposure_s`).
///
/// Never negative for a validated acquisition, since the schema requires
/// `frames >= 1` and `exposure_s > 0`.
pub fn acquisition_integration(acquisition: &Acquisition) -> f64 {
    f64::from(acquisition.frames) * acquisition.exposure_s
}

/// Total exposure seconds across all of the image's acquisitions.
pub fn image_total_integration(image: &Image) -> f64 {
    image.acquisitions.iter().map(acquisition_integration).sum()
}

/// Render seconds with the coarsest non-zero unit pair.
///
/// The input is rounded to whole seconds first. Hours and minutes are shown
/// when there is at least one hour (`"3h 26m"`), otherwise minutes and
/// seconds (`"12m 5s"`), otherwise seconds alone (`"45s"`). Zero, negative
/// and non-finite input renders as `"0s"`.
pub fn format_integration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0s".to_string();
    }
    // Saturating float-to-int cast; content totals are far below u64::MAX.
    let total = seconds.round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
