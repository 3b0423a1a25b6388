// Chart text needs a TrueType face registered with plotters under "sans-serif".
// Registration is process-wide and happens at most once.

use plotters::style::{FontStyle, register_font};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Registers the first usable font, trying `explicit` before the system locations.
/// Returns whether chart text can be drawn. Only the first call does any work.
pub fn ensure_font(explicit: Option<&Path>) -> bool {
    REGISTERED
        .get_or_init(|| {
            let candidates = explicit
                .map(Path::to_path_buf)
                .into_iter()
                .chain(SYSTEM_FONTS.iter().map(PathBuf::from));
            for path in candidates {
                if try_register(&path) {
                    tracing::debug!(font = %path.display(), "chart font registered");
                    return Some(path);
                }
            }
            tracing::warn!("no TrueType font found, charts will be drawn without text");
            None
        })
        .is_some()
}

fn try_register(path: &Path) -> bool {
    let Ok(bytes) = std::fs::read(path) else {
        return false;
    };
    // plotters keeps a reference for the life of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(font = %path.display(), "not a usable TrueType font");
            false
        }
    }
}
