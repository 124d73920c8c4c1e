//! Display window with keyboard polling.

use crate::cv::{backend_error, rgb_to_bgr_mat};
use crate::util::PlateMatchResult;
use opencv::highgui;

/// Named HighGUI window; destroyed on drop.
pub struct Window {
    name: String,
}

impl Window {
    /// Creates an auto-sized window.
    pub fn new(name: impl Into<String>) -> PlateMatchResult<Self> {
        let name = name.into();
        highgui::named_window(&name, highgui::WINDOW_AUTOSIZE)
            .map_err(|err| backend_error("named_window", err))?;
        Ok(Self { name })
    }

    /// Shows interleaved RGB pixels.
    pub fn show_rgb(&self, rgb: &[u8], width: usize, height: usize) -> PlateMatchResult<()> {
        let mat = rgb_to_bgr_mat(rgb, width, height)?;
        highgui::imshow(&self.name, &mat).map_err(|err| backend_error("imshow", err))
    }

    /// Waits up to `delay_ms` (0 waits forever) and returns the pressed key.
    pub fn wait_key(&self, delay_ms: i32) -> PlateMatchResult<Option<char>> {
        let key = highgui::wait_key(delay_ms).map_err(|err| backend_error("wait_key", err))?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.name);
    }
}
