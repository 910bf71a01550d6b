//! Recording wrapper around the drawing backend.

use crate::call::Call;

impl Canvas for Recorder {
    fn clear(&self, mask: u32) {
        simple!(self.clear(mask))
    }

    fn draw_rect(&self, x: i32, y: i32, width: u32, height: u32) {
        unimplemented!("draw_rect");
    }

    fn upload(
        &self,
        slot: u32,
        pixels: &[u8],
        scratch: &mut Vec<u8>,
    ) {
        unimplemented!("upload");
    }

    fn flush(&self) {
        unimplemented!("flush");
    }

    fn viewport(&self) -> Rect {
        self.0.viewport()
    }
}
