/// Running cursor bookkeeping, shared by every file of a run
///
/// Button events carry no coordinates, so they reuse the last position seen
/// in a `MouseMove`. Nothing is reset between files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    pub last_x: i64,
    pub last_y: i64,
    pub is_pressed: bool,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: i64, y: i64) {
        self.last_x = x;
        self.last_y = y;
    }

    pub fn press(&mut self) {
        self.is_pressed = true;
    }

    pub fn release(&mut self) {
        self.is_pressed = false;
    }
}
