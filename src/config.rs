//! Fixed settings for the window, the GL context and the sub-screens.

pub const OPENGL_MAJOR_VER: u8 = 3;
pub const OPENGL_MINOR_VER: u8 = 3;

pub const WINDOW_X: i32 = 100;
pub const WINDOW_Y: i32 = 100;
pub const WINDOW_WIDTH: u32 = 200;
pub const WINDOW_HEIGHT: u32 = 200;

/// Index of the sub-screen the triangle is drawn into.
pub const DRAW_SUBSCREEN: usize = 0;
/// Index of the sub-screen that gets cleared to [`CLEAR_COLOR`].
pub const CLEAR_SUBSCREEN: usize = 1;

pub const CLEAR_COLOR: Rgba = Rgba::new(0.5, 0.5, 0.5, 1.0);

/// A floating point RGBA color, each channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A rectangle in framebuffer pixels, origin at the lower left corner.
///
/// Fields are kept as `i32` since that is what `glViewport` and `glScissor` take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive top edge.
    pub const fn top(&self) -> i32 {
        self.y + self.height
    }

    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    pub const fn overlaps(&self, other: &Viewport) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.top()
            && other.y < self.top()
    }

    /// The pixel closest to the middle of this rectangle.
    pub const fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// The two sub-screens sharing one drawing surface.
///
/// These are not derived from the window size and do not follow resizes.
#[derive(Clone, Debug, PartialEq)]
pub struct SubscreenLayout {
    subscreens: [Viewport; 2],
    clear_color: Rgba,
}

impl SubscreenLayout {
    pub fn new(subscreens: [Viewport; 2], clear_color: Rgba) -> Self {
        if subscreens[0].overlaps(&subscreens[1]) {
            tracing::warn!(
                ?subscreens,
                "sub-screens overlap, the gray clear will show through the triangle's region"
            );
        }
        Self {
            subscreens,
            clear_color,
        }
    }

    pub fn subscreens(&self) -> &[Viewport; 2] {
        &self.subscreens
    }

    /// Where the triangle goes.
    pub fn draw_region(&self) -> Viewport {
        self.subscreens[DRAW_SUBSCREEN]
    }

    /// What gets cleared every frame.
    pub fn clear_region(&self) -> Viewport {
        self.subscreens[CLEAR_SUBSCREEN]
    }

    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }
}

impl Default for SubscreenLayout {
    fn default() -> Self {
        Self::new(
            [Viewport::new(0, 0, 100, 100), Viewport::new(101, 0, 100, 100)],
            CLEAR_COLOR,
        )
    }
}

/// Everything the SDL host needs to open the window and context.
#[derive(Clone, Debug)]
pub struct HostConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
    /// Ask for a debug context so driver messages reach the log.
    pub debug_context: bool,
    /// Leave SIGINT to the platform default instead of turning it into a quit event.
    pub default_interrupt: bool,
    /// Stop the event loop on the first failed paint instead of logging it.
    pub abort_on_paint_error: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: env!("CARGO_PKG_NAME").to_owned(),
            x: WINDOW_X,
            y: WINDOW_Y,
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            gl_major: OPENGL_MAJOR_VER,
            gl_minor: OPENGL_MINOR_VER,
            debug_context: true,
            default_interrupt: true,
            abort_on_paint_error: true,
        }
    }
}
