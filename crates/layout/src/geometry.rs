/// A 2D point or vector in canvas pixels, y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;

        dx * dx + dy * dy
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Screen-space bounding box of one character slot.
///
/// Stored in content coordinates (screen position plus the scroll offset at
/// layout time), so a box stays valid for hit-testing after the view scrolls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Absolute code-point index in the buffer; newlines count as one.
    pub index: usize,
}

impl CharBox {
    /// Centre of the box as seen on screen under `scroll`.
    #[inline]
    #[must_use]
    pub fn screen_center(&self, scroll: ScrollOffset) -> Point {
        Point::new(
            self.x - scroll.x + self.width / 2.0,
            self.y - scroll.y + self.height / 2.0,
        )
    }
}

/// Viewport translation. Never clamped to the content bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    pub const ORIGIN: ScrollOffset = ScrollOffset { x: 0.0, y: 0.0 };

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    #[must_use]
    pub fn as_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Bounding size of the laid-out text, used to size the scrollbars.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextDimensions {
    pub width: f64,
    pub height: f64,
}

/// The drawable area of the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// Side and bottom gap between window edge and canvas.
pub const MARGIN: i32 = 20;
/// Canvas border thickness.
pub const BORDER_WIDTH: i32 = 1;
/// Gap above the toolbar.
pub const TOP_MARGIN_VALUE: i32 = 10;
/// Toolbar height.
pub const TOOLBAR_HEIGHT: i32 = 40;
/// Everything above the canvas: gap, toolbar and its 10px padding on each side.
pub const TOP_MARGIN: i32 = TOP_MARGIN_VALUE + TOOLBAR_HEIGHT + 20;

/// Canvas size for a window of the given size.
#[must_use]
pub fn canvas_dimensions(window_width: i32, window_height: i32) -> Viewport {
    let width = window_width - MARGIN * 2 - BORDER_WIDTH * 2;
    let height = window_height - TOP_MARGIN - MARGIN - BORDER_WIDTH * 2;

    Viewport::new(f64::from(width.max(0)), f64::from(height.max(0)))
}
