// Axis-aligned rectangle used by every collidable thing in the world

/// Axis-aligned rectangle with a floating position and a fixed integer size.
///
/// `y` grows downward (screen space), so `top() <= bottom()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge in world pixels
    pub x: f32,
    /// Top edge in world pixels
    pub y: f32,
    width: i32,
    height: i32,
}

impl Rect {
    /// Create a new rectangle. Width and height must be positive.
    pub fn new(x: f32, y: f32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "rect size must be positive");
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width as f32 / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height as f32 / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height as f32
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width as f32
    }

    /// Strict AABB overlap. Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.bottom() > other.top()
            && self.top() < other.bottom()
            && self.left() < other.right()
            && self.right() > other.left()
    }
}
