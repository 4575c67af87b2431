// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Grid index of a world coordinate (floors toward negative infinity)
pub fn grid_index(coord: f32, tile_size: i32) -> i32 {
    (coord / tile_size as f32).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn test_grid_index_floors_negative() {
        assert_eq!(grid_index(0.0, 32), 0);
        assert_eq!(grid_index(31.9, 32), 0);
        assert_eq!(grid_index(32.0, 32), 1);
        assert_eq!(grid_index(-0.5, 32), -1);
    }
}
