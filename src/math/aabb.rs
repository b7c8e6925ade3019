use glam::Vec3;

/// Axis-aligned bounds of a mesh in its local space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around the points; `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, p| match bounds {
            None => Some(Self::new(p, p)),
            Some(b) => Some(Self::new(b.min.min(p), b.max.max(p))),
        })
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    pub fn scaled(&self, factor: f32) -> AABB {
        AABB::new(self.min * factor, self.max * factor)
    }

    /// The eight corners, bit i of the index picks max on axis i
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = AABB::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
    }

    #[test]
    fn test_aabb_from_no_points() {
        assert!(AABB::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_aabb_center_and_half_extents() {
        let aabb = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.half_extents(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_aabb_scaled() {
        let aabb = AABB::new(Vec3::splat(-0.5), Vec3::splat(1.0)).scaled(90.0);
        assert_eq!(aabb.min, Vec3::splat(-45.0));
        assert_eq!(aabb.max, Vec3::splat(90.0));
    }

    #[test]
    fn test_aabb_corners_cover_extremes() {
        let aabb = AABB::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
        let corners = aabb.corners();
        assert_eq!(corners[0], aabb.min);
        assert_eq!(corners[7], aabb.max);
        assert_eq!(AABB::from_points(corners), Some(aabb));
    }

    #[test]
    fn test_aabb_union_contained() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0));
        let aabb2 = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, aabb1.min);
        assert_eq!(union.max, aabb1.max);
    }
}
