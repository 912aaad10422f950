use glam::{Vec2, Vec3};

use crate::error::{FrostpackError, Result};

/// The fundamental geometry container: an unindexed triangle soup.
///
/// Both buffers are per-corner, so corner `c` of triangle `t` lives at
/// `t * 3 + c`. UVs are stored per corner rather than per vertex because a
/// position shared by two islands can carry different texture coordinates
/// (per-loop UV storage, the way mesh editors keep them). A triangle's
/// identity is its index, stable for the whole pipeline run.
#[derive(Debug, Clone, Default)]
pub struct TriangleSoup {
    /// Object-space corner positions, 3 per triangle.
    pub positions: Vec<Vec3>,
    /// UV-space corner coordinates, 3 per triangle.
    pub uvs: Vec<Vec2>,
}

impl TriangleSoup {
    /// Number of triangles (corners / 3).
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the soup contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The three corner positions of triangle `tri`.
    pub fn triangle_positions(&self, tri: usize) -> [Vec3; 3] {
        let base = tri * 3;
        [
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        ]
    }

    /// The three corner UVs of triangle `tri`.
    pub fn triangle_uvs(&self, tri: usize) -> [Vec2; 3] {
        let base = tri * 3;
        [self.uvs[base], self.uvs[base + 1], self.uvs[base + 2]]
    }

    /// Check the well-formedness preconditions the pipeline relies on.
    ///
    /// Fails fast before island extraction begins rather than mid-pipeline.
    pub fn validate(&self) -> Result<()> {
        if !self.positions.is_empty() && self.uvs.is_empty() {
            return Err(FrostpackError::MalformedMesh("missing UV layer".into()));
        }
        if self.positions.len() != self.uvs.len() {
            return Err(FrostpackError::MalformedMesh(format!(
                "corner count mismatch: {} positions vs {} UVs",
                self.positions.len(),
                self.uvs.len()
            )));
        }
        if self.positions.len() % 3 != 0 {
            return Err(FrostpackError::MalformedMesh(format!(
                "corner count {} is not a multiple of 3",
                self.positions.len()
            )));
        }
        Ok(())
    }

    /// Replace every corner UV in one batch commit.
    ///
    /// The packing pipeline computes a full replacement buffer first and
    /// writes it back only after every triangle has been remapped, so a
    /// failed run never leaves the soup partially updated.
    pub fn apply_uvs(&mut self, uvs: Vec<Vec2>) -> Result<()> {
        if uvs.len() != self.uvs.len() {
            return Err(FrostpackError::MalformedMesh(format!(
                "UV commit size mismatch: {} incoming vs {} existing",
                uvs.len(),
                self.uvs.len()
            )));
        }
        self.uvs = uvs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_soup() {
        let soup = TriangleSoup::default();
        assert!(soup.is_empty());
        assert_eq!(soup.triangle_count(), 0);
        assert!(soup.validate().is_ok());
    }

    #[test]
    fn single_triangle() {
        let soup = TriangleSoup {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
        };

        assert!(!soup.is_empty());
        assert_eq!(soup.triangle_count(), 1);
        assert!(soup.validate().is_ok());
        assert_eq!(soup.triangle_positions(0)[1], Vec3::X);
        assert_eq!(soup.triangle_uvs(0)[2], Vec2::Y);
    }

    #[test]
    fn missing_uv_layer_rejected() {
        let soup = TriangleSoup {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![],
        };
        assert!(matches!(
            soup.validate(),
            Err(FrostpackError::MalformedMesh(_))
        ));
    }

    #[test]
    fn corner_mismatch_rejected() {
        let soup = TriangleSoup {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![Vec2::ZERO, Vec2::X],
        };
        assert!(matches!(
            soup.validate(),
            Err(FrostpackError::MalformedMesh(_))
        ));
    }

    #[test]
    fn non_triangle_corner_count_rejected() {
        let soup = TriangleSoup {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            uvs: vec![Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE],
        };
        assert!(matches!(
            soup.validate(),
            Err(FrostpackError::MalformedMesh(_))
        ));
    }

    #[test]
    fn apply_uvs_batch_commit() {
        let mut soup = TriangleSoup {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            uvs: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
        };

        soup.apply_uvs(vec![Vec2::ONE, Vec2::ONE, Vec2::ONE]).unwrap();
        assert_eq!(soup.uvs, vec![Vec2::ONE; 3]);

        // Wrong size must be rejected and leave UVs untouched
        assert!(soup.apply_uvs(vec![Vec2::ZERO]).is_err());
        assert_eq!(soup.uvs, vec![Vec2::ONE; 3]);
    }
}
