//! Column-major 4x4 matrices for camera transforms.
//!
//! Conventions: right-handed, Y up, clip-space depth in `[-1, 1]` (the WebGL
//! convention the host renderer uses). Stored as `cols[col][row]`.

use super::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f64; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn perspective_rh_gl(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        let aspect = aspect.max(1e-6);
        let nf = 1.0 / (near - far);

        // [ f/a  0   0            0          ]
        // [ 0    f   0            0          ]
        // [ 0    0  (f+n)/(n-f)  2fn/(n-f)   ]
        // [ 0    0  -1            0          ]
        Self {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) * nf, -1.0],
                [0.0, 0.0, 2.0 * far * near * nf, 0.0],
            ],
        }
    }

    /// View matrix looking from `eye` toward `target`.
    ///
    /// When the view direction is parallel to `up`, -Z is used as the up hint
    /// so a straight top-down camera still produces a valid basis.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye)
            .normalize()
            .unwrap_or(Vec3::new(0.0, 0.0, -1.0));
        let s = f
            .cross(up)
            .normalize()
            .or_else(|| f.cross(Vec3::new(0.0, 0.0, -1.0)).normalize())
            .unwrap_or(Vec3::new(1.0, 0.0, 0.0));
        let u = s.cross(f);

        Self {
            cols: [
                [s.x, u.x, -f.x, 0.0],
                [s.y, u.y, -f.y, 0.0],
                [s.z, u.z, -f.z, 0.0],
                [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
            ],
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let a = &self.cols;
        let b = &other.cols;
        let mut c = [[0.0f64; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b[col][0]
                    + a[1][row] * b[col][1]
                    + a[2][row] * b[col][2]
                    + a[3][row] * b[col][3];
            }
        }
        Self { cols: c }
    }

    /// Homogeneous transform of a point (w = 1).
    pub fn transform_point4(&self, p: Vec3) -> [f64; 4] {
        let m = &self.cols;
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = m[0][row] * p.x + m[1][row] * p.y + m[2][row] * p.z + m[3][row];
        }
        out
    }

    /// Transform with perspective divide. `None` when `w` is not positive.
    pub fn project_point(&self, p: Vec3) -> Option<Vec3> {
        let [x, y, z, w] = self.transform_point4(p);
        if w <= 1e-12 || !w.is_finite() {
            return None;
        }
        Some(Vec3::new(x / w, y / w, z / w))
    }

    /// Like [`Mat4::project_point`] but accepts any non-zero `w`; used when
    /// unprojecting through an inverse projection.
    pub fn transform_point_affine(&self, p: Vec3) -> Option<Vec3> {
        let [x, y, z, w] = self.transform_point4(p);
        if w.abs() <= 1e-12 || !w.is_finite() {
            return None;
        }
        Some(Vec3::new(x / w, y / w, z / w))
    }

    pub fn inverse(&self) -> Option<Self> {
        let m = self.flatten();
        let mut inv = [0.0f64; 16];

        inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
            + m[9] * m[7] * m[14]
            + m[13] * m[6] * m[11]
            - m[13] * m[7] * m[10];
        inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
            - m[8] * m[7] * m[14]
            - m[12] * m[6] * m[11]
            + m[12] * m[7] * m[10];
        inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
            + m[8] * m[7] * m[13]
            + m[12] * m[5] * m[11]
            - m[12] * m[7] * m[9];
        inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
            - m[8] * m[6] * m[13]
            - m[12] * m[5] * m[10]
            + m[12] * m[6] * m[9];
        inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
            - m[9] * m[3] * m[14]
            - m[13] * m[2] * m[11]
            + m[13] * m[3] * m[10];
        inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
            + m[8] * m[3] * m[14]
            + m[12] * m[2] * m[11]
            - m[12] * m[3] * m[10];
        inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
            - m[8] * m[3] * m[13]
            - m[12] * m[1] * m[11]
            + m[12] * m[3] * m[9];
        inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
            + m[8] * m[2] * m[13]
            + m[12] * m[1] * m[10]
            - m[12] * m[2] * m[9];
        inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
            + m[5] * m[3] * m[14]
            + m[13] * m[2] * m[7]
            - m[13] * m[3] * m[6];
        inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
            - m[4] * m[3] * m[14]
            - m[12] * m[2] * m[7]
            + m[12] * m[3] * m[6];
        inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
            + m[4] * m[3] * m[13]
            + m[12] * m[1] * m[7]
            - m[12] * m[3] * m[5];
        inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
            - m[4] * m[2] * m[13]
            - m[12] * m[1] * m[6]
            + m[12] * m[2] * m[5];
        inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
            - m[5] * m[3] * m[10]
            - m[9] * m[2] * m[7]
            + m[9] * m[3] * m[6];
        inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
            + m[4] * m[3] * m[10]
            + m[8] * m[2] * m[7]
            - m[8] * m[3] * m[6];
        inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
            - m[4] * m[3] * m[9]
            - m[8] * m[1] * m[7]
            + m[8] * m[3] * m[5];
        inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
            + m[4] * m[2] * m[9]
            + m[8] * m[1] * m[6]
            - m[8] * m[2] * m[5];

        let det = m[0] * inv[0] + m[1] * inv[4] + m[2] * inv[8] + m[3] * inv[12];
        if det.abs() < 1e-300 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;

        let mut cols = [[0.0f64; 4]; 4];
        for (i, v) in inv.iter().enumerate() {
            cols[i / 4][i % 4] = v * inv_det;
        }
        Some(Self { cols })
    }

    fn flatten(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = self.cols[col][row];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Mat4;
    use crate::math::Vec3;

    fn assert_mat_close(a: &Mat4, b: &Mat4, eps: f64) {
        for col in 0..4 {
            for row in 0..4 {
                let d = (a.cols[col][row] - b.cols[col][row]).abs();
                assert!(d < eps, "[{col}][{row}] differs by {d}");
            }
        }
    }

    #[test]
    fn inverse_of_view_proj_round_trips() {
        let proj = Mat4::perspective_rh_gl(45f64.to_radians(), 1.6, 0.1, 2000.0);
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 10.0, 3.0),
            Vec3::new(0.0, 0.0, -0.64),
            Vec3::Y,
        );
        let vp = proj.mul(&view);
        let inv = vp.inverse().expect("invertible");
        assert_mat_close(&vp.mul(&inv), &Mat4::IDENTITY, 1e-9);
    }

    #[test]
    fn look_target_projects_to_screen_center() {
        let proj = Mat4::perspective_rh_gl(45f64.to_radians(), 1.0, 0.1, 100.0);
        let target = Vec3::new(2.0, 0.0, -1.0);
        let view = Mat4::look_at_rh(Vec3::new(2.0, 8.0, 2.0), target, Vec3::Y);
        let ndc = proj.mul(&view).project_point(target).expect("in front");
        assert!(ndc.x.abs() < 1e-9);
        assert!(ndc.y.abs() < 1e-9);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_camera_do_not_project() {
        let proj = Mat4::perspective_rh_gl(45f64.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        let behind = Vec3::new(0.0, 0.0, 10.0);
        assert!(proj.mul(&view).project_point(behind).is_none());
    }

    #[test]
    fn top_down_look_at_is_still_invertible() {
        let view = Mat4::look_at_rh(Vec3::new(1.0, 10.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::Y);
        assert!(view.inverse().is_some());
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let zero = Mat4 { cols: [[0.0; 4]; 4] };
        assert!(zero.inverse().is_none());
    }
}
