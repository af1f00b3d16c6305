use nalgebra::Vector3;

use crate::{color::RGBA, volumetric::VoxelGradient};

/// Guards normalization of zero vectors
const EPSILON: f32 = 1e-5;

/// Phong illumination.
///
/// Dot products are taken in absolute value, so surfaces facing away from
/// the light are lit as if they faced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongShading {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: i32,
}

impl Default for PhongShading {
    fn default() -> Self {
        PhongShading {
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 100,
        }
    }
}

impl PhongShading {
    /// Shade `color` at point with `gradient`.
    /// Alpha is kept.
    pub fn shade(
        &self,
        color: &RGBA,
        gradient: &VoxelGradient,
        light: &Vector3<f32>,
        view: &Vector3<f32>,
    ) -> RGBA {
        let normal = gradient.vec / (gradient.mag + EPSILON);

        let light_plus_view = light + view;
        let half = light_plus_view / (light_plus_view.magnitude() + EPSILON);
        let light = light / (light.magnitude() + EPSILON);

        let l_dot_n = light.dot(&normal).abs();
        let n_dot_h = normal.dot(&half).abs();

        let diffuse = self.ambient + self.diffuse * l_dot_n;
        let specular = self.specular * n_dot_h.powi(self.shininess);

        let mut shaded = color.map(|c| c * diffuse).add_scalar(specular);
        shaded.w = color.w;
        shaded
    }
}

#[cfg(test)]
mod test {

    use approx::assert_relative_eq;
    use nalgebra::vector;

    use super::*;
    use crate::color;

    fn headlight() -> Vector3<f32> {
        vector![0.0, 0.0, -1.0]
    }

    #[test]
    fn facing_light() {
        let phong = PhongShading::default();
        let grad = VoxelGradient::new(vector![0.0, 0.0, 3.0]);
        let light = headlight();

        let shaded = phong.shade(&color::new(1.0, 0.5, 0.0, 0.4), &grad, &light, &light);

        // ambient + diffuse + specular, dot products are 1
        assert_relative_eq!(shaded.x, 0.1 + 0.7 + 0.2, epsilon = 1e-3);
        assert_relative_eq!(shaded.y, 0.5 * 0.8 + 0.2, epsilon = 1e-3);
        assert_relative_eq!(shaded.z, 0.2, epsilon = 1e-3);
        assert_eq!(shaded.w, 0.4);
    }

    #[test]
    fn backface_lit() {
        let phong = PhongShading::default();
        let light = headlight();
        let front = phong.shade(
            &color::mono(0.5, 1.0),
            &VoxelGradient::new(vector![0.0, 0.0, 2.0]),
            &light,
            &light,
        );
        let back = phong.shade(
            &color::mono(0.5, 1.0),
            &VoxelGradient::new(vector![0.0, 0.0, -2.0]),
            &light,
            &light,
        );

        assert_relative_eq!(front, back, epsilon = 1e-6);
    }

    #[test]
    fn perpendicular_is_ambient() {
        let phong = PhongShading::default();
        let light = headlight();
        let grad = VoxelGradient::new(vector![1.0, 0.0, 0.0]);

        let shaded = phong.shade(&color::mono(1.0, 1.0), &grad, &light, &light);

        assert_relative_eq!(shaded, color::new(0.1, 0.1, 0.1, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn zero_gradient_is_ambient() {
        let phong = PhongShading::default();
        let light = headlight();

        let shaded = phong.shade(
            &color::new(0.5, 1.0, 0.0, 0.7),
            &VoxelGradient::zero(),
            &light,
            &light,
        );

        assert_relative_eq!(shaded, color::new(0.05, 0.1, 0.0, 0.7), epsilon = 1e-6);
    }
}
