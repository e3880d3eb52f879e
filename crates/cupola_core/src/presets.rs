//! Built-in scenes.

use cupola_math::Vec3;

use crate::scene::{
    CameraDesc, EllipsoidDesc, LightDesc, MaterialDesc, RenderConfig, SceneDescription,
};

impl SceneDescription {
    /// The reference scene: two matte ellipsoids and a gold-coloured mirror
    /// standing under a large matte dome that is clipped open at y = 1.44.
    pub fn reference() -> Self {
        let specular = Vec3::ONE;

        Self {
            camera: CameraDesc {
                eye: Vec3::new(0.0, -0.4, 2.5),
                look_at: Vec3::new(0.0, 0.4, 0.0),
                up: Vec3::new(0.0, 1.0, 0.1),
                fov_degrees: 45.0,
            },
            ambient: Vec3::splat(0.4),
            lights: vec![LightDesc {
                direction: Vec3::new(1.0, 8.0, 1.0),
                radiance: Vec3::splat(2.0),
            }],
            materials: vec![
                MaterialDesc::Matte {
                    diffuse: Vec3::new(0.05, 0.6, 0.05),
                    specular,
                    shininess: 50.0,
                },
                MaterialDesc::Matte {
                    diffuse: Vec3::new(0.7, 0.2, 0.2),
                    specular,
                    shininess: 50.0,
                },
                MaterialDesc::Mirror {
                    n: Vec3::new(0.17, 0.35, 1.5),
                    kappa: Vec3::new(3.1, 2.7, 1.9),
                },
                MaterialDesc::Matte {
                    diffuse: Vec3::new(0.8, 0.6, 0.2),
                    specular,
                    shininess: 50.0,
                },
            ],
            ellipsoids: vec![
                EllipsoidDesc {
                    center: Vec3::new(-0.35, -0.35, 0.15),
                    axes: Vec3::new(0.3, 0.15, 0.3),
                    material: 0,
                    cut_y: None,
                },
                EllipsoidDesc {
                    center: Vec3::new(-0.1, -0.2, -0.35),
                    axes: Vec3::new(0.1, 0.3, 0.2),
                    material: 1,
                    cut_y: None,
                },
                EllipsoidDesc {
                    center: Vec3::new(0.4, 0.05, -0.2),
                    axes: Vec3::new(0.2, 0.5, 0.3),
                    material: 2,
                    cut_y: None,
                },
                EllipsoidDesc {
                    center: Vec3::new(0.0, 0.45, 0.0),
                    axes: Vec3::new(4.9, 1.0, 4.9),
                    material: 3,
                    cut_y: Some(1.44),
                },
            ],
            render: RenderConfig::default(),
        }
    }

    /// One matte ellipsoid at the origin lit by a single directional light.
    pub fn single_ellipsoid() -> Self {
        Self {
            camera: CameraDesc {
                eye: Vec3::new(0.0, 0.0, 2.0),
                look_at: Vec3::ZERO,
                up: Vec3::Y,
                fov_degrees: 45.0,
            },
            ambient: Vec3::splat(0.4),
            lights: vec![LightDesc {
                direction: Vec3::ONE,
                radiance: Vec3::splat(2.0),
            }],
            materials: vec![MaterialDesc::Matte {
                diffuse: Vec3::new(0.8, 0.2, 0.1),
                specular: Vec3::ONE,
                shininess: 50.0,
            }],
            ellipsoids: vec![EllipsoidDesc {
                center: Vec3::ZERO,
                axes: Vec3::new(0.2, 0.1, 0.3),
                material: 0,
                cut_y: None,
            }],
            render: RenderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(SceneDescription::reference().validate().is_ok());
        assert!(SceneDescription::single_ellipsoid().validate().is_ok());
    }

    #[test]
    fn test_reference_contents() {
        let desc = SceneDescription::reference();
        assert_eq!(desc.ellipsoids.len(), 4);
        assert_eq!(desc.materials.len(), 4);
        assert_eq!(desc.lights.len(), 1);

        // Only the dome is clipped
        let clipped: Vec<_> = desc
            .ellipsoids
            .iter()
            .filter_map(|e| e.cut_y)
            .collect();
        assert_eq!(clipped, vec![1.44]);

        let mirrors = desc
            .materials
            .iter()
            .filter(|m| matches!(m, MaterialDesc::Mirror { .. }))
            .count();
        assert_eq!(mirrors, 1);
    }

    #[test]
    fn test_presets_survive_json() {
        for desc in [SceneDescription::reference(), SceneDescription::single_ellipsoid()] {
            let json = desc.to_json_string().unwrap();
            assert_eq!(SceneDescription::from_json_str(&json).unwrap(), desc);
        }
    }
}
