//! Renderable scene and the recursive shading routine.

use cupola_core::{RenderConfig, SceneDescription, SceneError, SceneResult};
use cupola_math::{reflect, Interval, Ray};

use crate::{Camera, Color, Ellipsoid, Hit, Light, Material, MaterialId, Primitive};

/// Everything needed to shade a ray.
///
/// The scene owns its materials, primitives and lights; hits refer to
/// materials by [`MaterialId`]. Nothing is mutated once rendering starts,
/// so a `&Scene` can be shared freely between render threads.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    camera: Camera,
    ambient: Color,
    config: RenderConfig,
}

impl Scene {
    /// Create an empty scene. Fails if `config` cannot be rendered.
    pub fn new(camera: Camera, ambient: Color, config: RenderConfig) -> SceneResult<Self> {
        config.validate()?;
        Ok(Self {
            primitives: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            camera,
            ambient,
            config,
        })
    }

    /// Build a scene from a description, validating it first.
    pub fn build(desc: &SceneDescription) -> SceneResult<Self> {
        desc.validate()?;

        let camera = Camera::from_desc(&desc.camera);
        let mut scene = Scene::new(camera, desc.ambient, desc.render)?;

        for material in &desc.materials {
            scene.add_material(material.into());
        }
        for light in &desc.lights {
            scene.add_light(light.into());
        }
        for ellipsoid in &desc.ellipsoids {
            scene.add_primitive(Ellipsoid::from(ellipsoid))?;
        }

        log::debug!(
            "Built scene: {} primitives, {} materials, {} lights, {}x{} max depth {}",
            scene.primitives.len(),
            scene.materials.len(),
            scene.lights.len(),
            scene.config.width,
            scene.config.height,
            scene.config.max_depth
        );

        Ok(scene)
    }

    /// Add a material and return its id.
    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    /// Add a primitive. Its material must already be in the scene.
    pub fn add_primitive(&mut self, primitive: impl Into<Primitive>) -> SceneResult<()> {
        let primitive = primitive.into();
        let MaterialId(material) = primitive.material();
        if material >= self.materials.len() {
            return Err(SceneError::UnknownMaterial {
                ellipsoid: self.primitives.len(),
                material,
            });
        }
        self.primitives.push(primitive);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Ambient radiance `La`.
    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Look up a material by id.
    pub fn material(&self, id: MaterialId) -> &Material {
        // Ids are checked in add_primitive
        &self.materials[id.0]
    }

    /// Closest hit along the ray.
    ///
    /// The returned normal always faces the incoming ray, including on the
    /// inside of a primitive the ray started in. Equal distances keep the
    /// primitive that was added first.
    pub fn first_intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;

        for primitive in &self.primitives {
            if let Some(hit) = primitive.intersect(ray) {
                if !Interval::FORWARD.surrounds(hit.t) {
                    continue;
                }
                if best.map_or(true, |b| hit.t < b.t) {
                    best = Some(hit);
                }
            }
        }

        best.map(|mut hit| {
            if ray.direction.dot(hit.normal) > 0.0 {
                hit.normal = -hit.normal;
            }
            hit
        })
    }

    /// True if anything at all lies in front of the ray.
    ///
    /// Lights are directional, so any positive distance occludes.
    pub fn shadow_intersect(&self, ray: &Ray) -> bool {
        self.primitives.iter().any(|primitive| {
            primitive
                .intersect(ray)
                .is_some_and(|hit| Interval::FORWARD.surrounds(hit.t))
        })
    }

    /// Radiance arriving along `ray`.
    ///
    /// `depth` counts mirror bounces so far; past `max_depth` the ambient
    /// radiance is returned instead of tracing further.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let mut rays = 0;
        self.trace_counted(ray, depth, &mut rays)
    }

    /// [`trace`](Self::trace) that also counts every ray cast, primary,
    /// shadow and reflected alike.
    pub(crate) fn trace_counted(&self, ray: &Ray, depth: u32, rays: &mut u64) -> Color {
        if depth > self.config.max_depth {
            return self.ambient;
        }

        *rays += 1;
        let hit = match self.first_intersect(ray) {
            Some(hit) => hit,
            None => return self.ambient,
        };

        match self.material(hit.material) {
            Material::Matte(matte) => {
                let mut out = matte.ambient() * self.ambient;

                for light in &self.lights {
                    let cos_theta = hit.normal.dot(light.direction());
                    if cos_theta <= 0.0 {
                        continue;
                    }

                    let shadow_ray = Ray::offset(
                        hit.position,
                        hit.normal,
                        self.config.epsilon,
                        light.direction(),
                    );
                    *rays += 1;
                    if self.shadow_intersect(&shadow_ray) {
                        continue;
                    }

                    out += matte.direct(hit.normal, ray.direction, light.direction(), light.radiance());
                }

                out
            }
            Material::Mirror(mirror) => {
                let reflected = reflect(ray.direction, hit.normal);
                let cos_alpha = -ray.direction.dot(hit.normal);
                let fresnel = mirror.fresnel(cos_alpha);

                let bounce = Ray::offset(hit.position, hit.normal, self.config.epsilon, reflected);
                self.trace_counted(&bounce, depth + 1, rays) * fresnel
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Matte, Mirror, Vec3};

    fn empty_scene() -> Scene {
        let mut camera = Camera::new();
        camera.set(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO, Vec3::Y, 45.0_f32.to_radians());
        Scene::new(camera, Vec3::splat(0.4), RenderConfig::default().with_resolution(64, 64))
            .unwrap()
    }

    fn single() -> Scene {
        Scene::build(&SceneDescription::single_ellipsoid()).expect("preset builds")
    }

    #[test]
    fn test_miss_returns_ambient() {
        let scene = single();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(scene.trace(&ray, 0), Vec3::splat(0.4));

        // An empty scene is ambient everywhere
        let empty = empty_scene();
        assert_eq!(empty.trace(&Ray::new(Vec3::ZERO, -Vec3::Z), 0), Vec3::splat(0.4));
    }

    #[test]
    fn test_depth_cutoff_returns_ambient() {
        let scene = single();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let max_depth = scene.config().max_depth;

        assert_ne!(scene.trace(&ray, max_depth), Vec3::splat(0.4));
        assert_eq!(scene.trace(&ray, max_depth + 1), Vec3::splat(0.4));
    }

    #[test]
    fn test_first_intersect_picks_closest() {
        let mut scene = empty_scene();
        let m = scene.add_material(Matte::new(Vec3::splat(0.5), Vec3::ONE, 10.0).into());
        let far = scene.add_material(Matte::new(Vec3::splat(0.1), Vec3::ONE, 10.0).into());

        // Far one added first so order alone cannot explain the result
        scene
            .add_primitive(Ellipsoid::new(Vec3::new(0.0, 0.0, -3.0), Vec3::splat(0.5), far))
            .unwrap();
        scene
            .add_primitive(Ellipsoid::new(Vec3::new(0.0, 0.0, -1.0), Vec3::splat(0.5), m))
            .unwrap();

        let hit = scene
            .first_intersect(&Ray::new(Vec3::ZERO, -Vec3::Z))
            .expect("hit");
        assert!((hit.t - 0.5).abs() < 1e-5);
        assert_eq!(hit.material, m);
    }

    #[test]
    fn test_normal_faces_ray() {
        let scene = single();

        // From outside and from inside the ellipsoid
        let rays = [
            Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z),
            Ray::new(Vec3::ZERO, Vec3::X),
            Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.7, 0.2)),
            Ray::new(Vec3::new(0.05, 0.02, 0.0), Vec3::new(-1.0, 0.5, 2.0)),
        ];
        for ray in rays {
            let hit = scene.first_intersect(&ray).expect("hit");
            assert!(ray.direction.dot(hit.normal) <= 0.0);
            assert!((hit.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_shadow_intersect() {
        let empty = empty_scene();
        assert!(!empty.shadow_intersect(&Ray::new(Vec3::ZERO, Vec3::Y)));

        let scene = single();
        assert!(scene.shadow_intersect(&Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z)));
        assert!(!scene.shadow_intersect(&Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::Z)));
        // Starting inside counts: the exit point is at t > 0
        assert!(scene.shadow_intersect(&Ray::new(Vec3::ZERO, Vec3::Y)));
    }

    #[test]
    fn test_shadowed_point_gets_only_ambient() {
        let mut scene = empty_scene();
        let m = scene.add_material(Matte::new(Vec3::splat(0.5), Vec3::ONE, 10.0).into());
        scene.add_light(Light::new(Vec3::Y, Vec3::splat(2.0)));

        // Ground blob with a blocker right above it
        scene
            .add_primitive(Ellipsoid::new(Vec3::ZERO, Vec3::new(1.0, 0.1, 1.0), m))
            .unwrap();
        scene
            .add_primitive(Ellipsoid::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.3, 1.0), m))
            .unwrap();

        let down = Ray::new(Vec3::new(0.0, 0.5, 2.0), Vec3::new(0.0, -0.5, -2.0));
        let color = scene.trace(&down, 0);
        let ambient_only = Vec3::splat(0.5) * std::f32::consts::PI * Vec3::splat(0.4);
        assert!((color - ambient_only).length() < 1e-5);

        // Same ray without the blocker picks up direct light
        let mut open = empty_scene();
        let m = open.add_material(Matte::new(Vec3::splat(0.5), Vec3::ONE, 10.0).into());
        open.add_light(Light::new(Vec3::Y, Vec3::splat(2.0)));
        open.add_primitive(Ellipsoid::new(Vec3::ZERO, Vec3::new(1.0, 0.1, 1.0), m))
            .unwrap();
        assert!(open.trace(&down, 0).x > ambient_only.x + 0.1);
    }

    #[test]
    fn test_mirror_reflects_environment() {
        let mut scene = empty_scene();
        let mirror = Mirror::new(Vec3::new(0.17, 0.35, 1.5), Vec3::new(3.1, 2.7, 1.9));
        let id = scene.add_material(mirror.into());
        scene
            .add_primitive(Ellipsoid::new(Vec3::ZERO, Vec3::splat(0.5), id))
            .unwrap();

        // Head-on: reflection goes back out to the environment, F = F0
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let color = scene.trace(&ray, 0);
        let expected = Vec3::splat(0.4) * mirror.f0();
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn test_facing_mirrors_terminate() {
        let mut scene = empty_scene();
        let id = scene.add_material(Mirror::from_f0(Vec3::splat(0.9)).into());
        scene
            .add_primitive(Ellipsoid::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::splat(0.5), id))
            .unwrap();
        scene
            .add_primitive(Ellipsoid::new(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5), id))
            .unwrap();

        // Bounces straight back and forth along the X axis
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rays = 0;
        let color = scene.trace_counted(&ray, 0, &mut rays);

        assert!(color.is_finite());
        assert_eq!(rays, 6);
        // Six head-on bounces at F = 0.9 each before falling back to ambient
        let expected = 0.4 * 0.9_f32.powi(6);
        assert!((color - Vec3::splat(expected)).length() < 1e-4);
    }

    #[test]
    fn test_mirror_inside_closed_ellipsoid_terminates() {
        let mut scene = empty_scene();
        let id = scene.add_material(Mirror::from_f0(Vec3::ONE).into());
        scene
            .add_primitive(Ellipsoid::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), id))
            .unwrap();

        let color = scene.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, 0.5)), 0);
        assert!(color.is_finite());
        assert!((color - Vec3::splat(0.4)).length() < 1e-4);
    }

    #[test]
    fn test_add_primitive_unknown_material() {
        let mut scene = empty_scene();
        let result = scene.add_primitive(Ellipsoid::new(Vec3::ZERO, Vec3::ONE, MaterialId(7)));
        assert!(matches!(
            result,
            Err(SceneError::UnknownMaterial { material: 7, .. })
        ));
        assert!(scene.primitives().is_empty());
    }

    #[test]
    fn test_build_rejects_invalid_description() {
        let mut desc = SceneDescription::single_ellipsoid();
        desc.ellipsoids[0].axes.y = -0.1;
        assert!(Scene::build(&desc).is_err());
    }

    #[test]
    fn test_new_rejects_unrenderable_config() {
        let zero_width = RenderConfig::default().with_resolution(0, 600);
        assert!(matches!(
            Scene::new(Camera::new(), Vec3::ZERO, zero_width),
            Err(SceneError::InvalidRenderConfig(_))
        ));

        let too_deep = RenderConfig::default().with_max_depth(1_000_000);
        assert!(matches!(
            Scene::new(Camera::new(), Vec3::ZERO, too_deep),
            Err(SceneError::InvalidRenderConfig(_))
        ));

        let mut desc = SceneDescription::single_ellipsoid();
        desc.render.max_depth = u32::MAX;
        assert!(Scene::build(&desc).is_err());
    }

    #[test]
    fn test_build_reference() {
        let scene = Scene::build(&SceneDescription::reference()).unwrap();
        assert_eq!(scene.primitives().len(), 4);
        assert_eq!(scene.lights().len(), 1);
        assert!((scene.lights()[0].direction().length() - 1.0).abs() < 1e-6);
    }
}
