//! The cosmic realm: planets with rings and moons, distant nebulae and a
//! spiral galaxy. Hidden until interactive mode, and only animated while shown.

use std::f32::consts::PI;
use rand::Rng;
use three_d::*;

use crate::config::SceneConfig;
use crate::particles::PointField;
use crate::scene::Transform;
use crate::utils::hex_to_rgb;


/// Base and emissive color of each planet, in creation order
pub const PLANET_PALETTE: [(u32, u32); 8] = [
    (0x4287f5, 0x1a3c7d), // blue gas giant
    (0xf54242, 0x7d1a1a), // red
    (0xf5a742, 0x7d5a1a), // orange
    (0x42f554, 0x1a7d23), // green
    (0xf542f2, 0x7d1a7b), // purple
    (0xf5f542, 0x7d7d1a), // yellow
    (0x42f5f5, 0x1a7d7d), // cyan
    (0xffffff, 0x7d7d7d), // ice
];

pub const GALAXY_SPIN: f32 = 0.0005;


/// How a planet's surface is shaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetSurface {
    /// lit physical material
    Standard,
    /// animated bands and spots shader
    Banded,
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub distance: f32,
    /// radians per second
    pub speed: f32,
    pub angle: f32,
    pub height: f32,
    /// self rotation per frame, radians
    pub rotation_speed: f32,
}

impl Orbit {
    pub fn position(&self) -> Vec3 {
        vec3(self.angle.cos() * self.distance, self.height, self.angle.sin() * self.distance)
    }
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
}


#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    /// pivot at the planet center; spinning it carries the moon around
    pub pivot: Transform,
    pub distance: f32,
    pub radius: f32,
    /// pivot rotation about y, radians per second
    pub orbit_speed: f32,
}

impl Moon {
    /// Placement relative to the owning planet
    pub fn local_matrix(&self) -> Mat4 {
        self.pivot.matrix() * Mat4::from_translation(vec3(self.distance, 0.0, 0.0))
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub transform: Transform,
    pub radius: f32,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub surface: PlanetSurface,
    pub orbit: Orbit,
    pub ring: Option<Ring>,
    pub moons: Vec<Moon>,
}

impl Planet {
    fn generate<R: Rng>(index: usize, rng: &mut R) -> Self {
        let (color, emissive) = PLANET_PALETTE[index % PLANET_PALETTE.len()];
        let radius = 5.0 + rng.gen::<f32>() * 15.0;
        let surface = if rng.gen::<f32>() > 0.5 { PlanetSurface::Standard } else { PlanetSurface::Banded };

        let orbit = Orbit {
            distance: 100.0 + index as f32 * 50.0 + rng.gen::<f32>() * 100.0,
            angle: rng.gen::<f32>() * PI * 2.0,
            height: (rng.gen::<f32>() - 0.5) * 100.0,
            speed: 0.05 + rng.gen::<f32>() * 0.1,
            rotation_speed: 0.005 + rng.gen::<f32>() * 0.01,
        };
        let mut transform = Transform::at(orbit.position());
        transform.rotation.x = rng.gen::<f32>() * PI;
        transform.rotation.y = rng.gen::<f32>() * PI;

        let ring = (rng.gen::<f32>() > 0.6).then(|| Ring {
            inner_radius: radius * 1.5,
            outer_radius: radius * 2.5,
        });

        let mut moons = Vec::new();
        if rng.gen::<f32>() > 0.5 {
            let count = rng.gen_range(1..=3);
            for j in 0..count {
                let mut pivot = Transform::default();
                pivot.rotation.x = rng.gen::<f32>() * PI;
                pivot.rotation.y = rng.gen::<f32>() * PI;
                moons.push(Moon {
                    pivot,
                    distance: radius * 3.0 + j as f32 * radius,
                    radius: radius * 0.2,
                    orbit_speed: 0.02 + rng.gen::<f32>() * 0.05,
                });
            }
        }

        Self {
            transform,
            radius,
            color: hex_to_rgb(color),
            emissive: hex_to_rgb(emissive),
            surface,
            orbit,
            ring,
            moons,
        }
    }

    /// Moves the planet along its orbit and spins it and its moons
    fn advance(&mut self, delta: f32) {
        self.orbit.angle += self.orbit.speed * delta;
        self.transform.position.x = self.orbit.angle.cos() * self.orbit.distance;
        self.transform.position.z = self.orbit.angle.sin() * self.orbit.distance;
        self.transform.rotation.y += self.orbit.rotation_speed;
        for moon in &mut self.moons {
            moon.pivot.rotation.y += moon.orbit_speed * delta;
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// World placement of the ring, lying in the planet's equatorial plane
    pub fn ring_matrix(&self) -> Option<Mat4> {
        self.ring.map(|_| self.matrix() * Mat4::from_angle_x(radians(PI / 2.0)))
    }

    pub fn moon_matrices(&self) -> impl Iterator<Item = Mat4> + '_ {
        let planet = self.matrix();
        self.moons
            .iter()
            .map(move |moon| planet * moon.local_matrix() * Mat4::from_scale(moon.radius))
    }
}


#[derive(Debug, Clone, PartialEq)]
pub struct Nebula {
    pub transform: Transform,
    pub size: f32,
    pub color1: [f32; 3],
    pub color2: [f32; 3],
    /// per-axis rotation per frame
    pub spin: Vec3,
}

impl Nebula {
    fn generate<R: Rng>(rng: &mut R) -> Self {
        let size = 200.0 + rng.gen::<f32>() * 300.0;
        let color1 = [rng.gen(), rng.gen(), rng.gen()];
        let color2 = [rng.gen(), rng.gen(), rng.gen()];
        let distance = 500.0 + rng.gen::<f32>() * 500.0;
        let angle = rng.gen::<f32>() * PI * 2.0;
        let height = (rng.gen::<f32>() - 0.5) * 400.0;

        let mut transform = Transform::at(vec3(angle.cos() * distance, height, angle.sin() * distance));
        transform.rotation = vec3(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI);
        let spin = vec3(
            (rng.gen::<f32>() - 0.5) * 0.001,
            (rng.gen::<f32>() - 0.5) * 0.001,
            (rng.gen::<f32>() - 0.5) * 0.001,
        );
        Self { transform, size, color1, color2, spin }
    }

    /// The unit plane scaled to the nebula's size
    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix() * Mat4::from_nonuniform_scale(self.size * 0.5, self.size * 0.5, 1.0)
    }
}


#[derive(Debug, Clone)]
pub struct Galaxy {
    pub transform: Transform,
    pub points: PointField,
    /// rotation about y per frame
    pub spin: f32,
}


/// Everything revealed by interactive mode
#[derive(Debug, Clone)]
pub struct Cosmos {
    pub planets: Vec<Planet>,
    pub nebulae: Vec<Nebula>,
    pub galaxy: Galaxy,
    visible: bool,
}

impl Cosmos {
    pub fn generate<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        let planets = (0..config.planet_count).map(|i| Planet::generate(i, rng)).collect();
        let nebulae = (0..config.nebula_count).map(|_| Nebula::generate(rng)).collect();

        let mut transform = Transform::at(vec3(600.0, 200.0, -400.0));
        transform.rotation.x = PI / 4.0;
        let galaxy = Galaxy {
            transform,
            points: PointField::spiral_galaxy(config.galaxy_particle_count, rng),
            spin: GALAXY_SPIN,
        };

        Self { planets, nebulae, galaxy, visible: false }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// One frame of orbital motion; does nothing while hidden
    pub fn advance(&mut self, delta: f32) {
        if !self.visible {
            return;
        }
        for planet in &mut self.planets {
            planet.advance(delta);
        }
        for nebula in &mut self.nebulae {
            nebula.transform.rotation += nebula.spin;
        }
        self.galaxy.transform.rotation.y += self.galaxy.spin;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn cosmos(seed: u64) -> Cosmos {
        let mut config = SceneConfig::default();
        config.galaxy_particle_count = 100;
        Cosmos::generate(&config, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn generated_layout_matches_the_recipe() {
        let cosmos = cosmos(20);
        assert_eq!(cosmos.planets.len(), 8);
        assert_eq!(cosmos.nebulae.len(), 5);
        assert!(!cosmos.is_visible());
        for (i, planet) in cosmos.planets.iter().enumerate() {
            assert!((5.0..=20.0).contains(&planet.radius));
            let min = 100.0 + i as f32 * 50.0;
            assert!((min..=min + 100.0).contains(&planet.orbit.distance));
            assert!((0.05..=0.15).contains(&planet.orbit.speed));
            assert!(planet.moons.len() <= 3);
            assert_eq!(planet.color, hex_to_rgb(PLANET_PALETTE[i].0));
            if let Some(ring) = planet.ring {
                assert_eq!(ring.inner_radius, planet.radius * 1.5);
                assert!(planet.ring_matrix().is_some());
            }
        }
        for nebula in &cosmos.nebulae {
            assert!((200.0..=500.0).contains(&nebula.size));
            let planar = vec3(nebula.transform.position.x, 0.0, nebula.transform.position.z).magnitude();
            assert!((499.9..=1000.1).contains(&planar));
        }
    }

    #[test]
    fn hidden_cosmos_does_not_move() {
        let mut cosmos = cosmos(21);
        let before = cosmos.planets.clone();
        cosmos.advance(1.0);
        assert_eq!(cosmos.planets, before);
    }

    #[test]
    fn planets_follow_their_orbits() {
        let mut cosmos = cosmos(22);
        cosmos.set_visible(true);
        let before = cosmos.planets.clone();
        cosmos.advance(0.5);
        for (old, new) in before.iter().zip(&cosmos.planets) {
            let angle = old.orbit.angle + old.orbit.speed * 0.5;
            assert!((new.orbit.angle - angle).abs() < 1e-5);
            assert!((new.transform.position.x - angle.cos() * old.orbit.distance).abs() < 1e-3);
            assert!((new.transform.position.z - angle.sin() * old.orbit.distance).abs() < 1e-3);
            assert_eq!(new.transform.position.y, old.transform.position.y);
            assert!((new.transform.rotation.y - (old.transform.rotation.y + old.orbit.rotation_speed)).abs() < 1e-6);
            for (m0, m1) in old.moons.iter().zip(&new.moons) {
                assert!((m1.pivot.rotation.y - (m0.pivot.rotation.y + m0.orbit_speed * 0.5)).abs() < 1e-6);
            }
        }
        assert!((cosmos.galaxy.transform.rotation.y - GALAXY_SPIN).abs() < 1e-7);
    }

    #[test]
    fn moons_sit_at_their_distance() {
        let cosmos = cosmos(23);
        for planet in &cosmos.planets {
            let center = planet.transform.position;
            for (moon, m) in planet.moons.iter().zip(planet.moon_matrices()) {
                let at = vec3(m.w.x, m.w.y, m.w.z);
                assert!(((at - center).magnitude() - moon.distance).abs() < 1e-2);
            }
        }
    }
}
