use std::f32::consts::PI;
use rand::Rng;
use three_d::*;


/// Distance from the origin beyond which a quantum particle is recycled
pub const RECYCLE_RADIUS: f32 = 10.0;

/// Half side of the cube new particle positions are drawn from
pub const SPAWN_HALF_EXTENT: f32 = 10.0;

const MAX_SPEED: f32 = 0.01;


/// Uniform random point in the axis-aligned cube [-half_extent, half_extent]^3
pub fn random_in_cube<R: Rng>(rng: &mut R, half_extent: f32) -> Vec3 {
    vec3(
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent,
    )
}


#[derive(Debug, Clone, PartialEq)]
pub struct QuantumParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
}


/// Small drifting spheres that get thrown back into the spawn cube once they stray
#[derive(Debug, Clone)]
pub struct QuantumField {
    pub particles: Vec<QuantumParticle>,
}

impl QuantumField {
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| QuantumParticle {
                position: random_in_cube(rng, SPAWN_HALF_EXTENT),
                velocity: random_in_cube(rng, MAX_SPEED),
                scale: 1.0,
            })
            .collect();
        Self { particles }
    }

    /// Moves every particle, recycles the strays and updates the pulse scale.
    /// Returns how many particles were recycled.
    pub fn update<R: Rng>(&mut self, delta: f32, elapsed: f32, rng: &mut R) -> usize {
        let mut recycled = 0;
        for (i, p) in self.particles.iter_mut().enumerate() {
            p.position += p.velocity * delta;
            if p.position.magnitude() > RECYCLE_RADIUS {
                p.position = random_in_cube(rng, SPAWN_HALF_EXTENT);
                recycled += 1;
            }
            p.scale = 1.0 + 0.2 * (elapsed * 3.0 + i as f32).sin();
        }
        recycled
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}


/// Torus of colored sparks around the ZEN text
#[derive(Debug, Clone)]
pub struct Halo {
    pub base_positions: Vec<Vec3>,
    pub colors: Vec<[f32; 3]>,
    pub sizes: Vec<f32>,
}

impl Halo {
    pub fn generate<R: Rng>(count: usize, center: Vec3, rng: &mut R) -> Self {
        let mut base_positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        let mut sizes = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = rng.gen::<f32>() * PI * 2.0;
            let radius = 8.0 + (rng.gen::<f32>() - 0.5) * 3.0;
            let height = (rng.gen::<f32>() - 0.5) * 5.0;
            base_positions.push(center + vec3(angle.cos() * radius, height, angle.sin() * radius));
            colors.push([rng.gen(), rng.gen(), rng.gen()]);
            sizes.push(rng.gen::<f32>() * 0.5 + 0.1);
        }
        Self { base_positions, colors, sizes }
    }

    /// Positions wobbled around their rest point; `amplitude` is 0.3 in idle mode
    pub fn positions_at(&self, time: f32, amplitude: f32) -> impl Iterator<Item = Vec3> + '_ {
        self.base_positions.iter().map(move |p| {
            vec3(
                p.x + (time * 2.0 + p.z).sin() * amplitude,
                p.y + (time * 2.0 + p.x).cos() * amplitude,
                p.z + (time * 2.0 + p.y).sin() * amplitude,
            )
        })
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }
}


/// Static points with optional per-point color
#[derive(Debug, Clone, Default)]
pub struct PointField {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<[f32; 3]>>,
}

impl PointField {
    /// Uniformly distributed directions on a shell between two radii
    pub fn starfield_shell<R: Rng>(count: usize, inner: f32, outer: f32, rng: &mut R) -> Self {
        let positions = (0..count)
            .map(|_| {
                let theta = rng.gen::<f32>() * PI * 2.0;
                let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                let radius = inner + rng.gen::<f32>() * (outer - inner);
                vec3(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            })
            .collect();
        Self { positions, colors: None }
    }

    /// Three-armed spiral, redder and greener towards the rim
    pub fn spiral_galaxy<R: Rng>(count: usize, rng: &mut R) -> Self {
        const ARMS: usize = 3;
        const EXTENT: f32 = 200.0;
        let mut positions = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count);
        for _ in 0..count {
            let arm = rng.gen_range(0..ARMS) as f32;
            let angle = arm * (PI * 2.0 / ARMS as f32) + rng.gen::<f32>() * 0.5;
            let distance = 5.0 + rng.gen::<f32>().sqrt() * EXTENT;
            let height = (rng.gen::<f32>() - 0.5) * 20.0;
            let swirl = angle + distance * 0.01;
            positions.push(vec3(swirl.cos() * distance, height, swirl.sin() * distance));

            let f = distance / EXTENT;
            colors.push([0.5 + f * 0.5, 0.2 + f * 0.8, 1.0 - f * 0.5]);
        }
        Self { positions, colors: Some(colors) }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn in_cube(p: Vec3) -> bool {
        [p.x, p.y, p.z].iter().all(|c| c.abs() <= SPAWN_HALF_EXTENT)
    }

    #[test]
    fn generated_field_starts_in_cube() {
        let mut rng = StdRng::seed_from_u64(10);
        let field = QuantumField::generate(100, &mut rng);
        assert_eq!(field.len(), 100);
        for p in &field.particles {
            assert!(in_cube(p.position));
            assert!([p.velocity.x, p.velocity.y, p.velocity.z].iter().all(|v| v.abs() <= MAX_SPEED));
        }
    }

    #[test]
    fn stray_particle_is_recycled_into_cube() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = QuantumField {
            particles: vec![
                QuantumParticle { position: vec3(10.5, 0.0, 0.0), velocity: vec3(0.0, 0.0, 0.0), scale: 1.0 },
                QuantumParticle { position: vec3(1.0, 2.0, 3.0), velocity: vec3(0.01, 0.0, 0.0), scale: 1.0 },
            ],
        };
        let recycled = field.update(1.0 / 60.0, 0.0, &mut rng);

        assert_eq!(recycled, 1);
        let moved = field.particles[0].position;
        assert_ne!(moved, vec3(10.5, 0.0, 0.0));
        assert!(in_cube(moved));
        // the inner particle only drifted
        assert!((field.particles[1].position.x - (1.0 + 0.01 / 60.0)).abs() < 1e-6);
    }

    #[test]
    fn particle_pushed_over_the_radius_is_recycled() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut field = QuantumField {
            particles: vec![QuantumParticle {
                position: vec3(0.0, 9.999, 0.0),
                velocity: vec3(0.0, 0.01, 0.0),
                scale: 1.0,
            }],
        };
        assert_eq!(field.update(1.0, 0.0, &mut rng), 1);
        assert!(in_cube(field.particles[0].position));
    }

    #[test]
    fn scale_pulses_with_index_offset() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut field = QuantumField::generate(3, &mut rng);
        field.update(0.0, 0.0, &mut rng);
        assert!((field.particles[0].scale - 1.0).abs() < 1e-6);
        assert!((field.particles[1].scale - (1.0 + 0.2 * 1.0_f32.sin())).abs() < 1e-6);
    }

    #[test]
    fn halo_forms_a_torus_around_the_text() {
        let mut rng = StdRng::seed_from_u64(14);
        let center = vec3(0.0, 3.0, -5.0);
        let halo = Halo::generate(500, center, &mut rng);
        for (p, size) in halo.base_positions.iter().zip(&halo.sizes) {
            let ring = vec3(p.x - center.x, 0.0, p.z - center.z).magnitude();
            assert!((6.5..=9.5).contains(&ring), "ring radius {}", ring);
            assert!((p.y - center.y).abs() <= 2.5);
            assert!((0.1..=0.6).contains(size));
        }
        for (rest, moved) in halo.base_positions.iter().zip(halo.positions_at(1.3, 0.3)) {
            assert!((moved - *rest).magnitude() <= 0.3 * 3.0_f32.sqrt() + 1e-5);
        }
    }

    #[test]
    fn starfield_stays_on_its_shell() {
        let mut rng = StdRng::seed_from_u64(15);
        let stars = PointField::starfield_shell(1000, 300.0, 500.0, &mut rng);
        assert_eq!(stars.len(), 1000);
        for p in &stars.positions {
            let r = p.magnitude();
            assert!((299.9..=500.1).contains(&r), "radius {}", r);
        }
    }

    #[test]
    fn galaxy_is_flat_and_colored() {
        let mut rng = StdRng::seed_from_u64(16);
        let galaxy = PointField::spiral_galaxy(2000, &mut rng);
        let colors = galaxy.colors.as_ref().unwrap();
        assert_eq!(colors.len(), galaxy.len());
        for p in &galaxy.positions {
            assert!(p.y.abs() <= 10.0);
            let planar = vec3(p.x, 0.0, p.z).magnitude();
            assert!((4.99..=205.01).contains(&planar));
        }
    }
}
