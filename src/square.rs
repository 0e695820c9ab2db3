//! Reference adapter: the largest square inside a simple polygon.
//!
//! [`SquareProblem`] searches for the largest square (center, side
//! length, rotation) that fits entirely inside a target polygon. It is
//! an ordinary consumer of the engine: allele bounds come from the
//! polygon's bounding box, fitness is the side length of a contained
//! square (zero otherwise), and selection uses the engine default while
//! recombination and mutation are overridden with the continuous
//! operators that suit a smooth geometric landscape.

use rand::Rng;

use crate::allele::{Allele, AlleleSet};
use crate::candidate::{Candidate, Genotype};
use crate::error::EvoResult;
use crate::mutation::{mutate_pitched, MIN_PITCH};
use crate::problem::Problem;
use crate::recombination::{rank_parents, recombine_soft, DOMINATOR_BIAS};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A simple closed polygon; vertices in order, either winding.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its vertices.
    ///
    /// # Panics
    /// Panics if fewer than 3 vertices are given.
    pub fn new(vertices: Vec<Point>) -> Self {
        assert!(vertices.len() >= 3, "a polygon needs at least 3 vertices");
        Self { vertices }
    }

    /// The vertices, in order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Axis-aligned bounding box as (lower-left, upper-right).
    pub fn bounding_box(&self) -> (Point, Point) {
        let mut lo = self.vertices[0];
        let mut hi = self.vertices[0];
        for v in &self.vertices[1..] {
            lo.x = lo.x.min(v.x);
            lo.y = lo.y.min(v.y);
            hi.x = hi.x.max(v.x);
            hi.y = hi.y.max(v.y);
        }
        (lo, hi)
    }

    /// Even-odd ray cast. Points on the boundary may land either way.
    pub fn contains_point(&self, p: Point) -> bool {
        let mut inside = false;
        let n = self.vertices.len();
        let mut j = n - 1;
        for i in 0..n {
            let (vi, vj) = (self.vertices[i], self.vertices[j]);
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vj.x + (p.y - vj.y) / (vi.y - vj.y) * (vi.x - vj.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether a quadrilateral lies fully inside: every corner inside
    /// and no polygon edge properly crossing a quad edge.
    fn contains_quad(&self, corners: &[Point; 4]) -> bool {
        if !corners.iter().all(|&c| self.contains_point(c)) {
            return false;
        }
        let n = self.vertices.len();
        for i in 0..n {
            let (a, b) = (self.vertices[i], self.vertices[(i + 1) % n]);
            for k in 0..4 {
                let (c, d) = (corners[k], corners[(k + 1) % 4]);
                if segments_cross(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper segment crossing; touching endpoints and collinear overlap
/// do not count.
fn segments_cross(p1: Point, p2: Point, q1: Point, q2: Point) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);
    ((d1 > 0.0) != (d2 > 0.0)) && ((d3 > 0.0) != (d4 > 0.0))
}

// Slot layout of the square genome shape.
const CENTER_X: usize = 0;
const CENTER_Y: usize = 1;
const SIZE: usize = 2;
const ROTATION: usize = 3;

/// One candidate square: center, side length, rotation in degrees.
#[derive(Debug, Clone)]
pub struct SquareCandidate {
    genotype: Genotype,
    is_outside: bool,
}

impl SquareCandidate {
    fn new(shape: AlleleSet, generation: u64) -> Self {
        Self {
            genotype: Genotype::new(shape, generation),
            is_outside: false,
        }
    }

    /// Center of the square.
    pub fn center(&self) -> Point {
        Point::new(
            self.genotype.value_at(CENTER_X),
            self.genotype.value_at(CENTER_Y),
        )
    }

    /// Side length.
    pub fn size(&self) -> f64 {
        self.genotype.value_at(SIZE)
    }

    /// Rotation in degrees, within `[0, 180)` by construction of the
    /// bounds (a square repeats itself every 90 degrees anyway).
    pub fn rotation(&self) -> f64 {
        self.genotype.value_at(ROTATION)
    }

    /// Whether the last evaluation found this square partly outside the
    /// polygon.
    pub fn is_outside(&self) -> bool {
        self.is_outside
    }

    /// The four corners of the rotated square.
    pub fn corners(&self) -> [Point; 4] {
        let center = self.center();
        let half = self.size() / 2.0;
        let theta = self.rotation().to_radians();
        let (sin, cos) = theta.sin_cos();
        // Corner offsets of the axis-aligned square, rotated by theta.
        let offsets = [
            (-half, -half),
            (half, -half),
            (half, half),
            (-half, half),
        ];
        offsets.map(|(dx, dy)| {
            Point::new(
                center.x + dx * cos - dy * sin,
                center.y + dx * sin + dy * cos,
            )
        })
    }
}

impl Candidate for SquareCandidate {
    fn alleles(&self) -> &[Allele] {
        self.genotype.alleles()
    }

    fn value(&self, allele: &Allele) -> EvoResult<f64> {
        self.genotype.value(allele)
    }

    fn set_value(&mut self, allele: &Allele, value: f64) -> EvoResult<()> {
        self.genotype.set_value(allele, value)
    }

    fn origin_generation(&self) -> u64 {
        self.genotype.origin_generation()
    }

    fn fitness(&self) -> Option<f64> {
        self.genotype.fitness()
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.genotype.set_fitness(fitness)
    }

    fn prototype(&self) -> Self {
        Self {
            genotype: self.genotype.prototype(),
            is_outside: false,
        }
    }
}

/// Searches for the largest square inside `polygon`.
///
/// Fitness is the candidate's side length when the square is fully
/// contained, otherwise `0.0` with the candidate's `is_outside` flag
/// set. Allele bounds derive once from the polygon's bounding box.
pub struct SquareProblem {
    polygon: Polygon,
    shape: AlleleSet,
    pitch: f64,
}

impl SquareProblem {
    /// Creates the problem with the default mutation pitch.
    pub fn new(polygon: Polygon) -> Self {
        Self::with_pitch(polygon, MIN_PITCH)
    }

    /// Creates the problem with an explicit mutation pitch in `(0, 1]`.
    ///
    /// Smaller pitches concentrate mutation near current values; the
    /// operator widens anything below the supported minimum.
    pub fn with_pitch(polygon: Polygon, pitch: f64) -> Self {
        let (lo, hi) = polygon.bounding_box();
        let width = hi.x - lo.x;
        let shape = AlleleSet::new(vec![
            Allele::new("center-x", lo.x, hi.x),
            Allele::new("center-y", lo.y, hi.y),
            Allele::new("size", 0.0, width).only_positive(),
            Allele::new("rotation", 0.0, 180.0),
        ]);
        Self {
            polygon,
            shape,
            pitch,
        }
    }

    /// The target polygon.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The genome shape shared by all candidates of this problem.
    pub fn shape(&self) -> &AlleleSet {
        &self.shape
    }
}

impl Problem for SquareProblem {
    type Candidate = SquareCandidate;

    fn fitness(&self, candidate: &mut SquareCandidate) -> f64 {
        if self.polygon.contains_quad(&candidate.corners()) {
            candidate.is_outside = false;
            candidate.size()
        } else {
            candidate.is_outside = true;
            0.0
        }
    }

    /// Tiles the bounding box into a grid of seed squares, one per
    /// cell, with the cell pitch derived from the square root of the
    /// box area.
    fn initial_population(&self) -> Vec<SquareCandidate> {
        let (lo, hi) = self.polygon.bounding_box();
        let width = hi.x - lo.x;
        let height = hi.y - lo.y;
        let step = (width * height).sqrt() / 8.0;
        if step <= 0.0 {
            return Vec::new();
        }

        let mut seeds = Vec::new();
        let mut y = lo.y + step / 2.0;
        while y < hi.y {
            let mut x = lo.x + step / 2.0;
            while x < hi.x {
                let mut seed = self.spawn(0);
                seed.genotype.set_value_at(CENTER_X, x);
                seed.genotype.set_value_at(CENTER_Y, y);
                seed.genotype.set_value_at(SIZE, step / 2.0);
                seed.genotype.set_value_at(ROTATION, 0.0);
                seeds.push(seed);
                x += step;
            }
            y += step;
        }
        seeds
    }

    fn spawn(&self, generation: u64) -> SquareCandidate {
        SquareCandidate::new(self.shape.clone(), generation)
    }

    /// Blends the parents continuously, weighted toward the one with
    /// the higher fitness.
    fn recombine<R: Rng>(
        &self,
        a: &SquareCandidate,
        b: &SquareCandidate,
        generation: u64,
        _rng: &mut R,
    ) -> EvoResult<SquareCandidate> {
        let (dominator, submissive) = rank_parents(a, b);
        recombine_soft(dominator, submissive, self.spawn(generation), DOMINATOR_BIAS)
    }

    /// Redraws one axis inside a pitched window around its current
    /// value, keeping refinement local once the population has settled.
    fn mutate<R: Rng>(
        &self,
        candidate: SquareCandidate,
        rng: &mut R,
    ) -> EvoResult<SquareCandidate> {
        mutate_pitched(&candidate, self.pitch, rng)
    }
}
