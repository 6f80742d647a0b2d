//! Hexagonal layout and user placement
//!
//! Flat-topped hexagons (vertices at 0°, 60°, ...) on a two-ring grid with
//! inter-site spacing √3·R. Each site carries three 120° sectors; sector `s`
//! covers bearings [120°·s, 120°·s + 120°], which inside a flat-topped
//! hexagon is exactly the rhombus spanned by two adjacent 60° triangles.

use crate::{NUM_CELLS, NUM_SECTORS};
use nalgebra::{Point2, Rotation2, Vector2};
use rand::Rng;
use std::f64::consts::{FRAC_PI_3, FRAC_PI_6, TAU};

/// Angular width of one sector (rad)
pub const SECTOR_WIDTH_RAD: f64 = TAU / NUM_SECTORS as f64;

/// Fixed base-station sites, index 0 = victim site
#[derive(Debug, Clone)]
pub struct BaseStationGrid {
    cell_radius: f64,
    centers: [Point2<f64>; NUM_CELLS],
}

impl BaseStationGrid {
    pub fn cell_radius(&self) -> f64 {
        self.cell_radius
    }

    /// Site coordinates. Panics if `cell >= NUM_CELLS`.
    pub fn center(&self, cell: usize) -> Point2<f64> {
        self.centers[cell]
    }

    pub fn centers(&self) -> &[Point2<f64>; NUM_CELLS] {
        &self.centers
    }
}

/// Pointing direction and width of a sector antenna
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorBoresight {
    pub pointing_deg: f64,
    pub width_deg: f64,
}

impl SectorBoresight {
    /// Boresight of sector `sector` (0 → 60°, 1 → 180°, 2 → 300°)
    pub fn of(sector: usize) -> Self {
        Self {
            pointing_deg: 60.0 + 120.0 * sector as f64,
            width_deg: 120.0,
        }
    }

    pub fn pointing_rad(&self) -> f64 {
        self.pointing_deg.to_radians()
    }

    /// Whether `bearing_rad` lies inside the wedge, with `tol_rad` slack
    pub fn contains(&self, bearing_rad: f64, tol_rad: f64) -> bool {
        let offset = (bearing_rad - self.pointing_rad() + std::f64::consts::PI).rem_euclid(TAU)
            - std::f64::consts::PI;
        offset.abs() <= self.width_deg.to_radians() / 2.0 + tol_rad
    }
}

/// One user per (cell, sector) for a single snapshot
#[derive(Debug, Clone)]
pub struct UserSnapshot {
    positions: [[Point2<f64>; NUM_SECTORS]; NUM_CELLS],
}

impl UserSnapshot {
    pub fn from_positions(positions: [[Point2<f64>; NUM_SECTORS]; NUM_CELLS]) -> Self {
        Self { positions }
    }

    /// Panics on out-of-range indices
    pub fn position(&self, cell: usize, sector: usize) -> Point2<f64> {
        self.positions[cell][sector]
    }

    /// (cell, sector, position) in cell-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Point2<f64>)> + '_ {
        self.positions.iter().enumerate().flat_map(|(cell, sectors)| {
            sectors
                .iter()
                .enumerate()
                .map(move |(sector, pos)| (cell, sector, *pos))
        })
    }
}

/// The 19 site centres for cell radius `cell_radius`.
///
/// Ring 1 sits at bearings 30°, 90°, ..., 330°. Ring 2 alternates the
/// mid-edge site between ring-1 directions i and i+1 with the corner site
/// at twice direction i.
pub fn generate_grid(cell_radius: f64) -> BaseStationGrid {
    let spacing = 3f64.sqrt() * cell_radius;
    let directions: [Vector2<f64>; 6] = std::array::from_fn(|i| {
        let angle = FRAC_PI_6 + i as f64 * FRAC_PI_3;
        Vector2::new(angle.cos(), angle.sin())
    });

    let mut centers = [Point2::origin(); NUM_CELLS];
    for (i, dir) in directions.iter().enumerate() {
        centers[1 + i] = Point2::from(dir * spacing);
    }
    for i in 0..6 {
        let next = directions[(i + 1) % 6];
        centers[7 + 2 * i] = Point2::from((directions[i] + next) * spacing);
        centers[8 + 2 * i] = Point2::from(directions[i] * (2.0 * spacing));
    }

    BaseStationGrid {
        cell_radius,
        centers,
    }
}

/// Distance from the centre to the hexagon edge along `bearing_rad`
pub fn hex_boundary_radius(cell_radius: f64, bearing_rad: f64) -> f64 {
    let apothem = cell_radius * 3f64.sqrt() / 2.0;
    let from_normal = bearing_rad.rem_euclid(FRAC_PI_3) - FRAC_PI_6;
    apothem / from_normal.cos()
}

/// Area-uniform position inside sector `sector` of the cell at `center`.
///
/// The base wedge (sector 0) is two 60° triangles. A triangle is picked with
/// probability ½, the bearing is drawn from the inverse of the angular CDF
/// ∝ Rmax(θ)² (linear in tan ψ off the edge normal) and the radius as
/// Rmax(θ)·√U. The point is then rotated by `sector`·120°.
pub fn sample_user<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point2<f64>,
    sector: usize,
    cell_radius: f64,
) -> Point2<f64> {
    let normal = FRAC_PI_6 + if rng.gen_bool(0.5) { FRAC_PI_3 } else { 0.0 };
    let psi = ((2.0 * rng.gen::<f64>() - 1.0) * FRAC_PI_6.tan()).atan();
    let bearing = normal + psi;
    let r = hex_boundary_radius(cell_radius, bearing) * rng.gen::<f64>().sqrt();

    let base = Vector2::new(r * bearing.cos(), r * bearing.sin());
    let rotation = Rotation2::new(sector as f64 * SECTOR_WIDTH_RAD);
    center + rotation * base
}

/// Fresh independent users for every (cell, sector) pair
pub fn sample_all_users<R: Rng + ?Sized>(rng: &mut R, grid: &BaseStationGrid) -> UserSnapshot {
    let mut positions = [[Point2::origin(); NUM_SECTORS]; NUM_CELLS];
    for (cell, sectors) in positions.iter_mut().enumerate() {
        for (sector, pos) in sectors.iter_mut().enumerate() {
            *pos = sample_user(rng, grid.center(cell), sector, grid.cell_radius());
        }
    }
    UserSnapshot { positions }
}
