/// Demo worlds composed from plain chart data
use std::f64::consts::TAU;

use chart3d_core::{Color, Object3D, Point3D, Result, Solid, World};

/// Series colours, reused in order
pub const PALETTE: &[Color] = &[
    Color::rgb(66, 135, 245),
    Color::rgb(245, 93, 66),
    Color::rgb(96, 200, 110),
    Color::rgb(240, 200, 60),
    Color::rgb(170, 100, 220),
    Color::rgb(60, 200, 200),
];

const BAR_WIDTH: f64 = 1.0;
const BAR_SPACING: f64 = 1.6;

const PIE_RADIUS: f64 = 6.0;
const PIE_HEIGHT: f64 = 1.5;
const PIE_EXPLODE: f64 = 0.3;
const PIE_STEP: f64 = 0.1;

fn color_at(colors: &[Color], i: usize) -> Color {
    let colors = if colors.is_empty() { PALETTE } else { colors };
    colors[i % colors.len()]
}

/// One bar per value, in a row along X and centred on the origin
pub fn bar_chart(values: &[f64], colors: &[Color]) -> Result<World> {
    let mut world = World::new();
    let start = -(values.len() as f64 - 1.0) * BAR_SPACING / 2.0;
    for (i, &value) in values.iter().enumerate() {
        world.add(Object3D::bar(
            start + i as f64 * BAR_SPACING,
            0.0,
            BAR_WIDTH,
            BAR_WIDTH,
            0.0,
            value,
            color_at(colors, i),
        )?);
    }
    Ok(world)
}

/// One exploded segment per value, each followed by its label markers.
///
/// Zero values take no angle and get no segment; colours still follow the
/// value's position in `values`.
pub fn pie_chart(values: &[f64], colors: &[Color]) -> Result<World> {
    let total: f64 = values.iter().sum();
    let mut world = World::new();
    let mut start = 0.0;
    for (i, &value) in values.iter().enumerate() {
        if value == 0.0 {
            continue;
        }
        let end = start + value / total * TAU;
        let base = -PIE_HEIGHT / 2.0;
        world.add(Object3D::pie_segment(
            PIE_RADIUS,
            PIE_EXPLODE,
            base,
            PIE_HEIGHT,
            start..end,
            PIE_STEP,
            color_at(colors, i),
        )?);
        world.add(Object3D::pie_label_markers(
            PIE_RADIUS,
            PIE_EXPLODE,
            base,
            PIE_HEIGHT,
            start..end,
        )?);
        start = end;
    }
    Ok(world)
}

/// A few of each kind of solid, side by side
pub fn solids() -> Result<World> {
    let solids = [
        Solid::Cube {
            size: 3.0,
            center: Point3D::new(-6.0, 0.0, 0.0),
            color: PALETTE[0],
        },
        Solid::Sphere {
            radius: 2.0,
            segments: 8,
            center: Point3D::new(0.0, 0.0, 0.0),
            primary: PALETTE[1],
            secondary: Color::WHITE,
        },
        Solid::Tetrahedron {
            size: 1.2,
            center: Point3D::new(6.0, 0.0, 0.0),
            color: PALETTE[2],
        },
        Solid::Octahedron {
            size: 1.8,
            center: Point3D::new(0.0, 6.0, 0.0),
            color: PALETTE[3],
        },
        Solid::Bar {
            x: 0.0,
            y: -6.0,
            x_width: 1.0,
            y_width: 1.0,
            zero: -1.5,
            value: 2.5,
            color: PALETTE[4],
            base_color: None,
            top_color: Some(Color::WHITE),
        },
    ];

    let mut world = World::new();
    for solid in &solids {
        world.add_solid(solid)?;
    }
    world.add(Object3D::z_sheet(2.5, Point3D::new(6.0, 6.0, -1.0), PALETTE[5])?);
    world.add(Object3D::y_sheet(2.5, Point3D::new(-6.0, 6.0, 0.0), PALETTE[5], false)?);
    Ok(world)
}
