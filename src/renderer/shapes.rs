//! Shape generation for 2D primitives
//!
//! Pure geometry for the canvas renderer: everything here is plain math on
//! `glam` vectors so it can be checked without a browser.

use glam::Vec2;

/// Width of one ground stripe
pub const STRIPE_WIDTH: f32 = 10.0;

/// Fake progress wraps every this many pixels of "distance"
pub const PROGRESS_WRAP: f32 = 10_000.0;

/// Format 0xRRGGBB as a CSS color
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xff_ffff)
}

/// Filled width of the progress bar for a given fake distance
pub fn progress_fill(fake_progress: f32, inner_width: f32) -> f32 {
    let wrapped = fake_progress.rem_euclid(PROGRESS_WRAP);
    (wrapped / PROGRESS_WRAP * inner_width).min(inner_width)
}

/// Ground stripes as (x, dark) pairs, scrolled by `offset`
pub fn stripe_positions(offset: f32, view_width: f32) -> Vec<(f32, bool)> {
    let count = (view_width / STRIPE_WIDTH).ceil() as usize + 1;
    let shift = offset.rem_euclid(STRIPE_WIDTH * 2.0);
    (0..count)
        .map(|i| (i as f32 * STRIPE_WIDTH - shift, i % 2 == 0))
        .collect()
}

/// A stick figure inside a bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Stickman {
    pub head_center: Vec2,
    pub head_radius: f32,
    /// Torso, arms and legs as line segments
    pub segments: Vec<(Vec2, Vec2)>,
}

/// Lay out the stick figure for a player box at `top_left`
pub fn stickman(top_left: Vec2, width: f32, height: f32, ducking: bool) -> Stickman {
    let head_radius = height * 0.14;
    let leg_len = height * 0.35;
    let cx = top_left.x + width / 2.0;
    let feet_y = top_left.y + height;

    let neck = Vec2::new(cx, top_left.y + head_radius * 2.0);
    let hip_y = feet_y - leg_len;
    // Crouched torso leans forward so the figure reads as ducking
    let hip = Vec2::new(if ducking { cx - width * 0.25 } else { cx }, hip_y);
    let shoulder = neck.lerp(hip, 0.3);
    let reach = width * 0.4;

    Stickman {
        head_center: Vec2::new(cx, top_left.y + head_radius),
        head_radius,
        segments: vec![
            (neck, hip),
            (shoulder, shoulder + Vec2::new(-reach, reach)),
            (shoulder, shoulder + Vec2::new(reach, reach)),
            (hip, Vec2::new(hip.x - reach, feet_y)),
            (hip, Vec2::new(hip.x + reach, feet_y)),
        ],
    }
}

/// Jagged rock silhouette (closed polygon)
pub fn rock_outline(top_left: Vec2, size: Vec2) -> Vec<Vec2> {
    const SEGMENTS: usize = 5;
    let seg_w = size.x / SEGMENTS as f32;
    let shoulder = top_left.y + size.y * 0.6;

    let mut points = Vec::with_capacity(SEGMENTS + 4);
    points.push(Vec2::new(top_left.x, shoulder));
    for i in 0..=SEGMENTS {
        let t = i as f32 / SEGMENTS as f32;
        let bump = (t * std::f32::consts::PI).sin() * size.y * 0.3;
        points.push(Vec2::new(top_left.x + i as f32 * seg_w, shoulder - bump));
    }
    points.push(top_left + size);
    points.push(Vec2::new(top_left.x, top_left.y + size.y));
    points
}

/// Missile body pieces relative to its box: (body rect, nose triangle, two fins)
pub struct MissileParts {
    pub body: (Vec2, Vec2),
    pub nose: [Vec2; 3],
    pub fins: [[Vec2; 3]; 2],
    /// Exhaust flame center and half extents
    pub flame_center: Vec2,
    pub flame_radii: Vec2,
}

/// Lay out a left-pointing missile; `flicker` in [-1, 1] animates the flame
pub fn missile(top_left: Vec2, size: Vec2, flicker: f32) -> MissileParts {
    let p = |fx: f32, fy: f32| top_left + Vec2::new(size.x * fx, size.y * fy);
    let flame_h = size.y * 0.6 + flicker * size.y * 0.1;
    MissileParts {
        body: (p(0.0, 0.25), Vec2::new(size.x * 0.7, size.y * 0.5)),
        nose: [p(0.0, 0.5), p(0.3, 0.25), p(0.3, 0.75)],
        fins: [
            [p(0.5, 0.25), p(0.8, 0.1), p(0.7, 0.4)],
            [p(0.5, 0.75), p(0.8, 0.9), p(0.7, 0.6)],
        ],
        flame_center: p(0.7, 0.5),
        flame_radii: Vec2::new(size.x * 0.3, flame_h / 2.0),
    }
}
