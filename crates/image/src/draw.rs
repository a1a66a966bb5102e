//! Raster drawing with clipping. Colors are always given in RGB order and stored in the
//! image's own channel order. Compressed images are left untouched.

use {crate::*, base::Vec2};

/// Draw a line using Bresenham's algorithm with clipping.
///
/// Thicknesses above 1 stamp a disc of radius `thickness / 2` along the line.
pub fn draw_line(image: &mut Image, p0: Vec2<i32>, p1: Vec2<i32>, rgb: [u8; 3], thickness: i32) {
    if !image.format.is_raster() {
        return;
    }
    let color = image.format.store_rgb(rgb);
    let stamp = (thickness / 2).max(0);
    let width = image.size.x as i32;
    let height = image.size.y as i32;

    // a thick line may still touch the image when its centerline is just outside
    let bounds = (-stamp, -stamp, width + stamp, height + stamp);
    let Some((mut x0, mut y0, x1, y1)) = clip_line(p0.x, p0.y, p1.x, p1.y, bounds) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        if stamp == 0 {
            put_pixel(image, x0, y0, color);
        } else {
            fill_disc(image, x0, y0, stamp, color);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a circle outline of the given thickness with clipping.
///
/// The outline covers every pixel whose distance from `center` lies within
/// `thickness / 2` of `radius`.
pub fn draw_circle(image: &mut Image, center: Vec2<i32>, radius: i32, rgb: [u8; 3], thickness: i32) {
    if !image.format.is_raster() {
        return;
    }
    let color = image.format.store_rgb(rgb);
    let half = (thickness / 2).max(0);
    let inner = (radius - half).max(0);
    let outer = radius + half;
    let (inner2, outer2) = (inner * inner, outer * outer);

    for dy in -outer..=outer {
        for dx in -outer..=outer {
            let d2 = dx * dx + dy * dy;
            if d2 >= inner2 && d2 <= outer2 {
                put_pixel(image, center.x + dx, center.y + dy, color);
            }
        }
    }
}

// Helper functions

fn fill_disc(image: &mut Image, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put_pixel(image, cx + dx, cy + dy, color);
            }
        }
    }
}

fn put_pixel(image: &mut Image, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= image.size.x as i32 || y >= image.size.y as i32 {
        return;
    }
    let idx = (y as usize * image.size.x + x as usize) * 3;
    if let Some(px) = image.data.get_mut(idx..idx + 3) {
        px.copy_from_slice(&color);
    }
}

// Cohen-Sutherland clipping helpers
const INSIDE: u8 = 0; // 0000
const LEFT: u8 = 1; // 0001
const RIGHT: u8 = 2; // 0010
const BOTTOM: u8 = 4; // 0100
const TOP: u8 = 8; // 1000

type Bounds = (i32, i32, i32, i32);

fn clip_line(
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    bounds: Bounds,
) -> Option<(i32, i32, i32, i32)> {
    loop {
        let outcode0 = compute_outcode(x0, y0, bounds);
        let outcode1 = compute_outcode(x1, y1, bounds);

        if (outcode0 | outcode1) == 0 {
            return Some((x0, y0, x1, y1));
        } else if (outcode0 & outcode1) != 0 {
            return None;
        }

        let outcode = if outcode0 != 0 { outcode0 } else { outcode1 };
        let (x, y) = clip_point(x0, y0, x1, y1, outcode, bounds);
        if outcode == outcode0 {
            x0 = x;
            y0 = y;
        } else {
            x1 = x;
            y1 = y;
        }
    }
}

fn compute_outcode(x: i32, y: i32, (min_x, min_y, max_x, max_y): Bounds) -> u8 {
    let mut code = INSIDE;
    if x < min_x {
        code |= LEFT;
    } else if x >= max_x {
        code |= RIGHT;
    }
    if y < min_y {
        code |= TOP;
    } else if y >= max_y {
        code |= BOTTOM;
    }
    code
}

fn clip_point(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    outcode: u8,
    (min_x, min_y, max_x, max_y): Bounds,
) -> (i32, i32) {
    // i64 keeps the products from overflowing for far-away endpoints
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = x1 - x0;
    let dy = y1 - y0;

    let (x, y) = if outcode & TOP != 0 {
        let y = min_y as i64;
        (x0 + dx * (y - y0) / dy, y)
    } else if outcode & BOTTOM != 0 {
        let y = max_y as i64 - 1;
        (x0 + dx * (y - y0) / dy, y)
    } else if outcode & LEFT != 0 {
        let x = min_x as i64;
        (x, y0 + dy * (x - x0) / dx)
    } else {
        let x = max_x as i64 - 1;
        (x, y0 + dy * (x - x0) / dx)
    };
    (x as i32, y as i32)
}
