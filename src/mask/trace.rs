//! Outline extraction from a frame's alpha channel.

use glam::Vec2;

use crate::pixels::ImageBuffer;

/// Pixels with alpha above this are solid.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Maximum deviation, in source pixels, allowed when simplifying.
pub const SIMPLIFY_TOLERANCE: f32 = 1.0;

/// Moore neighbourhood in clockwise order (y grows downward), starting west.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

type Pixel = (i64, i64);

/// Trace the boundary of the first solid region in raster order.
///
/// Returns pixel coordinates of boundary pixels in clockwise order, or an
/// empty vector when the frame has no solid pixel.
pub fn trace(buffer: &ImageBuffer, frame: usize) -> Vec<Pixel> {
    let solid = |(x, y): Pixel| buffer.alpha(frame, x, y) > ALPHA_THRESHOLD;

    let width = i64::from(buffer.width());
    let height = i64::from(buffer.height());
    let Some(start) = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .find(|&p| solid(p))
    else {
        return Vec::new();
    };

    let mut points = vec![start];
    let mut current = start;
    // The west neighbour of the first solid pixel is known to be empty.
    let mut backtrack = 0usize;
    let mut second: Option<Pixel> = None;
    let limit = 4 * (width * height) as usize + 8;

    for _ in 0..limit {
        let Some((dir, next)) = (1..=8)
            .map(|k| (backtrack + k) % 8)
            .map(|d| (d, offset(current, d)))
            .find(|&(_, p)| solid(p))
        else {
            // Isolated pixel.
            break;
        };

        if current == start {
            match second {
                Some(s) if s == next => break,
                Some(_) => {}
                None => second = Some(next),
            }
        }

        let last_empty = offset(current, (dir + 7) % 8);
        backtrack = direction(next, last_empty).unwrap_or(0);
        current = next;
        points.push(current);
    }

    if points.len() > 1 && points.last() == Some(&start) {
        points.pop();
    }
    points
}

/// Simplify a closed polygon with Ramer-Douglas-Peucker.
pub fn simplify(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    if points.len() < 4 {
        return points.to_vec();
    }

    // Split the ring at the vertex farthest from the first one.
    let first = points[0];
    let split = points
        .iter()
        .enumerate()
        .max_by(|a, b| {
            a.1.distance_squared(first)
                .total_cmp(&b.1.distance_squared(first))
        })
        .map_or(0, |(i, _)| i);
    if split == 0 {
        return vec![first];
    }

    let mut out = Vec::new();
    douglas_peucker(&points[..=split], tolerance, &mut out);
    out.pop();
    let mut back_half: Vec<Vec2> = points[split..].to_vec();
    back_half.push(first);
    douglas_peucker(&back_half, tolerance, &mut out);
    out.pop();
    out
}

/// Append the simplified polyline, including both endpoints, to `out`.
fn douglas_peucker(points: &[Vec2], tolerance: f32, out: &mut Vec<Vec2>) {
    let (first, last) = match points {
        [] => return,
        [only] => {
            out.push(*only);
            return;
        }
        [first, .., last] => (*first, *last),
    };

    let (index, dist) = points[1..points.len() - 1]
        .iter()
        .enumerate()
        .map(|(i, &p)| (i + 1, segment_distance(p, first, last)))
        .fold((0, 0.0f32), |best, cur| if cur.1 > best.1 { cur } else { best });

    if index != 0 && dist > tolerance {
        douglas_peucker(&points[..=index], tolerance, out);
        out.pop();
        douglas_peucker(&points[index..], tolerance, out);
    } else {
        out.push(first);
        out.push(last);
    }
}

fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let segment = b - a;
    let length_squared = segment.length_squared();
    if length_squared == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(segment) / length_squared).clamp(0.0, 1.0);
    p.distance(a + t * segment)
}

fn offset((x, y): Pixel, dir: usize) -> Pixel {
    let (dx, dy) = NEIGHBOURS[dir];
    (x + dx, y + dy)
}

fn direction(from: Pixel, to: Pixel) -> Option<usize> {
    let delta = (to.0 - from.0, to.1 - from.1);
    NEIGHBOURS.iter().position(|&n| n == delta)
}
