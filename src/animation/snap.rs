/// Fraction of the remaining distance covered per frame.
pub const SNAP_EASE: f32 = 0.15;
pub const SNAP_EPSILON: f32 = 0.5;

/// Loop-relative offsets where each canonical child starts.
pub fn snap_points(widths: &[f32], gap: f32) -> Vec<f32> {
    let mut points = Vec::with_capacity(widths.len());
    let mut offset = 0.0;
    for w in widths {
        points.push(offset);
        offset += w + gap;
    }
    points
}

/// Nearest translation to `position` that puts a child boundary at the container edge.
pub fn nearest_snap(position: f32, points: &[f32], period: f32) -> f32 {
    if period <= 0.0 || points.is_empty() {
        return position;
    }
    let phase = (-position).rem_euclid(period);
    let best = points
        .iter()
        .copied()
        .chain(std::iter::once(period))
        .min_by(|a, b| (a - phase).abs().total_cmp(&(b - phase).abs()))
        .unwrap_or(phase);
    position + (phase - best)
}

/// Exponential ease toward a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    target: f32,
}

impl Snap {
    pub fn new(target: f32) -> Self {
        Self { target }
    }

    /// Returns the next position and whether it has arrived.
    pub fn step(&self, position: f32) -> (f32, bool) {
        let next = position + (self.target - position) * SNAP_EASE;
        if (self.target - next).abs() < SNAP_EPSILON {
            (self.target, true)
        } else {
            (next, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_accumulate_widths_and_gaps() {
        assert_eq!(snap_points(&[100.0, 50.0, 30.0], 10.0), vec![0.0, 110.0, 170.0]);
    }

    #[test]
    fn snaps_to_closest_boundary() {
        let points = snap_points(&[100.0, 100.0], 0.0);
        assert_eq!(nearest_snap(-40.0, &points, 200.0), 0.0);
        assert_eq!(nearest_snap(-60.0, &points, 200.0), -100.0);
        // wraps across the loop seam
        assert_eq!(nearest_snap(-190.0, &points, 200.0), -200.0);
        // further loops keep their offset
        assert_eq!(nearest_snap(-460.0, &points, 200.0), -500.0);
    }

    #[test]
    fn ease_converges_within_half_pixel() {
        let snap = Snap::new(-100.0);
        let mut pos = -60.0;
        let mut steps = 0;
        loop {
            let (next, done) = snap.step(pos);
            pos = next;
            steps += 1;
            if done {
                break;
            }
            assert!(steps < 200);
        }
        assert_eq!(pos, -100.0);
    }
}
