//! Collision checks
//!
//! Everything is axis-aligned. Walls and floor look one step ahead
//! (`pos + vel`); bricks only test the ball's center point, not its radius.

use glam::Vec2;

use super::state::{Ball, BrickGrid};

/// Next x would leave `[radius, width - radius]`
pub fn hits_side_wall(ball: &Ball, width: f32) -> bool {
    let next_x = ball.pos.x + ball.vel.x;
    next_x > width - ball.radius || next_x < ball.radius
}

/// Next y would go above the top edge
pub fn hits_ceiling(ball: &Ball) -> bool {
    ball.pos.y + ball.vel.y < ball.radius
}

/// Next y would go below the bottom edge
pub fn reaches_floor(ball: &Ball, height: f32) -> bool {
    ball.pos.y + ball.vel.y > height - ball.radius
}

/// Index of the first alive brick containing `point`, in grid order
/// (column-major, then row)
pub fn first_brick_hit(grid: &BrickGrid, point: Vec2) -> Option<usize> {
    grid.bricks
        .iter()
        .position(|brick| brick.is_alive() && brick.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Brick, BrickStatus};

    fn ball(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: 10.0,
            speed: vel.x.abs(),
        }
    }

    fn brick(x: f32, y: f32) -> Brick {
        Brick {
            pos: Vec2::new(x, y),
            width: 80.0,
            height: 20.0,
            status: BrickStatus::Alive,
            color: [1.0; 4],
            points: 10,
        }
    }

    #[test]
    fn test_side_walls() {
        assert!(hits_side_wall(&ball(Vec2::new(795.0, 300.0), Vec2::new(6.0, 6.0)), 800.0));
        assert!(hits_side_wall(&ball(Vec2::new(12.0, 300.0), Vec2::new(-6.0, 6.0)), 800.0));
        assert!(!hits_side_wall(&ball(Vec2::new(400.0, 300.0), Vec2::new(6.0, 6.0)), 800.0));
        // Exactly at the limit is not a hit
        assert!(!hits_side_wall(&ball(Vec2::new(784.0, 300.0), Vec2::new(6.0, 6.0)), 800.0));
    }

    #[test]
    fn test_ceiling_and_floor() {
        assert!(hits_ceiling(&ball(Vec2::new(100.0, 12.0), Vec2::new(6.0, -6.0))));
        assert!(!hits_ceiling(&ball(Vec2::new(100.0, 12.0), Vec2::new(6.0, 6.0))));
        assert!(reaches_floor(&ball(Vec2::new(100.0, 588.0), Vec2::new(6.0, 6.0)), 600.0));
        assert!(!reaches_floor(&ball(Vec2::new(100.0, 500.0), Vec2::new(6.0, 6.0)), 600.0));
    }

    #[test]
    fn test_first_brick_hit_skips_broken_and_uses_grid_order() {
        let mut grid = BrickGrid {
            cols: 2,
            rows: 1,
            // Two overlapping bricks: the earlier index wins
            bricks: vec![brick(0.0, 0.0), brick(40.0, 0.0)],
        };
        assert_eq!(first_brick_hit(&grid, Vec2::new(50.0, 10.0)), Some(0));

        grid.bricks[0].status = BrickStatus::Broken;
        assert_eq!(first_brick_hit(&grid, Vec2::new(50.0, 10.0)), Some(1));
        assert_eq!(first_brick_hit(&grid, Vec2::new(500.0, 10.0)), None);
    }
}
