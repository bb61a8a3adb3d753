//! Border following (Suzuki & Abe, 1985) restricted to external borders.
//!
//! The binary image is copied into a label grid with a one-pixel zero frame.
//! A raster scan starts a new border at every unlabeled 0→1 transition (outer
//! border) and every 1→0 transition (hole border). Each border gets a
//! sequential number, and its parent is derived from the last border crossed
//! on the current row. Only outer borders whose parent is the frame are
//! returned; hole borders and anything nested inside them are traced (to keep
//! the labels consistent) but discarded.
//!
//! Neighbourhood is 8-connected. Direction indices run counter-clockwise on
//! screen starting east (y grows downwards).
use super::geometry::Point;

const DIRS: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const FRAME: i32 = 1;

#[derive(Clone, Copy, Debug)]
struct BorderInfo {
    is_hole: bool,
    parent: i32,
}

struct LabelGrid {
    w: usize,
    labels: Vec<i32>,
}

impl LabelGrid {
    fn from_binary(data: &[u8], width: usize, height: usize) -> Self {
        let w = width + 2;
        let h = height + 2;
        let mut labels = vec![0i32; w * h];
        for y in 0..height {
            for x in 0..width {
                if data[y * width + x] != 0 {
                    labels[(y + 1) * w + (x + 1)] = 1;
                }
            }
        }
        Self { w, labels }
    }

    #[inline]
    fn step(&self, idx: usize, dir: usize) -> usize {
        let (dx, dy) = DIRS[dir];
        (idx as isize + dy * self.w as isize + dx) as usize
    }

    #[inline]
    fn to_point(&self, idx: usize) -> Point {
        Point::new((idx % self.w) as i32 - 1, (idx / self.w) as i32 - 1)
    }
}

fn direction_between(grid: &LabelGrid, from: usize, to: usize) -> usize {
    let fx = (from % grid.w) as isize;
    let fy = (from / grid.w) as isize;
    let tx = (to % grid.w) as isize;
    let ty = (to / grid.w) as isize;
    let delta = (tx - fx, ty - fy);
    DIRS.iter().position(|d| *d == delta).unwrap_or(0)
}

/// Follow one border starting at `start`, entered from the zero pixel `from`.
/// Labels visited pixels with `nbd` (or `-nbd` where the border touches the
/// zero pixel to its east) and returns the chain of border pixels.
fn follow_border(grid: &mut LabelGrid, start: usize, from: usize, nbd: i32) -> Vec<usize> {
    let from_dir = direction_between(grid, start, from);

    // Clockwise search for the first non-zero neighbour.
    let first = (0..8)
        .map(|k| (from_dir + 8 - k) % 8)
        .map(|d| grid.step(start, d))
        .find(|&n| grid.labels[n] != 0);
    let Some(last) = first else {
        grid.labels[start] = -nbd;
        return vec![start];
    };

    let mut chain = vec![start];
    let mut prev = last;
    let mut cur = start;
    loop {
        // Counter-clockwise search starting just after `prev`.
        let back = direction_between(grid, cur, prev);
        let mut east_zero_examined = false;
        let mut next = prev;
        for k in 1..=8 {
            let d = (back + k) % 8;
            let n = grid.step(cur, d);
            if grid.labels[n] != 0 {
                next = n;
                break;
            }
            if d == 0 {
                east_zero_examined = true;
            }
        }

        if east_zero_examined {
            grid.labels[cur] = -nbd;
        } else if grid.labels[cur] == 1 {
            grid.labels[cur] = nbd;
        }

        if next == start && cur == last {
            break;
        }
        prev = cur;
        cur = next;
        chain.push(cur);
    }
    chain
}

/// Trace the outermost outer borders of the non-zero pixels of a packed
/// `width × height` binary buffer, in raster-scan order of their start pixel.
pub fn external_borders(data: &[u8], width: usize, height: usize) -> Vec<Vec<Point>> {
    let mut borders = Vec::new();
    if width == 0 || height == 0 {
        return borders;
    }
    let mut grid = LabelGrid::from_binary(data, width, height);
    let w = grid.w;

    // Index 0 unused, index 1 is the frame (treated as a hole border).
    let mut table = vec![
        BorderInfo {
            is_hole: true,
            parent: 0,
        },
        BorderInfo {
            is_hole: true,
            parent: 0,
        },
    ];
    let mut nbd = FRAME;

    for y in 1..=height {
        let mut lnbd = FRAME;
        for x in 1..=width {
            let idx = y * w + x;
            let v = grid.labels[idx];
            if v == 0 {
                continue;
            }

            let start = if v == 1 && grid.labels[idx - 1] == 0 {
                Some((false, idx - 1))
            } else if v >= 1 && grid.labels[idx + 1] == 0 {
                if v > 1 {
                    lnbd = v;
                }
                Some((true, idx + 1))
            } else {
                None
            };

            if let Some((is_hole, from)) = start {
                nbd += 1;
                let prior = table[lnbd as usize];
                let parent = if prior.is_hole == is_hole {
                    prior.parent
                } else {
                    lnbd
                };
                table.push(BorderInfo { is_hole, parent });

                let chain = follow_border(&mut grid, idx, from, nbd);
                if !is_hole && parent == FRAME {
                    borders.push(chain.into_iter().map(|i| grid.to_point(i)).collect());
                }
            }

            let v = grid.labels[idx];
            if v != 1 {
                lnbd = v.abs();
            }
        }
    }

    borders
}
