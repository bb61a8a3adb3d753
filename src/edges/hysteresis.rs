//! Hysteresis linking: weak candidates survive only when 8-connected (through
//! other candidates) to a strong edge.
use super::nms::EdgeClass;
use crate::image::GrayImageU8;

/// Value written for edge pixels in the output map.
pub const EDGE: u8 = 255;

pub fn link_edges(classes: &[EdgeClass], w: usize, h: usize) -> GrayImageU8 {
    let mut out = GrayImageU8::zeros(w, h);
    let mut stack: Vec<usize> = Vec::new();

    for (idx, class) in classes.iter().enumerate() {
        if *class != EdgeClass::Strong || out.data()[idx] != 0 {
            continue;
        }
        out.set(idx % w, idx / w, EDGE);
        stack.push(idx);

        while let Some(cur) = stack.pop() {
            let cx = (cur % w) as isize;
            let cy = (cur / w) as isize;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let (nx, ny) = (nx as usize, ny as usize);
                    let nidx = ny * w + nx;
                    if classes[nidx] != EdgeClass::Suppressed && out.get(nx, ny) == 0 {
                        out.set(nx, ny, EDGE);
                        stack.push(nidx);
                    }
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_chain_attached_to_strong_survives() {
        use EdgeClass::*;
        let (w, h) = (5, 3);
        #[rustfmt::skip]
        let classes = vec![
            Strong, Weak, Suppressed, Suppressed, Suppressed,
            Suppressed, Suppressed, Weak, Suppressed, Weak,
            Suppressed, Suppressed, Suppressed, Suppressed, Suppressed,
        ];
        let out = link_edges(&classes, w, h);
        assert_eq!(out.get(0, 0), EDGE);
        assert_eq!(out.get(1, 0), EDGE);
        assert_eq!(out.get(2, 1), EDGE);
        // Isolated weak pixel at (4, 1) is dropped.
        assert_eq!(out.get(4, 1), 0);
        assert_eq!(out.count_nonzero(), 3);
    }
}
