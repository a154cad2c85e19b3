/// Separable box blur of a row-major `width × height` field.
///
/// Each output cell is the average of the `(2r+1)²` window around it,
/// rounded half up. Samples that fall outside the field are clamped to the
/// nearest edge cell on both axes, so border cells average over replicated
/// edge values rather than a shrunken window.
///
/// Runs in O(width · height) regardless of `radius`: a horizontal pass of
/// sliding-window sums, then a vertical pass over those sums, then a single
/// division.
pub fn box_blur(raw: &[i32], width: usize, height: usize, radius: usize) -> Vec<i32> {
    assert_eq!(raw.len(), width * height, "field is not {width}x{height}");
    if radius == 0 || raw.is_empty() {
        return raw.to_vec();
    }
    let r = radius as isize;
    let clamp = |i: isize, n: usize| i.clamp(0, n as isize - 1) as usize;

    let mut horizontal = vec![0i64; raw.len()];
    for y in 0..height {
        let row = &raw[y * width..(y + 1) * width];
        let mut sum: i64 = (-r..=r).map(|dx| row[clamp(dx, width)] as i64).sum();
        horizontal[y * width] = sum;
        for x in 1..width {
            let xi = x as isize;
            sum += row[clamp(xi + r, width)] as i64 - row[clamp(xi - r - 1, width)] as i64;
            horizontal[y * width + x] = sum;
        }
    }

    let kernel = (2 * radius as i64 + 1).pow(2);
    let mut out = vec![0i32; raw.len()];
    for x in 0..width {
        let at = |y: usize| horizontal[y * width + x];
        let mut sum: i64 = (-r..=r).map(|dy| at(clamp(dy, height))).sum();
        out[x] = round_div(sum, kernel);
        for y in 1..height {
            let yi = y as isize;
            sum += at(clamp(yi + r, height)) - at(clamp(yi - r - 1, height));
            out[y * width + x] = round_div(sum, kernel);
        }
    }
    out
}

/// `n / d` rounded half up, for non-negative `n` and positive `d`.
#[inline]
fn round_div(n: i64, d: i64) -> i32 {
    ((2 * n + d) / (2 * d)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn brute_force(raw: &[i32], w: usize, h: usize, r: usize) -> Vec<i32> {
        let r = r as isize;
        let mut out = vec![0; raw.len()];
        for y in 0..h as isize {
            for x in 0..w as isize {
                let mut sum = 0i64;
                for dy in -r..=r {
                    for dx in -r..=r {
                        let sx = (x + dx).clamp(0, w as isize - 1) as usize;
                        let sy = (y + dy).clamp(0, h as isize - 1) as usize;
                        sum += raw[sy * w + sx] as i64;
                    }
                }
                let k = (2 * r as i64 + 1).pow(2);
                out[y as usize * w + x as usize] = round_div(sum, k);
            }
        }
        out
    }

    #[test]
    fn zero_radius_is_identity() {
        let raw = vec![1, 2, 3, 4];
        assert_eq!(box_blur(&raw, 2, 2, 0), raw);
    }

    #[test]
    fn uniform_field_is_unchanged() {
        let raw = vec![7; 6 * 4];
        assert_eq!(box_blur(&raw, 6, 4, 3), raw);
    }

    #[test]
    fn interior_is_exact_window_average() {
        // Single spike in the middle of a 5x5 field, radius 1: the 3x3 around
        // it gets 9/9 = 1, everything else 0.
        let mut raw = vec![0; 25];
        raw[12] = 9;
        let out = box_blur(&raw, 5, 5, 1);
        for y in 0..5 {
            for x in 0..5 {
                let near = (1..=3).contains(&x) && (1..=3).contains(&y);
                assert_eq!(out[y * 5 + x], i32::from(near), "cell ({x}, {y})");
            }
        }
    }

    #[test]
    fn corner_replicates_edges() {
        // Radius 1 at the corner of a 2x2 field: the window samples the corner
        // four times, each neighbour twice and the far cell once.
        let raw = vec![9, 0, 0, 0];
        let out = box_blur(&raw, 2, 2, 1);
        assert_eq!(out[0], 4); // 36 / 9
        assert_eq!(out[3], 1); // 9 / 9
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_div(4, 9), 0);
        assert_eq!(round_div(5, 10), 1);
        assert_eq!(round_div(14, 9), 2);
    }

    proptest! {
        #[test]
        fn matches_brute_force_everywhere(
            w in 1usize..10,
            h in 1usize..10,
            r in 0usize..4,
            seed in prop::collection::vec(0i32..100, 100),
        ) {
            let raw: Vec<i32> = seed.into_iter().take(w * h).collect();
            prop_assert_eq!(box_blur(&raw, w, h, r), brute_force(&raw, w, h, r));
        }
    }
}
