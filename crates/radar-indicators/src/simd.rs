//! SIMD-optimized correlation kernel.
//!
//! These implementations use the `wide` crate for portable SIMD operations,
//! providing significant performance improvements for long windows.

use wide::f64x4;

/// Centered sums of one window: Σdx·dy, Σdx², Σdy².
#[derive(Debug, Clone, Copy, Default)]
struct CenteredSums {
    xy: f64,
    xx: f64,
    yy: f64,
}

impl CenteredSums {
    /// Pearson coefficient, `None` when either side has zero variance.
    fn coefficient(self) -> Option<f64> {
        if self.xx <= 0.0 || self.yy <= 0.0 {
            return None;
        }
        let r = self.xy / (self.xx * self.yy).sqrt();
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    }
}

/// Every value equal to the first. The mean of such a window may be off by an
/// ulp, so centered sums alone cannot detect it.
fn is_constant(data: &[f64]) -> bool {
    data.iter().all(|v| *v == data[0])
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Scalar Pearson correlation of two equally long windows.
///
/// Returns `None` for windows shorter than 2 or with zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let (x, y) = (&x[..n], &y[..n]);
    if is_constant(x) || is_constant(y) {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));

    let mut sums = CenteredSums::default();
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sums.xy += dx * dy;
        sums.xx += dx * dx;
        sums.yy += dy * dy;
    }

    sums.coefficient()
}

/// SIMD-optimized Pearson correlation of two equally long windows.
///
/// Same contract as [`pearson`].
pub fn pearson_simd(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let (x, y) = (&x[..n], &y[..n]);
    if is_constant(x) || is_constant(y) {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let mean_x = f64x4::splat(mx);
    let mean_y = f64x4::splat(my);

    let mut acc_xy = f64x4::splat(0.0);
    let mut acc_xx = f64x4::splat(0.0);
    let mut acc_yy = f64x4::splat(0.0);

    let chunks = n / 4;
    for i in 0..chunks {
        let idx = i * 4;
        let xs = f64x4::new([x[idx], x[idx + 1], x[idx + 2], x[idx + 3]]);
        let ys = f64x4::new([y[idx], y[idx + 1], y[idx + 2], y[idx + 3]]);
        let dx = xs - mean_x;
        let dy = ys - mean_y;
        acc_xy = acc_xy + dx * dy;
        acc_xx = acc_xx + dx * dx;
        acc_yy = acc_yy + dy * dy;
    }

    let mut sums = CenteredSums {
        xy: acc_xy.reduce_add(),
        xx: acc_xx.reduce_add(),
        yy: acc_yy.reduce_add(),
    };

    // Handle remaining elements
    for j in (chunks * 4)..n {
        let dx = x[j] - mx;
        let dy = y[j] - my;
        sums.xy += dx * dy;
        sums.xx += dx * dx;
        sums.yy += dy * dy;
    }

    sums.coefficient()
}
