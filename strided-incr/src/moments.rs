//! Running bivariate moments shared by the covariance and correlation
//! accumulators.

/// Means, second moments and co-moment of a stream of `(x, y)` pairs.
///
/// In sample mode the means evolve with each observation (Welford); in
/// known-means mode they are fixed and the sums are plain squared
/// deviations from them.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Moments {
    pub n: usize,
    pub mx: f64,
    pub my: f64,
    pub m2x: f64,
    pub m2y: f64,
    pub c: f64,
    known: Option<(f64, f64)>,
}

impl Moments {
    pub fn sample() -> Self {
        Self {
            n: 0,
            mx: 0.0,
            my: 0.0,
            m2x: 0.0,
            m2y: 0.0,
            c: 0.0,
            known: None,
        }
    }

    pub fn with_means(mx: f64, my: f64) -> Self {
        Self {
            mx,
            my,
            known: Some((mx, my)),
            ..Self::sample()
        }
    }

    #[inline]
    pub fn is_sample(&self) -> bool {
        self.known.is_none()
    }

    pub fn reset(&mut self) {
        *self = match self.known {
            Some((mx, my)) => Self::with_means(mx, my),
            None => Self::sample(),
        };
    }

    /// Add one observation.
    #[inline]
    pub fn push(&mut self, x: f64, y: f64) {
        self.n += 1;
        if self.is_sample() {
            // x deviates from the old mean, y from the updated one
            let n = self.n as f64;
            let dx = x - self.mx;
            self.mx += dx / n;
            let dy = y - self.my;
            self.my += dy / n;
            self.m2x += dx * (x - self.mx);
            self.m2y += dy * (y - self.my);
            self.c += dx * (y - self.my);
        } else {
            let dx = x - self.mx;
            let dy = y - self.my;
            self.m2x += dx * dx;
            self.m2y += dy * dy;
            self.c += dx * dy;
        }
    }

    /// Replace `(x0, y0)` with `(x, y)` in a full window of `self.n` pairs.
    #[inline]
    pub fn slide(&mut self, x0: f64, y0: f64, x: f64, y: f64) {
        let dx0 = x0 - self.mx;
        let dy0 = y0 - self.my;
        let dxn = x - self.mx;
        let dyn_ = y - self.my;
        if self.is_sample() {
            let w = self.n as f64;
            let dx = dxn - dx0;
            let dy = dyn_ - dy0;
            self.c += dxn * dyn_ - dx0 * dy0 - dx * dy / w;
            self.mx += dx / w;
            self.my += dy / w;
            self.m2x += dx * (dx0 + (x - self.mx));
            self.m2y += dy * (dy0 + (y - self.my));
        } else {
            self.c += dxn * dyn_ - dx0 * dy0;
            self.m2x += dxn * dxn - dx0 * dx0;
            self.m2y += dyn_ * dyn_ - dy0 * dy0;
        }
    }

    /// Divisor for the second moments: `n - 1` for sample estimates, `n`
    /// with known means.
    #[inline]
    fn dof(&self) -> f64 {
        if self.is_sample() {
            (self.n - 1) as f64
        } else {
            self.n as f64
        }
    }

    pub fn covariance(&self) -> Option<f64> {
        match self.n {
            0 => None,
            1 if self.is_sample() => Some(0.0),
            _ => Some(self.c / self.dof()),
        }
    }

    pub fn correlation(&self) -> Option<f64> {
        match self.n {
            0 => None,
            1 if self.is_sample() => {
                if self.m2x.is_nan() || self.m2y.is_nan() {
                    Some(f64::NAN)
                } else {
                    Some(0.0)
                }
            }
            _ => {
                let d = self.dof();
                let sx = (self.m2x / d).sqrt();
                let sy = (self.m2y / d).sqrt();
                Some((self.c / d) / (sx * sy))
            }
        }
    }
}
