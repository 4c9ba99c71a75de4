//! Moving-window covariance and correlation.
//!
//! The last `W` pairs live in a circular buffer of `2*W` values with `x` at
//! even and `y` at odd positions. Once the window is full, each new pair
//! replaces the oldest one and the moments are slid in O(1). A NaN anywhere
//! in the window makes the statistic NaN; when the last NaN leaves, the
//! moments are rebuilt from the buffer.

use crate::moments::Moments;
use crate::{Accumulator, IncrError, Result};

/// What an incoming pair did to the window.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// The window grew by one pair.
    Grow,
    /// The window was full and `(x0, y0)` was evicted.
    Slide(f64, f64),
    /// The last NaN left the window.
    Rebuild,
    /// The window holds at least one NaN.
    Poisoned,
}

#[derive(Debug, Clone)]
struct Window {
    buf: Vec<f64>,
    size: usize,
    head: usize,
    filled: usize,
    nans: usize,
}

impl Window {
    fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(IncrError::InvalidWindow(size));
        }
        Ok(Self {
            buf: vec![0.0; 2 * size],
            size,
            head: 0,
            filled: 0,
            nans: 0,
        })
    }

    fn push(&mut self, x: f64, y: f64) -> Step {
        let k = 2 * self.head;
        self.head = (self.head + 1) % self.size;
        let incoming = x.is_nan() || y.is_nan();

        if self.filled < self.size {
            self.buf[k] = x;
            self.buf[k + 1] = y;
            self.filled += 1;
            if incoming {
                self.nans += 1;
            }
            return if self.nans > 0 { Step::Poisoned } else { Step::Grow };
        }

        let (x0, y0) = (self.buf[k], self.buf[k + 1]);
        self.buf[k] = x;
        self.buf[k + 1] = y;
        let outgoing = x0.is_nan() || y0.is_nan();
        if outgoing {
            self.nans -= 1;
        }
        if incoming {
            self.nans += 1;
        }
        match (self.nans, outgoing) {
            (0, true) => Step::Rebuild,
            (0, false) => Step::Slide(x0, y0),
            _ => Step::Poisoned,
        }
    }

    fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.buf
            .chunks_exact(2)
            .take(self.filled)
            .map(|p| (p[0], p[1]))
    }
}

/// Window plus the moments of its contents.
#[derive(Debug, Clone)]
struct Moving {
    window: Window,
    moments: Moments,
}

impl Moving {
    fn new(size: usize, moments: Moments) -> Result<Self> {
        Ok(Self {
            window: Window::new(size)?,
            moments,
        })
    }

    fn push(&mut self, x: f64, y: f64) {
        match self.window.push(x, y) {
            Step::Grow => self.moments.push(x, y),
            Step::Slide(x0, y0) => self.moments.slide(x0, y0, x, y),
            Step::Rebuild => {
                self.moments.reset();
                for (a, b) in self.window.pairs() {
                    self.moments.push(a, b);
                }
            }
            Step::Poisoned => {}
        }
    }

    fn read(&self, stat: impl Fn(&Moments) -> Option<f64>) -> Option<f64> {
        match (self.window.filled, self.window.nans) {
            (0, _) => None,
            (_, 0) => stat(&self.moments),
            _ => Some(f64::NAN),
        }
    }
}

macro_rules! moving_accumulator {
    ($(#[$doc:meta])* $name:ident, $stat:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Moving,
        }

        impl $name {
            /// Sample estimate over the last `window` pairs.
            pub fn new(window: usize) -> Result<Self> {
                log::debug!(concat!(stringify!($name), ": window={}"), window);
                Ok(Self {
                    inner: Moving::new(window, Moments::sample())?,
                })
            }

            /// Population estimate over the last `window` pairs about fixed,
            /// known means.
            pub fn with_means(window: usize, mean_x: f64, mean_y: f64) -> Result<Self> {
                log::debug!(
                    concat!(stringify!($name), ": window={}, known means ({}, {})"),
                    window,
                    mean_x,
                    mean_y
                );
                Ok(Self {
                    inner: Moving::new(window, Moments::with_means(mean_x, mean_y))?,
                })
            }

            /// Window length `W`.
            pub fn window(&self) -> usize {
                self.inner.window.size
            }
        }

        impl Accumulator for $name {
            type Input = (f64, f64);
            type Output = f64;

            fn update(&mut self, (x, y): (f64, f64)) -> f64 {
                self.inner.push(x, y);
                self.current().unwrap_or(f64::NAN)
            }

            fn current(&self) -> Option<f64> {
                self.inner.read(Moments::$stat)
            }
        }
    };
}

moving_accumulator!(
    /// Moving-window covariance.
    ///
    /// ```rust
    /// use strided_incr::{Accumulator, IncrMCovariance};
    ///
    /// let mut acc = IncrMCovariance::new(3).unwrap();
    /// for (x, y) in [(2.0, 1.0), (-5.0, 3.25), (3.0, -1.0), (5.0, -9.5)] {
    ///     acc.update((x, y));
    /// }
    /// // Window now holds (-5, 3.25), (3, -1), (5, -9.5)
    /// assert!((acc.current().unwrap() - -29.75).abs() < 1e-9);
    /// ```
    IncrMCovariance,
    covariance
);

moving_accumulator!(
    /// Moving-window Pearson correlation coefficient.
    IncrMPcorr,
    correlation
);
