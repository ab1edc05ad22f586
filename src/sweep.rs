use ndarray::Array1;

use crate::error::{BeamError, Result};

// Represents an interval of observation angles in degrees, sampled at `count` evenly spaced
// points with both ends included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSweep {
    start: f64,
    stop: f64,
    count: usize,
}

impl AngleSweep {
    pub fn new(start: f64, stop: f64, count: usize) -> Result<AngleSweep> {
        if count == 0 {
            return Err(BeamError::EmptySweep);
        }
        if !start.is_finite() || !stop.is_finite() {
            return Err(BeamError::NonFiniteSweep { start, stop });
        }
        Ok(AngleSweep { start, stop, count })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn step(&self) -> f64 {
        if self.count > 1 {
            (self.stop - self.start) / (self.count - 1) as f64
        } else {
            0.
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let (start, step) = (self.start, self.step());
        (0..self.count).map(move |i| start + step * i as f64)
    }

    pub fn angles(&self) -> Array1<f64> {
        self.iter().collect()
    }
}

impl Default for AngleSweep {
    fn default() -> Self {
        AngleSweep {
            start: -30.,
            stop: 30.,
            count: 1000,
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::AngleSweep;
    use crate::error::BeamError;

    #[test]
    fn endpoints_included() {
        let sweep = AngleSweep::new(-30., 30., 1000).unwrap();
        let angles = sweep.angles();

        assert_eq!(angles.len(), 1000);
        assert_relative_eq!(angles[0], -30.);
        assert_relative_eq!(angles[999], 30., epsilon = 1e-12);
        assert_relative_eq!(sweep.step(), 60. / 999.);
    }

    #[test]
    fn single_point() {
        let sweep = AngleSweep::new(5., 5., 1).unwrap();
        assert_eq!(sweep.angles().to_vec(), vec![5.]);
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert!(matches!(AngleSweep::new(0., 1., 0), Err(BeamError::EmptySweep)));
        assert!(matches!(
            AngleSweep::new(f64::NEG_INFINITY, 1., 5),
            Err(BeamError::NonFiniteSweep { .. })
        ));
    }
}
