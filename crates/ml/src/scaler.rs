use crate::Point;

/// Per-feature standard-score scaling, fitted on a batch of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    pub mean: Point,
    pub std_dev: Point,
}

impl StandardScaler {
    /// Fits mean and population standard deviation per feature.
    pub fn fit(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self {
                mean: [0.0; 2],
                std_dev: [0.0; 2],
            };
        }

        let n = points.len() as f64;
        let mut mean = [0.0_f64; 2];
        for point in points {
            for (acc, value) in mean.iter_mut().zip(point) {
                *acc += value;
            }
        }
        for value in &mut mean {
            *value /= n;
        }

        let mut variance = [0.0_f64; 2];
        for point in points {
            for ((acc, value), center) in variance.iter_mut().zip(point).zip(&mean) {
                *acc += (value - center).powi(2);
            }
        }

        Self {
            mean,
            std_dev: variance.map(|v| (v / n).sqrt()),
        }
    }

    /// Scales a point. Features with zero spread map to 0.
    pub fn transform_point(&self, point: &Point) -> Point {
        let mut scaled = [0.0_f64; 2];
        for (idx, value) in point.iter().enumerate() {
            let std_dev = self.std_dev[idx];
            scaled[idx] = if std_dev > 0.0 {
                (value - self.mean[idx]) / std_dev
            } else {
                0.0
            };
        }
        scaled
    }

    pub fn transform(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|point| self.transform_point(point)).collect()
    }

    pub fn fit_transform(points: &[Point]) -> (Self, Vec<Point>) {
        let scaler = Self::fit(points);
        let scaled = scaler.transform(points);
        (scaler, scaled)
    }
}
