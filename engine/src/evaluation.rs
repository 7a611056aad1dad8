use crate::error::ErrorKind;

pub trait RatingMetric {
    fn add(&mut self, score: f64, predicted: f64);
    fn result(&self) -> Result<f64, ErrorKind>;
    fn get_name(&self) -> String;
}

/// Mean absolute error
#[derive(Debug, Clone, Default)]
pub struct Mae {
    sum: f64,
    n: usize,
}

impl Mae {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingMetric for Mae {
    fn add(&mut self, score: f64, predicted: f64) {
        self.sum += (predicted - score).abs();
        self.n += 1;
    }

    fn result(&self) -> Result<f64, ErrorKind> {
        if self.n == 0 {
            return Err(ErrorKind::EmptyEvaluation(self.get_name()));
        }

        Ok(self.sum / self.n as f64)
    }

    fn get_name(&self) -> String {
        "MAE".into()
    }
}

/// Root mean squared error
#[derive(Debug, Clone, Default)]
pub struct Rmse {
    sum: f64,
    n: usize,
}

impl Rmse {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingMetric for Rmse {
    fn add(&mut self, score: f64, predicted: f64) {
        self.sum += (predicted - score).powi(2);
        self.n += 1;
    }

    fn result(&self) -> Result<f64, ErrorKind> {
        if self.n == 0 {
            return Err(ErrorKind::EmptyEvaluation(self.get_name()));
        }

        Ok((self.sum / self.n as f64).sqrt())
    }

    fn get_name(&self) -> String {
        "RMSE".into()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationReporter {
    rmse: Rmse,
    mae: Mae,
    n: usize,
}

impl EvaluationReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, score: f64, predicted: f64) {
        self.rmse.add(score, predicted);
        self.mae.add(score, predicted);
        self.n += 1;
    }

    /// Number of evaluated predictions
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn rmse(&self) -> Result<f64, ErrorKind> {
        self.rmse.result()
    }

    pub fn mae(&self) -> Result<f64, ErrorKind> {
        self.mae.result()
    }

    /// One `NAME value` line per metric, RMSE first
    pub fn summary(&self, precision: usize) -> Result<String, ErrorKind> {
        let metrics: [&dyn RatingMetric; 2] = [&self.rmse, &self.mae];

        let mut lines = Vec::with_capacity(metrics.len());
        for metric in metrics.iter() {
            lines.push(format!(
                "{} {:.*}",
                metric.get_name(),
                precision,
                metric.result()?
            ));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn mae_and_rmse() -> Result<(), ErrorKind> {
        let mut reporter = EvaluationReporter::new();
        reporter.add(4.0, 3.0);
        reporter.add(2.0, 5.0);
        reporter.add(1.0, 1.0);

        assert_eq!(reporter.len(), 3);
        assert_approx_eq!(reporter.mae()?, 4.0 / 3.0);
        assert_approx_eq!(reporter.rmse()?, (10.0f64 / 3.0).sqrt());

        Ok(())
    }

    #[test]
    fn rmse_bounds_mae() -> Result<(), ErrorKind> {
        let pairs = [(3.5, 3.1), (1.0, 4.0), (5.0, 4.9), (2.0, 2.0), (4.0, 2.5)];

        let mut reporter = EvaluationReporter::new();
        for &(score, predicted) in pairs.iter() {
            reporter.add(score, predicted);
            assert!(reporter.rmse()? >= reporter.mae()?);
            assert!(reporter.mae()? >= 0.0);
        }

        Ok(())
    }

    #[test]
    fn summary_lines() -> Result<(), ErrorKind> {
        let mut reporter = EvaluationReporter::new();
        reporter.add(5.0, 4.0);

        assert_eq!(reporter.summary(4)?, "RMSE 1.0000\nMAE 1.0000");
        assert_eq!(reporter.summary(1)?, "RMSE 1.0\nMAE 1.0");

        Ok(())
    }

    #[test]
    fn empty_evaluation() {
        let reporter = EvaluationReporter::new();

        assert!(reporter.is_empty());
        assert!(matches!(reporter.mae(), Err(ErrorKind::EmptyEvaluation(name)) if name == "MAE"));
        assert!(matches!(reporter.rmse(), Err(ErrorKind::EmptyEvaluation(name)) if name == "RMSE"));
        assert!(reporter.summary(4).is_err());
    }
}
