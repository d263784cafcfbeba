//! Algorithm enum for selecting how a generation is evaluated.
//!
//! Evaluation only reads the step-start snapshot, so it can be spread over
//! rayon's pool. Committing the transitions is always serial.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Evaluate tracked cells one after another
    Serial,
    /// Evaluate tracked cells with rayon
    #[default]
    Parallel,
}

impl Algorithm {
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    /// Display name for UI
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Serial",
            Algorithm::Parallel => "Parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "Snapshot evaluated on one thread",
            Algorithm::Parallel => "Snapshot evaluated with rayon",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Algorithm::Serial => Algorithm::Parallel,
            Algorithm::Parallel => Algorithm::Serial,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_parallel() {
        assert_eq!(Algorithm::default(), Algorithm::Parallel);
    }

    #[test]
    fn test_toggle_round_trips() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.toggled().toggled(), algorithm);
        }
    }
}
