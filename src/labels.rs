/// Confidence scores as reported by the classifier, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scores {
    pub adult: f64,
    pub racy: f64,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{label} score out of range: {value}")]
    OutOfRange { label: &'static str, value: f64 },
}

/// Label confidences as whole percentages.
///
/// Rendered as five comma-separated fields: adult, suggestive, and three reserved
/// categories that are always empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Labels {
    pub adult: u8,
    pub suggestive: u8,
}

impl std::fmt::Display for Labels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},,,", self.adult, self.suggestive)
    }
}

/// Converts a score in `[0, 1]` into a percentage, rounding ties up.
pub fn confidence_from_score(label: &'static str, score: f64) -> Result<u8, Error> {
    if !score.is_finite() || !(0.0..=1.0).contains(&score) {
        return Err(Error::OutOfRange { label, value: score });
    }

    // f64::round rounds half away from zero, which is half-up for non-negative input.
    Ok((score * 100.0).round() as u8)
}

impl TryFrom<Scores> for Labels {
    type Error = Error;

    fn try_from(scores: Scores) -> Result<Self, Self::Error> {
        Ok(Self {
            adult: confidence_from_score("adult", scores.adult)?,
            suggestive: confidence_from_score("racy", scores.racy)?,
        })
    }
}

pub fn normalize(scores: Scores) -> Result<String, Error> {
    Ok(Labels::try_from(scores)?.to_string())
}
