//! Base implementation of records.
use crate::error::TabulaError;
use std::collections::HashMap;

/// Value stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single metric, e.g., the score of an episode.
    Scalar(f32),

    /// A series of metrics, e.g., the scores of all evaluation episodes.
    Array1(Vec<f32>),
}

/// Named metrics of a training episode or an evaluation run.
///
/// # Examples
///
/// ```rust
/// use tabula_core::record::{Record, RecordValue};
///
/// let record = Record::from_slice(&[
///     ("score_mean", RecordValue::Scalar(3.5)),
///     ("scores", RecordValue::Array1(vec![3.0, 4.0])),
/// ]);
///
/// assert_eq!(record.get_scalar("score_mean").unwrap(), 3.5);
/// assert_eq!(record.get_array1("scores").unwrap(), vec![3.0, 4.0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record from named values.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Inserts a value, replacing the one under the same key.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Scalar under key `k`.
    ///
    /// Fails if the key is missing or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, TabulaError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(TabulaError::RecordValueTypeError("Scalar".to_string())),
            None => Err(TabulaError::RecordKeyError(k.to_string())),
        }
    }

    /// Series under key `k`.
    ///
    /// Fails if the key is missing or the value is not a series.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, TabulaError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(TabulaError::RecordValueTypeError("Array1".to_string())),
            None => Err(TabulaError::RecordKeyError(k.to_string())),
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record holds no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters_check_key_and_type() {
        let mut record = Record::empty();
        record.insert("score", RecordValue::Scalar(2.0));
        record.insert("scores", RecordValue::Array1(vec![1.0, 3.0]));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get_scalar("score").unwrap(), 2.0);
        assert_eq!(record.get_array1("scores").unwrap(), vec![1.0, 3.0]);
        assert!(matches!(
            record.get_scalar("scores"),
            Err(TabulaError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_array1("score"),
            Err(TabulaError::RecordValueTypeError(_))
        ));
        assert!(matches!(
            record.get_scalar("missing"),
            Err(TabulaError::RecordKeyError(_))
        ));
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut record = Record::from_slice(&[("eps", RecordValue::Scalar(1.0))]);
        record.insert("eps", RecordValue::Scalar(0.5));

        assert_eq!(record.len(), 1);
        assert_eq!(record.get_scalar("eps").unwrap(), 0.5);
    }
}
