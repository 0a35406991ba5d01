use std::cmp::Ordering;
use std::error::Error;
use std::fmt;

/// InputValueError is used if some simulation option or parameter does not fulfill the posed
/// requirements, e.g., a track without laps or a driver rating above 100.
#[derive(Debug, Clone)]
pub struct InputValueError;

impl fmt::Display for InputValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid input value")
    }
}

impl Error for InputValueError {}

pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that sort the array x (stable sort, equal values keep their
/// original order).
pub fn argsort<T: std::cmp::PartialOrd>(x: &[T], order: SortOrder) -> Vec<usize> {
    let mut idxs: Vec<usize> = (0..x.len()).collect();

    match order {
        SortOrder::Ascending => {
            idxs.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(Ordering::Equal))
        }
        SortOrder::Descending => {
            idxs.sort_by(|&a, &b| x[b].partial_cmp(&x[a]).unwrap_or(Ordering::Equal))
        }
    };

    idxs
}

/// mean returns the arithmetic mean of the values in x or None if x is empty.
pub fn mean<T: Into<f64> + std::marker::Copy>(x: &[T]) -> Option<f64> {
    if x.is_empty() {
        return None;
    }

    let sum: f64 = x.iter().map(|&val| val.into()).sum();
    Some(sum / x.len() as f64)
}
