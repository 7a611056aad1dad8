#![allow(clippy::implicit_hasher)]

use crate::utils::common_keys_iter;
use anyhow::Error;
use controller::Ratings;
use num_traits::float::Float;
use std::{
    collections::HashMap,
    hash::Hash,
    ops::{AddAssign, Mul, Sub},
};

/// Pearson correlation between two users over the items both of them rated,
/// with each rating centered on its user's overall mean (not the mean over
/// the co-rated items).
///
/// No co-rated items means no evidence either way, so the result is zero.
/// A numerator of exactly zero short-circuits to zero as well, which also
/// covers the zero-variance case where the denominator would vanish.
pub fn pearson_correlation<ItemId, Value>(
    a: &Ratings<ItemId, Value>,
    b: &Ratings<ItemId, Value>,
    mean_a: Value,
    mean_b: Value,
) -> Value
where
    ItemId: Hash + Eq,
    Value: Float + AddAssign + Sub + Mul,
{
    let mut cov = None;
    let mut dev_a = Value::zero();
    let mut dev_b = Value::zero();

    for (_, (x, y)) in common_keys_iter(a, b) {
        let x = *x - mean_a;
        let y = *y - mean_b;

        *cov.get_or_insert_with(Value::zero) += x * y;
        dev_a += x.powi(2);
        dev_b += y.powi(2);
    }

    match cov {
        Some(cov) if cov != Value::zero() => cov / (dev_a * dev_b).sqrt(),
        _ => Value::zero(),
    }
}

/// Memoized similarities between pairs of users.
///
/// A pair is looked up under both orderings but stored only under the one it
/// was first requested with, so `(a, b)` and `(b, a)` never coexist.
#[derive(Debug, Clone)]
pub struct SimilarityCache<UserId> {
    values: HashMap<UserId, HashMap<UserId, f64>>,
    len: usize,
}

impl<UserId> Default for SimilarityCache<UserId> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            len: 0,
        }
    }
}

impl<UserId> SimilarityCache<UserId>
where
    UserId: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs computed so far
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the pair is stored under this exact ordering
    pub fn stored_as(&self, a: &UserId, b: &UserId) -> bool {
        self.values.get(a).map_or(false, |row| row.contains_key(b))
    }

    pub fn get(&self, a: &UserId, b: &UserId) -> Option<f64> {
        self.values
            .get(a)
            .and_then(|row| row.get(b))
            .or_else(|| self.values.get(b).and_then(|row| row.get(a)))
            .copied()
    }

    pub fn get_or_compute<F>(&mut self, a: &UserId, b: &UserId, compute: F) -> Result<f64, Error>
    where
        F: FnOnce() -> Result<f64, Error>,
    {
        if let Some(similarity) = self.get(a, b) {
            return Ok(similarity);
        }

        let similarity = compute()?;
        self.values
            .entry(a.clone())
            .or_insert_with(HashMap::new)
            .insert(b.clone(), similarity);
        self.len += 1;

        Ok(similarity)
    }
}
