//! Time-ordered keyframe container.

use std::slice;

use crate::config::CurveConfig;
use crate::interp::{self, upper_bound, Interpolation};
use crate::keyframe::Keyframe;
use crate::metadata::{MetaValue, Metadata};
use crate::CurveError;

/// Keyframes kept sorted ascending by `current.x`, plus the interpolation
/// method and global metadata.
///
/// Keys sharing a time keep their insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    keyframes: Vec<Keyframe>,
    method: Interpolation,
    metadata: Metadata,
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(method: Interpolation) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_config(config: &CurveConfig) -> Self {
        Self::with_method(config.default_method)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&Keyframe> {
        self.keyframes.first()
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe> {
        self.keyframes.last()
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Keyframe> {
        self.keyframes.iter()
    }

    #[inline]
    pub fn method(&self) -> Interpolation {
        self.method
    }

    pub fn set_method(&mut self, method: Interpolation) {
        self.method = method;
    }

    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    #[inline]
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// Set one global entry, returning the value it replaced.
    pub fn set_meta(
        &mut self,
        key: impl Into<String>,
        value: impl Into<MetaValue>,
    ) -> Option<MetaValue> {
        self.metadata.insert(key.into(), value.into())
    }

    /// Insert after every key whose time is `<=` the new key's time.
    pub fn add(&mut self, keyframe: Keyframe) {
        let index = upper_bound(&self.keyframes, keyframe.x());
        self.keyframes.insert(index, keyframe);
    }

    /// Remove and return the last keyframe.
    pub fn pop(&mut self) -> Result<Keyframe, CurveError> {
        self.keyframes.pop().ok_or(CurveError::EmptyCurve)
    }

    /// Remove and return the keyframe at `index`.
    pub fn pop_at(&mut self, index: usize) -> Result<Keyframe, CurveError> {
        if index >= self.keyframes.len() {
            return Err(CurveError::IndexOutOfRange {
                index,
                len: self.keyframes.len(),
            });
        }
        Ok(self.keyframes.remove(index))
    }

    /// Remove the first keyframe equal to `keyframe`.
    pub fn remove(&mut self, keyframe: &Keyframe) -> Result<Keyframe, CurveError> {
        let index = self
            .keyframes
            .iter()
            .position(|k| k == keyframe)
            .ok_or(CurveError::KeyframeNotFound { x: keyframe.x() })?;
        Ok(self.keyframes.remove(index))
    }

    /// Keyframe closest in time to `x`; ties go to the earlier key. `None`
    /// for an empty curve or a NaN `x`.
    pub fn find_nearest_keyframe(&self, x: f64) -> Option<&Keyframe> {
        if x.is_nan() {
            return None;
        }
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;
        if x <= first.x() {
            return Some(first);
        }
        if x >= last.x() {
            return Some(last);
        }
        let index = upper_bound(&self.keyframes, x);
        let prev = &self.keyframes[index - 1];
        let next = &self.keyframes[index];
        if x - prev.x() <= next.x() - x {
            Some(prev)
        } else {
            Some(next)
        }
    }

    /// Time span from the first to the last keyframe, 0 when empty.
    pub fn duration(&self) -> f64 {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(first), Some(last)) => last.x() - first.x(),
            _ => 0.0,
        }
    }

    /// Drop every keyframe and all metadata. The method is kept.
    pub fn clear(&mut self) {
        self.keyframes.clear();
        self.metadata.clear();
    }

    /// Evaluate with the curve's own method. `None` on an empty curve.
    #[inline]
    pub fn eval(&self, x: f64) -> Option<f64> {
        self.eval_with(x, self.method)
    }

    pub fn eval_with(&self, x: f64, method: Interpolation) -> Option<f64> {
        interp::evaluate(&self.keyframes, x, method)
    }
}

impl Extend<Keyframe> for Curve {
    fn extend<I: IntoIterator<Item = Keyframe>>(&mut self, iter: I) {
        for keyframe in iter {
            self.add(keyframe);
        }
    }
}

impl FromIterator<Keyframe> for Curve {
    fn from_iter<I: IntoIterator<Item = Keyframe>>(iter: I) -> Self {
        let mut curve = Curve::new();
        curve.extend(iter);
        curve
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a Keyframe;
    type IntoIter = slice::Iter<'a, Keyframe>;

    fn into_iter(self) -> Self::IntoIter {
        self.keyframes.iter()
    }
}
