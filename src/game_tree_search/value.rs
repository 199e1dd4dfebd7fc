use std::cmp::Ordering;
use std::fmt;

/// A score on the extended real line.
///
/// Wraps an `f64` that is never NaN, so `-inf`/`+inf` can be used as loss/win sentinels
/// and the usual `Ord` folds (`max`, `min`) behave at terminal nodes.
#[derive(Default, Copy, Clone)]
pub struct Value(f64);

impl Value {
    pub const MIN: Value = Value(f64::NEG_INFINITY);
    pub const MAX: Value = Value(f64::INFINITY);
    pub const ZERO: Value = Value(0.0);

    /// NaN maps to [`Value::MIN`], so a broken score never wins a max fold.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::MIN
        } else if value == 0.0 {
            // -0.0 and 0.0 must compare equal under the total order
            Self(0.0)
        } else {
            Self(value)
        }
    }

    #[inline]
    pub fn is_win(self) -> bool {
        self.0 == f64::INFINITY
    }

    #[inline]
    pub fn is_loss(self) -> bool {
        self.0 == f64::NEG_INFINITY
    }

    /// Uniform average of `values`, or `None` if there are none.
    ///
    /// Any `-inf` term makes the mean `-inf`. Otherwise any `+inf` term makes it `+inf`.
    pub fn mean<I: IntoIterator<Item = Value>>(values: I) -> Option<Value> {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        let (mut win, mut loss) = (false, false);
        for Value(v) in values {
            count += 1;
            if v == f64::NEG_INFINITY {
                loss = true;
            } else if v == f64::INFINITY {
                win = true;
            } else {
                sum += v;
            }
        }

        match count {
            0 => None,
            _ if loss => Some(Self::MIN),
            _ if win => Some(Self::MAX),
            _ => Some(Self::new(sum / (count as f64))),
        }
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Self::new(value.into())
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_win() {
            write!(f, "V(+inf)")
        } else if self.is_loss() {
            write!(f, "V(-inf)")
        } else {
            write!(f, "V({:+.2})", self.0)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value paired with the action that achieves it.
///
/// Compared only on `value`, through [`ScoredAction::max_by_value`] and
/// [`ScoredAction::min_by_value`]. The incumbent is kept on ties, so folding
/// over actions in order keeps the first action reaching the extreme value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScoredAction<A> {
    pub value: Value,
    pub action: A,
}

impl<A> ScoredAction<A> {
    #[inline]
    pub fn new(value: Value, action: A) -> Self {
        Self { value, action }
    }

    /// `other` if its value is strictly greater, otherwise `self`.
    #[inline]
    pub fn max_by_value(self, other: Self) -> Self {
        if other.value > self.value {
            other
        } else {
            self
        }
    }

    /// `other` if its value is strictly smaller, otherwise `self`.
    #[inline]
    pub fn min_by_value(self, other: Self) -> Self {
        if other.value < self.value {
            other
        } else {
            self
        }
    }

    #[inline]
    pub fn with_action<B>(self, action: B) -> ScoredAction<B> {
        ScoredAction::new(self.value, action)
    }
}
