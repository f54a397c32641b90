//! Result type for operations that degrade instead of failing.
//!
//! The model gateway and the response normalizer never fail the caller:
//! they substitute a mock string or a fallback value. [`Outcome`] keeps that
//! substitution observable so handlers can log it and tests can assert on it.

/// A value that was either produced normally or substituted after a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The operation succeeded.
    Ok(T),
    /// The operation failed and `value` is the substitute.
    Degraded { reason: String, value: T },
}

impl<T> Outcome<T> {
    pub fn degraded(reason: impl Into<String>, value: T) -> Self {
        Outcome::Degraded {
            reason: reason.into(),
            value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// Why the value was substituted, if it was.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Ok(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Degraded { reason, value } => Outcome::Degraded {
                reason,
                value: f(value),
            },
        }
    }

    /// Chain a second degradable step.
    ///
    /// The second step's degradation wins; otherwise the first step's
    /// reason is carried through so an upstream mock is never reported as
    /// a clean success.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => f(value),
            Outcome::Degraded { reason, value } => match f(value) {
                Outcome::Ok(next) => Outcome::Degraded {
                    reason,
                    value: next,
                },
                degraded => degraded,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_has_no_reason() {
        let outcome = Outcome::Ok(3);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
        assert_eq!(outcome.into_value(), 3);
    }

    #[test]
    fn degraded_keeps_reason_through_map() {
        let outcome = Outcome::degraded("provider down", 2).map(|v| v * 10);
        assert_eq!(outcome.reason(), Some("provider down"));
        assert_eq!(*outcome.value(), 20);
    }

    #[test]
    fn and_then_prefers_latest_degradation() {
        let outcome = Outcome::degraded("mocked", "text")
            .and_then(|_| Outcome::<i32>::degraded("unparseable", 0));
        assert_eq!(outcome.reason(), Some("unparseable"));
    }

    #[test]
    fn and_then_carries_upstream_degradation() {
        let outcome = Outcome::degraded("mocked", "text").and_then(|t| Outcome::Ok(t.len()));
        assert_eq!(outcome, Outcome::degraded("mocked", 4));
    }
}
