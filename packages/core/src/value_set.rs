//! ValueSet - per-node attribute results.

use std::fmt;
use std::rc::Rc;

use crate::Error;

/// A lazily produced sequence of attribute lookups.
pub type Values<'a, A> = Box<dyn Iterator<Item = Result<A, Error>> + 'a>;

type Source<'a, A> = Rc<dyn Fn() -> Values<'a, A> + 'a>;

/// One `Result` per node of a `NodeSet`.
///
/// Each node succeeds or fails on its own: a node without the attribute
/// contributes `Err(NotFound)` and the rest are unaffected. A `ValueSet`
/// built from an errored `NodeSet` carries that error instead.
pub struct ValueSet<'a, A> {
    data: Result<Source<'a, A>, Error>,
}

impl<'a, A> Clone for ValueSet<'a, A> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<'a, A> fmt::Debug for ValueSet<'a, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Ok(_) => f.write_str("ValueSet(..)"),
            Err(e) => f.debug_tuple("ValueSet").field(e).finish(),
        }
    }
}

impl<'a, A: 'a> ValueSet<'a, A> {
    /// A set driven by a restartable producer.
    pub fn from_fn<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'a,
        I: IntoIterator<Item = Result<A, Error>>,
        I::IntoIter: 'a,
    {
        let source: Source<'a, A> = Rc::new(move || Box::new(producer().into_iter()) as Values<'a, A>);
        Self { data: Ok(source) }
    }

    /// A set that carries `err` and nothing else.
    pub fn from_error(err: impl Into<Error>) -> Self {
        Self {
            data: Err(err.into()),
        }
    }

    /// The error, if this set carries one.
    pub fn err(&self) -> Option<&Error> {
        self.data.as_ref().err()
    }

    /// True when no error is set.
    pub fn is_ok(&self) -> bool {
        self.data.is_ok()
    }

    /// Start a traversal. An errored set yields nothing.
    pub fn iter(&self) -> Values<'a, A> {
        match &self.data {
            Ok(source) => source(),
            Err(_) => Box::new(std::iter::empty()),
        }
    }

    /// The first carrier as-is.
    ///
    /// `NotFound` when there are no nodes at all.
    pub fn first(&self) -> Result<A, Error> {
        match &self.data {
            Err(e) => Err(e.clone()),
            Ok(source) => source().next().unwrap_or(Err(Error::NotFound)),
        }
    }

    /// The first successful value.
    pub fn first_ok(&self) -> Result<A, Error> {
        match &self.data {
            Err(e) => Err(e.clone()),
            Ok(source) => source().find_map(Result::ok).ok_or(Error::NotFound),
        }
    }
}

impl<'a, 's, A: 'a> IntoIterator for &'s ValueSet<'a, A> {
    type Item = Result<A, Error>;
    type IntoIter = Values<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValueSet<'static, i64> {
        ValueSet::from_fn(|| vec![Err(Error::NotFound), Ok(7), Ok(9)])
    }

    #[test]
    fn first_is_the_raw_carrier() {
        assert!(sample().first().unwrap_err().is_not_found());
    }

    #[test]
    fn first_ok_skips_failures() {
        assert_eq!(sample().first_ok().unwrap(), 7);
    }

    #[test]
    fn iter_restarts() {
        let set = sample();
        assert_eq!(set.iter().filter(Result::is_ok).count(), 2);
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn empty_set_is_not_found() {
        let set: ValueSet<'_, i64> = ValueSet::from_fn(Vec::new);
        assert!(set.first().unwrap_err().is_not_found());
        assert!(set.first_ok().unwrap_err().is_not_found());
    }

    #[test]
    fn errored_set_reports_its_error() {
        let err = Error::backend("bad input");
        let set: ValueSet<'_, i64> = ValueSet::from_error(err.clone());
        assert!(set.err().is_some_and(|e| e.same(&err)));
        assert!(set.first().unwrap_err().same(&err));
        assert!(set.first_ok().unwrap_err().same(&err));
        assert_eq!(set.iter().count(), 0);
    }
}
