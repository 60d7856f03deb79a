//! A small expectation API feeding the installed assertion handler.
//!
//! `expect(actual).to(matcher)` evaluates the matcher and hands the outcome
//! to [`dispatch`](crate::dispatch). Inside a suite the redirector records
//! failures softly; elsewhere the panic fallback applies.

use std::fmt::Debug;

use crate::assertion::{FailureMessage, SourceLocation, dispatch};

/// Decides whether an actual value is acceptable.
pub trait Matcher<T: ?Sized> {
    /// Returns `true` when `actual` satisfies the matcher.
    fn matches(&self, actual: &T) -> bool;

    /// Describes the expectation, e.g. `equal <5>`.
    fn description(&self) -> String;
}

/// A value awaiting a matcher.
#[derive(Debug)]
#[must_use = "an expectation does nothing until `to` or `to_not` is called"]
pub struct Expectation<T> {
    actual: T,
    location: SourceLocation,
    description: Option<String>,
}

/// Starts an expectation about `actual`, remembering the caller's location.
///
/// # Examples
///
/// ```
/// use spec_bdd::{contain, equal, expect};
///
/// expect(2 + 2).to(equal(4));
/// expect(vec![1, 2, 3]).to(contain(2));
/// expect("abc").to_not(equal("abd"));
/// ```
#[track_caller]
pub fn expect<T>(actual: T) -> Expectation<T> {
    Expectation {
        actual,
        location: SourceLocation::caller(),
        description: None,
    }
}

impl<T: Debug> Expectation<T> {
    /// Adds a description shown above the failure message.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Asserts that the matcher accepts the value.
    pub fn to<M: Matcher<T>>(self, matcher: M) {
        let passed = matcher.matches(&self.actual);
        self.report(passed, "to", &matcher);
    }

    /// Asserts that the matcher rejects the value.
    pub fn to_not<M: Matcher<T>>(self, matcher: M) {
        let passed = !matcher.matches(&self.actual);
        self.report(passed, "to not", &matcher);
    }

    fn report<M: Matcher<T>>(self, passed: bool, verb: &str, matcher: &M) {
        let Self {
            actual,
            location,
            description,
        } = self;
        dispatch(
            passed,
            || {
                let message = FailureMessage::expectation(
                    format!("{verb} {}", matcher.description()),
                    format!("<{actual:?}>"),
                );
                match description {
                    Some(description) => message.with_description(description),
                    None => message,
                }
            },
            location,
        );
    }
}

/// Matcher returned by [`equal`].
#[derive(Clone, Debug)]
pub struct Equal<E>(E);

/// Matches values equal to `expected`.
pub fn equal<E>(expected: E) -> Equal<E> {
    Equal(expected)
}

impl<T, E> Matcher<T> for Equal<E>
where
    T: PartialEq<E>,
    E: Debug,
{
    fn matches(&self, actual: &T) -> bool {
        *actual == self.0
    }

    fn description(&self) -> String {
        format!("equal <{:?}>", self.0)
    }
}

/// Matcher returned by [`be_true`] and [`be_false`].
#[derive(Clone, Copy, Debug)]
pub struct BeBool(bool);

/// Matches `true`.
#[must_use]
pub const fn be_true() -> BeBool {
    BeBool(true)
}

/// Matches `false`.
#[must_use]
pub const fn be_false() -> BeBool {
    BeBool(false)
}

impl Matcher<bool> for BeBool {
    fn matches(&self, actual: &bool) -> bool {
        *actual == self.0
    }

    fn description(&self) -> String {
        format!("be {}", self.0)
    }
}

/// Matcher returned by [`be_some`] and [`be_none`].
#[derive(Clone, Copy, Debug)]
pub struct BeSome(bool);

/// Matches `Some(_)`.
#[must_use]
pub const fn be_some() -> BeSome {
    BeSome(true)
}

/// Matches `None`.
#[must_use]
pub const fn be_none() -> BeSome {
    BeSome(false)
}

impl<T> Matcher<Option<T>> for BeSome {
    fn matches(&self, actual: &Option<T>) -> bool {
        actual.is_some() == self.0
    }

    fn description(&self) -> String {
        let label = if self.0 { "be some" } else { "be none" };
        label.to_owned()
    }
}

/// Matcher returned by [`contain`].
#[derive(Clone, Debug)]
pub struct Contain<U>(U);

/// Matches slices and vectors holding `item`.
pub fn contain<U>(item: U) -> Contain<U> {
    Contain(item)
}

impl<T, U> Matcher<T> for Contain<U>
where
    T: AsRef<[U]>,
    U: PartialEq + Debug,
{
    fn matches(&self, actual: &T) -> bool {
        actual.as_ref().contains(&self.0)
    }

    fn description(&self) -> String {
        format!("contain <{:?}>", self.0)
    }
}

/// Matcher returned by [`satisfy`].
pub struct Satisfy<F> {
    label: String,
    predicate: F,
}

/// Matches values accepted by `predicate`; `label` names the condition.
///
/// # Examples
///
/// ```
/// use spec_bdd::{expect, satisfy};
///
/// expect(7).to(satisfy("be odd", |value: &i32| value % 2 == 1));
/// ```
pub fn satisfy<F>(label: impl Into<String>, predicate: F) -> Satisfy<F> {
    Satisfy {
        label: label.into(),
        predicate,
    }
}

impl<T, F> Matcher<T> for Satisfy<F>
where
    F: Fn(&T) -> bool,
{
    fn matches(&self, actual: &T) -> bool {
        (self.predicate)(actual)
    }

    fn description(&self) -> String {
        self.label.clone()
    }
}
