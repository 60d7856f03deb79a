//! Assertion and logging macros.

/// Soft assertion on a boolean condition.
///
/// The failure message defaults to the stringified condition; extra
/// arguments are formatted with `format!` and only when the check fails.
///
/// # Examples
///
/// ```
/// use spec_bdd::check;
///
/// check!(1 + 1 == 2);
/// check!(vec![1].len() == 1, "vector should hold {} item", 1);
/// ```
#[macro_export]
macro_rules! check {
    ($condition:expr $(,)?) => {
        $crate::dispatch(
            $condition,
            || $crate::FailureMessage::new(concat!("check failed: ", stringify!($condition))),
            $crate::SourceLocation::new(file!(), line!()),
        )
    };
    ($condition:expr, $($arg:tt)+) => {
        $crate::dispatch(
            $condition,
            || $crate::FailureMessage::new(format!($($arg)+)),
            $crate::SourceLocation::new(file!(), line!()),
        )
    };
}

/// Soft assertion that two values are equal.
///
/// # Examples
///
/// ```
/// use spec_bdd::check_eq;
///
/// check_eq!(2 * 3, 6);
/// ```
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => $crate::dispatch(
                *left == *right,
                || {
                    $crate::FailureMessage::expectation(
                        format!("to equal <{:?}>", right),
                        format!("<{:?}>", left),
                    )
                },
                $crate::SourceLocation::new(file!(), line!()),
            ),
        }
    };
}

/// Soft assertion that two values differ.
///
/// # Examples
///
/// ```
/// use spec_bdd::check_ne;
///
/// check_ne!("left", "right");
/// ```
#[macro_export]
macro_rules! check_ne {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => $crate::dispatch(
                *left != *right,
                || {
                    $crate::FailureMessage::expectation(
                        format!("to not equal <{:?}>", right),
                        format!("<{:?}>", left),
                    )
                },
                $crate::SourceLocation::new(file!(), line!()),
            ),
        }
    };
}

/// Unconditional soft failure.
///
/// # Examples
///
/// ```
/// use spec_bdd::{Spec, Suite, fail};
///
/// let mut spec = Spec::new().with_output(std::io::sink());
/// let outcome = spec.try_run_test(|s| s.it("is pending", |_| fail!("not written yet")));
/// assert!(outcome.is_err());
/// ```
#[macro_export]
macro_rules! fail {
    () => {
        $crate::fail!("fail() always fails")
    };
    ($($arg:tt)+) => {
        $crate::dispatch(
            false,
            || $crate::FailureMessage::new(format!($($arg)+)),
            $crate::SourceLocation::new(file!(), line!()),
        )
    };
}

/// Logs a formatted message on a suite; formatting is deferred to the log
/// call.
///
/// # Examples
///
/// ```
/// use spec_bdd::{Spec, spec_log};
///
/// let spec = Spec::new().with_output(std::io::sink());
/// spec_log!(spec, "widget has {} parts", 3);
/// assert!(spec.log_contents().contains("widget has 3 parts"));
/// ```
#[macro_export]
macro_rules! spec_log {
    ($suite:expr, $($arg:tt)+) => {
        {
            use $crate::Suite as _;
            ($suite).spec().log_at(|| format!($($arg)+), file!(), line!())
        }
    };
}
