// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given block or stmt so that it returns a `Result<()>`. It is just syntactic
/// sugar that helps having to write `Ok(())` repeatedly.
///
/// ```
/// use rpncalc_core::{CommonResult, throws};
///
/// fn run() -> CommonResult<()> {
///     throws!({
///         let answer = 6 * 7;
///         assert_eq!(answer, 42);
///     });
/// }
/// # run().unwrap();
/// ```
#[macro_export]
macro_rules! throws {
    ($it: block) => {{
        $it
        return Ok(())
    }};
    ($it: stmt) => {{
        $it
        return Ok(())
    }};
}

/// Syntactic sugar to run a conditional statement. Meant to be used with the `DEBUG_*`
/// flags to keep noisy log output out of the way.
///
/// ```
/// use rpncalc_core::call_if_true;
/// const DEBUG: bool = true;
/// let mut hits = 0;
/// call_if_true!(DEBUG, hits += 1);
/// assert_eq!(hits, 1);
/// ```
#[macro_export]
macro_rules! call_if_true {
    ($cond:ident, $block: expr) => {{
        if $cond {
            $block
        }
    }};
}

/// Same as [`pretty_assertions::assert_eq!`], which produces a colorized diff when the
/// assertion fails.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// Shorthand for `Ok(())` or `Ok(value)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
