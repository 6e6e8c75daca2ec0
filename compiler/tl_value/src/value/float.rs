//! Float text form.
//!
//! Shortest round-trip digits, in positional notation for moderate
//! magnitudes and `d.ddde±XX` otherwise:
//!
//! | value        | text           |
//! |--------------|----------------|
//! | `2.5`        | `2.5`          |
//! | `100000.0`   | `100000`       |
//! | `1234567.0`  | `1.234567e+06` |
//! | `0.0001`     | `0.0001`       |
//! | `0.00001`    | `1e-05`        |

/// Decimal exponents outside `[MIN_PLAIN_EXP, MAX_PLAIN_EXP)` use exponent form.
const MIN_PLAIN_EXP: i32 = -4;
const MAX_PLAIN_EXP: i32 = 6;

pub(super) fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x.is_sign_positive() { "+Inf" } else { "-Inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "-1.234567e6".
    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci
        .split_once('e')
        .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e)))
    else {
        return format!("{x}");
    };

    if (MIN_PLAIN_EXP..MAX_PLAIN_EXP).contains(&exp) {
        format!("{x}")
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}
