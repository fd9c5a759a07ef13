//! Half-up rounding performed on decimal text.
//!
//! Working on the digits avoids binary floating-point surprises: `70.245`
//! rounds to `70.25` even though the nearest `f64` is slightly below it.

/// Round a plain decimal string (`[0-9]*(\.[0-9]*)?`) to `precision`
/// fractional digits, half-up, carrying into a new leading `1` if needed.
///
/// With a precision of zero the decimal point is dropped.
#[must_use]
pub fn round_decimal_string(text: &str, precision: usize) -> String {
    let mut digits: Vec<char> = text.chars().collect();
    let mut point = match digits.iter().position(|c| *c == '.') {
        Some(point) => point,
        None if precision == 0 => return text.to_owned(),
        None => {
            digits.push('.');
            digits.len() - 1
        }
    };
    digits.extend(std::iter::repeat_n('0', precision));

    if digits
        .get(point + precision + 1)
        .is_some_and(|deciding| matches!(deciding, '5'..='9'))
    {
        point = carry(&mut digits, point, point + precision);
    }

    digits.truncate(point + precision + 1);
    if precision == 0 {
        digits.truncate(point);
    }
    digits.into_iter().collect()
}

/// Increment the digit at `last` and propagate the carry leftwards,
/// returning the (possibly shifted) position of the decimal point.
fn carry(digits: &mut Vec<char>, point: usize, last: usize) -> usize {
    let mut index = last;
    loop {
        if index != point {
            match digits.get_mut(index) {
                Some(digit @ '0'..='8') => {
                    *digit = char::from_digit(digit.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or('0');
                    return point;
                }
                Some(digit) => *digit = '0',
                None => return point,
            }
        }
        if index == 0 {
            digits.insert(0, '1');
            return point + 1;
        }
        index -= 1;
    }
}
