/// Median of a list of raw scores.
///
/// Values are sorted ascending; even-length input averages the two middle
/// elements, odd-length takes the middle element, and an empty input reports 0.
pub fn median(values: &[i32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::from(sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        f64::from(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reports_zero() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn single_element() {
        assert_eq!(median(&[4]), 4.0);
    }

    #[test]
    fn even_length_averages_middle_pair() {
        assert_eq!(median(&[1, 3]), 2.0);
        assert_eq!(median(&[1, 2, 3, 4]), 2.5);
    }

    #[test]
    fn odd_length_takes_middle() {
        assert_eq!(median(&[10, 20, 30, 15, 25]), 20.0);
    }

    #[test]
    fn input_order_is_irrelevant() {
        assert_eq!(median(&[9, 1, 5]), 5.0);
        assert_eq!(median(&[4, 3, 2, 1]), 2.5);
    }
}
