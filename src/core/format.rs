/// 有效位數
const SIGNIFICANT_DIGITS: usize = 6;

/// 座標格式化：最多 6 位有效數字、不用科學記號、至少保留一位小數
///
/// `52.5200066` → `"52.52"`，`50.0` → `"50.0"`，`0.00001234` → `"0.000012"`。
pub fn format_coordinate(value: f64) -> String {
    let mut text = format_general(value).unwrap_or_else(|| {
        let fixed = format!("{:.*}", SIGNIFICANT_DIGITS, value);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    });

    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// `%g` 風格的輸出；若會變成科學記號則回傳 None
fn format_general(value: f64) -> Option<String> {
    // 先用科學記號取得四捨五入後的指數
    let scientific = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let exponent: i32 = scientific.rsplit_once('e')?.1.parse().ok()?;
    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        return None;
    }

    let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
    let fixed = format!("{:.*}", decimals, value);
    if fixed.contains('.') {
        Some(fixed.trim_end_matches('0').trim_end_matches('.').to_string())
    } else {
        Some(fixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_significant_digits() {
        assert_eq!(format_coordinate(52.5200066), "52.52");
        assert_eq!(format_coordinate(13.404954), "13.405");
        assert_eq!(format_coordinate(-122.4194155), "-122.419");
        assert_eq!(format_coordinate(8.25), "8.25");
    }

    #[test]
    fn test_integral_values_keep_a_decimal() {
        assert_eq!(format_coordinate(50.0), "50.0");
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(-180.0), "-180.0");
        assert_eq!(format_coordinate(123456.0), "123456.0");
    }

    #[test]
    fn test_no_scientific_notation() {
        // %g 會輸出 1.23457e+06，改用 6 位小數的定點表示
        assert_eq!(format_coordinate(1234567.0), "1234567.0");
        assert_eq!(format_coordinate(0.00001234), "0.000012");
        assert_eq!(format_coordinate(0.0000001), "0.0");
        assert_eq!(format_coordinate(999999.5), "999999.5");
        assert_eq!(format_coordinate(0.0001), "0.0001");
    }

    #[test]
    fn test_rounding_carries_into_next_digit() {
        assert_eq!(format_coordinate(9.9999996), "10.0");
        assert_eq!(format_coordinate(47.3769999), "47.377");
    }
}
