use regex::Regex;

/// Extracts the minimum salary from a raw salary string using regex.
/// Looks for numbers and returns the first one found (likely the minimum).
pub fn extract_salary(salary_raw: &str) -> Option<i64> {
    // Match numbers that may have commas (e.g., "50,000" or "50000")
    let re = Regex::new(r"\$?(\d{1,3}(?:,\d{3})+|\d+)").ok()?;

    let found = re
        .captures_iter(salary_raw)
        .filter_map(|cap| cap.get(1))
        .filter_map(|matched| {
            matched
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect::<String>()
                .parse::<i64>()
                .ok()
        })
        // Anything below 1000 is an hourly rate or a count, not an annual figure
        .find(|num| *num >= 1000);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_salary_with_dollar_sign() {
        assert_eq!(extract_salary("$50,000 - $70,000"), Some(50000));
    }

    #[test]
    fn test_extract_salary_without_dollar_sign() {
        assert_eq!(extract_salary("Salary: 60000 USD"), Some(60000));
    }

    #[test]
    fn test_extract_salary_placeholder() {
        assert_eq!(extract_salary("Not specified"), None);
    }

    #[test]
    fn test_extract_salary_skips_small_numbers() {
        assert_eq!(extract_salary("Up to 40 hours, $95,000/yr"), Some(95000));
        assert_eq!(extract_salary("$45/hr"), None);
    }
}
