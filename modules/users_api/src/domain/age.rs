use chrono::NaiveDate;

/// Whole calendar years between `birth_date` and `today` reach `minimum_age`.
///
/// Years are counted on the calendar, so a Feb 29 birthday completes a year on
/// Mar 1 of non-leap years. A birth date after `today` never passes.
pub fn is_age_valid(birth_date: NaiveDate, minimum_age: u32, today: NaiveDate) -> bool {
    today
        .years_since(birth_date)
        .is_some_and(|years| years >= minimum_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn exactly_minimum_age_is_valid() {
        let today = date(2024, 1, 1);
        assert!(is_age_valid(date(2006, 1, 1), 18, today));
    }

    #[test]
    fn one_day_short_is_invalid() {
        let today = date(2024, 1, 1);
        assert!(!is_age_valid(date(2006, 1, 2), 18, today));
    }

    #[test]
    fn boundary_holds_for_many_reference_dates() {
        let mut today = date(2023, 12, 25);
        for _ in 0..800 {
            for minimum_age in [0u32, 1, 18, 21, 65] {
                let Some(boundary) = today.with_year(today.year() - minimum_age as i32) else {
                    // Feb 29 has no counterpart in the boundary year
                    continue;
                };
                assert!(is_age_valid(boundary, minimum_age, today), "{boundary} / {today}");
                let day_after = boundary.succ_opt().unwrap();
                assert!(
                    !is_age_valid(day_after, minimum_age, today),
                    "{day_after} / {today}"
                );
            }
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn future_birth_date_is_invalid_even_with_zero_minimum() {
        let today = date(2024, 1, 1);
        assert!(!is_age_valid(date(2024, 1, 2), 0, today));
    }

    #[test]
    fn born_today_satisfies_zero_minimum() {
        let today = date(2024, 1, 1);
        assert!(is_age_valid(today, 0, today));
        assert!(!is_age_valid(today, 1, today));
    }

    #[test]
    fn uses_calendar_years_not_day_counts() {
        // 6574 days is 18 * 365.2 but the 18th birthday is not yet reached
        let birth = date(2000, 3, 1);
        assert!(!is_age_valid(birth, 18, date(2018, 2, 28)));
        assert!(is_age_valid(birth, 18, date(2018, 3, 1)));
    }

    #[test]
    fn leap_day_birth_date() {
        let birth = date(2004, 2, 29);
        assert!(!is_age_valid(birth, 18, date(2022, 2, 28)));
        assert!(is_age_valid(birth, 18, date(2022, 3, 1)));
        assert!(is_age_valid(birth, 20, date(2024, 2, 29)));
    }
}
