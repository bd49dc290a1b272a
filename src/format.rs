//! Number and timestamp formatting for the Persian-facing UI.

/// Replace ASCII digits with Persian (Extended Arabic-Indic) digits.
pub fn to_persian_digits(value: &str) -> String {
    const DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
    value
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => ch,
        })
        .collect()
}

/// Group an integer with thousands separators: 1234567 → "1,234,567".
pub fn three_comma(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Localized counter figure: grouped, Persian digits.
pub fn persian_count(value: u64) -> String {
    to_persian_digits(&three_comma(value))
}

/// Price figure with currency suffix, e.g. ۸٬۲۰۰ → "۸,۲۰۰ تومان".
pub fn format_toman(value: u64) -> String {
    format!("{} تومان", persian_count(value))
}

/// Whole-percent score label: 77.9 → "۷۸٪".
pub fn format_score(value: f64) -> String {
    format!("{}٪", to_persian_digits(&format!("{:.0}", value)))
}

/// Short axis label for an ISO-8601 timestamp: date plus hh:mm when present.
pub fn short_timestamp(iso: &str) -> String {
    let (date, time_segment) = iso.split_once('T').unwrap_or((iso, ""));
    let clock: String = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or("")
        .chars()
        .take(5)
        .collect();
    if clock.is_empty() {
        date.to_string()
    } else {
        format!("{date} {clock}")
    }
}

/// Coaching band for a final score, thresholds matching the server comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Excellent,
    Good,
    KeepPracticing,
    NeedsWork,
}

impl Feedback {
    pub fn for_score(score: f64) -> Self {
        if score > 90.0 {
            Self::Excellent
        } else if score > 75.0 {
            Self::Good
        } else if score > 50.0 {
            Self::KeepPracticing
        } else {
            Self::NeedsWork
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "عالی! اجرای شما بسیار نزدیک به قطعه مرجع است.",
            Self::Good => "آفرین! هنوز جای پیشرفت‌های کوچکی هست.",
            Self::KeepPracticing => "به تمرین ادامه دهید؛ ریتم یا نت‌ها قابل بهبودند.",
            Self::NeedsWork => "تفاوت قابل توجهی وجود دارد. سعی کنید به قطعه مرجع نزدیک‌تر شوید.",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Excellent => "feedback feedback--excellent",
            Self::Good => "feedback feedback--good",
            Self::KeepPracticing => "feedback feedback--warn",
            Self::NeedsWork => "feedback feedback--poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persian_digits_replace_ascii_only() {
        assert_eq!(to_persian_digits("123 abc"), "۱۲۳ abc");
        assert_eq!(to_persian_digits(""), "");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(three_comma(0), "0");
        assert_eq!(three_comma(999), "999");
        assert_eq!(three_comma(1_000), "1,000");
        assert_eq!(three_comma(1_234_567), "1,234,567");
    }

    #[test]
    fn toman_formatting_composes_grouping_and_digits() {
        assert_eq!(format_toman(8200), "۸,۲۰۰ تومان");
    }

    #[test]
    fn score_rounds_to_whole_percent() {
        assert_eq!(format_score(77.9), "۷۸٪");
        assert_eq!(format_score(0.0), "۰٪");
    }

    #[test]
    fn short_timestamp_keeps_date_and_clock() {
        assert_eq!(
            short_timestamp("2025-11-02T18:41:07.123Z"),
            "2025-11-02 18:41"
        );
        assert_eq!(short_timestamp("2025-11-02"), "2025-11-02");
    }

    #[test]
    fn feedback_band_edges() {
        assert_eq!(Feedback::for_score(95.0), Feedback::Excellent);
        assert_eq!(Feedback::for_score(90.0), Feedback::Good);
        assert_eq!(Feedback::for_score(75.0), Feedback::KeepPracticing);
        assert_eq!(Feedback::for_score(50.0), Feedback::NeedsWork);
        assert_eq!(Feedback::for_score(0.0), Feedback::NeedsWork);
    }
}
