//! The standard lookback periods offered when picking a custom graph window.

use serde::Serialize;

use crate::i18n::Translate;

/// Seconds in one hour.
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// How a period label is built from translatable text.
enum Label {
    /// The whole phrase is translated, e.g. "1 day".
    Phrase(&'static str),
    /// The count is kept and the unit translated, e.g. "6 " + "hours".
    Hours,
}

const STANDARD_PERIODS: [(u32, Label); 10] = [
    (1, Label::Phrase("1 hour")),
    (2, Label::Hours),
    (3, Label::Hours),
    (6, Label::Hours),
    (12, Label::Hours),
    (24, Label::Phrase("1 day")),
    (48, Label::Phrase("2 days")),
    (360, Label::Phrase("1 week")),
    (720, Label::Phrase("1 month")),
    (4320, Label::Phrase("6 months")),
];

/// One selectable period: an hour count and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardPeriod {
    pub hours: u32,
    pub label: String,
}

impl StandardPeriod {
    /// The period as a lookback window in seconds.
    pub fn seconds(&self) -> i64 {
        i64::from(self.hours) * SECONDS_PER_HOUR
    }
}

/// List the standard periods in ascending order of hours.
///
/// # Example
///
/// ```
/// use custom_graphs::i18n::Untranslated;
/// use custom_graphs::periods::list_standard_periods;
///
/// let periods = list_standard_periods(&Untranslated);
/// assert_eq!(periods.len(), 10);
/// assert_eq!(periods[5].label, "1 day");
/// ```
pub fn list_standard_periods(translator: &dyn Translate) -> Vec<StandardPeriod> {
    STANDARD_PERIODS
        .iter()
        .map(|(hours, label)| StandardPeriod {
            hours: *hours,
            label: match label {
                Label::Phrase(phrase) => translator.translate(phrase),
                Label::Hours => format!("{} {}", hours, translator.translate("hours")),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{CatalogTranslations, Untranslated};

    #[test]
    fn test_exact_hours_in_ascending_order() {
        let hours: Vec<u32> = list_standard_periods(&Untranslated)
            .iter()
            .map(|p| p.hours)
            .collect();

        assert_eq!(hours, vec![1, 2, 3, 6, 12, 24, 48, 360, 720, 4320]);
    }

    #[test]
    fn test_english_labels() {
        let labels: Vec<String> = list_standard_periods(&Untranslated)
            .into_iter()
            .map(|p| p.label)
            .collect();

        assert_eq!(
            labels,
            vec![
                "1 hour", "2 hours", "3 hours", "6 hours", "12 hours", "1 day", "2 days",
                "1 week", "1 month", "6 months"
            ]
        );
    }

    #[test]
    fn test_translated_labels_keep_counts() {
        let spanish = CatalogTranslations::new()
            .with_entry("hours", "horas")
            .with_entry("1 day", "1 día");

        let periods = list_standard_periods(&spanish);
        assert_eq!(periods[3].label, "6 horas");
        assert_eq!(periods[5].label, "1 día");
        assert_eq!(periods[0].label, "1 hour");
    }

    #[test]
    fn test_seconds() {
        let periods = list_standard_periods(&Untranslated);
        assert_eq!(periods[0].seconds(), 3_600);
        assert_eq!(periods[5].seconds(), 86_400);
    }
}
