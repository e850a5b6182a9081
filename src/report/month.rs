//! Month selection shared by the chart and summary pages.

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Month, util::days_in_year_month};

use crate::html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

/// The earliest year offered by the month selector.
const FIRST_SELECTABLE_YEAR: i32 = 2020;

/// The raw month/year query parameters.
///
/// Values are kept as strings so that malformed input falls back to the
/// current month instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
    pub year: Option<String>,
}

/// The month a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    pub year: i32,
    pub month: Month,
}

impl ReportMonth {
    /// Resolves the raw query parameters against today's date.
    ///
    /// Non-numeric or out-of-range values fall back to the current month and
    /// year.
    pub fn resolve(query: &MonthQuery, today: Date) -> Self {
        let year = query
            .year
            .as_deref()
            .and_then(|year| year.trim().parse::<i32>().ok())
            .filter(|year| (FIRST_SELECTABLE_YEAR..=9999).contains(year))
            .unwrap_or(today.year());

        let month = query
            .month
            .as_deref()
            .and_then(|month| month.trim().parse::<u8>().ok())
            .and_then(|month| Month::try_from(month).ok())
            .unwrap_or(today.month());

        Self { year, month }
    }

    /// The first and last day of the month, inclusive.
    pub fn date_range(&self) -> (Date, Date) {
        let last_day = days_in_year_month(self.year, self.month);
        let start =
            Date::from_calendar_date(self.year, self.month, 1).expect("invalid month start date");
        let end = Date::from_calendar_date(self.year, self.month, last_day)
            .expect("invalid month end date");

        (start, end)
    }

    /// A human readable label such as "October 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Renders a month and year selector that submits back to `action`,
/// retaining the selected month.
pub(super) fn month_selector_form(action: &str, selected: ReportMonth, latest_year: i32) -> Markup {
    let months = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];
    let latest_year = latest_year.max(selected.year);

    html! {
        form
            method="get"
            action=(action)
            class="flex flex-row gap-4 items-end"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select id="month" name="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for month in months {
                        option
                            value=(u8::from(month))
                            selected[selected.month == month]
                        {
                            (month)
                        }
                    }
                }
            }

            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Year" }

                select id="year" name="year" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for year in FIRST_SELECTABLE_YEAR..=latest_year {
                        option value=(year) selected[selected.year == year] { (year) }
                    }
                }
            }

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE) { "Show" }
        }
    }
}
