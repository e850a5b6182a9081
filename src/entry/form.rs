//! The shared form payload, validation and markup for creating and editing
//! entries.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::html::{
    FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
    FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
};

use super::core::{Bank, Category, EntryDraft, EntryType};

/// The maximum length of an entry title.
const TITLE_MAX_LENGTH: usize = 100;

/// The maximum number of digits an amount may have in total.
const AMOUNT_MAX_DIGITS: usize = 10;

/// The maximum number of digits an amount may have after the decimal point.
const AMOUNT_MAX_DECIMAL_PLACES: usize = 2;

pub(super) const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]");

/// The raw data submitted by the entry create/edit forms.
///
/// All fields are kept as strings so that invalid submissions can be
/// re-rendered exactly as the user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    pub entry_type: String,
    pub bank: String,
    #[serde(default)]
    pub description: String,
}

impl EntryForm {
    /// Pre-fill the form from an existing entry for the edit page.
    pub fn from_entry(entry: &crate::entry::Entry) -> Self {
        Self {
            title: entry.title.clone(),
            amount: format!("{:.2}", entry.amount),
            date: entry
                .date
                .format(DATE_FORMAT)
                .unwrap_or_else(|_| entry.date.to_string()),
            category: entry.category.as_str().to_owned(),
            entry_type: entry.entry_type.as_str().to_owned(),
            bank: entry.bank.as_str().to_owned(),
            description: entry.description.clone(),
        }
    }
}

/// The per-field error messages produced by [validate_entry_form].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFormErrors {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub entry_type: Option<String>,
    pub bank: Option<String>,
}

impl EntryFormErrors {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.entry_type.is_none()
            && self.bank.is_none()
    }
}

fn validate_amount(raw_amount: &str) -> Result<f64, String> {
    let raw_amount = raw_amount.trim();

    if raw_amount.is_empty() {
        return Err("Amount must not be empty".to_owned());
    }

    if raw_amount.starts_with('-') {
        return Err("Amount must not be negative".to_owned());
    }

    let (whole, fraction) = raw_amount.split_once('.').unwrap_or((raw_amount, ""));

    // Only plain decimal notation. Rejecting everything else up front keeps
    // exponents ("9e99") and non-finite values ("inf", "nan") from slipping
    // past the digit count below.
    if !whole.bytes().all(|byte| byte.is_ascii_digit())
        || !fraction.bytes().all(|byte| byte.is_ascii_digit())
    {
        return Err("Amount must be a number".to_owned());
    }

    let digit_count = whole.len() + fraction.len();

    if digit_count > AMOUNT_MAX_DIGITS {
        return Err(format!("Amount must have at most {AMOUNT_MAX_DIGITS} digits"));
    }

    if fraction.len() > AMOUNT_MAX_DECIMAL_PLACES {
        return Err(format!(
            "Amount must have at most {AMOUNT_MAX_DECIMAL_PLACES} decimal places"
        ));
    }

    match raw_amount.parse::<f64>() {
        Ok(amount) if amount > 0.0 => Ok(amount),
        Ok(_) => Err("Amount must be greater than zero".to_owned()),
        Err(_) => Err("Amount must be a number".to_owned()),
    }
}

fn validate_date(raw_date: &str) -> Result<Date, String> {
    if raw_date.trim().is_empty() {
        return Err("Date must not be empty".to_owned());
    }

    Date::parse(raw_date.trim(), DATE_FORMAT)
        .map_err(|_| "Date must be a valid date in the format YYYY-MM-DD".to_owned())
}

/// Validate the raw form data, producing either a draft ready for persistence
/// or the per-field error messages to show the user.
///
/// The owner is deliberately absent from the draft: the request handler
/// assigns it from the authenticated user, never from the form.
pub fn validate_entry_form(form: &EntryForm) -> Result<EntryDraft, EntryFormErrors> {
    let mut errors = EntryFormErrors::default();

    let title = form.title.trim();
    if title.is_empty() {
        errors.title = Some("Title must not be empty".to_owned());
    } else if title.chars().count() > TITLE_MAX_LENGTH {
        errors.title = Some(format!("Title must be at most {TITLE_MAX_LENGTH} characters"));
    }

    let amount = match validate_amount(&form.amount) {
        Ok(amount) => Some(amount),
        Err(error) => {
            errors.amount = Some(error);
            None
        }
    };

    let date = match validate_date(&form.date) {
        Ok(date) => Some(date),
        Err(error) => {
            errors.date = Some(error);
            None
        }
    };

    let category = match form.category.parse::<Category>() {
        Ok(category) => Some(category),
        Err(_) => {
            errors.category = Some("Select a valid category".to_owned());
            None
        }
    };

    let entry_type = match form.entry_type.parse::<EntryType>() {
        Ok(entry_type) => Some(entry_type),
        Err(_) => {
            errors.entry_type = Some("Select a valid entry type".to_owned());
            None
        }
    };

    let bank = match form.bank.parse::<Bank>() {
        Ok(bank) => Some(bank),
        Err(_) => {
            errors.bank = Some("Select a valid bank".to_owned());
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All options are Some here since no field produced an error.
    Ok(EntryDraft {
        title: title.to_owned(),
        amount: amount.unwrap_or_default(),
        date: date.unwrap_or(Date::MIN),
        category: category.unwrap_or(Category::Other),
        entry_type: entry_type.unwrap_or(EntryType::Expense),
        bank: bank.unwrap_or(Bank::Cash),
        description: form.description.trim().to_owned(),
    })
}

fn field_error(error_message: Option<&str>) -> Markup {
    html! {
        @if let Some(error_message) = error_message
        {
            p class=(FORM_ERROR_STYLE) { (error_message) }
        }
    }
}

/// The form fields shared by the create and edit entry pages.
///
/// `form` holds the values to pre-fill, `errors` the validation messages to
/// show next to each field.
pub fn entry_form_fields(form: &EntryForm, errors: &EntryFormErrors) -> Markup {
    let is_expense = form.entry_type != EntryType::Income.as_str();

    html! {
        div
        {
            label for="title" class=(FORM_LABEL_STYLE) { "Title" }

            input
                name="title"
                id="title"
                type="text"
                maxlength=(TITLE_MAX_LENGTH)
                value=(form.title)
                required
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.title.as_deref()))
        }

        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Entry type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex items-center gap-3"
                {
                    input
                        name="entry_type"
                        id="entry-type-expense"
                        type="radio"
                        value=(EntryType::Expense.as_str())
                        checked[is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        (EntryType::Expense.label())
                    }
                }

                div class="flex items-center gap-3"
                {
                    input
                        name="entry_type"
                        id="entry-type-income"
                        type="radio"
                        value=(EntryType::Income.as_str())
                        checked[!is_expense]
                        required
                        tabindex="0"
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="entry-type-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        (EntryType::Income.label())
                    }
                }
            }

            (field_error(errors.entry_type.as_deref()))
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                placeholder="0.01"
                value=(form.amount)
                required
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.amount.as_deref()))
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(form.date)
                required
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE);

            (field_error(errors.date.as_deref()))
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="category"
                id="category"
                required
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in Category::ALL {
                    option
                        value=(category.as_str())
                        selected[form.category == category.as_str()]
                    {
                        (category.label())
                    }
                }
            }

            (field_error(errors.category.as_deref()))
        }

        div
        {
            label for="bank" class=(FORM_LABEL_STYLE) { "Bank" }

            select
                name="bank"
                id="bank"
                required
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for bank in Bank::ALL {
                    option
                        value=(bank.as_str())
                        selected[form.bank == bank.as_str()]
                    {
                        (bank.label())
                    }
                }
            }

            (field_error(errors.bank.as_deref()))
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=(form.description)
                tabindex="0"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod validation_tests {
    use time::macros::date;

    use crate::entry::core::{Bank, Category, EntryType};

    use super::{EntryForm, validate_entry_form};

    fn valid_form() -> EntryForm {
        EntryForm {
            title: "Lunch".to_owned(),
            amount: "12.30".to_owned(),
            date: "2025-10-05".to_owned(),
            category: "food".to_owned(),
            entry_type: "expense".to_owned(),
            bank: "cash".to_owned(),
            description: "Sandwich and coffee".to_owned(),
        }
    }

    #[test]
    fn valid_form_produces_draft() {
        let draft = validate_entry_form(&valid_form()).expect("want valid draft");

        assert_eq!(draft.title, "Lunch");
        assert_eq!(draft.amount, 12.3);
        assert_eq!(draft.date, date!(2025 - 10 - 05));
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.entry_type, EntryType::Expense);
        assert_eq!(draft.bank, Bank::Cash);
        assert_eq!(draft.description, "Sandwich and coffee");
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut form = valid_form();
        form.title = "   ".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.title.is_some());
        assert!(errors.amount.is_none());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let mut form = valid_form();
        form.title = "a".repeat(101);

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.title.is_some());
    }

    #[test]
    fn title_of_exactly_max_length_is_accepted() {
        let mut form = valid_form();
        form.title = "a".repeat(100);

        assert!(validate_entry_form(&form).is_ok());
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let mut form = valid_form();
        // 40 characters but 120 bytes.
        form.title = "予".repeat(40);

        assert!(validate_entry_form(&form).is_ok());

        form.title = "予".repeat(101);

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.title.is_some());
    }

    #[test]
    fn amount_with_too_many_digits_is_rejected() {
        let mut form = valid_form();
        form.amount = "123456789.99".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.amount.is_some());
    }

    #[test]
    fn amount_with_ten_digits_is_accepted() {
        let mut form = valid_form();
        form.amount = "12345678.99".to_owned();

        let draft = validate_entry_form(&form).expect("want valid draft");

        assert_eq!(draft.amount, 12345678.99);
    }

    #[test]
    fn amount_with_too_many_decimal_places_is_rejected() {
        let mut form = valid_form();
        form.amount = "1.234".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.amount.is_some());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut form = valid_form();
        form.amount = "-5.00".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.amount.is_some());
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let mut form = valid_form();
        form.amount = "12.3abc".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.amount.is_some());
    }

    #[test]
    fn exponent_notation_amount_is_rejected() {
        for raw_amount in ["9e99", "1E3", "1.2e4"] {
            let mut form = valid_form();
            form.amount = raw_amount.to_owned();

            let errors = validate_entry_form(&form)
                .expect_err(&format!("want error for amount {raw_amount:?}"));

            assert!(errors.amount.is_some());
        }
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        for raw_amount in ["inf", "infinity", "nan", "+5", "+inf"] {
            let mut form = valid_form();
            form.amount = raw_amount.to_owned();

            let errors = validate_entry_form(&form)
                .expect_err(&format!("want error for amount {raw_amount:?}"));

            assert!(errors.amount.is_some());
        }
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut form = valid_form();
        form.amount = "0.00".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.amount.is_some());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut form = valid_form();
        form.date = "05/10/2025".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.date.is_some());
    }

    #[test]
    fn impossible_date_is_rejected() {
        let mut form = valid_form();
        form.date = "2025-02-30".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.date.is_some());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut form = valid_form();
        form.category = "groceries".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.category.is_some());
    }

    #[test]
    fn unknown_entry_type_is_rejected() {
        let mut form = valid_form();
        form.entry_type = "transfer".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.entry_type.is_some());
    }

    #[test]
    fn unknown_bank_is_rejected() {
        let mut form = valid_form();
        form.bank = "bank3".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.bank.is_some());
    }

    #[test]
    fn multiple_invalid_fields_reported_together() {
        let mut form = valid_form();
        form.title = "".to_owned();
        form.amount = "abc".to_owned();
        form.date = "not-a-date".to_owned();

        let errors = validate_entry_form(&form).expect_err("want error");

        assert!(errors.title.is_some());
        assert!(errors.amount.is_some());
        assert!(errors.date.is_some());
    }
}

#[cfg(test)]
mod markup_tests {
    use scraper::{Html, Selector};

    use super::{EntryForm, EntryFormErrors, entry_form_fields};

    fn render(form: &EntryForm, errors: &EntryFormErrors) -> Html {
        let fields = entry_form_fields(form, errors);
        let markup = maud::html! { form { (fields) } };
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn fields_preserve_submitted_values() {
        let form = EntryForm {
            title: "Lunch".to_owned(),
            amount: "12.30".to_owned(),
            date: "2025-10-05".to_owned(),
            category: "food".to_owned(),
            entry_type: "expense".to_owned(),
            bank: "bank1".to_owned(),
            description: "Sandwich".to_owned(),
        };

        let document = render(&form, &EntryFormErrors::default());

        let title_selector = Selector::parse("input[name=title]").unwrap();
        let title = document.select(&title_selector).next().unwrap();
        assert_eq!(title.value().attr("value"), Some("Lunch"));

        let category_selector = Selector::parse("select[name=category] option[selected]").unwrap();
        let category = document.select(&category_selector).next().unwrap();
        assert_eq!(category.value().attr("value"), Some("food"));

        let bank_selector = Selector::parse("select[name=bank] option[selected]").unwrap();
        let bank = document.select(&bank_selector).next().unwrap();
        assert_eq!(bank.value().attr("value"), Some("bank1"));
    }

    #[test]
    fn income_type_is_checked_when_selected() {
        let form = EntryForm {
            entry_type: "income".to_owned(),
            ..Default::default()
        };

        let document = render(&form, &EntryFormErrors::default());

        let selector = Selector::parse("input[type=radio][name=entry_type]").unwrap();
        let inputs = document.select(&selector).collect::<Vec<_>>();
        assert_eq!(inputs.len(), 2, "want 2 entry type inputs");

        let checked = inputs
            .iter()
            .find(|input| input.value().attr("checked").is_some())
            .and_then(|input| input.value().attr("value"));
        assert_eq!(checked, Some("income"));
    }

    #[test]
    fn field_errors_are_rendered_next_to_fields() {
        let errors = EntryFormErrors {
            amount: Some("Amount must be a number".to_owned()),
            ..Default::default()
        };

        let document = render(&EntryForm::default(), &errors);

        let selector = Selector::parse("input#amount + p.text-red-500").unwrap();
        let error_nodes = document.select(&selector).collect::<Vec<_>>();
        assert_eq!(error_nodes.len(), 1, "want 1 amount error message");
    }
}
