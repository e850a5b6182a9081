//! Defines the route handler for the monthly charts page.
//!
//! Renders two ECharts visualizations for the selected month:
//! - A pie chart of expenses grouped by category
//! - A grouped bar chart of income and expenses per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with an HTML container and JavaScript initialization code.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints,
    entry::{Category, Entry, EntryFilter, get_entries},
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    report::{
        aggregation::{category_expense_totals, category_totals_by_type},
        month::{MonthQuery, ReportMonth, month_selector_form},
    },
    timezone::get_local_date,
    user::UserID,
};

/// A chart with its HTML container ID and ECharts configuration.
struct ReportChart {
    /// The HTML element ID to render the chart into.
    id: &'static str,
    /// The ECharts configuration as a JSON string.
    options: String,
}

/// The state needed for the charts page.
#[derive(Debug, Clone)]
pub struct ChartPageState {
    /// The database connection for managing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ChartPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the charts page for the month in the query parameters, defaulting
/// to the current month.
pub async fn get_chart_page(
    State(state): State<ChartPageState>,
    Extension(user_id): Extension<UserID>,
    Query(query_params): Query<MonthQuery>,
) -> Result<Response, Error> {
    let Some(today) = get_local_date(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Err(Error::InvalidTimezoneError(state.local_timezone.clone()));
    };

    let report_month = ReportMonth::resolve(&query_params, today);
    let (start_date, end_date) = report_month.date_range();

    let entries = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_entries(
            user_id,
            &EntryFilter::date_range(start_date, end_date),
            &connection,
        )
        .inspect_err(|error| tracing::error!("could not get entries: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::CHART_VIEW).into_html();
    let selector = month_selector_form(endpoints::CHART_VIEW, report_month, today.year());

    if entries.is_empty() {
        let content = html! {
            (nav_bar)

            div class=(PAGE_CONTAINER_STYLE)
            {
                (selector)

                p class="mt-6" data-empty-state="true"
                {
                    "No entries for " (report_month.label()) "."
                }
            }
        };

        return Ok(base("Charts", &[], &content).into_response());
    }

    let charts = build_charts(&entries, &report_month);
    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (selector)
            (chart_containers(&charts))
        }
    };
    let head_elements = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    Ok(base("Charts", &head_elements, &content).into_response())
}

fn build_charts(entries: &[Entry], report_month: &ReportMonth) -> Vec<ReportChart> {
    let mut charts = vec![ReportChart {
        id: "category-bar-chart",
        options: category_bar_chart(entries, report_month).to_string(),
    }];

    // The pie chart only makes sense when the month has expenses.
    let expense_totals = category_expense_totals(entries);
    if !expense_totals.is_empty() {
        charts.insert(
            0,
            ReportChart {
                id: "expense-pie-chart",
                options: expense_pie_chart(&expense_totals, report_month).to_string(),
            },
        );
    }

    charts
}

fn expense_pie_chart(expense_totals: &[(Category, f64)], report_month: &ReportMonth) -> Chart {
    let data = expense_totals
        .iter()
        .map(|(category, amount)| (*amount, category.label()))
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Expenses by category")
                .subtext(report_month.label()),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("0%"))
        .series(Pie::new().radius("55%").data(data))
}

fn category_bar_chart(entries: &[Entry], report_month: &ReportMonth) -> Chart {
    let totals_by_category = category_totals_by_type(entries);
    let labels = totals_by_category
        .iter()
        .map(|(category, _)| category.label().to_owned())
        .collect::<Vec<_>>();
    let incomes = totals_by_category
        .iter()
        .map(|(_, totals)| totals.income)
        .collect::<Vec<_>>();
    let expenses = totals_by_category
        .iter()
        .map(|(_, totals)| totals.expense)
        .collect::<Vec<_>>();

    Chart::new()
        .title(
            Title::new()
                .text("Income and expenses by category")
                .subtext(report_month.label()),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(Legend::new().bottom("0%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("12%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Income").data(incomes))
        .series(Bar::new().name("Expense").data(expenses))
}

/// Renders the HTML containers the charts are drawn into.
fn chart_containers(charts: &[ReportChart]) -> Markup {
    html! {
        section id="charts" class="w-full mx-auto mt-6"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div id=(chart.id) class="min-h-[380px] rounded dark:bg-gray-100" {}
                }
            }
        }
    }
}

/// Generates the JavaScript that initializes the ECharts instances and keeps
/// them sized to the page.
fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});
                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}
