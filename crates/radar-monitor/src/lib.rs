//! Logging, report formatting and TUI dashboard.

mod chart;
mod dashboard;
mod format;
mod logging;
mod report;

pub use chart::{ChartRange, ChartSeries};
pub use dashboard::{Dashboard, DashboardAction, DashboardState};
pub use format::{
    format_change, format_correlation, format_currency, format_liquidity, format_price,
    RecentRow, Summary,
};
pub use logging::{setup_file_logging, setup_logging};
pub use report::render_report;
