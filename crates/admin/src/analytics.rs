//! Revenue analytics.
//!
//! The backend has no revenue endpoint yet, so the figures are a fixed
//! dataset. Everything derived from it (totals, averages, growth) is
//! computed here with decimal arithmetic.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use selam_core::Money;

/// One month of figures, in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    pub revenue: i64,
    pub expenses: i64,
    pub profit: i64,
    pub clients: u32,
}

/// Share of annual revenue per service line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRevenue {
    pub service: &'static str,
    pub percent: u8,
    pub revenue: i64,
}

/// Revenue and growth for one quarter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterlyGrowth {
    pub quarter: &'static str,
    pub revenue: i64,
    pub growth_percent: f64,
}

/// A client ranked by revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopClient {
    pub name: &'static str,
    pub revenue: i64,
    pub projects: u32,
    pub status: &'static str,
}

const fn month(
    month: &'static str,
    revenue: i64,
    expenses: i64,
    profit: i64,
    clients: u32,
) -> MonthlyRevenue {
    MonthlyRevenue {
        month,
        revenue,
        expenses,
        profit,
        clients,
    }
}

pub const MONTHLY_REVENUE: [MonthlyRevenue; 12] = [
    month("Jan", 85_000, 45_000, 40_000, 12),
    month("Feb", 92_000, 48_000, 44_000, 15),
    month("Mar", 78_000, 42_000, 36_000, 11),
    month("Apr", 105_000, 52_000, 53_000, 18),
    month("May", 118_000, 58_000, 60_000, 22),
    month("Jun", 124_000, 61_000, 63_000, 25),
    month("Jul", 132_000, 65_000, 67_000, 28),
    month("Aug", 128_000, 63_000, 65_000, 26),
    month("Sep", 145_000, 70_000, 75_000, 32),
    month("Oct", 138_000, 68_000, 70_000, 30),
    month("Nov", 152_000, 74_000, 78_000, 35),
    month("Dec", 165_000, 80_000, 85_000, 38),
];

pub const REVENUE_BY_SERVICE: [ServiceRevenue; 4] = [
    ServiceRevenue { service: "Web Development", percent: 45, revenue: 540_000 },
    ServiceRevenue { service: "Mobile Apps", percent: 25, revenue: 300_000 },
    ServiceRevenue { service: "Consulting", percent: 20, revenue: 240_000 },
    ServiceRevenue { service: "Maintenance", percent: 10, revenue: 120_000 },
];

pub const QUARTERLY_GROWTH: [QuarterlyGrowth; 5] = [
    QuarterlyGrowth { quarter: "Q1 2023", revenue: 255_000, growth_percent: 8.5 },
    QuarterlyGrowth { quarter: "Q2 2023", revenue: 347_000, growth_percent: 12.3 },
    QuarterlyGrowth { quarter: "Q3 2023", revenue: 405_000, growth_percent: 15.2 },
    QuarterlyGrowth { quarter: "Q4 2023", revenue: 455_000, growth_percent: 18.7 },
    QuarterlyGrowth { quarter: "Q1 2024", revenue: 520_000, growth_percent: 22.1 },
];

pub const TOP_CLIENTS: [TopClient; 5] = [
    TopClient { name: "TechCorp Inc.", revenue: 85_000, projects: 3, status: "active" },
    TopClient { name: "StartupXYZ", revenue: 72_000, projects: 2, status: "active" },
    TopClient { name: "Enterprise Solutions", revenue: 68_000, projects: 4, status: "completed" },
    TopClient { name: "Digital Ventures", revenue: 55_000, projects: 2, status: "active" },
    TopClient { name: "Innovation Labs", revenue: 48_000, projects: 1, status: "active" },
];

/// Window of months the report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeRange {
    ThreeMonths,
    SixMonths,
    #[default]
    TwelveMonths,
}

impl TimeRange {
    #[must_use]
    pub const fn months(self) -> usize {
        match self {
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeMonths => "Last 3 Months",
            Self::SixMonths => "Last 6 Months",
            Self::TwelveMonths => "Last 12 Months",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unknown time range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown time range {0:?}; expected 3months, 6months or 12months")]
pub struct TimeRangeParseError(String);

impl FromStr for TimeRange {
    type Err = TimeRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3" | "3months" => Ok(Self::ThreeMonths),
            "6" | "6months" => Ok(Self::SixMonths),
            "12" | "12months" => Ok(Self::TwelveMonths),
            _ => Err(TimeRangeParseError(s.to_owned())),
        }
    }
}

/// Figures for one time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueReport {
    pub range: TimeRange,
    pub months: &'static [MonthlyRevenue],
    pub total_revenue: Money,
    pub total_profit: Money,
    pub average_revenue: Money,
    /// Last month over the month before, in percent, one decimal place.
    pub growth_percent: Decimal,
    /// Profit over revenue, in percent, one decimal place.
    pub profit_margin_percent: Decimal,
    /// Clients in the most recent month.
    pub active_clients: u32,
}

impl RevenueReport {
    #[must_use]
    pub fn compute(range: TimeRange) -> Self {
        Self::from_months(range, &MONTHLY_REVENUE)
    }

    /// Report over the trailing `range` of `data`.
    #[must_use]
    pub fn from_months(range: TimeRange, data: &'static [MonthlyRevenue]) -> Self {
        let months = data
            .get(data.len().saturating_sub(range.months())..)
            .unwrap_or_default();

        let total_revenue: Decimal = months.iter().map(|m| Decimal::from(m.revenue)).sum();
        let total_profit: Decimal = months.iter().map(|m| Decimal::from(m.profit)).sum();
        let average = if months.is_empty() {
            Decimal::ZERO
        } else {
            total_revenue / Decimal::from(months.len())
        };

        let growth_percent = match months {
            [.., previous, last] if previous.revenue != 0 => percent(
                Decimal::from(last.revenue - previous.revenue),
                Decimal::from(previous.revenue),
            ),
            _ => Decimal::ZERO,
        };
        let profit_margin_percent = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            percent(total_profit, total_revenue)
        };

        Self {
            range,
            months,
            total_revenue: Money::new(total_revenue, selam_core::CurrencyCode::USD),
            total_profit: Money::new(total_profit, selam_core::CurrencyCode::USD),
            average_revenue: Money::new(average, selam_core::CurrencyCode::USD),
            growth_percent,
            profit_margin_percent,
            active_clients: months.last().map_or(0, |m| m.clients),
        }
    }
}

fn percent(part: Decimal, whole: Decimal) -> Decimal {
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_month_report() {
        let report = RevenueReport::compute(TimeRange::TwelveMonths);
        assert_eq!(report.months.len(), 12);
        assert_eq!(report.total_revenue.compact(), "$1462K");
        assert_eq!(report.total_profit.compact(), "$736K");
        assert_eq!(report.average_revenue.compact(), "$122K");
        assert_eq!(report.growth_percent, Decimal::new(86, 1));
        assert_eq!(report.profit_margin_percent, Decimal::new(503, 1));
        assert_eq!(report.active_clients, 38);
    }

    #[test]
    fn test_three_month_window() {
        let report = RevenueReport::compute(TimeRange::ThreeMonths);
        assert_eq!(report.months[0].month, "Oct");
        assert_eq!(report.total_revenue.compact(), "$455K");
        assert_eq!(report.average_revenue.compact(), "$152K");
        // Growth always compares the two most recent months.
        assert_eq!(report.growth_percent, Decimal::new(86, 1));
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!("6months".parse::<TimeRange>().unwrap(), TimeRange::SixMonths);
        assert_eq!("3".parse::<TimeRange>().unwrap(), TimeRange::ThreeMonths);
        assert!("2years".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_service_shares_sum_to_hundred() {
        let total: u32 = REVENUE_BY_SERVICE.iter().map(|s| u32::from(s.percent)).sum();
        assert_eq!(total, 100);
    }
}
