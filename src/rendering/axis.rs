//! Date-to-pixel mapping and month tick generation

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Task;

/// One monthly gridline on the time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub x: f64,
    /// Month label, e.g. "Jan '24"
    pub label: String,
}

/// Affine mapping from calendar dates to horizontal pixel positions
///
/// The domain runs from the earliest task start to the latest task end.
/// A project collapsing to a single date degenerates to a one-day domain
/// so the scale stays finite; later dates always map strictly further
/// right.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxisMapper {
    domain_start: NaiveDate,
    domain_end: NaiveDate,
    left: f64,
    units_per_day: f64,
}

impl TimeAxisMapper {
    /// Build a mapper over an explicit date domain and pixel span
    ///
    /// A reversed range collapses to the one-day domain at `domain_start`.
    pub fn new(domain_start: NaiveDate, domain_end: NaiveDate, left: f64, right: f64) -> Self {
        let domain_end = domain_end.max(domain_start);
        let span_days = (domain_end - domain_start).num_days().max(1);
        Self {
            domain_start,
            domain_end,
            left,
            units_per_day: (right - left) / span_days as f64,
        }
    }

    /// Derive the domain from a task list
    ///
    /// Fails with [`Error::EmptyProject`] for an empty list and with
    /// [`Error::InvalidDate`] when any end date falls outside the
    /// supported calendar range.
    pub fn from_tasks(tasks: &[Task], left: f64, right: f64) -> Result<Self> {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for task in tasks {
            let end = task.end_date()?;
            bounds = Some(match bounds {
                None => (task.start_date, end),
                Some((lo, hi)) => (lo.min(task.start_date), hi.max(end)),
            });
        }
        match bounds {
            Some((lo, hi)) => Ok(Self::new(lo, hi, left, right)),
            None => Err(Error::EmptyProject),
        }
    }

    /// Horizontal position of `date` in page pixels
    pub fn x(&self, date: NaiveDate) -> f64 {
        self.left + (date - self.domain_start).num_days() as f64 * self.units_per_day
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.domain_start, self.domain_end)
    }

    /// True when `date` falls inside the chart's date domain
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.domain_start <= date && date <= self.domain_end
    }

    pub fn units_per_day(&self) -> f64 {
        self.units_per_day
    }

    /// One tick per month the domain touches, on the first of the month
    ///
    /// Partial boundary months are included, so the first tick can land
    /// left of the plot area; the painter clips it.
    pub fn month_ticks(&self) -> Vec<AxisTick> {
        let mut ticks = Vec::new();
        let mut year = self.domain_start.year();
        let mut month = self.domain_start.month();
        let last = (self.domain_end.year(), self.domain_end.month());
        loop {
            if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
                ticks.push(AxisTick {
                    date: first,
                    x: self.x(first),
                    label: first.format("%b '%y").to_string(),
                });
            }
            if (year, month) == last {
                break;
            }
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        ticks
    }
}
