//! The previous-forms catalog: department/month/year filtering scoped to
//! the caller's visibility.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use pulseform_types::SelectOption;

use crate::client::{FeedbackClient, UserPermissions};

/// How many years back the year filter offers.
const YEAR_FILTER_SPAN: i32 = 5;

fn month_name(month: u32) -> Option<&'static str> {
    Month::try_from(month as u8).ok().map(|month| month.name())
}

/// One previously created form, as listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub id: String,
    pub name: String,
    pub department: String,
    #[serde(default)]
    pub applicable_month: Option<NaiveDate>,
}

/// A listed form with its month split out for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSummary {
    pub record: FormRecord,
    pub month_name: Option<String>,
    pub year: Option<i32>,
}

impl FormSummary {
    fn new(record: FormRecord) -> Self {
        let month_name = record
            .applicable_month
            .and_then(|date| month_name(date.month()))
            .map(str::to_string);
        let year = record.applicable_month.map(|date| date.year());
        Self {
            record,
            month_name,
            year,
        }
    }
}

/// Filter criteria for listing forms. Zero month/year means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub year: i32,
}

/// Lists previously created forms, with the department filter pinned for
/// callers without cross-department visibility.
#[derive(Debug, Clone, Default)]
pub struct FormCatalog {
    permissions: UserPermissions,
    filter: CatalogFilter,
    forms: Vec<FormSummary>,
    loaded: bool,
}

impl FormCatalog {
    /// Build the catalog for the given caller scope. Department-scoped
    /// callers have their department pinned as the filter.
    pub fn new(permissions: UserPermissions) -> Self {
        let department = (!permissions.can_view_all_departments)
            .then(|| permissions.user_department.clone());
        Self {
            permissions,
            filter: CatalogFilter {
                department,
                ..CatalogFilter::default()
            },
            forms: Vec::new(),
            loaded: false,
        }
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn forms(&self) -> &[FormSummary] {
        &self.forms
    }

    /// Select a department (empty or "All" clears). Ignored for callers
    /// pinned to their own department.
    pub fn set_department(&mut self, department: impl Into<String>) {
        if !self.permissions.can_view_all_departments {
            return;
        }
        let department = department.into();
        self.filter.department =
            (!department.is_empty() && department != "All").then_some(department);
    }

    /// Select a month, 1-12; 0 clears.
    pub fn set_month(&mut self, month: u32) {
        self.filter.month = if (1..=12).contains(&month) { month } else { 0 };
    }

    /// Select a year; 0 clears.
    pub fn set_year(&mut self, year: i32) {
        self.filter.year = year;
    }

    /// Fetch the forms matching the current filter.
    pub fn load<C: FeedbackClient>(&mut self, client: &C) -> Result<(), C::Error> {
        let records = client.forms_for_user(&self.filter)?;
        self.forms = records.into_iter().map(FormSummary::new).collect();
        self.loaded = true;
        Ok(())
    }

    /// The empty-state message for the current filter, or `None` while
    /// forms are present.
    pub fn no_forms_message(&self) -> Option<String> {
        if !self.loaded {
            return Some("Loading forms...".to_string());
        }
        if !self.forms.is_empty() {
            return None;
        }
        let mut message = "No forms found".to_string();
        if let Some(department) = self.filter.department.as_deref() {
            message.push_str(&format!(" for {department} department"));
        }
        if let Some(name) = month_name(self.filter.month) {
            message.push_str(&format!(" in {name}"));
        }
        if self.filter.year != 0 {
            message.push_str(&format!(" for {}", self.filter.year));
        }
        message.push('.');
        Some(message)
    }

    /// "All Months" plus the twelve months.
    pub fn month_options() -> Vec<SelectOption> {
        let mut options = vec![SelectOption::new("All Months", "0")];
        for month in 1..=12u32 {
            if let Some(name) = month_name(month) {
                options.push(SelectOption::new(name, month.to_string()));
            }
        }
        options
    }

    /// "All Years" plus the last five years, newest first.
    pub fn year_options(current_year: i32) -> Vec<SelectOption> {
        let mut options = vec![SelectOption::new("All Years", "0")];
        for year in (current_year - YEAR_FILTER_SPAN + 1..=current_year).rev() {
            options.push(SelectOption::uniform(year.to_string()));
        }
        options
    }

    /// Department options for the caller's scope.
    pub fn department_options(&self) -> Vec<SelectOption> {
        if self.permissions.can_view_all_departments {
            vec![
                SelectOption::new("All", "All"),
                SelectOption::uniform("Sales"),
                SelectOption::uniform("Marketing"),
                SelectOption::uniform("Technical"),
            ]
        } else {
            vec![SelectOption::uniform(
                self.permissions.user_department.clone(),
            )]
        }
    }

    /// Label describing the caller's visibility scope.
    pub fn access_level_label(&self) -> String {
        if self.permissions.can_view_all_departments {
            "Executive Access - All Departments".to_string()
        } else {
            format!(
                "Department Access - {}",
                self.permissions.user_department
            )
        }
    }
}
