//! The admin response matrix: a rectangular per-user/per-question view over
//! submitted answers, with search, status, and organizational filtering.

use serde::{Deserialize, Serialize};

use pulseform_types::{InputType, SelectOption, admin_display};

use crate::client::UserPermissions;

/// Placeholder cell text for a question the user never answered.
pub const NO_ANSWER_PLACEHOLDER: &str = "No answer provided";

/// One question column of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionColumn {
    pub id: String,
    pub text: String,
    pub input_type: InputType,
}

/// A user's place in the organizational hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub region: String,
    pub cluster: String,
    pub branch_name: String,
}

/// One stored answer, as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: String,
    pub answer: Option<String>,
}

/// One user's fetched response record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: String,
    pub user_name: String,
    pub department: String,
    pub role: String,
    #[serde(default)]
    pub branch: Option<Branch>,
    pub has_submitted: bool,
    pub has_manager_response: bool,
    #[serde(default)]
    pub question_responses: Vec<QuestionResponse>,
}

/// The admin endpoint's result for one form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponses {
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub form_department: String,
    #[serde(default)]
    pub questions: Vec<QuestionColumn>,
    #[serde(default)]
    pub user_responses: Vec<UserResponse>,
    /// Whether organizational (region/cluster/branch) filters apply to this
    /// form's audience.
    #[serde(default)]
    pub has_org_hierarchy: bool,
}

/// One formatted cell of the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub question_id: String,
    pub text: String,
    pub is_answered: bool,
}

/// One user row: the fetched record plus its fixed-order formatted cells.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub user: UserResponse,
    pub cells: Vec<Cell>,
}

/// Status filter over user rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Submitted,
    Pending,
    Reviewed,
    /// Only the caller's own row; offered only to callers without full
    /// visibility scope.
    MyResponse,
}

impl StatusFilter {
    /// The filter options offered to a caller with the given scope.
    pub fn options(permissions: &UserPermissions) -> Vec<SelectOption> {
        let mut options = vec![
            SelectOption::new("All", "all"),
            SelectOption::new("Submitted", "submitted"),
            SelectOption::new("Pending", "pending"),
            SelectOption::new("Reviewed", "reviewed"),
        ];
        if !permissions.can_view_all_departments {
            options.push(SelectOption::new("My Response Only", "myresponse"));
        }
        options
    }

    fn matches(self, user: &UserResponse, permissions: &UserPermissions) -> bool {
        match self {
            Self::All => true,
            Self::Submitted => user.has_submitted,
            Self::Pending => !user.has_submitted,
            Self::Reviewed => user.has_manager_response,
            Self::MyResponse => user.user_id == permissions.user_id,
        }
    }
}

/// Search and status criteria, combined with logical AND.
#[derive(Debug, Clone, Default)]
pub struct ResponseFilter {
    /// Case-insensitive substring over user name, department, and role.
    pub search_term: String,
    pub status: StatusFilter,
}

/// Aggregated, rectangular view of every user's answers to one form.
#[derive(Debug, Clone)]
pub struct ResponseMatrix {
    questions: Vec<QuestionColumn>,
    rows: Vec<UserRow>,
}

/// Row counts per submission status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub submitted: usize,
    pub pending: usize,
    pub reviewed: usize,
}

impl ResponseMatrix {
    /// Denormalize fetched responses into a rectangular matrix.
    ///
    /// Every row has exactly one cell per question, aligned to the form's
    /// question order rather than the order answers arrived in. Missing
    /// answers become placeholder cells, so the matrix shape never depends
    /// on how many answers a user actually submitted.
    pub fn build(questions: Vec<QuestionColumn>, users: Vec<UserResponse>) -> Self {
        let rows = users
            .into_iter()
            .map(|user| {
                let cells = questions
                    .iter()
                    .map(|question| {
                        let answer = user
                            .question_responses
                            .iter()
                            .find(|response| response.question_id == question.id)
                            .and_then(|response| response.answer.as_deref())
                            .filter(|answer| !answer.trim().is_empty());
                        match answer {
                            Some(answer) => Cell {
                                question_id: question.id.clone(),
                                text: admin_display(answer, question.input_type),
                                is_answered: true,
                            },
                            None => Cell {
                                question_id: question.id.clone(),
                                text: NO_ANSWER_PLACEHOLDER.to_string(),
                                is_answered: false,
                            },
                        }
                    })
                    .collect();
                UserRow { user, cells }
            })
            .collect();
        Self { questions, rows }
    }

    pub fn questions(&self) -> &[QuestionColumn] {
        &self.questions
    }

    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    /// Row counts per status, over the unfiltered matrix.
    pub fn status_counts(&self) -> StatusCounts {
        let users = self.rows.iter().map(|row| &row.user);
        StatusCounts {
            total: self.rows.len(),
            submitted: users.clone().filter(|user| user.has_submitted).count(),
            pending: users.clone().filter(|user| !user.has_submitted).count(),
            reviewed: users.filter(|user| user.has_manager_response).count(),
        }
    }

    /// Apply search, status, and optional organizational filters.
    pub fn filter<'a>(
        &'a self,
        filter: &ResponseFilter,
        org: Option<&OrgFilterState>,
        permissions: &UserPermissions,
    ) -> Vec<&'a UserRow> {
        let search = filter.search_term.to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                let user = &row.user;
                if !search.is_empty() {
                    let matches = user.user_name.to_lowercase().contains(&search)
                        || user.department.to_lowercase().contains(&search)
                        || user.role.to_lowercase().contains(&search);
                    if !matches {
                        return false;
                    }
                }
                if let Some(org) = org
                    && !org.matches(user)
                {
                    return false;
                }
                filter.status.matches(user, permissions)
            })
            .collect()
    }
}

/// Dependent region → cluster → branch filter selections.
///
/// Selecting a higher level recomputes the option sets of the levels below
/// it from only the users matching the selection, and clears any stale
/// lower-level selection outright.
#[derive(Debug, Clone, Default)]
pub struct OrgFilterState {
    region: Option<String>,
    cluster: Option<String>,
    branch: Option<String>,
    region_options: Vec<SelectOption>,
    cluster_options: Vec<SelectOption>,
    branch_options: Vec<SelectOption>,
}

impl OrgFilterState {
    /// Build the filter state with option sets derived from the users.
    pub fn new(users: &[UserResponse]) -> Self {
        let mut state = Self::default();
        state.region_options = with_all_option(
            "All Zones",
            collect_distinct(users, |branch| Some(&branch.region)),
        );
        state.recompute_dependents(users);
        state
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn region_options(&self) -> &[SelectOption] {
        &self.region_options
    }

    pub fn cluster_options(&self) -> &[SelectOption] {
        &self.cluster_options
    }

    pub fn branch_options(&self) -> &[SelectOption] {
        &self.branch_options
    }

    /// Select a region (empty clears). Cluster and branch selections reset
    /// and their option sets are recomputed from the matching users.
    pub fn select_region(&mut self, users: &[UserResponse], region: impl Into<String>) {
        self.region = non_empty(region.into());
        self.cluster = None;
        self.branch = None;
        self.recompute_dependents(users);
    }

    /// Select a cluster (empty clears). The branch selection resets and its
    /// option set is recomputed.
    pub fn select_cluster(&mut self, users: &[UserResponse], cluster: impl Into<String>) {
        self.cluster = non_empty(cluster.into());
        self.branch = None;
        self.recompute_dependents(users);
    }

    /// Select a branch (empty clears).
    pub fn select_branch(&mut self, branch: impl Into<String>) {
        self.branch = non_empty(branch.into());
    }

    /// Clear all three selections.
    pub fn reset(&mut self, users: &[UserResponse]) {
        self.region = None;
        self.cluster = None;
        self.branch = None;
        self.recompute_dependents(users);
    }

    fn recompute_dependents(&mut self, users: &[UserResponse]) {
        let region = self.region.clone();
        self.cluster_options = with_all_option(
            "All Clusters",
            collect_distinct(users, |branch| {
                (region.is_none() || region.as_deref() == Some(&branch.region))
                    .then_some(&branch.cluster)
            }),
        );

        let cluster = self.cluster.clone();
        self.branch_options = with_all_option(
            "All Branches",
            collect_distinct(users, |branch| {
                let region_ok = region.is_none() || region.as_deref() == Some(&branch.region);
                let cluster_ok = cluster.is_none() || cluster.as_deref() == Some(&branch.cluster);
                (region_ok && cluster_ok).then_some(&branch.branch_name)
            }),
        );
    }

    fn matches(&self, user: &UserResponse) -> bool {
        if self.region.is_none() && self.cluster.is_none() && self.branch.is_none() {
            return true;
        }
        // Any active selection excludes users outside the hierarchy.
        let Some(branch) = user.branch.as_ref() else {
            return false;
        };
        if let Some(region) = self.region.as_deref()
            && branch.region != region
        {
            return false;
        }
        if let Some(cluster) = self.cluster.as_deref()
            && branch.cluster != cluster
        {
            return false;
        }
        if let Some(name) = self.branch.as_deref()
            && branch.branch_name != name
        {
            return false;
        }
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn with_all_option(all_label: &str, values: Vec<String>) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new(all_label, "")];
    options.extend(values.into_iter().map(SelectOption::uniform));
    options
}

fn collect_distinct<'a>(
    users: &'a [UserResponse],
    pick: impl Fn(&'a Branch) -> Option<&'a String>,
) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for user in users {
        if let Some(branch) = user.branch.as_ref()
            && let Some(value) = pick(branch)
            && !value.is_empty()
            && !values.contains(value)
        {
            values.push(value.clone());
        }
    }
    values
}
