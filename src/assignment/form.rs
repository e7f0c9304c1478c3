//! Salary structure assignment form state
//!
//! Selecting an employee triggers an asynchronous preference lookup. Each
//! selection issues a new ticket; a response is applied only if its ticket is
//! still the latest, so a slow lookup for a previous employee cannot overwrite
//! the filter for the current one.

use super::lookup::RegimePreferenceLookup;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    token: u64,
    employee: String,
}

impl LookupTicket {
    pub fn employee(&self) -> &str {
        &self.employee
    }
}

/// Case-sensitive substring filter on salary structure names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureFilter {
    pattern: String,
}

impl StructureFilter {
    pub fn new(pattern: impl Into<String>) -> Self {
        StructureFilter {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, structure: &str) -> bool {
        structure.contains(&self.pattern)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalaryStructureAssignment {
    employee: Option<String>,
    pub salary_structure: Option<String>,
    payroll_cost_centers: Vec<String>,
    filter: Option<StructureFilter>,
    latest_token: u64,
}

impl SalaryStructureAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee(&self) -> Option<&str> {
        self.employee.as_deref()
    }

    pub fn filter(&self) -> Option<&StructureFilter> {
        self.filter.as_ref()
    }

    pub fn payroll_cost_centers(&self) -> &[String] {
        &self.payroll_cost_centers
    }

    pub fn set_payroll_cost_centers(&mut self, cost_centers: Vec<String>) {
        self.payroll_cost_centers = cost_centers;
    }

    /// Change the selected employee. Any outstanding ticket becomes stale and
    /// the previous filter is dropped until the new lookup resolves. Returns
    /// the ticket to resolve, or `None` when the employee was cleared.
    pub fn select_employee(&mut self, employee: Option<String>) -> Option<LookupTicket> {
        self.latest_token += 1;
        self.filter = None;
        self.employee = employee.filter(|e| !e.trim().is_empty());

        match &self.employee {
            Some(employee) => Some(LookupTicket {
                token: self.latest_token,
                employee: employee.clone(),
            }),
            None => {
                self.payroll_cost_centers.clear();
                None
            }
        }
    }

    /// Apply a lookup response. Returns `false` if the ticket is stale and the
    /// response was discarded.
    pub fn apply_lookup(
        &mut self,
        ticket: &LookupTicket,
        response: anyhow::Result<Option<String>>,
    ) -> bool {
        if ticket.token != self.latest_token {
            log::debug!(
                "Discarding stale regime lookup for {} (token {}, latest {})",
                ticket.employee,
                ticket.token,
                self.latest_token
            );
            return false;
        }

        self.filter = match response {
            Ok(Some(preference)) => Some(StructureFilter::new(preference)),
            Ok(None) => None,
            Err(err) => {
                log::warn!(
                    "Could not look up tax regime preference for {}: {:#}",
                    ticket.employee,
                    err
                );
                None
            }
        };
        true
    }

    /// Select an employee and resolve the lookup in one step.
    pub async fn change_employee<L>(&mut self, lookup: &L, employee: Option<String>)
    where
        L: RegimePreferenceLookup + ?Sized,
    {
        if let Some(ticket) = self.select_employee(employee) {
            let response = lookup.tax_regime_preference(ticket.employee()).await;
            self.apply_lookup(&ticket, response);
        }
    }

    /// Structures the user may pick under the active filter, in input order.
    pub fn selectable<'a>(&self, structures: &'a [String]) -> Vec<&'a str> {
        structures
            .iter()
            .map(String::as_str)
            .filter(|s| self.filter.as_ref().map_or(true, |f| f.matches(s)))
            .collect()
    }
}
