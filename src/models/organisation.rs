//! Unit and department lookup tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Label used when an employee's department or unit cannot be resolved.
pub const UNASSIGNED: &str = "Unassigned";

/// A business unit (site or client) that owns departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique identifier for the unit.
    pub id: String,
    /// Display name of the unit.
    pub name: String,
}

/// A department within a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department.
    pub id: String,
    /// Display name of the department.
    pub name: String,
    /// The unit this department belongs to.
    #[serde(default, alias = "unitId")]
    pub unit_id: Option<String>,
}

/// Where an employee sits in the unit/department hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Name of the unit.
    pub unit_name: String,
    /// Name of the department.
    pub department_name: String,
}

/// Lookup over the unit and department tables.
///
/// # Example
///
/// ```
/// use statutory_payroll::models::{Department, OrgDirectory, Unit};
///
/// let directory = OrgDirectory::new(
///     vec![Unit { id: "u1".to_string(), name: "Pune Plant".to_string() }],
///     vec![Department {
///         id: "d1".to_string(),
///         name: "Assembly".to_string(),
///         unit_id: Some("u1".to_string()),
///     }],
/// );
///
/// let placement = directory.placement(Some("d1"));
/// assert_eq!(placement.unit_name, "Pune Plant");
/// assert_eq!(placement.department_name, "Assembly");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrgDirectory {
    units: HashMap<String, Unit>,
    departments: HashMap<String, Department>,
}

impl OrgDirectory {
    /// Builds a directory from the unit and department tables.
    pub fn new(units: Vec<Unit>, departments: Vec<Department>) -> Self {
        Self {
            units: units.into_iter().map(|u| (u.id.clone(), u)).collect(),
            departments: departments.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Looks up a department by id.
    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.get(id)
    }

    /// Looks up a unit by id.
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    /// Resolves the unit and department names for a department id.
    ///
    /// Unknown or missing ids resolve to [`UNASSIGNED`].
    pub fn placement(&self, department_id: Option<&str>) -> Placement {
        let department = department_id.and_then(|id| self.department(id));
        let unit = department
            .and_then(|d| d.unit_id.as_deref())
            .and_then(|id| self.unit(id));

        Placement {
            unit_name: unit.map_or(UNASSIGNED, |u| u.name.as_str()).to_string(),
            department_name: department
                .map_or(UNASSIGNED, |d| d.name.as_str())
                .to_string(),
        }
    }
}
