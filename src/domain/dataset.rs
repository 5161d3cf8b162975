use crate::domain::column::{ColumnSpec, Renderer};
use crate::domain::user::Role;
use crate::utils::error::ScerosError;
use std::fmt;
use std::str::FromStr;

/// A table-backed fixture collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Areas,
    Alerts,
    Users,
    Recommendations,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Areas,
        Dataset::Alerts,
        Dataset::Users,
        Dataset::Recommendations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Areas => "areas",
            Dataset::Alerts => "alerts",
            Dataset::Users => "users",
            Dataset::Recommendations => "recommendations",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }

    /// Field holding the area id used to scope rows to a user's assigned
    /// areas. Users are never area-scoped.
    pub fn area_field(&self) -> Option<&'static str> {
        match self {
            Dataset::Areas => Some("id"),
            Dataset::Alerts | Dataset::Recommendations => Some("areaId"),
            Dataset::Users => None,
        }
    }

    pub fn visible_to(&self, role: Role) -> bool {
        match self {
            Dataset::Users => role == Role::Admin,
            Dataset::Areas | Dataset::Alerts | Dataset::Recommendations => true,
        }
    }

    pub fn columns(&self) -> Vec<ColumnSpec> {
        match self {
            Dataset::Areas => vec![
                ColumnSpec::new("name", "Name"),
                ColumnSpec::new("type", "Type"),
                ColumnSpec::new("electricity", "Electricity (kWh)").not_filterable(),
                ColumnSpec::new("water", "Water (L)").not_filterable(),
                ColumnSpec::new("hvac", "HVAC (BTU)").not_filterable(),
                ColumnSpec::new("status", "Status").with_renderer(Renderer::Badge),
                ColumnSpec::new("lastUpdated", "Last Updated")
                    .not_filterable()
                    .with_renderer(Renderer::DateTime),
            ],
            Dataset::Alerts => vec![
                ColumnSpec::new("area", "Area"),
                ColumnSpec::new("type", "Type")
                    .with_filter_options(["electricity", "water", "hvac"]),
                ColumnSpec::new("value", "Value").not_filterable(),
                ColumnSpec::new("threshold", "Threshold").not_filterable(),
                ColumnSpec::new("severity", "Severity")
                    .with_filter_options(["High", "Medium", "Low", "Info"])
                    .with_renderer(Renderer::Badge),
                ColumnSpec::new("status", "Status")
                    .with_filter_options(["Unresolved", "Resolved"])
                    .with_renderer(Renderer::Badge),
                ColumnSpec::new("timestamp", "Time")
                    .not_filterable()
                    .with_renderer(Renderer::DateTime),
                ColumnSpec::new("assignedTo", "Assigned To"),
            ],
            Dataset::Users => vec![
                ColumnSpec::new("name", "Name"),
                ColumnSpec::new("email", "Email"),
                ColumnSpec::new("role", "Role").with_filter_options(
                    Role::ALL.iter().map(|r| r.label()),
                ),
                ColumnSpec::new("status", "Status")
                    .with_filter_options(["Active", "Inactive"])
                    .with_renderer(Renderer::Badge),
                ColumnSpec::new("lastLogin", "Last Login")
                    .not_filterable()
                    .with_renderer(Renderer::DateTime),
                ColumnSpec::new("assignedAreas", "Areas")
                    .not_sortable()
                    .not_filterable()
                    .with_renderer(Renderer::Count {
                        unit: "areas".to_string(),
                    }),
            ],
            Dataset::Recommendations => vec![
                ColumnSpec::new("area", "Area"),
                ColumnSpec::new("category", "Category"),
                ColumnSpec::new("suggestion", "Suggestion").not_filterable(),
                ColumnSpec::new("priority", "Priority")
                    .with_filter_options(["High", "Medium", "Low"])
                    .with_renderer(Renderer::Badge),
                ColumnSpec::new("estimatedSavings", "Est. Savings")
                    .not_filterable()
                    .with_renderer(Renderer::Currency),
                ColumnSpec::new("implementationCost", "Cost")
                    .not_filterable()
                    .with_renderer(Renderer::Currency),
                ColumnSpec::new("status", "Status").with_renderer(Renderer::Badge),
            ],
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = ScerosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScerosError::UnknownDataset {
                name: s.to_string(),
            })
    }
}
