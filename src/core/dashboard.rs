use crate::adapters::fixtures::FixtureSet;
use crate::core::actions;
use crate::core::metrics::{
    aggregate_usage, assigned_to, count_with_status, series_for, system_metrics, total_usage,
    usage_status, usage_trend, Resource, SystemMetrics, Thresholds, UsagePoint, UsageStatus,
};
use crate::core::session::{AuthSession, MockPasswordVerifier};
use crate::domain::dataset::Dataset;
use crate::domain::model::{EntityId, Record};
use crate::domain::navigation::{Access, Route};
use crate::domain::ports::{ConfigProvider, CredentialVerifier, KeyValueStore};
use crate::domain::state::ViewState;
use crate::domain::user::{Role, User};
use crate::utils::error::{Result, ScerosError};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub resource: Resource,
    pub total: f64,
    pub unit: &'static str,
    pub trend: i64,
    pub status: UsageStatus,
}

/// Headline figures of the signed-in user's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_name: String,
    pub role: Role,
    pub home: &'static str,
    pub area_count: usize,
    pub resources: Vec<ResourceSummary>,
    pub unresolved_alerts: usize,
    pub resolved_alerts: usize,
    pub recommendations: usize,
    pub high_priority_recommendations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemMetrics>,
}

/// Fixture data plus the login session, with role-aware access to both.
pub struct Dashboard<S: KeyValueStore, V: CredentialVerifier> {
    fixtures: FixtureSet,
    session: AuthSession<S, V>,
    thresholds: Thresholds,
    page_size: usize,
}

impl<S: KeyValueStore> Dashboard<S, MockPasswordVerifier> {
    /// Loads fixtures named by `config` and restores any stored session.
    pub fn open<C: ConfigProvider>(config: &C, store: S) -> Result<Self> {
        let fixtures = FixtureSet::load(config.fixtures_dir())?;
        let users = fixtures.user_accounts()?;
        let session = AuthSession::new(
            store,
            MockPasswordVerifier::new(config.mock_password()),
            users,
        )
        .with_key(config.session_key());

        let mut dashboard = Self::new(fixtures, session, config.thresholds(), config.page_size());
        dashboard.session.restore()?;
        Ok(dashboard)
    }
}

impl<S: KeyValueStore, V: CredentialVerifier> Dashboard<S, V> {
    pub fn new(
        fixtures: FixtureSet,
        session: AuthSession<S, V>,
        thresholds: Thresholds,
        page_size: usize,
    ) -> Self {
        Self {
            fixtures,
            session,
            thresholds,
            page_size,
        }
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        self.session.login(email, password)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    /// Where the root route sends the current user.
    pub fn home(&self) -> Route {
        match Route::Root.guard(self.session.user()) {
            Access::Redirect(route) => route,
            Access::Allow => Route::Root,
        }
    }

    pub fn initial_state(&self) -> ViewState {
        ViewState::new(self.page_size)
    }

    /// Rows of `dataset` the current user may see. Student and Faculty
    /// accounts only get rows tied to their assigned areas.
    pub fn records_for(&self, dataset: Dataset) -> Result<Vec<Record>> {
        let user = self.session.require_user()?;
        if !dataset.visible_to(user.role) {
            tracing::warn!("{} denied access to {}", user.email, dataset);
            return Err(ScerosError::AccessDenied {
                role: user.role.to_string(),
                resource: dataset.to_string(),
            });
        }

        let records = self.fixtures.records(dataset);
        let scoped = match dataset.area_field() {
            Some(field) if user.role.is_area_scoped() => assigned_to(records, user, field)
                .into_iter()
                .cloned()
                .collect(),
            _ => records.to_vec(),
        };
        tracing::debug!("{} rows of {} visible to {}", scoped.len(), dataset, user.email);
        Ok(scoped)
    }

    pub fn summary(&self) -> Result<DashboardSummary> {
        self.summary_for_area(None)
    }

    /// Like [`Dashboard::summary`], with trends taken from `area` when one is
    /// selected.
    pub fn summary_for_area(&self, area: Option<&EntityId>) -> Result<DashboardSummary> {
        let user = self.session.require_user()?;
        let areas = self.records_for(Dataset::Areas)?;
        let alerts = self.records_for(Dataset::Alerts)?;
        let recommendations = self.records_for(Dataset::Recommendations)?;

        let history = match area {
            Some(id) => self.area_usage(id)?,
            None => self.usage_history(user, &areas),
        };
        let totals = total_usage(&areas);
        let resources = Resource::ALL
            .into_iter()
            .map(|resource| {
                let total = totals.get(resource);
                ResourceSummary {
                    resource,
                    total,
                    unit: resource.unit(),
                    trend: usage_trend(&history, resource),
                    status: usage_status(total, self.thresholds.get(resource)),
                }
            })
            .collect();

        let system = if user.role == Role::Admin {
            let accounts = self.fixtures.user_accounts()?;
            Some(system_metrics(&accounts, &self.fixtures.areas, &self.fixtures.alerts))
        } else {
            None
        };

        Ok(DashboardSummary {
            user_name: user.name.clone(),
            role: user.role,
            home: user.role.home_route().path(),
            area_count: areas.len(),
            resources,
            unresolved_alerts: count_with_status(&alerts, "Unresolved"),
            resolved_alerts: count_with_status(&alerts, "Resolved"),
            recommendations: recommendations.len(),
            high_priority_recommendations: recommendations
                .iter()
                .filter(|r| r.str("priority") == Some("High"))
                .count(),
            system,
        })
    }

    /// Daily usage of one area the current user can see. An area without
    /// history yields an empty series.
    pub fn area_usage(&self, area: &EntityId) -> Result<Vec<UsagePoint>> {
        let visible = self.records_for(Dataset::Areas)?;
        if !visible.iter().any(|a| a.id().as_ref() == Some(area)) {
            let user = self.session.require_user()?;
            return Err(if find_by_id(&self.fixtures.areas, area).is_some() {
                ScerosError::AccessDenied {
                    role: user.role.to_string(),
                    resource: format!("area {}", area),
                }
            } else {
                not_found(Dataset::Areas, area)
            });
        }
        Ok(series_for(&self.fixtures.usage, area)
            .map(|series| series.data.clone())
            .unwrap_or_default())
    }

    /// Marks an alert resolved in this dashboard's copy of the alerts.
    pub fn resolve_alert(&mut self, id: &EntityId) -> Result<()> {
        self.require_role(Role::FacilityManager, Dataset::Alerts)?;
        self.fixtures.alerts = actions::resolve_alert(&self.fixtures.alerts, id, Utc::now())
            .ok_or_else(|| not_found(Dataset::Alerts, id))?;
        tracing::info!("Alert {} resolved", id);
        Ok(())
    }

    pub fn toggle_user_status(&mut self, id: &EntityId) -> Result<()> {
        self.require_role(Role::Admin, Dataset::Users)?;
        self.fixtures.users = actions::toggle_user_status(&self.fixtures.users, id)
            .ok_or_else(|| not_found(Dataset::Users, id))?;
        tracing::info!("Toggled status of user {}", id);
        Ok(())
    }

    /// Removes the user row from the users dataset. Sign-in accounts are
    /// left as loaded.
    pub fn delete_user(&mut self, id: &EntityId) -> Result<()> {
        self.require_role(Role::Admin, Dataset::Users)?;
        self.fixtures.users = actions::delete_user(&self.fixtures.users, id)
            .ok_or_else(|| not_found(Dataset::Users, id))?;
        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    fn require_role(&self, role: Role, dataset: Dataset) -> Result<()> {
        let user = self.session.require_user()?;
        if user.role != role {
            tracing::warn!("{} may not change {}", user.email, dataset);
            return Err(ScerosError::AccessDenied {
                role: user.role.to_string(),
                resource: dataset.to_string(),
            });
        }
        Ok(())
    }

    /// Area-scoped users follow their first assigned area; everyone else sees
    /// the campus-wide daily sum.
    fn usage_history(&self, user: &User, areas: &[Record]) -> Vec<UsagePoint> {
        if user.role.is_area_scoped() {
            areas
                .first()
                .and_then(Record::id)
                .and_then(|id| series_for(&self.fixtures.usage, &id))
                .map(|series| series.data.clone())
                .unwrap_or_default()
        } else {
            aggregate_usage(&self.fixtures.usage)
        }
    }
}

fn find_by_id<'a>(records: &'a [Record], id: &EntityId) -> Option<&'a Record> {
    records.iter().find(|r| r.id().as_ref() == Some(id))
}

fn not_found(dataset: Dataset, id: &EntityId) -> ScerosError {
    ScerosError::RecordNotFound {
        dataset: dataset.to_string(),
        id: id.to_string(),
    }
}
