use crate::domain::model::{EntityId, Record};
use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Electricity,
    Water,
    Hvac,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Electricity, Resource::Water, Resource::Hvac];

    /// Field name in area and usage fixtures.
    pub fn key(&self) -> &'static str {
        match self {
            Resource::Electricity => "electricity",
            Resource::Water => "water",
            Resource::Hvac => "hvac",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Resource::Electricity => "kWh",
            Resource::Water => "L",
            Resource::Hvac => "BTU",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Resource::Electricity => "Electricity",
            Resource::Water => "Water",
            Resource::Hvac => "HVAC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceTotals {
    pub electricity: f64,
    pub water: f64,
    pub hvac: f64,
}

impl ResourceTotals {
    pub fn get(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity,
            Resource::Water => self.water,
            Resource::Hvac => self.hvac,
        }
    }

    /// Reads the three resource fields of an area; missing or non-numeric
    /// fields count as zero.
    pub fn from_record(record: &Record) -> Self {
        Self {
            electricity: record.number(Resource::Electricity.key()).unwrap_or(0.0),
            water: record.number(Resource::Water.key()).unwrap_or(0.0),
            hvac: record.number(Resource::Hvac.key()).unwrap_or(0.0),
        }
    }
}

impl Add for ResourceTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            electricity: self.electricity + other.electricity,
            water: self.water + other.water,
            hvac: self.hvac + other.hvac,
        }
    }
}

/// One day of usage for an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePoint {
    pub date: String,
    #[serde(flatten)]
    pub totals: ResourceTotals,
}

/// Daily usage history of one area, as stored in `usage.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSeries {
    pub area_id: EntityId,
    #[serde(default)]
    pub data: Vec<UsagePoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageStatus {
    Low,
    Normal,
    Medium,
    High,
}

impl fmt::Display for UsageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UsageStatus::Low => "low",
            UsageStatus::Normal => "normal",
            UsageStatus::Medium => "medium",
            UsageStatus::High => "high",
        };
        f.write_str(label)
    }
}

/// Usage levels the status colours are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub electricity: f64,
    pub water: f64,
    pub hvac: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            electricity: 1000.0,
            water: 500.0,
            hvac: 300.0,
        }
    }
}

impl Thresholds {
    pub fn get(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Electricity => self.electricity,
            Resource::Water => self.water,
            Resource::Hvac => self.hvac,
        }
    }
}

pub fn total_usage<'a, I>(areas: I) -> ResourceTotals
where
    I: IntoIterator<Item = &'a Record>,
{
    areas
        .into_iter()
        .map(ResourceTotals::from_record)
        .fold(ResourceTotals::default(), Add::add)
}

/// Percent change between the last two points, rounded to a whole number.
pub fn usage_trend(series: &[UsagePoint], resource: Resource) -> i64 {
    let [.., previous, current] = series else {
        return 0;
    };
    let (previous, current) = (previous.totals.get(resource), current.totals.get(resource));
    if previous == 0.0 {
        return 0;
    }
    (((current - previous) / previous) * 100.0).round() as i64
}

/// High at 90% of the threshold, Medium at 75%, Normal at 50%.
pub fn usage_status(usage: f64, threshold: f64) -> UsageStatus {
    if threshold <= 0.0 {
        return if usage > 0.0 {
            UsageStatus::High
        } else {
            UsageStatus::Low
        };
    }
    let percentage = usage / threshold * 100.0;
    if percentage >= 90.0 {
        UsageStatus::High
    } else if percentage >= 75.0 {
        UsageStatus::Medium
    } else if percentage >= 50.0 {
        UsageStatus::Normal
    } else {
        UsageStatus::Low
    }
}

/// Records whose `field` names one of the user's assigned areas.
pub fn assigned_to<'a>(records: &'a [Record], user: &User, field: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.get(field).is_some_and(|area| user.is_assigned_to(area)))
        .collect()
}

/// Sums every area's series day by day, aligned by position. The date of
/// each day is taken from the first series that has it.
pub fn aggregate_usage(series: &[UsageSeries]) -> Vec<UsagePoint> {
    let mut days: Vec<UsagePoint> = Vec::new();
    for area in series {
        for (index, point) in area.data.iter().enumerate() {
            match days.get_mut(index) {
                Some(day) => day.totals = day.totals + point.totals,
                None => days.push(point.clone()),
            }
        }
    }
    days
}

pub fn series_for<'a>(series: &'a [UsageSeries], area_id: &EntityId) -> Option<&'a UsageSeries> {
    series.iter().find(|s| &s.area_id == area_id)
}

pub fn count_with_status<'a, I>(records: I, status: &str) -> usize
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|r| r.str("status") == Some(status))
        .count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    pub total_users: usize,
    pub active_users: usize,
    pub total_areas: usize,
    pub active_alerts: usize,
    pub total_usage: ResourceTotals,
}

pub fn system_metrics(users: &[User], areas: &[Record], alerts: &[Record]) -> SystemMetrics {
    SystemMetrics {
        total_users: users.len(),
        active_users: users.iter().filter(|u| u.is_active()).count(),
        total_areas: areas.len(),
        active_alerts: count_with_status(alerts, "Unresolved"),
        total_usage: total_usage(areas),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn area(id: u64, electricity: f64, water: f64, hvac: f64) -> Record {
        Record::from_value(json!({
            "id": id, "electricity": electricity, "water": water, "hvac": hvac
        }))
        .unwrap()
    }

    fn point(date: &str, electricity: f64) -> UsagePoint {
        UsagePoint {
            date: date.to_string(),
            totals: ResourceTotals {
                electricity,
                water: 10.0,
                hvac: 0.0,
            },
        }
    }

    #[test]
    fn test_total_usage() {
        let areas = vec![
            area(1, 100.0, 20.0, 5.0),
            area(2, 50.5, 10.0, 5.0),
            Record::from_value(json!({"id": 3})).unwrap(),
        ];
        let totals = total_usage(&areas);
        assert_eq!(totals.electricity, 150.5);
        assert_eq!(totals.water, 30.0);
        assert_eq!(totals.hvac, 10.0);
        assert_eq!(total_usage(&[]), ResourceTotals::default());
    }

    #[test]
    fn test_usage_trend() {
        let series = vec![point("2024-03-01", 100.0), point("2024-03-02", 112.0)];
        assert_eq!(usage_trend(&series, Resource::Electricity), 12);
        assert_eq!(usage_trend(&series, Resource::Water), 0);
        assert_eq!(usage_trend(&series, Resource::Hvac), 0);
        assert_eq!(usage_trend(&series[..1], Resource::Electricity), 0);

        let falling = vec![point("a", 200.0), point("b", 150.0)];
        assert_eq!(usage_trend(&falling, Resource::Electricity), -25);
    }

    #[test]
    fn test_usage_status_bands() {
        assert_eq!(usage_status(950.0, 1000.0), UsageStatus::High);
        assert_eq!(usage_status(900.0, 1000.0), UsageStatus::High);
        assert_eq!(usage_status(750.0, 1000.0), UsageStatus::Medium);
        assert_eq!(usage_status(500.0, 1000.0), UsageStatus::Normal);
        assert_eq!(usage_status(499.0, 1000.0), UsageStatus::Low);
        assert_eq!(usage_status(1.0, 0.0), UsageStatus::High);
        assert_eq!(usage_status(0.0, 0.0), UsageStatus::Low);
    }

    #[test]
    fn test_aggregate_usage_by_position() {
        let series = vec![
            UsageSeries {
                area_id: EntityId::Number(1),
                data: vec![point("d1", 10.0), point("d2", 20.0)],
            },
            UsageSeries {
                area_id: EntityId::Number(2),
                data: vec![point("d1", 1.0), point("d2", 2.0), point("d3", 3.0)],
            },
        ];
        let days = aggregate_usage(&series);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].totals.electricity, 11.0);
        assert_eq!(days[1].totals.water, 20.0);
        assert_eq!(days[2].date, "d3");
        assert!(series_for(&series, &EntityId::Number(2)).is_some());
        assert!(series_for(&series, &EntityId::Number(9)).is_none());
    }

    #[test]
    fn test_usage_series_parses_fixture_shape() {
        let series: UsageSeries = serde_json::from_value(json!({
            "areaId": 1,
            "data": [{"date": "2024-03-01", "electricity": 120, "water": 40, "hvac": 30}]
        }))
        .unwrap();
        assert_eq!(series.data[0].totals.electricity, 120.0);
    }
}
