//! Statistics snapshot model

use std::collections::{BTreeMap, HashMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::ser::SerializeMap;

/// Response of the statistics endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub statistics: Statistics,
    #[serde(default)]
    pub location_distribution: LocationDistribution,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub ngos: MembershipCounts,
    pub volunteers: MembershipCounts,
    pub hospitals: ServiceCounts,
    pub police_stations: ServiceCounts,
    pub blood_banks: ServiceCounts,
    pub fire_stations: ServiceCounts,
    #[serde(default)]
    pub emergency_contacts: ContactCounts,
}

/// Counts for registrations that go through approval
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipCounts {
    pub total: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub pending: u64,
}

/// Counts for emergency services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCounts {
    pub total: u64,
    #[serde(rename = "24x7", default)]
    pub always_open: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactCounts {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_service_type: BTreeMap<String, u64>,
}

impl Statistics {
    /// Police stations, blood banks and fire stations combined
    pub fn emergency_services_total(&self) -> u64 {
        self.police_stations.total + self.blood_banks.total + self.fire_stations.total
    }
}

/// Per-category location counts, in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationDistribution {
    pub categories: Vec<(String, Vec<(String, u64)>)>,
}

impl LocationDistribution {
    /// Sum counts per location across categories.
    ///
    /// Locations keep the order of their first appearance.
    pub fn combined(&self) -> Vec<(String, u64)> {
        let mut totals: Vec<(String, u64)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for (_, locations) in &self.categories {
            for (location, count) in locations {
                match index.get(location.as_str()) {
                    Some(&i) => totals[i].1 += count,
                    None => {
                        index.insert(location.as_str(), totals.len());
                        totals.push((location.clone(), *count));
                    }
                }
            }
        }

        totals
    }
}

impl<'de> Deserialize<'de> for LocationDistribution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut categories = Vec::with_capacity(raw.len());

        for (category, locations) in raw {
            let locations = locations
                .as_object()
                .ok_or_else(|| D::Error::custom(format!("location counts for {} must be an object", category)))?;

            let mut counts = Vec::with_capacity(locations.len());
            for (location, count) in locations {
                let count = count
                    .as_u64()
                    .or_else(|| count.as_f64().filter(|c| *c >= 0.0).map(|c| c as u64))
                    .ok_or_else(|| D::Error::custom(format!("invalid count for {} in {}", location, category)))?;
                counts.push((location.clone(), count));
            }
            categories.push((category, counts));
        }

        Ok(Self { categories })
    }
}

impl Serialize for LocationDistribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, locations) in &self.categories {
            let inner: serde_json::Map<String, serde_json::Value> = locations
                .iter()
                .map(|(location, count)| (location.clone(), serde_json::Value::from(*count)))
                .collect();
            map.serialize_entry(category, &inner)?;
        }
        map.end()
    }
}
