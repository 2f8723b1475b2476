//! Modelos de Analytics
//!
//! Contadores del dashboard (`GET /shipments/analytics/`) y las tarjetas
//! que se pintan con ellos.

use serde::{Deserialize, Serialize};

/// Contadores calculados por el servidor; los ausentes valen 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_vehicles: u64,
    #[serde(default)]
    pub total_maintenance: u64,
    #[serde(default)]
    pub total_shipments: u64,
    #[serde(default)]
    pub total_dead: u64,
}

/// Tarjeta de analytics del dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsCard {
    pub key: &'static str,
    pub title: &'static str,
    pub value: u64,
}

impl AnalyticsSnapshot {
    pub fn cards(&self) -> Vec<AnalyticsCard> {
        vec![
            AnalyticsCard {
                key: "totalVehicles",
                title: "Total Vehicles",
                value: self.total_vehicles,
            },
            AnalyticsCard {
                key: "totalMaintenance",
                title: "Total Maintenance",
                value: self.total_maintenance,
            },
            AnalyticsCard {
                key: "totalCouriers",
                title: "Total Shipments",
                value: self.total_shipments,
            },
            AnalyticsCard {
                key: "totalDeadVehicles",
                title: "Total Dead Vehicles",
                value: self.total_dead,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_counters_default_to_zero() {
        let snapshot: AnalyticsSnapshot =
            serde_json::from_value(json!({ "totalVehicles": 12 })).unwrap();
        assert_eq!(snapshot.total_vehicles, 12);
        assert_eq!(snapshot.total_dead, 0);
    }

    #[test]
    fn test_cards_order_and_keys() {
        let snapshot = AnalyticsSnapshot {
            total_vehicles: 4,
            total_maintenance: 3,
            total_shipments: 2,
            total_dead: 1,
        };
        let cards = snapshot.cards();
        let keys: Vec<_> = cards.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec!["totalVehicles", "totalMaintenance", "totalCouriers", "totalDeadVehicles"]
        );
        assert_eq!(cards[2].value, 2);
    }
}
