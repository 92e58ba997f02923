use crate::api::axcient::types::{Client, Device, DevicesCounters};
use ratatui::style::Color;

/// Operational state reported by the backend for clients, devices,
/// appliances and vaults. Anything outside the closed set parses to
/// `Unknown` so rendering never fails on a value we have not seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Troubled,
    Warned,
    Normal,
    Parked,
    Unknown,
}

impl HealthStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("TROUBLED") => Self::Troubled,
            Some("WARNED") => Self::Warned,
            Some("NORMAL") => Self::Normal,
            Some("PARKED") => Self::Parked,
            _ => Self::Unknown,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Troubled => Color::Red,
            Self::Warned => Color::Yellow,
            Self::Normal => Color::Green,
            Self::Parked => Color::DarkGray,
            Self::Unknown => Color::Gray,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Troubled => "TROUBLED",
            Self::Warned => "WARNED",
            Self::Normal => "NORMAL",
            Self::Parked => "PARKED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Default)]
pub struct ClientGroups<'a> {
    pub troubled: Vec<&'a Client>,
    pub warned: Vec<&'a Client>,
    pub healthy: Vec<&'a Client>,
}

/// Partitions clients into troubled / warned / healthy, preserving input
/// order within each group. A client whose status is anything else (PARKED,
/// absent, unrecognized) lands in no group at all; the roster shows it only
/// in the total-fetched count.
pub fn group_clients_by_health(clients: &[Client]) -> ClientGroups<'_> {
    let mut groups = ClientGroups::default();
    for client in clients {
        match HealthStatus::parse(client.health_status.as_deref()) {
            HealthStatus::Troubled => groups.troubled.push(client),
            HealthStatus::Warned => groups.warned.push(client),
            HealthStatus::Normal => groups.healthy.push(client),
            _ => {}
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCounts {
    pub appliance: i64,
    pub d2c: i64,
    pub cloud_archive: i64,
    pub total: i64,
}

fn bucket_sum(bucket: Option<&Vec<crate::api::axcient::types::DeviceCounter>>) -> i64 {
    bucket.map_or(0, |entries| entries.iter().map(|e| e.count).sum())
}

/// Sums the per-class device counters for one client. Absent counters or
/// absent buckets contribute zero.
pub fn calculate_device_counts(counters: Option<&DevicesCounters>) -> DeviceCounts {
    let Some(counters) = counters else {
        return DeviceCounts::default();
    };

    let appliance = bucket_sum(counters.appliance_based.as_ref());
    let d2c = bucket_sum(counters.d2c.as_ref());
    let cloud_archive = bucket_sum(counters.cloud_archive.as_ref());

    DeviceCounts {
        appliance,
        d2c,
        cloud_archive,
        total: appliance + d2c + cloud_archive,
    }
}

/// Reorders devices into fixed display priority: TROUBLED, NORMAL, WARNED,
/// PARKED. NORMAL ahead of WARNED is deliberate; the roster-level grouping
/// uses severity order but the device board has always read this way.
/// Devices with any other status are dropped. Input order is kept within
/// each block (stable partition, not a comparison sort).
pub fn sort_devices(devices: Vec<Device>) -> Vec<Device> {
    let mut troubled = Vec::new();
    let mut normal = Vec::new();
    let mut warned = Vec::new();
    let mut parked = Vec::new();

    for device in devices {
        let status = device
            .current_health_status
            .as_ref()
            .and_then(|h| h.status.as_deref());
        match HealthStatus::parse(status) {
            HealthStatus::Troubled => troubled.push(device),
            HealthStatus::Normal => normal.push(device),
            HealthStatus::Warned => warned.push(device),
            HealthStatus::Parked => parked.push(device),
            HealthStatus::Unknown => {}
        }
    }

    troubled.extend(normal);
    troubled.extend(warned);
    troubled.extend(parked);
    troubled
}

pub fn device_status(device: &Device) -> HealthStatus {
    HealthStatus::parse(
        device
            .current_health_status
            .as_ref()
            .and_then(|h| h.status.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::axcient::types::{DeviceCounter, DeviceHealth};

    fn client(id: i64, status: Option<&str>) -> Client {
        Client {
            id,
            name: Some(format!("client-{id}")),
            health_status: status.map(str::to_string),
            devices_counters: None,
        }
    }

    fn device(id: i64, status: Option<&str>) -> Device {
        Device {
            id,
            name: None,
            device_type: None,
            ip_address: None,
            os: None,
            current_health_status: status.map(|s| DeviceHealth {
                status: Some(s.to_string()),
            }),
            latest_local_rp: None,
            latest_autoverify_details: None,
            device_details_page_url: None,
        }
    }

    #[test]
    fn grouping_partitions_and_preserves_input_order() {
        let clients = vec![
            client(1, Some("NORMAL")),
            client(2, Some("TROUBLED")),
            client(3, Some("WARNED")),
            client(4, Some("TROUBLED")),
            client(5, Some("NORMAL")),
        ];
        let groups = group_clients_by_health(&clients);

        let ids = |g: &[&Client]| g.iter().map(|c| c.id).collect::<Vec<_>>();
        assert_eq!(ids(&groups.troubled), vec![2, 4]);
        assert_eq!(ids(&groups.warned), vec![3]);
        assert_eq!(ids(&groups.healthy), vec![1, 5]);
        assert_eq!(
            groups.troubled.len() + groups.warned.len() + groups.healthy.len(),
            clients.len()
        );
    }

    #[test]
    fn grouping_drops_unrecognized_statuses() {
        let clients = vec![
            client(1, Some("PARKED")),
            client(2, Some("degraded")),
            client(3, None),
            client(4, Some("WARNED")),
        ];
        let groups = group_clients_by_health(&clients);

        assert!(groups.troubled.is_empty());
        assert!(groups.healthy.is_empty());
        assert_eq!(groups.warned.len(), 1);
        assert!(
            groups.troubled.len() + groups.warned.len() + groups.healthy.len() < clients.len()
        );
    }

    #[test]
    fn counts_default_to_zero_when_everything_is_absent() {
        assert_eq!(calculate_device_counts(None), DeviceCounts::default());

        let empty = DevicesCounters::default();
        assert_eq!(calculate_device_counts(Some(&empty)), DeviceCounts::default());
    }

    #[test]
    fn counts_sum_each_bucket_independently() {
        let counters = DevicesCounters {
            appliance_based: Some(vec![DeviceCounter { count: 3 }, DeviceCounter { count: 2 }]),
            d2c: None,
            cloud_archive: Some(vec![DeviceCounter { count: 1 }]),
        };
        let counts = calculate_device_counts(Some(&counters));

        assert_eq!(counts.appliance, 5);
        assert_eq!(counts.d2c, 0);
        assert_eq!(counts.cloud_archive, 1);
        assert_eq!(counts.total, 6);
    }

    #[test]
    fn sorter_applies_fixed_priority_and_drops_unknown() {
        let devices = vec![
            device(1, Some("WARNED")),
            device(2, Some("TROUBLED")),
            device(3, Some("NORMAL")),
            device(4, Some("PARKED")),
            device(5, Some("UNKNOWN")),
        ];
        let sorted = sort_devices(devices);
        let ids: Vec<i64> = sorted.iter().map(|d| d.id).collect();

        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn sorter_is_stable_within_each_block() {
        let devices = vec![
            device(10, Some("NORMAL")),
            device(11, Some("TROUBLED")),
            device(12, Some("NORMAL")),
            device(13, Some("TROUBLED")),
        ];
        let ids: Vec<i64> = sort_devices(devices).iter().map(|d| d.id).collect();

        assert_eq!(ids, vec![11, 13, 10, 12]);
    }

    #[test]
    fn sorter_is_idempotent_on_its_own_output() {
        let devices = vec![
            device(1, Some("WARNED")),
            device(2, Some("TROUBLED")),
            device(3, Some("NORMAL")),
            device(4, Some("PARKED")),
        ];
        let once = sort_devices(devices);
        let once_ids: Vec<i64> = once.iter().map(|d| d.id).collect();
        let twice_ids: Vec<i64> = sort_devices(once).iter().map(|d| d.id).collect();

        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn status_parse_degrades_to_unknown() {
        assert_eq!(HealthStatus::parse(Some("troubled")), HealthStatus::Unknown);
        assert_eq!(HealthStatus::parse(Some("")), HealthStatus::Unknown);
        assert_eq!(HealthStatus::parse(None), HealthStatus::Unknown);
        assert_eq!(HealthStatus::parse(Some("PARKED")), HealthStatus::Parked);
    }
}
