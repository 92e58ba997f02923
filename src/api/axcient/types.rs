use serde::{Deserialize, Serialize};

// The x360Recover API speaks snake_case, so field names map directly;
// only `type` needs a rename.

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceCounter {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DevicesCounters {
    pub appliance_based: Option<Vec<DeviceCounter>>,
    pub d2c: Option<Vec<DeviceCounter>>,
    pub cloud_archive: Option<Vec<DeviceCounter>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Client {
    pub id: i64,
    pub name: Option<String>,
    pub health_status: Option<String>,
    pub devices_counters: Option<DevicesCounters>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceOs {
    pub os_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceHealth {
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AutoverifyDetails {
    pub screenshot_url: Option<String>,
    pub screenshot_thumbnail_url: Option<String>,
}

/// A protected device as returned by `/client/{id}/device`. The nested
/// forms under appliances and vaults carry a different shape (plain-string
/// `os`, usage counters) and get their own types below.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Device {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub ip_address: Option<String>,
    pub os: Option<DeviceOs>,
    pub current_health_status: Option<DeviceHealth>,
    pub latest_local_rp: Option<String>,
    pub latest_autoverify_details: Option<AutoverifyDetails>,
    pub device_details_page_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HardwareModel {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SoftwareVersion {
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageDetails {
    pub used_size: Option<i64>,
    pub drive_size: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApplianceDevice {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub ip_address: Option<String>,
    pub os: Option<String>,
    pub local_usage: Option<i64>,
    pub latest_local_rp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Appliance {
    pub id: i64,
    pub alias: Option<String>,
    pub product: Option<String>,
    pub ip_address: Option<String>,
    pub service_type: Option<String>,
    pub health_status: Option<String>,
    pub health_status_reason: Option<String>,
    pub model: Option<HardwareModel>,
    pub software_version: Option<SoftwareVersion>,
    pub tunnel_status: Option<String>,
    pub last_tunnel_up: Option<serde_json::Value>,
    pub storage_details: Option<StorageDetails>,
    #[serde(default)]
    pub devices: Vec<ApplianceDevice>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientRef {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VaultDevice {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub client: Option<ClientRef>,
    pub ip_address: Option<String>,
    pub os: Option<String>,
    pub local_usage: Option<i64>,
    pub vault_usage: Option<i64>,
    pub bytes_replicated: Option<i64>,
    pub latest_vault_rp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vault {
    pub id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub vault_type: Option<String>,
    pub ip_address: Option<String>,
    pub health_status: Option<String>,
    pub health_status_reason: Option<String>,
    pub model: Option<HardwareModel>,
    pub software_version: Option<SoftwareVersion>,
    pub tunnel_status: Option<String>,
    pub last_tunnel_up: Option<serde_json::Value>,
    pub storage_details: Option<StorageDetails>,
    // Absent when listing with display_devices=false.
    #[serde(default)]
    pub devices: Vec<VaultDevice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_decodes_with_missing_counters_and_unknown_keys() {
        let json = r#"{
            "id": 42,
            "name": "Acme Corp",
            "health_status": "NORMAL",
            "billing_plan": "legacy"
        }"#;
        let client: Client = serde_json::from_str(json).unwrap();
        assert_eq!(client.id, 42);
        assert!(client.devices_counters.is_none());
    }

    #[test]
    fn device_decodes_with_sparse_nesting() {
        let json = r#"{
            "id": 7,
            "name": "FILESRV01",
            "current_health_status": {},
            "os": { "os_name": "Windows Server 2019" }
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert!(device.current_health_status.unwrap().status.is_none());
        assert_eq!(device.os.unwrap().os_name.as_deref(), Some("Windows Server 2019"));
        assert!(device.latest_autoverify_details.is_none());
    }

    #[test]
    fn vault_list_entry_defaults_to_no_devices() {
        let json = r#"{
            "id": 3,
            "name": "vault-east",
            "type": "Private",
            "health_status": "NORMAL",
            "storage_details": { "used_size": 1048576, "drive_size": 4194304 }
        }"#;
        let vault: Vault = serde_json::from_str(json).unwrap();
        assert!(vault.devices.is_empty());
        assert_eq!(vault.vault_type.as_deref(), Some("Private"));
    }

    #[test]
    fn last_tunnel_up_accepts_both_wire_shapes() {
        // Some deployments report epoch millis, others an ISO string.
        let epoch: Appliance =
            serde_json::from_str(r#"{ "id": 1, "last_tunnel_up": 1768448871000 }"#).unwrap();
        assert!(epoch.last_tunnel_up.unwrap().is_number());

        let iso: Appliance =
            serde_json::from_str(r#"{ "id": 2, "last_tunnel_up": "2026-01-15T03:07:51Z" }"#)
                .unwrap();
        assert!(iso.last_tunnel_up.unwrap().is_string());
    }
}
