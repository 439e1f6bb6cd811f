use serde::{Deserialize, Serialize};

/// Gateway used when neither the vendor table nor the user supplies one
pub const DEFAULT_GATEWAY: &str = "192.168.10.254";

/// Management VLAN used when the VLAN field is left blank
pub const DEFAULT_MGMT_VLAN: u16 = 100;

/// Management port used for port-based vendors when the field is left blank
pub const DEFAULT_MGMT_PORT: &str = "port1";

/// The only vendor that is managed through a dedicated port instead of a VLAN
pub const PORT_BASED_VENDOR: &str = "fortinet";

/// Which optional field groups a vendor uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorLayout {
    PortGateway,
    VlanInterfaceGateway,
}

/// VendorProfile holds the static defaults for one supported vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorProfile {
    pub id: &'static str,
    pub display_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_interface: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_port: Option<&'static str>,
    pub default_gateway: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_help: Option<&'static str>,
}

impl VendorProfile {
    pub fn layout(&self) -> VendorLayout {
        if self.id == PORT_BASED_VENDOR {
            VendorLayout::PortGateway
        } else {
            VendorLayout::VlanInterfaceGateway
        }
    }
}

const fn vlan_vendor(
    id: &'static str,
    display_name: &'static str,
    interface: &'static str,
    help: &'static str,
) -> VendorProfile {
    VendorProfile {
        id,
        display_name,
        default_vlan: Some(DEFAULT_MGMT_VLAN),
        default_interface: Some(interface),
        default_port: None,
        default_gateway: DEFAULT_GATEWAY,
        interface_help: Some(help),
    }
}

static VENDOR_PROFILES: [VendorProfile; 6] = [
    vlan_vendor("cisco", "Cisco", "Gi1/0/1", "e.g. Gi1/0/1, Fa0/1"),
    vlan_vendor("arista", "Arista", "Management1", "e.g. Management1, Ethernet1"),
    vlan_vendor("alcatel", "Alcatel-Lucent", "1/1/1", "e.g. 1/1/1, 1/2/1"),
    vlan_vendor("hp", "HP (HPE)", "1", "e.g. 1, 2, A1"),
    vlan_vendor("juniper", "Juniper", "ge-0/0/0", "e.g. ge-0/0/0, xe-0/0/0"),
    VendorProfile {
        id: PORT_BASED_VENDOR,
        display_name: "Fortinet",
        default_vlan: None,
        default_interface: None,
        default_port: Some(DEFAULT_MGMT_PORT),
        default_gateway: DEFAULT_GATEWAY,
        interface_help: None,
    },
];

/// All supported vendors, in display order
pub fn vendor_profiles() -> &'static [VendorProfile] {
    &VENDOR_PROFILES
}

/// Look up a vendor profile by its identifier (case-insensitive)
pub fn find_vendor(id: &str) -> Option<&'static VendorProfile> {
    let id = id.trim();
    VENDOR_PROFILES
        .iter()
        .find(|profile| profile.id.eq_ignore_ascii_case(id))
}

/// Vendor summary returned by `GET /api/vendors`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSummary {
    pub id: String,
    pub name: String,
    pub layout: VendorLayout,
}

impl From<&VendorProfile> for VendorSummary {
    fn from(profile: &VendorProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.display_name.to_string(),
            layout: profile.layout(),
        }
    }
}

/// Defaults returned by `GET /api/vendor-config`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgmt_vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgmt_interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mgmt_port: Option<String>,
    pub gateway: String,
}

impl From<&VendorProfile> for VendorDefaults {
    fn from(profile: &VendorProfile) -> Self {
        Self {
            mgmt_vlan: profile.default_vlan,
            mgmt_interface: profile.default_interface.map(str::to_string),
            mgmt_port: profile.default_port.map(str::to_string),
            gateway: profile.default_gateway.to_string(),
        }
    }
}

/// VendorDefaultsResponse wraps the defaults for one vendor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorDefaultsResponse {
    pub success: bool,
    pub vendor: String,
    pub config: VendorDefaults,
}
