use serde::Serialize;

/// FormField identifies one input of the generation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    ApiKey,
    Vendor,
    Hostname,
    Requirements,
    MgmtIp,
    MgmtMask,
    MgmtVlan,
    MgmtInterface,
    MgmtPort,
    Gateway,
}

/// FormState holds the raw, untrimmed values of every input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub vendor: String,
    pub hostname: String,
    pub requirements: String,
    pub mgmt_ip: String,
    pub mgmt_mask: String,
    pub mgmt_vlan: String,
    pub mgmt_interface: String,
    pub mgmt_port: String,
    pub gateway: String,
    pub api_key: String,
}

impl FormState {
    pub fn has_requirements(&self) -> bool {
        !self.requirements.trim().is_empty()
    }
}

/// Which optional field groups are currently shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldVisibility {
    pub vlan: bool,
    pub interface: bool,
    pub port: bool,
    pub gateway: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_help: Option<&'static str>,
}

impl FieldVisibility {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn any_shown(&self) -> bool {
        self.vlan || self.interface || self.port || self.gateway
    }
}

/// Required markers on the management address inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RequiredMarkers {
    pub mgmt_ip: bool,
    pub mgmt_mask: bool,
}
