use crate::error::ClientError;
use crate::models::{
    find_vendor, FormField, FormState, GenerateRequest, DEFAULT_GATEWAY, DEFAULT_MGMT_PORT,
    DEFAULT_MGMT_VLAN, PORT_BASED_VENDOR,
};

/// Hostname sent when the hostname input is left blank
pub const PLACEHOLDER_HOSTNAME: &str = "Device-01";

const MISSING_ADDRESS_MESSAGE: &str =
    "Enter the management IP address and subnet mask, or enter configuration requirements.";

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_vlan(raw: &str) -> Result<u16, ClientError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_MGMT_VLAN);
    }
    raw.parse::<u16>()
        .ok()
        .filter(|vlan| (1..=4094).contains(vlan))
        .ok_or_else(|| {
            ClientError::validation(
                FormField::MgmtVlan,
                "Management VLAN must be a number between 1 and 4094.",
            )
        })
}

/// Assemble the generation payload from the current form values.
///
/// With requirements text the management address is optional enrichment;
/// without it both IP and mask are required and their absence is rejected
/// here, before any request is made.
pub fn build_request(form: &FormState) -> Result<GenerateRequest, ClientError> {
    let vendor = form.vendor.trim();
    let vendor = find_vendor(vendor).map_or(vendor, |profile| profile.id);
    let requirements = form.requirements.trim().to_string();

    let mgmt_ip = trimmed(&form.mgmt_ip);
    let mgmt_mask = trimmed(&form.mgmt_mask);

    if requirements.is_empty() {
        match (&mgmt_ip, &mgmt_mask) {
            (None, _) => {
                return Err(ClientError::validation(FormField::MgmtIp, MISSING_ADDRESS_MESSAGE))
            }
            (_, None) => {
                return Err(ClientError::validation(FormField::MgmtMask, MISSING_ADDRESS_MESSAGE))
            }
            _ => {}
        }
    }

    let mut request = GenerateRequest {
        api_key: form.api_key.trim().to_string(),
        vendor: vendor.to_string(),
        hostname: trimmed(&form.hostname).unwrap_or_else(|| PLACEHOLDER_HOSTNAME.to_string()),
        requirements,
        mgmt_ip,
        mgmt_mask,
        mgmt_vlan: None,
        mgmt_interface: None,
        mgmt_port: None,
        gateway: None,
    };

    if vendor == PORT_BASED_VENDOR {
        request.mgmt_port =
            Some(trimmed(&form.mgmt_port).unwrap_or_else(|| DEFAULT_MGMT_PORT.to_string()));
    } else {
        request.mgmt_vlan = Some(parse_vlan(&form.mgmt_vlan)?);
        request.mgmt_interface = Some(form.mgmt_interface.trim().to_string());
        request.gateway =
            Some(trimmed(&form.gateway).unwrap_or_else(|| DEFAULT_GATEWAY.to_string()));
    }

    Ok(request)
}
