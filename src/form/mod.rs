mod request;

pub use request::build_request;

use crate::models::{
    find_vendor, FieldVisibility, FormState, RequiredMarkers, VendorLayout, DEFAULT_GATEWAY,
    DEFAULT_MGMT_PORT, DEFAULT_MGMT_VLAN,
};
use crate::utils::{is_valid_hostname, is_valid_ipv4, mask_to_cidr};

/// Apply a vendor selection to the form.
///
/// All optional groups are hidden and cleared first; a known vendor then shows
/// its layout pre-filled from the vendor table. Unknown or empty vendors leave
/// everything hidden.
pub fn apply_vendor(form: &mut FormState, vendor: &str) -> FieldVisibility {
    form.vendor = vendor.to_string();
    form.mgmt_vlan.clear();
    form.mgmt_interface.clear();
    form.mgmt_port.clear();
    form.gateway = DEFAULT_GATEWAY.to_string();

    let Some(profile) = find_vendor(vendor) else {
        if !vendor.trim().is_empty() {
            tracing::debug!("Unknown vendor '{}', no optional fields shown", vendor);
        }
        return FieldVisibility::hidden();
    };

    form.gateway = profile.default_gateway.to_string();
    match profile.layout() {
        VendorLayout::PortGateway => {
            form.mgmt_port = profile.default_port.unwrap_or(DEFAULT_MGMT_PORT).to_string();
            FieldVisibility {
                port: true,
                gateway: true,
                ..FieldVisibility::hidden()
            }
        }
        VendorLayout::VlanInterfaceGateway => {
            form.mgmt_vlan = profile.default_vlan.unwrap_or(DEFAULT_MGMT_VLAN).to_string();
            form.mgmt_interface = profile.default_interface.unwrap_or_default().to_string();
            FieldVisibility {
                vlan: true,
                interface: true,
                gateway: true,
                port: false,
                interface_help: profile.interface_help,
            }
        }
    }
}

/// Management IP and mask are only required while no requirements text is given
pub fn required_markers(form: &FormState) -> RequiredMarkers {
    let required = !form.has_requirements();
    RequiredMarkers {
        mgmt_ip: required,
        mgmt_mask: required,
    }
}

/// Advisory check on the management IP; never blocks submission
pub fn ip_warning(form: &FormState) -> Option<String> {
    let ip = form.mgmt_ip.trim();
    if ip.is_empty() || is_valid_ipv4(ip) {
        None
    } else {
        Some("Enter a valid IP address (e.g. 192.168.1.1)".to_string())
    }
}

/// Advisory checks on hostname, IP and mask; none of them block submission
pub fn field_warnings(form: &FormState) -> Vec<String> {
    let mut warnings = Vec::new();
    let hostname = form.hostname.trim();
    if !hostname.is_empty() && !is_valid_hostname(hostname) {
        warnings.push(format!(
            "Hostname '{}' contains characters most devices reject",
            hostname
        ));
    }
    warnings.extend(ip_warning(form));
    let mask = form.mgmt_mask.trim();
    if !mask.is_empty() && mask_to_cidr(mask).is_none() {
        warnings.push(format!("Subnet mask '{}' is not a contiguous mask", mask));
    }
    warnings
}
