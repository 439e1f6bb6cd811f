use std::sync::Arc;
use std::time::Duration;

use script_forge::actions::SystemClipboard;
use script_forge::client::GeneratorClient;
use script_forge::credentials::{CredentialStore, MemoryCredentialStore};
use script_forge::models::{FieldVisibility, KeyStatus};
use script_forge::session::FormSession;
use script_forge::submission::{SharedUi, Submitter, GENERATE_DEADLINE};

fn open(store: Arc<MemoryCredentialStore>) -> FormSession {
    let ui = SharedUi::default();
    let client = GeneratorClient::new("http://127.0.0.1:1").unwrap();
    let submitter = Arc::new(Submitter::new(client, GENERATE_DEADLINE, ui.clone()));
    let dir = std::env::temp_dir().join("script-forge-session-api");
    FormSession::open(
        submitter,
        ui,
        store,
        Arc::new(SystemClipboard),
        dir,
        Duration::from_millis(10),
    )
}

#[test]
fn test_form_editing_and_reset_through_public_api() {
    let store = Arc::new(MemoryCredentialStore::with_key("sk-stored"));
    let mut session = open(store.clone());
    assert_eq!(session.form().api_key, "sk-stored");
    assert_eq!(session.ui().key_status, KeyStatus::Saved);

    let vis = session.select_vendor("arista");
    assert!(vis.vlan && vis.interface && vis.gateway);
    assert_eq!(session.visibility(), vis);
    assert_eq!(session.form().mgmt_interface, "Management1");

    assert!(session.required_markers().mgmt_ip);
    let markers = session.set_requirements("leaf switch, two uplinks");
    assert!(!markers.mgmt_ip && !markers.mgmt_mask);
    assert!(session.form().has_requirements());

    session.form_mut().hostname = "LEAF-01".into();
    session.reset();

    assert!(session.result().is_none());
    assert_eq!(session.visibility(), FieldVisibility::hidden());
    assert_eq!(session.form().hostname, "");
    assert_eq!(session.form().requirements, "");
    assert!(session.required_markers().mgmt_mask);
    assert_eq!(session.form().api_key, store.load());
    assert_eq!(session.ui().key_status, KeyStatus::Saved);
}

#[test]
fn test_reset_without_stored_key_shows_absent() {
    let mut session = open(Arc::new(MemoryCredentialStore::default()));
    session.select_vendor("fortinet");
    session.reset();
    assert_eq!(session.form().api_key, "");
    assert_eq!(session.ui().key_status, KeyStatus::Absent);
}
