// crates/edge-deploy-workload/src/tests/payload.rs
// ============================================================================
// Module: Workload Payload Tests
// Description: Unit coverage for the workload wire payload.
// Purpose: Pin the fixed workload schema the API expects.
// Dependencies: edge-deploy-workload payload module, serde_json
// ============================================================================

//! ## Overview
//! Serializes a sample descriptor and checks every fixed field of the payload.

use serde_json::Value;
use serde_json::json;

use crate::payload::WorkloadSpec;

fn sample_spec() -> WorkloadSpec {
    WorkloadSpec {
        name: "web".to_string(),
        image: "registry.example/web:v1".to_string(),
        site: "edge-site".to_string(),
        port: 8080,
        registry: "apps-acr".to_string(),
    }
}

fn render(tenant: &str) -> Value {
    serde_json::to_value(sample_spec().to_object(tenant, "apps")).unwrap()
}

#[test]
fn payload_matches_fixed_schema() {
    let expected = json!({
        "metadata": {
            "name": "web",
            "namespace": "apps",
            "labels": {},
            "annotations": {},
            "disable": false
        },
        "spec": {
            "service": {
                "num_replicas": 1,
                "containers": [{
                    "name": "web",
                    "image": {
                        "name": "registry.example/web:v1",
                        "container_registry": {
                            "tenant": "acme",
                            "namespace": "apps",
                            "name": "apps-acr",
                            "kind": "container_registry"
                        },
                        "pull_policy": "IMAGE_PULL_POLICY_DEFAULT"
                    },
                    "init_container": false,
                    "flavor": "CONTAINER_FLAVOR_TYPE_TINY",
                    "command": [],
                    "args": []
                }],
                "volumes": [],
                "deploy_options": {
                    "deploy_ce_virtual_sites": {
                        "virtual_site": [{
                            "tenant": "acme",
                            "namespace": "shared",
                            "name": "edge-site",
                            "kind": "virtual_site"
                        }]
                    }
                },
                "advertise_options": {
                    "advertise_in_cluster": {
                        "port": {
                            "info": {
                                "port": 8080,
                                "protocol": "PROTOCOL_TCP",
                                "same_as_port": {}
                            }
                        }
                    }
                },
                "family": { "v4": {} }
            }
        }
    });
    assert_eq!(render("acme"), expected);
}

#[test]
fn resolved_tenant_appears_in_both_references() {
    let payload = render("f5-amer-ent-qyyfhhfj");
    let service = &payload["spec"]["service"];
    assert_eq!(
        service["containers"][0]["image"]["container_registry"]["tenant"],
        "f5-amer-ent-qyyfhhfj"
    );
    assert_eq!(
        service["deploy_options"]["deploy_ce_virtual_sites"]["virtual_site"][0]["tenant"],
        "f5-amer-ent-qyyfhhfj"
    );
}
