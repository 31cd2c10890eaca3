// crates/edge-deploy-workload/src/payload.rs
// ============================================================================
// Module: Workload Payload
// Description: Workload descriptor and the JSON object sent to the API.
// Purpose: Model the fixed workload schema with typed serde structures.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`WorkloadSpec`] describes one containerized workload. It renders to a
//! [`WorkloadObject`], the body of create and replace requests: a single
//! replica of one tiny container pulled from a named registry, deployed to one
//! virtual site and advertised in-cluster on one TCP port.
//!
//! ## Invariants
//! - The virtual site reference always lives in the [`SHARED_NAMESPACE`].
//! - Both object references carry the resolved tenant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Namespace that owns virtual sites.
pub const SHARED_NAMESPACE: &str = "shared";
/// Object kind for container registry references.
const KIND_CONTAINER_REGISTRY: &str = "container_registry";
/// Object kind for virtual site references.
const KIND_VIRTUAL_SITE: &str = "virtual_site";
/// Image pull policy applied to the workload container.
const PULL_POLICY: &str = "IMAGE_PULL_POLICY_DEFAULT";
/// Container flavor applied to the workload container.
const CONTAINER_FLAVOR: &str = "CONTAINER_FLAVOR_TYPE_TINY";
/// Protocol advertised for the workload port.
const PORT_PROTOCOL: &str = "PROTOCOL_TCP";

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Workload descriptor supplied by the caller.
///
/// Identity is `(namespace, name)`; the namespace and tenant come from the
/// client the descriptor is submitted through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    /// Workload and container name.
    pub name: String,
    /// Container image reference (`registry/image:tag`).
    pub image: String,
    /// Target virtual site name.
    pub site: String,
    /// Port the workload listens on.
    pub port: u16,
    /// Container registry object name.
    pub registry: String,
}

impl WorkloadSpec {
    /// Renders the API object for this workload.
    #[must_use]
    pub fn to_object(&self, tenant: &str, namespace: &str) -> WorkloadObject {
        let container = Container {
            name: self.name.clone(),
            image: ContainerImage {
                name: self.image.clone(),
                container_registry: ObjectRef {
                    tenant: tenant.to_string(),
                    namespace: namespace.to_string(),
                    name: self.registry.clone(),
                    kind: KIND_CONTAINER_REGISTRY,
                },
                pull_policy: PULL_POLICY,
            },
            init_container: false,
            flavor: CONTAINER_FLAVOR,
            command: Vec::new(),
            args: Vec::new(),
        };
        let site = ObjectRef {
            tenant: tenant.to_string(),
            namespace: SHARED_NAMESPACE.to_string(),
            name: self.site.clone(),
            kind: KIND_VIRTUAL_SITE,
        };
        WorkloadObject {
            metadata: ObjectMetadata {
                name: self.name.clone(),
                namespace: namespace.to_string(),
                labels: BTreeMap::new(),
                annotations: BTreeMap::new(),
                disable: false,
            },
            spec: WorkloadObjectSpec {
                service: ServiceSpec {
                    num_replicas: 1,
                    containers: vec![container],
                    volumes: Vec::new(),
                    deploy_options: DeployOptions {
                        deploy_ce_virtual_sites: VirtualSiteList {
                            virtual_site: vec![site],
                        },
                    },
                    advertise_options: AdvertiseOptions {
                        advertise_in_cluster: AdvertiseInCluster {
                            port: AdvertisePort {
                                info: PortInfo {
                                    port: self.port,
                                    protocol: PORT_PROTOCOL,
                                    same_as_port: Empty {},
                                },
                            },
                        },
                    },
                    family: AddressFamily {
                        v4: Empty {},
                    },
                },
            },
        }
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Request body for workload create and replace.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadObject {
    /// Object metadata.
    pub metadata: ObjectMetadata,
    /// Workload specification.
    pub spec: WorkloadObjectSpec,
}

/// Request body for workload delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteRequest {
    /// Workload name.
    pub name: String,
    /// Owning namespace.
    pub namespace: String,
}

/// Object metadata block.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    /// Object name.
    pub name: String,
    /// Owning namespace.
    pub namespace: String,
    /// Object labels.
    pub labels: BTreeMap<String, String>,
    /// Object annotations.
    pub annotations: BTreeMap<String, String>,
    /// Whether the object is administratively disabled.
    pub disable: bool,
}

/// Top-level workload spec.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadObjectSpec {
    /// Service workload definition.
    pub service: ServiceSpec,
}

/// Service workload definition.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSpec {
    /// Replica count.
    pub num_replicas: u32,
    /// Containers in the service.
    pub containers: Vec<Container>,
    /// Attached volumes (always empty).
    pub volumes: Vec<serde_json::Value>,
    /// Deployment targets.
    pub deploy_options: DeployOptions,
    /// Advertisement settings.
    pub advertise_options: AdvertiseOptions,
    /// IP address family.
    pub family: AddressFamily,
}

/// Container definition.
#[derive(Debug, Clone, Serialize)]
pub struct Container {
    /// Container name.
    pub name: String,
    /// Image settings.
    pub image: ContainerImage,
    /// Whether this is an init container.
    pub init_container: bool,
    /// Resource flavor.
    pub flavor: &'static str,
    /// Command override.
    pub command: Vec<String>,
    /// Argument override.
    pub args: Vec<String>,
}

/// Container image settings.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerImage {
    /// Image reference.
    pub name: String,
    /// Registry the image is pulled from.
    pub container_registry: ObjectRef,
    /// Pull policy.
    pub pull_policy: &'static str,
}

/// Reference to another configuration object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectRef {
    /// Owning tenant.
    pub tenant: String,
    /// Owning namespace.
    pub namespace: String,
    /// Object name.
    pub name: String,
    /// Object kind.
    pub kind: &'static str,
}

/// Deployment targets.
#[derive(Debug, Clone, Serialize)]
pub struct DeployOptions {
    /// Customer edge virtual sites.
    pub deploy_ce_virtual_sites: VirtualSiteList,
}

/// Virtual site list.
#[derive(Debug, Clone, Serialize)]
pub struct VirtualSiteList {
    /// Referenced virtual sites.
    pub virtual_site: Vec<ObjectRef>,
}

/// Advertisement settings.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertiseOptions {
    /// In-cluster advertisement.
    pub advertise_in_cluster: AdvertiseInCluster,
}

/// In-cluster advertisement.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertiseInCluster {
    /// Advertised port.
    pub port: AdvertisePort,
}

/// Advertised port wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct AdvertisePort {
    /// Port details.
    pub info: PortInfo,
}

/// Port details.
#[derive(Debug, Clone, Serialize)]
pub struct PortInfo {
    /// Listening port.
    pub port: u16,
    /// Transport protocol.
    pub protocol: &'static str,
    /// Target port equals the listening port.
    pub same_as_port: Empty,
}

/// IP address family selection.
#[derive(Debug, Clone, Serialize)]
pub struct AddressFamily {
    /// IPv4.
    pub v4: Empty,
}

/// Marker serialized as an empty JSON object.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Empty {}
