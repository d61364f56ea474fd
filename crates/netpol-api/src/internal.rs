//! Internal (canonical) network policy schema
//!
//! The single-representation form used by the rest of the system. A peer
//! holds only the `ip_blocks` list; the deprecated singular field of the
//! v1 schema does not exist here and is derived on conversion back out.

use serde::{Deserialize, Serialize};

use crate::metadata::{LabelSelector, ObjectMeta};

/// A single address-range expression in the canonical schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IPBlock {
    pub cidr: String,
}

impl IPBlock {
    pub fn new(cidr: impl Into<String>) -> Self {
        Self { cidr: cidr.into() }
    }
}

/// A peer in canonical form: one authoritative block list, no singular field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicyPeer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_selector: Option<LabelSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_blocks: Vec<IPBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicyIngressRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<NetworkPolicyPeer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicySpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<NetworkPolicyIngressRule>,
}

/// Top-level network policy object in the canonical schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicy {
    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: NetworkPolicySpec,
}

impl crate::metadata::Annotated for NetworkPolicy {
    fn annotations(&self) -> &std::collections::BTreeMap<String, String> {
        &self.metadata.annotations
    }

    fn annotations_mut(&mut self) -> &mut std::collections::BTreeMap<String, String> {
        &mut self.metadata.annotations
    }
}
