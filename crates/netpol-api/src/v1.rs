//! v1 (external) network policy schema
//!
//! This is the wire-facing representation. For backward compatibility it
//! exposes both the deprecated singular `ipBlock` field and the newer
//! `ipBlocks` list on a peer; the two may be set independently and are
//! reconciled by [`crate::convert`], never validated here.

use serde::{Deserialize, Serialize};

use crate::metadata::{LabelSelector, ObjectMeta};

/// A single address-range expression, e.g. CIDR notation
///
/// The `cidr` string is opaque to this layer; syntax validation is the
/// caller's concern.
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

/// A peer that traffic is allowed from or to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPolicyPeer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_selector: Option<LabelSelector>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace_selector: Option<LabelSelector>,

    /// Deprecated singular block, retained for old clients that only ever
    /// set one value. May disagree with `ip_blocks[0]`; precedence is
    /// decided during conversion, not here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_block: Option<IPBlock>,

    /// The full ordered set of allowed blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip_blocks: Vec<IPBlock>,
}

/// A single ingress rule: the peers traffic is accepted from
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

/// Top-level network policy object in the v1 schema
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
