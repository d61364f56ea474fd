//! Conversion between the v1 and internal schemas
//!
//! The only non-trivial logic lives in the peer conversions: the v1 schema
//! carries two redundant block representations (deprecated singular
//! `ip_block` and the newer `ip_blocks` list) and they must be reconciled
//! into the single canonical list. Precedence rule, applied after the
//! baseline field-by-field copy:
//!
//! - if the deprecated field is set and disagrees with the head of the
//!   list, the deprecated field wins and replaces the whole list
//! - if only the deprecated field is set, it becomes a one-element list
//! - otherwise the copied list stands, including the both-empty case
//!
//! Converting back out, the deprecated field is regenerated from the head
//! of the canonical list so old clients keep seeing a value.
//!
//! All conversions are total over structurally valid input; the only error
//! path is a failed nested-field conversion, which is surfaced unchanged
//! without applying the reconciliation overlay.

use thiserror::Error;

use crate::{internal, v1};

/// Conversion error
///
/// The reconciliation overlay itself cannot fail; errors originate only in
/// nested-field conversion during the baseline copy.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// A nested field failed to convert during the baseline structural copy
    #[error("failed to convert nested field '{field}': {reason}")]
    NestedField { field: String, reason: String },
}

/// Opaque context threaded through conversions
///
/// Exists so nested conversions share one signature shape; it carries no
/// state at this layer and imposes no concurrency obligations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scope {
    _reserved: (),
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// Baseline structural copies
//
// The field-by-field transfer performed before any corrective overlay.
// Selectors and the block list are carried over verbatim, in order. These
// return Result because nested-field conversion is allowed to fail; when it
// does, callers must not apply the overlay.
// ---------------------------------------------------------------------------

fn auto_convert_v1_peer_to_internal(
    input: &v1::NetworkPolicyPeer,
    scope: &Scope,
) -> Result<internal::NetworkPolicyPeer, ConvertError> {
    let _ = scope;
    Ok(internal::NetworkPolicyPeer {
        pod_selector: input.pod_selector.clone(),
        namespace_selector: input.namespace_selector.clone(),
        ip_blocks: input
            .ip_blocks
            .iter()
            .map(|b| internal::IPBlock::new(b.cidr.clone()))
            .collect(),
    })
}

fn auto_convert_internal_peer_to_v1(
    input: &internal::NetworkPolicyPeer,
    scope: &Scope,
) -> Result<v1::NetworkPolicyPeer, ConvertError> {
    let _ = scope;
    Ok(v1::NetworkPolicyPeer {
        pod_selector: input.pod_selector.clone(),
        namespace_selector: input.namespace_selector.clone(),
        ip_block: None,
        ip_blocks: input
            .ip_blocks
            .iter()
            .map(|b| v1::IPBlock::new(b.cidr.clone()))
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Peer reconciliation
// ---------------------------------------------------------------------------

/// Convert a v1 peer to its canonical internal form
///
/// Reconciles the deprecated singular `ip_block` with the `ip_blocks` list
/// per the precedence rule documented at module level.
///
/// "Disagrees" means the CIDR strings differ (value equality). The v1
/// fields are owned values here, so two fields can never alias the same
/// storage; a caller that sets both fields to the same CIDR string is
/// treated as consistent and keeps the full list.
///
/// # Errors
/// * `NestedField` - propagated unchanged from the baseline copy; the
///   reconciliation overlay is not applied in that case
pub fn convert_peer_to_internal(
    input: &v1::NetworkPolicyPeer,
    scope: &Scope,
) -> Result<internal::NetworkPolicyPeer, ConvertError> {
    let mut out = auto_convert_v1_peer_to_internal(input, scope)?;

    if let Some(primary) = input.ip_block.as_ref().filter(|b| !b.cidr.is_empty()) {
        match input.ip_blocks.first() {
            // Older clients only ever patch the singular field, so on
            // disagreement it wins and the copied list is replaced outright.
            Some(first) if first.cidr != primary.cidr => {
                out.ip_blocks = vec![internal::IPBlock::new(primary.cidr.clone())];
            }
            Some(_) => {}
            // Only the singular field was set; lift it into the list.
            None => {
                out.ip_blocks = vec![internal::IPBlock::new(primary.cidr.clone())];
            }
        }
    }

    Ok(out)
}

/// Convert a canonical internal peer back to the v1 schema
///
/// The baseline copy carries the list across verbatim; when it is non-empty
/// the deprecated `ip_block` is additionally populated with a copy of the
/// first entry so old clients reading only that field see a value. An empty
/// list leaves `ip_block` unset.
///
/// # Errors
/// * `NestedField` - propagated unchanged from the baseline copy
pub fn convert_peer_to_v1(
    input: &internal::NetworkPolicyPeer,
    scope: &Scope,
) -> Result<v1::NetworkPolicyPeer, ConvertError> {
    let mut out = auto_convert_internal_peer_to_v1(input, scope)?;

    if let Some(first) = input.ip_blocks.first() {
        out.ip_block = Some(v1::IPBlock::new(first.cidr.clone()));
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Whole-object conversion
//
// Mechanical recursion through spec/rules/peers; all reconciliation happens
// at the peer level.
// ---------------------------------------------------------------------------

/// Convert a v1 network policy object to its canonical internal form
///
/// # Errors
/// * `NestedField` - if any nested peer conversion fails
pub fn convert_policy_to_internal(
    input: &v1::NetworkPolicy,
    scope: &Scope,
) -> Result<internal::NetworkPolicy, ConvertError> {
    let mut ingress = Vec::with_capacity(input.spec.ingress.len());
    for rule in &input.spec.ingress {
        let mut from = Vec::with_capacity(rule.from.len());
        for peer in &rule.from {
            from.push(convert_peer_to_internal(peer, scope)?);
        }
        ingress.push(internal::NetworkPolicyIngressRule { from });
    }

    Ok(internal::NetworkPolicy {
        metadata: input.metadata.clone(),
        spec: internal::NetworkPolicySpec { ingress },
    })
}

/// Convert a canonical internal network policy object to the v1 schema
///
/// # Errors
/// * `NestedField` - if any nested peer conversion fails
pub fn convert_policy_to_v1(
    input: &internal::NetworkPolicy,
    scope: &Scope,
) -> Result<v1::NetworkPolicy, ConvertError> {
    let mut ingress = Vec::with_capacity(input.spec.ingress.len());
    for rule in &input.spec.ingress {
        let mut from = Vec::with_capacity(rule.from.len());
        for peer in &rule.from {
            from.push(convert_peer_to_v1(peer, scope)?);
        }
        ingress.push(v1::NetworkPolicyIngressRule { from });
    }

    Ok(v1::NetworkPolicy {
        metadata: input.metadata.clone(),
        spec: v1::NetworkPolicySpec { ingress },
    })
}
