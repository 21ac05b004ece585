//! # Provisioner Registry
//!
//! Shared mapping from issuer identity to the provisioner verified for it.
//!
//! The registry is constructed once in `main` and handed by `Arc` to both the
//! reconciler (writer) and the certificate request handler (reader). Entries
//! are whole-value replacements; there is no eviction, so an entry for a
//! deleted issuer persists until the process restarts or another
//! reconciliation of the same identity overwrites it.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::provider::pca::PcaProvisioner;

/// Two-part key uniquely identifying an issuer resource.
///
/// Cluster-scoped issuers use an empty namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssuerIdentity {
    pub namespace: String,
    pub name: String,
}

impl IssuerIdentity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for IssuerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Concurrent registry of verified provisioners.
#[derive(Debug, Default)]
pub struct ProvisionerRegistry {
    provisioners: RwLock<HashMap<IssuerIdentity, Arc<PcaProvisioner>>>,
}

impl ProvisionerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provisioner for an identity, replacing any previous entry.
    pub fn store(&self, identity: IssuerIdentity, provisioner: Arc<PcaProvisioner>) {
        self.provisioners
            .write()
            .unwrap()
            .insert(identity, provisioner);
    }

    /// Look up the provisioner for an identity. Used by the certificate
    /// request handler.
    #[must_use]
    pub fn get(&self, identity: &IssuerIdentity) -> Option<Arc<PcaProvisioner>> {
        self.provisioners.read().unwrap().get(identity).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.provisioners.read().unwrap().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.provisioners.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::{BehaviorVersion, SdkConfig};

    fn test_provisioner(arn: &str) -> Arc<PcaProvisioner> {
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        Arc::new(PcaProvisioner::new(&config, arn))
    }

    #[test]
    fn get_returns_none_for_unknown_identity() {
        let registry = ProvisionerRegistry::new();
        assert!(registry
            .get(&IssuerIdentity::new("default", "missing"))
            .is_none());
    }

    #[test]
    fn store_then_get_round_trips() {
        let registry = ProvisionerRegistry::new();
        let identity = IssuerIdentity::new("default", "my-issuer");
        registry.store(identity.clone(), test_provisioner("arn:aws:acm-pca:::ca/1"));

        let handle = registry.get(&identity).expect("entry registered");
        assert_eq!(handle.arn(), "arn:aws:acm-pca:::ca/1");
    }

    #[test]
    fn store_overwrites_previous_entry_for_same_identity() {
        let registry = ProvisionerRegistry::new();
        let identity = IssuerIdentity::new("default", "my-issuer");

        registry.store(identity.clone(), test_provisioner("arn:aws:acm-pca:::ca/old"));
        registry.store(identity.clone(), test_provisioner("arn:aws:acm-pca:::ca/new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&identity).unwrap().arn(),
            "arn:aws:acm-pca:::ca/new"
        );
    }

    #[test]
    fn identities_differing_only_by_namespace_are_distinct() {
        let registry = ProvisionerRegistry::new();
        registry.store(
            IssuerIdentity::new("team-a", "issuer"),
            test_provisioner("arn:aws:acm-pca:::ca/a"),
        );
        registry.store(
            IssuerIdentity::new("team-b", "issuer"),
            test_provisioner("arn:aws:acm-pca:::ca/b"),
        );

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(&IssuerIdentity::new("team-a", "issuer")).unwrap().arn(),
            "arn:aws:acm-pca:::ca/a"
        );
    }

    #[test]
    fn concurrent_stores_produce_one_entry_per_identity() {
        let registry = Arc::new(ProvisionerRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let identity = IssuerIdentity::new("default", format!("issuer-{i}"));
                    let arn = format!("arn:aws:acm-pca:::ca/{i}");
                    registry.store(identity, test_provisioner(&arn));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 16);
        for i in 0..16 {
            let identity = IssuerIdentity::new("default", format!("issuer-{i}"));
            assert_eq!(
                registry.get(&identity).unwrap().arn(),
                format!("arn:aws:acm-pca:::ca/{i}")
            );
        }
    }

    #[test]
    fn identity_display_is_namespace_slash_name() {
        assert_eq!(
            IssuerIdentity::new("default", "my-issuer").to_string(),
            "default/my-issuer"
        );
        assert_eq!(IssuerIdentity::new("", "cluster-issuer").to_string(), "/cluster-issuer");
    }
}
