//! Issuer CRD types and the `GenericIssuer` abstraction.

use kube::{Api, Client, CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::status::AWSPCAIssuerStatus;
use crate::registry::IssuerIdentity;

/// AWSPCAIssuer Custom Resource Definition
///
/// Declares how to obtain a certificate-signing capability from an AWS
/// Private CA. The controller verifies the declared configuration and
/// registers a ready-to-use provisioner for the certificate request handler.
///
/// # Example
///
/// ```yaml
/// apiVersion: awspca.cert-manager.io/v1beta1
/// kind: AWSPCAIssuer
/// metadata:
///   name: my-issuer
///   namespace: default
/// spec:
///   arn: arn:aws:acm-pca:us-east-1:123456789012:certificate-authority/abcd
///   region: us-east-1
///   secretRef:
///     namespace: default
///     name: aws-credentials
/// ```
#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "AWSPCAIssuer",
    group = "awspca.cert-manager.io",
    version = "v1beta1",
    namespaced,
    status = "AWSPCAIssuerStatus",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AWSPCAIssuerSpec {
    /// ARN of the AWS Private CA certificate authority to sign with
    pub arn: String,
    /// AWS region of the certificate authority. Falls back to the
    /// controller's default region (AWS_REGION) when empty.
    #[serde(default)]
    pub region: String,
    /// Reference to a secret holding static AWS credentials. When absent the
    /// controller defers to the ambient AWS credential chain.
    #[serde(default)]
    pub secret_ref: Option<AwsSecretRef>,
}

/// AWSPCAClusterIssuer Custom Resource Definition
///
/// Cluster-scoped variant of [`AWSPCAIssuer`] sharing the same spec shape.
#[derive(CustomResource, Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[kube(
    kind = "AWSPCAClusterIssuer",
    group = "awspca.cert-manager.io",
    version = "v1beta1",
    status = "AWSPCAIssuerStatus",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}"#
)]
#[serde(transparent)]
pub struct AWSPCAClusterIssuerSpec(pub AWSPCAIssuerSpec);

/// Reference to a Kubernetes secret holding AWS credentials
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsSecretRef {
    /// Namespace of the secret
    pub namespace: String,
    /// Name of the secret
    pub name: String,
}

/// Abstraction over the two issuer kinds.
///
/// The reconciliation core is written once against this trait; each kind
/// contributes its spec accessor and a status-capable `Api` handle.
pub trait GenericIssuer:
    Resource<DynamicType = ()>
    + Clone
    + std::fmt::Debug
    + serde::de::DeserializeOwned
    + Serialize
    + Send
    + Sync
    + 'static
{
    /// Kubernetes kind, used in logging spans.
    const KIND: &'static str;

    fn spec(&self) -> &AWSPCAIssuerSpec;

    fn status(&self) -> Option<&AWSPCAIssuerStatus>;

    /// Registry key for this resource. Cluster-scoped issuers carry an empty
    /// namespace, mirroring their reconcile request key.
    fn identity(&self) -> IssuerIdentity {
        IssuerIdentity::new(
            self.meta().namespace.clone().unwrap_or_default(),
            self.meta().name.clone().unwrap_or_default(),
        )
    }

    /// `Api` handle able to patch this resource's status subresource.
    fn status_api(&self, client: Client) -> Api<Self>;
}

impl GenericIssuer for AWSPCAIssuer {
    const KIND: &'static str = "AWSPCAIssuer";

    fn spec(&self) -> &AWSPCAIssuerSpec {
        &self.spec
    }

    fn status(&self) -> Option<&AWSPCAIssuerStatus> {
        self.status.as_ref()
    }

    fn status_api(&self, client: Client) -> Api<Self> {
        Api::namespaced(client, self.meta().namespace.as_deref().unwrap_or("default"))
    }
}

impl GenericIssuer for AWSPCAClusterIssuer {
    const KIND: &'static str = "AWSPCAClusterIssuer";

    fn spec(&self) -> &AWSPCAIssuerSpec {
        &self.spec.0
    }

    fn status(&self) -> Option<&AWSPCAIssuerStatus> {
        self.status.as_ref()
    }

    fn status_api(&self, client: Client) -> Api<Self> {
        Api::all(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::CustomResourceExt;

    #[test]
    fn issuer_crd_names() {
        let crd = AWSPCAIssuer::crd();
        assert_eq!(crd.spec.group, "awspca.cert-manager.io");
        assert_eq!(crd.spec.names.kind, "AWSPCAIssuer");
        assert_eq!(crd.spec.scope, "Namespaced");
    }

    #[test]
    fn cluster_issuer_crd_is_cluster_scoped() {
        let crd = AWSPCAClusterIssuer::crd();
        assert_eq!(crd.spec.names.kind, "AWSPCAClusterIssuer");
        assert_eq!(crd.spec.scope, "Cluster");
    }

    #[test]
    fn spec_deserializes_minimal_form() {
        let spec: AWSPCAIssuerSpec = serde_json::from_value(serde_json::json!({
            "arn": "arn:aws:acm-pca:us-east-1:123456789012:certificate-authority/abcd"
        }))
        .unwrap();
        assert!(spec.region.is_empty());
        assert!(spec.secret_ref.is_none());
    }

    #[test]
    fn cluster_spec_is_wire_transparent() {
        // The cluster-scoped spec must accept the exact same document as the
        // namespaced one.
        let json = serde_json::json!({
            "arn": "arn:aws:acm-pca:eu-west-1:123456789012:certificate-authority/abcd",
            "region": "eu-west-1",
            "secretRef": {"namespace": "kube-system", "name": "aws-creds"}
        });
        let spec: AWSPCAClusterIssuerSpec = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(spec.0.region, "eu-west-1");
        assert_eq!(serde_json::to_value(&spec).unwrap(), json);
    }

    #[test]
    fn identity_of_namespaced_issuer_includes_namespace() {
        let issuer: AWSPCAIssuer = serde_json::from_value(serde_json::json!({
            "apiVersion": "awspca.cert-manager.io/v1beta1",
            "kind": "AWSPCAIssuer",
            "metadata": {"name": "my-issuer", "namespace": "prod"},
            "spec": {"arn": "arn:aws:acm-pca:::ca/1"}
        }))
        .unwrap();
        let identity = issuer.identity();
        assert_eq!(identity.namespace, "prod");
        assert_eq!(identity.name, "my-issuer");
    }

    #[test]
    fn identity_of_cluster_issuer_has_empty_namespace() {
        let issuer: AWSPCAClusterIssuer = serde_json::from_value(serde_json::json!({
            "apiVersion": "awspca.cert-manager.io/v1beta1",
            "kind": "AWSPCAClusterIssuer",
            "metadata": {"name": "shared-issuer"},
            "spec": {"arn": "arn:aws:acm-pca:::ca/1"}
        }))
        .unwrap();
        let identity = issuer.identity();
        assert_eq!(identity.namespace, "");
        assert_eq!(identity.name, "shared-issuer");
    }
}
