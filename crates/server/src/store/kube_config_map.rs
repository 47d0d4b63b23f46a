use k8s_openapi::api::core::v1::ConfigMap;
use kube::api::{Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client};

use super::config_map::{ConfigMapSnapshot, ConfigMapSource};
use super::error::StoreError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// ConfigMaps of one namespace, reached through the cluster API server.
#[derive(Clone)]
pub struct KubeConfigMaps {
    api: Api<ConfigMap>,
}

impl KubeConfigMaps {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }

    /// An empty `kube_config_path` infers the config: in-cluster service
    /// account first, then the default kubeconfig.
    pub async fn connect(kube_config_path: &str, namespace: &str) -> Result<Self, BoxError> {
        let config = if kube_config_path.is_empty() {
            kube::Config::infer().await?
        } else {
            let kubeconfig = Kubeconfig::read_from(kube_config_path)?;
            kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()).await?
        };
        let client = Client::try_from(config)?;
        Ok(Self::new(client, namespace))
    }
}

fn map_kube_error(e: kube::Error) -> StoreError {
    match e {
        kube::Error::Api(resp) if resp.code == 409 => StoreError::Conflict(resp.message),
        kube::Error::Api(resp) => {
            StoreError::Upstream(format!("{} (HTTP {})", resp.message, resp.code))
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[async_trait::async_trait]
impl ConfigMapSource for KubeConfigMaps {
    async fn get(&self, name: &str) -> Result<ConfigMapSnapshot, StoreError> {
        let cm = self.api.get(name).await.map_err(map_kube_error)?;
        Ok(ConfigMapSnapshot {
            data: cm.data.unwrap_or_default(),
            resource_version: cm.metadata.resource_version,
        })
    }

    async fn update_key(
        &self,
        name: &str,
        key: &str,
        value: String,
        resource_version: Option<&str>,
    ) -> Result<Option<String>, StoreError> {
        // A merge patch carrying metadata.resourceVersion is rejected with 409
        // by the API server when the object moved on.
        let mut metadata = serde_json::Map::new();
        if let Some(rv) = resource_version {
            metadata.insert("resourceVersion".into(), rv.into());
        }
        let mut data = serde_json::Map::new();
        data.insert(key.to_string(), value.into());
        let body = serde_json::json!({ "metadata": metadata, "data": data });

        let cm = self
            .api
            .patch(name, &PatchParams::default(), &Patch::Merge(&body))
            .await
            .map_err(map_kube_error)?;

        tracing::debug!(config_map = name, key, "config map key patched");
        Ok(cm.metadata.resource_version)
    }
}
