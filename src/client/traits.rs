use async_trait::async_trait;
use thiserror::Error;

use crate::domain::*;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("Failed to authenticate: {0}")]
    AuthFailed(String),
    /// Non-success status; `message` is the text the service sent back.
    #[error("Failed to {context}: {message}")]
    Api {
        context: String,
        status: u16,
        message: String,
    },
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Everything the CLI asks of the goterra service.
///
/// `ns` is optional on the list calls: `None` lists public objects,
/// `Some(id)` lists the namespace's own.
#[async_trait]
pub trait GoterraClient: Send + Sync {
    async fn list_namespaces(&self, all: bool) -> ClientResult<Vec<Namespace>>;

    async fn get_namespace(&self, ns: &str) -> ClientResult<Namespace>;

    /// Returns the new namespace id.
    async fn create_namespace(&self, namespace: &Namespace) -> ClientResult<String>;

    async fn update_namespace(&self, namespace: &Namespace) -> ClientResult<()>;

    async fn delete_namespace(&self, ns: &str) -> ClientResult<()>;

    async fn list_endpoints(&self, ns: Option<&str>) -> ClientResult<Vec<Endpoint>>;

    async fn get_endpoint(&self, ns: &str, endpoint: &str) -> ClientResult<Endpoint>;

    async fn endpoint_defaults(&self, ns: &str, endpoint: &str) -> ClientResult<InputDefaults>;

    /// Whether the caller has stored credentials for the endpoint.
    async fn has_endpoint_secret(&self, ns: &str, endpoint: &str) -> ClientResult<bool>;

    async fn list_recipes(&self, ns: Option<&str>) -> ClientResult<Vec<Recipe>>;

    async fn get_recipe(&self, ns: &str, recipe: &str) -> ClientResult<Recipe>;

    async fn list_templates(&self, ns: Option<&str>) -> ClientResult<Vec<Template>>;

    async fn get_template(&self, ns: &str, template: &str) -> ClientResult<Template>;

    async fn list_apps(&self, ns: Option<&str>) -> ClientResult<Vec<Application>>;

    async fn get_app(&self, ns: &str, app: &str) -> ClientResult<Application>;

    async fn app_inputs(&self, ns: &str, app: &str) -> ClientResult<AppInputs>;

    async fn list_users(&self) -> ClientResult<Vec<User>>;

    async fn get_user(&self, uid: &str) -> ClientResult<User>;

    async fn set_user_password(&self, uid: &str, password: &str) -> ClientResult<()>;

    async fn list_runs(&self, ns: Option<&str>) -> ClientResult<Vec<Run>>;

    async fn get_run(&self, ns: &str, run: &str) -> ClientResult<Run>;

    /// Returns the new run id.
    async fn start_run(&self, run: &Run) -> ClientResult<String>;

    async fn delete_run(&self, ns: &str, run: &str) -> ClientResult<()>;

    async fn run_store(&self, deployment: &str) -> ClientResult<serde_json::Value>;
}
