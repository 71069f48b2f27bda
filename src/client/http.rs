use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{ClientError, ClientResult, GoterraClient};
use crate::domain::*;

#[derive(Deserialize)]
struct AuthData {
    #[serde(default)]
    token: String,
}

#[derive(Deserialize, Default)]
struct DefaultsData {
    #[serde(default, deserialize_with = "crate::domain::null_default_values")]
    defaults: InputDefaults,
}

/// REST client bound to one session token.
pub struct HttpGoterraClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpGoterraClient {
    /// Exchanges the API key for a bearer token.
    pub async fn login(base_url: &str, api_key: &str) -> ClientResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::info!("Authenticating against {}", base_url);

        let http = reqwest::Client::new();
        let response = http
            .get(format!("{}/auth/api", base_url))
            .header("X-API-Key", api_key)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Authentication refused: {}", status);
            return Err(ClientError::AuthFailed(service_message(status, &body)));
        }

        let auth: AuthData = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("invalid auth response: {}", e)))?;
        if auth.token.is_empty() {
            return Err(ClientError::AuthFailed("no token in response".to_string()));
        }

        tracing::info!("Authenticated successfully");
        Ok(Self::with_token(&base_url, auth.token))
    }

    pub fn with_token(base_url: &str, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Sends the request and returns the decoded body, or the service's
    /// error message when the status is not `expected`.
    async fn call(
        &self,
        request: RequestBuilder,
        expected: StatusCode,
        context: &str,
    ) -> ClientResult<Value> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status != expected {
            return Err(http_error(context, status, &body));
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("{}: {}", context, e)))
    }

    async fn get<T>(&self, path: &str, key: &str, context: &str) -> ClientResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let body = self
            .call(self.request(Method::GET, path), StatusCode::OK, context)
            .await?;
        field(body, key, context)
    }

    async fn list<T>(&self, path: &str, key: &str, context: &str) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.get(path, key, context).await
    }
}

fn scoped(ns: Option<&str>, public_path: &str, kind: &str) -> String {
    match ns {
        Some(ns) => format!("/deploy/ns/{}/{}", ns, kind),
        None => public_path.to_string(),
    }
}

/// Pulls `key` out of a `{key: ...}` envelope. A missing key decodes as the
/// default value, matching how the service omits empty collections.
fn field<T>(mut body: Value, key: &str, context: &str) -> ClientResult<T>
where
    T: DeserializeOwned + Default,
{
    match body.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ClientError::ParseError(format!("{}: {}", context, e))),
    }
}

/// Some responses wrap the object in `{key: {...}}`, others return it bare.
fn envelope_or_body(mut body: Value, key: &str) -> Value {
    if body.get(key).is_some_and(Value::is_object) {
        return body[key].take();
    }
    body
}

/// Id of a freshly created object: `{key: "id"}`, `{key: {id}}` or `{id}`.
fn created_id(body: &Value, key: &str) -> String {
    let candidate = match body.get(key) {
        Some(Value::String(id)) => Some(id.as_str()),
        Some(inner) => inner.get("id").and_then(Value::as_str),
        None => body.get("id").and_then(Value::as_str),
    };
    candidate.unwrap_or_default().to_string()
}

/// The `message` of an error body, or the status line when there is none.
fn service_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.to_string())
}

fn http_error(context: &str, status: StatusCode, body: &str) -> ClientError {
    ClientError::Api {
        context: context.to_string(),
        status: status.as_u16(),
        message: service_message(status, body),
    }
}

fn transport_error(e: reqwest::Error) -> ClientError {
    ClientError::ConnectionError(e.to_string())
}

#[async_trait]
impl GoterraClient for HttpGoterraClient {
    async fn list_namespaces(&self, all: bool) -> ClientResult<Vec<Namespace>> {
        let mut request = self.request(Method::GET, "/deploy/ns");
        if all {
            request = request.query(&[("all", "1")]);
        }
        let body = self
            .call(request, StatusCode::OK, "get namespaces")
            .await?;
        field(body, "ns", "get namespaces")
    }

    async fn get_namespace(&self, ns: &str) -> ClientResult<Namespace> {
        self.get(&format!("/deploy/ns/{}", ns), "ns", "get namespace")
            .await
    }

    async fn create_namespace(&self, namespace: &Namespace) -> ClientResult<String> {
        let body = self
            .call(
                self.request(Method::POST, "/deploy/ns").json(namespace),
                StatusCode::CREATED,
                "create namespace",
            )
            .await?;
        Ok(created_id(&body, "ns"))
    }

    async fn update_namespace(&self, namespace: &Namespace) -> ClientResult<()> {
        self.call(
            self.request(Method::PUT, &format!("/deploy/ns/{}", namespace.id))
                .json(namespace),
            StatusCode::OK,
            "update namespace",
        )
        .await?;
        Ok(())
    }

    async fn delete_namespace(&self, ns: &str) -> ClientResult<()> {
        self.call(
            self.request(Method::DELETE, &format!("/deploy/ns/{}", ns)),
            StatusCode::OK,
            "delete namespace",
        )
        .await?;
        Ok(())
    }

    async fn list_endpoints(&self, ns: Option<&str>) -> ClientResult<Vec<Endpoint>> {
        self.list(
            &scoped(ns, "/deploy/endpoints", "endpoint"),
            "endpoints",
            "get endpoints",
        )
        .await
    }

    async fn get_endpoint(&self, ns: &str, endpoint: &str) -> ClientResult<Endpoint> {
        self.get(
            &format!("/deploy/ns/{}/endpoint/{}", ns, endpoint),
            "endpoint",
            "get endpoint",
        )
        .await
    }

    async fn endpoint_defaults(&self, ns: &str, endpoint: &str) -> ClientResult<InputDefaults> {
        let body = self
            .call(
                self.request(
                    Method::GET,
                    &format!("/deploy/ns/{}/endpoint/{}/defaults", ns, endpoint),
                ),
                StatusCode::OK,
                "get endpoint defaults",
            )
            .await?;
        if body.is_null() {
            return Ok(InputDefaults::default());
        }
        let data: DefaultsData = serde_json::from_value(body)
            .map_err(|e| ClientError::ParseError(format!("get endpoint defaults: {}", e)))?;
        Ok(data.defaults)
    }

    async fn has_endpoint_secret(&self, ns: &str, endpoint: &str) -> ClientResult<bool> {
        let response = self
            .request(
                Method::GET,
                &format!("/deploy/ns/{}/endpoint/{}/secret", ns, endpoint),
            )
            .send()
            .await
            .map_err(transport_error)?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn list_recipes(&self, ns: Option<&str>) -> ClientResult<Vec<Recipe>> {
        self.list(
            &scoped(ns, "/deploy/recipes", "recipe"),
            "recipes",
            "get recipes",
        )
        .await
    }

    async fn get_recipe(&self, ns: &str, recipe: &str) -> ClientResult<Recipe> {
        self.get(
            &format!("/deploy/ns/{}/recipe/{}", ns, recipe),
            "recipe",
            "get recipe",
        )
        .await
    }

    async fn list_templates(&self, ns: Option<&str>) -> ClientResult<Vec<Template>> {
        self.list(
            &scoped(ns, "/deploy/templates", "template"),
            "templates",
            "get templates",
        )
        .await
    }

    async fn get_template(&self, ns: &str, template: &str) -> ClientResult<Template> {
        self.get(
            &format!("/deploy/ns/{}/template/{}", ns, template),
            "template",
            "get template",
        )
        .await
    }

    async fn list_apps(&self, ns: Option<&str>) -> ClientResult<Vec<Application>> {
        self.list(&scoped(ns, "/deploy/apps", "app"), "apps", "get applications")
            .await
    }

    async fn get_app(&self, ns: &str, app: &str) -> ClientResult<Application> {
        self.get(
            &format!("/deploy/ns/{}/app/{}", ns, app),
            "app",
            "get application",
        )
        .await
    }

    async fn app_inputs(&self, ns: &str, app: &str) -> ClientResult<AppInputs> {
        self.get(
            &format!("/deploy/ns/{}/app/{}/inputs", ns, app),
            "app",
            "get application inputs",
        )
        .await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.list("/auth/user", "users", "get users").await
    }

    async fn get_user(&self, uid: &str) -> ClientResult<User> {
        self.get(&format!("/auth/user/{}", uid), "user", "get user")
            .await
    }

    async fn set_user_password(&self, uid: &str, password: &str) -> ClientResult<()> {
        self.call(
            self.request(Method::PUT, &format!("/auth/user/{}/password", uid))
                .json(&serde_json::json!({ "password": password })),
            StatusCode::OK,
            "update user password",
        )
        .await?;
        Ok(())
    }

    async fn list_runs(&self, ns: Option<&str>) -> ClientResult<Vec<Run>> {
        self.list(&scoped(ns, "/deploy/run", "run"), "runs", "get runs")
            .await
    }

    async fn get_run(&self, ns: &str, run: &str) -> ClientResult<Run> {
        let body = self
            .call(
                self.request(Method::GET, &format!("/deploy/ns/{}/run/{}", ns, run)),
                StatusCode::OK,
                "get run",
            )
            .await?;
        serde_json::from_value(envelope_or_body(body, "run"))
            .map_err(|e| ClientError::ParseError(format!("get run: {}", e)))
    }

    async fn start_run(&self, run: &Run) -> ClientResult<String> {
        tracing::info!(
            "Starting run {} of app {} on endpoint {}",
            run.name,
            run.app_id,
            run.endpoint
        );
        let body = self
            .call(
                self.request(
                    Method::POST,
                    &format!("/deploy/ns/{}/run/{}", run.namespace, run.app_id),
                )
                .json(run),
                StatusCode::CREATED,
                "run application",
            )
            .await?;
        Ok(created_id(&body, "run"))
    }

    async fn delete_run(&self, ns: &str, run: &str) -> ClientResult<()> {
        self.call(
            self.request(Method::DELETE, &format!("/deploy/ns/{}/run/{}", ns, run)),
            StatusCode::OK,
            "delete run",
        )
        .await?;
        Ok(())
    }

    async fn run_store(&self, deployment: &str) -> ClientResult<serde_json::Value> {
        self.call(
            self.request(Method::GET, &format!("/store/{}", deployment)),
            StatusCode::OK,
            "get run store",
        )
        .await
    }
}
