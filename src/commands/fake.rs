//! In-memory [`GoterraClient`] for command tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::{ClientError, ClientResult, GoterraClient};
use crate::domain::*;

#[derive(Default)]
pub(crate) struct FakeClient {
    pub namespaces: Mutex<Vec<Namespace>>,
    pub endpoints: Vec<Endpoint>,
    pub recipes: Vec<Recipe>,
    pub templates: Vec<Template>,
    pub apps: Vec<Application>,
    pub users: Vec<User>,
    pub runs: Vec<Run>,
    pub app_inputs: AppInputs,
    /// `None` makes the defaults call fail.
    pub endpoint_defaults: Option<InputDefaults>,
    pub has_secret: bool,
    pub store: serde_json::Value,
    pub calls: Mutex<Vec<String>>,
    pub started: Mutex<Vec<Run>>,
    pub passwords: Mutex<Vec<(String, String)>>,
}

fn not_found(context: &str) -> ClientError {
    ClientError::Api {
        context: context.to_string(),
        status: 404,
        message: "not found".to_string(),
    }
}

fn find<T: Clone>(items: &[T], pred: impl Fn(&T) -> bool, context: &str) -> ClientResult<T> {
    items
        .iter()
        .find(|item| pred(item))
        .cloned()
        .ok_or_else(|| not_found(context))
}

fn in_scope(ns: Option<&str>, namespace: &str, public: bool) -> bool {
    match ns {
        Some(ns) => ns == namespace,
        None => public,
    }
}

impl FakeClient {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GoterraClient for FakeClient {
    async fn list_namespaces(&self, all: bool) -> ClientResult<Vec<Namespace>> {
        self.record(format!("list_namespaces all={}", all));
        Ok(self.namespaces.lock().unwrap().clone())
    }

    async fn get_namespace(&self, ns: &str) -> ClientResult<Namespace> {
        self.record(format!("get_namespace {}", ns));
        find(self.namespaces.lock().unwrap().as_slice(), |n| n.id == ns, "get namespace")
    }

    async fn create_namespace(&self, namespace: &Namespace) -> ClientResult<String> {
        self.record(format!("create_namespace {}", namespace.name));
        let mut created = namespace.clone();
        created.id = format!("ns-{}", namespace.name);
        self.namespaces.lock().unwrap().push(created.clone());
        Ok(created.id)
    }

    async fn update_namespace(&self, namespace: &Namespace) -> ClientResult<()> {
        self.record(format!("update_namespace {}", namespace.id));
        let mut namespaces = self.namespaces.lock().unwrap();
        let slot = namespaces
            .iter_mut()
            .find(|n| n.id == namespace.id)
            .ok_or_else(|| not_found("update namespace"))?;
        *slot = namespace.clone();
        Ok(())
    }

    async fn delete_namespace(&self, ns: &str) -> ClientResult<()> {
        self.record(format!("delete_namespace {}", ns));
        self.namespaces.lock().unwrap().retain(|n| n.id != ns);
        Ok(())
    }

    async fn list_endpoints(&self, ns: Option<&str>) -> ClientResult<Vec<Endpoint>> {
        Ok(self
            .endpoints
            .iter()
            .filter(|e| in_scope(ns, &e.namespace, e.public))
            .cloned()
            .collect())
    }

    async fn get_endpoint(&self, _ns: &str, endpoint: &str) -> ClientResult<Endpoint> {
        self.record(format!("get_endpoint {}", endpoint));
        find(&self.endpoints, |e| e.id == endpoint, "get endpoint")
    }

    async fn endpoint_defaults(&self, _ns: &str, endpoint: &str) -> ClientResult<InputDefaults> {
        self.record(format!("endpoint_defaults {}", endpoint));
        self.endpoint_defaults
            .clone()
            .ok_or_else(|| not_found("get endpoint defaults"))
    }

    async fn has_endpoint_secret(&self, _ns: &str, endpoint: &str) -> ClientResult<bool> {
        self.record(format!("has_endpoint_secret {}", endpoint));
        Ok(self.has_secret)
    }

    async fn list_recipes(&self, ns: Option<&str>) -> ClientResult<Vec<Recipe>> {
        Ok(self
            .recipes
            .iter()
            .filter(|r| in_scope(ns, &r.namespace, r.public))
            .cloned()
            .collect())
    }

    async fn get_recipe(&self, _ns: &str, recipe: &str) -> ClientResult<Recipe> {
        find(&self.recipes, |r| r.id == recipe, "get recipe")
    }

    async fn list_templates(&self, ns: Option<&str>) -> ClientResult<Vec<Template>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| in_scope(ns, &t.namespace, t.public))
            .cloned()
            .collect())
    }

    async fn get_template(&self, _ns: &str, template: &str) -> ClientResult<Template> {
        find(&self.templates, |t| t.id == template, "get template")
    }

    async fn list_apps(&self, ns: Option<&str>) -> ClientResult<Vec<Application>> {
        Ok(self
            .apps
            .iter()
            .filter(|a| in_scope(ns, &a.namespace, a.public))
            .cloned()
            .collect())
    }

    async fn get_app(&self, _ns: &str, app: &str) -> ClientResult<Application> {
        find(&self.apps, |a| a.id == app, "get application")
    }

    async fn app_inputs(&self, _ns: &str, app: &str) -> ClientResult<AppInputs> {
        self.record(format!("app_inputs {}", app));
        Ok(self.app_inputs.clone())
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn get_user(&self, uid: &str) -> ClientResult<User> {
        find(&self.users, |u| u.uid == uid, "get user")
    }

    async fn set_user_password(&self, uid: &str, password: &str) -> ClientResult<()> {
        find(&self.users, |u| u.uid == uid, "update user password")?;
        self.passwords
            .lock()
            .unwrap()
            .push((uid.to_string(), password.to_string()));
        Ok(())
    }

    async fn list_runs(&self, ns: Option<&str>) -> ClientResult<Vec<Run>> {
        Ok(self
            .runs
            .iter()
            .filter(|r| ns.map_or(true, |ns| ns == r.namespace))
            .cloned()
            .collect())
    }

    async fn get_run(&self, _ns: &str, run: &str) -> ClientResult<Run> {
        find(&self.runs, |r| r.id == run, "get run")
    }

    async fn start_run(&self, run: &Run) -> ClientResult<String> {
        self.record(format!("start_run {}", run.name));
        let mut started = self.started.lock().unwrap();
        started.push(run.clone());
        Ok(format!("run-{}", started.len()))
    }

    async fn delete_run(&self, ns: &str, run: &str) -> ClientResult<()> {
        self.record(format!("delete_run {} {}", ns, run));
        Ok(())
    }

    async fn run_store(&self, deployment: &str) -> ClientResult<serde_json::Value> {
        self.record(format!("run_store {}", deployment));
        Ok(self.store.clone())
    }
}
