//! Run parameter collection.
//!
//! An application declares its inputs in three groups (template, recipes,
//! and per-endpoint). Each input is filled from the defaults the service
//! knows about, or asked interactively when no single default exists.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AppInputs, InputDefaults, InputLabels};

/// Input name -> chosen value, sent as the run's `inputs`.
pub type RunParams = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("prompt failed: {0}")]
    Prompt(String),
    #[error("failed to read parameters file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid parameters file {path}: {message}")]
    Invalid { path: String, message: String },
    #[error("failed to render parameters: {0}")]
    Render(#[from] serde_yaml::Error),
}

/// Interactive side of parameter resolution.
pub trait Prompter {
    /// Asks for a value. `choices` lists candidates from the default
    /// sources; it may be empty.
    fn ask(&mut self, label: &str, choices: &[String]) -> Result<String, ParamsError>;

    /// Yes/no question before destructive calls.
    fn confirm(&mut self, question: &str) -> Result<bool, ParamsError>;

    fn section(&mut self, _title: &str) {}

    fn default_selected(&mut self, _name: &str, _value: &str) {}
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&mut self, label: &str, choices: &[String]) -> Result<String, ParamsError> {
        if !choices.is_empty() {
            println!("Choices: {}", choices.join(","));
        }
        dialoguer::Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ParamsError::Prompt(e.to_string()))
    }

    fn confirm(&mut self, question: &str) -> Result<bool, ParamsError> {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(|e| ParamsError::Prompt(e.to_string()))
    }

    fn section(&mut self, title: &str) {
        println!("{} parameters:", title);
    }

    fn default_selected(&mut self, _name: &str, value: &str) {
        println!("Default: {}", value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Single(String),
    Choices(Vec<String>),
    None,
}

/// Looks `name` up in each source, least specific first. A later single
/// value replaces an earlier one; multi-valued entries only add choices.
pub fn candidate(name: &str, sources: &[&InputDefaults]) -> Candidate {
    let mut single = None;
    let mut choices: Vec<String> = Vec::new();

    for source in sources {
        match source.get(name).map(Vec::as_slice) {
            Some([value]) if !value.is_empty() => single = Some(value.clone()),
            Some(values) => {
                for value in values {
                    if !value.is_empty() && !choices.contains(value) {
                        choices.push(value.clone());
                    }
                }
            }
            None => {}
        }
    }

    match single {
        Some(value) => Candidate::Single(value),
        None if !choices.is_empty() => Candidate::Choices(choices),
        None => Candidate::None,
    }
}

/// Resolves every declared input of the application for one endpoint.
///
/// Groups are walked template, recipe, endpoint; `endpoint_defaults` wins
/// over the application's own defaults.
pub fn resolve(
    inputs: &AppInputs,
    endpoint_name: &str,
    endpoint_defaults: Option<&InputDefaults>,
    prompter: &mut dyn Prompter,
) -> Result<RunParams, ParamsError> {
    let mut sources = vec![&inputs.defaults];
    if let Some(defaults) = endpoint_defaults {
        sources.push(defaults);
    }

    let no_inputs = InputLabels::new();
    let groups = [
        ("Template", &inputs.template),
        ("Recipe", &inputs.recipes),
        (
            "Endpoint",
            inputs.endpoint_inputs(endpoint_name).unwrap_or(&no_inputs),
        ),
    ];

    let mut params = RunParams::new();
    for (title, group) in groups {
        prompter.section(title);
        for (name, label) in group {
            let value = match candidate(name, &sources) {
                Candidate::Single(value) => {
                    prompter.default_selected(name, &value);
                    value
                }
                Candidate::Choices(choices) => prompter.ask(prompt_label(name, label), &choices)?,
                Candidate::None => prompter.ask(prompt_label(name, label), &[])?,
            };
            tracing::debug!("parameter {} resolved", name);
            params.insert(name.clone(), value);
        }
    }
    Ok(params)
}

fn prompt_label<'a>(name: &'a str, label: &'a str) -> &'a str {
    if label.is_empty() {
        name
    } else {
        label
    }
}

/// On-disk form of run parameters:
///
/// ```yaml
/// params:
///   flavor: m1.small
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunInputs {
    #[serde(default)]
    pub params: RunParams,
}

#[derive(Deserialize)]
struct RawRunInputs {
    #[serde(default)]
    params: BTreeMap<String, serde_yaml::Value>,
}

impl RunInputs {
    pub fn new(params: RunParams) -> Self {
        Self { params }
    }

    pub fn load(path: &Path) -> Result<Self, ParamsError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ParamsError::Read {
            path: display.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|message| ParamsError::Invalid {
            path: display,
            message,
        })
    }

    /// Scalar values are accepted as-is, so `count: 2` reads as `"2"`.
    pub fn parse(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawRunInputs = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        let mut params = RunParams::new();
        for (name, value) in raw.params {
            let value = match value {
                serde_yaml::Value::Null => String::new(),
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                serde_yaml::Value::String(s) => s,
                _ => return Err(format!("parameter {} must be a scalar", name)),
            };
            params.insert(name, value);
        }
        Ok(Self { params })
    }

    pub fn to_yaml(&self) -> Result<String, ParamsError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
