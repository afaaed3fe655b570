use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::errors::ConfigError;
use crate::schema::{FormKind, FormSchema};

const SUPABASE_URL: &str = "INTAKE_SUPABASE_URL";
const SUPABASE_ANON_KEY: &str = "INTAKE_SUPABASE_ANON_KEY";
const PORT: &str = "INTAKE_PORT";
const ADMIN_PORT: &str = "INTAKE_ADMIN_PORT";
const APPLICATION_SCHEMA: &str = "INTAKE_APPLICATION_SCHEMA";
const CONTACT_SCHEMA: &str = "INTAKE_CONTACT_SCHEMA";

/// Returns the value of the named environment variable if it is set and
/// not blank.
pub fn get_variable(name: &'static str) -> Result<String, ConfigError> {
    get_optional_variable(name).ok_or(ConfigError::MissingVariable { name })
}

fn get_optional_variable(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Everything read from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub supabase_url: Url,
    pub supabase_anon_key: String,
    pub port: u16,
    pub admin_port: u16,
    pub application_schema: Option<PathBuf>,
    pub contact_schema: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url = parse_url(SUPABASE_URL, &get_variable(SUPABASE_URL)?)?;

        Ok(Self {
            supabase_url,
            supabase_anon_key: get_variable(SUPABASE_ANON_KEY)?,
            port: parse_port(PORT, &get_variable(PORT)?)?,
            admin_port: parse_port(ADMIN_PORT, &get_variable(ADMIN_PORT)?)?,
            application_schema: schema_override(FormKind::Application),
            contact_schema: schema_override(FormKind::Contact),
        })
    }

    /// The path of the schema override for the given form, if any.
    pub fn schema_path(&self, kind: FormKind) -> Option<&Path> {
        match kind {
            FormKind::Application => self.application_schema.as_deref(),
            FormKind::Contact => self.contact_schema.as_deref(),
        }
    }
}

/// The schema file configured for the given form, if any.
pub fn schema_override(kind: FormKind) -> Option<PathBuf> {
    let name = match kind {
        FormKind::Application => APPLICATION_SCHEMA,
        FormKind::Contact => CONTACT_SCHEMA,
    };

    get_optional_variable(name).map(PathBuf::from)
}

/// Loads the schema for `kind` from `path`, or returns the built-in one
/// if no override is configured.
pub fn load_schema(kind: FormKind, path: Option<&Path>) -> Result<FormSchema, ConfigError> {
    let path = match path {
        Some(path) => path,
        None => return Ok(FormSchema::builtin(kind)),
    };

    let raw = fs::read(path).map_err(|source| ConfigError::SchemaFile {
        path: path.to_owned(),
        source,
    })?;

    let schema: FormSchema =
        serde_json::from_slice(&raw).map_err(|source| ConfigError::SchemaSyntax {
            path: path.to_owned(),
            source,
        })?;

    schema
        .check()
        .and_then(|_| schema.check_kind(kind))
        .map_err(|source| ConfigError::InvalidSchema {
            path: path.to_owned(),
            source,
        })?;

    Ok(schema)
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidVariable {
        name,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidVariable {
            name,
            reason: format!("unsupported scheme {}", other),
        }),
    }
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidVariable {
        name,
        reason: e.to_string(),
    })
}
