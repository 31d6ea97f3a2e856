//! Signature HTML rendering.
//!
//! Stored `template_data` is free-form JSON. Before anything is rendered it is validated into
//! [`SignatureFields`]; a field that is absent or not a string is reported by its dotted path
//! (for example `social_links.twitter`) as [`Error::MissingTemplateField`].
//!
//! Layouts are minijinja templates with HTML auto-escaping, so field values cannot inject markup.
//! Link fields that carry a scheme other than http(s) are replaced by `#`, so a stored
//! `javascript:` URL never reaches an `href`.

use crate::errors::Error;
use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use url::Url;

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

const BASIC: &str = "basic.html";
const MODERN: &str = "modern.html";
const PREVIEW: &str = "preview.html";

/// Which fixed layout to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateKind {
    #[default]
    Basic,
    Modern,
}

impl TemplateKind {
    /// `modern` selects the modern layout; anything else, including no value, is basic.
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("modern") => TemplateKind::Modern,
            _ => TemplateKind::Basic,
        }
    }

    fn template_name(self) -> &'static str {
        match self {
            TemplateKind::Basic => BASIC,
            TemplateKind::Modern => MODERN,
        }
    }
}

/// The fields every layout interpolates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureFields {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub phone: String,
    pub website: String,
    pub linkedin: String,
    pub twitter: String,
}

fn required_str(object: Option<&Map<String, Value>>, key: &str, path: &str) -> Result<String, Error> {
    object
        .and_then(|object| object.get(key))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingTemplateField { field: path.to_string() })
}

impl SignatureFields {
    /// Validate stored template data. Fields are checked in layout order and the first
    /// missing one is reported.
    pub fn from_template_data(data: &Map<String, Value>) -> Result<Self, Error> {
        let top = Some(data);
        let name = required_str(top, "name", "name")?;
        let job_title = required_str(top, "job_title", "job_title")?;
        let company = required_str(top, "company", "company")?;
        let phone = required_str(top, "phone", "phone")?;
        let website = safe_href(required_str(top, "website", "website")?);

        let social = data.get("social_links").and_then(Value::as_object);
        let linkedin = safe_href(required_str(social, "linkedin", "social_links.linkedin")?);
        let twitter = safe_href(required_str(social, "twitter", "social_links.twitter")?);

        Ok(Self {
            name,
            job_title,
            company,
            phone,
            website,
            linkedin,
            twitter,
        })
    }
}

/// Keep a link value unless it names a scheme browsers would act on other than http(s).
///
/// Values without a scheme (`example.com`, `w`) are kept as they are.
fn safe_href(value: String) -> String {
    match Url::parse(&value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => "#".to_string(),
        _ => value,
    }
}

/// The parsed layouts, built on first use and shared afterwards.
///
/// Called at start-up so a broken template fails the process instead of a request.
pub fn environment() -> Result<&'static Environment<'static>, Error> {
    if let Some(env) = ENVIRONMENT.get() {
        return Ok(env);
    }
    let env = build_environment()?;
    Ok(ENVIRONMENT.get_or_init(|| env))
}

fn build_environment() -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    for (name, source) in [
        (BASIC, include_str!("../templates/basic.html")),
        (MODERN, include_str!("../templates/modern.html")),
        (PREVIEW, include_str!("../templates/preview.html")),
    ] {
        env.add_template(name, source).map_err(|e| Error::Internal {
            operation: format!("load template {name}: {e}"),
        })?;
    }
    Ok(env)
}

fn render_with(env: &Environment<'_>, name: &str, ctx: minijinja::Value) -> Result<String, Error> {
    env.get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|e| Error::Internal {
            operation: format!("render template {name}: {e}"),
        })
}

/// Render the bare signature fragment, as pasted into a mail client.
pub fn render_fragment(fields: &SignatureFields, kind: TemplateKind) -> Result<String, Error> {
    let env = environment()?;
    render_with(env, kind.template_name(), minijinja::Value::from_serialize(fields))
}

/// Render the fragment wrapped in a standalone preview page.
pub fn render_preview(fields: &SignatureFields, kind: TemplateKind) -> Result<String, Error> {
    let env = environment()?;
    let fragment = render_with(env, kind.template_name(), minijinja::Value::from_serialize(fields))?;
    render_with(env, PREVIEW, context! { signature => fragment })
}
