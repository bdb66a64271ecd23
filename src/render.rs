//! Template rendering seam.
//!
//! The exporter only needs "template name + props → HTML string". The
//! [`Renderer`] trait is that capability; [`JinjaRenderer`] is the shipped
//! implementation, a MiniJinja environment that loads templates from the
//! emails directory. HTML templates are auto-escaped.

use minijinja::{Environment, path_loader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),
    #[error("Template {template} failed: {message}")]
    Failed { template: String, message: String },
}

/// Turns a template plus its props into HTML.
pub trait Renderer {
    fn render(&self, template: &str, props: &toml::Table) -> Result<String, RenderError>;
}

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Renderer that resolves template names relative to `emails_dir`.
    pub fn new(emails_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(emails_dir));
        Self { env }
    }
}

impl Renderer for JinjaRenderer {
    fn render(&self, template: &str, props: &toml::Table) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(template).map_err(|e| {
            if e.kind() == minijinja::ErrorKind::TemplateNotFound {
                RenderError::NotFound(template.to_string())
            } else {
                RenderError::Failed {
                    template: template.to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        tmpl.render(props).map_err(|e| RenderError::Failed {
            template: template.to_string(),
            message: e.to_string(),
        })
    }
}
