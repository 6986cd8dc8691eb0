//! Template resolution and caching.
//!
//! Templates are addressed by a [`TemplateKey`]: the logical template name,
//! the message part it renders and, for bodies, the content variant. Sources
//! are pulled through a [`TemplateLoader`] on first access and cached for the
//! lifetime of the process; entries are never evicted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use handlebars::Handlebars;
use include_dir::Dir;
use tracing::debug;

use crate::error::{CourierError, Result};

/// Extension shared by all template files.
const TEMPLATE_EXTENSION: &str = "tpl";

/// Message part a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplatePart {
    /// Extra message headers, one `Name: value` per line.
    Headers,
    /// The subject line.
    Subject,
    /// The message body.
    Body,
}

impl TemplatePart {
    fn suffix(self) -> &'static str {
        match self {
            Self::Headers => "headers",
            Self::Subject => "subject",
            Self::Body => "body",
        }
    }
}

/// Renderable form of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyVariant {
    /// Plain text.
    Text,
    /// HTML markup.
    Html,
}

/// Identifies one cacheable template slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    /// Logical template name, e.g. `"welcome"`.
    pub name: String,
    /// Message part this template renders.
    pub part: TemplatePart,
    /// Body variant; `None` selects the legacy unsuffixed body file.
    /// Meaningless for headers and subject.
    pub variant: Option<BodyVariant>,
}

impl TemplateKey {
    /// Key for the headers template of `name`.
    pub fn headers(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part: TemplatePart::Headers,
            variant: None,
        }
    }

    /// Key for the subject template of `name`.
    pub fn subject(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            part: TemplatePart::Subject,
            variant: None,
        }
    }

    /// Key for a body template of `name`.
    pub fn body(name: impl Into<String>, variant: Option<BodyVariant>) -> Self {
        Self {
            name: name.into(),
            part: TemplatePart::Body,
            variant,
        }
    }

    /// Filename of the backing template, excluding the path.
    ///
    /// `welcome` + subject gives `welcome_subject.tpl`; a body with the html
    /// variant gives `welcome_body.tpl.html`, with no variant the legacy
    /// `welcome_body.tpl`.
    pub fn filename(&self) -> String {
        let filename = format!("{}_{}.{}", self.name, self.part.suffix(), TEMPLATE_EXTENSION);
        match (self.part, self.variant) {
            (TemplatePart::Body, Some(BodyVariant::Text)) => format!("{filename}.txt"),
            (TemplatePart::Body, Some(BodyVariant::Html)) => format!("{filename}.html"),
            _ => filename,
        }
    }
}

/// Abstract "load a template source by path" capability.
pub trait TemplateLoader: Send + Sync {
    /// Load the template source stored at `path`.
    ///
    /// Fails with [`CourierError::TemplateNotFound`] when no template exists
    /// at that path.
    fn load(&self, path: &str) -> Result<String>;
}

/// Loads templates from a directory tree on disk.
pub struct FilesystemLoader {
    root: PathBuf,
}

impl FilesystemLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl TemplateLoader for FilesystemLoader {
    fn load(&self, path: &str) -> Result<String> {
        let full = self.root.join(path.trim_start_matches('/'));
        if !full.is_file() {
            return Err(CourierError::TemplateNotFound(full.display().to_string()));
        }
        Ok(std::fs::read_to_string(&full)?)
    }
}

/// Loads templates embedded into the binary at compile time.
pub struct EmbeddedLoader {
    dir: &'static Dir<'static>,
}

impl EmbeddedLoader {
    /// Create a loader over an [`include_dir`] tree.
    pub fn new(dir: &'static Dir<'static>) -> Self {
        Self { dir }
    }
}

impl TemplateLoader for EmbeddedLoader {
    fn load(&self, path: &str) -> Result<String> {
        let path = path.trim_start_matches('/');
        let file = self
            .dir
            .get_file(path)
            .ok_or_else(|| CourierError::TemplateNotFound(path.to_string()))?;
        file.contents_utf8().map(str::to_owned).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("template '{path}' is not valid UTF-8"),
            )
            .into()
        })
    }
}

/// Caches loaded template sources keyed by [`TemplateKey`].
///
/// Shared across all composition calls. Concurrent first accesses on the same
/// key may both hit the loader; each loads a complete source, so whichever
/// entry lands in the map is safe to serve.
pub struct TemplateCache {
    loader: Arc<dyn TemplateLoader>,
    templates: RwLock<HashMap<TemplateKey, Arc<str>>>,
    engine: Handlebars<'static>,
}

impl TemplateCache {
    /// Create a cache backed by the given loader.
    pub fn new(loader: Arc<dyn TemplateLoader>) -> Self {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        Self {
            loader,
            templates: RwLock::new(HashMap::new()),
            engine,
        }
    }

    /// Resolve a key to its template source, loading it on first access.
    ///
    /// `base_path` is prepended to the derived filename; it is expected to be
    /// empty or to end with a path separator.
    pub fn resolve(&self, base_path: &str, key: &TemplateKey) -> Result<Arc<str>> {
        self.resolve_with(self.loader.as_ref(), base_path, key)
    }

    /// Resolve through an explicit loader instead of the cache's own.
    ///
    /// The cache is still consulted and filled: entries loaded through an
    /// override are visible to later calls under the same key.
    pub fn resolve_with(
        &self,
        loader: &dyn TemplateLoader,
        base_path: &str,
        key: &TemplateKey,
    ) -> Result<Arc<str>> {
        if let Some(found) = self
            .templates
            .read()
            .expect("template cache lock poisoned")
            .get(key)
        {
            return Ok(Arc::clone(found));
        }

        let path = format!("{}{}", base_path, key.filename());
        let source: Arc<str> = loader.load(&path)?.into();
        debug!(template = %path, "loaded template");

        self.templates
            .write()
            .expect("template cache lock poisoned")
            .entry(key.clone())
            .or_insert_with(|| Arc::clone(&source));

        Ok(source)
    }

    /// Resolve and render the template with the given context.
    pub fn render(
        &self,
        base_path: &str,
        key: &TemplateKey,
        context: &serde_json::Value,
    ) -> Result<String> {
        let source = self.resolve(base_path, key)?;
        Ok(self.engine.render_template(&source, context)?)
    }

    /// Resolve through an explicit loader and render.
    pub fn render_with(
        &self,
        loader: &dyn TemplateLoader,
        base_path: &str,
        key: &TemplateKey,
        context: &serde_json::Value,
    ) -> Result<String> {
        let source = self.resolve_with(loader, base_path, key)?;
        Ok(self.engine.render_template(&source, context)?)
    }
}
