use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::utils::Error;

/// A parsed liquid template.
pub struct Renderer {
    template: liquid::Template,
}

impl Renderer {
    /// Load and parse the template file at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path.as_ref()).map_err(Error::io(path.as_ref()))?;
        Self::new(&source)
    }

    /// Parse the template `source`.
    pub fn new(source: &str) -> Result<Self, Error> {
        let template = liquid::ParserBuilder::with_stdlib().build()?.parse(source)?;
        Ok(Self { template })
    }

    /// Render the template with `records` bound to the global `var`.
    ///
    /// Referring to a variable or a field that does not exist fails the
    /// rendering.
    pub fn render<T: Serialize>(&self, var: &str, records: &[T]) -> Result<String, Error> {
        let mut globals = BTreeMap::new();
        globals.insert(var, records);
        let globals = liquid::to_object(&globals)?;

        Ok(self.template.render(&globals)?)
    }
}

/// Write the generated source to `path`, replacing any existing content.
pub fn write_output<P: AsRef<Path>>(path: P, text: &str) -> Result<(), Error> {
    let path = path.as_ref();
    std::fs::write(path, text).map_err(Error::io(path))?;

    info!(path = %path.display(), bytes = text.len(), "wrote generated source");
    Ok(())
}
