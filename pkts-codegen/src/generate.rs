use std::io::Write;

use serde::Serialize;

use crate::config::{Generator, GeneratorConfig};
use crate::file_text::FileText;
use crate::render::{write_output, Renderer};
use crate::utils::Error;
use crate::{gtpv2_ie, reference_point};

/// Run a table generator over the loaded `table`.
///
/// The records are loaded, rendered through the configured template and
/// written to the configured output. When `echo` is given, a json dump of the
/// records and the rendered source are written to it first.
///
/// Nothing is written to the output file unless every stage succeeds.
/// Returns the number of generated records.
pub fn generate(
    generator: Generator,
    table: &FileText,
    config: &GeneratorConfig,
    echo: Option<&mut dyn Write>,
) -> Result<usize, Error> {
    match generator {
        Generator::ReferencePoints => {
            let records = reference_point::load(table.text())?;
            emit(generator, &records, config, echo)
        }
        Generator::Gtpv2InformationElements => {
            let records = gtpv2_ie::load(table.text())?;
            emit(generator, &records, config, echo)
        }
    }
}

fn emit<T: Serialize>(
    generator: Generator,
    records: &[T],
    config: &GeneratorConfig,
    mut echo: Option<&mut dyn Write>,
) -> Result<usize, Error> {
    if let Some(out) = echo.as_mut() {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out).map_err(Error::io("<stdout>"))?;
    }

    let renderer = Renderer::from_file(&config.template)?;
    let text = renderer.render(generator.template_var(), records)?;

    if let Some(out) = echo.as_mut() {
        write!(out, "{text}").map_err(Error::io("<stdout>"))?;
    }

    write_output(&config.output, &text)?;
    Ok(records.len())
}
