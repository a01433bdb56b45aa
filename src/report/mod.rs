//! The per-employee file information sheet.
//!
//! [`FileInformationSheet`] gathers and formats what the sheet prints, and
//! [`ReportRenderer`] lays it out as a print-ready HTML document with page
//! breaks between the profile and the histories.

mod sheet;

pub use sheet::{
    FileInformationSheet, SheetContract, SheetHeader, SheetLeave, SheetProfile, SheetTransfer,
};

use rust_embed::Embed;
use tera::Tera;
use tracing::debug;

use crate::error::{AdminError, AdminResult};

/// Template used for the file information sheet.
pub const FILE_INFORMATION_SHEET: &str = "file_information_sheet.html.tera";

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Renders report view models with the embedded templates.
#[derive(Debug)]
pub struct ReportRenderer {
    tera: Tera,
}

impl ReportRenderer {
    /// Loads every embedded template.
    pub fn new() -> AdminResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html.tera"]);

        for name in EmbeddedTemplates::iter() {
            let file = EmbeddedTemplates::get(&name).ok_or_else(|| AdminError::Template {
                message: format!("embedded template vanished: {}", name),
            })?;
            let source = std::str::from_utf8(&file.data).map_err(|e| AdminError::Template {
                message: format!("{} is not UTF-8: {}", name, e),
            })?;
            tera.add_raw_template(&name, source)?;
            debug!(template = %name, "Loaded report template");
        }

        Ok(Self { tera })
    }

    /// Renders the file information sheet to HTML.
    pub fn render_sheet(&self, sheet: &FileInformationSheet) -> AdminResult<String> {
        let context = tera::Context::from_serialize(sheet)?;
        Ok(self.tera.render(FILE_INFORMATION_SHEET, &context)?)
    }
}
