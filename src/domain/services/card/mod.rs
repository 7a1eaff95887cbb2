//! Invitation cards: field defaults, layout selection, SVG composition and PNG
//! rasterization.
//!
//! Composition is pure string templating through tera; rasterization goes through
//! resvg and is CPU-bound, so HTTP handlers run it on the blocking pool.

pub mod datefmt;
pub mod template;
pub mod text;

use std::sync::Arc;

use chrono_tz::Tz;
use resvg::{tiny_skia, usvg};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, warn};

use crate::domain::models::invitation::Invitation;
use crate::domain::services::qr::{ErrorCorrection, QrCell, QrMatrix};
use crate::error::AppError;
use datefmt::{DisplayDate, StartsAt};
use template::{CardTemplate, QrBox, TemplateChoice};
use text::{truncate_words, wrap_capped};

pub const DEFAULT_COUPLE: &str = "Monsieur & Madame";
pub const DEFAULT_DESCRIPTION: &str =
    "Nous avons le plaisir de vous inviter à célébrer notre union dans une ambiance chaleureuse et élégante.";
pub const DEFAULT_LOCATION: &str = "Lieu de l'événement";
pub const STATUS_PRIVATE: &str = "Invitation privée";
pub const STATUS_PERSONAL: &str = "Invitation personnelle";

#[derive(Debug, Clone)]
pub struct CardFields {
    pub host_man_name: Option<String>,
    pub host_woman_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: StartsAt,
    pub theme: String,
}

impl From<&Invitation> for CardFields {
    fn from(inv: &Invitation) -> Self {
        Self {
            host_man_name: inv.host_man_name.clone(),
            host_woman_name: inv.host_woman_name.clone(),
            description: inv.description.clone(),
            location: inv.location.clone(),
            starts_at: StartsAt::At(inv.starts_at),
            theme: inv.theme.clone(),
        }
    }
}

/// Extra block for a guest's own card.
#[derive(Debug, Clone)]
pub struct PersonalBlock {
    pub guest_name: String,
    pub share_url: String,
}

#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub template: CardTemplate,
    pub width: u32,
    pub height: u32,
    pub svg: String,
}

#[derive(Serialize)]
struct QrContext {
    frame: QrBox,
    padding: f32,
    cells: Vec<QrCell>,
}

#[derive(Serialize)]
struct CardContext<'a> {
    width: u32,
    height: u32,
    couple: String,
    status_line: &'static str,
    description_lines: Vec<String>,
    date: String,
    time: String,
    location: String,
    footer: &'a str,
    guest_name: Option<String>,
    qr: Option<QrContext>,
}

pub struct CardRenderer {
    templates: Arc<Tera>,
    fontdb: Arc<usvg::fontdb::Database>,
    timezone: Tz,
    footer: String,
}

impl CardRenderer {
    pub fn new(templates: Arc<Tera>, fontdb: Arc<usvg::fontdb::Database>, timezone: Tz, app_base_url: &str) -> Self {
        let host = app_base_url
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        Self {
            templates,
            fontdb,
            timezone,
            footer: format!("Créée avec {}", host),
        }
    }

    pub fn load_fonts(font_dir: Option<&str>) -> Arc<usvg::fontdb::Database> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if let Some(dir) = font_dir {
            db.load_fonts_dir(dir);
        }
        debug!("Loaded {} font faces for card rendering", db.len());
        Arc::new(db)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn resolve_template(theme: &str) -> CardTemplate {
        let choice = CardTemplate::resolve(theme);
        if let TemplateChoice::Fallback { requested } = &choice {
            warn!("Unknown card theme {:?}, using {}", requested, CardTemplate::FALLBACK.key());
        }
        choice.template()
    }

    pub fn compose(&self, fields: &CardFields, personal: Option<&PersonalBlock>) -> Result<RenderedCard, AppError> {
        let template = Self::resolve_template(&fields.theme);
        let layout = template.layout();

        let couple = crate::domain::models::invitation::couple_title(
            fields.host_man_name.as_deref(),
            fields.host_woman_name.as_deref(),
        )
        .unwrap_or_else(|| DEFAULT_COUPLE.to_string());

        let description = non_empty(fields.description.as_deref()).unwrap_or(DEFAULT_DESCRIPTION);
        let description = truncate_words(description, layout.description_budget);
        let location = non_empty(fields.location.as_deref()).unwrap_or(DEFAULT_LOCATION);
        let when = DisplayDate::format(&fields.starts_at, self.timezone);

        let (status_line, guest_name, qr) = match personal {
            Some(block) => {
                let matrix = QrMatrix::build(&block.share_url, ErrorCorrection::M)?;
                let frame = layout.qr_box;
                let qr = QrContext {
                    frame,
                    padding: (frame.outer - frame.inner) / 2.0,
                    cells: matrix.cells(frame.inner).collect(),
                };
                (
                    STATUS_PERSONAL,
                    Some(truncate_words(block.guest_name.trim(), layout.guest_name_budget)),
                    Some(qr),
                )
            }
            None => (STATUS_PRIVATE, None, None),
        };

        let ctx = CardContext {
            width: layout.width,
            height: layout.height,
            couple,
            status_line,
            description_lines: wrap_capped(&description, layout.wrap_width, layout.max_description_lines),
            date: when.date,
            time: when.time,
            location: truncate_words(location, layout.location_budget),
            footer: &self.footer,
            guest_name,
            qr,
        };

        let context = Context::from_serialize(&ctx).map_err(|e| AppError::Render(e.to_string()))?;
        let svg = self
            .templates
            .render(template.template_name(), &context)
            .map_err(|e| AppError::Render(format!("{}: {:?}", template.key(), e)))?;

        Ok(RenderedCard {
            template,
            width: layout.width,
            height: layout.height,
            svg,
        })
    }

    pub fn rasterize(&self, card: &RenderedCard) -> Result<Vec<u8>, AppError> {
        let mut options = usvg::Options::default();
        options.fontdb = self.fontdb.clone();

        let tree = usvg::Tree::from_str(&card.svg, &options)
            .map_err(|e| AppError::Render(format!("SVG parse failed: {}", e)))?;

        let mut pixmap = tiny_skia::Pixmap::new(card.width, card.height)
            .ok_or_else(|| AppError::Render("Invalid canvas size".into()))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| AppError::Render(format!("PNG encoding failed: {}", e)))
    }

    pub fn render_png(&self, fields: &CardFields, personal: Option<&PersonalBlock>) -> Result<Vec<u8>, AppError> {
        let card = self.compose(fields, personal)?;
        self.rasterize(&card)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
