use serde::Serialize;

/// Known card layouts. Invitations store the key as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTemplate {
    Classic,
    Minimalist,
    Elegant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateChoice {
    Known(CardTemplate),
    Fallback { requested: String },
}

impl TemplateChoice {
    pub fn template(&self) -> CardTemplate {
        match self {
            TemplateChoice::Known(t) => *t,
            TemplateChoice::Fallback { .. } => CardTemplate::FALLBACK,
        }
    }
}

/// Absolute geometry of a template. Text budgets are in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub description_budget: usize,
    pub location_budget: usize,
    pub guest_name_budget: usize,
    pub wrap_width: usize,
    pub max_description_lines: usize,
    pub qr_box: QrBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QrBox {
    pub x: f32,
    pub y: f32,
    pub outer: f32,
    pub inner: f32,
}

impl QrBox {
    /// 110px frame holding a 90px code, 20px off the bottom-right corner.
    const fn bottom_right(width: u32, height: u32) -> Self {
        Self {
            x: width as f32 - 130.0,
            y: height as f32 - 130.0,
            outer: 110.0,
            inner: 90.0,
        }
    }
}

impl CardTemplate {
    pub const FALLBACK: CardTemplate = CardTemplate::Minimalist;
    pub const ALL: [CardTemplate; 3] = [CardTemplate::Classic, CardTemplate::Minimalist, CardTemplate::Elegant];

    pub fn resolve(key: &str) -> TemplateChoice {
        match key.trim().to_ascii_lowercase().as_str() {
            "classic" => TemplateChoice::Known(CardTemplate::Classic),
            "minimalist" => TemplateChoice::Known(CardTemplate::Minimalist),
            "elegant" => TemplateChoice::Known(CardTemplate::Elegant),
            _ => TemplateChoice::Fallback { requested: key.to_string() },
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CardTemplate::Classic => "classic",
            CardTemplate::Minimalist => "minimalist",
            CardTemplate::Elegant => "elegant",
        }
    }

    pub fn template_name(&self) -> &'static str {
        match self {
            CardTemplate::Classic => "cards/classic.svg",
            CardTemplate::Minimalist => "cards/minimalist.svg",
            CardTemplate::Elegant => "cards/elegant.svg",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            CardTemplate::Classic => Layout {
                width: 1200,
                height: 630,
                description_budget: 240,
                location_budget: 60,
                guest_name_budget: 40,
                wrap_width: 45,
                max_description_lines: 6,
                qr_box: QrBox::bottom_right(1200, 630),
            },
            CardTemplate::Minimalist => Layout {
                width: 1200,
                height: 630,
                description_budget: 260,
                location_budget: 70,
                guest_name_budget: 40,
                wrap_width: 70,
                max_description_lines: 4,
                qr_box: QrBox::bottom_right(1200, 630),
            },
            CardTemplate::Elegant => Layout {
                width: 900,
                height: 630,
                description_budget: 200,
                location_budget: 50,
                guest_name_budget: 32,
                wrap_width: 48,
                max_description_lines: 5,
                qr_box: QrBox::bottom_right(900, 630),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        for t in CardTemplate::ALL {
            assert_eq!(CardTemplate::resolve(t.key()), TemplateChoice::Known(t));
        }
        assert_eq!(CardTemplate::resolve(" Elegant "), TemplateChoice::Known(CardTemplate::Elegant));
    }

    #[test]
    fn test_unknown_key_falls_back_visibly() {
        let choice = CardTemplate::resolve("neon");
        assert_eq!(choice, TemplateChoice::Fallback { requested: "neon".into() });
        assert_eq!(choice.template(), CardTemplate::Minimalist);
    }

    #[test]
    fn test_canvas_sizes() {
        assert_eq!((CardTemplate::Classic.layout().width, CardTemplate::Classic.layout().height), (1200, 630));
        assert_eq!((CardTemplate::Elegant.layout().width, CardTemplate::Elegant.layout().height), (900, 630));
    }

    #[test]
    fn test_capped_description_fits_every_layout() {
        use crate::domain::services::card::text::{truncate_words, wrap_capped, ELLIPSIS};
        let words = ["de", "célébrer", "Anticonstitutionnellement", "union", "chaleureuse", "à", "élégante"];
        for t in CardTemplate::ALL {
            let l = t.layout();
            for seed in 0..200usize {
                let text: Vec<&str> = (0..120).map(|i| words[(i * 7 + seed * 13 + i / 3) % words.len()]).collect();
                let description = truncate_words(&text.join(" "), l.description_budget);
                let lines = wrap_capped(&description, l.wrap_width, l.max_description_lines);
                assert!(lines.len() <= l.max_description_lines, "{:?}", t);
                assert!(lines.iter().all(|line| line.chars().count() <= l.wrap_width), "{:?}", t);
                assert!(lines.last().is_some_and(|line| line.ends_with(ELLIPSIS)), "{:?} lost its ellipsis", t);
            }
        }
    }
}
