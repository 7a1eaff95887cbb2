use qrcode::{Color, EcLevel, QrCode};
use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Square grid of QR modules, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    size: usize,
    modules: Vec<bool>,
}

/// One dark module placed in a target pixel box.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QrCell {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl QrMatrix {
    pub fn build(url: &str, level: ErrorCorrection) -> Result<Self, AppError> {
        let code = QrCode::with_error_correction_level(url.as_bytes(), level.into())
            .map_err(|e| AppError::Render(format!("QR encoding failed: {}", e)))?;

        let size = code.width();
        let modules = code.to_colors().into_iter().map(|c| c == Color::Dark).collect();

        Ok(Self { size, modules })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.size || col >= self.size {
            return false;
        }
        self.modules[row * self.size + col]
    }

    /// Dark cells scaled so the whole grid fills `target_px`, relative to the box origin.
    pub fn cells(&self, target_px: f32) -> impl Iterator<Item = QrCell> + '_ {
        let cell = target_px / self.size as f32;
        (0..self.size).flat_map(move |row| {
            (0..self.size).filter(move |&col| self.get(row, col)).map(move |col| QrCell {
                x: col as f32 * cell,
                y: row as f32 * cell,
                size: cell,
            })
        })
    }

    /// Standalone SVG of the grid, white background, `target_px` square.
    pub fn to_svg(&self, target_px: u32) -> String {
        let mut svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}" shape-rendering="crispEdges"><rect width="{0}" height="{0}" fill="#ffffff"/>"##,
            target_px
        );
        for cell in self.cells(target_px as f32) {
            svg.push_str(&format!(
                r##"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="#000000"/>"##,
                cell.x, cell.y, cell.size, cell.size
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://teeky.vercel.app/inv/abc12";

    #[test]
    fn test_matrix_is_deterministic() {
        let a = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        let b = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_matrix_is_square_with_finder_pattern() {
        let m = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        assert!(m.size() >= 21);
        assert_eq!((m.size() - 17) % 4, 0);
        // top-left finder pattern corner is always dark
        assert!(m.get(0, 0));
        assert!(m.get(6, 6));
        assert!(!m.get(m.size(), 0));
    }

    #[test]
    fn test_higher_correction_never_shrinks() {
        let m = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        let h = QrMatrix::build(URL, ErrorCorrection::H).unwrap();
        assert!(h.size() >= m.size());
    }

    #[test]
    fn test_cells_fit_target_box() {
        let m = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        let dark = (0..m.size())
            .flat_map(|r| (0..m.size()).map(move |c| (r, c)))
            .filter(|&(r, c)| m.get(r, c))
            .count();
        let cells: Vec<QrCell> = m.cells(90.0).collect();
        assert_eq!(cells.len(), dark);
        assert!(cells.iter().all(|c| c.x + c.size <= 90.001 && c.y + c.size <= 90.001));
    }

    #[test]
    fn test_svg_has_one_rect_per_dark_module() {
        let m = QrMatrix::build(URL, ErrorCorrection::M).unwrap();
        let svg = m.to_svg(256);
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="256""#));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches(r##"fill="#ffffff""##).count(), 1);
        assert_eq!(svg.matches(r##"fill="#000000""##).count(), m.cells(256.0).count());
    }

    #[test]
    fn test_oversized_payload_is_render_error() {
        let huge = "x".repeat(8000);
        assert!(matches!(QrMatrix::build(&huge, ErrorCorrection::H), Err(AppError::Render(_))));
    }
}
