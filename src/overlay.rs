// ============================================================================
// OVERLAY - Dibujo de debug sobre el canvas de Quagga
// ============================================================================
// Solo presentación: no afecta a qué códigos se aceptan.
// ============================================================================

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::models::{ProcessedFrame, Region};

pub const CANDIDATE_STYLE: PathStyle = PathStyle {
    color: "purple",
    line_width: 2.0,
};

pub const BEST_MATCH_STYLE: PathStyle = PathStyle {
    color: "blue",
    line_width: 2.0,
};

pub const TEXT_FONT: &str = "24px Arial";
pub const TEXT_ORIGIN: (f64, f64) = (10.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
    pub line_width: f64,
}

/// Superficie donde se dibuja el overlay (canvas real o grabadora en tests)
pub trait OverlaySurface {
    /// Tamaño actual en píxeles
    fn dimensions(&self) -> (f64, f64);
    fn clear(&self, width: f64, height: f64);
    fn draw_path(&self, region: &Region, style: PathStyle);
    fn fill_text(&self, text: &str, x: f64, y: f64, font: &str);
}

/// Dibuja un frame procesado: candidatos, mejor match y texto decodificado
pub fn draw_frame<S: OverlaySurface + ?Sized>(surface: &S, frame: &ProcessedFrame) {
    let (width, height) = surface.dimensions();
    surface.clear(width, height);

    for region in frame.candidates() {
        surface.draw_path(region, CANDIDATE_STYLE);
    }

    if let Some(best) = &frame.best {
        surface.draw_path(best, BEST_MATCH_STYLE);
    }

    if let Some(code) = &frame.code {
        surface.fill_text(code, TEXT_ORIGIN.0, TEXT_ORIGIN.1, TEXT_FONT);
    }
}

/// Canvas `drawingBuffer` que crea Quagga dentro del elemento destino
pub struct CanvasOverlay {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasOverlay {
    pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }
}

impl OverlaySurface for CanvasOverlay {
    fn dimensions(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    // Equivalente a Quagga.ImageDebug.drawPath con ejes { x: 0, y: 1 }
    fn draw_path(&self, region: &Region, style: PathStyle) {
        let points = region.points();
        let Some(first) = points.first() else {
            return;
        };

        self.ctx.set_stroke_style_str(style.color);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_line_width(style.line_width);
        self.ctx.begin_path();
        self.ctx.move_to(first[0], first[1]);
        for point in &points[1..] {
            self.ctx.line_to(point[0], point[1]);
        }
        self.ctx.close_path();
        self.ctx.stroke();
    }

    fn fill_text(&self, text: &str, x: f64, y: f64, font: &str) {
        self.ctx.set_font(font);
        if let Err(e) = self.ctx.fill_text(text, x, y) {
            log::warn!("⚠️ [OVERLAY] No se pudo dibujar el texto: {:?}", e);
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        Clear(f64, f64),
        Path(Region, PathStyle),
        Text(String, f64, f64, String),
    }

    /// Superficie falsa que guarda las operaciones en orden
    #[derive(Default)]
    pub struct RecordingOverlay {
        pub size: (f64, f64),
        pub ops: RefCell<Vec<DrawOp>>,
    }

    impl RecordingOverlay {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                size: (width, height),
                ops: RefCell::new(Vec::new()),
            }
        }

        pub fn take(&self) -> Vec<DrawOp> {
            self.ops.borrow_mut().drain(..).collect()
        }
    }

    impl OverlaySurface for RecordingOverlay {
        fn dimensions(&self) -> (f64, f64) {
            self.size
        }

        fn clear(&self, width: f64, height: f64) {
            self.ops.borrow_mut().push(DrawOp::Clear(width, height));
        }

        fn draw_path(&self, region: &Region, style: PathStyle) {
            self.ops.borrow_mut().push(DrawOp::Path(region.clone(), style));
        }

        fn fill_text(&self, text: &str, x: f64, y: f64, font: &str) {
            self.ops
                .borrow_mut()
                .push(DrawOp::Text(text.to_string(), x, y, font.to_string()));
        }
    }

    // Los motores falsos devuelven el mismo overlay compartido
    impl OverlaySurface for Rc<RecordingOverlay> {
        fn dimensions(&self) -> (f64, f64) {
            (**self).dimensions()
        }

        fn clear(&self, width: f64, height: f64) {
            (**self).clear(width, height)
        }

        fn draw_path(&self, region: &Region, style: PathStyle) {
            (**self).draw_path(region, style)
        }

        fn fill_text(&self, text: &str, x: f64, y: f64, font: &str) {
            (**self).fill_text(text, x, y, font)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{DrawOp, RecordingOverlay};
    use super::*;

    fn region(x: f64) -> Region {
        Region(vec![[x, 0.0], [x + 5.0, 0.0], [x + 5.0, 5.0]])
    }

    #[test]
    fn draws_candidates_then_best_then_text() {
        let surface = RecordingOverlay::new(640.0, 300.0);
        let frame = ProcessedFrame {
            boxes: vec![region(0.0), region(10.0), region(20.0)],
            best: Some(region(10.0)),
            code: Some("4006381333931".to_string()),
        };

        draw_frame(&surface, &frame);

        assert_eq!(
            surface.take(),
            vec![
                DrawOp::Clear(640.0, 300.0),
                DrawOp::Path(region(0.0), CANDIDATE_STYLE),
                DrawOp::Path(region(20.0), CANDIDATE_STYLE),
                DrawOp::Path(region(10.0), BEST_MATCH_STYLE),
                DrawOp::Text("4006381333931".to_string(), 10.0, 20.0, "24px Arial".to_string()),
            ]
        );
    }

    #[test]
    fn blank_frame_only_clears() {
        let surface = RecordingOverlay::new(320.0, 240.0);
        draw_frame(&surface, &ProcessedFrame::default());
        assert_eq!(surface.take(), vec![DrawOp::Clear(320.0, 240.0)]);
    }

    #[test]
    fn best_match_without_candidates_is_drawn() {
        let surface = RecordingOverlay::new(100.0, 100.0);
        let frame = ProcessedFrame {
            best: Some(region(1.0)),
            ..ProcessedFrame::default()
        };
        draw_frame(&surface, &frame);
        assert_eq!(
            surface.take(),
            vec![
                DrawOp::Clear(100.0, 100.0),
                DrawOp::Path(region(1.0), BEST_MATCH_STYLE),
            ]
        );
    }
}
