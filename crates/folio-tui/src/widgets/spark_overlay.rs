use ratatui::{layout::Rect, Frame};
use tokio::time::Instant;

use crate::app::App;
use crate::spark::SparkKind;

pub struct SparkOverlayWidget;

impl SparkOverlayWidget {
    /// Paint live spark cells directly into the frame buffer, on top of
    /// everything else
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if !app.sparks.is_active() {
            return;
        }
        let now = Instant::now();
        let theme = &app.theme;
        let buf = frame.buffer_mut();

        for burst in app.sparks.bursts() {
            for cell in burst.cells(now) {
                if cell.x < area.left() as i32
                    || cell.y < area.top() as i32
                    || cell.x >= area.right() as i32
                    || cell.y >= area.bottom() as i32
                {
                    continue;
                }
                let (glyph, color) = match cell.kind {
                    SparkKind::Center => ("✦", theme.spark_primary),
                    SparkKind::Primary => ("•", theme.spark_primary),
                    SparkKind::Secondary => ("·", theme.spark_secondary),
                    SparkKind::Ring => ("∘", theme.spark_secondary),
                };
                if let Some(target) = buf.cell_mut((cell.x as u16, cell.y as u16)) {
                    target.set_symbol(glyph).set_fg(color);
                }
            }
        }
    }
}
