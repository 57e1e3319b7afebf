use halftone_core::VectorRecorder;
use std::fmt::Write;

/// Serialize recorded dots as a standalone SVG document.
///
/// One `<circle>` per dot, in draw order, on a canvas of the recorded
/// frame size.
pub fn to_svg(recorder: &VectorRecorder) -> String {
    let mut svg = String::with_capacity(64 + recorder.dots().len() * 64);
    let _ = write!(
        svg,
        r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
        recorder.width(),
        recorder.height()
    );
    for dot in recorder.dots() {
        let _ = write!(
            svg,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
            dot.cx,
            dot.cy,
            dot.radius,
            dot.color.to_hex()
        );
    }
    svg.push_str("</svg>");
    svg
}

/// File name of the `index`-th exported frame.
pub fn frame_file_name(index: usize) -> String {
    format!("halftone_frame_{index:03}.svg")
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::{Dot, DotSink, Rgb};

    #[test]
    fn test_document_shape() {
        let mut recorder = VectorRecorder::new();
        recorder.begin_frame(20, 10);
        recorder.draw_dot(Dot {
            cx: 5.0,
            cy: 5.0,
            radius: 2.5,
            color: Rgb::new(255, 0, 16),
        });

        assert_eq!(
            to_svg(&recorder),
            r##"<svg width="20" height="10" xmlns="http://www.w3.org/2000/svg"><circle cx="5" cy="5" r="2.5" fill="#ff0010" /></svg>"##
        );
    }

    #[test]
    fn test_empty_frame() {
        let mut recorder = VectorRecorder::new();
        recorder.begin_frame(4, 4);
        assert_eq!(
            to_svg(&recorder),
            r#"<svg width="4" height="4" xmlns="http://www.w3.org/2000/svg"></svg>"#
        );
    }

    #[test]
    fn test_frame_file_names() {
        assert_eq!(frame_file_name(0), "halftone_frame_000.svg");
        assert_eq!(frame_file_name(42), "halftone_frame_042.svg");
        assert_eq!(frame_file_name(1234), "halftone_frame_1234.svg");
    }
}
