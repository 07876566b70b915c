use agolabel::display::{RenderKind, Rendered};
use agolabel::locale::Direction;
use agolabel::ui::LineRenderer;

fn rendered(text: &str, kind: RenderKind) -> Rendered {
    Rendered {
        text: text.to_string(),
        kind,
    }
}

#[test]
fn test_plain_draw_rewrites_line() {
    let mut renderer = LineRenderer::new(Vec::new(), false);
    renderer
        .draw(&rendered("3m ago", RenderKind::Relative(Direction::Past)))
        .unwrap();
    renderer
        .draw(&rendered("4m ago", RenderKind::Relative(Direction::Past)))
        .unwrap();
    renderer.finish().unwrap();

    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(out.contains("3m ago"));
    assert!(out.ends_with("4m ago\n"));
    // no color codes
    assert!(!out.contains("\x1b[38"));
}

#[test]
fn test_styled_draw_colors_text() {
    let mut renderer = LineRenderer::new(Vec::new(), true);
    renderer
        .draw(&rendered("03/04/24 5:00 PM", RenderKind::Absolute))
        .unwrap();
    let out = String::from_utf8(renderer.into_inner()).unwrap();
    assert!(out.contains("03/04/24 5:00 PM"));
    assert!(out.contains("\x1b[38"));
}

#[test]
fn test_finish_without_draw_writes_nothing() {
    let mut renderer = LineRenderer::new(Vec::new(), false);
    renderer.finish().unwrap();
    assert!(renderer.into_inner().is_empty());
}
