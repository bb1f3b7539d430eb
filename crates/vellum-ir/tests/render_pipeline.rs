use anyhow::Result;
use vellum_ir::{
    RecordingRenderer, RenderInstruction, RenderOptions, TextOptions, render_html,
    render_html_file,
};

fn record(html: &str, options: &RenderOptions) -> Vec<RenderInstruction> {
    let mut recorder = RecordingRenderer::new();
    render_html(html, options, &mut recorder).expect("render never aborts on document content");
    recorder.into_instructions()
}

fn text_runs(instructions: &[RenderInstruction]) -> Vec<(String, TextOptions)> {
    instructions
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::Text { text, options } => Some((text.clone(), options.clone())),
            _ => None,
        })
        .collect()
}

fn fonts(instructions: &[RenderInstruction]) -> Vec<(String, f32)> {
    instructions
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::Font { name, size } => Some((name.clone(), *size)),
            _ => None,
        })
        .collect()
}

fn moves(instructions: &[RenderInstruction]) -> Vec<f32> {
    instructions
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::MoveDown(lines) => Some(*lines),
            _ => None,
        })
        .collect()
}

#[test]
fn paragraph_with_bold_child_end_to_end() -> Result<()> {
    let stream = record(
        r#"<p style="color:red">Hi <b>there</b></p>"#,
        &RenderOptions::default(),
    );

    let expected = vec![
        RenderInstruction::Font {
            name: "Helvetica".to_string(),
            size: 12.0,
        },
        RenderInstruction::FillColor {
            color: "#ff0000".to_string(),
            alpha: 1.0,
        },
        RenderInstruction::Text {
            text: "Hi ".to_string(),
            options: TextOptions {
                continued: true,
                ..TextOptions::default()
            },
        },
        RenderInstruction::Font {
            name: "Helvetica-Bold".to_string(),
            size: 12.0,
        },
        RenderInstruction::FillColor {
            color: "#ff0000".to_string(),
            alpha: 1.0,
        },
        RenderInstruction::Text {
            text: "there ".to_string(),
            options: TextOptions::default(),
        },
        // The paragraph's built-in 1em bottom margin at 12pt is one line.
        RenderInstruction::MoveDown(1.0),
    ];
    assert_eq!(stream, expected);
    Ok(())
}

#[test]
fn continuation_stops_at_block_boundaries() -> Result<()> {
    let stream = record(
        "<p><span>alpha</span><span>beta</span></p><p>gamma</p>",
        &RenderOptions::default(),
    );
    let runs = text_runs(&stream);
    assert_eq!(runs.len(), 3);
    assert!(runs[0].1.continued, "adjacent inline runs join");
    assert!(!runs[1].1.continued, "last run before a block boundary");
    assert!(!runs[2].1.continued, "last run of the document");
    // Both paragraphs close with their default bottom margin.
    assert_eq!(moves(&stream), vec![1.0, 1.0]);
    Ok(())
}

#[test]
fn explicit_break_interrupts_continuation() -> Result<()> {
    let stream = record("<div>one<br>two</div>", &RenderOptions::default());
    let runs = text_runs(&stream);
    assert_eq!(runs.len(), 2);
    assert!(!runs[0].1.continued, "a run before <br> is never continued");
    assert!(matches!(stream[3], RenderInstruction::LineBreak));
    Ok(())
}

#[test]
fn links_carry_target_underline_and_link_color() -> Result<()> {
    let stream = record(
        r#"<a href="https://example.com">visit</a>"#,
        &RenderOptions::default(),
    );
    let runs = text_runs(&stream);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].1.link.as_deref(), Some("https://example.com"));
    assert!(runs[0].1.underline, "built-in sheet underlines links");
    assert!(stream.iter().any(|i| matches!(
        i,
        RenderInstruction::FillColor { color, .. } if color == "blue"
    )));
    Ok(())
}

#[test]
fn explicit_color_overrides_link_color() -> Result<()> {
    let stream = record(
        r##"<a href="#x" style="color: green">visit</a>"##,
        &RenderOptions::default(),
    );
    assert!(stream.iter().any(|i| matches!(
        i,
        RenderInstruction::FillColor { color, .. } if color == "#008000"
    )));
    Ok(())
}

#[test]
fn rem_resolves_against_the_root_size_at_any_depth() -> Result<()> {
    let stream = record(
        r#"<div style="font-size: 30px"><span style="font-size: 2rem">x</span></div>"#,
        &RenderOptions::default(),
    );
    assert_eq!(fonts(&stream), vec![("Helvetica".to_string(), 24.0)]);
    Ok(())
}

#[test]
fn font_size_cascades_along_text_order_not_ancestry() -> Result<()> {
    // The second paragraph has no font-size of its own; it inherits the size
    // of the previously rendered run, not the tree default.
    let stream = record(
        r#"<p style="font-size: 20px">first</p><p>second</p>"#,
        &RenderOptions::default(),
    );
    let sizes: Vec<f32> = fonts(&stream).into_iter().map(|(_, size)| size).collect();
    assert_eq!(sizes, vec![20.0, 20.0]);
    Ok(())
}

#[test]
fn headings_scale_and_embolden_by_default() -> Result<()> {
    let stream = record("<h1>Title</h1>", &RenderOptions::default());
    assert_eq!(fonts(&stream), vec![("Helvetica-Bold".to_string(), 24.0)]);
    assert_eq!(moves(&stream), vec![0.67]);
    Ok(())
}

#[test]
fn caller_style_sits_between_builtins_and_document_sheets() -> Result<()> {
    let options = RenderOptions {
        style: Some("h1 { font-weight: normal; font-size: 3em }".to_string()),
        ..RenderOptions::default()
    };
    let stream = record(
        "<html><head><style>h1 { font-size: 1em }</style></head><body><h1>Plain</h1></body></html>",
        &options,
    );
    // Caller style overrides the built-in bold; the document sheet overrides
    // the caller's size.
    assert_eq!(fonts(&stream), vec![("Helvetica".to_string(), 12.0)]);
    Ok(())
}

#[test]
fn opacity_feeds_the_fill_alpha() -> Result<()> {
    let stream = record(
        r#"<p style="color: rgb(0,0,255); opacity: 0.5">dim</p>"#,
        &RenderOptions::default(),
    );
    assert!(stream.iter().any(|i| matches!(
        i,
        RenderInstruction::FillColor { color, alpha } if color == "#0000ff" && *alpha == 0.5
    )));
    Ok(())
}

#[test]
fn opacity_comes_from_the_owning_element_not_its_ancestors() -> Result<()> {
    // opacity set on an inline owner applies to its run; it does not
    // propagate from the paragraph to a sibling run.
    let stream = record(
        r#"<p style="opacity: 0.5">solid <span style="opacity: 0.25">faint</span></p>"#,
        &RenderOptions::default(),
    );
    let alphas: Vec<f32> = stream
        .iter()
        .filter_map(|i| match i {
            RenderInstruction::FillColor { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect();
    assert_eq!(alphas, vec![0.5, 0.25]);
    Ok(())
}

#[test]
fn leading_newlines_strip_only_after_block_boundaries() -> Result<()> {
    let stream = record(
        "<p>\nfirst</p><p>\nsecond <span>\ninline</span></p>",
        &RenderOptions::default(),
    );
    let runs = text_runs(&stream);
    let texts: Vec<&str> = runs.iter().map(|(text, _)| text.as_str()).collect();
    assert_eq!(texts, vec!["first ", "second ", "\ninline "]);
    Ok(())
}

#[test]
fn semantic_tags_set_decorations() -> Result<()> {
    let stream = record("<p><s>gone</s> <u>kept</u></p>", &RenderOptions::default());
    let runs = text_runs(&stream);
    assert_eq!(runs.len(), 2);
    assert!(runs[0].1.strike);
    assert!(!runs[0].1.underline);
    assert!(runs[1].1.underline);
    assert!(!runs[1].1.strike);
    Ok(())
}

#[test]
fn pixel_margins_convert_through_the_px_point_ratio() -> Result<()> {
    let stream = record(
        r#"<div style="margin-bottom: 12px">x</div>"#,
        &RenderOptions::default(),
    );
    assert_eq!(moves(&stream), vec![0.75]);
    Ok(())
}

#[test]
fn empty_documents_emit_nothing() -> Result<()> {
    assert!(record("", &RenderOptions::default()).is_empty());
    assert!(record("<div>   \n  </div>", &RenderOptions::default()).is_empty());
    Ok(())
}

#[test]
fn renders_from_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("letter.html");
    std::fs::write(&path, "<p>Dear reader,</p>")?;

    let mut recorder = RecordingRenderer::new();
    render_html_file(&path, &RenderOptions::default(), &mut recorder)?;
    let runs = text_runs(recorder.instructions());
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].0, "Dear reader, ");
    Ok(())
}

#[test]
fn missing_file_is_a_fatal_error() {
    let mut recorder = RecordingRenderer::new();
    let err = render_html_file(
        std::path::Path::new("/nonexistent/letter.html"),
        &RenderOptions::default(),
        &mut recorder,
    );
    assert!(err.is_err());
    assert!(recorder.instructions().is_empty());
}
