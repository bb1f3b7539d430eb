//! Renders an HTML file and prints the resulting instruction stream.
//!
//! Usage: `demo-app <file.html>`. Configuration is read from `vellum.toml`
//! in the working directory, with `VELLUM_*` environment overrides.

use anyhow::{Context, Result, bail};
use vellum_config::VellumConfig;
use vellum_ir::{
    ColorOptions, FontDescriptor, FontFamily, FontTable, PageRenderer, RenderOptions, TextOptions,
    render_html_file,
};

/// Prints each instruction as one line, in emission order.
struct ConsoleRenderer;

impl PageRenderer for ConsoleRenderer {
    fn set_font(&mut self, name: &str, size: f32) {
        println!("font {name} {size}pt");
    }

    fn fill_color(&mut self, color: &str, alpha: f32) {
        println!("color {color} alpha={alpha}");
    }

    fn text(&mut self, text: &str, options: &TextOptions) {
        let mut flags = Vec::new();
        if options.continued {
            flags.push("continued".to_string());
        }
        if options.underline {
            flags.push("underline".to_string());
        }
        if options.strike {
            flags.push("strike".to_string());
        }
        if let Some(link) = &options.link {
            flags.push(format!("link={link}"));
        }
        println!("text {text:?} [{}]", flags.join(" "));
    }

    fn line_break(&mut self) {
        println!("break");
    }

    fn move_down(&mut self, lines: f32) {
        println!("move-down {lines}");
    }
}

fn options_from_config(config: &VellumConfig) -> Result<RenderOptions> {
    let style = match &config.document.stylesheet {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read stylesheet {}", path.display()))?,
        ),
        None => None,
    };
    let families = config
        .fonts
        .iter()
        .map(|family| FontFamily {
            name: family.name.clone(),
            faces: family
                .faces
                .iter()
                .map(|face| FontDescriptor {
                    bold: face.bold,
                    italic: face.italic,
                    weight: face.weight,
                    source: face.source.clone(),
                })
                .collect(),
        })
        .collect();
    Ok(RenderOptions {
        style,
        colors: ColorOptions {
            base: config.colors.base.clone(),
            link: config.colors.link.clone(),
        },
        base_size: config.font_sizes.base,
        fonts: FontTable { families },
    })
}

fn main() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: demo-app <file.html>");
    };

    let config = VellumConfig::load();
    let options = options_from_config(&config)?;

    let mut renderer = ConsoleRenderer;
    render_html_file(std::path::Path::new(&path), &options, &mut renderer)?;
    Ok(())
}
