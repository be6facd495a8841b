use itertools::Itertools;

use crate::map::{Directive, LabelKind};
use crate::projector::Point;
use crate::settings::{Color, Offset, UnderLayer};

pub const FONT_FAMILY: &str = "Verdana";

pub trait Renderer {
    type Output;

    fn render(&self, directives: &[Directive]) -> Self::Output;
}

/// Serializes directives into a standalone SVG document, one element per line.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    pub indent: usize,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, directives: &[Directive]) -> String {
        let mut out = String::new();
        out.push_str(r#"<?xml version="1.0" encoding="UTF-8" ?>"#);
        out.push('\n');
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1">"#);
        out.push('\n');

        for directive in directives {
            for element in elements(directive) {
                out.push_str(&" ".repeat(self.indent));
                out.push_str(&element);
                out.push('\n');
            }
        }

        out.push_str("</svg>");
        out
    }
}

fn elements(directive: &Directive) -> Vec<String> {
    match directive {
        Directive::Polyline {
            points,
            color,
            stroke_width,
        } => vec![polyline(points, color, *stroke_width)],
        Directive::Label {
            kind,
            text,
            position,
            offset,
            font_size,
            color,
            underlayer,
        } => {
            let head = text_head(*kind, *position, *offset, *font_size);
            let body = escape(text);

            let mut elements = Vec::with_capacity(2);
            if let Some(UnderLayer { color: under, width }) = underlayer {
                elements.push(format!(
                    r#"<text fill="{under}" stroke="{under}" stroke-width="{width}" stroke-linecap="round" stroke-linejoin="round" {head}>{body}</text>"#
                ));
            }
            elements.push(format!(r#"<text fill="{color}" {head}>{body}</text>"#));
            elements
        }
        Directive::Circle {
            center,
            radius,
            fill,
        } => vec![format!(
            r#"<circle cx="{}" cy="{}" r="{radius}" fill="{fill}"/>"#,
            center.x, center.y
        )],
    }
}

fn polyline(points: &[Point], color: &Color, stroke_width: f64) -> String {
    let coords = points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .join(" ");

    format!(
        r#"<polyline points="{coords}" fill="none" stroke="{color}" stroke-width="{stroke_width}" stroke-linecap="round" stroke-linejoin="round"/>"#
    )
}

fn text_head(kind: LabelKind, position: Point, offset: Offset, font_size: u32) -> String {
    let weight = match kind {
        LabelKind::Route => r#" font-weight="bold""#,
        LabelKind::Stop => "",
    };

    format!(
        r#"x="{}" y="{}" dx="{}" dy="{}" font-size="{font_size}" font-family="{FONT_FAMILY}"{weight}"#,
        position.x, position.y, offset.dx, offset.dy
    )
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
