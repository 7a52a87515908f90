//! egui painter for an [`Analysis`]. Immediate mode: every frame repaints
//! from the current analysis, so nothing stale survives a new result.

use crate::analysis::role::{Decoration, Palette, RoleStyle, LEGEND};
use crate::analysis::{Analysis, AnnotatedUnit, FragmentGroup, Overlap, RenderSegment};
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, RichText, Stroke, Ui};

const SENTENCE_SIZE: f32 = 20.0;
const UNDERLINE_GAP: f32 = 3.0;

pub fn color(palette: Palette) -> Color32 {
    let (r, g, b) = palette.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn show_visualization(ui: &mut Ui, analysis: &Analysis) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for segment in &analysis.segments {
            match segment {
                RenderSegment::Plain { text, .. } => {
                    ui.label(RichText::new(text).size(SENTENCE_SIZE));
                }
                RenderSegment::Annotated(unit) => show_unit(ui, unit),
            }
        }
    });
}

fn show_unit(ui: &mut Ui, unit: &AnnotatedUnit) {
    let styled: Vec<(&Overlap, RoleStyle)> = unit
        .overlaps
        .iter()
        .map(|o| (o, o.component.style()))
        .collect();
    let underlined: Vec<&(&Overlap, RoleStyle)> = styled
        .iter()
        .filter(|(_, style)| style.decoration == Decoration::Underline)
        .collect();

    let font = FontId::proportional(SENTENCE_SIZE);
    let text_color = underlined
        .first()
        .map_or(ui.visuals().text_color(), |(_, style)| color(style.palette));

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 0.0;

        // Top labels; continuing pieces keep an empty row so depths line up.
        for (overlap, style) in styled
            .iter()
            .filter(|(_, style)| style.decoration != Decoration::Underline)
        {
            let label = if overlap.opens { style.label.as_ref() } else { "" };
            ui.label(RichText::new(label).small().strong().color(color(style.palette)));
        }

        // Outermost bracket first on the left, innermost first on the right.
        let mut job = LayoutJob::default();
        for (overlap, style) in styled.iter().rev() {
            if let Decoration::Brackets(shape) = style.decoration {
                if overlap.opens {
                    job.append(
                        &shape.glyphs().0.to_string(),
                        0.0,
                        TextFormat::simple(font.clone(), color(style.palette)),
                    );
                }
            }
        }
        job.append(&unit.text, 0.0, TextFormat::simple(font.clone(), text_color));
        for (overlap, style) in &styled {
            if let Decoration::Brackets(shape) = style.decoration {
                if overlap.closes {
                    job.append(
                        &shape.glyphs().1.to_string(),
                        0.0,
                        TextFormat::simple(font.clone(), color(style.palette)),
                    );
                }
            }
        }
        let rect = ui.label(job).rect;

        for (depth, (_, style)) in underlined.iter().enumerate() {
            let y = rect.bottom() + 1.0 + depth as f32 * UNDERLINE_GAP;
            ui.painter()
                .hline(rect.x_range(), y, Stroke::new(2.0, color(style.palette)));
        }
        ui.add_space(underlined.len() as f32 * UNDERLINE_GAP + 2.0);

        for (overlap, style) in &underlined {
            let label = if overlap.opens { style.label.as_ref() } else { "" };
            ui.label(RichText::new(label).small().strong().color(color(style.palette)));
        }
    });
}

pub fn show_legend(ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        for entry in LEGEND {
            let swatch = entry.glyph.map_or_else(|| "■".to_string(), |g| g.to_string());
            ui.label(RichText::new(swatch).strong().color(color(entry.palette)));
            ui.label(entry.caption);
            ui.add_space(12.0);
        }
    });
}

pub fn show_groups(ui: &mut Ui, groups: &[FragmentGroup]) {
    for group in groups {
        ui.label(
            RichText::new(&group.kind)
                .strong()
                .size(16.0)
                .color(color(Palette::Blue)),
        );
        for entry in &group.entries {
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new(&entry.text).strong());
                if let Some(role) = &entry.role {
                    ui.label(RichText::new(role).weak());
                }
            });
        }
        ui.separator();
    }
}

/// Shown when the model answered without a usable component list.
pub fn show_raw_response(ui: &mut Ui, sentence: &str, raw: &str) {
    ui.label(RichText::new("Original sentence:").strong());
    ui.label(RichText::new(sentence).size(SENTENCE_SIZE));
    ui.add_space(8.0);
    ui.label(RichText::new("Analysis:").strong());
    let mut raw_display = raw.to_string();
    ui.add(
        egui::TextEdit::multiline(&mut raw_display)
            .font(egui::TextStyle::Monospace)
            .desired_width(f32::INFINITY)
            .interactive(false),
    );
}
